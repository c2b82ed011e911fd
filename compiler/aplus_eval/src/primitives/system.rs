//! Primitives that reach into the runtime: output, variables by name,
//! user-raised errors and the random link.

use super::structural::{count_of, integer_of};
use super::{DyadicFunction, MonadicFunction};
use crate::errors::{domain_error, signal, type_error, EvalResult};
use crate::runtime::Runtime;
use crate::stack::ensure_sufficient_stack;
use crate::value::{Value, ValueType};
use aplus_ir::Identifier;

pub struct Print;
pub static PRINT: Print = Print;

impl MonadicFunction for Print {
    fn name(&self) -> &'static str {
        "print"
    }

    /// Write the argument through the print handler and return it.
    fn execute(&self, runtime: &mut Runtime, right: &Value) -> EvalResult {
        runtime.print_handler().println(&right.to_string());
        Ok(right.clone())
    }
}

pub struct DefaultFormat;
pub static DEFAULT_FORMAT: DefaultFormat = DefaultFormat;

impl MonadicFunction for DefaultFormat {
    fn name(&self) -> &'static str {
        "default format"
    }

    /// The printed form of the argument as a character vector.
    fn execute(&self, _runtime: &mut Runtime, right: &Value) -> EvalResult {
        let text = right.to_string();
        Ok(Value::typed_vector(
            text.chars().map(Value::Char).collect(),
            ValueType::Char,
        ))
    }
}

pub struct Signal;
pub static SIGNAL: Signal = Signal;

impl MonadicFunction for Signal {
    fn name(&self) -> &'static str {
        "signal"
    }

    /// Raise an error whose message is the argument's text.
    fn execute(&self, _runtime: &mut Runtime, right: &Value) -> EvalResult {
        let text = match right {
            Value::Sym(name) => name.to_string(),
            other => other.to_text().unwrap_or_else(|| other.to_string()),
        };
        Err(signal(text))
    }
}

pub struct Stop;
pub static STOP: Stop = Stop;

impl MonadicFunction for Stop {
    fn name(&self) -> &'static str {
        "stop"
    }

    fn execute(&self, _runtime: &mut Runtime, right: &Value) -> EvalResult {
        Ok(right.clone())
    }
}

/// Resolve a symbol naming a variable, relative to `context`.
pub(crate) fn variable_name(symbol: &Value, context: &str) -> EvalResult<(String, String)> {
    let text = symbol
        .as_symbol()
        .map(str::to_owned)
        .or_else(|| symbol.to_text())
        .ok_or_else(|| type_error("value"))?;
    let identifier = Identifier::parse(&text);
    Ok((
        identifier.context.unwrap_or_else(|| context.to_owned()),
        identifier.name,
    ))
}

/// Resolve a `(context, name)` pair of symbols.
pub(crate) fn context_name(right: &Value, left: &Value) -> EvalResult<(String, String)> {
    let context = left.as_symbol().ok_or_else(|| type_error("value"))?;
    let (_, name) = variable_name(right, context)?;
    let context = if context.is_empty() {
        aplus_ir::ROOT_CONTEXT
    } else {
        context
    };
    Ok((context.to_owned(), name))
}

pub struct ValueOf;
pub static VALUE: ValueOf = ValueOf;

impl MonadicFunction for ValueOf {
    fn name(&self) -> &'static str {
        "value"
    }

    /// The variable named by a symbol, `` `ctx.name `` or `` `name ``.
    fn execute(&self, runtime: &mut Runtime, right: &Value) -> EvalResult {
        let (context, name) = variable_name(right, runtime.current_context())?;
        runtime.get_variable(&context, &name)
    }
}

pub struct ValueInContext;
pub static VALUE_IN_CONTEXT: ValueInContext = ValueInContext;

impl DyadicFunction for ValueInContext {
    fn name(&self) -> &'static str {
        "value in context"
    }

    /// `` `ctx value `name ``.
    fn execute(&self, runtime: &mut Runtime, right: &Value, left: &Value) -> EvalResult {
        let (context, name) = context_name(right, left)?;
        runtime.get_variable(&context, &name)
    }
}

pub struct Roll;
pub static ROLL: Roll = Roll;

fn roll(runtime: &mut Runtime, value: &Value) -> EvalResult {
    ensure_sufficient_stack(|| match value {
        Value::Array(array) => {
            let items = array
                .items()
                .iter()
                .map(|item| roll(runtime, item))
                .collect::<EvalResult<Vec<_>>>()?;
            Value::array(array.shape(), items, ValueType::Integer)
        }
        Value::Null => Ok(Value::Null),
        atom => {
            let bound = integer_of(atom, "roll")?;
            let bound = u64::try_from(bound)
                .ok()
                .filter(|&b| b > 0)
                .ok_or_else(|| domain_error("roll"))?;
            let draw = runtime.random().below(bound);
            Ok(Value::Int(i64::try_from(draw).unwrap_or(i64::MAX)))
        }
    })
}

impl MonadicFunction for Roll {
    fn name(&self) -> &'static str {
        "roll"
    }

    /// A random integer in `0..n` for every item `n`.
    fn execute(&self, runtime: &mut Runtime, right: &Value) -> EvalResult {
        roll(runtime, right)
    }
}

pub struct Deal;
pub static DEAL: Deal = Deal;

impl DyadicFunction for Deal {
    fn name(&self) -> &'static str {
        "deal"
    }

    /// `k deal n`: `k` distinct integers drawn from `0..n`.
    fn execute(&self, runtime: &mut Runtime, right: &Value, left: &Value) -> EvalResult {
        let count = count_of(left, "deal")?;
        let bound = count_of(right, "deal")?;
        if count > bound {
            return Err(domain_error("deal"));
        }
        let drawn = runtime.random().deal(count, bound);
        Ok(Value::typed_vector(
            drawn
                .into_iter()
                .map(|v| Value::Int(i64::try_from(v).unwrap_or(i64::MAX)))
                .collect(),
            ValueType::Integer,
        ))
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
