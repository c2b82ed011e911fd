//! Derived functions: reduction, scan, outer product and inner product over
//! scalar primitives.
//!
//! Reduction folds from the right along the first axis, so `+/ a b c` is
//! `a + (b + c)`. An empty argument reduces to the primitive's identity.

use smallvec::smallvec;

use super::scalar;
use super::{DyadicFunction, MonadicFunction};
use crate::broadcast::DyadicScalar;
use crate::errors::{length_error, EvalResult};
use crate::runtime::Runtime;
use crate::value::{Shape, Value, ValueType};

/// Identity element of a reduction.
#[derive(Copy, Clone, Debug)]
pub enum Identity {
    Int(i64),
    Float(f64),
}

impl Identity {
    fn value(self) -> Value {
        match self {
            Identity::Int(i) => Value::Int(i),
            Identity::Float(f) => Value::Float(f),
        }
    }

    fn filled(self, shape: &[usize]) -> EvalResult {
        let count = shape.iter().product();
        Value::array(shape, vec![self.value(); count], ValueType::Integer)
    }
}

fn reduce_cells(function: &DyadicScalar, identity: Identity, argument: &Value) -> EvalResult {
    if argument.is_null() {
        return Ok(identity.value());
    }
    if !argument.is_array() {
        return Ok(argument.clone());
    }
    let mut cells = argument.major_cells()?;
    let Some(mut acc) = cells.pop() else {
        return identity.filled(&argument.shape()[1..]);
    };
    for cell in cells.iter().rev() {
        acc = function.apply(&acc, cell)?;
    }
    Ok(acc)
}

/// `f/` over a scalar primitive.
pub struct Reduce {
    name: &'static str,
    function: &'static DyadicScalar,
    identity: Identity,
}

impl MonadicFunction for Reduce {
    fn name(&self) -> &'static str {
        self.name
    }

    fn is_derived(&self) -> bool {
        true
    }

    fn execute(&self, _runtime: &mut Runtime, right: &Value) -> EvalResult {
        reduce_cells(self.function, self.identity, right)
    }
}

/// `f\` over a scalar primitive: the reductions of every prefix.
pub struct Scan {
    name: &'static str,
    function: &'static DyadicScalar,
}

impl MonadicFunction for Scan {
    fn name(&self) -> &'static str {
        self.name
    }

    fn is_derived(&self) -> bool {
        true
    }

    fn execute(&self, _runtime: &mut Runtime, right: &Value) -> EvalResult {
        if !right.is_array() {
            return Ok(right.clone());
        }
        let cells = right.major_cells()?;
        let mut results = Vec::with_capacity(cells.len());
        let mut acc: Option<Value> = None;
        for cell in cells {
            let next = match acc {
                None => cell,
                Some(previous) => self.function.apply(&cell, &previous)?,
            };
            results.push(next.clone());
            acc = Some(next);
        }
        if results.is_empty() {
            return Ok(right.clone());
        }
        Value::from_cells(results, right.ty())
    }
}

/// `l ∘.f r`: every item of `l` against every item of `r`.
pub struct Outer {
    name: &'static str,
    function: &'static DyadicScalar,
}

impl DyadicFunction for Outer {
    fn name(&self) -> &'static str {
        self.name
    }

    fn is_derived(&self) -> bool {
        true
    }

    fn execute(&self, _runtime: &mut Runtime, right: &Value, left: &Value) -> EvalResult {
        let mut shape: Shape = left.shape().iter().copied().collect();
        shape.extend_from_slice(right.shape());
        let mut items = Vec::new();
        for item in left.to_items() {
            let row = self.function.apply(right, &item)?;
            items.extend(row.to_items());
        }
        Value::array(&shape, items, right.ty())
    }
}

/// `l f.g r`: `f/` over `g` applied along the last axis of `l` and the
/// first axis of `r`.
pub struct Inner {
    name: &'static str,
    reduce: &'static DyadicScalar,
    combine: &'static DyadicScalar,
    identity: Identity,
}

/// Shape and items of an inner-product operand; an atom stretches to the
/// other operand's inner length.
fn operand(value: &Value, inner: Option<usize>) -> (Shape, Vec<Value>) {
    if value.is_array() {
        return (value.shape().iter().copied().collect(), value.to_items());
    }
    let length = inner.unwrap_or(1);
    (smallvec![length], vec![value.clone(); length])
}

impl DyadicFunction for Inner {
    fn name(&self) -> &'static str {
        self.name
    }

    fn is_derived(&self) -> bool {
        true
    }

    fn execute(&self, _runtime: &mut Runtime, right: &Value, left: &Value) -> EvalResult {
        let left_inner = left.is_array().then(|| left.shape().last().copied()).flatten();
        let right_inner = right.is_array().then(|| right.shape().first().copied()).flatten();
        let (l_shape, l_items) = operand(left, right_inner);
        let (r_shape, r_items) = operand(right, left_inner);

        let k = l_shape.last().copied().unwrap_or(1);
        if r_shape.first().copied().unwrap_or(1) != k {
            return Err(length_error(self.name));
        }
        let outer_left = &l_shape[..l_shape.len().saturating_sub(1)];
        let outer_right = r_shape.get(1..).unwrap_or(&[]);
        let rows: usize = outer_left.iter().product();
        let columns: usize = outer_right.iter().product();

        let mut items = Vec::with_capacity(rows * columns);
        for i in 0..rows {
            let row = &l_items[i * k..(i + 1) * k];
            for j in 0..columns {
                let mut acc: Option<Value> = None;
                for t in (0..k).rev() {
                    let term = self.combine.apply(&r_items[t * columns + j], &row[t])?;
                    acc = Some(match acc {
                        None => term,
                        Some(total) => self.reduce.apply(&total, &term)?,
                    });
                }
                items.push(acc.unwrap_or_else(|| self.identity.value()));
            }
        }

        let mut shape: Shape = outer_left.iter().copied().collect();
        shape.extend_from_slice(outer_right);
        Value::array(&shape, items, ValueType::Integer)
    }
}

macro_rules! reductions {
    ($($reduce:ident, $scan:ident, $function:path, $label:literal, $identity:expr;)*) => {
        $(
            pub static $reduce: Reduce = Reduce {
                name: concat!($label, " reduce"),
                function: &$function,
                identity: $identity,
            };
            pub static $scan: Scan = Scan {
                name: concat!($label, " scan"),
                function: &$function,
            };
        )*
    };
}

reductions! {
    REDUCE_ADD, SCAN_ADD, scalar::ADD, "add", Identity::Int(0);
    REDUCE_MULTIPLY, SCAN_MULTIPLY, scalar::MULTIPLY, "multiply", Identity::Int(1);
    REDUCE_AND, SCAN_AND, scalar::AND, "and", Identity::Int(1);
    REDUCE_OR, SCAN_OR, scalar::OR, "or", Identity::Int(0);
    REDUCE_MAX, SCAN_MAX, scalar::MAX, "max", Identity::Float(f64::NEG_INFINITY);
    REDUCE_MIN, SCAN_MIN, scalar::MIN, "min", Identity::Float(f64::INFINITY);
}

macro_rules! outer_products {
    ($($outer:ident, $function:path, $label:literal;)*) => {
        $(
            pub static $outer: Outer = Outer {
                name: concat!($label, " outer product"),
                function: &$function,
            };
        )*
    };
}

outer_products! {
    OUTER_ADD, scalar::ADD, "add";
    OUTER_SUBTRACT, scalar::SUBTRACT, "subtract";
    OUTER_MULTIPLY, scalar::MULTIPLY, "multiply";
    OUTER_DIVIDE, scalar::DIVIDE, "divide";
    OUTER_MAX, scalar::MAX, "max";
    OUTER_MIN, scalar::MIN, "min";
    OUTER_RESIDUE, scalar::RESIDUE, "residue";
    OUTER_POWER, scalar::POWER, "power";
    OUTER_EQUAL, scalar::EQUAL, "equal";
    OUTER_NOT_EQUAL, scalar::NOT_EQUAL, "not equal";
    OUTER_LESS_THAN, scalar::LESS_THAN, "less than";
    OUTER_LESS_THAN_OR_EQUAL, scalar::LESS_THAN_OR_EQUAL, "less than or equal";
    OUTER_GREATER_THAN, scalar::GREATER_THAN, "greater than";
    OUTER_GREATER_THAN_OR_EQUAL, scalar::GREATER_THAN_OR_EQUAL, "greater than or equal";
}

pub static INNER_ADD_MULTIPLY: Inner = Inner {
    name: "add-multiply inner product",
    reduce: &scalar::ADD,
    combine: &scalar::MULTIPLY,
    identity: Identity::Int(0),
};

pub static INNER_MAX_ADD: Inner = Inner {
    name: "max-add inner product",
    reduce: &scalar::MAX,
    combine: &scalar::ADD,
    identity: Identity::Float(f64::NEG_INFINITY),
};

pub static INNER_MIN_ADD: Inner = Inner {
    name: "min-add inner product",
    reduce: &scalar::MIN,
    combine: &scalar::ADD,
    identity: Identity::Float(f64::INFINITY),
};

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
