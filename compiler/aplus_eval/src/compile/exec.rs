//! Executable units and their interpreter.
//!
//! Arguments are evaluated right to left, as A+ reads: the right operand of
//! a dyadic primitive runs before the left, and strand and argument lists
//! are evaluated from their last item to their first.

use std::rc::Rc;

use super::function::CompiledFunction;
use crate::errors::{domain_error, length_error, ControlAction, EvalResult, ReturnTarget};
use crate::indexing;
use crate::primitives::structural::pick_path;
use crate::primitives::system::{context_name, variable_name};
use crate::runtime::Runtime;
use crate::scope::Frame;
use crate::stack::ensure_sufficient_stack;
use crate::strand::build_strand;
use crate::value::{FunctionRef, Value};

/// Resolved storage location of a name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Binding {
    Global {
        context: String,
        name: String,
    },
    /// A function local; `context` is the defining context, for messages.
    Local {
        slot: usize,
        context: String,
        name: String,
    },
}

/// A compiled node.
pub enum Exec {
    Literal(Value),
    Variable(Binding),
    /// Raises the stored error when run.
    Fail(ControlAction),
    Primitive {
        function: FunctionRef,
        right: Box<Exec>,
        left: Option<Box<Exec>>,
    },
    Invoke {
        function: Box<Exec>,
        arguments: Vec<Exec>,
    },
    Strand(Vec<Exec>),
    Sequence(Vec<Exec>),
    Index {
        item: Box<Exec>,
        indices: Vec<Option<Exec>>,
    },
    Assign {
        binding: Binding,
        value: Box<Exec>,
    },
    AssignIndexed {
        binding: Binding,
        indices: Vec<Option<Exec>>,
        value: Box<Exec>,
    },
    AssignStrand {
        bindings: Vec<Binding>,
        value: Box<Exec>,
    },
    AssignPicked {
        binding: Binding,
        path: Box<Exec>,
        value: Box<Exec>,
    },
    /// Assignment to the variable named by a symbol, optionally in an
    /// explicit context.
    AssignByName {
        context: Option<Box<Exec>>,
        name: Box<Exec>,
        value: Box<Exec>,
    },
    Define {
        context: String,
        name: String,
        function: Rc<CompiledFunction>,
    },
    If {
        condition: Box<Exec>,
        then_branch: Box<Exec>,
        else_branch: Option<Box<Exec>>,
    },
    While {
        condition: Box<Exec>,
        body: Box<Exec>,
    },
    Return {
        target: ReturnTarget,
        value: Box<Exec>,
    },
    Protected {
        body: Box<Exec>,
        target: ReturnTarget,
    },
}

/// Boolean test of a condition: the first scalar as a whole number,
/// non-zero meaning true.
fn truth(value: &Value) -> EvalResult<bool> {
    value
        .first_scalar()
        .and_then(|scalar| scalar.to_restricted_whole_number())
        .map(|n| n != 0)
        .ok_or_else(|| domain_error("condition"))
}

/// Evaluate `items` right to left; the result is in reversed order.
fn run_reversed(items: &[Exec], runtime: &mut Runtime, frame: &mut Frame) -> EvalResult<Vec<Value>> {
    items
        .iter()
        .rev()
        .map(|item| item.run(runtime, frame))
        .collect()
}

fn run_indices(
    indices: &[Option<Exec>],
    runtime: &mut Runtime,
    frame: &mut Frame,
) -> EvalResult<Vec<Option<Value>>> {
    let mut values: Vec<Option<Value>> = indices
        .iter()
        .rev()
        .map(|index| index.as_ref().map(|i| i.run(runtime, frame)).transpose())
        .collect::<EvalResult<_>>()?;
    values.reverse();
    Ok(values)
}

impl Binding {
    fn read(&self, runtime: &Runtime, frame: &Frame) -> EvalResult {
        match self {
            Binding::Global { context, name } => runtime.get_variable(context, name),
            Binding::Local {
                slot,
                context,
                name,
            } => frame.get(*slot, context, name),
        }
    }

    fn write(&self, runtime: &mut Runtime, frame: &mut Frame, value: &Value) -> EvalResult {
        match self {
            Binding::Global { context, name } => runtime.assign_variable(context, name, value),
            Binding::Local { slot, .. } => {
                frame.set(*slot, value.clone_value());
                Ok(value.clone())
            }
        }
    }

    fn write_indexed(
        &self,
        runtime: &mut Runtime,
        frame: &mut Frame,
        indices: &[Option<Value>],
        value: &Value,
    ) -> EvalResult {
        match self {
            Binding::Global { context, name } => {
                runtime.assign_indexed(context, name, indices, value)
            }
            Binding::Local {
                slot,
                context,
                name,
            } => indexing::set_indexed(frame.get_mut(*slot, context, name)?, indices, value),
        }
    }

    fn write_picked(
        &self,
        runtime: &mut Runtime,
        frame: &mut Frame,
        path: &Value,
        value: &Value,
    ) -> EvalResult {
        match self {
            Binding::Global { context, name } => {
                runtime.assign_picked(context, name, path, value)
            }
            Binding::Local {
                slot,
                context,
                name,
            } => {
                let target = frame.get_mut(*slot, context, name)?;
                indexing::set_picked(target, &pick_path(path), value)?;
                Ok(value.clone())
            }
        }
    }
}

impl Exec {
    /// Run this unit.
    pub fn run(&self, runtime: &mut Runtime, frame: &mut Frame) -> EvalResult {
        ensure_sufficient_stack(|| self.run_inner(runtime, frame))
    }

    fn run_inner(&self, runtime: &mut Runtime, frame: &mut Frame) -> EvalResult {
        match self {
            Exec::Literal(value) => Ok(value.clone()),
            Exec::Variable(binding) => binding.read(runtime, frame),
            Exec::Fail(action) => Err(action.clone()),

            Exec::Primitive {
                function,
                right,
                left,
            } => {
                let right = right.run(runtime, frame)?;
                let left = match left {
                    Some(left) => Some(left.run(runtime, frame)?),
                    None => None,
                };
                function.call_builtin(runtime, &right, left.as_ref())
            }
            Exec::Invoke {
                function,
                arguments,
            } => {
                let arguments = run_reversed(arguments, runtime, frame)?;
                let function = function.run(runtime, frame)?;
                runtime.invoke(&function, &arguments)
            }

            Exec::Strand(items) => Ok(build_strand(run_reversed(items, runtime, frame)?)),
            Exec::Sequence(items) => {
                let mut result = Value::Null;
                for item in items {
                    result = item.run(runtime, frame)?;
                }
                Ok(result)
            }
            Exec::Index { item, indices } => {
                let indices = run_indices(indices, runtime, frame)?;
                let item = item.run(runtime, frame)?;
                indexing::get_indexed(&item, &indices)
            }

            Exec::Assign { binding, value } => {
                let value = value.run(runtime, frame)?;
                binding.write(runtime, frame, &value)
            }
            Exec::AssignIndexed {
                binding,
                indices,
                value,
            } => {
                let value = value.run(runtime, frame)?;
                let indices = run_indices(indices, runtime, frame)?;
                binding.write_indexed(runtime, frame, &indices, &value)
            }
            Exec::AssignStrand { bindings, value } => {
                let value = value.run(runtime, frame)?;
                let parts = value.to_items();
                if !value.is_array() || parts.len() != bindings.len() {
                    return Err(length_error("strand assignment"));
                }
                for (binding, part) in bindings.iter().zip(parts.iter()) {
                    binding.write(runtime, frame, &part.disclose())?;
                }
                Ok(value)
            }
            Exec::AssignPicked {
                binding,
                path,
                value,
            } => {
                let value = value.run(runtime, frame)?;
                let path = path.run(runtime, frame)?;
                binding.write_picked(runtime, frame, &path, &value)
            }
            Exec::AssignByName {
                context,
                name,
                value,
            } => {
                let value = value.run(runtime, frame)?;
                let name = name.run(runtime, frame)?;
                let (context, name) = match context {
                    Some(context) => context_name(&name, &context.run(runtime, frame)?)?,
                    None => variable_name(&name, runtime.current_context())?,
                };
                runtime.assign_variable(&context, &name, &value)
            }

            Exec::Define {
                context,
                name,
                function,
            } => {
                let value = Value::function(FunctionRef::user(Rc::clone(function)));
                runtime.set_variable(context, name, value.clone());
                Ok(value)
            }
            Exec::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if truth(&condition.run(runtime, frame)?)? {
                    then_branch.run(runtime, frame)
                } else if let Some(else_branch) = else_branch {
                    else_branch.run(runtime, frame)
                } else {
                    Ok(Value::Null)
                }
            }
            Exec::While { condition, body } => {
                let mut result = Value::Null;
                while truth(&condition.run(runtime, frame)?)? {
                    result = body.run(runtime, frame)?;
                }
                Ok(result)
            }
            Exec::Return { target, value } => Err(ControlAction::Return {
                target: *target,
                value: value.run(runtime, frame)?,
            }),
            Exec::Protected { body, target } => run_protected(body, *target, runtime, frame),
        }
    }
}

/// Run `body`, turning its outcome into `(value; 0)` or
/// `(message; code)`. Faults and returns aimed elsewhere pass through.
fn run_protected(
    body: &Exec,
    target: ReturnTarget,
    runtime: &mut Runtime,
    frame: &mut Frame,
) -> EvalResult {
    match body.run(runtime, frame) {
        Ok(value) => Ok(build_strand(vec![Value::Int(0), value])),
        Err(ControlAction::Return { target: t, value }) if t == target => {
            Ok(build_strand(vec![Value::Int(0), value]))
        }
        Err(ControlAction::Error(err)) => {
            tracing::debug!(kind = %err.kind, message = %err.message, "protected block caught error");
            Ok(build_strand(vec![
                Value::Int(err.code()),
                Value::string(&err.message),
            ]))
        }
        Err(other) => Err(other),
    }
}
