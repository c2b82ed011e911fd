//! Compiled user functions.

use super::exec::Exec;
use crate::errors::{valence_error, ControlAction, EvalResult, ReturnTarget};
use crate::runtime::Runtime;
use crate::scope::Frame;
use crate::value::Value;

/// A user function: its body compiled once, against a frame of local slots.
///
/// Parameters occupy the first `arity` slots. A `Return` in the body
/// unwinds to `target` and becomes the call's result.
pub struct CompiledFunction {
    name: String,
    context: String,
    arity: usize,
    slots: usize,
    body: Exec,
    target: ReturnTarget,
}

impl CompiledFunction {
    pub fn new(
        name: String,
        context: String,
        arity: usize,
        slots: usize,
        body: Exec,
        target: ReturnTarget,
    ) -> Self {
        CompiledFunction {
            name,
            context,
            arity,
            slots,
            body,
            target,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Context the function was defined in.
    #[inline]
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Number of declared parameters.
    #[inline]
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Call with `arguments` in reversed order: the last parameter's value
    /// comes first.
    #[tracing::instrument(level = "trace", skip_all, fields(function = %self.name))]
    pub fn call(&self, runtime: &mut Runtime, arguments: &[Value]) -> EvalResult {
        if arguments.len() != self.arity {
            return Err(valence_error(&self.name));
        }
        runtime.nested_call(|runtime| {
            let mut frame = Frame::with_slots(self.slots);
            for (slot, argument) in arguments.iter().rev().enumerate() {
                frame.set(slot, argument.clone_value());
            }
            match self.body.run(runtime, &mut frame) {
                Err(ControlAction::Return { target, value }) if target == self.target => Ok(value),
                result => result,
            }
        })
    }
}
