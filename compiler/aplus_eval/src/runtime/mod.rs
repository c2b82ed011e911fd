//! The runtime instance: variable storage, callbacks, configuration and the
//! top-level entry point.
//!
//! Every piece of mutable evaluation state belongs to a [`Runtime`];
//! independent runtimes share nothing. A runtime is single-threaded: hosts
//! serialize access themselves.

mod builder;
mod random;

use rustc_hash::FxHashMap;

pub use builder::{RuntimeBuilder, DEFAULT_RECURSION_LIMIT};
pub use random::{RandomLink, DEFAULT_SEED};

use crate::compile::{Compile, CompileScope};
use crate::errors::{
    non_function_error, stack_error, ControlAction, EvalResult, Fault, ReturnTarget, RuntimeError,
};
use crate::indexing;
use crate::invoke;
use crate::print_handler::SharedPrintHandler;
use crate::primitives::structural::pick_path;
use crate::scope::{ContextStore, Frame};
use crate::value::Value;
use aplus_ir::Node;

/// A function watching a variable, with the data passed back to it.
#[derive(Clone, Debug)]
struct Callback {
    function: Value,
    static_data: Value,
}

/// An A+ runtime.
pub struct Runtime {
    contexts: ContextStore,
    current_context: String,
    callbacks: FxHashMap<(String, String), Callback>,
    print_handler: SharedPrintHandler,
    call_depth: usize,
    max_call_depth: usize,
    random: RandomLink,
}

impl Runtime {
    /// A runtime with default configuration.
    pub fn new() -> Self {
        RuntimeBuilder::new().build()
    }

    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    #[inline]
    pub fn current_context(&self) -> &str {
        &self.current_context
    }

    pub fn set_current_context(&mut self, context: impl Into<String>) {
        self.current_context = context.into();
    }

    pub fn contexts(&self) -> &ContextStore {
        &self.contexts
    }

    #[inline]
    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    pub fn random(&mut self) -> &mut RandomLink {
        &mut self.random
    }

    /// Number of user-function calls currently active.
    #[inline]
    pub fn call_depth(&self) -> usize {
        self.call_depth
    }

    // Variables

    pub fn get_variable(&self, context: &str, name: &str) -> EvalResult {
        self.contexts.get(context, name)
    }

    /// Store a variable without firing callbacks.
    pub fn set_variable(&mut self, context: &str, name: &str, value: Value) {
        self.contexts.set(context, name, value);
    }

    /// Whole assignment: store a copy of `value`, then fire the variable's
    /// callback with a null index.
    pub fn assign_variable(&mut self, context: &str, name: &str, value: &Value) -> EvalResult {
        self.contexts.set(context, name, value.clone_value());
        self.fire_callback(context, name, value, Value::Null, Value::Null)?;
        Ok(value.clone())
    }

    /// `name[indices] := value` on a global.
    pub fn assign_indexed(
        &mut self,
        context: &str,
        name: &str,
        indices: &[Option<Value>],
        value: &Value,
    ) -> EvalResult {
        if indices.is_empty() {
            return self.assign_variable(context, name, value);
        }
        let target = self.contexts.get_mut(context, name)?;
        indexing::set_indexed(target, indices, value)?;
        self.fire_callback(context, name, value, index_argument(indices), Value::Null)?;
        Ok(value.clone())
    }

    /// `(path pick name) := value` on a global.
    pub fn assign_picked(
        &mut self,
        context: &str,
        name: &str,
        path: &Value,
        value: &Value,
    ) -> EvalResult {
        let target = self.contexts.get_mut(context, name)?;
        indexing::set_picked(target, &pick_path(path), value)?;
        self.fire_callback(context, name, value, Value::Null, path.clone())?;
        Ok(value.clone())
    }

    // Callbacks

    /// Watch `context.name` with `function`, called after every assignment
    /// to the variable.
    pub fn set_callback(&mut self, context: &str, name: &str, function: Value, static_data: Value) {
        self.callbacks.insert(
            (context.to_owned(), name.to_owned()),
            Callback {
                function,
                static_data,
            },
        );
    }

    pub fn remove_callback(&mut self, context: &str, name: &str) {
        self.callbacks
            .remove(&(context.to_owned(), name.to_owned()));
    }

    /// Invoke the callback on `context.name`, if any.
    ///
    /// Candidate arguments in declaration order are the static data, the
    /// new value, the index, the pick path, the context and the variable
    /// name; the callback receives as many as it declares.
    fn fire_callback(
        &mut self,
        context: &str,
        name: &str,
        value: &Value,
        index: Value,
        path: Value,
    ) -> EvalResult<()> {
        let key = (context.to_owned(), name.to_owned());
        let Some(callback) = self.callbacks.get(&key).cloned() else {
            return Ok(());
        };
        let Value::Func(function) = &callback.function else {
            return Err(non_function_error(name));
        };
        tracing::debug!(context, name, callback = function.name(), "firing callback");
        let candidates = [
            callback.static_data,
            value.clone(),
            index,
            path,
            Value::symbol(context),
            Value::symbol(name),
        ];
        let accepted = function.valence().saturating_sub(1).min(candidates.len());
        let mut arguments: Vec<Value> = candidates.into_iter().take(accepted).collect();
        arguments.reverse();
        self.invoke(&callback.function, &arguments).map(drop)
    }

    // Evaluation

    /// Invoke `function` with arguments in reversed (right-first) order.
    pub fn invoke(&mut self, function: &Value, arguments: &[Value]) -> EvalResult {
        invoke::invoke(self, function, arguments)
    }

    /// Run `f` one user-function call deeper, failing past the recursion
    /// limit.
    pub(crate) fn nested_call<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> EvalResult<T>,
    ) -> EvalResult<T> {
        if self.call_depth >= self.max_call_depth {
            return Err(stack_error(self.max_call_depth));
        }
        self.call_depth += 1;
        let result = f(self);
        self.call_depth -= 1;
        result
    }

    /// Compile and run a syntax tree in the current context.
    #[tracing::instrument(level = "debug", skip_all, fields(context = %self.current_context))]
    pub fn execute(&mut self, node: &Node) -> Result<Value, RuntimeError> {
        let scope = CompileScope::top_level(&self.current_context);
        let exec = node.compile(&scope)?;
        let mut frame = Frame::empty();
        settle(exec.run(self, &mut frame))
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert the outcome of a top-level run. A return aimed at the top level
/// yields its value.
pub(crate) fn settle(result: EvalResult) -> Result<Value, RuntimeError> {
    match result {
        Ok(value) => Ok(value),
        Err(ControlAction::Return { target, value }) if target == ReturnTarget::ROOT => Ok(value),
        Err(ControlAction::Return { .. }) => Err(Fault::UnmatchedReturn.into()),
        Err(ControlAction::Error(err)) => Err(err.into()),
        Err(ControlAction::Fault(fault)) => Err(fault.into()),
    }
}

/// The index argument of a callback: the single index, or a vector of
/// boxed indices with elided axes as null.
fn index_argument(indices: &[Option<Value>]) -> Value {
    match indices {
        [single] => single.clone().unwrap_or(Value::Null),
        _ => Value::vector(
            indices
                .iter()
                .map(|index| Value::enclose(index.clone().unwrap_or(Value::Null)))
                .collect(),
        ),
    }
}

/// Install a `tracing` subscriber driven by `RUST_LOG`.
///
/// Safe to call repeatedly; does nothing when `RUST_LOG` is unset.
pub fn init_tracing() {
    static TRACING_INIT: std::sync::Once = std::sync::Once::new();
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
