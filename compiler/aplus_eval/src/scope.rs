//! Variable storage.
//!
//! Globals live in a two-level map, context name to variable name to value,
//! owned by one runtime instance. Reads never create entries; a write to a
//! missing context creates it.
//!
//! Function locals live in a [`Frame`] of slots fixed at compile time.

use rustc_hash::FxHashMap;

use crate::errors::{value_error, EvalResult};
use crate::value::Value;

/// Context-qualified global variables.
#[derive(Default, Debug)]
pub struct ContextStore {
    contexts: FxHashMap<String, FxHashMap<String, Value>>,
}

impl ContextStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up `context.name`. A missing context and a missing variable
    /// are both Value errors.
    pub fn get(&self, context: &str, name: &str) -> EvalResult {
        self.contexts
            .get(context)
            .and_then(|variables| variables.get(name))
            .cloned()
            .ok_or_else(|| value_error(context, name))
    }

    /// Mutable access to an existing variable.
    pub fn get_mut(&mut self, context: &str, name: &str) -> EvalResult<&mut Value> {
        self.contexts
            .get_mut(context)
            .and_then(|variables| variables.get_mut(name))
            .ok_or_else(|| value_error(context, name))
    }

    pub fn set(&mut self, context: &str, name: &str, value: Value) {
        let variables = self.contexts.entry(context.to_owned()).or_insert_with(|| {
            tracing::debug!(context, "creating context");
            FxHashMap::default()
        });
        variables.insert(name.to_owned(), value);
    }

    pub fn contains(&self, context: &str, name: &str) -> bool {
        self.contexts
            .get(context)
            .is_some_and(|variables| variables.contains_key(name))
    }

    pub fn has_context(&self, context: &str) -> bool {
        self.contexts.contains_key(context)
    }

    /// Names of every context, in no particular order.
    pub fn context_names(&self) -> impl Iterator<Item = &str> {
        self.contexts.keys().map(String::as_str)
    }
}

/// Local variable slots of one function activation.
#[derive(Debug, Default)]
pub struct Frame {
    slots: Vec<Option<Value>>,
}

impl Frame {
    /// A frame with no locals, used at top level.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_slots(count: usize) -> Self {
        Frame {
            slots: vec![None; count],
        }
    }

    /// Read slot `slot`; an unset local reports `name` in `context`.
    pub fn get(&self, slot: usize, context: &str, name: &str) -> EvalResult {
        self.slots
            .get(slot)
            .and_then(Option::as_ref)
            .cloned()
            .ok_or_else(|| value_error(context, name))
    }

    pub fn get_mut(&mut self, slot: usize, context: &str, name: &str) -> EvalResult<&mut Value> {
        self.slots
            .get_mut(slot)
            .and_then(Option::as_mut)
            .ok_or_else(|| value_error(context, name))
    }

    pub fn set(&mut self, slot: usize, value: Value) {
        if slot >= self.slots.len() {
            self.slots.resize(slot + 1, None);
        }
        self.slots[slot] = Some(value);
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
