//! `RuntimeBuilder` for configuring a [`Runtime`].

use rustc_hash::FxHashMap;

use super::random::{RandomLink, DEFAULT_SEED};
use super::Runtime;
use crate::print_handler::{stdout_handler, SharedPrintHandler};
use crate::scope::ContextStore;
use aplus_ir::ROOT_CONTEXT;

/// Default limit on nested user-function calls.
pub const DEFAULT_RECURSION_LIMIT: usize = 1024;

/// Builder for [`Runtime`] instances.
///
/// Defaults: current context `.`, recursion limit 1024, random link seed
/// 16807 and output to stdout.
pub struct RuntimeBuilder {
    context: String,
    recursion_limit: usize,
    random_seed: u64,
    print_handler: Option<SharedPrintHandler>,
}

impl RuntimeBuilder {
    pub fn new() -> Self {
        RuntimeBuilder {
            context: ROOT_CONTEXT.to_owned(),
            recursion_limit: DEFAULT_RECURSION_LIMIT,
            random_seed: DEFAULT_SEED,
            print_handler: None,
        }
    }

    /// Context that unqualified names resolve in.
    #[must_use]
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    /// Maximum depth of nested user-function calls before a Stack error.
    #[must_use]
    pub fn recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = limit;
        self
    }

    #[must_use]
    pub fn random_seed(mut self, seed: u64) -> Self {
        self.random_seed = seed;
        self
    }

    /// Destination of `print`. Stdout when unset.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    pub fn build(self) -> Runtime {
        Runtime {
            contexts: ContextStore::new(),
            current_context: self.context,
            callbacks: FxHashMap::default(),
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            call_depth: 0,
            max_call_depth: self.recursion_limit,
            random: RandomLink::new(self.random_seed),
        }
    }
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
