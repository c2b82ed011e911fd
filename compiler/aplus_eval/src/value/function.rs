//! Function references.

use std::fmt;
use std::rc::Rc;

use bitflags::bitflags;

use super::Value;
use crate::compile::CompiledFunction;
use crate::errors::{valence_error, EvalResult};
use crate::primitives::{DyadicFunction, MonadicFunction};
use crate::runtime::Runtime;

/// Declared valence of every built-in: runtime handle, right, left.
pub const BUILTIN_VALENCE: usize = 3;

bitflags! {
    /// Classification of a function reference.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
    pub struct FunctionFlags: u8 {
        const BUILTIN = 1;
        /// Built by a reduction, scan or product operator.
        const DERIVED = 1 << 1;
        /// User-defined operator.
        const OPERATOR = 1 << 2;
        const DYADIC_OPERATOR = 1 << 3;
    }
}

/// The callable behind a function reference.
#[derive(Clone)]
pub enum Callable {
    Monadic(&'static dyn MonadicFunction),
    Dyadic(&'static dyn DyadicFunction),
    User(Rc<CompiledFunction>),
}

/// A callable value.
#[derive(Clone)]
pub struct FunctionRef {
    name: Rc<str>,
    valence: usize,
    flags: FunctionFlags,
    callable: Callable,
}

impl FunctionRef {
    pub fn monadic(function: &'static dyn MonadicFunction) -> Self {
        let mut flags = FunctionFlags::BUILTIN;
        flags.set(FunctionFlags::DERIVED, function.is_derived());
        FunctionRef {
            name: Rc::from(function.name()),
            valence: BUILTIN_VALENCE,
            flags,
            callable: Callable::Monadic(function),
        }
    }

    pub fn dyadic(function: &'static dyn DyadicFunction) -> Self {
        let mut flags = FunctionFlags::BUILTIN;
        flags.set(FunctionFlags::DERIVED, function.is_derived());
        FunctionRef {
            name: Rc::from(function.name()),
            valence: BUILTIN_VALENCE,
            flags,
            callable: Callable::Dyadic(function),
        }
    }

    /// A user function. Its valence counts the implicit runtime handle.
    pub fn user(function: Rc<CompiledFunction>) -> Self {
        FunctionRef {
            name: Rc::from(function.name()),
            valence: function.arity() + 1,
            flags: FunctionFlags::empty(),
            callable: Callable::User(function),
        }
    }

    #[must_use]
    pub fn with_flags(mut self, flags: FunctionFlags) -> Self {
        self.flags |= flags;
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn valence(&self) -> usize {
        self.valence
    }

    #[inline]
    pub fn flags(&self) -> FunctionFlags {
        self.flags
    }

    #[inline]
    pub fn is_builtin(&self) -> bool {
        self.flags.contains(FunctionFlags::BUILTIN)
    }

    #[inline]
    pub fn callable(&self) -> &Callable {
        &self.callable
    }

    /// Call a built-in with the fixed (right, left) shape. An absent left
    /// argument selects monadic application.
    pub fn call_builtin(
        &self,
        runtime: &mut Runtime,
        right: &Value,
        left: Option<&Value>,
    ) -> EvalResult {
        match (&self.callable, left) {
            (Callable::Monadic(function), None) => function.execute(runtime, right),
            (Callable::Dyadic(function), Some(left)) => function.execute(runtime, right, left),
            _ => Err(valence_error(&self.name)),
        }
    }
}

impl PartialEq for FunctionRef {
    fn eq(&self, other: &Self) -> bool {
        if self.valence != other.valence || self.name != other.name {
            return false;
        }
        match (&self.callable, &other.callable) {
            (Callable::User(a), Callable::User(b)) => Rc::ptr_eq(a, b),
            (Callable::User(_), _) | (_, Callable::User(_)) => false,
            _ => true,
        }
    }
}

impl fmt::Debug for FunctionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionRef")
            .field("name", &self.name)
            .field("valence", &self.valence)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}
