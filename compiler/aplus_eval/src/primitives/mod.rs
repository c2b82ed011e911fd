//! Primitive functions.
//!
//! Every primitive is a zero-sized (or table-only) static singleton
//! implementing [`MonadicFunction`] or [`DyadicFunction`]; the registry
//! hands out `&'static dyn` references to them. Built-ins are always called
//! with the fixed `(runtime, right[, left])` shape.
//!
//! - `scalar`: table-driven scalar primitives run by the broadcast engine
//! - `structural`: shape and selection primitives
//! - `system`: primitives touching the runtime (print, value, signal, random)
//! - `operators`: derived functions (reduce, scan, outer and inner products)

pub mod operators;
pub mod scalar;
pub mod structural;
pub mod system;

use crate::broadcast::{DyadicScalar, MonadicScalar};
use crate::errors::EvalResult;
use crate::runtime::Runtime;
use crate::value::Value;

/// A primitive applied to one argument.
pub trait MonadicFunction: Sync {
    fn name(&self) -> &'static str;

    /// Built by a reduction, scan or product operator.
    fn is_derived(&self) -> bool {
        false
    }

    fn execute(&self, runtime: &mut Runtime, right: &Value) -> EvalResult;
}

/// A primitive applied to two arguments.
pub trait DyadicFunction: Sync {
    fn name(&self) -> &'static str;

    fn is_derived(&self) -> bool {
        false
    }

    fn execute(&self, runtime: &mut Runtime, right: &Value, left: &Value) -> EvalResult;
}

impl MonadicFunction for MonadicScalar {
    fn name(&self) -> &'static str {
        MonadicScalar::name(self)
    }

    fn execute(&self, _runtime: &mut Runtime, right: &Value) -> EvalResult {
        self.apply(right)
    }
}

impl DyadicFunction for DyadicScalar {
    fn name(&self) -> &'static str {
        DyadicScalar::name(self)
    }

    fn execute(&self, _runtime: &mut Runtime, right: &Value, left: &Value) -> EvalResult {
        self.apply(right, left)
    }
}
