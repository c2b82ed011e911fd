//! A+ Eval - execution core for the A+ array language.
//!
//! This crate compiles A+ syntax trees and runs them against a runtime.
//!
//! # Architecture
//!
//! The execution core uses:
//! - `Value`: atoms, boxes, function references and shaped arrays
//! - `broadcast`: table-driven, rank-polymorphic scalar dispatch
//! - `PrimitiveRegistry`: token kinds to static primitive singletons, with
//!   glyph reinterpretation for dyadic use
//! - `ContextStore`: two-level variable storage (context, then name)
//! - `Compile`: syntax tree to executable units, evaluated right to left
//! - `Runtime`: variables, callbacks, configuration and the entry point
//!
//! # Errors
//!
//! Language errors are [`AplError`]s with stable numeric codes; a protected
//! block turns them into data. Constructors live in [`errors`].

mod broadcast;
pub mod compile;
pub mod errors;
mod indexing;
mod invoke;
mod package;
pub mod primitives;
mod print_handler;
mod registry;
mod runtime;
mod scope;
mod stack;
mod strand;
pub mod tolerance;
pub mod value;

pub use broadcast::{DyadicScalar, MonadicScalar};
pub use errors::{AplError, ControlAction, ErrorKind, EvalResult, Fault, ReturnTarget, RuntimeError};
pub use indexing::{get_indexed, set_indexed, set_picked};
pub use invoke::invoke;
pub use package::{export_functions, ExportedFunction};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, PrintHandler, SharedPrintHandler,
};
pub use registry::{
    dyadic_form, reinterpret_as_dyadic, resolve_dyadic, resolve_monadic, PrimitiveRegistry,
    REWRITES,
};
pub use runtime::{
    init_tracing, RandomLink, Runtime, RuntimeBuilder, DEFAULT_RECURSION_LIMIT, DEFAULT_SEED,
};
pub use scope::{ContextStore, Frame};
pub use strand::{build_array, build_strand};
pub use value::{FunctionRef, Value, ValueType};
