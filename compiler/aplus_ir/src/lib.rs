//! A+ IR - syntax tree consumed by the execution core
//!
//! This crate contains the data structures the parser produces and the
//! evaluator compiles:
//! - Primitive tokens (`TokenKind`, `Token`)
//! - Literal constants and constant lists
//! - Identifiers, unqualified or context-qualified
//! - The `Node` tree
//! - A read-only `Visitor` for compile-time analyses
//!
//! # Hash Compatibility
//!
//! Every type is `Clone + Eq + Hash + Debug` so parsed trees can be used as
//! cache keys. Numeric literals are stored as text for that reason.
//! With the `cache` feature, every type also derives serde traits.

pub mod ast;
pub mod constant;
pub mod token;
pub mod visitor;

pub use ast::{FunctionDef, Identifier, Node, ROOT_CONTEXT};
pub use constant::{Constant, ConstantKind, ConstantList};
pub use token::{Token, TokenKind};
pub use visitor::{assigned_names, walk_function_def, walk_node, Visitor};
