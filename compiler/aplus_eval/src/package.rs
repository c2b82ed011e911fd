//! Export of top-level function definitions for a hosting layer.
//!
//! A host that packages A+ functions as native entry points needs each one
//! as a unit it can call with a runtime and arguments in source order. The
//! packaging step itself lives outside this crate.

use std::rc::Rc;

use aplus_ir::{FunctionDef, Node};

use crate::compile::{CompileScope, CompiledFunction};
use crate::errors::{AplError, RuntimeError};
use crate::runtime::{settle, Runtime};
use crate::value::{FunctionRef, Value};

/// A compiled top-level function, callable without defining it in a
/// context first.
#[derive(Clone)]
pub struct ExportedFunction {
    function: Rc<CompiledFunction>,
}

impl ExportedFunction {
    #[inline]
    pub fn name(&self) -> &str {
        self.function.name()
    }

    #[inline]
    pub fn context(&self) -> &str {
        self.function.context()
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.function.arity()
    }

    /// The function as a value, e.g. to store in a context.
    pub fn to_value(&self) -> Value {
        Value::function(FunctionRef::user(Rc::clone(&self.function)))
    }

    /// Call with `arguments` in source (left-to-right) order.
    pub fn call(&self, runtime: &mut Runtime, arguments: &[Value]) -> Result<Value, RuntimeError> {
        let reversed: Vec<Value> = arguments.iter().rev().cloned().collect();
        settle(runtime.invoke(&self.to_value(), &reversed))
    }
}

/// Compile every top-level function definition in `tree`.
///
/// `tree` is either a single definition or an expression list; other
/// top-level statements are skipped.
pub fn export_functions(tree: &Node, context: &str) -> Result<Vec<ExportedFunction>, AplError> {
    let scope = CompileScope::top_level(context);
    top_level_definitions(tree)
        .map(|def| {
            scope
                .compile_function(def)
                .map(|function| ExportedFunction { function })
        })
        .collect()
}

fn top_level_definitions(tree: &Node) -> impl Iterator<Item = &FunctionDef> {
    let nodes: &[Node] = match tree {
        Node::ExpressionList(items) => items,
        other => std::slice::from_ref(other),
    };
    nodes.iter().filter_map(|node| match node {
        Node::FunctionDef(def) => Some(def),
        _ => None,
    })
}
