//! Syntax-tree visitor.
//!
//! Default `visit_*` methods call the matching `walk_*` function, which
//! traverses children. Override a `visit_*` method to act on specific
//! nodes; call the `walk_*` function from the override to keep descending.

use crate::ast::{FunctionDef, Identifier, Node};

/// Read-only syntax-tree visitor.
pub trait Visitor<'ast> {
    fn visit_node(&mut self, node: &'ast Node) {
        walk_node(self, node);
    }

    fn visit_identifier(&mut self, ident: &'ast Identifier) {
        let _ = ident;
    }

    fn visit_function_def(&mut self, def: &'ast FunctionDef) {
        walk_function_def(self, def);
    }

    /// Visit the target side of an assignment. The default walks it like
    /// any other expression.
    fn visit_assign_target(&mut self, target: &'ast Node) {
        self.visit_node(target);
    }
}

pub fn walk_node<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, node: &'ast Node) {
    match node {
        Node::Constant(_) | Node::ConstantList(_) | Node::Characters(_) | Node::Null => {}
        Node::Identifier(ident) => visitor.visit_identifier(ident),
        Node::Monadic { argument, .. } => visitor.visit_node(argument),
        Node::Dyadic { left, right, .. } => {
            visitor.visit_node(left);
            visitor.visit_node(right);
        }
        Node::Invoke {
            function,
            arguments,
        } => {
            visitor.visit_node(function);
            for arg in arguments {
                visitor.visit_node(arg);
            }
        }
        Node::Strand(items) | Node::ExpressionList(items) => {
            for item in items {
                visitor.visit_node(item);
            }
        }
        Node::Assign { target, value } => {
            visitor.visit_node(value);
            visitor.visit_assign_target(target);
        }
        Node::Index { item, indices } => {
            visitor.visit_node(item);
            for index in indices.iter().flatten() {
                visitor.visit_node(index);
            }
        }
        Node::FunctionDef(def) => visitor.visit_function_def(def),
        Node::If {
            condition,
            then_branch,
            else_branch,
        } => {
            visitor.visit_node(condition);
            visitor.visit_node(then_branch);
            if let Some(else_branch) = else_branch {
                visitor.visit_node(else_branch);
            }
        }
        Node::While { condition, body } => {
            visitor.visit_node(condition);
            visitor.visit_node(body);
        }
        Node::Return(value) | Node::Protected(value) => visitor.visit_node(value),
    }
}

pub fn walk_function_def<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, def: &'ast FunctionDef) {
    visitor.visit_node(&def.body);
}

/// Collects the unqualified names a function body assigns to directly
/// (`x := ...` or `(x;y) := ...`). Nested definitions are not entered.
struct AssignedNames<'ast> {
    names: Vec<&'ast str>,
}

impl<'ast> AssignedNames<'ast> {
    fn record(&mut self, target: &'ast Node) {
        match target {
            Node::Identifier(Identifier {
                context: None,
                name,
            }) => {
                if !self.names.contains(&name.as_str()) {
                    self.names.push(name);
                }
            }
            Node::Strand(items) => {
                for item in items {
                    self.record(item);
                }
            }
            _ => {}
        }
    }
}

impl<'ast> Visitor<'ast> for AssignedNames<'ast> {
    fn visit_function_def(&mut self, _def: &'ast FunctionDef) {}

    fn visit_assign_target(&mut self, target: &'ast Node) {
        self.record(target);
        walk_node(self, target);
    }
}

/// Names assigned anywhere in `body`, in first-assignment order.
pub fn assigned_names(body: &Node) -> Vec<&str> {
    let mut collector = AssignedNames { names: Vec::new() };
    collector.visit_node(body);
    collector.names
}

#[cfg(test)]
mod tests;
