//! Syntax-tree compilation.
//!
//! [`Compile::compile`] turns a node into an [`Exec`] tree against a
//! [`CompileScope`]. Compilation has no runtime side effects: it resolves
//! names to global or local bindings, resolves primitive tokens (with glyph
//! reinterpretation for dyadic use), folds literal lists and assigns return
//! targets. Failures here are [`AplError`]s (Parse for malformed literal
//! lists, Domain for malformed assignment targets).
//!
//! Primitives recognised but not implemented compile to a unit that raises
//! a nonce error when run, so they remain trappable.

mod constants;
mod exec;
mod function;

use std::cell::Cell;
use std::rc::Rc;

use rustc_hash::FxHashMap;

pub use exec::{Binding, Exec};
pub use function::CompiledFunction;

use crate::errors::{nonce_error, AplError, ErrorKind, ReturnTarget};
use crate::registry::{reinterpret_as_dyadic, resolve_dyadic, resolve_monadic};
use aplus_ir::{assigned_names, FunctionDef, Identifier, Node, Token, TokenKind};

/// Static scope a node is compiled against.
pub struct CompileScope {
    context: String,
    /// Local slots of the enclosing function body, if any.
    locals: Option<FxHashMap<String, usize>>,
    return_target: Cell<ReturnTarget>,
    /// Source of fresh return targets, shared by nested scopes.
    next_target: Rc<Cell<u32>>,
}

impl CompileScope {
    /// Scope for top-level code running in `context`.
    pub fn top_level(context: &str) -> Self {
        CompileScope {
            context: context.to_owned(),
            locals: None,
            return_target: Cell::new(ReturnTarget::ROOT),
            next_target: Rc::new(Cell::new(ReturnTarget::ROOT.0 + 1)),
        }
    }

    /// Scope for the body of `def`: parameters take the first slots, then
    /// every unqualified name assigned in the body.
    fn function(&self, context: &str, def: &FunctionDef) -> Self {
        let mut locals = FxHashMap::default();
        let names = def
            .params
            .iter()
            .map(String::as_str)
            .chain(assigned_names(&def.body));
        for name in names {
            let slot = locals.len();
            locals.entry(name.to_owned()).or_insert(slot);
        }
        CompileScope {
            context: context.to_owned(),
            locals: Some(locals),
            return_target: Cell::new(self.fresh_target()),
            next_target: Rc::clone(&self.next_target),
        }
    }

    #[inline]
    pub fn context(&self) -> &str {
        &self.context
    }

    #[inline]
    pub fn return_target(&self) -> ReturnTarget {
        self.return_target.get()
    }

    fn fresh_target(&self) -> ReturnTarget {
        let id = self.next_target.get();
        self.next_target.set(id + 1);
        ReturnTarget(id)
    }

    fn slot_count(&self) -> usize {
        self.locals.as_ref().map_or(0, FxHashMap::len)
    }

    /// Where `identifier` lives: qualified names are global, unqualified
    /// names are local when the function body declares them.
    pub fn resolve(&self, identifier: &Identifier) -> Binding {
        if let Some(context) = &identifier.context {
            return Binding::Global {
                context: context.clone(),
                name: identifier.name.clone(),
            };
        }
        match self.locals.as_ref().and_then(|l| l.get(&identifier.name)) {
            Some(&slot) => Binding::Local {
                slot,
                context: self.context.clone(),
                name: identifier.name.clone(),
            },
            None => Binding::Global {
                context: self.context.clone(),
                name: identifier.name.clone(),
            },
        }
    }

    /// Compile a user function definition.
    pub fn compile_function(&self, def: &FunctionDef) -> Result<Rc<CompiledFunction>, AplError> {
        let context = def.name.context.as_deref().unwrap_or(&self.context);
        let scope = self.function(context, def);
        let body = def.body.compile(&scope)?;
        Ok(Rc::new(CompiledFunction::new(
            def.name.name.clone(),
            context.to_owned(),
            def.params.len(),
            scope.slot_count(),
            body,
            scope.return_target(),
        )))
    }

    /// Compile `body` with its own return target, restoring the enclosing
    /// one afterwards whether or not compilation succeeds.
    fn with_return_target<T>(
        &self,
        target: ReturnTarget,
        compile: impl FnOnce() -> Result<T, AplError>,
    ) -> Result<T, AplError> {
        let previous = self.return_target.replace(target);
        let result = compile();
        self.return_target.set(previous);
        result
    }
}

/// Nodes that compile to executable units.
pub trait Compile {
    fn compile(&self, scope: &CompileScope) -> Result<Exec, AplError>;
}

impl Compile for Node {
    #[tracing::instrument(level = "trace", skip_all)]
    fn compile(&self, scope: &CompileScope) -> Result<Exec, AplError> {
        Ok(match self {
            Node::Constant(constant) => Exec::Literal(constants::constant_value(constant)?),
            Node::ConstantList(list) => Exec::Literal(constants::fold(list)?),
            Node::Characters(text) => Exec::Literal(crate::value::Value::string(text)),
            Node::Null => Exec::Literal(crate::value::Value::Null),
            Node::Identifier(identifier) => Exec::Variable(scope.resolve(identifier)),

            Node::Monadic { token, argument } => {
                let right = Box::new(argument.compile(scope)?);
                match resolve_monadic(token) {
                    Some(function) => Exec::Primitive {
                        function,
                        right,
                        left: None,
                    },
                    None => Exec::Fail(nonce_error(token.kind.name())),
                }
            }
            Node::Dyadic { token, left, right } => {
                let mut token: Token = *token;
                reinterpret_as_dyadic(&mut token);
                let right = Box::new(right.compile(scope)?);
                let left = Box::new(left.compile(scope)?);
                match resolve_dyadic(&token) {
                    Some(function) => Exec::Primitive {
                        function,
                        right,
                        left: Some(left),
                    },
                    None => Exec::Fail(nonce_error(token.kind.name())),
                }
            }
            Node::Invoke {
                function,
                arguments,
            } => Exec::Invoke {
                function: Box::new(function.compile(scope)?),
                arguments: compile_all(arguments, scope)?,
            },

            Node::Strand(items) => Exec::Strand(compile_all(items, scope)?),
            Node::ExpressionList(items) => Exec::Sequence(compile_all(items, scope)?),

            Node::Assign { target, value } => compile_assign(target, value, scope)?,
            Node::Index { item, indices } => Exec::Index {
                item: Box::new(item.compile(scope)?),
                indices: compile_indices(indices, scope)?,
            },

            Node::FunctionDef(def) => {
                let function = scope.compile_function(def)?;
                Exec::Define {
                    context: function.context().to_owned(),
                    name: function.name().to_owned(),
                    function,
                }
            }
            Node::If {
                condition,
                then_branch,
                else_branch,
            } => Exec::If {
                condition: Box::new(condition.compile(scope)?),
                then_branch: Box::new(then_branch.compile(scope)?),
                else_branch: match else_branch {
                    Some(branch) => Some(Box::new(branch.compile(scope)?)),
                    None => None,
                },
            },
            Node::While { condition, body } => Exec::While {
                condition: Box::new(condition.compile(scope)?),
                body: Box::new(body.compile(scope)?),
            },
            Node::Return(value) => Exec::Return {
                target: scope.return_target(),
                value: Box::new(value.compile(scope)?),
            },
            Node::Protected(body) => {
                let target = scope.fresh_target();
                let body = scope.with_return_target(target, || body.compile(scope))?;
                Exec::Protected {
                    body: Box::new(body),
                    target,
                }
            }
        })
    }
}

fn compile_all(nodes: &[Node], scope: &CompileScope) -> Result<Vec<Exec>, AplError> {
    nodes.iter().map(|node| node.compile(scope)).collect()
}

fn compile_indices(
    indices: &[Option<Node>],
    scope: &CompileScope,
) -> Result<Vec<Option<Exec>>, AplError> {
    indices
        .iter()
        .map(|index| index.as_ref().map(|node| node.compile(scope)).transpose())
        .collect()
}

fn malformed_target(what: &str) -> AplError {
    AplError::new(ErrorKind::Domain, format!("{what}: invalid assignment target"))
}

/// The identifier an assignment form writes to.
fn target_binding(node: &Node, scope: &CompileScope, form: &str) -> Result<Binding, AplError> {
    match node {
        Node::Identifier(identifier) => Ok(scope.resolve(identifier)),
        _ => Err(malformed_target(form)),
    }
}

fn compile_assign(target: &Node, value: &Node, scope: &CompileScope) -> Result<Exec, AplError> {
    let value = Box::new(value.compile(scope)?);
    Ok(match target {
        Node::Identifier(identifier) => Exec::Assign {
            binding: scope.resolve(identifier),
            value,
        },
        Node::Index { item, indices } => Exec::AssignIndexed {
            binding: target_binding(item, scope, "index")?,
            indices: compile_indices(indices, scope)?,
            value,
        },
        Node::Strand(items) => Exec::AssignStrand {
            bindings: items
                .iter()
                .map(|item| target_binding(item, scope, "strand"))
                .collect::<Result<_, _>>()?,
            value,
        },
        Node::Dyadic { token, left, right } if is_pick(*token) => Exec::AssignPicked {
            binding: target_binding(right, scope, "pick")?,
            path: Box::new(left.compile(scope)?),
            value,
        },
        Node::Monadic { token, argument } if token.kind == TokenKind::Value => {
            Exec::AssignByName {
                context: None,
                name: Box::new(argument.compile(scope)?),
                value,
            }
        }
        Node::Dyadic { token, left, right } if is_value_in_context(*token) => {
            Exec::AssignByName {
                context: Some(Box::new(left.compile(scope)?)),
                name: Box::new(right.compile(scope)?),
                value,
            }
        }
        _ => return Err(malformed_target("assign")),
    })
}

fn is_pick(token: Token) -> bool {
    matches!(token.kind, TokenKind::Pick | TokenKind::Raze)
}

fn is_value_in_context(token: Token) -> bool {
    matches!(token.kind, TokenKind::Value | TokenKind::ValueInContext)
}
