//! Syntax tree handed over by the parser.
//!
//! Nodes are immutable once built. Child nodes are boxed; the tree is small
//! and short-lived compared to the compiled form the evaluator produces.

use std::fmt;

use crate::constant::{Constant, ConstantList};
use crate::token::{Token, TokenKind};

/// Name of the root context.
pub const ROOT_CONTEXT: &str = ".";

/// A variable or function name, optionally context-qualified (`ctx.name`).
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Identifier {
    /// `None` for unqualified names; `Some(".")` for `.name`.
    pub context: Option<String>,
    pub name: String,
}

impl Identifier {
    /// An unqualified name.
    pub fn new(name: impl Into<String>) -> Self {
        Identifier {
            context: None,
            name: name.into(),
        }
    }

    pub fn qualified(context: impl Into<String>, name: impl Into<String>) -> Self {
        Identifier {
            context: Some(context.into()),
            name: name.into(),
        }
    }

    /// Split `ctx.name` at the last dot. A leading dot (`.name`) denotes the
    /// root context.
    pub fn parse(text: &str) -> Self {
        match text.rfind('.') {
            Some(0) => Identifier::qualified(ROOT_CONTEXT, &text[1..]),
            Some(pos) => Identifier::qualified(&text[..pos], &text[pos + 1..]),
            None => Identifier::new(text),
        }
    }

    #[inline]
    pub fn is_qualified(&self) -> bool {
        self.context.is_some()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.context.as_deref() {
            None => f.write_str(&self.name),
            Some(ROOT_CONTEXT) => write!(f, ".{}", self.name),
            Some(ctx) => write!(f, "{ctx}.{}", self.name),
        }
    }
}

/// A user function definition: `name{a;b} : body`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionDef {
    pub name: Identifier,
    /// Parameters in source order.
    pub params: Vec<String>,
    pub body: Box<Node>,
}

/// A syntax-tree node.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Node {
    Constant(Constant),
    ConstantList(ConstantList),
    /// Character literal `'abc'`.
    Characters(String),
    /// The empty value `()`.
    Null,
    Identifier(Identifier),

    /// Primitive applied to one argument.
    Monadic {
        token: Token,
        argument: Box<Node>,
    },
    /// Primitive applied to two arguments. The token may still carry its
    /// monadic classification.
    Dyadic {
        token: Token,
        left: Box<Node>,
        right: Box<Node>,
    },
    /// User-function call `f{a;b}`; arguments in source order.
    Invoke {
        function: Box<Node>,
        arguments: Vec<Node>,
    },

    /// `(a;b;c)`
    Strand(Vec<Node>),
    /// Statements separated by `;` inside braces; yields the last value.
    ExpressionList(Vec<Node>),

    /// `target := value`. Targets: identifier, index, strand of
    /// identifiers, `(path pick name)` and value-in-context forms.
    Assign {
        target: Box<Node>,
        value: Box<Node>,
    },
    /// `item[i;;k]`; `None` marks an elided axis.
    Index {
        item: Box<Node>,
        indices: Vec<Option<Node>>,
    },

    FunctionDef(FunctionDef),
    If {
        condition: Box<Node>,
        then_branch: Box<Node>,
        else_branch: Option<Box<Node>>,
    },
    While {
        condition: Box<Node>,
        body: Box<Node>,
    },
    /// `: value`, early exit to the innermost return target.
    Return(Box<Node>),
    /// Protected execution (`do` in monadic form).
    Protected(Box<Node>),
}

impl Node {
    pub fn int(value: i64) -> Self {
        Node::Constant(Constant::integer(value))
    }

    pub fn float(value: f64) -> Self {
        Node::Constant(Constant::double(value))
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        Node::Constant(Constant::symbol(name))
    }

    pub fn chars(text: impl Into<String>) -> Self {
        Node::Characters(text.into())
    }

    pub fn ints(values: &[i64]) -> Self {
        Node::ConstantList(ConstantList::new(
            values.iter().copied().map(Constant::integer).collect(),
        ))
    }

    pub fn floats(values: &[f64]) -> Self {
        Node::ConstantList(ConstantList::new(
            values.iter().copied().map(Constant::double).collect(),
        ))
    }

    /// Identifier node from `name` or `ctx.name` text.
    pub fn ident(text: &str) -> Self {
        Node::Identifier(Identifier::parse(text))
    }

    pub fn monadic(kind: TokenKind, argument: Node) -> Self {
        Node::Monadic {
            token: Token::new(kind),
            argument: Box::new(argument),
        }
    }

    pub fn dyadic(kind: TokenKind, left: Node, right: Node) -> Self {
        Node::Dyadic {
            token: Token::new(kind),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn invoke(function: Node, arguments: Vec<Node>) -> Self {
        Node::Invoke {
            function: Box::new(function),
            arguments,
        }
    }

    pub fn assign(target: Node, value: Node) -> Self {
        Node::Assign {
            target: Box::new(target),
            value: Box::new(value),
        }
    }

    pub fn index(item: Node, indices: Vec<Option<Node>>) -> Self {
        Node::Index {
            item: Box::new(item),
            indices,
        }
    }

    pub fn function(name: &str, params: &[&str], body: Node) -> Self {
        Node::FunctionDef(FunctionDef {
            name: Identifier::parse(name),
            params: params.iter().map(|p| (*p).to_owned()).collect(),
            body: Box::new(body),
        })
    }

    pub fn if_else(condition: Node, then_branch: Node, else_branch: Option<Node>) -> Self {
        Node::If {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: else_branch.map(Box::new),
        }
    }

    pub fn while_loop(condition: Node, body: Node) -> Self {
        Node::While {
            condition: Box::new(condition),
            body: Box::new(body),
        }
    }

    pub fn ret(value: Node) -> Self {
        Node::Return(Box::new(value))
    }

    pub fn protected(body: Node) -> Self {
        Node::Protected(Box::new(body))
    }

    /// True for nodes whose value is known without evaluation.
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            Node::Constant(_) | Node::ConstantList(_) | Node::Characters(_) | Node::Null
        )
    }
}

#[cfg(test)]
mod tests;
