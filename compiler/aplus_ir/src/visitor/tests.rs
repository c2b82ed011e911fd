use super::*;
use crate::token::TokenKind;
use pretty_assertions::assert_eq;

#[test]
fn assigned_names_in_order() {
    let body = Node::ExpressionList(vec![
        Node::assign(Node::ident("b"), Node::int(1)),
        Node::assign(Node::ident("a"), Node::ident("b")),
        Node::assign(Node::ident("b"), Node::int(2)),
    ]);
    assert_eq!(assigned_names(&body), vec!["b", "a"]);
}

#[test]
fn assigned_names_skips_qualified_and_indexed() {
    let body = Node::ExpressionList(vec![
        Node::assign(Node::ident("ctx.g"), Node::int(1)),
        Node::assign(
            Node::index(Node::ident("v"), vec![Some(Node::int(0))]),
            Node::int(1),
        ),
    ]);
    assert!(assigned_names(&body).is_empty());
}

#[test]
fn assigned_names_strand_and_nested_values() {
    let body = Node::assign(
        Node::Strand(vec![Node::ident("x"), Node::ident("y")]),
        Node::Strand(vec![
            Node::int(1),
            Node::assign(Node::ident("z"), Node::int(2)),
        ]),
    );
    assert_eq!(assigned_names(&body), vec!["z", "x", "y"]);
}

#[test]
fn assigned_names_ignores_nested_functions() {
    let body = Node::ExpressionList(vec![
        Node::function("inner", &[], Node::assign(Node::ident("hidden"), Node::int(1))),
        Node::if_else(
            Node::int(1),
            Node::assign(Node::ident("shown"), Node::int(2)),
            None,
        ),
    ]);
    assert_eq!(assigned_names(&body), vec!["shown"]);
}

#[test]
fn custom_visitor_counts_identifiers() {
    struct Count(usize);
    impl<'ast> Visitor<'ast> for Count {
        fn visit_identifier(&mut self, _ident: &'ast Identifier) {
            self.0 += 1;
        }
    }

    let tree = Node::dyadic(
        TokenKind::Add,
        Node::ident("a"),
        Node::monadic(TokenKind::Negate, Node::ident("b")),
    );
    let mut count = Count(0);
    count.visit_node(&tree);
    assert_eq!(count.0, 2);
}
