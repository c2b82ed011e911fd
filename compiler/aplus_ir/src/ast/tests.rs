use super::*;
use pretty_assertions::assert_eq;

#[test]
fn identifier_parse_unqualified() {
    assert_eq!(Identifier::parse("foo"), Identifier::new("foo"));
}

#[test]
fn identifier_parse_qualified() {
    assert_eq!(Identifier::parse("ctx.foo"), Identifier::qualified("ctx", "foo"));
    assert_eq!(Identifier::parse("a.b.foo"), Identifier::qualified("a.b", "foo"));
}

#[test]
fn identifier_parse_root() {
    let id = Identifier::parse(".foo");
    assert_eq!(id.context.as_deref(), Some(ROOT_CONTEXT));
    assert_eq!(id.to_string(), ".foo");
}

#[test]
fn helpers_build_expected_shapes() {
    let node = Node::dyadic(TokenKind::Add, Node::int(1), Node::ints(&[2, 3]));
    match node {
        Node::Dyadic { token, left, right } => {
            assert_eq!(token.kind, TokenKind::Add);
            assert_eq!(*left, Node::int(1));
            assert!(right.is_literal());
        }
        other => panic!("unexpected node {other:?}"),
    }
}

#[test]
fn function_helper() {
    let node = Node::function("f", &["a", "b"], Node::ident("a"));
    let Node::FunctionDef(def) = node else {
        panic!("expected function definition");
    };
    assert_eq!(def.params, vec!["a".to_owned(), "b".to_owned()]);
    assert_eq!(def.name, Identifier::new("f"));
}
