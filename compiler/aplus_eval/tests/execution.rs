//! End-to-end execution of syntax trees through `Runtime::execute`.

#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use pretty_assertions::assert_eq;

use aplus_eval::{
    buffer_handler, build_strand, silent_handler, ErrorKind, Runtime, Value, ValueType,
};
use aplus_ir::{Node, TokenKind};

fn runtime() -> Runtime {
    Runtime::builder().print_handler(silent_handler()).build()
}

fn ints(values: &[i64]) -> Value {
    Value::typed_vector(values.iter().copied().map(Value::Int).collect(), ValueType::Integer)
}

fn floats(values: &[f64]) -> Value {
    Value::typed_vector(values.iter().copied().map(Value::Float).collect(), ValueType::Float)
}

fn run(rt: &mut Runtime, statements: Vec<Node>) -> Value {
    rt.execute(&Node::ExpressionList(statements)).unwrap()
}

fn assign(name: &str, value: Node) -> Node {
    Node::assign(Node::ident(name), value)
}

fn dyadic(kind: TokenKind, left: Node, right: Node) -> Node {
    Node::dyadic(kind, left, right)
}

// Scalar arithmetic

#[test]
fn scalar_extends_over_vector() {
    let mut rt = runtime();
    let node = dyadic(TokenKind::Add, Node::ints(&[1, 2, 3]), Node::int(10));
    assert_eq!(rt.execute(&node).unwrap(), ints(&[11, 12, 13]));
}

#[test]
fn mixed_literal_promotes_result() {
    let mut rt = runtime();
    let mixed = Node::ConstantList(aplus_ir::ConstantList::new(vec![
        aplus_ir::Constant::integer(1),
        aplus_ir::Constant::double(2.5),
    ]));
    let node = dyadic(TokenKind::Add, mixed, Node::ints(&[3, 4]));
    assert_eq!(rt.execute(&node).unwrap(), floats(&[4.0, 6.5]));
}

#[test]
fn unequal_lengths_are_length_error() {
    let mut rt = runtime();
    let node = dyadic(TokenKind::Add, Node::ints(&[1, 2]), Node::ints(&[1, 2, 3]));
    assert_eq!(rt.execute(&node).unwrap_err().kind(), Some(ErrorKind::Length));
}

#[test]
fn unset_name_is_value_error() {
    let mut rt = runtime();
    let err = rt.execute(&Node::ident("foo")).unwrap_err();
    let err = err.as_apl().unwrap();
    assert_eq!(err.kind, ErrorKind::Value);
    assert!(err.message.contains("foo"));
    assert!(err.message.contains('.'));
}

// Control flow

#[test]
fn while_loop_accumulates() {
    let mut rt = runtime();
    let body = Node::ExpressionList(vec![
        assign("s", dyadic(TokenKind::Add, Node::ident("s"), Node::ident("i"))),
        assign("i", dyadic(TokenKind::Add, Node::ident("i"), Node::int(1))),
    ]);
    let result = run(
        &mut rt,
        vec![
            assign("i", Node::int(0)),
            assign("s", Node::int(0)),
            Node::while_loop(dyadic(TokenKind::LessThan, Node::ident("i"), Node::int(5)), body),
            Node::ident("s"),
        ],
    );
    assert_eq!(result, Value::Int(10));
}

#[test]
fn if_without_else_is_null() {
    let mut rt = runtime();
    let node = Node::if_else(Node::int(0), Node::int(1), None);
    assert_eq!(rt.execute(&node).unwrap(), Value::Null);
}

#[test]
fn symbol_condition_is_domain_error() {
    let mut rt = runtime();
    let node = Node::if_else(Node::symbol("a"), Node::int(1), None);
    assert_eq!(rt.execute(&node).unwrap_err().kind(), Some(ErrorKind::Domain));
}

#[test]
fn return_leaves_the_function_early() {
    let mut rt = runtime();
    // f{n} : { if (n > 0) return 1; 2 }
    let body = Node::ExpressionList(vec![
        Node::if_else(
            dyadic(TokenKind::GreaterThan, Node::ident("n"), Node::int(0)),
            Node::ret(Node::int(1)),
            None,
        ),
        Node::int(2),
    ]);
    rt.execute(&Node::function("f", &["n"], body)).unwrap();
    let call = |n| Node::invoke(Node::ident("f"), vec![Node::int(n)]);
    assert_eq!(rt.execute(&call(5)).unwrap(), Value::Int(1));
    assert_eq!(rt.execute(&call(-1)).unwrap(), Value::Int(2));
}

#[test]
fn recursive_factorial() {
    let mut rt = runtime();
    // fact{n} : if (n <= 1) 1 else n * fact{n - 1}
    let body = Node::if_else(
        dyadic(TokenKind::LessThanOrEqual, Node::ident("n"), Node::int(1)),
        Node::int(1),
        Some(dyadic(
            TokenKind::Multiply,
            Node::ident("n"),
            Node::invoke(
                Node::ident("fact"),
                vec![dyadic(TokenKind::Subtract, Node::ident("n"), Node::int(1))],
            ),
        )),
    );
    rt.execute(&Node::function("fact", &["n"], body)).unwrap();
    let result = rt
        .execute(&Node::invoke(Node::ident("fact"), vec![Node::int(10)]))
        .unwrap();
    assert_eq!(result, Value::Int(3_628_800));
}

// Protected execution

#[test]
fn trap_reports_error_text_and_code() {
    let mut rt = runtime();
    let node = Node::protected(Node::monadic(TokenKind::Signal, Node::chars("boom")));
    assert_eq!(
        rt.execute(&node).unwrap(),
        build_strand(vec![Value::Int(9), Value::string("boom")])
    );
}

#[test]
fn trap_of_success_has_zero_code() {
    let mut rt = runtime();
    let node = Node::protected(dyadic(TokenKind::Add, Node::int(1), Node::int(2)));
    assert_eq!(
        rt.execute(&node).unwrap(),
        build_strand(vec![Value::Int(0), Value::Int(3)])
    );
}

#[test]
fn return_inside_trap_stays_in_the_function() {
    let mut rt = runtime();
    // g{} : { (* return 4); 5 }
    let body = Node::ExpressionList(vec![Node::protected(Node::ret(Node::int(4))), Node::int(5)]);
    rt.execute(&Node::function("g", &[], body)).unwrap();
    let result = rt.execute(&Node::invoke(Node::ident("g"), vec![])).unwrap();
    assert_eq!(result, Value::Int(5));
}

#[test]
fn trap_catches_errors_from_called_functions() {
    let mut rt = runtime();
    let body = Node::ident("missing");
    rt.execute(&Node::function("h", &[], body)).unwrap();
    let node = Node::protected(Node::invoke(Node::ident("h"), vec![]));
    let result = rt.execute(&node).unwrap().to_items();
    assert_eq!(result[1].disclose(), Value::Int(4));
    assert_eq!(rt.call_depth(), 0);
}

// Assignment

#[test]
fn strand_assignment_distributes() {
    let mut rt = runtime();
    let target = Node::Strand(vec![Node::ident("a"), Node::ident("b")]);
    let value = Node::Strand(vec![Node::int(1), Node::ints(&[2, 3])]);
    rt.execute(&Node::assign(target, value)).unwrap();
    assert_eq!(rt.get_variable(".", "a").unwrap(), Value::Int(1));
    assert_eq!(rt.get_variable(".", "b").unwrap(), ints(&[2, 3]));
}

#[test]
fn strand_assignment_count_mismatch_is_length_error() {
    let mut rt = runtime();
    let target = Node::Strand(vec![Node::ident("a"), Node::ident("b")]);
    let value = Node::Strand(vec![Node::int(1), Node::int(2), Node::int(3)]);
    let err = rt.execute(&Node::assign(target, value)).unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::Length));
}

#[test]
fn indexed_assignment_of_a_parameter_leaves_caller_unchanged() {
    let mut rt = runtime();
    // f{v} : { v[1] := 9; v }
    let body = Node::ExpressionList(vec![
        Node::assign(
            Node::index(Node::ident("v"), vec![Some(Node::int(1))]),
            Node::int(9),
        ),
        Node::ident("v"),
    ]);
    rt.execute(&Node::function("f", &["v"], body)).unwrap();
    let result = run(
        &mut rt,
        vec![
            assign("x", Node::ints(&[1, 2, 3])),
            Node::invoke(Node::ident("f"), vec![Node::ident("x")]),
        ],
    );
    assert_eq!(result, ints(&[1, 9, 3]));
    assert_eq!(rt.get_variable(".", "x").unwrap(), ints(&[1, 2, 3]));
}

#[test]
fn locals_do_not_leak_into_the_context() {
    let mut rt = runtime();
    let body = Node::ExpressionList(vec![assign("t", Node::int(1)), Node::ident("t")]);
    rt.execute(&Node::function("f", &[], body)).unwrap();
    rt.execute(&Node::invoke(Node::ident("f"), vec![])).unwrap();
    assert!(rt.get_variable(".", "t").is_err());
}

#[test]
fn pick_assignment_replaces_an_item() {
    let mut rt = runtime();
    let target = dyadic(TokenKind::Pick, Node::int(1), Node::ident("x"));
    run(
        &mut rt,
        vec![
            assign("x", Node::Strand(vec![Node::int(1), Node::int(2)])),
            Node::assign(target, Node::int(7)),
        ],
    );
    let items = rt.get_variable(".", "x").unwrap().to_items();
    assert_eq!(items[1], Value::enclose(Value::Int(7)));
}

#[test]
fn assignment_by_name_in_context() {
    let mut rt = runtime();
    let target = dyadic(TokenKind::Value, Node::symbol("ctx"), Node::symbol("y"));
    rt.execute(&Node::assign(target, Node::int(5))).unwrap();
    assert_eq!(rt.get_variable("ctx", "y").unwrap(), Value::Int(5));

    let target = Node::monadic(TokenKind::Value, Node::symbol("z"));
    rt.execute(&Node::assign(target, Node::int(6))).unwrap();
    assert_eq!(rt.get_variable(".", "z").unwrap(), Value::Int(6));
}

#[test]
fn assignment_fires_callback_from_source() {
    let mut rt = runtime();
    // cb{s;v} : .seen := v
    let cb = rt
        .execute(&Node::function("cb", &["s", "v"], assign(".seen", Node::ident("v"))))
        .unwrap();
    rt.set_callback(".", "x", cb, Value::Null);
    rt.execute(&assign("x", Node::ints(&[4, 5]))).unwrap();
    assert_eq!(rt.get_variable(".", "seen").unwrap(), ints(&[4, 5]));
}

// Output

#[test]
fn print_writes_to_the_handler() {
    let handler = buffer_handler();
    let mut rt = Runtime::builder().print_handler(handler.clone()).build();
    rt.execute(&Node::monadic(TokenKind::Print, Node::ints(&[1, -2, 3])))
        .unwrap();
    rt.execute(&Node::monadic(TokenKind::Print, Node::chars("hi")))
        .unwrap();
    assert_eq!(handler.output(), "1 ¯2 3\nhi\n");
}
