use pretty_assertions::assert_eq;

use super::*;
use crate::errors::ErrorKind;
use crate::print_handler::silent_handler;
use crate::value::ValueType;
use aplus_ir::TokenKind;

fn ints(values: &[i64]) -> Value {
    Value::typed_vector(values.iter().copied().map(Value::Int).collect(), ValueType::Integer)
}

fn runtime() -> Runtime {
    Runtime::builder().print_handler(silent_handler()).build()
}

/// Define `name{params} : .log := (params)` and return the function value.
fn recorder(runtime: &mut Runtime, name: &str, params: &[&str]) -> Value {
    let strand = Node::Strand(params.iter().map(|p| Node::ident(p)).collect());
    let body = Node::assign(Node::ident(".log"), strand);
    runtime
        .execute(&Node::function(name, params, body))
        .unwrap()
}

fn logged(runtime: &Runtime) -> Vec<Value> {
    runtime
        .get_variable(".", "log")
        .unwrap()
        .to_items()
        .iter()
        .map(Value::disclose)
        .collect()
}

#[test]
fn builder_defaults() {
    let runtime = Runtime::new();
    assert_eq!(runtime.current_context(), ".");
    assert_eq!(runtime.max_call_depth, DEFAULT_RECURSION_LIMIT);
}

#[test]
fn builder_sets_context() {
    let mut runtime = Runtime::builder().context("ctx").build();
    runtime.execute(&Node::assign(Node::ident("x"), Node::int(1))).unwrap();
    assert_eq!(runtime.get_variable("ctx", "x").unwrap(), Value::Int(1));
}

#[test]
fn unset_variable_is_value_error() {
    let runtime = runtime();
    let err = runtime.get_variable(".", "foo").unwrap_err();
    let err = err.as_error().unwrap();
    assert_eq!(err.kind, ErrorKind::Value);
    assert!(err.message.contains("foo"));
}

#[test]
fn runtimes_share_nothing() {
    let mut a = runtime();
    let b = runtime();
    a.set_variable(".", "x", Value::Int(1));
    assert!(b.get_variable(".", "x").is_err());
}

#[test]
fn whole_assignment_fires_callback_with_null_index() {
    let mut rt = runtime();
    let cb = recorder(&mut rt, "cb", &["s", "v", "i"]);
    rt.set_callback(".", "x", cb, Value::symbol("data"));
    rt.assign_variable(".", "x", &Value::Int(7)).unwrap();
    assert_eq!(
        logged(&rt),
        vec![Value::symbol("data"), Value::Int(7), Value::Null]
    );
}

#[test]
fn callback_receives_only_declared_arguments() {
    let mut rt = runtime();
    let cb = recorder(&mut rt, "cb", &["s"]);
    rt.set_callback(".", "x", cb, Value::Int(42));
    rt.assign_variable(".", "x", &Value::Int(1)).unwrap();
    assert_eq!(logged(&rt), vec![Value::Int(42)]);
}

#[test]
fn callback_gets_context_and_name_last() {
    let mut rt = runtime();
    let cb = recorder(&mut rt, "cb", &["s", "v", "i", "p", "c", "n"]);
    rt.set_callback("ctx", "x", cb, Value::Null);
    rt.assign_variable("ctx", "x", &Value::Int(1)).unwrap();
    let log = logged(&rt);
    assert_eq!(log[4], Value::symbol("ctx"));
    assert_eq!(log[5], Value::symbol("x"));
}

#[test]
fn indexed_assignment_fires_callback_with_index() {
    let mut rt = runtime();
    rt.set_variable(".", "x", ints(&[1, 2, 3]));
    let cb = recorder(&mut rt, "cb", &["s", "v", "i"]);
    rt.set_callback(".", "x", cb, Value::Null);
    rt.assign_indexed(".", "x", &[Some(Value::Int(1))], &Value::Int(9))
        .unwrap();
    assert_eq!(rt.get_variable(".", "x").unwrap(), ints(&[1, 9, 3]));
    assert_eq!(logged(&rt), vec![Value::Null, Value::Int(9), Value::Int(1)]);
}

#[test]
fn removed_callback_no_longer_fires() {
    let mut rt = runtime();
    let cb = recorder(&mut rt, "cb", &["s"]);
    rt.set_callback(".", "x", cb, Value::Int(1));
    rt.remove_callback(".", "x");
    rt.assign_variable(".", "x", &Value::Int(1)).unwrap();
    assert!(rt.get_variable(".", "log").is_err());
}

#[test]
fn non_function_callback_fails() {
    let mut rt = runtime();
    rt.set_callback(".", "x", Value::Int(3), Value::Null);
    let err = rt.assign_variable(".", "x", &Value::Int(1)).unwrap_err();
    assert_eq!(err.as_error().unwrap().kind, ErrorKind::NonFunction);
}

#[test]
fn set_variable_is_silent() {
    let mut rt = runtime();
    rt.set_callback(".", "x", Value::Int(3), Value::Null);
    rt.set_variable(".", "x", Value::Int(1));
    assert_eq!(rt.get_variable(".", "x").unwrap(), Value::Int(1));
}

#[test]
fn recursion_limit_is_a_stack_error() {
    let mut rt = Runtime::builder().recursion_limit(16).build();
    // f{n} : f{n}
    let body = Node::invoke(Node::ident("f"), vec![Node::ident("n")]);
    rt.execute(&Node::function("f", &["n"], body)).unwrap();
    let err = rt
        .execute(&Node::invoke(Node::ident("f"), vec![Node::int(0)]))
        .unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::Stack));
    assert_eq!(rt.call_depth, 0);
}

#[test]
fn execute_returns_last_value() {
    let mut rt = runtime();
    let tree = Node::ExpressionList(vec![
        Node::assign(Node::ident("a"), Node::int(2)),
        Node::dyadic(TokenKind::Identity, Node::ident("a"), Node::int(3)),
    ]);
    assert_eq!(rt.execute(&tree).unwrap(), Value::Int(5));
}

#[test]
fn top_level_return_yields_its_value() {
    let mut rt = runtime();
    let tree = Node::ExpressionList(vec![Node::ret(Node::int(1)), Node::int(2)]);
    assert_eq!(rt.execute(&tree).unwrap(), Value::Int(1));
}

#[test]
fn settle_maps_control_actions() {
    assert_eq!(settle(Ok(Value::Int(1))).unwrap(), Value::Int(1));
    let stray = ControlAction::Return {
        target: ReturnTarget(99),
        value: Value::Null,
    };
    assert_eq!(
        settle(Err(stray)).unwrap_err(),
        RuntimeError::Fault(Fault::UnmatchedReturn)
    );
}

#[test]
fn random_link_is_deterministic() {
    let mut a = RandomLink::new(DEFAULT_SEED);
    let mut b = RandomLink::default();
    for _ in 0..5 {
        assert_eq!(a.below(1000), b.below(1000));
    }
    assert_eq!(RandomLink::new(0).link(), DEFAULT_SEED);
}

#[test]
fn deal_is_a_partial_permutation() {
    let mut link = RandomLink::default();
    let mut drawn = link.deal(5, 20);
    assert_eq!(drawn.len(), 5);
    drawn.sort_unstable();
    drawn.dedup();
    assert_eq!(drawn.len(), 5);
    assert!(drawn.iter().all(|&d| d < 20));
}
