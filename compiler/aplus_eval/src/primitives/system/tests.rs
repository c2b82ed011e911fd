use pretty_assertions::assert_eq;

use super::*;
use crate::errors::ErrorKind;
use crate::print_handler::buffer_handler;

fn ints(values: &[i64]) -> Value {
    Value::typed_vector(values.iter().copied().map(Value::Int).collect(), ValueType::Integer)
}

fn kind(result: EvalResult) -> ErrorKind {
    result.unwrap_err().as_error().unwrap().kind
}

#[test]
fn print_writes_through_handler_and_returns_argument() {
    let handler = buffer_handler();
    let mut runtime = Runtime::builder().print_handler(handler.clone()).build();
    let v = ints(&[1, -2, 3]);
    assert_eq!(PRINT.execute(&mut runtime, &v).unwrap(), v);
    PRINT.execute(&mut runtime, &Value::string("hi")).unwrap();
    assert_eq!(handler.output(), "1 ¯2 3\nhi\n");
}

#[test]
fn default_format_is_character_vector() {
    let mut runtime = Runtime::new();
    let text = DEFAULT_FORMAT.execute(&mut runtime, &ints(&[10, 20])).unwrap();
    assert_eq!(text, Value::string("10 20"));
    assert_eq!(text.ty(), ValueType::Char);
}

#[test]
fn signal_raises_domain_with_text() {
    let mut runtime = Runtime::new();
    let err = SIGNAL.execute(&mut runtime, &Value::string("oops")).unwrap_err();
    let err = err.as_error().unwrap();
    assert_eq!(err.kind, ErrorKind::Domain);
    assert_eq!(err.message, "oops");

    let err = SIGNAL.execute(&mut runtime, &Value::symbol("bad")).unwrap_err();
    assert_eq!(err.as_error().unwrap().message, "bad");
}

#[test]
fn stop_passes_through() {
    let mut runtime = Runtime::new();
    assert_eq!(STOP.execute(&mut runtime, &Value::Int(4)).unwrap(), Value::Int(4));
}

#[test]
fn variable_name_resolves_qualification() {
    assert_eq!(
        variable_name(&Value::symbol("x"), "ctx").unwrap(),
        ("ctx".to_owned(), "x".to_owned())
    );
    assert_eq!(
        variable_name(&Value::symbol("a.x"), "ctx").unwrap(),
        ("a".to_owned(), "x".to_owned())
    );
    assert_eq!(
        variable_name(&Value::symbol(".x"), "ctx").unwrap(),
        (".".to_owned(), "x".to_owned())
    );
    assert_eq!(kind(variable_name(&Value::Int(1), ".").map(|_| Value::Null)), ErrorKind::Type);
}

#[test]
fn context_name_treats_empty_context_as_root() {
    assert_eq!(
        context_name(&Value::symbol("x"), &Value::symbol("")).unwrap(),
        (".".to_owned(), "x".to_owned())
    );
    assert_eq!(
        context_name(&Value::symbol("x"), &Value::symbol("c")).unwrap(),
        ("c".to_owned(), "x".to_owned())
    );
}

#[test]
fn value_reads_variables_by_symbol() {
    let mut runtime = Runtime::new();
    runtime.set_variable(".", "x", Value::Int(5));
    runtime.set_variable("c", "y", Value::Int(6));
    assert_eq!(VALUE.execute(&mut runtime, &Value::symbol("x")).unwrap(), Value::Int(5));
    assert_eq!(VALUE.execute(&mut runtime, &Value::symbol("c.y")).unwrap(), Value::Int(6));
    assert_eq!(
        VALUE_IN_CONTEXT
            .execute(&mut runtime, &Value::symbol("y"), &Value::symbol("c"))
            .unwrap(),
        Value::Int(6)
    );
    assert_eq!(kind(VALUE.execute(&mut runtime, &Value::symbol("z"))), ErrorKind::Value);
}

#[test]
fn roll_stays_below_bound_and_is_seeded() {
    let bounds = ints(&[6, 6, 6, 6, 100]);
    let mut first = Runtime::builder().random_seed(7).build();
    let mut second = Runtime::builder().random_seed(7).build();
    let a = ROLL.execute(&mut first, &bounds).unwrap();
    let b = ROLL.execute(&mut second, &bounds).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.shape(), &[5]);
    for (draw, bound) in a.to_items().iter().zip(bounds.to_items()) {
        let (draw, bound) = (draw.as_int().unwrap(), bound.as_int().unwrap());
        assert!((0..bound).contains(&draw));
    }
}

#[test]
fn roll_of_non_positive_bound_is_domain() {
    let mut runtime = Runtime::new();
    assert_eq!(kind(ROLL.execute(&mut runtime, &Value::Int(0))), ErrorKind::Domain);
    assert_eq!(kind(ROLL.execute(&mut runtime, &Value::Int(-3))), ErrorKind::Domain);
}

#[test]
fn deal_draws_distinct_values() {
    let mut runtime = Runtime::new();
    let dealt = DEAL
        .execute(&mut runtime, &Value::Int(10), &Value::Int(10))
        .unwrap();
    let mut drawn: Vec<i64> = dealt.to_items().iter().map(|v| v.as_int().unwrap()).collect();
    drawn.sort_unstable();
    assert_eq!(drawn, (0..10).collect::<Vec<_>>());
}

#[test]
fn deal_more_than_available_is_domain() {
    let mut runtime = Runtime::new();
    assert_eq!(
        kind(DEAL.execute(&mut runtime, &Value::Int(3), &Value::Int(4))),
        ErrorKind::Domain
    );
}
