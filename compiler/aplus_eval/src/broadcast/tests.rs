use super::*;
use crate::errors::{ControlAction, ErrorKind};
use pretty_assertions::assert_eq;

fn add_ints(right: &Value, left: &Value) -> EvalResult {
    match (right, left) {
        (Value::Int(r), Value::Int(l)) => Ok(Value::Int(l + r)),
        _ => Err(crate::errors::operand_mismatch("test add")),
    }
}

fn add_floats(right: &Value, left: &Value) -> EvalResult {
    match (right.as_f64(), left.as_f64()) {
        (Some(r), Some(l)) => Ok(Value::Float(l + r)),
        _ => Err(crate::errors::operand_mismatch("test add")),
    }
}

/// Adds integers, but yields a float whenever the left operand is 2.
fn add_sometimes_float(right: &Value, left: &Value) -> EvalResult {
    match (right, left) {
        (Value::Int(r), Value::Int(2)) => Ok(Value::Float(2.0 + crate::value::int_to_float(*r))),
        _ => add_ints(right, left),
    }
}

fn pick_left(_right: &Value, left: &Value) -> EvalResult {
    Ok(left.clone())
}

fn negate_int(argument: &Value) -> EvalResult {
    match argument {
        Value::Int(i) => Ok(Value::Int(-i)),
        _ => Err(crate::errors::operand_mismatch("test negate")),
    }
}

static ADD: DyadicScalar = DyadicScalar::new(
    "add",
    &[
        (PairKey::Pair(ValueType::Integer, ValueType::Integer), add_ints),
        (PairKey::Pair(ValueType::Float, ValueType::Float), add_floats),
        (PairKey::Pair(ValueType::Float, ValueType::Integer), add_floats),
        (PairKey::Pair(ValueType::Integer, ValueType::Float), add_floats),
    ],
);

static MIXED: DyadicScalar = DyadicScalar::new(
    "mixed",
    &[(PairKey::Pair(ValueType::Integer, ValueType::Integer), add_sometimes_float)],
);

static WILD: DyadicScalar = DyadicScalar::new("wild", &[(PairKey::Any, pick_left)]);

static NEGATE: MonadicScalar =
    MonadicScalar::new("negate", &[(TypeKey::Type(ValueType::Integer), negate_int)]);

fn ints(values: &[i64]) -> Value {
    Value::vector(values.iter().copied().map(Value::Int).collect())
}

fn floats(values: &[f64]) -> Value {
    Value::vector(values.iter().copied().map(Value::Float).collect())
}

fn error_kind(result: EvalResult) -> ErrorKind {
    match result {
        Err(ControlAction::Error(err)) => err.kind,
        other => panic!("expected language error, got {other:?}"),
    }
}

#[test]
fn vector_plus_scalar() {
    let result = ADD.apply(&Value::Int(10), &ints(&[1, 2, 3])).unwrap();
    assert_eq!(result, ints(&[11, 12, 13]));
    assert_eq!(result.ty(), ValueType::Integer);
}

#[test]
fn promotion_on_float_operand() {
    let result = ADD.apply(&ints(&[3, 4]), &floats(&[1.0, 2.5])).unwrap();
    assert_eq!(result, floats(&[4.0, 6.5]));
}

#[test]
fn promotion_when_some_results_float() {
    let result = MIXED.apply(&ints(&[1, 1]), &ints(&[1, 2])).unwrap();
    assert_eq!(result.ty(), ValueType::Float);
    assert_eq!(result, floats(&[2.0, 3.0]));
}

#[test]
fn length_mismatch() {
    assert_eq!(
        error_kind(ADD.apply(&ints(&[1, 2]), &ints(&[1, 2, 3]))),
        ErrorKind::Length
    );
}

#[test]
fn missing_entry_is_type_error() {
    assert_eq!(
        error_kind(ADD.apply(&Value::symbol("a"), &Value::Int(1))),
        ErrorKind::Type
    );
}

#[test]
fn type_error_names_primitive() {
    let Err(ControlAction::Error(err)) = ADD.apply(&Value::Char('a'), &Value::Int(1)) else {
        panic!("expected error");
    };
    assert!(err.message.contains("add"));
}

#[test]
fn wildcard_fallback() {
    let result = WILD.apply(&Value::Char('x'), &Value::symbol("s")).unwrap();
    assert_eq!(result, Value::symbol("s"));
}

#[test]
fn null_with_atom_is_null() {
    assert_eq!(ADD.apply(&Value::Null, &Value::Int(1)).unwrap(), Value::Null);
    assert_eq!(ADD.apply(&Value::Int(1), &Value::Null).unwrap(), Value::Null);
    // no entry for symbols, but the null key bypasses the table
    assert_eq!(ADD.apply(&Value::Null, &Value::symbol("a")).unwrap(), Value::Null);
}

#[test]
fn null_against_array_is_length_error() {
    assert_eq!(error_kind(ADD.apply(&Value::Null, &ints(&[1, 2]))), ErrorKind::Length);
    assert_eq!(error_kind(ADD.apply(&ints(&[1, 2]), &Value::Null)), ErrorKind::Length);
}

#[test]
fn null_typed_array_adopts_atom_type() {
    let empty = Value::vector(Vec::new());
    let result = ADD.apply(&Value::Float(1.5), &empty).unwrap();
    assert_eq!(result.ty(), ValueType::Float);
    assert_eq!(result.shape(), &[0]);
}

#[test]
fn matrix_rows_pair_with_vector_items() {
    let matrix = Value::array(
        &[2, 2],
        vec![Value::Int(1), Value::Int(2), Value::Int(3), Value::Int(4)],
        ValueType::Integer,
    )
    .unwrap();
    let result = ADD.apply(&matrix, &ints(&[10, 20])).unwrap();
    assert_eq!(result.shape(), &[2, 2]);
    assert_eq!(
        result.to_items(),
        vec![Value::Int(11), Value::Int(12), Value::Int(23), Value::Int(24)]
    );
}

#[test]
fn implementation_errors_propagate() {
    fn fail(_right: &Value, _left: &Value) -> EvalResult {
        Err(crate::errors::domain_error("bad"))
    }
    static FAIL: DyadicScalar = DyadicScalar::new("fail", &[(PairKey::Any, fail)]);
    assert_eq!(error_kind(FAIL.apply(&ints(&[1]), &Value::Int(1))), ErrorKind::Domain);
}

#[test]
fn monadic_maps_every_atom() {
    assert_eq!(NEGATE.apply(&ints(&[1, -2])).unwrap(), ints(&[-1, 2]));
    assert_eq!(NEGATE.apply(&Value::Null).unwrap(), Value::Null);
    assert_eq!(error_kind(NEGATE.apply(&Value::Char('a'))), ErrorKind::Type);
}
