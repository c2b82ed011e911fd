use pretty_assertions::assert_eq;

use super::*;
use crate::errors::ErrorKind;

fn ints(values: &[i64]) -> Value {
    Value::typed_vector(values.iter().copied().map(Value::Int).collect(), ValueType::Integer)
}

fn matrix(rows: usize, cols: usize, values: &[i64]) -> Value {
    Value::array(
        &[rows, cols],
        values.iter().copied().map(Value::Int).collect(),
        ValueType::Integer,
    )
    .unwrap()
}

fn monadic(f: &dyn MonadicFunction, right: &Value) -> EvalResult {
    f.execute(&mut Runtime::new(), right)
}

fn dyadic(f: &dyn DyadicFunction, left: &Value, right: &Value) -> EvalResult {
    f.execute(&mut Runtime::new(), right, left)
}

#[test]
fn reduce_folds_vector() {
    assert_eq!(monadic(&REDUCE_ADD, &ints(&[1, 2, 3])).unwrap(), Value::Int(6));
    assert_eq!(monadic(&REDUCE_MULTIPLY, &ints(&[2, 3, 4])).unwrap(), Value::Int(24));
    assert_eq!(monadic(&REDUCE_MAX, &ints(&[2, 9, 4])).unwrap(), Value::Int(9));
    assert_eq!(monadic(&REDUCE_AND, &ints(&[1, 1, 0])).unwrap(), Value::Int(0));
    assert_eq!(monadic(&REDUCE_OR, &ints(&[0, 0, 1])).unwrap(), Value::Int(1));
}

#[test]
fn reduce_of_matrix_folds_rows() {
    assert_eq!(
        monadic(&REDUCE_ADD, &matrix(2, 3, &[1, 2, 3, 4, 5, 6])).unwrap(),
        ints(&[5, 7, 9])
    );
}

#[test]
fn reduce_of_empty_is_identity() {
    let empty = ints(&[]);
    assert_eq!(monadic(&REDUCE_ADD, &empty).unwrap(), Value::Int(0));
    assert_eq!(monadic(&REDUCE_MULTIPLY, &empty).unwrap(), Value::Int(1));
    assert_eq!(
        monadic(&REDUCE_MAX, &empty).unwrap(),
        Value::Float(f64::NEG_INFINITY)
    );
    assert_eq!(monadic(&REDUCE_MIN, &Value::Null).unwrap(), Value::Float(f64::INFINITY));
}

#[test]
fn reduce_of_atom_is_atom() {
    assert_eq!(monadic(&REDUCE_ADD, &Value::Int(5)).unwrap(), Value::Int(5));
}

#[test]
fn scan_accumulates_prefixes() {
    assert_eq!(monadic(&SCAN_ADD, &ints(&[1, 2, 3])).unwrap(), ints(&[1, 3, 6]));
    assert_eq!(monadic(&SCAN_MAX, &ints(&[1, 3, 2])).unwrap(), ints(&[1, 3, 3]));
    assert_eq!(monadic(&SCAN_MULTIPLY, &ints(&[])).unwrap(), ints(&[]));
}

#[test]
fn outer_product_shape_is_left_then_right() {
    let table = dyadic(&OUTER_MULTIPLY, &ints(&[1, 2]), &ints(&[1, 2, 3])).unwrap();
    assert_eq!(table, matrix(2, 3, &[1, 2, 3, 2, 4, 6]));
    assert_eq!(
        dyadic(&OUTER_EQUAL, &Value::Int(2), &ints(&[1, 2, 3])).unwrap(),
        ints(&[0, 1, 0])
    );
}

#[test]
fn inner_product_of_vectors() {
    assert_eq!(
        dyadic(&INNER_ADD_MULTIPLY, &ints(&[1, 2, 3]), &ints(&[4, 5, 6])).unwrap(),
        Value::Int(32)
    );
    assert_eq!(
        dyadic(&INNER_ADD_MULTIPLY, &Value::Int(2), &ints(&[1, 2, 3])).unwrap(),
        Value::Int(12)
    );
}

#[test]
fn inner_product_of_matrices() {
    let a = matrix(2, 2, &[1, 2, 3, 4]);
    let b = matrix(2, 2, &[5, 6, 7, 8]);
    assert_eq!(
        dyadic(&INNER_ADD_MULTIPLY, &a, &b).unwrap(),
        matrix(2, 2, &[19, 22, 43, 50])
    );
    assert_eq!(
        dyadic(&INNER_MAX_ADD, &a, &b).unwrap(),
        matrix(2, 2, &[9, 10, 11, 12])
    );
}

#[test]
fn inner_product_length_mismatch() {
    let err = dyadic(&INNER_ADD_MULTIPLY, &ints(&[1, 2]), &ints(&[1, 2, 3])).unwrap_err();
    assert_eq!(err.as_error().unwrap().kind, ErrorKind::Length);
}

#[test]
fn derived_functions_are_named_and_flagged() {
    assert_eq!(MonadicFunction::name(&REDUCE_ADD), "add reduce");
    assert_eq!(MonadicFunction::name(&SCAN_OR), "or scan");
    assert_eq!(DyadicFunction::name(&OUTER_SUBTRACT), "subtract outer product");
    assert!(REDUCE_ADD.is_derived());
    assert!(INNER_MIN_ADD.is_derived());
}
