//! Algebraic laws of scalar extension.

#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use proptest::prelude::*;

use aplus_eval::primitives::scalar::{ADD, MAX, MULTIPLY};
use aplus_eval::{ErrorKind, Value, ValueType};

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

fn kind(result: aplus_eval::EvalResult) -> ErrorKind {
    result.unwrap_err().as_error().unwrap().kind
}

fn small_vector() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-10_000i64..10_000, 1..12)
}

proptest! {
    #[test]
    fn broadcast_law(scalar in -10_000i64..10_000, values in small_vector()) {
        let array = ints(&values);
        let spread = ints(&vec![scalar; values.len()]);
        for primitive in [&ADD, &MULTIPLY, &MAX] {
            prop_assert_eq!(
                primitive.apply(&array, &Value::Int(scalar)).unwrap(),
                primitive.apply(&array, &spread).unwrap()
            );
            prop_assert_eq!(
                primitive.apply(&Value::Int(scalar), &array).unwrap(),
                primitive.apply(&spread, &array).unwrap()
            );
        }
    }

    #[test]
    fn broadcast_law_on_matrices(scalar in -100i64..100, values in prop::collection::vec(-100i64..100, 6)) {
        let array = matrix(2, 3, &values);
        let spread = matrix(2, 3, &[scalar; 6]);
        prop_assert_eq!(
            ADD.apply(&array, &Value::Int(scalar)).unwrap(),
            ADD.apply(&array, &spread).unwrap()
        );
    }

    #[test]
    fn promotion_law(values in prop::collection::vec(prop_oneof![Just(i64::MAX), -5i64..5], 1..10)) {
        // Adding 1 overflows exactly the i64::MAX elements.
        let result = ADD.apply(&ints(&values), &ints(&vec![1; values.len()])).unwrap();
        let items = result.to_items();
        let overflowed = values.contains(&i64::MAX);
        prop_assert_eq!(result.ty() == ValueType::Float, overflowed);
        prop_assert!(items.iter().all(|item| matches!(item, Value::Float(_)) == overflowed));
    }

    #[test]
    fn null_law(atom in -1000i64..1000, values in small_vector()) {
        prop_assert_eq!(ADD.apply(&Value::Null, &Value::Int(atom)).unwrap(), Value::Null);
        prop_assert_eq!(ADD.apply(&Value::Int(atom), &Value::Null).unwrap(), Value::Null);
        prop_assert_eq!(kind(ADD.apply(&Value::Null, &ints(&values))), ErrorKind::Length);
        prop_assert_eq!(kind(ADD.apply(&ints(&values), &Value::Null)), ErrorKind::Length);
    }

    #[test]
    fn length_law(left in small_vector(), right in small_vector()) {
        let result = ADD.apply(&ints(&right), &ints(&left));
        if left.len() == right.len() {
            let value = result.unwrap();
            prop_assert_eq!(value.shape(), &[left.len()][..]);
        } else {
            prop_assert_eq!(kind(result), ErrorKind::Length);
        }
    }
}
