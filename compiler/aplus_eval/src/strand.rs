//! Strand and array construction from evaluated parts.
//!
//! Parts are evaluated right to left, so both helpers take their input in
//! reversed order and restore source order.

use crate::errors::{mismatch_error, EvalResult};
use crate::value::{Value, ValueType};

/// `(a; b; ...)`: enclose every part and collect them into a box vector.
pub fn build_strand(reversed: Vec<Value>) -> Value {
    Value::typed_vector(
        reversed.into_iter().rev().map(Value::enclose).collect(),
        ValueType::Box,
    )
}

/// A flat array from homogeneous parts: atoms become the items of a
/// vector, equally shaped arrays the cells of a higher-rank array. Parts
/// of differing shape are a Mismatch error.
pub fn build_array(reversed: Vec<Value>) -> EvalResult {
    let parts: Vec<Value> = reversed.into_iter().rev().collect();
    if parts.iter().all(|part| !part.is_array()) {
        return Ok(Value::vector(parts));
    }
    if let Some(first) = parts.first() {
        if parts.iter().any(|part| part.shape() != first.shape()) {
            return Err(mismatch_error("array"));
        }
    }
    Value::from_cells(parts, ValueType::Null)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
