//! Comparison tolerance.
//!
//! Every scalar relational, equality, floor and ceiling implementation
//! compares floats through these helpers instead of bit-exact comparison.

/// Relative tolerance within which two floats compare equal.
pub const COMPARISON_TOLERANCE: f64 = 1e-13;

/// `a` and `b` are equal within the relative tolerance.
#[inline]
pub fn tolerant_eq(a: f64, b: f64) -> bool {
    if a == b {
        return true;
    }
    if a.is_infinite() || b.is_infinite() {
        return false;
    }
    (a - b).abs() <= COMPARISON_TOLERANCE * a.abs().max(b.abs())
}

#[inline]
pub fn tolerant_lt(a: f64, b: f64) -> bool {
    !tolerant_eq(a, b) && a < b
}

#[inline]
pub fn tolerant_le(a: f64, b: f64) -> bool {
    tolerant_eq(a, b) || a < b
}

/// Floor, snapping up to the next integer when within tolerance of it.
pub fn tolerant_floor(x: f64) -> f64 {
    let floor = x.floor();
    if tolerant_eq(x, floor + 1.0) {
        floor + 1.0
    } else {
        floor
    }
}

/// Ceiling, snapping down to the previous integer when within tolerance.
pub fn tolerant_ceiling(x: f64) -> f64 {
    let ceiling = x.ceil();
    if tolerant_eq(x, ceiling - 1.0) {
        ceiling - 1.0
    } else {
        ceiling
    }
}

/// Largest magnitude an `f64` may have and still convert to `i64`.
const WHOLE_LIMIT: f64 = 9_223_372_036_854_775_807.0;

/// The integer `x` denotes, if it lies within tolerance of one that fits
/// in an `i64`.
#[allow(clippy::cast_possible_truncation)]
pub fn whole_number(x: f64) -> Option<i64> {
    if !x.is_finite() {
        return None;
    }
    let rounded = x.round();
    if !tolerant_eq(x, rounded) || rounded.abs() >= WHOLE_LIMIT {
        return None;
    }
    Some(rounded as i64)
}

#[cfg(test)]
mod tests;
