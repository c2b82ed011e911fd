use super::*;

#[test]
fn tolerant_eq_relative_window() {
    assert!(tolerant_eq(1.0, 1.0 + 1e-15));
    assert!(tolerant_eq(1e20, 1e20 * (1.0 + 1e-14)));
    assert!(!tolerant_eq(1.0, 1.0 + 1e-10));
    assert!(!tolerant_eq(0.0, 1e-300));
}

#[test]
fn tolerant_eq_infinities() {
    assert!(tolerant_eq(f64::INFINITY, f64::INFINITY));
    assert!(!tolerant_eq(f64::INFINITY, 1e308));
}

#[test]
fn tolerant_ordering() {
    assert!(tolerant_lt(1.0, 2.0));
    assert!(!tolerant_lt(1.0, 1.0 + 1e-15));
    assert!(tolerant_le(1.0 + 1e-15, 1.0));
}

#[test]
fn floor_and_ceiling_snap() {
    assert_eq!(tolerant_floor(2.999_999_999_999_999_6), 3.0);
    assert_eq!(tolerant_floor(2.5), 2.0);
    assert_eq!(tolerant_floor(-2.5), -3.0);
    assert_eq!(tolerant_ceiling(3.000_000_000_000_000_4), 3.0);
    assert_eq!(tolerant_ceiling(2.1), 3.0);
}

#[test]
fn whole_number_conversion() {
    assert_eq!(whole_number(3.0), Some(3));
    assert_eq!(whole_number(-4.000_000_000_000_000_1), Some(-4));
    assert_eq!(whole_number(3.5), None);
    assert_eq!(whole_number(f64::NAN), None);
    assert_eq!(whole_number(1e300), None);
}
