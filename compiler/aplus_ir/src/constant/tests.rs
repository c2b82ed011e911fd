use super::*;

#[test]
fn integer_parsing() {
    assert_eq!(Constant::integer(42).as_integer(), Some(42));
    assert_eq!(Constant::new(ConstantKind::Integer, "-7").as_integer(), Some(-7));
    assert_eq!(Constant::new(ConstantKind::Integer, "¯7").as_integer(), Some(-7));
}

#[test]
fn integer_overflow_falls_back_to_float() {
    let big = Constant::new(ConstantKind::Integer, "99999999999999999999");
    assert_eq!(big.as_integer(), None);
    assert_eq!(big.as_float(), Some(1e20));
}

#[test]
fn infinities() {
    assert_eq!(Constant::double(f64::INFINITY).kind, ConstantKind::PositiveInfinity);
    assert_eq!(Constant::double(f64::NEG_INFINITY).as_float(), Some(f64::NEG_INFINITY));
}

#[test]
fn double_text_round_trips() {
    assert_eq!(Constant::double(2.5).as_float(), Some(2.5));
    assert_eq!(Constant::double(3.0).as_float(), Some(3.0));
}

#[test]
fn symbol_is_not_numeric() {
    let sym = Constant::symbol("abc");
    assert_eq!(sym.as_float(), None);
    assert_eq!(sym.to_string(), "`abc");
}

#[test]
fn character() {
    assert_eq!(Constant::character('x').as_char(), Some('x'));
    assert_eq!(Constant::new(ConstantKind::Character, "xy").as_char(), None);
}

#[test]
fn list_kind_is_least_upper_bound() {
    let list = ConstantList::new(vec![
        Constant::integer(1),
        Constant::double(2.5),
        Constant::integer(3),
    ]);
    assert_eq!(list.kind(), Some(ConstantKind::Double));

    let list = ConstantList::new(vec![Constant::integer(1), Constant::double(f64::INFINITY)]);
    assert_eq!(list.kind(), Some(ConstantKind::PositiveInfinity));
    assert!(!list.is_mixed());

    assert_eq!(ConstantList::new(vec![]).kind(), None);
}

#[test]
fn list_mixed_detection() {
    let list = ConstantList::new(vec![Constant::integer(1), Constant::symbol("a")]);
    assert!(list.is_mixed());
}
