use pretty_assertions::assert_eq;

use super::*;

#[test]
fn strand_restores_source_order() {
    let strand = build_strand(vec![Value::Int(0), Value::string("ok")]);
    assert_eq!(strand.ty(), ValueType::Box);
    assert_eq!(
        strand.to_items(),
        vec![Value::enclose(Value::string("ok")), Value::enclose(Value::Int(0))]
    );
}

#[test]
fn strand_of_nothing_is_empty_box_vector() {
    let strand = build_strand(Vec::new());
    assert_eq!(strand.shape(), &[0]);
    assert_eq!(strand.ty(), ValueType::Box);
}

#[test]
fn array_of_atoms_is_vector() {
    let array = build_array(vec![Value::Int(3), Value::Int(2), Value::Int(1)]).unwrap();
    assert_eq!(
        array,
        Value::vector(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
    );
}

#[test]
fn array_of_vectors_is_matrix() {
    let row = |a, b| Value::vector(vec![Value::Int(a), Value::Int(b)]);
    let array = build_array(vec![row(3, 4), row(1, 2)]).unwrap();
    assert_eq!(array.shape(), &[2, 2]);
    assert_eq!(array.to_items()[0], Value::Int(1));
}

#[test]
fn array_promotes_mixed_numbers() {
    let array = build_array(vec![Value::Float(0.5), Value::Int(1)]).unwrap();
    assert_eq!(array.to_items(), vec![Value::Float(1.0), Value::Float(0.5)]);
}

#[test]
fn array_of_unequal_parts_is_mismatch() {
    let row = Value::vector(vec![Value::Int(1), Value::Int(2)]);
    let longer = Value::vector(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
    for parts in [vec![longer, row.clone()], vec![Value::Int(0), row]] {
        let err = build_array(parts).unwrap_err();
        assert_eq!(err.as_error().unwrap().kind, crate::errors::ErrorKind::Mismatch);
    }
}
