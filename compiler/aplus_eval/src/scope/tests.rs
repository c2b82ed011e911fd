use pretty_assertions::assert_eq;

use super::*;
use crate::errors::ErrorKind;

#[test]
fn unset_variable_in_root_is_value_error() {
    let store = ContextStore::new();
    let err = store.get(".", "foo").unwrap_err();
    let err = err.as_error().unwrap();
    assert_eq!(err.kind, ErrorKind::Value);
    assert!(err.message.contains("foo"));
    assert!(err.message.contains("`.`"));
}

#[test]
fn missing_variable_in_existing_context() {
    let mut store = ContextStore::new();
    store.set("ctx", "a", Value::Int(1));
    let err = store.get("ctx", "b").unwrap_err();
    assert_eq!(err.as_error().unwrap().kind, ErrorKind::Value);
}

#[test]
fn reads_do_not_create_contexts() {
    let store = ContextStore::new();
    let _ = store.get("ghost", "x");
    assert!(!store.has_context("ghost"));
}

#[test]
fn write_creates_context() {
    let mut store = ContextStore::new();
    store.set("math", "half", Value::Float(2.5));
    assert!(store.has_context("math"));
    assert!(store.contains("math", "half"));
    assert_eq!(store.get("math", "half").unwrap(), Value::Float(2.5));
}

#[test]
fn contexts_are_separate() {
    let mut store = ContextStore::new();
    store.set(".", "x", Value::Int(1));
    store.set("a", "x", Value::Int(2));
    assert_eq!(store.get(".", "x").unwrap(), Value::Int(1));
    assert_eq!(store.get("a", "x").unwrap(), Value::Int(2));
}

#[test]
fn overwrite_replaces_value() {
    let mut store = ContextStore::new();
    store.set(".", "x", Value::Int(1));
    store.set(".", "x", Value::symbol("y"));
    assert_eq!(store.get(".", "x").unwrap(), Value::symbol("y"));
}

#[test]
fn frame_slots() {
    let mut frame = Frame::with_slots(2);
    assert_eq!(
        frame.get(1, ".", "b").unwrap_err().as_error().unwrap().kind,
        ErrorKind::Value
    );
    frame.set(1, Value::Int(4));
    assert_eq!(frame.get(1, ".", "b").unwrap(), Value::Int(4));
    *frame.get_mut(1, ".", "b").unwrap() = Value::Int(5);
    assert_eq!(frame.get(1, ".", "b").unwrap(), Value::Int(5));
}
