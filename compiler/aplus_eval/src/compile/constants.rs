//! Literal folding.
//!
//! A constant list folds into one array whose type is the least upper bound
//! of its members: integers stay integer unless a member is a float or an
//! infinity. Numbers cannot be mixed with symbols, and character constants
//! never appear in a list.

use aplus_ir::{Constant, ConstantKind, ConstantList};

use crate::errors::{AplError, ErrorKind};
use crate::value::{Value, ValueType};

fn parse_error(text: &str) -> AplError {
    AplError::new(ErrorKind::Parse, format!("{text}: parse"))
}

/// The value of a single literal.
pub(super) fn constant_value(constant: &Constant) -> Result<Value, AplError> {
    let value = match constant.kind {
        ConstantKind::Integer => constant
            .as_integer()
            .map(Value::Int)
            .or_else(|| constant.as_float().map(Value::Float)),
        ConstantKind::Double | ConstantKind::PositiveInfinity | ConstantKind::NegativeInfinity => {
            constant.as_float().map(Value::Float)
        }
        ConstantKind::Symbol => Some(Value::symbol(&constant.text)),
        ConstantKind::Character => constant.as_char().map(Value::Char),
    };
    value.ok_or_else(|| parse_error(&constant.text))
}

/// Fold a literal list. A single member compiles to that member alone.
pub(super) fn fold(list: &ConstantList) -> Result<Value, AplError> {
    if let [single] = list.items.as_slice() {
        return constant_value(single);
    }
    let Some(kind) = list.kind() else {
        return Ok(Value::typed_vector(Vec::new(), ValueType::Integer));
    };
    if list.is_mixed() || kind == ConstantKind::Character {
        return Err(parse_error("constant list"));
    }
    let items = list
        .items
        .iter()
        .map(constant_value)
        .collect::<Result<Vec<_>, _>>()?;
    let ty = match kind {
        ConstantKind::Integer => ValueType::Integer,
        ConstantKind::Symbol => ValueType::Symbol,
        _ => ValueType::Float,
    };
    let items = if ty == ValueType::Float {
        items.into_iter().map(Value::into_float).collect()
    } else {
        items
    };
    Ok(Value::typed_vector(items, ty))
}
