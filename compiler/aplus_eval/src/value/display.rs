//! A+-style printing of values.
//!
//! Vectors are space-separated, character vectors print as text, symbols
//! carry a leading backtick, boxes print as `< item`, higher-rank arrays one
//! row per line and null prints as nothing. Negative numbers use the high
//! minus `¯`.

use std::fmt::{self, Write};

use super::{ArrayValue, Value, ValueType};

fn write_int(f: &mut impl Write, value: i64) -> fmt::Result {
    if value < 0 {
        write!(f, "¯{}", value.unsigned_abs())
    } else {
        write!(f, "{value}")
    }
}

fn write_float(f: &mut impl Write, value: f64) -> fmt::Result {
    if value.is_nan() {
        return f.write_str("NaN");
    }
    if value.is_sign_negative() && value != 0.0 {
        f.write_char('¯')?;
    }
    let magnitude = value.abs();
    if magnitude.is_infinite() {
        f.write_str("Inf")
    } else if magnitude.fract() == 0.0 && magnitude < 1e15 {
        write!(f, "{magnitude:.0}")
    } else {
        write!(f, "{magnitude}")
    }
}

fn write_atom(f: &mut impl Write, value: &Value) -> fmt::Result {
    match value {
        Value::Int(i) => write_int(f, *i),
        Value::Float(x) => write_float(f, *x),
        Value::Char(ch) => f.write_char(*ch),
        Value::Sym(name) => write!(f, "`{}", &**name),
        Value::Box(inner) => {
            f.write_str("< ")?;
            write_atom(f, inner)
        }
        Value::Func(function) => f.write_str(function.name()),
        Value::Null => Ok(()),
        Value::Array(array) => write_array(f, array),
    }
}

fn write_row(f: &mut impl Write, ty: ValueType, row: &[Value]) -> fmt::Result {
    let separator = if ty == ValueType::Char { "" } else { " " };
    for (i, item) in row.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write_atom(f, item)?;
    }
    Ok(())
}

fn write_array(f: &mut impl Write, array: &ArrayValue) -> fmt::Result {
    let items = array.items();
    if array.ty() == ValueType::Box && array.rank() == 1 {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                f.write_char('\n')?;
            }
            write_atom(f, item)?;
        }
        return Ok(());
    }
    let row_len = array.shape().last().copied().unwrap_or(0);
    if row_len == 0 {
        return Ok(());
    }
    for (i, row) in items.chunks(row_len).enumerate() {
        if i > 0 {
            f.write_char('\n')?;
        }
        write_row(f, array.ty(), row)?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_atom(f, self)
    }
}
