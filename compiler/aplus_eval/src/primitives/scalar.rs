//! Scalar primitives.
//!
//! Each primitive is a static dispatch table over atomic types; the
//! broadcast engine supplies the array semantics. Implementations receive
//! `(right, left)` and compute `left f right`.
//!
//! Integer arithmetic that overflows continues in float.

use std::f64::consts::PI;

use crate::broadcast::{DyadicScalar, MonadicScalar, PairKey, TypeKey};
use crate::errors::{domain_error, operand_mismatch, EvalResult};
use crate::tolerance::{
    tolerant_ceiling, tolerant_eq, tolerant_floor, tolerant_le, tolerant_lt, whole_number,
};
use crate::value::{int_to_float, Value, ValueType};

use ValueType::{Char, Float, Integer, Symbol};

/// Entries for the four integer/float combinations.
macro_rules! numeric_table {
    ($int:expr, $float:expr $(, $extra:expr)* $(,)?) => {
        &[
            (PairKey::Pair(Integer, Integer), $int),
            (PairKey::Pair(Float, Float), $float),
            (PairKey::Pair(Float, Integer), $float),
            (PairKey::Pair(Integer, Float), $float),
            $($extra,)*
        ]
    };
}

#[inline]
fn bool_value(flag: bool) -> Value {
    Value::Int(i64::from(flag))
}

fn float_pair(right: &Value, left: &Value, primitive: &'static str) -> EvalResult<(f64, f64)> {
    match (right.as_f64(), left.as_f64()) {
        (Some(r), Some(l)) => Ok((r, l)),
        _ => Err(operand_mismatch(primitive)),
    }
}

fn int_pair(right: &Value, left: &Value, primitive: &'static str) -> EvalResult<(i64, i64)> {
    match (right, left) {
        (Value::Int(r), Value::Int(l)) => Ok((*r, *l)),
        _ => Err(operand_mismatch(primitive)),
    }
}

fn float_of(argument: &Value, primitive: &'static str) -> EvalResult<f64> {
    argument.as_f64().ok_or_else(|| operand_mismatch(primitive))
}

/// A float result that must be a real number.
fn real(value: f64, primitive: &str) -> EvalResult {
    if value.is_nan() {
        Err(domain_error(primitive))
    } else {
        Ok(Value::Float(value))
    }
}

/// Integral float result, narrowed to an integer when it fits.
fn integral(value: f64) -> Value {
    whole_number(value).map_or(Value::Float(value), Value::Int)
}

// Monadic

fn identity(argument: &Value) -> EvalResult {
    Ok(argument.clone())
}

fn negate_int(argument: &Value) -> EvalResult {
    let x = argument.as_int().ok_or_else(|| operand_mismatch("negate"))?;
    Ok(x.checked_neg()
        .map_or_else(|| Value::Float(-int_to_float(x)), Value::Int))
}

fn negate_float(argument: &Value) -> EvalResult {
    Ok(Value::Float(-float_of(argument, "negate")?))
}

fn not(argument: &Value) -> EvalResult {
    match argument.to_restricted_whole_number() {
        Some(0) => Ok(Value::Int(1)),
        Some(1) => Ok(Value::Int(0)),
        _ => Err(domain_error("not")),
    }
}

fn absolute_int(argument: &Value) -> EvalResult {
    let x = argument.as_int().ok_or_else(|| operand_mismatch("absolute value"))?;
    Ok(x.checked_abs()
        .map_or_else(|| Value::Float(int_to_float(x).abs()), Value::Int))
}

fn absolute_float(argument: &Value) -> EvalResult {
    Ok(Value::Float(float_of(argument, "absolute value")?.abs()))
}

fn ceiling(argument: &Value) -> EvalResult {
    Ok(integral(tolerant_ceiling(float_of(argument, "ceiling")?)))
}

fn floor(argument: &Value) -> EvalResult {
    Ok(integral(tolerant_floor(float_of(argument, "floor")?)))
}

fn reciprocal(argument: &Value) -> EvalResult {
    Ok(Value::Float(1.0 / float_of(argument, "reciprocal")?))
}

fn sign(argument: &Value) -> EvalResult {
    let x = float_of(argument, "sign")?;
    Ok(Value::Int(if x > 0.0 {
        1
    } else if x < 0.0 {
        -1
    } else {
        0
    }))
}

fn exponential(argument: &Value) -> EvalResult {
    Ok(Value::Float(float_of(argument, "exponential")?.exp()))
}

fn natural_log(argument: &Value) -> EvalResult {
    let x = float_of(argument, "natural log")?;
    if x < 0.0 {
        return Err(domain_error("natural log"));
    }
    Ok(Value::Float(x.ln()))
}

fn pi_times(argument: &Value) -> EvalResult {
    Ok(Value::Float(PI * float_of(argument, "pi times")?))
}

/// Table covering integers and floats with one implementation.
macro_rules! numeric_monadic {
    ($f:expr) => {
        &[(TypeKey::Type(Integer), $f), (TypeKey::Type(Float), $f)]
    };
}

pub static IDENTITY: MonadicScalar = MonadicScalar::new("identity", &[(TypeKey::Any, identity)]);
pub static NEGATE: MonadicScalar = MonadicScalar::new(
    "negate",
    &[
        (TypeKey::Type(Integer), negate_int),
        (TypeKey::Type(Float), negate_float),
    ],
);
pub static NOT: MonadicScalar = MonadicScalar::new("not", numeric_monadic!(not));
pub static ABSOLUTE_VALUE: MonadicScalar = MonadicScalar::new(
    "absolute value",
    &[
        (TypeKey::Type(Integer), absolute_int),
        (TypeKey::Type(Float), absolute_float),
    ],
);
pub static CEILING: MonadicScalar = MonadicScalar::new(
    "ceiling",
    &[(TypeKey::Type(Integer), identity), (TypeKey::Type(Float), ceiling)],
);
pub static FLOOR: MonadicScalar = MonadicScalar::new(
    "floor",
    &[(TypeKey::Type(Integer), identity), (TypeKey::Type(Float), floor)],
);
pub static RECIPROCAL: MonadicScalar = MonadicScalar::new("reciprocal", numeric_monadic!(reciprocal));
pub static SIGN: MonadicScalar = MonadicScalar::new("sign", numeric_monadic!(sign));
pub static EXPONENTIAL: MonadicScalar =
    MonadicScalar::new("exponential", numeric_monadic!(exponential));
pub static NATURAL_LOG: MonadicScalar =
    MonadicScalar::new("natural log", numeric_monadic!(natural_log));
pub static PI_TIMES: MonadicScalar = MonadicScalar::new("pi times", numeric_monadic!(pi_times));

// Dyadic arithmetic

fn add_int(right: &Value, left: &Value) -> EvalResult {
    let (r, l) = int_pair(right, left, "add")?;
    Ok(l.checked_add(r).map_or_else(
        || Value::Float(int_to_float(l) + int_to_float(r)),
        Value::Int,
    ))
}

fn add_float(right: &Value, left: &Value) -> EvalResult {
    let (r, l) = float_pair(right, left, "add")?;
    Ok(Value::Float(l + r))
}

fn subtract_int(right: &Value, left: &Value) -> EvalResult {
    let (r, l) = int_pair(right, left, "subtract")?;
    Ok(l.checked_sub(r).map_or_else(
        || Value::Float(int_to_float(l) - int_to_float(r)),
        Value::Int,
    ))
}

fn subtract_float(right: &Value, left: &Value) -> EvalResult {
    let (r, l) = float_pair(right, left, "subtract")?;
    Ok(Value::Float(l - r))
}

fn multiply_int(right: &Value, left: &Value) -> EvalResult {
    let (r, l) = int_pair(right, left, "multiply")?;
    Ok(l.checked_mul(r).map_or_else(
        || Value::Float(int_to_float(l) * int_to_float(r)),
        Value::Int,
    ))
}

fn multiply_float(right: &Value, left: &Value) -> EvalResult {
    let (r, l) = float_pair(right, left, "multiply")?;
    Ok(Value::Float(l * r))
}

fn divide(right: &Value, left: &Value) -> EvalResult {
    let (r, l) = float_pair(right, left, "divide")?;
    if l == 0.0 && r == 0.0 {
        return Ok(Value::Float(0.0));
    }
    Ok(Value::Float(l / r))
}

fn max_int(right: &Value, left: &Value) -> EvalResult {
    let (r, l) = int_pair(right, left, "max")?;
    Ok(Value::Int(l.max(r)))
}

fn max_float(right: &Value, left: &Value) -> EvalResult {
    let (r, l) = float_pair(right, left, "max")?;
    Ok(Value::Float(l.max(r)))
}

fn min_int(right: &Value, left: &Value) -> EvalResult {
    let (r, l) = int_pair(right, left, "min")?;
    Ok(Value::Int(l.min(r)))
}

fn min_float(right: &Value, left: &Value) -> EvalResult {
    let (r, l) = float_pair(right, left, "min")?;
    Ok(Value::Float(l.min(r)))
}

/// `left | right`: the remainder of `right` modulo `left`, with the sign
/// of `left`. A zero modulus returns `right`.
fn residue_int(right: &Value, left: &Value) -> EvalResult {
    let (r, l) = int_pair(right, left, "residue")?;
    if l == 0 {
        return Ok(Value::Int(r));
    }
    let remainder = r.wrapping_rem(l);
    Ok(Value::Int(if remainder != 0 && (remainder < 0) != (l < 0) {
        remainder + l
    } else {
        remainder
    }))
}

fn residue_float(right: &Value, left: &Value) -> EvalResult {
    let (r, l) = float_pair(right, left, "residue")?;
    if l == 0.0 {
        return Ok(Value::Float(r));
    }
    let quotient = r / l;
    let whole = tolerant_floor(quotient);
    if tolerant_eq(quotient, whole) {
        return Ok(Value::Float(0.0));
    }
    Ok(Value::Float(r - l * whole))
}

fn power_int(right: &Value, left: &Value) -> EvalResult {
    let (r, l) = int_pair(right, left, "power")?;
    if let Ok(exponent) = u32::try_from(r) {
        if let Some(result) = l.checked_pow(exponent) {
            return Ok(Value::Int(result));
        }
    }
    real(int_to_float(l).powf(int_to_float(r)), "power")
}

fn power_float(right: &Value, left: &Value) -> EvalResult {
    let (r, l) = float_pair(right, left, "power")?;
    real(l.powf(r), "power")
}

fn log(right: &Value, left: &Value) -> EvalResult {
    let (r, l) = float_pair(right, left, "log")?;
    if r < 0.0 || l < 0.0 {
        return Err(domain_error("log"));
    }
    real(r.ln() / l.ln(), "log")
}

/// `left ○ right`: the circular function selected by `left`.
fn circle(right: &Value, left: &Value) -> EvalResult {
    let selector = left
        .to_restricted_whole_number()
        .ok_or_else(|| domain_error("circle"))?;
    let x = float_of(right, "circle")?;
    let result = match selector {
        0 => (1.0 - x * x).sqrt(),
        1 => x.sin(),
        2 => x.cos(),
        3 => x.tan(),
        4 => (1.0 + x * x).sqrt(),
        5 => x.sinh(),
        6 => x.cosh(),
        7 => x.tanh(),
        -1 => x.asin(),
        -2 => x.acos(),
        -3 => x.atan(),
        -4 => (x * x - 1.0).sqrt(),
        -5 => x.asinh(),
        -6 => x.acosh(),
        -7 => x.atanh(),
        _ => return Err(domain_error("circle")),
    };
    real(result, "circle")
}

fn and(right: &Value, left: &Value) -> EvalResult {
    let (r, l) = float_pair(right, left, "and")?;
    Ok(bool_value(l != 0.0 && r != 0.0))
}

fn or(right: &Value, left: &Value) -> EvalResult {
    let (r, l) = float_pair(right, left, "or")?;
    Ok(bool_value(l != 0.0 || r != 0.0))
}

pub static ADD: DyadicScalar = DyadicScalar::new("add", numeric_table!(add_int, add_float));
pub static SUBTRACT: DyadicScalar =
    DyadicScalar::new("subtract", numeric_table!(subtract_int, subtract_float));
pub static MULTIPLY: DyadicScalar =
    DyadicScalar::new("multiply", numeric_table!(multiply_int, multiply_float));
pub static DIVIDE: DyadicScalar = DyadicScalar::new("divide", numeric_table!(divide, divide));
pub static MAX: DyadicScalar = DyadicScalar::new("max", numeric_table!(max_int, max_float));
pub static MIN: DyadicScalar = DyadicScalar::new("min", numeric_table!(min_int, min_float));
pub static RESIDUE: DyadicScalar =
    DyadicScalar::new("residue", numeric_table!(residue_int, residue_float));
pub static POWER: DyadicScalar = DyadicScalar::new("power", numeric_table!(power_int, power_float));
pub static LOG: DyadicScalar = DyadicScalar::new("log", numeric_table!(log, log));
pub static CIRCLE: DyadicScalar = DyadicScalar::new("circle", numeric_table!(circle, circle));
pub static AND: DyadicScalar = DyadicScalar::new("and", numeric_table!(and, and));
pub static OR: DyadicScalar = DyadicScalar::new("or", numeric_table!(or, or));

// Relational

/// Ordering of two atoms of one comparable kind: `Some(true)` when
/// `left < right`, `Some(false)` otherwise, tolerant for floats.
fn less_than(right: &Value, left: &Value) -> Option<bool> {
    match (right, left) {
        (Value::Int(r), Value::Int(l)) => Some(l < r),
        (Value::Char(r), Value::Char(l)) => Some(l < r),
        (Value::Sym(r), Value::Sym(l)) => Some(**l < **r),
        _ => Some(tolerant_lt(left.as_f64()?, right.as_f64()?)),
    }
}

fn atoms_equal(right: &Value, left: &Value) -> bool {
    match (right, left) {
        (Value::Int(r), Value::Int(l)) => l == r,
        _ => match (right.as_f64(), left.as_f64()) {
            (Some(r), Some(l)) => tolerant_eq(l, r),
            _ => right == left,
        },
    }
}

fn equal(right: &Value, left: &Value) -> EvalResult {
    Ok(bool_value(atoms_equal(right, left)))
}

fn not_equal(right: &Value, left: &Value) -> EvalResult {
    Ok(bool_value(!atoms_equal(right, left)))
}

fn lt(right: &Value, left: &Value) -> EvalResult {
    less_than(right, left)
        .map(bool_value)
        .ok_or_else(|| operand_mismatch("less than"))
}

fn gt(right: &Value, left: &Value) -> EvalResult {
    less_than(left, right)
        .map(bool_value)
        .ok_or_else(|| operand_mismatch("greater than"))
}

fn lte(right: &Value, left: &Value) -> EvalResult {
    match (right.as_f64(), left.as_f64()) {
        (Some(r), Some(l)) => Ok(bool_value(tolerant_le(l, r))),
        _ => less_than(left, right)
            .map(|greater| bool_value(!greater))
            .ok_or_else(|| operand_mismatch("less than or equal to")),
    }
}

fn gte(right: &Value, left: &Value) -> EvalResult {
    match (right.as_f64(), left.as_f64()) {
        (Some(r), Some(l)) => Ok(bool_value(tolerant_le(r, l))),
        _ => less_than(right, left)
            .map(|less| bool_value(!less))
            .ok_or_else(|| operand_mismatch("greater than or equal to")),
    }
}

/// Numeric pairs plus characters and symbols.
macro_rules! ordered_table {
    ($f:expr) => {
        numeric_table!(
            $f,
            $f,
            (PairKey::Pair(Char, Char), $f),
            (PairKey::Pair(Symbol, Symbol), $f),
        )
    };
}

pub static EQUAL: DyadicScalar = DyadicScalar::new("equal to", &[(PairKey::Any, equal)]);
pub static NOT_EQUAL: DyadicScalar =
    DyadicScalar::new("not equal to", &[(PairKey::Any, not_equal)]);
pub static LESS_THAN: DyadicScalar = DyadicScalar::new("less than", ordered_table!(lt));
pub static LESS_THAN_OR_EQUAL: DyadicScalar =
    DyadicScalar::new("less than or equal to", ordered_table!(lte));
pub static GREATER_THAN: DyadicScalar = DyadicScalar::new("greater than", ordered_table!(gt));
pub static GREATER_THAN_OR_EQUAL: DyadicScalar =
    DyadicScalar::new("greater than or equal to", ordered_table!(gte));

// Symbols

/// `` `ctx combine `name `` is `` `ctx.name ``.
fn combine_symbols(right: &Value, left: &Value) -> EvalResult {
    match (right.as_symbol(), left.as_symbol()) {
        (Some(name), Some("")) => Ok(Value::symbol(name)),
        (Some(name), Some(context)) => Ok(Value::symbol(&format!("{context}.{name}"))),
        _ => Err(operand_mismatch("combine symbols")),
    }
}

pub static COMBINE_SYMBOLS: DyadicScalar = DyadicScalar::new(
    "combine symbols",
    &[(PairKey::Pair(Symbol, Symbol), combine_symbols)],
);

// Bitwise

macro_rules! bitwise {
    ($fn_name:ident, $static_name:ident, $label:literal, |$l:ident, $r:ident| $body:expr) => {
        fn $fn_name(right: &Value, left: &Value) -> EvalResult {
            let ($r, $l) = int_pair(right, left, $label)?;
            Ok(Value::Int($body))
        }

        pub static $static_name: DyadicScalar =
            DyadicScalar::new($label, &[(PairKey::Pair(Integer, Integer), $fn_name)]);
    };
}

bitwise!(bitwise_and, BITWISE_AND, "bitwise and", |l, r| l & r);
bitwise!(bitwise_or, BITWISE_OR, "bitwise or", |l, r| l | r);
bitwise!(bitwise_less, BITWISE_LESS, "bitwise less", |l, r| !l & r);
bitwise!(bitwise_less_equal, BITWISE_LESS_EQUAL, "bitwise less equal", |l, r| !l | r);
bitwise!(bitwise_equal, BITWISE_EQUAL, "bitwise equal", |l, r| !(l ^ r));
bitwise!(bitwise_greater_equal, BITWISE_GREATER_EQUAL, "bitwise greater equal", |l, r| l | !r);
bitwise!(bitwise_greater, BITWISE_GREATER, "bitwise greater", |l, r| l & !r);
bitwise!(bitwise_not_equal, BITWISE_NOT_EQUAL, "bitwise not equal", |l, r| l ^ r);

fn bitwise_not(argument: &Value) -> EvalResult {
    let x = argument.as_int().ok_or_else(|| operand_mismatch("bitwise not"))?;
    Ok(Value::Int(!x))
}

pub static BITWISE_NOT: MonadicScalar =
    MonadicScalar::new("bitwise not", &[(TypeKey::Type(Integer), bitwise_not)]);
