//! Structural and selection primitives.
//!
//! These work on major cells (items along the first axis); an atom acts as
//! a one-item vector where a vector is required.

use std::cmp::Ordering;

use smallvec::smallvec;

use super::{DyadicFunction, MonadicFunction};
use crate::errors::{
    domain_error, index_error, length_error, mismatch_error, rank_error, type_error, EvalResult,
};
use crate::indexing;
use crate::runtime::Runtime;
use crate::tolerance::{tolerant_eq, tolerant_lt};
use crate::value::{Shape, Value, ValueType};

/// Declare a unit struct primitive and its static instance.
macro_rules! primitive {
    ($ty:ident, $instance:ident) => {
        pub struct $ty;
        pub static $instance: $ty = $ty;
    };
}

/// Fill item for padding arrays of type `ty`.
pub(crate) fn fill_for(ty: ValueType) -> Value {
    match ty {
        ValueType::Integer => Value::Int(0),
        ValueType::Float => Value::Float(0.0),
        ValueType::Char => Value::Char(' '),
        ValueType::Symbol => Value::symbol(""),
        ValueType::Box | ValueType::Array => Value::enclose(Value::Null),
        ValueType::Func | ValueType::Null => Value::Null,
    }
}

/// A non-negative integer argument.
pub(crate) fn count_of(value: &Value, primitive: &str) -> EvalResult<usize> {
    let scalar = single(value, primitive)?;
    let n = scalar
        .to_restricted_whole_number()
        .ok_or_else(|| type_error(primitive))?;
    usize::try_from(n).map_err(|_| domain_error(primitive))
}

/// A signed integer argument.
pub(crate) fn integer_of(value: &Value, primitive: &str) -> EvalResult<i64> {
    single(value, primitive)?
        .to_restricted_whole_number()
        .ok_or_else(|| type_error(primitive))
}

/// The only item of a scalar or one-item array.
fn single(value: &Value, primitive: &str) -> EvalResult<Value> {
    match value {
        Value::Array(array) if array.len() == 1 => Ok(array.items()[0].clone()),
        Value::Array(_) => Err(length_error(primitive)),
        Value::Null => Err(length_error(primitive)),
        atom => Ok(atom.clone()),
    }
}

/// Major cells of `value`, with an atom treated as a one-item vector.
fn cells(value: &Value) -> EvalResult<Vec<Value>> {
    value.major_cells()
}

/// Shape of one major cell.
fn cell_shape(value: &Value) -> &[usize] {
    match value.shape() {
        [] => &[],
        shape => &shape[1..],
    }
}

/// Reassemble cells, keeping `like`'s cell shape and type for empty results.
fn rebuild(cells: Vec<Value>, like: &Value) -> EvalResult {
    if cells.is_empty() {
        let mut shape: Shape = smallvec![0];
        shape.extend_from_slice(cell_shape(like));
        return Value::array(&shape, Vec::new(), like.ty());
    }
    Value::from_cells(cells, like.ty())
}

fn int_atom(value: usize) -> Value {
    Value::Int(i64::try_from(value).unwrap_or(i64::MAX))
}

fn int_vector(values: impl IntoIterator<Item = usize>) -> Value {
    Value::typed_vector(values.into_iter().map(int_atom).collect(), ValueType::Integer)
}

/// Structural match with tolerant float comparison.
pub(crate) fn values_match(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Array(x), Value::Array(y)) => {
            x.shape() == y.shape()
                && x.items()
                    .iter()
                    .zip(y.items().iter())
                    .all(|(p, q)| values_match(p, q))
        }
        (Value::Box(x), Value::Box(y)) => values_match(x, y),
        (Value::Int(x), Value::Int(y)) => x == y,
        _ => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => tolerant_eq(x, y),
            _ => a == b,
        },
    }
}

/// Total order used by grading: numbers, then characters, then symbols.
fn compare_atoms(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Char(x), Value::Char(y)) => x.cmp(y),
        (Value::Sym(x), Value::Sym(y)) => (**x).cmp(&**y),
        _ => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) if tolerant_lt(x, y) => Ordering::Less,
            (Some(x), Some(y)) if tolerant_lt(y, x) => Ordering::Greater,
            _ => Ordering::Equal,
        },
    }
}

fn compare_cells(a: &Value, b: &Value) -> Ordering {
    a.to_items()
        .iter()
        .zip(b.to_items().iter())
        .map(|(x, y)| compare_atoms(x, y))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

// Boxing

primitive!(Enclose, ENCLOSE);

impl MonadicFunction for Enclose {
    fn name(&self) -> &'static str {
        "enclose"
    }

    fn execute(&self, _runtime: &mut Runtime, right: &Value) -> EvalResult {
        Ok(Value::enclose(right.clone()))
    }
}

primitive!(Disclose, DISCLOSE);

impl MonadicFunction for Disclose {
    fn name(&self) -> &'static str {
        "disclose"
    }

    /// An array of boxes discloses to an array whose trailing axes are the
    /// (common) shape of the contents.
    fn execute(&self, _runtime: &mut Runtime, right: &Value) -> EvalResult {
        let Value::Array(array) = right else {
            return Ok(right.disclose());
        };
        if array.ty() != ValueType::Box {
            return Ok(right.clone());
        }
        let contents: Vec<Value> = array.items().iter().map(Value::disclose).collect();
        let inner: Shape = contents
            .first()
            .map(|c| c.shape().iter().copied().collect())
            .unwrap_or_default();
        if contents.iter().any(|c| c.shape() != inner.as_slice()) {
            return Err(mismatch_error("disclose"));
        }
        let mut shape: Shape = array.shape().iter().copied().collect();
        shape.extend_from_slice(&inner);
        let items = contents.iter().flat_map(Value::to_items).collect();
        Value::array(&shape, items, ValueType::Null)
    }
}

// Selection of arguments

primitive!(Right, RIGHT);

impl MonadicFunction for Right {
    fn name(&self) -> &'static str {
        "right"
    }

    /// The argument, detached from external storage.
    fn execute(&self, _runtime: &mut Runtime, right: &Value) -> EvalResult {
        Ok(right.clone_value())
    }
}

impl DyadicFunction for Right {
    fn name(&self) -> &'static str {
        "right"
    }

    fn execute(&self, _runtime: &mut Runtime, right: &Value, _left: &Value) -> EvalResult {
        Ok(right.clone_value())
    }
}

primitive!(Left, LEFT);

impl DyadicFunction for Left {
    fn name(&self) -> &'static str {
        "left"
    }

    fn execute(&self, _runtime: &mut Runtime, _right: &Value, left: &Value) -> EvalResult {
        Ok(left.clone())
    }
}

primitive!(NullFunction, NULL);

impl MonadicFunction for NullFunction {
    fn name(&self) -> &'static str {
        "null"
    }

    fn execute(&self, _runtime: &mut Runtime, _right: &Value) -> EvalResult {
        Ok(Value::Null)
    }
}

// Shape

primitive!(ShapeOf, SHAPE);

impl MonadicFunction for ShapeOf {
    fn name(&self) -> &'static str {
        "shape"
    }

    fn execute(&self, _runtime: &mut Runtime, right: &Value) -> EvalResult {
        if right.is_null() {
            return Ok(int_vector([0]));
        }
        Ok(int_vector(right.shape().iter().copied()))
    }
}

primitive!(Reshape, RESHAPE);

impl DyadicFunction for Reshape {
    fn name(&self) -> &'static str {
        "reshape"
    }

    /// Cycle the items of `right` through the shape `left`.
    fn execute(&self, _runtime: &mut Runtime, right: &Value, left: &Value) -> EvalResult {
        if left.rank() > 1 {
            return Err(rank_error("reshape"));
        }
        let shape = left
            .to_items()
            .iter()
            .map(|dim| count_of(dim, "reshape"))
            .collect::<EvalResult<Shape>>()?;
        let source = right.to_items();
        let count: usize = shape.iter().product();
        let items: Vec<Value> = if source.is_empty() {
            vec![fill_for(right.ty()); count]
        } else {
            source.iter().cycle().take(count).cloned().collect()
        };
        if shape.is_empty() {
            return items
                .into_iter()
                .next()
                .ok_or_else(|| length_error("reshape"));
        }
        Value::array(&shape, items, right.ty())
    }
}

primitive!(Count, COUNT);

impl MonadicFunction for Count {
    fn name(&self) -> &'static str {
        "count"
    }

    fn execute(&self, _runtime: &mut Runtime, right: &Value) -> EvalResult {
        Ok(int_atom(right.tally()))
    }
}

primitive!(Ravel, RAVEL);

impl MonadicFunction for Ravel {
    fn name(&self) -> &'static str {
        "ravel"
    }

    fn execute(&self, _runtime: &mut Runtime, right: &Value) -> EvalResult {
        Ok(Value::typed_vector(right.to_items(), right.ty()))
    }
}

primitive!(Catenate, CATENATE);

impl DyadicFunction for Catenate {
    fn name(&self) -> &'static str {
        "catenate"
    }

    /// Join along the first axis. An operand one rank short counts as a
    /// single cell; null joins with anything.
    fn execute(&self, _runtime: &mut Runtime, right: &Value, left: &Value) -> EvalResult {
        let (l_ty, r_ty) = (left.ty(), right.ty());
        let compatible = l_ty == r_ty
            || l_ty == ValueType::Null
            || r_ty == ValueType::Null
            || (l_ty.is_numeric() && r_ty.is_numeric());
        if !compatible {
            return Err(type_error("catenate"));
        }
        let rank = left.rank().max(right.rank()).max(1);
        let widest = if left.rank() >= right.rank() { left } else { right };
        let as_cells = |value: &Value| -> EvalResult<Vec<Value>> {
            if value.is_null() {
                Ok(Vec::new())
            } else if value.rank() == rank {
                cells(value)
            } else if value.rank() + 1 == rank {
                Ok(vec![value.clone()])
            } else if value.rank() == 0 {
                let shape = cell_shape(widest);
                let cell = vec![value.clone(); shape.iter().product()];
                Ok(vec![Value::array(shape, cell, value.ty())?])
            } else {
                Err(rank_error("catenate"))
            }
        };
        let mut joined = as_cells(left)?;
        joined.extend(as_cells(right)?);
        let like = if left.is_null_typed() { right } else { left };
        if let Some(first) = joined.first() {
            let shape = first.shape();
            if joined.iter().any(|c| c.shape() != shape) {
                return Err(length_error("catenate"));
            }
        }
        if joined.is_empty() {
            return Ok(Value::typed_vector(Vec::new(), like.ty()));
        }
        Value::from_cells(joined, like.ty())
    }
}

// Index generation and ordering

primitive!(Interval, INTERVAL);

impl MonadicFunction for Interval {
    fn name(&self) -> &'static str {
        "interval"
    }

    fn execute(&self, _runtime: &mut Runtime, right: &Value) -> EvalResult {
        let n = count_of(right, "interval")?;
        Ok(int_vector(0..n))
    }
}

primitive!(Find, FIND);

impl DyadicFunction for Find {
    fn name(&self) -> &'static str {
        "find"
    }

    /// Index in `left` of the first match of each item of `right`; the
    /// length of `left` when absent.
    fn execute(&self, _runtime: &mut Runtime, right: &Value, left: &Value) -> EvalResult {
        if left.rank() > 1 {
            return Err(rank_error("find"));
        }
        let haystack = left.to_items();
        let found: Vec<Value> = right
            .to_items()
            .iter()
            .map(|needle| {
                int_atom(
                    haystack
                        .iter()
                        .position(|item| values_match(item, needle))
                        .unwrap_or(haystack.len()),
                )
            })
            .collect();
        if right.is_null() {
            return Ok(Value::typed_vector(found, ValueType::Integer));
        }
        Value::array(right.shape(), found, ValueType::Integer)
    }
}

primitive!(Member, MEMBER);

impl DyadicFunction for Member {
    fn name(&self) -> &'static str {
        "member"
    }

    /// For each item of `left`, whether it occurs anywhere in `right`.
    fn execute(&self, _runtime: &mut Runtime, right: &Value, left: &Value) -> EvalResult {
        let pool = right.to_items();
        let flags: Vec<Value> = left
            .to_items()
            .iter()
            .map(|item| Value::Int(i64::from(pool.iter().any(|p| values_match(p, item)))))
            .collect();
        if left.rank() == 0 {
            return flags
                .into_iter()
                .next()
                .ok_or_else(|| length_error("member"));
        }
        Value::array(left.shape(), flags, ValueType::Integer)
    }
}

primitive!(Reverse, REVERSE);

impl MonadicFunction for Reverse {
    fn name(&self) -> &'static str {
        "reverse"
    }

    fn execute(&self, _runtime: &mut Runtime, right: &Value) -> EvalResult {
        if !right.is_array() {
            return Ok(right.clone());
        }
        let mut items = cells(right)?;
        items.reverse();
        rebuild(items, right)
    }
}

primitive!(Rotate, ROTATE);

impl DyadicFunction for Rotate {
    fn name(&self) -> &'static str {
        "rotate"
    }

    fn execute(&self, _runtime: &mut Runtime, right: &Value, left: &Value) -> EvalResult {
        let amount = integer_of(left, "rotate")?;
        if !right.is_array() {
            return Ok(right.clone());
        }
        let mut items = cells(right)?;
        if !items.is_empty() {
            let len = i64::try_from(items.len()).map_err(|_| length_error("rotate"))?;
            let shift = usize::try_from(amount.rem_euclid(len)).unwrap_or(0);
            items.rotate_left(shift);
        }
        rebuild(items, right)
    }
}

primitive!(Take, TAKE);

impl DyadicFunction for Take {
    fn name(&self) -> &'static str {
        "take"
    }

    /// The first `n` cells (last `|n|` when negative), padded with fill
    /// cells when `n` exceeds the length.
    fn execute(&self, _runtime: &mut Runtime, right: &Value, left: &Value) -> EvalResult {
        let n = integer_of(left, "take")?;
        let source = if right.is_array() {
            right.clone()
        } else {
            Value::typed_vector(right.to_items(), right.ty())
        };
        let items = cells(&source)?;
        let want = usize::try_from(n.unsigned_abs()).map_err(|_| domain_error("take"))?;
        let fill_cell = {
            let shape = cell_shape(&source);
            let fill = fill_for(source.ty());
            if shape.is_empty() {
                fill
            } else {
                Value::array(shape, vec![fill; shape.iter().product()], source.ty())?
            }
        };
        let taken: Vec<Value> = if n >= 0 {
            items
                .iter()
                .cloned()
                .chain(std::iter::repeat(fill_cell))
                .take(want)
                .collect()
        } else {
            let pad = want.saturating_sub(items.len());
            let skip = items.len().saturating_sub(want);
            std::iter::repeat(fill_cell)
                .take(pad)
                .chain(items.into_iter().skip(skip))
                .collect()
        };
        rebuild(taken, &source)
    }
}

primitive!(DropCells, DROP);

impl DyadicFunction for DropCells {
    fn name(&self) -> &'static str {
        "drop"
    }

    fn execute(&self, _runtime: &mut Runtime, right: &Value, left: &Value) -> EvalResult {
        let n = integer_of(left, "drop")?;
        let source = if right.is_array() {
            right.clone()
        } else {
            Value::typed_vector(right.to_items(), right.ty())
        };
        let mut items = cells(&source)?;
        let count = usize::try_from(n.unsigned_abs())
            .unwrap_or(usize::MAX)
            .min(items.len());
        if n >= 0 {
            items.drain(..count);
        } else {
            items.truncate(items.len() - count);
        }
        rebuild(items, &source)
    }
}

// Comparison of whole values

primitive!(Match, MATCH);

impl DyadicFunction for Match {
    fn name(&self) -> &'static str {
        "match"
    }

    fn execute(&self, _runtime: &mut Runtime, right: &Value, left: &Value) -> EvalResult {
        Ok(Value::Int(i64::from(values_match(left, right))))
    }
}

primitive!(Depth, DEPTH);

fn depth(value: &Value) -> i64 {
    match value {
        Value::Box(inner) => 1 + depth(inner),
        Value::Array(array) => array.items().iter().map(depth).max().unwrap_or(0),
        _ => 0,
    }
}

impl MonadicFunction for Depth {
    fn name(&self) -> &'static str {
        "depth"
    }

    fn execute(&self, _runtime: &mut Runtime, right: &Value) -> EvalResult {
        Ok(Value::Int(depth(right)))
    }
}

primitive!(TypeOf, TYPE);

impl MonadicFunction for TypeOf {
    fn name(&self) -> &'static str {
        "type"
    }

    fn execute(&self, _runtime: &mut Runtime, right: &Value) -> EvalResult {
        Ok(Value::symbol(right.type_name()))
    }
}

// Grading

fn grade(right: &Value, descending: bool, primitive: &str) -> EvalResult {
    if !right.is_array() {
        return Err(rank_error(primitive));
    }
    let items = cells(right)?;
    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by(|&a, &b| {
        let ordering = compare_cells(&items[a], &items[b]);
        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    });
    Ok(int_vector(order))
}

primitive!(GradeUp, GRADE_UP);

impl MonadicFunction for GradeUp {
    fn name(&self) -> &'static str {
        "grade up"
    }

    fn execute(&self, _runtime: &mut Runtime, right: &Value) -> EvalResult {
        grade(right, false, "grade up")
    }
}

primitive!(GradeDown, GRADE_DOWN);

impl MonadicFunction for GradeDown {
    fn name(&self) -> &'static str {
        "grade down"
    }

    fn execute(&self, _runtime: &mut Runtime, right: &Value) -> EvalResult {
        grade(right, true, "grade down")
    }
}

// Selection

primitive!(Choose, CHOOSE);

impl DyadicFunction for Choose {
    fn name(&self) -> &'static str {
        "choose"
    }

    /// `i # x` is `x[i]`; a boxed left argument supplies one index per axis.
    fn execute(&self, _runtime: &mut Runtime, right: &Value, left: &Value) -> EvalResult {
        let indices: Vec<Option<Value>> = match left {
            Value::Box(_) => vec![Some(left.disclose())],
            Value::Array(array) if array.ty() == ValueType::Box => array
                .items()
                .iter()
                .map(|item| {
                    let index = item.disclose();
                    (!index.is_null()).then_some(index)
                })
                .collect(),
            other => vec![Some(other.clone())],
        };
        indexing::get_indexed(right, &indices)
    }
}

primitive!(Pick, PICK);

/// One step of a pick path.
pub(crate) fn pick_step(target: &Value, step: &Value) -> EvalResult {
    let index = integer_of(step, "pick")?;
    let Value::Array(array) = target else {
        return Err(rank_error("pick"));
    };
    if array.rank() != 1 {
        return Err(rank_error("pick"));
    }
    let position = usize::try_from(index)
        .ok()
        .filter(|&i| i < array.len())
        .ok_or_else(|| index_error("pick"))?;
    Ok(array.items()[position].disclose())
}

/// The steps of a pick path: a scalar is one step, a vector of boxes one
/// step per box.
pub(crate) fn pick_path(path: &Value) -> Vec<Value> {
    match path {
        Value::Array(array) if array.ty() == ValueType::Box => {
            array.items().iter().map(Value::disclose).collect()
        }
        Value::Box(inner) => vec![(**inner).clone()],
        Value::Null => Vec::new(),
        other => vec![other.clone()],
    }
}

impl DyadicFunction for Pick {
    fn name(&self) -> &'static str {
        "pick"
    }

    fn execute(&self, _runtime: &mut Runtime, right: &Value, left: &Value) -> EvalResult {
        pick_path(left)
            .iter()
            .try_fold(right.clone(), |target, step| pick_step(&target, step))
    }
}

primitive!(Replicate, REPLICATE);

impl DyadicFunction for Replicate {
    fn name(&self) -> &'static str {
        "replicate"
    }

    /// Repeat each cell of `right` by the matching count in `left`.
    fn execute(&self, _runtime: &mut Runtime, right: &Value, left: &Value) -> EvalResult {
        let source = if right.is_array() {
            right.clone()
        } else {
            Value::typed_vector(right.to_items(), right.ty())
        };
        let items = cells(&source)?;
        let counts = if left.rank() == 0 {
            vec![count_of(left, "replicate")?; items.len()]
        } else {
            left.to_items()
                .iter()
                .map(|c| count_of(c, "replicate"))
                .collect::<EvalResult<Vec<_>>>()?
        };
        if counts.len() != items.len() {
            return Err(length_error("replicate"));
        }
        let replicated: Vec<Value> = items
            .iter()
            .zip(counts)
            .flat_map(|(item, n)| std::iter::repeat(item.clone()).take(n))
            .collect();
        rebuild(replicated, &source)
    }
}

primitive!(Expand, EXPAND);

impl DyadicFunction for Expand {
    fn name(&self) -> &'static str {
        "expand"
    }

    /// Place the cells of `right` where `left` has ones, fill elsewhere.
    fn execute(&self, _runtime: &mut Runtime, right: &Value, left: &Value) -> EvalResult {
        let source = if right.is_array() {
            right.clone()
        } else {
            Value::typed_vector(right.to_items(), right.ty())
        };
        let items = cells(&source)?;
        let mask = left
            .to_items()
            .iter()
            .map(|flag| match flag.to_restricted_whole_number() {
                Some(0) => Ok(false),
                Some(1) => Ok(true),
                _ => Err(domain_error("expand")),
            })
            .collect::<EvalResult<Vec<_>>>()?;
        if mask.iter().filter(|&&set| set).count() != items.len() {
            return Err(length_error("expand"));
        }
        let shape = cell_shape(&source);
        let fill = fill_for(source.ty());
        let fill_cell = if shape.is_empty() {
            fill
        } else {
            Value::array(shape, vec![fill; shape.iter().product()], source.ty())?
        };
        let mut next = items.into_iter();
        let expanded: Vec<Value> = mask
            .iter()
            .map(|&set| {
                if set {
                    next.next().unwrap_or_else(|| fill_cell.clone())
                } else {
                    fill_cell.clone()
                }
            })
            .collect();
        rebuild(expanded, &source)
    }
}

// Number representation

primitive!(Decode, DECODE);

impl DyadicFunction for Decode {
    fn name(&self) -> &'static str {
        "decode"
    }

    /// Value of the digits `right` in the mixed radix `left`.
    fn execute(&self, _runtime: &mut Runtime, right: &Value, left: &Value) -> EvalResult {
        if left.rank() > 1 || right.rank() > 1 {
            return Err(rank_error("decode"));
        }
        let digits = right.to_items();
        let radix = if left.rank() == 0 {
            vec![left.clone(); digits.len()]
        } else {
            left.to_items()
        };
        if radix.len() != digits.len() && digits.len() != 1 {
            return Err(length_error("decode"));
        }
        let digits = if digits.len() == 1 {
            vec![digits[0].clone(); radix.len()]
        } else {
            digits
        };
        let integral = digits
            .iter()
            .chain(radix.iter())
            .all(|v| matches!(v, Value::Int(_)));
        if integral {
            let mut total: i64 = 0;
            let mut overflow = false;
            for (digit, base) in digits.iter().zip(radix.iter()) {
                let (Value::Int(d), Value::Int(b)) = (digit, base) else {
                    return Err(type_error("decode"));
                };
                match total.checked_mul(*b).and_then(|t| t.checked_add(*d)) {
                    Some(next) => total = next,
                    None => {
                        overflow = true;
                        break;
                    }
                }
            }
            if !overflow {
                return Ok(Value::Int(total));
            }
        }
        let mut total = 0.0;
        for (digit, base) in digits.iter().zip(radix.iter()) {
            let (Some(d), Some(b)) = (digit.as_f64(), base.as_f64()) else {
                return Err(type_error("decode"));
            };
            total = total * b + d;
        }
        Ok(Value::Float(total))
    }
}

primitive!(Encode, ENCODE);

fn encode_one(radix: &[i64], value: i64) -> Vec<Value> {
    let mut digits = vec![Value::Int(0); radix.len()];
    let mut rest = value;
    for (slot, &base) in digits.iter_mut().zip(radix.iter()).rev() {
        if base == 0 {
            *slot = Value::Int(rest);
            rest = 0;
        } else {
            *slot = Value::Int(rest.rem_euclid(base));
            rest = rest.div_euclid(base);
        }
    }
    digits
}

impl DyadicFunction for Encode {
    fn name(&self) -> &'static str {
        "encode"
    }

    /// Digits of `right` in the mixed radix `left`; a vector `right` gives
    /// one column per item.
    fn execute(&self, _runtime: &mut Runtime, right: &Value, left: &Value) -> EvalResult {
        if left.rank() > 1 || right.rank() > 1 {
            return Err(rank_error("encode"));
        }
        let radix = left
            .to_items()
            .iter()
            .map(|b| integer_of(b, "encode"))
            .collect::<EvalResult<Vec<_>>>()?;
        let values = right
            .to_items()
            .iter()
            .map(|v| integer_of(v, "encode"))
            .collect::<EvalResult<Vec<_>>>()?;
        if right.rank() == 0 {
            let value = values.first().copied().unwrap_or(0);
            return Ok(Value::typed_vector(
                encode_one(&radix, value),
                ValueType::Integer,
            ));
        }
        let columns: Vec<Vec<Value>> = values.iter().map(|&v| encode_one(&radix, v)).collect();
        let mut items = Vec::with_capacity(radix.len() * values.len());
        for row in 0..radix.len() {
            for column in &columns {
                items.push(column[row].clone());
            }
        }
        Value::array(&[radix.len(), values.len()], items, ValueType::Integer)
    }
}
