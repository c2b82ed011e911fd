//! Bracket indexing and indexed assignment.
//!
//! Indices select along successive axes starting with the first; an elided
//! index (`None`) takes the whole axis. The result shape is the shapes of
//! the indices in order, followed by the axes left unindexed.
//!
//! Writes validate every index and the value before touching the target,
//! so a failed assignment leaves it unchanged.

use smallvec::smallvec;

use crate::errors::{
    domain_error, index_error, length_error, rank_error, type_error, EvalResult,
};
use crate::value::{Shape, Value, ValueType};

/// Positions selected along one axis, and the shape they contribute.
struct AxisSelection {
    positions: Vec<usize>,
    shape: Shape,
}

fn select_axis(index: Option<&Value>, extent: usize) -> EvalResult<AxisSelection> {
    let Some(index) = index else {
        return Ok(AxisSelection {
            positions: (0..extent).collect(),
            shape: smallvec![extent],
        });
    };
    let positions = index
        .to_items()
        .iter()
        .map(|item| {
            let i = item
                .to_restricted_whole_number()
                .ok_or_else(|| type_error("index"))?;
            usize::try_from(i)
                .ok()
                .filter(|&i| i < extent)
                .ok_or_else(|| index_error("index"))
        })
        .collect::<EvalResult<Vec<_>>>()?;
    let shape = if index.is_null() {
        smallvec![0]
    } else {
        index.shape().iter().copied().collect()
    };
    Ok(AxisSelection { positions, shape })
}

/// Flat item offsets addressed by `indices` in an array of `shape`, plus
/// the shape of the selection.
fn resolve(shape: &[usize], indices: &[Option<Value>]) -> EvalResult<(Vec<usize>, Shape)> {
    if indices.len() > shape.len() {
        return Err(rank_error("index"));
    }
    let axes = indices
        .iter()
        .zip(shape.iter())
        .map(|(index, &extent)| select_axis(index.as_ref(), extent))
        .collect::<EvalResult<Vec<_>>>()?;

    // Row-major strides of every axis.
    let mut strides = vec![1usize; shape.len()];
    for axis in (0..shape.len().saturating_sub(1)).rev() {
        strides[axis] = strides[axis + 1] * shape[axis + 1];
    }
    let trailing = &shape[indices.len()..];
    let block: usize = trailing.iter().product();

    let mut offsets = vec![0usize];
    for (axis, selection) in axes.iter().enumerate() {
        let stride = strides[axis];
        offsets = offsets
            .iter()
            .flat_map(|base| {
                selection
                    .positions
                    .iter()
                    .map(move |p| base + p * stride)
            })
            .collect();
    }
    let offsets = offsets
        .into_iter()
        .flat_map(|base| base..base + block)
        .collect();

    let mut result_shape: Shape = axes.iter().flat_map(|a| a.shape.iter().copied()).collect();
    result_shape.extend_from_slice(trailing);
    Ok((offsets, result_shape))
}

/// `target[indices]`. An empty index list returns the target itself.
pub fn get_indexed(target: &Value, indices: &[Option<Value>]) -> EvalResult {
    if indices.is_empty() {
        return Ok(target.clone());
    }
    let Value::Array(array) = target else {
        return Err(rank_error("index"));
    };
    let (offsets, shape) = resolve(array.shape(), indices)?;
    let items = array.items();
    let selected = offsets.iter().map(|&o| items[o].clone()).collect();
    Value::array(&shape, selected, array.ty())
}

/// Whether items of type `incoming` may be stored into an array of type
/// `target`.
fn storable(target: ValueType, incoming: ValueType) -> bool {
    target == incoming
        || target == ValueType::Array
        || (target == ValueType::Float && incoming == ValueType::Integer)
}

/// `target[indices] := value`, returning the assigned value.
///
/// An empty index list replaces the whole target.
pub fn set_indexed(target: &mut Value, indices: &[Option<Value>], value: &Value) -> EvalResult {
    if indices.is_empty() {
        *target = value.clone_value();
        return Ok(value.clone());
    }
    let Value::Array(array) = target else {
        return Err(rank_error("index"));
    };
    let (offsets, _) = resolve(array.shape(), indices)?;
    let incoming = if value.is_array() {
        value.to_items()
    } else {
        vec![value.clone_value(); offsets.len()]
    };
    if incoming.len() != offsets.len() {
        return Err(length_error("index"));
    }
    if !array.is_empty() && !storable(array.ty(), value.ty()) {
        return Err(type_error("index"));
    }
    let promote = array.ty() == ValueType::Float;
    {
        let mut items = array.items_mut();
        for (offset, item) in offsets.iter().zip(incoming) {
            items[*offset] = if promote { item.into_float() } else { item };
        }
    }
    array.refresh_type();
    Ok(value.clone())
}

/// `(path pick target) := value`.
///
/// Each step of `path` indexes a vector; boxed items are opened on the way
/// down and the stored value is re-enclosed where a box was.
pub fn set_picked(target: &mut Value, path: &[Value], value: &Value) -> EvalResult<()> {
    let Some((step, rest)) = path.split_first() else {
        *target = value.clone_value();
        return Ok(());
    };
    let Value::Array(array) = target else {
        return Err(rank_error("pick"));
    };
    if array.rank() != 1 {
        return Err(rank_error("pick"));
    }
    let position = step
        .to_restricted_whole_number()
        .ok_or_else(|| type_error("pick"))?;
    let position = usize::try_from(position)
        .ok()
        .filter(|&p| p < array.len())
        .ok_or_else(|| index_error("pick"))?;

    let current = array.items()[position].clone();
    let replacement = match current {
        Value::Box(inner) => {
            let mut inner = (*inner).clone();
            set_picked(&mut inner, rest, value)?;
            Value::enclose(inner)
        }
        _ if !rest.is_empty() => return Err(domain_error("pick")),
        _ if value.is_array() => return Err(domain_error("pick")),
        _ if !storable(array.ty(), value.ty()) => return Err(type_error("pick")),
        _ => value.clone_value(),
    };
    array.items_mut()[position] = replacement;
    array.refresh_type();
    Ok(())
}
