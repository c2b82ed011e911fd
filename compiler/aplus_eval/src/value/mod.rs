//! Runtime values.
//!
//! A single `Value` type covers every A+ datum. Atoms (integers, floats,
//! characters, symbols, boxes, function references and null) have rank 0;
//! [`ArrayValue`] carries everything of rank one or more.
//!
//! # Heap Enforcement
//!
//! Boxed and symbol payloads live behind [`Heap`], whose constructor is
//! private to this module: build values through the factory methods
//! (`Value::symbol`, `Value::enclose`, `Value::vector`, ...).
//!
//! # Invariants
//!
//! - An array's item count equals the product of its shape.
//! - A numeric array is never heterogeneous: as soon as one item is float,
//!   every integer item is promoted.
//! - Equality is structural (tag, shape, items), never identity, except for
//!   user function references.

mod array;
mod display;
mod function;
mod heap;

use smallvec::smallvec;

pub use array::{ArrayValue, Items, ItemsMut, MappedStorage, Shape};
pub use function::{Callable, FunctionFlags, FunctionRef, BUILTIN_VALENCE};
pub use heap::Heap;

use crate::errors::EvalResult;
use crate::tolerance;

/// Type tag of a value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueType {
    Integer,
    Float,
    Char,
    Symbol,
    Box,
    Func,
    /// Composite array of mixed items.
    Array,
    Null,
}

impl ValueType {
    /// A+ name of the type, as reported by the `type` primitive.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Integer => "int",
            Self::Float => "float",
            Self::Char => "char",
            Self::Symbol => "sym",
            Self::Box => "box",
            Self::Func => "func",
            Self::Array => "array",
            Self::Null => "null",
        }
    }

    #[inline]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }
}

/// A runtime value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Char(char),
    Sym(Heap<str>),
    /// Enclosed value.
    Box(Heap<Value>),
    Func(FunctionRef),
    /// The empty value `()`.
    Null,
    Array(ArrayValue),
}

/// Integer to float conversion; A+ floats are doubles.
#[inline]
#[allow(clippy::cast_precision_loss)]
pub(crate) fn int_to_float(value: i64) -> f64 {
    value as f64
}

impl Value {
    // Factory methods

    #[inline]
    pub fn int(value: i64) -> Self {
        Value::Int(value)
    }

    #[inline]
    pub fn float(value: f64) -> Self {
        Value::Float(value)
    }

    #[inline]
    pub fn null() -> Self {
        Value::Null
    }

    pub fn symbol(name: &str) -> Self {
        Value::Sym(Heap::from(name))
    }

    pub fn function(function: FunctionRef) -> Self {
        Value::Func(function)
    }

    /// Character data: one character is a character scalar, anything else
    /// a character vector.
    pub fn string(text: &str) -> Self {
        let mut chars: Vec<Value> = text.chars().map(Value::Char).collect();
        if chars.len() == 1 {
            return chars.swap_remove(0);
        }
        Value::typed_vector(chars, ValueType::Char)
    }

    /// Enclose a value.
    pub fn enclose(value: Value) -> Self {
        Value::Box(Heap::new(value))
    }

    /// Open a box; any other value is returned unchanged.
    pub fn disclose(&self) -> Value {
        match self {
            Value::Box(inner) => (**inner).clone(),
            other => other.clone(),
        }
    }

    /// A vector of `items`; an empty vector is null-typed.
    pub fn vector(items: Vec<Value>) -> Self {
        Value::typed_vector(items, ValueType::Null)
    }

    /// A vector whose type, when empty, is `empty_ty`.
    pub fn typed_vector(items: Vec<Value>, empty_ty: ValueType) -> Self {
        let shape: Shape = smallvec![items.len()];
        match ArrayValue::new(shape, items, empty_ty) {
            Ok(array) => Value::Array(array),
            // A vector's shape always matches its item count.
            Err(_) => Value::Null,
        }
    }

    /// An array of the given shape. An empty shape yields the single item.
    pub fn array(shape: &[usize], mut items: Vec<Value>, empty_ty: ValueType) -> EvalResult {
        if shape.is_empty() && items.len() == 1 {
            return Ok(items.swap_remove(0));
        }
        Ok(Value::Array(ArrayValue::new(
            shape.iter().copied().collect(),
            items,
            empty_ty,
        )?))
    }

    /// An array over externally backed storage.
    pub fn mapped(shape: &[usize], storage: MappedStorage) -> EvalResult {
        Ok(Value::Array(ArrayValue::mapped(
            shape.iter().copied().collect(),
            storage,
        )?))
    }

    /// Reassemble cells along a new leading axis. Cells must share one
    /// shape.
    pub fn from_cells(cells: Vec<Value>, empty_ty: ValueType) -> EvalResult {
        let Some(first) = cells.first() else {
            return Value::array(&[0], Vec::new(), empty_ty);
        };
        let cell_shape: Shape = first.shape().iter().copied().collect();
        if cell_shape.is_empty() {
            let len = cells.len();
            return Value::array(&[len], cells, empty_ty);
        }
        let mut shape: Shape = smallvec![cells.len()];
        shape.extend_from_slice(&cell_shape);
        let mut items = Vec::with_capacity(shape.iter().product());
        for cell in cells {
            if cell.shape() != cell_shape.as_slice() {
                return Err(crate::errors::shape_mismatch(&shape, items.len()));
            }
            items.extend(cell.to_items());
        }
        Value::array(&shape, items, empty_ty)
    }

    // Inspection

    pub fn ty(&self) -> ValueType {
        match self {
            Value::Int(_) => ValueType::Integer,
            Value::Float(_) => ValueType::Float,
            Value::Char(_) => ValueType::Char,
            Value::Sym(_) => ValueType::Symbol,
            Value::Box(_) => ValueType::Box,
            Value::Func(_) => ValueType::Func,
            Value::Null => ValueType::Null,
            Value::Array(array) => array.ty(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.ty().name()
    }

    #[inline]
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// True for values of the null type: `()` and empty null-typed arrays.
    #[inline]
    pub fn is_null_typed(&self) -> bool {
        self.ty() == ValueType::Null
    }

    pub fn rank(&self) -> usize {
        match self {
            Value::Array(array) => array.rank(),
            _ => 0,
        }
    }

    pub fn shape(&self) -> &[usize] {
        match self {
            Value::Array(array) => array.shape(),
            _ => &[],
        }
    }

    /// Length along the first axis; 1 for atoms, 0 for null.
    pub fn tally(&self) -> usize {
        match self {
            Value::Array(array) => array.tally(),
            Value::Null => 0,
            _ => 1,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayValue> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    /// The ravel list of items: an atom is its own single item, null has
    /// none.
    pub fn to_items(&self) -> Vec<Value> {
        match self {
            Value::Array(array) => array.items().to_vec(),
            Value::Null => Vec::new(),
            atom => vec![atom.clone()],
        }
    }

    /// Cells along the first axis.
    pub fn major_cells(&self) -> EvalResult<Vec<Value>> {
        match self {
            Value::Array(array) => array.major_cells(),
            Value::Null => Ok(Vec::new()),
            atom => Ok(vec![atom.clone()]),
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric atom as a float.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(int_to_float(*i)),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Value::Sym(name) => Some(&**name),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionRef> {
        match self {
            Value::Func(function) => Some(function),
            _ => None,
        }
    }

    /// Character data as text.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Value::Char(ch) => Some(ch.to_string()),
            Value::Array(array) if array.ty() == ValueType::Char => Some(
                array
                    .items()
                    .iter()
                    .filter_map(|item| match item {
                        Value::Char(ch) => Some(*ch),
                        _ => None,
                    })
                    .collect(),
            ),
            Value::Array(array) if array.is_empty() => Some(String::new()),
            _ => None,
        }
    }

    /// Representative atom: the value itself for atoms, the first item
    /// (looking through boxes) otherwise. `None` for empty values.
    pub fn first_scalar(&self) -> Option<Value> {
        match self {
            Value::Array(array) => array.items().first().and_then(Value::first_scalar),
            Value::Box(inner) => inner.first_scalar(),
            Value::Null => None,
            atom => Some(atom.clone()),
        }
    }

    /// Exact integer value of a numeric atom. Floats qualify when they lie
    /// within comparison tolerance of an integer in range; anything else
    /// fails rather than truncating.
    pub fn to_restricted_whole_number(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Float(f) => tolerance::whole_number(*f),
            _ => None,
        }
    }

    /// Copy for value-semantic assignment.
    ///
    /// Function references are returned as they are. Arrays backed by
    /// external storage are deep-copied into owned storage so later writes
    /// do not leak through; owned arrays share their payload copy-on-write.
    pub fn clone_value(&self) -> Value {
        match self {
            Value::Array(array) if contains_mapped(self) => Value::Array(array.detached()),
            Value::Box(inner) if contains_mapped(inner) => Value::enclose(inner.clone_value()),
            other => other.clone(),
        }
    }

    /// Promote an integer value to float; other values are unchanged.
    #[must_use]
    pub fn into_float(self) -> Value {
        match self {
            Value::Int(i) => Value::Float(int_to_float(i)),
            Value::Array(mut array) => {
                array.convert_to_float();
                Value::Array(array)
            }
            other => other,
        }
    }
}

fn contains_mapped(value: &Value) -> bool {
    match value {
        Value::Array(array) => array.is_mapped() || array.items().iter().any(contains_mapped),
        Value::Box(inner) => contains_mapped(inner),
        _ => false,
    }
}

impl From<ArrayValue> for Value {
    fn from(array: ArrayValue) -> Self {
        Value::Array(array)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}
