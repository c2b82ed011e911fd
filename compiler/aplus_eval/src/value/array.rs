//! Shaped array payloads.
//!
//! Items are stored flat in row-major order. Owned storage is shared
//! copy-on-write; mapped storage stands for externally backed memory whose
//! writes are visible to every holder.

use std::cell::{Ref, RefCell, RefMut};
use std::ops::{Deref, DerefMut};
use std::rc::Rc;

use smallvec::SmallVec;

use super::{int_to_float, Value, ValueType};
use crate::errors::{rank_error, shape_mismatch, EvalResult};

/// Dimension sizes, outermost first.
pub type Shape = SmallVec<[usize; 4]>;

/// Handle to externally backed item storage.
#[derive(Clone, Debug)]
pub struct MappedStorage(Rc<RefCell<Vec<Value>>>);

impl MappedStorage {
    pub fn new(items: Vec<Value>) -> Self {
        MappedStorage(Rc::new(RefCell::new(items)))
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[derive(Clone, Debug)]
enum Storage {
    Owned(Rc<Vec<Value>>),
    Mapped(MappedStorage),
}

/// Borrowed view of an array's items.
pub enum Items<'a> {
    Owned(&'a [Value]),
    Mapped(Ref<'a, Vec<Value>>),
}

impl Deref for Items<'_> {
    type Target = [Value];

    fn deref(&self) -> &[Value] {
        match self {
            Items::Owned(items) => items,
            Items::Mapped(items) => items,
        }
    }
}

/// Mutable view of an array's items.
pub enum ItemsMut<'a> {
    Owned(&'a mut Vec<Value>),
    Mapped(RefMut<'a, Vec<Value>>),
}

impl Deref for ItemsMut<'_> {
    type Target = [Value];

    fn deref(&self) -> &[Value] {
        match self {
            ItemsMut::Owned(items) => items,
            ItemsMut::Mapped(items) => items,
        }
    }
}

impl DerefMut for ItemsMut<'_> {
    fn deref_mut(&mut self) -> &mut [Value] {
        match self {
            ItemsMut::Owned(items) => items,
            ItemsMut::Mapped(items) => items,
        }
    }
}

/// An array of rank one or more.
#[derive(Clone, Debug)]
pub struct ArrayValue {
    ty: ValueType,
    shape: Shape,
    storage: Storage,
}

impl ArrayValue {
    /// Build an array, inferring its type from the items.
    ///
    /// Integer items are promoted to float when any item is float. An empty
    /// payload gets `empty_ty`.
    pub fn new(shape: Shape, mut items: Vec<Value>, empty_ty: ValueType) -> EvalResult<Self> {
        check_count(&shape, items.len())?;
        let ty = normalize(&mut items).unwrap_or(empty_ty);
        Ok(ArrayValue {
            ty,
            shape,
            storage: Storage::Owned(Rc::new(items)),
        })
    }

    /// Array over externally backed storage.
    pub fn mapped(shape: Shape, storage: MappedStorage) -> EvalResult<Self> {
        let ty = {
            let mut items = storage.0.borrow_mut();
            check_count(&shape, items.len())?;
            normalize(&mut items).unwrap_or(ValueType::Null)
        };
        Ok(ArrayValue {
            ty,
            shape,
            storage: Storage::Mapped(storage),
        })
    }

    #[inline]
    pub fn ty(&self) -> ValueType {
        self.ty
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    #[inline]
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Length along the first axis.
    #[inline]
    pub fn tally(&self) -> usize {
        self.shape[0]
    }

    /// Total number of items.
    #[inline]
    pub fn len(&self) -> usize {
        self.shape.iter().product()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn is_mapped(&self) -> bool {
        matches!(self.storage, Storage::Mapped(_))
    }

    pub fn items(&self) -> Items<'_> {
        match &self.storage {
            Storage::Owned(items) => Items::Owned(items),
            Storage::Mapped(storage) => Items::Mapped(storage.0.borrow()),
        }
    }

    /// Mutable access to the items. Owned storage is unshared first.
    pub fn items_mut(&mut self) -> ItemsMut<'_> {
        match &mut self.storage {
            Storage::Owned(items) => ItemsMut::Owned(Rc::make_mut(items)),
            Storage::Mapped(storage) => ItemsMut::Mapped(storage.0.borrow_mut()),
        }
    }

    /// The item list, copied out of shared storage when necessary.
    pub fn into_items(self) -> Vec<Value> {
        match self.storage {
            Storage::Owned(items) => Rc::try_unwrap(items).unwrap_or_else(|rc| (*rc).clone()),
            Storage::Mapped(storage) => storage.0.borrow().clone(),
        }
    }

    /// Deep copy into fresh owned storage.
    pub fn detached(&self) -> ArrayValue {
        let items: Vec<Value> = self.items().iter().map(Value::clone_value).collect();
        ArrayValue {
            ty: self.ty,
            shape: self.shape.clone(),
            storage: Storage::Owned(Rc::new(items)),
        }
    }

    /// Cells along the first axis: items for a vector, sub-arrays otherwise.
    pub fn major_cells(&self) -> EvalResult<Vec<Value>> {
        let items = self.items();
        if self.rank() == 1 {
            return Ok(items.to_vec());
        }
        let cell_shape: Shape = self.shape[1..].iter().copied().collect();
        let cell_len: usize = cell_shape.iter().product();
        let mut cells = Vec::with_capacity(self.tally());
        for i in 0..self.tally() {
            let chunk = items[i * cell_len..(i + 1) * cell_len].to_vec();
            cells.push(Value::from(ArrayValue::new(
                cell_shape.clone(),
                chunk,
                self.ty,
            )?));
        }
        Ok(cells)
    }

    /// Force the type tag of an array. Used when an empty null-typed array
    /// takes the type of the operand it was combined with.
    pub(crate) fn retype(&mut self, ty: ValueType) {
        self.ty = ty;
    }

    /// Convert every integer item to float.
    pub fn convert_to_float(&mut self) {
        if self.ty != ValueType::Integer {
            return;
        }
        for item in self.items_mut().iter_mut() {
            if let Value::Int(i) = *item {
                *item = Value::Float(int_to_float(i));
            }
        }
        self.ty = ValueType::Float;
    }

    /// Recompute the type tag after items were replaced in place.
    pub(crate) fn refresh_type(&mut self) {
        let ty = {
            let mut items = self.items_mut();
            normalize_slice(&mut items)
        };
        if let Some(ty) = ty {
            self.ty = ty;
        }
    }
}

impl PartialEq for ArrayValue {
    fn eq(&self, other: &Self) -> bool {
        self.ty == other.ty && self.shape == other.shape && *self.items() == *other.items()
    }
}

/// Rank 0 is an atom, never an array payload.
fn check_count(shape: &[usize], count: usize) -> EvalResult<()> {
    if shape.is_empty() {
        return Err(rank_error("array"));
    }
    if shape.iter().product::<usize>() == count {
        Ok(())
    } else {
        Err(shape_mismatch(shape, count))
    }
}

fn normalize(items: &mut Vec<Value>) -> Option<ValueType> {
    normalize_slice(items.as_mut_slice())
}

/// Nested arrays count as composite items whatever their own type.
fn item_type(item: &Value) -> ValueType {
    if item.is_array() {
        ValueType::Array
    } else {
        item.ty()
    }
}

/// Infer the common type of `items`, promoting integers when floats are
/// present. `None` for an empty slice.
fn normalize_slice(items: &mut [Value]) -> Option<ValueType> {
    let mut ty = item_type(items.first()?);
    for item in items.iter() {
        ty = match (ty, item_type(item)) {
            (a, b) if a == b => a,
            (ValueType::Integer, ValueType::Float) | (ValueType::Float, ValueType::Integer) => {
                ValueType::Float
            }
            _ => ValueType::Array,
        };
    }
    if ty == ValueType::Float {
        for item in items.iter_mut() {
            if let Value::Int(i) = *item {
                *item = Value::Float(int_to_float(i));
            }
        }
    }
    Some(ty)
}
