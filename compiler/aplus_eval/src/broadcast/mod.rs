//! Scalar broadcast engine.
//!
//! Gives every scalar primitive its rank-polymorphic behaviour. A primitive
//! declares one implementation per atomic type (monadic) or per ordered
//! `(right, left)` type pair (dyadic), optionally with a wildcard fallback;
//! the engine selects the implementation once from the operands' top-level
//! types and then recurses through the operands' structure, applying it to
//! atoms.
//!
//! # Dispatch
//!
//! 1. Either operand null-typed: the null key is forced for the whole call.
//!    Atom pairs then yield null without consulting the table.
//! 2. Exact key, else wildcard, else a Type error naming the primitive.
//! 3. Recursion over major cells:
//!    - array and array: equal lengths or Length; element-wise;
//!    - array and atom: the atom is broadcast; a null atom is a Length
//!      error; a null-typed array takes the atom's type;
//!    - atom and atom: the selected implementation.
//!
//! Results mixing integer and float items are promoted to float when the
//! cells are reassembled.

use crate::errors::{length_error, type_error, EvalResult};
use crate::stack::ensure_sufficient_stack;
use crate::value::{Value, ValueType};

/// Implementation of a dyadic scalar primitive on two atoms.
pub type DyadicImpl = fn(right: &Value, left: &Value) -> EvalResult;

/// Implementation of a monadic scalar primitive on one atom.
pub type MonadicImpl = fn(argument: &Value) -> EvalResult;

/// Dispatch key of a dyadic table entry: `(right, left)` types or the
/// wildcard.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PairKey {
    Pair(ValueType, ValueType),
    Any,
}

/// Dispatch key of a monadic table entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TypeKey {
    Type(ValueType),
    Any,
}

/// What atom pairs evaluate to for the duration of one call.
#[derive(Copy, Clone)]
enum Selected<F> {
    Null,
    Impl(F),
}

/// A dyadic scalar primitive: a name and its statically declared
/// implementation table.
pub struct DyadicScalar {
    name: &'static str,
    table: &'static [(PairKey, DyadicImpl)],
}

impl DyadicScalar {
    pub const fn new(name: &'static str, table: &'static [(PairKey, DyadicImpl)]) -> Self {
        DyadicScalar { name, table }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    fn lookup(&self, key: PairKey) -> Option<DyadicImpl> {
        self.table
            .iter()
            .find(|(entry, _)| *entry == key)
            .map(|(_, implementation)| *implementation)
    }

    fn select(&self, right: &Value, left: &Value) -> EvalResult<Selected<DyadicImpl>> {
        if right.is_null_typed() || left.is_null_typed() {
            return Ok(Selected::Null);
        }
        let key = PairKey::Pair(right.ty(), left.ty());
        let implementation = self
            .lookup(key)
            .or_else(|| self.lookup(PairKey::Any))
            .ok_or_else(|| type_error(self.name))?;
        tracing::trace!(primitive = self.name, ?key, "dyadic scalar dispatch");
        Ok(Selected::Impl(implementation))
    }

    /// Apply the primitive with scalar extension.
    pub fn apply(&self, right: &Value, left: &Value) -> EvalResult {
        let selected = self.select(right, left)?;
        self.recurse(selected, right, left)
    }

    fn recurse(&self, selected: Selected<DyadicImpl>, right: &Value, left: &Value) -> EvalResult {
        ensure_sufficient_stack(|| match (right.is_array(), left.is_array()) {
            (true, true) => {
                if right.tally() != left.tally() {
                    return Err(length_error(self.name));
                }
                let results = right
                    .major_cells()?
                    .iter()
                    .zip(left.major_cells()?.iter())
                    .map(|(r, l)| self.recurse(selected, r, l))
                    .collect::<EvalResult<Vec<_>>>()?;
                Value::from_cells(results, common_type(right.ty(), left.ty()))
            }
            (true, false) => {
                self.broadcast(right, left, |r, atom| self.recurse(selected, r, atom))
            }
            (false, true) => {
                self.broadcast(left, right, |l, atom| self.recurse(selected, atom, l))
            }
            (false, false) => match selected {
                Selected::Null => Ok(Value::Null),
                Selected::Impl(implementation) => implementation(right, left),
            },
        })
    }

    /// Pair every cell of `array` with `atom`.
    fn broadcast(
        &self,
        array: &Value,
        atom: &Value,
        apply: impl Fn(&Value, &Value) -> EvalResult,
    ) -> EvalResult {
        if atom.is_null() {
            return Err(length_error(self.name));
        }
        let results = array
            .major_cells()?
            .iter()
            .map(|cell| apply(cell, atom))
            .collect::<EvalResult<Vec<_>>>()?;
        let empty_ty = if array.is_null_typed() {
            atom.ty()
        } else {
            common_type(array.ty(), atom.ty())
        };
        Value::from_cells(results, empty_ty)
    }
}

/// A monadic scalar primitive.
pub struct MonadicScalar {
    name: &'static str,
    table: &'static [(TypeKey, MonadicImpl)],
}

impl MonadicScalar {
    pub const fn new(name: &'static str, table: &'static [(TypeKey, MonadicImpl)]) -> Self {
        MonadicScalar { name, table }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    fn lookup(&self, key: TypeKey) -> Option<MonadicImpl> {
        self.table
            .iter()
            .find(|(entry, _)| *entry == key)
            .map(|(_, implementation)| *implementation)
    }

    /// Apply the primitive to every atom of `argument`.
    pub fn apply(&self, argument: &Value) -> EvalResult {
        let selected = if argument.is_null_typed() {
            Selected::Null
        } else {
            let key = TypeKey::Type(argument.ty());
            let implementation = self
                .lookup(key)
                .or_else(|| self.lookup(TypeKey::Any))
                .ok_or_else(|| type_error(self.name))?;
            tracing::trace!(primitive = self.name, ?key, "monadic scalar dispatch");
            Selected::Impl(implementation)
        };
        self.recurse(selected, argument)
    }

    fn recurse(&self, selected: Selected<MonadicImpl>, argument: &Value) -> EvalResult {
        ensure_sufficient_stack(|| {
            if argument.is_array() {
                let results = argument
                    .major_cells()?
                    .iter()
                    .map(|cell| self.recurse(selected, cell))
                    .collect::<EvalResult<Vec<_>>>()?;
                return Value::from_cells(results, argument.ty());
            }
            match selected {
                Selected::Null => Ok(Value::Null),
                Selected::Impl(implementation) => implementation(argument),
            }
        })
    }
}

/// Type an empty result takes from its operands.
fn common_type(a: ValueType, b: ValueType) -> ValueType {
    if a == ValueType::Float || b == ValueType::Float {
        ValueType::Float
    } else {
        a
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
