//! Literal constants.
//!
//! The parser hands constants over as text plus a declared kind; numeric
//! conversion happens here so the evaluator never re-lexes literals.
//! Text storage keeps every IR type `Eq + Hash` (no raw floats).

use std::fmt;

/// Declared sub-type of a literal constant.
///
/// The variant order is significant: folding a constant list takes the
/// maximum kind over its members, so `Integer < Double < infinities`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum ConstantKind {
    Integer,
    Double,
    PositiveInfinity,
    NegativeInfinity,
    Symbol,
    Character,
}

impl ConstantKind {
    /// True for kinds that fold to a numeric array.
    #[inline]
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::Integer | Self::Double | Self::PositiveInfinity | Self::NegativeInfinity
        )
    }
}

/// A single literal constant.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Constant {
    pub kind: ConstantKind,
    pub text: String,
}

impl Constant {
    pub fn new(kind: ConstantKind, text: impl Into<String>) -> Self {
        Constant {
            kind,
            text: text.into(),
        }
    }

    pub fn integer(value: i64) -> Self {
        Constant::new(ConstantKind::Integer, value.to_string())
    }

    pub fn double(value: f64) -> Self {
        if value == f64::INFINITY {
            Constant::new(ConstantKind::PositiveInfinity, "Inf")
        } else if value == f64::NEG_INFINITY {
            Constant::new(ConstantKind::NegativeInfinity, "-Inf")
        } else {
            Constant::new(ConstantKind::Double, format!("{value:?}"))
        }
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        Constant::new(ConstantKind::Symbol, name)
    }

    pub fn character(ch: char) -> Self {
        Constant::new(ConstantKind::Character, ch.to_string())
    }

    /// Integer value of an `Integer` constant.
    ///
    /// Returns `None` when the text does not fit a 64-bit integer; callers
    /// fall back to [`Constant::as_float`] in that case.
    pub fn as_integer(&self) -> Option<i64> {
        if self.kind != ConstantKind::Integer {
            return None;
        }
        let (negative, digits) = split_sign(&self.text);
        let magnitude: i64 = digits.parse().ok()?;
        Some(if negative { -magnitude } else { magnitude })
    }

    /// Floating-point value of any numeric constant.
    pub fn as_float(&self) -> Option<f64> {
        match self.kind {
            ConstantKind::PositiveInfinity => Some(f64::INFINITY),
            ConstantKind::NegativeInfinity => Some(f64::NEG_INFINITY),
            ConstantKind::Integer | ConstantKind::Double => {
                let (negative, digits) = split_sign(&self.text);
                let magnitude: f64 = digits.parse().ok()?;
                Some(if negative { -magnitude } else { magnitude })
            }
            ConstantKind::Symbol | ConstantKind::Character => None,
        }
    }

    /// The character of a `Character` constant.
    pub fn as_char(&self) -> Option<char> {
        if self.kind != ConstantKind::Character {
            return None;
        }
        let mut chars = self.text.chars();
        let ch = chars.next()?;
        chars.next().is_none().then_some(ch)
    }
}

/// A+ writes negative literals with a high minus (`¯`); accept both.
fn split_sign(text: &str) -> (bool, &str) {
    if let Some(rest) = text.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = text.strip_prefix('¯') {
        (true, rest)
    } else {
        (false, text)
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ConstantKind::Symbol => write!(f, "`{}", self.text),
            ConstantKind::Character => write!(f, "'{}'", self.text),
            _ => f.write_str(&self.text),
        }
    }
}

/// A juxtaposed run of literal constants, e.g. `1 2.5 3` or `` `a `b ``.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstantList {
    pub items: Vec<Constant>,
}

impl ConstantList {
    pub fn new(items: Vec<Constant>) -> Self {
        ConstantList { items }
    }

    /// Least upper bound of the member kinds, `None` for an empty list.
    pub fn kind(&self) -> Option<ConstantKind> {
        self.items.iter().map(|c| c.kind).max()
    }

    /// True when the list mixes symbols with numbers.
    pub fn is_mixed(&self) -> bool {
        let numeric = self.items.iter().any(|c| c.kind.is_numeric());
        let other = self.items.iter().any(|c| !c.kind.is_numeric());
        numeric && other
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests;
