//! Error types and centralized error constructors.
//!
//! Language-level failures are [`AplError`]s classified by [`ErrorKind`];
//! each kind carries the stable numeric code a protected block reports.
//! Factory functions are the only construction path so every message for a
//! given condition reads the same.
//!
//! Internal faults ([`Fault`]) are kept apart: they are never converted into
//! an `AplError` and a protected block lets them pass.
//!
//! Non-local control flow (errors, early return, faults) travels as
//! [`ControlAction`] through the `Err` side of [`EvalResult`].

use std::fmt;

use crate::value::Value;

/// Result of evaluation.
pub type EvalResult<T = Value> = Result<T, ControlAction>;

/// A+ error classification.
///
/// Discriminants are the codes A+ reports from a protected block.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorKind {
    Interrupt = 1,
    WsFull = 2,
    Stack = 3,
    Value = 4,
    Valence = 5,
    Type = 6,
    Rank = 7,
    Length = 8,
    Domain = 9,
    Index = 10,
    Mismatch = 11,
    Nonce = 12,
    MaxRank = 13,
    NonFunction = 14,
    Parse = 15,
    MaxItems = 16,
    Invalid = 17,
    NonData = 18,
}

impl ErrorKind {
    /// Stable numeric code.
    #[inline]
    pub const fn code(self) -> i64 {
        self as i64
    }

    /// A+ name of the error class.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Interrupt => "interrupt",
            Self::WsFull => "wsfull",
            Self::Stack => "stack",
            Self::Value => "value",
            Self::Valence => "valence",
            Self::Type => "type",
            Self::Rank => "rank",
            Self::Length => "length",
            Self::Domain => "domain",
            Self::Index => "index",
            Self::Mismatch => "mismatch",
            Self::Nonce => "nonce",
            Self::MaxRank => "maxrank",
            Self::NonFunction => "nonfunction",
            Self::Parse => "parse",
            Self::MaxItems => "maxitems",
            Self::Invalid => "invalid",
            Self::NonData => "nondata",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A language-level error, recoverable by a protected block.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct AplError {
    pub kind: ErrorKind,
    /// Human-readable detail; also the text a protected block reports.
    pub message: String,
}

impl AplError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        AplError {
            kind,
            message: message.into(),
        }
    }

    #[inline]
    pub fn code(&self) -> i64 {
        self.kind.code()
    }
}

/// Internal fault: a failure of the engine itself rather than of the
/// program being run.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Fault {
    #[error("primitive `{primitive}` received operands outside its dispatch entry")]
    OperandMismatch { primitive: &'static str },
    #[error("array payload of {items} items does not fit shape {shape:?}")]
    ShapeMismatch { shape: Vec<usize>, items: usize },
    #[error("return to a target that is not on the stack")]
    UnmatchedReturn,
    #[error("host failure: {0}")]
    Host(String),
}

/// Identifies the construct an early return unwinds to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ReturnTarget(pub(crate) u32);

impl ReturnTarget {
    /// The top level of an `execute` call.
    pub const ROOT: ReturnTarget = ReturnTarget(0);
}

/// Non-local exit from evaluation.
#[derive(Clone, Debug, PartialEq)]
pub enum ControlAction {
    Error(AplError),
    /// Early return, caught by the construct owning `target`.
    Return { target: ReturnTarget, value: Value },
    Fault(Fault),
}

impl ControlAction {
    /// The language error carried, if any.
    pub fn as_error(&self) -> Option<&AplError> {
        match self {
            Self::Error(err) => Some(err),
            _ => None,
        }
    }
}

impl From<AplError> for ControlAction {
    fn from(err: AplError) -> Self {
        ControlAction::Error(err)
    }
}

impl From<Fault> for ControlAction {
    fn from(fault: Fault) -> Self {
        ControlAction::Fault(fault)
    }
}

/// Failure surfaced by the top-level entry points.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Apl(#[from] AplError),
    #[error("internal fault: {0}")]
    Fault(#[from] Fault),
}

impl RuntimeError {
    /// The language error, if this is one.
    pub fn as_apl(&self) -> Option<&AplError> {
        match self {
            Self::Apl(err) => Some(err),
            Self::Fault(_) => None,
        }
    }

    pub fn kind(&self) -> Option<ErrorKind> {
        self.as_apl().map(|err| err.kind)
    }
}

// Variable Errors

/// A context or variable name that does not resolve.
#[cold]
pub fn value_error(context: &str, name: &str) -> ControlAction {
    AplError::new(
        ErrorKind::Value,
        format!("{name}: undefined in context `{context}`"),
    )
    .into()
}

// Dispatch Errors

/// No dispatch entry matches the operand types.
#[cold]
pub fn type_error(primitive: &str) -> ControlAction {
    AplError::new(ErrorKind::Type, format!("{primitive}: type")).into()
}

/// Mismatched lengths, or null broadcast against a shaped array.
#[cold]
pub fn length_error(primitive: &str) -> ControlAction {
    AplError::new(ErrorKind::Length, format!("{primitive}: length")).into()
}

#[cold]
pub fn rank_error(what: &str) -> ControlAction {
    AplError::new(ErrorKind::Rank, format!("{what}: rank")).into()
}

#[cold]
pub fn domain_error(what: &str) -> ControlAction {
    AplError::new(ErrorKind::Domain, format!("{what}: domain")).into()
}

/// Items that must agree in shape do not.
#[cold]
pub fn mismatch_error(what: &str) -> ControlAction {
    AplError::new(ErrorKind::Mismatch, format!("{what}: mismatch")).into()
}

#[cold]
pub fn index_error(what: &str) -> ControlAction {
    AplError::new(ErrorKind::Index, format!("{what}: index")).into()
}

/// Primitive recognised but not implemented by this core.
#[cold]
pub fn nonce_error(primitive: &str) -> ControlAction {
    AplError::new(ErrorKind::Nonce, format!("{primitive}: nonce")).into()
}

#[cold]
pub fn parse_error(what: &str) -> ControlAction {
    AplError::new(ErrorKind::Parse, format!("{what}: parse")).into()
}

// Invocation Errors

#[cold]
pub fn valence_error(function: &str) -> ControlAction {
    AplError::new(ErrorKind::Valence, format!("{function}: valence")).into()
}

#[cold]
pub fn non_function_error(what: &str) -> ControlAction {
    AplError::new(ErrorKind::NonFunction, format!("{what}: nonfunction")).into()
}

/// Recursion limit for user-function calls exceeded.
#[cold]
pub fn stack_error(depth: usize) -> ControlAction {
    AplError::new(ErrorKind::Stack, format!("call depth {depth} exceeded")).into()
}

/// User-raised error (`Signal`); the text is reported verbatim.
#[cold]
pub fn signal(text: impl Into<String>) -> ControlAction {
    AplError::new(ErrorKind::Domain, text).into()
}

// Faults

#[cold]
pub fn operand_mismatch(primitive: &'static str) -> ControlAction {
    Fault::OperandMismatch { primitive }.into()
}

#[cold]
pub fn shape_mismatch(shape: &[usize], items: usize) -> ControlAction {
    Fault::ShapeMismatch {
        shape: shape.to_vec(),
        items,
    }
    .into()
}
