//! Primitive registry and glyph reinterpretation.
//!
//! Tokens resolve to static primitive singletons, separately per valence.
//! The parser classifies an overloaded glyph by its monadic meaning; when
//! the glyph turns out to be applied to two arguments,
//! [`reinterpret_as_dyadic`] rewrites the token to its dyadic meaning using
//! a fixed table. Tokens absent from the table mean the same primitive at
//! both valences.

use aplus_ir::{Token, TokenKind};

use crate::primitives::{operators, scalar, structural, system};
use crate::primitives::{DyadicFunction, MonadicFunction};
use crate::value::FunctionRef;

/// Monadic token to the dyadic token the same glyph denotes.
pub const REWRITES: [(TokenKind, TokenKind); 39] = [
    (TokenKind::AbsoluteValue, TokenKind::Residue),
    (TokenKind::Ceiling, TokenKind::Max),
    (TokenKind::Count, TokenKind::Choose),
    (TokenKind::DefaultFormat, TokenKind::Format),
    (TokenKind::Depth, TokenKind::Match),
    (TokenKind::Disclose, TokenKind::GreaterThan),
    (TokenKind::Enclose, TokenKind::LessThan),
    (TokenKind::Exponential, TokenKind::Power),
    (TokenKind::Execute, TokenKind::ExecuteInContext),
    (TokenKind::Floor, TokenKind::Min),
    (TokenKind::GradeUp, TokenKind::Bins),
    (TokenKind::Identity, TokenKind::Add),
    (TokenKind::Interval, TokenKind::Find),
    (TokenKind::ItemRavel, TokenKind::Restructure),
    (TokenKind::MapIn, TokenKind::Map),
    (TokenKind::MatrixInverse, TokenKind::Solve),
    (TokenKind::NaturalLog, TokenKind::Log),
    (TokenKind::Negate, TokenKind::Subtract),
    (TokenKind::Not, TokenKind::Laminate),
    (TokenKind::Null, TokenKind::Left),
    (TokenKind::Pack, TokenKind::Decode),
    (TokenKind::PartitionCount, TokenKind::Partition),
    (TokenKind::PiTimes, TokenKind::Circle),
    (TokenKind::Print, TokenKind::Drop),
    (TokenKind::Rake, TokenKind::Member),
    (TokenKind::Ravel, TokenKind::Catenate),
    (TokenKind::Raze, TokenKind::Pick),
    (TokenKind::Reciprocal, TokenKind::Divide),
    (TokenKind::Reverse, TokenKind::Rotate),
    (TokenKind::Roll, TokenKind::Deal),
    (TokenKind::SeparateSymbols, TokenKind::CombineSymbols),
    (TokenKind::Shape, TokenKind::Reshape),
    (TokenKind::Sign, TokenKind::Multiply),
    (TokenKind::Signal, TokenKind::Take),
    (TokenKind::Stop, TokenKind::And),
    (TokenKind::Transpose, TokenKind::TransposeAxes),
    (TokenKind::Type, TokenKind::Or),
    (TokenKind::Unpack, TokenKind::Encode),
    (TokenKind::Value, TokenKind::ValueInContext),
];

/// The dyadic meaning of a monadic token, if the glyph is overloaded.
pub fn dyadic_form(kind: TokenKind) -> Option<TokenKind> {
    REWRITES
        .iter()
        .find(|(monadic, _)| *monadic == kind)
        .map(|(_, dyadic)| *dyadic)
}

/// Rewrite `token` to its dyadic meaning. Returns whether it changed;
/// tokens without an entry are left untouched.
pub fn reinterpret_as_dyadic(token: &mut Token) -> bool {
    match dyadic_form(token.kind) {
        Some(kind) => {
            token.kind = kind;
            true
        }
        None => false,
    }
}

/// Built-in function reference for `token` applied to one argument.
pub fn resolve_monadic(token: &Token) -> Option<FunctionRef> {
    PrimitiveRegistry::new()
        .monadic(token.kind)
        .map(FunctionRef::monadic)
}

/// Built-in function reference for `token` applied to two arguments.
pub fn resolve_dyadic(token: &Token) -> Option<FunctionRef> {
    PrimitiveRegistry::new()
        .dyadic(token.kind)
        .map(FunctionRef::dyadic)
}

/// Maps token kinds to primitive singletons.
///
/// Every primitive is a static, so lookups hand out `'static` references
/// and the registry itself carries no state.
pub struct PrimitiveRegistry {
    _private: (),
}

impl PrimitiveRegistry {
    pub const fn new() -> Self {
        PrimitiveRegistry { _private: () }
    }

    /// The monadic primitive `kind` denotes. `None` when the glyph has no
    /// monadic meaning here.
    pub fn monadic(&self, kind: TokenKind) -> Option<&'static dyn MonadicFunction> {
        use TokenKind as K;
        let function: &'static dyn MonadicFunction = match kind {
            K::AbsoluteValue => &scalar::ABSOLUTE_VALUE,
            K::Ceiling => &scalar::CEILING,
            K::Exponential => &scalar::EXPONENTIAL,
            K::Floor => &scalar::FLOOR,
            K::Identity => &scalar::IDENTITY,
            K::NaturalLog => &scalar::NATURAL_LOG,
            K::Negate => &scalar::NEGATE,
            K::Not => &scalar::NOT,
            K::PiTimes => &scalar::PI_TIMES,
            K::Reciprocal => &scalar::RECIPROCAL,
            K::Sign => &scalar::SIGN,
            K::BitwiseNot => &scalar::BITWISE_NOT,
            K::Roll => &system::ROLL,

            K::Count => &structural::COUNT,
            K::Depth => &structural::DEPTH,
            K::Disclose => &structural::DISCLOSE,
            K::Enclose => &structural::ENCLOSE,
            K::GradeDown => &structural::GRADE_DOWN,
            K::GradeUp => &structural::GRADE_UP,
            K::Interval => &structural::INTERVAL,
            K::Null => &structural::NULL,
            K::Ravel => &structural::RAVEL,
            K::Reverse => &structural::REVERSE,
            K::Right => &structural::RIGHT,
            K::Shape => &structural::SHAPE,
            K::Type => &structural::TYPE,

            K::DefaultFormat => &system::DEFAULT_FORMAT,
            K::Print => &system::PRINT,
            K::Signal => &system::SIGNAL,
            K::Stop => &system::STOP,
            K::Value => &system::VALUE,

            K::ReduceAdd => &operators::REDUCE_ADD,
            K::ReduceMultiply => &operators::REDUCE_MULTIPLY,
            K::ReduceOr => &operators::REDUCE_OR,
            K::ReduceAnd => &operators::REDUCE_AND,
            K::ReduceMax => &operators::REDUCE_MAX,
            K::ReduceMin => &operators::REDUCE_MIN,
            K::ScanAdd => &operators::SCAN_ADD,
            K::ScanMultiply => &operators::SCAN_MULTIPLY,
            K::ScanMin => &operators::SCAN_MIN,
            K::ScanMax => &operators::SCAN_MAX,
            K::ScanAnd => &operators::SCAN_AND,
            K::ScanOr => &operators::SCAN_OR,

            _ => return None,
        };
        Some(function)
    }

    /// The dyadic primitive `kind` denotes, after any reinterpretation.
    pub fn dyadic(&self, kind: TokenKind) -> Option<&'static dyn DyadicFunction> {
        use TokenKind as K;
        let function: &'static dyn DyadicFunction = match kind {
            K::Add => &scalar::ADD,
            K::And => &scalar::AND,
            K::Circle => &scalar::CIRCLE,
            K::CombineSymbols => &scalar::COMBINE_SYMBOLS,
            K::Divide => &scalar::DIVIDE,
            K::Equal => &scalar::EQUAL,
            K::GreaterThan => &scalar::GREATER_THAN,
            K::GreaterThanOrEqual => &scalar::GREATER_THAN_OR_EQUAL,
            K::Log => &scalar::LOG,
            K::LessThan => &scalar::LESS_THAN,
            K::LessThanOrEqual => &scalar::LESS_THAN_OR_EQUAL,
            K::Max => &scalar::MAX,
            K::Min => &scalar::MIN,
            K::Multiply => &scalar::MULTIPLY,
            K::NotEqual => &scalar::NOT_EQUAL,
            K::Or => &scalar::OR,
            K::Power => &scalar::POWER,
            K::Residue => &scalar::RESIDUE,
            K::Subtract => &scalar::SUBTRACT,
            K::BitwiseAnd => &scalar::BITWISE_AND,
            K::BitwiseOr => &scalar::BITWISE_OR,
            K::BitwiseLess => &scalar::BITWISE_LESS,
            K::BitwiseLessEqual => &scalar::BITWISE_LESS_EQUAL,
            K::BitwiseEqual => &scalar::BITWISE_EQUAL,
            K::BitwiseGreaterEqual => &scalar::BITWISE_GREATER_EQUAL,
            K::BitwiseGreater => &scalar::BITWISE_GREATER,
            K::BitwiseNotEqual => &scalar::BITWISE_NOT_EQUAL,

            K::Catenate => &structural::CATENATE,
            K::Choose => &structural::CHOOSE,
            K::Decode => &structural::DECODE,
            K::Drop => &structural::DROP,
            K::Encode => &structural::ENCODE,
            K::Expand => &structural::EXPAND,
            K::Find => &structural::FIND,
            K::Left => &structural::LEFT,
            K::Match => &structural::MATCH,
            K::Member => &structural::MEMBER,
            K::Pick => &structural::PICK,
            K::Replicate => &structural::REPLICATE,
            K::Reshape => &structural::RESHAPE,
            K::Right => &structural::RIGHT,
            K::Rotate => &structural::ROTATE,
            K::Take => &structural::TAKE,

            K::Deal => &system::DEAL,
            K::ValueInContext => &system::VALUE_IN_CONTEXT,

            K::InnerAddMultiply => &operators::INNER_ADD_MULTIPLY,
            K::InnerMaxAdd => &operators::INNER_MAX_ADD,
            K::InnerMinAdd => &operators::INNER_MIN_ADD,
            K::OuterAdd => &operators::OUTER_ADD,
            K::OuterDivide => &operators::OUTER_DIVIDE,
            K::OuterEqual => &operators::OUTER_EQUAL,
            K::OuterGreaterThan => &operators::OUTER_GREATER_THAN,
            K::OuterGreaterThanOrEqual => &operators::OUTER_GREATER_THAN_OR_EQUAL,
            K::OuterLessThan => &operators::OUTER_LESS_THAN,
            K::OuterLessThanOrEqual => &operators::OUTER_LESS_THAN_OR_EQUAL,
            K::OuterMax => &operators::OUTER_MAX,
            K::OuterMin => &operators::OUTER_MIN,
            K::OuterMultiply => &operators::OUTER_MULTIPLY,
            K::OuterNotEqual => &operators::OUTER_NOT_EQUAL,
            K::OuterPower => &operators::OUTER_POWER,
            K::OuterResidue => &operators::OUTER_RESIDUE,
            K::OuterSubtract => &operators::OUTER_SUBTRACT,

            _ => return None,
        };
        Some(function)
    }
}

impl Default for PrimitiveRegistry {
    fn default() -> Self {
        Self::new()
    }
}
