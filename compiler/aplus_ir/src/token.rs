//! Primitive tokens.
//!
//! A `TokenKind` names the primitive a glyph denotes at the valence the
//! parser classified it with. Many glyphs are valence-overloaded: the
//! parser first classifies them monadically, and the execution core
//! rewrites the kind when the glyph is actually applied with two
//! arguments (see `aplus_eval::registry`).
//!
//! # Salsa-style Compatibility
//! All types have Copy, Clone, Eq, `PartialEq`, Hash, Debug.

use std::fmt;

/// Kind of a primitive-function token.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenKind {
    // Monadic scalar
    AbsoluteValue,
    Ceiling,
    Exponential,
    Floor,
    Identity,
    NaturalLog,
    Negate,
    Not,
    PiTimes,
    Reciprocal,
    Roll,
    Sign,

    // Monadic non-scalar
    Count,
    Depth,
    Disclose,
    Enclose,
    Execute,
    DefaultFormat,
    GradeDown,
    GradeUp,
    Interval,
    ItemRavel,
    MapIn,
    MatrixInverse,
    Null,
    Pack,
    PartitionCount,
    Print,
    Rake,
    Ravel,
    Raze,
    Reverse,
    Right,
    SeparateSymbols,
    Shape,
    Signal,
    Stop,
    Transpose,
    Type,
    Unpack,
    Value,

    // Monadic operators (reduction, scan)
    ReduceAdd,
    ReduceMultiply,
    ReduceOr,
    ReduceAnd,
    ReduceMax,
    ReduceMin,
    ScanAdd,
    ScanMultiply,
    ScanMin,
    ScanMax,
    ScanAnd,
    ScanOr,

    // Dyadic scalar
    Add,
    And,
    Circle,
    CombineSymbols,
    Divide,
    Equal,
    GreaterThan,
    GreaterThanOrEqual,
    Log,
    LessThan,
    LessThanOrEqual,
    Max,
    Min,
    Multiply,
    NotEqual,
    Or,
    Power,
    Residue,
    Subtract,

    // Dyadic non-scalar
    Bins,
    Catenate,
    Choose,
    Deal,
    Decode,
    Drop,
    Encode,
    ExecuteInContext,
    Expand,
    Format,
    Find,
    Laminate,
    Left,
    Map,
    Match,
    Member,
    Partition,
    Pick,
    Replicate,
    Reshape,
    Restructure,
    Rotate,
    Solve,
    Take,
    TransposeAxes,
    ValueInContext,

    // Inner products
    InnerAddMultiply,
    InnerMaxAdd,
    InnerMinAdd,

    // Outer products
    OuterAdd,
    OuterDivide,
    OuterEqual,
    OuterGreaterThan,
    OuterGreaterThanOrEqual,
    OuterLessThan,
    OuterLessThanOrEqual,
    OuterMax,
    OuterMin,
    OuterMultiply,
    OuterNotEqual,
    OuterPower,
    OuterResidue,
    OuterSubtract,

    // Bitwise
    BitwiseNot,
    BitwiseAnd,
    BitwiseOr,
    BitwiseLess,
    BitwiseLessEqual,
    BitwiseEqual,
    BitwiseGreaterEqual,
    BitwiseGreater,
    BitwiseNotEqual,
}

impl TokenKind {
    /// Every token kind, in declaration order.
    pub const ALL: [TokenKind; 124] = [
        Self::AbsoluteValue,
        Self::Ceiling,
        Self::Exponential,
        Self::Floor,
        Self::Identity,
        Self::NaturalLog,
        Self::Negate,
        Self::Not,
        Self::PiTimes,
        Self::Reciprocal,
        Self::Roll,
        Self::Sign,
        Self::Count,
        Self::Depth,
        Self::Disclose,
        Self::Enclose,
        Self::Execute,
        Self::DefaultFormat,
        Self::GradeDown,
        Self::GradeUp,
        Self::Interval,
        Self::ItemRavel,
        Self::MapIn,
        Self::MatrixInverse,
        Self::Null,
        Self::Pack,
        Self::PartitionCount,
        Self::Print,
        Self::Rake,
        Self::Ravel,
        Self::Raze,
        Self::Reverse,
        Self::Right,
        Self::SeparateSymbols,
        Self::Shape,
        Self::Signal,
        Self::Stop,
        Self::Transpose,
        Self::Type,
        Self::Unpack,
        Self::Value,
        Self::ReduceAdd,
        Self::ReduceMultiply,
        Self::ReduceOr,
        Self::ReduceAnd,
        Self::ReduceMax,
        Self::ReduceMin,
        Self::ScanAdd,
        Self::ScanMultiply,
        Self::ScanMin,
        Self::ScanMax,
        Self::ScanAnd,
        Self::ScanOr,
        Self::Add,
        Self::And,
        Self::Circle,
        Self::CombineSymbols,
        Self::Divide,
        Self::Equal,
        Self::GreaterThan,
        Self::GreaterThanOrEqual,
        Self::Log,
        Self::LessThan,
        Self::LessThanOrEqual,
        Self::Max,
        Self::Min,
        Self::Multiply,
        Self::NotEqual,
        Self::Or,
        Self::Power,
        Self::Residue,
        Self::Subtract,
        Self::Bins,
        Self::Catenate,
        Self::Choose,
        Self::Deal,
        Self::Decode,
        Self::Drop,
        Self::Encode,
        Self::ExecuteInContext,
        Self::Expand,
        Self::Format,
        Self::Find,
        Self::Laminate,
        Self::Left,
        Self::Map,
        Self::Match,
        Self::Member,
        Self::Partition,
        Self::Pick,
        Self::Replicate,
        Self::Reshape,
        Self::Restructure,
        Self::Rotate,
        Self::Solve,
        Self::Take,
        Self::TransposeAxes,
        Self::ValueInContext,
        Self::InnerAddMultiply,
        Self::InnerMaxAdd,
        Self::InnerMinAdd,
        Self::OuterAdd,
        Self::OuterDivide,
        Self::OuterEqual,
        Self::OuterGreaterThan,
        Self::OuterGreaterThanOrEqual,
        Self::OuterLessThan,
        Self::OuterLessThanOrEqual,
        Self::OuterMax,
        Self::OuterMin,
        Self::OuterMultiply,
        Self::OuterNotEqual,
        Self::OuterPower,
        Self::OuterResidue,
        Self::OuterSubtract,
        Self::BitwiseNot,
        Self::BitwiseAnd,
        Self::BitwiseOr,
        Self::BitwiseLess,
        Self::BitwiseLessEqual,
        Self::BitwiseEqual,
        Self::BitwiseGreaterEqual,
        Self::BitwiseGreater,
        Self::BitwiseNotEqual,
    ];

    /// Human-readable primitive name, used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Self::AbsoluteValue => "absolute value",
            Self::Ceiling => "ceiling",
            Self::Exponential => "exponential",
            Self::Floor => "floor",
            Self::Identity => "identity",
            Self::NaturalLog => "natural log",
            Self::Negate => "negate",
            Self::Not => "not",
            Self::PiTimes => "pi times",
            Self::Reciprocal => "reciprocal",
            Self::Roll => "roll",
            Self::Sign => "sign",
            Self::Count => "count",
            Self::Depth => "depth",
            Self::Disclose => "disclose",
            Self::Enclose => "enclose",
            Self::Execute => "execute",
            Self::DefaultFormat => "default format",
            Self::GradeDown => "grade down",
            Self::GradeUp => "grade up",
            Self::Interval => "interval",
            Self::ItemRavel => "item ravel",
            Self::MapIn => "map in",
            Self::MatrixInverse => "matrix inverse",
            Self::Null => "null",
            Self::Pack => "pack",
            Self::PartitionCount => "partition count",
            Self::Print => "print",
            Self::Rake => "rake",
            Self::Ravel => "ravel",
            Self::Raze => "raze",
            Self::Reverse => "reverse",
            Self::Right => "right",
            Self::SeparateSymbols => "separate symbols",
            Self::Shape => "shape",
            Self::Signal => "signal",
            Self::Stop => "stop",
            Self::Transpose => "transpose",
            Self::Type => "type",
            Self::Unpack => "unpack",
            Self::Value => "value",
            Self::ReduceAdd => "add reduce",
            Self::ReduceMultiply => "multiply reduce",
            Self::ReduceOr => "or reduce",
            Self::ReduceAnd => "and reduce",
            Self::ReduceMax => "max reduce",
            Self::ReduceMin => "min reduce",
            Self::ScanAdd => "add scan",
            Self::ScanMultiply => "multiply scan",
            Self::ScanMin => "min scan",
            Self::ScanMax => "max scan",
            Self::ScanAnd => "and scan",
            Self::ScanOr => "or scan",
            Self::Add => "add",
            Self::And => "and",
            Self::Circle => "circle",
            Self::CombineSymbols => "combine symbols",
            Self::Divide => "divide",
            Self::Equal => "equal to",
            Self::GreaterThan => "greater than",
            Self::GreaterThanOrEqual => "greater than or equal to",
            Self::Log => "log",
            Self::LessThan => "less than",
            Self::LessThanOrEqual => "less than or equal to",
            Self::Max => "max",
            Self::Min => "min",
            Self::Multiply => "multiply",
            Self::NotEqual => "not equal to",
            Self::Or => "or",
            Self::Power => "power",
            Self::Residue => "residue",
            Self::Subtract => "subtract",
            Self::Bins => "bins",
            Self::Catenate => "catenate",
            Self::Choose => "choose",
            Self::Deal => "deal",
            Self::Decode => "decode",
            Self::Drop => "drop",
            Self::Encode => "encode",
            Self::ExecuteInContext => "execute in context",
            Self::Expand => "expand",
            Self::Format => "format",
            Self::Find => "find",
            Self::Laminate => "laminate",
            Self::Left => "left",
            Self::Map => "map",
            Self::Match => "match",
            Self::Member => "member",
            Self::Partition => "partition",
            Self::Pick => "pick",
            Self::Replicate => "replicate",
            Self::Reshape => "reshape",
            Self::Restructure => "restructure",
            Self::Rotate => "rotate",
            Self::Solve => "solve",
            Self::Take => "take",
            Self::TransposeAxes => "transpose axes",
            Self::ValueInContext => "value in context",
            Self::InnerAddMultiply => "add-multiply inner product",
            Self::InnerMaxAdd => "max-add inner product",
            Self::InnerMinAdd => "min-add inner product",
            Self::OuterAdd => "add outer product",
            Self::OuterDivide => "divide outer product",
            Self::OuterEqual => "equal outer product",
            Self::OuterGreaterThan => "greater than outer product",
            Self::OuterGreaterThanOrEqual => "greater than or equal outer product",
            Self::OuterLessThan => "less than outer product",
            Self::OuterLessThanOrEqual => "less than or equal outer product",
            Self::OuterMax => "max outer product",
            Self::OuterMin => "min outer product",
            Self::OuterMultiply => "multiply outer product",
            Self::OuterNotEqual => "not equal outer product",
            Self::OuterPower => "power outer product",
            Self::OuterResidue => "residue outer product",
            Self::OuterSubtract => "subtract outer product",
            Self::BitwiseNot => "bitwise not",
            Self::BitwiseAnd => "bitwise and",
            Self::BitwiseOr => "bitwise or",
            Self::BitwiseLess => "bitwise less",
            Self::BitwiseLessEqual => "bitwise less equal",
            Self::BitwiseEqual => "bitwise equal",
            Self::BitwiseGreaterEqual => "bitwise greater equal",
            Self::BitwiseGreater => "bitwise greater",
            Self::BitwiseNotEqual => "bitwise not equal",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A primitive-function token as handed over by the parser.
///
/// The kind is mutable: valence reinterpretation rewrites it in place.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    pub kind: TokenKind,
}

impl Token {
    #[inline]
    pub const fn new(kind: TokenKind) -> Self {
        Token { kind }
    }
}

impl From<TokenKind> for Token {
    fn from(kind: TokenKind) -> Self {
        Token::new(kind)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}
