//! Type checking errors.
//!
//! This module defines all error types that can occur during type checking.
//! Every error carries the position of the offending node when the producer
//! attached one.

use crate::types::Ty;
use stella_syntax::Position;
use std::fmt;

/// Type checking errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    /// Type mismatch between expected and found types.
    Mismatch {
        /// The expected type
        expected: Ty,
        /// The actual type found
        found: Ty,
        /// Source location of the error
        position: Option<Position>,
    },

    /// Undefined variable.
    UndefinedVariable {
        /// Name of the undefined variable
        name: String,
        /// Source location
        position: Option<Position>,
    },

    /// Application of something that is not a function.
    NotAFunction {
        /// The type of the callee
        found: Ty,
        /// Source location
        position: Option<Position>,
    },

    /// Tuple projection on a non-tuple.
    NotATuple {
        /// The type being projected
        found: Ty,
        /// Source location
        position: Option<Position>,
    },

    /// Tuple projection past the last component.
    TupleIndexOutOfBounds {
        /// The 1-based index
        index: u64,
        /// Number of components
        len: usize,
        /// Source location
        position: Option<Position>,
    },

    /// Field access on a non-record.
    NotARecord {
        /// The type being accessed
        found: Ty,
        /// Source location
        position: Option<Position>,
    },

    /// Field access with an unknown label.
    MissingRecordField {
        /// The missing label
        label: String,
        /// The record type
        ty: Ty,
        /// Source location
        position: Option<Position>,
    },

    /// Dereference or assignment through a non-reference.
    NotAReference {
        /// The type found
        found: Ty,
        /// Source location
        position: Option<Position>,
    },

    /// An injection where a non-sum type is expected.
    NotASum {
        /// The type found
        found: Ty,
        /// Source location
        position: Option<Position>,
    },

    /// A list operation on a non-list.
    NotAList {
        /// The type found
        found: Ty,
        /// Source location
        position: Option<Position>,
    },

    /// Type application of a non-generic.
    NotAGeneric {
        /// The type found
        found: Ty,
        /// Source location
        position: Option<Position>,
    },

    /// Wrong number of type arguments.
    WrongTypeArgCount {
        /// Expected number of arguments
        expected: usize,
        /// Actual number of arguments
        found: usize,
        /// Source location
        position: Option<Position>,
    },

    /// Wrong number of arguments in an application.
    WrongArgCount {
        /// Expected number of arguments
        expected: usize,
        /// Actual number of arguments
        found: usize,
        /// Source location
        position: Option<Position>,
    },

    /// A variant label that the expected variant type does not list.
    UnexpectedVariantLabel {
        /// The label
        label: String,
        /// Source location
        position: Option<Position>,
    },

    /// Variant pattern or literal against a non-variant.
    NotAVariant {
        /// The type found
        found: Ty,
        /// Source location
        position: Option<Position>,
    },

    /// Ambiguous type (needs annotation).
    AmbiguousType {
        /// Source location
        position: Option<Position>,
    },

    /// `throw` or `try` without an `exception type` declaration.
    ExceptionTypeNotDeclared {
        /// Source location
        position: Option<Position>,
    },

    /// Cast between unrelated types.
    IllegalCast {
        /// Type of the cast expression
        from: Ty,
        /// Target type
        to: Ty,
        /// Source location
        position: Option<Position>,
    },

    /// Non-exhaustive match expression.
    NonExhaustiveMatch {
        /// Missing patterns
        missing: Vec<String>,
        /// Source location (of the match expression)
        position: Option<Position>,
    },

    /// Pattern shape that cannot match the scrutinee type.
    PatternMismatch {
        /// The scrutinee type
        ty: Ty,
        /// Source location
        position: Option<Position>,
    },

    /// `match` with no cases.
    EmptyMatch {
        /// Source location
        position: Option<Position>,
    },

    /// Program without a `main` function.
    MissingMain,

    /// Two top-level declarations with the same name.
    DuplicateDeclaration {
        /// The repeated name
        name: String,
        /// Source location
        position: Option<Position>,
    },

    /// `fold`/`unfold` at a type that is not `µX.T`.
    NotARecursiveType {
        /// The type found
        found: Ty,
        /// Source location
        position: Option<Position>,
    },
}

impl TypeError {
    /// Get the position of this error, if the failing node had one.
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        match self {
            TypeError::Mismatch { position, .. }
            | TypeError::UndefinedVariable { position, .. }
            | TypeError::NotAFunction { position, .. }
            | TypeError::NotATuple { position, .. }
            | TypeError::TupleIndexOutOfBounds { position, .. }
            | TypeError::NotARecord { position, .. }
            | TypeError::MissingRecordField { position, .. }
            | TypeError::NotAReference { position, .. }
            | TypeError::NotASum { position, .. }
            | TypeError::NotAList { position, .. }
            | TypeError::NotAGeneric { position, .. }
            | TypeError::WrongTypeArgCount { position, .. }
            | TypeError::WrongArgCount { position, .. }
            | TypeError::UnexpectedVariantLabel { position, .. }
            | TypeError::NotAVariant { position, .. }
            | TypeError::AmbiguousType { position }
            | TypeError::ExceptionTypeNotDeclared { position }
            | TypeError::IllegalCast { position, .. }
            | TypeError::NonExhaustiveMatch { position, .. }
            | TypeError::PatternMismatch { position, .. }
            | TypeError::EmptyMatch { position }
            | TypeError::DuplicateDeclaration { position, .. }
            | TypeError::NotARecursiveType { position, .. } => *position,
            TypeError::MissingMain => None,
        }
    }

    /// Get a short description of this error.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            TypeError::Mismatch { .. } => "type mismatch",
            TypeError::UndefinedVariable { .. } => "undefined variable",
            TypeError::NotAFunction { .. } => "not a function",
            TypeError::NotATuple { .. } => "not a tuple",
            TypeError::TupleIndexOutOfBounds { .. } => "tuple index out of bounds",
            TypeError::NotARecord { .. } => "not a record",
            TypeError::MissingRecordField { .. } => "missing record field",
            TypeError::NotAReference { .. } => "not a reference",
            TypeError::NotASum { .. } => "not a sum type",
            TypeError::NotAList { .. } => "not a list",
            TypeError::NotAGeneric { .. } => "not a generic function",
            TypeError::WrongTypeArgCount { .. } => "wrong number of type arguments",
            TypeError::WrongArgCount { .. } => "wrong number of arguments",
            TypeError::UnexpectedVariantLabel { .. } => "unexpected variant label",
            TypeError::NotAVariant { .. } => "not a variant",
            TypeError::AmbiguousType { .. } => "ambiguous type",
            TypeError::ExceptionTypeNotDeclared { .. } => "exception type not declared",
            TypeError::IllegalCast { .. } => "illegal cast",
            TypeError::NonExhaustiveMatch { .. } => "non-exhaustive match expression",
            TypeError::PatternMismatch { .. } => "unexpected pattern",
            TypeError::EmptyMatch { .. } => "empty match",
            TypeError::MissingMain => "missing main function",
            TypeError::DuplicateDeclaration { .. } => "duplicate declaration",
            TypeError::NotARecursiveType { .. } => "not a recursive type",
        }
    }

    /// The Stella error tag for this error.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            TypeError::Mismatch { .. } => "ERROR_UNEXPECTED_TYPE_FOR_EXPRESSION",
            TypeError::UndefinedVariable { .. } => "ERROR_UNDEFINED_VARIABLE",
            TypeError::NotAFunction { .. } => "ERROR_NOT_A_FUNCTION",
            TypeError::NotATuple { .. } => "ERROR_NOT_A_TUPLE",
            TypeError::TupleIndexOutOfBounds { .. } => "ERROR_TUPLE_INDEX_OUT_OF_BOUNDS",
            TypeError::NotARecord { .. } => "ERROR_NOT_A_RECORD",
            TypeError::MissingRecordField { .. } => "ERROR_UNEXPECTED_FIELD_ACCESS",
            TypeError::NotAReference { .. } => "ERROR_NOT_A_REFERENCE",
            TypeError::NotASum { .. } => "ERROR_UNEXPECTED_INJECTION",
            TypeError::NotAList { .. } => "ERROR_NOT_A_LIST",
            TypeError::NotAGeneric { .. } => "ERROR_NOT_A_GENERIC_FUNCTION",
            TypeError::WrongTypeArgCount { .. } => "ERROR_INCORRECT_NUMBER_OF_TYPE_ARGUMENTS",
            TypeError::WrongArgCount { .. } => "ERROR_INCORRECT_NUMBER_OF_ARGUMENTS",
            TypeError::UnexpectedVariantLabel { .. } => "ERROR_UNEXPECTED_VARIANT_LABEL",
            TypeError::NotAVariant { .. } => "ERROR_UNEXPECTED_VARIANT",
            TypeError::AmbiguousType { .. } => "ERROR_AMBIGUOUS_TYPE",
            TypeError::ExceptionTypeNotDeclared { .. } => "ERROR_EXCEPTION_TYPE_NOT_DECLARED",
            TypeError::IllegalCast { .. } => "ERROR_ILLEGAL_CAST",
            TypeError::NonExhaustiveMatch { .. } => "ERROR_NONEXHAUSTIVE_MATCH_PATTERNS",
            TypeError::PatternMismatch { .. } => "ERROR_UNEXPECTED_PATTERN_FOR_TYPE",
            TypeError::EmptyMatch { .. } => "ERROR_ILLEGAL_EMPTY_MATCHING",
            TypeError::MissingMain => "ERROR_MISSING_MAIN",
            TypeError::DuplicateDeclaration { .. } => "ERROR_DUPLICATE_FUNCTION_DECLARATION",
            TypeError::NotARecursiveType { .. } => "ERROR_NOT_A_RECURSIVE_TYPE",
        }
    }
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeError::Mismatch {
                expected, found, ..
            } => {
                write!(f, "type mismatch: expected {expected}, found {found}")
            }

            TypeError::UndefinedVariable { name, .. } => {
                write!(f, "undefined variable: {name}")
            }

            TypeError::NotAFunction { found, .. } => {
                write!(f, "expected a function, found {found}")
            }

            TypeError::NotATuple { found, .. } => {
                write!(f, "expected a tuple, found {found}")
            }

            TypeError::TupleIndexOutOfBounds { index, len, .. } => {
                write!(f, "tuple index {index} out of bounds for a tuple of {len}")
            }

            TypeError::NotARecord { found, .. } => {
                write!(f, "expected a record, found {found}")
            }

            TypeError::MissingRecordField { label, ty, .. } => {
                write!(f, "record {ty} has no field {label}")
            }

            TypeError::NotAReference { found, .. } => {
                write!(f, "expected a reference, found {found}")
            }

            TypeError::NotASum { found, .. } => {
                write!(f, "injection used where {found} is expected")
            }

            TypeError::NotAList { found, .. } => {
                write!(f, "expected a list, found {found}")
            }

            TypeError::NotAGeneric { found, .. } => {
                write!(f, "type application of non-generic {found}")
            }

            TypeError::WrongTypeArgCount {
                expected, found, ..
            } => {
                write!(
                    f,
                    "wrong number of type arguments: expected {expected}, found {found}"
                )
            }

            TypeError::WrongArgCount {
                expected, found, ..
            } => {
                write!(
                    f,
                    "wrong number of arguments: expected {expected}, found {found}"
                )
            }

            TypeError::UnexpectedVariantLabel { label, .. } => {
                write!(f, "unexpected variant label: {label}")
            }

            TypeError::NotAVariant { found, .. } => {
                write!(f, "variant used where {found} is expected")
            }

            TypeError::AmbiguousType { .. } => {
                write!(f, "ambiguous type: add type annotation")
            }

            TypeError::ExceptionTypeNotDeclared { .. } => {
                write!(f, "exceptions used without an exception type declaration")
            }

            TypeError::IllegalCast { from, to, .. } => {
                write!(f, "cannot cast {from} to {to}")
            }

            TypeError::NonExhaustiveMatch { missing, .. } => {
                write!(
                    f,
                    "non-exhaustive match: missing patterns: {}",
                    missing.join(", ")
                )
            }

            TypeError::PatternMismatch { ty, .. } => {
                write!(f, "pattern cannot match a value of type {ty}")
            }

            TypeError::EmptyMatch { .. } => {
                write!(f, "match expression has no cases")
            }

            TypeError::MissingMain => {
                write!(f, "program has no main function")
            }

            TypeError::DuplicateDeclaration { name, .. } => {
                write!(f, "duplicate declaration: {name}")
            }

            TypeError::NotARecursiveType { found, .. } => {
                write!(f, "expected a recursive type, found {found}")
            }
        }
    }
}

impl std::error::Error for TypeError {}

/// A result type for type checking operations.
pub type Result<T> = std::result::Result<T, TypeError>;
