//! Error types raised by sequence operators.
//!
//! Two classes of failure exist. Argument errors are raised eagerly, when an
//! operator is called with a parameter that can never be valid (a window of
//! size zero, a lag offset of zero). Data errors are only discovered while a
//! sequence is being enumerated and are yielded as `Err` items at the point the
//! problem is found, never earlier.
//!
//! Panics raised by user closures are not caught or wrapped; adapters rely on
//! `Drop` to release every source they opened while the panic unwinds.

use std::fmt;

use crate::ImbalanceStrategy;

/// Result type alias for operations that can fail with a [`SeqError`].
pub type SeqResult<T> = Result<T, SeqError>;

/// Errors produced by sequence operators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeqError {
    /// A static parameter was outside its valid range.
    ///
    /// Raised when the operator is called, before any enumeration.
    ArgumentOutOfRange {
        /// Name of the offending parameter.
        param: &'static str,
        /// The value that was passed.
        value: usize,
        /// Human readable description of the accepted range.
        expected: &'static str,
    },
    /// Sources combined under [`ImbalanceStrategy::Fail`] ended at different positions.
    Imbalance {
        /// Zero-based index of the first source found to be exhausted early.
        source: usize,
        /// The policy that detected the imbalance.
        policy: ImbalanceStrategy,
    },
    /// The sequence ended before a fixed number of elements could be read.
    SequenceTooShort {
        /// Number of elements required.
        expected: usize,
        /// Number of elements actually present.
        actual: usize,
    },
    /// The sequence had more elements than a fixed-arity decomposition allows.
    SequenceTooLong {
        /// Number of elements allowed.
        expected: usize,
    },
}

impl fmt::Display for SeqError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArgumentOutOfRange { param, value, expected } => {
                write!(f, "argument `{param}` out of range: got {value}, expected {expected}")
            }
            Self::Imbalance { source, policy } => {
                write!(f, "{} sequence too short ({policy} policy)", ordinal(*source))
            }
            Self::SequenceTooShort { expected, actual } => {
                write!(f, "sequence contains {actual} element(s), expected {expected}")
            }
            Self::SequenceTooLong { expected } => {
                write!(f, "sequence contains more than {expected} element(s)")
            }
        }
    }
}

impl std::error::Error for SeqError {}

impl SeqError {
    /// Returns the parameter name for argument errors.
    #[must_use]
    pub fn param(&self) -> Option<&'static str> {
        match self {
            Self::ArgumentOutOfRange { param, .. } => Some(param),
            _ => None,
        }
    }

    /// Returns true for errors raised eagerly at call time.
    #[must_use]
    pub fn is_argument_error(&self) -> bool {
        matches!(self, Self::ArgumentOutOfRange { .. })
    }
}

/// Validates that a size-like parameter is at least one.
pub(crate) fn require_positive(param: &'static str, value: usize) -> SeqResult<usize> {
    if value == 0 {
        Err(SeqError::ArgumentOutOfRange {
            param,
            value,
            expected: "a value >= 1",
        })
    } else {
        Ok(value)
    }
}

fn ordinal(index: usize) -> String {
    const NAMES: [&str; 4] = ["First", "Second", "Third", "Fourth"];
    match NAMES.get(index) {
        Some(name) => (*name).to_owned(),
        None => format!("Source #{}", index + 1),
    }
}
