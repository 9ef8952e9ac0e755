//! Runtime errors.

use std::fmt;

use wirecast_layout::TypeId;

use super::value::Value;

/// Errors from a single codec operation.
///
/// All are recoverable: nothing is written to the destination buffer when
/// an encode fails, and decode never reads past the source slice.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// Destination buffer smaller than the encoded length.
    #[error("insufficient capacity: need {required} bytes, have {available}")]
    InsufficientCapacity { required: usize, available: usize },

    #[error("truncated input at offset {offset}: need {needed} bytes, have {available}")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// Variable array count above its static capacity.
    #[error("length {length} at offset {offset} exceeds capacity {capacity}")]
    InvalidLength {
        offset: usize,
        length: u64,
        capacity: u32,
    },

    #[error("union `{union}` has no variant with key {key}")]
    UnknownVariant { union: String, key: u32 },

    /// Presence flag or bool byte other than 0 or 1.
    #[error("invalid flag byte {byte:#04x} at offset {offset}")]
    InvalidFlag { offset: usize, byte: u8 },

    /// Value shape does not match the type. `path` is `$` for the root.
    #[error("value at `{path}` is not a valid {expected} (found {found})")]
    Mismatch {
        path: String,
        expected: String,
        found: &'static str,
    },

    #[error("program has no type {0}")]
    UnknownType(TypeId),
}

impl CodecError {
    /// Negative status code, distinct per error kind.
    pub fn status(&self) -> i32 {
        match self {
            Self::InsufficientCapacity { .. } => -1,
            Self::Truncated { .. } => -2,
            Self::InvalidLength { .. } => -3,
            Self::UnknownVariant { .. } => -4,
            Self::InvalidFlag { .. } => -5,
            Self::Mismatch { .. } => -6,
            Self::UnknownType(_) => -7,
        }
    }

    pub(crate) fn mismatch(expected: impl Into<String>, found: &Value) -> Self {
        Self::Mismatch {
            path: "$".to_string(),
            expected: expected.into(),
            found: found.describe(),
        }
    }

    /// Prefix a mismatch path with the segment it was found under.
    pub(crate) fn under(self, segment: impl fmt::Display) -> Self {
        match self {
            Self::Mismatch {
                path,
                expected,
                found,
            } => Self::Mismatch {
                path: format!("${segment}{}", &path[1..]),
                expected,
                found,
            },
            other => other,
        }
    }
}

/// Status for a byte count that does not fit in an `i32`.
pub const COUNT_OVERFLOW: i32 = -8;

/// Signed byte count, or the error's negative status.
///
/// Counts above `i32::MAX` give [`COUNT_OVERFLOW`]; use the `Result` itself
/// for buffers that large.
pub fn status(result: Result<usize, CodecError>) -> i32 {
    match result {
        Ok(n) => i32::try_from(n).unwrap_or(COUNT_OVERFLOW),
        Err(e) => e.status(),
    }
}
