//! Per-type wire layouts, size bounds and codec contracts.

use std::fmt;

use serde::{Deserialize, Serialize};
use wirecast_core::ScalarKind;

use crate::{TypeId, TypeKind};

/// Width of a variable array's little-endian `u32` count prefix.
pub const LENGTH_PREFIX_WIDTH: u64 = 4;

/// Width of an optional's presence flag.
pub const PRESENCE_WIDTH: u64 = 1;

/// Wire layout of one emitted type. Children are referenced by id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Layout {
    Scalar(ScalarKind),
    /// Dimensions outer-to-inner. The element is never itself fixed.
    Fixed { element: TypeId, dims: Vec<u32> },
    Variable { element: TypeId, capacity: u32 },
    Optional { inner: TypeId },
    Record { fields: Vec<FieldDef> },
    Alias { target: TypeId },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    pub ty: TypeId,
}

impl Layout {
    pub fn kind(&self) -> TypeKind {
        match self {
            Self::Scalar(_) => TypeKind::Scalar,
            Self::Fixed { .. } => TypeKind::Fixed,
            Self::Variable { .. } => TypeKind::Variable,
            Self::Optional { .. } => TypeKind::Optional,
            Self::Record { .. } => TypeKind::Record,
            Self::Alias { .. } => TypeKind::Alias,
        }
    }

    /// Direct dependencies, in field order for records.
    pub fn dependencies(&self) -> Vec<TypeId> {
        match self {
            Self::Scalar(_) => Vec::new(),
            Self::Fixed { element, .. } | Self::Variable { element, .. } => vec![*element],
            Self::Optional { inner } => vec![*inner],
            Self::Record { fields } => fields.iter().map(|f| f.ty).collect(),
            Self::Alias { target } => vec![*target],
        }
    }

    /// Element count of a fixed array (product of all dimensions).
    pub fn fixed_count(dims: &[u32]) -> u64 {
        dims.iter()
            .fold(1u64, |acc, &d| acc.saturating_mul(u64::from(d)))
    }
}

/// Static encoded-size range of a type. Saturates at `u64::MAX`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeBounds {
    pub min: u64,
    pub max: u64,
}

impl SizeBounds {
    pub const ZERO: Self = Self::exact(0);

    pub const fn exact(size: u64) -> Self {
        Self {
            min: size,
            max: size,
        }
    }

    pub fn scalar(kind: ScalarKind) -> Self {
        Self::exact(kind.width())
    }

    /// `n` back-to-back copies.
    pub fn repeat(self, n: u64) -> Self {
        Self {
            min: self.min.saturating_mul(n),
            max: self.max.saturating_mul(n),
        }
    }

    /// Between zero and `n` back-to-back copies.
    pub fn up_to(self, n: u64) -> Self {
        Self {
            min: 0,
            max: self.max.saturating_mul(n),
        }
    }

    /// Concatenation with `other`.
    pub fn then(self, other: Self) -> Self {
        Self {
            min: self.min.saturating_add(other.min),
            max: self.max.saturating_add(other.max),
        }
    }

    pub fn fixed(element: Self, dims: &[u32]) -> Self {
        element.repeat(Layout::fixed_count(dims))
    }

    pub fn variable(element: Self, capacity: u32) -> Self {
        Self::exact(LENGTH_PREFIX_WIDTH).then(element.up_to(u64::from(capacity)))
    }

    pub fn optional(inner: Self) -> Self {
        Self::exact(PRESENCE_WIDTH).then(inner.up_to(1))
    }

    pub fn record(fields: impl IntoIterator<Item = Self>) -> Self {
        fields.into_iter().fold(Self::ZERO, Self::then)
    }

    pub fn is_fixed(&self) -> bool {
        self.min == self.max
    }

    /// The exact size when every value encodes to the same length.
    pub fn fixed_size(&self) -> Option<u64> {
        self.is_fixed().then_some(self.min)
    }
}

impl fmt::Display for SizeBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_fixed() {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{}..{}", self.min, self.max)
        }
    }
}

/// Operation names emitted for one definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecContract {
    pub encode: String,
    pub encode_array: String,
    pub decode: String,
    pub decode_array: String,
    pub len: String,
    pub array_len: String,
}

impl CodecContract {
    /// All six names, scalar operations first.
    pub fn names(&self) -> [&str; 6] {
        [
            &self.encode,
            &self.decode,
            &self.len,
            &self.encode_array,
            &self.decode_array,
            &self.array_len,
        ]
    }
}
