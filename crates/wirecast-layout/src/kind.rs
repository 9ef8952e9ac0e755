//! Canonical type kind definitions.

use serde::{Deserialize, Serialize};

/// Layout kinds of emitted types.
///
/// Scalars and fixed arrays are inline: they have a layout but no standalone
/// definition or operation names of their own. Every other kind is a
/// definition carrying a full codec contract.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[repr(u8)]
pub enum TypeKind {
    /// Fixed-width integer, bool or null.
    Scalar = 0,
    /// `T[d0][d1]..` - raw concatenation, no prefix.
    Fixed = 1,
    /// `vla<T, N>` - 4-byte length prefix, at most N elements.
    Variable = 2,
    /// `optional<T>` - presence byte, payload when present.
    Optional = 3,
    /// Named fields in declaration order.
    Record = 4,
    /// Named reference to another type (e.g., `boolish = bool`).
    Alias = 5,
}

impl TypeKind {
    /// Convert from raw discriminant.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Scalar),
            1 => Some(Self::Fixed),
            2 => Some(Self::Variable),
            3 => Some(Self::Optional),
            4 => Some(Self::Record),
            5 => Some(Self::Alias),
            _ => None,
        }
    }

    /// Whether values of this kind are emitted inline (no definition).
    pub fn is_inline(self) -> bool {
        matches!(self, Self::Scalar | Self::Fixed)
    }

    /// Whether this kind gets its own definition and codec contract.
    pub fn is_definition(self) -> bool {
        !self.is_inline()
    }

    /// Whether this is a wrapper around a single inner type.
    pub fn is_wrapper(self) -> bool {
        matches!(
            self,
            Self::Fixed | Self::Variable | Self::Optional | Self::Alias
        )
    }

    /// Whether this is an array kind.
    pub fn is_array(self) -> bool {
        matches!(self, Self::Fixed | Self::Variable)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Fixed => "fixed",
            Self::Variable => "vla",
            Self::Optional => "optional",
            Self::Record => "record",
            Self::Alias => "alias",
        }
    }
}
