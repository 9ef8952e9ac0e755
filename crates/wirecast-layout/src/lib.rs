#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Compiled codec program format for wirecast.
//!
//! This crate contains:
//! - Type table entries (TypeId, TypeKind, Layout, TypeDef) in emission order
//! - Codec contracts and static size bounds per emitted type
//! - Union dispatch tables (UnionDef, VariantDef, DispatchOps)
//! - Program validation, binary (de)serialization and a text dump

mod dump;
mod ids;
mod kind;
mod layout;
mod program;

#[cfg(test)]
mod dump_tests;

pub use dump::dump;
pub use ids::TypeId;
pub use kind::TypeKind;
pub use layout::{
    CodecContract, FieldDef, LENGTH_PREFIX_WIDTH, Layout, PRESENCE_WIDTH, SizeBounds,
};
pub use program::{DispatchOps, Program, ProgramError, TypeDef, UnionDef, VariantDef};
