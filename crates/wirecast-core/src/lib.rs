#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for wirecast.
//!
//! - **Type graph**: the resolved, language-agnostic schema handed to the
//!   compiler by a frontend. Immutable once built.
//! - **Interner**: per-session name table; equal names share one `Symbol`.
//! - **Utilities**: identifier checks, case conversion, terminal colors.

mod colors;
mod interner;

pub mod graph;
pub mod utils;

#[cfg(test)]
mod interner_tests;

pub use colors::Colors;
pub use graph::{
    Field, GraphError, ScalarKind, TypeBody, TypeDecl, TypeExpr, TypeGraph, Variant,
};
pub use interner::{Interner, Symbol};
