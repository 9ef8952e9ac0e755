//! The type graph: immutable compiler input.
//!
//! A frontend supplies declarations already resolved against its own schema
//! language. The graph is loaded from JSON or from a compact binary blob, or
//! assembled with the builder methods on [`TypeGraph`].

mod binary;
mod json;
mod types;


pub use json::GraphError;
pub use types::{Field, ScalarKind, TypeBody, TypeDecl, TypeExpr, TypeGraph, Variant};
