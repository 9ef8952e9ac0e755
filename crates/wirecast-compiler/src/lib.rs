//! wirecast compiler: type graph in, codec program out.
//!
//! The pipeline runs inside a [`Session`]:
//! - `validate` - schema checks over the whole graph (all errors at once)
//! - `shapes` - memoizing factory for structural shapes (deduplication)
//! - `resolve` - depth-first emission order, cycle detection
//! - `mangle` - canonical names, prefixing, operation names
//! - `codegen` - per-type layouts, size bounds and codec contracts
//! - `dispatch` - union key tables and dispatch operations

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod codegen;
mod config;
mod dispatch;
mod error;
pub mod mangle;
mod resolve;
mod session;
mod shapes;
mod validate;

#[cfg(test)]
mod codegen_tests;
#[cfg(test)]
mod dispatch_tests;
#[cfg(test)]
mod mangle_tests;
#[cfg(test)]
mod shapes_tests;
#[cfg(test)]
pub mod test_utils;

pub use config::Config;
pub use error::{Error, InvariantViolation, Result, SchemaError};
pub use session::{Session, compile};

/// Name of the implicit union over every record, see [`Config::global_any_of`].
pub const GLOBAL_ANY_OF: &str = "global_any_of";
