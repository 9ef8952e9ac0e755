//! Runtime codec VM for compiled wirecast programs.
//!
//! Interprets a [`wirecast_layout::Program`] to encode, decode and size
//! values of its types, and dispatches union operations by discriminant.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod engine;

pub use engine::{
    AnyOf, AnyOfArray, COUNT_OVERFLOW, Codec, CodecError, Dispatcher, Value, status,
};
