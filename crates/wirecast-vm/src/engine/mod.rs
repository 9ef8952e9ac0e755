//! Codec engine.
//!
//! A `Codec` walks a program's layouts directly; there is no per-type code.
//! Every operation borrows the program immutably, so one codec can serve
//! any number of threads working on independent buffers.

mod codec;
mod cursor;
mod dispatch;
mod error;
mod value;


pub use codec::Codec;
pub use dispatch::{AnyOf, AnyOfArray, Dispatcher};
pub use error::{COUNT_OVERFLOW, CodecError, status};
pub use value::Value;
