//! Union dispatch.
//!
//! A union value is a closed `(key, value)` pair. Each operation looks the
//! key up in the union's variant table and forwards to the variant type's
//! codec. The key is not written to the wire.

use serde::Serialize;
use wirecast_layout::{Program, UnionDef, VariantDef};

use super::codec::Codec;
use super::error::CodecError;
use super::value::Value;

/// One value of some variant of a union.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AnyOf {
    pub key: u32,
    pub value: Value,
}

/// A run of values of one variant. The element count is `values.len()`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AnyOfArray {
    pub key: u32,
    pub values: Vec<Value>,
}

impl AnyOf {
    pub fn new(key: u32, value: Value) -> Self {
        Self { key, value }
    }
}

impl AnyOfArray {
    pub fn new(key: u32, values: Vec<Value>) -> Self {
        Self { key, values }
    }

    pub fn count(&self) -> usize {
        self.values.len()
    }
}

/// Generic operations of one union.
#[derive(Clone, Copy, Debug)]
pub struct Dispatcher<'p> {
    codec: Codec<'p>,
    union: &'p UnionDef,
}

impl<'p> Dispatcher<'p> {
    /// Dispatcher for the union declared as `name`.
    pub fn new(program: &'p Program, name: &str) -> Option<Self> {
        let union = program.union_by_name(name)?;
        Some(Self {
            codec: Codec::new(program),
            union,
        })
    }

    pub fn union(&self) -> &'p UnionDef {
        self.union
    }

    /// Key of a variant by declared name.
    pub fn key(&self, variant: &str) -> Option<u32> {
        self.union.variant_by_name(variant).map(|v| v.discriminant)
    }

    fn variant(&self, key: u32) -> Result<&'p VariantDef, CodecError> {
        self.union
            .variant(key)
            .ok_or_else(|| CodecError::UnknownVariant {
                union: self.union.name.clone(),
                key,
            })
    }

    pub fn generic_encode(&self, any: &AnyOf, buf: &mut [u8]) -> Result<usize, CodecError> {
        let variant = self.variant(any.key)?;
        self.codec.encode(variant.type_id, &any.value, buf)
    }

    pub fn generic_decode(&self, key: u32, buf: &[u8]) -> Result<(AnyOf, usize), CodecError> {
        let variant = self.variant(key)?;
        let (value, consumed) = self.codec.decode(variant.type_id, buf)?;
        Ok((AnyOf { key, value }, consumed))
    }

    pub fn generic_len(&self, any: &AnyOf) -> Result<usize, CodecError> {
        let variant = self.variant(any.key)?;
        self.codec.length(variant.type_id, &any.value)
    }

    pub fn array_encode(&self, any: &AnyOfArray, buf: &mut [u8]) -> Result<usize, CodecError> {
        let variant = self.variant(any.key)?;
        self.codec.encode_array(variant.type_id, &any.values, buf)
    }

    pub fn array_decode(
        &self,
        key: u32,
        count: usize,
        buf: &[u8],
    ) -> Result<(AnyOfArray, usize), CodecError> {
        let variant = self.variant(key)?;
        let (values, consumed) = self.codec.decode_array(variant.type_id, count, buf)?;
        Ok((AnyOfArray { key, values }, consumed))
    }

    pub fn array_len(&self, any: &AnyOfArray) -> Result<usize, CodecError> {
        let variant = self.variant(any.key)?;
        self.codec.array_length(variant.type_id, &any.values)
    }
}
