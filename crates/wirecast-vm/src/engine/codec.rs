//! Layout interpreter: encode, decode and length for every program type.

use wirecast_core::ScalarKind;
use wirecast_layout::{
    FieldDef, LENGTH_PREFIX_WIDTH, Layout, PRESENCE_WIDTH, Program, TypeDef, TypeId,
};

use super::cursor::{Reader, Writer};
use super::error::CodecError;
use super::value::Value;

const PREFIX: usize = LENGTH_PREFIX_WIDTH as usize;
const PRESENCE: usize = PRESENCE_WIDTH as usize;

/// Executes the codec contracts of a program.
///
/// Programs are validated on construction, so every type id reachable from
/// a layout is in range and strictly smaller than its owner; recursion over
/// layouts always terminates.
#[derive(Clone, Copy, Debug)]
pub struct Codec<'p> {
    program: &'p Program,
}

impl<'p> Codec<'p> {
    pub fn new(program: &'p Program) -> Self {
        Self { program }
    }

    pub fn program(&self) -> &'p Program {
        self.program
    }

    /// Type id by canonical name.
    pub fn type_id(&self, canonical: &str) -> Option<TypeId> {
        self.program.type_by_name(canonical).map(|t| t.id)
    }

    /// Exact encoded size of `value`.
    pub fn length(&self, ty: TypeId, value: &Value) -> Result<usize, CodecError> {
        let mut total = 0;
        self.measure(ty, value, &mut total)?;
        Ok(total)
    }

    /// Encode `value` at the start of `buf`, returning the bytes written.
    ///
    /// Fails without touching `buf` when it is shorter than `length(value)`.
    pub fn encode(&self, ty: TypeId, value: &Value, buf: &mut [u8]) -> Result<usize, CodecError> {
        let required = self.length(ty, value)?;
        if required > buf.len() {
            return Err(CodecError::InsufficientCapacity {
                required,
                available: buf.len(),
            });
        }
        let mut w = Writer::new(&mut buf[..required]);
        self.write(ty, value, &mut w)?;
        Ok(w.pos())
    }

    /// Decode one value from the start of `buf`, returning it with the
    /// bytes consumed.
    pub fn decode(&self, ty: TypeId, buf: &[u8]) -> Result<(Value, usize), CodecError> {
        let mut r = Reader::new(buf);
        let value = self
            .read(ty, &mut r)
            .inspect_err(|e| tracing::trace!(%ty, error = %e, "decode failed"))?;
        Ok((value, r.pos()))
    }

    /// Sum of the lengths of `values`.
    pub fn array_length(&self, ty: TypeId, values: &[Value]) -> Result<usize, CodecError> {
        let mut total = 0;
        for (i, value) in values.iter().enumerate() {
            self.measure(ty, value, &mut total)
                .map_err(|e| e.under(format_args!("[{i}]")))?;
        }
        Ok(total)
    }

    /// Encode `values` back to back, with no separators.
    pub fn encode_array(
        &self,
        ty: TypeId,
        values: &[Value],
        buf: &mut [u8],
    ) -> Result<usize, CodecError> {
        let required = self.array_length(ty, values)?;
        if required > buf.len() {
            return Err(CodecError::InsufficientCapacity {
                required,
                available: buf.len(),
            });
        }
        let mut w = Writer::new(&mut buf[..required]);
        for value in values {
            self.write(ty, value, &mut w)?;
        }
        Ok(w.pos())
    }

    /// Decode `count` consecutive values.
    pub fn decode_array(
        &self,
        ty: TypeId,
        count: usize,
        buf: &[u8],
    ) -> Result<(Vec<Value>, usize), CodecError> {
        let mut r = Reader::new(buf);
        let mut values = Vec::new();
        for _ in 0..count {
            let value = self
                .read(ty, &mut r)
                .inspect_err(|e| tracing::trace!(%ty, count, error = %e, "array decode failed"))?;
            values.push(value);
        }
        Ok((values, r.pos()))
    }

    fn def(&self, ty: TypeId) -> Result<&'p TypeDef, CodecError> {
        self.program.get(ty).ok_or(CodecError::UnknownType(ty))
    }

    /// Add the encoded size of `value` to `total`, which is also the offset
    /// the value would be written at.
    fn measure(&self, ty: TypeId, value: &Value, total: &mut usize) -> Result<(), CodecError> {
        let def = self.def(ty)?;
        match (&def.layout, value) {
            (Layout::Scalar(kind), value) => {
                scalar_bytes(*kind, value)
                    .ok_or_else(|| CodecError::mismatch(kind.name(), value))?;
                *total += kind.width() as usize;
            }
            (Layout::Fixed { element, dims }, value) => {
                self.measure_fixed(*element, dims, value, total)
                    .map_err(|e| match e {
                        CodecError::Mismatch { path, .. } if path == "$" => {
                            CodecError::mismatch(expected(def), value)
                        }
                        other => other,
                    })?;
            }
            (Layout::Variable { element, capacity }, Value::Array(items)) => {
                if items.len() > *capacity as usize {
                    return Err(CodecError::InvalidLength {
                        offset: *total,
                        length: items.len() as u64,
                        capacity: *capacity,
                    });
                }
                *total += PREFIX;
                for (i, item) in items.iter().enumerate() {
                    self.measure(*element, item, total)
                        .map_err(|e| e.under(format_args!("[{i}]")))?;
                }
            }
            (Layout::Optional { inner }, Value::Optional(opt)) => {
                *total += PRESENCE;
                if let Some(inner_value) = opt {
                    self.measure(*inner, inner_value, total)?;
                }
            }
            (Layout::Record { fields }, Value::Record(values)) => {
                if !field_names_match(fields, values) {
                    return Err(CodecError::mismatch(expected(def), value));
                }
                for (field, (name, field_value)) in fields.iter().zip(values) {
                    self.measure(field.ty, field_value, total)
                        .map_err(|e| e.under(format_args!(".{name}")))?;
                }
            }
            (Layout::Alias { target }, value) => self.measure(*target, value, total)?,
            _ => return Err(CodecError::mismatch(expected(def), value)),
        }
        Ok(())
    }

    fn measure_fixed(
        &self,
        element: TypeId,
        dims: &[u32],
        value: &Value,
        total: &mut usize,
    ) -> Result<(), CodecError> {
        let Some((&len, rest)) = dims.split_first() else {
            return self.measure(element, value, total);
        };
        let items = fixed_items(value, len)?;
        for (i, item) in items.iter().enumerate() {
            self.measure_fixed(element, rest, item, total)
                .map_err(|e| e.under(format_args!("[{i}]")))?;
        }
        Ok(())
    }

    /// Mirror of `measure`; the caller has already checked the value and
    /// sized the writer.
    fn write(&self, ty: TypeId, value: &Value, w: &mut Writer<'_>) -> Result<(), CodecError> {
        let def = self.def(ty)?;
        match (&def.layout, value) {
            (Layout::Scalar(kind), value) => {
                let (bytes, n) = scalar_bytes(*kind, value)
                    .ok_or_else(|| CodecError::mismatch(kind.name(), value))?;
                w.put(&bytes[..n])?;
            }
            (Layout::Fixed { element, dims }, value) => {
                self.write_fixed(*element, dims, value, w)?;
            }
            (Layout::Variable { element, .. }, Value::Array(items)) => {
                let count = u32::try_from(items.len())
                    .map_err(|_| CodecError::mismatch(expected(def), value))?;
                w.put(&count.to_le_bytes())?;
                for item in items {
                    self.write(*element, item, w)?;
                }
            }
            (Layout::Optional { inner }, Value::Optional(opt)) => match opt {
                None => w.put(&[0])?,
                Some(inner_value) => {
                    w.put(&[1])?;
                    self.write(*inner, inner_value, w)?;
                }
            },
            (Layout::Record { fields }, Value::Record(values)) => {
                for (field, (_, field_value)) in fields.iter().zip(values) {
                    self.write(field.ty, field_value, w)?;
                }
            }
            (Layout::Alias { target }, value) => self.write(*target, value, w)?,
            _ => return Err(CodecError::mismatch(expected(def), value)),
        }
        Ok(())
    }

    fn write_fixed(
        &self,
        element: TypeId,
        dims: &[u32],
        value: &Value,
        w: &mut Writer<'_>,
    ) -> Result<(), CodecError> {
        let Some((&len, rest)) = dims.split_first() else {
            return self.write(element, value, w);
        };
        for item in fixed_items(value, len)? {
            self.write_fixed(element, rest, item, w)?;
        }
        Ok(())
    }

    fn read(&self, ty: TypeId, r: &mut Reader<'_>) -> Result<Value, CodecError> {
        let def = self.def(ty)?;
        let value = match &def.layout {
            Layout::Scalar(kind) => read_scalar(*kind, r)?,
            Layout::Fixed { element, dims } => self.read_fixed(*element, dims, r)?,
            Layout::Variable { element, capacity } => {
                let offset = r.pos();
                let count = u32::from_le_bytes(r.array()?);
                if count > *capacity {
                    return Err(CodecError::InvalidLength {
                        offset,
                        length: u64::from(count),
                        capacity: *capacity,
                    });
                }
                let mut items = Vec::with_capacity(r.items_hint(count));
                for _ in 0..count {
                    items.push(self.read(*element, r)?);
                }
                Value::Array(items)
            }
            Layout::Optional { inner } => {
                if r.flag()? {
                    Value::some(self.read(*inner, r)?)
                } else {
                    Value::none()
                }
            }
            Layout::Record { fields } => {
                let mut values = Vec::with_capacity(fields.len());
                for field in fields {
                    values.push((field.name.clone(), self.read(field.ty, r)?));
                }
                Value::Record(values)
            }
            Layout::Alias { target } => self.read(*target, r)?,
        };
        Ok(value)
    }

    fn read_fixed(
        &self,
        element: TypeId,
        dims: &[u32],
        r: &mut Reader<'_>,
    ) -> Result<Value, CodecError> {
        let Some((&len, rest)) = dims.split_first() else {
            return self.read(element, r);
        };
        let mut items = Vec::with_capacity(r.items_hint(len));
        for _ in 0..len {
            items.push(self.read_fixed(element, rest, r)?);
        }
        Ok(Value::Array(items))
    }
}

fn expected(def: &TypeDef) -> String {
    format!("{} `{}`", def.kind().name(), def.canonical)
}

fn fixed_items(value: &Value, len: u32) -> Result<&[Value], CodecError> {
    match value {
        Value::Array(items) if items.len() == len as usize => Ok(items),
        _ => Err(CodecError::mismatch(format!("array of {len}"), value)),
    }
}

/// Record values must name the declared fields, in order.
fn field_names_match(fields: &[FieldDef], values: &[(String, Value)]) -> bool {
    fields.len() == values.len() && fields.iter().zip(values).all(|(f, (name, _))| f.name == *name)
}

/// Little-endian bytes of a scalar, or `None` when the value has another kind.
fn scalar_bytes(kind: ScalarKind, value: &Value) -> Option<([u8; 8], usize)> {
    fn le(bytes: &[u8]) -> ([u8; 8], usize) {
        let mut out = [0u8; 8];
        out[..bytes.len()].copy_from_slice(bytes);
        (out, bytes.len())
    }

    let encoded = match (kind, value) {
        (ScalarKind::U8, Value::U8(v)) => le(&v.to_le_bytes()),
        (ScalarKind::I8, Value::I8(v)) => le(&v.to_le_bytes()),
        (ScalarKind::U16, Value::U16(v)) => le(&v.to_le_bytes()),
        (ScalarKind::I16, Value::I16(v)) => le(&v.to_le_bytes()),
        (ScalarKind::U32, Value::U32(v)) => le(&v.to_le_bytes()),
        (ScalarKind::I32, Value::I32(v)) => le(&v.to_le_bytes()),
        (ScalarKind::U64, Value::U64(v)) => le(&v.to_le_bytes()),
        (ScalarKind::I64, Value::I64(v)) => le(&v.to_le_bytes()),
        (ScalarKind::Bool, Value::Bool(b)) => le(&[u8::from(*b)]),
        (ScalarKind::Null, Value::Null) => le(&[]),
        _ => return None,
    };
    Some(encoded)
}

fn read_scalar(kind: ScalarKind, r: &mut Reader<'_>) -> Result<Value, CodecError> {
    let value = match kind {
        ScalarKind::U8 => Value::U8(u8::from_le_bytes(r.array()?)),
        ScalarKind::I8 => Value::I8(i8::from_le_bytes(r.array()?)),
        ScalarKind::U16 => Value::U16(u16::from_le_bytes(r.array()?)),
        ScalarKind::I16 => Value::I16(i16::from_le_bytes(r.array()?)),
        ScalarKind::U32 => Value::U32(u32::from_le_bytes(r.array()?)),
        ScalarKind::I32 => Value::I32(i32::from_le_bytes(r.array()?)),
        ScalarKind::U64 => Value::U64(u64::from_le_bytes(r.array()?)),
        ScalarKind::I64 => Value::I64(i64::from_le_bytes(r.array()?)),
        ScalarKind::Bool => Value::Bool(r.flag()?),
        ScalarKind::Null => Value::Null,
    };
    Ok(value)
}
