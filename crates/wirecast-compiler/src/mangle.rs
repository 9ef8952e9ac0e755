//! Name mangling.
//!
//! Canonical (unprefixed) names:
//! - scalar: its keyword (`u32`); declared type: its name
//! - fixed array: element then `____{d}` per dimension, outer first (`u8____3____4____9`)
//! - fixed array of optionals: `fixed__{element}_{dims}` with dims joined by `x`
//!   (`fixed__optional__u32____3_4`), since an optional name has no terminator
//! - variable array: `vla__{element}_{capacity}` (`vla__vla__u32_3_4`)
//! - optional: `optional__{inner}` (`optional__vla__u32_3`)
//!
//! Declared names can never contain `__`, so synthesized names never clash
//! with them. The prefix is applied to every definition and operation name.

use std::collections::HashMap;

use wirecast_core::utils::to_upper_snake_case;
use wirecast_core::{Interner, Symbol};
use wirecast_layout::{CodecContract, DispatchOps};

use crate::resolve::Resolution;
use crate::shapes::{Shape, ShapeId, ShapeTable};
use crate::{Error, InvariantViolation, SchemaError};

pub fn fixed_name(element: &str, dims: &[u32]) -> String {
    let mut name = element.to_string();
    for d in dims {
        name.push_str("____");
        name.push_str(&d.to_string());
    }
    name
}

/// Fixed array whose element is an optional. `optional__T____4` already
/// names `optional<T[4]>`, so the element is bracketed like a variable array.
pub fn fixed_optional_name(element: &str, dims: &[u32]) -> String {
    let dims: Vec<String> = dims.iter().map(u32::to_string).collect();
    format!("fixed__{element}_{}", dims.join("x"))
}

pub fn variable_name(element: &str, capacity: u32) -> String {
    format!("vla__{element}_{capacity}")
}

pub fn optional_name(inner: &str) -> String {
    format!("optional__{inner}")
}

/// Operation names for a definition with canonical name `c`.
pub fn contract(prefix: &str, c: &str) -> CodecContract {
    CodecContract {
        encode: format!("{prefix}encode_{c}"),
        encode_array: format!("{prefix}encode_{c}_array"),
        decode: format!("{prefix}decode_{c}"),
        decode_array: format!("{prefix}decode_{c}_array"),
        len: format!("{prefix}len_{c}"),
        array_len: format!("{prefix}array_len_{c}"),
    }
}

/// Dispatch operation names for union `u`.
pub fn dispatch_ops(prefix: &str, u: &str) -> DispatchOps {
    DispatchOps {
        generic_encode: format!("{prefix}{u}_generic_encode"),
        generic_decode: format!("{prefix}{u}_generic_decode"),
        generic_len: format!("{prefix}{u}_generic_len"),
        array_encode: format!("{prefix}{u}_array_encode"),
        array_decode: format!("{prefix}{u}_array_decode"),
        array_len: format!("{prefix}{u}_array_len"),
    }
}

/// Key enum name, e.g. `FOOEY_SHAPE_KEYS`.
pub fn keys_name(prefix: &str, u: &str) -> String {
    format!("{}_KEYS", to_upper_snake_case(&format!("{prefix}{u}")))
}

/// Key constant, e.g. `FOOEY_SHAPE_THING`.
pub fn key_name(prefix: &str, u: &str, variant: &str) -> String {
    format!(
        "{}_{}",
        to_upper_snake_case(&format!("{prefix}{u}")),
        to_upper_snake_case(variant)
    )
}

/// Canonical names of every resolved shape.
#[derive(Debug)]
pub(crate) struct Names {
    canonical: HashMap<ShapeId, Symbol>,
}

impl Names {
    pub(crate) fn canonical(&self, shape: ShapeId) -> Option<Symbol> {
        self.canonical.get(&shape).copied()
    }
}

/// Assign canonical names in emission order and check they are injective.
///
/// Also rejects graphs whose declarations would emit the same operation
/// name (e.g. `foo`'s `encode_foo_array` and `foo_array`'s `encode_foo_array`).
#[tracing::instrument(level = "debug", skip_all, fields(types = resolution.order.len()))]
pub(crate) fn mangle(
    shapes: &ShapeTable,
    resolution: &Resolution,
    interner: &mut Interner,
    prefix: &str,
) -> Result<Names, Error> {
    let mut canonical: HashMap<ShapeId, Symbol> = HashMap::with_capacity(resolution.order.len());
    let mut reverse: HashMap<Symbol, ShapeId> = HashMap::with_capacity(resolution.order.len());

    for &id in &resolution.order {
        let name = match shapes.get(id) {
            Shape::Scalar(kind) => interner.intern(kind.name()),
            Shape::Named(sym) => *sym,
            Shape::Fixed { element, dims } => {
                let name = child_name(&canonical, interner, *element)?;
                match shapes.get(*element) {
                    Shape::Optional { .. } => {
                        interner.intern_owned(fixed_optional_name(&name, dims))
                    }
                    _ => interner.intern_owned(fixed_name(&name, dims)),
                }
            }
            Shape::Variable { element, capacity } => {
                let element = child_name(&canonical, interner, *element)?;
                interner.intern_owned(variable_name(&element, *capacity))
            }
            Shape::Optional { inner } => {
                let inner = child_name(&canonical, interner, *inner)?;
                interner.intern_owned(optional_name(&inner))
            }
        };

        if let Some(&other) = reverse.get(&name)
            && other != id
        {
            return Err(InvariantViolation::NameCollision {
                name: interner.resolve(name).to_string(),
            }
            .into());
        }
        reverse.insert(name, id);
        canonical.insert(id, name);
    }

    let clashes = operation_clashes(shapes, resolution, &canonical, interner, prefix);
    if !clashes.is_empty() {
        return Err(Error::Schema(clashes));
    }

    Ok(Names { canonical })
}

fn child_name(
    canonical: &HashMap<ShapeId, Symbol>,
    interner: &Interner,
    child: ShapeId,
) -> Result<String, InvariantViolation> {
    canonical
        .get(&child)
        .map(|&sym| interner.resolve(sym).to_string())
        .ok_or_else(|| InvariantViolation::UnresolvedShape(format!("{child:?}")))
}

fn operation_clashes(
    shapes: &ShapeTable,
    resolution: &Resolution,
    canonical: &HashMap<ShapeId, Symbol>,
    interner: &Interner,
    prefix: &str,
) -> Vec<SchemaError> {
    let mut owners: HashMap<String, &str> = HashMap::new();
    let mut clashes = Vec::new();

    for &id in &resolution.order {
        if shapes.get(id).is_inline() {
            continue;
        }
        let Some(&sym) = canonical.get(&id) else {
            continue;
        };
        let owner = interner.resolve(sym);
        let contract = contract(prefix, owner);
        let ident = format!("{prefix}{owner}");

        for name in std::iter::once(ident.as_str()).chain(contract.names()) {
            match owners.get(name) {
                Some(&first) if first != owner => clashes.push(SchemaError::NameClash {
                    ident: name.to_string(),
                    first: first.to_string(),
                    second: owner.to_string(),
                }),
                Some(_) => {}
                None => {
                    owners.insert(name.to_string(), owner);
                }
            }
        }
    }

    clashes
}
