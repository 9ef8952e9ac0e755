//! Union dispatch tables.
//!
//! Every union gets a key enum with one constant per variant. Discriminants
//! are assigned densely in declaration order, and `Program::new` rejects any
//! table where a discriminant differs from its variant's index. With
//! `global_any_of` enabled, an implicit union over all records is appended
//! after the declared ones.

use std::collections::HashMap;

use wirecast_core::{Interner, Symbol};
use wirecast_layout::{TypeDef, UnionDef, VariantDef};

use crate::mangle;
use crate::resolve::{Lowered, LoweredBody, Resolution};
use crate::shapes::ShapeId;
use crate::{Error, GLOBAL_ANY_OF, InvariantViolation, SchemaError};

pub(crate) struct Dispatch<'a> {
    pub(crate) lowered: &'a Lowered,
    pub(crate) resolution: &'a Resolution,
    pub(crate) interner: &'a Interner,
    pub(crate) prefix: &'a str,
}

impl Dispatch<'_> {
    /// Build union tables and check their identifiers against `types`.
    #[tracing::instrument(level = "debug", skip_all, fields(global_any_of = global_any_of))]
    pub(crate) fn build(
        &self,
        types: &[TypeDef],
        global_any_of: bool,
    ) -> Result<Vec<UnionDef>, Error> {
        let mut unions = Vec::new();

        for decl in &self.lowered.decls {
            if let LoweredBody::Union { variants } = &decl.body {
                let name = self.interner.resolve(decl.name);
                unions.push(self.union_def(name, variants)?);
            }
        }

        if global_any_of {
            let records: Vec<(Symbol, ShapeId)> = self.lowered.records().collect();
            if records.is_empty() {
                tracing::debug!("no records, skipping global union");
            } else {
                unions.push(self.union_def(GLOBAL_ANY_OF, &records)?);
            }
        }

        let clashes = identifier_clashes(types, &unions);
        if !clashes.is_empty() {
            return Err(Error::Schema(clashes));
        }

        tracing::debug!(unions = unions.len(), "dispatch tables built");
        Ok(unions)
    }

    fn union_def(
        &self,
        name: &str,
        variants: &[(Symbol, ShapeId)],
    ) -> Result<UnionDef, InvariantViolation> {
        let mut defs = Vec::with_capacity(variants.len());

        for (discriminant, &(variant, shape)) in (0u32..).zip(variants) {
            let type_id = self
                .resolution
                .type_id(shape)
                .ok_or_else(|| InvariantViolation::UnresolvedShape(format!("{shape:?}")))?;
            let variant = self.interner.resolve(variant);
            defs.push(VariantDef {
                name: variant.to_string(),
                key_name: mangle::key_name(self.prefix, name, variant),
                discriminant,
                type_id,
            });
        }

        Ok(UnionDef {
            name: name.to_string(),
            ident: format!("{}{name}", self.prefix),
            keys_name: mangle::keys_name(self.prefix, name),
            variants: defs,
            ops: mangle::dispatch_ops(self.prefix, name),
        })
    }
}

/// Identifiers emitted by unions that collide with each other or with
/// a type definition. Type definitions were already checked among themselves.
fn identifier_clashes(types: &[TypeDef], unions: &[UnionDef]) -> Vec<SchemaError> {
    let mut owners: HashMap<&str, &str> = HashMap::new();
    for def in types.iter().filter(|t| t.is_definition()) {
        owners.insert(def.name.as_str(), def.canonical.as_str());
        for op in def.contract.iter().flat_map(|c| c.names()) {
            owners.insert(op, def.canonical.as_str());
        }
    }

    let mut clashes = Vec::new();
    for union in unions {
        let ops = &union.ops;
        let names = [
            union.ident.as_str(),
            union.keys_name.as_str(),
            ops.generic_encode.as_str(),
            ops.generic_decode.as_str(),
            ops.generic_len.as_str(),
            ops.array_encode.as_str(),
            ops.array_decode.as_str(),
            ops.array_len.as_str(),
        ]
        .into_iter()
        .chain(union.variants.iter().map(|v| v.key_name.as_str()));

        for ident in names {
            match owners.get(ident) {
                Some(&first) => clashes.push(SchemaError::NameClash {
                    ident: ident.to_string(),
                    first: first.to_string(),
                    second: union.name.clone(),
                }),
                None => {
                    owners.insert(ident, union.name.as_str());
                }
            }
        }
    }
    clashes
}
