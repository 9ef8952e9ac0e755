//! The compiled program: type table plus union dispatch tables.
//!
//! A `Program` is always valid. `Program::new` and `Program::from_binary`
//! check the structural invariants the VM relies on, so consumers never
//! re-validate.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{CodecContract, Layout, SizeBounds, TypeId, TypeKind};

/// Error when assembling or loading a program.
#[derive(Debug, thiserror::Error)]
pub enum ProgramError {
    #[error("binary codec error: {0}")]
    Binary(#[source] postcard::Error),

    /// Type table entry stored under the wrong index.
    #[error("type `{name}` at index {index} carries id {id}")]
    IdMismatch { name: String, index: usize, id: TypeId },

    /// Dependency not emitted before its dependent.
    #[error("type `{name}` depends on {dependency}, which is not emitted before it")]
    ForwardReference { name: String, dependency: TypeId },

    /// Reference past the end of the type table.
    #[error("`{owner}` references unknown type {id}")]
    DanglingTypeId { owner: String, id: TypeId },

    /// Definition kind without a codec contract.
    #[error("type `{0}` has no codec contract")]
    MissingContract(String),

    /// Inline kind (scalar, fixed array) with a codec contract.
    #[error("inline type `{0}` has a codec contract")]
    UnexpectedContract(String),

    /// Zero capacity, zero or missing dimensions, or a fixed array of fixed arrays.
    #[error("type `{0}` has an invalid array shape")]
    InvalidShape(String),

    #[error("duplicate identifier `{0}`")]
    DuplicateName(String),

    #[error("union `{0}` has no variants")]
    EmptyUnion(String),

    /// Discriminants must equal the variant's declaration index.
    #[error("variant `{variant}` of union `{union}` has discriminant {found}, expected {expected}")]
    DiscriminantMismatch {
        union: String,
        variant: String,
        expected: u32,
        found: u32,
    },
}

/// One entry of the type table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDef {
    pub id: TypeId,
    /// Emitted identifier. Prefixed for definitions, bare for inline types.
    pub name: String,
    /// Unprefixed mangled name.
    pub canonical: String,
    pub layout: Layout,
    /// Present exactly for definition kinds.
    pub contract: Option<CodecContract>,
    pub bounds: SizeBounds,
}

impl TypeDef {
    pub fn kind(&self) -> TypeKind {
        self.layout.kind()
    }

    pub fn is_definition(&self) -> bool {
        self.kind().is_definition()
    }
}

/// Names of the six generic dispatch operations of a union.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchOps {
    pub generic_encode: String,
    pub generic_decode: String,
    pub generic_len: String,
    pub array_encode: String,
    pub array_decode: String,
    pub array_len: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantDef {
    /// Declared variant name.
    pub name: String,
    /// Key constant, e.g. `SHAPE_THING`.
    pub key_name: String,
    pub discriminant: u32,
    pub type_id: TypeId,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnionDef {
    /// Declared union name.
    pub name: String,
    /// Emitted identifier.
    pub ident: String,
    /// Key enum name, e.g. `SHAPE_KEYS`.
    pub keys_name: String,
    /// Ordered by discriminant.
    pub variants: Vec<VariantDef>,
    pub ops: DispatchOps,
}

impl UnionDef {
    pub fn variant(&self, discriminant: u32) -> Option<&VariantDef> {
        self.variants.get(discriminant as usize)
    }

    pub fn variant_by_name(&self, name: &str) -> Option<&VariantDef> {
        self.variants.iter().find(|v| v.name == name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Program {
    prefix: String,
    types: Vec<TypeDef>,
    unions: Vec<UnionDef>,
    /// Definitions in emission order.
    #[serde(skip)]
    order: Vec<TypeId>,
}

#[derive(Deserialize)]
struct ProgramParts {
    prefix: String,
    types: Vec<TypeDef>,
    unions: Vec<UnionDef>,
}

impl Program {
    /// Assemble a program, checking its structural invariants.
    pub fn new(
        prefix: impl Into<String>,
        types: Vec<TypeDef>,
        unions: Vec<UnionDef>,
    ) -> Result<Self, ProgramError> {
        validate_types(&types)?;
        validate_unions(&types, &unions)?;

        let order = types
            .iter()
            .filter(|t| t.is_definition())
            .map(|t| t.id)
            .collect();

        Ok(Self {
            prefix: prefix.into(),
            types,
            unions,
            order,
        })
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, ProgramError> {
        let parts: ProgramParts = postcard::from_bytes(bytes).map_err(ProgramError::Binary)?;
        Self::new(parts.prefix, parts.types, parts.unions)
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, ProgramError> {
        postcard::to_allocvec(self).map_err(ProgramError::Binary)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The type table, indexed by `TypeId`.
    pub fn types(&self) -> &[TypeDef] {
        &self.types
    }

    pub fn unions(&self) -> &[UnionDef] {
        &self.unions
    }

    /// Ids of definitions (types with a codec contract) in emission order.
    pub fn order(&self) -> &[TypeId] {
        &self.order
    }

    pub fn definitions(&self) -> impl Iterator<Item = &TypeDef> {
        self.order.iter().map(|id| &self.types[id.index()])
    }

    pub fn get(&self, id: TypeId) -> Option<&TypeDef> {
        self.types.get(id.index())
    }

    /// Look up a type by its unprefixed canonical name.
    pub fn type_by_name(&self, canonical: &str) -> Option<&TypeDef> {
        self.types.iter().find(|t| t.canonical == canonical)
    }

    /// Look up a union by its declared name.
    pub fn union_by_name(&self, name: &str) -> Option<&UnionDef> {
        self.unions.iter().find(|u| u.name == name)
    }
}

fn validate_types(types: &[TypeDef]) -> Result<(), ProgramError> {
    let mut names = HashSet::new();

    for (index, def) in types.iter().enumerate() {
        if def.id.index() != index {
            return Err(ProgramError::IdMismatch {
                name: def.name.clone(),
                index,
                id: def.id,
            });
        }

        for dep in def.layout.dependencies() {
            if dep.index() >= types.len() {
                return Err(ProgramError::DanglingTypeId {
                    owner: def.name.clone(),
                    id: dep,
                });
            }
            if dep >= def.id {
                return Err(ProgramError::ForwardReference {
                    name: def.name.clone(),
                    dependency: dep,
                });
            }
        }

        match (def.is_definition(), &def.contract) {
            (true, None) => return Err(ProgramError::MissingContract(def.name.clone())),
            (false, Some(_)) => return Err(ProgramError::UnexpectedContract(def.name.clone())),
            _ => {}
        }

        let valid_shape = match &def.layout {
            Layout::Fixed { element, dims } => {
                !dims.is_empty()
                    && dims.iter().all(|&d| d > 0)
                    && types[element.index()].kind() != TypeKind::Fixed
            }
            Layout::Variable { capacity, .. } => *capacity > 0,
            _ => true,
        };
        if !valid_shape {
            return Err(ProgramError::InvalidShape(def.name.clone()));
        }

        if !names.insert(def.name.as_str()) {
            return Err(ProgramError::DuplicateName(def.name.clone()));
        }
        if let Some(contract) = &def.contract {
            for op in contract.names() {
                if !names.insert(op) {
                    return Err(ProgramError::DuplicateName(op.to_string()));
                }
            }
        }
    }

    Ok(())
}

fn validate_unions(types: &[TypeDef], unions: &[UnionDef]) -> Result<(), ProgramError> {
    let mut names: HashSet<&str> = HashSet::new();

    for union in unions {
        if union.variants.is_empty() {
            return Err(ProgramError::EmptyUnion(union.name.clone()));
        }
        if !names.insert(union.ident.as_str()) {
            return Err(ProgramError::DuplicateName(union.ident.clone()));
        }

        for (index, variant) in union.variants.iter().enumerate() {
            let expected = index as u32;
            if variant.discriminant != expected {
                return Err(ProgramError::DiscriminantMismatch {
                    union: union.name.clone(),
                    variant: variant.name.clone(),
                    expected,
                    found: variant.discriminant,
                });
            }
            if variant.type_id.index() >= types.len() {
                return Err(ProgramError::DanglingTypeId {
                    owner: format!("{}.{}", union.name, variant.name),
                    id: variant.type_id,
                });
            }
        }
    }

    Ok(())
}
