//! Type graph definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Fixed-width scalar kinds. Integers are little-endian on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ScalarKind {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    /// One byte, 0 or 1.
    Bool,
    /// Zero-width unit.
    Null,
}

impl ScalarKind {
    pub const ALL: [ScalarKind; 10] = [
        Self::U8,
        Self::I8,
        Self::U16,
        Self::I16,
        Self::U32,
        Self::I32,
        Self::U64,
        Self::I64,
        Self::Bool,
        Self::Null,
    ];

    /// Encoded width in bytes.
    pub const fn width(self) -> u64 {
        match self {
            Self::U8 | Self::I8 | Self::Bool => 1,
            Self::U16 | Self::I16 => 2,
            Self::U32 | Self::I32 => 4,
            Self::U64 | Self::I64 => 8,
            Self::Null => 0,
        }
    }

    /// Keyword used in schemas and mangled names.
    pub const fn name(self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::I8 => "i8",
            Self::U16 => "u16",
            Self::I16 => "i16",
            Self::U32 => "u32",
            Self::I32 => "i32",
            Self::U64 => "u64",
            Self::I64 => "i64",
            Self::Bool => "bool",
            Self::Null => "null",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    pub const fn is_signed(self) -> bool {
        matches!(self, Self::I8 | Self::I16 | Self::I32 | Self::I64)
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A type reference as written by the frontend.
///
/// Anonymous shapes (arrays, optionals) nest freely; named references are
/// resolved against the graph's declarations by the compiler.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeExpr {
    Scalar(ScalarKind),
    /// Reference to a declared type.
    Ref(String),
    /// Fixed array, dimensions outer-to-inner.
    Fixed { element: Box<TypeExpr>, dims: Vec<u32> },
    /// Length-prefixed array holding at most `capacity` elements.
    Variable {
        element: Box<TypeExpr>,
        capacity: u32,
    },
    /// Presence byte followed by the payload when present.
    Optional(Box<TypeExpr>),
}

impl TypeExpr {
    pub const U8: Self = Self::Scalar(ScalarKind::U8);
    pub const I8: Self = Self::Scalar(ScalarKind::I8);
    pub const U16: Self = Self::Scalar(ScalarKind::U16);
    pub const I16: Self = Self::Scalar(ScalarKind::I16);
    pub const U32: Self = Self::Scalar(ScalarKind::U32);
    pub const I32: Self = Self::Scalar(ScalarKind::I32);
    pub const U64: Self = Self::Scalar(ScalarKind::U64);
    pub const I64: Self = Self::Scalar(ScalarKind::I64);
    pub const BOOL: Self = Self::Scalar(ScalarKind::Bool);
    pub const NULL: Self = Self::Scalar(ScalarKind::Null);

    /// A scalar keyword or a reference to a declared type.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        match ScalarKind::from_name(&name) {
            Some(kind) => Self::Scalar(kind),
            None => Self::Ref(name),
        }
    }

    pub fn fixed(self, dims: impl Into<Vec<u32>>) -> Self {
        Self::Fixed {
            element: Box::new(self),
            dims: dims.into(),
        }
    }

    pub fn variable(self, capacity: u32) -> Self {
        Self::Variable {
            element: Box::new(self),
            capacity,
        }
    }

    pub fn optional(self) -> Self {
        Self::Optional(Box::new(self))
    }

    /// The innermost scalar or named reference.
    pub fn leaf(&self) -> &TypeExpr {
        match self {
            Self::Scalar(_) | Self::Ref(_) => self,
            Self::Fixed { element, .. } | Self::Variable { element, .. } => element.leaf(),
            Self::Optional(inner) => inner.leaf(),
        }
    }

    /// Name of the declared type this expression bottoms out in, if any.
    pub fn referenced_name(&self) -> Option<&str> {
        match self.leaf() {
            Self::Ref(name) => Some(name),
            _ => None,
        }
    }
}

impl From<ScalarKind> for TypeExpr {
    fn from(kind: ScalarKind) -> Self {
        Self::Scalar(kind)
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(kind) => write!(f, "{kind}"),
            Self::Ref(name) => f.write_str(name),
            Self::Fixed { element, dims } => {
                write!(f, "{element}")?;
                for d in dims {
                    write!(f, "[{d}]")?;
                }
                Ok(())
            }
            Self::Variable { element, capacity } => write!(f, "vla<{element}, {capacity}>"),
            Self::Optional(inner) => write!(f, "optional<{inner}>"),
        }
    }
}

/// Named record field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub ty: TypeExpr,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Union member. Discriminants follow declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub name: String,
    pub ty: TypeExpr,
}

impl Variant {
    pub fn new(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    /// Variant named after the type it carries.
    pub fn of(name: impl Into<String>) -> Self {
        let name = name.into();
        let ty = TypeExpr::named(name.clone());
        Self { name, ty }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeBody {
    /// Fields encoded back to back in declaration order.
    Record(Vec<Field>),
    /// Any-of union, dispatched by discriminant.
    Union(Vec<Variant>),
    /// A user name for another type expression.
    Alias(TypeExpr),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDecl {
    pub name: String,
    pub body: TypeBody,
}

impl TypeDecl {
    pub fn is_record(&self) -> bool {
        matches!(self.body, TypeBody::Record(_))
    }

    pub fn is_union(&self) -> bool {
        matches!(self.body, TypeBody::Union(_))
    }
}

/// Resolved schema handed over by a frontend, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeGraph {
    decls: Vec<TypeDecl>,
}

impl TypeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record<N, I>(mut self, name: impl Into<String>, fields: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, TypeExpr)>,
    {
        let fields = fields
            .into_iter()
            .map(|(n, ty)| Field::new(n, ty))
            .collect();
        self.push(TypeDecl {
            name: name.into(),
            body: TypeBody::Record(fields),
        });
        self
    }

    /// Union whose variants are declared types, named after those types.
    pub fn union<N, I>(mut self, name: impl Into<String>, variants: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = N>,
    {
        let variants = variants.into_iter().map(Variant::of).collect();
        self.push(TypeDecl {
            name: name.into(),
            body: TypeBody::Union(variants),
        });
        self
    }

    pub fn alias(mut self, name: impl Into<String>, target: TypeExpr) -> Self {
        self.push(TypeDecl {
            name: name.into(),
            body: TypeBody::Alias(target),
        });
        self
    }

    pub fn push(&mut self, decl: TypeDecl) {
        self.decls.push(decl);
    }

    pub fn decls(&self) -> &[TypeDecl] {
        &self.decls
    }

    /// First declaration with this name.
    pub fn get(&self, name: &str) -> Option<&TypeDecl> {
        self.decls.iter().find(|d| d.name == name)
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }
}

impl FromIterator<TypeDecl> for TypeGraph {
    fn from_iter<T: IntoIterator<Item = TypeDecl>>(iter: T) -> Self {
        Self {
            decls: iter.into_iter().collect(),
        }
    }
}
