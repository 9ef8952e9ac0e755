//! JSON deserialization for schema frontends.
//!
//! Types are keyed by name in declaration order. A type expression is either
//! a string (scalar keyword or declared name) or a single-key object:
//!
//! ```json
//! {
//!   "types": {
//!     "boom": { "record": { "x": "u32" } },
//!     "thing": { "record": {
//!       "inner": "boom",
//!       "name": { "fixed": { "element": "u8", "dims": [12] } },
//!       "tags": { "variable": { "element": "u16", "capacity": 4 } },
//!       "maybe": { "optional": "i64" }
//!     } },
//!     "boolish": { "alias": "bool" },
//!     "shape": { "union": ["thing", "boom"] }
//!   }
//! }
//! ```

use indexmap::IndexMap;
use serde::Deserialize;

use super::types::{Field, TypeBody, TypeDecl, TypeExpr, TypeGraph, Variant};

/// Error while loading a type graph.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("JSON parse error: {0}")]
    Json(#[source] serde_json::Error),
    #[error("binary codec error: {0}")]
    Binary(#[source] postcard::Error),
}

impl TypeGraph {
    /// Parse a type graph from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, GraphError> {
        let raw: RawGraph = serde_json::from_str(json).map_err(GraphError::Json)?;
        Ok(raw.into())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawGraph {
    types: IndexMap<String, RawBody>,
}

impl From<RawGraph> for TypeGraph {
    fn from(raw: RawGraph) -> Self {
        raw.types
            .into_iter()
            .map(|(name, body)| TypeDecl {
                name,
                body: body.into(),
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum RawBody {
    Record(IndexMap<String, RawExpr>),
    Union(RawVariants),
    Alias(RawExpr),
}

impl From<RawBody> for TypeBody {
    fn from(raw: RawBody) -> Self {
        match raw {
            RawBody::Record(fields) => TypeBody::Record(
                fields
                    .into_iter()
                    .map(|(name, ty)| Field::new(name, ty.into()))
                    .collect(),
            ),
            RawBody::Union(RawVariants::Types(names)) => {
                TypeBody::Union(names.into_iter().map(Variant::of).collect())
            }
            RawBody::Union(RawVariants::Named(variants)) => TypeBody::Union(
                variants
                    .into_iter()
                    .map(|(name, ty)| Variant::new(name, ty.into()))
                    .collect(),
            ),
            RawBody::Alias(target) => TypeBody::Alias(target.into()),
        }
    }
}

/// Union members as a list of type names, or as `{ variant: type }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawVariants {
    Types(Vec<String>),
    Named(IndexMap<String, RawExpr>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawExpr {
    Name(String),
    Shape(RawShape),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum RawShape {
    Fixed { element: Box<RawExpr>, dims: Vec<u32> },
    Variable { element: Box<RawExpr>, capacity: u32 },
    Optional(Box<RawExpr>),
}

impl From<RawExpr> for TypeExpr {
    fn from(raw: RawExpr) -> Self {
        match raw {
            RawExpr::Name(name) => TypeExpr::named(name),
            RawExpr::Shape(RawShape::Fixed { element, dims }) => {
                TypeExpr::from(*element).fixed(dims)
            }
            RawExpr::Shape(RawShape::Variable { element, capacity }) => {
                TypeExpr::from(*element).variable(capacity)
            }
            RawExpr::Shape(RawShape::Optional(inner)) => TypeExpr::from(*inner).optional(),
        }
    }
}
