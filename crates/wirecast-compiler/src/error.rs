//! Compilation errors.

use wirecast_layout::ProgramError;

/// Errors that abort a compilation run. No partial program is produced.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid name prefix `{0}`")]
    InvalidPrefix(String),

    #[error("schema has {} errors", .0.len())]
    Schema(Vec<SchemaError>),

    #[error("internal invariant violated: {0}")]
    Invariant(#[from] InvariantViolation),
}

impl Error {
    /// Schema errors carried by this error, empty for other kinds.
    pub fn schema_errors(&self) -> &[SchemaError] {
        match self {
            Self::Schema(errors) => errors,
            _ => &[],
        }
    }
}

/// Result type for compilation.
pub type Result<T> = std::result::Result<T, Error>;

/// Problems in the input graph, reported with the offending names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("type `{0}` is declared more than once")]
    DuplicateType(String),

    /// Names must be identifiers, must not contain `__` and must not be a scalar keyword.
    #[error("`{0}` is not a valid type name")]
    InvalidName(String),

    /// Field or variant name is not an identifier.
    #[error("`{owner}` has invalid member name `{member}`")]
    InvalidMemberName { owner: String, member: String },

    #[error("type `{name}` referenced by `{referenced_by}` is not declared")]
    UnresolvedType { name: String, referenced_by: String },

    #[error("variable array in `{referenced_by}` has zero capacity")]
    ZeroCapacity { referenced_by: String },

    #[error("fixed array in `{referenced_by}` has a zero dimension")]
    ZeroDimension { referenced_by: String },

    #[error("fixed array in `{referenced_by}` has no dimensions")]
    EmptyDims { referenced_by: String },

    #[error("record `{record}` declares field `{field}` more than once")]
    DuplicateField { record: String, field: String },

    #[error("union `{union}` declares variant `{variant}` more than once")]
    DuplicateVariant { union: String, variant: String },

    #[error("union `{0}` has no variants")]
    EmptyUnion(String),

    /// Unions are dispatch targets only.
    #[error("union `{union}` cannot be embedded in `{referenced_by}`")]
    UnionNotEmbeddable { union: String, referenced_by: String },

    /// Cycle path with the first member repeated at the end.
    #[error("dependency cycle: {}", .0.join(" -> "))]
    DependencyCycle(Vec<String>),

    /// Two distinct declarations emit the same identifier.
    #[error("`{first}` and `{second}` both emit `{ident}`")]
    NameClash {
        ident: String,
        first: String,
        second: String,
    },
}

/// Generator bugs. Unreachable for a validated graph.
#[derive(Debug, thiserror::Error)]
pub enum InvariantViolation {
    #[error("mangled name `{name}` produced by two distinct shapes")]
    NameCollision { name: String },

    #[error("shape `{0}` was never resolved")]
    UnresolvedShape(String),

    /// Includes duplicate or out-of-order union discriminants.
    #[error(transparent)]
    Program(#[from] ProgramError),
}
