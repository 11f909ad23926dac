//! Errors raised while building or normalizing a schema.

/// Which definition table a name belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Document,
    Object,
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableKind::Document => f.write_str("document"),
            TableKind::Object => f.write_str("object"),
        }
    }
}

/// A fatal schema error. There is no partial normalization.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("field `{field}` of `{owner}` refers to unknown object type `{target}`")]
    UnresolvedObject {
        owner: String,
        field: String,
        target: String,
    },

    #[error("field `{field}` of `{owner}` refers to unknown document type `{target}`")]
    UnresolvedDocument {
        owner: String,
        field: String,
        target: String,
    },

    #[error("{table} type `{name}` is defined more than once")]
    DuplicateName { table: TableKind, name: String },

    #[error("`{name}` is defined both as a document type and as an object type")]
    NameClash { name: String },

    #[error("field `{field}` is defined more than once in `{owner}`")]
    DuplicateField { owner: String, field: String },

    #[error("{table} type name `{name}` is not a valid identifier")]
    InvalidName { table: TableKind, name: String },

    #[error("field `{field}` of `{owner}` collides with a generated property")]
    ReservedField { owner: String, field: String },

    #[error("field `{field}`: {reason}")]
    InvalidField { field: String, reason: String },
}
