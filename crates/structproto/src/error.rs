//! Error types for schema generation

use crate::comments::CommentError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for schema generation
pub type ProtoGenResult<T> = Result<T, ProtoGenError>;

/// Error type for schema generation
///
/// Every variant is fatal for the batch it occurs in: the first error aborts
/// the whole conversion and no partial output is produced.
#[derive(Error, Debug)]
pub enum ProtoGenError {
    /// Type has no protobuf counterpart (channel, function, trait object, ...)
    #[error("unsupported type: {kind} `{type_name}`")]
    UnsupportedType { kind: String, type_name: String },

    /// Map key or value type is not allowed (strict mode only)
    #[error("unsupported map type: key:{key} value:{value}")]
    UnsupportedMapShape { key: String, value: String },

    /// Comment source could not resolve the type's documentation
    #[error("comment lookup failed for {type_name}: {source}")]
    CommentLookupFailed {
        type_name: String,
        #[source]
        source: CommentError,
    },

    /// Flattened field does not name a record in the catalog
    #[error("flattened field {record}.{field} does not name a known record: {type_name}")]
    UnresolvedEmbedding {
        record: String,
        field: String,
        type_name: String,
    },

    /// Record flattens itself, directly or through other records
    #[error("record {record} is flattened into itself")]
    RecursiveEmbedding { record: String },

    /// Requested record is not present in the parsed source
    #[error("unknown record: {0}")]
    UnknownRecord(String),

    /// Rust source could not be parsed
    #[error("parse error: {0}")]
    Parse(#[from] syn::Error),

    /// Source file could not be read
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ProtoGenError {
    /// Returns a stable numeric code for the error kind
    pub fn error_code(&self) -> u32 {
        match self {
            ProtoGenError::UnsupportedType { .. } => 1,
            ProtoGenError::UnsupportedMapShape { .. } => 2,
            ProtoGenError::CommentLookupFailed { .. } => 3,
            ProtoGenError::UnresolvedEmbedding { .. } => 4,
            ProtoGenError::RecursiveEmbedding { .. } => 5,
            ProtoGenError::UnknownRecord(_) => 6,
            ProtoGenError::Parse(_) => 7,
            ProtoGenError::Io { .. } => 8,
        }
    }

    pub(crate) fn unsupported(kind: impl ToString, type_name: impl ToString) -> Self {
        ProtoGenError::UnsupportedType {
            kind: kind.to_string(),
            type_name: type_name.to_string(),
        }
    }
}
