//! Comment sources for generated messages
//!
//! The emitter asks a [`CommentSource`] once per record for the message-level
//! comment and a map of field comments. Sources:
//! - [`StaticComments`] for canned comments
//! - [`NoComments`] when comments are not wanted
//! - [`SourceComments`] reading trailing `//` comments from Rust source
//! - [`CommandComments`] running an external documentation tool

mod command;
mod listing;
mod source;

pub use command::CommandComments;
pub use listing::{parse_listing, trailing_comment};
pub use source::SourceComments;

use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

/// Comments attached to one record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeComments {
    /// Message-level comment, possibly empty.
    pub message: String,

    /// Field name (as declared) to comment.
    pub fields: HashMap<String, String>,
}

impl TypeComments {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            fields: HashMap::new(),
        }
    }

    pub fn with_field(mut self, field: impl Into<String>, comment: impl Into<String>) -> Self {
        self.fields.insert(field.into(), comment.into());
        self
    }

    /// Comment for a field, empty when absent.
    pub fn field(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }
}

/// Error returned by a comment source
#[derive(Error, Debug)]
pub enum CommentError {
    /// Type declaration could not be located
    #[error("type not found: {0}")]
    NotFound(String),

    /// Source or tool output could not be parsed
    #[error("parse error: {0}")]
    Parse(String),

    /// I/O error reading source or spawning a tool
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Documentation tool exited unsuccessfully
    #[error("documentation command failed ({status}): {stderr}")]
    CommandFailed { status: String, stderr: String },

    /// Documentation tool did not finish in time
    #[error("documentation command for {type_name} timed out after {timeout:?}")]
    Timeout { type_name: String, timeout: Duration },
}

/// Resolves documentation comments for a record type.
pub trait CommentSource {
    /// Look up comments by the record's qualified name.
    fn comments(&self, qualified_name: &str) -> Result<TypeComments, CommentError>;
}

impl<C: CommentSource + ?Sized> CommentSource for &C {
    fn comments(&self, qualified_name: &str) -> Result<TypeComments, CommentError> {
        (**self).comments(qualified_name)
    }
}

impl<C: CommentSource + ?Sized> CommentSource for Box<C> {
    fn comments(&self, qualified_name: &str) -> Result<TypeComments, CommentError> {
        (**self).comments(qualified_name)
    }
}

/// Canned comments keyed by qualified name.
#[derive(Debug, Clone, Default)]
pub struct StaticComments {
    types: HashMap<String, TypeComments>,
}

impl StaticComments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, qualified_name: impl Into<String>, comments: TypeComments) -> Self {
        self.types.insert(qualified_name.into(), comments);
        self
    }
}

impl CommentSource for StaticComments {
    fn comments(&self, qualified_name: &str) -> Result<TypeComments, CommentError> {
        self.types
            .get(qualified_name)
            .cloned()
            .ok_or_else(|| CommentError::NotFound(qualified_name.to_string()))
    }
}

/// Resolves every type to empty comments.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoComments;

impl CommentSource for NoComments {
    fn comments(&self, _qualified_name: &str) -> Result<TypeComments, CommentError> {
        Ok(TypeComments::default())
    }
}

#[cfg(test)]
#[path = "comments/comments_tests.rs"]
mod comments_tests;
