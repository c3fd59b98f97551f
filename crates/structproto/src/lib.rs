//! structproto - Protocol Buffers messages from Rust structs
//!
//! This crate reads Rust struct definitions and emits equivalent `.proto`
//! message declarations:
//! - [`Catalog`] parses Rust source into type descriptors
//! - [`classify`] maps a type descriptor to a protobuf type expression
//! - [`Emitter`] numbers fields, attaches comments, and renders [`Message`]s
//! - [`CommentSource`] supplies message and field comments
//!
//! # Architecture
//!
//! ```text
//! Rust Source
//!     ↓
//!  [Parser] ──────────────→ Catalog (RecordType, FieldDef, TypeDescriptor)
//!     ↓                          ↓
//!  [CommentSource]  ──→  [Emitter] ──→ [Classifier]
//!                                ↓
//!                           Message → .proto text
//! ```
//!
//! # Usage
//!
//! ```rust
//! let source = r#"
//!     /// UserInfo
//!     pub struct User {
//!         pub id: String, // id field
//!         pub age: i32,
//!     }
//! "#;
//!
//! let proto = structproto::convert_source(source, &["User"], true).unwrap();
//!
//! assert_eq!(
//!     proto,
//!     "// UserInfo\nmessage User {\n  string id = 1; // id field\n  int32 age = 2;\n}\n\n"
//! );
//! ```

pub mod classify;
pub mod comments;
pub mod descriptor;
pub mod emit;
pub mod error;
pub mod message;
pub mod naming;
pub mod parse;

pub use classify::classify;
pub use comments::{CommentError, CommentSource, TypeComments};
pub use descriptor::{Catalog, FieldDef, RecordType, TypeDescriptor};
pub use emit::Emitter;
pub use error::{ProtoGenError, ProtoGenResult};
pub use message::{Message, MessageField};
pub use parse::ParseOptions;

use comments::SourceComments;

/// Convert structs in Rust source using the source's own trailing comments.
///
/// With no `types`, every `pub` struct is converted in declaration order.
pub fn convert_source<S: AsRef<str>>(
    source: &str,
    types: &[S],
    strict: bool,
) -> ProtoGenResult<String> {
    let catalog = Catalog::parse_source(source, &ParseOptions::default())?;
    let comments = source_comments(source)?;

    let records = catalog.select(types)?;
    Emitter::new(&catalog, &comments, strict).convert_all(records)
}

/// Index a source's comments, reporting unreadable source as a parse error.
fn source_comments(source: &str) -> ProtoGenResult<SourceComments> {
    SourceComments::from_source(source, false)
        .map_err(|e| syn::Error::new(proc_macro2::Span::call_site(), e).into())
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::comments::{NoComments, SourceComments, StaticComments};
    pub use crate::{
        Catalog, CommentSource, Emitter, Message, MessageField, ParseOptions, ProtoGenError,
        ProtoGenResult, TypeDescriptor, classify,
    };
}
