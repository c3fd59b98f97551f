//! Message emission from records.
//!
//! The [`Emitter`] walks a record's fields in declaration order, assigns each
//! visible field the next sequential tag, classifies its type, and attaches the
//! comment reported by the [`CommentSource`]. Flattened records are spliced in
//! place, continuing the same tag sequence.
//!
//! # Examples
//!
//! ```rust
//! use structproto::comments::{StaticComments, TypeComments};
//! use structproto::descriptor::{Catalog, FieldDef, RecordType, TypeDescriptor};
//! use structproto::Emitter;
//!
//! let user = RecordType::new(
//!     "User",
//!     vec![
//!         FieldDef::new("id", TypeDescriptor::String),
//!         FieldDef::new("age", TypeDescriptor::Int32),
//!     ],
//! );
//! let catalog = Catalog::new(vec![user.clone()]);
//! let comments = StaticComments::new().with_type(
//!     "User",
//!     TypeComments::new("UserInfo").with_field("id", "id field"),
//! );
//!
//! let message = Emitter::new(&catalog, &comments, true).message(&user).unwrap();
//!
//! assert_eq!(
//!     message.to_string(),
//!     "// UserInfo\nmessage User {\n  string id = 1; // id field\n  int32 age = 2;\n}\n"
//! );
//! ```

use crate::classify::classify;
use crate::comments::CommentSource;
use crate::descriptor::{Catalog, FieldDef, RecordType, TypeDescriptor};
use crate::error::{ProtoGenError, ProtoGenResult};
use crate::message::{Message, MessageField};
use crate::naming::to_lower_camel;

/// First tag assigned in every message.
pub const FIRST_TAG: u32 = 1;

/// Converts records into protobuf messages.
pub struct Emitter<'a, C: ?Sized> {
    catalog: &'a Catalog,
    comments: &'a C,
    strict: bool,
}

impl<'a, C: CommentSource + ?Sized> Emitter<'a, C> {
    /// Create an emitter.
    ///
    /// `catalog` resolves flattened fields; `strict` controls map-shape errors.
    pub fn new(catalog: &'a Catalog, comments: &'a C, strict: bool) -> Self {
        Self {
            catalog,
            comments,
            strict,
        }
    }

    /// Emit a record's comment and fields, numbering from `start_tag`.
    pub fn emit(
        &self,
        record: &RecordType,
        start_tag: u32,
    ) -> ProtoGenResult<(String, Vec<MessageField>)> {
        let mut stack = Vec::new();
        self.emit_nested(record, start_tag, &mut stack)
    }

    /// Build the message for a top-level record.
    pub fn message(&self, record: &RecordType) -> ProtoGenResult<Message> {
        let (comment, fields) = self.emit(record, FIRST_TAG)?;
        Ok(Message::new(&record.name, comment, fields))
    }

    /// Render every record in order, each block followed by a blank line.
    ///
    /// The first failure aborts the batch.
    pub fn convert_all<'r, I>(&self, records: I) -> ProtoGenResult<String>
    where
        I: IntoIterator<Item = &'r RecordType>,
    {
        let mut output = String::new();
        for record in records {
            let message = self.message(record)?;
            output.push_str(&message.to_string());
            output.push('\n');
        }
        Ok(output)
    }

    fn emit_nested(
        &self,
        record: &RecordType,
        start_tag: u32,
        stack: &mut Vec<String>,
    ) -> ProtoGenResult<(String, Vec<MessageField>)> {
        if stack.contains(&record.qualified_name) {
            return Err(ProtoGenError::RecursiveEmbedding {
                record: record.qualified_name.clone(),
            });
        }

        tracing::debug!(record = %record.qualified_name, start_tag, "emitting record");

        let comments = self
            .comments
            .comments(&record.qualified_name)
            .map_err(|source| ProtoGenError::CommentLookupFailed {
                type_name: record.qualified_name.clone(),
                source,
            })?;

        stack.push(record.qualified_name.clone());

        let mut fields = Vec::new();
        let mut tag = start_tag;

        for field in record.fields.iter().filter(|f| f.exported) {
            if field.embedded {
                let embedded = self.embedded_record(record, field)?;
                let (_, spliced) = self.emit_nested(embedded, tag, stack)?;
                tag += spliced.len() as u32;
                fields.extend(spliced);
                continue;
            }

            let pb_type = classify(&field.ty, self.strict)?;
            tracing::trace!(field = %field.name, pb_type = %pb_type, tag, "classified field");

            fields.push(MessageField::new(
                pb_type,
                to_lower_camel(&field.name),
                tag,
                comments.field(&field.name),
            ));
            tag += 1;
        }

        stack.pop();
        Ok((comments.message, fields))
    }

    /// Resolve the record behind a flattened field.
    fn embedded_record(
        &self,
        parent: &RecordType,
        field: &FieldDef,
    ) -> ProtoGenResult<&'a RecordType> {
        let unresolved = || ProtoGenError::UnresolvedEmbedding {
            record: parent.name.clone(),
            field: field.name.clone(),
            type_name: field.ty.to_string(),
        };

        match field.ty.pointee() {
            TypeDescriptor::Struct(s) => self.catalog.record(&s.name).ok_or_else(unresolved),
            _ => Err(unresolved()),
        }
    }
}
