//! Protobuf message model and text rendering

use std::fmt;

/// Indentation for field lines inside a message block.
const INDENT: &str = "  ";

/// A single field of a protobuf message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageField {
    ty: String,
    name: String,
    tag: u32,
    comment: String,
}

impl MessageField {
    pub fn new(
        ty: impl Into<String>,
        name: impl Into<String>,
        tag: u32,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
            tag,
            comment: comment.into(),
        }
    }

    /// Protobuf type expression, e.g. `repeated string`.
    pub fn ty(&self) -> &str {
        &self.ty
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unique field number within the message.
    pub fn tag(&self) -> u32 {
        self.tag
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }
}

impl fmt::Display for MessageField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} = {}", self.ty, self.name, self.tag)
    }
}

/// A protobuf message declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    name: String,
    comment: String,
    fields: Vec<MessageField>,
}

impl Message {
    pub fn new(name: impl Into<String>, comment: impl Into<String>, fields: Vec<MessageField>) -> Self {
        let name = name.into();
        debug_assert!(!name.is_empty(), "message name must not be empty");
        Self {
            name,
            comment: comment.into(),
            fields,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn fields(&self) -> &[MessageField] {
        &self.fields
    }
}

impl fmt::Display for Message {
    /// Renders the message block:
    ///
    /// ```text
    /// // <comment>
    /// message <Name> {
    ///   <type> <name> = <tag>; // <field comment>
    /// }
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.comment.is_empty() {
            writeln!(f, "// {}", self.comment)?;
        }
        writeln!(f, "message {} {{", self.name)?;
        for field in &self.fields {
            if field.comment.is_empty() {
                writeln!(f, "{INDENT}{field};")?;
            } else {
                writeln!(f, "{INDENT}{field}; // {}", field.comment)?;
            }
        }
        writeln!(f, "}}")
    }
}
