//! Host type descriptors
//!
//! A [`TypeDescriptor`] is the classifier's view of a Rust type: a closed sum
//! type so that classification is total and testable without a live type
//! system. Records and their fields are collected into a [`Catalog`], which is
//! what the emitter walks.

use crate::error::{ProtoGenError, ProtoGenResult};
use std::fmt;

/// Descriptor of a single host type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDescriptor {
    Float32,
    Float64,

    /// Native-width signed integer (`isize`).
    Int,
    Int8,
    Int16,
    Int32,
    Int64,

    /// Native-width unsigned integer (`usize`).
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,

    Bool,
    String,

    /// Array, slice, or variable-length collection.
    Sequence(Box<TypeDescriptor>),

    /// Key-value map.
    ///
    /// `key_name` and `value_name` spell the key and value as written in source.
    Map {
        key: Box<TypeDescriptor>,
        value: Box<TypeDescriptor>,
        key_name: String,
        value_name: String,
    },

    /// Reference to another struct type.
    Struct(StructType),

    /// Optional or indirect wrapper (`Option`, `Box`, `&T`, ...).
    Pointer(Box<TypeDescriptor>),

    /// Anything outside the classification tree.
    Unsupported(UnsupportedType),
}

/// A struct referenced by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructType {
    pub name: String,

    /// Whether the struct represents a point in time.
    pub time_like: bool,
}

/// A type the classifier cannot express.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedType {
    pub kind: UnsupportedKind,

    /// The type as written in source.
    pub name: String,
}

/// Category of an unsupported type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsupportedKind {
    Channel,
    Function,
    TraitObject,
    Complex,
    Tuple,
    RawPointer,
    WideInteger,
    Other,
}

impl TypeDescriptor {
    pub fn sequence(elem: TypeDescriptor) -> Self {
        TypeDescriptor::Sequence(Box::new(elem))
    }

    /// A map whose key and value are spelled by their descriptors.
    pub fn map(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        let key_name = key.to_string();
        let value_name = value.to_string();
        Self::map_as_written(key, key_name, value, value_name)
    }

    pub fn map_as_written(
        key: TypeDescriptor,
        key_name: impl Into<String>,
        value: TypeDescriptor,
        value_name: impl Into<String>,
    ) -> Self {
        TypeDescriptor::Map {
            key: Box::new(key),
            value: Box::new(value),
            key_name: key_name.into(),
            value_name: value_name.into(),
        }
    }

    pub fn pointer(pointee: TypeDescriptor) -> Self {
        TypeDescriptor::Pointer(Box::new(pointee))
    }

    pub fn record(name: impl Into<String>) -> Self {
        TypeDescriptor::Struct(StructType {
            name: name.into(),
            time_like: false,
        })
    }

    pub fn time(name: impl Into<String>) -> Self {
        TypeDescriptor::Struct(StructType {
            name: name.into(),
            time_like: true,
        })
    }

    pub fn unsupported(kind: UnsupportedKind, name: impl Into<String>) -> Self {
        TypeDescriptor::Unsupported(UnsupportedType {
            kind,
            name: name.into(),
        })
    }

    /// Strips every pointer layer.
    pub fn pointee(&self) -> &TypeDescriptor {
        match self {
            TypeDescriptor::Pointer(inner) => inner.pointee(),
            other => other,
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Float32 => write!(f, "f32"),
            TypeDescriptor::Float64 => write!(f, "f64"),
            TypeDescriptor::Int => write!(f, "isize"),
            TypeDescriptor::Int8 => write!(f, "i8"),
            TypeDescriptor::Int16 => write!(f, "i16"),
            TypeDescriptor::Int32 => write!(f, "i32"),
            TypeDescriptor::Int64 => write!(f, "i64"),
            TypeDescriptor::Uint => write!(f, "usize"),
            TypeDescriptor::Uint8 => write!(f, "u8"),
            TypeDescriptor::Uint16 => write!(f, "u16"),
            TypeDescriptor::Uint32 => write!(f, "u32"),
            TypeDescriptor::Uint64 => write!(f, "u64"),
            TypeDescriptor::Bool => write!(f, "bool"),
            TypeDescriptor::String => write!(f, "String"),
            TypeDescriptor::Sequence(elem) => write!(f, "Vec<{elem}>"),
            TypeDescriptor::Map {
                key_name,
                value_name,
                ..
            } => write!(f, "HashMap<{key_name}, {value_name}>"),
            TypeDescriptor::Struct(s) => write!(f, "{}", s.name),
            TypeDescriptor::Pointer(inner) => write!(f, "Option<{inner}>"),
            TypeDescriptor::Unsupported(u) => write!(f, "{}", u.name),
        }
    }
}

impl fmt::Display for UnsupportedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            UnsupportedKind::Channel => "channel",
            UnsupportedKind::Function => "function",
            UnsupportedKind::TraitObject => "trait object",
            UnsupportedKind::Complex => "complex number",
            UnsupportedKind::Tuple => "tuple",
            UnsupportedKind::RawPointer => "raw pointer",
            UnsupportedKind::WideInteger => "128-bit integer",
            UnsupportedKind::Other => "type",
        };
        f.write_str(kind)
    }
}

/// A field declared on a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    /// Field name as declared.
    pub name: String,

    pub ty: TypeDescriptor,

    /// Whether the field is visible outside its declaring type.
    pub exported: bool,

    /// Whether the field's record is flattened into the parent.
    pub embedded: bool,
}

impl FieldDef {
    /// A visible, non-embedded field.
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            ty,
            exported: true,
            embedded: false,
        }
    }

    pub fn private(mut self) -> Self {
        self.exported = false;
        self
    }

    pub fn flattened(mut self) -> Self {
        self.embedded = true;
        self
    }
}

/// A struct with addressable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordType {
    pub name: String,

    /// Module path plus name, used as the comment lookup key.
    pub qualified_name: String,

    /// Whether the struct itself is `pub`.
    pub exported: bool,

    /// Fields in declaration order.
    pub fields: Vec<FieldDef>,
}

impl RecordType {
    pub fn new(name: impl Into<String>, fields: Vec<FieldDef>) -> Self {
        let name = name.into();
        Self {
            qualified_name: name.clone(),
            name,
            exported: true,
            fields,
        }
    }
}

/// Records collected from one source, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<RecordType>,
}

impl Catalog {
    pub fn new(records: Vec<RecordType>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[RecordType] {
        &self.records
    }

    /// Look up a record by qualified name, falling back to the bare name.
    pub fn record(&self, name: &str) -> Option<&RecordType> {
        self.records
            .iter()
            .find(|r| r.qualified_name == name)
            .or_else(|| self.records.iter().find(|r| r.name == name))
    }

    /// Select records by name, preserving the requested order.
    ///
    /// With no names, every exported record is selected in declaration order.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> ProtoGenResult<Vec<&RecordType>> {
        if names.is_empty() {
            return Ok(self.records.iter().filter(|r| r.exported).collect());
        }

        names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.record(name)
                    .ok_or_else(|| ProtoGenError::UnknownRecord(name.to_string()))
            })
            .collect()
    }
}
