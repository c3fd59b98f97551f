//! Protobuf type classification for host types.
//!
//! # Type Mappings
//!
//! | Rust | Protobuf |
//! |------|----------|
//! | `f64` | `double` |
//! | `f32` | `float` |
//! | `isize`, `i64` | `int64` |
//! | `i8`, `i16`, `i32` | `int32` |
//! | `usize`, `u64` | `uint64` |
//! | `u8`, `u16`, `u32` | `uint32` |
//! | `bool` | `bool` |
//! | `String` | `string` |
//! | `Vec<T>` | `repeated T` |
//! | `HashMap<K, V>` | `map<K, V>` |
//! | time-like struct | `int64` |
//! | other struct | struct name |
//! | `Option<T>`, `Box<T>` | `T` |

use crate::descriptor::TypeDescriptor;
use crate::error::{ProtoGenError, ProtoGenResult};

pub const PB_DOUBLE: &str = "double";
pub const PB_FLOAT: &str = "float";
pub const PB_INT64: &str = "int64";
pub const PB_INT32: &str = "int32";
pub const PB_UINT64: &str = "uint64";
pub const PB_UINT32: &str = "uint32";
pub const PB_BOOL: &str = "bool";
pub const PB_STRING: &str = "string";
pub const PB_REPEATED: &str = "repeated";
pub const PB_MAP: &str = "map";
pub const PB_ANY: &str = "Any";

/// Map a host type to a protobuf type expression.
///
/// `strict` only affects maps with a disallowed key or value: strict mode
/// fails with [`ProtoGenError::UnsupportedMapShape`], lenient mode substitutes
/// `Any` for the value. Unsupported types fail in either mode.
pub fn classify(ty: &TypeDescriptor, strict: bool) -> ProtoGenResult<String> {
    let pb = match ty {
        TypeDescriptor::Float64 => PB_DOUBLE.to_string(),
        TypeDescriptor::Float32 => PB_FLOAT.to_string(),

        TypeDescriptor::Int | TypeDescriptor::Int64 => PB_INT64.to_string(),
        TypeDescriptor::Int8 | TypeDescriptor::Int16 | TypeDescriptor::Int32 => {
            PB_INT32.to_string()
        }

        TypeDescriptor::Uint | TypeDescriptor::Uint64 => PB_UINT64.to_string(),
        TypeDescriptor::Uint8 | TypeDescriptor::Uint16 | TypeDescriptor::Uint32 => {
            PB_UINT32.to_string()
        }

        TypeDescriptor::Bool => PB_BOOL.to_string(),
        TypeDescriptor::String => PB_STRING.to_string(),

        TypeDescriptor::Sequence(elem) => {
            format!("{PB_REPEATED} {}", classify(elem, strict)?)
        }

        TypeDescriptor::Map {
            key,
            value,
            key_name,
            value_name,
        } => {
            let value_pb = if allowed_map_key(key) && allowed_map_value(value) {
                classify(value, strict)?
            } else if strict {
                return Err(ProtoGenError::UnsupportedMapShape {
                    key: key_name.clone(),
                    value: value_name.clone(),
                });
            } else {
                tracing::warn!(key = %key_name, value = %value_name, "map shape not representable, using Any");
                PB_ANY.to_string()
            };
            // Key keeps its host spelling
            format!("{PB_MAP}<{key_name}, {value_pb}>")
        }

        TypeDescriptor::Struct(s) if s.time_like => PB_INT64.to_string(),
        TypeDescriptor::Struct(s) => s.name.clone(),

        TypeDescriptor::Pointer(inner) => classify(inner, strict)?,

        TypeDescriptor::Unsupported(u) => {
            return Err(ProtoGenError::unsupported(u.kind, &u.name));
        }
    };

    Ok(pb)
}

/// Map keys may be any scalar except floating point.
pub fn allowed_map_key(ty: &TypeDescriptor) -> bool {
    !matches!(
        ty,
        TypeDescriptor::Map { .. }
            | TypeDescriptor::Sequence(_)
            | TypeDescriptor::Float64
            | TypeDescriptor::Float32
    )
}

/// Map values cannot be containers.
pub fn allowed_map_value(ty: &TypeDescriptor) -> bool {
    !matches!(ty, TypeDescriptor::Map { .. } | TypeDescriptor::Sequence(_))
}
