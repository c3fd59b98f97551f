//! Naming convention utilities for generated schemas.
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `CreateTime` | [`to_lower_camel`] | `createTime` |
//! | `create_time` | [`to_lower_camel`] | `create_time` |

/// Lowercase the first character, leaving the rest untouched.
///
/// # Examples
///
/// ```
/// use structproto::naming::to_lower_camel;
///
/// assert_eq!(to_lower_camel("Id"), "id");
/// assert_eq!(to_lower_camel("CreateTime"), "createTime");
/// assert_eq!(to_lower_camel("display_name"), "display_name");
/// ```
pub fn to_lower_camel(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}
