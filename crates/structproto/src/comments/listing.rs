//! Parsing of struct listings printed by documentation tools
//!
//! A listing looks like the struct declaration followed by its documentation:
//!
//! ```text
//! pub struct User {
//!     pub id: String,   // id field
//!     pub name: String, // username
//!     age: u32,
//! }
//!     UserInfo
//! ```

use super::TypeComments;

const COMMENT_SEP: &str = "//";
const STRUCT_END: &str = "}";

/// Extract a trailing `//` comment from the remainder of a line.
///
/// Multiple markers are joined with a single space. Returns `None` when the
/// line has no comment.
pub fn trailing_comment(rest: &str) -> Option<String> {
    let (_, comment) = rest.split_once(COMMENT_SEP)?;
    let parts: Vec<&str> = comment
        .split(COMMENT_SEP)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    Some(parts.join(" "))
}

/// Parse a struct listing into comments.
pub fn parse_listing(listing: &str) -> TypeComments {
    let mut comments = TypeComments::default();
    let mut ended = false;

    for line in listing.lines() {
        let trimmed = line.trim();

        if ended {
            if trimmed.is_empty() {
                continue;
            }
            comments.message = trimmed.to_string();
            break;
        }

        if trimmed == STRUCT_END {
            ended = true;
            continue;
        }

        let decl = trimmed.split(COMMENT_SEP).next().unwrap_or("").trim();
        let Some(name) = field_name(decl) else {
            continue;
        };
        if let Some(comment) = trailing_comment(trimmed) {
            comments.fields.insert(name.to_string(), comment);
        }
    }

    comments
}

/// Field name of a `name: Type` declaration, without visibility.
fn field_name(decl: &str) -> Option<&str> {
    let decl = strip_visibility(decl);
    if decl.starts_with("struct ") {
        return None;
    }
    let (name, _) = decl.split_once(':')?;
    let name = name.trim();
    let is_ident = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '#');
    is_ident.then(|| name.strip_prefix("r#").unwrap_or(name))
}

fn strip_visibility(decl: &str) -> &str {
    let Some(rest) = decl.strip_prefix("pub") else {
        return decl;
    };
    if let Some(restricted) = rest.strip_prefix('(') {
        return match restricted.split_once(')') {
            Some((_, after)) => after.trim_start(),
            None => decl,
        };
    }
    if rest.starts_with(char::is_whitespace) {
        rest.trim_start()
    } else {
        decl
    }
}
