//! Comments read directly from Rust source
//!
//! `syn` drops ordinary `//` comments, so the parsed tree is only used to find
//! where each field's type ends. The text after that position on the same line
//! is scanned for a trailing comment.

use super::listing::trailing_comment;
use super::{CommentError, CommentSource, TypeComments};
use quote::ToTokens;
use std::collections::HashMap;
use std::path::Path;
use syn::ext::IdentExt;
use syn::{Attribute, Fields, Item, Meta};

/// Comments for every struct in a Rust source file.
#[derive(Debug, Clone, Default)]
pub struct SourceComments {
    types: HashMap<String, TypeComments>,
}

impl SourceComments {
    /// Read and index a Rust source file.
    pub fn from_file(path: &Path, doc_fallback: bool) -> Result<Self, CommentError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_source(&source, doc_fallback)
    }

    /// Index Rust source text.
    ///
    /// With `doc_fallback`, a field without a trailing comment takes its `///`
    /// doc comment instead.
    pub fn from_source(source: &str, doc_fallback: bool) -> Result<Self, CommentError> {
        let source = source.strip_prefix('\u{feff}').unwrap_or(source);
        let file = syn::parse_file(source).map_err(|e| CommentError::Parse(e.to_string()))?;
        let lines: Vec<&str> = source.lines().collect();

        let mut indexer = Indexer {
            lines: &lines,
            doc_fallback,
            types: HashMap::new(),
        };
        indexer.visit_items(&file.items, &[]);

        tracing::debug!(types = indexer.types.len(), "indexed source comments");
        Ok(Self {
            types: indexer.types,
        })
    }
}

impl CommentSource for SourceComments {
    fn comments(&self, qualified_name: &str) -> Result<TypeComments, CommentError> {
        self.types
            .get(qualified_name)
            .cloned()
            .ok_or_else(|| CommentError::NotFound(qualified_name.to_string()))
    }
}

struct Indexer<'a> {
    lines: &'a [&'a str],
    doc_fallback: bool,
    types: HashMap<String, TypeComments>,
}

impl Indexer<'_> {
    fn visit_items(&mut self, items: &[Item], module: &[String]) {
        for item in items {
            match item {
                Item::Struct(s) => {
                    let name = qualify(module, &s.ident.unraw().to_string());
                    let comments = self.struct_comments(s);
                    self.types.insert(name, comments);
                }
                Item::Mod(m) => {
                    if let Some((_, items)) = &m.content {
                        let mut path = module.to_vec();
                        path.push(m.ident.unraw().to_string());
                        self.visit_items(items, &path);
                    }
                }
                _ => {}
            }
        }
    }

    fn struct_comments(&self, s: &syn::ItemStruct) -> TypeComments {
        let mut comments = TypeComments::new(extract_docs(&s.attrs).join(" "));

        let Fields::Named(named) = &s.fields else {
            return comments;
        };

        for field in &named.named {
            let Some(ident) = &field.ident else {
                continue;
            };
            let comment = self.trailing_comment_after(&field.ty).or_else(|| {
                let docs = extract_docs(&field.attrs);
                (self.doc_fallback && !docs.is_empty()).then(|| docs.join(" "))
            });
            if let Some(comment) = comment {
                comments.fields.insert(ident.unraw().to_string(), comment);
            }
        }

        comments
    }

    /// Trailing comment on the line where a field's type ends.
    fn trailing_comment_after(&self, ty: &syn::Type) -> Option<String> {
        let last = ty.to_token_stream().into_iter().last()?;
        let end = last.span().end();
        let line = self.lines.get(end.line.checked_sub(1)?)?;
        let rest: String = line.chars().skip(end.column).collect();
        let rest = rest.trim_start();
        let rest = rest.strip_prefix(',').unwrap_or(rest);
        if !rest.trim_start().starts_with("//") {
            return None;
        }
        trailing_comment(rest)
    }
}

fn qualify(module: &[String], name: &str) -> String {
    if module.is_empty() {
        name.to_string()
    } else {
        format!("{}::{}", module.join("::"), name)
    }
}

/// Extract documentation comments from attributes.
fn extract_docs(attrs: &[Attribute]) -> Vec<String> {
    let mut docs = Vec::new();

    for attr in attrs {
        if !attr.path().is_ident("doc") {
            continue;
        }
        if let Meta::NameValue(meta) = &attr.meta {
            if let syn::Expr::Lit(expr_lit) = &meta.value {
                if let syn::Lit::Str(lit_str) = &expr_lit.lit {
                    // Block docs and `#[doc = "..."]` may span several lines
                    let doc = lit_str.value();
                    docs.extend(
                        doc.lines()
                            .map(str::trim)
                            .filter(|line| !line.is_empty())
                            .map(str::to_string),
                    );
                }
            }
        }
    }

    docs
}
