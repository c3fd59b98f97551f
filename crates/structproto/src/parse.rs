//! Parsing of Rust source into a [`Catalog`].
//!
//! The parser uses [`syn`] to read every struct in a file, including structs
//! nested in inline `mod` blocks, and maps each field's type onto a
//! [`TypeDescriptor`].
//!
//! # Supported Features
//!
//! - Structs with named fields and unit structs
//! - `pub` fields; private fields are recorded but not exported
//! - `#[serde(skip)]` / `#[serde(skip_serializing)]` hide a field
//! - `#[serde(flatten)]` embeds another record's fields
//! - Type aliases declared in the same file
//! - Time-like newtypes such as `struct LocalTime(DateTime<Utc>);`
//!
//! # Examples
//!
//! ```rust
//! use structproto::{Catalog, ParseOptions};
//!
//! let catalog = Catalog::parse_source(
//!     "pub struct User { pub id: String, pub age: u32 }",
//!     &ParseOptions::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(catalog.records()[0].name, "User");
//! ```

use crate::descriptor::{
    Catalog, FieldDef, RecordType, StructType, TypeDescriptor, UnsupportedKind,
};
use crate::error::{ProtoGenError, ProtoGenResult};
use quote::ToTokens;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use syn::ext::IdentExt;
use syn::{Attribute, Fields, GenericArgument, Item, PathArguments, Type, Visibility};

/// Type names treated as points in time.
const TIME_TYPES: &[&str] = &[
    "SystemTime",
    "DateTime",
    "NaiveDateTime",
    "NaiveDate",
    "OffsetDateTime",
    "PrimitiveDateTime",
    "UtcDateTime",
    "Timestamp",
    "Zoned",
];

const SEQUENCE_TYPES: &[&str] = &[
    "Vec",
    "VecDeque",
    "LinkedList",
    "HashSet",
    "BTreeSet",
    "BinaryHeap",
];

const MAP_TYPES: &[&str] = &["HashMap", "BTreeMap", "IndexMap"];

const POINTER_TYPES: &[&str] = &["Option", "Box", "Rc", "Arc", "Cow"];

const CHANNEL_TYPES: &[&str] = &[
    "Sender",
    "SyncSender",
    "Receiver",
    "UnboundedSender",
    "UnboundedReceiver",
];

const COMPLEX_TYPES: &[&str] = &["Complex", "Complex32", "Complex64"];

/// Alias chains deeper than this are treated as cyclic.
const MAX_ALIAS_DEPTH: usize = 32;

/// Options controlling how source types are interpreted.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Additional struct names to treat as time-like.
    pub time_like: Vec<String>,
}

impl Catalog {
    /// Parse a Rust source file.
    pub fn parse_file(path: &Path, options: &ParseOptions) -> ProtoGenResult<Catalog> {
        let content = std::fs::read_to_string(path).map_err(|source| ProtoGenError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse_source(&content, options)
    }

    /// Parse Rust source code.
    pub fn parse_source(source: &str, options: &ParseOptions) -> ProtoGenResult<Catalog> {
        let file = syn::parse_file(source)?;

        let mut items = Collected::default();
        items.collect(&file.items, &[]);

        let resolver = TypeResolver {
            time_like: items.time_like_names(options),
            aliases: &items.aliases,
        };

        let records = items
            .structs
            .iter()
            .filter_map(|(module, s)| resolver.record(module, s))
            .collect::<Vec<_>>();

        tracing::debug!(records = records.len(), "parsed source catalog");
        Ok(Catalog::new(records))
    }
}

/// Items gathered from a file before any type is resolved.
#[derive(Default)]
struct Collected<'a> {
    structs: Vec<(Vec<String>, &'a syn::ItemStruct)>,
    aliases: HashMap<String, &'a Type>,
}

impl<'a> Collected<'a> {
    fn collect(&mut self, items: &'a [Item], module: &[String]) {
        for item in items {
            match item {
                Item::Struct(s) => self.structs.push((module.to_vec(), s)),
                Item::Type(t) if t.generics.params.is_empty() => {
                    self.aliases.insert(t.ident.unraw().to_string(), t.ty.as_ref());
                }
                Item::Mod(m) => {
                    if let Some((_, content)) = &m.content {
                        let mut path = module.to_vec();
                        path.push(m.ident.unraw().to_string());
                        self.collect(content, &path);
                    }
                }
                _ => {}
            }
        }
    }

    /// Known time types plus local newtypes and aliases wrapping them.
    fn time_like_names(&self, options: &ParseOptions) -> HashSet<String> {
        let mut names: HashSet<String> = TIME_TYPES.iter().map(|s| s.to_string()).collect();
        names.extend(options.time_like.iter().cloned());

        let mut wrappers: Vec<(String, &Type)> = self
            .structs
            .iter()
            .filter_map(|(_, s)| match &s.fields {
                Fields::Unnamed(f) if f.unnamed.len() == 1 => f
                    .unnamed
                    .first()
                    .map(|field| (s.ident.unraw().to_string(), &field.ty)),
                _ => None,
            })
            .collect();
        wrappers.extend(self.aliases.iter().map(|(name, ty)| (name.clone(), *ty)));

        loop {
            let before = names.len();
            for (name, ty) in &wrappers {
                if let Some(inner) = last_ident(ty) {
                    if names.contains(&inner) {
                        names.insert(name.clone());
                    }
                }
            }
            if names.len() == before {
                break;
            }
        }

        names
    }
}

struct TypeResolver<'a> {
    time_like: HashSet<String>,
    aliases: &'a HashMap<String, &'a Type>,
}

impl TypeResolver<'_> {
    fn record(&self, module: &[String], s: &syn::ItemStruct) -> Option<RecordType> {
        let fields = match &s.fields {
            Fields::Named(named) => named.named.iter().map(|f| self.field(f)).collect(),
            Fields::Unit => Vec::new(),
            Fields::Unnamed(_) => return None,
        };

        let name = s.ident.unraw().to_string();
        let qualified_name = if module.is_empty() {
            name.clone()
        } else {
            format!("{}::{}", module.join("::"), name)
        };

        Some(RecordType {
            name,
            qualified_name,
            exported: is_visible(&s.vis),
            fields,
        })
    }

    fn field(&self, f: &syn::Field) -> FieldDef {
        let name = f
            .ident
            .as_ref()
            .map(|i| i.unraw().to_string())
            .unwrap_or_default();
        let serde = SerdeFlags::from_attrs(&f.attrs);

        FieldDef {
            name,
            ty: self.resolve(&f.ty, 0),
            exported: is_visible(&f.vis) && !serde.skip,
            embedded: serde.flatten,
        }
    }

    fn resolve(&self, ty: &Type, depth: usize) -> TypeDescriptor {
        match ty {
            Type::Path(type_path) if type_path.qself.is_none() => {
                self.resolve_path(ty, &type_path.path, depth)
            }
            Type::Reference(r) => TypeDescriptor::pointer(self.resolve(&r.elem, depth)),
            Type::Slice(s) => TypeDescriptor::sequence(self.resolve(&s.elem, depth)),
            Type::Array(a) => TypeDescriptor::sequence(self.resolve(&a.elem, depth)),
            Type::Paren(p) => self.resolve(&p.elem, depth),
            Type::Group(g) => self.resolve(&g.elem, depth),
            Type::Ptr(_) => unsupported(UnsupportedKind::RawPointer, ty),
            Type::BareFn(_) => unsupported(UnsupportedKind::Function, ty),
            Type::TraitObject(_) | Type::ImplTrait(_) => {
                unsupported(UnsupportedKind::TraitObject, ty)
            }
            Type::Tuple(_) => unsupported(UnsupportedKind::Tuple, ty),
            _ => unsupported(UnsupportedKind::Other, ty),
        }
    }

    fn resolve_path(&self, ty: &Type, path: &syn::Path, depth: usize) -> TypeDescriptor {
        let Some(segment) = path.segments.last() else {
            return unsupported(UnsupportedKind::Other, ty);
        };
        let ident = segment.ident.unraw().to_string();

        let scalar = match ident.as_str() {
            "f32" => Some(TypeDescriptor::Float32),
            "f64" => Some(TypeDescriptor::Float64),
            "isize" => Some(TypeDescriptor::Int),
            "i8" => Some(TypeDescriptor::Int8),
            "i16" => Some(TypeDescriptor::Int16),
            "i32" => Some(TypeDescriptor::Int32),
            "i64" => Some(TypeDescriptor::Int64),
            "usize" => Some(TypeDescriptor::Uint),
            "u8" => Some(TypeDescriptor::Uint8),
            "u16" => Some(TypeDescriptor::Uint16),
            "u32" | "char" => Some(TypeDescriptor::Uint32),
            "u64" => Some(TypeDescriptor::Uint64),
            "bool" => Some(TypeDescriptor::Bool),
            "String" | "str" => Some(TypeDescriptor::String),
            "i128" | "u128" => Some(unsupported(UnsupportedKind::WideInteger, ty)),
            _ => None,
        };
        if let Some(scalar) = scalar {
            return scalar;
        }

        let args = type_args(segment);
        let name = ident.as_str();

        if SEQUENCE_TYPES.contains(&name) {
            return match args.first() {
                Some(elem) => TypeDescriptor::sequence(self.resolve(elem, depth)),
                None => unsupported(UnsupportedKind::Other, ty),
            };
        }
        if MAP_TYPES.contains(&name) {
            return match (args.first(), args.get(1)) {
                (Some(key), Some(value)) => TypeDescriptor::map_as_written(
                    self.resolve(key, depth),
                    spelling(key),
                    self.resolve(value, depth),
                    spelling(value),
                ),
                _ => unsupported(UnsupportedKind::Other, ty),
            };
        }
        if POINTER_TYPES.contains(&name) {
            return match args.first() {
                Some(inner) => TypeDescriptor::pointer(self.resolve(inner, depth)),
                None => unsupported(UnsupportedKind::Other, ty),
            };
        }
        if CHANNEL_TYPES.contains(&name) {
            return unsupported(UnsupportedKind::Channel, ty);
        }
        if COMPLEX_TYPES.contains(&name) {
            return unsupported(UnsupportedKind::Complex, ty);
        }

        if path.segments.len() == 1 {
            if let Some(aliased) = self.aliases.get(name) {
                if depth >= MAX_ALIAS_DEPTH {
                    return unsupported(UnsupportedKind::Other, ty);
                }
                return self.resolve(aliased, depth + 1);
            }
        }

        let time_like = self.time_like.contains(name);
        TypeDescriptor::Struct(StructType {
            name: ident,
            time_like,
        })
    }
}

/// Serde attributes that change how a field reaches the wire.
#[derive(Debug, Default)]
struct SerdeFlags {
    skip: bool,
    flatten: bool,
}

impl SerdeFlags {
    fn from_attrs(attrs: &[Attribute]) -> Self {
        let mut flags = SerdeFlags::default();

        for attr in attrs.iter().filter(|a| a.path().is_ident("serde")) {
            // Unparseable serde attributes are ignored; the compiler reports them
            let _ = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") || meta.path.is_ident("skip_serializing") {
                    flags.skip = true;
                } else if meta.path.is_ident("flatten") {
                    flags.flatten = true;
                } else if meta.input.peek(syn::Token![=]) {
                    meta.value()?.parse::<syn::Expr>()?;
                } else if meta.input.peek(syn::token::Paren) {
                    let nested;
                    syn::parenthesized!(nested in meta.input);
                    nested.parse::<proc_macro2::TokenStream>()?;
                }
                Ok(())
            });
        }

        flags
    }
}

fn is_visible(vis: &Visibility) -> bool {
    !matches!(vis, Visibility::Inherited)
}

fn type_args(segment: &syn::PathSegment) -> Vec<&Type> {
    match &segment.arguments {
        PathArguments::AngleBracketed(args) => args
            .args
            .iter()
            .filter_map(|arg| match arg {
                GenericArgument::Type(ty) => Some(ty),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn last_ident(ty: &Type) -> Option<String> {
    match ty {
        Type::Path(p) => p.path.segments.last().map(|s| s.ident.unraw().to_string()),
        _ => None,
    }
}

fn unsupported(kind: UnsupportedKind, ty: &Type) -> TypeDescriptor {
    TypeDescriptor::unsupported(kind, spelling(ty))
}

/// A type as written in source, with token spacing normalised
/// (`&'static str`, `Cow<'static, str>`, `[u8; 4]`).
fn spelling(ty: &Type) -> String {
    let printed = ty.to_token_stream().to_string();
    let chars: Vec<char> = printed.chars().collect();
    let mut out = String::with_capacity(printed.len());

    for (i, &c) in chars.iter().enumerate() {
        if c != ' ' {
            out.push(c);
            continue;
        }
        let prev = out.chars().last();
        let next = chars.get(i + 1).copied();
        let arrow_start = next == Some('-');
        let arrow_end = prev == Some('>') && out.ends_with("->");
        let separator = matches!(prev, Some(',' | ';'));
        let between_words = prev.is_some_and(is_word) && next.is_some_and(is_word);
        if arrow_start || arrow_end || separator || between_words {
            out.push(' ');
        }
    }

    out
}

fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
#[path = "parse/parse_tests.rs"]
mod parse_tests;
