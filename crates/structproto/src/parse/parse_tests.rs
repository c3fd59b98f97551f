#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

fn parse(source: &str) -> Catalog {
    Catalog::parse_source(source, &ParseOptions::default()).unwrap()
}

/// Descriptor of the single field of a one-field struct.
fn field_type(ty: &str) -> TypeDescriptor {
    let catalog = parse(&format!("pub struct T {{ pub f: {ty} }}"));
    catalog.records()[0].fields[0].ty.clone()
}

#[test]
fn parse_source___extracts_records_in_order() {
    let catalog = parse(
        r#"
        pub struct User { pub id: String }
        struct Internal { pub x: u8 }
        pub struct Marker;
        pub struct Pair(u8, u8);
        "#,
    );

    let names: Vec<_> = catalog.records().iter().map(|r| r.name.as_str()).collect();

    assert_eq!(names, vec!["User", "Internal", "Marker"]);
    assert!(catalog.records()[0].exported);
    assert!(!catalog.records()[1].exported);
    assert!(catalog.records()[2].fields.is_empty());
}

#[test]
fn parse_source___nested_modules___qualify_names() {
    let catalog = parse(
        r#"
        pub mod api {
            pub mod v1 {
                pub struct Job { pub id: String }
            }
        }
        "#,
    );

    let record = &catalog.records()[0];

    assert_eq!(record.name, "Job");
    assert_eq!(record.qualified_name, "api::v1::Job");
}

#[test]
fn parse_source___field_visibility___recorded() {
    let catalog = parse(
        r#"
        pub struct User {
            pub id: String,
            pub(crate) name: String,
            secret: String,
            #[serde(skip)]
            pub cache: String,
            #[serde(skip_serializing, default)]
            pub derived: String,
        }
        "#,
    );

    let exported: Vec<_> = catalog.records()[0]
        .fields
        .iter()
        .map(|f| (f.name.as_str(), f.exported))
        .collect();

    assert_eq!(
        exported,
        vec![
            ("id", true),
            ("name", true),
            ("secret", false),
            ("cache", false),
            ("derived", false),
        ]
    );
}

#[test]
fn parse_source___serde_flatten___marks_embedded() {
    let catalog = parse(
        r#"
        pub struct Job {
            #[serde(rename = "base", flatten)]
            pub base: Base,
            #[serde(with = "ts", rename(serialize = "at"))]
            pub at: u64,
        }
        "#,
    );

    let fields = &catalog.records()[0].fields;

    assert!(fields[0].embedded);
    assert!(!fields[1].embedded);
    assert!(fields[1].exported);
}

#[test]
fn parse_source___raw_identifiers___unraw() {
    let catalog = parse("pub struct r#Match { pub r#type: String }");

    let record = &catalog.records()[0];

    assert_eq!(record.name, "Match");
    assert_eq!(record.fields[0].name, "type");
}

#[test]
fn parse_source___invalid_source___returns_parse_error() {
    let err = Catalog::parse_source("pub struct {", &ParseOptions::default()).unwrap_err();

    assert!(matches!(err, ProtoGenError::Parse(_)));
}

#[test]
fn parse_file___missing_file___returns_io_error() {
    let err = Catalog::parse_file(Path::new("/nonexistent/x.rs"), &ParseOptions::default())
        .unwrap_err();

    assert!(matches!(err, ProtoGenError::Io { .. }));
}

// ============================================================================
// Type mapping
// ============================================================================

#[test_case("f32", TypeDescriptor::Float32)]
#[test_case("f64", TypeDescriptor::Float64)]
#[test_case("isize", TypeDescriptor::Int)]
#[test_case("i8", TypeDescriptor::Int8)]
#[test_case("i16", TypeDescriptor::Int16)]
#[test_case("i32", TypeDescriptor::Int32)]
#[test_case("i64", TypeDescriptor::Int64)]
#[test_case("usize", TypeDescriptor::Uint)]
#[test_case("u8", TypeDescriptor::Uint8)]
#[test_case("u16", TypeDescriptor::Uint16)]
#[test_case("u32", TypeDescriptor::Uint32)]
#[test_case("u64", TypeDescriptor::Uint64)]
#[test_case("char", TypeDescriptor::Uint32)]
#[test_case("bool", TypeDescriptor::Bool)]
#[test_case("String", TypeDescriptor::String)]
#[test_case("std::string::String", TypeDescriptor::String)]
fn parse_source___scalar___maps(ty: &str, expected: TypeDescriptor) {
    assert_eq!(field_type(ty), expected);
}

#[test_case("Vec<u8>")]
#[test_case("VecDeque<u8>")]
#[test_case("HashSet<u8>")]
#[test_case("BTreeSet<u8>")]
#[test_case("[u8; 16]")]
fn parse_source___collections___map_to_sequence(ty: &str) {
    assert_eq!(
        field_type(ty),
        TypeDescriptor::sequence(TypeDescriptor::Uint8)
    );
}

#[test_case("HashMap<String, i64>")]
#[test_case("BTreeMap<String, i64>")]
#[test_case("std::collections::HashMap<String, i64>")]
fn parse_source___maps___map_to_map(ty: &str) {
    assert_eq!(
        field_type(ty),
        TypeDescriptor::map(TypeDescriptor::String, TypeDescriptor::Int64)
    );
}

#[test_case("HashMap<&'static str, u32>", "&'static str" ; "str reference key")]
#[test_case("BTreeMap<Cow<'static, str>, u32>", "Cow<'static, str>" ; "cow key")]
#[test_case("HashMap<char, u32>", "char" ; "char key")]
#[test_case("HashMap<std::string::String, u32>", "std::string::String" ; "qualified key")]
fn parse_source___map_key___keeps_source_spelling(ty: &str, expected_key: &str) {
    let descriptor = field_type(ty);

    let TypeDescriptor::Map { key_name, .. } = &descriptor else {
        panic!("expected map, got {descriptor:?}");
    };
    assert_eq!(key_name, expected_key);
    assert_eq!(
        crate::classify::classify(&descriptor, true).unwrap(),
        format!("map<{expected_key}, uint32>")
    );
}

#[test]
fn parse_source___map_value___keeps_source_spelling() {
    let descriptor = field_type("HashMap<String, [u8; 4]>");

    let err = crate::classify::classify(&descriptor, true).unwrap_err();

    assert_eq!(err.to_string(), "unsupported map type: key:String value:[u8; 4]");
}

#[test_case("fn(u32) -> bool", "fn(u32) -> bool" ; "function")]
#[test_case("Box<dyn Fn()>", "dyn Fn()" ; "boxed closure")]
#[test_case("(u32, Vec<Vec<u8>>)", "(u32, Vec<Vec<u8>>)" ; "tuple")]
#[test_case("*const u8", "*const u8" ; "raw pointer")]
fn parse_source___unsupported___normalises_spacing(ty: &str, expected: &str) {
    let descriptor = field_type(ty);

    match descriptor.pointee() {
        TypeDescriptor::Unsupported(u) => assert_eq!(u.name, expected),
        other => panic!("expected unsupported, got {other:?}"),
    }
}

#[test]
fn parse_source___wrappers___map_to_pointer() {
    assert_eq!(
        field_type("Option<Box<u32>>"),
        TypeDescriptor::pointer(TypeDescriptor::pointer(TypeDescriptor::Uint32))
    );
    assert_eq!(
        field_type("&'static str"),
        TypeDescriptor::pointer(TypeDescriptor::String)
    );
    assert_eq!(
        field_type("Cow<'static, str>"),
        TypeDescriptor::pointer(TypeDescriptor::String)
    );
    assert_eq!(
        field_type("Arc<[u8]>"),
        TypeDescriptor::pointer(TypeDescriptor::sequence(TypeDescriptor::Uint8))
    );
}

#[test]
fn parse_source___custom_type___maps_to_struct() {
    assert_eq!(field_type("crate::models::Address"), TypeDescriptor::record("Address"));
}

#[test_case("Sender<u32>", UnsupportedKind::Channel)]
#[test_case("std::sync::mpsc::Receiver<u32>", UnsupportedKind::Channel)]
#[test_case("fn(u32) -> bool", UnsupportedKind::Function)]
#[test_case("Box<dyn Fn()>", UnsupportedKind::TraitObject)]
#[test_case("Complex64", UnsupportedKind::Complex)]
#[test_case("(u32, u32)", UnsupportedKind::Tuple)]
#[test_case("()", UnsupportedKind::Tuple)]
#[test_case("*const u8", UnsupportedKind::RawPointer)]
#[test_case("u128", UnsupportedKind::WideInteger)]
#[test_case("Vec", UnsupportedKind::Other)]
fn parse_source___unsupported___records_kind(ty: &str, kind: UnsupportedKind) {
    let descriptor = field_type(ty);

    match descriptor.pointee() {
        TypeDescriptor::Unsupported(u) => assert_eq!(u.kind, kind),
        other => panic!("expected unsupported, got {other:?}"),
    }
}

#[test]
fn parse_source___unsupported___keeps_source_text() {
    match field_type("Sender<u32>") {
        TypeDescriptor::Unsupported(u) => assert_eq!(u.name, "Sender<u32>"),
        other => panic!("expected unsupported, got {other:?}"),
    }
}

// ============================================================================
// Aliases and time-like types
// ============================================================================

#[test]
fn parse_source___alias___resolves_to_target() {
    let catalog = parse(
        r#"
        type Tags = Vec<Label>;
        type Label = String;
        pub struct Post { pub tags: Tags }
        "#,
    );

    assert_eq!(
        catalog.records()[0].fields[0].ty,
        TypeDescriptor::sequence(TypeDescriptor::String)
    );
}

#[test]
fn parse_source___cyclic_alias___becomes_unsupported() {
    let catalog = parse(
        r#"
        type A = B;
        type B = A;
        pub struct Loop { pub a: A }
        "#,
    );

    assert!(matches!(
        catalog.records()[0].fields[0].ty,
        TypeDescriptor::Unsupported(_)
    ));
}

#[test_case("SystemTime")]
#[test_case("chrono::DateTime<chrono::Utc>")]
#[test_case("NaiveDateTime")]
#[test_case("time::OffsetDateTime")]
#[test_case("prost_types::Timestamp")]
fn parse_source___known_time_types___time_like(ty: &str) {
    match field_type(ty) {
        TypeDescriptor::Struct(s) => assert!(s.time_like, "{ty} should be time-like"),
        other => panic!("expected struct, got {other:?}"),
    }
}

#[test]
fn parse_source___time_newtypes_and_aliases___time_like() {
    let catalog = parse(
        r#"
        pub struct LocalTime(DateTime<Utc>);
        pub struct Shifted(LocalTime);
        type Stamp = Shifted;
        pub struct Job {
            pub create_time: LocalTime,
            pub update_time: Option<Shifted>,
            pub stamp: Stamp,
            pub owner: Person,
        }
        "#,
    );
    let job = catalog.record("Job").unwrap();

    assert_eq!(job.fields[0].ty, TypeDescriptor::time("LocalTime"));
    assert_eq!(
        job.fields[1].ty,
        TypeDescriptor::pointer(TypeDescriptor::time("Shifted"))
    );
    assert_eq!(job.fields[2].ty, TypeDescriptor::time("Shifted"));
    assert_eq!(job.fields[3].ty, TypeDescriptor::record("Person"));
}

#[test]
fn parse_source___configured_time_types___time_like() {
    let options = ParseOptions {
        time_like: vec!["Epoch".to_string()],
    };

    let catalog =
        Catalog::parse_source("pub struct A { pub at: Epoch }", &options).unwrap();

    assert_eq!(catalog.records()[0].fields[0].ty, TypeDescriptor::time("Epoch"));
}
