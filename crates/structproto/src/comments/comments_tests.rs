#![allow(non_snake_case)]

use super::*;

#[test]
fn TypeComments___field___absent_returns_empty() {
    let comments = TypeComments::new("UserInfo").with_field("Id", "id field");

    assert_eq!(comments.field("Id"), "id field");
    assert_eq!(comments.field("Name"), "");
}

#[test]
fn StaticComments___known_type___returns_comments() {
    let source =
        StaticComments::new().with_type("User", TypeComments::new("UserInfo").with_field("Age", "user age"));

    let comments = source.comments("User").unwrap();

    assert_eq!(comments.message, "UserInfo");
    assert_eq!(comments.field("Age"), "user age");
}

#[test]
fn StaticComments___unknown_type___returns_not_found() {
    let source = StaticComments::new();

    let err = source.comments("Missing").unwrap_err();

    assert!(matches!(err, CommentError::NotFound(name) if name == "Missing"));
}

#[test]
fn NoComments___any_type___returns_empty() {
    let comments = NoComments.comments("Anything").unwrap();

    assert_eq!(comments, TypeComments::default());
}

#[test]
fn CommentSource___boxed_trait_object___delegates() {
    let source: Box<dyn CommentSource> =
        Box::new(StaticComments::new().with_type("Job", TypeComments::new("a job")));

    assert_eq!(source.comments("Job").unwrap().message, "a job");
}

#[test]
fn CommentError___timeout___displays_duration() {
    let err = CommentError::Timeout {
        type_name: "User".into(),
        timeout: Duration::from_millis(250),
    };

    assert_eq!(
        err.to_string(),
        "documentation command for User timed out after 250ms"
    );
}
