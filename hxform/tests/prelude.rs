//! Smoke tests for the facade crate's re-exports.

use hxform::prelude::*;

#[derive(Debug, serde::Deserialize)]
struct Signup {
    email: String,
    age: i64,
}

fn signup_schema() -> ModelSchema {
    ModelSchema::builder("Signup")
        .field(FieldSchema::new("email", TypeExpr::Str).pattern(r"^[^@]+@[^@]+$"))
        .field(FieldSchema::new("age", TypeExpr::Int).ge(13.0))
        .build()
        .unwrap()
}

#[test]
fn test_prelude_pipeline() {
    let generator = FormGenerator::with_settings(signup_schema(), Settings::default());
    let html = generator.generate_full_html(&PageOptions::default());
    assert!(html.contains(r#"<form id="signup-form""#));

    let data = hxform::forms::parse_urlencoded("email=a%40b.io&age=21");
    let signup: Signup = generator.converter().parse_into(&data).unwrap();
    assert_eq!(signup.email, "a@b.io");
    assert_eq!(signup.age, 21);
}

#[test]
fn test_prelude_errors() {
    let generator = FormGenerator::new(signup_schema());
    let data = hxform::forms::parse_urlencoded("email=nope&age=5");
    let result: FormsResult<Signup> = generator.converter().parse_into(&data);
    match result {
        Err(FormsError::Validation(errors)) => assert_eq!(errors.len(), 2),
        other => panic!("expected validation errors, got {other:?}"),
    }
}

#[cfg(feature = "cli")]
#[test]
fn test_cli_reexport() {
    let mut registry = hxform::cli::CommandRegistry::new();
    hxform::cli::register_builtin_commands(&mut registry);
    assert_eq!(registry.list_commands(), ["check", "fields", "render", "validate"]);
}
