use std::fs;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use tempfile::tempdir;

use schema_assert::config::{self, SchemaSource};
use schema_assert::matchers::{have_column, ColumnOption, OptionValue};
use schema_assert::schema::{ColumnMetadata, DatabaseSchema, Table};
use schema_assert::Error;

const EXPECTATIONS: &str = r#"
schema_file = "schema.json"

[logging]
level = "debug"
stdout = false

[[expectations]]
table = "users"
columns = ["age"]
options = { type = "integer", null = false, precision = 10.0 }

[[expectations]]
table = "users"
columns = ["id", "email"]
negate = true
options = { collation = "C" }
"#;

#[test]
fn loads_expectations_from_toml() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("expectations.toml");
    fs::write(&path, EXPECTATIONS).unwrap();

    let config = config::load_from_file(&path).unwrap();

    assert_eq!(config.schema_file.as_deref(), Some("schema.json"));
    assert_eq!(config.logging.as_ref().map(|l| l.format.as_str()), Some("text"));
    assert_eq!(config.expectations.len(), 2);
    assert!(config.expectations[1].negate);
}

#[test]
fn configured_matcher_equals_fluent_matcher() {
    let config = config::from_str(EXPECTATIONS).unwrap();
    let from_file = config.expectations[0].to_matcher();

    let fluent = have_column("age").of_type("integer").null_is(false).precision(10.0);

    assert_eq!(from_file, fluent);
    assert_eq!(from_file.options()[&ColumnOption::Precision], OptionValue::Float(10.0));
}

#[test]
fn unknown_option_names_fail_at_evaluation() {
    let config = config::from_str(EXPECTATIONS).unwrap();
    let mut matcher = config.expectations[1].to_matcher();
    let users = Table::new("users")
        .with_column(ColumnMetadata::new("id", "integer"))
        .with_column(ColumnMetadata::new("email", "string"));

    assert_eq!(
        matcher.options().keys().next(),
        Some(&ColumnOption::Unrecognized("collation".to_string()))
    );
    assert!(!matcher.matches(&users));
    assert_eq!(
        matcher.missing_reason(),
        "id column on table for users does not match option collation, found '' but expected 'C'"
    );
}

#[test]
fn schema_dump_round_trips_through_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("schema.json");

    let mut schema = DatabaseSchema::new(None);
    schema.add_table(Table::new("users").with_column(ColumnMetadata::from_sql_type(
        "email",
        "varchar(120)",
        None,
        true,
    )));
    fs::write(&path, serde_json::to_string(&schema).unwrap()).unwrap();

    let loaded = DatabaseSchema::load_from_file(&path).unwrap();
    let users = loaded.table("users").unwrap();

    assert!(have_column("email").of_type("string").limit(120).null().matches(users));
}

#[test]
fn missing_config_file_is_a_config_error() {
    let result = config::load_from_file("/nonexistent/expectations.toml");
    assert!(matches!(result, Err(schema_assert::Error::ConfigError(_))));
}

const MIXED_EXPECTATIONS: &str = r#"
[[expectations]]
table = "users"
columns = ["email"]
options = { type = "string", limit = 255 }

[[expectations]]
table = "users"
columns = ["email"]
options = { type = "integer" }

[[expectations]]
table = "users"
columns = ["nickname"]
negate = true

[[expectations]]
table = "usres"
columns = ["id"]

[[expectations]]
table = "usres"
columns = ["nickname"]
negate = true
"#;

fn users_schema() -> DatabaseSchema {
    let mut schema = DatabaseSchema::new(None);
    schema.add_table(
        Table::new("users")
            .with_column(ColumnMetadata::new("id", "integer").primary(true))
            .with_column(ColumnMetadata::from_sql_type("email", "varchar(255)", None, false)),
    );
    schema
}

#[test]
fn check_reports_one_outcome_per_expectation() {
    let config = config::from_str(MIXED_EXPECTATIONS).unwrap();
    let schema = users_schema();

    let outcomes = config.check(&schema);
    let passed: Vec<bool> = outcomes.iter().map(|outcome| outcome.passed()).collect();

    assert_eq!(passed, vec![true, false, true, false, false]);
    assert_eq!(
        outcomes[0].description,
        r#"have column named email with options {type: "string", limit: 255}"#
    );
    match &outcomes[1].result {
        Err(Error::AssertionFailed(message)) => assert!(message.contains("found 'string' but expected 'integer'")),
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[test]
fn missing_table_fails_even_when_negated() {
    let config = config::from_str(MIXED_EXPECTATIONS).unwrap();
    let schema = users_schema();

    let outcomes = config.check(&schema);

    for outcome in &outcomes[3..] {
        assert_eq!(outcome.expectation.table, "usres");
        match &outcome.result {
            Err(Error::SchemaAnalysisError(message)) => assert_eq!(message, "Table not found: usres"),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
    assert!(outcomes[4].expectation.negate);
}

#[test]
fn schema_source_prefers_command_line_over_config() {
    let config = config::from_str(
        r#"
schema_file = "schema.json"

[database]
url = "sqlite::memory:"
"#,
    )
    .unwrap();

    match config.schema_source(Some(PathBuf::from("dump.yaml")), Some("postgres://localhost/app")) {
        Ok(SchemaSource::File(path)) => assert_eq!(path, PathBuf::from("dump.yaml")),
        other => panic!("unexpected source: {:?}", other),
    }
    match config.schema_source(None, Some("postgres://localhost/app")) {
        Ok(SchemaSource::Database(database)) => assert_eq!(database.url, "postgres://localhost/app"),
        other => panic!("unexpected source: {:?}", other),
    }
    match config.schema_source(None, None) {
        Ok(SchemaSource::File(path)) => assert_eq!(path, PathBuf::from("schema.json")),
        other => panic!("unexpected source: {:?}", other),
    }
}

#[test]
fn schema_source_falls_back_to_database_section() {
    let with_database = config::from_str("[database]\nurl = \"sqlite::memory:\"\n").unwrap();
    match with_database.schema_source(None, None) {
        Ok(SchemaSource::Database(database)) => assert_eq!(database.url, "sqlite::memory:"),
        other => panic!("unexpected source: {:?}", other),
    }

    let empty = config::from_str("").unwrap();
    assert!(matches!(empty.schema_source(None, None), Err(Error::ConfigError(_))));
}
