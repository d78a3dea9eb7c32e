use pretty_assertions::assert_eq;
use rstest::*;

use schema_assert::matchers::{
    assert_matches, assert_not_matches, have_column, have_column_with, have_columns,
    have_columns_with, ColumnOption, Matcher, Mismatch, OptionValue,
};
use schema_assert::schema::{ColumnMetadata, Table};
use schema_assert::Error;

#[fixture]
fn users() -> Table {
    Table::new("users")
        .with_column(ColumnMetadata::new("id", "integer").primary(true).sql_type("bigint"))
        .with_column(
            ColumnMetadata::new("email", "string")
                .sql_type("varchar(255)")
                .limit(255),
        )
        .with_column(ColumnMetadata::new("age", "integer").nullable(true))
        .with_column(
            ColumnMetadata::new("balance", "decimal")
                .sql_type("numeric(10,2)")
                .precision(10)
                .scale(2)
                .default("0.0"),
        )
}

#[rstest]
fn matches_column_with_matching_options(users: Table) {
    let mut matcher = have_column_with(
        "email",
        [
            ("type", OptionValue::from("string")),
            ("limit", OptionValue::from(255)),
            ("null", OptionValue::from(false)),
        ],
    );

    assert!(matcher.matches(&users));
    assert_eq!(matcher.mismatch(), None);
}

#[rstest]
fn reports_missing_column(users: Table) {
    let mut matcher = have_column("nickname");

    assert!(!matcher.matches(&users));
    assert!(matcher.failure_message().contains("does not have column"));
    assert_eq!(
        matcher.failure_message(),
        "Expected users to have a column named nickname (users does not have column nickname)"
    );
}

#[rstest]
fn reports_option_mismatch(users: Table) {
    let mut matcher = have_column("email").of_type("integer");

    assert!(!matcher.matches(&users));

    let message = matcher.failure_message();
    assert!(message.contains("does not match option"));
    assert!(message.contains("found 'string'"));
    assert!(message.contains("expected 'integer'"));
    assert_eq!(
        matcher.missing_reason(),
        "email column on table for users does not match option type, found 'string' but expected 'integer'"
    );
}

#[rstest]
fn compares_values_through_their_string_rendering(users: Table) {
    let mut numeric = have_column("balance").precision(10).scale(2);
    let mut textual = have_column("balance").precision("10").scale("2");

    assert!(numeric.matches(&users));
    assert!(textual.matches(&users));
}

#[rstest]
fn unset_attributes_compare_as_empty(users: Table) {
    let mut matcher = have_column("age").default(None::<&str>).limit("");

    assert!(matcher.matches(&users));
}

#[rstest]
fn multi_column_check_stops_at_first_failure(users: Table) {
    let mut matcher = have_columns(["id", "nickname", "handle"]);

    assert!(!matcher.matches(&users));
    assert_eq!(
        matcher.mismatch(),
        Some(&Mismatch::MissingColumn {
            subject: "users".to_string(),
            column: "nickname".to_string(),
        })
    );
    assert_eq!(
        matcher.failure_message(),
        "Expected users to have columns id, nickname and handle (users does not have column nickname)"
    );
}

#[rstest]
fn option_failure_stops_before_later_columns(users: Table) {
    let mut matcher = have_columns_with(["id", "age", "missing"], [("null", true)]);

    assert!(!matcher.matches(&users));
    assert_eq!(matcher.mismatch().map(Mismatch::column), Some("id"));
}

#[rstest]
fn options_are_checked_in_insertion_order(users: Table) {
    let mut matcher = have_column("id").null().of_type("string");

    assert!(!matcher.matches(&users));
    match matcher.mismatch() {
        Some(Mismatch::OptionMismatch { option, .. }) => assert_eq!(option, &ColumnOption::Null),
        other => panic!("unexpected mismatch: {:?}", other),
    }
}

#[test]
fn chaining_order_does_not_change_options() {
    let forward = have_column("age").of_type("integer").null_is(false);
    let backward = have_column("age").null_is(false).of_type("integer");

    for matcher in [&forward, &backward] {
        assert_eq!(matcher.options().len(), 2);
        assert_eq!(matcher.options()[&ColumnOption::Type], OptionValue::from("integer"));
        assert_eq!(matcher.options()[&ColumnOption::Null], OptionValue::from(false));
    }
}

#[test]
fn flag_setters_default_to_true() {
    assert_eq!(have_column("id").primary(), have_column("id").primary_is(true));
    assert_eq!(have_column("age").null(), have_column("age").null_is(true));
}

#[rstest]
#[case(have_column("id"), "have column named id")]
#[case(have_columns(["id", "email"]), "have columns id and email")]
#[case(
    have_column("id").of_type("integer").primary(),
    r#"have column named id with options {type: "integer", primary: true}"#
)]
#[case(
    have_columns(["a", "b", "c"]).limit(20).default(None::<&str>),
    "have columns a, b and c with options {limit: 20, default: null}"
)]
fn describes_expectation(#[case] matcher: schema_assert::ColumnExpectation, #[case] expected: &str) {
    assert_eq!(matcher.description(), expected);
}

#[rstest]
fn evaluation_is_idempotent(users: Table) {
    let mut matcher = have_column("age").of_type("string");

    let first = (matcher.matches(&users), matcher.missing_reason());
    let second = (matcher.matches(&users), matcher.missing_reason());

    assert_eq!(first, second);
    assert!(!first.0);
}

#[rstest]
fn rebinding_subject_overwrites_reason(users: Table) {
    let orders = Table::new("orders").with_column(ColumnMetadata::new("id", "integer"));
    let mut matcher = have_column("email");

    assert!(matcher.matches(&users));
    assert!(!matcher.matches(&orders));
    assert_eq!(matcher.missing_reason(), "orders does not have column email");
    assert_eq!(matcher.negative_failure_message(), "Did not expect orders to have a column named email");
}

#[test]
fn zero_columns_match_trivially() {
    let mut matcher = have_columns(Vec::<String>::new()).of_type("integer");

    assert!(matcher.matches(&Table::new("empty")));
}

#[rstest]
fn assertion_helpers_surface_messages(users: Table) {
    assert!(assert_matches(&users, &mut have_column("id").primary()).is_ok());

    match assert_matches(&users, &mut have_column("id").null()) {
        Err(Error::AssertionFailed(message)) => assert!(message.starts_with("Expected users")),
        other => panic!("unexpected outcome: {:?}", other),
    }

    match assert_not_matches(&users, &mut have_column("email")) {
        Err(Error::AssertionFailed(message)) => {
            assert_eq!(message, "Did not expect users to have a column named email")
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[rstest]
fn works_through_matcher_trait_objects(users: Table) {
    let mut matchers: Vec<Box<dyn Matcher<Table>>> = vec![
        Box::new(have_column("id").primary()),
        Box::new(have_column("email").sql_type("varchar(255)")),
    ];

    for matcher in matchers.iter_mut() {
        assert!(matcher.matches(&users), "{}", matcher.failure_message());
    }
}
