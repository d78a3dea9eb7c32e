use pretty_assertions::assert_eq;

use schema_assert::matchers::{have_column, have_columns};
use schema_assert::{ModelSchema, SchemaModel};

#[allow(dead_code)]
#[derive(SchemaModel)]
struct User {
    #[column(primary)]
    id: i64,
    #[column(limit = 100)]
    email: String,
    age: Option<i32>,
    #[column(sql_type = "numeric(10,2)", default = 0)]
    balance: f64,
    #[column(name = "is_admin", default = false)]
    admin: bool,
    #[column(skip)]
    session_token: String,
}

#[allow(dead_code)]
#[derive(SchemaModel)]
#[schema_model(table = "people")]
struct Person {
    #[column(type = "uuid", sql_type = "char(36)", null = false)]
    id: String,
    #[column(null)]
    nickname: String,
}

#[test]
fn derives_model_and_table_names() {
    assert_eq!(User::model_name(), "User");
    assert_eq!(User::table_name(), "users");
    assert_eq!(Person::table_name(), "people");
}

#[test]
fn derives_columns_in_field_order() {
    let names: Vec<String> = User::column_definitions()
        .into_iter()
        .map(|column| column.name)
        .collect();

    assert_eq!(names, vec!["id", "email", "age", "balance", "is_admin"]);
}

#[test]
fn model_subject_matches_declared_attributes() {
    let user = ModelSchema::of::<User>();

    let mut id = have_column("id").of_type("integer").sql_type("bigint").primary();
    assert!(id.matches(&user), "{}", id.failure_message());

    let mut email = have_column("email").of_type("string").limit(100).null_is(false);
    assert!(email.matches(&user), "{}", email.failure_message());

    let mut age = have_column("age").of_type("integer").null();
    assert!(age.matches(&user), "{}", age.failure_message());

    let mut balance = have_column("balance")
        .of_type("decimal")
        .precision(10)
        .scale(2)
        .default(0);
    assert!(balance.matches(&user), "{}", balance.failure_message());

    let mut admin = have_column("is_admin").of_type("boolean").default(false);
    assert!(admin.matches(&user), "{}", admin.failure_message());
}

#[test]
fn messages_name_the_model() {
    let user = ModelSchema::of::<User>();
    let mut matcher = have_columns(["email", "session_token"]);

    assert!(!matcher.matches(&user));
    assert_eq!(
        matcher.failure_message(),
        "Expected User to have columns email and session_token (User does not have column session_token)"
    );
}

#[test]
fn explicit_type_overrides_sql_type_derivation() {
    let person = ModelSchema::of::<Person>();

    let mut id = have_column("id").of_type("uuid").sql_type("char(36)").limit(36).null_is(false);
    assert!(id.matches(&person), "{}", id.failure_message());

    let mut nickname = have_column("nickname").null();
    assert!(nickname.matches(&person), "{}", nickname.failure_message());
}
