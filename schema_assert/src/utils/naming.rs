//! Naming utilities for schema_assert
//!
//! Helpers that turn identifiers into the phrasing used in matcher messages,
//! and model names into table names.

use inflector::Inflector;

/// Join words into an English list: `a`, `a and b`, `a, b and c`
pub fn to_sentence<S: AsRef<str>>(words: &[S]) -> String {
    match words {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [init @ .., last] => {
            let head: Vec<&str> = init.iter().map(AsRef::as_ref).collect();
            format!("{} and {}", head.join(", "), last.as_ref())
        }
    }
}

/// Convert a singular name to plural
pub fn pluralize(name: &str) -> String {
    // Inflector pluralizes "person" as "persons"
    if name.eq_ignore_ascii_case("person") {
        return "people".to_string();
    }
    name.to_plural()
}

/// Conventional table name for a model: snake_case, pluralized on the last word
pub fn table_name_for(model_name: &str) -> String {
    let snake = model_name.to_snake_case();

    match snake.rsplit_once('_') {
        Some((prefix, last)) => format!("{}_{}", prefix, pluralize(last)),
        None => pluralize(&snake),
    }
}
