//! schema_assert: declarative column assertions for database-backed models
//!
//! A [`ColumnExpectation`] states that a model or table exposes columns with
//! given attributes (type, nullability, default, precision, scale, limit,
//! primary-key flag, SQL type). Subjects are anything implementing
//! [`ColumnSource`]: a [`ModelSchema`] captured from a `#[derive(SchemaModel)]`
//! struct, or a [`Table`] read from a live database by the [`SchemaAnalyzer`].
//!
//! ```
//! use schema_assert::matchers::have_column;
//! use schema_assert::schema::{ColumnMetadata, Table};
//!
//! let users = Table::new("users").with_column(ColumnMetadata::new("age", "integer"));
//!
//! let mut matcher = have_column("age").of_type("integer").null_is(false);
//! assert!(matcher.matches(&users));
//! ```

// Lets the derive macro's `::schema_assert` paths resolve inside this crate too
extern crate self as schema_assert;

pub mod config;
pub mod db;
pub mod error;
pub mod matchers;
pub mod models;
pub mod schema;
pub mod utils;

// Re-export main types for easier access
pub use config::Config;
pub use db::connection::DatabaseConnection;
pub use error::{Error, Result};
pub use matchers::{
    assert_matches, assert_not_matches, have_column, have_column_with, have_columns,
    have_columns_with, ColumnExpectation, ColumnOption, Matcher, Mismatch, OptionValue,
};
pub use models::{ModelSchema, SchemaModel};
pub use schema::{ColumnMetadata, ColumnSource, DatabaseSchema, SchemaAnalyzer, Table};
pub use schema_assert_macros::SchemaModel;
