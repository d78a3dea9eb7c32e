//! Schema module for schema_assert
//!
//! This module holds the column metadata matchers evaluate, and the
//! introspection that reads it from a live database.

pub mod analyzer;
pub mod sql_type;
pub mod types;

// Re-export key types
pub use analyzer::SchemaAnalyzer;
pub use types::{ColumnMetadata, ColumnSource, DatabaseSchema, Table};
