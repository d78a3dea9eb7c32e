//! Models module for schema_assert
//!
//! This module turns Rust model structs into matcher subjects.

pub mod model;

// Re-export key types
pub use model::{column_for_rust_type, ModelSchema, SchemaModel};
