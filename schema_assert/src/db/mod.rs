//! Database module for schema_assert
//!
//! This module handles database connections used for introspection.

pub mod connection;

// Re-export key types
pub use connection::DatabaseConnection;
