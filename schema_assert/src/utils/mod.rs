//! Utilities for schema_assert
//!
//! This module provides utility functions used across the library.

pub mod logging;
pub mod naming;

// Re-export key utility functions
pub use naming::{pluralize, table_name_for, to_sentence};
