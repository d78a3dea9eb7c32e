//! Error types for schema_assert
//!
//! Column mismatches found by a matcher are not errors; they are reported as
//! [`crate::matchers::Mismatch`] values. This enum covers everything around the
//! matchers: configuration, introspection and assertion helpers.

use thiserror::Error;

/// Result type for schema_assert operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for schema_assert
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    ConfigError(String),
    
    #[error("Database error: {0}")]
    DatabaseError(String),
    
    #[error("Schema analysis error: {0}")]
    SchemaAnalysisError(String),
    
    #[error("Assertion failed: {0}")]
    AssertionFailed(String),
    
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),
    
    #[error("Serialization error: {0}")]
    SerializationError(String),
    
    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// Convert Serde JSON errors to schema_assert errors
impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::SerializationError(error.to_string())
    }
}

/// Convert Serde YAML errors to schema_assert errors
impl From<serde_yaml::Error> for Error {
    fn from(error: serde_yaml::Error) -> Self {
        Error::SerializationError(error.to_string())
    }
}

/// Convert TOML deserialization errors to schema_assert errors
impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Self {
        Error::ConfigError(error.to_string())
    }
}
