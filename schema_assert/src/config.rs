//! Configuration handling for schema_assert
//!
//! An expectation file names the schema to inspect and the column
//! expectations to check against it.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::matchers::{
    assert_matches, assert_not_matches, ColumnExpectation, ColumnOption, OptionValue,
};
use crate::schema::DatabaseSchema;

/// Load configuration from a TOML file
pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
    let config_str = fs::read_to_string(path.as_ref())
        .map_err(|e| Error::ConfigError(format!("Failed to read config file: {}", e)))?;

    from_str(&config_str)
}

/// Parse configuration from TOML text
pub fn from_str(config_str: &str) -> Result<Config> {
    let config: Config = toml::from_str(config_str)
        .map_err(|e| Error::ConfigError(format!("Failed to parse config file: {}", e)))?;

    config.validate()?;
    Ok(config)
}

/// Represents the complete schema_assert configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    pub database: Option<DatabaseConfig>,
    /// JSON or YAML schema dump used instead of a live database
    pub schema_file: Option<String>,
    pub logging: Option<LoggingConfig>,
    #[serde(default)]
    pub expectations: Vec<ExpectationConfig>,
}

/// Where the schema under test comes from
#[derive(Debug, Clone)]
pub enum SchemaSource {
    File(PathBuf),
    Database(DatabaseConfig),
}

/// Result of evaluating one configured expectation
#[derive(Debug)]
pub struct ExpectationOutcome<'a> {
    pub expectation: &'a ExpectationConfig,
    pub description: String,
    pub result: Result<()>,
}

impl ExpectationOutcome<'_> {
    pub fn passed(&self) -> bool {
        self.result.is_ok()
    }
}

impl Config {
    /// Pick the schema source: an explicit file, then an explicit URL, then
    /// the configured `schema_file`, then the configured `[database]`
    pub fn schema_source(
        &self,
        schema_path: Option<PathBuf>,
        database_url: Option<&str>,
    ) -> Result<SchemaSource> {
        match (schema_path, database_url) {
            (Some(path), _) => Ok(SchemaSource::File(path)),
            (None, Some(url)) => Ok(SchemaSource::Database(DatabaseConfig::from_url(url))),
            (None, None) => match (&self.schema_file, &self.database) {
                (Some(path), _) => Ok(SchemaSource::File(PathBuf::from(path))),
                (None, Some(database)) => Ok(SchemaSource::Database(database.clone())),
                (None, None) => Err(Error::ConfigError(
                    "No schema source: set schema_file or [database]".to_string(),
                )),
            },
        }
    }

    /// Evaluate every expectation against `schema`, in file order
    ///
    /// An expectation naming a table absent from the schema fails, negated
    /// or not.
    pub fn check(&self, schema: &DatabaseSchema) -> Vec<ExpectationOutcome<'_>> {
        self.expectations
            .iter()
            .map(|expectation| {
                let mut matcher = expectation.to_matcher();
                let description = matcher.description();

                let result = match schema.table(&expectation.table) {
                    None => {
                        tracing::warn!(table = %expectation.table, "Table not found in schema");
                        Err(Error::SchemaAnalysisError(format!(
                            "Table not found: {}",
                            expectation.table
                        )))
                    }
                    Some(table) if expectation.negate => assert_not_matches(table, &mut matcher),
                    Some(table) => assert_matches(table, &mut matcher),
                };

                ExpectationOutcome {
                    expectation,
                    description,
                    result,
                }
            })
            .collect()
    }

    fn validate(&self) -> Result<()> {
        for (index, expectation) in self.expectations.iter().enumerate() {
            if expectation.table.trim().is_empty() {
                return Err(Error::ConfigError(format!(
                    "Expectation #{} has no table",
                    index + 1
                )));
            }
        }

        Ok(())
    }
}

/// Database connection configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// `postgres`, `mysql` or `sqlite`; inferred from the URL when absent
    pub driver: Option<String>,
    pub url: String,
    pub pool_size: Option<u32>,
    pub timeout_seconds: Option<u64>,
    pub schema: Option<String>,
}

impl DatabaseConfig {
    /// Configuration with only a URL set
    pub fn from_url(url: &str) -> Self {
        Self {
            driver: None,
            url: url.to_string(),
            pool_size: None,
            timeout_seconds: None,
            schema: None,
        }
    }

    /// The configured driver, or the one the URL scheme names
    pub fn driver(&self) -> Result<String> {
        if let Some(driver) = &self.driver {
            return Ok(driver.to_lowercase());
        }

        let scheme = self.url.split(':').next().unwrap_or_default();
        match scheme {
            "postgres" | "postgresql" => Ok("postgres".to_string()),
            "mysql" | "mariadb" => Ok("mysql".to_string()),
            "sqlite" => Ok("sqlite".to_string()),
            _ => Err(Error::ConfigError(format!(
                "Cannot infer database driver from URL: {}",
                self.url
            ))),
        }
    }
}

/// Logging configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub stdout: bool,
}

fn default_log_format() -> String {
    "text".to_string()
}

/// One column expectation against one table
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ExpectationConfig {
    pub table: String,
    pub columns: Vec<String>,
    #[serde(default)]
    pub options: IndexMap<String, OptionValue>,
    /// Expect the columns *not* to match
    #[serde(default)]
    pub negate: bool,
}

impl ExpectationConfig {
    /// Build the matcher this entry describes
    pub fn to_matcher(&self) -> ColumnExpectation {
        ColumnExpectation::new(
            self.columns.iter().cloned(),
            self.options
                .iter()
                .map(|(key, value)| (ColumnOption::from(key.as_str()), value.clone())),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn infers_driver_from_url() {
        assert_eq!(DatabaseConfig::from_url("sqlite::memory:").driver().unwrap(), "sqlite");
        assert_eq!(
            DatabaseConfig::from_url("postgresql://localhost/app").driver().unwrap(),
            "postgres"
        );
        assert!(DatabaseConfig::from_url("oracle://db").driver().is_err());
    }

    #[test]
    fn rejects_expectation_without_table() {
        let result = from_str(
            r#"
            [[expectations]]
            table = ""
            columns = ["id"]
            "#,
        );

        assert!(matches!(result, Err(Error::ConfigError(_))));
    }
}
