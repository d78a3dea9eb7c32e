//! Type definitions for schema metadata matchers run against

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::matchers::ColumnOption;
use crate::schema::sql_type;

/// Anything that exposes column metadata by name
pub trait ColumnSource {
    /// Name used in messages, e.g. a model or table name
    fn source_name(&self) -> &str;

    /// All columns, in declaration order
    fn columns(&self) -> &[ColumnMetadata];

    /// Look up a column by its exact name
    fn column(&self, name: &str) -> Option<&ColumnMetadata> {
        self.columns().iter().find(|column| column.name == name)
    }
}

/// Read-only description of a single column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMetadata {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: String,
    #[serde(default)]
    pub sql_type: String,
    #[serde(default, alias = "nullable")]
    pub null: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<u32>,
    #[serde(default)]
    pub primary: bool,
}

impl ColumnMetadata {
    /// Create a new NOT NULL column with the given name and type
    pub fn new(name: &str, column_type: &str) -> Self {
        Self {
            name: name.to_string(),
            column_type: column_type.to_string(),
            sql_type: column_type.to_string(),
            null: false,
            default: None,
            limit: None,
            precision: None,
            scale: None,
            primary: false,
        }
    }

    /// Build a column from its raw SQL type, deriving the simplified type,
    /// limit, precision and scale
    pub fn from_sql_type(name: &str, raw_sql_type: &str, default: Option<&str>, null: bool) -> Self {
        Self {
            name: name.to_string(),
            column_type: sql_type::simplified_type(raw_sql_type),
            sql_type: raw_sql_type.to_string(),
            null,
            default: default.and_then(sql_type::normalize_default),
            limit: sql_type::extract_limit(raw_sql_type),
            precision: sql_type::extract_precision(raw_sql_type),
            scale: sql_type::extract_scale(raw_sql_type),
            primary: false,
        }
    }

    /// Set whether the column is nullable
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.null = nullable;
        self
    }

    /// Set a default value for the column
    pub fn default(mut self, default: &str) -> Self {
        self.default = Some(default.to_string());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn precision(mut self, precision: u32) -> Self {
        self.precision = Some(precision);
        self
    }

    pub fn scale(mut self, scale: u32) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn primary(mut self, primary: bool) -> Self {
        self.primary = primary;
        self
    }

    pub fn sql_type(mut self, sql_type: &str) -> Self {
        self.sql_type = sql_type.to_string();
        self
    }

    /// Canonical string rendering of an attribute
    ///
    /// Unset optional attributes render as an empty string. Unrecognized
    /// options have no attribute to read and yield `None`.
    pub fn attribute(&self, option: &ColumnOption) -> Option<String> {
        let rendered = match option {
            ColumnOption::Type => self.column_type.clone(),
            ColumnOption::Primary => self.primary.to_string(),
            ColumnOption::Default => self.default.clone().unwrap_or_default(),
            ColumnOption::Precision => render_size(self.precision),
            ColumnOption::Limit => render_size(self.limit),
            ColumnOption::Null => self.null.to_string(),
            ColumnOption::Scale => render_size(self.scale),
            ColumnOption::SqlType => self.sql_type.clone(),
            ColumnOption::Unrecognized(_) => return None,
        };
        Some(rendered)
    }
}

fn render_size(size: Option<u32>) -> String {
    size.map(|value| value.to_string()).unwrap_or_default()
}

/// Represents a database table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<ColumnMetadata>,
}

impl Table {
    /// Create a new table with the given name
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            columns: Vec::new(),
        }
    }

    /// Add a column to the table
    pub fn add_column(&mut self, column: ColumnMetadata) {
        self.columns.push(column);
    }

    /// Builder form of [`Table::add_column`]
    pub fn with_column(mut self, column: ColumnMetadata) -> Self {
        self.add_column(column);
        self
    }
}

impl ColumnSource for Table {
    fn source_name(&self) -> &str {
        &self.name
    }

    fn columns(&self) -> &[ColumnMetadata] {
        &self.columns
    }
}

/// Represents a complete database schema
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseSchema {
    #[serde(default)]
    pub tables: IndexMap<String, Table>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_name: Option<String>,
}

impl DatabaseSchema {
    /// Create a new empty database schema
    pub fn new(schema_name: Option<String>) -> Self {
        Self {
            tables: IndexMap::new(),
            schema_name,
        }
    }

    /// Load a schema dump, YAML for `.yaml`/`.yml` files and JSON otherwise
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            Error::ConfigError(format!("Failed to read schema file {}: {}", path.display(), e))
        })?;

        let is_yaml = matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("yaml") | Some("yml")
        );

        let schema = if is_yaml {
            serde_yaml::from_str(&contents)?
        } else {
            serde_json::from_str(&contents)?
        };

        Ok(schema)
    }

    /// Add a table to the schema
    pub fn add_table(&mut self, table: Table) {
        self.tables.insert(table.name.clone(), table);
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }
}
