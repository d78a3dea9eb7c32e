//! Models exposing their columns to matchers
//!
//! Usually implemented through `#[derive(SchemaModel)]`.

use crate::schema::types::{ColumnMetadata, ColumnSource};

/// A model that declares the columns backing it
pub trait SchemaModel {
    /// Name of the model, e.g. `User`
    fn model_name() -> &'static str;

    /// Name of the table the model is stored in
    fn table_name() -> String;

    /// Column metadata for every persisted field
    fn column_definitions() -> Vec<ColumnMetadata>;
}

/// A captured model schema, usable as a matcher subject
///
/// Messages refer to the model name rather than the table name.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSchema {
    pub model_name: String,
    pub table_name: String,
    pub columns: Vec<ColumnMetadata>,
}

impl ModelSchema {
    /// Capture the schema of `M`
    pub fn of<M: SchemaModel>() -> Self {
        Self {
            model_name: M::model_name().to_string(),
            table_name: M::table_name(),
            columns: M::column_definitions(),
        }
    }
}

impl ColumnSource for ModelSchema {
    fn source_name(&self) -> &str {
        &self.model_name
    }

    fn columns(&self) -> &[ColumnMetadata] {
        &self.columns
    }
}

/// Infer column metadata from a Rust field type
///
/// `Option<T>` makes the column nullable; unknown types map to a `string`
/// column typed after the Rust type name.
pub fn column_for_rust_type(name: &str, rust_type: &str) -> ColumnMetadata {
    let compact: String = rust_type.chars().filter(|c| !c.is_whitespace()).collect();

    let (inner, nullable) = match compact
        .strip_prefix("Option<")
        .and_then(|rest| rest.strip_suffix('>'))
    {
        Some(inner) => (inner.to_string(), true),
        None => (compact.clone(), false),
    };

    let path = inner.split('<').next().unwrap_or_default();
    let last_segment = path.rsplit("::").next().unwrap_or(path);

    let column = match last_segment {
        "String" | "&str" | "str" => ColumnMetadata::new(name, "string")
            .sql_type("varchar(255)")
            .limit(255),
        "i8" | "i16" | "u8" => ColumnMetadata::new(name, "integer").sql_type("smallint"),
        "i32" | "u16" => ColumnMetadata::new(name, "integer").sql_type("integer"),
        "i64" | "u32" | "u64" | "isize" | "usize" => {
            ColumnMetadata::new(name, "integer").sql_type("bigint")
        }
        "f32" => ColumnMetadata::new(name, "float").sql_type("real"),
        "f64" => ColumnMetadata::new(name, "float").sql_type("double precision"),
        "bool" => ColumnMetadata::new(name, "boolean").sql_type("boolean"),
        "Vec" if inner.ends_with("<u8>") => ColumnMetadata::new(name, "binary").sql_type("bytea"),
        "DateTime" | "NaiveDateTime" => {
            ColumnMetadata::new(name, "datetime").sql_type("timestamp")
        }
        "NaiveDate" => ColumnMetadata::new(name, "date").sql_type("date"),
        "NaiveTime" => ColumnMetadata::new(name, "time").sql_type("time"),
        "Uuid" => ColumnMetadata::new(name, "uuid").sql_type("uuid"),
        "Decimal" | "BigDecimal" => ColumnMetadata::new(name, "decimal")
            .sql_type("numeric(20,6)")
            .precision(20)
            .scale(6),
        "Json" | "Value" => {
            ColumnMetadata::new(name, "json").sql_type("jsonb")
        }
        _ => ColumnMetadata::new(name, "string").sql_type(&inner),
    };

    column.nullable(nullable)
}
