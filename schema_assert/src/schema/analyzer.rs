//! Database schema analyzer
//!
//! Reads column metadata from a live database so matchers can run against
//! real tables.

use async_trait::async_trait;
use indexmap::IndexMap;
use sqlx::{FromRow, MySql, Pool, Postgres, Sqlite};

use crate::db::connection::DatabaseConnection;
use crate::error::{Error, Result};
use crate::schema::types::{ColumnMetadata, DatabaseSchema, Table};

/// Schema analyzer trait
#[async_trait]
pub trait Analyzer {
    /// Names of all base tables in the schema
    async fn table_names(&self, schema_name: Option<&str>) -> Result<Vec<String>>;

    /// Column metadata of a single table, in declaration order
    async fn analyze_columns(
        &self,
        schema_name: Option<&str>,
        table_name: &str,
    ) -> Result<Vec<ColumnMetadata>>;
}

/// Schema analyzer for database schema introspection
pub struct SchemaAnalyzer {
    connection: DatabaseConnection,
    schema_name: Option<String>,
}

impl SchemaAnalyzer {
    /// Create a new schema analyzer
    pub fn new(connection: DatabaseConnection) -> Self {
        Self {
            connection,
            schema_name: None,
        }
    }

    /// Restrict analysis to a named schema (PostgreSQL schema or MySQL database)
    pub fn with_schema(mut self, schema_name: Option<String>) -> Self {
        self.schema_name = schema_name;
        self
    }

    fn analyzer(&self) -> Box<dyn Analyzer + Send + Sync + '_> {
        match &self.connection {
            DatabaseConnection::Postgres(pool) => Box::new(PostgresAnalyzer { pool }),
            DatabaseConnection::MySql(pool) => Box::new(MySqlAnalyzer { pool }),
            DatabaseConnection::Sqlite(pool) => Box::new(SqliteAnalyzer { pool }),
        }
    }

    /// Analyze every table of the current database schema
    pub async fn analyze(&self) -> Result<DatabaseSchema> {
        let analyzer = self.analyzer();
        let schema_name = self.schema_name.as_deref();
        let mut db_schema = DatabaseSchema::new(self.schema_name.clone());

        for table_name in analyzer.table_names(schema_name).await? {
            let columns = analyzer.analyze_columns(schema_name, &table_name).await?;
            tracing::debug!(table = %table_name, columns = columns.len(), "Analyzed table");

            db_schema.add_table(Table {
                name: table_name,
                columns,
            });
        }

        tracing::info!(
            driver = self.connection.driver(),
            tables = db_schema.tables.len(),
            "Analyzed database schema"
        );

        Ok(db_schema)
    }

    /// Analyze a single table
    pub async fn analyze_table(&self, table_name: &str) -> Result<Table> {
        let columns = self
            .analyzer()
            .analyze_columns(self.schema_name.as_deref(), table_name)
            .await?;

        if columns.is_empty() {
            return Err(Error::SchemaAnalysisError(format!(
                "Table not found: {}",
                table_name
            )));
        }

        Ok(Table {
            name: table_name.to_string(),
            columns,
        })
    }
}

#[derive(FromRow)]
struct TableRow {
    table_name: String,
}

/// PostgreSQL schema analyzer
struct PostgresAnalyzer<'a> {
    pool: &'a Pool<Postgres>,
}

#[derive(FromRow)]
struct PostgresColumnRow {
    column_name: String,
    sql_type: String,
    column_default: Option<String>,
    not_null: bool,
    is_primary: bool,
}

#[async_trait]
impl<'a> Analyzer for PostgresAnalyzer<'a> {
    async fn table_names(&self, schema_name: Option<&str>) -> Result<Vec<String>> {
        let sql = r#"
            SELECT table_name::text AS table_name
            FROM information_schema.tables
            WHERE table_schema = $1 AND table_type = 'BASE TABLE'
            ORDER BY table_name
        "#;

        let rows = sqlx::query_as::<_, TableRow>(sql)
            .bind(schema_name.unwrap_or("public"))
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(|row| row.table_name).collect())
    }

    async fn analyze_columns(
        &self,
        schema_name: Option<&str>,
        table_name: &str,
    ) -> Result<Vec<ColumnMetadata>> {
        let sql = r#"
            SELECT
                a.attname::text AS column_name,
                pg_catalog.format_type(a.atttypid, a.atttypmod) AS sql_type,
                pg_catalog.pg_get_expr(d.adbin, d.adrelid) AS column_default,
                a.attnotnull AS not_null,
                EXISTS (
                    SELECT 1
                    FROM pg_catalog.pg_index i
                    WHERE i.indrelid = a.attrelid
                      AND i.indisprimary
                      AND a.attnum = ANY (i.indkey)
                ) AS is_primary
            FROM pg_catalog.pg_attribute a
            JOIN pg_catalog.pg_class c ON c.oid = a.attrelid
            JOIN pg_catalog.pg_namespace n ON n.oid = c.relnamespace
            LEFT JOIN pg_catalog.pg_attrdef d
                ON d.adrelid = a.attrelid AND d.adnum = a.attnum
            WHERE n.nspname = $1
              AND c.relname = $2
              AND a.attnum > 0
              AND NOT a.attisdropped
            ORDER BY a.attnum
        "#;

        let rows = sqlx::query_as::<_, PostgresColumnRow>(sql)
            .bind(schema_name.unwrap_or("public"))
            .bind(table_name)
            .fetch_all(self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                ColumnMetadata::from_sql_type(
                    &row.column_name,
                    &row.sql_type,
                    row.column_default.as_deref(),
                    !row.not_null,
                )
                .primary(row.is_primary)
            })
            .collect())
    }
}

/// MySQL schema analyzer
struct MySqlAnalyzer<'a> {
    pool: &'a Pool<MySql>,
}

#[derive(FromRow)]
struct MySqlColumnRow {
    column_name: String,
    sql_type: String,
    column_default: Option<String>,
    is_nullable: String,
    column_key: String,
}

#[async_trait]
impl<'a> Analyzer for MySqlAnalyzer<'a> {
    async fn table_names(&self, schema_name: Option<&str>) -> Result<Vec<String>> {
        let sql = r#"
            SELECT CAST(table_name AS CHAR) AS table_name
            FROM information_schema.tables
            WHERE table_schema = COALESCE(?, DATABASE())
              AND table_type = 'BASE TABLE'
            ORDER BY table_name
        "#;

        let rows = sqlx::query_as::<_, TableRow>(sql)
            .bind(schema_name)
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(|row| row.table_name).collect())
    }

    async fn analyze_columns(
        &self,
        schema_name: Option<&str>,
        table_name: &str,
    ) -> Result<Vec<ColumnMetadata>> {
        let sql = r#"
            SELECT
                CAST(column_name AS CHAR) AS column_name,
                CAST(column_type AS CHAR) AS sql_type,
                CAST(column_default AS CHAR) AS column_default,
                CAST(is_nullable AS CHAR) AS is_nullable,
                CAST(column_key AS CHAR) AS column_key
            FROM information_schema.columns
            WHERE table_schema = COALESCE(?, DATABASE()) AND table_name = ?
            ORDER BY ordinal_position
        "#;

        let rows = sqlx::query_as::<_, MySqlColumnRow>(sql)
            .bind(schema_name)
            .bind(table_name)
            .fetch_all(self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                ColumnMetadata::from_sql_type(
                    &row.column_name,
                    &row.sql_type,
                    row.column_default.as_deref(),
                    row.is_nullable == "YES",
                )
                .primary(row.column_key == "PRI")
            })
            .collect())
    }
}

/// SQLite schema analyzer
struct SqliteAnalyzer<'a> {
    pool: &'a Pool<Sqlite>,
}

#[derive(FromRow)]
struct SqliteColumnRow {
    column_name: String,
    sql_type: String,
    column_default: Option<String>,
    not_null: i64,
    primary_index: i64,
}

#[async_trait]
impl<'a> Analyzer for SqliteAnalyzer<'a> {
    async fn table_names(&self, _schema_name: Option<&str>) -> Result<Vec<String>> {
        let sql = r#"
            SELECT name AS table_name
            FROM sqlite_master
            WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
            ORDER BY name
        "#;

        let rows = sqlx::query_as::<_, TableRow>(sql)
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(|row| row.table_name).collect())
    }

    async fn analyze_columns(
        &self,
        _schema_name: Option<&str>,
        table_name: &str,
    ) -> Result<Vec<ColumnMetadata>> {
        let sql = r#"
            SELECT
                name AS column_name,
                type AS sql_type,
                dflt_value AS column_default,
                "notnull" AS not_null,
                pk AS primary_index
            FROM pragma_table_info(?1)
            ORDER BY cid
        "#;

        let rows = sqlx::query_as::<_, SqliteColumnRow>(sql)
            .bind(table_name)
            .fetch_all(self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                ColumnMetadata::from_sql_type(
                    &row.column_name,
                    &row.sql_type,
                    row.column_default.as_deref(),
                    row.not_null == 0,
                )
                .primary(row.primary_index > 0)
            })
            .collect())
    }
}
