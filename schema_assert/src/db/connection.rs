//! Database connection handling
//!
//! Pools used to read column metadata from a live database.

use std::time::Duration;

use sqlx::{
    mysql::MySqlPoolOptions, postgres::PgPoolOptions, sqlite::SqlitePoolOptions, MySql, Pool,
    Postgres, Sqlite,
};

use crate::config::DatabaseConfig;
use crate::error::{Error, Result};

/// Enumeration of supported database types
#[derive(Debug, Clone)]
pub enum DatabaseConnection {
    Postgres(Pool<Postgres>),
    MySql(Pool<MySql>),
    Sqlite(Pool<Sqlite>),
}

impl DatabaseConnection {
    /// Create a new database connection from configuration
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let pool_size = config.pool_size.unwrap_or(5);
        let timeout = Duration::from_secs(config.timeout_seconds.unwrap_or(30));
        let driver = config.driver()?;

        tracing::debug!(driver = %driver, pool_size, "Connecting to database");

        match driver.as_str() {
            "postgres" => {
                let pool = PgPoolOptions::new()
                    .max_connections(pool_size)
                    .acquire_timeout(timeout)
                    .connect(&config.url)
                    .await?;

                Ok(DatabaseConnection::Postgres(pool))
            }
            "mysql" => {
                let pool = MySqlPoolOptions::new()
                    .max_connections(pool_size)
                    .acquire_timeout(timeout)
                    .connect(&config.url)
                    .await?;

                Ok(DatabaseConnection::MySql(pool))
            }
            "sqlite" => {
                // Every connection to an in-memory database sees its own
                // database, so those pools hold exactly one connection forever.
                let in_memory = config.url.contains(":memory:");
                let mut options = SqlitePoolOptions::new()
                    .max_connections(if in_memory { 1 } else { pool_size })
                    .acquire_timeout(timeout);
                if in_memory {
                    options = options.idle_timeout(None).max_lifetime(None);
                }

                let pool = options.connect(&config.url).await?;

                Ok(DatabaseConnection::Sqlite(pool))
            }
            other => Err(Error::DatabaseError(format!(
                "Unsupported database driver: {}",
                other
            ))),
        }
    }

    /// Connect with default pool settings, inferring the driver from the URL
    pub async fn connect_url(url: &str) -> Result<Self> {
        Self::connect(&DatabaseConfig::from_url(url)).await
    }

    /// Name of the driver behind this connection
    pub fn driver(&self) -> &'static str {
        match self {
            DatabaseConnection::Postgres(_) => "postgres",
            DatabaseConnection::MySql(_) => "mysql",
            DatabaseConnection::Sqlite(_) => "sqlite",
        }
    }

    /// Execute a SQL statement
    pub async fn execute(&self, sql: &str) -> Result<()> {
        match self {
            DatabaseConnection::Postgres(pool) => {
                sqlx::query(sql).execute(pool).await?;
            }
            DatabaseConnection::MySql(pool) => {
                sqlx::query(sql).execute(pool).await?;
            }
            DatabaseConnection::Sqlite(pool) => {
                sqlx::query(sql).execute(pool).await?;
            }
        }

        Ok(())
    }
}
