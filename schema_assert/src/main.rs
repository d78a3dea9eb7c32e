use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};

use schema_assert::config::{self, DatabaseConfig, LoggingConfig, SchemaSource};
use schema_assert::utils::logging::init_logging;
use schema_assert::{DatabaseConnection, DatabaseSchema, SchemaAnalyzer};

/// Check database columns against declared expectations
#[derive(Parser, Debug)]
#[command(name = "schema_assert", version, about)]
struct Cli {
    /// Log level when the configuration has no [logging] section
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate every expectation of a configuration file
    Check {
        /// TOML file with [[expectations]]
        #[arg(short, long)]
        config: PathBuf,

        /// JSON or YAML schema dump, overriding the configured source
        #[arg(short, long)]
        schema: Option<PathBuf>,

        /// Database to introspect, overriding the configured source
        #[arg(long)]
        database_url: Option<String>,
    },
    /// Print the column metadata of a live database
    Dump {
        #[arg(long)]
        database_url: String,

        /// PostgreSQL schema or MySQL database to read
        #[arg(long)]
        schema_name: Option<String>,

        #[arg(short, long, value_enum, default_value_t = DumpFormat::Json)]
        format: DumpFormat,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DumpFormat {
    Json,
    Yaml,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Check {
            config,
            schema,
            database_url,
        } => check(&cli.log_level, config, schema, database_url).await,
        Command::Dump {
            database_url,
            schema_name,
            format,
        } => {
            init_logging(&Some(default_logging(&cli.log_level)))?;
            let schema = introspect(&DatabaseConfig {
                schema: schema_name,
                ..DatabaseConfig::from_url(&database_url)
            })
            .await?;

            let output = match format {
                DumpFormat::Json => serde_json::to_string_pretty(&schema)?,
                DumpFormat::Yaml => serde_yaml::to_string(&schema)?,
            };
            println!("{}", output);
            Ok(())
        }
    }
}

async fn check(
    log_level: &str,
    config_path: PathBuf,
    schema_path: Option<PathBuf>,
    database_url: Option<String>,
) -> anyhow::Result<()> {
    let config = config::load_from_file(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    let logging = config
        .logging
        .clone()
        .unwrap_or_else(|| default_logging(log_level));
    init_logging(&Some(logging))?;

    let schema = match config.schema_source(schema_path, database_url.as_deref())? {
        SchemaSource::File(path) => DatabaseSchema::load_from_file(path)?,
        SchemaSource::Database(database) => introspect(&database).await?,
    };

    let outcomes = config.check(&schema);
    let mut failures = 0;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(()) => println!("ok   {}: {}", outcome.expectation.table, outcome.description),
            Err(error) => {
                failures += 1;
                println!("FAIL {}: {}", outcome.expectation.table, error);
            }
        }
    }

    let total = config.expectations.len();
    if failures > 0 {
        bail!("{} of {} expectations failed", failures, total);
    }

    println!("{} expectations passed", total);
    Ok(())
}

async fn introspect(database: &DatabaseConfig) -> anyhow::Result<DatabaseSchema> {
    let connection = DatabaseConnection::connect(database)
        .await
        .with_context(|| format!("connecting to {}", database.url))?;

    let schema = SchemaAnalyzer::new(connection)
        .with_schema(database.schema.clone())
        .analyze()
        .await?;

    Ok(schema)
}

fn default_logging(level: &str) -> LoggingConfig {
    LoggingConfig {
        level: level.to_string(),
        file: None,
        format: "text".to_string(),
        stdout: true,
    }
}
