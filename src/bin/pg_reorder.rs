//! pg-reorder — the CLI.
//!
//! # Usage
//!
//! ```bash
//! # List the current columns of a table
//! pg-reorder -d library books
//!
//! # Preview: id first, year_published last, everything else unchanged
//! pg-reorder -d library books id ... year_published
//!
//! # Emit the full rebuild migration
//! pg-reorder -d library books id ... year_published --migrate
//!
//! # Write the migration to a file
//! pg-reorder -d library books id ... year_published -m -f reorder.sql
//! ```

use clap::{Parser, ValueEnum};
use colored::*;
use pg_reorder::prelude::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pg-reorder")]
#[command(version)]
#[command(about = "Reorder PostgreSQL table columns to match a target layout", long_about = None)]
#[command(after_help = "EXAMPLES:
    pg-reorder -d library books
    pg-reorder -d library books id ... year_published
    pg-reorder -d library books id title -e legacy_notes --migrate
    pg-reorder -d library books '...' created_at updated_at -m -f reorder.sql

COLUMNS are placed at the start of the table in the order given. A '...'
token splits the list: columns before it go to the start, columns after it
go to the end. Unlisted columns keep their relative order in between.")]
struct Cli {
    /// The table to reorder
    table: String,

    /// Target column order; a "..." token splits start columns from end columns
    columns: Vec<String>,

    /// Exclude a column, leaving it exactly where it is (can be used multiple times)
    #[arg(short, long)]
    exclude: Vec<String>,

    /// The hostname of the Postgres server
    #[arg(long, env = "PGHOST", default_value = "localhost")]
    host: String,

    /// The port Postgres is listening on
    #[arg(short, long, env = "PGPORT", default_value_t = 5432)]
    port: u16,

    /// The name of the database
    #[arg(short, long, env = "PGDATABASE")]
    database: String,

    /// The schema of the target table
    #[arg(short = 'n', long, default_value = "public")]
    schema: String,

    /// User name
    #[arg(short, long, env = "PGUSER", default_value = "postgres")]
    user: String,

    /// Password
    #[arg(long, env = "PGPASSWORD")]
    password: Option<String>,

    /// Output the full migration SQL instead of the resolved column list
    #[arg(short, long)]
    migrate: bool,

    /// Write output into a file
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Output format for column listings
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli).await {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(cli: &Cli) -> Result<(), ReorderError> {
    let params = ConnectParams {
        host: cli.host.clone(),
        port: cli.port,
        user: cli.user.clone(),
        password: cli.password.clone(),
        database: cli.database.clone(),
    };
    let pool = connect(&params).await?;
    let table = TableInfo::load(&pool, &cli.schema, &cli.table).await?;

    let spec = OrderingSpec::from_args(&cli.columns, &cli.exclude);
    if spec.is_empty() {
        print_columns(
            &table.columns,
            &format!("Columns for {}:", cli.table),
            &cli.format,
        );
        return Ok(());
    }

    let ordered = resolve(&table.columns, &spec)?;

    if cli.migrate {
        let physical = pin_excluded(&table.columns, &ordered, &spec.excluded);
        let sql = migration_sql(&table, &physical);
        match &cli.file {
            Some(path) => {
                std::fs::write(path, &sql)?;
                println!(
                    "{} Wrote migration to {}",
                    "✓".green(),
                    path.display().to_string().cyan()
                );
            }
            None => print!("{sql}"),
        }
    } else {
        print_columns(
            &ordered,
            &format!("Ordered columns for {}:", cli.table),
            &cli.format,
        );
    }

    Ok(())
}

fn print_columns(columns: &[Column], header: &str, format: &OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(columns).unwrap_or_default()
            );
        }
        OutputFormat::Table => {
            println!("{}", header.bold());
            for col in columns {
                println!("    {col}");
            }
        }
    }
}
