use std::env;

use clap::{Parser, ValueEnum};
use migration::sea_orm::Database;
use migration::MigrationCommand;

#[derive(Clone, ValueEnum)]
enum Db {
    Postgres,
    SqliteFile,
}

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "Minesweeper database migration tool")]
struct Args {
    /// Migration command to run: up | down | fresh | reset | refresh | status
    command: String,

    /// Database type
    #[arg(
        short,
        long,
        value_enum,
        default_value = "postgres",
        help = "Database type: postgres, sqlite-file"
    )]
    db: Db,

    /// Explicit connection URL; overrides the environment
    #[arg(long)]
    url: Option<String>,
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn url_from_env(db: &Db) -> String {
    match db {
        Db::Postgres => format!(
            "postgresql://{}:{}@{}:{}/{}",
            env_or("POSTGRES_USER", "minesweeper"),
            env_or("POSTGRES_PASSWORD", "minesweeper"),
            env_or("POSTGRES_HOST", "localhost"),
            env_or("POSTGRES_PORT", "5432"),
            env_or("POSTGRES_DB", "minesweeper"),
        ),
        Db::SqliteFile => format!(
            "sqlite://{}?mode=rwc",
            env_or("SQLITE_PATH", "./data/minesweeper.db")
        ),
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_line_number(false)
        .with_file(false)
        .with_env_filter("migration=info,sqlx=warn")
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.to_string().contains("invalid value") && e.to_string().contains("--db") {
                eprintln!("❌ Unsupported database type provided.");
                eprintln!();
                eprintln!("SQLite in-memory databases are not supported for CLI operations:");
                eprintln!("each invocation would migrate a fresh database and then discard it.");
                eprintln!();
                eprintln!("Supported database types:");
                eprintln!("  • postgres    - PostgreSQL database");
                eprintln!("  • sqlite-file - SQLite file database");
                std::process::exit(1);
            }
            eprintln!("{e}");
            std::process::exit(2);
        }
    };

    let command: MigrationCommand = match args.command.parse() {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };

    let url = args.url.unwrap_or_else(|| url_from_env(&args.db));

    let db = match Database::connect(&url).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("❌ Failed to connect to database: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = migration::migrate(&db, command).await {
        eprintln!("Migration failed: {e}");
        std::process::exit(1);
    }
}
