use std::future::Future;
use std::str::FromStr;
use std::time::{Duration, Instant};

use migration::MigrationCommand;
use sea_orm::{DatabaseConnection, SqlxPostgresConnector, SqlxSqliteConnector};
use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use tracing::{info, trace, warn};

use crate::config::db::{DbKind, DbSettings};
use crate::error::AppError;

fn engine_name(kind: DbKind) -> &'static str {
    match kind {
        DbKind::Postgres => "postgresql",
        DbKind::SqliteFile | DbKind::SqliteMemory => "sqlite",
    }
}

/// Retry a connection attempt with fixed interval delays.
/// Returns the error of the last attempt once retries are exhausted.
async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval_ms: u64,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut attempt = 1;
    loop {
        match connect_fn().await {
            Ok(result) => {
                if attempt > 1 {
                    info!(attempts = attempt, interval_ms, "connection_retry=success");
                }
                return Ok(result);
            }
            Err(e) if attempt >= max_attempts => return Err(e),
            Err(_) => {
                warn!(attempt, max_attempts, interval_ms, "connection_retry=failed");
                tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                attempt += 1;
            }
        }
    }
}

/// Per-connection SQL for the given engine.
fn session_statements(settings: &DbSettings) -> Vec<String> {
    match settings.kind {
        DbKind::SqliteFile | DbKind::SqliteMemory => vec![
            "PRAGMA foreign_keys = ON;".to_string(),
            format!("PRAGMA busy_timeout = {};", settings.busy_timeout_ms),
        ],
        DbKind::Postgres => vec![
            "SET application_name = 'minesweeper-backend';".to_string(),
            "SET timezone = 'UTC';".to_string(),
        ],
    }
}

async fn build_sqlite_pool(settings: &DbSettings) -> Result<DatabaseConnection, AppError> {
    let mut connect_opts = SqliteConnectOptions::from_str(&settings.url)
        .map_err(|e| AppError::config(format!("invalid SQLite connection options: {e}")))?
        .create_if_missing(true);
    if settings.kind == DbKind::SqliteFile {
        connect_opts = connect_opts.journal_mode(SqliteJournalMode::Wal);
    }

    let statements = session_statements(settings);
    let mut pool_opts = SqlitePoolOptions::new()
        .acquire_timeout(Duration::from_millis(settings.acquire_timeout_ms))
        .after_connect(move |conn, _meta| {
            let statements = statements.clone();
            Box::pin(async move {
                for stmt in &statements {
                    sqlx::query(stmt).execute(&mut *conn).await?;
                }
                trace!("db=sqlite hook=after_connect ok");
                Ok::<_, sqlx::Error>(())
            })
        });

    pool_opts = if settings.kind == DbKind::SqliteMemory {
        // every connection is its own database: pin exactly one, forever
        pool_opts
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        pool_opts.max_connections(settings.max_connections.max(1))
    };

    let pool: SqlitePool = pool_opts
        .connect_with(connect_opts)
        .await
        .map_err(|e| AppError::config(format!("failed to create SQLite pool: {e}")))?;

    info!(
        engine = "sqlite",
        url = %settings.url,
        max = settings.max_connections,
        "pool=create"
    );
    Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
}

async fn build_postgres_pool(settings: &DbSettings) -> Result<DatabaseConnection, AppError> {
    let statements = session_statements(settings);
    let url = settings.url.clone();
    let max = settings.max_connections.max(1);
    let acquire_timeout = Duration::from_millis(settings.acquire_timeout_ms);

    // startup ordering with the database container is not guaranteed
    let pool = retry_connection(
        || {
            let statements = statements.clone();
            let url = url.clone();
            async move {
                PgPoolOptions::new()
                    .max_connections(max)
                    .acquire_timeout(acquire_timeout)
                    .idle_timeout(Duration::from_secs(30))
                    .after_connect(move |conn, _meta| {
                        let statements = statements.clone();
                        Box::pin(async move {
                            for stmt in &statements {
                                sqlx::query(stmt).execute(&mut *conn).await?;
                            }
                            Ok::<_, sqlx::Error>(())
                        })
                    })
                    .connect(&url)
                    .await
                    .map_err(|e| AppError::config(format!("failed to connect to Postgres: {e}")))
            }
        },
        5,
        500,
    )
    .await?;

    info!(engine = "postgres", max, "pool=create");
    Ok(SqlxPostgresConnector::from_sqlx_postgres_pool(pool))
}

/// Open a pool for `settings`. Does NOT run migrations.
pub async fn connect_db(settings: &DbSettings) -> Result<DatabaseConnection, AppError> {
    match settings.kind {
        DbKind::SqliteFile | DbKind::SqliteMemory => build_sqlite_pool(settings).await,
        DbKind::Postgres => build_postgres_pool(settings).await,
    }
}

/// Build the app DB *and* guarantee the schema is current.
pub async fn bootstrap_db(settings: &DbSettings) -> Result<DatabaseConnection, AppError> {
    let start = Instant::now();
    info!(
        db_kind = ?settings.kind,
        engine = engine_name(settings.kind),
        pid = std::process::id(),
        "bootstrap=start"
    );

    let conn = connect_db(settings).await?;
    migration::migrate(&conn, MigrationCommand::Up)
        .await
        .map_err(|e| AppError::config(format!("migrations failed: {e}")))?;

    info!(
        elapsed_ms = start.elapsed().as_millis() as u64,
        "bootstrap=ready"
    );
    Ok(conn)
}
