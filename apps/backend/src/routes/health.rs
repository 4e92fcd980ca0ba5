use actix_web::{web, HttpResponse};
use migration::get_latest_migration_version;
use sea_orm::{ConnectionTrait, Statement};
use serde::Serialize;
use time::OffsetDateTime;
use tracing::warn;

use crate::db::require_db;
use crate::error::AppError;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    app_version: &'static str,
    db: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    db_error: Option<String>,
    migrations: String,
    time: String,
}

#[derive(Debug, Serialize)]
struct ReadyResponse {
    status: &'static str,
}

async fn ping(db: &sea_orm::DatabaseConnection) -> Result<(), sea_orm::DbErr> {
    db.query_one(Statement::from_string(
        db.get_database_backend(),
        "SELECT 1 AS health_check".to_string(),
    ))
    .await
    .map(|_| ())
}

/// GET /health: always 200, reports DB and migration state.
async fn health(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let time = OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());

    let (db, db_error, migrations) = match require_db(&app_state) {
        Ok(conn) => match ping(conn).await {
            Ok(()) => {
                let migrations = match get_latest_migration_version(conn).await {
                    Ok(Some(version)) => version,
                    Ok(None) => "no_migrations".to_string(),
                    Err(_) => "unknown".to_string(),
                };
                ("ok", None, migrations)
            }
            Err(e) => {
                warn!(error = %e, "health check query failed");
                ("error", Some("DB query failed".to_string()), "unknown".to_string())
            }
        },
        Err(_) => ("error", Some("DB not configured".to_string()), "unknown".to_string()),
    };

    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        app_version: env!("CARGO_PKG_VERSION"),
        db,
        db_error,
        migrations,
        time,
    }))
}

/// GET /ready: 200 when the database answers, 503 otherwise.
async fn ready(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    ping(db).await.map_err(|e| {
        warn!(error = %e, "readiness probe failed");
        AppError::db_unavailable()
    })?;
    Ok(HttpResponse::Ok().json(ReadyResponse { status: "ready" }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
    cfg.route("/ready", web::get().to(ready));
}
