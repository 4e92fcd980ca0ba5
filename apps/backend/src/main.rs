use actix_web::{web, App, HttpServer};
use backend::config::db::DbSettings;
use backend::config::game_limits::GameLimits;
use backend::error::AppError;
use backend::infra::state::build_state;
use backend::middleware::cors::cors_middleware;
use backend::middleware::request_trace::RequestTrace;
use backend::middleware::structured_logger::StructuredLogger;
use backend::middleware::trace_span::TraceSpan;
use backend::routes;
use tracing::{error, info};

mod telemetry;

fn server_address() -> Result<(String, u16), AppError> {
    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = match std::env::var("BACKEND_PORT") {
        Ok(raw) => raw
            .trim()
            .parse::<u16>()
            .map_err(|_| AppError::config(format!("BACKEND_PORT={raw:?} is not a valid port")))?,
        Err(_) => 3001,
    };
    Ok((host, port))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be provided by the runtime environment
    // (docker env_file, or sourced manually for local runs).
    let startup = async {
        let (host, port) = server_address()?;
        let state = build_state()
            .with_db(DbSettings::from_env()?)
            .with_limits(GameLimits::from_env()?)
            .build()
            .await?;
        Ok::<_, AppError>((host, port, state))
    };

    let (host, port, app_state) = match startup.await {
        Ok(parts) => parts,
        Err(e) => {
            error!(error = %e, "startup failed");
            std::process::exit(1);
        }
    };

    info!(
        host = %host,
        port,
        max_dimension = app_state.limits.max_dimension,
        "minesweeper backend listening"
    );

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
