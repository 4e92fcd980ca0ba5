use actix_web::web;

pub mod games;
pub mod health;

/// Mount every route. Shared by `main.rs` and the HTTP test harness so
/// both serve identical paths.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // /health, /ready
    cfg.configure(health::configure_routes);

    // /api/games/**
    cfg.service(web::scope("/api/games").configure(games::configure_routes));
}
