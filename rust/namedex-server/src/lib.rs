//! HTTP/JSON front end of a [`NameDirectory`].
//!
//! The route layer is thin: it parses and clamps query parameters, runs the
//! page scans on the blocking pool and maps the typed errors of the directory
//! to HTTP status codes. The directory is handed to the router as explicit
//! state; there is no process-wide service instance.

use std::{sync::Arc, time::Instant};

use axum::{Router, routing::get};
use namedex_index::NameDirectory;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod server;
pub mod shutdown;

pub use config::ServerConfig;
pub use server::run;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<NameDirectory>,
    pub config: Arc<ServerConfig>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(directory: Arc<NameDirectory>, config: ServerConfig) -> AppState {
        AppState {
            directory,
            config: Arc::new(config),
            started_at: Instant::now(),
        }
    }
}

/// Creates the router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/users", get(handlers::users::list_users))
        .route("/stats", get(handlers::users::get_stats))
        .route("/letter/:letter", get(handlers::users::get_letter))
        .route("/letters", get(handlers::users::list_letters));

    Router::new()
        .route("/", get(handlers::meta::root))
        .route("/health", get(handlers::meta::health))
        .nest("/api", api_routes)
        .fallback(handlers::meta::not_found)
        .layer(state.config.cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
