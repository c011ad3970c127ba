//! Service metadata endpoints and the fallback route.

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::State,
    http::{Method, StatusCode, Uri},
};

use crate::{
    AppState,
    models::{HealthResponse, IndexHealth, RootResponse, RouteNotFoundResponse},
};

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let index = match state.directory.snapshot() {
        Ok(index) => IndexHealth {
            ready: true,
            total_records: index.total_records(),
            available_letters: index.available_letters(),
        },
        Err(_) => IndexHealth {
            ready: false,
            total_records: 0,
            available_letters: Vec::new(),
        },
    };
    Json(HealthResponse {
        status: "OK".to_string(),
        service: "namedex".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: state.config.environment.clone(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        uptime_secs: state.started_at.elapsed().as_secs_f64(),
        index,
    })
}

/// `GET /`
pub async fn root() -> Json<RootResponse> {
    let endpoints = [
        ("health", "GET /health"),
        ("users", "GET /api/users?letter=A&offset=0&limit=50"),
        ("stats", "GET /api/stats"),
        ("letter", "GET /api/letter/:letter"),
        ("letters", "GET /api/letters"),
    ]
    .into_iter()
    .map(|(name, route)| (name.to_string(), route.to_string()))
    .collect::<BTreeMap<_, _>>();

    Json(RootResponse {
        message: "namedex letter-bucketed name directory".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints,
    })
}

pub async fn not_found(method: Method, uri: Uri) -> (StatusCode, Json<RouteNotFoundResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(RouteNotFoundResponse {
            error: "route not found".to_string(),
            code: "NOT_FOUND".to_string(),
            path: uri.path().to_string(),
            method: method.to_string(),
        }),
    )
}
