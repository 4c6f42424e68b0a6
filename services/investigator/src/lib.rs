pub mod config;
pub mod export;
pub mod fallback;
pub mod investigation;
pub mod pdf;
pub mod prompts;
pub mod provider;
pub mod provider_openrouter;
pub mod routes_ask;
pub mod routes_cases;
pub mod routes_export;
pub mod state;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::state::SharedState;

/// Uploads carry several photos; axum's default 2 MB is too small.
pub const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(routes_cases::health))
        .route("/cases", post(routes_cases::post_case).get(routes_cases::list_cases))
        .route("/cases/:id", get(routes_cases::get_case).delete(routes_cases::delete_case))
        .route("/cases/:id/update", post(routes_cases::post_update))
        .route("/cases/:id/ask", post(routes_ask::ask_case))
        .route("/cases/:id/export/json", get(routes_export::export_json))
        .route("/cases/:id/export/pdf", get(routes_export::export_pdf))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
