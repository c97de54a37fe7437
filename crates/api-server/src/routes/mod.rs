//! Route handlers

pub mod health;
pub mod task;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Room for multipart framing on top of the file itself
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Build the REST application
pub fn app(state: AppState) -> Router {
    let body_limit = state.max_csv_size().saturating_add(MULTIPART_OVERHEAD);

    Router::new()
        .merge(health::router())
        .merge(task::router())
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
