//! Route configuration.

use crate::handlers;
use crate::state::AppState;
use axum::Router;
use axum::routing::{delete, get, patch, post};
use tower_http::trace::TraceLayer;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Landing page
        .route("/", get(handlers::home))
        // Read endpoints
        .route("/random", get(handlers::random_cafe))
        .route("/all", get(handlers::all_cafes))
        .route("/search", get(handlers::search_cafes))
        // Mutating endpoints
        .route("/cafe", post(handlers::add_cafe))
        .route("/update-price/{id}", patch(handlers::update_price))
        .route("/report-closed/{id}", delete(handlers::report_closed))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
