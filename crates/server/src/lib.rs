//! HTTP API server for the brewmap cafe directory.
//!
//! This crate provides the HTTP surface:
//! - Static landing page
//! - Cafe listing, location search, and random pick
//! - Cafe creation, price updates, and removal (API-key gated)

pub mod auth;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
