use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

pub mod config;
pub mod error;
pub mod gemini;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod prompt;
pub mod rate_limit;
pub mod report;
pub mod state;
pub mod validator;

pub use state::AppState;

// creating the router with routes
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/api/validate", post(handlers::validate_handler))
        .route("/metrics", get(handlers::metrics_handler))
        .with_state(state)
}
