pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod monitor;
pub mod services;
pub mod state;
pub mod ui;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Routes of the chatbot backend.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/chat", post(handlers::chat::chat))
        .route("/health", get(handlers::health::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
