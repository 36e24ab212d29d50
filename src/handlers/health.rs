use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub intents: usize,
    pub dataset_entries: usize,
    pub stored_vectors: i64,
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthReport> {
    Json(HealthReport {
        status: "ok",
        intents: state.chat.intent_count(),
        dataset_entries: state.chat.dataset_entries(),
        stored_vectors: state.chat.stored_vectors(),
    })
}
