//! Health route handler.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    pub backend: &'static str,
    pub strategy: &'static str,
    pub plants: usize,
}

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<Health> {
    Json(Health {
        status: "ok",
        backend: state.qa.backend().as_str(),
        strategy: state.qa.strategy().as_str(),
        plants: state.qa.list_entities().len(),
    })
}
