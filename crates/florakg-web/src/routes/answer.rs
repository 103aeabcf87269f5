//! Question answering route handler.

use axum::{extract::State, Json};
use serde::Deserialize;

use super::ApiResponse;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct QuestionRequest {
    #[serde(default)]
    pub question: String,
}

/// POST /api/answer
///
/// Always succeeds: failures are phrased into the answer itself.
pub async fn answer(
    State(state): State<AppState>,
    Json(req): Json<QuestionRequest>,
) -> Json<ApiResponse<String>> {
    Json(ApiResponse::ok(state.qa.answer(&req.question).await))
}
