//! Plant route handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use florakg_core::{FloraError, PlantDetail};
use serde::Deserialize;

use super::ApiResponse;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct PlantDetailRequest {
    pub plant_name: String,
}

/// Map a lookup failure to an HTTP status and a message safe to show.
fn error_status(e: &FloraError) -> (StatusCode, String) {
    match e {
        FloraError::EntityNotFound(name) => (StatusCode::NOT_FOUND, format!("Plant not found: {}", name)),
        FloraError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        FloraError::StoreUnavailable(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            "Knowledge base is unavailable".to_string(),
        ),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string()),
    }
}

/// GET /api/plant_list
pub async fn plant_list(State(state): State<AppState>) -> Json<ApiResponse<Vec<String>>> {
    Json(ApiResponse::ok(state.qa.list_entities().to_vec()))
}

/// POST /api/plant_detail
pub async fn plant_detail(
    State(state): State<AppState>,
    Json(req): Json<PlantDetailRequest>,
) -> (StatusCode, Json<ApiResponse<Option<PlantDetail>>>) {
    match state.qa.get_entity_detail(&req.plant_name).await {
        Ok(detail) => (StatusCode::OK, Json(ApiResponse::ok(Some(detail)))),
        Err(e) => {
            tracing::warn!(plant = %req.plant_name, error = %e, "Plant detail lookup failed");
            let (status, msg) = error_status(&e);
            (status, Json(ApiResponse::error(status.as_u16(), None, msg)))
        }
    }
}

/// GET /api/plants/{name}
pub async fn get_plant(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<PlantDetail>, (StatusCode, String)> {
    state
        .qa
        .get_entity_detail(&name)
        .await
        .map(Json)
        .map_err(|e| {
            tracing::warn!(plant = %name, error = %e, "Plant lookup failed");
            error_status(&e)
        })
}
