//! Walking path HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::services::layout::{CreatePathInput, LayoutService};
use crate::AppState;

/// Create a walking path
pub async fn create_path(
    State(state): State<AppState>,
    Path(farm_id): Path<Uuid>,
    Json(input): Json<CreatePathInput>,
) -> impl IntoResponse {
    let service = LayoutService::new(state.store.clone(), state.config.layout.rules());

    match service.create_path(farm_id, input).await {
        Ok(path) => (StatusCode::CREATED, Json(path)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a walking path
pub async fn delete_path(
    State(state): State<AppState>,
    Path((farm_id, path_id)): Path<(Uuid, Uuid)>,
) -> impl IntoResponse {
    let service = LayoutService::new(state.store.clone(), state.config.layout.rules());

    match service.delete_path(farm_id, path_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
