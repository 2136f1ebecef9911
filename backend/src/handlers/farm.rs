//! Farm project HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::services::farm::{CreateFarmInput, FarmService};
use crate::AppState;

/// List all farms
pub async fn list_farms(State(state): State<AppState>) -> impl IntoResponse {
    let service = FarmService::new(state.store.clone(), state.config.layout.clone());

    match service.list_farms().await {
        Ok(farms) => (StatusCode::OK, Json(serde_json::json!({ "farms": farms }))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a new farm
pub async fn create_farm(
    State(state): State<AppState>,
    Json(input): Json<CreateFarmInput>,
) -> impl IntoResponse {
    let service = FarmService::new(state.store.clone(), state.config.layout.clone());

    match service.create_farm(input).await {
        Ok(farm) => (StatusCode::CREATED, Json(farm)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a farm with its layout
pub async fn get_farm(
    State(state): State<AppState>,
    Path(farm_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = FarmService::new(state.store.clone(), state.config.layout.clone());

    match service.get_farm(farm_id).await {
        Ok(farm) => (StatusCode::OK, Json(farm)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a farm
pub async fn delete_farm(
    State(state): State<AppState>,
    Path(farm_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = FarmService::new(state.store.clone(), state.config.layout.clone());

    match service.delete_farm(farm_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
