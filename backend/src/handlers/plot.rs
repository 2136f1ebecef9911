//! Plot layout HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::services::layout::{CreatePlotInput, LayoutService, MovePlotInput, UpdatePlotInput};
use crate::AppState;

fn layout_service(state: &AppState) -> LayoutService {
    LayoutService::new(state.store.clone(), state.config.layout.rules())
}

/// List all plots of a farm
pub async fn list_plots(
    State(state): State<AppState>,
    Path(farm_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = layout_service(&state);

    match service.get_plots(farm_id).await {
        Ok(plots) => (StatusCode::OK, Json(serde_json::json!({ "plots": plots }))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a new plot at an automatically chosen position
pub async fn create_plot(
    State(state): State<AppState>,
    Path(farm_id): Path<Uuid>,
    Json(input): Json<CreatePlotInput>,
) -> impl IntoResponse {
    let service = layout_service(&state);

    match service.create_plot(farm_id, input).await {
        Ok(placed) => (StatusCode::CREATED, Json(placed)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Move a plot to a proposed position
pub async fn move_plot(
    State(state): State<AppState>,
    Path((farm_id, plot_id)): Path<(Uuid, Uuid)>,
    Json(input): Json<MovePlotInput>,
) -> impl IntoResponse {
    let service = layout_service(&state);

    match service.move_plot(farm_id, plot_id, input).await {
        Ok(moved) => (StatusCode::OK, Json(moved)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update plot details
pub async fn update_plot(
    State(state): State<AppState>,
    Path((farm_id, plot_id)): Path<(Uuid, Uuid)>,
    Json(input): Json<UpdatePlotInput>,
) -> impl IntoResponse {
    let service = layout_service(&state);

    match service.update_plot(farm_id, plot_id, input).await {
        Ok(plot) => (StatusCode::OK, Json(plot)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a plot
pub async fn delete_plot(
    State(state): State<AppState>,
    Path((farm_id, plot_id)): Path<(Uuid, Uuid)>,
) -> impl IntoResponse {
    let service = layout_service(&state);

    match service.delete_plot(farm_id, plot_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
