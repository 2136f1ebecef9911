//! Boundary survey HTTP handlers

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::services::survey::{RecordPointInput, SurveyService};
use crate::AppState;

/// Start a boundary survey for a farm
pub async fn start_survey(
    State(state): State<AppState>,
    Path(farm_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = SurveyService::new(state.store.clone());

    match service.start_survey(farm_id).await {
        Ok(survey) => (StatusCode::CREATED, Json(survey)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a survey with its live measurement
pub async fn get_survey(
    State(state): State<AppState>,
    Path(survey_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = SurveyService::new(state.store.clone());

    match service.get_survey(survey_id).await {
        Ok(survey) => (StatusCode::OK, Json(survey)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Record a GPS fix
pub async fn record_point(
    State(state): State<AppState>,
    Path(survey_id): Path<Uuid>,
    Json(input): Json<RecordPointInput>,
) -> impl IntoResponse {
    let service = SurveyService::new(state.store.clone());

    match service.record_point(survey_id, input).await {
        Ok(survey) => (StatusCode::CREATED, Json(survey)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Finalize a survey into its field measurement
pub async fn finalize_survey(
    State(state): State<AppState>,
    Path(survey_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = SurveyService::new(state.store.clone());

    match service.finalize_survey(survey_id).await {
        Ok(measurement) => (StatusCode::OK, Json(measurement)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Download the survey points as CSV
pub async fn export_survey_csv(
    State(state): State<AppState>,
    Path(survey_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = SurveyService::new(state.store.clone());

    match service.export_csv(survey_id).await {
        Ok(csv) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"survey-{}.csv\"", survey_id),
                ),
            ],
            csv,
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}
