//! Boundary survey service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{BoundaryPoint, FieldMeasurement, SurveySession};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::store::MemoryStore;

/// Survey service for GPS boundary walks
#[derive(Clone)]
pub struct SurveyService {
    store: MemoryStore,
}

/// A GPS fix reported by the surveying device
#[derive(Debug, Deserialize, Validate)]
pub struct RecordPointInput {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[validate(range(min = 0.0))]
    pub accuracy_meters: Option<f64>,
    /// Device timestamp; server time is used when missing
    pub recorded_at: Option<DateTime<Utc>>,
}

/// Survey session with its live measurement
#[derive(Debug, Serialize)]
pub struct SurveyView {
    #[serde(flatten)]
    pub session: SurveySession,
    pub current: FieldMeasurement,
}

impl From<&SurveySession> for SurveyView {
    fn from(session: &SurveySession) -> Self {
        Self {
            current: session.current_measurement(),
            session: session.clone(),
        }
    }
}

/// Row of the CSV export
#[derive(Debug, Serialize)]
struct BoundaryPointRow {
    order: u32,
    latitude: f64,
    longitude: f64,
    accuracy_meters: Option<f64>,
    recorded_at: String,
}

impl From<&BoundaryPoint> for BoundaryPointRow {
    fn from(point: &BoundaryPoint) -> Self {
        Self {
            order: point.order,
            latitude: point.latitude,
            longitude: point.longitude,
            accuracy_meters: point.accuracy_meters,
            recorded_at: point.recorded_at.to_rfc3339(),
        }
    }
}

impl SurveyService {
    /// Create a new SurveyService instance
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }

    /// Start a new boundary walk for a farm
    pub async fn start_survey(&self, farm_id: Uuid) -> AppResult<SurveyView> {
        let mut data = self.store.write().await;
        data.farm(farm_id)?;

        let session = SurveySession::new(Uuid::new_v4(), farm_id, Utc::now());
        let view = SurveyView::from(&session);
        data.surveys.insert(session.id, session);

        tracing::info!(farm_id = %farm_id, survey_id = %view.session.id, "Survey started");
        Ok(view)
    }

    /// Get a survey and the measurement of its current points
    pub async fn get_survey(&self, survey_id: Uuid) -> AppResult<SurveyView> {
        let data = self.store.read().await;
        Ok(SurveyView::from(data.survey(survey_id)?))
    }

    /// Append a GPS fix to a survey that is still recording
    pub async fn record_point(
        &self,
        survey_id: Uuid,
        input: RecordPointInput,
    ) -> AppResult<SurveyView> {
        input.validate()?;

        let mut data = self.store.write().await;
        let session = data.survey_mut(survey_id)?;
        let point = session.record_point(
            input.latitude,
            input.longitude,
            input.accuracy_meters,
            input.recorded_at.unwrap_or_else(Utc::now),
        )?;

        tracing::debug!(
            survey_id = %survey_id,
            order = point.order,
            accuracy = ?point.accuracy_meters,
            "Boundary point recorded"
        );
        Ok(SurveyView::from(&*session))
    }

    /// Freeze the survey into its final measurement
    pub async fn finalize_survey(&self, survey_id: Uuid) -> AppResult<FieldMeasurement> {
        let mut data = self.store.write().await;
        let session = data.survey_mut(survey_id)?;
        let measurement = session.finalize(Utc::now())?.clone();

        tracing::info!(
            survey_id = %survey_id,
            points = measurement.points.len(),
            area_square_meters = measurement.area_square_meters,
            area_acres = measurement.area_acres,
            perimeter_meters = measurement.perimeter_meters,
            "Survey finalized"
        );
        Ok(measurement)
    }

    /// Export the recorded points as CSV
    pub async fn export_csv(&self, survey_id: Uuid) -> AppResult<String> {
        let data = self.store.read().await;
        let session = data.survey(survey_id)?;

        let mut writer = csv::Writer::from_writer(Vec::new());
        for point in &session.points {
            writer
                .serialize(BoundaryPointRow::from(point))
                .map_err(|e| AppError::Internal(format!("CSV export failed: {}", e)))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| AppError::Internal(format!("CSV export failed: {}", e)))?;

        String::from_utf8(bytes).map_err(|e| AppError::Internal(e.to_string()))
    }
}
