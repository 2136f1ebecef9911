//! GPS boundary survey models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::geometry::{polygon_area, polygon_perimeter, square_meters_to_acres, GeoPoint};
use crate::validation::{validate_coordinates, validate_gps_accuracy};

/// Minimum number of boundary points that enclose an area
pub const MIN_BOUNDARY_POINTS: usize = 3;

/// Survey errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SurveyError {
    #[error("Survey has already been finalized")]
    AlreadyFinalized,

    #[error("Invalid GPS fix: {0}")]
    InvalidFix(&'static str),

    #[error("A boundary needs at least 3 points (got {0})")]
    NotEnoughPoints(usize),
}

/// One GPS fix on a field boundary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoundaryPoint {
    /// Position in the walked sequence, starting at 0
    pub order: u32,
    pub latitude: f64,
    pub longitude: f64,
    /// Reported horizontal accuracy. Kept as metadata only.
    pub accuracy_meters: Option<f64>,
    pub recorded_at: DateTime<Utc>,
}

impl GeoPoint for BoundaryPoint {
    fn latitude(&self) -> f64 {
        self.latitude
    }

    fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Area and perimeter of a closed field boundary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldMeasurement {
    pub points: Vec<BoundaryPoint>,
    pub area_square_meters: f64,
    pub area_acres: f64,
    pub perimeter_meters: f64,
}

impl FieldMeasurement {
    pub fn from_points(points: Vec<BoundaryPoint>) -> Self {
        let area_square_meters = polygon_area(&points);
        let perimeter_meters = polygon_perimeter(&points);
        Self {
            area_square_meters,
            area_acres: square_meters_to_acres(area_square_meters),
            perimeter_meters,
            points,
        }
    }

    pub fn is_measurable(&self) -> bool {
        self.points.len() >= MIN_BOUNDARY_POINTS
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Survey lifecycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SurveyStatus {
    Recording,
    Finalized,
}

/// A boundary walk. Points are append-only until the survey is finalized into
/// an immutable [`FieldMeasurement`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveySession {
    pub id: Uuid,
    pub farm_id: Uuid,
    pub status: SurveyStatus,
    pub points: Vec<BoundaryPoint>,
    pub measurement: Option<FieldMeasurement>,
    pub started_at: DateTime<Utc>,
    pub finalized_at: Option<DateTime<Utc>>,
}

impl SurveySession {
    pub fn new(id: Uuid, farm_id: Uuid, started_at: DateTime<Utc>) -> Self {
        Self {
            id,
            farm_id,
            status: SurveyStatus::Recording,
            points: Vec::new(),
            measurement: None,
            started_at,
            finalized_at: None,
        }
    }

    pub fn record_point(
        &mut self,
        latitude: f64,
        longitude: f64,
        accuracy_meters: Option<f64>,
        recorded_at: DateTime<Utc>,
    ) -> Result<&BoundaryPoint, SurveyError> {
        if self.status == SurveyStatus::Finalized {
            return Err(SurveyError::AlreadyFinalized);
        }
        validate_coordinates(latitude, longitude).map_err(SurveyError::InvalidFix)?;
        if let Some(accuracy) = accuracy_meters {
            validate_gps_accuracy(accuracy).map_err(SurveyError::InvalidFix)?;
        }

        let order = self.points.len() as u32;
        self.points.push(BoundaryPoint {
            order,
            latitude,
            longitude,
            accuracy_meters,
            recorded_at,
        });
        Ok(&self.points[self.points.len() - 1])
    }

    /// Measurement of the points recorded so far
    pub fn current_measurement(&self) -> FieldMeasurement {
        match &self.measurement {
            Some(finalized) => finalized.clone(),
            None => FieldMeasurement::from_points(self.points.clone()),
        }
    }

    pub fn finalize(&mut self, at: DateTime<Utc>) -> Result<&FieldMeasurement, SurveyError> {
        if self.status == SurveyStatus::Finalized {
            return Err(SurveyError::AlreadyFinalized);
        }
        if self.points.len() < MIN_BOUNDARY_POINTS {
            return Err(SurveyError::NotEnoughPoints(self.points.len()));
        }

        self.status = SurveyStatus::Finalized;
        self.finalized_at = Some(at);
        Ok(self
            .measurement
            .insert(FieldMeasurement::from_points(self.points.clone())))
    }
}
