//! Farm project models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::layout::{Grid, GridSize};

/// A farm layout project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Farm {
    pub id: Uuid,
    pub name: String,
    pub grid_size: GridSize,
    pub grid: Grid,
    /// Declared farm area in acres
    pub area_acres: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Farm {
    pub fn area_square_meters(&self) -> Option<Decimal> {
        self.area_acres.and_then(acres_to_square_meters)
    }
}

/// Square meters in one international acre, exact
pub fn square_meters_per_acre() -> Decimal {
    Decimal::new(40_468_564_224, 7)
}

/// Exact acre to m² conversion. `None` when the product exceeds the
/// `Decimal` range.
pub fn acres_to_square_meters(acres: Decimal) -> Option<Decimal> {
    acres.checked_mul(square_meters_per_acre())
}
