//! Farm plot models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::layout::Rectangle;

/// A planted plot placed on a farm's layout grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plot {
    #[serde(flatten)]
    pub footprint: Rectangle,
    pub farm_id: Uuid,
    pub name: String,
    pub color: PlotColor,
    pub crop: Option<String>,
    pub fertilizer: Option<String>,
    pub expected_yield_kg: Option<f64>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Plot {
    pub fn id(&self) -> Uuid {
        self.footprint.id
    }

    pub fn area_cells(&self) -> i64 {
        i64::from(self.footprint.width) * i64::from(self.footprint.height)
    }
}

/// Plot fill colors offered in the planner
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlotColor {
    #[default]
    Green,
    Brown,
    Yellow,
    Orange,
    Red,
    Purple,
    Blue,
}

impl std::fmt::Display for PlotColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlotColor::Green => write!(f, "Green"),
            PlotColor::Brown => write!(f, "Brown"),
            PlotColor::Yellow => write!(f, "Yellow"),
            PlotColor::Orange => write!(f, "Orange"),
            PlotColor::Red => write!(f, "Red"),
            PlotColor::Purple => write!(f, "Purple"),
            PlotColor::Blue => write!(f, "Blue"),
        }
    }
}
