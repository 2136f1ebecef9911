//! Walking path models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::layout::{snap_axis, Grid, LayoutError};
use crate::types::Position;

/// Path surface colors offered in the planner
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PathColor {
    Gray,
    #[default]
    Brown,
    Tan,
    Stone,
}

impl std::fmt::Display for PathColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathColor::Gray => write!(f, "Gray"),
            PathColor::Brown => write!(f, "Brown"),
            PathColor::Tan => write!(f, "Tan"),
            PathColor::Stone => write!(f, "Stone"),
        }
    }
}

/// A walking path drawn as a polyline through grid cells
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WalkingPath {
    pub id: Uuid,
    pub color: PathColor,
    pub cells: Vec<Position>,
}

impl WalkingPath {
    /// Number of cell-to-cell steps along the path, counting diagonal moves
    /// as one step
    pub fn length_cells(&self) -> i32 {
        self.cells
            .windows(2)
            .map(|w| (w[1].x - w[0].x).abs().max((w[1].y - w[0].y).abs()))
            .sum()
    }
}

/// A path being drawn. Pointer positions are clamped into the margin-bounded
/// area and snapped to cells; repeated cells are dropped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PathDraft {
    pub color: PathColor,
    pub cells: Vec<Position>,
}

impl PathDraft {
    pub fn start(color: PathColor) -> Self {
        Self {
            color,
            cells: Vec::new(),
        }
    }

    /// Add the cell under a pointer at `(x, y)` cells
    pub fn extend(mut self, x: f64, y: f64, grid: &Grid) -> Self {
        if x.is_nan() || y.is_nan() {
            return self;
        }
        let margin = grid.boundary_margin;
        let cell = Position::new(
            snap_axis(x, margin, grid.width - 1 - margin),
            snap_axis(y, margin, grid.height - 1 - margin),
        );
        if self.cells.last() != Some(&cell) {
            self.cells.push(cell);
        }
        self
    }

    pub fn finish(self, id: Uuid) -> Result<WalkingPath, LayoutError> {
        if self.cells.len() < 2 {
            return Err(LayoutError::PathTooShort(self.cells.len()));
        }
        Ok(WalkingPath {
            id,
            color: self.color,
            cells: self.cells,
        })
    }
}
