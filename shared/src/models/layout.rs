//! Grid layout models and automatic plot placement

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::types::Position;
use crate::validation::{validate_grid_bounds, validate_plot_dimensions};

/// Cells kept free between the grid edge and any plot
pub const DEFAULT_BOUNDARY_MARGIN: i32 = 1;

/// Gap the spaced scan tries to leave around every plot
pub const PLOT_SPACING: i32 = 1;

/// Layout engine errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Invalid dimension {width}x{height}: {reason}")]
    InvalidDimension {
        width: i32,
        height: i32,
        reason: &'static str,
    },

    #[error("Invalid grid: {0}")]
    InvalidGrid(&'static str),

    #[error("Spacing cannot be negative (got {0})")]
    InvalidSpacing(i32),

    #[error("A path needs at least 2 cells (got {0})")]
    PathTooShort(usize),
}

/// Grid sizes offered when creating a farm
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GridSize {
    /// 20 x 20 cells
    Small,
    /// 30 x 30 cells
    #[default]
    Medium,
    /// 40 x 40 cells
    Large,
}

impl GridSize {
    pub fn cells(&self) -> i32 {
        match self {
            GridSize::Small => 20,
            GridSize::Medium => 30,
            GridSize::Large => 40,
        }
    }
}

impl std::fmt::Display for GridSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cells = self.cells();
        write!(f, "{}x{}", cells, cells)
    }
}

fn default_boundary_margin() -> i32 {
    DEFAULT_BOUNDARY_MARGIN
}

/// Bounded layout grid of a farm
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    #[serde(default = "default_boundary_margin")]
    pub boundary_margin: i32,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            boundary_margin: DEFAULT_BOUNDARY_MARGIN,
        }
    }

    pub fn with_margin(mut self, boundary_margin: i32) -> Self {
        self.boundary_margin = boundary_margin;
        self
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        validate_grid_bounds(self.width, self.height, self.boundary_margin)
            .map_err(LayoutError::InvalidGrid)
    }

    /// Largest origin a `width` x `height` rectangle may take while keeping
    /// the margin. Either coordinate is below the margin when it cannot fit.
    pub fn max_origin(&self, width: i32, height: i32) -> Position {
        Position::new(
            self.width.saturating_sub(width).saturating_sub(self.boundary_margin),
            self.height.saturating_sub(height).saturating_sub(self.boundary_margin),
        )
    }

    /// Whether a rectangle lies fully inside the margin-bounded area
    pub fn contains(&self, bounds: &Bounds) -> bool {
        let m = self.boundary_margin;
        bounds.x >= m
            && bounds.y >= m
            && bounds.right() <= self.width.saturating_sub(m)
            && bounds.bottom() <= self.height.saturating_sub(m)
    }
}

impl From<GridSize> for Grid {
    fn from(size: GridSize) -> Self {
        Grid::new(size.cells(), size.cells())
    }
}

impl Default for Grid {
    fn default() -> Self {
        GridSize::default().into()
    }
}

/// Axis-aligned cell rectangle without identity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn at(position: Position, width: i32, height: i32) -> Self {
        Self::new(position.x, position.y, width, height)
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Grow by `by` cells on every side. Saturates at the `i32` range.
    pub fn expanded(&self, by: i32) -> Self {
        let grow = by.saturating_mul(2);
        Self::new(
            self.x.saturating_sub(by),
            self.y.saturating_sub(by),
            self.width.saturating_add(grow),
            self.height.saturating_add(grow),
        )
    }

    /// Interior intersection test. Rectangles that only share an edge do not
    /// overlap. Both placement scans and drag blocking use this predicate.
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

/// A plot footprint on the grid
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rectangle {
    pub id: Uuid,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rectangle {
    pub fn new(id: Uuid, x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            id,
            x,
            y,
            width,
            height,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }

    pub fn moved_to(&self, position: Position) -> Self {
        Self {
            x: position.x,
            y: position.y,
            ..*self
        }
    }

    pub fn overlaps(&self, other: &Rectangle) -> bool {
        self.bounds().overlaps(&other.bounds())
    }
}

/// Tunable layout behaviour
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LayoutRules {
    /// Preferred gap between plots for the spaced scan
    pub spacing: i32,
    /// When false, a drag that would land on another plot is blocked
    pub allow_overlap_on_drag: bool,
}

impl Default for LayoutRules {
    fn default() -> Self {
        Self {
            spacing: PLOT_SPACING,
            allow_overlap_on_drag: true,
        }
    }
}

/// Which tier of the placement search produced a position
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PlacementStrategy {
    /// Evenly spaced slot with a free buffer around the plot
    Spaced,
    /// First free cell-by-cell slot, plots may touch
    Dense,
    /// Grid is full: stacked below every existing plot, may leave the grid
    AppendBelow,
}

impl PlacementStrategy {
    pub fn is_collision_free(&self) -> bool {
        !matches!(self, PlacementStrategy::AppendBelow)
    }
}

impl std::fmt::Display for PlacementStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlacementStrategy::Spaced => write!(f, "spaced"),
            PlacementStrategy::Dense => write!(f, "dense"),
            PlacementStrategy::AppendBelow => write!(f, "append_below"),
        }
    }
}

/// Result of a placement search
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Placement {
    pub position: Position,
    pub strategy: PlacementStrategy,
}

/// Find a position for a new `width` x `height` plot using the default
/// spacing. Always returns a position for valid input; see [`find_placement_with`].
pub fn find_placement(
    existing: &[Rectangle],
    width: i32,
    height: i32,
    grid: &Grid,
) -> Result<Placement, LayoutError> {
    find_placement_with(existing, width, height, grid, &LayoutRules::default())
}

/// Find a position for a new plot in three tiers:
///
/// 1. spaced scan: origins stepped by the plot size plus spacing, requiring
///    the buffered candidate to miss every buffered existing plot;
/// 2. dense scan: every cell, plain overlap test;
/// 3. append below all existing plots at the left margin. This tier ignores
///    the lower grid bound and is reported as [`PlacementStrategy::AppendBelow`].
pub fn find_placement_with(
    existing: &[Rectangle],
    width: i32,
    height: i32,
    grid: &Grid,
    rules: &LayoutRules,
) -> Result<Placement, LayoutError> {
    validate_plot_dimensions(width, height).map_err(|reason| LayoutError::InvalidDimension {
        width,
        height,
        reason,
    })?;
    grid.validate()?;
    if rules.spacing < 0 {
        return Err(LayoutError::InvalidSpacing(rules.spacing));
    }

    let margin = grid.boundary_margin;
    let spacing = rules.spacing;
    let max = grid.max_origin(width, height);

    let buffered: Vec<Bounds> = existing
        .iter()
        .map(|r| r.bounds().expanded(spacing))
        .collect();
    let step_x = width.saturating_add(spacing);
    let step_y = height.saturating_add(spacing);
    let spaced = scan(margin, max, step_x, step_y, |pos| {
        let candidate = Bounds::at(pos, width, height).expanded(spacing);
        !buffered.iter().any(|b| b.overlaps(&candidate))
    });
    if let Some(position) = spaced {
        return Ok(Placement {
            position,
            strategy: PlacementStrategy::Spaced,
        });
    }

    let dense = scan(margin, max, 1, 1, |pos| {
        let candidate = Bounds::at(pos, width, height);
        !existing.iter().any(|r| r.bounds().overlaps(&candidate))
    });
    if let Some(position) = dense {
        return Ok(Placement {
            position,
            strategy: PlacementStrategy::Dense,
        });
    }

    let lowest_edge = existing.iter().map(|r| r.bounds().bottom()).max();
    let y = match lowest_edge {
        Some(bottom) => margin.max(bottom.saturating_add(spacing)),
        None => margin,
    };
    Ok(Placement {
        position: Position::new(margin, y),
        strategy: PlacementStrategy::AppendBelow,
    })
}

/// Row-major scan of origins in `[margin, max]`, returning the first one
/// accepted by `is_free`
fn scan(
    margin: i32,
    max: Position,
    step_x: i32,
    step_y: i32,
    mut is_free: impl FnMut(Position) -> bool,
) -> Option<Position> {
    for y in (margin..=max.y).step_by(step_y as usize) {
        for x in (margin..=max.x).step_by(step_x as usize) {
            let candidate = Position::new(x, y);
            if is_free(candidate) {
                return Some(candidate);
            }
        }
    }
    None
}

/// Clamp a continuous coordinate into `[lower, upper]` and round half-up to a
/// cell. `upper` below `lower` collapses to `lower`.
pub(crate) fn snap_axis(raw: f64, lower: i32, upper: i32) -> i32 {
    let lower = f64::from(lower);
    let upper = f64::from(upper).max(lower);
    let clamped = raw.max(lower).min(upper);
    (clamped + 0.5).floor() as i32
}
