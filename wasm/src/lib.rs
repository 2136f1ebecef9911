//! WebAssembly module for the Farm Layout Planner
//!
//! Provides client-side computation for:
//! - Automatic plot placement
//! - Drag constraint while a plot is moved
//! - Boundary survey measurement
//!
//! Structured values cross the boundary as JSON strings.

use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::geometry::*;
pub use shared::models::*;
pub use shared::types::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::log_1(&"farm-layout-wasm ready".into());
}

fn parse<T: serde::de::DeserializeOwned>(json: &str, what: &str) -> Result<T, JsValue> {
    serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid {} JSON: {}", what, e)))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn place(
    existing: &[Rectangle],
    width: i32,
    height: i32,
    grid: &Grid,
) -> Result<Placement, LayoutError> {
    find_placement(existing, width, height, grid)
}

/// Find a position for a new `width` x `height` plot.
///
/// `existing_json` is an array of rectangles and `grid_json` a grid; the
/// result is a placement object `{ position, strategy }`.
#[wasm_bindgen]
pub fn find_plot_placement(
    existing_json: &str,
    width: i32,
    height: i32,
    grid_json: &str,
) -> Result<String, JsValue> {
    let existing: Vec<Rectangle> = parse(existing_json, "plots")?;
    let grid: Grid = parse(grid_json, "grid")?;

    let placement =
        place(&existing, width, height, &grid).map_err(|e| JsValue::from_str(&e.to_string()))?;
    if placement.strategy == PlacementStrategy::AppendBelow {
        web_sys::console::warn_1(
            &format!("Grid full, plot appended below at {}", placement.position).into(),
        );
    }
    to_json(&placement)
}

fn drag(
    plot: &Rectangle,
    raw_x: f64,
    raw_y: f64,
    grid: &Grid,
    others: &[Rectangle],
    allow_overlap: bool,
) -> DragOutcome {
    let rules = LayoutRules {
        allow_overlap_on_drag: allow_overlap,
        ..LayoutRules::default()
    };
    constrain_drag_with(plot, raw_x, raw_y, grid, others, &rules)
}

/// Constrain a pointer-driven move of `plot_json` to the grid.
///
/// Returns a drag outcome: `moved` with the new position, `unchanged`, or
/// `blocked` when overlap is disallowed and the target collides.
#[wasm_bindgen]
pub fn constrain_plot_drag(
    plot_json: &str,
    raw_x: f64,
    raw_y: f64,
    grid_json: &str,
    others_json: &str,
    allow_overlap: bool,
) -> Result<String, JsValue> {
    let plot: Rectangle = parse(plot_json, "plot")?;
    let grid: Grid = parse(grid_json, "grid")?;
    let others: Vec<Rectangle> = parse(others_json, "plots")?;

    to_json(&drag(&plot, raw_x, raw_y, &grid, &others, allow_overlap))
}

/// Measure a walked boundary given as an array of boundary points
#[wasm_bindgen]
pub fn measure_field(points_json: &str) -> Result<String, JsValue> {
    let points: Vec<BoundaryPoint> = parse(points_json, "points")?;
    FieldMeasurement::from_points(points)
        .to_json()
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Great-circle distance in meters
#[wasm_bindgen]
pub fn haversine(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    haversine_distance(
        &GpsCoordinates::new(lat1, lon1),
        &GpsCoordinates::new(lat2, lon2),
    )
}

#[wasm_bindgen]
pub fn area_in_acres(square_meters: f64) -> f64 {
    square_meters_to_acres(square_meters)
}
