//! Validation utilities for the Farm Layout Planner

use rust_decimal::Decimal;

/// Largest grid side or plot side, in cells
pub const MAX_LAYOUT_CELLS: i32 = 10_000;

/// Largest declared farm area, in acres
pub const MAX_FARM_AREA_ACRES: i64 = 1_000_000_000;

// ============================================================================
// Layout Validations
// ============================================================================

/// Validate plot dimensions (whole cells, between 1 and [`MAX_LAYOUT_CELLS`])
pub fn validate_plot_dimensions(width: i32, height: i32) -> Result<(), &'static str> {
    if width < 1 || height < 1 {
        return Err("Plot width and height must be at least 1 cell");
    }
    if width > MAX_LAYOUT_CELLS || height > MAX_LAYOUT_CELLS {
        return Err("Plot width and height must be at most 10000 cells");
    }
    Ok(())
}

/// Validate grid bounds leave at least one usable cell inside the margin
pub fn validate_grid_bounds(width: i32, height: i32, margin: i32) -> Result<(), &'static str> {
    if width < 1 || height < 1 {
        return Err("Grid width and height must be positive");
    }
    if width > MAX_LAYOUT_CELLS || height > MAX_LAYOUT_CELLS {
        return Err("Grid width and height must be at most 10000 cells");
    }
    if margin < 0 {
        return Err("Boundary margin cannot be negative");
    }
    let double_margin = 2 * i64::from(margin);
    if double_margin >= i64::from(width) || double_margin >= i64::from(height) {
        return Err("Boundary margin leaves no usable cells");
    }
    Ok(())
}

/// Check if a plot of the given size fits inside the margin of a grid
pub fn fits_in_grid(
    width: i32,
    height: i32,
    grid_width: i32,
    grid_height: i32,
    margin: i32,
) -> bool {
    let double_margin = 2 * i64::from(margin);
    i64::from(width) + double_margin <= i64::from(grid_width)
        && i64::from(height) + double_margin <= i64::from(grid_height)
}

// ============================================================================
// GPS Validations
// ============================================================================

/// Validate latitude is a finite value in [-90, 90]
pub fn validate_latitude(latitude: f64) -> Result<(), &'static str> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err("Latitude must be between -90 and 90");
    }
    Ok(())
}

/// Validate longitude is a finite value in [-180, 180]
pub fn validate_longitude(longitude: f64) -> Result<(), &'static str> {
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err("Longitude must be between -180 and 180");
    }
    Ok(())
}

pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), &'static str> {
    validate_latitude(latitude)?;
    validate_longitude(longitude)
}

/// Validate a reported GPS accuracy radius
pub fn validate_gps_accuracy(accuracy_meters: f64) -> Result<(), &'static str> {
    if !accuracy_meters.is_finite() || accuracy_meters < 0.0 {
        return Err("GPS accuracy must be a non-negative number of meters");
    }
    Ok(())
}

// ============================================================================
// Farm Validations
// ============================================================================

/// Validate farm or plot name
pub fn validate_name(name: &str) -> Result<(), &'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Name cannot be empty");
    }
    if trimmed.chars().count() > 100 {
        return Err("Name must be at most 100 characters");
    }
    Ok(())
}

/// Validate declared farm area
pub fn validate_area_acres(acres: Decimal) -> Result<(), &'static str> {
    if acres <= Decimal::ZERO {
        return Err("Farm area must be greater than zero");
    }
    if acres > Decimal::from(MAX_FARM_AREA_ACRES) {
        return Err("Farm area must be at most 1000000000 acres");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Layout Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_plot_dimensions() {
        assert!(validate_plot_dimensions(1, 1).is_ok());
        assert!(validate_plot_dimensions(5, 3).is_ok());
        assert!(validate_plot_dimensions(0, 3).is_err());
        assert!(validate_plot_dimensions(3, -2).is_err());
        assert!(validate_plot_dimensions(MAX_LAYOUT_CELLS, 1).is_ok());
        assert!(validate_plot_dimensions(i32::MAX, 1).is_err());
    }

    #[test]
    fn test_validate_grid_bounds() {
        assert!(validate_grid_bounds(30, 30, 1).is_ok());
        assert!(validate_grid_bounds(3, 3, 1).is_ok());
        assert!(validate_grid_bounds(5, 5, 0).is_ok());
        assert!(validate_grid_bounds(0, 30, 1).is_err());
        assert!(validate_grid_bounds(30, 30, -1).is_err());
        assert!(validate_grid_bounds(2, 30, 1).is_err()); // No usable column
        assert!(validate_grid_bounds(30, 30, i32::MAX).is_err());
        assert!(validate_grid_bounds(i32::MAX, 30, 1).is_err());
    }

    #[test]
    fn test_fits_in_grid() {
        assert!(fits_in_grid(28, 28, 30, 30, 1));
        assert!(!fits_in_grid(29, 28, 30, 30, 1));
        assert!(fits_in_grid(30, 1, 30, 30, 0));
        assert!(!fits_in_grid(i32::MAX, 1, 30, 30, 1));
        assert!(!fits_in_grid(1, 1, 30, 30, i32::MAX));
    }

    // ========================================================================
    // GPS Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_coordinates_valid() {
        assert!(validate_coordinates(0.0, 0.0).is_ok());
        assert!(validate_coordinates(-90.0, 180.0).is_ok());
        assert!(validate_coordinates(18.7883, 98.9853).is_ok());
    }

    #[test]
    fn test_validate_coordinates_invalid() {
        assert!(validate_coordinates(90.5, 0.0).is_err());
        assert!(validate_coordinates(0.0, -180.1).is_err());
        assert!(validate_coordinates(f64::NAN, 0.0).is_err());
        assert!(validate_coordinates(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_gps_accuracy() {
        assert!(validate_gps_accuracy(0.0).is_ok());
        assert!(validate_gps_accuracy(12.5).is_ok());
        assert!(validate_gps_accuracy(-0.1).is_err());
        assert!(validate_gps_accuracy(f64::NAN).is_err());
    }

    // ========================================================================
    // Farm Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Back garden").is_ok());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_area_acres() {
        assert!(validate_area_acres(Decimal::new(5, 1)).is_ok());
        assert!(validate_area_acres(Decimal::ZERO).is_err());
        assert!(validate_area_acres(Decimal::from(-2)).is_err());
        assert!(validate_area_acres(Decimal::from(MAX_FARM_AREA_ACRES)).is_ok());
        assert!(validate_area_acres(Decimal::MAX).is_err());
    }
}
