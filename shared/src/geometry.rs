//! Field boundary geometry over geographic coordinates
//!
//! Distances use the haversine great-circle formula. Areas use a local
//! equirectangular projection around the centroid of the boundary followed by
//! the planar polygon area from `geo`, which is accurate for field-sized
//! polygons.

use geo::{Area, LineString, Polygon};

use crate::types::GpsCoordinates;

/// Mean Earth radius used by the haversine formula
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Length of one degree of latitude in the planar projection
pub const METERS_PER_DEGREE_LATITUDE: f64 = 111_320.0;

/// International acre. Used for every acre conversion in the platform.
pub const SQUARE_METERS_PER_ACRE: f64 = 4_046.856_422_4;

/// Anything that carries a latitude/longitude pair in decimal degrees
pub trait GeoPoint {
    fn latitude(&self) -> f64;
    fn longitude(&self) -> f64;
}

impl GeoPoint for GpsCoordinates {
    fn latitude(&self) -> f64 {
        self.latitude
    }

    fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Great-circle distance in meters between two points
pub fn haversine_distance<A: GeoPoint + ?Sized, B: GeoPoint + ?Sized>(a: &A, b: &B) -> f64 {
    let phi1 = a.latitude().to_radians();
    let phi2 = b.latitude().to_radians();
    let delta_phi = (b.latitude() - a.latitude()).to_radians();
    let delta_lambda = (b.longitude() - a.longitude()).to_radians();

    let h = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_METERS * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Project points onto a local plane in meters, centred on their mean
/// latitude/longitude. Returns `(x, y)` pairs where x grows east and y north.
pub fn project_to_plane<P: GeoPoint>(points: &[P]) -> Vec<(f64, f64)> {
    if points.is_empty() {
        return Vec::new();
    }

    let count = points.len() as f64;
    let mean_latitude = points.iter().map(GeoPoint::latitude).sum::<f64>() / count;
    let mean_longitude = points.iter().map(GeoPoint::longitude).sum::<f64>() / count;

    let meters_per_degree_longitude =
        METERS_PER_DEGREE_LATITUDE * mean_latitude.to_radians().cos();

    points
        .iter()
        .map(|p| {
            (
                (p.longitude() - mean_longitude) * meters_per_degree_longitude,
                (p.latitude() - mean_latitude) * METERS_PER_DEGREE_LATITUDE,
            )
        })
        .collect()
}

/// Unsigned area of a closed planar polygon (last vertex joins the first)
pub fn planar_area(vertices: &[(f64, f64)]) -> f64 {
    if vertices.len() < 3 {
        return 0.0;
    }
    let ring: LineString<f64> = vertices.to_vec().into();
    Polygon::new(ring, vec![]).unsigned_area()
}

/// Area in square meters enclosed by a boundary. Fewer than 3 points is not
/// yet a polygon and measures 0.
pub fn polygon_area<P: GeoPoint>(points: &[P]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    planar_area(&project_to_plane(points))
}

/// Closed perimeter length in meters. Fewer than 2 points measures 0.
pub fn polygon_perimeter<P: GeoPoint>(points: &[P]) -> f64 {
    let n = points.len();
    if n < 2 {
        return 0.0;
    }

    (0..n)
        .map(|i| haversine_distance(&points[i], &points[(i + 1) % n]))
        .sum()
}

/// Convert square meters to acres
pub fn square_meters_to_acres(square_meters: f64) -> f64 {
    square_meters / SQUARE_METERS_PER_ACRE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(latitude: f64, longitude: f64) -> GpsCoordinates {
        GpsCoordinates::new(latitude, longitude)
    }

    /// Four corners of a roughly `side` meter square anchored at `latitude`
    fn square(latitude: f64, side: f64) -> Vec<GpsCoordinates> {
        let dlat = side / METERS_PER_DEGREE_LATITUDE;
        let dlon = side / (METERS_PER_DEGREE_LATITUDE * latitude.to_radians().cos());
        vec![
            p(latitude, 0.0),
            p(latitude, dlon),
            p(latitude + dlat, dlon),
            p(latitude + dlat, 0.0),
        ]
    }

    #[test]
    fn test_haversine_zero_distance() {
        assert_eq!(haversine_distance(&p(13.75, 100.5), &p(13.75, 100.5)), 0.0);
    }

    #[test]
    fn test_haversine_one_degree_of_latitude() {
        // 2 * pi * R / 360
        let expected = 111_194.93;
        let d = haversine_distance(&p(0.0, 0.0), &p(1.0, 0.0));
        assert!((d - expected).abs() < 0.1, "got {}", d);
    }

    #[test]
    fn test_haversine_is_symmetric() {
        let a = p(18.79, 98.98);
        let b = p(18.80, 99.01);
        assert!((haversine_distance(&a, &b) - haversine_distance(&b, &a)).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_area_is_zero() {
        let empty: Vec<GpsCoordinates> = vec![];
        assert_eq!(polygon_area(&empty), 0.0);
        assert_eq!(polygon_area(&[p(1.0, 1.0)]), 0.0);
        assert_eq!(polygon_area(&[p(1.0, 1.0), p(1.001, 1.0)]), 0.0);
    }

    #[test]
    fn test_degenerate_perimeter_is_zero() {
        let empty: Vec<GpsCoordinates> = vec![];
        assert_eq!(polygon_perimeter(&empty), 0.0);
        assert_eq!(polygon_perimeter(&[p(1.0, 1.0)]), 0.0);
    }

    #[test]
    fn test_two_point_perimeter_is_out_and_back() {
        let a = p(0.0, 0.0);
        let b = p(0.0, 0.001);
        let perimeter = polygon_perimeter(&[a, b]);
        assert!((perimeter - 2.0 * haversine_distance(&a, &b)).abs() < 1e-9);
    }

    #[test]
    fn test_equator_square_area() {
        let points = [p(0.0, 0.0), p(0.0, 0.001), p(0.001, 0.001), p(0.001, 0.0)];
        let area = polygon_area(&points);
        let expected = (METERS_PER_DEGREE_LATITUDE * 0.001).powi(2);
        // cos(0.0005 deg) is 1 to within 1e-10
        assert!((area - expected).abs() < 0.01, "area {}", area);
        assert!((area - 12_392.14).abs() < 0.1);

        let acres = square_meters_to_acres(area);
        assert!((acres - area / 4_046.856_422_4).abs() < 1e-9);
        assert!((acres - 3.0622).abs() < 0.001);
    }

    #[test]
    fn test_hundred_meter_square_area_and_perimeter() {
        for latitude in [0.0, 18.8, 45.0, -33.9] {
            let points = square(latitude, 100.0);
            let area = polygon_area(&points);
            let perimeter = polygon_perimeter(&points);
            assert!((area - 10_000.0).abs() / 10_000.0 < 0.02, "lat {} area {}", latitude, area);
            assert!(
                (perimeter - 400.0).abs() / 400.0 < 0.02,
                "lat {} perimeter {}",
                latitude,
                perimeter
            );
        }
    }

    #[test]
    fn test_area_ignores_winding_direction() {
        let mut points = square(18.8, 50.0);
        let clockwise = polygon_area(&points);
        points.reverse();
        assert!((polygon_area(&points) - clockwise).abs() < 1e-6);
    }

    #[test]
    fn test_projection_is_centred() {
        let projected = project_to_plane(&square(10.0, 100.0));
        let sum_x: f64 = projected.iter().map(|(x, _)| x).sum();
        let sum_y: f64 = projected.iter().map(|(_, y)| y).sum();
        assert!(sum_x.abs() < 1e-6);
        assert!(sum_y.abs() < 1e-6);
    }

    #[test]
    fn test_planar_unit_square() {
        let vertices = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
        assert_eq!(planar_area(&vertices), 1.0);
    }

    #[test]
    fn test_planar_area_of_collinear_ring_is_zero() {
        let vertices = [(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)];
        assert_eq!(planar_area(&vertices), 0.0);
    }
}
