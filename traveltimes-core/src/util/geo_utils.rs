use geo::{Haversine, Length, LineString, Point};

/// haversine length in meters of the line through the provided points.
/// fewer than two points have no length.
pub fn haversine_length_meters(points: &[Point<f64>]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    let linestring: LineString<f64> = points.iter().map(|p| p.0).collect();
    Haversine.length(&linestring)
}
