//! Great-circle distances via the spherical law of cosines.
//!
//! The radius and formula are part of the conversion contract: link lengths
//! feed street lengths downstream, so swapping in a haversine or geodesic
//! implementation would change every emitted length.

use geo::Point;

/// Mean Earth radius in meters used for all link lengths.
const EARTH_RADIUS_M: f64 = 6_380_000.0;

/// Distance in meters between two WGS84 points (degrees, x = lon, y = lat).
pub fn great_circle_distance(start: Point<f64>, end: Point<f64>) -> f64 {
    if start == end {
        return 0.0;
    }

    let (start_lat, end_lat) = (start.y().to_radians(), end.y().to_radians());
    let delta_lon = end.x().to_radians() - start.x().to_radians();

    let cosine = end_lat.sin() * start_lat.sin()
        + end_lat.cos() * start_lat.cos() * delta_lon.cos();

    // rounding can push the cosine slightly out of the acos domain
    cosine.clamp(-1.0, 1.0).acos() * EARTH_RADIUS_M
}
