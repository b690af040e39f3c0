use crate::geometry::GeoPoint;

/// Mean Earth radius (meters) used for spherical destination math.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Point reached by travelling `distance_m` meters from `origin` along the
/// initial bearing `heading_deg` (degrees clockwise from north) on a sphere.
///
/// Headings outside `[0, 360)` wrap. The resulting longitude is normalized to
/// `[-180, 180]`.
pub fn destination(origin: GeoPoint, heading_deg: f64, distance_m: f64) -> GeoPoint {
    let heading = (heading_deg % 360.0 + 360.0) % 360.0;

    let lat1 = origin.lat.to_radians();
    let lon1 = origin.lng.to_radians();
    let theta = heading.to_radians();
    let delta = distance_m / EARTH_RADIUS_M;

    let (sin_lat1, cos_lat1) = lat1.sin_cos();
    let (sin_delta, cos_delta) = delta.sin_cos();

    let lat2 = (sin_lat1 * cos_delta + cos_lat1 * sin_delta * theta.cos()).asin();
    let lon2 = lon1
        + (theta.sin() * sin_delta * cos_lat1).atan2(cos_delta - sin_lat1 * lat2.sin());

    let mut lng = lon2.to_degrees();
    if lng > 180.0 {
        lng -= 360.0;
    } else if lng < -180.0 {
        lng += 360.0;
    }
    GeoPoint::new(lat2.to_degrees(), lng)
}
