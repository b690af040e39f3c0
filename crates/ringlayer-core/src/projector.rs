//! Polar ring → container-pixel projection.

use crate::geodesy::destination;
use crate::geometry::{GeoPoint, Point};
use crate::polar::{DonutShape, Ring};

/// Quarter-turn subtracted from every sample bearing before the destination
/// lookup, so a sample at bearing 90 lands due north (screen up).
///
/// Existing sample sets are recorded in this convention.
pub const BEARING_OFFSET_DEG: f64 = 90.0;

/// Geographic → container-pixel conversion supplied by the host map.
pub trait GeoProjection {
    fn lat_lng_to_container_point(&self, geo: GeoPoint) -> Point;
}

/// Project one ring around `center` into container pixels.
///
/// Samples are sorted by bearing first (stable). An empty ring yields an
/// empty sequence, which callers treat as "no drawable geometry".
pub fn project_ring<P>(ring: &Ring, center: GeoPoint, projection: &P) -> Vec<Point>
where
    P: GeoProjection + ?Sized,
{
    ring.sorted()
        .into_iter()
        .map(|sample| {
            let geo = destination(
                center,
                sample.direction_degrees - BEARING_OFFSET_DEG,
                sample.distance_units,
            );
            projection.lat_lng_to_container_point(geo)
        })
        .collect()
}

/// Projected outer ring plus projected holes, in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectedShape {
    pub outer: Vec<Point>,
    pub holes: Vec<Vec<Point>>,
}

pub fn project_shape<P>(shape: &DonutShape, center: GeoPoint, projection: &P) -> ProjectedShape
where
    P: GeoProjection + ?Sized,
{
    ProjectedShape {
        outer: project_ring(&shape.outer, center, projection),
        holes: shape
            .holes
            .iter()
            .map(|hole| project_ring(hole, center, projection))
            .collect(),
    }
}
