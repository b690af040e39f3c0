use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::path::PathAlgebra;
use crate::polar::MIN_RING_SAMPLES;

/// Smoothing and simplification applied to every ring before subtraction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathOptions {
    pub smooth_iterations: usize,
    /// Simplification tolerance in pixels.
    pub simplify_tolerance: f64,
}

impl Default for PathOptions {
    fn default() -> Self {
        Self {
            smooth_iterations: 2,
            simplify_tolerance: 2.5,
        }
    }
}

fn ring_is_drawable(points: &[Point]) -> bool {
    points.len() >= MIN_RING_SAMPLES && points.iter().all(Point::is_finite)
}

/// Closed, smoothed, simplified path for one ring, or `None` when the ring
/// cannot enclose area.
fn shaped_ring<A>(algebra: &A, points: &[Point], options: &PathOptions) -> Option<A::Path>
where
    A: PathAlgebra + ?Sized,
{
    if !ring_is_drawable(points) {
        return None;
    }
    let path = algebra.closed_path(points);
    let path = algebra.smooth(&path, options.smooth_iterations);
    Some(algebra.simplify(&path, options.simplify_tolerance))
}

/// Build a hole-punched region from projected rings.
///
/// Holes are subtracted one after another in input order. Each subtraction
/// removes the whole hole, so overlapping holes cut out their union and any
/// order gives the same region. The finished region is shifted by
/// `(padding, padding)` into backing-surface space.
///
/// Returns `None` for a malformed outer ring or when the holes remove all of
/// its area. Malformed holes are skipped.
pub fn build_region<A>(
    algebra: &A,
    outer: &[Point],
    holes: &[Vec<Point>],
    options: &PathOptions,
    padding: f64,
) -> Option<A::Path>
where
    A: PathAlgebra + ?Sized,
{
    let mut region = shaped_ring(algebra, outer, options)?;

    for (index, hole) in holes.iter().enumerate() {
        match shaped_ring(algebra, hole, options) {
            Some(cut) => region = algebra.subtract(&region, &cut),
            None => log::warn!(
                "skipping hole {index}: {} points cannot enclose area",
                hole.len()
            ),
        }
    }

    if algebra.is_empty(&region) {
        return None;
    }
    Some(algebra.translate(&region, Point::splat(padding)))
}
