//! Path algebra contract and its `geo`-backed implementation.
//!
//! The overlay never clips polygons itself. It needs a capability that can
//! build closed paths, smooth and simplify them in pixel space, subtract one
//! path from another, and answer a few queries; [`PathAlgebra`] is that
//! contract and [`GeoPathAlgebra`] fulfils it with the `geo` crate.

use std::fmt::Debug;

use geo::{
    Area, BooleanOps, BoundingRect, ChaikinSmoothing, Contains, Coord, LineString, MultiPolygon,
    Polygon, Scale, Simplify, Translate,
};

use crate::geometry::{BBox, Point};

pub trait PathAlgebra {
    /// A filled region, possibly with holes and several disjoint parts.
    type Path: Clone + Debug;

    /// Closed path through `points` in order. The closing edge is implicit.
    fn closed_path(&self, points: &[Point]) -> Self::Path;
    /// Fit a smoother curve through the path's vertices.
    fn smooth(&self, path: &Self::Path, iterations: usize) -> Self::Path;
    /// Drop vertices that deviate less than `tolerance` pixels from the shape.
    fn simplify(&self, path: &Self::Path, tolerance: f64) -> Self::Path;
    /// Boolean difference `path − cut`.
    fn subtract(&self, path: &Self::Path, cut: &Self::Path) -> Self::Path;
    fn translate(&self, path: &Self::Path, offset: Point) -> Self::Path;
    /// Uniform scale about `origin`.
    fn scale(&self, path: &Self::Path, factor: f64, origin: Point) -> Self::Path;
    fn bounds(&self, path: &Self::Path) -> Option<BBox>;
    fn contains(&self, path: &Self::Path, point: Point) -> bool;
    fn area(&self, path: &Self::Path) -> f64;
    /// Every boundary ring (exteriors followed by their holes), unclosed.
    fn rings(&self, path: &Self::Path) -> Vec<Vec<Point>>;

    fn is_empty(&self, path: &Self::Path) -> bool {
        self.area(path) <= 0.0
    }
}

/// [`PathAlgebra`] over `geo::MultiPolygon<f64>`.
///
/// Smoothing is Chaikin corner cutting, simplification is Ramer–Douglas–Peucker
/// and subtraction is `geo`'s boolean difference.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoPathAlgebra;

fn to_coord(p: Point) -> Coord<f64> {
    Coord { x: p.x, y: p.y }
}

fn ring_points(line: &LineString<f64>) -> Vec<Point> {
    let mut points: Vec<Point> = line.coords().map(|c| Point::new(c.x, c.y)).collect();
    // geo stores rings closed; callers expect the implicit closing edge.
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    points
}

impl PathAlgebra for GeoPathAlgebra {
    type Path = MultiPolygon<f64>;

    fn closed_path(&self, points: &[Point]) -> Self::Path {
        let exterior: LineString<f64> = points.iter().copied().map(to_coord).collect();
        MultiPolygon::new(vec![Polygon::new(exterior, Vec::new())])
    }

    fn smooth(&self, path: &Self::Path, iterations: usize) -> Self::Path {
        if iterations == 0 {
            return path.clone();
        }
        path.chaikin_smoothing(iterations)
    }

    fn simplify(&self, path: &Self::Path, tolerance: f64) -> Self::Path {
        if tolerance <= 0.0 {
            return path.clone();
        }
        path.simplify(&tolerance)
    }

    fn subtract(&self, path: &Self::Path, cut: &Self::Path) -> Self::Path {
        path.difference(cut)
    }

    fn translate(&self, path: &Self::Path, offset: Point) -> Self::Path {
        path.translate(offset.x, offset.y)
    }

    fn scale(&self, path: &Self::Path, factor: f64, origin: Point) -> Self::Path {
        path.scale_around_point(factor, factor, to_coord(origin))
    }

    fn bounds(&self, path: &Self::Path) -> Option<BBox> {
        path.bounding_rect().map(|rect| {
            BBox::new(
                Point::new(rect.min().x, rect.min().y),
                Point::new(rect.max().x, rect.max().y),
            )
        })
    }

    fn contains(&self, path: &Self::Path, point: Point) -> bool {
        path.contains(&geo::Point::new(point.x, point.y))
    }

    fn area(&self, path: &Self::Path) -> f64 {
        path.unsigned_area()
    }

    fn rings(&self, path: &Self::Path) -> Vec<Vec<Point>> {
        let mut rings = Vec::new();
        for polygon in path.iter() {
            rings.push(ring_points(polygon.exterior()));
            rings.extend(polygon.interiors().iter().map(ring_points));
        }
        rings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(min: f64, max: f64) -> Vec<Point> {
        vec![
            Point::new(min, min),
            Point::new(max, min),
            Point::new(max, max),
            Point::new(min, max),
        ]
    }

    #[test]
    fn test_closed_path_area_and_bounds() {
        let algebra = GeoPathAlgebra;
        let path = algebra.closed_path(&square(0.0, 100.0));
        assert!((algebra.area(&path) - 10_000.0).abs() < 1e-9);
        let bb = algebra.bounds(&path).unwrap();
        assert_eq!(bb, BBox::new(Point::new(0.0, 0.0), Point::new(100.0, 100.0)));
    }

    #[test]
    fn test_subtract_interior_hole() {
        let algebra = GeoPathAlgebra;
        let outer = algebra.closed_path(&square(0.0, 100.0));
        let hole = algebra.closed_path(&square(25.0, 75.0));
        let donut = algebra.subtract(&outer, &hole);
        assert!((algebra.area(&donut) - 7_500.0).abs() < 1e-6);
        assert!(algebra.contains(&donut, Point::new(10.0, 10.0)));
        assert!(!algebra.contains(&donut, Point::new(50.0, 50.0)));
        assert_eq!(algebra.rings(&donut).len(), 2);
    }

    #[test]
    fn test_smoothing_stays_inside_bounds() {
        let algebra = GeoPathAlgebra;
        let path = algebra.closed_path(&square(0.0, 100.0));
        let smooth = algebra.smooth(&path, 3);
        let bb = algebra.bounds(&smooth).unwrap();
        assert!(algebra.bounds(&path).unwrap().contains_bbox(&bb));
        assert!(algebra.area(&smooth) < algebra.area(&path));
    }

    #[test]
    fn test_simplify_drops_collinear_vertices() {
        let algebra = GeoPathAlgebra;
        let mut points = square(0.0, 100.0);
        points.insert(1, Point::new(50.0, 0.2));
        let path = algebra.closed_path(&points);
        let simple = algebra.simplify(&path, 1.0);
        assert_eq!(algebra.rings(&simple)[0].len(), 4);
    }

    #[test]
    fn test_translate_and_scale() {
        let algebra = GeoPathAlgebra;
        let path = algebra.closed_path(&square(0.0, 10.0));
        let moved = algebra.translate(&path, Point::new(5.0, -5.0));
        assert_eq!(
            algebra.bounds(&moved).unwrap(),
            BBox::new(Point::new(5.0, -5.0), Point::new(15.0, 5.0))
        );
        let scaled = algebra.scale(&path, 2.0, Point::ZERO);
        assert_eq!(
            algebra.bounds(&scaled).unwrap(),
            BBox::new(Point::new(0.0, 0.0), Point::new(20.0, 20.0))
        );
    }

    #[test]
    fn test_empty_path() {
        let algebra = GeoPathAlgebra;
        let outer = algebra.closed_path(&square(0.0, 10.0));
        let cover = algebra.closed_path(&square(-5.0, 15.0));
        assert!(algebra.is_empty(&algebra.subtract(&outer, &cover)));
        assert!(algebra.bounds(&algebra.subtract(&outer, &cover)).is_none());
    }
}
