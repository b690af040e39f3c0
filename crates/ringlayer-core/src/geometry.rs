use serde::{Deserialize, Serialize};

/// A 2D point in pixel space (container, layer or surface coordinates).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The same value on both axes, used for padding vectors.
    pub fn splat(v: f64) -> Self {
        Self { x: v, y: v }
    }

    pub fn add(&self, other: &Point) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(&self, other: &Point) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    pub fn multiply_by(&self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    pub fn round(&self) -> Self {
        Self::new(self.x.round(), self.y.round())
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// An axis-aligned bounding box in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub min: Point,
    pub max: Point,
}

impl BBox {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    pub fn from_points(points: &[Point]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let mut min_x = f64::MAX;
        let mut min_y = f64::MAX;
        let mut max_x = f64::MIN;
        let mut max_y = f64::MIN;
        for p in points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(Self {
            min: Point::new(min_x, min_y),
            max: Point::new(max_x, max_y),
        })
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    pub fn contains_point(&self, p: &Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// True when `other` lies entirely inside `self`.
    pub fn contains_bbox(&self, other: &BBox) -> bool {
        self.contains_point(&other.min) && self.contains_point(&other.max)
    }

    pub fn union(&self, other: &BBox) -> Self {
        Self {
            min: Point::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    /// Grow the box by `margin` pixels on every side.
    pub fn expand(&self, margin: f64) -> Self {
        Self {
            min: Point::new(self.min.x - margin, self.min.y - margin),
            max: Point::new(self.max.x + margin, self.max.y + margin),
        }
    }
}

/// A geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_point_arithmetic() {
        let a = Point::new(10.0, 20.0);
        let b = Point::new(1.5, -2.0);
        assert_eq!(a.add(&b), Point::new(11.5, 18.0));
        assert_eq!(a.subtract(&b), Point::new(8.5, 22.0));
        assert_eq!(b.multiply_by(2.0), Point::new(3.0, -4.0));
        assert_eq!(Point::new(1.4, -1.6).round(), Point::new(1.0, -2.0));
    }

    #[test]
    fn test_bbox_union() {
        let a = BBox::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        let b = BBox::new(Point::new(5.0, -5.0), Point::new(15.0, 8.0));
        let u = a.union(&b);
        assert_eq!(u, BBox::new(Point::new(0.0, -5.0), Point::new(15.0, 10.0)));
        assert_eq!(u.width(), 15.0);
        assert_eq!(u.center(), Point::new(7.5, 2.5));
    }

    #[test]
    fn test_bbox_expand_and_containment() {
        let inner = BBox::new(Point::new(1.0, 1.0), Point::new(9.0, 9.0));
        let outer = BBox::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        assert!(outer.contains_bbox(&inner));
        assert!(!inner.contains_bbox(&outer));
        assert!(inner.expand(1.0).contains_bbox(&outer));
    }

    #[test]
    fn test_bbox_from_empty_points() {
        assert!(BBox::from_points(&[]).is_none());
    }
}
