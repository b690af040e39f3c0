use serde::{Deserialize, Serialize};

use ringlayer_core::{GeoPoint, Point};

use crate::config::DriftConfig;

/// Uniform scale followed by a translation, applied to the surface content.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContentTransform {
    /// Translation in surface pixels.
    pub translate: Point,
    /// Scale factor about the surface origin (1.0 = none).
    pub scale: f64,
}

impl Default for ContentTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl ContentTransform {
    pub fn new(translate: Point, scale: f64) -> Self {
        Self { translate, scale }
    }

    pub fn identity() -> Self {
        Self {
            translate: Point::ZERO,
            scale: 1.0,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.scale == 1.0 && self.translate == Point::ZERO
    }

    /// Surface point of a geometry coordinate.
    pub fn apply(&self, point: &Point) -> Point {
        point.multiply_by(self.scale).add(&self.translate)
    }

    /// Geometry coordinate under a surface point.
    pub fn invert(&self, point: &Point) -> Point {
        point.subtract(&self.translate).multiply_by(1.0 / self.scale)
    }
}

/// Alignment bookkeeping between drawn geometry and the host view.
///
/// Positions are layer pixels. The surface element sits at `canvas_offset`
/// (shifted up-left by the padding), and the content is placed at
/// `origin_position - canvas_offset`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    pub padding_pixels: f64,
    /// Layer point of the container origin, refreshed on every pan.
    pub canvas_offset: Point,
    /// Content anchor in layer pixels before subtracting `canvas_offset`.
    pub origin_position: Point,
    /// Geographic point under the container origin at the last full draw.
    pub anchor: Option<GeoPoint>,
    /// Zoom the drawn geometry was built at.
    pub last_draw_zoom: f64,
    /// Last committed zoom target.
    pub current_zoom: f64,
    /// Scale of the content relative to `last_draw_zoom`.
    pub zoom_scale: f64,
    pub drift: DriftConfig,
}

impl ViewportState {
    pub fn new(padding_pixels: f64, drift: DriftConfig) -> Self {
        Self {
            padding_pixels,
            canvas_offset: Point::ZERO,
            origin_position: Point::ZERO,
            anchor: None,
            last_draw_zoom: 0.0,
            current_zoom: 0.0,
            zoom_scale: 1.0,
            drift,
        }
    }

    pub fn padding(&self) -> Point {
        Point::splat(self.padding_pixels)
    }

    /// Offset keeping the visible window centred in the padded surface when
    /// the content (padding included) is scaled by `scale`.
    pub fn padding_translate(&self, scale: f64) -> Point {
        self.padding().multiply_by(1.0 - scale)
    }

    /// Backing surface size for a viewport of `viewport_size`.
    pub fn surface_size(&self, viewport_size: Point) -> Point {
        viewport_size.add(&self.padding().multiply_by(2.0))
    }

    /// Content translation for a plain pan.
    pub fn pan_content_position(&self) -> Point {
        self.origin_position.subtract(&self.canvas_offset)
    }

    /// Back to the initial state: nothing drawn, no anchor.
    pub fn forget_anchor(&mut self) {
        self.anchor = None;
        self.origin_position = self.canvas_offset;
        self.zoom_scale = 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_round_trip() {
        let t = ContentTransform::new(Point::new(-30.0, 12.5), 2.0);
        let p = Point::new(140.0, 80.0);
        let back = t.invert(&t.apply(&p));
        assert!((back.x - p.x).abs() < 1e-9 && (back.y - p.y).abs() < 1e-9);
        assert!(ContentTransform::identity().is_identity());
        assert!(!t.is_identity());
    }

    #[test]
    fn test_padding_translate() {
        let state = ViewportState::new(128.0, DriftConfig::default());
        assert_eq!(state.padding_translate(1.0), Point::ZERO);
        assert_eq!(state.padding_translate(2.0), Point::splat(-128.0));
        assert_eq!(state.padding_translate(0.5), Point::splat(64.0));
    }

    #[test]
    fn test_surface_size_adds_padding_on_both_sides() {
        let state = ViewportState::new(128.0, DriftConfig::default());
        assert_eq!(state.surface_size(Point::new(800.0, 600.0)), Point::new(1056.0, 856.0));
    }

    #[test]
    fn test_pan_content_position() {
        let mut state = ViewportState::new(10.0, DriftConfig::default());
        state.origin_position = Point::new(5.0, 5.0);
        state.canvas_offset = Point::new(-20.0, 40.0);
        assert_eq!(state.pan_content_position(), Point::new(25.0, -35.0));
    }
}
