//! Contract between the overlay and the map that hosts it.
//!
//! The host owns the camera: projection, zoom, pixel origin and the event
//! stream. The overlay only reads from it and registers interest in events.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ringlayer_core::{GeoPoint, GeoProjection, Point};

/// Event classes the overlay subscribes to and debounces by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MapEventKind {
    Move,
    /// A `Move` emitted by a programmatic camera tween.
    FlyStep,
    Resize,
    ZoomAnim,
    ZoomEnd,
    ViewReset,
}

impl MapEventKind {
    /// Kinds a host delivers; `FlyStep` arrives as a flagged `Move`.
    pub const SUBSCRIBED: [MapEventKind; 5] = [
        MapEventKind::Move,
        MapEventKind::Resize,
        MapEventKind::ZoomAnim,
        MapEventKind::ZoomEnd,
        MapEventKind::ViewReset,
    ];

    /// Whether events of this class go through the debouncer.
    pub fn is_debounced(&self) -> bool {
        !matches!(self, MapEventKind::ViewReset)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MapEvent {
    Move { fly: bool },
    Resize { size: Point },
    ZoomAnim { zoom: f64, center: GeoPoint },
    ZoomEnd,
    ViewReset,
}

impl MapEvent {
    pub fn kind(&self) -> MapEventKind {
        match self {
            MapEvent::Move { fly: true } => MapEventKind::FlyStep,
            MapEvent::Move { fly: false } => MapEventKind::Move,
            MapEvent::Resize { .. } => MapEventKind::Resize,
            MapEvent::ZoomAnim { .. } => MapEventKind::ZoomAnim,
            MapEvent::ZoomEnd => MapEventKind::ZoomEnd,
            MapEvent::ViewReset => MapEventKind::ViewReset,
        }
    }

    /// Kind under which the host dispatches this event.
    pub fn subscription(&self) -> MapEventKind {
        match self.kind() {
            MapEventKind::FlyStep => MapEventKind::Move,
            kind => kind,
        }
    }
}

/// A map able to host an overlay.
///
/// Point conventions follow Leaflet: container points are relative to the
/// visible map's top-left corner; layer points are relative to the map's
/// pixel origin and stay fixed while the map pans.
pub trait MapHost: GeoProjection {
    fn container_point_to_lat_lng(&self, point: Point) -> GeoPoint;
    fn container_point_to_layer_point(&self, point: Point) -> Point;
    /// Absolute world pixel of `geo` at `zoom`.
    fn project(&self, geo: GeoPoint, zoom: f64) -> Point;
    fn pixel_origin(&self) -> Point;
    /// Layer point `geo` will occupy once the view settles at `zoom`/`center`.
    fn lat_lng_to_new_layer_point(&self, geo: GeoPoint, zoom: f64, center: GeoPoint) -> Point;

    fn zoom(&self) -> f64;
    fn center(&self) -> GeoPoint;
    /// Visible viewport size in pixels.
    fn size(&self) -> Point;
    /// Scale factor from zoom level `from` to zoom level `to`.
    fn zoom_scale(&self, to: f64, from: f64) -> f64;
    fn zoom_animation_enabled(&self) -> bool;

    fn subscribe(&mut self, kind: MapEventKind);
    fn unsubscribe(&mut self, kind: MapEventKind);
    fn add_overlay(&mut self, overlay: Uuid);
    fn remove_overlay(&mut self, overlay: Uuid);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fly_move_is_its_own_class() {
        assert_eq!(MapEvent::Move { fly: true }.kind(), MapEventKind::FlyStep);
        assert_eq!(MapEvent::Move { fly: true }.subscription(), MapEventKind::Move);
        assert_eq!(MapEvent::Move { fly: false }.kind(), MapEventKind::Move);
    }

    #[test]
    fn test_view_reset_is_not_debounced() {
        assert!(!MapEventKind::ViewReset.is_debounced());
        assert!(MapEventKind::SUBSCRIBED
            .iter()
            .filter(|k| **k != MapEventKind::ViewReset)
            .all(MapEventKind::is_debounced));
    }
}
