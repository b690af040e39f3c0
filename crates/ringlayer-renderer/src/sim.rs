//! In-process map host with Leaflet point semantics.
//!
//! `SimulatedMap` stands in for a live map in tests and the demo: spherical
//! Web Mercator projection with 256-pixel tiles, a rounded pixel origin, and a
//! map pane that moves on pan. Camera operations update the view and queue
//! the events a real map would dispatch; [`SimulatedMap::take_events`]
//! drains the ones the overlay subscribed to.

use std::collections::BTreeSet;
use std::f64::consts::PI;

use uuid::Uuid;

use ringlayer_core::{GeoPoint, GeoProjection, Point};

use crate::host::{MapEvent, MapEventKind, MapHost};

const EARTH_RADIUS: f64 = 6_378_137.0;
const MAX_LATITUDE: f64 = 85.051_128_779_8;
const TILE_SIZE: f64 = 256.0;

#[derive(Debug, Clone)]
pub struct SimulatedMap {
    zoom: f64,
    size: Point,
    pixel_origin: Point,
    /// Map pane offset from the container, Leaflet's `_getMapPanePos()`.
    pane_position: Point,
    zoom_animation: bool,
    subscriptions: BTreeSet<MapEventKind>,
    overlays: Vec<Uuid>,
    outbox: Vec<MapEvent>,
}

impl SimulatedMap {
    pub fn new(center: GeoPoint, zoom: f64, size: Point) -> Self {
        let mut map = Self {
            zoom,
            size,
            pixel_origin: Point::ZERO,
            pane_position: Point::ZERO,
            zoom_animation: true,
            subscriptions: BTreeSet::new(),
            overlays: Vec::new(),
            outbox: Vec::new(),
        };
        map.pixel_origin = map.new_pixel_origin(center, zoom);
        map
    }

    pub fn with_zoom_animation(mut self, enabled: bool) -> Self {
        self.zoom_animation = enabled;
        self
    }

    // ── Projection ───────────────────────────────────────────────────

    fn scale(zoom: f64) -> f64 {
        TILE_SIZE * 2f64.powf(zoom)
    }

    fn unproject(&self, point: Point, zoom: f64) -> GeoPoint {
        let k = 0.5 / (PI * EARTH_RADIUS);
        let s = Self::scale(zoom);
        let wx = (point.x / s - 0.5) / k;
        let wy = (point.y / s - 0.5) / -k;
        GeoPoint::new(
            (2.0 * (wy / EARTH_RADIUS).exp().atan() - PI / 2.0).to_degrees(),
            (wx / EARTH_RADIUS).to_degrees(),
        )
    }

    fn new_pixel_origin(&self, center: GeoPoint, zoom: f64) -> Point {
        self.project(center, zoom)
            .subtract(&self.size.multiply_by(0.5))
            .add(&self.pane_position)
            .round()
    }

    pub fn lat_lng_to_layer_point(&self, geo: GeoPoint) -> Point {
        self.project(geo, self.zoom).subtract(&self.pixel_origin)
    }

    pub fn layer_point_to_lat_lng(&self, point: Point) -> GeoPoint {
        self.unproject(point.add(&self.pixel_origin), self.zoom)
    }

    pub fn pane_position(&self) -> Point {
        self.pane_position
    }

    // ── Camera ───────────────────────────────────────────────────────

    /// Drag the map by `offset` container pixels.
    pub fn pan_by(&mut self, offset: Point) {
        self.pane_position = self.pane_position.subtract(&offset);
        self.emit(MapEvent::Move { fly: false });
    }

    /// Jump to a view, discarding the current pane offset.
    pub fn set_view(&mut self, center: GeoPoint, zoom: f64) {
        self.pane_position = Point::ZERO;
        self.zoom = zoom;
        self.pixel_origin = self.new_pixel_origin(center, zoom);
        self.emit(MapEvent::ViewReset);
        self.emit(MapEvent::Move { fly: false });
        self.emit(MapEvent::ZoomEnd);
    }

    /// Zoom around `center`, animated when zoom animation is enabled.
    pub fn zoom_to(&mut self, zoom: f64, center: GeoPoint) {
        if !self.zoom_animation {
            self.set_view(center, zoom);
            return;
        }
        self.emit(MapEvent::ZoomAnim { zoom, center });
        self.move_view(center, zoom);
        self.emit(MapEvent::Move { fly: false });
        self.emit(MapEvent::ZoomEnd);
    }

    /// Tween to `center`/`zoom` in `steps` frames, each a flagged move.
    pub fn fly_to(&mut self, center: GeoPoint, zoom: f64, steps: usize) {
        let from_center = self.center();
        let from_zoom = self.zoom;
        let steps = steps.max(1);
        for i in 1..=steps {
            let t = i as f64 / steps as f64;
            let frame_center = GeoPoint::new(
                from_center.lat + (center.lat - from_center.lat) * t,
                from_center.lng + (center.lng - from_center.lng) * t,
            );
            self.move_view(frame_center, from_zoom + (zoom - from_zoom) * t);
            self.emit(MapEvent::Move { fly: true });
        }
        self.emit(MapEvent::ZoomEnd);
    }

    /// Change the container size, keeping the centre in place.
    pub fn set_size(&mut self, size: Point) {
        if size == self.size {
            return;
        }
        let offset = self.size.subtract(&size).multiply_by(0.5).round();
        self.size = size;
        self.pane_position = self.pane_position.subtract(&offset);
        self.emit(MapEvent::Move { fly: false });
        self.emit(MapEvent::Resize { size });
    }

    fn move_view(&mut self, center: GeoPoint, zoom: f64) {
        self.zoom = zoom;
        self.pixel_origin = self.new_pixel_origin(center, zoom);
    }

    // ── Dispatch ─────────────────────────────────────────────────────

    fn emit(&mut self, event: MapEvent) {
        self.outbox.push(event);
    }

    /// Drain queued events the overlay is subscribed to, oldest first.
    pub fn take_events(&mut self) -> Vec<MapEvent> {
        let subscriptions = &self.subscriptions;
        std::mem::take(&mut self.outbox)
            .into_iter()
            .filter(|e| subscriptions.contains(&e.subscription()))
            .collect()
    }

    pub fn is_subscribed(&self, kind: MapEventKind) -> bool {
        self.subscriptions.contains(&kind)
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn has_overlay(&self, overlay: Uuid) -> bool {
        self.overlays.contains(&overlay)
    }
}

impl GeoProjection for SimulatedMap {
    fn lat_lng_to_container_point(&self, geo: GeoPoint) -> Point {
        self.lat_lng_to_layer_point(geo).add(&self.pane_position)
    }
}

impl MapHost for SimulatedMap {
    fn container_point_to_lat_lng(&self, point: Point) -> GeoPoint {
        self.layer_point_to_lat_lng(self.container_point_to_layer_point(point))
    }

    fn container_point_to_layer_point(&self, point: Point) -> Point {
        point.subtract(&self.pane_position)
    }

    fn project(&self, geo: GeoPoint, zoom: f64) -> Point {
        let lat = geo.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);
        let sin = lat.to_radians().sin();
        let wx = EARTH_RADIUS * geo.lng.to_radians();
        let wy = EARTH_RADIUS * ((1.0 + sin) / (1.0 - sin)).ln() / 2.0;
        let k = 0.5 / (PI * EARTH_RADIUS);
        let s = Self::scale(zoom);
        Point::new(s * (k * wx + 0.5), s * (-k * wy + 0.5))
    }

    fn pixel_origin(&self) -> Point {
        self.pixel_origin
    }

    fn lat_lng_to_new_layer_point(&self, geo: GeoPoint, zoom: f64, center: GeoPoint) -> Point {
        self.project(geo, zoom)
            .subtract(&self.new_pixel_origin(center, zoom))
    }

    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn center(&self) -> GeoPoint {
        self.container_point_to_lat_lng(self.size.multiply_by(0.5))
    }

    fn size(&self) -> Point {
        self.size
    }

    fn zoom_scale(&self, to: f64, from: f64) -> f64 {
        2f64.powf(to - from)
    }

    fn zoom_animation_enabled(&self) -> bool {
        self.zoom_animation
    }

    fn subscribe(&mut self, kind: MapEventKind) {
        self.subscriptions.insert(kind);
    }

    fn unsubscribe(&mut self, kind: MapEventKind) {
        self.subscriptions.remove(&kind);
    }

    fn add_overlay(&mut self, overlay: Uuid) {
        if !self.overlays.contains(&overlay) {
            self.overlays.push(overlay);
        }
    }

    fn remove_overlay(&mut self, overlay: Uuid) {
        self.overlays.retain(|o| *o != overlay);
    }
}
