//! Viewport sync engine.
//!
//! Keeps drawn geometry aligned with the host view. Pans and camera tweens
//! only move the surface element and the content transform; zooms rescale the
//! content about the padded origin. Geometry is rebuilt by the layer, either
//! on view reset or when a committed zoom pass reports too much drift.

use ringlayer_core::{GeoPoint, Point};

use crate::diagnostics::Diagnostics;
use crate::host::MapHost;
use crate::surface::Canvas;
use crate::viewport::{ContentTransform, ViewportState};

#[derive(Debug, Clone)]
pub struct ViewportSyncEngine {
    state: ViewportState,
    diagnostics: Diagnostics,
}

impl ViewportSyncEngine {
    pub fn new(state: ViewportState, diagnostics: Diagnostics) -> Self {
        Self { state, diagnostics }
    }

    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    /// Refresh `canvas_offset` from the host and move the element there.
    fn realign_element<P>(&mut self, map: &dyn MapHost, canvas: &mut Canvas<P>) {
        let offset = map.container_point_to_layer_point(Point::ZERO);
        self.state.canvas_offset = offset;
        canvas.set_element_position(offset);
    }

    /// Pan ("move") handler. Fly-flagged moves go through [`Self::on_fly_step`]
    /// after the element has been repositioned.
    pub fn on_move<P>(&mut self, map: &dyn MapHost, canvas: &mut Canvas<P>, fly: bool) {
        self.realign_element(map, canvas);
        if fly {
            self.on_fly_step(map, canvas);
            return;
        }
        if self.state.anchor.is_none() {
            // Nothing drawn; keep the empty content in the current frame.
            self.state.origin_position = self.state.canvas_offset;
        }
        let position = self.state.pan_content_position();
        canvas.set_transform(ContentTransform::new(position, self.state.zoom_scale));
        self.diagnostics.trace(format_args!(
            "pan: offset={:?} content={:?}",
            self.state.canvas_offset, position
        ));
    }

    /// Camera tween step: place the content from the fixed anchor under the
    /// current view. No-op until something has been drawn.
    pub fn on_fly_step<P>(&mut self, map: &dyn MapHost, canvas: &mut Canvas<P>) {
        let Some(anchor) = self.state.anchor else {
            return;
        };
        let zoom = map.zoom();
        let scale = map.zoom_scale(zoom, self.state.last_draw_zoom);
        let origin = self.fly_origin(map, anchor, zoom, scale);
        self.state.origin_position = origin;
        self.state.zoom_scale = scale;
        let position = origin.subtract(&self.state.canvas_offset);
        canvas.set_transform(ContentTransform::new(position, scale));
        self.diagnostics.trace(format_args!(
            "fly: zoom={zoom} scale={scale} content={position:?}"
        ));
    }

    /// Layer position of the content anchor for a tween frame at `zoom`.
    pub fn fly_origin(&self, map: &dyn MapHost, anchor: GeoPoint, zoom: f64, scale: f64) -> Point {
        map.project(anchor, zoom)
            .subtract(&map.pixel_origin())
            .add(&self.state.padding_translate(scale))
    }

    /// Resize the surface to the padded viewport. Returns whether it changed.
    pub fn on_resize<P>(&mut self, canvas: &mut Canvas<P>, viewport_size: Point) -> bool {
        let required = self.state.surface_size(viewport_size);
        let resized = canvas.resize(required);
        if resized {
            log::debug!("surface resized to {}x{}", required.x, required.y);
        }
        resized
    }

    /// Zoom recomputation toward `target_zoom`/`target_center`.
    ///
    /// The content is scaled by the ratio between the target and the zoom the
    /// geometry was built at, and placed so the anchor lands where the host
    /// will put it. With `save_data` the result is committed and the return
    /// value says whether drift exceeds the configured threshold, in which
    /// case the caller rebuilds and runs the pass again.
    pub fn recalc_zoom<P>(
        &mut self,
        map: &dyn MapHost,
        canvas: &mut Canvas<P>,
        target_zoom: f64,
        target_center: GeoPoint,
        save_data: bool,
    ) -> bool {
        let Some(anchor) = self.state.anchor else {
            if save_data {
                self.state.current_zoom = target_zoom;
            }
            return false;
        };
        self.realign_element(map, canvas);

        let scale = map.zoom_scale(target_zoom, self.state.last_draw_zoom);
        let origin = map
            .lat_lng_to_new_layer_point(anchor, target_zoom, target_center)
            .add(&self.state.padding_translate(scale));
        let position = origin.subtract(&self.state.canvas_offset);
        canvas.set_transform(ContentTransform::new(position, scale));
        self.diagnostics.trace(format_args!(
            "zoom: target={target_zoom} scale={scale} content={position:?} commit={save_data}"
        ));

        if !save_data {
            return false;
        }
        self.state.current_zoom = target_zoom;
        self.state.origin_position = origin;
        self.state.zoom_scale = scale;
        self.state
            .drift
            .exceeded(self.state.last_draw_zoom, target_zoom, scale)
    }

    /// Bookkeeping after geometry was (re)built at the host's current view.
    pub fn record_draw<P>(&mut self, map: &dyn MapHost, canvas: &mut Canvas<P>) {
        self.realign_element(map, canvas);
        self.state.origin_position = self.state.canvas_offset;
        self.state.anchor = Some(map.container_point_to_lat_lng(Point::ZERO));
        let zoom = map.zoom();
        self.state.last_draw_zoom = zoom;
        self.state.current_zoom = zoom;
        self.state.zoom_scale = 1.0;
        canvas.reset_transform();
    }

    /// Whether geometry drawn now would share the existing content's frame.
    pub fn frame_is_current<P>(&self, map: &dyn MapHost, canvas: &Canvas<P>) -> bool {
        canvas.transform().is_identity()
            && map.container_point_to_layer_point(Point::ZERO) == self.state.canvas_offset
            && map.zoom() == self.state.last_draw_zoom
    }

    /// Return to the initial state: nothing drawn, no anchor.
    pub fn reset<P>(&mut self, canvas: &mut Canvas<P>) {
        self.state.forget_anchor();
        canvas.reset_transform();
    }
}
