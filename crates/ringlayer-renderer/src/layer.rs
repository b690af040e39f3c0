//! The region layer: scene, sync engine and surface behind one overlay.

use std::rc::Rc;

use uuid::Uuid;

use ringlayer_core::{BBox, DonutShape, GeoPathAlgebra, GeoPoint, PathAlgebra, Point};

use crate::config::LayerOptions;
use crate::debounce::Debouncer;
use crate::diagnostics::Diagnostics;
use crate::engine::ViewportSyncEngine;
use crate::error::{LayerError, LayerResult};
use crate::host::{MapEvent, MapEventKind, MapHost};
use crate::pipeline::RegionPainter;
use crate::region::{DrawnRegion, PointerEvent, PointerKind, RegionOptions, RegionSpec};
use crate::relay::relay_pointer;
use crate::render_data::RenderFrame;
use crate::scene::SceneStore;
use crate::surface::Canvas;
use crate::viewport::ViewportState;

/// Lifecycle of an overlay hosted by a map.
pub trait MapOverlayComponent {
    /// Allocate the surface and subscribe to host events.
    fn on_attach(&mut self, map: &mut dyn MapHost) -> LayerResult<()>;
    /// Unsubscribe and free the surface.
    fn on_detach(&mut self, map: &mut dyn MapHost) -> LayerResult<()>;
    /// Snapshot of what is currently drawn.
    fn render(&self) -> LayerResult<RenderFrame>;
}

fn attached<'a, P>(
    canvas: &'a mut Option<Canvas<P>>,
    operation: &'static str,
) -> LayerResult<&'a mut Canvas<P>> {
    canvas
        .as_mut()
        .ok_or(LayerError::NotAttached { operation })
}

/// Overlay that draws hole-punched polar regions and keeps them glued to
/// the map.
pub struct RegionLayer<A: PathAlgebra = GeoPathAlgebra> {
    id: Uuid,
    options: LayerOptions,
    painter: RegionPainter<A>,
    scene: SceneStore,
    engine: ViewportSyncEngine,
    canvas: Option<Canvas<A::Path>>,
    debouncer: Debouncer<MapEventKind, MapEvent>,
    hovered: Option<Uuid>,
}

impl RegionLayer<GeoPathAlgebra> {
    pub fn new(options: LayerOptions) -> Self {
        Self::with_algebra(GeoPathAlgebra, options)
    }
}

impl<A: PathAlgebra> RegionLayer<A> {
    pub fn with_algebra(algebra: A, options: LayerOptions) -> Self {
        let diagnostics = Diagnostics::new(options.debug);
        let state = ViewportState::new(options.padding_pixels, options.drift);
        Self {
            id: Uuid::new_v4(),
            painter: RegionPainter::new(algebra, options.path_options(), options.padding_pixels),
            scene: SceneStore::new(),
            engine: ViewportSyncEngine::new(state, diagnostics),
            canvas: None,
            debouncer: Debouncer::new(options.debounce_ms),
            hovered: None,
            options,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn options(&self) -> &LayerOptions {
        &self.options
    }

    pub fn is_attached(&self) -> bool {
        self.canvas.is_some()
    }

    pub fn scene(&self) -> &SceneStore {
        &self.scene
    }

    pub fn viewport(&self) -> &ViewportState {
        self.engine.state()
    }

    pub fn canvas(&self) -> Option<&Canvas<A::Path>> {
        self.canvas.as_ref()
    }

    pub fn algebra(&self) -> &A {
        self.painter.algebra()
    }

    // ── Public surface ───────────────────────────────────────────────

    /// Attach to `map`. Same as [`MapOverlayComponent::on_attach`].
    pub fn add_to(&mut self, map: &mut dyn MapHost) -> LayerResult<&mut Self> {
        self.on_attach(map)?;
        Ok(self)
    }

    pub fn remove_from(&mut self, map: &mut dyn MapHost) -> LayerResult<()> {
        self.on_detach(map)
    }

    /// Add a shape centred on `central_point` and draw it on top.
    ///
    /// Returns the drawn region, or `None` when the shape has no drawable
    /// geometry (it is kept in the scene all the same).
    pub fn add_to_scene(
        &mut self,
        map: &dyn MapHost,
        shape: DonutShape,
        central_point: GeoPoint,
        options: RegionOptions,
    ) -> LayerResult<Option<&DrawnRegion<A::Path>>> {
        let canvas = attached(&mut self.canvas, "add_to_scene")?;
        let spec = Rc::new(RegionSpec::new(shape, central_point, options));
        let id = spec.id;

        if self.engine.frame_is_current(map, canvas) {
            self.scene.append(spec, &self.painter, canvas, map);
            self.engine.record_draw(map, canvas);
        } else {
            // Existing content is transformed; rebuild so everything shares
            // one pixel frame.
            self.scene.retain(spec);
            self.replay(map)?;
        }

        let canvas = self
            .canvas
            .as_ref()
            .ok_or(LayerError::NotAttached { operation: "add_to_scene" })?;
        Ok(canvas.position_of(id).and_then(|i| canvas.stack().get(i)))
    }

    /// Remove drawn geometry and forget every spec.
    pub fn clear_all(&mut self) -> LayerResult<()> {
        let canvas = attached(&mut self.canvas, "clear_all")?;
        self.scene.clear_all(canvas);
        self.engine.reset(canvas);
        self.hovered = None;
        Ok(())
    }

    /// Remove drawn geometry, keep the specs for the next replay.
    pub fn clear_all_paths(&mut self) -> LayerResult<()> {
        let canvas = attached(&mut self.canvas, "clear_all_paths")?;
        self.scene.clear_drawn(canvas);
        self.hovered = None;
        Ok(())
    }

    /// Union of drawn region bounds in surface pixels, `None` when empty.
    pub fn get_bounds(&self) -> LayerResult<Option<BBox>> {
        let canvas = self
            .canvas
            .as_ref()
            .ok_or(LayerError::NotAttached { operation: "get_bounds" })?;
        Ok(canvas.bounds())
    }

    /// Rebuild every spec at the current view.
    pub fn replay(&mut self, map: &dyn MapHost) -> LayerResult<()> {
        let canvas = attached(&mut self.canvas, "replay")?;
        let drawn = self.scene.replay(&self.painter, canvas, map);
        self.engine.record_draw(map, canvas);
        self.hovered = None;
        log::debug!(
            "layer {}: replayed {} of {} regions at zoom {}",
            self.id,
            drawn,
            self.scene.len(),
            map.zoom()
        );
        Ok(())
    }

    // ── Map events ───────────────────────────────────────────────────

    /// Take an event from the host. View resets run now; everything else is
    /// debounced per class until [`Self::tick`] or [`Self::flush`].
    pub fn handle_event(&mut self, map: &dyn MapHost, event: MapEvent, now_ms: f64) -> LayerResult<()> {
        attached(&mut self.canvas, "handle_event")?;
        let kind = event.kind();
        if !kind.is_debounced() {
            return self.apply_event(map, event);
        }
        self.debouncer.schedule(kind, event, now_ms);
        Ok(())
    }

    /// Run debounced handlers due at `now_ms`. Returns how many ran.
    pub fn tick(&mut self, map: &dyn MapHost, now_ms: f64) -> LayerResult<usize> {
        attached(&mut self.canvas, "tick")?;
        let due = self.debouncer.take_due(now_ms);
        let count = due.len();
        for (_, event) in due {
            self.apply_event(map, event)?;
        }
        Ok(count)
    }

    /// Run every pending handler regardless of its deadline.
    pub fn flush(&mut self, map: &dyn MapHost) -> LayerResult<usize> {
        attached(&mut self.canvas, "flush")?;
        let pending = self.debouncer.take_all();
        let count = pending.len();
        for (_, event) in pending {
            self.apply_event(map, event)?;
        }
        Ok(count)
    }

    fn apply_event(&mut self, map: &dyn MapHost, event: MapEvent) -> LayerResult<()> {
        match event {
            MapEvent::Move { fly } => {
                let canvas = attached(&mut self.canvas, "move")?;
                self.engine.on_move(map, canvas, fly);
            }
            MapEvent::Resize { size } => {
                let canvas = attached(&mut self.canvas, "resize")?;
                self.engine.on_resize(canvas, size);
            }
            MapEvent::ZoomAnim { zoom, center } => self.recalc_zoom(map, zoom, center, false)?,
            MapEvent::ZoomEnd => self.recalc_zoom(map, map.zoom(), map.center(), true)?,
            MapEvent::ViewReset => self.replay(map)?,
        }
        Ok(())
    }

    fn recalc_zoom(
        &mut self,
        map: &dyn MapHost,
        zoom: f64,
        center: GeoPoint,
        save_data: bool,
    ) -> LayerResult<()> {
        let canvas = attached(&mut self.canvas, "recalc_zoom")?;
        if self.engine.recalc_zoom(map, canvas, zoom, center, save_data) {
            log::debug!(
                "layer {}: drift past threshold at zoom {}, rebuilding",
                self.id,
                zoom
            );
            self.replay(map)?;
            let canvas = attached(&mut self.canvas, "recalc_zoom")?;
            self.engine.recalc_zoom(map, canvas, zoom, center, save_data);
        }
        Ok(())
    }

    // ── Pointer events ───────────────────────────────────────────────

    /// Deliver a pointer event at `point` (padded-surface pixels).
    ///
    /// Moves synthesize leave/enter when the front-most region under the
    /// pointer changes. Returns the draw-stack layer that was hit, if any.
    pub fn dispatch_pointer(&mut self, kind: PointerKind, point: Point) -> LayerResult<Option<usize>> {
        let canvas = self
            .canvas
            .as_ref()
            .ok_or(LayerError::NotAttached { operation: "dispatch_pointer" })?;
        let viewport = self.engine.state();
        let hit = canvas.hit_test(self.painter.algebra(), point);
        let deliver = |index: usize, kind: PointerKind| {
            let mut event = PointerEvent::new(kind, point);
            relay_pointer(&canvas.stack()[index], index, &mut event, self.id, viewport);
        };

        match kind {
            PointerKind::Click => {
                if let Some(index) = hit {
                    deliver(index, PointerKind::Click);
                }
            }
            PointerKind::Enter | PointerKind::Move => {
                let hit_id = hit.map(|i| canvas.stack()[i].spec_id());
                if hit_id != self.hovered {
                    if let Some(previous) = self.hovered.and_then(|id| canvas.position_of(id)) {
                        deliver(previous, PointerKind::Leave);
                    }
                    if let Some(index) = hit {
                        deliver(index, PointerKind::Enter);
                    }
                    self.hovered = hit_id;
                }
                if let (Some(index), PointerKind::Move) = (hit, kind) {
                    deliver(index, PointerKind::Move);
                }
            }
            PointerKind::Leave => {
                if let Some(previous) = self.hovered.take().and_then(|id| canvas.position_of(id)) {
                    deliver(previous, PointerKind::Leave);
                }
            }
        }
        Ok(hit)
    }
}

impl<A: PathAlgebra> MapOverlayComponent for RegionLayer<A> {
    fn on_attach(&mut self, map: &mut dyn MapHost) -> LayerResult<()> {
        if self.canvas.is_some() {
            return Err(LayerError::AlreadyAttached);
        }
        self.options.validate()?;
        let size = self.engine.state().surface_size(map.size());
        map.add_overlay(self.id);
        for kind in MapEventKind::SUBSCRIBED {
            if kind == MapEventKind::ZoomAnim && !map.zoom_animation_enabled() {
                continue;
            }
            map.subscribe(kind);
        }
        let canvas = self.canvas.insert(Canvas::new(self.id, size));
        self.engine.on_move(map, canvas, false);
        log::debug!(
            "layer {} attached, surface {}x{}",
            self.id,
            size.x,
            size.y
        );

        if !self.scene.is_empty() {
            self.replay(map)?;
        }
        Ok(())
    }

    fn on_detach(&mut self, map: &mut dyn MapHost) -> LayerResult<()> {
        if self.canvas.take().is_none() {
            return Err(LayerError::NotAttached { operation: "on_detach" });
        }
        for kind in MapEventKind::SUBSCRIBED {
            map.unsubscribe(kind);
        }
        map.remove_overlay(self.id);
        self.debouncer.clear();
        self.hovered = None;
        log::debug!("layer {} detached, {} regions kept", self.id, self.scene.len());
        Ok(())
    }

    fn render(&self) -> LayerResult<RenderFrame> {
        let canvas = self
            .canvas
            .as_ref()
            .ok_or(LayerError::NotAttached { operation: "render" })?;
        Ok(RenderFrame::capture(
            canvas,
            self.painter.algebra(),
            self.engine.state(),
        ))
    }
}
