use std::fmt;
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ringlayer_core::{BBox, DonutShape, GeoPoint, PathStyle, Point};

use crate::viewport::ViewportState;

/// Pointer interactions a drawn region reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerKind {
    Click,
    Enter,
    Move,
    Leave,
}

/// A pointer event as delivered to region callbacks.
///
/// Dispatch receives it in padded-surface pixels; callbacks see it with the
/// padding removed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub point: Point,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, point: Point) -> Self {
        Self { kind, point }
    }
}

/// What a callback learns about the region that received the event.
pub struct RelayContext<'a> {
    pub region: &'a RegionSpec,
    /// Position in the draw stack (0 = bottom).
    pub draw_stack_layer: usize,
    pub layer_id: Uuid,
    pub viewport: &'a ViewportState,
}

pub type RegionCallback = Rc<dyn Fn(&mut PointerEvent, &RelayContext<'_>)>;

/// Optional per-region pointer callbacks. None of them is required.
#[derive(Clone, Default)]
pub struct RegionCallbacks {
    pub on_click: Option<RegionCallback>,
    pub on_mouse_enter: Option<RegionCallback>,
    pub on_mouse_move: Option<RegionCallback>,
    pub on_mouse_leave: Option<RegionCallback>,
}

impl RegionCallbacks {
    pub fn get(&self, kind: PointerKind) -> Option<&RegionCallback> {
        match kind {
            PointerKind::Click => self.on_click.as_ref(),
            PointerKind::Enter => self.on_mouse_enter.as_ref(),
            PointerKind::Move => self.on_mouse_move.as_ref(),
            PointerKind::Leave => self.on_mouse_leave.as_ref(),
        }
    }
}

impl fmt::Debug for RegionCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegionCallbacks")
            .field("on_click", &self.on_click.is_some())
            .field("on_mouse_enter", &self.on_mouse_enter.is_some())
            .field("on_mouse_move", &self.on_mouse_move.is_some())
            .field("on_mouse_leave", &self.on_mouse_leave.is_some())
            .finish()
    }
}

/// Style and callbacks supplied with a shape when adding it to the scene.
#[derive(Debug, Clone, Default)]
pub struct RegionOptions {
    pub style: PathStyle,
    pub callbacks: RegionCallbacks,
}

impl RegionOptions {
    pub fn with_style(mut self, style: PathStyle) -> Self {
        self.style = style;
        self
    }

    pub fn on_click(mut self, f: impl Fn(&mut PointerEvent, &RelayContext<'_>) + 'static) -> Self {
        self.callbacks.on_click = Some(Rc::new(f));
        self
    }

    pub fn on_mouse_enter(
        mut self,
        f: impl Fn(&mut PointerEvent, &RelayContext<'_>) + 'static,
    ) -> Self {
        self.callbacks.on_mouse_enter = Some(Rc::new(f));
        self
    }

    pub fn on_mouse_move(
        mut self,
        f: impl Fn(&mut PointerEvent, &RelayContext<'_>) + 'static,
    ) -> Self {
        self.callbacks.on_mouse_move = Some(Rc::new(f));
        self
    }

    pub fn on_mouse_leave(
        mut self,
        f: impl Fn(&mut PointerEvent, &RelayContext<'_>) + 'static,
    ) -> Self {
        self.callbacks.on_mouse_leave = Some(Rc::new(f));
        self
    }
}

/// Durable description of one region, kept verbatim so it can be rebuilt at
/// any zoom.
#[derive(Debug, Clone)]
pub struct RegionSpec {
    pub id: Uuid,
    pub shape: DonutShape,
    pub central_point: GeoPoint,
    pub style: PathStyle,
    pub callbacks: RegionCallbacks,
}

impl RegionSpec {
    pub fn new(shape: DonutShape, central_point: GeoPoint, options: RegionOptions) -> Self {
        Self {
            id: Uuid::new_v4(),
            shape,
            central_point,
            style: options.style,
            callbacks: options.callbacks,
        }
    }
}

/// Geometry realized from a [`RegionSpec`] during one draw cycle.
///
/// Never mutated; a redraw replaces it. The spec link is weak, so a region
/// outliving its spec simply stops relaying events.
#[derive(Debug, Clone)]
pub struct DrawnRegion<P> {
    path: P,
    bounds: BBox,
    spec_id: Uuid,
    spec: Weak<RegionSpec>,
}

impl<P> DrawnRegion<P> {
    pub fn new(path: P, bounds: BBox, spec: &Rc<RegionSpec>) -> Self {
        Self {
            path,
            bounds,
            spec_id: spec.id,
            spec: Rc::downgrade(spec),
        }
    }

    pub fn path(&self) -> &P {
        &self.path
    }

    /// Bounds in surface (padded) coordinates.
    pub fn bounds(&self) -> BBox {
        self.bounds
    }

    pub fn spec_id(&self) -> Uuid {
        self.spec_id
    }

    pub fn spec(&self) -> Option<Rc<RegionSpec>> {
        self.spec.upgrade()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_callbacks_lookup() {
        let options = RegionOptions::default().on_click(|_, _| {});
        assert!(options.callbacks.get(PointerKind::Click).is_some());
        assert!(options.callbacks.get(PointerKind::Leave).is_none());
        assert_eq!(
            format!("{:?}", options.callbacks),
            "RegionCallbacks { on_click: true, on_mouse_enter: false, on_mouse_move: false, on_mouse_leave: false }"
        );
    }

    #[test]
    fn test_drawn_region_spec_link_is_weak() {
        let spec = Rc::new(RegionSpec::new(
            DonutShape::default(),
            GeoPoint::new(0.0, 0.0),
            RegionOptions::default(),
        ));
        let drawn = DrawnRegion::new((), BBox::new(Point::ZERO, Point::ZERO), &spec);
        assert_eq!(drawn.spec_id(), spec.id);
        assert!(drawn.spec().is_some());
        drop(spec);
        assert!(drawn.spec().is_none());
    }

    #[test]
    fn test_callback_sees_context() {
        let seen = Rc::new(Cell::new(usize::MAX));
        let sink = seen.clone();
        let options = RegionOptions::default().on_mouse_move(move |_, ctx| {
            sink.set(ctx.draw_stack_layer);
        });
        let spec = RegionSpec::new(DonutShape::default(), GeoPoint::new(0.0, 0.0), options);
        let viewport = ViewportState::new(0.0, Default::default());
        let ctx = RelayContext {
            region: &spec,
            draw_stack_layer: 3,
            layer_id: Uuid::nil(),
            viewport: &viewport,
        };
        let mut event = PointerEvent::new(PointerKind::Move, Point::ZERO);
        if let Some(cb) = spec.callbacks.get(PointerKind::Move) {
            cb(&mut event, &ctx);
        }
        assert_eq!(seen.get(), 3);
    }
}
