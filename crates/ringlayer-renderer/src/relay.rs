use uuid::Uuid;

use crate::region::{DrawnRegion, PointerEvent, RelayContext};
use crate::viewport::ViewportState;

/// Hand `event` to the callback `region` registered for its kind.
///
/// The event point is moved out of padded-surface space in place before the
/// callback sees it. Returns whether a callback ran; a missing callback or a
/// region whose spec is gone is a no-op.
pub fn relay_pointer<P>(
    region: &DrawnRegion<P>,
    draw_stack_layer: usize,
    event: &mut PointerEvent,
    layer_id: Uuid,
    viewport: &ViewportState,
) -> bool {
    event.point = event.point.subtract(&viewport.padding());

    let Some(spec) = region.spec() else {
        return false;
    };
    let Some(callback) = spec.callbacks.get(event.kind).cloned() else {
        return false;
    };
    let context = RelayContext {
        region: &spec,
        draw_stack_layer,
        layer_id,
        viewport,
    };
    callback(event, &context);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use ringlayer_core::{BBox, DonutShape, GeoPoint, Point};

    use crate::config::DriftConfig;
    use crate::region::{PointerKind, RegionOptions, RegionSpec};

    fn region_with(options: RegionOptions) -> (Rc<RegionSpec>, DrawnRegion<()>) {
        let spec = Rc::new(RegionSpec::new(
            DonutShape::default(),
            GeoPoint::new(0.0, 0.0),
            options,
        ));
        let drawn = DrawnRegion::new((), BBox::new(Point::ZERO, Point::splat(1.0)), &spec);
        (spec, drawn)
    }

    #[test]
    fn test_padding_is_removed_before_callback() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let (_spec, drawn) = region_with(RegionOptions::default().on_click(move |e, ctx| {
            sink.borrow_mut().push((e.point, ctx.draw_stack_layer));
        }));
        let viewport = ViewportState::new(128.0, DriftConfig::default());

        let mut event = PointerEvent::new(PointerKind::Click, Point::new(138.0, 138.0));
        assert!(relay_pointer(&drawn, 2, &mut event, Uuid::nil(), &viewport));
        assert_eq!(event.point, Point::new(10.0, 10.0));
        assert_eq!(*seen.borrow(), vec![(Point::new(10.0, 10.0), 2)]);
    }

    #[test]
    fn test_missing_callback_is_noop() {
        let (_spec, drawn) = region_with(RegionOptions::default());
        let viewport = ViewportState::new(16.0, DriftConfig::default());
        let mut event = PointerEvent::new(PointerKind::Enter, Point::new(20.0, 20.0));
        assert!(!relay_pointer(&drawn, 0, &mut event, Uuid::nil(), &viewport));
        assert_eq!(event.point, Point::new(4.0, 4.0));
    }

    #[test]
    fn test_dropped_spec_is_noop() {
        let (spec, drawn) = region_with(RegionOptions::default().on_click(|_, _| {
            panic!("spec was dropped");
        }));
        drop(spec);
        let viewport = ViewportState::new(0.0, DriftConfig::default());
        let mut event = PointerEvent::new(PointerKind::Click, Point::ZERO);
        assert!(!relay_pointer(&drawn, 0, &mut event, Uuid::nil(), &viewport));
    }
}
