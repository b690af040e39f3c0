use std::cell::Cell;
use std::error::Error;
use std::rc::Rc;

use serde::Serialize;

use ringlayer_core::geodesy::destination;
use ringlayer_core::{
    Color, DonutShape, GeoPoint, GeoProjection, PathStyle, Point, PolarSample, Ring,
};
use ringlayer_renderer::{
    LayerOptions, MapHost, MapOverlayComponent, PointerKind, RegionLayer, RegionOptions,
    SimulatedMap,
};

/// Milliseconds of simulated time between scripted steps.
const STEP_MS: f64 = 16.0;

#[derive(Serialize)]
struct SessionSummary {
    regions: usize,
    drawn: usize,
    clicks: usize,
    zoom: f64,
    bounds: Option<[f64; 4]>,
}

fn ring(samples: usize, radius_m: f64, wobble: f64) -> Ring {
    (0..samples)
        .map(|i| {
            let direction = i as f64 * 360.0 / samples as f64;
            let distance = radius_m * (1.0 + wobble * (direction.to_radians() * 3.0).sin());
            PolarSample::new(direction, distance)
        })
        .collect()
}

/// Hand queued map events to the layer and let the debouncer fire.
fn pump(layer: &mut RegionLayer, map: &mut SimulatedMap, clock: &mut f64) -> Result<(), Box<dyn Error>> {
    for event in map.take_events() {
        layer.handle_event(map, event, *clock)?;
    }
    *clock += layer.options().debounce_ms + STEP_MS;
    layer.tick(map, *clock)?;
    Ok(())
}

fn load_options() -> Result<LayerOptions, Box<dyn Error>> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)?;
            log::info!("loading layer options from {path}");
            Ok(LayerOptions::from_json(&json)?)
        }
        None => Ok(LayerOptions::default()),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let options = load_options()?;
    let mut map = SimulatedMap::new(GeoPoint::new(51.5074, -0.1278), 13.0, Point::new(1024.0, 768.0));
    let mut layer = RegionLayer::new(options);
    layer.add_to(&mut map)?;
    let mut clock = 0.0;

    let clicks = Rc::new(Cell::new(0usize));
    let counter = clicks.clone();
    let coverage = RegionOptions::default()
        .with_style(PathStyle::default().with_fill(30, 144, 255).with_stroke(Color::BLACK, 1.0))
        .on_click(move |event, ctx| {
            counter.set(counter.get() + 1);
            log::info!(
                "clicked region {} (layer {}) at ({:.1}, {:.1})",
                ctx.region.id,
                ctx.draw_stack_layer,
                event.point.x,
                event.point.y
            );
        });

    let center = map.center();
    layer.add_to_scene(
        &map,
        DonutShape::new(ring(72, 2_500.0, 0.15), vec![ring(36, 900.0, 0.0)]),
        center,
        coverage,
    )?;
    layer.add_to_scene(
        &map,
        DonutShape::solid(ring(48, 1_200.0, 0.3)),
        GeoPoint::new(51.52, -0.10),
        RegionOptions::default().with_style(PathStyle::default().with_fill(220, 60, 60).with_opacity(0.35)),
    )?;

    map.pan_by(Point::new(120.0, -40.0));
    pump(&mut layer, &mut map, &mut clock)?;

    map.set_size(Point::new(1280.0, 800.0));
    pump(&mut layer, &mut map, &mut clock)?;

    map.zoom_to(14.0, map.center());
    pump(&mut layer, &mut map, &mut clock)?;

    map.fly_to(GeoPoint::new(51.51, -0.11), 15.0, 24);
    pump(&mut layer, &mut map, &mut clock)?;

    map.set_view(center, 13.0);
    pump(&mut layer, &mut map, &mut clock)?;

    let padding = layer.options().padding_pixels;
    // Inside the coverage ring, east of its hole.
    let target = map.lat_lng_to_container_point(destination(center, 90.0, 1_700.0));
    layer.dispatch_pointer(PointerKind::Click, target.add(&Point::splat(padding)))?;

    let frame = layer.render()?;
    let summary = SessionSummary {
        regions: layer.scene().len(),
        drawn: frame.regions.len(),
        clicks: clicks.get(),
        zoom: map.zoom(),
        bounds: layer
            .get_bounds()?
            .map(|b| [b.min.x, b.min.y, b.max.x, b.max.y]),
    };
    log::info!("session summary: {}", serde_json::to_string(&summary)?);
    println!("{}", serde_json::to_string_pretty(&frame)?);

    layer.remove_from(&mut map)?;
    Ok(())
}
