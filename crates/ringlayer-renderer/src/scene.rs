use std::rc::Rc;

use uuid::Uuid;

use ringlayer_core::PathAlgebra;

use crate::host::MapHost;
use crate::pipeline::RegionPainter;
use crate::region::RegionSpec;
use crate::surface::Canvas;

/// Ordered set of region specs on stage. Draw order is insertion order.
#[derive(Debug, Default)]
pub struct SceneStore {
    specs: Vec<Rc<RegionSpec>>,
}

impl SceneStore {
    pub fn new() -> Self {
        Self { specs: Vec::new() }
    }

    /// Retain `spec` and draw it on top of the stack. Returns whether it
    /// produced geometry; a spec without geometry is still retained.
    pub fn append<A: PathAlgebra>(
        &mut self,
        spec: Rc<RegionSpec>,
        painter: &RegionPainter<A>,
        canvas: &mut Canvas<A::Path>,
        map: &dyn MapHost,
    ) -> bool {
        let drawn = painter.paint(map, &spec);
        self.specs.push(spec);
        match drawn {
            Some(region) => {
                canvas.push(region);
                true
            }
            None => false,
        }
    }

    /// Retain `spec` without drawing it.
    pub fn retain(&mut self, spec: Rc<RegionSpec>) {
        self.specs.push(spec);
    }

    /// Remove drawn geometry, keep the specs.
    pub fn clear_drawn<P>(&self, canvas: &mut Canvas<P>) {
        canvas.clear();
    }

    /// Remove drawn geometry and forget every spec.
    pub fn clear_all<P>(&mut self, canvas: &mut Canvas<P>) {
        canvas.clear();
        self.specs.clear();
    }

    /// Rebuild every spec in insertion order at the current view. Returns the
    /// number of regions drawn.
    pub fn replay<A: PathAlgebra>(
        &self,
        painter: &RegionPainter<A>,
        canvas: &mut Canvas<A::Path>,
        map: &dyn MapHost,
    ) -> usize {
        canvas.clear();
        for spec in &self.specs {
            if let Some(region) = painter.paint(map, spec) {
                canvas.push(region);
            }
        }
        canvas.len()
    }

    pub fn specs(&self) -> &[Rc<RegionSpec>] {
        &self.specs
    }

    pub fn get(&self, id: Uuid) -> Option<&Rc<RegionSpec>> {
        self.specs.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ringlayer_core::{DonutShape, GeoPathAlgebra, GeoPoint, PathOptions, PolarSample, Point, Ring};

    use crate::region::RegionOptions;
    use crate::sim::SimulatedMap;

    fn setup() -> (SimulatedMap, RegionPainter<GeoPathAlgebra>, Canvas<<GeoPathAlgebra as PathAlgebra>::Path>) {
        let map = SimulatedMap::new(GeoPoint::new(40.0, -3.7), 13.0, Point::new(640.0, 480.0));
        let painter = RegionPainter::new(GeoPathAlgebra, PathOptions::default(), 64.0);
        let canvas = Canvas::new(Uuid::nil(), Point::new(768.0, 608.0));
        (map, painter, canvas)
    }

    fn spec(map: &SimulatedMap, samples: usize, radius: f64) -> Rc<RegionSpec> {
        let ring: Ring = (0..samples)
            .map(|i| PolarSample::new(i as f64 * 360.0 / samples as f64, radius))
            .collect();
        Rc::new(RegionSpec::new(
            DonutShape::solid(ring),
            map.center(),
            RegionOptions::default(),
        ))
    }

    #[test]
    fn test_append_draws_in_insertion_order() {
        let (map, painter, mut canvas) = setup();
        let mut scene = SceneStore::new();
        let a = spec(&map, 24, 800.0);
        let b = spec(&map, 24, 400.0);
        assert!(scene.append(a.clone(), &painter, &mut canvas, &map));
        assert!(scene.append(b.clone(), &painter, &mut canvas, &map));

        assert_eq!(canvas.position_of(a.id), Some(0));
        assert_eq!(canvas.position_of(b.id), Some(1));
        assert_eq!(scene.get(b.id).map(|s| s.id), Some(b.id));
    }

    #[test]
    fn test_spec_without_geometry_is_retained() {
        let (map, painter, mut canvas) = setup();
        let mut scene = SceneStore::new();
        assert!(!scene.append(spec(&map, 2, 500.0), &painter, &mut canvas, &map));
        assert_eq!(scene.len(), 1);
        assert!(canvas.is_empty());
    }

    #[test]
    fn test_clear_drawn_keeps_specs_for_replay() {
        let (map, painter, mut canvas) = setup();
        let mut scene = SceneStore::new();
        scene.append(spec(&map, 24, 800.0), &painter, &mut canvas, &map);
        scene.retain(spec(&map, 24, 300.0));

        scene.clear_drawn(&mut canvas);
        assert!(canvas.is_empty());
        assert_eq!(scene.replay(&painter, &mut canvas, &map), 2);

        scene.clear_all(&mut canvas);
        assert!(scene.is_empty());
        assert!(canvas.is_empty());
    }

    #[test]
    fn test_replay_twice_gives_identical_bounds() {
        let (map, painter, mut canvas) = setup();
        let mut scene = SceneStore::new();
        scene.retain(spec(&map, 36, 900.0));
        scene.retain(spec(&map, 5, 600.0));

        scene.replay(&painter, &mut canvas, &map);
        let first: Vec<_> = canvas.stack().iter().map(|r| r.bounds()).collect();
        scene.replay(&painter, &mut canvas, &map);
        let second: Vec<_> = canvas.stack().iter().map(|r| r.bounds()).collect();
        assert_eq!(first, second);
    }
}
