use std::rc::Rc;

use ringlayer_core::{build_region, project_shape, PathAlgebra, PathOptions};

use crate::host::MapHost;
use crate::region::{DrawnRegion, RegionSpec};

/// Turns region specs into drawn regions at the host's current view:
/// project every ring, then build the hole-punched path in padded space.
#[derive(Debug, Clone)]
pub struct RegionPainter<A> {
    algebra: A,
    options: PathOptions,
    padding: f64,
}

impl<A: PathAlgebra> RegionPainter<A> {
    pub fn new(algebra: A, options: PathOptions, padding: f64) -> Self {
        Self {
            algebra,
            options,
            padding,
        }
    }

    pub fn algebra(&self) -> &A {
        &self.algebra
    }

    pub fn paint(&self, map: &dyn MapHost, spec: &Rc<RegionSpec>) -> Option<DrawnRegion<A::Path>> {
        let projected = project_shape(&spec.shape, spec.central_point, map);
        let Some(path) = build_region(
            &self.algebra,
            &projected.outer,
            &projected.holes,
            &self.options,
            self.padding,
        ) else {
            log::warn!(
                "region {} has no drawable geometry ({} outer samples)",
                spec.id,
                spec.shape.outer.len()
            );
            return None;
        };
        let bounds = self.algebra.bounds(&path)?;
        Some(DrawnRegion::new(path, bounds, spec))
    }
}
