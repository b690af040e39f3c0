use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ringlayer_core::{BBox, PathAlgebra, PathStyle, Point};

use crate::surface::Canvas;
use crate::viewport::{ContentTransform, ViewportState};

/// One drawn region, ready for a canvas-style painter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderRegion {
    pub spec_id: Uuid,
    /// Position in the draw stack (0 = bottom).
    pub stack_index: usize,
    /// Boundary rings as flat arrays `[x0, y0, x1, y1, ...]` in element-local
    /// pixels, content transform applied. The first ring of each part is its
    /// exterior, followed by its holes.
    pub rings: Vec<Vec<f64>>,
    /// Bounds in element-local pixels.
    pub bounds: BBox,
    pub style: PathStyle,
}

/// Complete overlay state for one frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderFrame {
    pub layer_id: Uuid,
    /// Layer-pixel position of the surface element.
    pub element_position: Point,
    /// Offset of the element's top-left corner from `element_position`.
    pub margin: Point,
    pub size: Point,
    pub transform: ContentTransform,
    pub viewport: ViewportState,
    pub regions: Vec<RenderRegion>,
}

impl RenderFrame {
    pub fn capture<A>(canvas: &Canvas<A::Path>, algebra: &A, viewport: &ViewportState) -> Self
    where
        A: PathAlgebra + ?Sized,
    {
        let transform = canvas.transform();
        let regions = canvas
            .stack()
            .iter()
            .enumerate()
            .map(|(stack_index, region)| {
                let rings = algebra
                    .rings(region.path())
                    .iter()
                    .map(|ring| {
                        ring.iter()
                            .flat_map(|p| {
                                let q = transform.apply(p);
                                [q.x, q.y]
                            })
                            .collect()
                    })
                    .collect();
                let b = region.bounds();
                RenderRegion {
                    spec_id: region.spec_id(),
                    stack_index,
                    rings,
                    bounds: BBox::new(transform.apply(&b.min), transform.apply(&b.max)),
                    style: region.spec().map(|s| s.style.clone()).unwrap_or_default(),
                }
            })
            .collect();

        Self {
            layer_id: canvas.id(),
            element_position: canvas.element_position(),
            margin: viewport.padding().multiply_by(-1.0),
            size: canvas.size(),
            transform,
            viewport: viewport.clone(),
            regions,
        }
    }

    /// Layer-pixel position of an element-local point.
    pub fn to_layer_point(&self, local: Point) -> Point {
        self.element_position.add(&self.margin).add(&local)
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}
