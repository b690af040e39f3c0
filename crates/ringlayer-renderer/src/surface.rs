use uuid::Uuid;

use ringlayer_core::{BBox, HitEntry, HitIndex, PathAlgebra, Point};

use crate::region::DrawnRegion;
use crate::viewport::ContentTransform;

/// The backing drawing surface: a positioned element holding a draw stack
/// under one content transform.
///
/// Geometry is stored in surface coordinates (padding included). The element
/// is placed at `element_position` in layer pixels, shifted up-left by the
/// padding margin, and content is drawn through `transform`.
#[derive(Debug)]
pub struct Canvas<P> {
    id: Uuid,
    element_position: Point,
    size: Point,
    transform: ContentTransform,
    stack: Vec<DrawnRegion<P>>,
    hit_index: HitIndex,
    resize_count: usize,
}

impl<P> Canvas<P> {
    pub fn new(id: Uuid, size: Point) -> Self {
        Self {
            id,
            element_position: Point::ZERO,
            size,
            transform: ContentTransform::identity(),
            stack: Vec::new(),
            hit_index: HitIndex::new(),
            resize_count: 0,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    // ── Element ──────────────────────────────────────────────────────

    pub fn element_position(&self) -> Point {
        self.element_position
    }

    pub fn set_element_position(&mut self, position: Point) {
        self.element_position = position;
    }

    pub fn size(&self) -> Point {
        self.size
    }

    /// Resize the surface. Returns `false` when the size is unchanged.
    pub fn resize(&mut self, size: Point) -> bool {
        if self.size == size {
            return false;
        }
        self.size = size;
        self.resize_count += 1;
        true
    }

    /// Number of resizes actually performed.
    pub fn resize_count(&self) -> usize {
        self.resize_count
    }

    // ── Content ──────────────────────────────────────────────────────

    pub fn transform(&self) -> ContentTransform {
        self.transform
    }

    pub fn set_transform(&mut self, transform: ContentTransform) {
        self.transform = transform;
    }

    pub fn reset_transform(&mut self) {
        self.transform = ContentTransform::identity();
    }

    /// Put `region` on top of the draw stack.
    pub fn push(&mut self, region: DrawnRegion<P>) {
        self.hit_index.insert(HitEntry {
            stack_index: self.stack.len(),
            bbox: region.bounds(),
        });
        self.stack.push(region);
    }

    /// Remove every drawn region.
    pub fn clear(&mut self) {
        self.stack.clear();
        self.hit_index.clear();
    }

    /// Drawn regions, bottom first.
    pub fn stack(&self) -> &[DrawnRegion<P>] {
        &self.stack
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn position_of(&self, spec_id: Uuid) -> Option<usize> {
        self.stack.iter().position(|r| r.spec_id() == spec_id)
    }

    /// Union of all drawn bounds in surface coordinates.
    pub fn bounds(&self) -> Option<BBox> {
        self.stack
            .iter()
            .map(DrawnRegion::bounds)
            .reduce(|acc, b| acc.union(&b))
    }

    /// Front-most region under `point` (element-local surface pixels).
    pub fn hit_test<A>(&self, algebra: &A, point: Point) -> Option<usize>
    where
        A: PathAlgebra<Path = P> + ?Sized,
    {
        let local = self.transform.invert(&point);
        self.hit_index
            .candidates_at(&local)
            .into_iter()
            .find(|&index| algebra.contains(self.stack[index].path(), local))
    }
}
