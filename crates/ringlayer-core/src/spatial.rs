use rstar::{RTree, RTreeObject, AABB};

use crate::geometry::{BBox, Point};

/// An entry in the hit index, referencing a drawn region by its stack position.
#[derive(Debug, Clone)]
pub struct HitEntry {
    /// Position in the draw stack (0 = bottom).
    pub stack_index: usize,
    /// Bounding box of the region in surface coordinates.
    pub bbox: BBox,
}

impl RTreeObject for HitEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.bbox.min.x, self.bbox.min.y],
            [self.bbox.max.x, self.bbox.max.y],
        )
    }
}

/// R-tree over drawn-region bounds for pointer hit testing.
#[derive(Default)]
pub struct HitIndex {
    tree: RTree<HitEntry>,
}

impl std::fmt::Debug for HitIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HitIndex").field("len", &self.len()).finish()
    }
}

impl HitIndex {
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    pub fn insert(&mut self, entry: HitEntry) {
        self.tree.insert(entry);
    }

    pub fn clear(&mut self) {
        self.tree = RTree::new();
    }

    /// Stack indices whose bounds contain `point`, front-most first.
    ///
    /// Bounds only; callers still check exact containment.
    pub fn candidates_at(&self, point: &Point) -> Vec<usize> {
        let probe = AABB::from_point([point.x, point.y]);
        let mut hits: Vec<usize> = self
            .tree
            .locate_in_envelope_intersecting(&probe)
            .map(|entry| entry.stack_index)
            .collect();
        hits.sort_unstable_by(|a, b| b.cmp(a));
        hits
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(stack_index: usize, min: f64, max: f64) -> HitEntry {
        HitEntry {
            stack_index,
            bbox: BBox::new(Point::new(min, min), Point::new(max, max)),
        }
    }

    #[test]
    fn test_candidates_are_front_most_first() {
        let mut index = HitIndex::new();
        for e in [entry(0, 0.0, 10.0), entry(1, 5.0, 20.0), entry(2, 30.0, 40.0)] {
            index.insert(e);
        }

        assert_eq!(index.candidates_at(&Point::new(7.0, 7.0)), vec![1, 0]);
        assert_eq!(index.candidates_at(&Point::new(2.0, 2.0)), vec![0]);
        assert!(index.candidates_at(&Point::new(25.0, 25.0)).is_empty());
    }

    #[test]
    fn test_clear_empties_index() {
        let mut index = HitIndex::new();
        index.insert(entry(0, 0.0, 10.0));
        index.insert(entry(1, 20.0, 30.0));
        assert_eq!(index.len(), 2);
        index.clear();
        assert!(index.is_empty());
        assert!(index.candidates_at(&Point::new(5.0, 5.0)).is_empty());
    }
}
