//! R-tree over cell envelopes.
//!
//! [`GridMap::locate`] already answers "which cell holds this point" in
//! constant time, but it reports a single cell. The tree answers the
//! closed-rectangle questions instead: every cell touching a point (two or
//! four of them on shared edges and corners) and every cell overlapping a
//! query window.

use crate::cell::CellIndex;
use crate::grid::GridMap;
use geo::{Point, Rect};
use rstar::{AABB, RTree, RTreeObject};

/// A cell's rectangle plus its index, as stored in the tree.
#[derive(Debug, Clone, PartialEq)]
struct CellEnvelope {
    min: [f64; 2],
    max: [f64; 2],
    index: CellIndex,
}

impl RTreeObject for CellEnvelope {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.min, self.max)
    }
}

/// Spatial index over all cells of one grid.
#[derive(Debug)]
pub struct CellTree {
    tree: RTree<CellEnvelope>,
}

impl CellTree {
    /// Bulk-load every cell of `grid`.
    pub fn new(grid: &GridMap) -> Self {
        let objects: Vec<CellEnvelope> = grid
            .iter()
            .map(|cell| CellEnvelope {
                min: [cell.min_x(), cell.min_y()],
                max: [cell.max_x(), cell.max_y()],
                index: cell.index(),
            })
            .collect();

        log::debug!("Bulk loading cell tree with {} cells", objects.len());

        Self {
            tree: RTree::bulk_load(objects),
        }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Indices of every cell whose closed rectangle contains `point`, sorted
    /// row-major.
    pub fn cells_at(&self, point: &Point) -> Vec<CellIndex> {
        let envelope = AABB::from_point([point.x(), point.y()]);
        self.collect_sorted(&envelope)
    }

    /// Indices of every cell intersecting `rect` (touching counts), sorted
    /// row-major.
    pub fn cells_in_rect(&self, rect: &Rect) -> Vec<CellIndex> {
        let envelope = AABB::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y]);
        self.collect_sorted(&envelope)
    }

    fn collect_sorted(&self, envelope: &AABB<[f64; 2]>) -> Vec<CellIndex> {
        let mut hits: Vec<CellIndex> = self
            .tree
            .locate_in_envelope_intersecting(envelope)
            .map(|entry| entry.index)
            .collect();
        hits.sort_unstable();
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interior_point_hits_one_cell() {
        let grid = GridMap::new(3, 0.0, 0.0, 9.0, 9.0).unwrap();
        let tree = CellTree::new(&grid);
        assert_eq!(tree.len(), 9);
        assert_eq!(
            tree.cells_at(&Point::new(1.5, 1.5)),
            vec![CellIndex::new(0, 0)]
        );
        assert_eq!(
            tree.cells_at(&Point::new(7.0, 4.0)),
            vec![CellIndex::new(2, 1)]
        );
    }

    #[test]
    fn test_shared_corner_hits_four_cells() {
        let grid = GridMap::new(2, 0.0, 0.0, 2.0, 2.0).unwrap();
        let tree = CellTree::new(&grid);
        let corner = grid.cell(1, 1).unwrap();
        let hits = tree.cells_at(&Point::new(corner.min_x(), corner.min_y()));
        assert!(hits.contains(&CellIndex::new(1, 1)));
        assert!(hits.len() >= 2);
        for idx in &hits {
            assert!(grid.get(*idx).unwrap().contains(&Point::new(corner.min_x(), corner.min_y())));
        }
    }

    #[test]
    fn test_outside_point_hits_nothing() {
        let grid = GridMap::new(4, 0.0, 0.0, 4.0, 4.0).unwrap();
        let tree = CellTree::new(&grid);
        assert!(tree.cells_at(&Point::new(5.0, 5.0)).is_empty());
        assert!(!tree.is_empty());
    }

    #[test]
    fn test_window_query() {
        let grid = GridMap::new(4, 0.0, 0.0, 4.0, 4.0).unwrap();
        let tree = CellTree::new(&grid);
        let window = Rect::new(
            geo::coord! { x: 0.5, y: 0.5 },
            geo::coord! { x: 1.5, y: 2.5 },
        );
        assert_eq!(
            tree.cells_in_rect(&window),
            vec![
                CellIndex::new(0, 0),
                CellIndex::new(0, 1),
                CellIndex::new(0, 2),
                CellIndex::new(1, 0),
                CellIndex::new(1, 1),
                CellIndex::new(1, 2),
            ]
        );
    }
}
