use super::GridMap;
use crate::cell::{Cell, CellIndex};
use smallvec::SmallVec;

/// Moore neighbourhood offsets, in the order neighbours are reported.
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, 0),
    (1, -1),
];

/// Up to eight neighbour indices, kept inline.
pub type Neighbors = SmallVec<[CellIndex; 8]>;

impl GridMap {
    /// Indices of the eight cells around `cell`, clipped to the grid.
    ///
    /// Neighbours that would fall outside `[0, n)` are dropped, so corner
    /// cells get three and edge cells five.
    ///
    /// ```
    /// use trajgrid::GridMap;
    ///
    /// let grid = GridMap::new(3, 0.0, 0.0, 9.0, 9.0)?;
    /// assert_eq!(grid.adjacent(grid.cell(1, 1)?).len(), 8);
    /// assert_eq!(grid.adjacent(grid.cell(0, 0)?).len(), 3);
    /// # Ok::<(), trajgrid::GridError>(())
    /// ```
    pub fn adjacent(&self, cell: &Cell) -> Neighbors {
        self.adjacent_indices(cell.index())
    }

    pub fn adjacent_indices(&self, index: CellIndex) -> Neighbors {
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|&(di, dj)| {
                let row = index.row.checked_add_signed(di)?;
                let col = index.col.checked_add_signed(dj)?;
                let neighbor = CellIndex::new(row, col);
                neighbor.in_bounds(self.n).then_some(neighbor)
            })
            .collect()
    }

    /// Whether `c2` is one of the in-grid neighbours of `c1`.
    pub fn is_adjacent_grids(&self, c1: &Cell, c2: &Cell) -> bool {
        self.adjacent(c1).contains(&c2.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::is_adjacent_grids;

    #[test]
    fn test_interior_cell_has_eight() {
        let grid = GridMap::new(3, 0.0, 0.0, 9.0, 9.0).unwrap();
        let mut got: Vec<_> = grid.adjacent(grid.cell(1, 1).unwrap()).into_iter().collect();
        got.sort();
        let expected: Vec<_> = (0..3)
            .flat_map(|i| (0..3).map(move |j| CellIndex::new(i, j)))
            .filter(|idx| *idx != CellIndex::new(1, 1))
            .collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn test_neighbor_order() {
        let grid = GridMap::new(3, 0.0, 0.0, 9.0, 9.0).unwrap();
        let got = grid.adjacent_indices(CellIndex::new(1, 1));
        assert_eq!(got[0], CellIndex::new(0, 0));
        assert_eq!(got[3], CellIndex::new(1, 2));
        assert_eq!(got[7], CellIndex::new(2, 0));
    }

    #[test]
    fn test_corner_and_edge_clipping() {
        let grid = GridMap::new(3, 0.0, 0.0, 9.0, 9.0).unwrap();
        let mut corner: Vec<_> = grid.adjacent(grid.cell(0, 0).unwrap()).into_iter().collect();
        corner.sort();
        assert_eq!(
            corner,
            vec![
                CellIndex::new(0, 1),
                CellIndex::new(1, 0),
                CellIndex::new(1, 1)
            ]
        );

        assert_eq!(grid.adjacent(grid.cell(2, 1).unwrap()).len(), 5);
        assert_eq!(grid.adjacent(grid.cell(2, 2).unwrap()).len(), 3);
    }

    #[test]
    fn test_single_cell_grid() {
        let grid = GridMap::new(1, 0.0, 0.0, 1.0, 1.0).unwrap();
        assert!(grid.adjacent(grid.cell(0, 0).unwrap()).is_empty());
    }

    #[test]
    fn test_bounded_and_free_adjacency_agree() {
        let grid = GridMap::new(4, 0.0, 0.0, 4.0, 4.0).unwrap();
        for a in grid.iter() {
            for b in grid.iter() {
                assert_eq!(
                    grid.is_adjacent_grids(a, b),
                    is_adjacent_grids(a, b),
                    "disagreement for {} and {}",
                    a.index(),
                    b.index()
                );
            }
        }
    }
}
