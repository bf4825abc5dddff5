use super::GridMap;
use crate::cell::{Cell, CellIndex};
use crate::error::Result;

impl GridMap {
    /// Step from `start` toward `end`, one unit per axis per step.
    ///
    /// Both axes move independently, so the walk goes diagonally until one
    /// axis lines up and straight afterwards. The path holds `start` and all
    /// intermediate cells but never `end`; its length is the Chebyshev
    /// distance between the two indices, and it is empty when they coincide.
    ///
    /// # Errors
    ///
    /// [`GridError::IndexOutOfRange`](crate::GridError::IndexOutOfRange) if
    /// either cell index is outside this grid.
    ///
    /// ```
    /// use trajgrid::{CellIndex, GridMap};
    ///
    /// let grid = GridMap::new(3, 0.0, 0.0, 9.0, 9.0)?;
    /// let path = grid.find_shortest_path(grid.cell(0, 0)?, grid.cell(2, 2)?)?;
    /// let indices: Vec<_> = path.iter().map(|c| c.index()).collect();
    /// assert_eq!(indices, vec![CellIndex::new(0, 0), CellIndex::new(1, 1)]);
    /// # Ok::<(), trajgrid::GridError>(())
    /// ```
    pub fn find_shortest_path(&self, start: &Cell, end: &Cell) -> Result<Vec<&Cell>> {
        self.shortest_path_between(start.index(), end.index())
    }

    /// Index-based form of [`find_shortest_path`](Self::find_shortest_path).
    pub fn shortest_path_between(&self, start: CellIndex, end: CellIndex) -> Result<Vec<&Cell>> {
        self.check_index(start)?;
        self.check_index(end)?;

        let mut path = Vec::with_capacity(start.chebyshev_distance(&end));
        let mut current = start;

        while current != end {
            path.push(&self.cells[current.row * self.n + current.col]);
            current.row = step_toward(current.row, end.row);
            current.col = step_toward(current.col, end.col);
        }

        Ok(path)
    }
}

fn step_toward(from: usize, to: usize) -> usize {
    match from.cmp(&to) {
        std::cmp::Ordering::Less => from + 1,
        std::cmp::Ordering::Greater => from - 1,
        std::cmp::Ordering::Equal => from,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GridError;

    fn indices(path: &[&Cell]) -> Vec<(usize, usize)> {
        path.iter().map(|c| (c.index().row, c.index().col)).collect()
    }

    #[test]
    fn test_diagonal_path() {
        let grid = GridMap::new(3, 0.0, 0.0, 9.0, 9.0).unwrap();
        let path = grid
            .find_shortest_path(grid.cell(0, 0).unwrap(), grid.cell(2, 2).unwrap())
            .unwrap();
        assert_eq!(indices(&path), vec![(0, 0), (1, 1)]);
    }

    #[test]
    fn test_diagonal_then_straight() {
        let grid = GridMap::new(10, 0.0, 0.0, 1.0, 1.0).unwrap();
        let path = grid
            .shortest_path_between(CellIndex::new(7, 1), CellIndex::new(2, 3))
            .unwrap();
        assert_eq!(
            indices(&path),
            vec![(7, 1), (6, 2), (5, 3), (4, 3), (3, 3)]
        );
    }

    #[test]
    fn test_straight_path() {
        let grid = GridMap::new(5, 0.0, 0.0, 1.0, 1.0).unwrap();
        let path = grid
            .shortest_path_between(CellIndex::new(4, 2), CellIndex::new(4, 0))
            .unwrap();
        assert_eq!(indices(&path), vec![(4, 2), (4, 1)]);
    }

    #[test]
    fn test_adjacent_and_same_cell() {
        let grid = GridMap::new(5, 0.0, 0.0, 1.0, 1.0).unwrap();
        let path = grid
            .shortest_path_between(CellIndex::new(2, 2), CellIndex::new(3, 1))
            .unwrap();
        assert_eq!(indices(&path), vec![(2, 2)]);

        let path = grid
            .shortest_path_between(CellIndex::new(2, 2), CellIndex::new(2, 2))
            .unwrap();
        assert!(path.is_empty());
    }

    #[test]
    fn test_out_of_range_rejected() {
        let grid = GridMap::new(3, 0.0, 0.0, 1.0, 1.0).unwrap();
        assert_eq!(
            grid.shortest_path_between(CellIndex::new(0, 0), CellIndex::new(0, 3))
                .unwrap_err(),
            GridError::IndexOutOfRange { row: 0, col: 3, n: 3 }
        );
        assert!(grid
            .shortest_path_between(CellIndex::new(5, 0), CellIndex::new(0, 0))
            .is_err());
    }
}
