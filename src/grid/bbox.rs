use super::GridMap;
use crate::cell::{Cell, CellIndex};
use crate::error::Result;

impl GridMap {
    /// Every cell in the index rectangle spanned by `c1` and `c2`, except the
    /// two corners themselves.
    ///
    /// Cells come out row-major within the sub-rectangle. The result holds
    /// `(|Δrow| + 1) * (|Δcol| + 1) - 2` cells when the corners differ and is
    /// empty when they are the same cell.
    ///
    /// ```
    /// use trajgrid::GridMap;
    ///
    /// let grid = GridMap::new(4, 0.0, 0.0, 4.0, 4.0)?;
    /// let inner = grid.bounding_box(grid.cell(0, 0)?, grid.cell(2, 1)?)?;
    /// assert_eq!(inner.len(), 4);
    /// # Ok::<(), trajgrid::GridError>(())
    /// ```
    pub fn bounding_box(&self, c1: &Cell, c2: &Cell) -> Result<Vec<&Cell>> {
        self.bounding_box_between(c1.index(), c2.index())
    }

    /// Index-based form of [`bounding_box`](Self::bounding_box).
    pub fn bounding_box_between(&self, a: CellIndex, b: CellIndex) -> Result<Vec<&Cell>> {
        self.check_index(a)?;
        self.check_index(b)?;

        let (start_i, end_i) = (a.row.min(b.row), a.row.max(b.row));
        let (start_j, end_j) = (a.col.min(b.col), a.col.max(b.col));

        let mut cells = Vec::with_capacity((end_i - start_i + 1) * (end_j - start_j + 1));
        for i in start_i..=end_i {
            for j in start_j..=end_j {
                let cell = &self.cells[i * self.n + j];
                if cell.index() != a && cell.index() != b {
                    cells.push(cell);
                }
            }
        }

        Ok(cells)
    }
}
