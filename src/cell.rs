//! Grid cells and their indices.

use geo::{Point, Rect};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Position of a cell in the grid matrix.
///
/// `row` advances along the x axis and `col` along the y axis, so cell
/// `(row, col)` covers `[min_x + row * step_x, min_x + (row + 1) * step_x]`
/// horizontally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellIndex {
    pub row: usize,
    pub col: usize,
}

impl CellIndex {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Chebyshev distance: the number of unit steps (diagonals allowed)
    /// between two indices.
    pub fn chebyshev_distance(&self, other: &CellIndex) -> usize {
        self.row
            .abs_diff(other.row)
            .max(self.col.abs_diff(other.col))
    }

    /// Whether `other` is one of the eight Moore neighbours of `self`.
    ///
    /// Pure index arithmetic with no notion of grid bounds.
    pub fn is_adjacent(&self, other: &CellIndex) -> bool {
        self.chebyshev_distance(other) == 1
    }

    /// Whether both coordinates fall inside `[0, n)`.
    pub fn in_bounds(&self, n: usize) -> bool {
        self.row < n && self.col < n
    }
}

impl From<(usize, usize)> for CellIndex {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for CellIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One axis-aligned rectangle of a [`GridMap`](crate::GridMap).
///
/// Cells compare equal when their indices match, regardless of geometry.
#[derive(Debug, Clone, Serialize)]
pub struct Cell {
    bounds: Rect,
    index: CellIndex,
}

impl Cell {
    /// Create a cell from its corners.
    ///
    /// Neighbouring cells must be built from the same edge values so that
    /// shared edges match bit for bit.
    pub(crate) fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64, index: CellIndex) -> Self {
        Self {
            bounds: Rect::new(
                geo::coord! { x: min_x, y: min_y },
                geo::coord! { x: max_x, y: max_y },
            ),
            index,
        }
    }

    pub fn index(&self) -> CellIndex {
        self.index
    }

    pub fn bounds(&self) -> &Rect {
        &self.bounds
    }

    pub fn min_x(&self) -> f64 {
        self.bounds.min().x
    }

    pub fn min_y(&self) -> f64 {
        self.bounds.min().y
    }

    pub fn max_x(&self) -> f64 {
        self.bounds.max().x
    }

    pub fn max_y(&self) -> f64 {
        self.bounds.max().y
    }

    /// Check whether a point lies inside the closed rectangle of this cell.
    ///
    /// Points on a shared edge belong to every cell touching that edge.
    ///
    /// ```
    /// use trajgrid::{GridMap, Point};
    ///
    /// let grid = GridMap::new(3, 0.0, 0.0, 9.0, 9.0)?;
    /// let cell = grid.cell(0, 0)?;
    /// assert!(cell.contains(&Point::new(1.5, 1.5)));
    /// assert!(!cell.contains(&Point::new(4.5, 1.5)));
    /// # Ok::<(), trajgrid::GridError>(())
    /// ```
    pub fn contains(&self, point: &Point) -> bool {
        self.min_x() <= point.x()
            && point.x() <= self.max_x()
            && self.min_y() <= point.y()
            && point.y() <= self.max_y()
    }

    /// Draw a point uniformly from the cell's rectangle.
    pub fn sample_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Point {
        let x = self.min_x() + rng.random::<f64>() * self.bounds.width();
        let y = self.min_y() + rng.random::<f64>() * self.bounds.height();
        // Rounding in `min + r * width` can overshoot `max` by an ulp.
        Point::new(x.min(self.max_x()), y.min(self.max_y()))
    }

    pub fn center(&self) -> Point {
        self.bounds.center().into()
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl Eq for Cell {}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cell {}: ({}, {}) - ({}, {})",
            self.index,
            self.min_x(),
            self.min_y(),
            self.max_x(),
            self.max_y()
        )
    }
}

/// Adjacency test without a grid.
///
/// Same eight-neighbour rule as [`GridMap::is_adjacent_grids`](crate::GridMap::is_adjacent_grids)
/// but without clipping to map bounds. Use it for cells from different maps or
/// when no map is at hand.
pub fn is_adjacent_grids(c1: &Cell, c2: &Cell) -> bool {
    c1.index.is_adjacent(&c2.index)
}
