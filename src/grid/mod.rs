//! The n×n grid over a padded bounding rectangle.
//!
//! Cells live in a flat row-major arena: cell `(row, col)` sits at
//! `row * n + col`. The map is immutable once built, so every query borrows
//! from it and no synchronization is needed for concurrent readers.

mod adjacency;
mod bbox;
mod path;

pub use adjacency::Neighbors;

use crate::cell::{Cell, CellIndex};
use crate::config::LARGE_GRID_CELLS;
use crate::error::{GridError, Result};
use geo::{Point, Rect};
use serde::Serialize;
use std::fmt;

/// Outward padding applied to the raw bounds on every side.
pub const GRID_PADDING: f64 = 1e-6;

/// Geographic map after gridding.
#[derive(Debug, Clone, Serialize)]
pub struct GridMap {
    bounds: Rect,
    step_x: f64,
    step_y: f64,
    n: usize,
    cells: Vec<Cell>,
}

impl GridMap {
    /// Build an `n`×`n` grid over `[min_x, max_x] × [min_y, max_y]`.
    ///
    /// The rectangle is padded by [`GRID_PADDING`] on each side so points on
    /// the raw extremes still fall strictly inside the outer cells.
    ///
    /// # Errors
    ///
    /// [`GridError::InvalidBounds`] if `n == 0`, any bound is not finite, the
    /// rectangle is empty or inverted on either axis, a span overflows `f64`,
    /// or `n * n` cells could never be allocated.
    ///
    /// ```
    /// use trajgrid::GridMap;
    ///
    /// let grid = GridMap::new(3, 0.0, 0.0, 9.0, 9.0)?;
    /// assert_eq!(grid.size(), 9);
    /// assert!((grid.step_x() - 3.0).abs() < 1e-5);
    /// # Ok::<(), trajgrid::GridError>(())
    /// ```
    pub fn new(n: usize, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Result<Self> {
        validate_bounds(n, min_x, min_y, max_x, max_y)?;

        let min_x = min_x - GRID_PADDING;
        let min_y = min_y - GRID_PADDING;
        let max_x = max_x + GRID_PADDING;
        let max_y = max_y + GRID_PADDING;

        let step_x = axis_step(n, min_x, max_x, "x")?;
        let step_y = axis_step(n, min_y, max_y, "y")?;

        let total = arena_len(n)?;
        if total > LARGE_GRID_CELLS {
            log::warn!("Building a grid with {} cells; memory use may be high", total);
        }

        // Edge k sits at min + k * step; adjacent cells share the same value.
        // The last edge is pinned to the padded max so rounding cannot shrink
        // the covered area.
        let edges_x = axis_edges(n, min_x, max_x, step_x);
        let edges_y = axis_edges(n, min_y, max_y, step_y);

        let mut cells = Vec::with_capacity(total);
        for i in 0..n {
            for j in 0..n {
                cells.push(Cell::new(
                    edges_x[i],
                    edges_y[j],
                    edges_x[i + 1],
                    edges_y[j + 1],
                    CellIndex::new(i, j),
                ));
            }
        }

        log::debug!(
            "Built {}x{} grid over ({}, {}) - ({}, {}) with step ({}, {})",
            n,
            n,
            min_x,
            min_y,
            max_x,
            max_y,
            step_x,
            step_y
        );

        Ok(Self {
            bounds: Rect::new(
                geo::coord! { x: min_x, y: min_y },
                geo::coord! { x: max_x, y: max_y },
            ),
            step_x,
            step_y,
            n,
            cells,
        })
    }

    /// Build a grid covering a `geo::Rect`.
    pub fn from_rect(n: usize, rect: &Rect) -> Result<Self> {
        Self::new(n, rect.min().x, rect.min().y, rect.max().x, rect.max().y)
    }

    /// Side length of the grid.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Total number of cells (`n * n`).
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    pub fn step_x(&self) -> f64 {
        self.step_x
    }

    pub fn step_y(&self) -> f64 {
        self.step_y
    }

    /// Padded outer rectangle.
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

    /// Look up a cell by index, `None` when out of range.
    pub fn get(&self, index: CellIndex) -> Option<&Cell> {
        if index.in_bounds(self.n) {
            self.cells.get(index.row * self.n + index.col)
        } else {
            None
        }
    }

    /// Look up a cell by row and column.
    pub fn cell(&self, row: usize, col: usize) -> Result<&Cell> {
        self.get(CellIndex::new(row, col))
            .ok_or(GridError::IndexOutOfRange { row, col, n: self.n })
    }

    pub(crate) fn check_index(&self, index: CellIndex) -> Result<()> {
        if index.in_bounds(self.n) {
            Ok(())
        } else {
            Err(GridError::IndexOutOfRange {
                row: index.row,
                col: index.col,
                n: self.n,
            })
        }
    }

    /// All cells flattened row-major: `(0, 0), (0, 1), ..., (n-1, n-1)`.
    pub fn list_map(&self) -> &[Cell] {
        &self.cells
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    /// First cell in row-major order whose closed rectangle contains `point`.
    ///
    /// Linear scan over [`list_map`](Self::list_map). Prefer [`locate`](Self::locate)
    /// for repeated lookups; both always agree.
    pub fn find_cell(&self, point: &Point) -> Option<&Cell> {
        self.cells.iter().find(|cell| cell.contains(point))
    }

    /// Constant-time equivalent of [`find_cell`](Self::find_cell).
    ///
    /// The arithmetic estimate can be off by one on shared edges, so the
    /// 3×3 block around it is checked in row-major order.
    ///
    /// ```
    /// use trajgrid::{CellIndex, GridMap, Point};
    ///
    /// let grid = GridMap::new(3, 0.0, 0.0, 9.0, 9.0)?;
    /// let cell = grid.locate(&Point::new(4.5, 7.0)).unwrap();
    /// assert_eq!(cell.index(), CellIndex::new(1, 2));
    /// assert!(grid.locate(&Point::new(10.0, 1.0)).is_none());
    /// # Ok::<(), trajgrid::GridError>(())
    /// ```
    pub fn locate(&self, point: &Point) -> Option<&Cell> {
        if !point.x().is_finite() || !point.y().is_finite() {
            return None;
        }

        let row = self.axis_estimate(point.x(), self.min_x(), self.step_x)?;
        let col = self.axis_estimate(point.y(), self.min_y(), self.step_y)?;

        let last = self.n - 1;
        for i in row.saturating_sub(1)..=(row + 1).min(last) {
            for j in col.saturating_sub(1)..=(col + 1).min(last) {
                let cell = &self.cells[i * self.n + j];
                if cell.contains(point) {
                    return Some(cell);
                }
            }
        }
        None
    }

    /// Index of the cell containing `point`, or `PointOutOfBounds`.
    pub fn locate_index(&self, point: &Point) -> Result<CellIndex> {
        self.locate(point)
            .map(Cell::index)
            .ok_or(GridError::PointOutOfBounds {
                x: point.x(),
                y: point.y(),
            })
    }

    fn axis_estimate(&self, value: f64, min: f64, step: f64) -> Option<usize> {
        let offset = ((value - min) / step).floor();
        // One step of slack on both sides; the containment check decides.
        if offset < -1.0 || offset > self.n as f64 {
            return None;
        }
        Some((offset.max(0.0) as usize).min(self.n - 1))
    }
}

impl<'a> IntoIterator for &'a GridMap {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

/// Prints the index matrix, one grid row per line.
impl fmt::Display for GridMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.n) {
            let line: Vec<String> = row.iter().map(|c| c.index().to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

fn axis_step(n: usize, min: f64, max: f64, axis: &str) -> Result<f64> {
    let span = max - min;
    let step = span / n as f64;
    if !span.is_finite() || !step.is_finite() || step <= 0.0 {
        return Err(GridError::InvalidBounds(format!(
            "{} span {} - {} cannot be split into {} cells",
            axis, min, max, n
        )));
    }
    Ok(step)
}

fn axis_edges(n: usize, min: f64, max: f64, step: f64) -> Vec<f64> {
    let mut edges: Vec<f64> = (0..n).map(|k| min + step * k as f64).collect();
    edges.push(max);
    edges
}

/// Number of cells, rejected when the arena could never be allocated.
fn arena_len(n: usize) -> Result<usize> {
    n.checked_mul(n)
        .filter(|total| {
            total
                .checked_mul(std::mem::size_of::<Cell>())
                .is_some_and(|bytes| bytes <= isize::MAX as usize)
        })
        .ok_or_else(|| {
            GridError::InvalidBounds(format!("cell count {} overflows the cell arena", n))
        })
}

fn validate_bounds(n: usize, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Result<()> {
    if n == 0 {
        return Err(GridError::InvalidBounds(
            "cell count must be greater than zero".into(),
        ));
    }

    if ![min_x, min_y, max_x, max_y].iter().all(|v| v.is_finite()) {
        return Err(GridError::InvalidBounds(format!(
            "bounds must be finite, got ({}, {}) - ({}, {})",
            min_x, min_y, max_x, max_y
        )));
    }

    if max_x <= min_x {
        return Err(GridError::InvalidBounds(format!(
            "max_x ({}) must be greater than min_x ({})",
            max_x, min_x
        )));
    }

    if max_y <= min_y {
        return Err(GridError::InvalidBounds(format!(
            "max_y ({}) must be greater than min_y ({})",
            max_y, min_y
        )));
    }

    Ok(())
}
