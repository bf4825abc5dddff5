//! Turning raw trajectories into cell sequences.
//!
//! A raw trajectory is an ordered slice of [`Point`]s. [`DatasetStats`]
//! summarises a whole dataset so a grid can be sized to it, and
//! [`discretize`] maps each trajectory onto that grid.

use crate::cell::CellIndex;
use crate::config::DiscretizeOptions;
use crate::error::{GridError, Result};
use crate::grid::GridMap;
use geo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// A trajectory expressed as grid cells.
pub type CellTrajectory = Vec<CellIndex>;

/// Length and extent summary of a raw trajectory dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetStats {
    /// Number of trajectories
    pub num: usize,
    pub min_len: usize,
    pub max_len: usize,
    pub mean_len: f64,
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl DatasetStats {
    /// Scan every point of every trajectory.
    ///
    /// # Errors
    ///
    /// [`GridError::InvalidBounds`] when the dataset holds no points at all,
    /// [`GridError::InvalidInput`] on a non-finite coordinate.
    ///
    /// ```
    /// use trajgrid::{DatasetStats, Point};
    ///
    /// let db = vec![
    ///     vec![Point::new(0.0, 0.0), Point::new(2.0, 1.0)],
    ///     vec![Point::new(-1.0, 3.0)],
    /// ];
    /// let stats = DatasetStats::from_trajectories(&db)?;
    /// assert_eq!(stats.num, 2);
    /// assert_eq!((stats.min_len, stats.max_len), (1, 2));
    /// assert_eq!((stats.min_x, stats.max_y), (-1.0, 3.0));
    /// # Ok::<(), trajgrid::GridError>(())
    /// ```
    pub fn from_trajectories<T: AsRef<[Point]>>(trajectories: &[T]) -> Result<Self> {
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        let mut min_len = usize::MAX;
        let mut max_len = 0;
        let mut total = 0usize;

        for (t_idx, trajectory) in trajectories.iter().enumerate() {
            let points = trajectory.as_ref();
            min_len = min_len.min(points.len());
            max_len = max_len.max(points.len());
            total += points.len();

            for (p_idx, p) in points.iter().enumerate() {
                if !p.x().is_finite() || !p.y().is_finite() {
                    return Err(GridError::InvalidInput(format!(
                        "Trajectory {} point {}: coordinates must be finite, got ({}, {})",
                        t_idx,
                        p_idx,
                        p.x(),
                        p.y()
                    )));
                }
                min_x = min_x.min(p.x());
                min_y = min_y.min(p.y());
                max_x = max_x.max(p.x());
                max_y = max_y.max(p.y());
            }
        }

        if total == 0 {
            return Err(GridError::InvalidBounds(
                "dataset contains no points".into(),
            ));
        }

        Ok(Self {
            num: trajectories.len(),
            min_len,
            max_len,
            mean_len: total as f64 / trajectories.len() as f64,
            min_x,
            min_y,
            max_x,
            max_y,
        })
    }

    /// Raw (unpadded) extent of the dataset.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            geo::coord! { x: self.min_x, y: self.min_y },
            geo::coord! { x: self.max_x, y: self.max_y },
        )
    }
}

/// Map one raw trajectory onto grid cells.
///
/// Each point goes to the cell [`GridMap::locate`] picks. With
/// `dedup_consecutive`, repeated cells collapse to one entry. With
/// `fill_gaps`, a jump between non-adjacent cells is bridged with the
/// intermediate cells of [`GridMap::shortest_path_between`], so every
/// consecutive pair in the output is the same cell or a Moore neighbour.
///
/// # Errors
///
/// [`GridError::PointOutOfBounds`] for the first point the grid does not cover.
///
/// ```
/// use trajgrid::{discretize, CellIndex, DiscretizeOptions, GridMap, Point};
///
/// let grid = GridMap::new(3, 0.0, 0.0, 9.0, 9.0)?;
/// let raw = [Point::new(1.0, 1.0), Point::new(1.2, 1.1), Point::new(8.0, 8.0)];
/// let cells = discretize(&grid, &raw, &DiscretizeOptions::default())?;
/// assert_eq!(
///     cells,
///     vec![CellIndex::new(0, 0), CellIndex::new(1, 1), CellIndex::new(2, 2)]
/// );
/// # Ok::<(), trajgrid::GridError>(())
/// ```
pub fn discretize(
    grid: &GridMap,
    points: &[Point],
    options: &DiscretizeOptions,
) -> Result<CellTrajectory> {
    let mut cells: CellTrajectory = Vec::with_capacity(points.len());

    for point in points {
        let index = grid.locate_index(point)?;

        match cells.last().copied() {
            Some(prev) if prev == index => {
                if !options.dedup_consecutive {
                    cells.push(index);
                }
            }
            Some(prev) if options.fill_gaps && !prev.is_adjacent(&index) => {
                let bridge = grid.shortest_path_between(prev, index)?;
                log::trace!(
                    "Bridging {} -> {} with {} intermediate cells",
                    prev,
                    index,
                    bridge.len().saturating_sub(1)
                );
                // The bridge starts at `prev`, which is already emitted.
                cells.extend(bridge.iter().skip(1).map(|c| c.index()));
                cells.push(index);
            }
            _ => cells.push(index),
        }
    }

    Ok(cells)
}

/// [`discretize`] every trajectory of a dataset, stopping at the first error.
pub fn discretize_all<T: AsRef<[Point]>>(
    grid: &GridMap,
    trajectories: &[T],
    options: &DiscretizeOptions,
) -> Result<Vec<CellTrajectory>> {
    trajectories
        .iter()
        .enumerate()
        .map(|(i, t)| {
            discretize(grid, t.as_ref(), options).inspect_err(|e| {
                log::debug!("Trajectory {} could not be discretized: {}", i, e);
            })
        })
        .collect()
}
