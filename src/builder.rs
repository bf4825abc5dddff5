//! Grid builder for flexible construction
//!
//! Collects a cell count and a bounding rectangle from whichever source the
//! caller has at hand (explicit bounds, dataset statistics, raw trajectories
//! or a [`GridConfig`]) and builds the [`GridMap`].

use crate::config::GridConfig;
use crate::error::{GridError, Result};
use crate::grid::GridMap;
use crate::trajectory::DatasetStats;
use geo::{Point, Rect};

/// Builder for [`GridMap`].
#[derive(Debug, Clone)]
pub struct GridMapBuilder {
    config: GridConfig,
    bounds: Option<(f64, f64, f64, f64)>,
}

impl GridMapBuilder {
    /// Start with the default configuration and no bounds.
    pub fn new() -> Self {
        Self {
            config: GridConfig::default(),
            bounds: None,
        }
    }

    /// Number of cells along each axis.
    pub fn cell_count(mut self, n: usize) -> Self {
        self.config.cell_count = n;
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: GridConfig) -> Self {
        self.config = config;
        self
    }

    /// Raw, unpadded bounds of the region.
    pub fn bounds(mut self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        self.bounds = Some((min_x, min_y, max_x, max_y));
        self
    }

    pub fn rect(self, rect: Rect) -> Self {
        self.bounds(rect.min().x, rect.min().y, rect.max().x, rect.max().y)
    }

    /// Take the bounds from a dataset summary.
    pub fn stats(self, stats: &DatasetStats) -> Self {
        self.bounds(stats.min_x, stats.min_y, stats.max_x, stats.max_y)
    }

    /// Size the grid to the extent of raw trajectories.
    pub fn trajectories<T: AsRef<[Point]>>(self, trajectories: &[T]) -> Result<Self> {
        let stats = DatasetStats::from_trajectories(trajectories)?;
        log::debug!(
            "Sizing grid to {} trajectories (lengths {}..={})",
            stats.num,
            stats.min_len,
            stats.max_len
        );
        Ok(self.stats(&stats))
    }

    /// Build the grid. Inverted bounds are rejected, not swapped.
    pub fn build(self) -> Result<GridMap> {
        self.config.validate()?;

        let Some((min_x, min_y, max_x, max_y)) = self.bounds else {
            return Err(GridError::InvalidBounds("no bounds were provided".into()));
        };

        GridMap::new(self.config.cell_count, min_x, min_y, max_x, max_y)
    }
}

impl Default for GridMapBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_from_bounds() {
        let grid = GridMapBuilder::new()
            .cell_count(4)
            .bounds(0.0, 0.0, 8.0, 4.0)
            .build()
            .unwrap();
        assert_eq!(grid.n(), 4);
        assert!((grid.step_x() - 2.0).abs() < 1e-5);
        assert!((grid.step_y() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_build_from_trajectories() {
        let db = vec![
            vec![Point::new(-8.7, 41.1), Point::new(-8.6, 41.2)],
            vec![Point::new(-8.5, 41.3)],
        ];
        let grid = GridMapBuilder::new()
            .cell_count(6)
            .trajectories(&db)
            .unwrap()
            .build()
            .unwrap();
        for p in db.iter().flatten() {
            assert!(grid.locate(p).is_some());
        }
    }

    #[test]
    fn test_build_from_config() {
        let grid = GridMapBuilder::new()
            .config(GridConfig::default().with_cell_count(5))
            .bounds(0.0, 0.0, 1.0, 1.0)
            .build()
            .unwrap();
        assert_eq!(grid.size(), 25);
    }

    #[test]
    fn test_missing_bounds() {
        assert!(matches!(
            GridMapBuilder::new().build(),
            Err(GridError::InvalidBounds(_))
        ));
    }

    #[test]
    fn test_zero_cell_count() {
        assert!(
            GridMapBuilder::new()
                .cell_count(0)
                .bounds(0.0, 0.0, 1.0, 1.0)
                .build()
                .is_err()
        );
    }

    #[test]
    fn test_degenerate_bounds() {
        let result = GridMapBuilder::new().bounds(1.0, 0.0, 1.0, 1.0).build();
        assert!(matches!(result, Err(GridError::InvalidBounds(_))));

        let inverted = GridMapBuilder::new().bounds(5.0, 0.0, 1.0, 1.0).build();
        assert!(matches!(inverted, Err(GridError::InvalidBounds(_))));
    }
}
