//! Regular grid index for discretizing 2D trajectories.
//!
//! A [`GridMap`] tiles a padded bounding rectangle with `n × n` equal
//! [`Cell`]s and answers the spatial questions trajectory pipelines ask of
//! it: which cell holds a point, how to walk between two cells, which cells
//! neighbour a cell, and which cells lie between two cells.
//!
//! ## Features
//! - **Point location**: linear scan ([`GridMap::find_cell`]) or constant time ([`GridMap::locate`])
//! - **Chebyshev paths**: [`GridMap::find_shortest_path`] steps diagonally, excluding the destination
//! - **Moore adjacency**: clipped ([`GridMap::adjacent`]) and boundary-free ([`is_adjacent_grids`])
//! - **Bounding boxes**: [`GridMap::bounding_box`] enumerates the cells between two corners
//! - **Discretization**: [`discretize`] maps raw points to cell sequences, bridging gaps
//!
//! ```rust
//! use trajgrid::{CellIndex, GridMap, Point};
//!
//! let grid = GridMap::new(3, 0.0, 0.0, 9.0, 9.0)?;
//! let start = grid.locate(&Point::new(1.5, 1.5)).unwrap();
//! assert_eq!(start.index(), CellIndex::new(0, 0));
//!
//! let path = grid.find_shortest_path(start, grid.cell(2, 2)?)?;
//! assert_eq!(path.len(), 2);
//! assert_eq!(grid.adjacent(start).len(), 3);
//! # Ok::<(), trajgrid::GridError>(())
//! ```

pub mod builder;
pub mod cell;
pub mod config;
pub mod error;
pub mod grid;
pub mod random;
pub mod spatial_index;
pub mod trajectory;

pub use builder::GridMapBuilder;
pub use cell::{Cell, CellIndex, is_adjacent_grids};
pub use config::{DiscretizeOptions, GridConfig};
pub use error::{GridError, Result};
pub use grid::{GRID_PADDING, GridMap, Neighbors};
pub use random::SharedRng;
pub use spatial_index::CellTree;
pub use trajectory::{CellTrajectory, DatasetStats, discretize, discretize_all};

pub use geo::{Point, Rect};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {
    pub use crate::{
        Cell, CellIndex, DiscretizeOptions, GridConfig, GridError, GridMap, GridMapBuilder,
        Result,
    };

    pub use crate::{discretize, is_adjacent_grids};

    pub use geo::{Point, Rect};
}
