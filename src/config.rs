//! Grid and discretization settings.
//!
//! Settings are plain serde structs so they can be embedded in a larger
//! application config. With the `toml` feature they can also be parsed
//! directly from a TOML document.

use crate::error::{GridError, Result};
use serde::{Deserialize, Serialize};

/// Grids larger than this many cells get a warning at construction time.
pub(crate) const LARGE_GRID_CELLS: usize = 1_000_000;

/// Grid configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridConfig {
    /// Number of cells along each axis
    #[serde(default = "GridConfig::default_cell_count")]
    pub cell_count: usize,

    #[serde(default)]
    pub discretize: DiscretizeOptions,
}

/// Controls how raw trajectories are turned into cell sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiscretizeOptions {
    /// Insert the intermediate cells of a shortest traversal between
    /// consecutive cells that are not adjacent.
    #[serde(default = "DiscretizeOptions::default_fill_gaps")]
    pub fill_gaps: bool,

    /// Collapse runs of the same cell into a single entry.
    #[serde(default = "DiscretizeOptions::default_dedup_consecutive")]
    pub dedup_consecutive: bool,
}

impl DiscretizeOptions {
    const fn default_fill_gaps() -> bool {
        true
    }

    const fn default_dedup_consecutive() -> bool {
        true
    }

    /// Keep every point's cell as-is: no gap filling, no deduplication.
    pub fn raw() -> Self {
        Self {
            fill_gaps: false,
            dedup_consecutive: false,
        }
    }

    pub fn with_fill_gaps(mut self, fill_gaps: bool) -> Self {
        self.fill_gaps = fill_gaps;
        self
    }

    pub fn with_dedup_consecutive(mut self, dedup: bool) -> Self {
        self.dedup_consecutive = dedup;
        self
    }
}

impl Default for DiscretizeOptions {
    fn default() -> Self {
        Self {
            fill_gaps: Self::default_fill_gaps(),
            dedup_consecutive: Self::default_dedup_consecutive(),
        }
    }
}

impl GridConfig {
    const fn default_cell_count() -> usize {
        16
    }

    pub fn with_cell_count(mut self, n: usize) -> Self {
        assert!(n > 0, "Cell count must be greater than zero");

        if n.saturating_mul(n) > LARGE_GRID_CELLS {
            log::warn!(
                "Cell count of {} yields {} cells, which may consume significant memory",
                n,
                n.saturating_mul(n)
            );
        }

        self.cell_count = n;
        self
    }

    pub fn with_discretize(mut self, options: DiscretizeOptions) -> Self {
        self.discretize = options;
        self
    }

    /// Check values that serde cannot reject on its own.
    pub fn validate(&self) -> Result<()> {
        if self.cell_count == 0 {
            return Err(GridError::Config(
                "cell_count must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a configuration from TOML.
    ///
    /// ```
    /// use trajgrid::GridConfig;
    ///
    /// let config = GridConfig::from_toml_str("cell_count = 32").unwrap();
    /// assert_eq!(config.cell_count, 32);
    /// assert!(config.discretize.fill_gaps);
    /// ```
    #[cfg(feature = "toml")]
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s).map_err(|e| GridError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_count: Self::default_cell_count(),
            discretize: DiscretizeOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GridConfig::default();
        assert_eq!(config.cell_count, 16);
        assert!(config.discretize.fill_gaps);
        assert!(config.discretize.dedup_consecutive);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_methods() {
        let config = GridConfig::default()
            .with_cell_count(64)
            .with_discretize(DiscretizeOptions::raw().with_dedup_consecutive(true));
        assert_eq!(config.cell_count, 64);
        assert!(!config.discretize.fill_gaps);
        assert!(config.discretize.dedup_consecutive);
    }

    #[test]
    #[should_panic(expected = "Cell count must be greater than zero")]
    fn test_zero_cell_count_panics() {
        let _ = GridConfig::default().with_cell_count(0);
    }

    #[test]
    fn test_validate_rejects_zero_from_serde() {
        let config: GridConfig = serde_json::from_str(r#"{"cell_count": 0}"#).unwrap();
        assert!(matches!(config.validate(), Err(GridError::Config(_))));
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let parsed: std::result::Result<GridConfig, _> =
            serde_json::from_str(r#"{"cell_count": 4, "padding": 0.1}"#);
        assert!(parsed.is_err());
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_from_toml() {
        let config = GridConfig::from_toml_str(
            r#"
            cell_count = 8

            [discretize]
            fill_gaps = false
            "#,
        )
        .unwrap();
        assert_eq!(config.cell_count, 8);
        assert!(!config.discretize.fill_gaps);
        assert!(config.discretize.dedup_consecutive);

        assert!(GridConfig::from_toml_str("cell_count = 0").is_err());
        assert!(GridConfig::from_toml_str("cell_count = \"x\"").is_err());
    }
}
