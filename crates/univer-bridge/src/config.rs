//! Transfer configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default number of cells read or written per agent round trip
pub const DEFAULT_MAX_CELLS_PER_BATCH: usize = 1000;

/// Settings shared by every transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BridgeConfig {
    /// Cell budget of one chunk; rows per chunk is derived from it
    pub max_cells_per_batch: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            max_cells_per_batch: DEFAULT_MAX_CELLS_PER_BATCH,
        }
    }
}

impl BridgeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_cells_per_batch(mut self, max_cells: usize) -> Self {
        self.max_cells_per_batch = max_cells;
        self
    }

    /// Load from a JSON file; missing keys keep their defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: BridgeConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_cells_per_batch == 0 {
            return Err(Error::InvalidArgument(
                "maxCellsPerBatch must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        assert_eq!(BridgeConfig::default().max_cells_per_batch, 1000);
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{}}").unwrap();
        assert_eq!(BridgeConfig::from_json_file(file.path()).unwrap(), BridgeConfig::default());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"maxCellsPerBatch": 250}}"#).unwrap();
        assert_eq!(
            BridgeConfig::from_json_file(file.path()).unwrap().max_cells_per_batch,
            250
        );
    }

    #[test]
    fn test_zero_budget_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"maxCellsPerBatch": 0}}"#).unwrap();
        assert!(matches!(
            BridgeConfig::from_json_file(file.path()),
            Err(Error::InvalidArgument(_))
        ));
    }
}
