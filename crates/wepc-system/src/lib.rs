#![deny(missing_docs)]
#![doc = "Progress-coordinate space configuration: state table, rectilinear bins and target counts."]

/// Rectilinear bin mapping and per-bin targets.
pub mod binning;
/// YAML configuration schema and defaults.
pub mod config;
/// Configuration fingerprinting.
pub mod hash;
/// Discrete state intervals used for color tracking.
pub mod states;

use log::debug;
use wepc_core::errors::WepcError;

pub use binning::{RectilinearBinMapper, TargetCounts};
pub use config::{BinningConfig, CoordConfig, LogConfig, StateConfig, SystemConfig};
pub use hash::config_hash;
pub use states::{StateInterval, StateLabel, StateTable, MAX_STATE_LABEL};

/// Fully initialised, immutable system description handed to the loaders.
#[derive(Debug, Clone)]
pub struct WeSystem {
    config: SystemConfig,
    bin_mapper: RectilinearBinMapper,
    target_counts: TargetCounts,
    state_table: StateTable,
    config_hash: String,
}

impl WeSystem {
    /// Validates the configuration and builds the bin mapper, targets and state table.
    pub fn initialize(config: SystemConfig) -> Result<Self, WepcError> {
        config.validate()?;
        let bin_mapper = RectilinearBinMapper::new(config.binning.boundaries.clone())?;
        let target_counts = TargetCounts::uniform(bin_mapper.nbins(), config.binning.target_count);
        let state_table =
            StateTable::new(config.states.intervals.clone(), config.states.unknown_state)?;
        let config_hash = config_hash(&config)?;
        debug!(
            "initialised system: {} bins, {} states, pcoord {}x{}",
            bin_mapper.nbins(),
            state_table.len(),
            config.pcoord_len,
            config.pcoord_ndim
        );
        Ok(Self {
            config,
            bin_mapper,
            target_counts,
            state_table,
            config_hash,
        })
    }

    /// Source configuration.
    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    /// Columns per stored progress-coordinate row.
    pub fn pcoord_ndim(&self) -> usize {
        self.config.pcoord_ndim
    }

    /// Frames per full segment.
    pub fn pcoord_len(&self) -> usize {
        self.config.pcoord_len
    }

    /// Rectilinear bin mapper.
    pub fn bin_mapper(&self) -> &RectilinearBinMapper {
        &self.bin_mapper
    }

    /// Initial per-bin walker targets.
    pub fn target_counts(&self) -> &TargetCounts {
        &self.target_counts
    }

    /// State interval table.
    pub fn state_table(&self) -> &StateTable {
        &self.state_table
    }

    /// SHA-256 fingerprint of the configuration.
    pub fn config_hash(&self) -> &str {
        &self.config_hash
    }
}
