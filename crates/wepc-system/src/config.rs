use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use wepc_core::errors::{ErrorInfo, WepcError};

use crate::states::StateInterval;

/// YAML-configurable description of the progress-coordinate space and loaders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    /// Number of columns in a stored progress coordinate (raw columns plus the label).
    #[serde(default = "default_pcoord_ndim")]
    pub pcoord_ndim: usize,
    /// Number of frames reported per segment.
    #[serde(default = "default_pcoord_len")]
    pub pcoord_len: usize,
    /// Bin boundaries and initial occupancy targets.
    #[serde(default)]
    pub binning: BinningConfig,
    /// Discrete state table used by the color tracker.
    #[serde(default)]
    pub states: StateConfig,
    /// Auxiliary coordinate loader layout.
    #[serde(default)]
    pub coords: CoordConfig,
    /// Auxiliary log loader layout.
    #[serde(default)]
    pub log: LogConfig,
}

fn default_pcoord_ndim() -> usize {
    3
}

fn default_pcoord_len() -> usize {
    6
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            pcoord_ndim: default_pcoord_ndim(),
            pcoord_len: default_pcoord_len(),
            binning: BinningConfig::default(),
            states: StateConfig::default(),
            coords: CoordConfig::default(),
            log: LogConfig::default(),
        }
    }
}

/// Rectilinear bin boundaries and the uniform per-bin target count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinningConfig {
    /// Strictly increasing boundaries, one list per binned dimension.
    #[serde(default = "default_boundaries")]
    pub boundaries: Vec<Vec<f64>>,
    /// Walkers requested per bin at start-up.
    #[serde(default = "default_target_count")]
    pub target_count: u32,
}

fn default_boundaries() -> Vec<Vec<f64>> {
    vec![vec![
        0.00,
        2.80,
        2.88,
        3.00,
        3.10,
        3.29,
        3.79,
        3.94,
        4.12,
        4.39,
        5.43,
        5.90,
        6.90,
        7.90,
        8.90,
        9.90,
        10.90,
        11.90,
        12.90,
        13.90,
        14.90,
        15.90,
        f64::INFINITY,
    ]]
}

fn default_target_count() -> u32 {
    4
}

impl Default for BinningConfig {
    fn default() -> Self {
        Self {
            boundaries: default_boundaries(),
            target_count: default_target_count(),
        }
    }
}

/// State intervals and the layout of the raw coordinate rows they classify.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateConfig {
    /// Half-open `[lo, hi)` intervals; the list position is the state index.
    #[serde(default = "default_intervals")]
    pub intervals: Vec<StateInterval>,
    /// Label written when a single point matches no interval.
    #[serde(default = "default_unknown_state")]
    pub unknown_state: u32,
    /// Columns per row in the raw coordinate file.
    #[serde(default = "default_raw_ndim")]
    pub raw_ndim: usize,
    /// Raw column that decides the state.
    #[serde(default)]
    pub classify_dim: usize,
}

fn default_intervals() -> Vec<StateInterval> {
    vec![
        StateInterval::new(0.0, 0.20),
        StateInterval::new(11.60, f64::INFINITY),
    ]
}

fn default_unknown_state() -> u32 {
    2
}

fn default_raw_ndim() -> usize {
    2
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            intervals: default_intervals(),
            unknown_state: default_unknown_state(),
            raw_ndim: default_raw_ndim(),
            classify_dim: 0,
        }
    }
}

/// Shape of the per-segment atomic coordinate dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordConfig {
    /// Frames per segment in the coordinate dump.
    #[serde(default = "default_loader_frames")]
    pub n_frames: usize,
    /// Atoms recorded per frame.
    #[serde(default = "default_n_atoms")]
    pub n_atoms: usize,
}

fn default_loader_frames() -> usize {
    6
}

fn default_n_atoms() -> usize {
    2
}

impl Default for CoordConfig {
    fn default() -> Self {
        Self {
            n_frames: default_loader_frames(),
            n_atoms: default_n_atoms(),
        }
    }
}

/// Shape of the per-segment engine log table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Frames per segment in the log.
    #[serde(default = "default_loader_frames")]
    pub n_frames: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            n_frames: default_loader_frames(),
        }
    }
}

fn config_error(code: &str, message: impl Into<String>) -> WepcError {
    WepcError::Config(ErrorInfo::new(code, message))
}

impl SystemConfig {
    /// Reads a YAML configuration file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self, WepcError> {
        let contents = fs::read_to_string(path).map_err(|err| {
            WepcError::Io(
                ErrorInfo::new("config-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        Self::from_yaml(&contents).map_err(|err| match err {
            WepcError::Serde(info) => {
                WepcError::Serde(info.with_context("path", path.display().to_string()))
            }
            other => other,
        })
    }

    /// Parses a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, WepcError> {
        serde_yaml::from_str(yaml)
            .map_err(|err| WepcError::Serde(ErrorInfo::new("config-parse", err.to_string())))
    }

    /// Renders the configuration as YAML.
    pub fn to_yaml(&self) -> Result<String, WepcError> {
        serde_yaml::to_string(self)
            .map_err(|err| WepcError::Serde(ErrorInfo::new("config-serialize", err.to_string())))
    }

    /// Checks cross-field consistency. Bin boundaries and state intervals are
    /// checked again when the mapper and table are built.
    pub fn validate(&self) -> Result<(), WepcError> {
        if self.pcoord_len == 0 {
            return Err(config_error("pcoord-len-zero", "pcoord_len must be positive"));
        }
        if self.states.raw_ndim == 0 {
            return Err(config_error("raw-ndim-zero", "states.raw_ndim must be positive"));
        }
        if self.pcoord_ndim != self.states.raw_ndim + 1 {
            return Err(WepcError::Config(
                ErrorInfo::new(
                    "pcoord-ndim",
                    "pcoord_ndim must equal states.raw_ndim plus one label column",
                )
                .with_context("pcoord_ndim", self.pcoord_ndim.to_string())
                .with_context("raw_ndim", self.states.raw_ndim.to_string()),
            ));
        }
        if self.states.classify_dim >= self.states.raw_ndim {
            return Err(WepcError::Config(
                ErrorInfo::new("classify-dim", "states.classify_dim is out of range")
                    .with_context("classify_dim", self.states.classify_dim.to_string())
                    .with_context("raw_ndim", self.states.raw_ndim.to_string()),
            ));
        }
        if self.binning.boundaries.len() > self.pcoord_ndim {
            return Err(config_error(
                "bin-ndim",
                "more binned dimensions than progress coordinate columns",
            ));
        }
        if self.coords.n_frames == 0 || self.coords.n_atoms == 0 {
            return Err(config_error(
                "coords-shape",
                "coords.n_frames and coords.n_atoms must be positive",
            ));
        }
        if self.log.n_frames == 0 {
            return Err(config_error("log-frames", "log.n_frames must be positive"));
        }
        Ok(())
    }
}
