use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use wepc_core::errors::{ErrorInfo, WepcError};
use wepc_system::WeSystem;

use crate::color::ColorTrackingLoader;
use crate::coords::CoordLoader;
use crate::logs::LogLoader;
use crate::DatasetLoader;

/// Names of the loaders a driver can bind to per-segment outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoaderKind {
    /// State-tracking progress coordinate.
    PcoordColor,
    /// Cartesian coordinate dump.
    Coords,
    /// Engine log table.
    Log,
}

impl LoaderKind {
    /// Every registered loader.
    pub const ALL: [LoaderKind; 3] = [LoaderKind::PcoordColor, LoaderKind::Coords, LoaderKind::Log];

    /// Stable name used in configuration and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            LoaderKind::PcoordColor => "pcoord-color",
            LoaderKind::Coords => "coords",
            LoaderKind::Log => "log",
        }
    }

    /// Field key the loader writes to unless told otherwise.
    pub fn default_field(&self) -> &'static str {
        match self {
            LoaderKind::PcoordColor => "pcoord",
            LoaderKind::Coords => "coord",
            LoaderKind::Log => "log",
        }
    }
}

impl fmt::Display for LoaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoaderKind {
    type Err = WepcError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        LoaderKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == name)
            .ok_or_else(|| {
                WepcError::Config(
                    ErrorInfo::new("loader-unknown", format!("no loader named {name:?}"))
                        .with_hint("expected one of pcoord-color, coords, log"),
                )
            })
    }
}

/// Builds the loader of the given kind, configured from `system`.
pub fn build_loader(system: &WeSystem, kind: LoaderKind) -> Box<dyn DatasetLoader> {
    match kind {
        LoaderKind::PcoordColor => Box::new(ColorTrackingLoader::from_system(system)),
        LoaderKind::Coords => Box::new(CoordLoader::from_system(system)),
        LoaderKind::Log => Box::new(LogLoader::from_system(system)),
    }
}
