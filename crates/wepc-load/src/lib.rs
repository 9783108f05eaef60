#![deny(missing_docs)]
#![doc = "Per-segment data loaders for the weighted-ensemble progress-coordinate system."]

use std::path::Path;

use wepc_core::errors::WepcError;
use wepc_core::SegmentStorage;

/// State-tracking progress-coordinate loader.
pub mod color;
/// Cartesian coordinate loader.
pub mod coords;
/// Engine log loader.
pub mod logs;
/// Loader lookup by name.
pub mod registry;
/// Whitespace-delimited numeric text parsing.
pub mod text;
/// Discrete state tracking across segment boundaries.
pub mod tracker;

pub use color::ColorTrackingLoader;
pub use coords::CoordLoader;
pub use logs::{parse_log, LogLoader};
pub use registry::{build_loader, LoaderKind};
pub use text::{load_table, parse_table};
pub use tracker::{track_states, LabelSeed, TrackedStates, TrackerSettings};

/// Callback that turns one per-segment output file into stored segment data.
pub trait DatasetLoader: Send + Sync {
    /// Stable loader name.
    fn name(&self) -> &'static str;

    /// Loads `path` into `segment` under `field`.
    ///
    /// `single_point` marks the evaluation of a lone basis/initial point
    /// rather than a full segment. Any parse or shape failure is returned
    /// without touching the segment.
    fn load(
        &self,
        field: &str,
        path: &Path,
        segment: &mut dyn SegmentStorage,
        single_point: bool,
    ) -> Result<(), WepcError>;
}
