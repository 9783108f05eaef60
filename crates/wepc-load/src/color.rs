use std::path::Path;

use log::{debug, warn};
use wepc_core::errors::{ErrorInfo, WepcError};
use wepc_core::SegmentStorage;
use wepc_system::{StateLabel, StateTable, WeSystem, MAX_STATE_LABEL};

use crate::text::{load_table, with_path};
use crate::tracker::{track_states, LabelSeed, TrackerSettings};
use crate::DatasetLoader;

/// Progress-coordinate loader that appends a tracked state label.
///
/// Basis points are classified directly. Full segments inherit the label
/// stored in frame 0 of the segment's current progress coordinate, which the
/// driver initialises from the parent segment's final frame.
#[derive(Debug, Clone)]
pub struct ColorTrackingLoader {
    table: StateTable,
    settings: TrackerSettings,
}

impl ColorTrackingLoader {
    /// Creates a loader from an explicit table and layout.
    pub fn new(table: StateTable, settings: TrackerSettings) -> Self {
        Self { table, settings }
    }

    /// Creates a loader configured from an initialised system.
    pub fn from_system(system: &WeSystem) -> Self {
        Self::new(
            system.state_table().clone(),
            TrackerSettings::from_system(system),
        )
    }

    /// State table used for classification.
    pub fn table(&self) -> &StateTable {
        &self.table
    }

    /// Frame and column layout.
    pub fn settings(&self) -> &TrackerSettings {
        &self.settings
    }

    /// Reads the label carried over into `segment` from its parent.
    pub fn inherited_label(&self, segment: &dyn SegmentStorage) -> Result<StateLabel, WepcError> {
        let column = self.settings.label_column();
        let pcoord = segment.pcoord().ok_or_else(|| {
            WepcError::State(
                ErrorInfo::new(
                    "state-missing",
                    "segment has no stored progress coordinate to inherit a state from",
                )
                .with_hint("load the basis point with single_point set first"),
            )
        })?;
        let raw = pcoord.get(0, column).ok_or_else(|| {
            WepcError::shape_mismatch(
                "state-column",
                "stored progress coordinate columns",
                format!("> {column}"),
                pcoord.cols(),
            )
        })?;
        let valid = raw.is_finite()
            && raw >= 0.0
            && raw.fract() == 0.0
            && raw <= MAX_STATE_LABEL as f32
            && self.table.is_valid_label(raw as StateLabel);
        if !valid {
            return Err(WepcError::State(
                ErrorInfo::new("state-invalid", "stored state label is not a known state")
                    .with_context("label", raw.to_string())
                    .with_context("states", self.table.len().to_string()),
            ));
        }
        let label = raw as StateLabel;
        if label == self.table.unknown_state() {
            warn!("segment inherits the unknown state {label}; it stays unresolved until classified");
        }
        Ok(label)
    }
}

impl DatasetLoader for ColorTrackingLoader {
    fn name(&self) -> &'static str {
        "pcoord-color"
    }

    fn load(
        &self,
        field: &str,
        path: &Path,
        segment: &mut dyn SegmentStorage,
        single_point: bool,
    ) -> Result<(), WepcError> {
        let raw = load_table(path)?;
        let seed = if single_point {
            LabelSeed::BasisPoint
        } else {
            LabelSeed::Inherited(self.inherited_label(segment)?)
        };
        let tracked = track_states(&raw, &self.table, &self.settings, seed)
            .map_err(|err| with_path(err, path))?;
        debug!(
            "{field}: {} frames from {}, seed {seed:?}, final state {}",
            tracked.pcoord.rows(),
            path.display(),
            tracked.final_label
        );
        segment.set_pcoord(tracked.pcoord);
        Ok(())
    }
}
