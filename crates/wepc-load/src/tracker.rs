use wepc_core::errors::{ErrorInfo, WepcError};
use wepc_core::PcoordArray;
use wepc_system::{StateLabel, StateTable, WeSystem};

/// Frame count and raw row layout expected by the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerSettings {
    /// Frames in a full segment.
    pub frames: usize,
    /// Raw coordinate columns per frame.
    pub raw_ndim: usize,
    /// Raw column compared against the state table.
    pub classify_dim: usize,
}

impl TrackerSettings {
    /// Settings derived from an initialised system.
    pub fn from_system(system: &WeSystem) -> Self {
        let states = &system.config().states;
        Self {
            frames: system.pcoord_len(),
            raw_ndim: states.raw_ndim,
            classify_dim: states.classify_dim,
        }
    }

    /// Column index of the label in the assembled progress coordinate.
    pub fn label_column(&self) -> usize {
        self.raw_ndim
    }
}

/// How the labels of a call are seeded before the final frame is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelSeed {
    /// Single basis/initial point: start from the unknown sentinel and classify it.
    BasisPoint,
    /// Full segment continuing from a label carried over from the prior segment.
    Inherited(StateLabel),
}

/// Output of [`track_states`].
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedStates {
    /// Raw columns followed by the label column, one row per frame.
    pub pcoord: PcoordArray,
    /// Label of the last frame, which the next segment inherits.
    pub final_label: StateLabel,
}

/// Labels a block of raw coordinates.
///
/// A segment's label is resolved only at its end: every frame but the last
/// keeps the label the segment started with, and the final frame is
/// reclassified against the [`StateTable`]. A final value outside every
/// interval keeps the seeded label.
///
/// `raw` must be `1 x raw_ndim` for [`LabelSeed::BasisPoint`] and
/// `frames x raw_ndim` otherwise.
pub fn track_states(
    raw: &PcoordArray,
    table: &StateTable,
    settings: &TrackerSettings,
    seed: LabelSeed,
) -> Result<TrackedStates, WepcError> {
    if settings.frames == 0 || settings.classify_dim >= settings.raw_ndim {
        return Err(WepcError::Config(
            ErrorInfo::new("tracker-settings", "tracker needs frames and a valid classify column")
                .with_context("frames", settings.frames.to_string())
                .with_context("raw_ndim", settings.raw_ndim.to_string())
                .with_context("classify_dim", settings.classify_dim.to_string()),
        ));
    }
    let frames = match seed {
        LabelSeed::BasisPoint => 1,
        LabelSeed::Inherited(_) => settings.frames,
    };
    if raw.rows() != frames {
        return Err(WepcError::shape_mismatch(
            "pcoord-frames",
            "raw coordinate rows",
            frames,
            raw.rows(),
        ));
    }
    if raw.cols() != settings.raw_ndim {
        return Err(WepcError::shape_mismatch(
            "pcoord-columns",
            "raw coordinate columns",
            settings.raw_ndim,
            raw.cols(),
        ));
    }
    let classify = |row: usize| raw.get(row, settings.classify_dim);

    let mut labels = match seed {
        LabelSeed::BasisPoint => {
            let first = classify(0).and_then(|value| table.classify(value));
            vec![first.unwrap_or(table.unknown_state()); frames]
        }
        LabelSeed::Inherited(label) => vec![label; frames],
    };

    let last = frames - 1;
    if let Some(value) = classify(last) {
        labels[last] = table.classify_or(value, labels[last]);
    }
    let final_label = labels[last];

    let width = settings.raw_ndim + 1;
    let mut values = Vec::with_capacity(frames * width);
    for (row, label) in raw.iter_rows().zip(&labels) {
        values.extend_from_slice(row);
        values.push(*label as f32);
    }
    let pcoord = PcoordArray::new(frames, width, values)?;
    Ok(TrackedStates {
        pcoord,
        final_label,
    })
}
