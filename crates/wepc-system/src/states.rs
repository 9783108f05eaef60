use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use wepc_core::errors::{ErrorInfo, WepcError};

/// Discrete state ("color") label carried in the last progress-coordinate column.
pub type StateLabel = u32;

/// Largest label that survives the round trip through an `f32` column.
pub const MAX_STATE_LABEL: StateLabel = 1 << 24;

/// Half-open `[lo, hi)` interval of the classification coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateInterval {
    /// Inclusive lower bound.
    pub lo: f64,
    /// Exclusive upper bound.
    pub hi: f64,
}

impl StateInterval {
    /// Creates a new interval.
    pub const fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    /// Membership test at single precision, the precision coordinates are stored in.
    pub fn contains(&self, value: f32) -> bool {
        value >= self.lo as f32 && value < self.hi as f32
    }
}

/// Ordered interval table plus the sentinel for unclassified points.
///
/// The table is immutable once built. Lookups scan every interval in order
/// and the last one containing the value wins, so overlapping intervals
/// resolve to the later entry.
#[derive(Debug, Clone, PartialEq)]
pub struct StateTable {
    intervals: Vec<StateInterval>,
    unknown: StateLabel,
}

impl StateTable {
    /// Builds a table, rejecting empty or NaN intervals and a sentinel that
    /// collides with an interval index.
    pub fn new(intervals: Vec<StateInterval>, unknown: StateLabel) -> Result<Self, WepcError> {
        for (index, interval) in intervals.iter().enumerate() {
            if interval.lo.partial_cmp(&interval.hi) != Some(Ordering::Less) {
                return Err(WepcError::Config(
                    ErrorInfo::new("state-interval", "state interval must satisfy lo < hi")
                        .with_context("index", index.to_string())
                        .with_context("lo", interval.lo.to_string())
                        .with_context("hi", interval.hi.to_string()),
                ));
            }
        }
        if intervals.len() > MAX_STATE_LABEL as usize || unknown > MAX_STATE_LABEL {
            return Err(WepcError::Config(
                ErrorInfo::new("state-range", "state labels must fit exactly in an f32 column")
                    .with_context("unknown_state", unknown.to_string())
                    .with_context("intervals", intervals.len().to_string()),
            ));
        }
        if (unknown as usize) < intervals.len() {
            return Err(WepcError::Config(
                ErrorInfo::new(
                    "state-sentinel",
                    "unknown state collides with an interval index",
                )
                .with_context("unknown_state", unknown.to_string())
                .with_context("intervals", intervals.len().to_string())
                .with_hint("use a sentinel at least as large as the number of intervals"),
            ));
        }
        Ok(Self { intervals, unknown })
    }

    /// Intervals in table order.
    pub fn intervals(&self) -> &[StateInterval] {
        &self.intervals
    }

    /// Number of classified states.
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Whether the table has no intervals.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Sentinel label for points that were never classified.
    pub fn unknown_state(&self) -> StateLabel {
        self.unknown
    }

    /// Whether `label` is a table index or the sentinel.
    pub fn is_valid_label(&self, label: StateLabel) -> bool {
        label == self.unknown || (label as usize) < self.intervals.len()
    }

    /// Index of the last interval containing `value`, if any.
    pub fn classify(&self, value: f32) -> Option<StateLabel> {
        let mut matched = None;
        for (index, interval) in self.intervals.iter().enumerate() {
            if interval.contains(value) {
                matched = Some(index as StateLabel);
            }
        }
        matched
    }

    /// Classifies `value`, falling back to `current` on a miss.
    pub fn classify_or(&self, value: f32, current: StateLabel) -> StateLabel {
        self.classify(value).unwrap_or(current)
    }
}
