use std::collections::BTreeSet;
use std::path::Path;

use log::debug;
use wepc_core::errors::{ErrorInfo, WepcError};
use wepc_core::{Dataset, SegmentStorage};
use wepc_system::WeSystem;

use crate::text::{parse_real, read_text, with_path};
use crate::DatasetLoader;

/// Counts the numeric fields of the first record.
///
/// Lines starting with a non-numeric token are headers. The first record
/// ends when a header token is seen for the second time; every numeric line
/// before that contributes all of its tokens.
pub fn count_fields(text: &str) -> usize {
    let mut headers = BTreeSet::new();
    let mut n_fields = 0;
    for line in text.lines() {
        let mut tokens = line.split_whitespace();
        let Some(start) = tokens.next() else {
            continue;
        };
        if headers.contains(start) {
            break;
        }
        if parse_real(start).is_some() {
            n_fields += 1 + tokens.count();
        } else {
            headers.insert(start);
        }
    }
    n_fields
}

/// Parses an engine log into an `(n_frames, n_fields)` table.
///
/// Header lines are skipped; the tokens of every numeric line are laid out
/// row-major, starting a new frame after `n_fields` values.
pub fn parse_log(text: &str, n_frames: usize) -> Result<Dataset, WepcError> {
    let n_fields = count_fields(text);
    if n_fields == 0 {
        return Err(WepcError::Parse(ErrorInfo::new(
            "log-fields",
            "log contains no numeric fields",
        )));
    }
    let capacity = n_frames * n_fields;
    let mut values = Vec::with_capacity(capacity);
    for (line_no, line) in text.lines().enumerate() {
        let mut tokens = line.split_whitespace().peekable();
        match tokens.peek() {
            Some(start) if parse_real(start).is_some() => {}
            _ => continue,
        }
        for token in tokens {
            let value = parse_real(token).ok_or_else(|| {
                WepcError::Parse(
                    ErrorInfo::new("log-token", format!("could not parse {token:?} as a real"))
                        .with_context("line", (line_no + 1).to_string()),
                )
            })?;
            if values.len() == capacity {
                return Err(WepcError::Shape(
                    ErrorInfo::new("log-overflow", "log holds more frames than configured")
                        .with_context("frames", n_frames.to_string())
                        .with_context("fields", n_fields.to_string())
                        .with_context("line", (line_no + 1).to_string()),
                ));
            }
            values.push(value);
        }
    }
    if values.len() < capacity {
        return Err(WepcError::shape_mismatch(
            "log-short",
            "log values",
            capacity,
            values.len(),
        ));
    }
    Dataset::new(vec![n_frames, n_fields], values)
}

/// Loads a free-text engine log as a fixed-shape table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogLoader {
    n_frames: usize,
}

impl LogLoader {
    /// Creates a loader expecting `n_frames` records.
    pub fn new(n_frames: usize) -> Self {
        Self { n_frames }
    }

    /// Creates a loader configured from an initialised system.
    pub fn from_system(system: &WeSystem) -> Self {
        Self::new(system.config().log.n_frames)
    }
}

impl DatasetLoader for LogLoader {
    fn name(&self) -> &'static str {
        "log"
    }

    fn load(
        &self,
        field: &str,
        path: &Path,
        segment: &mut dyn SegmentStorage,
        _single_point: bool,
    ) -> Result<(), WepcError> {
        let text = read_text(path)?;
        let dataset = parse_log(&text, self.n_frames).map_err(|err| with_path(err, path))?;
        debug!("{field}: log table {:?} from {}", dataset.shape(), path.display());
        segment.set_dataset(field, dataset);
        Ok(())
    }
}
