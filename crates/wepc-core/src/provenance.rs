use serde::{Deserialize, Serialize};

/// Version of the segment snapshot layout; written into every snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SchemaVersion {
    /// Bumped when older snapshots can no longer be read.
    pub major: u32,
    /// Bumped when fields are added.
    pub minor: u32,
    /// Bumped for fixes that leave the layout unchanged.
    pub patch: u32,
}

impl SchemaVersion {
    /// Version `major.minor.patch`.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        Self::new(1, 0, 0)
    }
}

/// Record of which loader last wrote into a segment and from which input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LoadProvenance {
    /// Name of the loader that produced the data.
    pub loader: String,
    /// Field key the loader stored its output under.
    pub field: String,
    /// Path of the input file, as given by the caller.
    pub source: String,
    /// Fingerprint of the system configuration in effect.
    pub config_hash: String,
}
