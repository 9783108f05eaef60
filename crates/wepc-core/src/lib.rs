#![deny(missing_docs)]
#![doc = "Core error, array and segment types for the weighted-ensemble progress-coordinate system."]

/// `WepcError` and its structured payload.
pub mod errors;
/// Snapshot versioning and per-load provenance records.
pub mod provenance;
/// JSON helpers for segment snapshots.
#[path = "serde.rs"]
pub mod serde_io;
mod types;

pub use errors::{ErrorInfo, WepcError};
pub use provenance::{LoadProvenance, SchemaVersion};
pub use serde_io::{segment_from_json, segment_to_json};
pub use types::{Dataset, PcoordArray, Segment, SegmentStorage};
