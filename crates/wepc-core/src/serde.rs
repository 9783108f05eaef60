use crate::errors::{ErrorInfo, WepcError};
use crate::types::Segment;

fn map_err(err: serde_json::Error, code: &str) -> WepcError {
    WepcError::Serde(ErrorInfo::new(code, err.to_string()))
}

/// Serialises a segment snapshot to pretty-printed JSON.
pub fn segment_to_json(segment: &Segment) -> Result<String, WepcError> {
    serde_json::to_string_pretty(segment).map_err(|err| map_err(err, "segment-serialize"))
}

/// Restores a segment snapshot from JSON.
pub fn segment_from_json(json: &str) -> Result<Segment, WepcError> {
    serde_json::from_str(json).map_err(|err| map_err(err, "segment-deserialize"))
}
