use serde::Serialize;
use sha2::{Digest, Sha256};
use wepc_core::errors::{ErrorInfo, WepcError};

use crate::config::SystemConfig;

fn hash_json<T: Serialize>(value: &T) -> Result<String, WepcError> {
    let json = serde_json::to_vec(value)
        .map_err(|err| WepcError::Serde(ErrorInfo::new("serialize", err.to_string())))?;
    let mut hasher = Sha256::new();
    hasher.update(json);
    Ok(format!("{:x}", hasher.finalize()))
}

/// Canonical SHA-256 fingerprint of a system configuration.
pub fn config_hash(config: &SystemConfig) -> Result<String, WepcError> {
    hash_json(config)
}
