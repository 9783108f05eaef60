use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What went wrong while loading, classifying or binning segment data.
///
/// `code` is stable (for example `pcoord-frames` or `state-invalid`) so
/// callers and tests can match on it; `context` carries the offending path,
/// line, shape or label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable kebab-case error code.
    pub code: String,
    /// Diagnostic message.
    pub message: String,
    /// Input file, line, expected/found extents and similar details.
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Suggested remedy, such as loading the basis point first.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Payload with no context or hint.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Records one context entry; later entries with the same key win.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Attaches a remedy.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the progress-coordinate system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum WepcError {
    /// Filesystem access failures.
    #[error("io error: {0}")]
    Io(ErrorInfo),
    /// Malformed numeric or textual input.
    #[error("parse error: {0}")]
    Parse(ErrorInfo),
    /// Row, column or element counts that disagree with the configured shape.
    #[error("shape error: {0}")]
    Shape(ErrorInfo),
    /// Inconsistent system configuration.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Invalid or missing state labels.
    #[error("state error: {0}")]
    State(ErrorInfo),
    /// Coordinates that cannot be mapped to a bin.
    #[error("bin error: {0}")]
    Bin(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl WepcError {
    /// Payload of any variant.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            WepcError::Io(info)
            | WepcError::Parse(info)
            | WepcError::Shape(info)
            | WepcError::Config(info)
            | WepcError::State(info)
            | WepcError::Bin(info)
            | WepcError::Serde(info) => info,
        }
    }

    /// Builds a shape mismatch error comparing an expected and observed extent.
    pub fn shape_mismatch(
        code: &str,
        what: &str,
        expected: impl Display,
        found: impl Display,
    ) -> Self {
        WepcError::Shape(
            ErrorInfo::new(code, format!("{what}: expected {expected}, found {found}"))
                .with_context("expected", expected.to_string())
                .with_context("found", found.to_string()),
        )
    }
}
