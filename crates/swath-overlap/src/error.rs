//! Error types for overlap computations.

use thiserror::Error;

/// Result type alias for overlap operations.
pub type Result<T> = std::result::Result<T, OverlapError>;

/// Errors surfaced by construction, computation and queries.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OverlapError {
    /// Unknown hull method or out-of-range parameter.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Input geometry cannot support a plane frame (zero normal, coincident endpoints, ...).
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// Line selector outside {0, 1}.
    #[error("invalid line selector {0}; expected 0 (line A) or 1 (line B)")]
    InvalidLineSelector(usize),
}

impl OverlapError {
    pub(crate) fn config(reason: impl Into<String>) -> Self {
        Self::Configuration(reason.into())
    }

    pub(crate) fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateGeometry(reason.into())
    }
}
