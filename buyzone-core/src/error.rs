//! Error types for the analysis pipeline.

use crate::config::ConfigError;
use thiserror::Error;

/// Why no analysis result could be produced.
///
/// Failures are total: the pipeline either returns a complete result or one of
/// these, never a partially filled record.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("price series is empty (the data provider returned no bars)")]
    EmptySeries,

    #[error("insufficient data: {available} usable closes, need at least {required}")]
    InsufficientData { available: usize, required: usize },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl AnalysisError {
    /// True when the caller should show a "not enough history" message.
    pub fn is_insufficient_history(&self) -> bool {
        matches!(
            self,
            AnalysisError::EmptySeries | AnalysisError::InsufficientData { .. }
        )
    }
}
