//! Error types for redact-engine

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("No patterns to redact")]
    NoPatterns,

    #[error("Segment plan mismatch: {highlights} highlights for {offsets} offsets")]
    PlanMismatch { highlights: usize, offsets: usize },

    #[error("Invalid split offsets {offsets:?} for run of length {len}")]
    InvalidSplit { offsets: Vec<usize>, len: usize },

    #[error(transparent)]
    Document(#[from] redact_core::Error),
}
