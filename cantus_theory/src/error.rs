// Error type shared by every fallible operation in the crate.
//
// Parsing errors (`InvalidPitchName`, `InvalidIntervalName`,
// `InvalidIntervalQuality`) are raised at construction time; a `Pitch` or
// `Interval` either exists fully valid or not at all. `ProgressionTooLong`
// and `InvalidTransitionTable` come from `progression.rs` and only abort the
// generation call that hit them.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TheoryError {
    #[error("invalid pitch name: {name:?}")]
    InvalidPitchName { name: String },

    #[error("invalid interval name: {name:?}")]
    InvalidIntervalName { name: String },

    /// `P` on a second/third/sixth/seventh, or `M`/`m` on a unison/fourth/fifth.
    #[error("quality {quality:?} is not valid for an interval of size {size}")]
    InvalidIntervalQuality { quality: String, size: u32 },

    #[error("phrase {phrase} reached {limit} degrees without a cadence")]
    ProgressionTooLong { phrase: usize, limit: usize },

    #[error("invalid transition table: {0}")]
    InvalidTransitionTable(String),

    #[error("invalid progression config: {0}")]
    InvalidConfig(String),

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TheoryError>;
