// src/error.rs

#[derive(Debug, thiserror::Error)]
pub enum PredictorError {
    /// Input reached the engine that it cannot score.
    #[error("invalid sequence {sequence:?}: {reason}")]
    InvalidSequence { sequence: String, reason: String },

    /// Guide rejected by caller-side validation.
    #[error("invalid guide {sequence:?}: {reason}")]
    InvalidGuide { sequence: String, reason: String },

    #[error("unknown chromatin state: {0}")]
    UnknownChromatinState(String),

    #[error("unknown output format: {0} (expected text, json or csv)")]
    UnknownOutputFormat(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PredictorError>;
