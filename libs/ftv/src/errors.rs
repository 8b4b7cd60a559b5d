//! Error types for the FTV engine

use thiserror::Error;

/// Rejection of a request shape at the service boundary.
///
/// Synthesis and encoding are total over valid shapes, so this is the only
/// failure a caller sees before a payload is produced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    #[error("percent_missing must be within [0, 100], got {0}")]
    PercentMissingOutOfRange(f64),

    #[error("percent_missing must be a finite number")]
    PercentMissingNotFinite,

    #[error("Too many samples: requested {requested}, limit {limit}")]
    TooManySamples { requested: u64, limit: u64 },
}

/// Failure reading an FTV payload back into blocks.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Truncated block header at byte offset {offset}")]
    TruncatedHeader { offset: usize },

    #[error("Truncated block at byte offset {offset}: need {needed} bytes, have {available}")]
    TruncatedBlock {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("Point count mismatch at byte offset {offset}: {first} != {second}")]
    CountMismatch { offset: usize, first: u32, second: u32 },
}
