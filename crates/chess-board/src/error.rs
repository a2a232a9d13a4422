//! Errors raised by board mutation.

use thiserror::Error;

/// Errors from the raw, index-based board entry points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("square out of range: file {file}, rank {rank} (both must be 0-7)")]
    SquareOutOfRange { file: u8, rank: u8 },
}
