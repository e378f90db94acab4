//! Occupancy-grid error type.

use thiserror::Error;

/// Errors produced by `cg-grid`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("flattened grid has {actual} cells, expected {width}×{length} = {expected}")]
    RestoreLengthMismatch {
        width: usize,
        length: usize,
        expected: usize,
        actual: usize,
    },
}

pub type GridResult<T> = Result<T, GridError>;
