//! Road-subsystem error type.

use thiserror::Error;

use cg_core::CgError;

/// Errors produced by `cg-roads`.
#[derive(Debug, Error)]
pub enum RoadError {
    #[error(transparent)]
    Core(#[from] CgError),

    #[error("segment {name:?} has unknown direction code {code}")]
    UnknownDirection { name: String, code: i32 },

    #[error("duplicate segment name {0:?}")]
    DuplicateName(String),

    #[error("road data has no terrain row")]
    MissingTerrain,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type RoadResult<T> = Result<T, RoadError>;
