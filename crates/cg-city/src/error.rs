use cg_core::CgError;
use cg_grid::GridError;
use cg_roads::RoadError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CityError {
    #[error(transparent)]
    Core(#[from] CgError),

    #[error(transparent)]
    Road(#[from] RoadError),

    #[error("occupancy grid error: {0}")]
    Grid(#[from] GridError),

    #[error("lot record {name}: {reason}")]
    LotRecord { name: String, reason: String },
}

pub type CityResult<T> = Result<T, CityError>;
