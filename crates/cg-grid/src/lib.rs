//! `cg-grid`: occupancy grids and footprint packing.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                        |
//! |---------------|-----------------------------------------------------------------|
//! | [`occupancy`] | `OccupancyGrid` (per building lot, x-major boolean cells)       |
//! | [`packing`]   | `Footprint`, `PlacementPlan`, `BuildingPacker`, `PackReport`    |
//! | [`error`]     | `GridError`, `GridResult<T>`                                    |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public value types.     |

pub mod error;
pub mod occupancy;
pub mod packing;


pub use error::{GridError, GridResult};
pub use occupancy::{DEFAULT_CELL_SIZE, OccupancyGrid};
pub use packing::{
    BuildingPacker, Footprint, PackReport, Placement, PlacementJob, PlacementPlan,
    PlacementRequest,
};
