//! `cg-city`: cell allocation and generation orchestration.
//!
//! # Pipeline
//!
//! ```text
//! CityGenerator::new(config).build()?   → GenerationContext
//!   ① roads  RoadNetworkBuilder over the terrain config
//!   ② cells  road-bounded rectangles between the centrelines
//!   ③ lots   city mode (parks + surrounding building lots) or
//!            suburban mode (parks + scattered building lots with
//!            access roads)
//!   ④ trees  scatter over the open ground (optional)
//!                                       → CityLayout
//! ```
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`cells`]     | `compute_cells`                                           |
//! | [`allocator`] | `CityCellAllocator`, `ScatterReport`                      |
//! | [`trees`]     | `scatter_trees`, tree density and spacing                 |
//! | [`context`]   | `GenerationContext`                                       |
//! | [`generator`] | `CityGenerator`                                           |
//! | [`layout`]    | `CityLayout`, building packing                            |
//! | [`spawns`]    | `SpawnPoint`, `scatter_spawns`                            |
//! | [`scene`]     | `SceneRecord`, `SceneKind`                                |
//! | [`record`]    | `LotRecord`                                               |
//! | [`estimates`] | `Estimates`                                               |
//! | [`error`]     | `CityError`, `CityResult<T>`                              |

pub mod allocator;
pub mod cells;
pub mod context;
pub mod error;
pub mod estimates;
pub mod generator;
pub mod layout;
pub mod record;
pub mod scene;
pub mod spawns;
pub mod trees;


pub use allocator::{CityCellAllocator, ScatterReport};
pub use cells::compute_cells;
pub use context::GenerationContext;
pub use error::{CityError, CityResult};
pub use estimates::Estimates;
pub use generator::CityGenerator;
pub use layout::CityLayout;
pub use record::LotRecord;
pub use scene::{SceneKind, SceneRecord};
pub use spawns::{SpawnPoint, scatter_spawns};
pub use trees::{scatter_trees, tree_density, tree_spacing};
