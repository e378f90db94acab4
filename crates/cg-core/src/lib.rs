//! `cg-core`: foundational types for the `citygen` layout generator.
//!
//! This crate is a dependency of every other `cg-*` crate.  It has no `cg-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                                 |
//! |---------------|----------------------------------------------------------|
//! | [`ids`]       | `SegmentId`, `LotId`                                     |
//! | [`geom`]      | `Vec2`, `Rect`, `lerp`                                   |
//! | [`direction`] | `Direction`, `Axis`, `TurnRule`, `DirectionSet`          |
//! | [`config`]    | `TerrainConfig`, `CrosswalkConfig`, `GenerationConfig`   |
//! | [`rng`]       | `GenRng` (injectable, seedable)                          |
//! | [`error`]     | `CgError`, `CgResult`                                    |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod config;
pub mod direction;
pub mod error;
pub mod geom;
pub mod ids;
pub mod rng;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{CrosswalkConfig, GenerationConfig, TerrainConfig};
pub use direction::{Axis, Direction, DirectionSet, TurnRule};
pub use error::{CgError, CgResult};
pub use geom::{Rect, Vec2, lerp};
pub use ids::{LotId, SegmentId};
pub use rng::GenRng;
