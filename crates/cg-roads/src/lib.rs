//! `cg-roads`: road network generation and the turn-restricted road graph.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                          |
//! |-------------|-------------------------------------------------------------------|
//! | [`segment`] | `RoadSegment`, `SegmentKind`, `TurnRules`, `Crosswalk`            |
//! | [`network`] | `RoadNetwork` (ordered segments + name index)                     |
//! | [`builder`] | `RoadLayout`, `RoadNetworkBuilder` (corner → intersection phases) |
//! | [`access`]  | `access_road_rect`                                                |
//! | [`graph`]   | `IntersectionGraph` (R-tree point location, turn resolution)      |
//! | [`record`]  | `RoadSegmentRecord`, `RoadDataAsset`, CSV I/O                     |
//! | [`error`]   | `RoadError`, `RoadResult<T>`                                      |
//!
//! # Coordinates
//!
//! The terrain spans `[0, W] × [0, L]`.  East is `+x`, North is `+y`.  The
//! perimeter ring occupies the outer road width on every side.

pub mod access;
pub mod builder;
pub mod error;
pub mod graph;
pub mod network;
pub mod record;
pub mod segment;

#[cfg(test)]
mod tests;

pub use access::access_road_rect;
pub use builder::{RoadLayout, RoadNetworkBuilder};
pub use error::{RoadError, RoadResult};
pub use graph::{
    DEFAULT_ALIGNMENT_TOLERANCE, DEFAULT_CONNECT_RADIUS, FALLBACK_CONNECT_RADIUS, IntersectionGraph,
};
pub use network::RoadNetwork;
pub use record::{
    RoadDataAsset, RoadSegmentRecord, TerrainRecord, read_records_csv, write_records_csv,
};
pub use segment::{Crosswalk, RoadSegment, SegmentKind, TurnRules};
