//! `cg-lots`: building/park lots and cell partitioning.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`lot`]       | `Lot`, `LotKind`                                              |
//! | [`partition`] | `LotPartitioner`, `residual_rects`                            |
//!
//! Lots carry no id of their own: a `LotId` is the lot's position in the
//! owning layout's lot list.

pub mod lot;
pub mod partition;

#[cfg(test)]
mod tests;

pub use lot::{Lot, LotKind};
pub use partition::{LotPartitioner, residual_rects};
