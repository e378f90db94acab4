//! Flat scene records for whatever places the layout into a world.

use cg_core::Vec2;
use cg_roads::{SegmentKind, TurnRules};
use serde::{Deserialize, Serialize};

use crate::CityLayout;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SceneKind {
    Road,
    Intersection,
    AccessRoad,
    BuildingLot,
    ParkLot,
    Crosswalk,
}

/// One placeable rectangle.
///
/// `width`/`length` are the world x/z extents.  `rotated` is set when the
/// object's main axis runs North/South: one-way roads heading North or
/// South, and crosswalk stripes spanning an East/West road.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneRecord {
    pub kind: SceneKind,
    pub center: Vec2,
    pub width: f32,
    pub length: f32,
    pub rotated: bool,
    pub turn: Option<TurnRules>,
}

impl CityLayout {
    /// Segments in network order, then crosswalks, then lots.
    pub fn scene_records(&self) -> Vec<SceneRecord> {
        let segments = self.network.segments().iter().map(|s| {
            let (kind, turn) = match s.kind {
                SegmentKind::Directional { .. } => (SceneKind::Road, None),
                SegmentKind::Intersection(rules) => (SceneKind::Intersection, Some(rules)),
                SegmentKind::AccessRoad => (SceneKind::AccessRoad, None),
            };
            SceneRecord {
                kind,
                center: s.center,
                width: s.width,
                length: s.length,
                rotated: s.is_vertical(),
                turn,
            }
        });
        let crosswalks = self.network.crosswalks().iter().map(|c| SceneRecord {
            kind: SceneKind::Crosswalk,
            center: c.center,
            width: c.width,
            length: c.length,
            rotated: c.across_horizontal_road,
            turn: None,
        });
        let lots = self.lots.iter().map(|lot| {
            let r = lot.rect();
            SceneRecord {
                kind: if lot.is_building() { SceneKind::BuildingLot } else { SceneKind::ParkLot },
                center: r.center(),
                width: r.width,
                length: r.height,
                rotated: false,
                turn: None,
            }
        });
        segments.chain(crosswalks).chain(lots).collect()
    }
}
