use cg_core::{LotId, Rect, SegmentId};
use cg_grid::OccupancyGrid;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LotKind {
    /// Buildable lot; owns its occupancy grid exclusively.
    Building(OccupancyGrid),
    Park,
}

/// A building or park rectangle inside a city cell.
///
/// The rectangle never changes after creation.  The only field set later is
/// `access_road`, once lot generation has synthesized a connector for it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lot {
    rect: Rect,
    pub kind: LotKind,
    access_road: Option<SegmentId>,
    /// Park this lot surrounds, when it was cut around one.
    pub park: Option<LotId>,
}

impl Lot {
    pub fn building(rect: Rect, cell_size: f32) -> Self {
        Lot {
            rect,
            kind: LotKind::Building(OccupancyGrid::new(rect, cell_size)),
            access_road: None,
            park: None,
        }
    }

    pub fn park(rect: Rect) -> Self {
        Lot { rect, kind: LotKind::Park, access_road: None, park: None }
    }

    /// Rebuild a building lot around an existing grid, e.g. on reload.
    pub fn with_grid(rect: Rect, grid: OccupancyGrid) -> Self {
        Lot { rect, kind: LotKind::Building(grid), access_road: None, park: None }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    #[inline]
    pub fn is_building(&self) -> bool {
        matches!(self.kind, LotKind::Building(_))
    }

    #[inline]
    pub fn is_park(&self) -> bool {
        matches!(self.kind, LotKind::Park)
    }

    pub fn grid(&self) -> Option<&OccupancyGrid> {
        match &self.kind {
            LotKind::Building(g) => Some(g),
            LotKind::Park => None,
        }
    }

    pub fn grid_mut(&mut self) -> Option<&mut OccupancyGrid> {
        match &mut self.kind {
            LotKind::Building(g) => Some(g),
            LotKind::Park => None,
        }
    }

    #[inline]
    pub fn access_road(&self) -> Option<SegmentId> {
        self.access_road
    }

    pub fn attach_access_road(&mut self, road: SegmentId) {
        self.access_road = Some(road);
    }
}
