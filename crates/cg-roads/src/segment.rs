//! Road segments, intersection turn rules and crosswalks.

use cg_core::{Direction, DirectionSet, Rect, SegmentId, TurnRule, Vec2};

// ── TurnRules ─────────────────────────────────────────────────────────────────

/// Turn permissions carried by an intersection.
///
/// The allowed exits for any incoming direction are a pure function of these
/// four fields; nothing else about the intersection affects routing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct TurnRules {
    /// Turn for traffic arriving North- or Southbound.
    pub vertical: TurnRule,
    /// Turn for traffic arriving East- or Westbound.
    pub horizontal: TurnRule,
    pub straight_vertical: bool,
    pub straight_horizontal: bool,
}

impl TurnRules {
    pub const fn new(
        vertical: TurnRule,
        horizontal: TurnRule,
        straight_vertical: bool,
        straight_horizontal: bool,
    ) -> Self {
        Self { vertical, horizontal, straight_vertical, straight_horizontal }
    }

    /// Corner rule: left turn on both axes, never straight.
    pub const CORNER: TurnRules = TurnRules::new(TurnRule::Left, TurnRule::Left, false, false);

    /// Exits open to traffic arriving in `incoming`.
    pub fn allowed_exits(&self, incoming: Direction) -> DirectionSet {
        let (rule, straight) = match incoming.axis() {
            cg_core::Axis::Horizontal => (self.horizontal, self.straight_horizontal),
            cg_core::Axis::Vertical => (self.vertical, self.straight_vertical),
        };
        let mut exits = DirectionSet::EMPTY;
        if let Some(turn) = rule.apply(incoming) {
            exits.insert(turn);
        }
        if straight {
            exits.insert(incoming);
        }
        exits
    }
}

// ── SegmentKind ───────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// One-way road.
    Directional { direction: Direction },
    Intersection(TurnRules),
    /// Connector from a main road to a building lot; never routed.
    AccessRoad,
}

impl SegmentKind {
    /// Persisted direction code: `0..=3`, `-1` intersection, `-2` access road.
    pub const fn code(&self) -> i32 {
        match self {
            SegmentKind::Directional { direction } => direction.code(),
            SegmentKind::Intersection(_) => -1,
            SegmentKind::AccessRoad => -2,
        }
    }
}

// ── RoadSegment ───────────────────────────────────────────────────────────────

/// One rectangle of road, immutable once pushed into a network.
///
/// `width` is the extent along x and `length` the extent along y, regardless
/// of which way traffic flows.
#[derive(Clone, Debug, PartialEq)]
pub struct RoadSegment {
    pub id: SegmentId,
    pub name: String,
    pub center: Vec2,
    pub width: f32,
    pub length: f32,
    pub kind: SegmentKind,
}

impl RoadSegment {
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_center(self.center, self.width, self.length)
    }

    #[inline]
    pub fn direction(&self) -> Option<Direction> {
        match self.kind {
            SegmentKind::Directional { direction } => Some(direction),
            _ => None,
        }
    }

    #[inline]
    pub fn turn_rules(&self) -> Option<&TurnRules> {
        match &self.kind {
            SegmentKind::Intersection(rules) => Some(rules),
            _ => None,
        }
    }

    #[inline]
    pub fn is_intersection(&self) -> bool {
        matches!(self.kind, SegmentKind::Intersection(_))
    }

    #[inline]
    pub fn is_access_road(&self) -> bool {
        matches!(self.kind, SegmentKind::AccessRoad)
    }

    /// Directional roads and intersections, i.e. everything but access roads.
    #[inline]
    pub fn is_main_road(&self) -> bool {
        !self.is_access_road()
    }

    /// East/West one-way road.
    pub fn is_horizontal(&self) -> bool {
        self.direction().is_some_and(|d| d.axis() == cg_core::Axis::Horizontal)
    }

    /// North/South one-way road.
    pub fn is_vertical(&self) -> bool {
        self.direction().is_some_and(|d| d.axis() == cg_core::Axis::Vertical)
    }
}

// ── Crosswalk ─────────────────────────────────────────────────────────────────

/// Pedestrian crossing stripe.  Scene decoration, not a routing element.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Crosswalk {
    pub center: Vec2,
    pub width: f32,
    pub length: f32,
    /// The crossed road runs East/West, so the stripe is narrow in x.
    pub across_horizontal_road: bool,
}

impl Crosswalk {
    /// Stripe of depth `stripe` spanning a road of width `road_width`.
    pub fn across(center: Vec2, road_width: f32, stripe: f32, across_horizontal_road: bool) -> Self {
        let (width, length) =
            if across_horizontal_road { (stripe, road_width) } else { (road_width, stripe) };
        Crosswalk { center, width, length, across_horizontal_road }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_center(self.center, self.width, self.length)
    }
}
