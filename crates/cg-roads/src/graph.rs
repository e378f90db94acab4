//! Turn-restricted road graph queries.
//!
//! The graph is implicit: a directional segment leads into whatever
//! intersection its end overlaps, and an intersection leads to the
//! adjacent segments its [`TurnRules`](crate::TurnRules) allow.  Nothing here
//! walks the graph; navigation consumers call these primitives and do their
//! own traversal.
//!
//! # Spatial index
//!
//! Segment rectangles are bulk-loaded into an `rstar` R-tree.  Rectangles
//! are closed, so a point on a shared edge matches both neighbours and the
//! one earlier in network order wins.

use rstar::{AABB, RTree, RTreeObject};

use cg_core::{Direction, DirectionSet, SegmentId, Vec2};

use crate::{RoadNetwork, RoadSegment};

/// Perpendicular slack when matching a segment to an intersection.
pub const DEFAULT_ALIGNMENT_TOLERANCE: f32 = 5.0;

/// Radius for [`IntersectionGraph::connected_segments`] when the caller has
/// no better value.
pub const DEFAULT_CONNECT_RADIUS: f32 = 10.0;

/// Radius used by [`IntersectionGraph::fallback_candidates`].
pub const FALLBACK_CONNECT_RADIUS: f32 = 65.0;

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone)]
struct SegmentEntry {
    min: [f32; 2],
    max: [f32; 2],
    id: SegmentId,
}

impl RTreeObject for SegmentEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.min, self.max)
    }
}

// ── IntersectionGraph ─────────────────────────────────────────────────────────

pub struct IntersectionGraph<'a> {
    network: &'a RoadNetwork,
    index: RTree<SegmentEntry>,
}

impl<'a> IntersectionGraph<'a> {
    pub fn new(network: &'a RoadNetwork) -> Self {
        let entries: Vec<SegmentEntry> = network
            .segments()
            .iter()
            .map(|s| {
                let r = s.rect();
                SegmentEntry { min: [r.x, r.y], max: [r.right(), r.bottom()], id: s.id }
            })
            .collect();
        IntersectionGraph { network, index: RTree::bulk_load(entries) }
    }

    pub fn network(&self) -> &'a RoadNetwork {
        self.network
    }

    // ── Point location ────────────────────────────────────────────────────

    fn segments_at(&self, pos: Vec2) -> impl Iterator<Item = &'a RoadSegment> + '_ {
        let network = self.network;
        self.index
            .locate_in_envelope_intersecting(&AABB::from_point([pos.x, pos.y]))
            .filter_map(move |e| network.segment(e.id))
    }

    /// Segment whose rectangle contains `pos`; the earliest in network order
    /// when several do.
    pub fn find_segment_at(&self, pos: Vec2) -> Option<&'a RoadSegment> {
        self.segments_at(pos).min_by_key(|s| s.id)
    }

    /// Like [`find_segment_at`](Self::find_segment_at), intersections only.
    pub fn find_intersection_at(&self, pos: Vec2) -> Option<&'a RoadSegment> {
        self.segments_at(pos).filter(|s| s.is_intersection()).min_by_key(|s| s.id)
    }

    // ── Turn resolution ───────────────────────────────────────────────────

    /// Directions open to traffic entering `segment` heading `incoming`.
    ///
    /// Empty when `segment` is not an intersection or its rule for that axis
    /// allows neither a turn nor straight travel.  Callers then fall back to
    /// an unrestricted choice among [`fallback_candidates`](Self::fallback_candidates).
    pub fn resolve_allowed_exits(&self, segment: &RoadSegment, incoming: Direction) -> DirectionSet {
        segment
            .turn_rules()
            .map_or(DirectionSet::EMPTY, |rules| rules.allowed_exits(incoming))
    }

    // ── Adjacency ─────────────────────────────────────────────────────────

    /// Closest directional segment flowing `direction` that lies on the
    /// `direction` side of `intersection`, within `tolerance` of its
    /// centreline.
    pub fn find_adjacent_segment(
        &self,
        intersection: &RoadSegment,
        direction: Direction,
        tolerance: f32,
    ) -> Option<&'a RoadSegment> {
        let origin = intersection.center;
        let mut best: Option<(&'a RoadSegment, f32)> = None;
        for seg in self.directional_segments().filter(|s| s.direction() == Some(direction)) {
            let p = seg.center;
            let placed = match direction {
                Direction::East => p.x > origin.x && (p.y - origin.y).abs() < tolerance,
                Direction::West => p.x < origin.x && (p.y - origin.y).abs() < tolerance,
                Direction::North => p.y > origin.y && (p.x - origin.x).abs() < tolerance,
                Direction::South => p.y < origin.y && (p.x - origin.x).abs() < tolerance,
            };
            if !placed {
                continue;
            }
            let d = origin.distance(p);
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((seg, d));
            }
        }
        best.map(|(s, _)| s)
    }

    /// Directional segments whose centre is within `radius` of `pos`, in
    /// network order.
    pub fn connected_segments(&self, pos: Vec2, radius: f32) -> Vec<&'a RoadSegment> {
        let query = AABB::from_corners([pos.x - radius, pos.y - radius], [pos.x + radius, pos.y + radius]);
        let network = self.network;
        let mut found: Vec<&'a RoadSegment> = self
            .index
            .locate_in_envelope_intersecting(&query)
            .filter_map(|e| network.segment(e.id))
            .filter(|s| s.direction().is_some() && s.center.distance(pos) <= radius)
            .collect();
        found.sort_by_key(|s| s.id);
        found
    }

    /// Segments reachable from `current` through `intersection` under its
    /// turn rules, excluding `current` itself.
    pub fn exits(&self, intersection: &RoadSegment, current: &RoadSegment) -> Vec<&'a RoadSegment> {
        let Some(incoming) = current.direction() else {
            return Vec::new();
        };
        self.resolve_allowed_exits(intersection, incoming)
            .iter()
            .filter_map(|d| self.find_adjacent_segment(intersection, d, DEFAULT_ALIGNMENT_TOLERANCE))
            .filter(|s| s.id != current.id)
            .collect()
    }

    /// Unrestricted candidates around `intersection` when [`exits`](Self::exits)
    /// comes back empty.
    pub fn fallback_candidates(&self, intersection: &RoadSegment, current: &RoadSegment) -> Vec<&'a RoadSegment> {
        self.connected_segments(intersection.center, FALLBACK_CONNECT_RADIUS)
            .into_iter()
            .filter(|s| s.id != current.id)
            .collect()
    }

    // ── Enumeration ───────────────────────────────────────────────────────

    pub fn directional_segments(&self) -> impl Iterator<Item = &'a RoadSegment> + 'a {
        self.network.segments().iter().filter(|s| s.direction().is_some())
    }

    pub fn intersections(&self) -> impl Iterator<Item = &'a RoadSegment> + 'a {
        self.network.segments().iter().filter(|s| s.is_intersection())
    }
}
