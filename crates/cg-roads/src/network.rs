//! Ordered road-segment store.
//!
//! Segments are indexed by `SegmentId` (their position in insertion order)
//! and by their unique name.  Insertion order is meaningful: point queries
//! return the first matching segment, and persistence writes segments in
//! this order.

use rustc_hash::FxHashMap;

use cg_core::{Rect, SegmentId, Vec2};
use log::trace;

use crate::{Crosswalk, RoadError, RoadResult, RoadSegment, SegmentKind};

#[derive(Clone, Debug, Default)]
pub struct RoadNetwork {
    pub terrain_width: f32,
    pub terrain_length: f32,
    pub road_width: f32,
    segments: Vec<RoadSegment>,
    crosswalks: Vec<Crosswalk>,
    by_name: FxHashMap<String, SegmentId>,
}

impl RoadNetwork {
    pub fn new(terrain_width: f32, terrain_length: f32, road_width: f32) -> Self {
        RoadNetwork {
            terrain_width,
            terrain_length,
            road_width,
            ..RoadNetwork::default()
        }
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn terrain_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.terrain_width, self.terrain_length)
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    pub fn segments(&self) -> &[RoadSegment] {
        &self.segments
    }

    pub fn crosswalks(&self) -> &[Crosswalk] {
        &self.crosswalks
    }

    #[inline]
    pub fn segment(&self, id: SegmentId) -> Option<&RoadSegment> {
        self.segments.get(id.index())
    }

    pub fn by_name(&self, name: &str) -> Option<&RoadSegment> {
        self.by_name.get(name).and_then(|id| self.segment(*id))
    }

    /// Rectangles of every directional road and intersection.
    pub fn main_road_rects(&self) -> impl Iterator<Item = Rect> + '_ {
        self.segments.iter().filter(|s| s.is_main_road()).map(RoadSegment::rect)
    }

    pub fn main_roads(&self) -> impl Iterator<Item = &RoadSegment> + '_ {
        self.segments.iter().filter(|s| s.is_main_road())
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Append a segment and return its id.
    ///
    /// Degenerate rectangles (width or length ≤ 0) are skipped and yield
    /// `Ok(None)`.  A name already present is an error.
    pub fn push(
        &mut self,
        name: String,
        center: Vec2,
        width: f32,
        length: f32,
        kind: SegmentKind,
    ) -> RoadResult<Option<SegmentId>> {
        if !(width > 0.0 && length > 0.0) {
            trace!("skipping degenerate segment {name}: {width}×{length}");
            return Ok(None);
        }
        if self.by_name.contains_key(&name) {
            return Err(RoadError::DuplicateName(name));
        }
        let id = SegmentId::try_from(self.segments.len())
            .map_err(|_| cg_core::CgError::Config("segment count exceeds u32".into()))?;
        self.by_name.insert(name.clone(), id);
        self.segments.push(RoadSegment { id, name, center, width, length, kind });
        Ok(Some(id))
    }

    /// Add an access road covering `rect`, named `AccessRoad_{n}` where `n`
    /// is the segment count at insertion.
    pub fn push_access_road(&mut self, rect: Rect) -> RoadResult<Option<SegmentId>> {
        let name = format!("AccessRoad_{}", self.segments.len());
        self.push(name, rect.center(), rect.width, rect.height, SegmentKind::AccessRoad)
    }

    pub fn push_crosswalk(&mut self, crosswalk: Crosswalk) {
        self.crosswalks.push(crosswalk);
    }
}

impl PartialEq for RoadNetwork {
    /// Dimensions and segments, in order.  Crosswalks are not persisted and
    /// are ignored here.
    fn eq(&self, other: &Self) -> bool {
        self.terrain_width == other.terrain_width
            && self.terrain_length == other.terrain_length
            && self.road_width == other.road_width
            && self.segments == other.segments
    }
}
