//! Road network generation.
//!
//! # Phases
//!
//! `build()` runs, in order:
//!
//! 1. corners: four `r × r` intersections, left turn only;
//! 2. perimeter: top, bottom, left and right sides of the ring, each cut
//!    by intersections where the interior roads meet it;
//! 3. interior horizontal roads, East/West alternating;
//! 4. interior vertical roads, North/South alternating;
//! 5. interior intersections, row-major, with cycling turn rules.
//!
//! Interior roads sit at `r + i · spacing` along each axis, with
//! `spacing = usable / (count + 1)`.  Any segment whose extent comes out
//! non-positive is skipped and the phase carries on.

use cg_core::{CrosswalkConfig, Direction, TerrainConfig, TurnRule, Vec2};
use log::{debug, info};

use crate::{Crosswalk, RoadNetwork, RoadResult, SegmentKind, TurnRules};

/// Intersection crosswalks sit this many road widths from the centre.
const INTERSECTION_CROSSWALK_OFFSET: f32 = 0.75;

// ── RoadLayout ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct RoadLayout {
    pub usable_width: f32,
    pub usable_length: f32,
    pub road_width: f32,
    pub horizontal_roads: u32,
    pub vertical_roads: u32,
    pub crosswalks: CrosswalkConfig,
}

impl RoadLayout {
    pub fn new(terrain: &TerrainConfig, crosswalks: &CrosswalkConfig) -> Self {
        RoadLayout {
            usable_width: terrain.usable_width,
            usable_length: terrain.usable_length,
            road_width: terrain.road_width,
            horizontal_roads: terrain.horizontal_roads,
            vertical_roads: terrain.vertical_roads,
            crosswalks: crosswalks.clone(),
        }
    }

    #[inline]
    pub fn terrain_width(&self) -> f32 {
        self.usable_width + 2.0 * self.road_width
    }

    #[inline]
    pub fn terrain_length(&self) -> f32 {
        self.usable_length + 2.0 * self.road_width
    }

    /// Distance between interior horizontal roads.
    #[inline]
    pub fn horizontal_spacing(&self) -> f32 {
        self.usable_length / (self.horizontal_roads + 1) as f32
    }

    /// Distance between interior vertical roads.
    #[inline]
    pub fn vertical_spacing(&self) -> f32 {
        self.usable_width / (self.vertical_roads + 1) as f32
    }

    /// Centreline x of interior vertical road `i` (1-based).
    #[inline]
    pub fn vertical_road_x(&self, i: u32) -> f32 {
        self.road_width + i as f32 * self.vertical_spacing()
    }

    /// Centreline y of interior horizontal road `i` (1-based).
    #[inline]
    pub fn horizontal_road_y(&self, i: u32) -> f32 {
        self.road_width + i as f32 * self.horizontal_spacing()
    }

    /// Extent `[start, end)` of block `j` of `n + 1` between crossings spaced
    /// `spacing` apart, on an axis of total length `total`.
    fn block_span(&self, j: u32, n: u32, spacing: f32, total: f32) -> (f32, f32) {
        let r = self.road_width;
        let start = if j == 0 { r } else { r + j as f32 * spacing + r / 2.0 };
        let end = if j == n { total - r } else { r + (j + 1) as f32 * spacing - r / 2.0 };
        (start, end)
    }
}

impl From<&TerrainConfig> for RoadLayout {
    fn from(terrain: &TerrainConfig) -> Self {
        RoadLayout::new(terrain, &CrosswalkConfig::default())
    }
}

// ── Perimeter sides ───────────────────────────────────────────────────────────

#[derive(Copy, Clone)]
enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    fn label(self) -> &'static str {
        match self {
            Side::Top => "Top",
            Side::Bottom => "Bottom",
            Side::Left => "Left",
            Side::Right => "Right",
        }
    }

    /// Traffic flow, counter-clockwise around the ring.
    fn direction(self) -> Direction {
        match self {
            Side::Top => Direction::West,
            Side::Bottom => Direction::East,
            Side::Left => Direction::South,
            Side::Right => Direction::North,
        }
    }

    /// Rule of the first intersection along the side; the toggled axis
    /// alternates between `Left` and `NoTurn` from there.
    fn first_toggle(self) -> TurnRule {
        match self {
            Side::Top | Side::Right => TurnRule::NoTurn,
            Side::Bottom | Side::Left => TurnRule::Left,
        }
    }

    fn rules(self, toggle: TurnRule) -> TurnRules {
        match self {
            Side::Top | Side::Bottom => TurnRules::new(TurnRule::Left, toggle, false, true),
            Side::Left | Side::Right => TurnRules::new(toggle, TurnRule::Left, true, false),
        }
    }

    fn runs_along_x(self) -> bool {
        matches!(self, Side::Top | Side::Bottom)
    }
}

fn toggle_perimeter(rule: TurnRule) -> TurnRule {
    match rule {
        TurnRule::Left => TurnRule::NoTurn,
        _ => TurnRule::Left,
    }
}

// ── RoadNetworkBuilder ────────────────────────────────────────────────────────

/// Lay out a complete [`RoadNetwork`] from a [`RoadLayout`].
///
/// ```
/// use cg_core::TerrainConfig;
/// use cg_roads::{RoadLayout, RoadNetworkBuilder};
///
/// let layout = RoadLayout::from(&TerrainConfig::default());
/// let net = RoadNetworkBuilder::new(layout).build().unwrap();
/// assert!(net.by_name("Intersection_H1_V1").is_some());
/// ```
pub struct RoadNetworkBuilder {
    layout: RoadLayout,
    network: RoadNetwork,
}

impl RoadNetworkBuilder {
    pub fn new(layout: RoadLayout) -> Self {
        let network =
            RoadNetwork::new(layout.terrain_width(), layout.terrain_length(), layout.road_width);
        Self { layout, network }
    }

    pub fn build(mut self) -> RoadResult<RoadNetwork> {
        self.corners()?;
        for side in [Side::Top, Side::Bottom, Side::Left, Side::Right] {
            self.perimeter_side(side)?;
        }
        self.horizontal_roads()?;
        self.vertical_roads()?;
        self.interior_intersections()?;

        let intersections = self.network.segments().iter().filter(|s| s.is_intersection()).count();
        info!(
            "road network built: {} segments ({} intersections), {} crosswalks on {}×{}",
            self.network.len(),
            intersections,
            self.network.crosswalks().len(),
            self.network.terrain_width,
            self.network.terrain_length,
        );
        Ok(self.network)
    }

    fn corners(&mut self) -> RoadResult<()> {
        let r = self.layout.road_width;
        let (w, l) = (self.layout.terrain_width(), self.layout.terrain_length());
        let corners = [
            ("Corner_BottomLeft", Vec2::new(r / 2.0, r / 2.0)),
            ("Corner_BottomRight", Vec2::new(w - r / 2.0, r / 2.0)),
            ("Corner_TopRight", Vec2::new(w - r / 2.0, l - r / 2.0)),
            ("Corner_TopLeft", Vec2::new(r / 2.0, l - r / 2.0)),
        ];
        for (name, center) in corners {
            self.network.push(name.to_string(), center, r, r, SegmentKind::Intersection(TurnRules::CORNER))?;
        }
        debug!("corner phase: 4 intersections");
        Ok(())
    }

    fn perimeter_side(&mut self, side: Side) -> RoadResult<()> {
        let r = self.layout.road_width;
        let (w, l) = (self.layout.terrain_width(), self.layout.terrain_length());
        let (n, spacing, total) = if side.runs_along_x() {
            (self.layout.vertical_roads, self.layout.vertical_spacing(), w)
        } else {
            (self.layout.horizontal_roads, self.layout.horizontal_spacing(), l)
        };
        let fixed = match side {
            Side::Top => l - r / 2.0,
            Side::Bottom | Side::Left => r / 2.0,
            Side::Right => w - r / 2.0,
        };
        let at = |along: f32| {
            if side.runs_along_x() { Vec2::new(along, fixed) } else { Vec2::new(fixed, along) }
        };
        let extents = |span: f32| if side.runs_along_x() { (span, r) } else { (r, span) };

        let mut toggle = side.first_toggle();
        for j in 0..=n {
            let (start, end) = self.layout.block_span(j, n, spacing, total);
            let (sw, sl) = extents(end - start);
            let pushed = self.network.push(
                format!("PerimeterRoad_{}_Segment_{j}", side.label()),
                at(start + (end - start) / 2.0),
                sw,
                sl,
                SegmentKind::Directional { direction: side.direction() },
            )?;
            // A skipped block takes the intersection closing it along, and
            // the toggle does not advance.
            if pushed.is_none() {
                continue;
            }

            if j < n {
                let along = r + (j + 1) as f32 * spacing;
                self.network.push(
                    format!("PerimeterIntersection_{}_{}", side.label(), j + 1),
                    at(along),
                    r,
                    r,
                    SegmentKind::Intersection(side.rules(toggle)),
                )?;
                toggle = toggle_perimeter(toggle);
            }
        }
        debug!("perimeter phase ({}): {} blocks", side.label(), n + 1);
        Ok(())
    }

    fn horizontal_roads(&mut self) -> RoadResult<()> {
        let r = self.layout.road_width;
        let (h, v) = (self.layout.horizontal_roads, self.layout.vertical_roads);
        let spacing = self.layout.vertical_spacing();
        let total = self.layout.terrain_width();
        for i in 1..=h {
            let y = self.layout.horizontal_road_y(i);
            let direction = if i % 2 == 1 { Direction::East } else { Direction::West };
            for j in 0..=v {
                let (start, end) = self.layout.block_span(j, v, spacing, total);
                let len = end - start;
                let center = Vec2::new(start + len / 2.0, y);
                let pushed = self.network.push(
                    format!("MainRoad_H_{i}_Segment_{j}"),
                    center,
                    len,
                    r,
                    SegmentKind::Directional { direction },
                )?;
                if pushed.is_some() {
                    self.mid_block_crosswalks(center, len, true);
                }
            }
        }
        debug!("horizontal phase: {h} roads");
        Ok(())
    }

    fn vertical_roads(&mut self) -> RoadResult<()> {
        let r = self.layout.road_width;
        let (h, v) = (self.layout.horizontal_roads, self.layout.vertical_roads);
        let spacing = self.layout.horizontal_spacing();
        let total = self.layout.terrain_length();
        for i in 1..=v {
            let x = self.layout.vertical_road_x(i);
            let direction = if i % 2 == 1 { Direction::North } else { Direction::South };
            for j in 0..=h {
                let (start, end) = self.layout.block_span(j, h, spacing, total);
                let len = end - start;
                let center = Vec2::new(x, start + len / 2.0);
                let pushed = self.network.push(
                    format!("MainRoad_V_{i}_Segment_{j}"),
                    center,
                    r,
                    len,
                    SegmentKind::Directional { direction },
                )?;
                if pushed.is_some() {
                    self.mid_block_crosswalks(center, len, false);
                }
            }
        }
        debug!("vertical phase: {v} roads");
        Ok(())
    }

    fn interior_intersections(&mut self) -> RoadResult<()> {
        let r = self.layout.road_width;
        let (h, v) = (self.layout.horizontal_roads, self.layout.vertical_roads);
        // Both rules flip after every intersection, across row boundaries too.
        let mut k = 0u32;
        for hi in 1..=h {
            let y = self.layout.horizontal_road_y(hi);
            for vi in 1..=v {
                let center = Vec2::new(self.layout.vertical_road_x(vi), y);
                let (vertical, horizontal) = if k % 2 == 0 {
                    (TurnRule::Right, TurnRule::Left)
                } else {
                    (TurnRule::Left, TurnRule::Right)
                };
                k += 1;
                self.network.push(
                    format!("Intersection_H{hi}_V{vi}"),
                    center,
                    r,
                    r,
                    SegmentKind::Intersection(TurnRules::new(vertical, horizontal, true, true)),
                )?;
                if self.layout.crosswalks.at_intersections {
                    self.intersection_crosswalks(center);
                }
            }
        }
        debug!("intersection phase: {k} interior intersections");
        Ok(())
    }

    fn intersection_crosswalks(&mut self, center: Vec2) {
        let r = self.layout.road_width;
        let stripe = self.layout.crosswalks.width;
        let d = r * INTERSECTION_CROSSWALK_OFFSET;
        let sites = [
            (Vec2::new(0.0, d), false),
            (Vec2::new(0.0, -d), false),
            (Vec2::new(d, 0.0), true),
            (Vec2::new(-d, 0.0), true),
        ];
        for (offset, across_horizontal) in sites {
            self.network.push_crosswalk(Crosswalk::across(center + offset, r, stripe, across_horizontal));
        }
    }

    fn mid_block_crosswalks(&mut self, center: Vec2, len: f32, horizontal_road: bool) {
        let cfg = &self.layout.crosswalks;
        if !cfg.mid_block || len <= cfg.spacing {
            return;
        }
        let r = self.layout.road_width;
        let stripe = cfg.width;
        let n = (len / cfg.spacing).floor() as u32;
        let step = len / (n + 1) as f32;
        for k in 1..=n {
            let offset = -len / 2.0 + step * k as f32;
            let at = if horizontal_road {
                center + Vec2::new(offset, 0.0)
            } else {
                center + Vec2::new(0.0, offset)
            };
            self.network.push_crosswalk(Crosswalk::across(at, r, stripe, horizontal_road));
        }
    }
}
