//! Tree scatter over the open ground.
//!
//! Only positions are produced.  Roads and building lots are inflated by a
//! random margin into exclusion zones; samples inside a zone or too close to
//! the terrain edge are rejected.  An accepted sample grows into a small
//! cluster part of the time.
//!
//! # Margins
//!
//! | Zone source       | Margin                                                   |
//! |-------------------|----------------------------------------------------------|
//! | main road rect    | `lerp(3, 10, 0.6·d + 0.2) · U[0.5, 1.5)`                 |
//! | building lot      | `lerp(3, 10, (w + l) / 260) · U[0.7, 1.3)`               |
//! | any segment       | `lerp(2.1, 8, U) · U[0.5, 1.2)`                          |

use std::f32::consts::TAU;

use cg_core::{GenRng, Rect, Vec2, lerp};
use cg_lots::Lot;
use cg_roads::RoadNetwork;
use log::debug;
use rstar::primitives::Rectangle;
use rstar::{AABB, RTree};

use crate::ScatterReport;

const CLUSTER_PROBABILITY: f64 = 0.4;

const MIN_TREE_MARGIN: f32 = 3.0;
const MAX_TREE_MARGIN: f32 = 10.0;

/// Lot side at which a building lot gets the full margin.
const MAX_LOT_SIDE: f32 = 130.0;

/// Tree density for a building density `d`.
pub fn tree_density(density: f32) -> f32 {
    (0.9 - 0.3 * density).clamp(0.7, 0.9)
}

/// Nominal distance between trees for a building density `d`.
pub fn tree_spacing(density: f32) -> f32 {
    lerp(25.0, 8.0, tree_density(density))
}

pub(crate) fn main_road_margin(density: f32, rng: &mut GenRng) -> f32 {
    let factor = lerp(0.5, 1.5, rng.range_f32(0.0, 1.0));
    lerp(MIN_TREE_MARGIN, MAX_TREE_MARGIN, density * 0.6 + 0.2) * factor
}

pub(crate) fn building_margin(lot: Rect, rng: &mut GenRng) -> f32 {
    let size_ratio = ((lot.width + lot.height) / (MAX_LOT_SIDE * 2.0)).clamp(0.0, 1.0);
    let factor = lerp(0.7, 1.3, rng.range_f32(0.0, 1.0));
    lerp(MIN_TREE_MARGIN, MAX_TREE_MARGIN, size_ratio) * factor
}

pub(crate) fn segment_margin(rng: &mut GenRng) -> f32 {
    let factor = lerp(0.5, 1.2, rng.range_f32(0.0, 1.0));
    lerp(MIN_TREE_MARGIN * 0.7, MAX_TREE_MARGIN * 0.8, rng.range_f32(0.0, 1.0)) * factor
}

struct ExclusionZones {
    tree: RTree<Rectangle<[f32; 2]>>,
}

impl ExclusionZones {
    fn new(network: &RoadNetwork, lots: &[Lot], density: f32, rng: &mut GenRng) -> Self {
        let mut zones: Vec<Rect> = Vec::new();
        for road in network.main_road_rects() {
            zones.push(road.inflate(main_road_margin(density, rng)));
        }
        for lot in lots.iter().filter(|lot| lot.is_building()) {
            zones.push(lot.rect().inflate(building_margin(lot.rect(), rng)));
        }
        for seg in network.segments() {
            zones.push(seg.rect().inflate(segment_margin(rng)));
        }
        let zones = zones
            .into_iter()
            .map(|z| Rectangle::from_corners([z.x, z.y], [z.right(), z.bottom()]))
            .collect();
        ExclusionZones { tree: RTree::bulk_load(zones) }
    }

    fn contains(&self, p: Vec2) -> bool {
        self.tree
            .locate_in_envelope_intersecting(&AABB::from_point([p.x, p.y]))
            .next()
            .is_some()
    }
}

/// Scatter tree positions over `network`'s terrain, avoiding roads and
/// building lots.
pub fn scatter_trees(
    network: &RoadNetwork,
    lots: &[Lot],
    density: f32,
    rng: &mut GenRng,
) -> (Vec<Vec2>, ScatterReport) {
    let (w, l) = (network.terrain_width, network.terrain_length);
    let zones = ExclusionZones::new(network, lots, density, rng);

    let td = tree_density(density);
    let spacing = tree_spacing(density);
    let per_spacing = w * l / (spacing * spacing);
    let target = (per_spacing * td).round() as usize;
    let cap = (per_spacing * 1.5).round() as usize;

    let mut trees = Vec::with_capacity(target);
    let mut report = ScatterReport { requested: target, ..ScatterReport::default() };
    while trees.len() < target && report.attempts < cap {
        report.attempts += 1;
        let p = Vec2::new(rng.range_f32(0.0, w), rng.range_f32(0.0, l));
        let margin = rng.range_f32(4.0, 10.0);
        let open = |q: Vec2| {
            q.x > margin && q.x < w - margin && q.y > margin && q.y < l - margin && !zones.contains(q)
        };
        if !open(p) {
            continue;
        }
        if rng.gen_bool(CLUSTER_PROBABILITY) {
            let size = rng.range_inclusive(2, 4);
            for _ in 0..size {
                let radius = rng.range_f32(3.0, 8.0);
                let angle = rng.range_f32(0.0, TAU);
                let dist = rng.range_f32(0.0, radius);
                let q = p + Vec2::new(angle.cos(), angle.sin()) * dist;
                if trees.len() < target && open(q) {
                    trees.push(q);
                }
            }
        } else {
            trees.push(p);
        }
    }
    report.placed = trees.len();
    debug!(
        "tree scatter: {}/{} trees in {} attempts (spacing {spacing:.1})",
        report.placed, report.requested, report.attempts
    );
    (trees, report)
}
