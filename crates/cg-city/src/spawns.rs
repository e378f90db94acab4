//! NPC spawn points.
//!
//! Each request is scattered uniformly over the terrain.  A candidate's
//! bounds are its footprint grown by half its larger side; the candidate is
//! rejected when the bounds touch a road segment, a packed building, a tree
//! or a spawn already placed in this run.  Every request gets
//! `count × ATTEMPTS_PER_SPAWN` attempts.

use std::f32::consts::TAU;

use cg_core::{GenRng, Rect, Vec2};
use cg_grid::{PackReport, PlacementRequest};
use log::debug;
use rstar::primitives::Rectangle;
use rstar::{AABB, RTree};
use serde::{Deserialize, Serialize};

use crate::{CityLayout, ScatterReport};

const ATTEMPTS_PER_SPAWN: usize = 100;

/// Side of the square a tree trunk blocks.
const TREE_FOOTPRINT: f32 = 1.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub kind: String,
    pub position: Vec2,
    /// Facing, radians in `[0, 2π)`.
    pub heading: f32,
    /// Area reserved around the spawn, buffer included.
    pub bounds: Rect,
}

fn rectangle(r: Rect) -> Rectangle<[f32; 2]> {
    Rectangle::from_corners([r.x, r.y], [r.right(), r.bottom()])
}

/// Scatter spawn points for `requests` over `terrain`, keeping clear of
/// `obstacles` and of each other.
pub fn scatter_spawns(
    terrain: Rect,
    obstacles: impl IntoIterator<Item = Rect>,
    requests: &[PlacementRequest],
    rng: &mut GenRng,
) -> (Vec<SpawnPoint>, ScatterReport) {
    let mut blocked: RTree<Rectangle<[f32; 2]>> =
        RTree::bulk_load(obstacles.into_iter().map(rectangle).collect());
    let mut spawns = Vec::new();
    let mut report = ScatterReport::default();

    for req in requests {
        let fp = req.footprint;
        let buffer = fp.width.max(fp.length) * 0.5;
        let (bw, bl) = (fp.width + buffer, fp.length + buffer);
        let cap = req.count.saturating_mul(ATTEMPTS_PER_SPAWN);
        report.requested += req.count;

        let (mut placed, mut attempts) = (0, 0);
        while placed < req.count && attempts < cap {
            attempts += 1;
            let position = Vec2::new(
                rng.range_f32(terrain.x, terrain.right()),
                rng.range_f32(terrain.y, terrain.bottom()),
            );
            let bounds = Rect::from_center(position, bw, bl);
            let envelope = AABB::from_corners([bounds.x, bounds.y], [bounds.right(), bounds.bottom()]);
            if blocked.locate_in_envelope_intersecting(&envelope).next().is_some() {
                continue;
            }

            blocked.insert(rectangle(bounds));
            spawns.push(SpawnPoint {
                kind: req.kind.clone(),
                position,
                heading: rng.range_f32(0.0, TAU),
                bounds,
            });
            placed += 1;
        }
        if placed < req.count {
            debug!("{}: {placed}/{} spawns after {attempts} attempts", req.kind, req.count);
        }
        report.placed += placed;
        report.attempts += attempts;
    }
    (spawns, report)
}

impl CityLayout {
    /// World rectangles of the footprints in `packed`, a report returned by
    /// [`pack_buildings`](Self::pack_buildings) on this layout.
    pub fn building_footprints(&self, packed: &PackReport) -> Vec<Rect> {
        packed
            .placements
            .iter()
            .filter_map(|p| {
                let cs = self.lots.get(p.lot_index)?.grid()?.cell_size();
                Some(Rect::from_center(p.center, p.size_x as f32 * cs, p.size_z as f32 * cs))
            })
            .collect()
    }

    /// Spawn points clear of every road segment, every building in `packed`
    /// and every tree.
    pub fn scatter_spawns(
        &self,
        requests: &[PlacementRequest],
        packed: &PackReport,
        rng: &mut GenRng,
    ) -> (Vec<SpawnPoint>, ScatterReport) {
        let roads = self.network.segments().iter().map(|s| s.rect());
        let trees = self.trees.iter().map(|&t| Rect::from_center(t, TREE_FOOTPRINT, TREE_FOOTPRINT));
        let obstacles: Vec<Rect> = roads.chain(self.building_footprints(packed)).chain(trees).collect();
        scatter_spawns(self.network.terrain_rect(), obstacles, requests, rng)
    }
}
