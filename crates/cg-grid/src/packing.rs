//! Building footprint packing across occupancy grids.
//!
//! Requests are turned into a [`PlacementPlan`] of jobs, and the
//! [`BuildingPacker`] rejection-samples cell positions for each job across
//! every building lot's grid.  The total number of attempts is capped, so a
//! crowded set of lots yields a partial result rather than a hang.

use cg_core::{GenRng, Vec2};
use log::debug;

use crate::OccupancyGrid;

/// Requests above this count trigger clustered, shuffled placement when
/// several kinds are mixed.
const CLUSTER_TRIGGER: usize = 7;
const CLUSTER_SIZE: usize = 3;

// ── Footprint ─────────────────────────────────────────────────────────────────

/// Building footprint in world units.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Footprint {
    pub width: f32,
    pub length: f32,
}

impl Footprint {
    pub const fn new(width: f32, length: f32) -> Self {
        Self { width, length }
    }

    /// Cells covered on a grid of `cell_size`, at least one per axis.
    pub fn cells(&self, cell_size: f32) -> (usize, usize) {
        let to_cells = |v: f32| ((v / cell_size).ceil().max(1.0)) as usize;
        (to_cells(self.width), to_cells(self.length))
    }
}

// ── Plan ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct PlacementRequest {
    /// Caller-defined label, e.g. a prefab name.
    pub kind: String,
    pub footprint: Footprint,
    pub count: usize,
}

/// One unit of work: `count` copies of the same footprint.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacementJob {
    pub kind: String,
    pub footprint: Footprint,
    pub count: usize,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlacementPlan {
    pub jobs: Vec<PlacementJob>,
}

impl PlacementPlan {
    /// Build a plan from `requests`.
    ///
    /// With more than one kind and any count above 7, each request is split
    /// into clusters of at most 3 and the clusters are shuffled, so large
    /// requests interleave instead of filling the lots one kind at a time.
    pub fn from_requests(requests: &[PlacementRequest], rng: &mut GenRng) -> Self {
        let clustered =
            requests.len() > 1 && requests.iter().any(|r| r.count > CLUSTER_TRIGGER);
        if !clustered {
            let jobs = requests
                .iter()
                .filter(|r| r.count > 0)
                .map(|r| PlacementJob { kind: r.kind.clone(), footprint: r.footprint, count: r.count })
                .collect();
            return PlacementPlan { jobs };
        }

        let mut jobs = Vec::new();
        for r in requests {
            let mut remaining = r.count;
            while remaining > 0 {
                let n = remaining.min(CLUSTER_SIZE);
                jobs.push(PlacementJob { kind: r.kind.clone(), footprint: r.footprint, count: n });
                remaining -= n;
            }
        }
        rng.shuffle(&mut jobs);
        PlacementPlan { jobs }
    }

    /// Total footprints the plan asks for.
    pub fn requested(&self) -> usize {
        self.jobs.iter().map(|j| j.count).sum()
    }
}

// ── Report ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Placement {
    pub kind: String,
    /// Index into the grid slice handed to [`BuildingPacker::pack`].
    pub lot_index: usize,
    pub cell_x: usize,
    pub cell_z: usize,
    pub size_x: usize,
    pub size_z: usize,
    /// World-space centre of the footprint.
    pub center: Vec2,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PackReport {
    pub requested: usize,
    pub placed: usize,
    pub attempts: usize,
    pub placements: Vec<Placement>,
}

impl PackReport {
    pub fn shortfall(&self) -> usize {
        self.requested - self.placed
    }
}

// ── BuildingPacker ────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct BuildingPacker {
    /// Attempts allowed per requested footprint.
    pub max_attempts_multiplier: usize,
}

impl Default for BuildingPacker {
    fn default() -> Self {
        Self { max_attempts_multiplier: 10 }
    }
}

impl BuildingPacker {
    pub fn new(max_attempts_multiplier: usize) -> Self {
        Self { max_attempts_multiplier }
    }

    /// Place every job of `plan` into `lots`, marking the chosen cells.
    pub fn pack(
        &self,
        lots: &mut [&mut OccupancyGrid],
        plan: &PlacementPlan,
        rng: &mut GenRng,
    ) -> PackReport {
        let requested = plan.requested();
        let cap = requested.saturating_mul(self.max_attempts_multiplier);
        let mut report = PackReport { requested, ..PackReport::default() };
        if lots.is_empty() {
            debug!("packing skipped: no building lots for {requested} footprints");
            return report;
        }

        'jobs: for job in &plan.jobs {
            for _ in 0..job.count {
                loop {
                    if report.attempts >= cap {
                        break 'jobs;
                    }
                    report.attempts += 1;

                    let lot_index = rng.index(lots.len());
                    let grid = &mut *lots[lot_index];
                    let (sx, sz) = job.footprint.cells(grid.cell_size());
                    if sx > grid.width() || sz > grid.length() {
                        continue;
                    }
                    let x = rng.index(grid.width() - sx + 1);
                    let z = rng.index(grid.length() - sz + 1);
                    if !grid.can_place(x, z, sx, sz) {
                        continue;
                    }
                    grid.mark_occupied(x, z, sx, sz);

                    let cs = grid.cell_size();
                    let origin = grid.origin();
                    let center = Vec2::new(
                        origin.x + (x as f32 + sx as f32 / 2.0) * cs,
                        origin.y + (z as f32 + sz as f32 / 2.0) * cs,
                    );
                    report.placements.push(Placement {
                        kind: job.kind.clone(),
                        lot_index,
                        cell_x: x,
                        cell_z: z,
                        size_x: sx,
                        size_z: sz,
                        center,
                    });
                    report.placed += 1;
                    break;
                }
            }
        }

        if report.placed < requested {
            debug!(
                "packing placed {}/{} footprints after {} attempts",
                report.placed, requested, report.attempts
            );
        }
        report
    }
}
