//! Lot allocation over road-bounded cells.
//!
//! # City mode
//!
//! A shuffled share of the cells each get one park, sized and placed at
//! random inside the cell, with building lots filling the rest of the cell
//! around it.  Every other cell becomes one building lot.  Denser layouts
//! get fewer and smaller parks.
//!
//! # Suburban mode
//!
//! Every cell starts as one park.  Building lots are then scattered beside
//! randomly chosen main-road segments; each accepted lot gets an access road
//! back to its main road, has an entrance corridor reserved in its grid, and
//! is carved (together with its access road) out of the parks of its cell.

use cg_core::{GenRng, GenerationConfig, LotId, Rect, lerp};
use cg_lots::{Lot, LotPartitioner};
use cg_roads::{RoadNetwork, access_road_rect};
use log::{debug, info, trace};

use crate::CityResult;

/// Suburban scatter gives up after `target × ATTEMPTS_PER_LOT` attempts.
const ATTEMPTS_PER_LOT: usize = 10;

/// Entrance corridor reserved in every suburban building lot.
const ENTRANCE_PATH_WIDTH: usize = 4;
const ENTRANCE_PATH_DEPTH: f32 = 4.0;

// ── ScatterReport ─────────────────────────────────────────────────────────────

/// Outcome of a bounded rejection-sampling phase.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScatterReport {
    pub requested: usize,
    pub placed: usize,
    pub attempts: usize,
}

impl ScatterReport {
    #[inline]
    pub fn shortfall(&self) -> usize {
        self.requested.saturating_sub(self.placed)
    }
}

// ── CityCellAllocator ─────────────────────────────────────────────────────────

pub struct CityCellAllocator {
    density: f32,
    city_mode_threshold: f32,
    suburban_lot_target: usize,
    partitioner: LotPartitioner,
}

impl CityCellAllocator {
    pub fn new(config: &GenerationConfig) -> Self {
        CityCellAllocator {
            density: config.density,
            city_mode_threshold: config.city_mode_threshold,
            suburban_lot_target: config.suburban_lot_target,
            partitioner: LotPartitioner::new(config.grid_cell_size),
        }
    }

    #[inline]
    pub fn is_city_mode(&self) -> bool {
        self.density >= self.city_mode_threshold
    }

    /// How far `density` sits between the city-mode threshold and 1.
    fn city_t(&self) -> f32 {
        ((self.density - self.city_mode_threshold) / (1.0 - self.city_mode_threshold)).clamp(0.0, 1.0)
    }

    /// Number of cells that receive a park in city mode.
    pub fn park_cell_count(&self, cells: usize) -> usize {
        let share = lerp(0.6, 0.35, self.city_t());
        ((cells as f32 * share).ceil() as usize).min(cells)
    }

    // ── City mode ─────────────────────────────────────────────────────────

    /// Park lots and the building lots around them, cell by cell.
    ///
    /// A park lot is pushed immediately before the building lots of its cell,
    /// which carry its `LotId`.
    pub fn allocate_city(&self, cells: &[Rect], rng: &mut GenRng) -> Vec<Lot> {
        let mut order: Vec<usize> = (0..cells.len()).collect();
        rng.shuffle(&mut order);
        let mut has_park = vec![false; cells.len()];
        for &i in order.iter().take(self.park_cell_count(cells.len())) {
            has_park[i] = true;
        }

        let t = self.city_t();
        let (f_lo, f_hi) = (lerp(0.4, 0.1, t), lerp(0.5, 0.3, t));
        let mut lots = Vec::new();
        let mut parks = 0usize;
        for (&cell, park) in cells.iter().zip(has_park) {
            if !park {
                lots.extend(self.partitioner.partition(cell, Rect::ZERO, None));
                continue;
            }
            let scale = rng.range_f32(f_lo, f_hi).sqrt();
            let (pw, ph) = (cell.width * scale, cell.height * scale);
            let px = cell.x + (cell.width - pw) * rng.range_f32(0.1, 0.9);
            let py = cell.y + (cell.height - ph) * rng.range_f32(0.1, 0.9);
            let park_rect = Rect::new(px, py, pw, ph);

            let park_id = LotId(lots.len() as u32);
            lots.push(Lot::park(park_rect));
            lots.extend(self.partitioner.partition(cell, park_rect, Some(park_id)));
            parks += 1;
        }
        info!("city mode: {} lots over {} cells, {parks} parks (t = {t:.2})", lots.len(), cells.len());
        lots
    }

    // ── Suburban mode ─────────────────────────────────────────────────────

    /// Scatter building lots beside main roads and carve them out of the
    /// per-cell parks.  Access roads are pushed into `network`.
    ///
    /// The returned lots are every remaining park piece, cell by cell,
    /// followed by the building lots in placement order.
    pub fn allocate_suburban(
        &self,
        network: &mut RoadNetwork,
        cells: &[Rect],
        rng: &mut GenRng,
    ) -> CityResult<(Vec<Lot>, ScatterReport)> {
        let mut parks: Vec<Vec<Lot>> = cells.iter().map(|&c| vec![Lot::park(c)]).collect();
        let mut buildings: Vec<Lot> = Vec::new();
        let mut report = ScatterReport { requested: self.suburban_lot_target, ..ScatterReport::default() };

        let main_roads: Vec<Rect> = network.main_road_rects().collect();
        if main_roads.is_empty() || cells.is_empty() {
            debug!("suburban scatter skipped: {} roads, {} cells", main_roads.len(), cells.len());
            return Ok((parks.into_iter().flatten().collect(), report));
        }

        let terrain = network.terrain_rect();
        let r = network.road_width;
        let (size_lo, size_hi) = (lerp(60.0, 45.0, self.density), lerp(130.0, 104.0, self.density));
        let cap = self.suburban_lot_target * ATTEMPTS_PER_LOT;
        let mut occupied = main_roads.clone();

        while report.placed < report.requested && report.attempts < cap {
            report.attempts += 1;
            let w = rng.range_f32(size_lo, size_hi);
            let h = rng.range_f32(size_lo, size_hi);
            let road = main_roads[rng.index(main_roads.len())];
            let lot_rect = beside_road(road, w, h, r, terrain, rng);

            if !within(terrain, lot_rect) || occupied.iter().any(|o| o.overlaps(&lot_rect)) {
                continue;
            }
            let Some(cell_index) = cells.iter().position(|c| c.contains_inclusive(lot_rect.center())) else {
                trace!("lot {lot_rect} has no containing cell");
                continue;
            };
            let Some(access_rect) = access_road_rect(r, lot_rect, road) else {
                continue;
            };
            if occupied.iter().any(|o| o.overlaps(&access_rect)) {
                continue;
            }
            let Some(access_id) = network.push_access_road(access_rect)? else {
                continue;
            };

            let mut lot = Lot::building(lot_rect, self.partitioner.cell_size);
            lot.attach_access_road(access_id);
            if let Some(grid) = lot.grid_mut() {
                let dir = grid.entrance_direction(access_rect.center());
                grid.mark_entrance_path(Some(dir), ENTRANCE_PATH_WIDTH, ENTRANCE_PATH_DEPTH);
            }

            let cell_parks = &mut parks[cell_index];
            *cell_parks = self.carve(std::mem::take(cell_parks), lot_rect);
            *cell_parks = self.carve(std::mem::take(cell_parks), access_rect);

            occupied.push(lot_rect);
            occupied.push(access_rect);
            buildings.push(lot);
            report.placed += 1;
        }

        if report.shortfall() > 0 {
            debug!(
                "suburban scatter placed {}/{} lots in {} attempts",
                report.placed, report.requested, report.attempts
            );
        }
        let mut lots: Vec<Lot> = parks.into_iter().flatten().collect();
        info!("suburban mode: {} parks, {} building lots", lots.len(), buildings.len());
        lots.extend(buildings);
        Ok((lots, report))
    }

    /// Split every park piece that `obstacle` reaches into.
    fn carve(&self, pieces: Vec<Lot>, obstacle: Rect) -> Vec<Lot> {
        pieces
            .into_iter()
            .flat_map(|p| {
                if p.rect().overlaps(&obstacle) {
                    self.partitioner.partition_around_obstacle(p.rect(), obstacle)
                } else {
                    vec![p]
                }
            })
            .collect()
    }
}

/// A `w × h` candidate lot on a random side of `road`, offset from it by
/// `[r/2, 4r)`, positioned at random along the terrain.
fn beside_road(road: Rect, w: f32, h: f32, r: f32, terrain: Rect, rng: &mut GenRng) -> Rect {
    let offset = rng.range_f32(r / 2.0, 4.0 * r);
    if road.width > road.height {
        let x = rng.range_f32(2.0 * r, terrain.width - w - 2.0 * r);
        let y = if rng.gen_bool(0.5) { road.bottom() + offset } else { road.y - offset - h };
        Rect::new(x, y, w, h)
    } else {
        let y = rng.range_f32(2.0 * r, terrain.height - h - 2.0 * r);
        let x = if rng.gen_bool(0.5) { road.right() + offset } else { road.x - offset - w };
        Rect::new(x, y, w, h)
    }
}

fn within(outer: Rect, inner: Rect) -> bool {
    inner.x >= outer.x && inner.y >= outer.y && inner.right() <= outer.right() && inner.bottom() <= outer.bottom()
}
