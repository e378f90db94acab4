//! The finished layout and its consumer-facing queries.

use cg_core::{GenRng, GenerationConfig, Rect, Vec2};
use cg_grid::{BuildingPacker, OccupancyGrid, PackReport, PlacementPlan, PlacementRequest};
use cg_lots::Lot;
use cg_roads::{IntersectionGraph, RoadNetwork};

use crate::ScatterReport;

#[derive(Clone, Debug, PartialEq)]
pub struct CityLayout {
    pub config: GenerationConfig,
    pub network: RoadNetwork,
    pub cells: Vec<Rect>,
    /// Indexed by `LotId`.
    pub lots: Vec<Lot>,
    pub trees: Vec<Vec2>,
    pub lot_report: Option<ScatterReport>,
    pub tree_report: Option<ScatterReport>,
}

impl CityLayout {
    pub fn building_lots(&self) -> impl Iterator<Item = &Lot> {
        self.lots.iter().filter(|l| l.is_building())
    }

    pub fn park_lots(&self) -> impl Iterator<Item = &Lot> {
        self.lots.iter().filter(|l| l.is_park())
    }

    /// Graph queries over the road network.
    pub fn graph(&self) -> IntersectionGraph<'_> {
        IntersectionGraph::new(&self.network)
    }

    /// Pack building footprints into the building lots' grids.
    ///
    /// Each placement's `lot_index` is an index into [`lots`](Self::lots).
    pub fn pack_buildings(&mut self, requests: &[PlacementRequest], rng: &mut GenRng) -> PackReport {
        let plan = PlacementPlan::from_requests(requests, rng);
        let (indices, mut grids): (Vec<usize>, Vec<&mut OccupancyGrid>) = self
            .lots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, lot)| lot.grid_mut().map(|g| (i, g)))
            .unzip();
        let mut report = BuildingPacker::default().pack(&mut grids, &plan, rng);
        for p in &mut report.placements {
            p.lot_index = indices[p.lot_index];
        }
        report
    }
}
