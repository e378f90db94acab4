//! Mutable generation state threaded through the phases.

use cg_core::{GenRng, GenerationConfig, Rect, Vec2};
use cg_lots::Lot;
use cg_roads::{RoadLayout, RoadNetwork, RoadNetworkBuilder};
use log::info;

use crate::{CityCellAllocator, CityLayout, CityResult, ScatterReport, compute_cells, scatter_trees};

/// Child-stream offsets, one per stochastic phase.
const LOT_STREAM: u64 = 1;
const TREE_STREAM: u64 = 2;

/// Everything one generation run owns.
///
/// Built by [`CityGenerator::build`](crate::CityGenerator::build).  The
/// phases can be run one by one for inspection, or all at once with
/// [`generate`](Self::generate).
pub struct GenerationContext {
    pub config: GenerationConfig,
    pub network: RoadNetwork,
    pub cells: Vec<Rect>,
    pub lots: Vec<Lot>,
    pub trees: Vec<Vec2>,
    /// Suburban scatter outcome; `None` in city mode.
    pub lot_report: Option<ScatterReport>,
    pub tree_report: Option<ScatterReport>,
    rng: GenRng,
}

impl GenerationContext {
    pub(crate) fn new(config: GenerationConfig, rng: GenRng) -> Self {
        GenerationContext {
            config,
            network: RoadNetwork::default(),
            cells: Vec::new(),
            lots: Vec::new(),
            trees: Vec::new(),
            lot_report: None,
            tree_report: None,
            rng,
        }
    }

    pub fn rng(&mut self) -> &mut GenRng {
        &mut self.rng
    }

    // ── Phases ────────────────────────────────────────────────────────────

    pub fn build_roads(&mut self) -> CityResult<()> {
        let layout = RoadLayout::new(&self.config.terrain, &self.config.crosswalks);
        self.network = RoadNetworkBuilder::new(layout).build()?;
        Ok(())
    }

    pub fn compute_cells(&mut self) {
        self.cells = compute_cells(&self.network);
    }

    /// City or suburban lots, depending on the configured density.
    pub fn allocate_lots(&mut self) -> CityResult<()> {
        let allocator = CityCellAllocator::new(&self.config);
        let mut rng = self.rng.child(LOT_STREAM);
        if allocator.is_city_mode() {
            self.lots = allocator.allocate_city(&self.cells, &mut rng);
            self.lot_report = None;
        } else {
            let (lots, report) = allocator.allocate_suburban(&mut self.network, &self.cells, &mut rng)?;
            self.lots = lots;
            self.lot_report = Some(report);
        }
        Ok(())
    }

    pub fn scatter_trees(&mut self) {
        let mut rng = self.rng.child(TREE_STREAM);
        let (trees, report) = scatter_trees(&self.network, &self.lots, self.config.density, &mut rng);
        self.trees = trees;
        self.tree_report = Some(report);
    }

    /// Run every phase in order and hand back the finished layout.
    pub fn generate(mut self) -> CityResult<CityLayout> {
        self.build_roads()?;
        self.compute_cells();
        self.allocate_lots()?;
        if self.config.trees {
            self.scatter_trees();
        }
        info!(
            "generated {} segments, {} cells, {} lots, {} trees",
            self.network.len(),
            self.cells.len(),
            self.lots.len(),
            self.trees.len()
        );
        Ok(self.into_layout())
    }

    pub fn into_layout(self) -> CityLayout {
        CityLayout {
            config: self.config,
            network: self.network,
            cells: self.cells,
            lots: self.lots,
            trees: self.trees,
            lot_report: self.lot_report,
            tree_report: self.tree_report,
        }
    }
}
