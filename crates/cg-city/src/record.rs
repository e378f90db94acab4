//! Building-lot persistence.
//!
//! A [`LotRecord`] carries the lot rectangle, its flattened occupancy grid,
//! the access road by segment name and the surrounded park by lot id, so a
//! lot can be restored against a reloaded road network.

use cg_core::{LotId, Rect};
use cg_grid::OccupancyGrid;
use cg_lots::Lot;
use cg_roads::RoadNetwork;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::{CityError, CityLayout, CityResult};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LotRecord {
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub length: f32,
    pub cell_size: f32,
    pub grid_width: usize,
    pub grid_length: usize,
    /// x-major, as produced by [`OccupancyGrid::flatten`].
    pub cells: Vec<bool>,
    pub access_road: Option<String>,
    pub park: Option<u32>,
}

impl LotRecord {
    /// `None` for park lots, which carry no grid.
    pub fn from_lot(name: String, lot: &Lot, network: &RoadNetwork) -> Option<Self> {
        let grid = lot.grid()?;
        let r = lot.rect();
        Some(LotRecord {
            name,
            x: r.x,
            y: r.y,
            width: r.width,
            length: r.height,
            cell_size: grid.cell_size(),
            grid_width: grid.width(),
            grid_length: grid.length(),
            cells: grid.flatten(),
            access_road: lot
                .access_road()
                .and_then(|id| network.segment(id))
                .map(|s| s.name.clone()),
            park: lot.park.map(|id| id.0),
        })
    }

    /// Rebuild the building lot.  An access road missing from `network` is
    /// dropped with a warning.
    pub fn to_lot(&self, network: &RoadNetwork) -> CityResult<Lot> {
        let rect = Rect::new(self.x, self.y, self.width, self.length);
        let valid_rect = [rect.x, rect.y, rect.width, rect.height].iter().all(|v| v.is_finite())
            && rect.width >= 0.0
            && rect.height >= 0.0;
        if !valid_rect {
            return Err(self.invalid(format!("bad rectangle {rect}")));
        }
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(self.invalid(format!("bad cell size {}", self.cell_size)));
        }

        let mut grid = OccupancyGrid::new(rect, self.cell_size);
        grid.restore(&self.cells, self.grid_width, self.grid_length)?;
        let mut lot = Lot::with_grid(rect, grid);
        lot.park = self.park.map(LotId);

        if let Some(name) = &self.access_road {
            match network.by_name(name) {
                Some(seg) => lot.attach_access_road(seg.id),
                None => warn!("lot {}: access road {name} not in network", self.name),
            }
        }
        Ok(lot)
    }

    fn invalid(&self, reason: String) -> CityError {
        CityError::LotRecord { name: self.name.clone(), reason }
    }
}

impl CityLayout {
    /// Building lots as records named `BuildingLot_{lot index}`.
    pub fn lot_records(&self) -> Vec<LotRecord> {
        self.lots
            .iter()
            .enumerate()
            .filter_map(|(i, lot)| LotRecord::from_lot(format!("BuildingLot_{i}"), lot, &self.network))
            .collect()
    }
}
