//! Population estimates for a configuration, before anything is generated.
//!
//! Counts come from the average plot (usable area divided by the road-grid
//! cells) and a per-plot range picked by plot-area bracket.  Very dense
//! layouts get a flat bonus per cell and per interior intersection.

use cg_core::{GenRng, GenerationConfig};

/// Layouts denser than this get the high-density bonus.
const DENSE_BONUS_THRESHOLD: f32 = 0.8;

#[derive(Copy, Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Estimates {
    pub buildings: usize,
    pub npcs: usize,
    pub vehicles: usize,
}

/// Per-plot `[low, high)` ranges by plot-area bracket.
fn per_plot_range(area: f32, ranges: [(i64, i64); 4]) -> (i64, i64) {
    if area < 2_000.0 {
        ranges[0]
    } else if area < 5_000.0 {
        ranges[1]
    } else if area < 10_000.0 {
        ranges[2]
    } else {
        ranges[3]
    }
}

fn pick(rng: &mut GenRng, (low, high): (i64, i64)) -> usize {
    rng.range_inclusive(low, high - 1).max(0) as usize
}

impl Estimates {
    pub fn for_config(config: &GenerationConfig, rng: &mut GenRng) -> Self {
        let t = &config.terrain;
        let (h, v) = (t.horizontal_roads as usize, t.vertical_roads as usize);
        let plots = (h + 1) * (v + 1);
        let plot_area = (t.usable_length / (h + 1) as f32) * (t.usable_width / (v + 1) as f32);

        let buildings_per_plot =
            pick(rng, per_plot_range(plot_area, [(10, 15), (12, 17), (15, 23), (23, 30)]));
        let npcs_per_plot = pick(rng, per_plot_range(plot_area, [(10, 15), (15, 20), (20, 25), (25, 30)]));
        let vehicles = pick(rng, (2 * (v + h) as i64, 4 * (v + h) as i64));

        let mut est = Estimates {
            buildings: plots * buildings_per_plot,
            npcs: plots * npcs_per_plot,
            vehicles,
        };
        if config.density > DENSE_BONUS_THRESHOLD {
            est.buildings += plots * 3;
            est.npcs += plots * 10;
            est.vehicles += h * v * 3;
        }
        est
    }
}
