//! Road-bounded cells.
//!
//! Every non-access segment contributes one centreline: a segment wider than
//! it is long contributes `center.y` as a horizontal line, anything else
//! contributes `center.x` as a vertical line.  Together with the terrain
//! bounds these cut the terrain into a grid; each grid rectangle is then
//! pulled in by half a road width on every side that faces a road, leaving
//! the buildable block between the roads.

use cg_core::Rect;
use cg_roads::RoadNetwork;
use log::debug;

/// Centrelines closer than this are the same line, and cells thinner than
/// this are dropped.
const CENTERLINE_EPSILON: f32 = 1e-3;

/// Buildable cells of `network`, row by row from the minimum y.
pub fn compute_cells(network: &RoadNetwork) -> Vec<Rect> {
    let (w, l) = (network.terrain_width, network.terrain_length);
    let mut xs = vec![0.0, w];
    let mut ys = vec![0.0, l];
    for seg in network.main_roads() {
        if seg.width > seg.length {
            ys.push(seg.center.y);
        } else {
            xs.push(seg.center.x);
        }
    }
    let xs = sorted_unique(xs);
    let ys = sorted_unique(ys);

    let inset = network.road_width / 2.0;
    let mut cells = Vec::with_capacity((xs.len() - 1) * (ys.len() - 1));
    for y in ys.windows(2) {
        for x in xs.windows(2) {
            let x0 = if x[0] > CENTERLINE_EPSILON { x[0] + inset } else { x[0] };
            let x1 = if x[1] < w - CENTERLINE_EPSILON { x[1] - inset } else { x[1] };
            let y0 = if y[0] > CENTERLINE_EPSILON { y[0] + inset } else { y[0] };
            let y1 = if y[1] < l - CENTERLINE_EPSILON { y[1] - inset } else { y[1] };
            let cell = Rect::new(x0, y0, x1 - x0, y1 - y0);
            // The half-road strips along the terrain edge cancel to zero up
            // to rounding.
            if cell.width >= CENTERLINE_EPSILON && cell.height >= CENTERLINE_EPSILON {
                cells.push(cell);
            }
        }
    }
    debug!("{} cells from {}×{} centrelines", cells.len(), xs.len(), ys.len());
    cells
}

fn sorted_unique(mut values: Vec<f32>) -> Vec<f32> {
    values.sort_by(f32::total_cmp);
    values.dedup_by(|a, b| (*a - *b).abs() < CENTERLINE_EPSILON);
    values
}
