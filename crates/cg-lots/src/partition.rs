//! Residual-rectangle decomposition of a cell around a reserved rectangle.
//!
//! Around an excluded rectangle `e` inside `outer`, up to four residuals are
//! produced, in this order:
//!
//! ```text
//!   top    (outer.x, outer.y,  outer.width, e.y − outer.y)
//!   bottom (outer.x, e.bottom, outer.width, outer.bottom − e.bottom)
//!   left   (outer.x, e.y,      e.x − outer.x,        e.height)
//!   right  (e.right, e.y,      outer.right − e.right, e.height)
//! ```
//!
//! Left and right take their vertical span from `e`, not from `outer`.  When
//! `e` reaches past the top or bottom of `outer` they follow it, so the
//! residuals can leave or overshoot the corners of `outer`.  That behaviour is
//! kept as is; see `partition::known_corner_gap` in the tests.

use cg_core::{LotId, Rect};
use log::trace;

use crate::Lot;

/// The non-degenerate residuals of `outer` around `excluded`.
pub fn residual_rects(outer: Rect, excluded: Rect) -> Vec<Rect> {
    let candidates = [
        (excluded.y > outer.y)
            .then(|| Rect::new(outer.x, outer.y, outer.width, excluded.y - outer.y)),
        (excluded.bottom() < outer.bottom()).then(|| {
            Rect::new(outer.x, excluded.bottom(), outer.width, outer.bottom() - excluded.bottom())
        }),
        (excluded.x > outer.x)
            .then(|| Rect::new(outer.x, excluded.y, excluded.x - outer.x, excluded.height)),
        (excluded.right() < outer.right()).then(|| {
            Rect::new(excluded.right(), excluded.y, outer.right() - excluded.right(), excluded.height)
        }),
    ];
    candidates.into_iter().flatten().filter(Rect::has_area).collect()
}

#[derive(Clone, Debug)]
pub struct LotPartitioner {
    /// Occupancy-grid cell size given to every building lot produced.
    pub cell_size: f32,
}

impl Default for LotPartitioner {
    fn default() -> Self {
        Self { cell_size: cg_grid::DEFAULT_CELL_SIZE }
    }
}

impl LotPartitioner {
    pub fn new(cell_size: f32) -> Self {
        Self { cell_size }
    }

    /// Building lots covering `cell` minus `excluded`.
    ///
    /// A zero-area `excluded` yields one lot over the whole cell.  Otherwise
    /// each residual becomes a building lot tagged with `park`.
    pub fn partition(&self, cell: Rect, excluded: Rect, park: Option<LotId>) -> Vec<Lot> {
        if !cell.has_area() {
            trace!("partition skipped: degenerate cell {cell}");
            return Vec::new();
        }
        if !excluded.has_area() {
            return vec![Lot::building(cell, self.cell_size)];
        }
        residual_rects(cell, excluded)
            .into_iter()
            .map(|r| {
                let mut lot = Lot::building(r, self.cell_size);
                lot.park = park;
                lot
            })
            .collect()
    }

    /// Park lots covering `park_rect` minus a non-buildable `obstacle`.
    ///
    /// The obstacle is clipped to `park_rect` first; one that does not reach
    /// into the park leaves it whole.
    pub fn partition_around_obstacle(&self, park_rect: Rect, obstacle: Rect) -> Vec<Lot> {
        if !park_rect.has_area() {
            trace!("obstacle partition skipped: degenerate park {park_rect}");
            return Vec::new();
        }
        match park_rect.intersection(&obstacle) {
            Some(clipped) => residual_rects(park_rect, clipped).into_iter().map(Lot::park).collect(),
            None => vec![Lot::park(park_rect)],
        }
    }
}
