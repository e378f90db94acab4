//! Per-lot boolean occupancy grid.
//!
//! # Layout
//!
//! A lot of `w × l` world units is covered by `floor(w / cell) × floor(l /
//! cell)` square cells.  Cell `(0, 0)` sits at the lot's minimum corner; `x`
//! grows along the lot width and `z` along its length.  Cells are stored
//! x-major, so the flat index of `(x, z)` is `x * length + z`, the same order
//! `flatten()` emits.
//!
//! Any strip of the lot narrower than one cell along the max edges is not
//! represented and can never be reserved.

use cg_core::{Rect, Vec2};
use log::{trace, warn};

use crate::{GridError, GridResult};

/// Cell size used when a lot does not specify one.
pub const DEFAULT_CELL_SIZE: f32 = 2.0;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OccupancyGrid {
    /// World position of cell `(0, 0)`'s min corner.
    origin: Vec2,
    lot_width: f32,
    lot_length: f32,
    cell_size: f32,
    width: usize,
    length: usize,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    /// Build an empty grid over `lot`.
    ///
    /// # Panics
    ///
    /// When the lot has a negative or non-finite extent, or `cell_size` is
    /// not strictly positive.  These are caller bugs, not geometry edge cases.
    pub fn new(lot: Rect, cell_size: f32) -> Self {
        assert!(
            cell_size.is_finite() && cell_size > 0.0,
            "occupancy grid cell size must be positive, got {cell_size}"
        );
        assert!(
            lot.width.is_finite() && lot.height.is_finite() && lot.width >= 0.0 && lot.height >= 0.0,
            "occupancy grid over a negative lot {lot}"
        );
        let width = (lot.width / cell_size).floor() as usize;
        let length = (lot.height / cell_size).floor() as usize;
        OccupancyGrid {
            origin: lot.min(),
            lot_width: lot.width,
            lot_length: lot.height,
            cell_size,
            width,
            length,
            cells: vec![false; width * length],
        }
    }

    /// Grid with [`DEFAULT_CELL_SIZE`] cells.
    pub fn for_lot(lot: Rect) -> Self {
        Self::new(lot, DEFAULT_CELL_SIZE)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn length(&self) -> usize {
        self.length
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    #[inline]
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// The lot this grid was built over.
    pub fn lot_rect(&self) -> Rect {
        Rect::new(self.origin.x, self.origin.y, self.lot_width, self.lot_length)
    }

    #[inline]
    fn idx(&self, x: usize, z: usize) -> usize {
        x * self.length + z
    }

    /// `false` for out-of-bounds cells.
    pub fn is_occupied(&self, x: usize, z: usize) -> bool {
        x < self.width && z < self.length && self.cells[self.idx(x, z)]
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| **c).count()
    }

    // ── Reservation ───────────────────────────────────────────────────────

    /// `true` iff the `size_x × size_z` footprint at `(x, z)` lies fully
    /// inside the grid and every cell in it is free.
    pub fn can_place(&self, x: usize, z: usize, size_x: usize, size_z: usize) -> bool {
        let (Some(x_end), Some(z_end)) = (x.checked_add(size_x), z.checked_add(size_z)) else {
            return false;
        };
        if x_end > self.width || z_end > self.length {
            return false;
        }
        (x..x_end).all(|cx| (z..z_end).all(|cz| !self.cells[self.idx(cx, cz)]))
    }

    /// Mark the footprint occupied, silently clipping whatever falls outside.
    pub fn mark_occupied(&mut self, x: usize, z: usize, size_x: usize, size_z: usize) {
        let x_end = x.saturating_add(size_x).min(self.width);
        let z_end = z.saturating_add(size_z).min(self.length);
        for cx in x..x_end {
            for cz in z..z_end {
                let i = self.idx(cx, cz);
                self.cells[i] = true;
            }
        }
    }

    /// Free every cell, e.g. before the lot is regenerated.
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Unit vector from `road_center` toward the lot centre, suitable for
    /// [`mark_entrance_path`](Self::mark_entrance_path).
    pub fn entrance_direction(&self, road_center: Vec2) -> Vec2 {
        (self.lot_rect().center() - road_center).normalize_or_zero()
    }

    /// Reserve a straight corridor from the lot edge facing the access road.
    ///
    /// `direction` points from the access road toward the lot centre.  The
    /// corridor starts at `center − direction · max(w, l) / 2`, runs `depth`
    /// world units inward, and is `path_width` cells wide on both axes
    /// around each DDA sample.  `None` means the lot has no access road and
    /// leaves the grid untouched.
    pub fn mark_entrance_path(&mut self, direction: Option<Vec2>, path_width: usize, depth: f32) {
        let Some(direction) = direction else {
            warn!("entrance path requested for lot at {} without an access road", self.origin);
            return;
        };
        if self.width == 0 || self.length == 0 {
            trace!("entrance path skipped: empty grid at {}", self.origin);
            return;
        }
        let dir = direction.normalize_or_zero();
        let center = self.lot_rect().center();
        let start = center - dir * (self.lot_width.max(self.lot_length) / 2.0);
        let end = start + dir * depth;

        let (sx, sz) = self.world_to_cell_clamped(start);
        let (ex, ez) = self.world_to_cell_clamped(end);
        let dx = ex - sx;
        let dz = ez - sz;
        let steps = dx.abs().max(dz.abs());
        let half = (path_width / 2) as i64;

        if steps == 0 {
            self.paint_brush(sx, sz, half);
            return;
        }
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let px = (sx as f32 + dx as f32 * t).round_ties_even() as i64;
            let pz = (sz as f32 + dz as f32 * t).round_ties_even() as i64;
            self.paint_brush(px, pz, half);
        }
    }

    fn world_to_cell_clamped(&self, p: Vec2) -> (i64, i64) {
        let gx = ((p.x - self.origin.x) / self.cell_size).floor() as i64;
        let gz = ((p.y - self.origin.y) / self.cell_size).floor() as i64;
        (
            gx.clamp(0, self.width as i64 - 1),
            gz.clamp(0, self.length as i64 - 1),
        )
    }

    fn paint_brush(&mut self, cx: i64, cz: i64, half: i64) {
        for ox in -half..=half {
            for oz in -half..=half {
                let (x, z) = (cx + ox, cz + oz);
                if x >= 0 && z >= 0 && (x as usize) < self.width && (z as usize) < self.length {
                    let i = self.idx(x as usize, z as usize);
                    self.cells[i] = true;
                }
            }
        }
    }

    // ── Conversion ────────────────────────────────────────────────────────

    /// World-space centre of cell `(x, z)`.
    pub fn grid_to_world(&self, x: usize, z: usize) -> Vec2 {
        Vec2::new(
            self.origin.x + x as f32 * self.cell_size + self.cell_size / 2.0,
            self.origin.y + z as f32 * self.cell_size + self.cell_size / 2.0,
        )
    }

    // ── Persistence ───────────────────────────────────────────────────────

    /// Cells in x-major order.
    pub fn flatten(&self) -> Vec<bool> {
        self.cells.clone()
    }

    /// Replace the cells with `flat`, reshaped to `width × length`.
    ///
    /// A length mismatch is rejected and the grid keeps its prior state.
    pub fn restore(&mut self, flat: &[bool], width: usize, length: usize) -> GridResult<()> {
        let expected = width.checked_mul(length).unwrap_or(usize::MAX);
        if flat.len() != expected {
            return Err(GridError::RestoreLengthMismatch {
                width,
                length,
                expected,
                actual: flat.len(),
            });
        }
        self.width = width;
        self.length = length;
        self.cells = flat.to_vec();
        Ok(())
    }
}
