//! Generation parameters.
//!
//! All structs are plain data with a `Default` and a `validate()` that the
//! generator calls before any phase runs.  With the `serde` feature they can
//! be loaded from a JSON or TOML file by the host.

use crate::{CgError, CgResult, GenRng};

// ── TerrainConfig ─────────────────────────────────────────────────────────────

/// Terrain and road-grid dimensions.
///
/// `usable_width × usable_length` is the area inside the perimeter ring; the
/// full terrain adds one road width on every side.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TerrainConfig {
    pub usable_width: f32,
    pub usable_length: f32,
    pub road_width: f32,
    /// Interior roads running East/West.
    pub horizontal_roads: u32,
    /// Interior roads running North/South.
    pub vertical_roads: u32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            usable_width: 500.0,
            usable_length: 500.0,
            road_width: 10.0,
            horizontal_roads: 3,
            vertical_roads: 3,
        }
    }
}

impl TerrainConfig {
    #[inline]
    pub fn terrain_width(&self) -> f32 {
        self.usable_width + 2.0 * self.road_width
    }

    #[inline]
    pub fn terrain_length(&self) -> f32 {
        self.usable_length + 2.0 * self.road_width
    }

    pub fn validate(&self) -> CgResult<()> {
        for (name, v) in [
            ("usable_width", self.usable_width),
            ("usable_length", self.usable_length),
            ("road_width", self.road_width),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(CgError::Config(format!("{name} must be positive, got {v}")));
            }
        }
        Ok(())
    }
}

// ── CrosswalkConfig ───────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CrosswalkConfig {
    /// Four crosswalks around every interior intersection.
    pub at_intersections: bool,
    /// Evenly spaced crosswalks on long interior segments.
    pub mid_block: bool,
    /// A segment longer than this gets `floor(len / spacing)` mid-block crosswalks.
    pub spacing: f32,
    /// Stripe depth along the road.
    pub width: f32,
}

impl Default for CrosswalkConfig {
    fn default() -> Self {
        Self { at_intersections: true, mid_block: true, spacing: 80.0, width: 3.0 }
    }
}

impl CrosswalkConfig {
    pub fn validate(&self) -> CgResult<()> {
        if !self.spacing.is_finite() || self.spacing <= 0.0 {
            return Err(CgError::Config(format!(
                "crosswalk spacing must be positive, got {}",
                self.spacing
            )));
        }
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(CgError::Config(format!(
                "crosswalk width must be positive, got {}",
                self.width
            )));
        }
        Ok(())
    }
}

// ── GenerationConfig ──────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GenerationConfig {
    pub terrain: TerrainConfig,
    pub crosswalks: CrosswalkConfig,
    /// Building density in `[0, 1]`.
    pub density: f32,
    /// Densities at or above this switch from suburban to city mode.
    pub city_mode_threshold: f32,
    /// Number of building lots the suburban scatter aims for.
    pub suburban_lot_target: usize,
    /// Occupancy-grid cell size in world units.
    pub grid_cell_size: f32,
    /// Run the tree scatter phase.
    pub trees: bool,
    pub seed: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            terrain: TerrainConfig::default(),
            crosswalks: CrosswalkConfig::default(),
            density: 0.5,
            city_mode_threshold: 0.7,
            suburban_lot_target: 5,
            grid_cell_size: 2.0,
            trees: true,
            seed: 0,
        }
    }
}

impl GenerationConfig {
    #[inline]
    pub fn is_city_mode(&self) -> bool {
        self.density >= self.city_mode_threshold
    }

    pub fn validate(&self) -> CgResult<()> {
        self.terrain.validate()?;
        self.crosswalks.validate()?;
        if !(0.0..=1.0).contains(&self.density) {
            return Err(CgError::Config(format!(
                "density must lie in [0, 1], got {}",
                self.density
            )));
        }
        if !(0.0..1.0).contains(&self.city_mode_threshold) {
            return Err(CgError::Config(format!(
                "city_mode_threshold must lie in [0, 1), got {}",
                self.city_mode_threshold
            )));
        }
        if !self.grid_cell_size.is_finite() || self.grid_cell_size <= 0.0 {
            return Err(CgError::Config(format!(
                "grid_cell_size must be positive, got {}",
                self.grid_cell_size
            )));
        }
        Ok(())
    }

    /// A random but valid configuration: square-ish terrain of 250–1000
    /// units, density in `[0, 0.99)`, 3–6 roads per axis in city mode and
    /// 1–3 otherwise.
    pub fn randomized(rng: &mut GenRng) -> Self {
        let mut cfg = GenerationConfig::default();
        cfg.terrain.usable_width = rng.range_inclusive(250, 1000) as f32;
        cfg.terrain.usable_length = rng.range_inclusive(250, 1000) as f32;
        cfg.density = rng.range_f32(0.0, 0.99);
        let (lo, hi) = if cfg.is_city_mode() { (3, 6) } else { (1, 3) };
        cfg.terrain.horizontal_roads = rng.range_inclusive(lo, hi) as u32;
        cfg.terrain.vertical_roads = rng.range_inclusive(lo, hi) as u32;
        cfg.seed = rng.random();
        cfg
    }
}
