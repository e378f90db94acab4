//! Flat road-data records for save/reload.
//!
//! # CSV format
//!
//! A saved road-data directory holds two files:
//!
//! ```csv
//! # terrain.csv
//! terrain_width,terrain_length,road_width
//! 520.0,520.0,10.0
//!
//! # road_segments.csv
//! name,position_x,position_y,position_z,scale_x,scale_y,scale_z,rotation,horizontal,vertical,direction,from_vertical,from_horizontal,can_go_straight_v,can_go_straight_h
//! Corner_BottomLeft,5.0,0.0,5.0,10.0,1.0,10.0,0.0,false,false,-1,1,1,false,false
//! PerimeterRoad_Top_Segment_0,70.0,0.0,515.0,120.0,1.0,10.0,0.0,true,false,1,-1,-1,true,true
//! ```
//!
//! Positions are in world units with `position_z` the ground `y` axis.
//! `scale_x`/`scale_z` hold the world extents (`width`/`length`); `scale_y`
//! and `position_y` are written as `1` and `0` and ignored on load.
//! `rotation` is degrees about the vertical axis: generated segments are
//! axis aligned and write `0`, and a quarter turn on load swaps the extents.
//!
//! `direction` is `0..=3` for one-way roads, `-1` for intersections and `-2`
//! for access roads.  The four turn fields are meaningful only for
//! intersections; other rows carry `-1, -1, true, true`.
//!
//! Floats are written in shortest round-trip form, so a save/load cycle
//! reproduces every value exactly.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use cg_core::{Direction, TurnRule, Vec2};

use crate::{RoadError, RoadNetwork, RoadResult, RoadSegment, SegmentKind, TurnRules};

pub const SEGMENTS_FILE: &str = "road_segments.csv";
pub const TERRAIN_FILE: &str = "terrain.csv";

// ── Records ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoadSegmentRecord {
    pub name: String,
    pub position_x: f32,
    pub position_y: f32,
    pub position_z: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub scale_z: f32,
    pub rotation: f32,
    pub horizontal: bool,
    pub vertical: bool,
    pub direction: i32,
    pub from_vertical: i32,
    pub from_horizontal: i32,
    pub can_go_straight_v: bool,
    pub can_go_straight_h: bool,
}

impl RoadSegmentRecord {
    pub fn from_segment(seg: &RoadSegment) -> Self {
        let rules = seg.turn_rules();
        RoadSegmentRecord {
            name: seg.name.clone(),
            position_x: seg.center.x,
            position_y: 0.0,
            position_z: seg.center.y,
            scale_x: seg.width,
            scale_y: 1.0,
            scale_z: seg.length,
            rotation: 0.0,
            horizontal: seg.is_horizontal(),
            vertical: seg.is_vertical(),
            direction: seg.kind.code(),
            from_vertical: rules.map_or(-1, |r| r.vertical.code()),
            from_horizontal: rules.map_or(-1, |r| r.horizontal.code()),
            can_go_straight_v: rules.is_none_or(|r| r.straight_vertical),
            can_go_straight_h: rules.is_none_or(|r| r.straight_horizontal),
        }
    }

    pub fn is_intersection(&self) -> bool {
        self.direction == -1
    }

    pub fn is_directional(&self) -> bool {
        (0..=3).contains(&self.direction)
    }

    /// Decode the segment kind from the direction code and turn fields.
    pub fn kind(&self) -> RoadResult<SegmentKind> {
        match self.direction {
            -1 => Ok(SegmentKind::Intersection(TurnRules::new(
                TurnRule::from_code(self.from_vertical),
                TurnRule::from_code(self.from_horizontal),
                self.can_go_straight_v,
                self.can_go_straight_h,
            ))),
            -2 => Ok(SegmentKind::AccessRoad),
            code => Direction::from_code(code)
                .map(|direction| SegmentKind::Directional { direction })
                .ok_or_else(|| RoadError::UnknownDirection { name: self.name.clone(), code }),
        }
    }

    /// World extents `(width, length)`, swapped for a quarter-turn rotation.
    pub fn extents(&self) -> (f32, f32) {
        let quarter = (self.rotation.rem_euclid(180.0) - 90.0).abs() < 1e-3;
        if quarter { (self.scale_z, self.scale_x) } else { (self.scale_x, self.scale_z) }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TerrainRecord {
    pub terrain_width: f32,
    pub terrain_length: f32,
    pub road_width: f32,
}

// ── RoadNetwork conversion ────────────────────────────────────────────────────

impl RoadNetwork {
    pub fn terrain_record(&self) -> TerrainRecord {
        TerrainRecord {
            terrain_width: self.terrain_width,
            terrain_length: self.terrain_length,
            road_width: self.road_width,
        }
    }

    /// One record per segment, in network order.
    pub fn to_records(&self) -> Vec<RoadSegmentRecord> {
        self.segments().iter().map(RoadSegmentRecord::from_segment).collect()
    }

    /// Rebuild a network from records.  Degenerate rows are skipped; unknown
    /// direction codes and repeated names are errors.
    pub fn from_records(terrain: &TerrainRecord, records: &[RoadSegmentRecord]) -> RoadResult<Self> {
        let mut net = RoadNetwork::new(terrain.terrain_width, terrain.terrain_length, terrain.road_width);
        for rec in records {
            let (width, length) = rec.extents();
            net.push(
                rec.name.clone(),
                Vec2::new(rec.position_x, rec.position_z),
                width,
                length,
                rec.kind()?,
            )?;
        }
        Ok(net)
    }
}

// ── CSV I/O ───────────────────────────────────────────────────────────────────

/// Write `records` with a header row to any `Write` sink.
pub fn write_records_csv<W: Write>(writer: W, records: &[RoadSegmentRecord]) -> RoadResult<()> {
    let mut w = csv::Writer::from_writer(writer);
    for rec in records {
        w.serialize(rec)?;
    }
    w.flush()?;
    Ok(())
}

/// Read records written by [`write_records_csv`].
pub fn read_records_csv<R: Read>(reader: R) -> RoadResult<Vec<RoadSegmentRecord>> {
    let mut r = csv::Reader::from_reader(reader);
    let records = r.deserialize::<RoadSegmentRecord>().collect::<Result<Vec<_>, _>>()?;
    Ok(records)
}

// ── RoadDataAsset ─────────────────────────────────────────────────────────────

/// Terrain metadata plus the segment records of one saved network.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoadDataAsset {
    pub terrain: TerrainRecord,
    pub segments: Vec<RoadSegmentRecord>,
}

impl RoadDataAsset {
    pub fn from_network(network: &RoadNetwork) -> Self {
        RoadDataAsset { terrain: network.terrain_record(), segments: network.to_records() }
    }

    pub fn to_network(&self) -> RoadResult<RoadNetwork> {
        RoadNetwork::from_records(&self.terrain, &self.segments)
    }

    pub fn directional(&self) -> impl Iterator<Item = &RoadSegmentRecord> {
        self.segments.iter().filter(|r| r.is_directional())
    }

    pub fn intersections(&self) -> impl Iterator<Item = &RoadSegmentRecord> {
        self.segments.iter().filter(|r| r.is_intersection())
    }

    /// Write `terrain.csv` and `road_segments.csv` into `dir`, which must exist.
    pub fn save_dir(&self, dir: &Path) -> RoadResult<()> {
        let mut terrain = csv::Writer::from_path(dir.join(TERRAIN_FILE))?;
        terrain.serialize(&self.terrain)?;
        terrain.flush()?;

        let file = File::create(dir.join(SEGMENTS_FILE))?;
        write_records_csv(file, &self.segments)
    }

    pub fn load_dir(dir: &Path) -> RoadResult<Self> {
        let mut reader = csv::Reader::from_path(dir.join(TERRAIN_FILE))?;
        let terrain = reader
            .deserialize::<TerrainRecord>()
            .next()
            .ok_or(RoadError::MissingTerrain)??;

        let file = File::open(dir.join(SEGMENTS_FILE))?;
        let segments = read_records_csv(file)?;
        Ok(RoadDataAsset { terrain, segments })
    }
}
