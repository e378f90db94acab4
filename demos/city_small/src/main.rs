//! city_small: generate one layout end to end.
//!
//! Usage: `city_small [config.json]`.  Without an argument the default
//! 500×500 terrain with a 3×3 road grid is used.  Output lands in
//! `output/city_small/`: the road data as CSV, plus the scene, building lots
//! and NPC spawn points as JSON.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use log::info;

use cg_city::{CityGenerator, Estimates};
use cg_core::{Direction, GenRng, GenerationConfig};
use cg_grid::{Footprint, PlacementRequest};
use cg_roads::RoadDataAsset;

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:       u64  = 42;
const OUTPUT_DIR: &str = "output/city_small";

const HOUSE: Footprint = Footprint::new(12.0, 10.0);
const SHOP:  Footprint = Footprint::new(20.0, 16.0);
const NPC:   Footprint = Footprint::new(1.0, 1.0);

fn load_config() -> Result<GenerationConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let file = File::open(&path).with_context(|| format!("opening config {path}"))?;
            let config = serde_json::from_reader(file).with_context(|| format!("parsing config {path}"))?;
            Ok(config)
        }
        None => Ok(GenerationConfig { seed: SEED, ..GenerationConfig::default() }),
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    let config = load_config()?;
    let mode = if config.is_city_mode() { "city" } else { "suburban" };
    println!("=== city_small: citygen layout ===");
    println!(
        "Terrain: {}×{}  |  Roads: {}H × {}V  |  Density: {:.2} ({mode})  |  Seed: {}",
        config.terrain.usable_width,
        config.terrain.usable_length,
        config.terrain.horizontal_roads,
        config.terrain.vertical_roads,
        config.density,
        config.seed,
    );

    // 1. Estimates drive the packing request below.
    let mut rng = GenRng::new(config.seed).child(0xE5);
    let est = Estimates::for_config(&config, &mut rng);
    println!("Estimates: {} buildings, {} NPCs, {} vehicles", est.buildings, est.npcs, est.vehicles);
    println!();

    // 2. Generate.
    let t0 = Instant::now();
    let mut layout = CityGenerator::new(config).generate()?;
    let elapsed = t0.elapsed();

    let net = &layout.network;
    let intersections = net.segments().iter().filter(|s| s.is_intersection()).count();
    let access = net.segments().iter().filter(|s| s.is_access_road()).count();
    println!("Generated in {:.3} s", elapsed.as_secs_f64());
    println!("  segments      : {} ({intersections} intersections, {access} access roads)", net.len());
    println!("  crosswalks    : {}", net.crosswalks().len());
    println!("  cells         : {}", layout.cells.len());
    println!("  building lots : {}", layout.building_lots().count());
    println!("  park lots     : {}", layout.park_lots().count());
    println!("  trees         : {}", layout.trees.len());
    if let Some(r) = layout.lot_report {
        println!("  lot scatter   : {}/{} in {} attempts", r.placed, r.requested, r.attempts);
    }
    println!();

    // 3. Turn table for the first interior intersection.
    let graph = layout.graph();
    if let Some(x) = net.by_name("Intersection_H1_V1") {
        println!("{:<10} {:<20}", "Incoming", "Allowed exits");
        println!("{}", "-".repeat(30));
        for incoming in Direction::ALL {
            let exits: Vec<String> = graph
                .resolve_allowed_exits(x, incoming)
                .iter()
                .map(|d| d.to_string())
                .collect();
            println!("{:<10} {:<20}", incoming.to_string(), exits.join(", "));
        }
        println!();
    }

    // 4. Pack building footprints into the building lots.
    let houses = est.buildings * 2 / 3;
    let requests = [
        PlacementRequest { kind: "house".into(), footprint: HOUSE, count: houses },
        PlacementRequest { kind: "shop".into(), footprint: SHOP, count: est.buildings - houses },
    ];
    let packed = layout.pack_buildings(&requests, &mut rng);
    println!(
        "Packed {}/{} buildings in {} attempts",
        packed.placed, packed.requested, packed.attempts
    );

    // 5. NPC spawn points around the packed buildings.
    let npc_request = [PlacementRequest { kind: "npc".into(), footprint: NPC, count: est.npcs }];
    let (spawns, spawned) = layout.scatter_spawns(&npc_request, &packed, &mut rng);
    println!(
        "Spawned {}/{} NPCs in {} attempts",
        spawned.placed, spawned.requested, spawned.attempts
    );

    // 6. Save and reload the road data.
    let out = Path::new(OUTPUT_DIR);
    std::fs::create_dir_all(out)?;
    let asset = RoadDataAsset::from_network(&layout.network);
    asset.save_dir(out)?;
    let reloaded = RoadDataAsset::load_dir(out)?.to_network()?;
    anyhow::ensure!(reloaded == layout.network, "road data did not survive a save/load cycle");
    info!("road data round-trip verified ({} segments)", reloaded.len());

    // 7. Scene, lot and spawn dumps.
    let scene = layout.scene_records();
    serde_json::to_writer(BufWriter::new(File::create(out.join("scene.json"))?), &scene)?;
    let lots = layout.lot_records();
    serde_json::to_writer(BufWriter::new(File::create(out.join("lots.json"))?), &lots)?;
    serde_json::to_writer(BufWriter::new(File::create(out.join("spawns.json"))?), &spawns)?;

    println!();
    println!("Wrote {OUTPUT_DIR}/");
    println!("  road_segments.csv : {} rows", asset.segments.len());
    println!("  scene.json        : {} records", scene.len());
    println!("  lots.json         : {} building lots", lots.len());
    println!("  spawns.json       : {} spawn points", spawns.len());

    Ok(())
}
