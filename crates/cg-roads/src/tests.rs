//! Unit tests for cg-roads.

#[cfg(test)]
fn default_network() -> crate::RoadNetwork {
    use cg_core::TerrainConfig;
    crate::RoadNetworkBuilder::new(crate::RoadLayout::from(&TerrainConfig::default()))
        .build()
        .unwrap()
}

#[cfg(test)]
mod builder {
    use cg_core::{CrosswalkConfig, Direction, TerrainConfig, Vec2};

    use super::default_network;
    use crate::{RoadLayout, RoadNetworkBuilder, SegmentKind};

    #[test]
    fn scenario_counts() {
        // 500×500 usable, r = 10, H = V = 3.
        let net = default_network();
        let (h, v) = (3, 3);
        let named = |prefix: &str| net.segments().iter().filter(|s| s.name.starts_with(prefix)).count();

        assert_eq!(named("Corner_"), 4);
        assert_eq!(named("PerimeterRoad_"), 2 * (h + 1) + 2 * (v + 1));
        assert_eq!(named("PerimeterIntersection_"), 2 * h + 2 * v);
        assert_eq!(named("Intersection_H"), h * v);
        assert_eq!(named("MainRoad_"), h * (v + 1) + v * (h + 1));
        assert_eq!(net.len(), 4 + 16 + 12 + 9 + 24);
        assert_eq!(net.terrain_width, 520.0);
    }

    #[test]
    fn perimeter_geometry() {
        let net = default_network();
        let top0 = net.by_name("PerimeterRoad_Top_Segment_0").unwrap();
        assert_eq!(top0.center, Vec2::new(70.0, 515.0));
        assert_eq!((top0.width, top0.length), (120.0, 10.0));
        assert_eq!(top0.direction(), Some(Direction::West));

        let top1 = net.by_name("PerimeterRoad_Top_Segment_1").unwrap();
        assert_eq!((top1.width, top1.center.x), (115.0, 197.5));

        let pi = net.by_name("PerimeterIntersection_Top_1").unwrap();
        assert_eq!(pi.center, Vec2::new(135.0, 515.0));
        assert!(pi.is_intersection());

        let right = net.by_name("PerimeterRoad_Right_Segment_0").unwrap();
        assert_eq!(right.center.x, 515.0);
        assert_eq!(right.direction(), Some(Direction::North));
        let left = net.by_name("PerimeterRoad_Left_Segment_2").unwrap();
        assert_eq!(left.direction(), Some(Direction::South));

        let corner = net.by_name("Corner_TopRight").unwrap();
        assert_eq!(corner.center, Vec2::new(515.0, 515.0));
    }

    #[test]
    fn interior_roads_alternate() {
        let net = default_network();
        let dir = |name: &str| net.by_name(name).unwrap().direction();
        assert_eq!(dir("MainRoad_H_1_Segment_0"), Some(Direction::East));
        assert_eq!(dir("MainRoad_H_2_Segment_3"), Some(Direction::West));
        assert_eq!(dir("MainRoad_H_3_Segment_1"), Some(Direction::East));
        assert_eq!(dir("MainRoad_V_1_Segment_0"), Some(Direction::North));
        assert_eq!(dir("MainRoad_V_2_Segment_0"), Some(Direction::South));

        let h1 = net.by_name("MainRoad_H_1_Segment_0").unwrap();
        assert_eq!(h1.center, Vec2::new(70.0, 135.0));
        let last = net.by_name("MainRoad_H_1_Segment_3").unwrap();
        assert_eq!(last.rect().right(), 510.0);
    }

    #[test]
    fn segments_do_not_overlap() {
        let net = default_network();
        let rects: Vec<_> = net.segments().iter().map(|s| (s.name.clone(), s.rect())).collect();
        for (i, (na, a)) in rects.iter().enumerate() {
            for (nb, b) in &rects[i + 1..] {
                assert!(!a.overlaps(b), "{na} overlaps {nb}");
            }
        }
    }

    #[test]
    fn crosswalk_counts() {
        let net = default_network();
        // 9 intersections × 4, plus one mid-block crosswalk on each of the
        // 24 interior segments (115–120 long, spacing 80).
        assert_eq!(net.crosswalks().len(), 36 + 24);

        let layout = RoadLayout::new(
            &TerrainConfig::default(),
            &CrosswalkConfig { at_intersections: false, mid_block: false, ..CrosswalkConfig::default() },
        );
        let bare = RoadNetworkBuilder::new(layout).build().unwrap();
        assert!(bare.crosswalks().is_empty());
    }

    #[test]
    fn mid_block_crosswalk_positions() {
        let terrain = TerrainConfig {
            usable_width: 500.0,
            usable_length: 500.0,
            road_width: 10.0,
            horizontal_roads: 1,
            vertical_roads: 0,
        };
        let net = RoadNetworkBuilder::new(RoadLayout::from(&terrain)).build().unwrap();
        // One segment spanning 10..510: 500 long → 6 crosswalks, 500/7 apart.
        let xs: Vec<f32> = net.crosswalks().iter().map(|c| c.center.x).collect();
        assert_eq!(xs.len(), 6);
        let step = 500.0 / 7.0;
        for (k, x) in xs.iter().enumerate() {
            assert!((x - (10.0 + step * (k + 1) as f32)).abs() < 1e-3);
        }
        assert!(net.crosswalks().iter().all(|c| c.across_horizontal_road && c.width == 3.0));
    }

    #[test]
    fn degenerate_blocks_are_skipped() {
        let terrain = TerrainConfig {
            usable_width: 30.0,
            usable_length: 200.0,
            road_width: 10.0,
            horizontal_roads: 1,
            vertical_roads: 2,
        };
        let net = RoadNetworkBuilder::new(RoadLayout::from(&terrain)).build().unwrap();
        assert!(net.by_name("MainRoad_H_1_Segment_0").is_some());
        assert!(net.by_name("MainRoad_H_1_Segment_1").is_none());
        assert!(net.by_name("PerimeterRoad_Top_Segment_1").is_none());
        assert!(net.segments().iter().all(|s| s.width > 0.0 && s.length > 0.0));
    }

    #[test]
    fn skipped_perimeter_block_drops_its_intersection() {
        let terrain = TerrainConfig {
            usable_width: 30.0,
            usable_length: 200.0,
            road_width: 10.0,
            horizontal_roads: 1,
            vertical_roads: 2,
        };
        let net = RoadNetworkBuilder::new(RoadLayout::from(&terrain)).build().unwrap();
        for side in ["Top", "Bottom"] {
            assert!(net.by_name(&format!("PerimeterRoad_{side}_Segment_0")).is_some());
            assert!(net.by_name(&format!("PerimeterIntersection_{side}_1")).is_some());
            assert!(net.by_name(&format!("PerimeterRoad_{side}_Segment_1")).is_none());
            assert!(net.by_name(&format!("PerimeterIntersection_{side}_2")).is_none());
            assert!(net.by_name(&format!("PerimeterRoad_{side}_Segment_2")).is_some());
        }
        // Top and Bottom lose one intersection each; Left and Right keep theirs.
        let perimeter_intersections =
            net.segments().iter().filter(|s| s.name.starts_with("PerimeterIntersection_")).count();
        assert_eq!(perimeter_intersections, 4);
    }

    #[test]
    fn no_interior_roads() {
        let terrain = TerrainConfig { horizontal_roads: 0, vertical_roads: 0, ..TerrainConfig::default() };
        let net = RoadNetworkBuilder::new(RoadLayout::from(&terrain)).build().unwrap();
        assert_eq!(net.len(), 4 + 4);
        assert!(net.segments().iter().all(|s| !matches!(s.kind, SegmentKind::AccessRoad)));
    }
}

#[cfg(test)]
mod turns {
    use cg_core::{Direction, DirectionSet, TurnRule};

    use super::default_network;
    use crate::{IntersectionGraph, TurnRules};

    fn set(dirs: &[Direction]) -> DirectionSet {
        dirs.iter().copied().collect()
    }

    #[test]
    fn corners_allow_one_left_turn() {
        let net = default_network();
        let graph = IntersectionGraph::new(&net);
        for name in ["Corner_BottomLeft", "Corner_BottomRight", "Corner_TopRight", "Corner_TopLeft"] {
            let corner = net.by_name(name).unwrap();
            for incoming in Direction::ALL {
                let exits = graph.resolve_allowed_exits(corner, incoming);
                assert_eq!(exits, set(&[incoming.turn_left()]), "{name} from {incoming}");
                assert!(!exits.contains(incoming));
                assert!(!exits.contains(incoming.turn_right()));
            }
        }
        let bl = net.by_name("Corner_BottomLeft").unwrap();
        assert_eq!(graph.resolve_allowed_exits(bl, Direction::South), set(&[Direction::East]));
    }

    #[test]
    fn interior_rules_cycle_row_major() {
        let net = default_network();
        let rules = |name: &str| *net.by_name(name).unwrap().turn_rules().unwrap();
        let a = TurnRules::new(TurnRule::Right, TurnRule::Left, true, true);
        let b = TurnRules::new(TurnRule::Left, TurnRule::Right, true, true);
        assert_eq!(rules("Intersection_H1_V1"), a);
        assert_eq!(rules("Intersection_H1_V2"), b);
        assert_eq!(rules("Intersection_H1_V3"), a);
        // The cycle carries across rows.
        assert_eq!(rules("Intersection_H2_V1"), b);
        assert_eq!(rules("Intersection_H3_V3"), a);
    }

    #[test]
    fn interior_exits() {
        let net = default_network();
        let graph = IntersectionGraph::new(&net);
        let x = net.by_name("Intersection_H1_V1").unwrap();
        assert_eq!(
            graph.resolve_allowed_exits(x, Direction::East),
            set(&[Direction::East, Direction::North])
        );
        assert_eq!(
            graph.resolve_allowed_exits(x, Direction::North),
            set(&[Direction::East, Direction::North])
        );
        assert_eq!(
            graph.resolve_allowed_exits(x, Direction::South),
            set(&[Direction::West, Direction::South])
        );
    }

    #[test]
    fn perimeter_toggles() {
        let net = default_network();
        let graph = IntersectionGraph::new(&net);
        let exits = |name: &str, d: Direction| graph.resolve_allowed_exits(net.by_name(name).unwrap(), d);

        assert_eq!(exits("PerimeterIntersection_Top_1", Direction::West), set(&[Direction::West]));
        assert_eq!(
            exits("PerimeterIntersection_Top_2", Direction::West),
            set(&[Direction::West, Direction::South])
        );
        assert_eq!(
            exits("PerimeterIntersection_Bottom_1", Direction::East),
            set(&[Direction::East, Direction::North])
        );
        assert_eq!(exits("PerimeterIntersection_Bottom_2", Direction::East), set(&[Direction::East]));
        assert_eq!(
            exits("PerimeterIntersection_Left_1", Direction::South),
            set(&[Direction::South, Direction::East])
        );
        assert_eq!(exits("PerimeterIntersection_Right_1", Direction::North), set(&[Direction::North]));
        // Cross traffic may only turn onto the ring.
        assert_eq!(exits("PerimeterIntersection_Top_1", Direction::South), set(&[Direction::East]));
    }

    #[test]
    fn resolution_is_pure() {
        let net = default_network();
        let graph = IntersectionGraph::new(&net);
        for x in graph.intersections() {
            for d in Direction::ALL {
                assert_eq!(graph.resolve_allowed_exits(x, d), graph.resolve_allowed_exits(x, d));
            }
        }
    }

    #[test]
    fn non_intersection_resolves_empty() {
        let net = default_network();
        let graph = IntersectionGraph::new(&net);
        let road = net.by_name("MainRoad_H_1_Segment_0").unwrap();
        assert!(graph.resolve_allowed_exits(road, Direction::East).is_empty());
    }
}

#[cfg(test)]
mod graph {
    use cg_core::{Direction, Vec2};

    use super::default_network;
    use crate::{DEFAULT_ALIGNMENT_TOLERANCE, IntersectionGraph};

    #[test]
    fn point_location() {
        let net = default_network();
        let graph = IntersectionGraph::new(&net);
        let name = |p: Vec2| graph.find_segment_at(p).map(|s| s.name.as_str());

        assert_eq!(name(Vec2::new(5.0, 5.0)), Some("Corner_BottomLeft"));
        // Shared edge: earlier segment wins.
        assert_eq!(name(Vec2::new(10.0, 5.0)), Some("Corner_BottomLeft"));
        assert_eq!(name(Vec2::new(70.0, 135.0)), Some("MainRoad_H_1_Segment_0"));
        assert_eq!(name(Vec2::new(135.0, 135.0)), Some("Intersection_H1_V1"));
        assert_eq!(name(Vec2::new(70.0, 70.0)), None);
        assert_eq!(name(Vec2::new(-1.0, 5.0)), None);

        let x = graph.find_intersection_at(Vec2::new(137.0, 133.0)).unwrap();
        assert_eq!(x.name, "Intersection_H1_V1");
        assert!(graph.find_intersection_at(Vec2::new(70.0, 135.0)).is_none());
    }

    #[test]
    fn adjacent_segments() {
        let net = default_network();
        let graph = IntersectionGraph::new(&net);
        let x = net.by_name("Intersection_H1_V1").unwrap();
        let adj = |d| graph.find_adjacent_segment(x, d, DEFAULT_ALIGNMENT_TOLERANCE).map(|s| s.name.clone());

        assert_eq!(adj(Direction::East).as_deref(), Some("MainRoad_H_1_Segment_1"));
        assert_eq!(adj(Direction::North).as_deref(), Some("MainRoad_V_1_Segment_1"));
        // Road H1 runs East and V1 runs North: nothing flows West or South here.
        assert_eq!(adj(Direction::West), None);
        assert_eq!(adj(Direction::South), None);
    }

    #[test]
    fn exits_follow_rules() {
        let net = default_network();
        let graph = IntersectionGraph::new(&net);
        let x = net.by_name("Intersection_H1_V1").unwrap();
        let current = net.by_name("MainRoad_H_1_Segment_0").unwrap();
        let names: Vec<&str> = graph.exits(x, current).iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["MainRoad_H_1_Segment_1", "MainRoad_V_1_Segment_1"]);

        // An intersection has no heading, so nothing resolves.
        assert!(graph.exits(x, x).is_empty());
    }

    #[test]
    fn connected_within_radius() {
        let net = default_network();
        let graph = IntersectionGraph::new(&net);
        let x = net.by_name("Intersection_H1_V1").unwrap();
        let near = graph.connected_segments(x.center, 65.0);
        assert_eq!(near.len(), 4);
        assert!(near.iter().all(|s| s.direction().is_some()));
        assert!(near.windows(2).all(|w| w[0].id < w[1].id));
        assert!(graph.connected_segments(x.center, 10.0).is_empty());

        let current = net.by_name("MainRoad_H_1_Segment_0").unwrap();
        assert_eq!(graph.fallback_candidates(x, current).len(), 3);
    }

    #[test]
    fn enumeration() {
        let net = default_network();
        let graph = IntersectionGraph::new(&net);
        assert_eq!(graph.intersections().count(), 4 + 12 + 9);
        assert_eq!(graph.directional_segments().count(), 16 + 24);
    }
}

#[cfg(test)]
mod access {
    use cg_core::Rect;

    use super::default_network;
    use crate::{SegmentKind, access_road_rect};

    #[test]
    fn horizontal_main_road() {
        let road = Rect::new(10.0, 130.0, 120.0, 10.0);
        let above = access_road_rect(10.0, Rect::new(40.0, 160.0, 50.0, 50.0), road);
        assert_eq!(above, Some(Rect::new(60.0, 140.0, 10.0, 20.0)));
        let below = access_road_rect(10.0, Rect::new(40.0, 60.0, 50.0, 50.0), road);
        assert_eq!(below, Some(Rect::new(60.0, 110.0, 10.0, 20.0)));
    }

    #[test]
    fn vertical_main_road() {
        let road = Rect::new(130.0, 10.0, 10.0, 120.0);
        let right = access_road_rect(10.0, Rect::new(160.0, 40.0, 50.0, 50.0), road);
        assert_eq!(right, Some(Rect::new(140.0, 60.0, 20.0, 10.0)));
        let left = access_road_rect(10.0, Rect::new(50.0, 40.0, 50.0, 50.0), road);
        assert_eq!(left, Some(Rect::new(100.0, 60.0, 30.0, 10.0)));
    }

    #[test]
    fn touching_lot_gets_none() {
        let road = Rect::new(10.0, 130.0, 120.0, 10.0);
        assert_eq!(access_road_rect(10.0, Rect::new(40.0, 140.0, 50.0, 50.0), road), None);
        assert_eq!(access_road_rect(10.0, Rect::new(40.0, 135.0, 50.0, 50.0), road), None);
    }

    #[test]
    fn push_names_by_count() {
        let mut net = default_network();
        let n = net.len();
        let id = net.push_access_road(Rect::new(60.0, 140.0, 10.0, 20.0)).unwrap().unwrap();
        let seg = net.segment(id).unwrap();
        assert_eq!(seg.name, format!("AccessRoad_{n}"));
        assert_eq!(seg.kind, SegmentKind::AccessRoad);
        assert_eq!(seg.kind.code(), -2);
        assert!(net.push_access_road(Rect::new(0.0, 0.0, 0.0, 5.0)).unwrap().is_none());
        assert_eq!(net.main_road_rects().count(), n);
    }
}

#[cfg(test)]
mod record {
    use cg_core::{Rect, Vec2};

    use super::default_network;
    use crate::{
        RoadDataAsset, RoadError, RoadNetwork, RoadSegmentRecord, SegmentKind, read_records_csv,
        write_records_csv,
    };

    #[test]
    fn records_roundtrip() {
        let mut net = default_network();
        net.push_access_road(Rect::new(60.0, 140.0, 10.0, 20.0)).unwrap();
        let records = net.to_records();
        assert_eq!(records.len(), net.len());
        let back = RoadNetwork::from_records(&net.terrain_record(), &records).unwrap();
        assert_eq!(back, net);
        assert_eq!(back.to_records(), records);
    }

    #[test]
    fn record_fields() {
        let net = default_network();
        let recs = net.to_records();
        let corner = &recs[0];
        assert_eq!(corner.name, "Corner_BottomLeft");
        assert_eq!((corner.direction, corner.from_vertical, corner.from_horizontal), (-1, 1, 1));
        assert!(!corner.can_go_straight_v && !corner.can_go_straight_h);
        assert!(!corner.horizontal && !corner.vertical);

        let road = recs.iter().find(|r| r.name == "MainRoad_V_2_Segment_0").unwrap();
        assert_eq!(road.direction, 3);
        assert!(road.vertical && !road.horizontal);
        assert_eq!((road.from_vertical, road.from_horizontal), (-1, -1));
        assert_eq!(road.position_z, 70.0);
    }

    #[test]
    fn csv_roundtrip_is_exact() {
        let net = default_network();
        let records = net.to_records();
        let mut buf = Vec::new();
        write_records_csv(&mut buf, &records).unwrap();
        let back = read_records_csv(buf.as_slice()).unwrap();
        assert_eq!(back, records);
        for (a, b) in back.iter().zip(&records) {
            assert_eq!(a.position_x.to_bits(), b.position_x.to_bits());
            assert_eq!(a.scale_x.to_bits(), b.scale_x.to_bits());
        }
    }

    #[test]
    fn asset_save_load_dir() {
        let net = default_network();
        let asset = RoadDataAsset::from_network(&net);
        let dir = tempfile::tempdir().unwrap();
        asset.save_dir(dir.path()).unwrap();
        assert!(dir.path().join("road_segments.csv").exists());

        let loaded = RoadDataAsset::load_dir(dir.path()).unwrap();
        assert_eq!(loaded, asset);
        assert_eq!(loaded.to_network().unwrap(), net);
        assert_eq!(loaded.intersections().count(), 25);
        assert_eq!(loaded.directional().count(), 40);
    }

    fn record(name: &str, direction: i32) -> RoadSegmentRecord {
        RoadSegmentRecord {
            name: name.into(),
            position_x: 50.0,
            position_y: 0.0,
            position_z: 20.0,
            scale_x: 40.0,
            scale_y: 1.0,
            scale_z: 10.0,
            rotation: 0.0,
            horizontal: true,
            vertical: false,
            direction,
            from_vertical: -1,
            from_horizontal: -1,
            can_go_straight_v: true,
            can_go_straight_h: true,
        }
    }

    #[test]
    fn unknown_direction_is_error() {
        let net = default_network();
        let err = RoadNetwork::from_records(&net.terrain_record(), &[record("bad", 7)]).unwrap_err();
        assert!(matches!(err, RoadError::UnknownDirection { code: 7, .. }));
    }

    #[test]
    fn duplicate_name_is_error() {
        let net = default_network();
        let recs = [record("a", 0), record("a", 1)];
        let err = RoadNetwork::from_records(&net.terrain_record(), &recs).unwrap_err();
        assert!(matches!(err, RoadError::DuplicateName(n) if n == "a"));
    }

    #[test]
    fn quarter_turn_swaps_extents() {
        let mut rec = record("turned", 2);
        rec.rotation = 90.0;
        let net = RoadNetwork::from_records(&default_network().terrain_record(), &[rec]).unwrap();
        let seg = net.by_name("turned").unwrap();
        assert_eq!((seg.width, seg.length), (10.0, 40.0));
        assert_eq!(seg.center, Vec2::new(50.0, 20.0));
        assert!(matches!(seg.kind, SegmentKind::Directional { .. }));
    }

    #[test]
    fn degenerate_record_is_skipped() {
        let mut rec = record("flat", 0);
        rec.scale_z = 0.0;
        let net = RoadNetwork::from_records(&default_network().terrain_record(), &[rec]).unwrap();
        assert!(net.is_empty());
    }
}
