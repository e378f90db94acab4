//! Unit tests for cg-core primitives.

#[cfg(test)]
mod ids {
    use crate::{LotId, SegmentId};

    #[test]
    fn index_roundtrip() {
        let id = SegmentId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(SegmentId::try_from(42usize).unwrap(), id);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn overflowing_index_is_rejected() {
        assert!(LotId::try_from(u32::MAX as usize).is_ok());
        assert!(LotId::try_from(u32::MAX as usize + 1).is_err());
    }
}

#[cfg(test)]
mod geom {
    use crate::{Rect, Vec2, lerp};

    #[test]
    fn rect_edges_and_center() {
        let r = Rect::new(10.0, 20.0, 40.0, 20.0);
        assert_eq!(r.right(), 50.0);
        assert_eq!(r.bottom(), 40.0);
        assert_eq!(r.center(), Vec2::new(30.0, 30.0));
        assert_eq!(r.area(), 800.0);
        assert_eq!(Rect::from_center(r.center(), 40.0, 20.0), r);
    }

    #[test]
    fn shared_edge_is_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        assert!(a.intersection(&b).is_none());
        let c = Rect::new(9.0, 5.0, 10.0, 10.0);
        assert!(a.overlaps(&c));
        assert_eq!(a.intersection(&c), Some(Rect::new(9.0, 5.0, 1.0, 5.0)));
    }

    #[test]
    fn containment_edges() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Vec2::new(0.0, 0.0)));
        assert!(!r.contains(Vec2::new(10.0, 5.0)));
        assert!(r.contains_inclusive(Vec2::new(10.0, 10.0)));
    }

    #[test]
    fn lerp_clamps() {
        assert_eq!(lerp(0.6, 0.35, 0.0), 0.6);
        assert_eq!(lerp(0.6, 0.35, 2.0), 0.35);
        assert_eq!(lerp(0.0, 10.0, -1.0), 0.0);
        assert!((lerp(60.0, 45.0, 0.5) - 52.5).abs() < 1e-5);
    }

    #[test]
    fn normalize_zero_vector() {
        assert_eq!(Vec2::ZERO.normalize_or_zero(), Vec2::ZERO);
        let n = Vec2::new(3.0, 4.0).normalize_or_zero();
        assert!((n.length() - 1.0).abs() < 1e-6);
    }
}

#[cfg(test)]
mod direction {
    use crate::{Axis, Direction, DirectionSet, TurnRule};

    #[test]
    fn codes_roundtrip() {
        for d in Direction::ALL {
            assert_eq!(Direction::from_code(d.code()), Some(d));
        }
        assert_eq!(Direction::from_code(-1), None);
        assert_eq!(Direction::from_code(4), None);
    }

    #[test]
    fn turn_mappings() {
        assert_eq!(Direction::East.turn_right(), Direction::South);
        assert_eq!(Direction::West.turn_right(), Direction::North);
        assert_eq!(Direction::East.turn_left(), Direction::North);
        assert_eq!(Direction::West.turn_left(), Direction::South);
        assert_eq!(Direction::North.turn_right(), Direction::East);
        assert_eq!(Direction::South.turn_right(), Direction::West);
        assert_eq!(Direction::North.turn_left(), Direction::West);
        assert_eq!(Direction::South.turn_left(), Direction::East);
    }

    #[test]
    fn turns_switch_axis() {
        for d in Direction::ALL {
            assert_ne!(d.turn_left().axis(), d.axis());
            assert_ne!(d.turn_right().axis(), d.axis());
        }
        assert_eq!(Direction::North.axis(), Axis::Vertical);
    }

    #[test]
    fn turn_rule_codes() {
        assert_eq!(TurnRule::from_code(0), TurnRule::Right);
        assert_eq!(TurnRule::from_code(1), TurnRule::Left);
        assert_eq!(TurnRule::from_code(-1), TurnRule::NoTurn);
        assert_eq!(TurnRule::from_code(7), TurnRule::NoTurn);
        assert_eq!(TurnRule::NoTurn.apply(Direction::East), None);
    }

    #[test]
    fn set_iterates_in_code_order() {
        let set: DirectionSet = [Direction::South, Direction::East].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Direction::East, Direction::South]);
        assert!(DirectionSet::EMPTY.is_empty());
    }
}

#[cfg(test)]
mod rng {
    use crate::GenRng;

    #[test]
    fn same_seed_same_stream() {
        let mut a = GenRng::new(99);
        let mut b = GenRng::new(99);
        let xs: Vec<u64> = (0..8).map(|_| a.random()).collect();
        let ys: Vec<u64> = (0..8).map(|_| b.random()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn empty_range_returns_low() {
        let mut rng = GenRng::new(1);
        assert_eq!(rng.range_f32(5.0, 5.0), 5.0);
        assert_eq!(rng.range_f32(8.0, 2.0), 8.0);
        assert_eq!(rng.range_inclusive(3, 3), 3);
    }

    #[test]
    fn range_f32_stays_in_bounds() {
        let mut rng = GenRng::new(2);
        for _ in 0..1000 {
            let v = rng.range_f32(0.1, 0.9);
            assert!((0.1..0.9).contains(&v));
        }
    }
}

#[cfg(test)]
mod config {
    use crate::{GenRng, GenerationConfig, TerrainConfig};

    #[test]
    fn default_is_valid() {
        GenerationConfig::default().validate().unwrap();
    }

    #[test]
    fn terrain_adds_perimeter() {
        let t = TerrainConfig::default();
        assert_eq!(t.terrain_width(), 520.0);
        assert_eq!(t.terrain_length(), 520.0);
    }

    #[test]
    fn rejects_bad_values() {
        let mut cfg = GenerationConfig::default();
        cfg.density = 1.5;
        assert!(cfg.validate().is_err());

        let mut cfg = GenerationConfig::default();
        cfg.terrain.road_width = 0.0;
        assert!(cfg.validate().is_err());

        let mut cfg = GenerationConfig::default();
        cfg.grid_cell_size = f32::NAN;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn randomized_configs_validate() {
        let mut rng = GenRng::new(5);
        for _ in 0..50 {
            let cfg = GenerationConfig::randomized(&mut rng);
            cfg.validate().unwrap();
            assert!((250.0..=1000.0).contains(&cfg.terrain.usable_width));
            if cfg.is_city_mode() {
                assert!((3..=6).contains(&cfg.terrain.horizontal_roads));
            } else {
                assert!((1..=3).contains(&cfg.terrain.vertical_roads));
            }
        }
    }
}
