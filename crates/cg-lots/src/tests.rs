//! Unit tests for cg-lots.

#[cfg(test)]
mod lot {
    use cg_core::{Rect, SegmentId};

    use crate::Lot;

    #[test]
    fn building_lot_owns_grid() {
        let lot = Lot::building(Rect::new(0.0, 0.0, 30.0, 10.0), 2.0);
        assert!(lot.is_building());
        let grid = lot.grid().unwrap();
        assert_eq!((grid.width(), grid.length()), (15, 5));
        assert!(Lot::park(Rect::new(0.0, 0.0, 1.0, 1.0)).grid().is_none());
    }

    #[test]
    fn access_road_attaches_later() {
        let mut lot = Lot::building(Rect::new(0.0, 0.0, 10.0, 10.0), 2.0);
        assert_eq!(lot.access_road(), None);
        lot.attach_access_road(SegmentId(12));
        assert_eq!(lot.access_road(), Some(SegmentId(12)));
        assert_eq!(lot.rect(), Rect::new(0.0, 0.0, 10.0, 10.0));
    }
}

#[cfg(test)]
mod partition {
    use cg_core::{LotId, Rect};

    use crate::{LotPartitioner, residual_rects};

    fn area(rects: &[Rect]) -> f32 {
        rects.iter().map(Rect::area).sum()
    }

    #[test]
    fn full_height_band() {
        let cell = Rect::new(0.0, 0.0, 100.0, 40.0);
        let excluded = Rect::new(20.0, 20.0, 40.0, 20.0);
        let rects = residual_rects(cell, excluded);
        assert_eq!(
            rects,
            vec![
                Rect::new(0.0, 0.0, 100.0, 20.0),
                Rect::new(0.0, 20.0, 20.0, 20.0),
                Rect::new(60.0, 20.0, 40.0, 20.0),
            ]
        );
        assert_eq!(area(&rects), 100.0 * 40.0 - 40.0 * 20.0);
    }

    #[test]
    fn centered_excluded_emits_four() {
        let cell = Rect::new(0.0, 0.0, 100.0, 80.0);
        let excluded = Rect::new(20.0, 20.0, 40.0, 20.0);
        let rects = residual_rects(cell, excluded);
        assert_eq!(rects.len(), 4);
        assert_eq!(area(&rects), 100.0 * 80.0 - 40.0 * 20.0);
    }

    #[test]
    fn known_corner_gap() {
        // Excluded sticks out above the cell: left/right follow its span,
        // so they start above the cell and the strip below them is covered
        // only by the bottom residual.
        let cell = Rect::new(0.0, 0.0, 100.0, 40.0);
        let excluded = Rect::new(20.0, -10.0, 40.0, 30.0);
        let rects = residual_rects(cell, excluded);
        assert_eq!(rects.len(), 3);
        assert_eq!(rects[0], Rect::new(0.0, 20.0, 100.0, 20.0));
        assert_eq!(rects[1], Rect::new(0.0, -10.0, 20.0, 30.0));
        assert_eq!(rects[2], Rect::new(60.0, -10.0, 40.0, 30.0));
        assert!(rects[1].y < cell.y);
    }

    #[test]
    fn zero_area_excluded_gives_whole_cell() {
        let p = LotPartitioner::default();
        let cell = Rect::new(5.0, 5.0, 50.0, 50.0);
        let lots = p.partition(cell, Rect::ZERO, None);
        assert_eq!(lots.len(), 1);
        assert_eq!(lots[0].rect(), cell);
        assert!(lots[0].is_building());
    }

    #[test]
    fn partition_tags_park() {
        let p = LotPartitioner::default();
        let cell = Rect::new(0.0, 0.0, 100.0, 80.0);
        let lots = p.partition(cell, Rect::new(20.0, 20.0, 40.0, 20.0), Some(LotId(3)));
        assert_eq!(lots.len(), 4);
        assert!(lots.iter().all(|l| l.is_building() && l.park == Some(LotId(3))));
    }

    #[test]
    fn excluded_covering_cell_gives_nothing() {
        let p = LotPartitioner::default();
        let cell = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(p.partition(cell, cell, None).is_empty());
    }

    #[test]
    fn obstacle_is_clipped_to_park() {
        let p = LotPartitioner::default();
        let park = Rect::new(0.0, 0.0, 50.0, 50.0);
        // Access road reaching in from below the park.
        let road = Rect::new(20.0, -30.0, 10.0, 40.0);
        let lots = p.partition_around_obstacle(park, road);
        assert!(lots.iter().all(|l| l.is_park()));
        let rects: Vec<Rect> = lots.iter().map(|l| l.rect()).collect();
        for r in &rects {
            assert!(!r.overlaps(&road));
            assert!(r.y >= park.y && r.bottom() <= park.bottom());
        }
        assert!((area(&rects) - (2500.0 - 100.0)).abs() < 1e-3);
    }

    #[test]
    fn disjoint_obstacle_keeps_park_whole() {
        let p = LotPartitioner::default();
        let park = Rect::new(0.0, 0.0, 50.0, 50.0);
        let lots = p.partition_around_obstacle(park, Rect::new(60.0, 0.0, 5.0, 5.0));
        assert_eq!(lots.len(), 1);
        assert_eq!(lots[0].rect(), park);
    }
}

#[cfg(test)]
mod partition_props {
    use cg_core::Rect;
    use proptest::prelude::*;

    use crate::residual_rects;

    proptest! {
        /// Excluded rect strictly inside the cell: residuals plus excluded
        /// tile the cell and never overlap each other or the excluded rect.
        #[test]
        fn residuals_tile_cell(
            w in 10.0f32..200.0,
            h in 10.0f32..200.0,
            fx in 0.01f32..0.98,
            fy in 0.01f32..0.98,
            fw in 0.01f32..1.0,
            fh in 0.01f32..1.0,
        ) {
            let cell = Rect::new(3.0, 7.0, w, h);
            let ex = cell.x + fx * w;
            let ey = cell.y + fy * h;
            let ew = (cell.right() - ex) * fw;
            let eh = (cell.bottom() - ey) * fh;
            let excluded = Rect::new(ex, ey, ew, eh);

            let rects = residual_rects(cell, excluded);
            let total: f32 = rects.iter().map(Rect::area).sum::<f32>() + excluded.area();
            prop_assert!((total - cell.area()).abs() <= cell.area() * 1e-4);
            let shared = |a: &Rect, b: &Rect| a.intersection(b).map_or(0.0, |r| r.area());
            for (i, a) in rects.iter().enumerate() {
                prop_assert!(shared(a, &excluded) <= 1e-2);
                for b in &rects[i + 1..] {
                    prop_assert!(shared(a, b) <= 1e-2);
                }
            }
        }
    }
}
