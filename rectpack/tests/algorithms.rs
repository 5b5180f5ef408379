#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;
    use rand::prelude::SmallRng;
    use rand::{Rng, SeedableRng};
    use test_case::test_case;

    use rectpack::algorithms::{
        Fitness, Guillotine, GuillotineConfig, MaxRects, MaxRectsConfig, PackAlgo,
        PackingAlgorithm, RectFitness, SectionFitness, SplitRule,
    };
    use rectpack::geometry::primitives::Rect;
    use rectpack::util::assertions;

    fn guillotine(fitness: SectionFitness, split: SplitRule) -> PackAlgo {
        PackAlgo::Guillotine(GuillotineConfig {
            fitness,
            split,
            merge: true,
        })
    }

    fn maxrects(fitness: RectFitness) -> PackAlgo {
        PackAlgo::MaxRects(MaxRectsConfig { fitness })
    }

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::try_new(x, y, w, h).unwrap()
    }

    #[test_case(guillotine(SectionFitness::BestShortSideFit, SplitRule::ShorterAxis); "guillotine bssf sas")]
    #[test_case(guillotine(SectionFitness::BestAreaFit, SplitRule::MaxArea); "guillotine baf maxas")]
    #[test_case(guillotine(SectionFitness::BestLongSideFit, SplitRule::MinArea); "guillotine blsf minas")]
    #[test_case(maxrects(RectFitness::BestShortSideFit); "maxrects bssf")]
    #[test_case(maxrects(RectFitness::BottomLeft); "maxrects bl")]
    fn non_positive_dimensions_are_rejected(algo: PackAlgo) {
        let mut bin = algo.build(100.0, 100.0, true, None).unwrap();
        for (w, h) in [(0.0, 10.0), (10.0, 0.0), (-5.0, 10.0), (10.0, -5.0), (f32::NAN, 1.0)] {
            assert!(bin.add_rect(w, h, None).is_err());
            assert!(bin.fitness(w, h).is_err());
            assert!(bin.fits_surface(w, h).is_err());
        }
        assert!(bin.is_empty());
        assert!(algo.build(0.0, 100.0, true, None).is_err());
    }

    #[test]
    fn guillotine_bssf_sas_places_next_to_first_rect() {
        let mut bin = Guillotine::new(100.0, 100.0, true, GuillotineConfig::default()).unwrap();
        assert_eq!(bin.add_rect(60.0, 40.0, None).unwrap(), Some(rect(0.0, 0.0, 60.0, 40.0)));
        assert_eq!(
            bin.sections(),
            &[rect(0.0, 40.0, 60.0, 60.0), rect(60.0, 0.0, 40.0, 100.0)]
        );
        let second = bin.add_rect(30.0, 30.0, Some(2)).unwrap().unwrap();
        assert_eq!((second.x(), second.y()), (60.0, 0.0));
        assert_eq!(second.rid(), Some(2));
        assert_eq!(bin.len(), 2);
        bin.validate_packing().unwrap();
    }

    #[test]
    fn guillotine_fitness_does_not_modify_bin() {
        let bin = Guillotine::new(100.0, 100.0, false, GuillotineConfig {
            fitness: SectionFitness::BestAreaFit,
            ..GuillotineConfig::default()
        })
        .unwrap();
        assert_eq!(bin.fitness(50.0, 50.0).unwrap(), Some(Fitness::new(7500.0)));
        assert_eq!(bin.fitness(101.0, 50.0).unwrap(), None);
        assert!(bin.is_empty());
        assert_eq!(bin.sections(), &[rect(0.0, 0.0, 100.0, 100.0)]);
    }

    #[test]
    fn guillotine_reset_restores_full_section() {
        let mut bin = Guillotine::new(50.0, 50.0, false, GuillotineConfig::default()).unwrap();
        bin.add_rect(20.0, 20.0, None).unwrap();
        bin.reset();
        assert!(bin.is_empty());
        assert_eq!(bin.sections(), &[rect(0.0, 0.0, 50.0, 50.0)]);
    }

    #[test]
    fn full_bin_rejects_rect() {
        let mut bin = Guillotine::new(10.0, 10.0, true, GuillotineConfig::default()).unwrap();
        assert!(bin.add_rect(10.0, 10.0, None).unwrap().is_some());
        assert!(bin.sections().is_empty());
        assert_eq!(bin.add_rect(1.0, 1.0, None).unwrap(), None);
        assert_eq!(bin.fitness(1.0, 1.0).unwrap(), None);
    }

    #[test_case(guillotine(SectionFitness::BestShortSideFit, SplitRule::ShorterAxis); "guillotine")]
    #[test_case(maxrects(RectFitness::BestAreaFit); "maxrects")]
    fn rotation(algo: PackAlgo) {
        let mut fixed = algo.build(30.0, 10.0, false, None).unwrap();
        assert!(!fixed.fits_surface(10.0, 30.0).unwrap());
        assert_eq!(fixed.add_rect(10.0, 30.0, None).unwrap(), None);

        let mut rotating = algo.build(30.0, 10.0, true, None).unwrap();
        assert!(rotating.fits_surface(10.0, 30.0).unwrap());
        let placed = rotating.add_rect(10.0, 30.0, None).unwrap().unwrap();
        assert_eq!((placed.width(), placed.height()), (30.0, 10.0));
    }

    #[test]
    fn unrotated_orientation_wins_ties() {
        let mut bin = Guillotine::new(100.0, 100.0, true, GuillotineConfig::default()).unwrap();
        let placed = bin.add_rect(20.0, 10.0, None).unwrap().unwrap();
        assert_eq!((placed.width(), placed.height()), (20.0, 10.0));
    }

    #[test]
    fn maxrects_bssf_places_next_to_first_rect() {
        let mut bin = MaxRects::new(100.0, 100.0, true, MaxRectsConfig::default()).unwrap();
        bin.add_rect(60.0, 40.0, None).unwrap();
        assert_eq!(
            bin.max_rects(),
            &[rect(60.0, 0.0, 40.0, 100.0), rect(0.0, 40.0, 100.0, 60.0)]
        );
        let second = bin.add_rect(30.0, 30.0, None).unwrap().unwrap();
        assert_eq!((second.x(), second.y()), (60.0, 0.0));
    }

    #[test]
    fn maxrects_bottom_left() {
        let mut bin = MaxRects::new(100.0, 100.0, false, MaxRectsConfig {
            fitness: RectFitness::BottomLeft,
        })
        .unwrap();
        assert_eq!(bin.add_rect(30.0, 30.0, None).unwrap(), Some(rect(0.0, 0.0, 30.0, 30.0)));
        assert_eq!(bin.fitness(100.0, 70.0).unwrap(), Some(Fitness::with_tiebreak(100.0, 0.0)));
        assert_eq!(bin.add_rect(100.0, 70.0, None).unwrap(), Some(rect(0.0, 30.0, 100.0, 70.0)));
        assert_eq!(bin.max_rects(), &[rect(30.0, 0.0, 70.0, 30.0)]);
        assert_eq!(bin.add_rect(70.0, 30.0, None).unwrap(), Some(rect(30.0, 0.0, 70.0, 30.0)));
        assert!(bin.max_rects().is_empty());
        assert!(approx_eq!(f32, bin.used_area(), 10_000.0));
    }

    #[test]
    fn maxrects_reset() {
        let mut bin = MaxRects::new(40.0, 20.0, true, MaxRectsConfig::default()).unwrap();
        bin.add_rect(10.0, 10.0, Some(1)).unwrap();
        assert_eq!(bin.rect_list(), vec![(0.0, 0.0, 10.0, 10.0, Some(1))]);
        bin.reset();
        assert!(bin.is_empty());
        assert_eq!(bin.max_rects(), &[rect(0.0, 0.0, 40.0, 20.0)]);
    }

    #[test_case(guillotine(SectionFitness::BestAreaFit, SplitRule::ShorterAxis); "guillotine baf")]
    #[test_case(maxrects(RectFitness::BestAreaFit); "maxrects baf")]
    fn area_fit_handles_overflowing_areas(algo: PackAlgo) {
        let mut bin = algo.build(2e19, 2e19, false, None).unwrap();
        assert_eq!(bin.fitness(1e19, 2e19).unwrap(), Some(Fitness::new(f32::INFINITY)));
        assert_eq!(bin.fitness(2e19, 2e19).unwrap(), Some(Fitness::new(0.0)));
        let placed = bin.add_rect(2e19, 2e19, Some(0)).unwrap();
        assert_eq!(placed, Some(rect(0.0, 0.0, 2e19, 2e19).with_rid(Some(0))));
        assert_eq!(bin.fitness(1.0, 1.0).unwrap(), None);
    }

    #[test]
    fn bid_is_carried_by_built_bins() {
        let bin = PackAlgo::default().build(10.0, 20.0, true, Some(4)).unwrap();
        assert_eq!(bin.bid(), Some(4));
        assert_eq!((bin.width(), bin.height(), bin.rotation()), (10.0, 20.0, true));
    }

    #[test_case(0; "seed 0")]
    #[test_case(1; "seed 1")]
    #[test_case(2; "seed 2")]
    fn maxrects_stay_maximal_and_free(seed: u64) {
        let mut rng = SmallRng::seed_from_u64(seed);
        for fitness in [
            RectFitness::BestAreaFit,
            RectFitness::BestShortSideFit,
            RectFitness::BestLongSideFit,
            RectFitness::BottomLeft,
        ] {
            let mut bin = MaxRects::new(200.0, 150.0, true, MaxRectsConfig { fitness }).unwrap();
            for _ in 0..100 {
                let w = rng.random_range(1..40) as f32;
                let h = rng.random_range(1..40) as f32;
                bin.add_rect(w, h, None).unwrap();
                assert!(assertions::max_rects_are_maximal(bin.max_rects()));
                assert!(assertions::free_space_is_free(bin.max_rects(), bin.rectangles()));
            }
            bin.validate_packing().unwrap();
        }
    }

    #[test_case(0; "seed 0")]
    #[test_case(1; "seed 1")]
    fn guillotine_sections_stay_disjoint_and_free(seed: u64) {
        let mut rng = SmallRng::seed_from_u64(seed);
        for split in [
            SplitRule::ShorterAxis,
            SplitRule::LongerAxis,
            SplitRule::ShorterLeftoverAxis,
            SplitRule::LongerLeftoverAxis,
            SplitRule::MaxArea,
            SplitRule::MinArea,
        ] {
            for merge in [true, false] {
                let config = GuillotineConfig {
                    fitness: SectionFitness::BestAreaFit,
                    split,
                    merge,
                };
                let mut bin = Guillotine::new(200.0, 150.0, true, config).unwrap();
                for _ in 0..100 {
                    let w = rng.random_range(1..40) as f32;
                    let h = rng.random_range(1..40) as f32;
                    bin.add_rect(w, h, None).unwrap();
                    assert!(assertions::sections_are_disjoint(bin.sections()));
                    assert!(assertions::free_space_is_free(bin.sections(), bin.rectangles()));
                }
                bin.validate_packing().unwrap();
            }
        }
    }
}
