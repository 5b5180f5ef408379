#[cfg(test)]
mod tests {
    use itertools::iproduct;
    use rand::prelude::SmallRng;
    use rand::{Rng, SeedableRng};
    use test_case::test_case;

    use rectpack::algorithms::{
        GuillotineConfig, MaxRectsConfig, PackAlgo, RectFitness, SectionFitness, SplitRule,
    };
    use rectpack::packer::{
        BinCount, BinSelection, PackedRectTuple, PackerConfig, PackingMode, RectPacker,
        SortPolicy, new_packer,
    };

    fn all_algos() -> Vec<PackAlgo> {
        let guillotines = iproduct!(
            [
                SectionFitness::BestAreaFit,
                SectionFitness::BestShortSideFit,
                SectionFitness::BestLongSideFit,
            ],
            [
                SplitRule::ShorterAxis,
                SplitRule::LongerAxis,
                SplitRule::ShorterLeftoverAxis,
                SplitRule::LongerLeftoverAxis,
                SplitRule::MaxArea,
                SplitRule::MinArea,
            ],
            [true, false]
        )
        .map(|(fitness, split, merge)| {
            PackAlgo::Guillotine(GuillotineConfig {
                fitness,
                split,
                merge,
            })
        });
        let maxrects = [
            RectFitness::BestAreaFit,
            RectFitness::BestShortSideFit,
            RectFitness::BestLongSideFit,
            RectFitness::BottomLeft,
        ]
        .into_iter()
        .map(|fitness| PackAlgo::MaxRects(MaxRectsConfig { fitness }));

        guillotines.chain(maxrects).collect()
    }

    fn random_rects(seed: u64, n: usize) -> Vec<(f32, f32)> {
        let mut rng = SmallRng::seed_from_u64(seed);
        (0..n)
            .map(|_| {
                (
                    rng.random_range(1..60) as f32,
                    rng.random_range(1..60) as f32,
                )
            })
            .collect()
    }

    fn run(config: PackerConfig, rects: &[(f32, f32)]) -> (Vec<PackedRectTuple>, Vec<(f32, f32)>) {
        let mut packer = new_packer(config).unwrap();
        packer.add_bin(100.0, 80.0, BinCount::Finite(3)).unwrap();
        packer.add_bin(120.0, 120.0, BinCount::Infinite).unwrap();
        for (i, &(w, h)) in rects.iter().enumerate() {
            packer.add_rect(w, h, Some(i)).unwrap();
        }
        if config.mode == PackingMode::Offline {
            packer.pack().unwrap();
        }
        packer.validate_packing().unwrap();
        (packer.rect_list(), packer.bin_list())
    }

    fn check_placements(
        rotation: bool,
        rects: &[(f32, f32)],
        placed: &[PackedRectTuple],
        bins: &[(f32, f32)],
    ) {
        // the infinite bins can hold every rectangle
        assert_eq!(placed.len(), rects.len());
        for &(bin, x, y, w, h, rid) in placed {
            let (bin_w, bin_h) = bins[bin];
            assert!(x >= 0.0 && y >= 0.0 && x + w <= bin_w && y + h <= bin_h);
            let requested = rects[rid.unwrap()];
            match rotation {
                true => assert!((w, h) == requested || (h, w) == requested),
                false => assert_eq!((w, h), requested),
            }
        }
    }

    #[test_case(PackingMode::Online, BinSelection::NextFit; "online next fit")]
    #[test_case(PackingMode::Online, BinSelection::FirstFit; "online first fit")]
    #[test_case(PackingMode::Online, BinSelection::BestFit; "online best fit")]
    #[test_case(PackingMode::Offline, BinSelection::NextFit; "offline next fit")]
    #[test_case(PackingMode::Offline, BinSelection::FirstFit; "offline first fit")]
    #[test_case(PackingMode::Offline, BinSelection::BestFit; "offline best fit")]
    #[test_case(PackingMode::Offline, BinSelection::Global; "offline global")]
    fn every_algorithm_produces_valid_packings(mode: PackingMode, bin_selection: BinSelection) {
        let rects = random_rects(42, 60);
        for pack_algo in all_algos() {
            for rotation in [true, false] {
                let config = PackerConfig {
                    mode,
                    bin_selection,
                    pack_algo,
                    sort: SortPolicy::Area,
                    rotation,
                };
                let (placed, bins) = run(config, &rects);
                check_placements(rotation, &rects, &placed, &bins);
            }
        }
    }

    #[test_case(SortPolicy::Perimeter; "perimeter")]
    #[test_case(SortPolicy::SideDiff; "side difference")]
    #[test_case(SortPolicy::ShortSide; "short side")]
    #[test_case(SortPolicy::LongSide; "long side")]
    #[test_case(SortPolicy::Ratio; "ratio")]
    #[test_case(SortPolicy::Unsorted; "unsorted")]
    fn every_sort_policy_produces_valid_packings(sort: SortPolicy) {
        let rects = random_rects(7, 80);
        let config = PackerConfig {
            sort,
            ..PackerConfig::default()
        };
        let (placed, bins) = run(config, &rects);
        check_placements(true, &rects, &placed, &bins);
    }

    #[test]
    fn packing_is_deterministic() {
        let rects = random_rects(3, 50);
        for pack_algo in all_algos() {
            let config = PackerConfig {
                pack_algo,
                ..PackerConfig::default()
            };
            assert_eq!(run(config, &rects), run(config, &rects));
        }
    }
}
