use super::*;

/// Scatters mines uniformly, resampling whenever a draw lands on a cell that already has one.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomLayoutGenerator {
    seed: u64,
}

impl RandomLayoutGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl LayoutGenerator for RandomLayoutGenerator {
    fn generate(self, config: BoardConfig) -> MineLayout {
        use rand::prelude::*;

        assert!(
            config.is_valid(),
            "mine count must be in 1..{}, got {}",
            config.total_cells(),
            config.mines
        );

        let (width, height) = config.size;
        let mut layout = MineLayout::empty(config.size);
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut collisions = 0_u32;

        while layout.mine_count() < config.mines {
            let coords = (rng.random_range(0..width), rng.random_range(0..height));
            if !layout.place_mine(coords) {
                collisions += 1;
            }
        }

        log::debug!(
            "Generated {}x{} layout with {} mines from seed {:#x} ({} collisions)",
            width,
            height,
            config.mines,
            self.seed,
            collisions
        );
        layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_exact_mine_count() {
        for seed in 0..32 {
            let layout = RandomLayoutGenerator::new(seed).generate(BoardConfig::GENERAL);
            assert_eq!(layout.mine_count(), 40);
            assert_eq!(layout.iter_mines().count(), 40);
            assert_eq!(layout.size(), (20, 16));
        }
    }

    #[test]
    fn nearly_full_board_leaves_one_safe_cell() {
        let config = BoardConfig::new((6, 5), 29).unwrap();
        let layout = RandomLayoutGenerator::new(7).generate(config);
        assert_eq!(layout.iter_mines().count(), 29);
    }

    #[test]
    fn same_seed_same_layout() {
        let a = RandomLayoutGenerator::new(42).generate(BoardConfig::DEMO);
        let b = RandomLayoutGenerator::new(42).generate(BoardConfig::DEMO);
        assert_eq!(a, b);
    }

    #[test]
    #[should_panic(expected = "mine count must be in")]
    fn zero_mines_panics() {
        RandomLayoutGenerator::new(0).generate(BoardConfig::new_unchecked((6, 5), 0));
    }

    #[test]
    #[should_panic(expected = "mine count must be in")]
    fn full_board_panics() {
        RandomLayoutGenerator::new(0).generate(BoardConfig::new_unchecked((6, 5), 30));
    }
}
