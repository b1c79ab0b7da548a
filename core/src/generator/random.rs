use super::*;

/// Rounds of bonus-free cascading tried before falling back to a constrained fill.
pub const SETUP_ROUNDS: u8 = 32;

/// Uniform random fill, cleaned up by cascading with bonus spawning disabled until nothing
/// matches.
///
/// Points cleared during setup are thrown away. If matches survive every round (tiny palettes on
/// large boards), the board is regenerated so that no two orthogonal neighbors share a color.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    setup_rounds: u8,
}

impl RandomBoardGenerator {
    pub fn new(setup_rounds: u8) -> Self {
        Self { setup_rounds }
    }
}

impl Default for RandomBoardGenerator {
    fn default() -> Self {
        Self::new(SETUP_ROUNDS)
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: &GameConfig, draws: &mut impl DrawSource) -> Result<Board> {
        config.validate()?;
        let mut board = Board::filled(config.size, config.colors, draws);
        let mut discarded = ScoreLedger::default();

        for round in 0..self.setup_rounds {
            let report = Resolver::new(&mut board, &mut discarded, draws, config)
                .cascade(BonusSpawning::Disabled);
            if report.settled {
                log::trace!(
                    "Board settled after {} setup rounds, {} cells rerolled",
                    round + 1,
                    discarded.total() / CLEAR_POINTS
                );
                return Ok(board);
            }
        }

        log::warn!(
            "Board still matching after {} setup rounds, falling back to constrained fill",
            self.setup_rounds
        );
        Board::constrained(config.size, config.colors, draws)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn generated_boards_never_match_and_carry_no_bonus() {
        let config = GameConfig::default();

        for seed in 0..32 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let board = RandomBoardGenerator::default().generate(&config, &mut rng).unwrap();

            assert_eq!(board.size(), (12, 12));
            assert!(find_matches(&board).is_empty());
            assert!(board.is_at_rest());
            assert!(board.iter_coords().all(|pos| board.cell(pos).bonus().is_none()));
        }
    }

    #[test]
    fn fallback_handles_three_colors() {
        let config = GameConfig::new((20, 20), 3);
        let mut rng = SmallRng::seed_from_u64(5);

        let board = RandomBoardGenerator::new(0).generate(&config, &mut rng).unwrap();

        assert!(find_matches(&board).is_empty());
        assert!(board.iter_coords().all(|pos| board.cell(pos).color() < Some(3)));
    }

    #[test]
    fn same_seed_same_board() {
        let config = GameConfig::default();
        let mut a = SmallRng::seed_from_u64(123);
        let mut b = SmallRng::seed_from_u64(123);

        assert_eq!(
            RandomBoardGenerator::default().generate(&config, &mut a),
            RandomBoardGenerator::default().generate(&config, &mut b)
        );
    }

    #[test]
    fn invalid_config_is_rejected_before_filling() {
        let config = GameConfig {
            colors: 2,
            ..GameConfig::default()
        };
        let mut rng = SmallRng::seed_from_u64(3);

        assert_eq!(
            RandomBoardGenerator::new(0).generate(&config, &mut rng),
            Err(GameError::InvalidConfig)
        );
    }
}
