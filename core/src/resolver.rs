use serde::{Deserialize, Serialize};

use crate::*;

/// Where a cascade currently is. A fresh resolver starts `Idle` and every cascade ends `Stable`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolverState {
    Idle,
    Detecting,
    Removing,
    Gravity,
    Stable,
}

impl Default for ResolverState {
    fn default() -> Self {
        Self::Idle
    }
}

/// Whether clears made by a cascade may place new bonuses on the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BonusSpawning {
    Enabled,
    Disabled,
}

/// Summary of one cascade run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeReport {
    /// Detect/remove/gravity cycles performed.
    pub passes: u8,
    pub cleared: u32,
    pub bonuses_spawned: u32,
    /// `false` when the pass bound stopped the cascade with matches still on the board.
    pub settled: bool,
}

/// Drives the detect, remove, gravity loop over a borrowed board.
///
/// Bonus activation lives in the `bonus` module as further methods on this type.
#[derive(Debug)]
pub struct Resolver<'a, D: DrawSource> {
    pub(crate) board: &'a mut Board,
    pub(crate) ledger: &'a mut ScoreLedger,
    pub(crate) draws: &'a mut D,
    pub(crate) config: &'a GameConfig,
    state: ResolverState,
    pending: MatchSet,
}

impl<'a, D: DrawSource> Resolver<'a, D> {
    pub fn new(
        board: &'a mut Board,
        ledger: &'a mut ScoreLedger,
        draws: &'a mut D,
        config: &'a GameConfig,
    ) -> Self {
        Self {
            board,
            ledger,
            draws,
            config,
            state: ResolverState::Idle,
            pending: MatchSet::new(),
        }
    }

    pub fn state(&self) -> ResolverState {
        self.state
    }

    /// Runs the cascade until nothing matches or `max_match_checks` passes have been made.
    pub fn cascade(&mut self, spawning: BonusSpawning) -> CascadeReport {
        let mut report = CascadeReport::default();
        self.state = ResolverState::Detecting;

        while self.state != ResolverState::Stable {
            self.step(spawning, &mut report);
        }

        report
    }

    /// Compacts and refills the board, then cascades. Used after anything that empties cells.
    pub fn settle(&mut self, spawning: BonusSpawning) -> CascadeReport {
        self.state = ResolverState::Gravity;
        self.board.apply_gravity(self.config.colors, self.draws);
        self.cascade(spawning)
    }

    fn step(&mut self, spawning: BonusSpawning, report: &mut CascadeReport) {
        use ResolverState::*;

        self.state = match self.state {
            Idle | Stable => Stable,
            Detecting => {
                self.pending = find_matches(self.board);
                if self.pending.is_empty() {
                    report.settled = true;
                    Stable
                } else if report.passes >= self.config.max_match_checks {
                    log::warn!(
                        "Cascade stopped after {} passes with {} cells still matching",
                        report.passes,
                        self.pending.len()
                    );
                    self.pending.clear();
                    Stable
                } else {
                    Removing
                }
            }
            Removing => {
                let matches = core::mem::take(&mut self.pending);
                let spawned = self.remove_matches(&matches, spawning);
                report.passes += 1;
                report.cleared += matches.len() as u32;
                report.bonuses_spawned += spawned;
                log::trace!(
                    "Cascade pass {}: cleared {} cells, spawned {} bonuses",
                    report.passes,
                    matches.len(),
                    spawned
                );
                Gravity
            }
            Gravity => {
                self.board.apply_gravity(self.config.colors, self.draws);
                Detecting
            }
        };
    }

    /// Empties every matched cell, awarding points, and rolls for a bonus per cleared cell.
    fn remove_matches(&mut self, matches: &MatchSet, spawning: BonusSpawning) -> u32 {
        let mut spawned = 0;
        for &coords in matches {
            self.board.clear(coords);
            self.ledger.award(CLEAR_POINTS);

            if spawning == BonusSpawning::Enabled
                && self.draws.draw_chance(self.config.bonus_chance)
                && self.spawn_bonus_near(coords, matches).is_some()
            {
                spawned += 1;
            }
        }
        spawned
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn striped(size: Coord) -> Board {
        // columns alternate between two colors, so every column is one long cluster
        let rows: alloc::vec::Vec<alloc::vec::Vec<Color>> = (0..size)
            .map(|_| (0..size).map(|col| col % 2).collect())
            .collect();
        Board::from_rows(&rows).unwrap()
    }

    #[test]
    fn stable_board_needs_no_passes() {
        let mut board = Board::from_rows(&[[0, 1], [1, 0]]).unwrap();
        let mut ledger = ScoreLedger::default();
        let mut rng = SmallRng::seed_from_u64(0);
        let config = GameConfig::default();

        let mut resolver = Resolver::new(&mut board, &mut ledger, &mut rng, &config);
        assert_eq!(resolver.state(), ResolverState::Idle);
        let report = resolver.cascade(BonusSpawning::Enabled);

        assert_eq!(resolver.state(), ResolverState::Stable);
        assert_eq!(report.passes, 0);
        assert!(report.settled);
        assert_eq!(ledger.total(), 0);
    }

    #[test]
    fn single_pass_awards_ten_per_cell() {
        let mut board = Board::from_rows(&[[0, 0, 0], [1, 2, 1], [2, 1, 2]]).unwrap();
        let mut ledger = ScoreLedger::default();
        let mut rng = SmallRng::seed_from_u64(5);
        let config = GameConfig::default().with_max_match_checks(1);

        let report = Resolver::new(&mut board, &mut ledger, &mut rng, &config)
            .cascade(BonusSpawning::Disabled);

        assert_eq!(report.passes, 1);
        assert_eq!(report.cleared, 3);
        assert_eq!(ledger.total(), 30);
        assert!(board.is_at_rest());
    }

    #[test]
    fn pass_bound_stops_endless_cascades() {
        // a single color refills into a fresh cluster every time
        let config = GameConfig::default().with_max_match_checks(4);
        let config = GameConfig {
            colors: 1,
            ..config
        };
        let mut board = striped(6);
        let mut ledger = ScoreLedger::default();
        let mut rng = SmallRng::seed_from_u64(11);

        let report = Resolver::new(&mut board, &mut ledger, &mut rng, &config)
            .cascade(BonusSpawning::Disabled);

        assert_eq!(report.passes, 4);
        assert!(!report.settled);
        assert!(has_matches(&board));
        assert!(board.is_at_rest());
    }

    #[test]
    fn disabled_spawning_never_places_bonuses() {
        let config = GameConfig::default().with_bonus_chance(1.0);
        let mut board = striped(8);
        let mut ledger = ScoreLedger::default();
        let mut rng = SmallRng::seed_from_u64(21);

        let report = Resolver::new(&mut board, &mut ledger, &mut rng, &config)
            .cascade(BonusSpawning::Disabled);

        assert_eq!(report.bonuses_spawned, 0);
        assert!(board.iter_coords().all(|pos| board.cell(pos).bonus().is_none()));
    }

    #[test]
    fn enabled_spawning_places_bonuses_outside_the_match() {
        let config = GameConfig::default()
            .with_bonus_chance(1.0)
            .with_max_match_checks(1);
        let mut board = Board::from_rows(&[
            [1, 2, 1, 2, 1],
            [2, 1, 2, 1, 2],
            [0, 0, 0, 2, 1],
            [2, 1, 2, 1, 2],
        ])
        .unwrap();
        let mut ledger = ScoreLedger::default();
        let mut rng = SmallRng::seed_from_u64(8);

        let report = Resolver::new(&mut board, &mut ledger, &mut rng, &config)
            .cascade(BonusSpawning::Enabled);

        assert_eq!(report.passes, 1);
        assert!(report.bonuses_spawned <= 3);
        assert_eq!(ledger.total(), 30);
    }

    #[test]
    fn clearing_a_match_destroys_its_bonus() {
        let mut board = Board::from_rows(&[[0, 0, 0], [1, 2, 1], [2, 1, 2]]).unwrap();
        board.set_bonus((0, 1), Some(Bonus::Bomb)).unwrap();
        board.set_bonus((2, 1), Some(Bonus::Recolor)).unwrap();
        let mut ledger = ScoreLedger::default();
        let mut rng = SmallRng::seed_from_u64(6);
        let config = GameConfig::default();
        let matches = find_matches(&board);

        let mut resolver = Resolver::new(&mut board, &mut ledger, &mut rng, &config);
        resolver.remove_matches(&matches, BonusSpawning::Disabled);

        assert_eq!(board.cell((0, 1)), Cell::EMPTY);
        assert_eq!(board.cell((0, 1)).bonus(), None);
        assert_eq!(board.cell((2, 1)).bonus(), Some(Bonus::Recolor));
        assert_eq!(ledger.total(), 3 * CLEAR_POINTS);
    }
}
