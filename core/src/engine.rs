use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::*;

/// One game session: a board, its score and the random stream that drives it.
///
/// Every operation runs its whole cascade before returning, so callers only ever observe boards
/// at rest.
#[derive(Clone, Debug)]
pub struct PlayEngine {
    config: GameConfig,
    seed: u64,
    board: Board,
    ledger: ScoreLedger,
    rng: SmallRng,
    selection: Option<Coord2>,
}

impl PlayEngine {
    /// Starts a session on a freshly generated, match-free board.
    pub fn new_game(config: GameConfig, seed: u64) -> Result<Self> {
        let mut rng = SmallRng::seed_from_u64(seed);
        let board = RandomBoardGenerator::default().generate(&config, &mut rng)?;
        log::debug!("New {:?} game with seed {}", config.size, seed);

        Ok(Self {
            config,
            seed,
            board,
            ledger: ScoreLedger::default(),
            rng,
            selection: None,
        })
    }

    /// Starts a session on a hand-built board. The board's size overrides `config.size`.
    ///
    /// The board is taken as-is: it may contain matches, which resolve on the next action.
    pub fn with_board(config: GameConfig, board: Board, seed: u64) -> Result<Self> {
        let config = GameConfig {
            size: board.size(),
            ..config
        };
        config.validate()?;
        if !board.is_at_rest() {
            return Err(GameError::InvalidBoardShape);
        }
        if board.palette_len() > config.colors {
            return Err(GameError::InvalidColor);
        }

        Ok(Self {
            config,
            seed,
            board,
            ledger: ScoreLedger::default(),
            rng: SmallRng::seed_from_u64(seed),
            selection: None,
        })
    }

    /// Replaces the board and zeroes the score, keeping the configuration.
    pub fn restart(&mut self, seed: u64) -> Result<()> {
        let mut rng = SmallRng::seed_from_u64(seed);
        self.board = RandomBoardGenerator::default().generate(&self.config, &mut rng)?;
        self.rng = rng;
        self.seed = seed;
        self.ledger = ScoreLedger::default();
        self.selection = None;
        Ok(())
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn score(&self) -> Score {
        self.ledger.total()
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.board.validate_coords(coords)?;
        Ok(self.board.cell(coords))
    }

    pub fn selected_cell(&self) -> Option<Coord2> {
        self.selection
    }

    /// Swaps two adjacent cells and resolves the cascade, or leaves the board untouched when
    /// the cells are not adjacent or the swap would not create a match.
    ///
    /// An applied swap drops the selection, since the cascade moves tiles under it.
    pub fn try_swap(&mut self, a: Coord2, b: Coord2) -> Result<SwapOutcome> {
        let a = self.board.validate_coords(a)?;
        let b = self.board.validate_coords(b)?;

        if !is_adjacent(a, b) {
            return Ok(SwapOutcome::default());
        }

        self.board.swap(a, b);
        if !has_matches(&self.board) {
            self.board.swap(a, b);
            return Ok(SwapOutcome::default());
        }

        self.clear_selection();
        let before = self.ledger.total();
        let cascade = self.resolver().cascade(BonusSpawning::Enabled);
        log::debug!("Swapped {:?} and {:?}: {:?}", a, b, cascade);

        Ok(SwapOutcome {
            applied: true,
            score_delta: self.ledger.total() - before,
            cascade,
        })
    }

    /// Fires whatever bonus the cell carries. A cell without a bonus is left alone.
    pub fn activate_bonus(&mut self, coords: Coord2) -> Result<BonusOutcome> {
        let coords = self.board.validate_coords(coords)?;
        match self.board.cell(coords).bonus() {
            Some(bonus) => self.apply_bonus(bonus, coords),
            None => Ok(BonusOutcome::default()),
        }
    }

    /// Fires `bonus` at `coords` if, and only if, the cell carries that bonus.
    ///
    /// A bomb always settles the board itself. A recolor is followed by gravity and a cascade
    /// only when `recolor_cascade` is configured.
    pub fn apply_bonus(&mut self, bonus: Bonus, coords: Coord2) -> Result<BonusOutcome> {
        let coords = self.board.validate_coords(coords)?;
        if self.board.cell(coords).bonus() != Some(bonus) {
            return Ok(BonusOutcome::default());
        }
        self.clear_selection();
        let recolor_cascade = self.config.recolor_cascade;
        let before = self.ledger.total();

        let mut resolver = self.resolver();
        let Some(effect) = resolver.apply_bonus(bonus, coords) else {
            return Ok(BonusOutcome::default());
        };
        let cascade = match (bonus, effect.cascade) {
            (Bonus::Recolor, _) if recolor_cascade => {
                Some(resolver.settle(BonusSpawning::Enabled))
            }
            (_, cascade) => cascade,
        };
        log::debug!("Activated {:?} at {:?}", bonus, coords);

        Ok(BonusOutcome {
            activated: Some(bonus),
            affected: effect.affected,
            score_delta: self.ledger.total() - before,
            cascade,
        })
    }

    /// Routes a press through the two-step selection protocol.
    ///
    /// A double press on a bonus cell fires it. Otherwise the first press selects a cell and the
    /// second one attempts a swap with it, after which the selection is dropped either way.
    pub fn press(&mut self, coords: Coord2, kind: PressKind) -> Result<PressOutcome> {
        let coords = self.board.validate_coords(coords)?;

        if kind == PressKind::Double && self.board.cell(coords).bonus().is_some() {
            return self.activate_bonus(coords).map(PressOutcome::BonusActivated);
        }

        let Some(selected) = self.selection else {
            self.selection = Some(coords);
            self.board.set_selected(coords, true);
            return Ok(PressOutcome::Selected(coords));
        };

        self.clear_selection();
        if is_adjacent(selected, coords) {
            self.try_swap(selected, coords).map(PressOutcome::Swapped)
        } else {
            Ok(PressOutcome::SelectionCleared)
        }
    }

    pub fn clear_selection(&mut self) {
        if let Some(coords) = self.selection.take() {
            self.board.set_selected(coords, false);
        }
    }

    fn resolver(&mut self) -> Resolver<'_, SmallRng> {
        Resolver::new(
            &mut self.board,
            &mut self.ledger,
            &mut self.rng,
            &self.config,
        )
    }
}
