use alloc::vec::Vec;

use crate::types::apply_delta;
use crate::*;

/// What a bonus activation did to the board.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BonusEffect {
    /// Cells recolored or destroyed, not counting the origin of a recolor.
    pub affected: Vec<Coord2>,
    /// Present when the activation ran gravity and a cascade before returning.
    pub cascade: Option<CascadeReport>,
}

impl<D: DrawSource> Resolver<'_, D> {
    /// Tries to place a random bonus within [`BONUS_RADIUS`] of a cleared cell.
    ///
    /// Candidates must be on the board, outside the current match, occupied and bonus-free.
    /// Gives up silently after [`BONUS_PLACEMENT_ATTEMPTS`] misses.
    pub(crate) fn spawn_bonus_near(
        &mut self,
        cleared: Coord2,
        matches: &MatchSet,
    ) -> Option<(Coord2, Bonus)> {
        let bounds = self.board.size();
        for _ in 0..BONUS_PLACEMENT_ATTEMPTS {
            let d_row = self.draws.draw_offset(BONUS_RADIUS);
            let d_col = self.draws.draw_offset(BONUS_RADIUS);
            let Some(target) = apply_delta(cleared, (d_row.into(), d_col.into()), bounds) else {
                continue;
            };

            let cell = self.board.cell(target);
            if matches.contains(&target) || cell.is_empty() || cell.bonus().is_some() {
                continue;
            }

            let bonus = self.draws.draw_bonus();
            self.board.place_bonus(target, bonus);
            log::debug!("Bonus {:?} spawned at {:?}", bonus, target);
            return Some((target, bonus));
        }
        None
    }

    /// Activates `bonus` at `origin`. Does nothing unless the cell currently carries that bonus.
    ///
    /// A bomb settles the board (gravity plus a full cascade) before returning; a recolor leaves
    /// that to the caller.
    pub fn apply_bonus(&mut self, bonus: Bonus, origin: Coord2) -> Option<BonusEffect> {
        if self.board.cell(origin).bonus() != Some(bonus) {
            return None;
        }

        Some(match bonus {
            Bonus::Recolor => BonusEffect {
                affected: self.recolor(origin),
                cascade: None,
            },
            Bonus::Bomb => {
                let affected = self.detonate(origin);
                let cascade = self.settle(BonusSpawning::Enabled);
                BonusEffect {
                    affected,
                    cascade: Some(cascade),
                }
            }
        })
    }

    /// Paints up to [`RECOLOR_TARGETS`] random nearby cells with the origin's color.
    fn recolor(&mut self, origin: Coord2) -> Vec<Coord2> {
        let mut vicinity: Vec<_> = iter_box(origin, BONUS_RADIUS, self.board.size()).collect();
        self.draws.shuffle_coords(&mut vicinity);
        vicinity.truncate(RECOLOR_TARGETS);

        if let Some(color) = self.board.cell(origin).color() {
            for &target in &vicinity {
                self.board.set_color(target, color);
                self.board.clear_bonus(target);
                self.ledger.award(RECOLOR_POINTS);
            }
        }
        self.board.clear_bonus(origin);

        log::debug!("Recolor at {:?} repainted {:?}", origin, vicinity);
        vicinity
    }

    /// Destroys the origin and [`BOMB_EXTRA_TARGETS`] random other cells, leaving them empty.
    fn detonate(&mut self, origin: Coord2) -> Vec<Coord2> {
        let mut candidates: Vec<_> = self
            .board
            .iter_coords()
            .filter(|&coords| coords != origin)
            .collect();
        self.draws.shuffle_coords(&mut candidates);
        candidates.truncate(BOMB_EXTRA_TARGETS);
        candidates.insert(0, origin);

        for &target in &candidates {
            self.board.clear(target);
            self.ledger.award(BOMB_POINTS);
        }

        log::debug!("Bomb at {:?} destroyed {:?}", origin, candidates);
        candidates
    }
}
