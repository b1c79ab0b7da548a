#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use bonus::*;
pub use cluster::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use random::*;
pub use resolver::*;
pub use score::*;
pub use tile::*;
pub use types::*;
pub use view::*;

mod board;
mod bonus;
mod cluster;
mod engine;
mod error;
mod generator;
mod random;
mod resolver;
mod score;
mod tile;
mod types;
mod view;

pub const DEFAULT_SIZE: Coord2 = (12, 12);
pub const DEFAULT_COLORS: Color = 6;
pub const MIN_COLORS: Color = 3;
pub const MAX_COLORS: Color = 16;

/// Probability that a cleared cell spawns a bonus nearby.
pub const BONUS_CHANCE: f32 = 0.05;
/// Detect/remove/gravity cycles allowed per external action.
pub const MAX_MATCH_CHECKS: u8 = 10;
/// Smallest connected region that clears.
pub const MIN_CLUSTER: usize = 3;
/// Chebyshev radius used for bonus placement and recolor targets.
pub const BONUS_RADIUS: Coord = 3;
pub const BONUS_PLACEMENT_ATTEMPTS: usize = 20;
pub const RECOLOR_TARGETS: usize = 2;
pub const BOMB_EXTRA_TARGETS: usize = 4;

pub const CLEAR_POINTS: Score = 10;
pub const RECOLOR_POINTS: Score = 10;
pub const BOMB_POINTS: Score = 20;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub size: Coord2,
    pub colors: Color,
    pub bonus_chance: f32,
    pub max_match_checks: u8,
    /// Run gravity and a cascade right after a recolor bonus is activated.
    pub recolor_cascade: bool,
}

impl GameConfig {
    pub fn new((rows, cols): Coord2, colors: Color) -> Self {
        Self {
            size: (rows.clamp(1, Coord::MAX), cols.clamp(1, Coord::MAX)),
            colors: colors.clamp(MIN_COLORS, MAX_COLORS),
            ..Self::default()
        }
    }

    pub fn with_bonus_chance(self, bonus_chance: f32) -> Self {
        let bonus_chance = if bonus_chance.is_nan() {
            0.0
        } else {
            bonus_chance.clamp(0.0, 1.0)
        };
        Self {
            bonus_chance,
            ..self
        }
    }

    pub fn with_max_match_checks(self, max_match_checks: u8) -> Self {
        Self {
            max_match_checks: max_match_checks.max(1),
            ..self
        }
    }

    pub fn with_recolor_cascade(self, recolor_cascade: bool) -> Self {
        Self {
            recolor_cascade,
            ..self
        }
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    /// Checks a config that was built field by field, e.g. deserialized.
    pub fn validate(&self) -> Result<()> {
        let (rows, cols) = self.size;
        if rows == 0
            || cols == 0
            || !(MIN_COLORS..=MAX_COLORS).contains(&self.colors)
            || !(0.0..=1.0).contains(&self.bonus_chance)
            || self.max_match_checks == 0
        {
            return Err(GameError::InvalidConfig);
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            colors: DEFAULT_COLORS,
            bonus_chance: BONUS_CHANCE,
            max_match_checks: MAX_MATCH_CHECKS,
            recolor_cascade: true,
        }
    }
}

/// Result of a swap request.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SwapOutcome {
    /// `false` when the cells were not adjacent or the swap produced no match; the board is
    /// then unchanged.
    pub applied: bool,
    pub score_delta: Score,
    pub cascade: CascadeReport,
}

impl SwapOutcome {
    pub const fn has_update(&self) -> bool {
        self.applied
    }
}

/// Result of a bonus activation request.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BonusOutcome {
    /// The bonus that fired, `None` when the cell carried no bonus.
    pub activated: Option<Bonus>,
    pub affected: alloc::vec::Vec<Coord2>,
    pub score_delta: Score,
    pub cascade: Option<CascadeReport>,
}

impl BonusOutcome {
    pub const fn has_update(&self) -> bool {
        self.activated.is_some()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PressKind {
    Single,
    Double,
}

/// Result of a press routed through the selection protocol.
#[derive(Clone, Debug, PartialEq)]
pub enum PressOutcome {
    Selected(Coord2),
    SelectionCleared,
    Swapped(SwapOutcome),
    BonusActivated(BonusOutcome),
}

impl PressOutcome {
    pub const fn has_update(&self) -> bool {
        use PressOutcome::*;
        match self {
            Selected(_) => true,
            SelectionCleared => true,
            Swapped(outcome) => outcome.has_update(),
            BonusActivated(outcome) => outcome.has_update(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_dimensions_and_palette() {
        let config = GameConfig::new((0, 40), 1);

        assert_eq!(config.size, (1, 40));
        assert_eq!(config.colors, MIN_COLORS);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn builders_clamp_values() {
        let config = GameConfig::default()
            .with_bonus_chance(2.5)
            .with_max_match_checks(0);

        assert_eq!(config.bonus_chance, 1.0);
        assert_eq!(config.max_match_checks, 1);
        assert_eq!(GameConfig::default().with_bonus_chance(f32::NAN).bonus_chance, 0.0);
    }

    #[test]
    fn validate_rejects_raw_out_of_range_fields() {
        let config = GameConfig {
            colors: 2,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(GameError::InvalidConfig));

        let config = GameConfig {
            bonus_chance: -0.5,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(GameError::InvalidConfig));
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{ "size": [8, 10], "recolor_cascade": false }"#).unwrap();

        assert_eq!(config.size, (8, 10));
        assert_eq!(config.colors, DEFAULT_COLORS);
        assert!(!config.recolor_cascade);
    }
}
