use rand::Rng;
use rand::seq::SliceRandom;

use crate::*;

/// Sequential source of every random draw the engine makes.
///
/// Draws are consumed strictly in call order, so a seeded source replays a whole session:
/// initial fill, refills after gravity, bonus trials and placement, recolor and bomb targets.
pub trait DrawSource {
    /// Uniform index in `0..len`; `len` must be non-zero.
    fn draw_index(&mut self, len: usize) -> usize;

    /// Uniform offset in `-radius..=radius`.
    fn draw_offset(&mut self, radius: Coord) -> i16;

    /// Uniform real in `[0, 1)`.
    fn draw_unit(&mut self) -> f32;

    fn shuffle_coords(&mut self, coords: &mut [Coord2]);

    fn draw_color(&mut self, colors: Color) -> Color {
        // `colors` fits in `Color`, so the index does too
        self.draw_index(colors.into()) as Color
    }

    fn draw_chance(&mut self, probability: f32) -> bool {
        self.draw_unit() < probability
    }

    fn draw_bonus(&mut self) -> Bonus {
        match self.draw_index(2) {
            0 => Bonus::Recolor,
            _ => Bonus::Bomb,
        }
    }
}

impl<R: Rng> DrawSource for R {
    fn draw_index(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }

    fn draw_offset(&mut self, radius: Coord) -> i16 {
        let radius = i16::from(radius);
        self.random_range(-radius..=radius)
    }

    fn draw_unit(&mut self) -> f32 {
        self.random()
    }

    fn shuffle_coords(&mut self, coords: &mut [Coord2]) {
        coords.shuffle(self);
    }
}
