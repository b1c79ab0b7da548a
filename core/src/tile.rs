use serde::{Deserialize, Serialize};

/// Index into the configured palette.
pub type Color = u8;

/// Whether a cell currently holds a tile. `Empty` only exists between removal and gravity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Occupancy {
    Occupied(Color),
    Empty,
}

/// Special ability carried by a tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Bonus {
    Recolor,
    Bomb,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    occupancy: Occupancy,
    bonus: Option<Bonus>,
    selected: bool,
}

impl Cell {
    pub const EMPTY: Self = Self {
        occupancy: Occupancy::Empty,
        bonus: None,
        selected: false,
    };

    pub const fn new(color: Color) -> Self {
        Self {
            occupancy: Occupancy::Occupied(color),
            bonus: None,
            selected: false,
        }
    }

    pub const fn with_bonus(color: Color, bonus: Bonus) -> Self {
        Self {
            occupancy: Occupancy::Occupied(color),
            bonus: Some(bonus),
            selected: false,
        }
    }

    pub const fn occupancy(self) -> Occupancy {
        self.occupancy
    }

    pub const fn color(self) -> Option<Color> {
        match self.occupancy {
            Occupancy::Occupied(color) => Some(color),
            Occupancy::Empty => None,
        }
    }

    pub const fn bonus(self) -> Option<Bonus> {
        self.bonus
    }

    pub const fn is_selected(self) -> bool {
        self.selected
    }

    pub const fn is_empty(self) -> bool {
        matches!(self.occupancy, Occupancy::Empty)
    }

    pub(crate) fn set_color(&mut self, color: Color) {
        self.occupancy = Occupancy::Occupied(color);
    }

    /// Empty cells never carry a bonus.
    pub(crate) fn set_bonus(&mut self, bonus: Option<Bonus>) {
        if !self.is_empty() {
            self.bonus = bonus;
        }
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::EMPTY;
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}
