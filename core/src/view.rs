use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// What a front end needs to draw one cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub color: Option<Color>,
    pub bonus: Option<Bonus>,
    pub selected: bool,
}

impl From<Cell> for CellView {
    fn from(cell: Cell) -> Self {
        Self {
            color: cell.color(),
            bonus: cell.bonus(),
            selected: cell.is_selected(),
        }
    }
}

/// Read-only snapshot of a session for rendering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardView {
    pub size: Coord2,
    pub score: Score,
    pub cells: Array2<CellView>,
}

impl BoardView {
    pub fn from_engine(engine: &PlayEngine) -> Self {
        let board = engine.board();
        let size = board.size();
        let mut cells = Array2::from_elem(size.to_nd_index(), CellView::default());

        for coords in board.iter_coords() {
            cells[coords.to_nd_index()] = board[coords].into();
        }

        Self {
            size,
            score: engine.score(),
            cells,
        }
    }

    pub fn cell(&self, coords: Coord2) -> Option<CellView> {
        self.cells.get(coords.to_nd_index()).copied()
    }

    pub fn validate(&self) -> Result<()> {
        let expected = (self.size.0 as usize, self.size.1 as usize);
        if self.cells.dim() != expected {
            return Err(GameError::InvalidBoardShape);
        }
        Ok(())
    }
}
