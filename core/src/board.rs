use core::ops::Index;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Rectangular grid of cells, stored row-major and mutated in place.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
}

impl Board {
    /// Fills every cell with a uniformly random color and no bonus.
    ///
    /// The result may contain matches; see [`RandomBoardGenerator`] for match-free boards.
    pub fn filled(size: Coord2, colors: Color, draws: &mut impl DrawSource) -> Self {
        let mut cells = Array2::default(size.to_nd_index());
        for cell in cells.iter_mut() {
            *cell = Cell::new(draws.draw_color(colors));
        }
        Self { cells }
    }

    /// Fills every cell so that no cell shares a color with its orthogonal neighbors.
    ///
    /// Each cell draws among the colors that differ from the cell above and the cell to the
    /// left, so fewer than [`MIN_COLORS`] colors is rejected.
    pub fn constrained(size: Coord2, colors: Color, draws: &mut impl DrawSource) -> Result<Self> {
        if colors < MIN_COLORS {
            return Err(GameError::InvalidConfig);
        }
        let mut board = Self {
            cells: Array2::default(size.to_nd_index()),
        };
        let (rows, cols) = size;
        for row in 0..rows {
            for col in 0..cols {
                let up = row
                    .checked_sub(1)
                    .and_then(|up| board.cell((up, col)).color());
                let left = col
                    .checked_sub(1)
                    .and_then(|left| board.cell((row, left)).color());
                let open = (0..colors).filter(|&color| Some(color) != up && Some(color) != left);
                let pick = draws.draw_index(open.clone().count());
                let color = open.clone().nth(pick).unwrap_or_default();
                board.cells[(row, col).to_nd_index()] = Cell::new(color);
            }
        }
        Ok(board)
    }

    /// Builds a board from rows of colors, top row first.
    pub fn from_rows<R: AsRef<[Color]>>(rows: &[R]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        if height == 0
            || width == 0
            || height > Coord::MAX.into()
            || width > Coord::MAX.into()
            || rows.iter().any(|row| row.as_ref().len() != width)
        {
            return Err(GameError::InvalidBoardShape);
        }

        let cells = Array2::from_shape_fn((height, width), |(row, col)| {
            Cell::new(rows[row].as_ref()[col])
        });
        Ok(Self { cells })
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.cells.dim();
        // dimensions never exceed `Coord::MAX`, every constructor checks
        (dim.0 as Coord, dim.1 as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::OutOfRange)
        }
    }

    pub fn cell(&self, coords: Coord2) -> Cell {
        self.cells[coords.to_nd_index()]
    }

    /// Row-major iteration over every coordinate on the board.
    pub fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (rows, cols) = self.size();
        (0..rows).flat_map(move |row| (0..cols).map(move |col| (row, col)))
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    /// Largest color index in use plus one, ignoring empty cells.
    pub fn palette_len(&self) -> Color {
        self.cells
            .iter()
            .filter_map(|cell| cell.color())
            .max()
            .map_or(0, |color| color.saturating_add(1))
    }

    /// Whether no cell is empty.
    pub fn is_at_rest(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    /// Exchanges color and bonus between two cells. Adjacency is not checked.
    pub fn swap(&mut self, a: Coord2, b: Coord2) {
        if a == b {
            return;
        }
        let first = self.cell(a);
        let second = self.cell(b);
        self.cells[a.to_nd_index()] = carry_over(second, first.is_selected());
        self.cells[b.to_nd_index()] = carry_over(first, second.is_selected());
    }

    /// Places or removes a bonus on an occupied cell.
    pub fn set_bonus(&mut self, coords: Coord2, bonus: Option<Bonus>) -> Result<()> {
        let coords = self.validate_coords(coords)?;
        self.cells[coords.to_nd_index()].set_bonus(bonus);
        Ok(())
    }

    pub(crate) fn place_bonus(&mut self, coords: Coord2, bonus: Bonus) {
        self.cells[coords.to_nd_index()].set_bonus(Some(bonus));
    }

    pub(crate) fn clear_bonus(&mut self, coords: Coord2) {
        self.cells[coords.to_nd_index()].set_bonus(None);
    }

    pub(crate) fn set_color(&mut self, coords: Coord2, color: Color) {
        self.cells[coords.to_nd_index()].set_color(color);
    }

    pub(crate) fn set_selected(&mut self, coords: Coord2, selected: bool) {
        self.cells[coords.to_nd_index()].set_selected(selected);
    }

    pub(crate) fn clear(&mut self, coords: Coord2) {
        self.cells[coords.to_nd_index()].clear();
    }

    /// Compacts every column downward, keeping the relative order of the tiles, then refills
    /// the vacated top cells with fresh random colors. Returns how many cells were refilled.
    pub(crate) fn apply_gravity(&mut self, colors: Color, draws: &mut impl DrawSource) -> CellCount {
        let (rows, cols) = self.size();
        let mut refilled = 0;

        for col in 0..cols {
            let mut write = rows;
            for row in (0..rows).rev() {
                let cell = self.cell((row, col));
                if cell.is_empty() {
                    continue;
                }
                write -= 1;
                if write != row {
                    self.cells[(write, col).to_nd_index()] = carry_over(cell, false);
                    self.cells[(row, col).to_nd_index()] = Cell::EMPTY;
                }
            }

            for row in (0..write).rev() {
                self.cells[(row, col).to_nd_index()] = Cell::new(draws.draw_color(colors));
                refilled += 1;
            }
        }

        refilled
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

/// Moves a tile's color and bonus while the destination keeps its selection flag.
fn carry_over(cell: Cell, selected: bool) -> Cell {
    let mut moved = cell;
    moved.set_selected(selected);
    moved
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn column(board: &Board, col: Coord) -> Vec<Option<Color>> {
        let (rows, _) = board.size();
        (0..rows).map(|row| board.cell((row, col)).color()).collect()
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        let rows: [&[Color]; 2] = [&[0, 1], &[0]];

        assert_eq!(Board::from_rows(&rows), Err(GameError::InvalidBoardShape));
    }

    #[test]
    fn swap_exchanges_color_and_bonus() {
        let mut board = Board::from_rows(&[[0, 1]]).unwrap();
        board.set_bonus((0, 1), Some(Bonus::Bomb)).unwrap();

        board.swap((0, 0), (0, 1));

        assert_eq!(board.cell((0, 0)), Cell::with_bonus(1, Bonus::Bomb));
        assert_eq!(board.cell((0, 1)), Cell::new(0));
    }

    #[test]
    fn gravity_keeps_order_and_refills_top() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut board = Board::from_rows(&[[0], [5], [1], [5]]).unwrap();
        board.clear((1, 0));
        board.clear((3, 0));

        let refilled = board.apply_gravity(6, &mut rng);

        let after = column(&board, 0);
        assert_eq!(refilled, 2);
        assert_eq!(&after[2..], &[Some(0), Some(1)]);
        assert!(after[..2].iter().all(|color| matches!(color, Some(c) if *c < 6)));
        assert!(board.is_at_rest());
    }

    #[test]
    fn gravity_moves_bonus_with_tile() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut board = Board::from_rows(&[[2], [3]]).unwrap();
        board.set_bonus((0, 0), Some(Bonus::Recolor)).unwrap();
        board.clear((1, 0));

        board.apply_gravity(4, &mut rng);

        assert_eq!(board.cell((1, 0)), Cell::with_bonus(2, Bonus::Recolor));
        assert_eq!(board.cell((0, 0)).bonus(), None);
    }

    #[test]
    fn constrained_fill_has_no_equal_neighbors() {
        let mut rng = SmallRng::seed_from_u64(99);
        let board = Board::constrained((12, 12), 3, &mut rng).unwrap();

        for coords in board.iter_coords() {
            let color = board.cell(coords).color();
            assert!(color.is_some());
            assert!(board.iter_neighbors(coords).all(|pos| board.cell(pos).color() != color));
        }
    }

    #[test]
    fn constrained_fill_rejects_two_colors() {
        let mut rng = SmallRng::seed_from_u64(1);

        assert_eq!(
            Board::constrained((4, 4), 2, &mut rng),
            Err(GameError::InvalidConfig)
        );
    }
}
