use core::ops::RangeInclusive;

/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`, row 0 at the top.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Whether `a` and `b` are orthogonal neighbors, i.e. their Manhattan distance is exactly one.
pub const fn is_adjacent(a: Coord2, b: Coord2) -> bool {
    a.0.abs_diff(b.0) as u16 + a.1.abs_diff(b.1) as u16 == 1
}

const DISPLACEMENTS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
pub(crate) fn apply_delta(coords: Coord2, delta: (isize, isize), bounds: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (d_row, d_col) = delta;
    let (max_row, max_col) = bounds;

    let next_row = row.checked_add_signed(d_row.try_into().ok()?)?;
    if next_row >= max_row {
        return None;
    }

    let next_col = col.checked_add_signed(d_col.try_into().ok()?)?;
    if next_col >= max_col {
        return None;
    }

    Some((next_row, next_col))
}

/// Orthogonal (four-connected) neighbors of a cell, clipped to the board.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub(crate) fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

/// Every cell within Chebyshev distance `radius` of `center`, clipped to `bounds`, excluding
/// `center` itself. Yields in row-major order.
pub fn iter_box(center: Coord2, radius: Coord, bounds: Coord2) -> impl Iterator<Item = Coord2> {
    let rows = axis_span(center.0, radius, bounds.0);
    let cols = axis_span(center.1, radius, bounds.1);

    rows.flat_map(move |row| cols.clone().map(move |col| (row, col)))
        .filter(move |&coords| coords != center)
}

fn axis_span(at: Coord, radius: Coord, len: Coord) -> RangeInclusive<Coord> {
    let last = len.saturating_sub(1);
    at.saturating_sub(radius).min(last)..=at.saturating_add(radius).min(last)
}
