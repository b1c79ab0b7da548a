use std::fmt::Write;

use gems_core::{Bonus, BoardView, CellView};

const PALETTE: &[u8; 16] = b"RGBYMOCWPKTLVNSA";

/// Plain-text board: one glyph per color, `*` marks a recolor, `@` a bomb, brackets the selection.
pub fn board_text(view: &BoardView) -> String {
    let (rows, cols) = view.size;
    let mut out = String::new();

    out.push_str("    ");
    for col in 0..cols {
        let _ = write!(out, "{col:>3} ");
    }
    out.push('\n');

    for row in 0..rows {
        let _ = write!(out, "{row:>3} ");
        for col in 0..cols {
            let cell = view.cell((row, col)).unwrap_or_default();
            let (open, close) = if cell.selected { ('[', ']') } else { (' ', ' ') };
            let _ = write!(out, "{open}{}{}{close}", glyph(cell), marker(cell));
        }
        out.push('\n');
    }

    let _ = write!(out, "score: {}", view.score);
    out
}

fn glyph(cell: CellView) -> char {
    cell.color
        .and_then(|color| PALETTE.get(usize::from(color)))
        .map_or('.', |&byte| char::from(byte))
}

fn marker(cell: CellView) -> char {
    match cell.bonus {
        Some(Bonus::Recolor) => '*',
        Some(Bonus::Bomb) => '@',
        None => ' ',
    }
}
