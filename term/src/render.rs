use std::fmt;

use minesweeper_core::{Cell, GameBoard};

fn glyph(cell: &Cell) -> char {
    match (cell.is_revealed(), cell.is_mine()) {
        (false, _) => '#',
        (true, true) => '*',
        (true, false) if cell.adjacent_mine_count() == 0 => '.',
        (true, false) => char::from(b'0' + cell.adjacent_mine_count()),
    }
}

/// Board drawn with column and row labels, hidden cells as `#`.
pub struct BoardView<'a>(pub &'a GameBoard);

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (width, height) = self.0.size();
        write!(f, "  ")?;
        for x in 0..width {
            write!(f, " {x}")?;
        }
        writeln!(f)?;

        let mut cells = self.0.cells();
        for y in 0..height {
            write!(f, "{y:>2}")?;
            for cell in cells.by_ref().take(usize::from(width)) {
                write!(f, " {}", glyph(cell))?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
