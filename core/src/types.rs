/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

/// Converts board coordinates into an `ndarray` index.
///
/// Boards are stored row-major with shape `(height, width)`, so `(x, y)` maps to `[y, x]` and the
/// flat position of a cell is `y * width + x`.
pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.1.into(), self.0.into()]
    }
}

/// Number of cells on a `width` x `height` board.
pub const fn area((width, height): Coord2) -> CellCount {
    (width as CellCount).saturating_mul(height as CellCount)
}

/// Coordinates of the cell at flat position `index` on a board `width` cells wide.
pub const fn coords_of(index: usize, width: Coord) -> Coord2 {
    let width = width as usize;
    ((index % width) as Coord, (index / width) as Coord)
}

/// In-bounds 8-neighbourhood of a cell, in row-major order.
///
/// Scans the 3x3 window around `center` clipped to the board, skipping the center itself, so
/// corners and edges yield fewer items and nothing outside `bounds` is ever produced.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    first: Coord2,
    last: Coord2,
    next: Option<Coord2>,
}

impl NeighborIter {
    pub fn new(center: Coord2, (width, height): Coord2) -> Self {
        let (x, y) = center;
        let first = (x.saturating_sub(1), y.saturating_sub(1));
        let last = (
            x.saturating_add(1).min(width.saturating_sub(1)),
            y.saturating_add(1).min(height.saturating_sub(1)),
        );
        let empty = width == 0 || height == 0 || first.0 > last.0 || first.1 > last.1;

        Self {
            center,
            first,
            last,
            next: (!empty).then_some(first),
        }
    }

    fn step(&self, (x, y): Coord2) -> Option<Coord2> {
        if x < self.last.0 {
            Some((x + 1, y))
        } else if y < self.last.1 {
            Some((self.first.0, y + 1))
        } else {
            None
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let current = self.next?;
            self.next = self.step(current);
            if current != self.center {
                return Some(current);
            }
        }
    }
}
