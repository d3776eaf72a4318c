use std::fmt;
use std::fmt::Debug;

/// A `Coord` struct represents coordinates of an element in a `Square`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord([usize; 2]);

impl Coord {
    pub fn new(row: usize, col: usize) -> Self {
        Self([row, col])
    }

    pub fn row(self) -> usize {
        self.0[0]
    }

    pub fn col(self) -> usize {
        self.0[1]
    }

    pub(crate) fn as_index(self, width: usize) -> usize {
        debug_assert!(self.row() < width && self.col() < width);
        self.row() * width + self.col()
    }

    /// The orthogonal neighbors of this coordinate that lie within a square of the given width
    pub fn neighbors(self, width: usize) -> impl Iterator<Item = Coord> {
        let (row, col) = (self.row(), self.col());
        let up = row.checked_sub(1).map(|r| Coord::new(r, col));
        let down = Some(row + 1)
            .filter(|&r| r < width)
            .map(|r| Coord::new(r, col));
        let left = col.checked_sub(1).map(|c| Coord::new(row, c));
        let right = Some(col + 1)
            .filter(|&c| c < width)
            .map(|c| Coord::new(row, c));
        up.into_iter().chain(down).chain(left).chain(right)
    }
}

impl Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row(), self.col())
    }
}
