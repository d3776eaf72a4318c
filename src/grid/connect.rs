use std::cmp;

use crate::collections::square::Coord;
use crate::grid::Grid;

impl Grid {
    /// Returns true if `a` and `b` share a row or column and no blocked cell lies strictly between
    /// them. Valued cells do not obstruct the line.
    pub fn connects(&self, a: Coord, b: Coord) -> bool {
        debug_assert_ne!(a, b);
        if a.row() == b.row() {
            let (start, end) = ordered(a.col(), b.col());
            (start + 1..end).all(|col| !self[Coord::new(a.row(), col)].is_blocked())
        } else if a.col() == b.col() {
            let (start, end) = ordered(a.row(), b.row());
            (start + 1..end).all(|row| !self[Coord::new(row, a.col())].is_blocked())
        } else {
            false
        }
    }
}

fn ordered(a: usize, b: usize) -> (usize, usize) {
    (cmp::min(a, b), cmp::max(a, b))
}
