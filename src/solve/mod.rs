//! Decide whether every pair in a grid can be removed

use crate::collections::square::Coord;
use crate::grid::{Grid, Value};

use self::search::search_removals;

mod search;

/// Two connected cells with the same value, removed together
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Removal {
    pub value: Value,
    pub cells: [Coord; 2],
}

pub enum SolveResult {
    /// Some valued cells can never be removed
    Unsolvable,
    /// Every valued cell was removed in the given order
    Solved(Vec<Removal>),
}

impl SolveResult {
    pub fn is_solved(&self) -> bool {
        matches!(self, SolveResult::Solved(_))
    }

    pub fn solved(&self) -> Option<&[Removal]> {
        match self {
            SolveResult::Solved(removals) => Some(removals),
            SolveResult::Unsolvable => None,
        }
    }
}

pub struct PairSolver<'a> {
    grid: &'a Grid,
}

impl<'a> PairSolver<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self { grid }
    }

    /// Searches for an order of removals that clears every valued cell. The grid is not modified.
    pub fn solve(&self) -> SolveResult {
        let mut grid = self.grid.clone();
        let mut removals = Vec::with_capacity(grid.valued_count() / 2);
        if search_removals(&mut grid, &mut removals) {
            debug_assert_eq!(0, grid.valued_count());
            SolveResult::Solved(removals)
        } else {
            SolveResult::Unsolvable
        }
    }
}

/// Returns true if every valued cell in the grid can be removed
pub fn is_solvable(grid: &Grid) -> bool {
    PairSolver::new(grid).solve().is_solved()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;

    fn grid(rows: &[&[&str]]) -> Grid {
        let rows: Vec<Vec<&str>> = rows.iter().map(|row| row.to_vec()).collect();
        Grid::from_token_rows(&rows).unwrap()
    }

    #[test]
    fn no_values_is_solvable() {
        assert!(is_solvable(&grid(&[&["", "X"], &["X", ""]])));
        assert!(is_solvable(&grid(&[&["X", "X"], &["X", "X"]])));
    }

    #[test]
    fn adjacent_pair_is_solvable() {
        let grid = grid(&[&["2", "2", ""], &["", "", ""], &["", "", ""]]);
        let result = PairSolver::new(&grid).solve();
        assert_eq!(
            Some(
                &[Removal {
                    value: 2,
                    cells: [Coord::new(0, 0), Coord::new(0, 1)]
                }][..]
            ),
            result.solved()
        );
    }

    #[test]
    fn blocked_pair_is_unsolvable() {
        let grid = grid(&[&["2", "X", "2"], &["X", "X", "X"], &["X", "X", "X"]]);
        assert!(!is_solvable(&grid));
    }

    #[test]
    fn odd_count_is_unsolvable() {
        let grid = grid(&[&["2", "2", "2"], &["", "", ""], &["", "", ""]]);
        assert!(!is_solvable(&grid));
    }

    #[test]
    fn unmatched_value_is_unsolvable() {
        let grid = grid(&[&["2", "2", "4"], &["", "", ""], &["", "", "8"]]);
        assert!(!is_solvable(&grid));
    }

    #[test]
    fn backtracks_from_wrong_match() {
        // removing the first two 2s strands the others on a diagonal
        let grid = grid(&[&["2", "2", ""], &["2", "", ""], &["", "2", ""]]);
        let result = PairSolver::new(&grid).solve();
        let removals = result.solved().unwrap();
        assert_eq!(
            vec![
                [Coord::new(0, 0), Coord::new(1, 0)],
                [Coord::new(0, 1), Coord::new(2, 1)]
            ],
            removals.iter().map(|r| r.cells).collect::<Vec<_>>()
        );
    }

    #[test]
    fn valued_cells_between_do_not_obstruct() {
        let grid = grid(&[&["4", "2", "4"], &["X", "2", "X"], &["X", "X", "X"]]);
        assert!(is_solvable(&grid));
    }

    #[test]
    fn removal_order_is_valid() {
        let grid = grid(&[
            &["2", "8", "X", "4"],
            &["", "8", "", ""],
            &["2", "X", "16", "4"],
            &["", "", "16", ""],
        ]);
        let result = PairSolver::new(&grid).solve();
        let mut replay = grid.clone();
        for removal in result.solved().unwrap() {
            let [a, b] = removal.cells;
            assert!(replay.connects(a, b));
            assert_eq!(Cell::Valued(removal.value), replay[a]);
            assert_eq!(Cell::Valued(removal.value), replay[b]);
            replay[a] = Cell::Empty;
            replay[b] = Cell::Empty;
        }
        assert_eq!(0, replay.valued_count());
    }

    #[test]
    fn repeated_checks_agree() {
        let solvable = grid(&[&["2", "", "2"], &["4", "", "4"], &["", "X", ""]]);
        let unsolvable = grid(&[&["2", "X", "2"], &["4", "", "8"], &["", "", ""]]);
        for grid in &[solvable.clone(), unsolvable.clone()] {
            let before = grid.clone();
            let first = is_solvable(grid);
            assert_eq!(first, is_solvable(grid));
            assert_eq!(&before, grid);
        }
        assert!(is_solvable(&solvable));
        assert!(!is_solvable(&unsolvable));
    }
}
