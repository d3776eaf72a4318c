//! Pair-matching puzzle grids

use std::collections::BTreeMap;
use std::fmt;
use std::fmt::Display;
use std::ops::{Index, IndexMut};

use itertools::Itertools;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::collections::square::{Coord, Square};
use crate::error::{ParseGridError, UnsupportedSize};

mod connect;

/// The number on a valued cell
pub type Value = u32;

/// Playable region of a grid before obstacles are added. `true` is playable.
pub type ShapeMask = Square<bool>;

/// Coordinates of every valued cell, grouped by value
pub type PairAssignment = BTreeMap<Value, Vec<Coord>>;

/// The smallest grid that can hold a pair
pub const MIN_SIZE: usize = 2;

pub const EMPTY_TOKEN: &str = "";
pub const BLOCKED_TOKEN: &str = "X";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    /// Playable and unoccupied
    Empty,
    /// Outside of the shape or an obstacle
    Blocked,
    Valued(Value),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    pub fn is_blocked(self) -> bool {
        self == Cell::Blocked
    }

    pub fn value(self) -> Option<Value> {
        match self {
            Cell::Valued(value) => Some(value),
            _ => None,
        }
    }

    /// The string stored for this cell in a level file
    pub fn token(self) -> String {
        match self {
            Cell::Empty => EMPTY_TOKEN.to_string(),
            Cell::Blocked => BLOCKED_TOKEN.to_string(),
            Cell::Valued(value) => value.to_string(),
        }
    }

    pub fn from_token(token: &str) -> Option<Cell> {
        match token {
            EMPTY_TOKEN => Some(Cell::Empty),
            BLOCKED_TOKEN => Some(Cell::Blocked),
            _ => match token.parse::<Value>() {
                Ok(value) if value > 0 => Some(Cell::Valued(value)),
                _ => None,
            },
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Empty
    }
}

/// The width (and height) of a grid, at least [MIN_SIZE]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct GridSize(pub(crate) usize);

impl GridSize {
    pub fn new(size: usize) -> Result<Self, UnsupportedSize> {
        if size < MIN_SIZE {
            return Err(UnsupportedSize { size });
        }
        Ok(Self(size))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl From<GridSize> for usize {
    fn from(size: GridSize) -> Self {
        size.0
    }
}

/// A square puzzle grid
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    cells: Square<Cell>,
}

impl Grid {
    /// Creates a grid where cells outside of the mask are blocked and all others are empty
    pub fn from_mask(mask: &ShapeMask) -> Self {
        let cells = mask.map(|&playable| if playable { Cell::Empty } else { Cell::Blocked });
        Self { cells }
    }

    /// A trivially solvable grid: everything blocked except one pair of 2s in the top-left corner
    pub fn fallback(size: GridSize) -> Self {
        let mut cells = Square::with_width_and_value(size.get(), Cell::Blocked);
        cells[Coord::new(0, 0)] = Cell::Valued(2);
        cells[Coord::new(0, 1)] = Cell::Valued(2);
        Self { cells }
    }

    pub fn size(&self) -> usize {
        self.cells.width()
    }

    pub fn cells(&self) -> &Square<Cell> {
        &self.cells
    }

    /// All empty cells in row-major order
    pub fn empty_cells(&self) -> Vec<Coord> {
        self.cells
            .iter_coord()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(coord, _)| coord)
            .collect()
    }

    pub fn valued_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.value().is_some()).count()
    }

    /// Groups the coordinates of every valued cell by value
    pub fn pairs(&self) -> PairAssignment {
        let mut pairs = PairAssignment::new();
        for (coord, cell) in self.cells.iter_coord() {
            if let Some(value) = cell.value() {
                pairs.entry(value).or_insert_with(Vec::new).push(coord);
            }
        }
        pairs
    }

    pub fn token_rows(&self) -> Vec<Vec<String>> {
        self.cells
            .rows()
            .map(|row| row.iter().map(|cell| cell.token()).collect())
            .collect()
    }

    pub fn from_token_rows<S: AsRef<str>>(rows: &[Vec<S>]) -> Result<Self, ParseGridError> {
        let size = GridSize::new(rows.len())?.get();
        let mut elements = Vec::with_capacity(size.pow(2));
        for (i, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(ParseGridError::NonSquare {
                    rows: size,
                    row: i,
                    len: row.len(),
                });
            }
            for (j, token) in row.iter().enumerate() {
                let token = token.as_ref();
                let cell = Cell::from_token(token).ok_or_else(|| ParseGridError::InvalidToken {
                    token: token.to_string(),
                    row: i,
                    col: j,
                })?;
                elements.push(cell);
            }
        }
        Ok(Self {
            cells: Square::from_elements(size, elements),
        })
    }
}

impl Index<Coord> for Grid {
    type Output = Cell;

    fn index(&self, coord: Coord) -> &Self::Output {
        &self.cells[coord]
    }
}

impl IndexMut<Coord> for Grid {
    fn index_mut(&mut self, coord: Coord) -> &mut Self::Output {
        &mut self.cells[coord]
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let len = self
            .cells
            .iter()
            .filter_map(|cell| cell.value())
            .max()
            .map_or(1, |max| max.to_string().len());
        for row in self.cells.rows() {
            let line = row
                .iter()
                .map(|cell| {
                    let token = match cell {
                        Cell::Empty => ".".to_string(),
                        cell => cell.token(),
                    };
                    format!("{:>1$}", token, len)
                })
                .join(" ");
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

impl Serialize for Grid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.token_rows())
    }
}

impl<'de> Deserialize<'de> for Grid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rows = Vec::<Vec<String>>::deserialize(deserializer)?;
        Grid::from_token_rows(&rows).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn fallback_grid() {
        let grid = Grid::fallback(GridSize::new(3).unwrap());
        assert_eq!(
            rows(&[&["2", "2", "X"], &["X", "X", "X"], &["X", "X", "X"]]),
            grid.token_rows()
        );
    }

    #[test]
    fn size_too_small() {
        assert_eq!(Err(UnsupportedSize { size: 1 }), GridSize::new(1));
        assert_eq!(Err(UnsupportedSize { size: 0 }), GridSize::new(0));
    }

    #[test]
    fn from_mask() {
        let mask = Square::from_fn(2, |coord| coord.row() == coord.col());
        let grid = Grid::from_mask(&mask);
        assert_eq!(rows(&[&["", "X"], &["X", ""]]), grid.token_rows());
        assert_eq!(vec![Coord::new(0, 0), Coord::new(1, 1)], grid.empty_cells());
    }

    #[test]
    fn pairs_are_grouped_by_value() {
        let grid =
            Grid::from_token_rows(&rows(&[&["4", "2", ""], &["X", "2", "4"], &["4", "", "4"]]))
                .unwrap();
        let pairs = grid.pairs();
        assert_eq!(vec![2, 4], pairs.keys().copied().collect::<Vec<_>>());
        assert_eq!(vec![Coord::new(0, 1), Coord::new(1, 1)], pairs[&2]);
        assert_eq!(4, pairs[&4].len());
        assert_eq!(6, grid.valued_count());
    }

    #[test]
    fn token_rows_round_trip() {
        let tokens = rows(&[&["16", "", "X"], &["X", "16", ""], &["", "", ""]]);
        let grid = Grid::from_token_rows(&tokens).unwrap();
        assert_eq!(Cell::Valued(16), grid[Coord::new(0, 0)]);
        assert_eq!(tokens, grid.token_rows());
    }

    #[test]
    fn ragged_rows() {
        let result = Grid::from_token_rows(&rows(&[&["", ""], &[""]]));
        assert_eq!(
            Err(ParseGridError::NonSquare {
                rows: 2,
                row: 1,
                len: 1
            }),
            result
        );
    }

    #[test]
    fn invalid_tokens() {
        for token in &["0", "-2", "a", " "] {
            let result = Grid::from_token_rows(&rows(&[&["", ""], &["", *token]]));
            assert_eq!(
                Err(ParseGridError::InvalidToken {
                    token: token.to_string(),
                    row: 1,
                    col: 1
                }),
                result
            );
        }
    }

    #[test]
    fn serde_json_rows() {
        let grid = Grid::fallback(GridSize::new(2).unwrap());
        let json = serde_json::to_string(&grid).unwrap();
        assert_eq!(r#"[["2","2"],["X","X"]]"#, json);
        assert_eq!(grid, serde_json::from_str::<Grid>(&json).unwrap());
        assert!(serde_json::from_str::<Grid>(r#"[["2"]]"#).is_err());
    }

    #[test]
    fn display() {
        let grid = Grid::from_token_rows(&rows(&[&["16", ""], &["X", "16"]])).unwrap();
        assert_eq!("16  .\n X 16\n", grid.to_string());
    }
}
