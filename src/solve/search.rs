use super::Removal;
use crate::grid::{Cell, Grid};

/// Depth-first search over removal orders. Cells are cleared before each recursive call and
/// restored when it fails, so `grid` is unchanged whenever this returns false.
///
/// Only blocked cells obstruct a line, and removing a pair never blocks a cell, so removals are
/// independent of each other. Any solution can be reordered to first remove the pair holding the
/// first cell of the lowest remaining value, so each depth only branches on that cell's partner.
pub(crate) fn search_removals(grid: &mut Grid, removals: &mut Vec<Removal>) -> bool {
    let pairs = grid.pairs();
    let (&value, coords) = match pairs.iter().next() {
        None => return true,
        Some(entry) => entry,
    };
    trace!("Searching (depth={}, value={})", removals.len(), value);
    let a = coords[0];
    for &b in &coords[1..] {
        if !grid.connects(a, b) {
            continue;
        }
        grid[a] = Cell::Empty;
        grid[b] = Cell::Empty;
        removals.push(Removal {
            value,
            cells: [a, b],
        });
        if search_removals(grid, removals) {
            return true;
        }
        removals.pop();
        grid[a] = Cell::Valued(value);
        grid[b] = Cell::Valued(value);
    }
    false
}
