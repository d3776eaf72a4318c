use rand::seq::SliceRandom;
use rand::Rng;

use crate::collections::square::Coord;
use crate::grid::{Cell, Grid, Value};

/// Places up to `desired_count` pairs of values into `available` cells.
///
/// Each pair is checked for connectivity against the grid as it is when the pair is placed.
/// Earlier pairs are never re-validated; the solver decides whether the grid is solvable.
/// Returns the number of pairs placed, which may be less than requested when the first cell of a
/// pair has no connectable partner.
pub fn place_pairs(
    grid: &mut Grid,
    available: &mut Vec<Coord>,
    value_pool: &[Value],
    desired_count: usize,
    rng: &mut impl Rng,
) -> usize {
    let target = desired_count.min(available.len() / 2);
    let mut placed = 0;
    for _ in 0..target {
        if available.len() < 2 {
            break;
        }
        let value = match value_pool.choose(rng) {
            Some(&value) => value,
            None => break,
        };
        let first = available.remove(rng.gen_range(0, available.len()));
        grid[first] = Cell::Valued(value);
        let candidates: Vec<usize> = available
            .iter()
            .enumerate()
            .filter(|&(_, &coord)| grid.connects(first, coord))
            .map(|(i, _)| i)
            .collect();
        match candidates.choose(rng) {
            Some(&i) => {
                let second = available.remove(i);
                grid[second] = Cell::Valued(value);
                trace!("Pair of {} at {:?} and {:?}", value, first, second);
                placed += 1;
            }
            None => {
                trace!("No partner for {} at {:?}", value, first);
                grid[first] = Cell::Empty;
                available.push(first);
            }
        }
    }
    if placed < desired_count {
        debug!("Placed {} of {} pairs", placed, desired_count);
    }
    placed
}
