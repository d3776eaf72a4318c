use std::collections::{HashSet, VecDeque};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::collections::square::Coord;
use crate::grid::{Cell, Grid};

/// Blocks small connected clusters of cells. Each cluster grows breadth-first from a random
/// playable cell. Blocked cells are removed from `playable`.
pub fn place_obstacles(
    grid: &mut Grid,
    playable: &mut Vec<Coord>,
    num_clusters: usize,
    cluster_size: usize,
    rng: &mut impl Rng,
) {
    for _ in 0..num_clusters {
        let seed = match playable.choose(rng) {
            Some(&seed) => seed,
            None => break,
        };
        let placed = place_cluster(grid, playable, seed, cluster_size);
        debug!("Placed {} obstacle(s) from {:?}", placed, seed);
    }
}

fn place_cluster(
    grid: &mut Grid,
    playable: &mut Vec<Coord>,
    seed: Coord,
    cluster_size: usize,
) -> usize {
    let size = grid.size();
    let mut queue = VecDeque::from(vec![seed]);
    let mut visited: HashSet<Coord> = vec![seed].into_iter().collect();
    let mut placed = 0;
    while placed < cluster_size {
        let coord = match queue.pop_front() {
            Some(coord) => coord,
            None => break,
        };
        if grid[coord].is_empty() {
            grid[coord] = Cell::Blocked;
            playable.retain(|&c| c != coord);
            placed += 1;
        }
        for neighbor in coord.neighbors(size) {
            if !visited.contains(&neighbor) && playable.contains(&neighbor) {
                visited.insert(neighbor);
                queue.push_back(neighbor);
            }
        }
    }
    placed
}
