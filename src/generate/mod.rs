//! Generate solvable levels

pub use self::obstacle::place_obstacles;
pub use self::pairs::place_pairs;
pub use self::shape::{synthesize, Shape};

use rand::Rng;

use crate::grid::{Grid, GridSize, Value};
use crate::solve::is_solvable;

mod obstacle;
mod pairs;
mod shape;

/// A level number, starting at 1. Higher levels get larger grids and more pairs.
pub type Level = u32;

pub const DEFAULT_MAX_TRIES: usize = 30;

#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    /// Number of candidate grids to try before giving up and using the fallback grid
    pub max_tries: usize,
    pub obstacle_clusters: usize,
    /// Maximum number of cells in each obstacle cluster
    pub obstacle_cluster_size: usize,
    /// Use this shape for every attempt instead of a random one
    pub shape: Option<Shape>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_tries: DEFAULT_MAX_TRIES,
            obstacle_clusters: 1,
            obstacle_cluster_size: 2,
            shape: None,
        }
    }
}

/// The outcome of generating candidate grids for a level
#[derive(Debug)]
pub enum Attempts {
    /// A solvable grid was found on the given attempt (starting at 1)
    Accepted { grid: Grid, attempt: usize },
    /// Every attempt failed
    Exhausted,
}

pub fn grid_size(level: Level) -> GridSize {
    let size = if level > 100 {
        10
    } else if level > 50 {
        8
    } else if level > 25 {
        7
    } else {
        5
    };
    GridSize(size)
}

/// The values that pairs may have at a level. Higher levels allow more values.
pub fn value_pool(level: Level) -> Vec<Value> {
    let mut values = vec![2, 4];
    for &(min_level, value) in &[(5, 8), (15, 16), (25, 32), (35, 64)] {
        if level > min_level {
            values.push(value);
        }
    }
    values
}

pub fn desired_pairs(level: Level) -> usize {
    level as usize / 3 + 2
}

/// Generates a solvable grid for a level, using the fallback grid if no attempt succeeds
pub fn generate_level(level: Level, max_tries: usize, rng: &mut impl Rng) -> Grid {
    let config = GeneratorConfig {
        max_tries,
        ..GeneratorConfig::default()
    };
    generate_level_with_config(level, &config, rng)
}

pub fn generate_level_with_config(
    level: Level,
    config: &GeneratorConfig,
    rng: &mut impl Rng,
) -> Grid {
    match attempt_level(level, config, rng, is_solvable) {
        Attempts::Accepted { grid, attempt } => {
            debug!("Level {} accepted on attempt {}", level, attempt);
            grid
        }
        Attempts::Exhausted => {
            debug!(
                "Level {} exhausted {} attempts, using fallback",
                level, config.max_tries
            );
            Grid::fallback(grid_size(level))
        }
    }
}

/// Generates candidate grids until one passes `verify`, up to `config.max_tries` times
pub fn attempt_level(
    level: Level,
    config: &GeneratorConfig,
    rng: &mut impl Rng,
    verify: impl Fn(&Grid) -> bool,
) -> Attempts {
    let size = grid_size(level);
    let values = value_pool(level);
    for attempt in 1..=config.max_tries {
        let grid = match generate_candidate(level, size, &values, config, rng) {
            Some(grid) => grid,
            None => {
                debug!("Level {} attempt {}: too few playable cells", level, attempt);
                continue;
            }
        };
        if verify(&grid) {
            return Attempts::Accepted { grid, attempt };
        }
        debug!("Level {} attempt {}: unsolvable", level, attempt);
    }
    Attempts::Exhausted
}

/// Builds one candidate grid, which may not be solvable. Returns `None` if the shape leaves
/// fewer than two playable cells.
fn generate_candidate(
    level: Level,
    size: GridSize,
    values: &[Value],
    config: &GeneratorConfig,
    rng: &mut impl Rng,
) -> Option<Grid> {
    let mask = match config.shape {
        Some(shape) => shape.mask(size, rng),
        None => synthesize(size, rng),
    };
    let mut grid = Grid::from_mask(&mask);
    let mut playable = grid.empty_cells();
    if playable.len() < 2 {
        return None;
    }
    place_obstacles(
        &mut grid,
        &mut playable,
        config.obstacle_clusters,
        config.obstacle_cluster_size,
        rng,
    );
    let mut available = grid.empty_cells();
    place_pairs(&mut grid, &mut available, values, desired_pairs(level), rng);
    Some(grid)
}
