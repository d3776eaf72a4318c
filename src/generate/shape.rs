//! Playable region masks

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::collections::square::{Coord, Square};
use crate::error::UnknownShape;
use crate::grid::{GridSize, ShapeMask};

const NOISE_FILL_PROBABILITY: f64 = 0.45;
const NOISE_SMOOTHING_PASSES: usize = 3;
/// A cell survives smoothing with at least this many playable neighbors
const NOISE_NEIGHBOR_THRESHOLD: usize = 4;

/// A strategy for generating a `ShapeMask`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    /// Random cells smoothed by a cellular automaton
    Noise,
    /// Cells visited by a random walk from the center
    Walk,
    Diamond,
    Circle,
    /// A plus sign
    Cross,
}

impl Shape {
    pub const ALL: [Shape; 5] = [
        Shape::Noise,
        Shape::Walk,
        Shape::Diamond,
        Shape::Circle,
        Shape::Cross,
    ];

    pub fn random(rng: &mut impl Rng) -> Shape {
        Shape::ALL[rng.gen_range(0, Shape::ALL.len())]
    }

    pub fn name(self) -> &'static str {
        match self {
            Shape::Noise => "noise",
            Shape::Walk => "walk",
            Shape::Diamond => "diamond",
            Shape::Circle => "circle",
            Shape::Cross => "cross",
        }
    }

    pub fn mask(self, size: GridSize, rng: &mut impl Rng) -> ShapeMask {
        let size = size.get();
        match self {
            Shape::Noise => noise_mask(size, rng),
            Shape::Walk => random_walk_mask(size, rng),
            Shape::Diamond => diamond_mask(size),
            Shape::Circle => circle_mask(size),
            Shape::Cross => cross_mask(size),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Shape {
    type Err = UnknownShape;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Shape::ALL
            .iter()
            .copied()
            .find(|shape| shape.name() == s)
            .ok_or_else(|| UnknownShape(s.into()))
    }
}

/// Generates a mask with a randomly chosen shape
pub fn synthesize(size: GridSize, rng: &mut impl Rng) -> ShapeMask {
    let shape = Shape::random(rng);
    debug!("Shape: {}", shape);
    shape.mask(size, rng)
}

fn noise_mask(size: usize, rng: &mut impl Rng) -> ShapeMask {
    let mut mask = Square::from_fn(size, |_| rng.gen_bool(NOISE_FILL_PROBABILITY));
    for _ in 0..NOISE_SMOOTHING_PASSES {
        mask = smooth(&mask);
    }
    mask
}

/// One cellular automaton pass. Reads only from `mask`.
fn smooth(mask: &ShapeMask) -> ShapeMask {
    Square::from_fn(mask.width(), |coord| {
        playable_neighbors(mask, coord) >= NOISE_NEIGHBOR_THRESHOLD
    })
}

/// Counts playable cells among the 8 surrounding cells
fn playable_neighbors(mask: &ShapeMask, coord: Coord) -> usize {
    let width = mask.width();
    let rows = coord.row().saturating_sub(1)..=(coord.row() + 1).min(width - 1);
    rows.flat_map(|row| {
        let cols = coord.col().saturating_sub(1)..=(coord.col() + 1).min(width - 1);
        cols.map(move |col| Coord::new(row, col))
    })
    .filter(|&neighbor| neighbor != coord && mask[neighbor])
    .count()
}

fn random_walk_mask(size: usize, rng: &mut impl Rng) -> ShapeMask {
    const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
    let mut mask = Square::with_width_and_value(size, false);
    let max = size as isize - 1;
    let (mut row, mut col) = ((size / 2) as isize, (size / 2) as isize);
    mask[Coord::new(row as usize, col as usize)] = true;
    for _ in 0..size.pow(2) / 2 {
        let (d_row, d_col) = DIRECTIONS[rng.gen_range(0, DIRECTIONS.len())];
        row = (row + d_row).max(0).min(max);
        col = (col + d_col).max(0).min(max);
        mask[Coord::new(row as usize, col as usize)] = true;
    }
    mask
}

fn diamond_mask(size: usize) -> ShapeMask {
    let mid = size / 2;
    Square::from_fn(size, |coord| {
        distance(coord.row(), mid) + distance(coord.col(), mid) <= mid
    })
}

fn circle_mask(size: usize) -> ShapeMask {
    let mid = (size as f64 - 1.) / 2.;
    let radius = size as f64 / 2. - 0.5;
    Square::from_fn(size, |coord| {
        let (d_row, d_col) = (coord.row() as f64 - mid, coord.col() as f64 - mid);
        d_row.powi(2) + d_col.powi(2) <= radius.powi(2)
    })
}

fn cross_mask(size: usize) -> ShapeMask {
    let arm_thickness = (size / 5).max(1);
    let mid = size / 2;
    Square::from_fn(size, |coord| {
        distance(coord.row(), mid) <= arm_thickness || distance(coord.col(), mid) <= arm_thickness
    })
}

fn distance(a: usize, b: usize) -> usize {
    if a > b {
        a - b
    } else {
        b - a
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn mask_rows(mask: &ShapeMask) -> Vec<String> {
        mask.rows()
            .map(|row| row.iter().map(|&b| if b { '#' } else { '.' }).collect())
            .collect()
    }

    #[test]
    fn every_shape_is_square() {
        let mut rng = StdRng::seed_from_u64(7);
        for &size in &[2, 3, 5, 7, 8, 10] {
            for &shape in &Shape::ALL {
                for _ in 0..5 {
                    let mask = shape.mask(GridSize::new(size).unwrap(), &mut rng);
                    assert_eq!(size, mask.width(), "{}", shape);
                    assert_eq!(size.pow(2), mask.len(), "{}", shape);
                    assert_eq!(size, mask.rows().count(), "{}", shape);
                }
            }
        }
    }

    #[test]
    fn synthesize_is_square() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            assert_eq!(8, synthesize(GridSize::new(8).unwrap(), &mut rng).width());
        }
    }

    #[test]
    fn diamond() {
        let mask = diamond_mask(5);
        assert_eq!(
            vec!["..#..", ".###.", "#####", ".###.", "..#.."],
            mask_rows(&mask)
        );
    }

    #[test]
    fn circle() {
        assert_eq!(
            vec!["..#..", ".###.", "#####", ".###.", "..#.."],
            mask_rows(&circle_mask(5))
        );
        assert_eq!(
            vec!["........", "..####..", ".######.", ".######.", ".######.", ".######.", "..####..", "........"],
            mask_rows(&circle_mask(8))
        );
    }

    #[test]
    fn cross() {
        assert_eq!(
            vec![".###.", "#####", "#####", "#####", ".###."],
            mask_rows(&cross_mask(5))
        );
        assert_eq!(
            vec!["..###..", "..###..", "#######", "#######", "#######", "..###..", "..###.."],
            mask_rows(&cross_mask(7))
        );
    }

    #[test]
    fn random_walk_includes_center() {
        let mut rng = StdRng::seed_from_u64(3);
        for &size in &[5, 7, 8, 10] {
            let mask = random_walk_mask(size, &mut rng);
            assert!(mask[Coord::new(size / 2, size / 2)]);
            let visited = mask.iter().filter(|&&b| b).count();
            assert!(visited >= 1 && visited <= size.pow(2) / 2 + 1);
        }
    }

    #[test]
    fn smoothing_counts_moore_neighbors() {
        // the center is empty but has 4 playable neighbors
        let mut mask = Square::with_width_and_value(3, false);
        for &(row, col) in &[(0, 0), (0, 1), (0, 2), (1, 0)] {
            mask[Coord::new(row, col)] = true;
        }
        let smoothed = smooth(&mask);
        assert!(smoothed[Coord::new(1, 1)]);
        // corners have at most 3 neighbors and never survive
        assert!(!smoothed[Coord::new(0, 0)]);
        assert!(!smoothed[Coord::new(2, 2)]);
    }

    #[test]
    fn smoothing_reads_previous_pass_only() {
        let mask = Square::from_fn(5, |coord| (coord.row() + coord.col()) % 2 == 0);
        let smoothed = smooth(&mask);
        for (coord, &cell) in smoothed.iter_coord() {
            assert_eq!(playable_neighbors(&mask, coord) >= 4, cell, "{:?}", coord);
        }
        assert_eq!(smoothed, smooth(&mask));
    }

    #[test]
    fn full_mask_keeps_interior_after_smoothing() {
        let mask = Square::with_width_and_value(4, true);
        let smoothed = smooth(&mask);
        // corners have 3 neighbors, edges 5, interior 8
        assert_eq!(vec![".##.", "####", "####", ".##."], mask_rows(&smoothed));
    }

    #[test]
    fn parse_shape() {
        for &shape in &Shape::ALL {
            assert_eq!(shape, shape.name().parse().unwrap());
        }
        assert!("square".parse::<Shape>().is_err());
    }
}
