#![warn(rust_2018_idioms)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unused_qualifications)]

use std::path::Path;

use anyhow::{bail, Context, Result};
use pairgrid::generate::{generate_level_with_config, Level};
use pairgrid::levels::{generate_levels, level_rng, BatchConfig, LevelSet};
use pairgrid::solve::{PairSolver, SolveResult};

use crate::options::{Options, Source};

mod options;

fn main() -> Result<()> {
    env_logger::init();
    let options = Options::from_args()?;
    match options.source() {
        Source::File(path) => {
            verify_file(path)?;
        }
        Source::Level(level) => {
            print_level(&options, *level);
        }
        Source::Generate(generate) => {
            let batch = options.batch(generate);
            generate_file(&batch, &generate.output_path)?;
        }
    }
    Ok(())
}

fn print_level(options: &Options, level: Level) {
    let mut rng = level_rng(options.seed(), level);
    let grid = generate_level_with_config(level, options.generator(), &mut rng);
    println!("Level {} ({}x{})", level, grid.size(), grid.size());
    print!("{}", grid);
    match PairSolver::new(&grid).solve() {
        SolveResult::Solved(removals) => {
            println!("Solved in {} removals", removals.len());
            for removal in removals {
                let [a, b] = removal.cells;
                println!(" {:>2}: {:?} - {:?}", removal.value, a, b);
            }
        }
        SolveResult::Unsolvable => println!("Level is not solvable"),
    }
}

fn generate_file(batch: &BatchConfig, path: &Path) -> Result<()> {
    println!("Generating {} levels", batch.count);
    let levels = generate_levels(batch)?;
    levels
        .save(path)
        .with_context(|| format!("Error saving levels to {}", path.display()))?;
    println!("Saved {} levels to {}", levels.len(), path.display());
    Ok(())
}

fn verify_file(path: &Path) -> Result<()> {
    println!("Reading levels from \"{}\"", path.display());
    let levels = LevelSet::from_file(path)
        .with_context(|| format!("Error reading levels from {}", path.display()))?;
    let unsolvable = levels.unsolvable_levels();
    if unsolvable.is_empty() {
        println!("All {} levels are solvable", levels.len());
        return Ok(());
    }
    for level in &unsolvable {
        println!("Level {} is not solvable", level);
    }
    bail!("{} of {} levels are not solvable", unsolvable.len(), levels.len())
}
