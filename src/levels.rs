//! Generate, save and load sets of levels

use std::collections::BTreeMap;
use std::fs::File;
use std::io;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::LevelsFromFileError;
use crate::generate::{generate_level_with_config, GeneratorConfig, Level};
use crate::grid::Grid;
use crate::solve::is_solvable;

pub const DEFAULT_LEVEL_COUNT: Level = 100;

#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Levels 1 through `count` are generated
    pub count: Level,
    /// Makes generation reproducible. Each level's generator is seeded from this and the level.
    pub seed: Option<u64>,
    /// Number of worker threads. Defaults to the number of CPUs.
    pub workers: Option<usize>,
    pub generator: GeneratorConfig,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_LEVEL_COUNT,
            seed: None,
            workers: None,
            generator: GeneratorConfig::default(),
        }
    }
}

/// Grids keyed by level
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelSet {
    levels: BTreeMap<Level, Grid>,
}

impl LevelSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, level: Level, grid: Grid) -> Option<Grid> {
        self.levels.insert(level, grid)
    }

    pub fn get(&self, level: Level) -> Option<&Grid> {
        self.levels.get(&level)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Iterates over levels in ascending order
    pub fn iter(&self) -> impl Iterator<Item = (Level, &Grid)> {
        self.levels.iter().map(|(&level, grid)| (level, grid))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LevelsFromFileError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, LevelsFromFileError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_json(&mut writer)?;
        writer.flush()
    }

    /// Writes the levels as a JSON object with one grid row per line
    pub fn write_json(&self, writer: &mut impl Write) -> io::Result<()> {
        if self.levels.is_empty() {
            return writeln!(writer, "{{}}");
        }
        writeln!(writer, "{{")?;
        for (i, (level, grid)) in self.iter().enumerate() {
            if i > 0 {
                writeln!(writer, ",")?;
            }
            writeln!(writer, "  \"{}\": [", level)?;
            for (j, row) in grid.token_rows().iter().enumerate() {
                if j > 0 {
                    writeln!(writer, ",")?;
                }
                write!(writer, "      ")?;
                serde_json::to_writer(&mut *writer, row)?;
            }
            write!(writer, "\n    ]")?;
        }
        writeln!(writer, "\n}}")
    }

    /// Levels whose grids cannot be cleared, in ascending order
    pub fn unsolvable_levels(&self) -> Vec<Level> {
        let mut levels: Vec<Level> = self
            .levels
            .par_iter()
            .filter(|(_, grid)| !is_solvable(grid))
            .map(|(&level, _)| level)
            .collect();
        levels.sort_unstable();
        levels
    }
}

/// Generates levels 1 through `config.count` in parallel
pub fn generate_levels(config: &BatchConfig) -> Result<LevelSet, rayon::ThreadPoolBuildError> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.workers.unwrap_or(0))
        .build()?;
    let total = config.count as usize;
    let completed = AtomicUsize::new(0);
    let start = Instant::now();
    let levels = pool.install(|| {
        (1..=config.count)
            .into_par_iter()
            .map(|level| {
                let mut rng = level_rng(config.seed, level);
                let grid = generate_level_with_config(level, &config.generator, &mut rng);
                let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                report_progress(done, total, start.elapsed());
                (level, grid)
            })
            .collect::<BTreeMap<_, _>>()
    });
    info!(
        "Generated {} levels in {:.1}s",
        total,
        start.elapsed().as_secs_f64()
    );
    Ok(LevelSet { levels })
}

/// A generator for one level, independent of every other level's generator
pub fn level_rng(seed: Option<u64>, level: Level) -> StdRng {
    match seed {
        Some(seed) => {
            StdRng::seed_from_u64(seed ^ u64::from(level).wrapping_mul(0x9E37_79B9_7F4A_7C15))
        }
        None => StdRng::from_entropy(),
    }
}

fn report_progress(done: usize, total: usize, elapsed: Duration) {
    let remaining = (total - done) as f64;
    let eta = Duration::from_secs_f64(elapsed.as_secs_f64() / done as f64 * remaining);
    info!(
        "Generating levels: {}/{} ({:.1}%) - ETA: {}",
        done,
        total,
        done as f64 / total as f64 * 100.,
        format_duration(eta)
    );
}

fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{}:{:02}:{:02}", secs / 3600, secs / 60 % 60, secs % 60)
}
