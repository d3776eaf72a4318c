use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ArgMatches;
use pairgrid::generate::{GeneratorConfig, Level, Shape};
use pairgrid::levels::BatchConfig;

const DEFAULT_OUTPUT_PATH: &str = "levels.json";

#[derive(Clone)]
pub(crate) struct Options {
    source: Source,
    seed: Option<u64>,
    generator: GeneratorConfig,
}

impl Options {
    pub fn from_args() -> Result<Self> {
        Self::from_arg_matches(&clap_app().get_matches())
    }

    fn from_arg_matches(matches: &ArgMatches<'_>) -> Result<Self> {
        let source = if let Some(path) = matches.value_of("input") {
            Source::File(path.into())
        } else if let Some(level) = matches.value_of("level") {
            Source::Level(parse_arg(level, "level")?)
        } else {
            Source::Generate(Generate {
                count: matches
                    .value_of("count")
                    .map(|s| parse_arg(s, "count"))
                    .transpose()?,
                workers: matches
                    .value_of("jobs")
                    .map(|s| parse_arg(s, "jobs"))
                    .transpose()?,
                output_path: matches
                    .value_of("output_path")
                    .unwrap_or(DEFAULT_OUTPUT_PATH)
                    .into(),
            })
        };
        let mut generator = GeneratorConfig::default();
        if let Some(s) = matches.value_of("max_tries") {
            generator.max_tries = parse_arg(s, "max-tries")?;
        }
        if let Some(s) = matches.value_of("shape") {
            generator.shape = Some(s.parse::<Shape>()?);
        }
        Ok(Self {
            source,
            seed: matches
                .value_of("seed")
                .map(|s| parse_arg(s, "seed"))
                .transpose()?,
            generator,
        })
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn generator(&self) -> &GeneratorConfig {
        &self.generator
    }

    /// Settings for generating a set of levels
    pub fn batch(&self, generate: &Generate) -> BatchConfig {
        let mut config = BatchConfig {
            seed: self.seed,
            workers: generate.workers,
            generator: self.generator.clone(),
            ..BatchConfig::default()
        };
        if let Some(count) = generate.count {
            config.count = count;
        }
        config
    }
}

fn parse_arg<T>(s: &str, name: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    s.parse()
        .with_context(|| format!("invalid {}: \"{}\"", name, s))
}

#[derive(Clone)]
pub(crate) enum Source {
    /// Verify the levels in a file
    File(PathBuf),
    /// Generate and print a single level
    Level(Level),
    /// Generate a set of levels and save it
    Generate(Generate),
}

#[derive(Clone)]
pub(crate) struct Generate {
    pub count: Option<Level>,
    pub workers: Option<usize>,
    pub output_path: PathBuf,
}

fn clap_app() -> clap::App<'static, 'static> {
    use clap::{App, AppSettings, Arg, ArgGroup};

    App::new("pairgrid")
        .about("Generate solvable pair-matching puzzle levels")
        .setting(AppSettings::ArgRequiredElseHelp)
        .group(
            ArgGroup::with_name("source")
                .args(&["generate", "level", "input"])
                .required(true),
        )
        .arg(
            Arg::with_name("generate")
                .short("g")
                .long("generate")
                .help("generate a set of levels and save them")
                .display_order(1),
        )
        .arg(
            Arg::with_name("level")
                .short("l")
                .long("level")
                .takes_value(true)
                .value_name("LEVEL")
                .help("generate a single level and print it")
                .display_order(1),
        )
        .arg(
            Arg::with_name("input")
                .short("i")
                .long("input")
                .takes_value(true)
                .value_name("PATH")
                .help("verify that every level in a file is solvable")
                .display_order(1),
        )
        .arg(
            Arg::with_name("count")
                .short("c")
                .long("count")
                .takes_value(true)
                .requires("generate")
                .help("the number of levels to generate (default 100)"),
        )
        .arg(
            Arg::with_name("output_path")
                .short("o")
                .long("output")
                .takes_value(true)
                .value_name("PATH")
                .requires("generate")
                .help("file to save generated levels to (default levels.json)"),
        )
        .arg(
            Arg::with_name("jobs")
                .short("j")
                .long("jobs")
                .takes_value(true)
                .requires("generate")
                .help("number of worker threads (default: number of CPUs)"),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .takes_value(true)
                .conflicts_with("input")
                .help("seed the random generator for reproducible levels"),
        )
        .arg(
            Arg::with_name("max_tries")
                .long("max-tries")
                .takes_value(true)
                .conflicts_with("input")
                .help("candidate grids to try per level before using the fallback grid"),
        )
        .arg(
            Arg::with_name("shape")
                .long("shape")
                .takes_value(true)
                .possible_values(&["noise", "walk", "diamond", "circle", "cross"])
                .conflicts_with("input")
                .help("use one shape for every level instead of a random one"),
        )
}
