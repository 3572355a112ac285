use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use rmi_core::{EstimatorKind, LearnedIndex};
use rmi_runner::{load_config, read_keys, sample_queries, BenchReport, DEFAULT_INDEX_PATH};
use strum_macros::AsRefStr;

#[derive(Parser)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Create(CreateArgs),
    Search(SearchArgs),
    Bench(BenchArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Estimator {
    Linear,
    PiecewiseLinear,
}

impl From<Estimator> for EstimatorKind {
    fn from(estimator: Estimator) -> Self {
        match estimator {
            Estimator::Linear => EstimatorKind::Linear,
            Estimator::PiecewiseLinear => EstimatorKind::PiecewiseLinear,
        }
    }
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[arg(long, help = "File with one numeric key per line.")]
    pub keys: PathBuf,

    #[arg(long, help = "Where to write the index.", default_value = DEFAULT_INDEX_PATH)]
    pub index: PathBuf,

    #[arg(long, help = "JSON index configuration.")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Model to fit, overriding the configuration.")]
    pub estimator: Option<Estimator>,

    #[arg(long, help = "Piecewise segment count, overriding the configuration.")]
    pub segments: Option<usize>,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    #[arg(long, help = "Index to search.", default_value = DEFAULT_INDEX_PATH)]
    pub index: PathBuf,

    #[arg(allow_negative_numbers = true)]
    pub key: f64,
}

#[derive(Args, Debug)]
pub struct BenchArgs {
    #[arg(long, help = "Index to benchmark.", default_value = DEFAULT_INDEX_PATH)]
    pub index: PathBuf,

    #[arg(long, help = "Number of random lookups.", default_value_t = 100_000)]
    pub queries: usize,

    #[arg(long, help = "Print the report as JSON.")]
    pub json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match &cli.command {
        Commands::Create(args) => {
            let mut config = load_config(args.config.as_deref())?;
            if let Some(estimator) = args.estimator {
                log::debug!("estimator set to {}", estimator.as_ref());
                config.estimator = estimator.into();
            }
            if let Some(segments) = args.segments {
                config.segments = segments;
            }

            let keys = read_keys(&args.keys)?;
            let idx = LearnedIndex::build_with(&keys, &config);
            idx.save(&args.index)?;

            let bounds = idx.bounds();
            log::info!(
                "indexed {} keys into {}, error bounds [{}, {}]",
                idx.len(),
                args.index.display(),
                bounds.min,
                bounds.max
            );
        }
        Commands::Search(args) => {
            let idx = LearnedIndex::open(&args.index)?;
            match idx.lookup(args.key) {
                Ok(offsets) => {
                    for offset in offsets {
                        println!("{offset}");
                    }
                }
                Err(err) if err.is_not_found() => {
                    eprintln!("{err}");
                    std::process::exit(1);
                }
                Err(err) => return Err(err.into()),
            }
        }
        Commands::Bench(args) => {
            let idx = LearnedIndex::open(&args.index)?;
            let queries = sample_queries(&idx, args.queries, &mut rand::thread_rng());

            let report = BenchReport::run(&idx, &queries);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{report}");
            }
        }
    }

    Ok(())
}
