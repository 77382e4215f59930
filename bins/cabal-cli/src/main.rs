//! cabal-cli — Command-line driver for the conspiracy exposure model.
//!
//! Runs the built-in scenarios from Grimes' paper, solves ad-hoc models, and
//! prints population and exposure curves. Results go to stdout, logs to stderr.

mod output;

use std::path::PathBuf;

use anyhow::{Context, Result};
use cabal_core::constants::{
    DEFAULT_ALPHA, DEFAULT_AVERAGE_AGE, DEFAULT_BETA, DEFAULT_LEAK_PROBABILITY,
    DEFAULT_MAX_HORIZON_YEARS, DEFAULT_PRECISION, DEFAULT_TARGET_PROBABILITY,
};
use cabal_core::error::ModelError;
use cabal_model::scenarios::{builtin_scenarios, load_scenarios, run_all};
use cabal_model::{ConspiracyModel, ModelConfig, SearchConfig};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{debug, info};

/// How long can a conspiracy stay secret?
#[derive(Parser)]
#[command(name = "cabal-cli")]
#[command(version, about = "Time until a conspiracy is exposed, after Grimes (2016).")]
struct Cli {
    /// Log level (trace, debug, info, warn, error). RUST_LOG takes precedence.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Log output format ("text" or "json").
    #[arg(long, global = true, default_value = "text")]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the built-in scenarios, or those in a JSON file.
    Scenarios(ScenariosArgs),
    /// Time until a single model reaches the target exposure.
    Solve(SolveArgs),
    /// Print population, leak and exposure probability over time.
    Curve(CurveArgs),
}

#[derive(Args)]
struct SearchArgs {
    /// Exposure probability to reach.
    #[arg(long, default_value_t = DEFAULT_TARGET_PROBABILITY)]
    target: f64,

    /// Decimal digits in comparisons and results.
    #[arg(long, default_value_t = DEFAULT_PRECISION)]
    precision: u32,

    /// Give up after this many simulated years.
    #[arg(long, default_value_t = DEFAULT_MAX_HORIZON_YEARS)]
    max_years: f64,
}

impl SearchArgs {
    fn to_config(&self) -> Result<SearchConfig> {
        let config = SearchConfig {
            target_probability: self.target,
            precision: self.precision,
            max_horizon_years: self.max_years,
        };
        config.validate().context("invalid search settings")?;
        Ok(config)
    }
}

#[derive(Args)]
struct ModelArgs {
    /// Conspirators at time zero.
    #[arg(short = 'n', long)]
    population: f64,

    /// Per-member, per-year leak probability.
    #[arg(long, default_value_t = DEFAULT_LEAK_PROBABILITY)]
    leak_probability: f64,

    /// Population decay ("constant" or "gompertzian").
    #[arg(long, default_value = "gompertzian")]
    decay: String,

    /// Gompertz alpha.
    #[arg(long, default_value_t = DEFAULT_ALPHA)]
    alpha: f64,

    /// Gompertz beta.
    #[arg(long, default_value_t = DEFAULT_BETA)]
    beta: f64,

    /// Average member age at formation, in years.
    #[arg(long, default_value_t = DEFAULT_AVERAGE_AGE)]
    average_age: f64,
}

impl ModelArgs {
    fn to_model(&self) -> Result<ConspiracyModel> {
        let config = ModelConfig {
            population: self.population,
            leak_probability: self.leak_probability,
            decay: self.decay.clone(),
            alpha: self.alpha,
            beta: self.beta,
            average_age: self.average_age,
        };
        ConspiracyModel::from_config(&config).context("invalid model parameters")
    }
}

#[derive(Args)]
struct ScenariosArgs {
    /// JSON file with an array of scenarios (default: built-in set).
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(flatten)]
    search: SearchArgs,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Args)]
struct SolveArgs {
    #[command(flatten)]
    model: ModelArgs,

    #[command(flatten)]
    search: SearchArgs,
}

#[derive(Args)]
struct CurveArgs {
    #[command(flatten)]
    model: ModelArgs,

    /// Last sampled year.
    #[arg(long, default_value_t = 50.0)]
    years: f64,

    /// Sampling interval in years.
    #[arg(long, default_value_t = 1.0)]
    step: f64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, &cli.log_format);

    match cli.command {
        Commands::Scenarios(args) => scenarios(args),
        Commands::Solve(args) => solve(args),
        Commands::Curve(args) => curve(args),
    }
}

fn scenarios(args: ScenariosArgs) -> Result<()> {
    let search = args.search.to_config()?;
    let specs = match &args.file {
        Some(path) => load_scenarios(path)
            .with_context(|| format!("loading scenarios from {}", path.display()))?,
        None => builtin_scenarios(),
    };
    info!(count = specs.len(), target = search.target_probability, "running scenarios");

    let outcomes = run_all(&specs, &search)?;
    match args.format {
        OutputFormat::Text => print!("{}", output::render_outcomes_text(&outcomes)),
        OutputFormat::Json => println!("{}", output::render_outcomes_json(&outcomes)?),
    }
    Ok(())
}

fn solve(args: SolveArgs) -> Result<()> {
    let model = args.model.to_model()?;
    let search = args.search.to_config()?;
    debug!(?model, "solving");

    let years = match model.time_to_target_with(&search) {
        Ok(years) => Some(years),
        Err(ModelError::UnreachableTarget { .. }) => None,
        Err(e) => return Err(e.into()),
    };
    println!("{}", output::format_years(years));
    Ok(())
}

fn curve(args: CurveArgs) -> Result<()> {
    let samples = output::curve_samples(args.years, args.step)?;
    let model = args.model.to_model()?;
    print!("{}", output::render_curve(&model, samples, args.step));
    Ok(())
}

/// Send logs to stderr so stdout carries only results and stays pipeable.
///
/// `RUST_LOG` overrides `--log-level`. `--log-format json` emits one JSON
/// object per event, e.g. the search's refinement and unreachable events.
fn init_logging(level_str: &str, format: &str) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_str));

    if format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .init();
    }
}
