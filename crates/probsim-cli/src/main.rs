//! probsim command-line interface.
//!
//! Estimates classical probabilities by simulation.
//!
//! # Quick Start
//!
//! ```bash
//! # Birthday problem for a group of 23, reproducible
//! probsim birthday --group-size 23 --seed 42
//!
//! # Dice distribution on every core
//! probsim dice --mode forked --trials 10000000
//!
//! # Every experiment, as JSON
//! probsim all --format json
//! ```

mod commands;
mod output;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use probsim_config::{ConfigLoader, ProbsimConfig, RunMode};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use crate::commands::Session;
use crate::output::OutputFormat;

/// probsim - Monte Carlo estimates of classical probability puzzles.
#[derive(Parser)]
#[command(name = "probsim")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(flatten)]
    run: RunArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Overrides applied on top of the loaded configuration.
#[derive(Args)]
struct RunArgs {
    /// Trials per experiment.
    #[arg(short = 'n', long, global = true)]
    trials: Option<u64>,

    /// Seed for reproducible runs (random when omitted).
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// How trials are spread across threads.
    #[arg(short, long, global = true, value_enum)]
    mode: Option<ModeArg>,

    /// Worker threads for forked/shared modes.
    #[arg(short, long, global = true)]
    workers: Option<usize>,

    /// Independent estimates to produce per experiment.
    #[arg(short, long, global = true)]
    repeat: Option<u32>,

    /// Output format.
    #[arg(short, long, global = true, value_enum, default_value = "human")]
    format: OutputFormat,

    /// Directory containing probsim.toml (defaults to the current directory).
    #[arg(long, global = true)]
    project_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Sequential,
    Forked,
    Shared,
}

impl From<ModeArg> for RunMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Sequential => RunMode::Sequential,
            ModeArg::Forked => RunMode::Forked,
            ModeArg::Shared => RunMode::Shared,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Chance that two people in a group share a birthday.
    Birthday {
        /// People per group.
        #[arg(short, long)]
        group_size: Option<u64>,

        /// Days in the year.
        #[arg(long)]
        days_in_year: Option<u64>,
    },

    /// Distribution of the sum of two dice.
    Dice,

    /// Win rates of staying versus switching doors.
    MontyHall,

    /// Fraction of positive diagnoses that are actually sick.
    Diagnostic {
        /// One person in this many is sick.
        #[arg(long)]
        prevalence: Option<u64>,

        /// One healthy person in this many tests positive.
        #[arg(long)]
        false_positive: Option<u64>,
    },

    /// Run every experiment.
    All,

    /// Show the effective configuration.
    Config,
}

fn main() -> Result<()> {
    // Initialize logging; stdout is reserved for results
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = load_config(&cli.run)?;
    apply_overrides(&mut config, &cli.run, &cli.command);
    config.validate().context("Invalid command-line arguments")?;

    let session = Session::new(config, cli.run.format);

    match cli.command {
        Commands::Birthday { .. } => commands::birthday::run(&session),
        Commands::Dice => commands::dice::run(&session),
        Commands::MontyHall => commands::monty_hall::run(&session),
        Commands::Diagnostic { .. } => commands::diagnostic::run(&session),
        Commands::All => commands::all::run(&session),
        Commands::Config => commands::config::show(&session),
    }
}

fn load_config(args: &RunArgs) -> Result<ProbsimConfig> {
    let mut loader = ConfigLoader::new();
    if let Some(dir) = &args.project_dir {
        loader = loader.with_project_dir(dir);
    }
    loader.load().context("Failed to load configuration")
}

fn apply_overrides(config: &mut ProbsimConfig, args: &RunArgs, command: &Commands) {
    if let Some(trials) = args.trials {
        config.run.trials = trials;
    }
    if let Some(seed) = args.seed {
        config.run.seed = Some(seed);
    }
    if let Some(mode) = args.mode {
        config.run.mode = mode.into();
    }
    if let Some(workers) = args.workers {
        config.run.workers = Some(workers);
    }
    if let Some(repeat) = args.repeat {
        config.run.repeat = repeat;
    }

    match command {
        Commands::Birthday {
            group_size,
            days_in_year,
        } => {
            if let Some(group_size) = group_size {
                config.birthday.group_size = *group_size;
            }
            if let Some(days_in_year) = days_in_year {
                config.birthday.days_in_year = *days_in_year;
            }
        }
        Commands::Diagnostic {
            prevalence,
            false_positive,
        } => {
            if let Some(prevalence) = prevalence {
                config.diagnostic.prevalence_one_in = *prevalence;
            }
            if let Some(false_positive) = false_positive {
                config.diagnostic.false_positive_one_in = *false_positive;
            }
        }
        _ => {}
    }
}
