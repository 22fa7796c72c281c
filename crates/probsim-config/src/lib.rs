//! Configuration management for probsim
//!
//! Provides hierarchical configuration loading from multiple sources:
//! 1. CLI arguments (highest precedence, applied by the CLI)
//! 2. Environment variables (PROBSIM_* prefix, `__` between section and key)
//! 3. probsim.local.toml (gitignored, local overrides)
//! 4. probsim.toml (git-tracked, project config)
//! 5. ~/.config/probsim/config.toml (user defaults)
//! 6. Built-in defaults (lowest precedence)

use probsim::{Birthday, DiagnosticTest, ExecutionMode, SimError, SimRng, SimulationRunner};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::Path;

mod error;
mod loader;
mod paths;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use paths::Paths;

/// Largest seed a TOML file can hold (TOML integers are signed 64-bit).
pub const MAX_SEED: u64 = i64::MAX as u64;

/// Main probsim configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbsimConfig {
    pub run: RunConfig,
    pub birthday: BirthdayConfig,
    pub diagnostic: DiagnosticConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Trials per experiment.
    pub trials: u64,
    pub mode: RunMode,
    /// Worker threads for parallel modes; defaults to available parallelism.
    pub workers: Option<usize>,
    /// Fixed seed for reproducible runs; entropy when absent.
    pub seed: Option<u64>,
    /// How many independent estimates to produce per experiment.
    pub repeat: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            trials: 1_000_000,
            mode: RunMode::Sequential,
            workers: None,
            seed: None,
            repeat: 1,
        }
    }
}

impl RunConfig {
    /// Worker count, falling back to the machine's available parallelism.
    pub fn effective_workers(&self) -> usize {
        self.workers.unwrap_or_else(|| {
            std::thread::available_parallelism().map_or(1, NonZeroUsize::get)
        })
    }

    /// Execution mode for the simulation runner.
    pub fn execution_mode(&self) -> ExecutionMode {
        let workers = self.effective_workers();
        match self.mode {
            RunMode::Sequential => ExecutionMode::Sequential,
            RunMode::Forked => ExecutionMode::Forked { workers },
            RunMode::Shared => ExecutionMode::Shared { workers },
        }
    }

    /// Builds a runner with this trial count and mode.
    pub fn runner(&self) -> Result<SimulationRunner, SimError> {
        Ok(SimulationRunner::new(self.trials)?.with_mode(self.execution_mode()))
    }

    /// Configured seed, or a fresh one drawn from OS entropy.
    ///
    /// Entropy seeds stay within [`MAX_SEED`] so they can be written back to
    /// `probsim.toml` and replayed.
    pub fn resolved_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| SimRng::from_entropy().next_u64() & MAX_SEED)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum RunMode {
    Sequential,
    Forked,
    Shared,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BirthdayConfig {
    pub group_size: u64,
    pub days_in_year: u64,
}

impl Default for BirthdayConfig {
    fn default() -> Self {
        Self {
            group_size: 23,
            days_in_year: probsim::trials::DAYS_IN_YEAR,
        }
    }
}

impl BirthdayConfig {
    pub fn trial(&self) -> Result<Birthday, SimError> {
        Birthday::with_days_in_year(self.group_size, self.days_in_year)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticConfig {
    pub prevalence_one_in: u64,
    pub false_positive_one_in: u64,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        Self {
            prevalence_one_in: probsim::trials::DEFAULT_PREVALENCE_ONE_IN,
            false_positive_one_in: probsim::trials::DEFAULT_FALSE_POSITIVE_ONE_IN,
        }
    }
}

impl DiagnosticConfig {
    pub fn trial(&self) -> Result<DiagnosticTest, SimError> {
        DiagnosticTest::new(self.prevalence_one_in, self.false_positive_one_in)
    }
}

impl ProbsimConfig {
    /// Load configuration from default locations
    pub fn load() -> anyhow::Result<Self> {
        ConfigLoader::new().load_validated()
    }

    /// Load configuration from specific project directory
    pub fn load_from_dir(project_dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        ConfigLoader::new()
            .with_project_dir(project_dir)
            .load_validated()
    }

    /// Small, seeded run for smoke checks
    pub fn quick() -> Self {
        Self {
            run: RunConfig {
                trials: 10_000,
                seed: Some(0),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Large run spread over every core
    pub fn precise() -> Self {
        Self {
            run: RunConfig {
                trials: 10_000_000,
                mode: RunMode::Forked,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Rejects values the simulation core would refuse
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("run.trials", self.run.trials),
            ("run.repeat", u64::from(self.run.repeat)),
            ("run.workers", self.run.workers.map_or(1, |w| w as u64)),
            ("birthday.group_size", self.birthday.group_size),
            ("birthday.days_in_year", self.birthday.days_in_year),
            ("diagnostic.prevalence_one_in", self.diagnostic.prevalence_one_in),
            (
                "diagnostic.false_positive_one_in",
                self.diagnostic.false_positive_one_in,
            ),
        ];

        if let Some((key, _)) = checks.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::ValidationError(format!(
                "{key} must be positive"
            )));
        }

        match self.run.seed {
            Some(seed) if seed > MAX_SEED => Err(ConfigError::ValidationError(format!(
                "run.seed must be at most {MAX_SEED}"
            ))),
            _ => Ok(()),
        }
    }

    /// Render as TOML, as written to probsim.toml
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
