//! CLI command implementations.

pub mod all;
pub mod birthday;
pub mod config;
pub mod diagnostic;
pub mod dice;
pub mod monty_hall;

use anyhow::Result;
use probsim::{SimRng, SimulationRunner};
use probsim_config::ProbsimConfig;
use serde_json::json;

use crate::output::OutputFormat;

/// Effective configuration plus the seed every experiment in this process
/// starts from.
pub struct Session {
    config: ProbsimConfig,
    format: OutputFormat,
    seed: u64,
}

impl Session {
    pub fn new(config: ProbsimConfig, format: OutputFormat) -> Self {
        let seed = config.run.resolved_seed();
        Self {
            config,
            format,
            seed,
        }
    }

    pub fn config(&self) -> &ProbsimConfig {
        &self.config
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Fresh source for one experiment; every experiment replays from the
    /// session seed.
    pub fn rng(&self) -> SimRng {
        SimRng::new(self.seed)
    }

    pub fn runner(&self) -> Result<SimulationRunner> {
        let runner = self.config.run.runner()?;
        tracing::info!(
            seed = self.seed,
            trials = runner.num_trials(),
            mode = ?runner.mode(),
            repeat = self.config.run.repeat,
            "running experiment"
        );
        Ok(runner)
    }

    pub fn repeat(&self) -> u32 {
        self.config.run.repeat
    }

    /// Header line shared by every human-readable report.
    pub fn describe(&self, title: &str) -> String {
        format!(
            "{title} ({} trials, seed {})",
            self.config.run.trials, self.seed
        )
    }

    /// Run metadata embedded in every JSON report.
    pub fn metadata(&self) -> serde_json::Value {
        json!({
            "trials": self.config.run.trials,
            "seed": self.seed,
            "mode": self.config.run.mode,
            "repeat": self.config.run.repeat,
        })
    }
}
