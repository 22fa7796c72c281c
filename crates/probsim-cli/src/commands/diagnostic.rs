//! Diagnostic-test precision command.

use anyhow::{Context, Result};
use probsim::experiments::diagnostic_precision;
use serde_json::json;

use super::Session;
use crate::output::{self, OutputFormat};

pub fn run(session: &Session) -> Result<()> {
    let config = &session.config().diagnostic;
    let test = config.trial()?;
    let runner = session.runner()?;
    let mut rng = session.rng();

    let estimates = (0..session.repeat())
        .map(|_| diagnostic_precision(&runner, &test, &mut rng))
        .collect::<Result<Vec<_>, _>>()
        .context("Try a larger --trials value")?;

    match session.format() {
        OutputFormat::Json => output::print_json(&json!({
            "experiment": "diagnostic",
            "run": session.metadata(),
            "prevalence_one_in": config.prevalence_one_in,
            "false_positive_one_in": config.false_positive_one_in,
            "estimates": estimates,
        })),
        OutputFormat::Human => {
            println!(
                "{}",
                session.describe(&format!(
                    "Diagnostic test: 1 in {} sick, 1 in {} false positives",
                    config.prevalence_one_in, config.false_positive_one_in
                ))
            );
            for estimate in &estimates {
                println!(
                    "  P(sick | diagnosed) = {}  [{} sick / {} diagnosed]",
                    output::format_estimate(&estimate.precision),
                    estimate.num_sick,
                    estimate.num_diagnosed
                );
            }
            Ok(())
        }
    }
}
