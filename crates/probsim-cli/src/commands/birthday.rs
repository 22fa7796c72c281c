//! Birthday problem command.

use anyhow::Result;
use probsim::Estimate;
use probsim::experiments::birthday_collision;
use serde_json::json;

use super::Session;
use crate::output::{self, OutputFormat};

pub fn run(session: &Session) -> Result<()> {
    let config = &session.config().birthday;
    let trial = config.trial()?;
    let runner = session.runner()?;
    let mut rng = session.rng();

    let estimates = (0..session.repeat())
        .map(|_| birthday_collision(&runner, &trial, &mut rng))
        .collect::<Result<Vec<Estimate>, _>>()?;

    match session.format() {
        OutputFormat::Json => output::print_json(&json!({
            "experiment": "birthday",
            "run": session.metadata(),
            "group_size": config.group_size,
            "days_in_year": config.days_in_year,
            "estimates": estimates,
        })),
        OutputFormat::Human => {
            println!(
                "{}",
                session.describe(&format!(
                    "Birthday problem: group of {}, {} days",
                    config.group_size, config.days_in_year
                ))
            );
            for estimate in &estimates {
                println!("  P(shared birthday) = {}", output::format_estimate(estimate));
            }
            Ok(())
        }
    }
}
