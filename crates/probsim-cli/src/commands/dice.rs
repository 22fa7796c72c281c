//! Two-dice distribution command.

use anyhow::Result;
use probsim::experiments::dice_distribution;
use serde_json::json;

use super::Session;
use crate::output::{self, OutputFormat};

pub fn run(session: &Session) -> Result<()> {
    let runner = session.runner()?;
    let mut rng = session.rng();

    let distributions = (0..session.repeat())
        .map(|_| dice_distribution(&runner, &mut rng))
        .collect::<Result<Vec<_>, _>>()?;

    match session.format() {
        OutputFormat::Json => output::print_json(&json!({
            "experiment": "dice",
            "run": session.metadata(),
            "distributions": distributions,
        })),
        OutputFormat::Human => {
            println!("{}", session.describe("Sum of two dice"));
            for distribution in &distributions {
                let rows: Vec<_> = distribution
                    .iter()
                    .map(|(sum, estimate)| (sum.to_string(), *estimate))
                    .collect();
                println!("{}", output::estimate_table("Sum", &rows));
            }
            Ok(())
        }
    }
}
