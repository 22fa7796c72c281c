//! Monty Hall command.

use anyhow::Result;
use probsim::experiments::monty_hall;
use serde_json::json;

use super::Session;
use crate::output::{self, OutputFormat};

pub fn run(session: &Session) -> Result<()> {
    let runner = session.runner()?;
    let mut rng = session.rng();

    let estimates = (0..session.repeat())
        .map(|_| monty_hall(&runner, &mut rng))
        .collect::<Result<Vec<_>, _>>()?;

    match session.format() {
        OutputFormat::Json => output::print_json(&json!({
            "experiment": "monty_hall",
            "run": session.metadata(),
            "estimates": estimates,
        })),
        OutputFormat::Human => {
            println!("{}", session.describe("Monty Hall"));
            for estimate in &estimates {
                println!("  stay:   {}", output::format_estimate(&estimate.stay));
                println!("  switch: {}", output::format_estimate(&estimate.switch));
            }
            Ok(())
        }
    }
}
