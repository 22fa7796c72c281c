//! Runs every experiment in turn.

use anyhow::Result;

use super::{Session, birthday, diagnostic, dice, monty_hall};
use crate::output::OutputFormat;

pub fn run(session: &Session) -> Result<()> {
    let experiments: [fn(&Session) -> Result<()>; 4] =
        [birthday::run, dice::run, monty_hall::run, diagnostic::run];

    for (i, experiment) in experiments.iter().enumerate() {
        if i > 0 && session.format() == OutputFormat::Human {
            println!();
        }
        experiment(session)?;
    }

    Ok(())
}
