//! Configuration display command.

use anyhow::Result;

use super::Session;
use crate::output::{self, OutputFormat};

/// Show the effective configuration after every source and flag is merged.
pub fn show(session: &Session) -> Result<()> {
    let config = session.config();

    match session.format() {
        OutputFormat::Json => output::print_json(&serde_json::to_value(config)?),
        OutputFormat::Human => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}
