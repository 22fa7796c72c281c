//! Configuration loader with multi-source merging

use crate::{Paths, ProbsimConfig};
use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader with builder pattern
pub struct ConfigLoader {
    project_dir: PathBuf,
    env_prefix: String,
    include_user_config: bool,
}

impl ConfigLoader {
    /// Create a new config loader with default project directory (current dir)
    pub fn new() -> Self {
        Self {
            project_dir: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            env_prefix: "PROBSIM".to_string(),
            include_user_config: true,
        }
    }

    /// Set the project directory
    pub fn with_project_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.project_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Set the environment variable prefix (default: "PROBSIM")
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Skip ~/.config/probsim/config.toml
    pub fn without_user_config(mut self) -> Self {
        self.include_user_config = false;
        self
    }

    /// Load configuration from all sources with proper precedence.
    ///
    /// Not validated: callers layering their own overrides validate the
    /// final result.
    pub fn load(self) -> Result<ProbsimConfig> {
        let mut builder = config::Config::builder();

        // 1. Start with built-in defaults
        let defaults = ProbsimConfig::default();
        builder = builder.add_source(config::Config::try_from(&defaults)?);

        // 2. User config (~/.config/probsim/config.toml)
        if self.include_user_config {
            if let Ok(user_config_file) = Paths::new().user_config_file() {
                if user_config_file.exists() {
                    builder = builder.add_source(
                        config::File::from(user_config_file)
                            .required(false)
                            .format(config::FileFormat::Toml),
                    );
                }
            }
        }

        // 3. Project config (probsim.toml)
        let project_config_file = Paths::project_config_file(&self.project_dir);
        if project_config_file.exists() {
            builder = builder.add_source(
                config::File::from(project_config_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // 4. Local config (probsim.local.toml, gitignored)
        let local_config_file = Paths::local_config_file(&self.project_dir);
        if local_config_file.exists() {
            builder = builder.add_source(
                config::File::from(local_config_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // 5. Environment variables (PROBSIM_RUN__TRIALS, PROBSIM_BIRTHDAY__GROUP_SIZE)
        builder = builder.add_source(
            config::Environment::with_prefix(&self.env_prefix)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        // Build and deserialize
        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Load and validate; for callers with no overrides of their own
    pub fn load_validated(self) -> Result<ProbsimConfig> {
        let config = self.load()?;
        config
            .validate()
            .context("Configuration failed validation")?;
        Ok(config)
    }

    /// Load configuration or return defaults if not found or invalid
    pub fn load_or_default(self) -> ProbsimConfig {
        self.load_validated().unwrap_or_default()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RunMode;
    use std::fs;
    use tempfile::tempdir;

    fn loader(project_dir: &Path) -> ConfigLoader {
        // Unique prefix keeps the developer's PROBSIM_* variables out of tests
        ConfigLoader::new()
            .with_project_dir(project_dir)
            .with_env_prefix("PROBSIM_TEST_UNSET")
            .without_user_config()
    }

    #[test]
    fn test_load_defaults() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config = loader(temp_dir.path()).load().expect("Failed to load config");

        assert_eq!(config, ProbsimConfig::default());
    }

    #[test]
    fn test_load_project_config() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let project_dir = temp_dir.path();

        let config_content = r#"
[run]
trials = 5000
mode = "forked"
workers = 2
seed = 42

[birthday]
group_size = 40
"#;
        fs::write(project_dir.join("probsim.toml"), config_content)
            .expect("Failed to write config");

        let config = loader(project_dir).load().expect("Failed to load config");

        assert_eq!(config.run.trials, 5000);
        assert_eq!(config.run.mode, RunMode::Forked);
        assert_eq!(config.run.workers, Some(2));
        assert_eq!(config.run.seed, Some(42));
        assert_eq!(config.birthday.group_size, 40);
        // Untouched keys keep their defaults
        assert_eq!(config.birthday.days_in_year, 365);
        assert_eq!(config.diagnostic.false_positive_one_in, 20);
    }

    #[test]
    fn test_local_overrides() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let project_dir = temp_dir.path();

        fs::write(
            project_dir.join("probsim.toml"),
            r#"
[run]
trials = 1000
"#,
        )
        .expect("Failed to write project config");

        fs::write(
            project_dir.join("probsim.local.toml"),
            r#"
[run]
trials = 250
"#,
        )
        .expect("Failed to write local config");

        let config = loader(project_dir).load().expect("Failed to load config");

        assert_eq!(config.run.trials, 250);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let project_dir = temp_dir.path();

        fs::write(
            project_dir.join("probsim.toml"),
            r#"
[diagnostic]
prevalence_one_in = 0
"#,
        )
        .expect("Failed to write config");

        let err = loader(project_dir)
            .load_validated()
            .expect_err("zero prevalence");
        assert!(format!("{err:#}").contains("diagnostic.prevalence_one_in must be positive"));
        assert_eq!(
            loader(project_dir).load_or_default(),
            ProbsimConfig::default()
        );
    }

    #[test]
    fn test_invalid_values_left_for_overrides() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let project_dir = temp_dir.path();

        fs::write(
            project_dir.join("probsim.toml"),
            r#"
[run]
trials = 0
"#,
        )
        .expect("Failed to write config");

        let mut config = loader(project_dir).load().expect("Failed to load config");
        assert_eq!(config.run.trials, 0);
        assert!(config.validate().is_err());

        config.run.trials = 10;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let project_dir = temp_dir.path();

        fs::write(
            project_dir.join("probsim.toml"),
            r#"
[run]
mode = "sideways"
"#,
        )
        .expect("Failed to write config");

        assert!(loader(project_dir).load().is_err());
    }

    // Environment variables are not exercised here: they are process-global
    // and tests run in parallel. In actual usage:
    //
    // PROBSIM_RUN__TRIALS=5000
    // PROBSIM_RUN__MODE=forked
    // PROBSIM_BIRTHDAY__GROUP_SIZE=30
    //
    // override the corresponding file values.
}
