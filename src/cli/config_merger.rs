//! Configuration merger for CLI arguments and config files
//!
//! This module handles merging CLI argument overrides with file-based configuration,
//! implementing the configuration precedence logic.

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, settings::Settings};

/// Merges CLI argument overrides into file-based configuration
///
/// CLI arguments take precedence over every configuration source.
pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    /// Create a new configuration merger with base configuration
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Load the base configuration selected by the CLI
    ///
    /// A single file selected by `--config` or `NOTIFY_CONFIG_FILE` must
    /// load. Otherwise the layered loader is used; if its `default.toml` is
    /// missing the built-in defaults apply, so the binary works without any
    /// configuration.
    ///
    /// # Errors
    /// Returns ConfigError if configuration loading or validation fails
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let loader = match cli.config {
            Some(ref path) => ConfigLoader::default().with_config_file(path),
            None => ConfigLoader::new()?,
        };

        let loader = match cli.env {
            Some(env) => loader.with_environment(env.into()),
            None => loader,
        };

        let config = if loader.config_file().is_none() && !loader.has_base_file() {
            eprintln!(
                "No configuration found in '{}', using built-in defaults",
                loader.config_dir().display()
            );
            Settings::default()
        } else {
            loader.load()?
        };

        Ok(Self::new(config))
    }

    /// Merge CLI arguments with the base configuration
    ///
    /// Precedence, highest first:
    /// 1. Command-specific flags (`send --log-level`)
    /// 2. Global flags (`--verbose`, `--quiet`)
    /// 3. Configuration file values
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }

        if let Commands::Send(ref args) = cli.command {
            if let Some(level) = args.log_level {
                config.logger.level = level.as_str().to_string();
            }
        }

        config.validate()?;

        Ok(config)
    }
}
