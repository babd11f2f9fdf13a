//! Configuration loader for notify-dispatch
//!
//! This module provides the `ConfigLoader` struct that handles loading
//! configuration from multiple sources with proper precedence.

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for configuration directory
pub const CONFIG_DIR_ENV: &str = "NOTIFY_CONFIG_DIR";

/// Environment variable for specific configuration file
pub const CONFIG_FILE_ENV: &str = "NOTIFY_CONFIG_FILE";

/// Default configuration directory
const DEFAULT_CONFIG_DIR: &str = "config";

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "NOTIFY";

/// Separator for nested configuration keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Configuration loader that handles layered configuration loading
///
/// Sources, lowest priority first:
/// 1. `default.toml` - Base default configuration (required)
/// 2. `{environment}.toml` - Environment-specific configuration (optional)
/// 3. `local.toml` - Local overrides, not committed (optional)
/// 4. `NOTIFY_*` environment variables
///
/// When a single configuration file is selected the file layers are replaced
/// by that file; environment variables still apply on top.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    config_file: Option<PathBuf>,
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Create a new configuration loader from the process environment
    ///
    /// Reads `NOTIFY_CONFIG_DIR`, `NOTIFY_CONFIG_FILE` and `NOTIFY_APP_ENV`.
    ///
    /// # Errors
    ///
    /// Returns an error if both `NOTIFY_CONFIG_DIR` and `NOTIFY_CONFIG_FILE`
    /// are set, as they are mutually exclusive.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = std::env::var(CONFIG_DIR_ENV).ok().map(PathBuf::from);
        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        if config_dir.is_some() && config_file.is_some() {
            return Err(ConfigError::ConflictingSources(
                "NOTIFY_CONFIG_DIR and NOTIFY_CONFIG_FILE cannot both be set. \
                 Use NOTIFY_CONFIG_DIR for layered configuration or \
                 NOTIFY_CONFIG_FILE for a single configuration file."
                    .to_string(),
            ));
        }

        Ok(Self {
            config_dir: config_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR)),
            config_file,
            environment: AppEnvironment::from_env(),
        })
    }

    /// Loader reading the layered files of `dir`.
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: dir.into(),
            config_file: None,
            environment: AppEnvironment::from_env(),
        }
    }

    /// Loads exactly `path` instead of the layered files.
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Overrides the environment taken from `NOTIFY_APP_ENV`.
    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// The single file selected by `with_config_file` or `NOTIFY_CONFIG_FILE`.
    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    /// Whether the required base file of this loader exists.
    pub fn has_base_file(&self) -> bool {
        match self.config_file {
            Some(ref file) => file.exists(),
            None => self.config_dir.join("default.toml").exists(),
        }
    }

    /// Load configuration from all sources
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `default.toml` (or the selected single file) is not found
    /// - Configuration parsing fails
    /// - Configuration validation fails
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        let settings: Settings = config.try_deserialize().map_err(|e| {
            ConfigError::Deserialize(e.to_string())
        })?;

        settings.validate()?;

        tracing::debug!(
            environment = %self.environment,
            config_dir = %self.config_dir.display(),
            "Configuration loaded"
        );

        Ok(settings)
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = Config::builder();

        let builder = match self.config_file {
            Some(ref config_file) => Self::add_file_source(builder, config_file, true)?,
            None => self.build_layered_config(builder)?,
        };

        // NOTIFY_LOGGER__LEVEL -> logger.level
        let builder = Self::add_env_source(builder);

        builder.build().map_err(ConfigError::from)
    }

    fn build_layered_config(
        &self,
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let builder =
            Self::add_file_source(builder, &self.config_dir.join("default.toml"), true)?;

        let env_path = self.config_dir.join(self.environment.config_file_name());
        let builder = Self::add_file_source(builder, &env_path, false)?;

        Self::add_file_source(builder, &self.config_dir.join("local.toml"), false)
    }

    fn add_file_source(
        builder: ConfigBuilder<DefaultState>,
        path: &Path,
        required: bool,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        if required && !path.exists() {
            return Err(ConfigError::MissingFile(path.to_path_buf()));
        }

        let name = path
            .to_str()
            .ok_or_else(|| ConfigError::InvalidPath(path.to_path_buf()))?;

        Ok(builder.add_source(File::new(name, FileFormat::Toml).required(required)))
    }

    fn add_env_source(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
        builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .ignore_empty(true)
                .try_parsing(true),
        )
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| Self::from_dir(DEFAULT_CONFIG_DIR))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Serializes tests that read or write `NOTIFY_*` variables.
    pub(crate) static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn setup_config_dir(files: &[(&str, &str)]) -> TempDir {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        for (name, content) in files {
            fs::write(temp_dir.path().join(name), content).expect("Failed to write config file");
        }
        temp_dir
    }

    /// Sets environment variables for one test and restores them on drop.
    pub(crate) struct EnvGuard {
        vars_to_restore: Vec<(String, Option<String>)>,
    }

    impl EnvGuard {
        pub(crate) fn new() -> Self {
            Self {
                vars_to_restore: Vec::new(),
            }
        }

        pub(crate) fn set(&mut self, key: &str, value: &str) {
            self.vars_to_restore
                .push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::set_var(key, value);
            }
        }

        pub(crate) fn remove(&mut self, key: &str) {
            self.vars_to_restore
                .push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::remove_var(key);
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, original_value) in self.vars_to_restore.iter().rev() {
                unsafe {
                    match original_value {
                        Some(value) => std::env::set_var(key, value),
                        None => std::env::remove_var(key),
                    }
                }
            }
        }
    }

    const DEFAULT_CONFIG: &str = r#"
[application]
name = "notify-test"
version = "1.0.0"

[logger]
level = "info"

[logger.console]
enabled = true
colored = false

[notify.default_params]
target = "gchat"
message_bus_topic = "default-topic"

[notify.templates.gchat1]
text = "Workflow finished"
"#;

    #[test]
    fn test_config_loader_new_default() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        env.remove(CONFIG_DIR_ENV);
        env.remove(CONFIG_FILE_ENV);
        env.remove("NOTIFY_APP_ENV");

        let loader = ConfigLoader::new().expect("Should create loader");
        assert_eq!(loader.config_dir(), Path::new("config"));
        assert!(loader.config_file.is_none());
        assert_eq!(loader.environment(), AppEnvironment::Development);
    }

    #[test]
    fn test_config_loader_mutual_exclusivity_error() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        env.set(CONFIG_DIR_ENV, "/custom/config");
        env.set(CONFIG_FILE_ENV, "/path/to/config.toml");

        match ConfigLoader::new() {
            Err(ConfigError::ConflictingSources(msg)) => {
                assert!(msg.contains(CONFIG_DIR_ENV));
                assert!(msg.contains(CONFIG_FILE_ENV));
            }
            other => panic!("Expected ConflictingSources, got {other:?}"),
        }
    }

    #[test]
    fn test_config_loader_environment_from_env() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        env.remove(CONFIG_DIR_ENV);
        env.remove(CONFIG_FILE_ENV);
        env.set("NOTIFY_APP_ENV", "prod");

        let loader = ConfigLoader::new().expect("Should create loader");
        assert_eq!(loader.environment(), AppEnvironment::Production);
    }

    #[test]
    fn test_load_missing_default_toml() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let temp_dir = setup_config_dir(&[]);

        let loader = ConfigLoader::from_dir(temp_dir.path());
        assert!(!loader.has_base_file());

        match loader.load() {
            Err(ConfigError::MissingFile(path)) => assert!(path.ends_with("default.toml")),
            other => panic!("Expected MissingFile error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_default_toml_only() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let temp_dir = setup_config_dir(&[("default.toml", DEFAULT_CONFIG)]);

        let settings = ConfigLoader::from_dir(temp_dir.path())
            .with_environment(AppEnvironment::Test)
            .load()
            .expect("Should load settings");

        assert_eq!(settings.application.name, "notify-test");
        assert_eq!(settings.logger.level, "info");
        assert_eq!(settings.notify.default_params["target"], "gchat");
        assert_eq!(
            settings.notify.templates["gchat1"]["text"],
            "Workflow finished"
        );
    }

    #[test]
    fn test_load_environment_and_local_layers() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let production = r#"
[logger]
level = "warn"

[notify.default_params]
target = "gchat,message_bus"
"#;
        let local = r#"
[application]
name = "notify-local"
"#;
        let temp_dir = setup_config_dir(&[
            ("default.toml", DEFAULT_CONFIG),
            ("production.toml", production),
            ("local.toml", local),
        ]);

        let settings = ConfigLoader::from_dir(temp_dir.path())
            .with_environment(AppEnvironment::Production)
            .load()
            .expect("Should load settings");

        assert_eq!(settings.logger.level, "warn");
        assert_eq!(settings.application.name, "notify-local");
        assert_eq!(settings.notify.default_params["target"], "gchat,message_bus");
        // Tables merge key by key across layers
        assert_eq!(
            settings.notify.default_params["message_bus_topic"],
            "default-topic"
        );
    }

    #[test]
    fn test_load_with_env_var_override() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        let temp_dir = setup_config_dir(&[("default.toml", DEFAULT_CONFIG)]);

        env.set("NOTIFY_LOGGER__LEVEL", "debug");

        let settings = ConfigLoader::from_dir(temp_dir.path())
            .with_environment(AppEnvironment::Test)
            .load()
            .expect("Should load settings");

        assert_eq!(settings.logger.level, "debug");
        assert_eq!(settings.application.name, "notify-test");
    }

    #[test]
    fn test_load_single_file_mode() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let single = r#"
[application]
name = "single-file"

[logger]
level = "error"
"#;
        let temp_dir = setup_config_dir(&[("default.toml", DEFAULT_CONFIG), ("single.toml", single)]);

        let settings = ConfigLoader::from_dir(temp_dir.path())
            .with_config_file(temp_dir.path().join("single.toml"))
            .load()
            .expect("Should load settings");

        assert_eq!(settings.application.name, "single-file");
        assert_eq!(settings.logger.level, "error");
        assert!(settings.notify.templates.is_empty());
    }

    #[test]
    fn test_load_rejects_invalid_settings() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let invalid = r#"
[logger]
level = "loud"
"#;
        let temp_dir = setup_config_dir(&[("default.toml", invalid)]);

        match ConfigLoader::from_dir(temp_dir.path()).load() {
            Err(ConfigError::ValidationError { field, .. }) => assert_eq!(field, "logger.level"),
            other => panic!("Expected ValidationError, got {other:?}"),
        }
    }
}
