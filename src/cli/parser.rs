//! CLI argument parsing with clap
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, arguments, and their documentation.

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::Value;
use std::path::PathBuf;

use super::validation::{
    parse_json_value, parse_param, validate_config_file_path, validate_existing_file,
};

/// Dispatch workflow notifications to chat, email, IRC and message bus channels
#[derive(Parser, Debug)]
#[command(name = "notify-dispatch")]
#[command(about = "Dispatch workflow notifications to chat, email, IRC and message bus channels")]
#[command(long_about = "
notify-dispatch turns a finished workflow's outcome into one notification per
targeted channel. Targets, parameters and templates are validated as a whole
before any channel is called.

EXAMPLES:
    # Notify Google Chat and Slack about an outcome
    notify-dispatch send --outcome outcome.json --target gchat,slack

    # Publish to the message bus with a structured request body
    notify-dispatch send --outcome outcome.json --target message_bus \\
        --param message_bus_topic=ci.results \\
        --param 'message_bus_request_body={\"body\": \"done\"}'

    # Use a named template for gchat
    notify-dispatch send --outcome outcome.json --target gchat --param gchat_template_name=gchat1

    # Show what would be sent without sending
    notify-dispatch send --outcome outcome.json --target email --message 'Nightly run' --dry-run

    # List the recognized channels
    notify-dispatch channels
")]
#[command(version = crate::build::CLAP_LONG_VERSION)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    ///
    /// Load this TOML file instead of the layered files under the
    /// configuration directory. NOTIFY_* environment variables still apply.
    ///
    /// Example: --config /etc/notify-dispatch/production.toml
    #[arg(short, long, global = true, value_name = "FILE", value_parser = validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects which {environment}.toml layer is loaded.
    ///
    /// Available values: development (dev), staging (stage), production (prod), test
    #[arg(short, long, global = true, value_enum)]
    pub env: Option<Environment>,

    /// Enable verbose logging
    ///
    /// Raises log output to debug level. Cannot be used with --quiet.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    ///
    /// Lowers log output to error level. Cannot be used with --verbose.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send a notification about a workflow outcome
    ///
    /// Reads the outcome record, merges parameters over the configured
    /// defaults and dispatches one call per targeted channel.
    Send(SendArgs),

    /// List the recognized channels
    ///
    /// Shows every channel a target spec may name and whether it accepts
    /// a `<channel>_template_name` parameter.
    Channels {
        /// Print the list as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Arguments of the send command
#[derive(Args, Debug, Clone)]
pub struct SendArgs {
    /// Outcome record file
    ///
    /// JSON document with `passed_tasks`, `failed_tasks` and `overall_status`.
    /// Missing fields default to empty lists and status 0.
    #[arg(short, long, value_name = "FILE", value_parser = validate_existing_file)]
    pub outcome: PathBuf,

    /// Comma-separated channels to notify
    ///
    /// Overrides any `target` from --params-file, --param or configuration.
    ///
    /// Example: --target gchat,message_bus
    #[arg(short, long, value_name = "SPEC")]
    pub target: Option<String>,

    /// Request parameter as key=value
    ///
    /// JSON objects, arrays and `null` are decoded. Any other value,
    /// numbers included, is passed as a string. May be repeated; later
    /// values win.
    ///
    /// Example: --param message_bus_topic=ci.results
    #[arg(short, long = "param", value_name = "KEY=VALUE", value_parser = parse_param)]
    pub params: Vec<(String, Value)>,

    /// JSON file holding a parameter object
    ///
    /// Applied before --param values.
    #[arg(long, value_name = "FILE", value_parser = validate_existing_file)]
    pub params_file: Option<PathBuf>,

    /// Plain text message body
    #[arg(short, long, value_name = "TEXT", conflicts_with = "message_json")]
    pub message: Option<String>,

    /// Message body given as JSON
    ///
    /// Objects are sent verbatim and strings are wrapped as text. Any other
    /// JSON value is rejected.
    #[arg(long, value_name = "JSON", value_parser = parse_json_value)]
    pub message_json: Option<Value>,

    /// Log level override for this run
    ///
    /// Overrides both configuration and --verbose/--quiet.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Validate and print the dispatch plan without delivering
    #[arg(long)]
    pub dry_run: bool,
}

/// Environment options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

/// Log level options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Test => crate::config::Environment::Test,
            Environment::Staging => crate::config::Environment::Staging,
            Environment::Production => crate::config::Environment::Production,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use serde_json::json;
    use tempfile::NamedTempFile;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_version_flag() {
        let err = Cli::try_parse_from(["notify-dispatch", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_subcommand_required() {
        let err = Cli::try_parse_from(["notify-dispatch"]).unwrap_err();
        assert!(matches!(
            err.kind(),
            clap::error::ErrorKind::MissingSubcommand
                | clap::error::ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
        ));
    }

    #[test]
    fn test_send_command() {
        let outcome = NamedTempFile::new().unwrap();
        let outcome_path = outcome.path().to_str().unwrap();

        let cli = Cli::try_parse_from([
            "notify-dispatch",
            "send",
            "--outcome",
            outcome_path,
            "--target",
            "gchat,message_bus",
            "--param",
            "message_bus_topic=topic1",
            "--param",
            r#"message_bus_request_body={"body":"message1"}"#,
            "--dry-run",
        ])
        .unwrap();

        match cli.command {
            Commands::Send(args) => {
                assert_eq!(args.outcome, outcome.path());
                assert_eq!(args.target.as_deref(), Some("gchat,message_bus"));
                assert_eq!(
                    args.params,
                    vec![
                        ("message_bus_topic".to_string(), json!("topic1")),
                        ("message_bus_request_body".to_string(), json!({"body": "message1"})),
                    ]
                );
                assert!(args.dry_run);
            }
            other => panic!("Expected Send command, got {other:?}"),
        }
    }

    #[test]
    fn test_send_requires_existing_outcome() {
        let result = Cli::try_parse_from([
            "notify-dispatch",
            "send",
            "--outcome",
            "/nonexistent/outcome.json",
        ]);
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::ValueValidation
        );
    }

    #[test]
    fn test_message_and_message_json_conflict() {
        let outcome = NamedTempFile::new().unwrap();
        let result = Cli::try_parse_from([
            "notify-dispatch",
            "send",
            "--outcome",
            outcome.path().to_str().unwrap(),
            "--message",
            "hi",
            "--message-json",
            r#"{"body":"hi"}"#,
        ]);
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::ArgumentConflict
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["notify-dispatch", "channels", "--verbose", "--env", "prod"])
            .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.env, Some(Environment::Production));
        assert!(matches!(cli.command, Commands::Channels { json: false }));
    }

    #[test]
    fn test_conflicting_verbose_quiet() {
        let err = Cli::try_parse_from(["notify-dispatch", "--verbose", "--quiet", "channels"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }
}
