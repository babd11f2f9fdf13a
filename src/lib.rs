//! notify-dispatch library
//!
//! Resolves notification targets, partitions per-channel parameters, builds
//! the shared payload and resolves templates before handing one call per
//! channel to a pluggable transport.

use shadow_rs::shadow;
shadow!(build);

pub mod cli;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod services;

pub use error::{AppError, AppResult};
pub use services::notifications::NotifyDispatcher;

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}

pub fn clap_long_version() -> &'static str {
    build::CLAP_LONG_VERSION
}
