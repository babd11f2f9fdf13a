//! Log file writer

use crate::logger::config::FileConfig;
use crate::logger::error::LoggerError;
use std::fs::{File, OpenOptions};
use std::sync::Arc;

/// Opens the configured log file, creating parent directories as needed.
///
/// The returned handle is shared by every event the file layer writes;
/// `&File` is `Write`, so no extra locking is needed.
pub fn open_log_file(config: &FileConfig) -> Result<Arc<File>, LoggerError> {
    if config.path.as_os_str().is_empty() {
        return Err(LoggerError::config("Log file path is empty"));
    }

    if let Some(parent) = config.path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut options = OpenOptions::new();
    options.create(true);
    if config.append {
        options.append(true);
    } else {
        options.write(true).truncate(true);
    }

    Ok(Arc::new(options.open(&config.path)?))
}
