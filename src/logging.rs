//! Diagnostics logging to `~/.local/share/wsh/wsh.log`.
//!
//! Initializes a file logger on first call. Best-effort: failures are
//! silently ignored so logging can never break the shell.

use simplelog::{Config, LevelFilter, WriteLogger};
use std::sync::Once;

/// Ensures the logger is initialized exactly once per process.
static INIT: Once = Once::new();

/// Initialize the file logger.
pub fn init() {
    INIT.call_once(|| {
        let Some(home) = std::env::var_os("HOME") else {
            return;
        };
        let log_dir = std::path::Path::new(&home).join(".local/share/wsh");
        let _ = std::fs::create_dir_all(&log_dir);

        let log_path = log_dir.join("wsh.log");
        let Ok(file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)
        else {
            return;
        };

        let _ = WriteLogger::init(LevelFilter::Info, Config::default(), file);
    });
}
