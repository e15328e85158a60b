//! Diagnostic logging and draw-result logging to disk.
//!
//! Diagnostics go through `tracing` into `tombola.log` inside the configured
//! log directory (default: `logs/` beside the state file); the terminal
//! belongs to the UI, so nothing is printed there. When `record_draws` is
//! set, every completed draw is also appended to a daily `draws_<date>.log`.

use crate::config::LoggingConfig;
use crate::raffle::HistoryEntry;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

/// Expand a leading `~` to the home directory.
fn expand_home(dir: &str) -> PathBuf {
    if let Some(rest) = dir.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(dir)
}

/// Install the global `tracing` subscriber. No-op when logging is disabled.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    if !config.enabled {
        return Ok(());
    }
    let level = config
        .level
        .parse::<tracing::Level>()
        .unwrap_or(tracing::Level::INFO);

    let log_dir = expand_home(&config.log_dir);
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;
    let path = log_dir.join("tombola.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))?;
    Ok(())
}

/// Appends completed draws to daily result files.
///
/// File handles are cached for the lifetime of the logger to avoid repeated
/// opens. A file that cannot be opened is skipped with a warning.
pub struct DrawLogger {
    enabled: bool,
    log_dir: PathBuf,
    file_handles: HashMap<String, fs::File>,
}

impl DrawLogger {
    pub fn new(config: &LoggingConfig) -> Self {
        Self {
            enabled: config.record_draws,
            log_dir: expand_home(&config.log_dir),
            file_handles: HashMap::new(),
        }
    }

    pub fn log_draw(&mut self, entry: &HistoryEntry) {
        if !self.enabled {
            return;
        }

        let line = if entry.winner_name.is_empty() {
            format!("[{}] #{} {}", entry.timestamp, entry.id, entry.number)
        } else {
            format!(
                "[{}] #{} {} ({})",
                entry.timestamp, entry.id, entry.number, entry.winner_name
            )
        };

        let date = chrono::Local::now().format("%Y-%m-%d").to_string();
        let filename = format!("draws_{}.log", date);

        if !self.file_handles.contains_key(&filename) {
            let _ = fs::create_dir_all(&self.log_dir);
            let filepath = self.log_dir.join(&filename);
            match OpenOptions::new().create(true).append(true).open(&filepath) {
                Ok(file) => {
                    self.file_handles.insert(filename.clone(), file);
                }
                Err(e) => {
                    tracing::warn!(path = %filepath.display(), error = %e, "cannot open draw log");
                    return;
                }
            }
        }

        if let Some(handle) = self.file_handles.get_mut(&filename) {
            let _ = writeln!(handle, "{}", line);
        }
    }
}
