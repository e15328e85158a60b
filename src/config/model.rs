//! Configuration data model.
//!
//! All structs derive `Serialize`/`Deserialize` for TOML persistence.
//! Every field has a sensible default so the application works out of the box.
//! Raffle settings (digit count, reveal mode, countdown) are not here: they
//! live in the raffle state store and change from inside the app.

use crate::raffle::Timing;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// UI appearance and behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// chrono format used for history timestamps.
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
    /// How long the winner banner keeps animating.
    #[serde(default = "default_celebration_secs")]
    pub celebration_secs: u64,
    #[serde(default = "default_true")]
    pub bell_on_winner: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            timestamp_format: default_timestamp_format(),
            celebration_secs: default_celebration_secs(),
            bell_on_winner: true,
        }
    }
}

/// Animation pacing, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
    #[serde(default = "default_manual_settle_ms")]
    pub manual_settle_ms: u64,
    #[serde(default = "default_countdown_tick_ms")]
    pub countdown_tick_ms: u64,
    #[serde(default = "default_go_grace_ms")]
    pub go_grace_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            settle_ms: default_settle_ms(),
            manual_settle_ms: default_manual_settle_ms(),
            countdown_tick_ms: default_countdown_tick_ms(),
            go_grace_ms: default_go_grace_ms(),
        }
    }
}

impl TimingConfig {
    pub fn to_timing(&self) -> Timing {
        Timing {
            settle: Duration::from_millis(self.settle_ms),
            manual_settle: Duration::from_millis(self.manual_settle_ms),
            countdown_tick: Duration::from_millis(self.countdown_tick_ms.max(1)),
            go_grace: Duration::from_millis(self.go_grace_ms),
        }
    }
}

/// Where raffle settings and history are kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_state_path")]
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_state_path(),
        }
    }
}

/// Diagnostic and draw-result logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// One of `trace`, `debug`, `info`, `warn`, `error`.
    #[serde(default = "default_level")]
    pub level: String,
    /// Append every completed draw to a daily results file.
    #[serde(default)]
    pub record_draws: bool,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_level(),
            record_draws: false,
            log_dir: default_log_dir(),
        }
    }
}

fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tombola")
}

fn default_true() -> bool {
    true
}
fn default_timestamp_format() -> String {
    crate::raffle::history::DEFAULT_TIMESTAMP_FORMAT.to_string()
}
fn default_celebration_secs() -> u64 {
    5
}
fn default_settle_ms() -> u64 {
    800
}
fn default_manual_settle_ms() -> u64 {
    500
}
fn default_countdown_tick_ms() -> u64 {
    1000
}
fn default_go_grace_ms() -> u64 {
    800
}
fn default_state_path() -> PathBuf {
    data_dir().join("state.toml")
}
fn default_level() -> String {
    "info".to_string()
}
fn default_log_dir() -> String {
    data_dir().join("logs").display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let cfg: AppConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.ui.timestamp_format, "%H:%M:%S");
        assert_eq!(cfg.ui.celebration_secs, 5);
        assert!(cfg.ui.bell_on_winner);
        assert_eq!(cfg.timing.to_timing(), Timing::default());
        assert!(cfg.logging.enabled);
        assert!(!cfg.logging.record_draws);
        assert!(cfg.storage.path.ends_with("state.toml"));
    }

    #[test]
    fn test_logs_live_beside_state() {
        let cfg = AppConfig::default();
        let state_dir = cfg.storage.path.parent().unwrap();
        assert_eq!(PathBuf::from(&cfg.logging.log_dir), state_dir.join("logs"));
    }

    #[test]
    fn test_partial_sections() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [timing]
            settle_ms = 1500

            [logging]
            level = "debug"
            record_draws = true
            "#,
        )
        .unwrap();
        let timing = cfg.timing.to_timing();
        assert_eq!(timing.settle, Duration::from_millis(1500));
        assert_eq!(timing.manual_settle, Duration::from_millis(500));
        assert_eq!(cfg.logging.level, "debug");
        assert!(cfg.logging.record_draws);
    }
}
