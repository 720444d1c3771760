//! Log output and real-time streaming via Server-Sent Events (SSE).
//!
//! [`LogBroadcaster`] is installed as the `log` facade's logger: every
//! record is printed to stderr and broadcast to connected SSE clients.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Log level for frontend display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Success,
    Warning,
    Error,
}

impl LogLevel {
    /// Level for a `log` record; info messages carrying a check mark are
    /// shown as successes.
    fn from_record(level: log::Level, message: &str) -> Self {
        match level {
            log::Level::Error => LogLevel::Error,
            log::Level::Warn => LogLevel::Warning,
            log::Level::Info if message.starts_with('✅') => LogLevel::Success,
            log::Level::Info => LogLevel::Info,
            log::Level::Debug | log::Level::Trace => LogLevel::Debug,
        }
    }
}

/// A single log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    /// Module that emitted the entry
    pub target: String,
    pub timestamp: DateTime<Utc>,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            target: target.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Global log broadcaster
pub static LOG_BROADCASTER: Lazy<LogBroadcaster> = Lazy::new(LogBroadcaster::new);

/// Prefix of this crate's log targets; everything else is only shown from
/// warning level up.
const CRATE_TARGET: &str = "mutant_mint";

/// Broadcasts log entries to all connected SSE clients
pub struct LogBroadcaster {
    sender: broadcast::Sender<LogEntry>,
}

impl LogBroadcaster {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(100);
        Self { sender }
    }

    /// Print an entry and send it to all subscribers
    pub fn publish(&self, entry: LogEntry) {
        eprintln!("{}", render(&entry));

        // No receivers is fine
        let _ = self.sender.send(entry);
    }

    /// Get a receiver for SSE streaming
    pub fn subscribe(&self) -> broadcast::Receiver<LogEntry> {
        self.sender.subscribe()
    }
}

impl Default for LogBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

impl log::Log for LogBroadcaster {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.target().starts_with(CRATE_TARGET) || metadata.level() <= log::Level::Warn
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = record.args().to_string();
        let level = LogLevel::from_record(record.level(), &message);
        self.publish(LogEntry::new(level, message, record.target()));
    }

    fn flush(&self) {}
}

/// Terminal line for an entry. The level marker is the only icon added.
fn render(entry: &LogEntry) -> String {
    let prefix = match entry.level {
        LogLevel::Debug => "   ·",
        LogLevel::Info | LogLevel::Success => "  ",
        LogLevel::Warning => "   ⚠️",
        LogLevel::Error => "   ❌",
    };
    format!("{} {}", prefix, entry.message)
}

/// Install [`LOG_BROADCASTER`] as the global logger.
///
/// Calling it again is a no-op.
pub fn init_logging(max_level: log::LevelFilter) {
    if log::set_logger(&*LOG_BROADCASTER).is_ok() {
        log::set_max_level(max_level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Log;

    #[test]
    fn test_level_mapping() {
        assert_eq!(LogLevel::from_record(log::Level::Info, "✅ Claim confirmed"), LogLevel::Success);
        assert_eq!(LogLevel::from_record(log::Level::Info, "🔐 approval"), LogLevel::Info);
        assert_eq!(LogLevel::from_record(log::Level::Warn, "low"), LogLevel::Warning);
        assert_eq!(LogLevel::from_record(log::Level::Trace, "x"), LogLevel::Debug);
    }

    #[test]
    fn test_records_reach_subscribers() {
        let broadcaster = LogBroadcaster::new();
        let mut rx = broadcaster.subscribe();

        broadcaster.log(
            &log::Record::builder()
                .args(format_args!("✅ Wrote 3 holders"))
                .level(log::Level::Info)
                .target("mutant_mint::export")
                .build(),
        );

        let entry = rx.try_recv().unwrap();
        assert_eq!(entry.level, LogLevel::Success);
        assert_eq!(entry.message, "✅ Wrote 3 holders");
        assert_eq!(entry.target, "mutant_mint::export");
    }

    #[test]
    fn test_foreign_debug_is_filtered() {
        let broadcaster = LogBroadcaster::new();
        let mut rx = broadcaster.subscribe();

        broadcaster.log(
            &log::Record::builder()
                .args(format_args!("connection pooled"))
                .level(log::Level::Debug)
                .target("hyper::client")
                .build(),
        );

        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_balance_warning_has_one_marker() {
        let notice = mutant_mint_core::Notice::InsufficientBalance {
            balance: alloy_primitives::U256::from(1),
            requested: mutant_mint_core::Quantity::new(2).unwrap(),
        };
        let broadcaster = LogBroadcaster::new();
        let mut rx = broadcaster.subscribe();

        broadcaster.log(
            &log::Record::builder()
                .args(format_args!("{}", notice))
                .level(log::Level::Warn)
                .target("mutant_mint_core::mint")
                .build(),
        );

        let line = render(&rx.try_recv().unwrap());
        assert_eq!(line.matches('⚠').count(), 1);
        assert!(line.ends_with(&notice.to_string()));
    }

    #[test]
    fn test_entry_serializes_camel_case() {
        let entry = LogEntry::new(LogLevel::Warning, "low balance", "mutant_mint_core::mint");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["level"], "warning");
        assert_eq!(json["target"], "mutant_mint_core::mint");
        assert!(json["timestamp"].is_string());
    }
}
