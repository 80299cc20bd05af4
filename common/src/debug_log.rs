//! Event log shown on the debug page.
//!
//! A small ring buffer of operator-relevant events (e-stop presses, lifecycle
//! changes, refresh faults). Every entry is also forwarded to the `log` facade,
//! so the same line ends up in the host's logger output.
//!
//! ```ignore
//! let mut events = DebugLog::new();
//! events.record(Level::Info, "screen attached");
//! for entry in events.iter() {
//!     println!("{} {}", entry.tag(), entry.text());
//! }
//! ```

use heapless::{Deque, String};
use log::Level;

/// Maximum number of entries kept.
pub const LOG_BUFFER_SIZE: usize = 8;

/// Maximum characters per entry (excluding the level tag).
pub const LOG_LINE_LENGTH: usize = 44;

/// One event line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    level: Level,
    text: String<LOG_LINE_LENGTH>,
}

impl LogEntry {
    #[inline]
    pub const fn level(&self) -> Level { self.level }

    #[inline]
    pub fn text(&self) -> &str { self.text.as_str() }

    /// Single-letter tag for narrow displays: `E`, `W`, `I`, `D`, `T`.
    pub const fn tag(&self) -> char {
        match self.level {
            Level::Error => 'E',
            Level::Warn => 'W',
            Level::Info => 'I',
            Level::Debug => 'D',
            Level::Trace => 'T',
        }
    }
}

/// Ring buffer of the most recent [`LogEntry`]s. Oldest entries are dropped.
pub struct DebugLog {
    buffer: Deque<LogEntry, LOG_BUFFER_SIZE>,
}

impl DebugLog {
    pub const fn new() -> Self { Self { buffer: Deque::new() } }

    /// Store `msg` (truncated to [`LOG_LINE_LENGTH`] characters) and forward it
    /// to the `log` facade at `level`.
    pub fn record(
        &mut self,
        level: Level,
        msg: &str,
    ) {
        log::log!(target: "hud::events", level, "{msg}");

        if self.buffer.is_full() {
            self.buffer.pop_front();
        }

        let mut text = String::new();
        for c in msg.chars() {
            if text.push(c).is_err() {
                break;
            }
        }
        self.buffer.push_back(LogEntry { level, text }).ok();
    }

    /// Entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> { self.buffer.iter() }

    #[inline]
    pub fn len(&self) -> usize { self.buffer.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.buffer.is_empty() }

    /// Number of stored entries at `level` or more severe.
    pub fn count_at_least(
        &self,
        level: Level,
    ) -> usize {
        self.buffer.iter().filter(|e| e.level <= level).count()
    }
}

impl Default for DebugLog {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_level() {
        let mut events = DebugLog::new();
        assert!(events.is_empty());

        events.record(Level::Info, "screen attached");
        events.record(Level::Warn, "refresh failed");

        let entries: Vec<_> = events.iter().map(|e| (e.tag(), e.text())).collect();
        assert_eq!(entries, vec![('I', "screen attached"), ('W', "refresh failed")]);
    }

    #[test]
    fn test_ring_buffer_drops_oldest() {
        let mut events = DebugLog::new();
        for i in 0..LOG_BUFFER_SIZE {
            events.record(Level::Debug, &format!("event {i}"));
        }
        events.record(Level::Debug, "newest");

        assert_eq!(events.len(), LOG_BUFFER_SIZE);
        assert_eq!(events.iter().next().map(LogEntry::text), Some("event 1"));
        assert_eq!(events.iter().last().map(LogEntry::text), Some("newest"));
    }

    #[test]
    fn test_long_lines_truncated() {
        let mut events = DebugLog::new();
        events.record(Level::Info, &"x".repeat(100));
        assert_eq!(events.iter().next().unwrap().text().len(), LOG_LINE_LENGTH);
    }

    #[test]
    fn test_multibyte_truncation_stays_valid() {
        let mut events = DebugLog::new();
        events.record(Level::Info, &"°".repeat(40));
        let text = events.iter().next().unwrap().text();
        assert!(text.len() <= LOG_LINE_LENGTH);
        assert!(text.chars().all(|c| c == '°'));
    }

    #[test]
    fn test_count_at_least() {
        let mut events = DebugLog::new();
        events.record(Level::Error, "a");
        events.record(Level::Warn, "b");
        events.record(Level::Info, "c");
        assert_eq!(events.count_at_least(Level::Warn), 2);
        assert_eq!(events.count_at_least(Level::Error), 1);
        assert_eq!(events.count_at_least(Level::Trace), 3);
    }
}
