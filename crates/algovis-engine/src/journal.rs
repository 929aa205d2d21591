//! Bounded, timestamped journal of user-visible events.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Maximum number of retained entries.
pub const JOURNAL_CAP: usize = 20;

/// Append-only bounded log, most recent entry first.
///
/// Entries are formatted `[HH:MM:SS] message` at append time. Appends past
/// the cap silently drop the oldest entries.
#[derive(Debug, Default)]
pub struct LogSink {
    entries: Mutex<VecDeque<String>>,
}

impl LogSink {
    /// Create an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Timestamp and prepend a message, returning the stored line.
    pub fn append(&self, message: &str) -> String {
        let line = format!("[{}] {}", wall_clock(), message);
        let mut entries = self.entries.lock().unwrap();
        entries.push_front(line.clone());
        entries.truncate(JOURNAL_CAP);
        line
    }

    /// Current entries, most recent first. Safe to call mid-run.
    pub fn snapshot(&self) -> Vec<String> {
        self.entries.lock().unwrap().iter().cloned().collect()
    }

    /// The most recently appended line, if any.
    pub fn newest(&self) -> Option<String> {
        self.entries.lock().unwrap().front().cloned()
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// Whether the journal holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }
}

/// Wall-clock `HH:MM:SS` (UTC). Non-decreasing under normal operation;
/// two appends within the same second share a timestamp.
fn wall_clock() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600 % 24, secs / 60 % 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_come_back_newest_first() {
        let sink = LogSink::new();
        sink.append("first");
        sink.append("second");

        let lines = sink.snapshot();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("second"));
        assert!(lines[1].ends_with("first"));
        assert_eq!(sink.newest(), Some(lines[0].clone()));
    }

    #[test]
    fn lines_carry_a_bracketed_timestamp() {
        let sink = LogSink::new();
        let line = sink.append("hello");
        assert!(line.starts_with('['));
        assert_eq!(&line[9..], "] hello");
    }

    #[test]
    fn journal_truncates_to_cap() {
        let sink = LogSink::new();
        for i in 0..JOURNAL_CAP + 5 {
            sink.append(&format!("entry {i}"));
        }

        let lines = sink.snapshot();
        assert_eq!(lines.len(), JOURNAL_CAP);
        assert!(lines[0].ends_with("entry 24"));
        assert!(lines[JOURNAL_CAP - 1].ends_with("entry 5"));
    }

    #[test]
    fn clear_empties_the_journal() {
        let sink = LogSink::new();
        sink.append("entry");
        assert!(!sink.is_empty());

        sink.clear();
        assert!(sink.is_empty());
        assert_eq!(sink.len(), 0);
        assert_eq!(sink.newest(), None);
    }
}
