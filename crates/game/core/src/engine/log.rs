//! Rolling combat log.

use std::collections::VecDeque;

use crate::config::CombatConfig;

/// One log line stamped with combat time.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogEntry {
    /// Seconds since combat start.
    pub at: f64,
    pub text: String,
}

impl core::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "[{:>6.1}s] {}", self.at, self.text)
    }
}

/// Bounded log owned by one combat.
///
/// Keeps the last [`CombatConfig::MAX_LOG_ENTRIES`] lines for display. Lines
/// not yet collected by [`CombatLog::take_unread`] are kept separately so a
/// driver can forward every line, including ones already rotated out.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CombatLog {
    entries: VecDeque<LogEntry>,
    unread: Vec<LogEntry>,
}

impl CombatLog {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(CombatConfig::MAX_LOG_ENTRIES),
            unread: Vec::new(),
        }
    }

    pub fn push(&mut self, at: f64, text: impl Into<String>) {
        let entry = LogEntry {
            at,
            text: text.into(),
        };
        if self.entries.len() == CombatConfig::MAX_LOG_ENTRIES {
            self.entries.pop_front();
        }
        self.unread.push(entry.clone());
        self.entries.push_back(entry);
    }

    /// Pushes every non-empty line in order.
    pub fn extend<I>(&mut self, at: f64, lines: I)
    where
        I: IntoIterator<Item = String>,
    {
        for line in lines.into_iter().filter(|l| !l.is_empty()) {
            self.push(at, line);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    /// Lines pushed since the previous call.
    pub fn take_unread(&mut self) -> Vec<LogEntry> {
        std::mem::take(&mut self.unread)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.unread.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_the_newest_entries() {
        let mut log = CombatLog::new();
        for i in 0..15 {
            log.push(f64::from(i), format!("line {i}"));
        }

        assert_eq!(log.len(), CombatConfig::MAX_LOG_ENTRIES);
        assert_eq!(log.iter().next().map(|e| e.text.as_str()), Some("line 5"));
        assert_eq!(log.latest().map(|e| e.text.as_str()), Some("line 14"));
    }

    #[test]
    fn unread_survives_rotation_and_drains() {
        let mut log = CombatLog::new();
        log.extend(0.0, (0..12).map(|i| format!("line {i}")));
        log.extend(0.0, [String::new()]);

        assert_eq!(log.take_unread().len(), 12);
        assert!(log.take_unread().is_empty());
    }

    #[test]
    fn display_includes_timestamp() {
        let entry = LogEntry {
            at: 3.26,
            text: "Hero uses Slash on Rat!".to_owned(),
        };
        assert_eq!(entry.to_string(), "[   3.3s] Hero uses Slash on Rat!");
    }
}
