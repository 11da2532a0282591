//! Audit trail entries and the append-only sink they are written to.

use chrono::{Local, SecondsFormat};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Who performed an audited action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    /// Player-facing roster actions
    #[default]
    User,
    /// Court layout administration
    Admin,
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => f.write_str("user"),
            Self::Admin => f.write_str("admin"),
        }
    }
}

/// A single audit trail record.
///
/// Entries written by older versions lack `details` and `user_type`; those
/// load as an empty string and [`UserType::User`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Short action label (e.g., "Added Court")
    pub action: String,
    /// Human-readable description of what changed
    #[serde(default)]
    pub details: String,
    /// Actor category
    #[serde(default)]
    pub user_type: UserType,
    /// Local time of the action (ISO 8601)
    pub timestamp: String,
}

impl AuditEntry {
    /// Creates an entry stamped with the current local time.
    pub fn now(action: impl Into<String>, details: impl Into<String>, user_type: UserType) -> Self {
        Self {
            action: action.into(),
            details: details.into(),
            user_type,
            timestamp: Local::now().to_rfc3339_opts(SecondsFormat::Micros, false),
        }
    }
}

/// Destination for audit entries.
///
/// Implementations must only ever append; entries are never edited or removed.
pub trait AuditSink {
    /// Appends one entry.
    fn append(&mut self, entry: AuditEntry);
}

/// Ordered, in-memory audit trail (persisted as `audit_trail.json`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuditLog {
    entries: Vec<AuditEntry>,
}

impl AuditLog {
    /// Creates an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// All entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    /// The most recent `limit` entries, oldest first.
    #[must_use]
    pub fn recent(&self, limit: usize) -> &[AuditEntry] {
        let start = self.entries.len().saturating_sub(limit);
        &self.entries[start..]
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl AuditSink for AuditLog {
    fn append(&mut self, entry: AuditEntry) {
        tracing::debug!(action = %entry.action, details = %entry.details, "audit");
        self.entries.push(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_preserves_order() {
        let mut log = AuditLog::new();
        log.append(AuditEntry::now("First", "", UserType::Admin));
        log.append(AuditEntry::now("Second", "", UserType::User));

        let actions: Vec<_> = log.entries().iter().map(|e| e.action.as_str()).collect();
        assert_eq!(actions, vec!["First", "Second"]);
    }

    #[test]
    fn test_recent_limits_from_the_end() {
        let mut log = AuditLog::new();
        for i in 0..5 {
            log.append(AuditEntry::now(format!("A{i}"), "", UserType::User));
        }
        let recent: Vec<_> = log.recent(2).iter().map(|e| e.action.clone()).collect();
        assert_eq!(recent, vec!["A3", "A4"]);
        assert_eq!(log.recent(10).len(), 5);
    }

    #[test]
    fn test_timestamp_is_iso8601() {
        let entry = AuditEntry::now("Added", "x", UserType::User);
        assert!(chrono::DateTime::parse_from_rfc3339(&entry.timestamp).is_ok());
    }

    #[test]
    fn test_legacy_entry_defaults() {
        let log: AuditLog = serde_json::from_str(
            r#"[{"action": "Added", "player": "Sam", "day": "Monday", "timestamp": "2024-09-02T19:00:00"}]"#,
        )
        .unwrap();
        let entry = &log.entries()[0];
        assert_eq!(entry.details, "");
        assert_eq!(entry.user_type, UserType::User);
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let mut log = AuditLog::new();
        log.append(AuditEntry::now("Reset Courts", "All courts cleared", UserType::Admin));
        let json = serde_json::to_value(&log).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["user_type"], "admin");
    }
}
