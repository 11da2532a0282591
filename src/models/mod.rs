//! Data models for courts, the court layout, the roster and the audit trail.
//!
//! This module contains all the core data structures used throughout the application.
//! Models are designed to be independent of UI and business logic.

pub mod audit;
pub mod court;
pub mod court_layout;
pub mod rgb;
pub mod roster;

// Re-export all model types
pub use audit::{AuditEntry, AuditLog, AuditSink, UserType};
pub use court::{Court, GridPosition, SkillLevel};
pub use court_layout::{CourtLayout, GridError, LayoutSettings, LevelCounts};
pub use rgb::RgbColor;
pub use roster::{DayRoster, ListKind, Player, Roster, RosterError, RosterLimits, Weekday};
