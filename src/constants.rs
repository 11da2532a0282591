//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name, data file names and seed values.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Courtboard";

/// The binary name of the application (used in command examples, lowercase with hyphens).
pub const APP_BINARY_NAME: &str = "courtboard";

/// File holding the per-weekday player lists.
pub const PLAYERS_FILE: &str = "player_list.json";

/// File holding the court layout document (courts + layout settings).
pub const COURT_LAYOUT_FILE: &str = "court_layout.json";

/// File holding the append-only audit trail.
pub const AUDIT_FILE: &str = "audit_trail.json";

/// Center name used when no layout has been saved yet.
pub const DEFAULT_CENTER_NAME: &str = "Team Baddies Badminton Center";

/// Default number of players allowed on a day's main list.
pub const DEFAULT_MAX_PLAYERS: usize = 27;

/// Default number of players allowed on a day's waitlist.
pub const DEFAULT_MAX_WAITLIST: usize = 20;

/// Largest grid dimension accepted by the layout editor.
pub const MAX_GRID_DIMENSION: u32 = 10;

/// Largest court target accepted by the layout editor.
pub const MAX_TARGET_COURTS: u32 = 50;
