//! JSON persistence for the roster, the court layout and the audit trail.
//!
//! All three documents live side by side in one data directory. A missing
//! file means first run and loads seed data; a file that exists but cannot be
//! parsed is an error, never silently replaced.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::error::Category;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::constants::{AUDIT_FILE, COURT_LAYOUT_FILE, PLAYERS_FILE};
use crate::models::{AuditLog, CourtLayout, Roster};

/// A data file was readable JSON but its content was rejected: an unknown
/// court level, an out-of-range grid, or conflicting courts.
///
/// Sits in the error chain under the file context so callers can tell bad
/// content apart from unreadable or truncated files.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct InvalidData(pub String);

/// Returns true if `err` was caused by rejected file content.
#[must_use]
pub fn is_invalid_data(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| cause.is::<InvalidData>())
}

/// Everything the application persists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppData {
    /// Weekly sign-ups
    pub roster: Roster,
    /// Court grid
    pub layout: CourtLayout,
    /// Append-only action log
    pub audit: AuditLog,
}

impl AppData {
    /// First-run data set.
    #[must_use]
    pub fn seed() -> Self {
        Self {
            roster: Roster::seed(),
            layout: CourtLayout::seed(),
            audit: AuditLog::new(),
        }
    }
}

/// File-backed store rooted at a data directory.
#[derive(Debug, Clone)]
pub struct DataStore {
    dir: PathBuf,
}

impl DataStore {
    /// Creates a store for `dir`. Nothing is touched until load or save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The data directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Loads all documents, seeding any that are missing.
    ///
    /// # Errors
    ///
    /// Returns an error naming the file if one cannot be read or parsed, or if
    /// the court layout breaks its invariants. Content that parses as JSON
    /// but is rejected carries [`InvalidData`] in its chain.
    pub fn load(&self) -> Result<AppData> {
        let roster = self.read_or_seed(PLAYERS_FILE, Roster::seed)?;
        let layout: CourtLayout = self.read_or_seed(COURT_LAYOUT_FILE, CourtLayout::seed)?;
        layout
            .validate()
            .map_err(|e| anyhow::Error::new(InvalidData(format!("{e:#}"))))
            .with_context(|| {
                format!(
                    "Invalid court layout in {}",
                    self.dir.join(COURT_LAYOUT_FILE).display()
                )
            })?;
        let audit = self.read_or_seed(AUDIT_FILE, AuditLog::new)?;

        debug!(dir = %self.dir.display(), courts = layout.courts.len(), "data loaded");
        Ok(AppData {
            roster,
            layout,
            audit,
        })
    }

    /// Writes all documents.
    ///
    /// Each file is written to a temp file first and renamed into place.
    pub fn save(&self, data: &AppData) -> Result<()> {
        fs::create_dir_all(&self.dir).with_context(|| {
            format!("Failed to create data directory: {}", self.dir.display())
        })?;

        self.write(PLAYERS_FILE, &data.roster)?;
        self.write(COURT_LAYOUT_FILE, &data.layout)?;
        self.write(AUDIT_FILE, &data.audit)?;

        info!(dir = %self.dir.display(), "data saved");
        Ok(())
    }

    fn read_or_seed<T: DeserializeOwned>(&self, file: &str, seed: impl FnOnce() -> T) -> Result<T> {
        let path = self.dir.join(file);
        if !path.exists() {
            debug!(path = %path.display(), "no data file, using seed");
            return Ok(seed());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read data file: {}", path.display()))?;
        serde_json::from_str(&content).map_err(|e| match e.classify() {
            Category::Data => anyhow::Error::new(InvalidData(e.to_string()))
                .context(format!("Invalid data in file: {}", path.display())),
            _ => anyhow::Error::new(e)
                .context(format!("Failed to parse data file: {}", path.display())),
        })
    }

    fn write<T: Serialize>(&self, file: &str, value: &T) -> Result<()> {
        let path = self.dir.join(file);
        let temp_path = path.with_extension("json.tmp");

        let content = serde_json::to_string_pretty(value)
            .with_context(|| format!("Failed to serialize {file}"))?;
        fs::write(&temp_path, content)
            .with_context(|| format!("Failed to write temp file: {}", temp_path.display()))?;
        fs::rename(&temp_path, &path)
            .with_context(|| format!("Failed to rename temp file to: {}", path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AuditEntry, AuditSink, SkillLevel, UserType};
    use crate::services::GridStore;
    use tempfile::TempDir;

    #[test]
    fn test_missing_files_load_seed() {
        let temp_dir = TempDir::new().unwrap();
        let store = DataStore::new(temp_dir.path().join("data"));

        let data = store.load().unwrap();
        assert_eq!(data, AppData::seed());
        assert_eq!(data.layout.layout_settings.center_name, "Team Baddies Badminton Center");
        // Loading never writes
        assert!(!temp_dir.path().join("data").exists());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = DataStore::new(temp_dir.path());

        let mut data = AppData::seed();
        GridStore::new(&mut data.layout, &mut data.audit)
            .add_court("Court 7", SkillLevel::Advanced, None)
            .unwrap();
        data.audit
            .append(AuditEntry::now("Added", "Sam (Beginner) - Monday", UserType::User));

        store.save(&data).unwrap();
        assert!(temp_dir.path().join(COURT_LAYOUT_FILE).exists());
        assert!(!temp_dir.path().join("court_layout.json.tmp").exists());

        let loaded = store.load().unwrap();
        assert_eq!(loaded, data);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(PLAYERS_FILE), "{ not json").unwrap();

        let err = DataStore::new(temp_dir.path()).load().unwrap_err();
        assert!(format!("{err:#}").contains(PLAYERS_FILE));
        assert!(!is_invalid_data(&err), "Broken JSON is not a content error");
    }

    #[test]
    fn test_unknown_level_fails_load() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(COURT_LAYOUT_FILE),
            r#"{"courts": [{"id": 1, "name": "Court 1", "level": "expert",
                "position": {"row": 0, "col": 0}, "active": true}]}"#,
        )
        .unwrap();

        let err = DataStore::new(temp_dir.path()).load().unwrap_err();
        assert!(format!("{err:#}").contains("unknown court level 'expert'"));
        assert!(is_invalid_data(&err));
    }

    #[test]
    fn test_conflicting_layout_fails_load() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(COURT_LAYOUT_FILE),
            r#"{"courts": [
                {"id": 1, "name": "A", "level": "beginner", "position": {"row": 0, "col": 0}},
                {"id": 2, "name": "B", "level": "advanced", "position": {"row": 0, "col": 0}}
            ]}"#,
        )
        .unwrap();

        let err = DataStore::new(temp_dir.path()).load().unwrap_err();
        assert!(format!("{err:#}").contains("Invalid court layout"));
        assert!(is_invalid_data(&err));
    }

    #[test]
    fn test_out_of_range_grid_fails_load() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(COURT_LAYOUT_FILE),
            r#"{"courts": [], "layout_settings": {"rows": 70000, "cols": 70000,
                "center_name": "Hall", "total_courts": 6}}"#,
        )
        .unwrap();

        let err = DataStore::new(temp_dir.path()).load().unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("Invalid court layout"));
        assert!(message.contains("Grid rows must be between 1 and 10, got 70000"));
        assert!(is_invalid_data(&err));
    }

    #[test]
    fn test_zero_target_fails_load() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(COURT_LAYOUT_FILE),
            r#"{"courts": [], "layout_settings": {"rows": 2, "cols": 2,
                "center_name": "Hall", "total_courts": 0}}"#,
        )
        .unwrap();

        let err = DataStore::new(temp_dir.path()).load().unwrap_err();
        assert!(format!("{err:#}").contains("Target courts must be between 1 and 50"));
    }

    #[test]
    fn test_legacy_layout_settings_load() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(COURT_LAYOUT_FILE),
            r#"{"courts": [], "layout_settings": {"rows": 2, "cols": 3,
                "center_name": "Hall", "image_width": 1200, "image_height": 800}}"#,
        )
        .unwrap();

        let data = DataStore::new(temp_dir.path()).load().unwrap();
        assert_eq!(data.layout.layout_settings.cols, 3);
        assert!(data.layout.courts.is_empty());
    }
}
