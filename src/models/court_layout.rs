//! Court layout document: the court list plus grid settings.

use crate::constants::{DEFAULT_CENTER_NAME, MAX_GRID_DIMENSION, MAX_TARGET_COURTS};
use crate::models::court::{Court, GridPosition, SkillLevel};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Validation failures raised by court layout operations.
///
/// All variants are user-correctable; none leaves the layout modified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Another active court already uses this name.
    #[error("court name '{0}' already exists")]
    DuplicateName(String),
    /// Target cell is taken by another active court.
    #[error("position {position} is already occupied by '{occupant}'")]
    PositionConflict {
        /// Requested cell
        position: GridPosition,
        /// Name of the court occupying it
        occupant: String,
    },
    /// Every cell of the grid holds an active court.
    #[error("no empty positions available in the {rows}x{cols} grid")]
    CapacityExceeded {
        /// Grid rows
        rows: u32,
        /// Grid columns
        cols: u32,
    },
    /// Request is malformed or not applicable to the court's state.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
    /// A court level that is not beginner/intermediate/advanced.
    #[error("unknown court level '{0}'")]
    UnknownLevel(String),
    /// No court record carries this id.
    #[error("court {0} not found")]
    UnknownCourt(u32),
}

/// Grid dimensions and presentation settings.
///
/// Legacy keys such as `image_width` or `court_style` are ignored on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Number of grid rows
    pub rows: u32,
    /// Number of grid columns
    pub cols: u32,
    /// Title drawn above the grid
    pub center_name: String,
    /// Number of courts the layout is expected to hold
    pub total_courts: u32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            rows: 3,
            cols: 4,
            center_name: DEFAULT_CENTER_NAME.to_string(),
            total_courts: 6,
        }
    }
}

impl LayoutSettings {
    /// Number of cells in the grid.
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.rows.saturating_mul(self.cols)
    }

    /// Whether `position` lies inside the current grid bounds.
    #[must_use]
    pub const fn contains(&self, position: GridPosition) -> bool {
        position.row < self.rows && position.col < self.cols
    }

    /// Iterates all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = GridPosition> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| GridPosition::new(row, col)))
    }
}

/// Per-level court counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LevelCounts {
    /// Beginner courts
    pub beginner: usize,
    /// Intermediate courts
    pub intermediate: usize,
    /// Advanced courts
    pub advanced: usize,
}

impl LevelCounts {
    /// Counts the levels of the given courts.
    pub fn of<'a>(courts: impl IntoIterator<Item = &'a Court>) -> Self {
        let mut counts = Self::default();
        for court in courts {
            match court.level {
                SkillLevel::Beginner => counts.beginner += 1,
                SkillLevel::Intermediate => counts.intermediate += 1,
                SkillLevel::Advanced => counts.advanced += 1,
            }
        }
        counts
    }

    /// Count for a single level.
    #[must_use]
    pub const fn get(&self, level: SkillLevel) -> usize {
        match level {
            SkillLevel::Beginner => self.beginner,
            SkillLevel::Intermediate => self.intermediate,
            SkillLevel::Advanced => self.advanced,
        }
    }

    /// Sum over all levels.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.beginner + self.intermediate + self.advanced
    }
}

/// The court layout document persisted as `court_layout.json`.
///
/// # Invariants
///
/// - No two active courts share a position
/// - No two active courts share a name (exact match)
/// - Court ids are unique across active and deleted courts
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CourtLayout {
    /// All court records, including soft-deleted ones
    #[serde(default)]
    pub courts: Vec<Court>,
    /// Grid dimensions and title
    #[serde(default)]
    pub layout_settings: LayoutSettings,
}

impl CourtLayout {
    /// Creates an empty layout with the given settings.
    #[must_use]
    pub const fn new(layout_settings: LayoutSettings) -> Self {
        Self {
            courts: Vec::new(),
            layout_settings,
        }
    }

    /// First-run layout: six courts in two columns on a 3x4 grid.
    #[must_use]
    pub fn seed() -> Self {
        let levels = [
            SkillLevel::Beginner,
            SkillLevel::Beginner,
            SkillLevel::Intermediate,
            SkillLevel::Intermediate,
            SkillLevel::Advanced,
            SkillLevel::Advanced,
        ];

        let courts = levels
            .iter()
            .enumerate()
            .map(|(i, &level)| {
                let id = i as u32 + 1;
                let position = GridPosition::new(i as u32 / 2, i as u32 % 2);
                Court::new(id, format!("Court {id}"), level, position)
            })
            .collect();

        Self {
            courts,
            layout_settings: LayoutSettings::default(),
        }
    }

    /// Active (not deleted) courts in storage order.
    pub fn active_courts(&self) -> impl Iterator<Item = &Court> {
        self.courts.iter().filter(|c| c.active)
    }

    /// Active courts that fall inside the current grid.
    pub fn visible_courts(&self) -> impl Iterator<Item = &Court> {
        self.active_courts()
            .filter(|c| self.layout_settings.contains(c.position))
    }

    /// Looks up a court record (active or not) by id.
    #[must_use]
    pub fn find(&self, id: u32) -> Option<&Court> {
        self.courts.iter().find(|c| c.id == id)
    }

    /// Mutable lookup by id.
    pub fn find_mut(&mut self, id: u32) -> Option<&mut Court> {
        self.courts.iter_mut().find(|c| c.id == id)
    }

    /// Active court occupying `position`, if any.
    #[must_use]
    pub fn court_at(&self, position: GridPosition) -> Option<&Court> {
        self.active_courts().find(|c| c.position == position)
    }

    /// First cell in row-major order not occupied by an active court.
    #[must_use]
    pub fn first_free_cell(&self) -> Option<GridPosition> {
        let occupied: HashSet<GridPosition> = self.active_courts().map(|c| c.position).collect();
        self.layout_settings
            .cells()
            .find(|cell| !occupied.contains(cell))
    }

    /// Id for the next court: highest id ever assigned plus one.
    #[must_use]
    pub fn next_id(&self) -> u32 {
        self.courts.iter().map(|c| c.id).max().unwrap_or(0) + 1
    }

    /// Whether an active court other than `except` uses `name`.
    #[must_use]
    pub fn name_in_use(&self, name: &str, except: Option<u32>) -> bool {
        self.active_courts()
            .any(|c| c.name == name && Some(c.id) != except)
    }

    /// Level counts over all active courts.
    #[must_use]
    pub fn level_counts(&self) -> LevelCounts {
        LevelCounts::of(self.active_courts())
    }

    /// Validates the layout invariants.
    ///
    /// Checks:
    /// - Grid rows/cols are within 1..=`MAX_GRID_DIMENSION`
    /// - The court target is within 1..=`MAX_TARGET_COURTS`
    /// - Court ids are unique
    /// - Active court names are unique
    /// - Active court positions are unique
    pub fn validate(&self) -> Result<()> {
        let settings = &self.layout_settings;
        for (label, value) in [("rows", settings.rows), ("cols", settings.cols)] {
            if value == 0 || value > MAX_GRID_DIMENSION {
                anyhow::bail!("Grid {label} must be between 1 and {MAX_GRID_DIMENSION}, got {value}");
            }
        }
        if settings.total_courts == 0 || settings.total_courts > MAX_TARGET_COURTS {
            anyhow::bail!(
                "Target courts must be between 1 and {MAX_TARGET_COURTS}, got {}",
                settings.total_courts
            );
        }

        let mut ids = HashSet::new();
        for court in &self.courts {
            if !ids.insert(court.id) {
                anyhow::bail!("Duplicate court id {}", court.id);
            }
        }

        let mut names = HashSet::new();
        let mut positions = HashSet::new();
        for court in self.active_courts() {
            if !names.insert(court.name.as_str()) {
                anyhow::bail!("Duplicate active court name '{}'", court.name);
            }
            if !positions.insert(court.position) {
                anyhow::bail!(
                    "Courts '{}' and another active court share position {}",
                    court.name,
                    court.position
                );
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_layout_is_valid() {
        let layout = CourtLayout::seed();
        assert_eq!(layout.courts.len(), 6);
        assert!(layout.validate().is_ok());
        assert_eq!(layout.courts[2].position, GridPosition::new(1, 0));
        assert_eq!(layout.courts[5].level, SkillLevel::Advanced);
        assert_eq!(layout.level_counts().total(), 6);
    }

    #[test]
    fn test_cells_row_major() {
        let settings = LayoutSettings {
            rows: 2,
            cols: 2,
            ..LayoutSettings::default()
        };
        let cells: Vec<_> = settings.cells().collect();
        assert_eq!(
            cells,
            vec![
                GridPosition::new(0, 0),
                GridPosition::new(0, 1),
                GridPosition::new(1, 0),
                GridPosition::new(1, 1)
            ]
        );
    }

    #[test]
    fn test_first_free_cell_skips_inactive() {
        let mut layout = CourtLayout::new(LayoutSettings::default());
        let mut court = Court::new(1, "Court 1", SkillLevel::Beginner, GridPosition::new(0, 0));
        court.active = false;
        layout.courts.push(court);
        layout
            .courts
            .push(Court::new(2, "Court 2", SkillLevel::Beginner, GridPosition::new(0, 1)));

        assert_eq!(layout.first_free_cell(), Some(GridPosition::new(0, 0)));
        assert_eq!(layout.next_id(), 3);
    }

    #[test]
    fn test_name_in_use_ignores_self_and_inactive() {
        let mut layout = CourtLayout::seed();
        assert!(layout.name_in_use("Court 1", None));
        assert!(!layout.name_in_use("Court 1", Some(1)));

        layout.find_mut(1).unwrap().active = false;
        assert!(!layout.name_in_use("Court 1", None));
    }

    #[test]
    fn test_validate_rejects_shared_position() {
        let mut layout = CourtLayout::seed();
        layout.find_mut(2).unwrap().position = GridPosition::new(0, 0);
        assert!(layout.validate().is_err());

        // A deleted court may sit anywhere
        layout.find_mut(2).unwrap().active = false;
        assert!(layout.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_settings() {
        let mut layout = CourtLayout::seed();
        layout.layout_settings.rows = 70_000;
        layout.layout_settings.cols = 70_000;
        assert!(layout.validate().is_err());
        assert_eq!(layout.layout_settings.capacity(), u32::MAX);

        let mut layout = CourtLayout::seed();
        layout.layout_settings.cols = 0;
        assert!(layout.validate().is_err());

        let mut layout = CourtLayout::seed();
        layout.layout_settings.total_courts = MAX_TARGET_COURTS + 1;
        assert!(layout.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_duplicate_ids() {
        let mut layout = CourtLayout::seed();
        layout.find_mut(2).unwrap().id = 1;
        assert!(layout.validate().is_err());
    }

    #[test]
    fn test_settings_ignore_legacy_keys() {
        let settings: LayoutSettings = serde_json::from_str(
            r#"{"rows": 2, "cols": 5, "center_name": "Hall", "image_width": 1200, "court_style": "modern"}"#,
        )
        .unwrap();
        assert_eq!(settings.rows, 2);
        assert_eq!(settings.cols, 5);
        assert_eq!(settings.total_courts, 6);
    }

    #[test]
    fn test_visible_courts_respects_bounds() {
        let mut layout = CourtLayout::seed();
        layout.layout_settings.rows = 1;
        assert_eq!(layout.visible_courts().count(), 2);
        assert_eq!(layout.active_courts().count(), 6);
    }
}
