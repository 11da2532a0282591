//! Court grid editing operations.
//!
//! [`GridStore`] borrows a [`CourtLayout`] and an [`AuditSink`] for the
//! duration of one request. Every operation validates before it mutates, so a
//! returned error always leaves the layout untouched, and every successful
//! change appends exactly one audit entry.

use crate::constants::{MAX_GRID_DIMENSION, MAX_TARGET_COURTS};
use crate::models::{
    AuditEntry, AuditSink, Court, CourtLayout, GridError, GridPosition, LevelCounts, SkillLevel,
    UserType,
};
use serde::Serialize;
use tracing::{info, warn};

/// Mutation front-end for the court layout.
pub struct GridStore<'a> {
    layout: &'a mut CourtLayout,
    audit: &'a mut dyn AuditSink,
}

impl<'a> GridStore<'a> {
    /// Wraps a layout and the sink its changes are recorded in.
    pub fn new(layout: &'a mut CourtLayout, audit: &'a mut dyn AuditSink) -> Self {
        Self { layout, audit }
    }

    /// Read access to the wrapped layout.
    #[must_use]
    pub fn layout(&self) -> &CourtLayout {
        self.layout
    }

    /// Adds a court, either at `position` or at the first free cell.
    ///
    /// # Errors
    ///
    /// - `InvalidOperation` for a blank name or an out-of-grid position
    /// - `DuplicateName` if an active court already has this name
    /// - `PositionConflict` if the requested cell is taken
    /// - `CapacityExceeded` if no cell is free
    pub fn add_court(
        &mut self,
        name: &str,
        level: SkillLevel,
        position: Option<GridPosition>,
    ) -> Result<Court, GridError> {
        let name = validate_name(name)?;
        if self.layout.name_in_use(name, None) {
            return Err(GridError::DuplicateName(name.to_string()));
        }

        let position = match position {
            Some(position) => {
                self.ensure_in_bounds(position)?;
                self.ensure_free(position, None)?;
                position
            }
            None => self.layout.first_free_cell().ok_or(GridError::CapacityExceeded {
                rows: self.layout.layout_settings.rows,
                cols: self.layout.layout_settings.cols,
            })?,
        };

        let court = self.insert_court(name.to_string(), level, position);
        info!(id = court.id, name = %court.name, %position, "court added");
        self.record(
            "Added Court",
            format!("{} ({}) at {}", court.name, court.level, position),
        );
        Ok(court)
    }

    /// Moves a court to an empty cell.
    ///
    /// Moving onto an occupied cell is rejected; use [`Self::swap_positions`]
    /// to exchange two courts.
    pub fn move_court(&mut self, id: u32, to: GridPosition) -> Result<(), GridError> {
        let court = self.active_court(id)?;
        let (name, from) = (court.name.clone(), court.position);

        self.ensure_in_bounds(to)?;
        if from == to {
            return Ok(());
        }
        self.ensure_free(to, Some(id))?;

        if let Some(court) = self.layout.find_mut(id) {
            court.position = to;
        }
        info!(id, %from, %to, "court moved");
        self.record("Moved Court", format!("'{name}' moved from {from} to {to}"));
        Ok(())
    }

    /// Exchanges the positions of two active courts.
    pub fn swap_positions(&mut self, first: u32, second: u32) -> Result<(), GridError> {
        if first == second {
            return Err(GridError::InvalidOperation(
                "cannot swap a court with itself".to_string(),
            ));
        }

        let a = self.active_court(first)?;
        let (a_name, a_pos) = (a.name.clone(), a.position);
        let b = self.active_court(second)?;
        let (b_name, b_pos) = (b.name.clone(), b.position);

        for court in &mut self.layout.courts {
            if court.id == first {
                court.position = b_pos;
            } else if court.id == second {
                court.position = a_pos;
            }
        }

        info!(first, second, "courts swapped");
        self.record(
            "Swapped Courts",
            format!("'{a_name}' {a_pos} <-> '{b_name}' {b_pos}"),
        );
        Ok(())
    }

    /// Soft-deletes a court.
    ///
    /// Returns `false` when the court was already inactive; nothing is
    /// recorded in that case.
    pub fn remove_court(&mut self, id: u32) -> Result<bool, GridError> {
        let court = self.layout.find_mut(id).ok_or(GridError::UnknownCourt(id))?;
        if !court.active {
            return Ok(false);
        }

        court.active = false;
        let name = court.name.clone();
        info!(id, name = %name, "court deleted");
        self.record("Deleted Court", format!("'{name}' removed"));
        Ok(true)
    }

    /// Renames and/or re-levels an active court.
    pub fn update_court(
        &mut self,
        id: u32,
        name: Option<&str>,
        level: Option<SkillLevel>,
    ) -> Result<Court, GridError> {
        if name.is_none() && level.is_none() {
            return Err(GridError::InvalidOperation(
                "nothing to update: give a new name or level".to_string(),
            ));
        }

        self.active_court(id)?;
        let name = name.map(validate_name).transpose()?;
        if let Some(name) = name {
            if self.layout.name_in_use(name, Some(id)) {
                return Err(GridError::DuplicateName(name.to_string()));
            }
        }

        let court = self.layout.find_mut(id).ok_or(GridError::UnknownCourt(id))?;
        let mut changes = Vec::new();
        if let Some(name) = name {
            if court.name != name {
                changes.push(format!("name '{}' -> '{}'", court.name, name));
                court.name = name.to_string();
            }
        }
        if let Some(level) = level {
            if court.level != level {
                changes.push(format!("level {} -> {}", court.level, level));
                court.level = level;
            }
        }
        let updated = court.clone();

        let details = if changes.is_empty() {
            format!("'{}' updated", updated.name)
        } else {
            format!("'{}' updated: {}", updated.name, changes.join(", "))
        };
        info!(id, "court updated");
        self.record("Updated Court", details);
        Ok(updated)
    }

    /// Changes the grid dimensions.
    ///
    /// Courts are never moved or deactivated; courts left outside a shrunken
    /// grid stay active but are skipped by rendering and placement until the
    /// grid grows again or they are moved. Returns how many courts are hidden.
    pub fn resize_grid(&mut self, rows: u32, cols: u32) -> Result<usize, GridError> {
        for (label, value) in [("rows", rows), ("cols", cols)] {
            if value == 0 || value > MAX_GRID_DIMENSION {
                return Err(GridError::InvalidOperation(format!(
                    "{label} must be between 1 and {MAX_GRID_DIMENSION}, got {value}"
                )));
            }
        }

        let settings = &mut self.layout.layout_settings;
        let (old_rows, old_cols) = (settings.rows, settings.cols);
        settings.rows = rows;
        settings.cols = cols;

        let hidden = hidden_courts(self.layout);
        if hidden > 0 {
            warn!(hidden, rows, cols, "active courts fall outside the resized grid");
        }
        info!(rows, cols, "grid resized");
        self.record(
            "Resized Grid",
            format!("{old_rows}x{old_cols} -> {rows}x{cols}"),
        );
        Ok(hidden)
    }

    /// Fills free cells in row-major order until `target` active courts exist
    /// or the grid is full. Returns the number of courts created.
    ///
    /// Generated courts are named `Court {n}`, where `n` starts one past the
    /// active count and skips names already in use; levels cycle
    /// beginner, intermediate, advanced.
    pub fn auto_fill_empty(&mut self, target: u32) -> usize {
        let mut filled = 0;

        loop {
            let active = self.layout.active_courts().count();
            if active >= target as usize {
                break;
            }
            let Some(cell) = self.layout.first_free_cell() else {
                break;
            };

            let name = self.generated_name(active + 1);
            self.insert_court(name, SkillLevel::cycled(filled), cell);
            filled += 1;
        }

        if filled > 0 {
            info!(filled, target, "auto-filled courts");
            self.record("Auto-filled Courts", format!("{filled} courts auto-generated"));
        }
        filled
    }

    /// Deactivates every active court. Returns the number deactivated.
    pub fn reset_courts(&mut self) -> usize {
        let mut cleared = 0;
        for court in self.layout.courts.iter_mut().filter(|c| c.active) {
            court.active = false;
            cleared += 1;
        }

        if cleared > 0 {
            info!(cleared, "courts reset");
            self.record("Reset Courts", "All courts cleared".to_string());
        }
        cleared
    }

    /// Sets the title drawn above the grid.
    pub fn rename_center(&mut self, center_name: &str) -> Result<(), GridError> {
        let center_name = center_name.trim();
        if center_name.is_empty() {
            return Err(GridError::InvalidOperation(
                "center name cannot be empty".to_string(),
            ));
        }

        self.layout.layout_settings.center_name = center_name.to_string();
        self.record("Renamed Center", format!("Center renamed to '{center_name}'"));
        Ok(())
    }

    /// Sets how many courts the layout is expected to hold.
    pub fn set_target_courts(&mut self, total: u32) -> Result<(), GridError> {
        if total == 0 || total > MAX_TARGET_COURTS {
            return Err(GridError::InvalidOperation(format!(
                "target courts must be between 1 and {MAX_TARGET_COURTS}, got {total}"
            )));
        }

        self.layout.layout_settings.total_courts = total;
        self.record("Set Target Courts", format!("{total} courts targeted"));
        Ok(())
    }

    /// Marks the layout as finished once every targeted court is placed.
    ///
    /// Records a "Layout Finalized" entry and returns the final summary.
    /// Fails without recording anything while courts are still missing.
    pub fn finalize_layout(&mut self) -> Result<LayoutSummary, GridError> {
        let summary = LayoutSummary::of(self.layout);
        if !summary.complete {
            return Err(GridError::InvalidOperation(format!(
                "{} courts still need to be assigned",
                summary.remaining
            )));
        }

        info!(courts = summary.target, "layout finalized");
        self.record("Layout Finalized", format!("{} courts configured", summary.target));
        Ok(summary)
    }

    fn active_court(&self, id: u32) -> Result<&Court, GridError> {
        let court = self.layout.find(id).ok_or(GridError::UnknownCourt(id))?;
        if !court.active {
            return Err(GridError::InvalidOperation(format!(
                "court '{}' has been deleted",
                court.name
            )));
        }
        Ok(court)
    }

    fn ensure_in_bounds(&self, position: GridPosition) -> Result<(), GridError> {
        let settings = &self.layout.layout_settings;
        if settings.contains(position) {
            Ok(())
        } else {
            Err(GridError::InvalidOperation(format!(
                "position {position} is outside the {}x{} grid",
                settings.rows, settings.cols
            )))
        }
    }

    fn ensure_free(&self, position: GridPosition, mover: Option<u32>) -> Result<(), GridError> {
        match self.layout.court_at(position) {
            Some(occupant) if Some(occupant.id) != mover => Err(GridError::PositionConflict {
                position,
                occupant: occupant.name.clone(),
            }),
            _ => Ok(()),
        }
    }

    fn generated_name(&self, start: usize) -> String {
        let mut n = start;
        loop {
            let name = format!("Court {n}");
            if !self.layout.name_in_use(&name, None) {
                return name;
            }
            n += 1;
        }
    }

    fn insert_court(&mut self, name: String, level: SkillLevel, position: GridPosition) -> Court {
        let court = Court::new(self.layout.next_id(), name, level, position);
        self.layout.courts.push(court.clone());
        court
    }

    fn record(&mut self, action: &str, details: String) {
        self.audit
            .append(AuditEntry::now(action, details, UserType::Admin));
    }
}

fn validate_name(name: &str) -> Result<&str, GridError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(GridError::InvalidOperation(
            "court name cannot be empty".to_string(),
        ));
    }
    Ok(name)
}

fn hidden_courts(layout: &CourtLayout) -> usize {
    layout.active_courts().count() - layout.visible_courts().count()
}

/// Progress of the layout towards its target court count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutSummary {
    /// Title of the layout
    pub center_name: String,
    /// Grid rows
    pub rows: u32,
    /// Grid columns
    pub cols: u32,
    /// Number of grid cells
    pub capacity: u32,
    /// Courts the layout should hold
    pub target: u32,
    /// Active courts inside the grid
    pub assigned: usize,
    /// Courts still to be placed
    pub remaining: usize,
    /// `assigned / target` as a whole percentage
    pub completion_percent: u32,
    /// Active courts outside the grid (after a shrink)
    pub hidden: usize,
    /// Per-level counts over all active courts
    pub levels: LevelCounts,
    /// Whether every targeted court has been placed
    pub complete: bool,
}

impl LayoutSummary {
    /// Summarizes a layout.
    #[must_use]
    pub fn of(layout: &CourtLayout) -> Self {
        let settings = &layout.layout_settings;
        let assigned = layout.visible_courts().count();
        let target = settings.total_courts;
        let completion_percent = if target == 0 {
            0
        } else {
            ((assigned as f64 / f64::from(target)) * 100.0).round() as u32
        };

        Self {
            center_name: settings.center_name.clone(),
            rows: settings.rows,
            cols: settings.cols,
            capacity: settings.capacity(),
            target,
            assigned,
            remaining: (target as usize).saturating_sub(assigned),
            completion_percent,
            hidden: hidden_courts(layout),
            levels: layout.level_counts(),
            complete: assigned >= target as usize,
        }
    }
}
