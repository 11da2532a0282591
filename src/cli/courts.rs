//! Court management commands.
//!
//! Provides commands to list, add, move, swap, update and delete courts in
//! the court layout, plus bulk auto-fill and reset.

use crate::cli::common::{load_data, print_json, save_data, CliError, CliResult, DataDirArg};
use crate::models::{Court, GridPosition, SkillLevel};
use crate::services::{AppData, GridStore};
use clap::{Args, Subcommand};
use serde::Serialize;

/// Manage courts in the layout
#[derive(Debug, Clone, Args)]
pub struct CourtsArgs {
    /// Courts subcommand
    #[command(subcommand)]
    pub command: CourtsCommand,
}

/// Court management subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum CourtsCommand {
    /// List active courts
    List(ListCourtsArgs),
    /// Add a court
    Add(AddCourtArgs),
    /// Move a court to an empty cell
    Move(MoveCourtArgs),
    /// Swap the positions of two courts
    Swap(SwapCourtsArgs),
    /// Delete a court
    Remove(RemoveCourtArgs),
    /// Rename or re-level a court
    Update(UpdateCourtArgs),
    /// Fill empty cells with generated courts
    Autofill(AutofillArgs),
    /// Delete every court
    Reset(ResetCourtsArgs),
}

/// List active courts
#[derive(Debug, Clone, Args)]
pub struct ListCourtsArgs {
    /// Data directory selection
    #[command(flatten)]
    pub data: DataDirArg,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Add a court
#[derive(Debug, Clone, Args)]
pub struct AddCourtArgs {
    /// Data directory selection
    #[command(flatten)]
    pub data: DataDirArg,

    /// Court name (unique among active courts)
    #[arg(long, value_name = "NAME")]
    pub name: String,

    /// Skill level: beginner, intermediate or advanced
    #[arg(long, value_name = "LEVEL")]
    pub level: String,

    /// Grid row (0-based); first free cell if omitted
    #[arg(long, value_name = "ROW", requires = "col")]
    pub row: Option<u32>,

    /// Grid column (0-based)
    #[arg(long, value_name = "COL", requires = "row")]
    pub col: Option<u32>,
}

/// Move a court to an empty cell
#[derive(Debug, Clone, Args)]
pub struct MoveCourtArgs {
    /// Data directory selection
    #[command(flatten)]
    pub data: DataDirArg,

    /// Court id
    #[arg(long, value_name = "ID")]
    pub id: u32,

    /// Target row (0-based)
    #[arg(long, value_name = "ROW")]
    pub row: u32,

    /// Target column (0-based)
    #[arg(long, value_name = "COL")]
    pub col: u32,
}

/// Swap the positions of two courts
#[derive(Debug, Clone, Args)]
pub struct SwapCourtsArgs {
    /// Data directory selection
    #[command(flatten)]
    pub data: DataDirArg,

    /// First court id
    #[arg(long, value_name = "ID")]
    pub first: u32,

    /// Second court id
    #[arg(long, value_name = "ID")]
    pub second: u32,
}

/// Delete a court
#[derive(Debug, Clone, Args)]
pub struct RemoveCourtArgs {
    /// Data directory selection
    #[command(flatten)]
    pub data: DataDirArg,

    /// Court id
    #[arg(long, value_name = "ID")]
    pub id: u32,
}

/// Rename or re-level a court
#[derive(Debug, Clone, Args)]
pub struct UpdateCourtArgs {
    /// Data directory selection
    #[command(flatten)]
    pub data: DataDirArg,

    /// Court id
    #[arg(long, value_name = "ID")]
    pub id: u32,

    /// New name
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// New skill level
    #[arg(long, value_name = "LEVEL")]
    pub level: Option<String>,
}

/// Fill empty cells with generated courts
#[derive(Debug, Clone, Args)]
pub struct AutofillArgs {
    /// Data directory selection
    #[command(flatten)]
    pub data: DataDirArg,

    /// Number of active courts to reach (defaults to the layout's target)
    #[arg(long, value_name = "COUNT")]
    pub target: Option<u32>,
}

/// Delete every court
#[derive(Debug, Clone, Args)]
pub struct ResetCourtsArgs {
    /// Data directory selection
    #[command(flatten)]
    pub data: DataDirArg,
}

// JSON response types
#[derive(Debug, Serialize)]
struct ListCourtsResponse<'a> {
    courts: Vec<&'a Court>,
    count: usize,
}

impl CourtsArgs {
    /// Execute the courts command
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            CourtsCommand::List(args) => args.execute(),
            CourtsCommand::Add(args) => args.execute(),
            CourtsCommand::Move(args) => args.execute(),
            CourtsCommand::Swap(args) => args.execute(),
            CourtsCommand::Remove(args) => args.execute(),
            CourtsCommand::Update(args) => args.execute(),
            CourtsCommand::Autofill(args) => args.execute(),
            CourtsCommand::Reset(args) => args.execute(),
        }
    }
}

/// Loads data, runs `edit` against a [`GridStore`] and saves on success.
fn with_grid<T>(
    data_dir: &DataDirArg,
    edit: impl FnOnce(&mut GridStore<'_>) -> CliResult<T>,
) -> CliResult<T> {
    let (_, store) = data_dir.open()?;
    let mut data: AppData = load_data(&store)?;
    let result = {
        let mut grid = GridStore::new(&mut data.layout, &mut data.audit);
        edit(&mut grid)?
    };
    save_data(&store, &data)?;
    Ok(result)
}

fn parse_level(level: &str) -> CliResult<SkillLevel> {
    level.parse().map_err(CliError::from)
}

impl ListCourtsArgs {
    /// Execute the list command
    pub fn execute(&self) -> CliResult<()> {
        let (_, store) = self.data.open()?;
        let data = load_data(&store)?;
        let settings = &data.layout.layout_settings;

        let courts: Vec<&Court> = data.layout.active_courts().collect();
        if self.json {
            return print_json(&ListCourtsResponse {
                count: courts.len(),
                courts,
            });
        }

        if courts.is_empty() {
            println!("No courts defined.");
            return Ok(());
        }

        println!("Courts ({}):", courts.len());
        println!();
        for court in courts {
            let hidden = if settings.contains(court.position) {
                ""
            } else {
                "  (outside grid)"
            };
            println!(
                "  {:>3}  {:<24} {:<13} {}{}",
                court.id,
                court.name,
                court.level.title(),
                court.position,
                hidden
            );
        }
        Ok(())
    }
}

impl AddCourtArgs {
    /// Execute the add command
    pub fn execute(&self) -> CliResult<()> {
        let level = parse_level(&self.level)?;
        let position = self.row.zip(self.col).map(|(row, col)| GridPosition::new(row, col));

        let court = with_grid(&self.data, |grid| {
            Ok(grid.add_court(&self.name, level, position)?)
        })?;
        println!(
            "Added court {} '{}' ({}) at {}",
            court.id,
            court.name,
            court.level.title(),
            court.position
        );
        Ok(())
    }
}

impl MoveCourtArgs {
    /// Execute the move command
    pub fn execute(&self) -> CliResult<()> {
        let to = GridPosition::new(self.row, self.col);
        with_grid(&self.data, |grid| Ok(grid.move_court(self.id, to)?))?;
        println!("Moved court {} to {to}", self.id);
        Ok(())
    }
}

impl SwapCourtsArgs {
    /// Execute the swap command
    pub fn execute(&self) -> CliResult<()> {
        with_grid(&self.data, |grid| {
            Ok(grid.swap_positions(self.first, self.second)?)
        })?;
        println!("Swapped courts {} and {}", self.first, self.second);
        Ok(())
    }
}

impl RemoveCourtArgs {
    /// Execute the remove command
    pub fn execute(&self) -> CliResult<()> {
        let removed = with_grid(&self.data, |grid| Ok(grid.remove_court(self.id)?))?;
        if removed {
            println!("Deleted court {}", self.id);
        } else {
            println!("Court {} was already deleted", self.id);
        }
        Ok(())
    }
}

impl UpdateCourtArgs {
    /// Execute the update command
    pub fn execute(&self) -> CliResult<()> {
        let level = self.level.as_deref().map(parse_level).transpose()?;
        let court = with_grid(&self.data, |grid| {
            Ok(grid.update_court(self.id, self.name.as_deref(), level)?)
        })?;
        println!(
            "Updated court {}: '{}' ({})",
            court.id,
            court.name,
            court.level.title()
        );
        Ok(())
    }
}

impl AutofillArgs {
    /// Execute the autofill command
    pub fn execute(&self) -> CliResult<()> {
        let filled = with_grid(&self.data, |grid| {
            let target = self
                .target
                .unwrap_or(grid.layout().layout_settings.total_courts);
            Ok(grid.auto_fill_empty(target))
        })?;
        println!("{filled} courts auto-generated");
        Ok(())
    }
}

impl ResetCourtsArgs {
    /// Execute the reset command
    pub fn execute(&self) -> CliResult<()> {
        let cleared = with_grid(&self.data, |grid| Ok(grid.reset_courts()))?;
        println!("Cleared {cleared} courts");
        Ok(())
    }
}
