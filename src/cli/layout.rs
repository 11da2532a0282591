//! Layout-wide commands: summary, grid size, center name and court target.

use crate::cli::common::{load_data, print_json, save_data, CliResult, DataDirArg};
use crate::render::legend::stats_line;
use crate::services::{GridStore, LayoutSummary};
use clap::{Args, Subcommand};

/// Inspect and configure the court grid
#[derive(Debug, Clone, Args)]
pub struct LayoutArgs {
    /// Layout subcommand
    #[command(subcommand)]
    pub command: LayoutCommand,
}

/// Layout subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum LayoutCommand {
    /// Show grid settings and progress towards the court target
    Show(ShowLayoutArgs),
    /// Change the grid dimensions
    Resize(ResizeArgs),
    /// Change the center name drawn above the grid
    Rename(RenameArgs),
    /// Set how many courts the layout should hold
    Target(TargetArgs),
    /// Record the layout as finished once every targeted court is placed
    Finalize(FinalizeArgs),
}

/// Show grid settings
#[derive(Debug, Clone, Args)]
pub struct ShowLayoutArgs {
    /// Data directory selection
    #[command(flatten)]
    pub data: DataDirArg,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Change the grid dimensions
#[derive(Debug, Clone, Args)]
pub struct ResizeArgs {
    /// Data directory selection
    #[command(flatten)]
    pub data: DataDirArg,

    /// Number of rows (1-10)
    #[arg(long, value_name = "N")]
    pub rows: u32,

    /// Number of columns (1-10)
    #[arg(long, value_name = "N")]
    pub cols: u32,
}

/// Change the center name
#[derive(Debug, Clone, Args)]
pub struct RenameArgs {
    /// Data directory selection
    #[command(flatten)]
    pub data: DataDirArg,

    /// New center name
    #[arg(long, value_name = "NAME")]
    pub center_name: String,
}

/// Set the court target
#[derive(Debug, Clone, Args)]
pub struct TargetArgs {
    /// Data directory selection
    #[command(flatten)]
    pub data: DataDirArg,

    /// Number of courts (1-50)
    #[arg(long, value_name = "N")]
    pub count: u32,
}

/// Finalize the layout
#[derive(Debug, Clone, Args)]
pub struct FinalizeArgs {
    /// Data directory selection
    #[command(flatten)]
    pub data: DataDirArg,
}

impl LayoutArgs {
    /// Execute the layout command
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            LayoutCommand::Show(args) => args.execute(),
            LayoutCommand::Resize(args) => args.execute(),
            LayoutCommand::Rename(args) => args.execute(),
            LayoutCommand::Target(args) => args.execute(),
            LayoutCommand::Finalize(args) => args.execute(),
        }
    }
}

impl ShowLayoutArgs {
    /// Execute the show command
    pub fn execute(&self) -> CliResult<()> {
        let (_, store) = self.data.open()?;
        let data = load_data(&store)?;
        let summary = LayoutSummary::of(&data.layout);

        if self.json {
            return print_json(&summary);
        }

        println!("{}", summary.center_name);
        println!();
        println!(
            "  Grid:       {} x {} ({} cells)",
            summary.rows, summary.cols, summary.capacity
        );
        println!(
            "  Courts:     {}/{} assigned ({}%)",
            summary.assigned, summary.target, summary.completion_percent
        );
        if summary.complete {
            println!("  Status:     all courts assigned");
        } else {
            println!("  Status:     {} remaining", summary.remaining);
        }
        if summary.hidden > 0 {
            println!(
                "  Warning:    {} active courts lie outside the grid",
                summary.hidden
            );
        }
        println!("  {}", stats_line(&summary.levels));
        Ok(())
    }
}

impl ResizeArgs {
    /// Execute the resize command
    pub fn execute(&self) -> CliResult<()> {
        let (_, store) = self.data.open()?;
        let mut data = load_data(&store)?;
        let hidden =
            GridStore::new(&mut data.layout, &mut data.audit).resize_grid(self.rows, self.cols)?;
        save_data(&store, &data)?;

        println!("Grid resized to {} x {}", self.rows, self.cols);
        if hidden > 0 {
            eprintln!(
                "Warning: {hidden} active courts are outside the new grid and will not be shown"
            );
        }
        Ok(())
    }
}

impl RenameArgs {
    /// Execute the rename command
    pub fn execute(&self) -> CliResult<()> {
        let (_, store) = self.data.open()?;
        let mut data = load_data(&store)?;
        GridStore::new(&mut data.layout, &mut data.audit).rename_center(&self.center_name)?;
        save_data(&store, &data)?;

        println!(
            "Center renamed to '{}'",
            data.layout.layout_settings.center_name
        );
        Ok(())
    }
}

impl TargetArgs {
    /// Execute the target command
    pub fn execute(&self) -> CliResult<()> {
        let (_, store) = self.data.open()?;
        let mut data = load_data(&store)?;
        GridStore::new(&mut data.layout, &mut data.audit).set_target_courts(self.count)?;
        save_data(&store, &data)?;

        println!("Court target set to {}", self.count);
        Ok(())
    }
}

impl FinalizeArgs {
    /// Execute the finalize command
    pub fn execute(&self) -> CliResult<()> {
        let (_, store) = self.data.open()?;
        let mut data = load_data(&store)?;
        let summary = GridStore::new(&mut data.layout, &mut data.audit).finalize_layout()?;
        save_data(&store, &data)?;

        println!(
            "Layout finalized: {} courts configured for {}",
            summary.target, summary.center_name
        );
        Ok(())
    }
}
