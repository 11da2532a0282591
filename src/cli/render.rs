//! Render command: writes the court layout as a PNG image.

use crate::cli::common::{load_data, CliError, CliResult, DataDirArg};
use crate::render::{default_export_filename, render_png, TextRenderer, ViewMode};
use clap::Args;
use std::path::PathBuf;

/// Render the court layout to a PNG file
#[derive(Debug, Clone, Args)]
pub struct RenderArgs {
    /// Data directory selection
    #[command(flatten)]
    pub data: DataDirArg,

    /// Output file (default: court_layout_<timestamp>.png in the current directory)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Mark empty cells with a "+" as in the editor view
    #[arg(long)]
    pub edit: bool,
}

impl RenderArgs {
    /// Execute the render command
    pub fn execute(&self) -> CliResult<()> {
        let (config, store) = self.data.open()?;
        let data = load_data(&store)?;

        let text = TextRenderer::discover(config.render.font_path.as_deref());
        let png = render_png(&data.layout, ViewMode::from_edit_flag(self.edit), &text)
            .map_err(|e| CliError::io(format!("Failed to render layout: {e:#}")))?;

        let output = self
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(default_export_filename()));
        std::fs::write(&output, png).map_err(|e| {
            CliError::io(format!("Failed to write {}: {e}", output.display()))
        })?;

        println!("Layout image written to {}", output.display());
        Ok(())
    }
}
