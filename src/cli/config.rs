//! Configuration management CLI commands.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::Config;
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

/// Configuration management commands
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug, Clone)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug, Clone)]
pub struct ConfigSetArgs {
    /// Default data directory
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Font file used for layout images
    #[arg(long, value_name = "PATH")]
    font: Option<PathBuf>,

    /// Main list capacity per day
    #[arg(long, value_name = "N")]
    max_players: Option<usize>,

    /// Waitlist capacity per day
    #[arg(long, value_name = "N")]
    max_waitlist: Option<usize>,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput {
    config_file: Option<String>,
    data_dir: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    font_path: Option<String>,
    max_players: usize,
    max_waitlist: usize,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;
        let data_dir = config
            .resolve_data_dir(None)
            .map_err(|e| CliError::io(format!("Failed to resolve data directory: {e:#}")))?;

        let output = ConfigOutput {
            config_file: Config::config_file_path()
                .ok()
                .map(|p| p.to_string_lossy().to_string()),
            data_dir: data_dir.to_string_lossy().to_string(),
            font_path: config
                .render
                .font_path
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            max_players: config.roster.max_players,
            max_waitlist: config.roster.max_waitlist,
        };

        if self.json {
            return print_json(&output);
        }

        if let Some(path) = &output.config_file {
            println!("Config file:   {path}");
        }
        println!("Data dir:      {}", output.data_dir);
        println!(
            "Font:          {}",
            output.font_path.as_deref().unwrap_or("(system font)")
        );
        println!("Max players:   {}", output.max_players);
        println!("Max waitlist:  {}", output.max_waitlist);
        Ok(())
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.data_dir.is_none()
            && self.font.is_none()
            && self.max_players.is_none()
            && self.max_waitlist.is_none()
        {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --data-dir, --font, --max-players, or --max-waitlist",
            ));
        }

        let mut config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        if let Some(dir) = &self.data_dir {
            std::fs::create_dir_all(dir).map_err(|e| {
                CliError::io(format!(
                    "Failed to create data directory {}: {e}",
                    dir.display()
                ))
            })?;
            config.paths.data_dir = Some(dir.clone());
        }
        if let Some(font) = &self.font {
            config.render.font_path = Some(font.clone());
        }
        if let Some(max) = self.max_players {
            config.roster.max_players = max;
        }
        if let Some(max) = self.max_waitlist {
            config.roster.max_waitlist = max;
        }

        config
            .validate()
            .map_err(|e| CliError::validation(format!("Invalid configuration: {e}")))?;
        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");
        Ok(())
    }
}
