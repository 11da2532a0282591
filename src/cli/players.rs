//! Player sign-up commands.

use crate::cli::common::{load_data, print_json, save_data, CliError, CliResult, DataDirArg};
use crate::models::{DayRoster, ListKind, SkillLevel, Weekday};
use crate::services::RosterService;
use clap::{Args, Subcommand};
use serde::Serialize;

/// Manage weekly player lists
#[derive(Debug, Clone, Args)]
pub struct PlayersArgs {
    /// Players subcommand
    #[command(subcommand)]
    pub command: PlayersCommand,
}

/// Player subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum PlayersCommand {
    /// Show a day's player list and waitlist
    List(ListPlayersArgs),
    /// Sign a player up (waitlisted once the list is full)
    Add(AddPlayerArgs),
    /// Remove a player from a list
    Remove(RemovePlayerArgs),
}

/// Show a day's lists
#[derive(Debug, Clone, Args)]
pub struct ListPlayersArgs {
    /// Data directory selection
    #[command(flatten)]
    pub data: DataDirArg,

    /// Club day (e.g. Monday)
    #[arg(long, value_name = "DAY")]
    pub day: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Sign a player up
#[derive(Debug, Clone, Args)]
pub struct AddPlayerArgs {
    /// Data directory selection
    #[command(flatten)]
    pub data: DataDirArg,

    /// Club day (e.g. Monday)
    #[arg(long, value_name = "DAY")]
    pub day: String,

    /// Player name
    #[arg(long, value_name = "NAME")]
    pub name: String,

    /// Skill level: beginner, intermediate or advanced
    #[arg(long, value_name = "LEVEL", default_value = "beginner")]
    pub level: String,
}

/// Remove a player
#[derive(Debug, Clone, Args)]
pub struct RemovePlayerArgs {
    /// Data directory selection
    #[command(flatten)]
    pub data: DataDirArg,

    /// Club day (e.g. Monday)
    #[arg(long, value_name = "DAY")]
    pub day: String,

    /// Player name (exact match after trimming)
    #[arg(long, value_name = "NAME")]
    pub name: String,

    /// Remove from the waitlist instead of the main list
    #[arg(long)]
    pub waitlist: bool,
}

#[derive(Debug, Serialize)]
struct DayListing<'a> {
    day: Weekday,
    max_players: usize,
    max_waitlist: usize,
    #[serde(flatten)]
    lists: &'a DayRoster,
}

impl PlayersArgs {
    /// Execute the players command
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            PlayersCommand::List(args) => args.execute(),
            PlayersCommand::Add(args) => args.execute(),
            PlayersCommand::Remove(args) => args.execute(),
        }
    }
}

fn parse_day(day: &str) -> CliResult<Weekday> {
    day.parse().map_err(CliError::from)
}

impl ListPlayersArgs {
    /// Execute the list command
    pub fn execute(&self) -> CliResult<()> {
        let day = parse_day(&self.day)?;
        let (config, store) = self.data.open()?;
        let data = load_data(&store)?;
        let lists = data.roster.day(day)?;

        if self.json {
            return print_json(&DayListing {
                day,
                max_players: config.roster.max_players,
                max_waitlist: config.roster.max_waitlist,
                lists,
            });
        }

        println!(
            "{day} players ({}/{}):",
            lists.players.len(),
            config.roster.max_players
        );
        for (i, player) in lists.players.iter().enumerate() {
            println!("  {:>2}. {:<24} {}", i + 1, player.name, player.level.title());
        }
        println!();
        println!(
            "{day} waitlist ({}/{}):",
            lists.waitlist.len(),
            config.roster.max_waitlist
        );
        for (i, player) in lists.waitlist.iter().enumerate() {
            println!("  {:>2}. {:<24} {}", i + 1, player.name, player.level.title());
        }
        Ok(())
    }
}

impl AddPlayerArgs {
    /// Execute the add command
    pub fn execute(&self) -> CliResult<()> {
        let day = parse_day(&self.day)?;
        let level: SkillLevel = self.level.parse().map_err(CliError::from)?;
        let (config, store) = self.data.open()?;
        let mut data = load_data(&store)?;

        let kind = RosterService::new(&mut data.roster, config.roster, &mut data.audit)
            .add_player(day, &self.name, level)?;
        save_data(&store, &data)?;

        match kind {
            ListKind::Players => println!("Added {} to the {day} list", self.name.trim()),
            ListKind::Waitlist => println!(
                "{day} list is full; added {} to the waitlist",
                self.name.trim()
            ),
        }
        Ok(())
    }
}

impl RemovePlayerArgs {
    /// Execute the remove command
    pub fn execute(&self) -> CliResult<()> {
        let day = parse_day(&self.day)?;
        let kind = if self.waitlist {
            ListKind::Waitlist
        } else {
            ListKind::Players
        };
        let (config, store) = self.data.open()?;
        let mut data = load_data(&store)?;

        RosterService::new(&mut data.roster, config.roster, &mut data.audit)
            .remove_player(day, &self.name, kind)?;
        save_data(&store, &data)?;

        println!("Removed {} from the {day} {kind}", self.name.trim());
        Ok(())
    }
}
