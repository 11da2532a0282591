//! Audit trail and club statistics commands.

use crate::cli::common::{load_data, print_json, CliResult, DataDirArg};
use crate::services::ClubStats;
use clap::{Args, Subcommand};

/// Inspect the audit trail
#[derive(Debug, Clone, Args)]
pub struct AuditArgs {
    /// Audit subcommand
    #[command(subcommand)]
    pub command: AuditCommand,
}

/// Audit subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum AuditCommand {
    /// Show recent audit entries, oldest first
    List(ListAuditArgs),
}

/// Show recent audit entries
#[derive(Debug, Clone, Args)]
pub struct ListAuditArgs {
    /// Data directory selection
    #[command(flatten)]
    pub data: DataDirArg,

    /// Number of entries to show
    #[arg(long, value_name = "N", default_value_t = 20)]
    pub limit: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Show player and court totals
#[derive(Debug, Clone, Args)]
pub struct StatsArgs {
    /// Data directory selection
    #[command(flatten)]
    pub data: DataDirArg,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AuditArgs {
    /// Execute the audit command
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            AuditCommand::List(args) => args.execute(),
        }
    }
}

impl ListAuditArgs {
    /// Execute the list command
    pub fn execute(&self) -> CliResult<()> {
        let (_, store) = self.data.open()?;
        let data = load_data(&store)?;
        let entries = data.audit.recent(self.limit);

        if self.json {
            return print_json(&entries);
        }

        if entries.is_empty() {
            println!("No audit entries.");
            return Ok(());
        }

        for entry in entries {
            println!(
                "{}  [{}] {}: {}",
                entry.timestamp, entry.user_type, entry.action, entry.details
            );
        }
        Ok(())
    }
}

impl StatsArgs {
    /// Execute the stats command
    pub fn execute(&self) -> CliResult<()> {
        let (_, store) = self.data.open()?;
        let data = load_data(&store)?;
        let stats = ClubStats::collect(&data.roster, &data.layout);

        if self.json {
            return print_json(&stats);
        }

        println!("Players:     {}", stats.total_players);
        println!("Waitlisted:  {}", stats.total_waitlisted);
        println!("Courts:      {}", stats.active_courts);
        Ok(())
    }
}
