//! Courtboard - Club roster and court layout admin tool
//!
//! This application manages weekly badminton sign-up lists and the court
//! layout grid of a sports center, and exports the layout as a PNG image.

use clap::{Parser, Subcommand};
use courtboard::cli::{
    AuditArgs, CliResult, ConfigArgs, CourtsArgs, LayoutArgs, PlayersArgs, RenderArgs, StatsArgs,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Courtboard - Club roster and court layout admin tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Add, move, swap, edit and remove courts
    Courts(CourtsArgs),
    /// Show or change grid settings
    Layout(LayoutArgs),
    /// Export the court layout as a PNG image
    Render(RenderArgs),
    /// Manage weekly player lists
    Players(PlayersArgs),
    /// Inspect the audit trail
    Audit(AuditArgs),
    /// Show player and court totals
    Stats(StatsArgs),
    /// Manage configuration
    Config(ConfigArgs),
}

impl Commands {
    fn execute(&self) -> CliResult<()> {
        match self {
            Self::Courts(args) => args.execute(),
            Self::Layout(args) => args.execute(),
            Self::Render(args) => args.execute(),
            Self::Players(args) => args.execute(),
            Self::Audit(args) => args.execute(),
            Self::Stats(args) => args.execute(),
            Self::Config(args) => args.execute(),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so JSON output on stdout stays clean
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = cli.command.execute() {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}
