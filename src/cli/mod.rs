//! CLI command handlers for Courtboard.
//!
//! This module provides headless, scriptable access to the court layout, the
//! player roster and the audit trail.

pub mod audit;
pub mod common;
pub mod config;
pub mod courts;
pub mod layout;
pub mod players;
pub mod render;

// Re-export types used by main.rs and tests
pub use audit::{AuditArgs, StatsArgs};
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use courts::CourtsArgs;
pub use layout::LayoutArgs;
pub use players::PlayersArgs;
pub use render::RenderArgs;
