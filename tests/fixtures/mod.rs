//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use courtboard::models::{Court, CourtLayout, GridPosition, LayoutSettings, SkillLevel};
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Path to the courtboard binary
pub fn courtboard_bin() -> &'static str {
    env!("CARGO_BIN_EXE_courtboard")
}

/// A scratch environment: a data directory plus an isolated config home.
pub struct TestEnv {
    /// Keeps the temp tree alive for the duration of the test
    pub temp_dir: TempDir,
}

impl TestEnv {
    /// Creates an environment whose data directory is not yet populated.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir_all(temp_dir.path().join("config")).expect("Failed to create config home");
        Self { temp_dir }
    }

    /// Creates an environment with `layout` already saved.
    pub fn with_layout(layout: &CourtLayout) -> Self {
        let env = Self::new();
        write_layout(&env.data_dir(), layout);
        env
    }

    /// Data directory passed with `--data-dir`.
    pub fn data_dir(&self) -> std::path::PathBuf {
        self.temp_dir.path().join("data")
    }

    /// Config home used in place of `~/.config`.
    pub fn config_home(&self) -> std::path::PathBuf {
        self.temp_dir.path().join("config")
    }

    /// Builds a command with an isolated config directory.
    pub fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(courtboard_bin());
        cmd.env("XDG_CONFIG_HOME", self.config_home());
        cmd.env_remove("RUST_LOG");
        cmd.args(args);
        cmd
    }

    /// Runs a data command, appending `--data-dir`.
    pub fn run(&self, args: &[&str]) -> Output {
        let data_dir = self.data_dir();
        let mut cmd = self.command(args);
        cmd.arg("--data-dir").arg(&data_dir);
        cmd.output().expect("Failed to execute command")
    }

    /// Reads the saved court layout.
    pub fn read_layout(&self) -> CourtLayout {
        let content = fs::read_to_string(self.data_dir().join("court_layout.json"))
            .expect("Failed to read court layout");
        serde_json::from_str(&content).expect("Failed to parse court layout")
    }

    /// Reads the saved audit trail as raw JSON.
    pub fn read_audit(&self) -> Vec<Value> {
        let content = fs::read_to_string(self.data_dir().join("audit_trail.json"))
            .expect("Failed to read audit trail");
        serde_json::from_str(&content).expect("Failed to parse audit trail")
    }
}

/// Writes `layout` as `court_layout.json` in `data_dir`.
pub fn write_layout(data_dir: &Path, layout: &CourtLayout) {
    fs::create_dir_all(data_dir).expect("Failed to create data dir");
    let json = serde_json::to_string_pretty(layout).expect("Failed to serialize layout");
    fs::write(data_dir.join("court_layout.json"), json).expect("Failed to write layout");
}

/// A `rows` x `cols` layout holding the given `(name, level, row, col)` courts.
pub fn test_layout(rows: u32, cols: u32, courts: &[(&str, SkillLevel, u32, u32)]) -> CourtLayout {
    let mut layout = CourtLayout::new(LayoutSettings {
        rows,
        cols,
        center_name: "Test Center".to_string(),
        total_courts: 4,
    });
    for (i, (name, level, row, col)) in courts.iter().enumerate() {
        layout.courts.push(Court::new(
            i as u32 + 1,
            *name,
            *level,
            GridPosition::new(*row, *col),
        ));
    }
    layout
}

/// Two courts on a 2x2 grid: "A" at (0,0) and "B" at (0,1).
pub fn two_court_layout() -> CourtLayout {
    test_layout(
        2,
        2,
        &[
            ("A", SkillLevel::Beginner, 0, 0),
            ("B", SkillLevel::Advanced, 0, 1),
        ],
    )
}

/// Asserts a zero exit status, printing stderr otherwise.
pub fn assert_success(output: &Output, what: &str) {
    assert_eq!(
        output.status.code(),
        Some(0),
        "{what} should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Stdout as a string.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Stderr as a string.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Stdout parsed as JSON.
pub fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("Output should be valid JSON")
}
