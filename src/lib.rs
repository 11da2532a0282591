//! Courtboard Library
//!
//! This library provides the core of the Courtboard club admin tool: the
//! weekly player lists, the court layout grid editor, the audit trail, PNG
//! export of the layout, and the CLI and web front ends built on top.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod models;
pub mod render;
pub mod services;
#[cfg(feature = "web")]
pub mod web;
