//! Ten-thousand-hour tracker CLI library.
//!
//! This crate provides the CLI interface for the tracker.

mod cli;
pub mod commands;
mod config;

pub use cli::{BackgroundAction, CategoryAction, Cli, Commands, EffectsAction};
pub use config::Config;
