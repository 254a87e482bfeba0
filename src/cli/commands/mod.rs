//! Subcommand handlers

pub mod config;
pub mod list;
pub mod units;
