//! Klassement CLI library.
//!
//! This crate provides the command-line interface for the klassement tool.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, DisciplineArg, GenderArg, SelectArgs};
pub use config::Config;
