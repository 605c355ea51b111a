//! CLI module
//!
//! Command-line front end over the paginator.
//!
//! # Commands
//!
//! - `search` - Run a search and print every page
//! - `defaults` - Print the default search configuration

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat, SearchArgs};
pub use runner::{build_config, Runner};
