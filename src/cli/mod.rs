//! CLI module
//!
//! Command-line interface for querying the urturn API.
//!
//! # Commands
//!
//! - `get` - Fetch successive pages of a query
//! - `search` - Free-text post search
//! - `url` - Print the request URLs without sending anything
//! - `host` - Show the configured API host

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat, QueryArgs};
pub use runner::Runner;
