//! Tooling & Integration Layer
//!
//! Administrative command-line front end over reservation administration.

pub mod cli;
pub mod format;

pub use cli::{Cli, CliContext, Commands};
