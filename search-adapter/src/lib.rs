//! # Search Adapter
//!
//! Command line front end for the search adapter. Each subcommand runs one
//! operation of `SearchIndexService` against an OpenSearch-compatible backend
//! and prints the result in the normalized `{ "ok": ... }` shape.
//!
//! ## Modules
//!
//! - [`cli`]: Argument parsing and command execution
//! - [`errors`]: Error types for the command line

pub mod cli;
pub mod errors;

pub use cli::{execute, Cli, Command};
pub use errors::AppError;
