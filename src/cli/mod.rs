//! CLI module for peerlink.
//!
//! - Argument parsing
//! - Version display
//! - Command execution against the configured API
//!
//! ```ignore
//! use peerlink::cli::{execute, parse_args};
//!
//! let cli = parse_args(std::env::args());
//! let ok = execute(cli.command, gateway, &mut std::io::stdout()).await?;
//! ```

pub mod args;
pub mod commands;
pub mod version;

pub use args::{parse_args, Cli, CliCommand, USAGE};
pub use commands::execute;
pub use version::{version_line, VERSION};
