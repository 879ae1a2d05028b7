//! # Command-Line Interface
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `add NAME PATH` | Register a generator (`--force` replaces and resets the count) |
//! | `list` | Show available, exhausted (`-e`) or all (`-a`) artworks |
//! | `draw NAME` | Release the next edition (`--test` prints instead of plotting) |
//! | `test` | Play the test-pattern file |
//! | `exercise PEN` | Work a pen back and forth |
//!
//! ## Settings
//!
//! `--device`, `--ledger` and `--strict` override the config file.
//! `--format json` switches output to JSON, `--verbose` adds debug lines on
//! stderr.
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod artwork;
mod draw;
mod maintenance;
mod output;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
