//! # Storage Layer
//!
//! Persistence for the art plotter.
//!
//! | Data | Format | Default location |
//! |------|--------|------------------|
//! | Artworks and edition counts | JSON document (TinyDB layout) | `art_editions.json` |
//! | Settings | TOML | `--config` or the per-user config dir |
//!
//! The ledger path is resolved once at startup and a [`Ledger`] handle is
//! passed to every operation that needs it. Writes are atomic (temp file +
//! rename) and take an advisory lock, but nothing stops two runs from
//! interleaving read-modify-write cycles; run one command at a time.

mod config;
mod ledger;

pub use config::{Config, ConfigError, LedgerConfig, PlotterConfig, ReleaseConfig};
pub use ledger::{AddOutcome, Ledger, LedgerError};
