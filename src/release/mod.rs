//! # Release Pipeline
//!
//! Turns a ledger entry into a signed, numbered sheet.
//!
//! ```text
//! generator stdout --> CommandFramer --> PlotterSession.send
//!                                              |
//!                      FrameComposer ----------+
//!                                              |
//!                                        Ledger.update
//! ```
//!
//! ## Generator Contract
//!
//! Any executable works as a generator if it:
//! - accepts `<width> <height>` (always `2150 1700`)
//! - prints commands on stdout, separated by ETX (0x03) or newlines
//! - exits 0 on success
//!
//! ## Key Types
//!
//! - [`Orchestrator`] - Runs one release per call
//! - [`CommitPolicy`] - Whether transport failures block the ledger commit
//! - [`Generator`] - Validates and runs a generator program

mod generator;
mod maintenance;
mod orchestrator;

pub use generator::{Generator, GeneratorRun, ART_HEIGHT, ART_WIDTH};
pub use maintenance::{exercise_pen, run_test_pattern};
pub use orchestrator::{CommitPolicy, Orchestrator, ReleaseError};
