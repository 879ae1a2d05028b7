//! artplotter - a roster of generative artworks and the plotter that prints them
//!
//! Each artwork is an external generator program with a fixed number of
//! editions. Drawing an edition runs the generator, streams its commands to
//! the plotter, signs the sheet with credit, date and edition number, and
//! records the release in the edition ledger.

pub mod domain;
pub mod device;
pub mod storage;
pub mod release;
pub mod cli;

pub use domain::{ArtworkRecord, ReleaseOutcome, ReleaseStatus};
