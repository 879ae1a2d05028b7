//! Domain models for the art plotter
//!
//! Pure logic with no I/O: ledger records, output framing, and the command
//! sequences composed for the device.

mod artwork;
mod framing;
mod frame;
mod maintenance;

pub use artwork::{ArtworkRecord, ReleaseOutcome, ReleaseStatus};
pub use framing::{frame_commands, CommandFramer, ETX};
pub use frame::{text_width, FrameComposer, FrameLayout, DEFAULT_GROUP, LABEL_SIZE};
pub use maintenance::{parse_test_pattern, pen_exercise, DEFAULT_EXERCISE_ITERATIONS};
