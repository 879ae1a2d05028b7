//! # Plotter Sessions
//!
//! Everything that talks to the plotter goes through [`PlotterSession`]:
//! `send` one command, then `close` once. Sessions know nothing about the
//! command vocabulary.
//!
//! ## Implementations
//!
//! | Session | Writes to | Terminator |
//! |---------|-----------|------------|
//! | [`StreamSession::open_device`] | serial device node | ETX (0x03) |
//! | [`StreamSession::echo`] | stdout (`draw --test`) | newline |
//! | [`StreamSession::echo_stderr`] | stderr (`draw --test --format json`) | newline |
//! | [`RecordingSession`] | memory (tests) | - |

mod recording;
mod session;
mod stream;

pub use recording::{Recording, RecordingSession};
pub use session::{send_all, with_session, PlotterError, PlotterSession};
pub use stream::StreamSession;
