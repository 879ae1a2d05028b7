//! Sessions that write commands to a byte stream
//!
//! The plotter reads ASCII commands terminated by ETX. Port settings (baud
//! rate, flow control) are left to the operating system.

use std::fs::{File, OpenOptions};
use std::io::{Stderr, Stdout, Write};
use std::path::Path;

use super::session::{PlotterError, PlotterSession};
use crate::domain::ETX;

/// Writes each command followed by a terminator byte
pub struct StreamSession<W: Write> {
    writer: W,
    terminator: u8,
}

impl StreamSession<File> {
    /// Opens the plotter's device node for writing
    pub fn open_device(path: impl AsRef<Path>) -> Result<Self, PlotterError> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .append(true)
            .open(path)
            .map_err(|source| PlotterError::Open {
                path: path.display().to_string(),
                source,
            })?;

        Ok(Self::new(file, ETX))
    }
}

impl StreamSession<Stdout> {
    /// Prints commands one per line instead of plotting them
    pub fn echo() -> Self {
        Self::new(std::io::stdout(), b'\n')
    }
}

impl StreamSession<Stderr> {
    /// Like [`StreamSession::echo`], keeping stdout free for machine output
    pub fn echo_stderr() -> Self {
        Self::new(std::io::stderr(), b'\n')
    }
}

impl<W: Write> StreamSession<W> {
    pub fn new(writer: W, terminator: u8) -> Self {
        Self { writer, terminator }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> PlotterSession for StreamSession<W> {
    fn send(&mut self, command: &str) -> Result<(), PlotterError> {
        if !command.is_ascii() {
            return Err(PlotterError::NonAscii(command.to_string()));
        }

        let send_err = |source| PlotterError::Send {
            command: command.to_string(),
            source,
        };

        self.writer.write_all(command.as_bytes()).map_err(send_err)?;
        self.writer.write_all(&[self.terminator]).map_err(send_err)?;
        self.writer.flush().map_err(send_err)
    }

    fn close(mut self) -> Result<(), PlotterError> {
        self.writer.flush().map_err(PlotterError::Close)
    }
}
