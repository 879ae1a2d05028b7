//! Plotter session abstraction

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlotterError {
    #[error("Failed to open plotter at {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to send '{command}': {source}")]
    Send {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command is not ASCII: {0:?}")]
    NonAscii(String),

    #[error("Failed to close plotter: {0}")]
    Close(#[source] std::io::Error),
}

/// A live connection to the plotter
///
/// Commands are opaque strings. Nothing is retried or buffered; sending the
/// same command twice moves the pen twice.
pub trait PlotterSession {
    /// Delivers one command to the device
    fn send(&mut self, command: &str) -> Result<(), PlotterError>;

    /// Releases the connection
    fn close(self) -> Result<(), PlotterError>;
}

/// Sends every command in order, stopping at the first failure
///
/// Returns how many commands were delivered.
pub fn send_all<S, I>(session: &mut S, commands: I) -> Result<usize, PlotterError>
where
    S: PlotterSession + ?Sized,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut sent = 0;
    for command in commands {
        session.send(command.as_ref())?;
        sent += 1;
    }
    Ok(sent)
}

/// Runs `body` against the session, then closes it whatever the outcome
///
/// An error from `body` wins over an error from closing.
pub fn with_session<S, T, F>(mut session: S, body: F) -> Result<T, PlotterError>
where
    S: PlotterSession,
    F: FnOnce(&mut S) -> Result<T, PlotterError>,
{
    let result = body(&mut session);
    let closed = session.close();
    let value = result?;
    closed?;
    Ok(value)
}
