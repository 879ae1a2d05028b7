//! In-memory session for exercising the pipeline without hardware

use std::cell::RefCell;
use std::rc::Rc;

use super::session::{PlotterError, PlotterSession};

/// What a [`RecordingSession`] saw, shared with the test that created it
#[derive(Debug, Default)]
pub struct Recording {
    pub commands: Vec<String>,
    pub failed: Vec<String>,
    pub closes: usize,
}

/// Records commands instead of sending them
///
/// With [`RecordingSession::failing_after`] every send past the first `n`
/// is rejected, which stands in for a device that drops off the bus.
#[derive(Debug, Clone, Default)]
pub struct RecordingSession {
    recording: Rc<RefCell<Recording>>,
    fail_after: Option<usize>,
}

impl RecordingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_after(sends: usize) -> Self {
        Self {
            fail_after: Some(sends),
            ..Self::default()
        }
    }

    /// Handle to the shared log; stays readable after the session is closed
    pub fn recording(&self) -> Rc<RefCell<Recording>> {
        Rc::clone(&self.recording)
    }
}

impl PlotterSession for RecordingSession {
    fn send(&mut self, command: &str) -> Result<(), PlotterError> {
        let mut recording = self.recording.borrow_mut();
        let attempted = recording.commands.len() + recording.failed.len();

        if self.fail_after.is_some_and(|limit| attempted >= limit) {
            recording.failed.push(command.to_string());
            return Err(PlotterError::Send {
                command: command.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::BrokenPipe, "plotter went away"),
            });
        }

        recording.commands.push(command.to_string());
        Ok(())
    }

    fn close(self) -> Result<(), PlotterError> {
        self.recording.borrow_mut().closes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{send_all, with_session};

    #[test]
    fn records_in_order() {
        let mut session = RecordingSession::new();
        let log = session.recording();

        let sent = send_all(&mut session, ["PS1", "MA0,0", "CH"]).unwrap();

        assert_eq!(sent, 3);
        assert_eq!(log.borrow().commands, vec!["PS1", "MA0,0", "CH"]);
    }

    #[test]
    fn send_all_stops_at_first_failure() {
        let mut session = RecordingSession::failing_after(1);
        let log = session.recording();

        let result = send_all(&mut session, ["PS1", "MA0,0", "CH"]);

        assert!(result.is_err());
        assert_eq!(log.borrow().commands, vec!["PS1"]);
        assert_eq!(log.borrow().failed, vec!["MA0,0"]);
    }

    #[test]
    fn with_session_closes_on_error() {
        let session = RecordingSession::failing_after(0);
        let log = session.recording();

        let result = with_session(session, |s| send_all(s, ["PS1"]));

        assert!(result.is_err());
        assert_eq!(log.borrow().closes, 1);
    }

    #[test]
    fn with_session_closes_on_success() {
        let session = RecordingSession::new();
        let log = session.recording();

        let sent = with_session(session, |s| send_all(s, ["PS1", "RS"])).unwrap();

        assert_eq!(sent, 2);
        assert_eq!(log.borrow().closes, 1);
    }
}
