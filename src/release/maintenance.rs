//! Plotter upkeep routines
//!
//! These bypass the ledger entirely and talk to the session directly.

use crate::device::{send_all, with_session, PlotterError, PlotterSession};
use crate::domain::{parse_test_pattern, pen_exercise};

/// Plays a test-pattern script and closes the session
///
/// Returns the number of commands sent.
pub fn run_test_pattern<S: PlotterSession>(session: S, script: &str) -> Result<usize, PlotterError> {
    let commands = parse_test_pattern(script);
    with_session(session, |s| send_all(s, &commands))
}

/// Works `pen` up and down `iterations` times and closes the session
pub fn exercise_pen<S: PlotterSession>(
    session: S,
    pen: u8,
    iterations: u32,
) -> Result<usize, PlotterError> {
    with_session(session, |s| send_all(s, pen_exercise(pen, iterations)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::RecordingSession;

    #[test]
    fn test_pattern_is_passed_through() {
        let session = RecordingSession::new();
        let log = session.recording();

        let sent = run_test_pattern(session, "# header\nPS1\n\nMA100,100\nDA400,400\n").unwrap();

        assert_eq!(sent, 3);
        assert_eq!(log.borrow().commands, vec!["PS1", "MA100,100", "DA400,400"]);
        assert_eq!(log.borrow().closes, 1);
    }

    #[test]
    fn test_pattern_failure_still_closes() {
        let session = RecordingSession::failing_after(1);
        let log = session.recording();

        assert!(run_test_pattern(session, "PS1\nPS2\nPS3\n").is_err());
        assert_eq!(log.borrow().commands, vec!["PS1"]);
        assert_eq!(log.borrow().closes, 1);
    }

    #[test]
    fn exercise_with_zero_iterations() {
        let session = RecordingSession::new();
        let log = session.recording();

        let sent = exercise_pen(session, 4, 0).unwrap();

        assert_eq!(sent, 5);
        assert_eq!(log.borrow().commands, vec!["PS4", "MA100,100", "PV5", "PV7", "RS"]);
    }

    #[test]
    fn exercise_counts_strokes() {
        let session = RecordingSession::new();
        let log = session.recording();

        exercise_pen(session, 1, 3).unwrap();

        let strokes = log
            .borrow()
            .commands
            .iter()
            .filter(|c| c.starts_with("DR"))
            .count();
        assert_eq!(strokes, 3);
        assert_eq!(log.borrow().closes, 1);
    }
}
