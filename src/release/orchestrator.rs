//! Release pipeline
//!
//! One release draws one sheet:
//!
//! ```text
//! Lookup -> Validate -> Execute -> Stream -> Frame -> Commit
//!   |          |           |
//!   |          |           +-- ScriptFailed (nothing sent, ledger untouched)
//!   |          +-- ScriptUnusable
//!   +-- NotFound / Ambiguous
//! ```
//!
//! The plotter session is opened only once the generator has exited
//! successfully, and is closed before the ledger is committed.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use thiserror::Error;

use super::generator::{Generator, GeneratorRun, ART_HEIGHT, ART_WIDTH};
use crate::device::{PlotterError, PlotterSession};
use crate::domain::{frame_commands, ArtworkRecord, FrameComposer, ReleaseOutcome, ReleaseStatus};
use crate::storage::Ledger;

#[derive(Debug, Error)]
pub enum ReleaseError {
    #[error("Plotter failed after {sent} commands; ledger not updated")]
    Transport {
        sent: usize,
        #[source]
        source: PlotterError,
    },

    #[error("Ledger entry for {0} changed during the release")]
    LedgerChanged(String),
}

/// What to do when a command fails to reach the plotter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommitPolicy {
    /// Keep drawing, commit anyway, and report how many sends failed
    #[default]
    Lenient,

    /// Stop at the first failure and leave the ledger alone
    Strict,
}

/// Runs releases against one ledger
pub struct Orchestrator<'a> {
    ledger: &'a Ledger,
    composer: FrameComposer,
    policy: CommitPolicy,
    date: NaiveDate,
    preview: bool,
}

impl<'a> Orchestrator<'a> {
    pub fn new(ledger: &'a Ledger, composer: FrameComposer) -> Self {
        Self {
            ledger,
            composer,
            policy: CommitPolicy::default(),
            date: Local::now().date_naive(),
            preview: false,
        }
    }

    pub fn with_policy(mut self, policy: CommitPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Date signed on the sheet (defaults to today)
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    /// Draws without committing the edition
    pub fn preview(mut self, preview: bool) -> Self {
        self.preview = preview;
        self
    }

    /// Releases the next edition of `name`
    ///
    /// `open` is called only after the generator succeeded. Outcomes other
    /// than a transport failure (strict mode) or a ledger I/O error come back
    /// as `Ok` with the matching [`ReleaseStatus`].
    pub fn release<S, F>(&self, name: &str, open: F) -> Result<ReleaseOutcome>
    where
        S: PlotterSession,
        F: FnOnce() -> Result<S, PlotterError>,
    {
        let candidates = self
            .ledger
            .search(|art| art.name == name && art.is_available())?;

        let art = match candidates.as_slice() {
            [] => return Ok(ReleaseOutcome::new(name, ReleaseStatus::NotFound)),
            [art] => art,
            many => {
                return Ok(ReleaseOutcome::new(
                    name,
                    ReleaseStatus::Ambiguous {
                        matches: many.len(),
                    },
                ))
            }
        };
        let outcome = |status| ReleaseOutcome::new(name, status).for_artwork(art);

        let generator = Generator::new(&art.path);
        if !generator.is_usable() {
            return Ok(outcome(ReleaseStatus::ScriptUnusable));
        }

        let body = match generator.run(ART_WIDTH, ART_HEIGHT) {
            GeneratorRun::Succeeded(stdout) => stdout,
            GeneratorRun::Failed { exit_code } => {
                return Ok(outcome(ReleaseStatus::ScriptFailed { exit_code }))
            }
        };

        let session = open().map_err(|source| ReleaseError::Transport { sent: 0, source })?;

        let edition = art.next_edition();
        let frame = self
            .composer
            .compose(art.author.as_deref(), edition, art.max_editions, self.date);
        let failed_sends = self.draw(session, frame_commands(&body).chain(frame))?;

        if self.preview {
            return Ok(outcome(ReleaseStatus::Previewed));
        }

        self.commit(art, edition)?;
        Ok(outcome(ReleaseStatus::Released { failed_sends }))
    }

    /// Sends every command and closes the session; returns the failure count
    fn draw<S, I>(&self, mut session: S, commands: I) -> Result<usize, ReleaseError>
    where
        S: PlotterSession,
        I: Iterator<Item = String>,
    {
        let mut sent = 0;
        let mut failed = 0;

        for command in commands {
            match session.send(&command) {
                Ok(()) => sent += 1,
                Err(source) if self.policy == CommitPolicy::Strict => {
                    // The send error is the one worth reporting
                    let _ = session.close();
                    return Err(ReleaseError::Transport { sent, source });
                }
                Err(_) => failed += 1,
            }
        }

        match session.close() {
            Ok(()) => Ok(failed),
            Err(source) if self.policy == CommitPolicy::Strict => {
                Err(ReleaseError::Transport { sent, source })
            }
            Err(_) => Ok(failed + 1),
        }
    }

    fn commit(&self, art: &ArtworkRecord, edition: u32) -> Result<()> {
        let updated = self
            .ledger
            .update(
                |a| a.name == art.name && a.released_editions == art.released_editions,
                |a| a.released_editions = edition,
            )
            .with_context(|| format!("Failed to record edition {} of {}", edition, art.name))?;

        if updated == 0 {
            return Err(ReleaseError::LedgerChanged(art.name.clone()).into());
        }
        Ok(())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::device::RecordingSession;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;
    use tempfile::TempDir;

    struct Fixture {
        dir: TempDir,
        ledger: Ledger,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let ledger = Ledger::new(dir.path().join("art_editions.json"));
            Self { dir, ledger }
        }

        fn script(&self, name: &str, body: &str) -> PathBuf {
            let path = self.dir.path().join(name);
            fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        fn add(&self, name: &str, path: PathBuf, max: u32, released: u32) {
            let mut art = ArtworkRecord::new(name, path, max).with_author(Some("ada".into()));
            art.released_editions = released;
            self.ledger.insert(art).unwrap();
        }

        fn released(&self, name: &str) -> u32 {
            self.ledger.search(|a| a.name == name).unwrap()[0].released_editions
        }

        fn orchestrator(&self) -> Orchestrator<'_> {
            Orchestrator::new(&self.ledger, FrameComposer::default())
                .with_date(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap())
        }
    }

    fn unreachable_session() -> Result<RecordingSession, PlotterError> {
        panic!("session must not be opened")
    }

    #[test]
    fn releases_and_commits_one_edition() {
        let fx = Fixture::new();
        let path = fx.script("waves.sh", "printf 'PS3\\003MA0,0\\nDA10,10\\003'");
        fx.add("waves", path, 10, 2);

        let session = RecordingSession::new();
        let log = session.recording();
        let outcome = fx.orchestrator().release("waves", || Ok(session)).unwrap();

        assert_eq!(outcome.status, ReleaseStatus::Released { failed_sends: 0 });
        assert_eq!(outcome.edition, Some(3));
        assert_eq!(fx.released("waves"), 3);

        let log = log.borrow();
        assert_eq!(&log.commands[..3], &["PS3", "MA0,0", "DA10,10"]);
        assert_eq!(log.commands[3], "PV10");
        assert_eq!(log.commands.last().map(String::as_str), Some("CH"));
        assert!(log.commands.contains(&"PL3".to_string()));
        assert!(log.commands.contains(&"PLada/nycresistor".to_string()));
        assert_eq!(log.closes, 1);
    }

    #[test]
    fn unknown_name_is_not_found() {
        let fx = Fixture::new();
        let outcome = fx.orchestrator().release("ghost", unreachable_session).unwrap();
        assert_eq!(outcome.status, ReleaseStatus::NotFound);
        assert_eq!(outcome.edition, None);
    }

    #[test]
    fn exhausted_artwork_is_not_found() {
        let fx = Fixture::new();
        let path = fx.script("once.sh", "echo PS1");
        fx.add("once", path, 1, 1);

        let outcome = fx.orchestrator().release("once", unreachable_session).unwrap();
        assert_eq!(outcome.status, ReleaseStatus::NotFound);
        assert_eq!(fx.released("once"), 1);
    }

    #[test]
    fn duplicate_names_are_ambiguous() {
        let fx = Fixture::new();
        let path = fx.script("dup.sh", "echo PS1");
        fx.add("dup", path.clone(), 5, 0);
        fx.add("dup", path, 5, 1);

        let outcome = fx.orchestrator().release("dup", unreachable_session).unwrap();
        assert_eq!(outcome.status, ReleaseStatus::Ambiguous { matches: 2 });

        let counts: Vec<_> = fx.ledger.all().unwrap().iter().map(|a| a.released_editions).collect();
        assert_eq!(counts, vec![0, 1]);
    }

    #[test]
    fn missing_script_is_unusable() {
        let fx = Fixture::new();
        fx.add("lost", fx.dir.path().join("lost.sh"), 5, 0);

        let outcome = fx.orchestrator().release("lost", unreachable_session).unwrap();
        assert_eq!(outcome.status, ReleaseStatus::ScriptUnusable);
        assert_eq!(fx.released("lost"), 0);
    }

    #[test]
    fn failing_script_sends_nothing() {
        let fx = Fixture::new();
        let path = fx.script("broken.sh", "echo PS1; exit 1");
        fx.add("broken", path, 5, 0);

        let outcome = fx.orchestrator().release("broken", unreachable_session).unwrap();
        assert_eq!(outcome.status, ReleaseStatus::ScriptFailed { exit_code: Some(1) });
        assert_eq!(fx.released("broken"), 0);
    }

    #[test]
    fn last_edition_exhausts_artwork() {
        let fx = Fixture::new();
        let path = fx.script("last.sh", "echo PS1");
        fx.add("last", path, 2, 1);

        let outcome = fx.orchestrator().release("last", || Ok(RecordingSession::new())).unwrap();
        assert_eq!(outcome.edition, Some(2));
        assert_eq!(fx.released("last"), 2);

        let again = fx.orchestrator().release("last", unreachable_session).unwrap();
        assert_eq!(again.status, ReleaseStatus::NotFound);
        assert_eq!(fx.released("last"), 2);
    }

    #[test]
    fn lenient_policy_commits_despite_send_failures() {
        let fx = Fixture::new();
        let path = fx.script("art.sh", "echo PS1; echo MA0,0");
        fx.add("art", path, 5, 0);

        let session = RecordingSession::failing_after(1);
        let log = session.recording();
        let outcome = fx.orchestrator().release("art", || Ok(session)).unwrap();

        // Everything after the first body command is rejected
        assert_eq!(outcome.status, ReleaseStatus::Released { failed_sends: 17 });
        assert_eq!(fx.released("art"), 1);
        assert_eq!(log.borrow().closes, 1);
    }

    #[test]
    fn strict_policy_aborts_commit() {
        let fx = Fixture::new();
        let path = fx.script("art.sh", "echo PS1; echo MA0,0");
        fx.add("art", path, 5, 0);

        let session = RecordingSession::failing_after(1);
        let log = session.recording();
        let err = fx
            .orchestrator()
            .with_policy(CommitPolicy::Strict)
            .release("art", || Ok(session))
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ReleaseError>(),
            Some(ReleaseError::Transport { sent: 1, .. })
        ));
        assert_eq!(fx.released("art"), 0);
        assert_eq!(log.borrow().failed.len(), 1);
        assert_eq!(log.borrow().closes, 1);
    }

    #[test]
    fn open_failure_leaves_ledger_alone() {
        let fx = Fixture::new();
        let path = fx.script("art.sh", "echo PS1");
        fx.add("art", path, 5, 0);

        let result = fx.orchestrator().release("art", || {
            crate::device::StreamSession::open_device(fx.dir.path().join("no-such-tty"))
        });

        assert!(result.is_err());
        assert_eq!(fx.released("art"), 0);
    }

    #[test]
    fn preview_draws_without_commit() {
        let fx = Fixture::new();
        let path = fx.script("art.sh", "echo PS1");
        fx.add("art", path, 5, 0);

        let session = RecordingSession::new();
        let log = session.recording();
        let outcome = fx.orchestrator().preview(true).release("art", || Ok(session)).unwrap();

        assert_eq!(outcome.status, ReleaseStatus::Previewed);
        assert_eq!(log.borrow().commands[0], "PS1");
        assert_eq!(fx.released("art"), 0);
    }
}
