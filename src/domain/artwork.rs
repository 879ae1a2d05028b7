//! Artwork domain model
//!
//! An artwork is a generator program plus an edition count. Each release
//! draws one sheet and bumps `released_editions` by exactly one.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A ledger entry for one artwork
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtworkRecord {
    /// Unique name of the artwork
    pub name: String,

    /// Path to the generator executable
    pub path: PathBuf,

    /// Author to sign; `None` credits the group alone
    #[serde(default)]
    pub author: Option<String>,

    /// Total number of editions that may ever be released
    pub max_editions: u32,

    /// Editions drawn so far
    #[serde(default)]
    pub released_editions: u32,

    /// Brief description of the artwork
    #[serde(default)]
    pub description: Option<String>,
}

impl ArtworkRecord {
    /// Creates a fresh record with no editions released
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, max_editions: u32) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            author: None,
            max_editions,
            released_editions: 0,
            description: None,
        }
    }

    /// Sets the author credit
    pub fn with_author(mut self, author: Option<String>) -> Self {
        self.author = author;
        self
    }

    /// Sets the description
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// Returns true if at least one more edition can be released
    pub fn is_available(&self) -> bool {
        self.released_editions < self.max_editions
    }

    /// Returns true if every edition has been released
    pub fn is_exhausted(&self) -> bool {
        !self.is_available()
    }

    /// The edition number the next release will carry
    pub fn next_edition(&self) -> u32 {
        self.released_editions + 1
    }

    /// Number of editions still to be released
    pub fn remaining(&self) -> u32 {
        self.max_editions.saturating_sub(self.released_editions)
    }
}

/// How a release attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReleaseStatus {
    /// Sheet drawn and ledger committed
    Released {
        /// Sends the device rejected while the sheet was drawn
        failed_sends: usize,
    },

    /// Drawn to the preview session; ledger left untouched
    Previewed,

    /// No unexhausted artwork with that name
    NotFound,

    /// More than one unexhausted artwork with that name
    Ambiguous { matches: usize },

    /// Generator path missing or not executable
    ScriptUnusable,

    /// Generator could not run or exited non-zero
    ScriptFailed { exit_code: Option<i32> },
}

/// Result of one release attempt, used for reporting only
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseOutcome {
    pub artwork_name: String,

    /// Edition number drawn (or that would have been drawn)
    pub edition: Option<u32>,

    /// Path of the generator, when the artwork was found
    pub path: Option<PathBuf>,

    #[serde(flatten)]
    pub status: ReleaseStatus,
}

impl ReleaseOutcome {
    pub fn new(artwork_name: impl Into<String>, status: ReleaseStatus) -> Self {
        Self {
            artwork_name: artwork_name.into(),
            edition: None,
            path: None,
            status,
        }
    }

    /// Attaches the artwork this outcome concerns
    pub fn for_artwork(mut self, art: &ArtworkRecord) -> Self {
        self.edition = Some(art.next_edition());
        self.path = Some(art.path.clone());
        self
    }
}
