//! Edition ledger
//!
//! Artworks live in a single JSON document using the TinyDB layout:
//! `{"_default": {"1": {...}, "2": {...}}}`. Document ids are only used to
//! keep insertion order; the logical key is the artwork name.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::ArtworkRecord;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Artwork already exists: {0}")]
    NameTaken(String),
}

/// Whether `add_artwork` created or replaced a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Inserted,
    Replaced,
}

const DEFAULT_TABLE: &str = "_default";

/// The whole file: the artwork table plus any other tables, kept verbatim
#[derive(Debug, Default, Serialize)]
struct LedgerDocument {
    #[serde(rename = "_default")]
    artworks: BTreeMap<u64, ArtworkRecord>,

    #[serde(flatten)]
    other_tables: Map<String, Value>,
}

impl LedgerDocument {
    fn from_tables(mut tables: Map<String, Value>) -> serde_json::Result<Self> {
        let artworks = match tables.remove(DEFAULT_TABLE) {
            Some(table) => serde_json::from_value(table)?,
            None => BTreeMap::new(),
        };

        Ok(Self {
            artworks,
            other_tables: tables,
        })
    }
}

/// Handle to the ledger file
pub struct Ledger {
    path: PathBuf,
}

impl Ledger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the ledger file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<LedgerDocument> {
        if !self.path.exists() {
            return Ok(LedgerDocument::default());
        }

        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open ledger: {}", self.path.display()))?;

        file.lock_shared()
            .context("Failed to acquire read lock on ledger")?;

        if file.metadata().map(|m| m.len() == 0).unwrap_or(false) {
            return Ok(LedgerDocument::default());
        }

        serde_json::from_reader(BufReader::new(&file))
            .and_then(LedgerDocument::from_tables)
            .with_context(|| format!("Failed to parse ledger: {}", self.path.display()))
    }

    fn write(&self, doc: &LedgerDocument) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let temp_path = self.path.with_extension("json.tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

            file.lock_exclusive()
                .context("Failed to acquire write lock on ledger")?;

            let mut writer = BufWriter::new(&file);
            serde_json::to_writer(&mut writer, doc).context("Failed to serialize ledger")?;
            writer.flush().context("Failed to flush ledger")?;
        }

        fs::rename(&temp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }

    /// All records in insertion order
    pub fn all(&self) -> Result<Vec<ArtworkRecord>> {
        Ok(self.read()?.artworks.into_values().collect())
    }

    /// Records matching `predicate`, in insertion order
    pub fn search<P>(&self, predicate: P) -> Result<Vec<ArtworkRecord>>
    where
        P: Fn(&ArtworkRecord) -> bool,
    {
        Ok(self
            .read()?
            .artworks
            .into_values()
            .filter(|art| predicate(art))
            .collect())
    }

    /// Appends a record and returns its document id
    ///
    /// Does not check for duplicate names; see [`Ledger::add_artwork`].
    pub fn insert(&self, record: ArtworkRecord) -> Result<u64> {
        let mut doc = self.read()?;
        let id = doc.artworks.keys().next_back().map_or(1, |last| last + 1);
        doc.artworks.insert(id, record);
        self.write(&doc)?;
        Ok(id)
    }

    /// Removes every record matching `predicate`
    pub fn remove<P>(&self, predicate: P) -> Result<usize>
    where
        P: Fn(&ArtworkRecord) -> bool,
    {
        let mut doc = self.read()?;
        let before = doc.artworks.len();
        doc.artworks.retain(|_, art| !predicate(&*art));
        let removed = before - doc.artworks.len();
        if removed > 0 {
            self.write(&doc)?;
        }
        Ok(removed)
    }

    /// Applies `patch` to every record matching `predicate`
    pub fn update<P, F>(&self, predicate: P, mut patch: F) -> Result<usize>
    where
        P: Fn(&ArtworkRecord) -> bool,
        F: FnMut(&mut ArtworkRecord),
    {
        let mut doc = self.read()?;
        let mut updated = 0;
        for art in doc.artworks.values_mut().filter(|art| predicate(&**art)) {
            patch(art);
            updated += 1;
        }
        if updated > 0 {
            self.write(&doc)?;
        }
        Ok(updated)
    }

    /// Adds an artwork, keeping names unique
    ///
    /// With `replace`, every record of that name is dropped first and the new
    /// record starts with no released editions.
    pub fn add_artwork(&self, mut record: ArtworkRecord, replace: bool) -> Result<AddOutcome> {
        let existing = self.search(|art| art.name == record.name)?;

        let outcome = if existing.is_empty() {
            AddOutcome::Inserted
        } else if replace {
            self.remove(|art| art.name == record.name)?;
            AddOutcome::Replaced
        } else {
            return Err(LedgerError::NameTaken(record.name).into());
        };

        record.released_editions = 0;
        self.insert(record)?;
        Ok(outcome)
    }
}
