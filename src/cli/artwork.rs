//! Roster commands: add and list

use anyhow::Result;

use super::output::Output;
use crate::domain::ArtworkRecord;
use crate::release::Generator;
use crate::storage::{Ledger, LedgerError};

/// Which artworks `list` shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFilter {
    Available,
    Exhausted,
    All,
}

impl ListFilter {
    fn matches(self, art: &ArtworkRecord) -> bool {
        match self {
            ListFilter::Available => art.is_available(),
            ListFilter::Exhausted => art.is_exhausted(),
            ListFilter::All => true,
        }
    }
}

pub fn add(output: &Output, ledger: &Ledger, record: ArtworkRecord, force: bool) -> Result<()> {
    output.verbose_ctx(
        "add",
        &format!("Adding {} -> {} (force={})", record.name, record.path.display(), force),
    );

    if !Generator::new(&record.path).is_usable() {
        output.warn(&format!(
            "{} is not an executable file yet; drawing will fail until it is",
            record.path.display()
        ));
    }

    let name = record.name.clone();
    if force && !ledger.search(|art| art.name == name)?.is_empty() {
        output.info("Replacing existing art.");
    }

    let outcome = match ledger.add_artwork(record, force) {
        Err(e) if matches!(e.downcast_ref::<LedgerError>(), Some(LedgerError::NameTaken(_))) => {
            anyhow::bail!("Existing art with same name, aborting (use --force to replace it)")
        }
        other => other?,
    };

    output.verbose_ctx("add", &format!("{:?} {}", outcome, name));
    output.success(&format!("Successfully inserted {}", name));

    Ok(())
}

pub fn list(output: &Output, ledger: &Ledger, filter: ListFilter) -> Result<()> {
    let arts = ledger.search(|art| filter.matches(art))?;
    output.verbose_ctx("list", &format!("{:?}: {} artworks", filter, arts.len()));

    if output.is_json() {
        output.data(&arts);
        return Ok(());
    }

    if arts.is_empty() {
        println!("No scripts found.");
        return Ok(());
    }

    for art in &arts {
        let mut about = String::new();
        if let Some(description) = art.description.as_deref().filter(|d| !d.is_empty()) {
            about.push_str(description);
            about.push(' ');
        }
        if let Some(author) = art.author.as_deref().filter(|a| !a.is_empty()) {
            about.push_str(&format!("({})", author));
        }

        println!(
            "{:<20} {:<20} {:>3}/{:<3}   {}",
            art.name,
            art.path.display().to_string(),
            art.released_editions,
            art.max_editions,
            about.trim_end()
        );
    }

    Ok(())
}
