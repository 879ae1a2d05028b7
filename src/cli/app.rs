//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{artwork, draw, maintenance};
use crate::domain::DEFAULT_EXERCISE_ITERATIONS;
use crate::storage::{Config, Ledger};

#[derive(Parser)]
#[command(name = "artplotter")]
#[command(author, version, about = "Manage and run the art plotter")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Serial device the plotter is attached to
    #[arg(long, short = 'd', global = true, env = "ARTPLOTTER_DEVICE")]
    pub device: Option<PathBuf>,

    /// Edition ledger file
    #[arg(long, global = true, env = "ARTPLOTTER_LEDGER")]
    pub ledger: Option<PathBuf>,

    /// Config file (defaults to the per-user config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Do not record an edition if any command fails to reach the plotter
    #[arg(long, global = true)]
    pub strict: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add new art script to the roster
    Add {
        /// Name of artwork
        name: String,

        /// Path to art script
        path: PathBuf,

        /// Number of editions to produce of this artwork
        #[arg(long, short = 'e', default_value = "100", value_parser = clap::value_parser!(u32).range(1..))]
        editions: u32,

        /// Replace existing art with the same name
        #[arg(long, short = 'f')]
        force: bool,

        /// Name of author to sign; if not given the group alone is credited
        #[arg(long, short = 'a')]
        author: Option<String>,

        /// Brief description of artwork
        #[arg(long, short = 'm')]
        comment: Option<String>,
    },

    /// List available artworks
    List {
        /// Include exhausted artworks
        #[arg(long, short = 'a')]
        all: bool,

        /// Only show exhausted artworks
        #[arg(long, short = 'e', conflicts_with = "all")]
        exhausted: bool,
    },

    /// Draw the next edition of an artwork
    Draw {
        /// Artwork to draw
        name: String,

        /// Print the commands instead of plotting and leave the ledger alone
        #[arg(long, short = 't')]
        test: bool,
    },

    /// Run the test pattern
    Test,

    /// Exercise a pen to get the ink flowing
    Exercise {
        /// Pen to exercise
        #[arg(value_parser = clap::value_parser!(u8).range(1..=4))]
        pen: u8,

        /// Number of cycles
        #[arg(long, short = 'i', default_value_t = DEFAULT_EXERCISE_ITERATIONS)]
        iterations: u32,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(device) = cli.device {
        config.plotter.device = device;
    }
    if let Some(ledger) = cli.ledger {
        config.ledger.path = ledger;
    }
    if cli.strict {
        config.release.strict = true;
    }

    output.verbose_ctx(
        "config",
        &format!(
            "device={}, ledger={}, strict={}",
            config.plotter.device.display(),
            config.ledger.path.display(),
            config.release.strict
        ),
    );

    let ledger = Ledger::new(&config.ledger.path);

    match cli.command {
        Commands::Add {
            name,
            path,
            editions,
            force,
            author,
            comment,
        } => {
            let record = crate::domain::ArtworkRecord::new(name, path, editions)
                .with_author(author)
                .with_description(comment);
            artwork::add(&output, &ledger, record, force)?
        }

        Commands::List { all, exhausted } => {
            let filter = if all {
                artwork::ListFilter::All
            } else if exhausted {
                artwork::ListFilter::Exhausted
            } else {
                artwork::ListFilter::Available
            };
            artwork::list(&output, &ledger, filter)?
        }

        Commands::Draw { name, test } => draw::run(&output, &config, &ledger, &name, test)?,

        Commands::Test => maintenance::test_pattern(&output, &config)?,

        Commands::Exercise { pen, iterations } => {
            maintenance::exercise(&output, &config, pen, iterations)?
        }
    }

    output.verbose("Command completed successfully");
    Ok(())
}
