//! Plotter upkeep commands: test pattern and pen exercise

use std::fs;

use anyhow::{Context, Result};

use super::output::Output;
use crate::device::StreamSession;
use crate::release::{exercise_pen, run_test_pattern};
use crate::storage::Config;

pub fn test_pattern(output: &Output, config: &Config) -> Result<()> {
    let pattern = &config.plotter.test_pattern;
    let script = fs::read_to_string(pattern)
        .with_context(|| format!("Failed to read test pattern: {}", pattern.display()))?;

    let session = StreamSession::open_device(&config.plotter.device)?;
    output.info("Running test.");

    let sent = run_test_pattern(session, &script)?;
    output.verbose_ctx("test", &format!("Sent {} commands from {}", sent, pattern.display()));
    output.success("Test sent.");

    Ok(())
}

pub fn exercise(output: &Output, config: &Config, pen: u8, iterations: u32) -> Result<()> {
    let session = StreamSession::open_device(&config.plotter.device)?;
    output.info(&format!("Exercising pen {}", pen));

    let sent = exercise_pen(session, pen, iterations)?;
    output.verbose_ctx("exercise", &format!("{} cycles, {} commands", iterations, sent));
    output.success(&format!("Exercised pen {}", pen));

    Ok(())
}
