//! Draw command

use anyhow::Result;

use super::output::Output;
use crate::device::StreamSession;
use crate::domain::{FrameComposer, ReleaseOutcome, ReleaseStatus};
use crate::release::{CommitPolicy, Orchestrator};
use crate::storage::{Config, Ledger};

pub fn run(output: &Output, config: &Config, ledger: &Ledger, name: &str, test: bool) -> Result<()> {
    let policy = if config.release.strict {
        CommitPolicy::Strict
    } else {
        CommitPolicy::Lenient
    };

    let orchestrator = Orchestrator::new(ledger, FrameComposer::new(&config.release.group))
        .with_policy(policy)
        .preview(test);

    output.verbose_ctx(
        "draw",
        &format!("Releasing {} (policy={:?}, test={})", name, policy, test),
    );

    let outcome = if test && output.is_json() {
        orchestrator.release(name, || Ok(StreamSession::echo_stderr()))?
    } else if test {
        orchestrator.release(name, || Ok(StreamSession::echo()))?
    } else {
        let device = &config.plotter.device;
        output.verbose_ctx("draw", &format!("Plotter at {}", device.display()));
        orchestrator.release(name, || StreamSession::open_device(device))?
    };

    report(output, &outcome);
    Ok(())
}

fn report(output: &Output, outcome: &ReleaseOutcome) {
    if output.is_json() {
        output.data(outcome);
        return;
    }

    let name = &outcome.artwork_name;
    let path = outcome
        .path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    let edition = outcome.edition.unwrap_or_default();

    match outcome.status {
        ReleaseStatus::Released { failed_sends } => {
            if failed_sends > 0 {
                output.warn(&format!(
                    "{} commands did not reach the plotter; check the sheet before keeping it",
                    failed_sends
                ));
            }
            output.success(&format!("Released edition {} of {}", edition, name));
        }
        ReleaseStatus::Previewed => {
            output.success(&format!("Previewed edition {} of {} (ledger unchanged)", edition, name))
        }
        ReleaseStatus::NotFound => println!("Could not find {}", name),
        ReleaseStatus::Ambiguous { matches } => {
            println!("Multiple scripts named {}! ({} entries)", name, matches)
        }
        ReleaseStatus::ScriptUnusable => println!("Could not execute {}", path),
        ReleaseStatus::ScriptFailed { exit_code: Some(code) } => {
            println!("Failed to execute {} (exit code {})", path, code)
        }
        ReleaseStatus::ScriptFailed { exit_code: None } => println!("Failed to execute {}", path),
    }
}
