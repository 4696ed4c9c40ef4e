//! Run a blocking command behind a spinner
//!
//! The spinner is started before the child is spawned and stopped once it
//! exits. The child's output is captured rather than inherited so it cannot
//! tear through the frames; callers print it after the spinner is gone.

use anyhow::{Context, Result};
use std::process::{ExitStatus, Stdio};
use std::time::{Duration, Instant};
use tokio::process::Command;

use crate::spinner::Spinner;

#[derive(Debug)]
pub struct RunOutcome {
    pub status: ExitStatus,
    pub elapsed: Duration,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl RunOutcome {
    /// Process exit code to propagate. Signals map to 1.
    pub fn exit_code(&self) -> i32 {
        self.status.code().unwrap_or(1)
    }

    /// One-line summary, e.g. `✓ make finished in 1.2s`.
    pub fn summary(&self, label: &str) -> String {
        if self.status.success() {
            format!("✓ {} finished in {:.1}s", label, self.elapsed.as_secs_f64())
        } else {
            match self.status.code() {
                Some(code) => format!("✗ {} exited with status {}", label, code),
                None => format!("✗ {} was terminated by a signal", label),
            }
        }
    }
}

/// Spawn `program` with `args`, animating `spinner` until it exits.
///
/// When the spinner has no final message of its own, the outcome summary
/// (plus a newline) is written in its place.
pub async fn run_command(spinner: &Spinner, program: &str, args: &[String]) -> Result<RunOutcome> {
    let started = Instant::now();
    spinner.start();

    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .await;
    let elapsed = started.elapsed();

    let output = match output {
        Ok(output) => output,
        Err(e) => {
            spinner.stop();
            return Err(e).with_context(|| format!("Failed to run `{}`", program));
        }
    };

    let outcome = RunOutcome {
        status: output.status,
        elapsed,
        stdout: output.stdout,
        stderr: output.stderr,
    };
    tracing::debug!("`{}` exited with {} after {:?}", program, outcome.status, elapsed);

    if spinner.display().final_message.is_empty() {
        spinner.set_final_message(format!("{}\n", outcome.summary(&command_label(program, args))));
    }
    spinner.stop();

    Ok(outcome)
}

/// `program arg1 arg2`, shortened to 40 characters.
pub fn command_label(program: &str, args: &[String]) -> String {
    let full = std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ");
    if full.chars().count() <= 40 {
        full
    } else {
        let head: String = full.chars().take(39).collect();
        format!("{}…", head)
    }
}
