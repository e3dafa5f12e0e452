use std::io::Write;

use anyhow::{Context, Result};
use tracing::debug;

use crate::{
    config::Settings,
    display::output_status_line,
    github::GitHub,
    query::fetch_recent_pull_requests,
    types::{PullRequestSource, PullRequestSummary, StatusRequest},
};

/// How a refresh ended. Failures carry no detail: whatever was worth
/// saying has already been written to stderr in debug mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Success,
    Failure,
}

impl RunOutcome {
    pub fn exit_code(self) -> u8 {
        match self {
            RunOutcome::Success => 0,
            RunOutcome::Failure => 1,
        }
    }
}

impl From<RunOutcome> for std::process::ExitCode {
    fn from(outcome: RunOutcome) -> Self {
        std::process::ExitCode::from(outcome.exit_code())
    }
}

/// Runs one refresh against GitHub and writes the status line to `stdout`.
pub async fn run<O, E>(
    request: &StatusRequest,
    settings: &Settings,
    stdout: &mut O,
    stderr: &mut E,
) -> RunOutcome
where
    O: Write,
    E: Write,
{
    match GitHub::new(&request.token) {
        Ok(github) => run_with_source(&request.user, &github, settings, stdout, stderr).await,
        Err(err) => report_failure(&err, settings, stderr),
    }
}

/// Runs one refresh against an arbitrary pull request source.
///
/// This is the single place errors are handled: any failure yields
/// [`RunOutcome::Failure`] with nothing on `stdout`, and the error chain
/// goes to `stderr` only when `settings.debug` is set.
pub async fn run_with_source<S, O, E>(
    user: &str,
    source: &S,
    settings: &Settings,
    stdout: &mut O,
    stderr: &mut E,
) -> RunOutcome
where
    S: PullRequestSource + Sync,
    O: Write,
    E: Write,
{
    let result = fetch_with_timeout(user, source, settings)
        .await
        .and_then(|prs| write_status(&prs, stdout));

    match result {
        Ok(()) => RunOutcome::Success,
        Err(err) => report_failure(&err, settings, stderr),
    }
}

async fn fetch_with_timeout<S>(
    user: &str,
    source: &S,
    settings: &Settings,
) -> Result<Vec<PullRequestSummary>>
where
    S: PullRequestSource + Sync,
{
    let prs = tokio::time::timeout(settings.timeout, fetch_recent_pull_requests(user, source))
        .await
        .map_err(|_| {
            anyhow::anyhow!(
                "Timed out after {}s waiting for GitHub",
                settings.timeout.as_secs_f64()
            )
        })?
        .with_context(|| format!("Failed to fetch pull requests for '{}'", user))?;

    debug!("{} recent pull request(s) for {}", prs.len(), user);
    Ok(prs)
}

fn write_status<O: Write>(prs: &[PullRequestSummary], stdout: &mut O) -> Result<()> {
    output_status_line(prs, stdout).context("Failed to write status line")?;
    stdout.flush().context("Failed to flush stdout")?;
    Ok(())
}

fn report_failure<E: Write>(err: &anyhow::Error, settings: &Settings, stderr: &mut E) -> RunOutcome {
    if settings.debug {
        // Nothing sensible is left to do if stderr itself is broken.
        let _ = writeln!(stderr, "Error: {err:#}");
    }
    RunOutcome::Failure
}
