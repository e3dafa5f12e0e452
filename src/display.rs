use std::io::Write;

use anyhow::Result;

use crate::types::{CommitStatus, PullRequestSummary};

const ICON_SUCCESS: &str = "✅";
const ICON_PENDING: &str = "🕐";
const ICON_FAILURE: &str = "❌";

pub fn status_icon(status: CommitStatus) -> &'static str {
    match status {
        CommitStatus::Success => ICON_SUCCESS,
        CommitStatus::Pending => ICON_PENDING,
        CommitStatus::Other => ICON_FAILURE,
    }
}

pub fn format_pull_request(pr: &PullRequestSummary) -> String {
    format!("#{} {}", pr.number, status_icon(pr.status))
}

/// Renders the whole status line, e.g. `#101 ✅ #102 🕐`. Empty when there
/// is nothing to show.
pub fn render_status_line(prs: &[PullRequestSummary]) -> String {
    prs.iter()
        .map(format_pull_request)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Writes the status line followed by a newline, or nothing at all when
/// `prs` is empty.
pub fn output_status_line<W: Write>(prs: &[PullRequestSummary], writer: &mut W) -> Result<()> {
    if prs.is_empty() {
        return Ok(());
    }

    writeln!(writer, "{}", render_status_line(prs))?;
    Ok(())
}
