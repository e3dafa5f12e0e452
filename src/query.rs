use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::types::{PullRequestSource, PullRequestSummary};

/// How far back, in minutes, a pull request update still counts as recent.
pub const RECENT_WINDOW_MINUTES: i64 = 15;

/// Returns true when `pr` was updated within [`RECENT_WINDOW_MINUTES`] of
/// `now`. The boundary is inclusive.
pub fn is_recent(pr: &PullRequestSummary, now: DateTime<Utc>) -> bool {
    pr.updated_at >= now - Duration::minutes(RECENT_WINDOW_MINUTES)
}

/// Keeps the recently updated pull requests, in their original order.
pub fn retain_recent(prs: Vec<PullRequestSummary>, now: DateTime<Utc>) -> Vec<PullRequestSummary> {
    prs.into_iter()
        .filter(|pr| {
            let recent = is_recent(pr, now);
            if recent {
                debug!(number = pr.number, status = %pr.status, updated_at = %pr.updated_at, "keeping pull request");
            } else {
                debug!(number = pr.number, updated_at = %pr.updated_at, "dropping stale pull request");
            }
            recent
        })
        .collect()
}

/// Fetches a user's open pull requests and keeps the recent ones.
///
/// The clock is read once, after the fetch completes, so every pull request
/// in the batch is judged against the same instant.
pub async fn fetch_recent_pull_requests<S>(
    user: &str,
    source: &S,
) -> anyhow::Result<Vec<PullRequestSummary>>
where
    S: PullRequestSource + Sync,
{
    let prs = source.fetch_pull_requests(user).await?;
    let now = Utc::now();

    Ok(retain_recent(prs, now))
}
