use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Status of the last commit on a pull request, as reported by GitHub's
/// combined commit status.
///
/// Only the two states the status bar distinguishes are modelled; every
/// other value, including a missing status, collapses into `Other`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CommitStatus {
    Success,
    Pending,
    #[default]
    Other,
}

impl CommitStatus {
    /// Maps the literal GraphQL `StatusState` string. Matching is
    /// case-sensitive.
    pub fn from_state(state: &str) -> Self {
        match state {
            "SUCCESS" => CommitStatus::Success,
            "PENDING" => CommitStatus::Pending,
            _ => CommitStatus::Other,
        }
    }
}

impl std::fmt::Display for CommitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommitStatus::Success => write!(f, "Success"),
            CommitStatus::Pending => write!(f, "Pending"),
            CommitStatus::Other => write!(f, "Other"),
        }
    }
}

// GitHub may add states (or send null) at any time; unknown values must not
// fail the whole response.
pub fn deserialize_commit_status<'de, D>(
    deserializer: D,
) -> std::result::Result<CommitStatus, D::Error>
where
    D: Deserializer<'de>,
{
    let state = Option::<String>::deserialize(deserializer)?;
    Ok(state
        .as_deref()
        .map_or(CommitStatus::Other, CommitStatus::from_state))
}

/// A pull request reduced to what the status bar shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestSummary {
    pub number: u64,
    pub updated_at: DateTime<Utc>,
    pub status: CommitStatus,
}

/// Parameters for a single status-bar refresh.
#[derive(Clone, PartialEq, Eq)]
pub struct StatusRequest {
    pub user: String,
    pub token: String,
}

impl std::fmt::Debug for StatusRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusRequest")
            .field("user", &self.user)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Source of a user's open pull requests.
///
/// Implementations return at most the most recently updated open pull
/// requests, newest first. Recency filtering happens downstream.
#[async_trait]
pub trait PullRequestSource {
    async fn fetch_pull_requests(&self, user: &str) -> anyhow::Result<Vec<PullRequestSummary>>;
}

#[derive(Debug, Deserialize)]
pub struct GraphQLResponse {
    pub data: Option<UserData>,
    #[serde(default)]
    pub errors: Vec<GraphQLError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQLError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct UserData {
    pub user: Option<GraphQLUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQLUser {
    pub pull_requests: GraphQLPullRequestConnection,
}

#[derive(Debug, Deserialize)]
pub struct GraphQLPullRequestConnection {
    #[serde(default)]
    pub nodes: Vec<Option<GraphQLPullRequest>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQLPullRequest {
    pub number: u64,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub commits: Option<GraphQLCommitConnection>,
}

impl GraphQLPullRequest {
    /// Status of the last commit, or `Other` when the pull request has no
    /// commits or the commit carries no status.
    pub fn last_commit_status(&self) -> CommitStatus {
        self.commits
            .as_ref()
            .and_then(|commits| commits.nodes.last())
            .and_then(Option::as_ref)
            .and_then(|node| node.commit.as_ref())
            .and_then(|commit| commit.status.as_ref())
            .map_or(CommitStatus::Other, |status| status.state)
    }
}

#[derive(Debug, Deserialize)]
pub struct GraphQLCommitConnection {
    #[serde(default)]
    pub nodes: Vec<Option<GraphQLCommitNode>>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQLCommitNode {
    pub commit: Option<GraphQLCommit>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQLCommit {
    #[serde(default)]
    pub status: Option<GraphQLStatus>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQLStatus {
    #[serde(deserialize_with = "deserialize_commit_status", default)]
    pub state: CommitStatus,
}
