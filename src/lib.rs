//! prbar: GitHub pull request status for a status bar.
//!
//! Queries the GitHub GraphQL API for a user's most recently updated open
//! pull requests, keeps those touched in the last fifteen minutes, and
//! renders them as a single compact line such as `#101 ✅ #102 🕐`. Errors
//! are silent unless debug mode is on, so a broken token or network never
//! leaves garbage in the bar.

pub mod cli;
pub mod config;
pub mod display;
pub mod github;
pub mod graphql;
pub mod query;
pub mod runner;
pub mod types;

pub use cli::parse_args;
pub use config::Settings;
pub use display::{render_status_line, status_icon};
pub use github::GitHub;
pub use query::{fetch_recent_pull_requests, is_recent, retain_recent};
pub use runner::{RunOutcome, run, run_with_source};
pub use types::{CommitStatus, PullRequestSource, PullRequestSummary, StatusRequest};
