use anyhow::{Context, Result};
use tracing::debug;

use crate::types::{GraphQLPullRequest, GraphQLResponse, PullRequestSummary};

/// Number of open pull requests requested per refresh.
pub const PULL_REQUEST_LIMIT: u32 = 3;

const RECENT_PULL_REQUESTS_QUERY: &str = r#"
    query($login: String!, $first: Int!) {
        user(login: $login) {
            pullRequests(first: $first, states: OPEN, orderBy: {field: UPDATED_AT, direction: DESC}) {
                nodes {
                    number
                    updatedAt
                    commits(last: 1) {
                        nodes {
                            commit {
                                status {
                                    state
                                }
                            }
                        }
                    }
                }
            }
        }
    }
"#;

/// Builds the request body for a user's most recently updated open pull
/// requests. The login travels as a variable, never inside the query text.
pub fn create_graphql_query(login: &str) -> serde_json::Value {
    serde_json::json!({
        "query": RECENT_PULL_REQUESTS_QUERY,
        "variables": {
            "login": login,
            "first": PULL_REQUEST_LIMIT,
        }
    })
}

pub fn convert_graphql_pr_to_summary(graphql_pr: GraphQLPullRequest) -> PullRequestSummary {
    PullRequestSummary {
        number: graphql_pr.number,
        updated_at: graphql_pr.updated_at,
        status: graphql_pr.last_commit_status(),
    }
}

/// Unwraps a GraphQL response into summaries, preserving the order GitHub
/// returned them in.
///
/// A response carrying `errors`, lacking `data`, or naming no user is an
/// error; GitHub reports unknown logins that way rather than with an HTTP
/// status.
pub fn convert_response(login: &str, response: GraphQLResponse) -> Result<Vec<PullRequestSummary>> {
    if !response.errors.is_empty() {
        let messages: Vec<&str> = response.errors.iter().map(|e| e.message.as_str()).collect();
        anyhow::bail!("GitHub GraphQL API returned errors: {}", messages.join("; "));
    }

    let user = response
        .data
        .context("GitHub GraphQL response contained no data")?
        .user
        .with_context(|| format!("GitHub user '{}' not found", login))?;

    debug!(
        "received {} pull request node(s) for {}",
        user.pull_requests.nodes.len(),
        login
    );

    Ok(user
        .pull_requests
        .nodes
        .into_iter()
        .flatten()
        .map(convert_graphql_pr_to_summary)
        .collect())
}
