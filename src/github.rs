use anyhow::{Context, Result};
use async_trait::async_trait;
use octocrab::{Octocrab, service::middleware::retry::RetryConfig};
use tracing::debug;

use crate::{
    graphql::{convert_response, create_graphql_query},
    types::{GraphQLResponse, PullRequestSource, PullRequestSummary},
};

/// Root of the public GitHub API; the GraphQL endpoint lives at
/// `{GITHUB_API_URL}/graphql`.
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// Pull request source backed by the GitHub GraphQL API.
#[derive(Clone)]
pub struct GitHub {
    client: Octocrab,
}

impl GitHub {
    /// Creates a client for api.github.com that sends `token` as a bearer
    /// credential on every request.
    pub fn new(token: &str) -> Result<Self> {
        Self::with_base_uri(token, GITHUB_API_URL)
    }

    /// Same as [`GitHub::new`] against a different API root, e.g. a GitHub
    /// Enterprise host or a local test server.
    ///
    /// Each fetch is exactly one request: octocrab's retry layer is turned
    /// off.
    pub fn with_base_uri(token: &str, base_uri: &str) -> Result<Self> {
        let client = Octocrab::builder()
            .base_uri(base_uri)
            .with_context(|| format!("Invalid GitHub API base URI: '{}'", base_uri))?
            .personal_token(token.to_string())
            .add_retry_config(RetryConfig::None)
            .build()
            .context("Failed to create GitHub client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PullRequestSource for GitHub {
    async fn fetch_pull_requests(&self, user: &str) -> Result<Vec<PullRequestSummary>> {
        let query = create_graphql_query(user);
        debug!("querying open pull requests for {}", user);

        let response: GraphQLResponse = self
            .client
            .graphql(&query)
            .await
            .context("GitHub GraphQL request failed")?;

        convert_response(user, response)
    }
}
