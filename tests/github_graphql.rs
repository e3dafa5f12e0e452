use chrono::{Duration, SecondsFormat, Utc};
use mockito::{Matcher, Server};
use prbar::{CommitStatus, GitHub, PullRequestSource, RunOutcome, Settings, run_with_source};
use serde_json::json;

const TOKEN: &str = "ghp_test_token";

fn minutes_ago(minutes: i64) -> String {
    (Utc::now() - Duration::minutes(minutes)).to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn pr_node(number: u64, updated_at: &str, state: serde_json::Value) -> serde_json::Value {
    json!({
        "number": number,
        "updatedAt": updated_at,
        "commits": { "nodes": [ { "commit": { "status": { "state": state } } } ] }
    })
}

fn user_response(nodes: Vec<serde_json::Value>) -> String {
    json!({ "data": { "user": { "pullRequests": { "nodes": nodes } } } }).to_string()
}

fn github_for(server: &Server) -> GitHub {
    GitHub::with_base_uri(TOKEN, &server.url()).unwrap()
}

#[tokio::test]
async fn test_request_carries_bearer_token_and_variables() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/graphql")
        .match_header(
            "authorization",
            Matcher::Regex(format!("(?i)^bearer {TOKEN}$")),
        )
        .match_body(Matcher::PartialJson(json!({
            "variables": { "login": "octocat", "first": 3 }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(user_response(vec![]))
        .create_async()
        .await;

    let prs = github_for(&server)
        .fetch_pull_requests("octocat")
        .await
        .unwrap();

    assert!(prs.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_maps_nodes_in_order() {
    let mut server = Server::new_async().await;
    let updated = minutes_ago(3);
    let _mock = server
        .mock("POST", "/graphql")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(user_response(vec![
            pr_node(42, &updated, json!("SUCCESS")),
            pr_node(41, &updated, json!("ERROR")),
            json!({ "number": 40, "updatedAt": updated, "commits": { "nodes": [] } }),
        ]))
        .create_async()
        .await;

    let prs = github_for(&server)
        .fetch_pull_requests("octocat")
        .await
        .unwrap();

    let summary: Vec<(u64, CommitStatus)> = prs.iter().map(|pr| (pr.number, pr.status)).collect();
    assert_eq!(
        summary,
        vec![
            (42, CommitStatus::Success),
            (41, CommitStatus::Other),
            (40, CommitStatus::Other),
        ]
    );
}

#[tokio::test]
async fn test_end_to_end_status_line() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/graphql")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(user_response(vec![
            pr_node(101, &minutes_ago(1), json!("SUCCESS")),
            pr_node(102, &minutes_ago(4), json!(null)),
            pr_node(103, &minutes_ago(90), json!("PENDING")),
        ]))
        .create_async()
        .await;

    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let outcome = run_with_source(
        "octocat",
        &github_for(&server),
        &Settings::default(),
        &mut stdout,
        &mut stderr,
    )
    .await;

    assert_eq!(outcome, RunOutcome::Success);
    assert_eq!(String::from_utf8(stdout).unwrap(), "#101 ✅ #102 ❌\n");
    assert!(stderr.is_empty());
}

#[tokio::test]
async fn test_graphql_errors_fail_the_fetch() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/graphql")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "data": { "user": null },
                "errors": [ { "message": "Could not resolve to a User with the login of 'ghost'." } ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let err = github_for(&server)
        .fetch_pull_requests("ghost")
        .await
        .unwrap_err();

    assert!(format!("{err:#}").contains("Could not resolve to a User"));
}

#[tokio::test]
async fn test_null_user_fails_the_fetch() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/graphql")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "data": { "user": null } }).to_string())
        .create_async()
        .await;

    let err = github_for(&server)
        .fetch_pull_requests("ghost")
        .await
        .unwrap_err();

    assert!(err.to_string().contains("'ghost' not found"));
}

#[tokio::test]
async fn test_bad_credentials_exit_silently() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/graphql")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "message": "Bad credentials",
                "documentation_url": "https://docs.github.com/graphql"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let outcome = run_with_source(
        "octocat",
        &github_for(&server),
        &Settings::default(),
        &mut stdout,
        &mut stderr,
    )
    .await;

    assert_eq!(outcome, RunOutcome::Failure);
    assert!(stdout.is_empty());
    assert!(stderr.is_empty());
}

#[tokio::test]
async fn test_malformed_body_reported_in_debug() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/graphql")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let settings = Settings {
        debug: true,
        ..Settings::default()
    };
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let outcome = run_with_source(
        "octocat",
        &github_for(&server),
        &settings,
        &mut stdout,
        &mut stderr,
    )
    .await;

    assert_eq!(outcome, RunOutcome::Failure);
    assert!(stdout.is_empty());
    let stderr = String::from_utf8(stderr).unwrap();
    assert!(stderr.contains("GitHub GraphQL request failed"));
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/graphql")
        .with_status(503)
        .with_header("content-type", "application/json")
        .with_body(json!({ "message": "Service Unavailable" }).to_string())
        .expect(1)
        .create_async()
        .await;

    let result = github_for(&server).fetch_pull_requests("octocat").await;

    assert!(result.is_err());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_bad_gateway_fails_after_one_request() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/graphql")
        .with_status(502)
        .with_body("Bad Gateway")
        .expect(1)
        .create_async()
        .await;

    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let outcome = run_with_source(
        "octocat",
        &github_for(&server),
        &Settings::default(),
        &mut stdout,
        &mut stderr,
    )
    .await;

    assert_eq!(outcome, RunOutcome::Failure);
    assert!(stdout.is_empty());
    mock.assert_async().await;
}
