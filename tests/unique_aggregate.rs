//! End-to-end tests for the unique aggregator against a mock GitHub API.

mod support;

use headcount::artifacts::ArtifactSink;
use headcount::github::HeadcountError;
use headcount::output::write_unique_report;
use headcount::unique::{HarvestOutcome, aggregate_unique};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use support::{client_for, contributors_body, link_entry};

/// Mounts a three-page contributors listing for `octo/big`.
async fn mount_three_pages(server: &MockServer) {
    let repo_path = "/repos/octo/big/contributors";
    Mock::given(method("GET"))
        .and(path(repo_path))
        .and(query_param("per_page", "100"))
        .and(query_param_is_missing("page"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(contributors_body(&["alice", "bob"]))
                .insert_header(
                    "Link",
                    format!(
                        "{next}, {last}",
                        next = link_entry(&server.uri(), "octo/big", 100, 2, "next"),
                        last = link_entry(&server.uri(), "octo/big", 100, 3, "last"),
                    ),
                ),
        )
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(repo_path))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(contributors_body(&["carol"]))
                .insert_header(
                    "Link",
                    format!(
                        "{next}, {last}",
                        next = link_entry(&server.uri(), "octo/big", 100, 3, "next"),
                        last = link_entry(&server.uri(), "octo/big", 100, 3, "last"),
                    ),
                ),
        )
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(repo_path))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(contributors_body(&["dave"])))
        .mount(server)
        .await;
}

/// The `page` query value of a recorded request, defaulting to 1.
fn page_of(request: &wiremock::Request) -> usize {
    request
        .url
        .query_pairs()
        .find(|(name, _)| name == "page")
        .and_then(|(_, value)| value.parse().ok())
        .unwrap_or(1)
}

#[tokio::test]
async fn follows_next_links_with_one_request_per_page_in_order() {
    let server = MockServer::start().await;
    mount_three_pages(&server).await;

    let client = client_for(&server.uri());
    let report = aggregate_unique(&client, &["octo/big".to_owned()], None).await;

    assert_eq!(
        report.unique_logins,
        vec![
            "alice".to_owned(),
            "bob".to_owned(),
            "carol".to_owned(),
            "dave".to_owned()
        ]
    );
    assert!(
        matches!(
            report.outcomes.first(),
            Some(HarvestOutcome::Harvested {
                pages: 3,
                logins: 4,
                ..
            })
        ),
        "expected three harvested pages, got {:?}",
        report.outcomes
    );

    let requests = server.received_requests().await.expect("should record requests");
    let pages: Vec<usize> = requests.iter().map(page_of).collect();
    assert_eq!(pages, vec![1, 2, 3], "pages must be fetched in order");
}

#[tokio::test]
async fn aggregation_is_idempotent_over_the_same_data() {
    let server = MockServer::start().await;
    mount_three_pages(&server).await;

    let client = client_for(&server.uri());
    let inputs = vec!["octo/big".to_owned()];
    let first = aggregate_unique(&client, &inputs, None).await;
    let second = aggregate_unique(&client, &inputs, None).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn overlapping_repositories_deduplicate_to_the_union() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/alpha/contributors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(contributors_body(&["alice", "bob"])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/octo/beta/contributors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(contributors_body(&["bob", "carol"])))
        .mount(&server)
        .await;

    let client = client_for(&server.uri());
    let report = aggregate_unique(
        &client,
        &["octo/alpha".to_owned(), "octo/beta".to_owned()],
        None,
    )
    .await;

    assert_eq!(
        report.unique_logins,
        vec!["alice".to_owned(), "bob".to_owned(), "carol".to_owned()]
    );
}

#[tokio::test]
async fn anonymous_records_are_excluded_from_the_union() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/mixed/contributors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"login": "alice", "contributions": 3, "type": "User"},
            {"type": "Anonymous", "contributions": 7}
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server.uri());
    let report = aggregate_unique(&client, &["octo/mixed".to_owned()], None).await;

    assert_eq!(report.unique_logins, vec!["alice".to_owned()]);
}

#[tokio::test]
async fn mid_pagination_failure_keeps_collected_logins() {
    let server = MockServer::start().await;
    let repo_path = "/repos/octo/flaky/contributors";

    Mock::given(method("GET"))
        .and(path(repo_path))
        .and(query_param_is_missing("page"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(contributors_body(&["alice", "bob"]))
                .insert_header(
                    "Link",
                    link_entry(&server.uri(), "octo/flaky", 100, 2, "next"),
                ),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(repo_path))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(502)
                .set_body_json(serde_json::json!({"message": "Bad Gateway"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server.uri());
    let report = aggregate_unique(&client, &["octo/flaky".to_owned()], None).await;

    assert_eq!(
        report.unique_logins,
        vec!["alice".to_owned(), "bob".to_owned()],
        "page-one logins must survive the failure"
    );
    assert!(
        matches!(
            report.outcomes.first(),
            Some(HarvestOutcome::Partial {
                pages: 1,
                logins: 2,
                error: HeadcountError::Api { status: 502, .. },
                ..
            })
        ),
        "expected partial outcome, got {:?}",
        report.outcomes
    );
}

#[tokio::test]
async fn zero_results_render_distinctly_from_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/empty/contributors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let client = client_for(&server.uri());
    let report = aggregate_unique(&client, &["octo/empty".to_owned()], None).await;

    assert!(report.unique_logins.is_empty());

    let mut buffer = Vec::new();
    write_unique_report(&mut buffer, &report).expect("should render");
    let output = String::from_utf8(buffer).expect("output should be valid UTF-8");
    assert!(
        output.contains("No contributors found"),
        "zero result must not read as an error: {output}"
    );
}

#[tokio::test]
async fn every_page_body_is_dumped_under_the_sink() {
    let server = MockServer::start().await;
    mount_three_pages(&server).await;

    let dir = tempfile::tempdir().expect("should create temp dir");
    let sink = ArtifactSink::new(dir.path());
    let client = client_for(&server.uri());

    let report = aggregate_unique(&client, &["octo/big".to_owned()], Some(&sink)).await;
    assert_eq!(report.unique_logins.len(), 4);

    for page in 1..=3 {
        let dump = dir.path().join(format!("octo-big-page-{page}.json"));
        assert!(dump.exists(), "missing page dump {}", dump.display());
    }
}
