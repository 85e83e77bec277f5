//! Shared helpers for wiremock-backed integration tests.

use headcount::github::{ContributorsClient, PersonalAccessToken};
use url::Url;

/// Token every test client authenticates with.
pub const TEST_TOKEN: &str = "test-token";

/// Builds a real client pointed at a mock server.
pub fn client_for(uri: &str) -> ContributorsClient {
    let token = PersonalAccessToken::new(TEST_TOKEN).expect("token should be valid");
    let base = Url::parse(uri).expect("server URI should parse");
    ContributorsClient::new(&token, base).expect("client should build")
}

/// JSON contributors array with one record per login.
pub fn contributors_body(logins: &[&str]) -> serde_json::Value {
    serde_json::Value::Array(
        logins
            .iter()
            .enumerate()
            .map(|(index, login)| {
                serde_json::json!({
                    "login": login,
                    "contributions": index + 1,
                    "type": "User"
                })
            })
            .collect(),
    )
}

/// One `Link` header entry for a contributors page of the given repository.
pub fn link_entry(uri: &str, owner_repo: &str, per_page: u8, page: usize, rel: &str) -> String {
    format!(
        "<{uri}/repos/{owner_repo}/contributors?per_page={per_page}&anon=1&page={page}>; rel=\"{rel}\""
    )
}
