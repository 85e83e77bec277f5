//! Gateway trait and reqwest-backed client for the contributors endpoint.
//!
//! The trait-based design enables mocking in tests while the reqwest
//! implementation handles real HTTP requests, one authenticated GET per page.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, LINK};
use url::Url;

use super::error::HeadcountError;
use super::link::RelationLinks;
use super::locator::{PersonalAccessToken, RepoRef};
use super::models::extract_github_message;

/// Accept header value requesting the GitHub JSON media type.
const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// REST API version pinned on every request.
const GITHUB_API_VERSION: &str = "2022-11-28";

/// Request timeout; no single page fetch may block past this bound.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The result of fetching one contributors page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResponse {
    /// HTTP status code of the response.
    pub status: u16,
    /// Raw `Link` header value, if the response carried one.
    pub link: Option<String>,
    /// All response headers rendered as `name: value` lines, for audit dumps.
    pub headers: String,
    /// Raw JSON body.
    pub body: String,
}

impl PageResponse {
    /// Parses the pagination relations from this response's `Link` header.
    #[must_use]
    pub fn links(&self) -> RelationLinks {
        self.link.as_deref().map(RelationLinks::parse).unwrap_or_default()
    }
}

/// Gateway that can fetch contributors pages.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContributorsGateway: Send + Sync {
    /// Builds the first-page URL for a repository's contributors endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`HeadcountError::InvalidUrl`] when the URL cannot be built.
    fn first_page_url(&self, repo: &RepoRef, per_page: u8) -> Result<Url, HeadcountError>;

    /// Performs one authenticated GET and returns the usable page.
    ///
    /// # Errors
    ///
    /// Returns [`HeadcountError::Network`] on transport failure,
    /// [`HeadcountError::Api`] for any non-200 status (with the GitHub
    /// `message` field when the body provides one), and
    /// [`HeadcountError::EmptyBody`] when a 200 response has no body.
    async fn fetch_page(&self, url: &Url) -> Result<PageResponse, HeadcountError>;
}

/// reqwest-backed [`ContributorsGateway`].
///
/// Follows redirects transparently (reqwest default) and bounds every
/// request with a 30-second timeout.
#[derive(Debug, Clone)]
pub struct ContributorsClient {
    http: reqwest::Client,
    token: PersonalAccessToken,
    api_base: Url,
}

impl ContributorsClient {
    /// Creates a client for the given token and API base URL.
    ///
    /// # Errors
    ///
    /// Returns [`HeadcountError::Network`] when the underlying HTTP client
    /// cannot be constructed.
    pub fn new(token: &PersonalAccessToken, api_base: Url) -> Result<Self, HeadcountError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("headcount/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|error| HeadcountError::Network {
                message: error.to_string(),
            })?;

        Ok(Self {
            http,
            token: token.clone(),
            api_base,
        })
    }
}

#[async_trait]
impl ContributorsGateway for ContributorsClient {
    fn first_page_url(&self, repo: &RepoRef, per_page: u8) -> Result<Url, HeadcountError> {
        let raw = format!(
            "{base}/repos/{owner}/{name}/contributors?per_page={per_page}&anon=1",
            base = self.api_base.as_str().trim_end_matches('/'),
            owner = repo.owner(),
            name = repo.name(),
        );
        Url::parse(&raw).map_err(|error| HeadcountError::InvalidUrl(error.to_string()))
    }

    async fn fetch_page(&self, url: &Url) -> Result<PageResponse, HeadcountError> {
        let response = self
            .http
            .get(url.clone())
            .header(ACCEPT, GITHUB_ACCEPT)
            .header(AUTHORIZATION, format!("Bearer {}", self.token.value()))
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
            .send()
            .await
            .map_err(|error| HeadcountError::Network {
                message: error.to_string(),
            })?;

        let status = response.status();
        let link = response
            .headers()
            .get(LINK)
            .and_then(|value| value.to_str().ok())
            .map(ToOwned::to_owned);
        let headers = render_headers(response.headers());
        let body = response
            .text()
            .await
            .map_err(|error| HeadcountError::Network {
                message: error.to_string(),
            })?;

        if status.as_u16() != 200 {
            let fallback = status.canonical_reason().unwrap_or("unexpected status");
            let message = extract_github_message(&body).unwrap_or_else(|| fallback.to_owned());
            return Err(HeadcountError::Api {
                status: status.as_u16(),
                message,
            });
        }

        if body.trim().is_empty() {
            return Err(HeadcountError::EmptyBody);
        }

        Ok(PageResponse {
            status: status.as_u16(),
            link,
            headers,
            body,
        })
    }
}

fn render_headers(headers: &HeaderMap) -> String {
    let mut rendered = String::new();
    for (name, value) in headers {
        rendered.push_str(name.as_str());
        rendered.push_str(": ");
        rendered.push_str(String::from_utf8_lossy(value.as_bytes()).as_ref());
        rendered.push('\n');
    }
    rendered
}
