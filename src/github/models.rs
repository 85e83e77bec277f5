//! Contributor records returned by the contributors endpoint.

use serde::Deserialize;

use super::error::HeadcountError;

/// One element of the contributors endpoint's JSON array.
///
/// Anonymous contributors carry no `login`; they still count towards
/// pagination totals but contribute nothing to login extraction.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ContributorRecord {
    /// Account login, absent for anonymous contributors.
    #[serde(default)]
    pub login: Option<String>,
    /// Number of commits attributed to this contributor.
    #[serde(default)]
    pub contributions: u64,
}

/// Parses a contributors page body into its records.
///
/// # Errors
///
/// Returns [`HeadcountError::MalformedBody`] when the body is not a JSON
/// array of contributor records.
pub fn parse_contributors(body: &str) -> Result<Vec<ContributorRecord>, HeadcountError> {
    serde_json::from_str(body).map_err(|error| HeadcountError::MalformedBody {
        message: error.to_string(),
    })
}

/// Extracts the `message` field from a GitHub error body, if present.
#[must_use]
pub(crate) fn extract_github_message(body: &str) -> Option<String> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return None;
    };
    value
        .get("message")
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
}
