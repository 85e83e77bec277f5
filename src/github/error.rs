//! Error types exposed by the contributor-counting layer.

use thiserror::Error;

/// Errors surfaced while parsing input or communicating with GitHub.
///
/// Startup errors (`MissingToken`, `NoRepositories`) abort the run before any
/// network activity. Everything else is recoverable per repository: the run
/// reports the failure and proceeds to the next repository.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HeadcountError {
    /// The authentication token was missing or blank.
    #[error("personal access token is required (use --token, HEADCOUNT_TOKEN, or GITHUB_TOKEN)")]
    MissingToken,

    /// No repositories were supplied on the command line or stdin.
    #[error("no repositories supplied; pass owner/repo arguments or pipe them on stdin")]
    NoRepositories,

    /// A repository reference did not split into owner and name.
    #[error("repository must be in owner/repo form: `{input}`")]
    InvalidRepository {
        /// The token that failed to parse.
        input: String,
    },

    /// A URL could not be parsed or constructed.
    #[error("URL is invalid: {0}")]
    InvalidUrl(String),

    /// GitHub answered with a non-200 status.
    #[error("GitHub API error (status {status}): {message}")]
    Api {
        /// HTTP status code from the response.
        status: u16,
        /// Message from the GitHub error body, or the status reason.
        message: String,
    },

    /// GitHub answered 200 but the body was empty.
    #[error("page fetch produced no usable body")]
    EmptyBody,

    /// The contributor payload was not a JSON array of records.
    #[error("contributor payload is malformed: {message}")]
    MalformedBody {
        /// Deserialization error detail.
        message: String,
    },

    /// A `rel="last"` link was present but carried no readable page number.
    #[error("could not read a page number from pagination link: {url}")]
    UnparseableCount {
        /// The `last` relation URL that defeated extraction.
        url: String,
    },

    /// Networking failed while calling GitHub.
    #[error("network error talking to GitHub: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}
