//! Command-line surface shared by both binaries.
//!
//! Repositories arrive as positional `owner/repo` tokens, or one per line on
//! stdin when no arguments are given and stdin is not a terminal. The token
//! is resolved from `--token`, then the `HEADCOUNT_TOKEN` and legacy
//! `GITHUB_TOKEN` environment variables.

use std::env;
use std::io::{self, BufRead, IsTerminal};
use std::path::PathBuf;

use clap::Parser;
use url::Url;

use crate::artifacts::ArtifactSink;
use crate::github::error::HeadcountError;
use crate::github::locator::PersonalAccessToken;

/// Arguments accepted by `headcount` and `headcount-unique`.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct HeadcountArgs {
    /// Repositories in `owner/repo` form; read from stdin when omitted.
    pub repositories: Vec<String>,

    /// Personal access token; falls back to HEADCOUNT_TOKEN, then GITHUB_TOKEN.
    #[arg(long, short = 't')]
    pub token: Option<String>,

    /// Base URL for the GitHub REST API.
    #[arg(long, default_value = "https://api.github.com")]
    pub api_base: Url,

    /// Directory for raw response dumps (defaults per tool).
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Disable writing raw response dumps.
    #[arg(long)]
    pub no_artifacts: bool,
}

impl HeadcountArgs {
    /// Resolves the token from the CLI or the environment.
    ///
    /// # Errors
    ///
    /// Returns [`HeadcountError::MissingToken`] when no source provides a
    /// non-blank value.
    pub fn resolve_token(&self) -> Result<PersonalAccessToken, HeadcountError> {
        let value = token_from(self.token.as_deref(), |name| env::var(name).ok())
            .ok_or(HeadcountError::MissingToken)?;
        PersonalAccessToken::new(value)
    }

    /// Resolves the repository references from arguments or stdin.
    ///
    /// # Errors
    ///
    /// Returns [`HeadcountError::NoRepositories`] when no arguments were
    /// given and stdin is a terminal or yields no non-blank lines, and
    /// [`HeadcountError::Io`] when reading stdin fails.
    pub fn resolve_repositories(&self) -> Result<Vec<String>, HeadcountError> {
        if !self.repositories.is_empty() {
            return Ok(self.repositories.clone());
        }

        let stdin = io::stdin();
        if stdin.is_terminal() {
            return Err(HeadcountError::NoRepositories);
        }
        repositories_from(stdin.lock())
    }

    /// Builds the artifact sink for this run, unless dumping is disabled.
    ///
    /// `default_dir` is the tool's conventional dump location, overridden by
    /// `--output-dir`.
    #[must_use]
    pub fn artifact_sink(&self, default_dir: &str) -> Option<ArtifactSink> {
        if self.no_artifacts {
            return None;
        }
        let root = self
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(default_dir));
        Some(ArtifactSink::new(root))
    }
}

/// Reads one repository reference per non-blank line, trimmed.
fn repositories_from(reader: impl BufRead) -> Result<Vec<String>, HeadcountError> {
    let mut inputs = Vec::new();
    for line in reader.lines() {
        let raw = line.map_err(|error| HeadcountError::Io {
            message: error.to_string(),
        })?;
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            inputs.push(trimmed.to_owned());
        }
    }

    if inputs.is_empty() {
        return Err(HeadcountError::NoRepositories);
    }
    Ok(inputs)
}

/// Picks the token from the explicit value or the environment, in order.
fn token_from(
    explicit: Option<&str>,
    env_lookup: impl Fn(&str) -> Option<String>,
) -> Option<String> {
    explicit
        .map(ToOwned::to_owned)
        .or_else(|| env_lookup("HEADCOUNT_TOKEN"))
        .or_else(|| env_lookup("GITHUB_TOKEN"))
}
