//! Audit-trail dumps of raw API responses.
//!
//! Dumps are a side artifact, not required for correctness: the fast counter
//! keeps one body and one header block per repository, the aggregator one
//! body per page. Files are named from the sanitized `owner-repo` slug and
//! are never auto-purged.

use std::fs;
use std::path::{Path, PathBuf};

use crate::github::client::PageResponse;
use crate::github::error::HeadcountError;
use crate::github::locator::RepoRef;

/// Writes response artifacts under a working-directory-relative root.
#[derive(Debug, Clone)]
pub struct ArtifactSink {
    root: PathBuf,
}

impl ArtifactSink {
    /// Creates a sink rooted at the given directory.
    ///
    /// The directory is created lazily on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory this sink writes under.
    #[must_use]
    pub fn root(&self) -> &Path {
        self.root.as_path()
    }

    /// Writes one page body for the aggregator as `{slug}-page-{N}.json`.
    ///
    /// # Errors
    ///
    /// Returns [`HeadcountError::Io`] when the directory or file cannot be
    /// written.
    pub fn write_page_body(
        &self,
        repo: &RepoRef,
        page: usize,
        body: &str,
    ) -> Result<(), HeadcountError> {
        self.ensure_root()?;
        let path = self.root.join(format!("{}-page-{page}.json", repo.slug()));
        fs::write(path, body).map_err(io_error)
    }

    /// Writes the fast counter's body and raw headers for a repository as
    /// `{slug}.json` and `{slug}.headers`.
    ///
    /// The fallback full fetch overwrites the probe's dump, leaving the
    /// richer body in place.
    ///
    /// # Errors
    ///
    /// Returns [`HeadcountError::Io`] when the directory or files cannot be
    /// written.
    pub fn write_count_artifacts(
        &self,
        repo: &RepoRef,
        response: &PageResponse,
    ) -> Result<(), HeadcountError> {
        self.ensure_root()?;
        let slug = repo.slug();
        fs::write(self.root.join(format!("{slug}.json")), &response.body).map_err(io_error)?;
        fs::write(self.root.join(format!("{slug}.headers")), &response.headers).map_err(io_error)
    }

    fn ensure_root(&self) -> Result<(), HeadcountError> {
        fs::create_dir_all(&self.root).map_err(io_error)
    }
}

fn io_error(error: std::io::Error) -> HeadcountError {
    HeadcountError::Io {
        message: error.to_string(),
    }
}
