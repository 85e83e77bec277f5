//! Fast contributor counting from pagination metadata.
//!
//! One probe request at page size 1 reads the `Link` header: when a
//! `rel="last"` link exists, its `page` query value is the contributor count
//! (page size 1 makes page number and item count coincide). Without a `last`
//! link the whole list fits on one page, so a single full fetch at page size
//! 100 is counted directly.

use crate::artifacts::ArtifactSink;
use crate::github::client::ContributorsGateway;
use crate::github::error::HeadcountError;
use crate::github::link::page_parameter;
use crate::github::locator::RepoRef;
use crate::github::models::parse_contributors;

const PROBE_PAGE_SIZE: u8 = 1;
const FALLBACK_PAGE_SIZE: u8 = 100;

/// Per-repository result of a fast-count run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountOutcome {
    /// The contributor count was determined.
    Counted {
        /// The repository that was counted.
        repo: RepoRef,
        /// Number of contributors reported by the API.
        contributors: usize,
    },
    /// The repository could not be counted; the run continued regardless.
    Failed {
        /// The input token as supplied.
        input: String,
        /// Why counting failed.
        error: HeadcountError,
    },
}

/// Counts contributors for one repository with the minimum number of calls.
///
/// # Errors
///
/// Returns any fetch or parse failure for the repository; see
/// [`ContributorsGateway::fetch_page`] for the fetch error conditions, plus
/// [`HeadcountError::UnparseableCount`] when a `last` link carries no
/// readable page number.
pub async fn fast_count<G>(
    gateway: &G,
    repo: &RepoRef,
    sink: Option<&ArtifactSink>,
) -> Result<usize, HeadcountError>
where
    G: ContributorsGateway + ?Sized,
{
    let probe_url = gateway.first_page_url(repo, PROBE_PAGE_SIZE)?;
    let probe = gateway.fetch_page(&probe_url).await?;
    if let Some(sink) = sink {
        sink.write_count_artifacts(repo, &probe)?;
    }

    if let Some(last) = probe.links().last_url() {
        return page_parameter(last).ok_or_else(|| HeadcountError::UnparseableCount {
            url: last.to_owned(),
        });
    }

    // Single-page repository: one extra call at full page size, counted
    // directly.
    let full_url = gateway.first_page_url(repo, FALLBACK_PAGE_SIZE)?;
    let full = gateway.fetch_page(&full_url).await?;
    if let Some(sink) = sink {
        sink.write_count_artifacts(repo, &full)?;
    }
    Ok(parse_contributors(&full.body)?.len())
}

/// Counts every supplied repository, recovering from per-repository failures.
///
/// Malformed references fail without any network call; all other failures
/// are recorded and the run proceeds to the next repository.
pub async fn count_repositories<G>(
    gateway: &G,
    inputs: &[String],
    sink: Option<&ArtifactSink>,
) -> Vec<CountOutcome>
where
    G: ContributorsGateway + ?Sized,
{
    let mut outcomes = Vec::with_capacity(inputs.len());
    for input in inputs {
        let outcome = match RepoRef::parse(input) {
            Err(error) => {
                tracing::warn!(input = %input, "skipping malformed repository reference");
                CountOutcome::Failed {
                    input: input.clone(),
                    error,
                }
            }
            Ok(repo) => match fast_count(gateway, &repo, sink).await {
                Ok(contributors) => CountOutcome::Counted { repo, contributors },
                Err(error) => CountOutcome::Failed {
                    input: input.clone(),
                    error,
                },
            },
        };
        outcomes.push(outcome);
    }
    outcomes
}
