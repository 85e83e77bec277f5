//! Unique-contributor aggregation across repositories.
//!
//! Every repository is paginated to completion at page size 100, each page's
//! `login` values are appended to a shared accumulator, and the run ends with
//! the sorted de-duplicated union. A failure mid-pagination stops that
//! repository only; logins already accumulated are kept.

use url::Url;

use crate::artifacts::ArtifactSink;
use crate::github::client::ContributorsGateway;
use crate::github::error::HeadcountError;
use crate::github::locator::RepoRef;
use crate::github::models::{ContributorRecord, parse_contributors};

const HARVEST_PAGE_SIZE: u8 = 100;

/// Append-only collection of login strings across all pages and repositories.
///
/// Holds exactly one entry per (repository, contributor-with-login) pair
/// returned by the API; anonymous records carry no login and contribute
/// nothing. Reduced once at the end of the run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoginAccumulator {
    logins: Vec<String>,
}

impl LoginAccumulator {
    /// Creates an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends every present login from a page of records.
    ///
    /// Returns how many logins were appended.
    pub fn extend_from_records(&mut self, records: Vec<ContributorRecord>) -> usize {
        let before = self.logins.len();
        self.logins
            .extend(records.into_iter().filter_map(|record| record.login));
        self.logins.len() - before
    }

    /// Number of entries accumulated so far, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.logins.len()
    }

    /// Whether nothing has been accumulated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.logins.is_empty()
    }

    /// Reduces the accumulator to its sorted de-duplicated union.
    #[must_use]
    pub fn into_sorted_unique(self) -> Vec<String> {
        let mut logins = self.logins;
        logins.sort_unstable();
        logins.dedup();
        logins
    }
}

/// What one repository's pagination harvest produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoHarvest {
    /// Pages fetched successfully.
    pub pages: usize,
    /// Logins appended to the accumulator.
    pub logins: usize,
    /// The failure that stopped pagination early, if any.
    pub error: Option<HeadcountError>,
}

/// Per-repository outcome of an aggregation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HarvestOutcome {
    /// Every page was fetched and extracted.
    Harvested {
        /// The repository that was harvested.
        repo: RepoRef,
        /// Pages fetched.
        pages: usize,
        /// Logins appended to the accumulator.
        logins: usize,
    },
    /// Pagination stopped early; accumulated logins were kept.
    Partial {
        /// The repository whose pagination failed.
        repo: RepoRef,
        /// Pages fetched before the failure.
        pages: usize,
        /// Logins kept despite the failure.
        logins: usize,
        /// Why pagination stopped.
        error: HeadcountError,
    },
    /// The input token never parsed; no network call was made.
    Invalid {
        /// The input token as supplied.
        input: String,
        /// The parse failure.
        error: HeadcountError,
    },
}

/// Result of aggregating every supplied repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateReport {
    /// One outcome per input, in input order.
    pub outcomes: Vec<HarvestOutcome>,
    /// Sorted de-duplicated union of all collected logins.
    pub unique_logins: Vec<String>,
}

/// Paginates one repository to completion, appending logins as it goes.
///
/// Pages are fetched strictly in order: each page's URL is discovered from
/// the previous response's `rel="next"` link. Any failure is recorded on the
/// returned [`RepoHarvest`] and stops this repository's pagination without
/// discarding what was already accumulated.
pub async fn harvest_repository<G>(
    gateway: &G,
    repo: &RepoRef,
    accumulator: &mut LoginAccumulator,
    sink: Option<&ArtifactSink>,
) -> RepoHarvest
where
    G: ContributorsGateway + ?Sized,
{
    let mut harvest = RepoHarvest {
        pages: 0,
        logins: 0,
        error: None,
    };

    let mut url = match gateway.first_page_url(repo, HARVEST_PAGE_SIZE) {
        Ok(url) => url,
        Err(error) => {
            harvest.error = Some(error);
            return harvest;
        }
    };

    let mut page = 1_usize;
    loop {
        let response = match gateway.fetch_page(&url).await {
            Ok(response) => response,
            Err(error) => {
                harvest.error = Some(error);
                return harvest;
            }
        };

        if let Some(sink) = sink {
            if let Err(error) = sink.write_page_body(repo, page, &response.body) {
                harvest.error = Some(error);
                return harvest;
            }
        }

        let records = match parse_contributors(&response.body) {
            Ok(records) => records,
            Err(error) => {
                harvest.error = Some(error);
                return harvest;
            }
        };

        harvest.logins += accumulator.extend_from_records(records);
        harvest.pages += 1;
        if page > 1 {
            tracing::debug!(repo = %repo, page, "fetched contributors page");
        }

        let Some(next) = response.links().next_url().map(ToOwned::to_owned) else {
            return harvest;
        };
        url = match Url::parse(&next) {
            Ok(next_url) => next_url,
            Err(error) => {
                harvest.error = Some(HeadcountError::InvalidUrl(error.to_string()));
                return harvest;
            }
        };
        page += 1;
    }
}

/// Aggregates the unique contributor logins across every supplied repository.
///
/// Malformed references are skipped without network activity; repository
/// failures keep whatever was accumulated and never stop the run. An empty
/// union is a normal zero result, not an error.
pub async fn aggregate_unique<G>(
    gateway: &G,
    inputs: &[String],
    sink: Option<&ArtifactSink>,
) -> AggregateReport
where
    G: ContributorsGateway + ?Sized,
{
    let mut accumulator = LoginAccumulator::new();
    let mut outcomes = Vec::with_capacity(inputs.len());

    for input in inputs {
        let outcome = match RepoRef::parse(input) {
            Err(error) => {
                tracing::warn!(input = %input, "skipping malformed repository reference");
                HarvestOutcome::Invalid {
                    input: input.clone(),
                    error,
                }
            }
            Ok(repo) => {
                let harvest = harvest_repository(gateway, &repo, &mut accumulator, sink).await;
                match harvest.error {
                    None => HarvestOutcome::Harvested {
                        repo,
                        pages: harvest.pages,
                        logins: harvest.logins,
                    },
                    Some(error) => HarvestOutcome::Partial {
                        repo,
                        pages: harvest.pages,
                        logins: harvest.logins,
                        error,
                    },
                }
            }
        };
        outcomes.push(outcome);
    }

    AggregateReport {
        outcomes,
        unique_logins: accumulator.into_sorted_unique(),
    }
}
