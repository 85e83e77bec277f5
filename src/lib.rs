//! Contributor counting and listing across GitHub repositories.
//!
//! Two algorithms share one gateway: [`count`] reads pagination metadata to
//! obtain per-repository contributor counts with minimal requests, and
//! [`unique`] paginates every repository to completion and reduces the
//! collected logins to a sorted de-duplicated union. The `headcount` and
//! `headcount-unique` binaries are thin shells around these modules.

pub mod artifacts;
pub mod config;
pub mod count;
pub mod github;
pub mod output;
pub mod unique;

pub use artifacts::ArtifactSink;
pub use config::HeadcountArgs;
pub use github::{
    ContributorsClient, ContributorsGateway, HeadcountError, PageResponse, PersonalAccessToken,
    RepoRef,
};
