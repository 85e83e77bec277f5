//! GitHub REST API plumbing: repository references, the `Link` pagination
//! parser, contributor records, and the page-fetching gateway.

pub mod client;
pub mod error;
pub mod link;
pub mod locator;
pub mod models;

pub use client::{ContributorsClient, ContributorsGateway, PageResponse};
pub use error::HeadcountError;
pub use link::{RelationLinks, page_parameter};
pub use locator::{PersonalAccessToken, RepoRef};
pub use models::{ContributorRecord, parse_contributors};
