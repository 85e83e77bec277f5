//! Structured parsing of the HTTP `Link` pagination header.
//!
//! GitHub conveys pagination as comma-separated `<url>; rel="name"` entries.
//! The relation value is matched exactly; case-insensitivity of the header
//! name itself is handled by the header map lookup in the client.

use url::Url;

/// Relation-name-to-URL table parsed from a `Link` header value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationLinks {
    relations: Vec<(String, String)>,
}

impl RelationLinks {
    /// Parses a `Link` header value into its relation table.
    ///
    /// Entries that do not carry both a `<url>` part and a `rel` parameter
    /// are ignored.
    #[must_use]
    pub fn parse(header: &str) -> Self {
        let mut relations = Vec::new();
        for entry in header.split(',') {
            let mut parts = entry.split(';');
            let Some(target) = parts
                .next()
                .map(str::trim)
                .and_then(|target| target.strip_prefix('<'))
                .and_then(|target| target.strip_suffix('>'))
            else {
                continue;
            };
            for parameter in parts {
                let Some((name, value)) = parameter.split_once('=') else {
                    continue;
                };
                if name.trim().eq_ignore_ascii_case("rel") {
                    let relation = value.trim().trim_matches('"');
                    relations.push((relation.to_owned(), target.to_owned()));
                }
            }
        }
        Self { relations }
    }

    /// Returns the URL for the given relation name, if present.
    ///
    /// The relation is matched exactly against the quoted value from the
    /// header.
    #[must_use]
    pub fn get(&self, relation: &str) -> Option<&str> {
        self.relations
            .iter()
            .find(|(name, _)| name == relation)
            .map(|(_, target)| target.as_str())
    }

    /// URL of the next page, if any.
    #[must_use]
    pub fn next_url(&self) -> Option<&str> {
        self.get("next")
    }

    /// URL of the last page, if any.
    #[must_use]
    pub fn last_url(&self) -> Option<&str> {
        self.get("last")
    }
}

/// Extracts the `page` query-parameter value from a pagination URL.
#[must_use]
pub fn page_parameter(url: &str) -> Option<usize> {
    let parsed = Url::parse(url).ok()?;
    parsed
        .query_pairs()
        .find(|(name, _)| name == "page")
        .and_then(|(_, value)| value.parse().ok())
}
