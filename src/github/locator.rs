//! Repository references and credential wrappers.

use std::fmt;

use super::error::HeadcountError;

/// A repository reference parsed from an `owner/repo` token.
///
/// Parsing requires exactly one `/` separating two non-empty parts; anything
/// else is rejected so that malformed input never reaches the network.
///
/// # Example
///
/// ```
/// use headcount::github::RepoRef;
///
/// let repo = RepoRef::parse("rust-lang/cargo").expect("should parse");
/// assert_eq!(repo.owner(), "rust-lang");
/// assert_eq!(repo.name(), "cargo");
/// assert_eq!(repo.slug(), "rust-lang-cargo");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    owner: String,
    name: String,
}

impl RepoRef {
    /// Parses an `owner/repo` token.
    ///
    /// # Errors
    ///
    /// Returns [`HeadcountError::InvalidRepository`] unless splitting the
    /// trimmed input on `/` yields exactly two non-empty parts.
    pub fn parse(input: &str) -> Result<Self, HeadcountError> {
        let invalid = || HeadcountError::InvalidRepository {
            input: input.to_owned(),
        };

        let trimmed = input.trim();
        let (owner, name) = trimmed.split_once('/').ok_or_else(invalid)?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(invalid());
        }

        Ok(Self {
            owner: owner.to_owned(),
            name: name.to_owned(),
        })
    }

    /// Repository owner.
    #[must_use]
    pub fn owner(&self) -> &str {
        self.owner.as_str()
    }

    /// Repository name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Deterministic file-name-safe `owner-repo` form used for artifacts.
    ///
    /// Characters outside `[A-Za-z0-9._-]` are replaced with `-`.
    #[must_use]
    pub fn slug(&self) -> String {
        format!("{}-{}", self.owner, self.name)
            .chars()
            .map(|character| {
                if character.is_ascii_alphanumeric() || matches!(character, '.' | '_' | '-') {
                    character
                } else {
                    '-'
                }
            })
            .collect()
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}/{}", self.owner, self.name)
    }
}

/// Personal access token wrapper enforcing presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`HeadcountError::MissingToken`] when the supplied string is
    /// blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, HeadcountError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(HeadcountError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{PersonalAccessToken, RepoRef};
    use crate::github::error::HeadcountError;

    #[rstest]
    #[case("rust-lang/cargo", "rust-lang", "cargo")]
    #[case("  octo/repo  ", "octo", "repo")]
    #[case("dot.name/under_score", "dot.name", "under_score")]
    fn parse_accepts_owner_repo_pairs(
        #[case] input: &str,
        #[case] owner: &str,
        #[case] name: &str,
    ) {
        let repo = RepoRef::parse(input).expect("should parse");
        assert_eq!(repo.owner(), owner);
        assert_eq!(repo.name(), name);
    }

    #[rstest]
    #[case("facebook")]
    #[case("/repo")]
    #[case("owner/")]
    #[case("a/b/c")]
    #[case("")]
    fn parse_rejects_malformed_references(#[case] input: &str) {
        let error = RepoRef::parse(input).expect_err("should reject");
        assert!(
            matches!(error, HeadcountError::InvalidRepository { .. }),
            "expected InvalidRepository, got {error:?}"
        );
    }

    #[test]
    fn slug_sanitises_unexpected_characters() {
        let repo = RepoRef::parse("we ird/näme").expect("should parse");
        assert_eq!(repo.slug(), "we-ird-n-me");
    }

    #[test]
    fn token_rejects_blank_values() {
        let error = PersonalAccessToken::new("   ").expect_err("should reject");
        assert_eq!(error, HeadcountError::MissingToken);
    }

    #[test]
    fn token_trims_whitespace() {
        let token = PersonalAccessToken::new(" ghp_abc ").expect("should accept");
        assert_eq!(token.value(), "ghp_abc");
    }
}
