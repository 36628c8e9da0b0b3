//! External URI patterns bound to in-app routes.

use tracing::trace;

use crate::{
    NavError,
    route::{NavArguments, RoutePattern},
};

/// A deep-link pattern of the form `scheme://path/{arg}`.
///
/// The part after `://` is matched segment by segment like a route pattern.
/// The scheme compares case-insensitively; query and fragment are ignored.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DeepLinkPattern {
    scheme: String,
    path: RoutePattern,
}

impl DeepLinkPattern {
    /// Parse `scheme://path/{arg}`; the path follows [`RoutePattern`] rules.
    pub fn parse(uri_pattern: &str) -> Result<Self, NavError> {
        let (scheme, path) = uri_pattern
            .split_once("://")
            .ok_or_else(|| NavError::invalid_pattern(uri_pattern, "missing `://`"))?;
        if scheme.is_empty()
            || !scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        {
            return Err(NavError::invalid_pattern(uri_pattern, "invalid scheme"));
        }
        let path = RoutePattern::parse(path)
            .map_err(|_| NavError::invalid_pattern(uri_pattern, "invalid path after scheme"))?;
        Ok(Self {
            scheme: scheme.to_ascii_lowercase(),
            path,
        })
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn path(&self) -> &RoutePattern {
        &self.path
    }

    /// Match an incoming URI, returning its decoded arguments.
    pub fn match_uri(&self, uri: &str) -> Option<NavArguments> {
        let (scheme, rest) = uri.split_once("://")?;
        if !scheme.eq_ignore_ascii_case(&self.scheme) {
            trace!(uri, expected = %self.scheme, "deep link scheme mismatch");
            return None;
        }
        let path = rest.split(['?', '#']).next().unwrap_or_default();
        self.path.match_segments(path.split('/'))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::DeepLinkPattern;

    fn accounts_link() -> DeepLinkPattern {
        DeepLinkPattern::parse("rally://Accounts/{name}").unwrap()
    }

    #[test]
    fn extracts_and_decodes_the_argument() {
        let link = accounts_link();
        let args = link.match_uri("rally://Accounts/Checking").unwrap();
        assert_eq!(args.get("name"), Some("Checking"));

        let args = link.match_uri("rally://Accounts/%20").unwrap();
        assert_eq!(args.get("name"), Some(" "));
    }

    #[test]
    fn scheme_is_case_insensitive_and_query_is_ignored() {
        let link = accounts_link();
        let args = link.match_uri("RALLY://Accounts/Bob?source=mail#top").unwrap();
        assert_eq!(args.get("name"), Some("Bob"));
        assert_eq!(args.len(), 1);
    }

    #[rstest]
    #[case("https://Accounts/Bob")]
    #[case("rally://Accounts/")]
    #[case("rally://Accounts")]
    #[case("rally://Accounts/Bob/more")]
    #[case("rally://Bills/Bob")]
    #[case("rally:/Accounts/Bob")]
    #[case("Accounts/Bob")]
    fn non_matching_uris(#[case] uri: &str) {
        assert!(accounts_link().match_uri(uri).is_none(), "{uri}");
    }

    #[rstest]
    #[case("Accounts/{name}")]
    #[case("://Accounts/{name}")]
    #[case("ra lly://Accounts/{name}")]
    #[case("rally://")]
    fn malformed_link_patterns(#[case] pattern: &str) {
        assert!(DeepLinkPattern::parse(pattern).is_err(), "{pattern}");
    }
}
