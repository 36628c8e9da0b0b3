use thiserror::Error;

/// Errors surfaced synchronously by navigation calls and graph construction.
///
/// Soft outcomes are not errors: an unrecognised route resolves to the
/// default screen, a deep link that matches nothing yields `None`, and a
/// missing account is whatever the data source returns.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum NavError {
    /// A parameterized navigation call received an empty or ill-typed value.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument { name: String, reason: String },
    /// No destination in the graph matches the requested route.
    #[error("no destination matches route `{0}`")]
    UnknownRoute(String),
    /// A route or deep-link pattern could not be parsed.
    #[error("invalid route pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },
    /// The navigation graph is inconsistent.
    #[error("invalid navigation graph: {0}")]
    InvalidGraph(String),
}

impl NavError {
    pub(crate) fn invalid_argument(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.to_owned(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_pattern(pattern: &str, reason: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.to_owned(),
            reason: reason.into(),
        }
    }
}
