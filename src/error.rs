use thiserror::Error;

/// Reasons a redirect could not be resolved.
///
/// None of these reach callers of `Canonicalizer::canonicalize`; they are
/// logged and the URL built so far is kept.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The URL could not be parsed, or has no host to ask
    #[error("malformed URL: {0}")]
    MalformedInput(String),

    /// Host resolution failed or the host is already a literal address
    #[error("could not resolve host '{host}': {reason}")]
    ResolutionFailure { host: String, reason: String },

    /// The HEAD request itself failed
    #[error("transport error: {0}")]
    TransportFailure(String),

    /// Headers were fetched but carried no 301 with a Location
    #[error("no permanent redirect found")]
    NoRedirectFound,
}

impl From<url::ParseError> for ResolveError {
    fn from(err: url::ParseError) -> Self {
        ResolveError::MalformedInput(err.to_string())
    }
}

impl From<reqwest::Error> for ResolveError {
    fn from(err: reqwest::Error) -> Self {
        ResolveError::TransportFailure(err.to_string())
    }
}

impl ResolveError {
    /// Failures that may not repeat on a later attempt
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ResolveError::ResolutionFailure { .. } | ResolveError::TransportFailure(_)
        )
    }
}
