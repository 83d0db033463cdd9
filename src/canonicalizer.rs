use log::debug;
use crate::error::ResolveError;
use crate::headers::{fetch_headers, redirect_target, DnsResolver, HeaderFetcher, HostResolver, HttpHeaderFetcher};
use crate::url_utils::{auto_prefix_url, is_placeholder, trim_trailing_slashes};

/// Turns free-form input into an absolute URL, optionally following one 301.
///
/// Holds only its capabilities, no per-call state.
#[derive(Debug, Clone)]
pub struct Canonicalizer<R = DnsResolver, F = HttpHeaderFetcher> {
    resolver: R,
    fetcher: F,
}

impl<R, F> Canonicalizer<R, F>
where
    R: HostResolver,
    F: HeaderFetcher,
{
    pub fn new(resolver: R, fetcher: F) -> Self {
        Canonicalizer { resolver, fetcher }
    }

    /// Canonical form of `input`.
    ///
    /// Never fails: when redirect resolution is requested but cannot be
    /// completed, the prefixed and slash-trimmed input is returned instead.
    /// A result that trims down to a placeholder is empty, so `http://www/`
    /// gives `""` rather than `http://www`.
    pub async fn canonicalize(&self, input: &str, follow_redirect: bool) -> String {
        if !follow_redirect {
            return canonicalize_offline(input);
        }
        self.canonicalize_settled(input).await.0
    }

    /// Canonical form of `input` with redirect following, and whether that
    /// outcome is settled. Lookup and transport failures are not: a retry
    /// may still find the redirect.
    pub async fn canonicalize_settled(&self, input: &str) -> (String, bool) {
        let url = match prefixed(input) {
            Some(url) => url,
            None => return (String::new(), true),
        };

        match self.resolve_redirect(&url).await {
            Ok(target) => {
                debug!("Following redirect: {} -> {}", url, target);
                (finish(&target), true)
            }
            Err(err) => {
                debug!("Keeping {} unresolved: {}", url, err);
                (finish(&url), !err.is_transient())
            }
        }
    }

    /// Destination of a single permanent redirect from `url`
    pub async fn resolve_redirect(&self, url: &str) -> Result<String, ResolveError> {
        let headers = fetch_headers(url, &self.resolver, &self.fetcher).await?;
        redirect_target(&headers)
    }

    /// Raw response headers for `input` after placeholder check and prefixing
    pub async fn headers(&self, input: &str) -> Result<Vec<String>, ResolveError> {
        let url = prefixed(input)
            .ok_or_else(|| ResolveError::MalformedInput("no URL given".to_string()))?;
        fetch_headers(&url, &self.resolver, &self.fetcher).await
    }
}

/// Canonical form of `input` without any network access
pub fn canonicalize_offline(input: &str) -> String {
    match prefixed(input) {
        Some(url) => finish(&url),
        None => String::new(),
    }
}

/// Trimmed and scheme-prefixed input, or `None` for placeholders
pub fn prefixed(input: &str) -> Option<String> {
    if is_placeholder(input) {
        return None;
    }
    Some(auto_prefix_url(input.trim(), None))
}

// Trailing whitespace goes with the slashes, and a placeholder exposed by
// trimming ("http://www/") still comes out empty.
fn finish(url: &str) -> String {
    let mut url = url.trim_end().to_string();
    while url.ends_with('/') {
        url = trim_trailing_slashes(&url).trim_end().to_string();
    }
    if is_placeholder(&url) {
        String::new()
    } else {
        url
    }
}

/// Canonicalizer with boxed capabilities, as shared by the HTTP handlers
pub type DynCanonicalizer = Canonicalizer<Box<dyn HostResolver>, Box<dyn HeaderFetcher>>;

impl DynCanonicalizer {
    pub fn boxed<R, F>(resolver: R, fetcher: F) -> Self
    where
        R: HostResolver + 'static,
        F: HeaderFetcher + 'static,
    {
        let resolver: Box<dyn HostResolver> = Box::new(resolver);
        let fetcher: Box<dyn HeaderFetcher> = Box::new(fetcher);
        Canonicalizer::new(resolver, fetcher)
    }
}
