use async_trait::async_trait;
use log::{debug, trace};
use regex::Regex;
use std::net::IpAddr;
use std::sync::LazyLock;
use std::time::Duration;
use tokio::net::lookup_host;
use url::{Host, Url};
use crate::error::ResolveError;
use crate::url_utils::decode_location;

/// Status line of a permanent redirect, checked against the start of the joined header block
static MOVED_PERMANENTLY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^HTTP/\S+\s+301(\s|$)").expect("status line pattern is valid")
});

const LOCATION_PREFIX: &str = "Location:";

/// Resolves a host name to an address
#[async_trait]
pub trait HostResolver: Send + Sync {
    async fn resolve(&self, host: &str) -> Result<IpAddr, ResolveError>;
}

/// Fetches the raw response header lines for a URL, status line first
#[async_trait]
pub trait HeaderFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<String>, ResolveError>;
}

/// System resolver via `tokio::net::lookup_host`
#[derive(Debug, Clone)]
pub struct DnsResolver {
    timeout: Duration,
}

impl DnsResolver {
    pub fn new(timeout: Duration) -> Self {
        DnsResolver { timeout }
    }
}

#[async_trait]
impl HostResolver for DnsResolver {
    async fn resolve(&self, host: &str) -> Result<IpAddr, ResolveError> {
        let failure = |reason: String| ResolveError::ResolutionFailure {
            host: host.to_string(),
            reason,
        };

        let mut addrs = tokio::time::timeout(self.timeout, lookup_host((host, 0)))
            .await
            .map_err(|_| failure("lookup timed out".to_string()))?
            .map_err(|err| failure(err.to_string()))?;

        addrs
            .next()
            .map(|addr| addr.ip())
            .ok_or_else(|| failure("no addresses returned".to_string()))
    }
}

/// Builds the client used for header fetches. Redirects are never followed
/// so the 301 itself is what comes back.
pub fn build_client(user_agent: Option<&str>) -> reqwest::Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().redirect(reqwest::redirect::Policy::none());
    if let Some(user_agent) = user_agent {
        builder = builder.user_agent(user_agent);
    }
    builder.build()
}

/// Issues HEAD requests with a per-request timeout
#[derive(Debug, Clone)]
pub struct HttpHeaderFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpHeaderFetcher {
    pub fn new(client: reqwest::Client, timeout: Duration) -> Self {
        HttpHeaderFetcher { client, timeout }
    }
}

#[async_trait]
impl HeaderFetcher for HttpHeaderFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<String>, ResolveError> {
        debug!("Fetching headers: {}", url);

        let response = self.client.head(url).timeout(self.timeout).send().await?;

        let mut lines = Vec::with_capacity(response.headers().len() + 1);
        lines.push(format!("{:?} {}", response.version(), response.status()));
        for (name, value) in response.headers() {
            lines.push(format!(
                "{}: {}",
                title_case_header(name.as_str()),
                String::from_utf8_lossy(value.as_bytes())
            ));
        }

        trace!("Received {} header lines from {}", lines.len(), url);
        Ok(lines)
    }
}

/// `content-type` -> `Content-Type`
fn title_case_header(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

/// Where a HEAD request for a URL should go, and whether its host needs resolving
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadTarget {
    pub host: String,
    pub literal_host: bool,
    pub url: String,
}

impl HeadTarget {
    pub fn parse(url: &str) -> Result<Self, ResolveError> {
        let parsed = Url::parse(url.trim())?;

        let literal_host = match parsed.host() {
            Some(Host::Domain(_)) => false,
            Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => true,
            None => return Err(ResolveError::MalformedInput(format!("no host in '{}'", url))),
        };
        let host = parsed.host_str().unwrap_or_default().to_string();

        let port = match parsed.port() {
            Some(port) => format!(":{}", port),
            None => String::new(),
        };
        let mut path = match parsed.path() {
            "" => "/".to_string(),
            path => path.to_string(),
        };
        if let Some(query) = parsed.query() {
            path.push('?');
            path.push_str(query);
        }

        Ok(HeadTarget {
            url: format!("{}://{}{}{}", parsed.scheme(), host, port, path),
            host,
            literal_host,
        })
    }
}

/// Fetches the response headers for `url`.
///
/// Hosts that are already IP literals are not fetched at all; domain
/// hosts must resolve before the request is made.
pub async fn fetch_headers<R, F>(url: &str, resolver: &R, fetcher: &F) -> Result<Vec<String>, ResolveError>
where
    R: HostResolver + ?Sized,
    F: HeaderFetcher + ?Sized,
{
    let target = HeadTarget::parse(url)?;

    if target.literal_host {
        return Err(ResolveError::ResolutionFailure {
            host: target.host,
            reason: "already a literal address".to_string(),
        });
    }

    let addr = resolver.resolve(&target.host).await?;
    debug!("Resolved {} to {}", target.host, addr);

    fetcher.fetch(&target.url).await
}

/// True when the first header line is an HTTP 301 status line
pub fn is_moved_permanently(headers: &[String]) -> bool {
    MOVED_PERMANENTLY.is_match(&headers.join("\n"))
}

/// Decoded value of the last `Location` header, if any
pub fn find_location(headers: &[String]) -> Option<String> {
    headers
        .iter()
        .filter(|line| {
            line.get(..LOCATION_PREFIX.len())
                .is_some_and(|name| name.eq_ignore_ascii_case(LOCATION_PREFIX))
        })
        .map(|line| decode_location(&line[LOCATION_PREFIX.len()..]))
        .filter(|location| !location.is_empty())
        .last()
}

/// Destination of a permanent redirect. Any other status, or a 301
/// without a usable Location, yields `NoRedirectFound`.
pub fn redirect_target(headers: &[String]) -> Result<String, ResolveError> {
    if !is_moved_permanently(headers) {
        return Err(ResolveError::NoRedirectFound);
    }
    find_location(headers).ok_or(ResolveError::NoRedirectFound)
}

#[async_trait]
impl<T: HostResolver + ?Sized> HostResolver for Box<T> {
    async fn resolve(&self, host: &str) -> Result<IpAddr, ResolveError> {
        (**self).resolve(host).await
    }
}

#[async_trait]
impl<T: HeaderFetcher + ?Sized> HeaderFetcher for Box<T> {
    async fn fetch(&self, url: &str) -> Result<Vec<String>, ResolveError> {
        (**self).fetch(url).await
    }
}
