use serde::{Deserialize, Serialize};

/// Query string of `/canonicalize`
#[derive(Deserialize, Debug, Clone)]
pub struct CanonicalizeQuery {
    pub url: Option<String>,
    #[serde(default)]
    pub follow: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CanonicalizeResponse {
    pub input: String,
    pub url: String,
    pub follow: bool,
}

/// Query string of `/headers`
#[derive(Deserialize, Debug, Clone)]
pub struct HeadersQuery {
    pub url: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HeadersResponse {
    pub url: String,
    pub headers: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub cache_entries: u64,
}
