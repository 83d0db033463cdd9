use actix_web::{get, web, HttpResponse};
use serde::Serialize;
use std::sync::Arc;
use log::{debug, error, warn};
use crate::cache::ResolutionCache;
use crate::canonicalizer::{canonicalize_offline, prefixed, DynCanonicalizer};
use crate::error::ResolveError;
use crate::models::{CanonicalizeQuery, CanonicalizeResponse, HeadersQuery, HeadersResponse, HealthResponse};

/// Home page handler with documentation
#[get("/")]
pub async fn home() -> HttpResponse {
    debug!("Serving home page");
    let html = r#"<!DOCTYPE html>
<html>
<head>
    <title>urlcanon - URL Canonicalizer</title>
    <style>
        body { font-family: sans-serif; max-width: 800px; margin: 40px auto; padding: 0 20px; line-height: 1.6; }
        pre { background: #f4f4f4; padding: 15px; border-radius: 5px; }
        code { background: #f4f4f4; padding: 2px 4px; border-radius: 3px; }
    </style>
</head>
<body>
    <h1>urlcanon - URL Canonicalizer</h1>
    <p>Turns free-form input into an absolute URL.</p>

    <h2>Usage</h2>
    <h3>Canonicalize a URL:</h3>
    <pre>/canonicalize?url=example.com/</pre>
    <p>Follow a single permanent (301) redirect with <code>follow</code>:</p>
    <pre>/canonicalize?url=example.com&follow=true</pre>

    <h3>Inspect the response headers used for redirect resolution:</h3>
    <pre>/headers?url=example.com</pre>

    <h3>Health check endpoint:</h3>
    <pre>/health</pre>

    <h2>Rules</h2>
    <ul>
        <li>Empty input and the placeholders <code>http://</code>, <code>http://www</code>, <code>http://www.</code> give an empty result</li>
        <li><code>http://</code> is added when no <code>//</code> appears before the first dot</li>
        <li>Trailing slashes are removed</li>
        <li>Unreachable hosts are returned as-is; resolution never fails the request</li>
    </ul>
</body>
</html>"#;

    HttpResponse::Ok()
        .content_type("text/html")
        .body(html)
}

fn json_response<T: Serialize>(body: &T) -> HttpResponse {
    match serde_json::to_string(body) {
        Ok(json) => HttpResponse::Ok()
            .content_type("application/json")
            .body(json),
        Err(err) => {
            error!("Failed to serialize JSON response: {}", err);

            // No-op unless main initialized Sentry
            sentry::capture_message(
                &format!("Failed to serialize JSON response: {}", err),
                sentry::Level::Error
            );

            HttpResponse::InternalServerError()
                .body(format!("Failed to generate JSON response: {}", err))
        }
    }
}

/// Handler for /canonicalize - returns the canonical form of `url`
#[get("/canonicalize")]
pub async fn canonicalize_url(
    query: web::Query<CanonicalizeQuery>,
    canonicalizer: web::Data<Arc<DynCanonicalizer>>,
    cache: web::Data<Arc<ResolutionCache>>
) -> HttpResponse {
    let input = match &query.url {
        Some(u) => u.clone(),
        None => return HttpResponse::BadRequest().body("Missing url parameter"),
    };
    debug!("Canonicalize request: {:?} (follow: {})", input, query.follow);

    let url = if query.follow {
        match prefixed(&input) {
            Some(key) => match cache.get(&key).await {
                Some(hit) => {
                    debug!("Resolution cache hit: {}", key);
                    hit
                }
                None => {
                    let (resolved, settled) = canonicalizer.canonicalize_settled(&input).await;
                    if settled {
                        cache.insert(key, resolved.clone()).await;
                    }
                    resolved
                }
            },
            None => String::new(),
        }
    } else {
        canonicalize_offline(&input)
    };

    json_response(&CanonicalizeResponse {
        input,
        url,
        follow: query.follow,
    })
}

/// Handler for /headers - returns the raw response headers fetched for `url`
#[get("/headers")]
pub async fn get_headers(
    query: web::Query<HeadersQuery>,
    canonicalizer: web::Data<Arc<DynCanonicalizer>>
) -> HttpResponse {
    let input = match &query.url {
        Some(u) => u.clone(),
        None => return HttpResponse::BadRequest().body("Missing url parameter"),
    };

    match canonicalizer.headers(&input).await {
        Ok(headers) => json_response(&HeadersResponse { url: input, headers }),
        Err(ResolveError::MalformedInput(reason)) => {
            debug!("Rejecting headers request for {:?}: {}", input, reason);
            HttpResponse::BadRequest().body(format!("Invalid URL: {}", reason))
        }
        Err(err) => {
            warn!("No headers available for {:?}: {}", input, err);
            HttpResponse::BadGateway().body(format!("No headers available: {}", err))
        }
    }
}

/// Health check endpoint
#[get("/health")]
pub async fn health_check(cache: web::Data<Arc<ResolutionCache>>) -> HttpResponse {
    debug!("Health check requested");

    json_response(&HealthResponse {
        status: "ok".to_string(),
        service: "urlcanon".to_string(),
        cache_entries: cache.entry_count().await,
    })
}

#[cfg(test)]
mod tests {
    use super::json_response;
    use serde::{Serialize, Serializer};

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("refusing to serialize"))
        }
    }

    #[test]
    fn test_serialization_failure_is_a_server_error() {
        let resp = json_response(&Unserializable);
        assert_eq!(resp.status(), 500);
    }
}
