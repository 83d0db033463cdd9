use actix_web::{web::Data, App, HttpServer};
use log::{info, warn};
use std::io;
use std::sync::Arc;
use urlcanon::cache::ResolutionCache;
use urlcanon::canonicalizer::DynCanonicalizer;
use urlcanon::config::ServiceConfig;
use urlcanon::handlers::{canonicalize_url, get_headers, health_check, home};
use urlcanon::headers::{build_client, DnsResolver, HttpHeaderFetcher};

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServiceConfig::from_env();

    // Initialize Sentry if DSN is provided
    let sentry_guard = match &config.sentry_dsn {
        Some(dsn) => {
            info!("Initializing Sentry with release: {}", env!("CARGO_PKG_VERSION"));
            Some(sentry::init((
                dsn.as_str(),
                sentry::ClientOptions {
                    release: Some(env!("CARGO_PKG_VERSION").into()),
                    environment: Some(config.sentry_environment.clone().into()),
                    ..Default::default()
                },
            )))
        }
        None => {
            warn!("Sentry DSN not found, error monitoring disabled");
            None
        }
    };
    let sentry_enabled = sentry_guard.is_some();

    let client = build_client(config.user_agent.as_deref())
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;

    let canonicalizer = Arc::new(DynCanonicalizer::boxed(
        DnsResolver::new(config.fetch_timeout),
        HttpHeaderFetcher::new(client, config.fetch_timeout),
    ));

    let cache = Arc::new(ResolutionCache::new(config.cache_max_capacity, config.cache_ttl));
    info!(
        "Initialized resolution cache: {} entries, {}s TTL",
        config.cache_max_capacity,
        config.cache_ttl.as_secs()
    );

    info!("urlcanon server running at http://{}", config.bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(Data::new(canonicalizer.clone()))
            .app_data(Data::new(cache.clone()))
            .wrap(actix_web::middleware::Condition::new(sentry_enabled, sentry_actix::Sentry::new()))
            .service(home)
            .service(canonicalize_url)
            .service(get_headers)
            .service(health_check)
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}
