//! Builders wiring the upstream adapter, dataset cache and directory service.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::info;

use roster::domain::UserDirectoryService;
use roster::domain::ports::UserSource;
use roster::inbound::http::state::HttpState;
use roster::outbound::cache::CachedUserSource;
use roster::outbound::upstream::HttpUserSource;

use super::ServerConfig;

fn build_upstream(config: &ServerConfig) -> std::io::Result<Arc<dyn UserSource>> {
    if let Some(source) = &config.user_source {
        return Ok(Arc::clone(source));
    }
    let source = HttpUserSource::new(config.upstream.clone()).map_err(std::io::Error::other)?;
    info!(endpoint = %source.endpoint(), "using HTTP user source");
    Ok(Arc::new(source))
}

/// Assemble handler state: upstream → dataset cache → directory service.
///
/// # Errors
///
/// Returns an error when the upstream adapter cannot be built.
pub(crate) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let upstream = build_upstream(config)?;
    let cached = CachedUserSource::new(
        upstream,
        config.cache_ttl,
        config.cache_max_entries,
        Arc::new(DefaultClock),
    );
    info!(
        ttl_seconds = config.cache_ttl.as_secs(),
        max_entries = config.cache_max_entries,
        "dataset cache configured"
    );
    let directory = UserDirectoryService::new(Arc::new(cached));
    Ok(web::Data::new(HttpState::new(
        Arc::new(directory),
        config.pagination,
    )))
}
