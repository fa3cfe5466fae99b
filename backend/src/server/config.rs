//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use roster::domain::PaginationDefaults;
use roster::domain::ports::UserSource;
use roster::outbound::upstream::HttpUserSourceConfig;
use roster::settings::RosterConfig;

/// Everything needed to assemble the server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) upstream: HttpUserSourceConfig,
    pub(crate) cache_ttl: Duration,
    pub(crate) cache_max_entries: usize,
    pub(crate) pagination: PaginationDefaults,
    pub(crate) user_source: Option<Arc<dyn UserSource>>,
}

impl ServerConfig {
    /// Use `source` instead of the HTTP upstream adapter.
    ///
    /// The source is still wrapped in the dataset cache.
    #[cfg_attr(
        not(any(test, doctest)),
        expect(dead_code, reason = "Used by bootstrap tests to avoid network access")
    )]
    #[must_use]
    pub fn with_user_source(mut self, source: Arc<dyn UserSource>) -> Self {
        self.user_source = Some(source);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

impl From<RosterConfig> for ServerConfig {
    fn from(config: RosterConfig) -> Self {
        let RosterConfig {
            bind_addr,
            upstream,
            cache_ttl,
            cache_max_entries,
            pagination,
        } = config;
        Self {
            bind_addr,
            upstream,
            cache_ttl,
            cache_max_entries,
            pagination,
            user_source: None,
        }
    }
}
