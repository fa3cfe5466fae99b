//! Cached decorator for the user source port.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};

use super::{CacheStats, TtlCache};
use crate::domain::ports::{UserDataset, UserSource, UserSourceError};

/// The whole dataset lives under one key.
const DATASET_KEY: &str = "users";

/// [`UserSource`] that serves the upstream dataset from a TTL cache.
///
/// The cache is its own component with its own locks, so every call from the
/// directory pipeline goes through the freshness check.
pub struct CachedUserSource<S: ?Sized> {
    inner: Arc<S>,
    cache: TtlCache<&'static str, UserDataset, UserSourceError>,
}

impl<S: ?Sized> CachedUserSource<S> {
    /// Wrap `inner`, keeping fetched datasets for `ttl`.
    pub fn new(inner: Arc<S>, ttl: Duration, max_entries: usize, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner,
            cache: TtlCache::new(ttl, max_entries, clock),
        }
    }

    /// Cache counters since startup.
    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

#[async_trait]
impl<S> UserSource for CachedUserSource<S>
where
    S: UserSource + ?Sized,
{
    async fn fetch_all(&self) -> Result<UserDataset, UserSourceError> {
        let refreshed = AtomicBool::new(false);
        let outcome = self
            .cache
            .get_or_load(DATASET_KEY, || async {
                refreshed.store(true, Ordering::Relaxed);
                info!("user dataset cache miss; fetching from upstream");
                self.inner.fetch_all().await
            })
            .await;
        if refreshed.load(Ordering::Relaxed) {
            self.report_refresh(&outcome);
        }
        outcome
    }
}

impl<S: ?Sized> CachedUserSource<S> {
    fn report_refresh(&self, outcome: &Result<UserDataset, UserSourceError>) {
        let CacheStats {
            hits,
            misses,
            load_failures,
            evictions,
        } = self.stats();
        match outcome {
            Ok(dataset) => info!(
                users = dataset.len(),
                hits,
                misses,
                load_failures,
                evictions,
                "user dataset cached"
            ),
            Err(error) => warn!(
                %error,
                hits,
                misses,
                load_failures,
                evictions,
                "user dataset refresh failed"
            ),
        }
    }
}
