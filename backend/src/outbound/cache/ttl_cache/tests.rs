//! Tests for the TTL cache.

use std::sync::atomic::AtomicUsize;

use futures::future::join_all;
use rstest::{fixture, rstest};

use super::*;
use crate::test_support::MutableClock;

const TTL: Duration = Duration::from_secs(600);

struct Harness {
    clock: Arc<MutableClock>,
    cache: TtlCache<&'static str, u32, String>,
    loads: AtomicUsize,
}

impl Harness {
    fn with_capacity(capacity: usize) -> Self {
        let clock = Arc::new(MutableClock::at_epoch());
        let cache = TtlCache::new(TTL, capacity, clock.clone());
        Self {
            clock,
            cache,
            loads: AtomicUsize::new(0),
        }
    }

    async fn load(&self, key: &'static str, value: u32) -> Result<u32, String> {
        self.cache
            .get_or_load(key, || async {
                self.loads.fetch_add(1, Ordering::SeqCst);
                tokio::task::yield_now().await;
                Ok(value)
            })
            .await
    }

    async fn fail(&self, key: &'static str) -> Result<u32, String> {
        self.cache
            .get_or_load(key, || async {
                self.loads.fetch_add(1, Ordering::SeqCst);
                tokio::task::yield_now().await;
                Err("upstream down".to_owned())
            })
            .await
    }

    fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[fixture]
fn harness() -> Harness {
    Harness::with_capacity(4)
}

#[rstest]
#[tokio::test]
async fn fresh_entries_skip_the_loader(harness: Harness) {
    assert_eq!(harness.load("users", 1).await, Ok(1));
    assert_eq!(harness.load("users", 2).await, Ok(1));

    assert_eq!(harness.loads(), 1);
    assert_eq!(
        harness.cache.stats(),
        CacheStats {
            hits: 1,
            misses: 1,
            load_failures: 0,
            evictions: 0,
        }
    );
}

#[rstest]
#[tokio::test]
async fn entries_stay_fresh_up_to_the_ttl(harness: Harness) {
    harness.load("users", 1).await.expect("initial load");

    harness.clock.advance(TTL);
    assert_eq!(harness.load("users", 2).await, Ok(1));

    harness.clock.advance(Duration::from_secs(1));
    assert_eq!(harness.load("users", 2).await, Ok(2));
    assert_eq!(harness.loads(), 2);
}

#[rstest]
#[tokio::test]
async fn failures_are_not_stored(harness: Harness) {
    assert_eq!(harness.fail("users").await, Err("upstream down".to_owned()));
    assert!(harness.cache.is_empty());

    assert_eq!(harness.load("users", 3).await, Ok(3));
    assert_eq!(harness.loads(), 2);
    assert_eq!(harness.cache.stats().load_failures, 1);
}

#[rstest]
#[tokio::test]
async fn failed_refresh_keeps_the_stale_entry(harness: Harness) {
    harness.load("users", 1).await.expect("initial load");
    harness.clock.advance(TTL + Duration::from_secs(1));

    assert!(harness.fail("users").await.is_err());
    assert_eq!(harness.cache.len(), 1);
    assert!(!harness.cache.is_fresh(&"users"));

    assert_eq!(harness.load("users", 2).await, Ok(2));
    assert!(harness.cache.is_fresh(&"users"));
}

#[rstest]
#[tokio::test]
async fn concurrent_misses_share_one_load(harness: Harness) {
    let results = join_all((0..16).map(|n| harness.load("users", n))).await;

    assert_eq!(harness.loads(), 1);
    assert!(results.iter().all(|result| *result == Ok(0)));
    assert_eq!(harness.cache.stats().hits, 15);
}

#[rstest]
#[tokio::test]
async fn concurrent_callers_share_one_failure(harness: Harness) {
    let results = join_all((0..8).map(|_| harness.fail("users"))).await;

    assert_eq!(harness.loads(), 1);
    assert!(results.iter().all(Result::is_err));
    assert_eq!(harness.cache.stats().load_failures, 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn expired_entry_is_refreshed_once_across_worker_threads() {
    let clock = Arc::new(MutableClock::at_epoch());
    let cache: Arc<TtlCache<&'static str, u32, String>> =
        Arc::new(TtlCache::new(TTL, 4, clock.clone()));
    let loads = Arc::new(AtomicUsize::new(0));
    cache
        .get_or_load("users", || async { Ok(0) })
        .await
        .expect("warm cache");
    clock.advance(TTL + Duration::from_secs(1));

    let callers: Vec<_> = (1..=64)
        .map(|n| {
            let cache = Arc::clone(&cache);
            let loads = Arc::clone(&loads);
            tokio::spawn(async move {
                cache
                    .get_or_load("users", || async move {
                        loads.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(50)).await;
                        Ok(n)
                    })
                    .await
            })
        })
        .collect();
    let results: Vec<u32> = join_all(callers)
        .await
        .into_iter()
        .map(|joined| joined.expect("caller task").expect("refreshed value"))
        .collect();

    assert_eq!(loads.load(Ordering::SeqCst), 1);
    let first = results.first().copied().expect("64 results");
    assert_ne!(first, 0, "stale value must not be served");
    assert!(results.iter().all(|value| *value == first));
    assert_eq!(cache.stats().misses, 2);
}

#[rstest]
#[tokio::test]
async fn failed_keys_leave_no_gate_behind(harness: Harness) {
    for key in ["a", "b", "c"] {
        assert!(harness.fail(key).await.is_err());
    }
    assert_eq!(harness.cache.gate_count(), 0);

    let results = join_all((0..8).map(|_| harness.fail("d"))).await;
    assert!(results.iter().all(Result::is_err));
    assert_eq!(harness.cache.gate_count(), 0);
}

#[rstest]
#[tokio::test]
async fn caller_after_a_failure_retries(harness: Harness) {
    assert!(harness.fail("users").await.is_err());
    assert!(harness.fail("users").await.is_err());
    assert_eq!(harness.loads(), 2);
}

#[rstest]
#[tokio::test]
async fn distinct_keys_load_independently(harness: Harness) {
    let (a, b) = tokio::join!(harness.load("a", 1), harness.load("b", 2));
    assert_eq!((a, b), (Ok(1), Ok(2)));
    assert_eq!(harness.loads(), 2);
}

#[rstest]
#[tokio::test]
async fn oldest_entry_is_evicted_at_capacity() {
    let harness = Harness::with_capacity(2);
    harness.load("a", 1).await.expect("load a");
    harness.clock.advance(Duration::from_secs(1));
    harness.load("b", 2).await.expect("load b");
    harness.clock.advance(Duration::from_secs(1));
    harness.load("c", 3).await.expect("load c");

    assert_eq!(harness.cache.len(), 2);
    assert!(!harness.cache.is_fresh(&"a"));
    assert!(harness.cache.is_fresh(&"b"));
    assert!(harness.cache.is_fresh(&"c"));
    assert_eq!(harness.cache.stats().evictions, 1);
}

#[rstest]
#[tokio::test]
async fn replacing_an_existing_key_does_not_evict() {
    let harness = Harness::with_capacity(1);
    harness.load("a", 1).await.expect("load a");
    harness.clock.advance(TTL * 2);
    assert_eq!(harness.load("a", 2).await, Ok(2));

    assert_eq!(harness.cache.len(), 1);
    assert_eq!(harness.cache.stats().evictions, 0);
}
