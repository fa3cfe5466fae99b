//! Capacity-bounded TTL memo table with single-flight loading.
//!
//! Readers of a fresh entry only take a shared read lock. On a miss, callers
//! for the same key queue on a per-key async gate so exactly one loader runs;
//! callers that waited on a failed flight receive that flight's error instead
//! of starting their own.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;

/// Counters describing cache effectiveness since construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from a fresh entry.
    pub hits: u64,
    /// Lookups that ran the loader.
    pub misses: u64,
    /// Loader runs that returned an error.
    pub load_failures: u64,
    /// Entries dropped to stay within capacity.
    pub evictions: u64,
}

#[derive(Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    load_failures: AtomicU64,
    evictions: AtomicU64,
}

impl Counters {
    fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            load_failures: self.load_failures.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }
}

struct Entry<V> {
    value: V,
    fetched_at: DateTime<Utc>,
}

/// Per-key load gate.
///
/// `flights` counts completed loads. A caller samples it before queueing; if
/// it moved by the time the caller holds the gate, another flight finished
/// meanwhile and its failure (if any) is the caller's answer too.
struct Gate<E> {
    flights: AtomicU64,
    last_failure: tokio::sync::Mutex<Option<E>>,
}

impl<E> Default for Gate<E> {
    fn default() -> Self {
        Self {
            flights: AtomicU64::new(0),
            last_failure: tokio::sync::Mutex::new(None),
        }
    }
}

/// Time-bounded cache of loader results keyed by `K`.
///
/// ## Invariants
/// - A failed load stores nothing and leaves any previous entry, fresh or
///   stale, untouched.
/// - An entry is fresh while `now - fetched_at <= ttl`. Stale entries stay in
///   place until a successful load replaces them.
/// - Storing a new key when `capacity` entries exist evicts the entry with
///   the oldest `fetched_at`.
/// - A key's gate is dropped once nobody waits on it after a failed flight or
///   an eviction, so keys that never load successfully leave nothing behind.
pub struct TtlCache<K, V, E> {
    ttl: TimeDelta,
    capacity: usize,
    clock: Arc<dyn Clock>,
    entries: RwLock<HashMap<K, Entry<V>>>,
    gates: Mutex<HashMap<K, Arc<Gate<E>>>>,
    counters: Counters,
}

impl<K, V, E> TtlCache<K, V, E>
where
    K: Eq + Hash + Clone,
    V: Clone,
    E: Clone,
{
    /// Create an empty cache. A zero `capacity` is treated as one.
    pub fn new(ttl: Duration, capacity: usize, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
            capacity: capacity.max(1),
            clock,
            entries: RwLock::new(HashMap::new()),
            gates: Mutex::new(HashMap::new()),
            counters: Counters::default(),
        }
    }

    /// Return the fresh value for `key`, running `loader` at most once across
    /// concurrent callers when it is missing or stale.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use std::time::Duration;
    ///
    /// use mockable::DefaultClock;
    /// use roster::outbound::cache::TtlCache;
    ///
    /// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
    /// let cache: TtlCache<&str, u32, String> =
    ///     TtlCache::new(Duration::from_secs(60), 8, Arc::new(DefaultClock));
    /// let first = cache.get_or_load("answer", || async { Ok(42) }).await;
    /// let second = cache.get_or_load("answer", || async { Ok(7) }).await;
    /// assert_eq!((first, second), (Ok(42), Ok(42)));
    /// # });
    /// ```
    pub async fn get_or_load<F, Fut>(&self, key: K, loader: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.fresh(&key) {
            Counters::bump(&self.counters.hits);
            return Ok(value);
        }

        let gate = self.gate(&key);
        let flights_seen = gate.flights.load(Ordering::Acquire);
        let mut last_failure = gate.last_failure.lock().await;

        if let Some(value) = self.fresh(&key) {
            Counters::bump(&self.counters.hits);
            return Ok(value);
        }
        if gate.flights.load(Ordering::Acquire) != flights_seen {
            if let Some(err) = last_failure.as_ref().cloned() {
                drop(last_failure);
                self.release_gate(&key, gate);
                return Err(err);
            }
        }

        Counters::bump(&self.counters.misses);
        let outcome = loader().await;
        match &outcome {
            Ok(value) => {
                *last_failure = None;
                self.store(key, value.clone());
                gate.flights.fetch_add(1, Ordering::Release);
            }
            Err(err) => {
                Counters::bump(&self.counters.load_failures);
                *last_failure = Some(err.clone());
                gate.flights.fetch_add(1, Ordering::Release);
                drop(last_failure);
                self.release_gate(&key, gate);
            }
        }
        outcome
    }

    /// Counters accumulated so far.
    pub fn stats(&self) -> CacheStats {
        self.counters.snapshot()
    }

    /// Number of stored entries, stale ones included.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `key` holds a fresh entry right now.
    pub fn is_fresh(&self, key: &K) -> bool {
        self.fresh(key).is_some()
    }

    #[cfg(test)]
    fn gate_count(&self) -> usize {
        self.gates.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn fresh(&self, key: &K) -> Option<V> {
        let now = self.clock.utc();
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(key)
            .filter(|entry| now.signed_duration_since(entry.fetched_at) <= self.ttl)
            .map(|entry| entry.value.clone())
    }

    fn gate(&self, key: &K) -> Arc<Gate<E>> {
        let mut gates = self.gates.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(gates.entry(key.clone()).or_default())
    }

    fn store(&self, key: K, value: V) {
        let fetched_at = self.clock.utc();
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if !entries.contains_key(&key) && entries.len() >= self.capacity {
            let victim = entries
                .iter()
                .min_by_key(|(_, entry)| entry.fetched_at)
                .map(|(victim, _)| victim.clone());
            if let Some(victim) = victim {
                entries.remove(&victim);
                self.forget_gate(&victim);
                Counters::bump(&self.counters.evictions);
            }
        }
        entries.insert(key, Entry { value, fetched_at });
    }

    fn release_gate(&self, key: &K, gate: Arc<Gate<E>>) {
        drop(gate);
        self.forget_gate(key);
    }

    fn forget_gate(&self, key: &K) {
        let mut gates = self.gates.lock().unwrap_or_else(PoisonError::into_inner);
        if gates
            .get(key)
            .is_some_and(|gate| Arc::strong_count(gate) == 1)
        {
            gates.remove(key);
        }
    }
}

#[cfg(test)]
mod tests;
