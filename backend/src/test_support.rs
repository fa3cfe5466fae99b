//! Shared test doubles for cache and directory tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use crate::domain::User;
use crate::domain::ports::{UserDataset, UserSource, UserSourceError};

/// Clock frozen at a chosen instant until advanced.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Clock starting at a fixed, arbitrary instant.
    pub fn at_epoch() -> Self {
        match Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single() {
            Some(now) => Self::new(now),
            None => panic!("fixed instant is unambiguous"),
        }
    }

    pub fn advance(&self, delta: Duration) {
        let delta = match TimeDelta::from_std(delta) {
            Ok(delta) => delta,
            Err(error) => panic!("duration out of range: {error}; delta={delta:?}"),
        };
        *self.lock_clock() += delta;
    }

    fn lock_clock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Source that counts fetches and can be switched into failure mode.
pub struct CountingUserSource {
    users: UserDataset,
    fetches: AtomicUsize,
    failure: Mutex<Option<UserSourceError>>,
}

impl CountingUserSource {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: users.into(),
            fetches: AtomicUsize::new(0),
            failure: Mutex::new(None),
        }
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn fail_with(&self, error: Option<UserSourceError>) {
        match self.failure.lock() {
            Ok(mut guard) => *guard = error,
            Err(_) => panic!("failure mutex"),
        }
    }

    fn current_failure(&self) -> Option<UserSourceError> {
        match self.failure.lock() {
            Ok(guard) => guard.clone(),
            Err(_) => panic!("failure mutex"),
        }
    }
}

#[async_trait]
impl UserSource for CountingUserSource {
    async fn fetch_all(&self) -> Result<UserDataset, UserSourceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        // Give concurrent callers a chance to queue behind this flight.
        tokio::task::yield_now().await;
        match self.current_failure() {
            Some(error) => Err(error),
            None => Ok(self.users.clone()),
        }
    }
}
