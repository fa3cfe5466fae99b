//! Driven port for fetching the full user dataset from upstream.

use std::sync::Arc;

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::User;

/// Immutable snapshot of every upstream user, in upstream order.
///
/// Cloning is cheap; concurrent requests share one allocation.
pub type UserDataset = Arc<[User]>;

define_port_error! {
    /// Errors surfaced while fetching the upstream dataset.
    pub enum UserSourceError {
        /// The request failed before a response arrived.
        Transport { message: String } =>
            "user source transport failed: {message}",
        /// The upstream did not answer within the configured timeout.
        Timeout { message: String } =>
            "user source timed out: {message}",
        /// The upstream answered with a non-success status.
        Status { status: u16, message: String } =>
            "user source returned status {status}: {message}",
        /// The response body was not a usable user listing.
        Decode { message: String } =>
            "user source response decode failed: {message}",
    }
}

/// Port for retrieving the complete user dataset.
///
/// Implementations return every user in upstream order. An empty dataset is
/// a success; an absent body is a [`UserSourceError::Decode`] failure.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserSource: Send + Sync {
    /// Fetch the whole dataset.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use roster::domain::ports::{FixtureUserSource, UserSource};
    ///
    /// let users = FixtureUserSource::default().fetch_all().await?;
    /// assert!(users.is_empty());
    /// # Ok::<(), roster::domain::ports::UserSourceError>(())
    /// ```
    async fn fetch_all(&self) -> Result<UserDataset, UserSourceError>;
}

/// In-memory source serving a fixed dataset.
#[derive(Debug, Clone)]
pub struct FixtureUserSource {
    users: UserDataset,
}

impl FixtureUserSource {
    /// Serve `users` on every fetch.
    pub fn new(users: impl Into<UserDataset>) -> Self {
        Self {
            users: users.into(),
        }
    }
}

impl Default for FixtureUserSource {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl UserSource for FixtureUserSource {
    async fn fetch_all(&self) -> Result<UserDataset, UserSourceError> {
        Ok(Arc::clone(&self.users))
    }
}
