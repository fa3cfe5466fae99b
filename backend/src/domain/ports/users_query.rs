//! Driving port for user directory queries.
//!
//! HTTP handlers depend on this port rather than on the pipeline directly so
//! tests can substitute canned responses.

use async_trait::async_trait;
use pagination::Paginated;

use crate::domain::{Error, User, UserQuery};

/// Domain use-case port for listing users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Return one filtered page of users.
    async fn list_users(&self, query: &UserQuery) -> Result<Paginated<User>, Error>;
}
