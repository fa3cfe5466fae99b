//! DTOs for decoding the upstream user listing.
//!
//! The upstream wraps users in `{ "users": [...], "total", "skip", "limit" }`.
//! Only `users` is required; the counters are informational.

use serde::Deserialize;

use crate::domain::User;
use crate::domain::ports::UserDataset;

#[derive(Debug, Deserialize)]
pub(super) struct UserListingDto {
    #[serde(default)]
    pub(super) users: Option<Vec<User>>,
    #[serde(default)]
    pub(super) total: Option<u64>,
    #[serde(default)]
    pub(super) skip: Option<u64>,
    #[serde(default)]
    pub(super) limit: Option<u64>,
}

impl UserListingDto {
    /// Whether the upstream reports more users than it returned.
    pub(super) fn is_truncated(&self) -> bool {
        let returned = self.users.as_ref().map_or(0, Vec::len);
        self.total
            .is_some_and(|total| u64::try_from(returned).is_ok_and(|returned| total > returned))
    }

    pub(super) fn into_dataset(self) -> Result<UserDataset, String> {
        self.users
            .map(UserDataset::from)
            .ok_or_else(|| "response has no users array".to_owned())
    }
}
