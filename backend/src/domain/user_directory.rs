//! User directory query pipeline.
//!
//! One request runs three steps against a shared dataset snapshot: fetch the
//! dataset from the (cached) source, filter it, then cut the requested page.
//! Filtering and paging are pure; the fetch is the only step that can fail.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::Paginated;
use serde_json::json;
use tracing::{debug, error};

use crate::domain::ports::{UserSource, UserSourceError, UsersQuery};
use crate::domain::user_filter::filter_users;
use crate::domain::{Error, User, UserQuery};

/// Service answering [`UserQuery`] lookups over an upstream dataset.
///
/// The source is a separate component. Wrap it in a cache decorator to
/// shield the upstream; the service itself keeps no state between calls.
pub struct UserDirectoryService<S: ?Sized> {
    source: Arc<S>,
}

impl<S: ?Sized> Clone for UserDirectoryService<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

impl<S: ?Sized> UserDirectoryService<S> {
    /// Create a service reading from `source`.
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }
}

impl<S> UserDirectoryService<S>
where
    S: UserSource + ?Sized,
{
    /// Fetch, filter and paginate.
    ///
    /// `page` and `size` in the envelope echo the query even when the page
    /// lies beyond the filtered results. Source failures propagate unchanged.
    pub async fn execute(&self, query: &UserQuery) -> Result<Paginated<User>, UserSourceError> {
        let dataset = self.source.fetch_all().await?;
        let matched = filter_users(&dataset, query);
        debug!(
            dataset = dataset.len(),
            matched = matched.len(),
            name_filter = query.has_name_filter(),
            username_filter = query.has_username_filter(),
            "filtered user dataset"
        );

        let page = Paginated::from_items(matched, query.page_request()).map(Clone::clone);
        debug!(
            page = page.page,
            size = page.size,
            returned = page.data.len(),
            total_pages = page.total_pages,
            "paginated user results"
        );
        Ok(page)
    }

    fn map_source_error(err: UserSourceError) -> Error {
        error!(error = %err, "user source unavailable");
        let reason = match &err {
            UserSourceError::Transport { .. } => "transport",
            UserSourceError::Timeout { .. } => "timeout",
            UserSourceError::Status { .. } => "status",
            UserSourceError::Decode { .. } => "decode",
        };
        Error::service_unavailable("user source unavailable").with_details(json!({
            "reason": reason,
        }))
    }
}

#[async_trait]
impl<S> UsersQuery for UserDirectoryService<S>
where
    S: UserSource + ?Sized,
{
    async fn list_users(&self, query: &UserQuery) -> Result<Paginated<User>, Error> {
        self.execute(query).await.map_err(Self::map_source_error)
    }
}
