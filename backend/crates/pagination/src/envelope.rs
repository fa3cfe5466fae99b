//! Pagination envelope returned by list endpoints.

use serde::{Deserialize, Serialize};

use crate::request::{PageRequest, total_pages};

/// One page of results plus the metadata needed to request the others.
///
/// Serialised in camelCase:
/// `{"page":1,"size":10,"totalItems":23,"totalPages":3,"data":[...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    /// Requested page number, echoed verbatim.
    pub page: u64,
    /// Requested page size, echoed verbatim.
    pub size: u64,
    /// Number of items across all pages.
    pub total_items: u64,
    /// Number of pages of `size` items needed to show every item.
    pub total_pages: u64,
    /// Items on the requested page, in sequence order.
    pub data: Vec<T>,
}

impl<T> Paginated<T> {
    /// Cut the requested page out of `items`.
    ///
    /// `items` is the complete, already filtered sequence; its length becomes
    /// `total_items`. Pages past the end yield empty `data`.
    ///
    /// # Examples
    /// ```
    /// use pagination::{PageRequest, Paginated};
    ///
    /// let request = PageRequest::new(5, 2).expect("valid request");
    /// let page = Paginated::from_items(vec!["a", "b", "c"], request);
    /// assert!(page.data.is_empty());
    /// assert_eq!((page.page, page.size), (5, 2));
    /// assert_eq!((page.total_items, page.total_pages), (3, 2));
    /// ```
    #[must_use]
    pub fn from_items(items: Vec<T>, request: PageRequest) -> Self {
        let item_count = items.len();
        let data = match request.window(item_count) {
            Some(window) => items
                .into_iter()
                .skip(window.start)
                .take(window.len())
                .collect(),
            None => Vec::new(),
        };
        let total_items = u64::try_from(item_count).unwrap_or(u64::MAX);
        Self {
            page: request.page(),
            size: request.size(),
            total_items,
            total_pages: total_pages(total_items, request.size()),
            data,
        }
    }

    /// Transform every item on the page, keeping the metadata.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Paginated<U>
    where
        F: FnMut(T) -> U,
    {
        Paginated {
            page: self.page,
            size: self.size,
            total_items: self.total_items,
            total_pages: self.total_pages,
            data: self.data.into_iter().map(f).collect(),
        }
    }
}
