//! Validated page coordinates and the window arithmetic derived from them.

use std::ops::Range;

use thiserror::Error;

/// Validation errors raised by [`PageRequest::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// The page number is zero or negative.
    #[error("page must be greater than 0")]
    PageNotPositive,
    /// The page size is zero or negative.
    #[error("size must be greater than 0")]
    SizeNotPositive,
}

impl PageRequestError {
    /// Name of the request field that failed validation.
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::PageNotPositive => "page",
            Self::SizeNotPositive => "size",
        }
    }
}

/// One-based page number and page size.
///
/// ## Invariants
/// - `page >= 1` and `size >= 1`; there is no way to build a request that
///   violates either bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: u64,
    size: u64,
}

impl PageRequest {
    /// Validate raw page coordinates.
    ///
    /// The page is checked before the size, so a request where both are
    /// invalid reports [`PageRequestError::PageNotPositive`].
    ///
    /// # Errors
    /// Returns [`PageRequestError`] when `page <= 0` or `size <= 0`.
    ///
    /// # Examples
    /// ```
    /// use pagination::{PageRequest, PageRequestError};
    ///
    /// assert!(PageRequest::new(1, 10).is_ok());
    /// assert_eq!(PageRequest::new(0, 10), Err(PageRequestError::PageNotPositive));
    /// assert_eq!(PageRequest::new(1, -1), Err(PageRequestError::SizeNotPositive));
    /// ```
    pub fn new(page: i64, size: i64) -> Result<Self, PageRequestError> {
        let page_number = positive(page).ok_or(PageRequestError::PageNotPositive)?;
        let page_size = positive(size).ok_or(PageRequestError::SizeNotPositive)?;
        Ok(Self {
            page: page_number,
            size: page_size,
        })
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(self) -> u64 {
        self.page
    }

    /// Maximum number of items on one page.
    #[must_use]
    pub const fn size(self) -> u64 {
        self.size
    }

    /// Index of the first item of this page, or `None` when it does not fit
    /// in a `u64`.
    #[must_use]
    pub const fn offset(self) -> Option<u64> {
        (self.page - 1).checked_mul(self.size)
    }

    /// Locate this page inside a sequence of `total_items` items.
    ///
    /// Returns `None` when the page starts at or beyond the end of the
    /// sequence; the last page may be shorter than `size`.
    ///
    /// # Examples
    /// ```
    /// use pagination::PageRequest;
    ///
    /// let request = PageRequest::new(10, 10).expect("valid request");
    /// assert_eq!(request.window(100), Some(90..100));
    /// assert_eq!(request.window(90), None);
    /// ```
    #[must_use]
    pub fn window(self, total_items: usize) -> Option<Range<usize>> {
        let start = usize::try_from(self.offset()?).ok()?;
        if start >= total_items {
            return None;
        }
        let size = usize::try_from(self.size).unwrap_or(usize::MAX);
        Some(start..start.saturating_add(size).min(total_items))
    }
}

fn positive(value: i64) -> Option<u64> {
    u64::try_from(value).ok().filter(|candidate| *candidate > 0)
}

/// Number of pages needed to show `total_items` items, `size` at a time.
///
/// Zero items need zero pages. A zero `size` cannot come from a
/// [`PageRequest`] and also yields zero.
#[must_use]
pub const fn total_pages(total_items: u64, size: u64) -> u64 {
    if size == 0 {
        return 0;
    }
    total_items.div_ceil(size)
}
