//! Validated directory query.
//!
//! A [`UserQuery`] can only exist with a positive page and size. Validation
//! happens once here; nothing downstream re-checks the bounds.

use pagination::{PageRequest, PageRequestError};

/// Fallback values applied when a caller omits `page` or `size`.
///
/// `max_size` is advisory. Requests above it are served as asked; the HTTP
/// layer logs a warning so operators can spot heavy callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationDefaults {
    /// Page used when the caller omits one.
    pub default_page: i64,
    /// Page size used when the caller omits one.
    pub default_size: i64,
    /// Largest page size the service expects to serve.
    pub max_size: i64,
}

impl Default for PaginationDefaults {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_size: 10,
            max_size: 100,
        }
    }
}

/// Filters plus page coordinates for one directory lookup.
///
/// # Examples
/// ```
/// use roster::domain::{PaginationDefaults, UserQuery};
///
/// let query = UserQuery::from_optional(
///     Some("  Ada ".into()),
///     None,
///     None,
///     Some(25),
///     &PaginationDefaults::default(),
/// )
/// .expect("valid query");
/// assert_eq!(query.name_term().as_deref(), Some("ada"));
/// assert_eq!((query.page(), query.size()), (1, 25));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserQuery {
    name: Option<String>,
    username: Option<String>,
    page: PageRequest,
}

impl UserQuery {
    /// Build a query with explicit page coordinates.
    pub fn new(
        name: Option<String>,
        username: Option<String>,
        page: i64,
        size: i64,
    ) -> Result<Self, PageRequestError> {
        Ok(Self {
            name,
            username,
            page: PageRequest::new(page, size)?,
        })
    }

    /// Build a query from raw request parameters, applying defaults first.
    pub fn from_optional(
        name: Option<String>,
        username: Option<String>,
        page: Option<i64>,
        size: Option<i64>,
        defaults: &PaginationDefaults,
    ) -> Result<Self, PageRequestError> {
        Self::new(
            name,
            username,
            page.unwrap_or(defaults.default_page),
            size.unwrap_or(defaults.default_size),
        )
    }

    /// Requested page, 1-based.
    pub fn page(&self) -> u64 {
        self.page.page()
    }

    /// Requested page size.
    pub fn size(&self) -> u64 {
        self.page.size()
    }

    /// Page coordinates as a reusable value.
    pub fn page_request(&self) -> PageRequest {
        self.page
    }

    /// Whether the name filter is active.
    pub fn has_name_filter(&self) -> bool {
        active(self.name.as_deref()).is_some()
    }

    /// Whether the username filter is active.
    pub fn has_username_filter(&self) -> bool {
        active(self.username.as_deref()).is_some()
    }

    /// Trimmed, lowercased name search text when the filter is active.
    pub fn name_term(&self) -> Option<String> {
        active(self.name.as_deref()).map(str::to_lowercase)
    }

    /// Trimmed, lowercased username search text when the filter is active.
    pub fn username_term(&self) -> Option<String> {
        active(self.username.as_deref()).map(str::to_lowercase)
    }

    /// Whether the requested size is above the configured advisory maximum.
    pub fn exceeds(&self, defaults: &PaginationDefaults) -> bool {
        u64::try_from(defaults.max_size).is_ok_and(|max| self.size() > max)
    }
}

fn active(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|text| !text.is_empty())
}
