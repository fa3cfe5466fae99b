//! User record served by the directory.
//!
//! The directory only interprets the identity and the three text attributes
//! it filters on. Every other upstream attribute (age, email, address and so
//! on) is carried through untouched so responses mirror the upstream record.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One upstream user profile.
///
/// ## Invariants
/// - Values are immutable once built; the dataset holding them is shared
///   read-only between concurrent requests.
/// - Missing text attributes read as the empty string.
///
/// # Examples
/// ```
/// use roster::domain::User;
///
/// let user = User::new(7).with_first_name("Ada").with_username("ada");
/// assert_eq!(user.first_name(), "Ada");
/// assert_eq!(user.last_name(), "");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    #[serde(flatten)]
    attributes: Map<String, Value>,
}

impl User {
    /// Start a user with the given identifier and no attributes.
    pub fn new(id: i64) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    /// Set the first name.
    #[must_use]
    pub fn with_first_name(mut self, value: impl Into<String>) -> Self {
        self.first_name = Some(value.into());
        self
    }

    /// Set the last name.
    #[must_use]
    pub fn with_last_name(mut self, value: impl Into<String>) -> Self {
        self.last_name = Some(value.into());
        self
    }

    /// Set the username (the handle the directory filters on).
    #[must_use]
    pub fn with_username(mut self, value: impl Into<String>) -> Self {
        self.username = Some(value.into());
        self
    }

    /// Attach a passthrough attribute.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    /// Upstream identifier, when present.
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    /// First name or `""`.
    pub fn first_name(&self) -> &str {
        self.first_name.as_deref().unwrap_or_default()
    }

    /// Last name or `""`.
    pub fn last_name(&self) -> &str {
        self.last_name.as_deref().unwrap_or_default()
    }

    /// Username or `""`.
    pub fn username(&self) -> &str {
        self.username.as_deref().unwrap_or_default()
    }

    /// Attributes the directory does not interpret.
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }
}
