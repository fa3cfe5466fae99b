//! Composable predicates over [`User`] records.
//!
//! A predicate is a boxed closure. [`predicate_for`] composes one predicate
//! per active query filter with logical AND; with no active filters the
//! result accepts every user.

use super::{User, UserQuery};

/// Boxed predicate over a single user.
pub type UserPredicate = Box<dyn Fn(&User) -> bool + Send + Sync>;

/// Accept users whose first or last name contains `term`, ignoring case.
///
/// `term` is trimmed and lowercased here so callers may pass raw text.
pub fn name_contains(term: &str) -> UserPredicate {
    let needle = term.trim().to_lowercase();
    Box::new(move |user| {
        contains_folded(user.first_name(), &needle) || contains_folded(user.last_name(), &needle)
    })
}

/// Accept users whose username contains `term`, ignoring case.
pub fn username_contains(term: &str) -> UserPredicate {
    let needle = term.trim().to_lowercase();
    Box::new(move |user| contains_folded(user.username(), &needle))
}

/// Accept users matching both `left` and `right`.
pub fn and(left: UserPredicate, right: UserPredicate) -> UserPredicate {
    Box::new(move |user| left(user) && right(user))
}

/// Accept users matching every predicate; an empty list accepts everyone.
///
/// # Examples
/// ```
/// use roster::domain::User;
/// use roster::domain::user_filter::all_of;
///
/// let accept_all = all_of(Vec::new());
/// assert!(accept_all(&User::default()));
/// ```
pub fn all_of(predicates: Vec<UserPredicate>) -> UserPredicate {
    predicates
        .into_iter()
        .reduce(and)
        .unwrap_or_else(|| Box::new(|_: &User| true))
}

/// Build the composite predicate for the active filters in `query`.
pub fn predicate_for(query: &UserQuery) -> UserPredicate {
    let name = query.name_term().map(|term| name_contains(&term));
    let username = query.username_term().map(|term| username_contains(&term));
    all_of(name.into_iter().chain(username).collect())
}

/// Users matching `query`, in their original order.
pub fn filter_users<'a>(users: &'a [User], query: &UserQuery) -> Vec<&'a User> {
    let predicate = predicate_for(query);
    users.iter().filter(|&user| predicate(user)).collect()
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
