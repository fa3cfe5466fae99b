//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod user_source;
mod users_query;

#[cfg(test)]
pub use user_source::MockUserSource;
pub use user_source::{FixtureUserSource, UserDataset, UserSource, UserSourceError};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
