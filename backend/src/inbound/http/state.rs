//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` so they depend only on
//! domain ports and stay testable without network I/O.

use std::sync::Arc;

use crate::domain::PaginationDefaults;
use crate::domain::ports::UsersQuery;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Directory query use-case.
    pub users: Arc<dyn UsersQuery>,
    /// Defaults applied to omitted `page`/`size` parameters.
    pub pagination: PaginationDefaults,
}

impl HttpState {
    /// Bundle the users port with pagination defaults.
    pub fn new(users: Arc<dyn UsersQuery>, pagination: PaginationDefaults) -> Self {
        Self { users, pagination }
    }
}
