//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic and do not derive `ToSchema`. The
//! wrappers here mirror their shape and register under the domain names.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// No route matches the request.
    #[schema(rename = "not_found")]
    NotFound,
    /// The upstream user source failed.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "size must be greater than 0")]
    message: String,
    /// Correlation identifier echoed in the `trace-id` header.
    #[schema(example = "5f0c4a5e-8f7d-4c1b-9a57-3d2a1b0c9e11")]
    trace_id: Option<String>,
    /// Supplementary details such as the offending field.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::User`].
///
/// Upstream attributes other than those listed (age, email, address and so
/// on) are passed through unchanged.
#[derive(ToSchema)]
#[schema(as = crate::domain::User, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    /// Upstream identifier.
    #[schema(example = 1)]
    id: Option<i64>,
    /// First name, matched by the `name` filter.
    #[schema(example = "Emily")]
    first_name: Option<String>,
    /// Last name, matched by the `name` filter.
    #[schema(example = "Johnson")]
    last_name: Option<String>,
    /// Handle matched by the `username` filter.
    #[schema(example = "emilys")]
    username: Option<String>,
}

/// OpenAPI schema for a page of users.
#[derive(ToSchema)]
#[schema(as = PaginatedUsers, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PaginatedUsersSchema {
    /// Requested page, echoed.
    #[schema(example = 1)]
    page: u64,
    /// Requested page size, echoed.
    #[schema(example = 10)]
    size: u64,
    /// Users matching the filters across all pages.
    #[schema(example = 23)]
    total_items: u64,
    /// `ceil(totalItems / size)`; zero when nothing matches.
    #[schema(example = 3)]
    total_pages: u64,
    /// Users on the requested page.
    data: Vec<UserSchema>,
}
