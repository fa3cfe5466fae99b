//! OpenAPI documentation for the REST API.
//!
//! Registers the directory and health endpoints plus the schema wrappers from
//! the inbound layer. Swagger UI serves it in debug builds; the
//! `openapi-dump` binary prints it for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, PaginatedUsersSchema, UserSchema,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Roster user directory API",
        description = "Paginated, filterable access to a cached upstream user listing."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(UserSchema, PaginatedUsersSchema, ErrorSchema, ErrorCodeSchema)),
    tags(
        (name = "users", description = "User directory queries"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
