//! User directory handlers.
//!
//! ```text
//! GET /api/users?name=emily&username=&page=1&size=10
//! ```

use actix_web::{get, web};
use pagination::Paginated;
use serde::Deserialize;
use tracing::{info, warn};
use utoipa::IntoParams;

use crate::domain::{User, UserQuery};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, PaginatedUsersSchema};
use crate::inbound::http::state::HttpState;

/// Query parameters for `GET /api/users`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListUsersParams {
    /// Case-insensitive substring of the first or last name.
    pub name: Option<String>,
    /// Case-insensitive substring of the username.
    pub username: Option<String>,
    /// 1-based page number; defaults to 1.
    #[param(minimum = 1)]
    pub page: Option<i64>,
    /// Page size; defaults to 10.
    #[param(minimum = 1)]
    pub size: Option<i64>,
}

/// List users matching the optional filters, one page at a time.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use roster::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/api/users",
    params(ListUsersParams),
    responses(
        (status = 200, description = "One page of matching users", body = PaginatedUsersSchema),
        (status = 400, description = "Invalid page, size or query string", body = ErrorSchema),
        (status = 503, description = "Upstream user source unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    params: web::Query<ListUsersParams>,
) -> ApiResult<web::Json<Paginated<User>>> {
    let ListUsersParams {
        name,
        username,
        page,
        size,
    } = params.into_inner();
    let query = UserQuery::from_optional(name, username, page, size, &state.pagination)?;
    if query.exceeds(&state.pagination) {
        warn!(
            size = query.size(),
            max_size = state.pagination.max_size,
            "page size above configured maximum; serving as requested"
        );
    }
    info!(
        page = query.page(),
        size = query.size(),
        name_filter = query.has_name_filter(),
        username_filter = query.has_username_filter(),
        "listing users"
    );

    let page = state.users.list_users(&query).await?;
    Ok(web::Json(page))
}
