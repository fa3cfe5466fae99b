//! HTTP inbound adapter exposing the REST endpoints.

pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub mod users;

use actix_web::{HttpRequest, Scope, web};

use crate::domain::Error;

pub use error::{ApiResult, query_error_handler};

/// The `/api` scope with its query-string error handling configured.
pub fn api_scope() -> Scope {
    web::scope("/api")
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .service(users::list_users)
}

/// Fallback for unmatched routes, answering with a JSON `not_found` error.
pub async fn not_found(req: HttpRequest) -> ApiResult<actix_web::HttpResponse> {
    Err(Error::not_found(format!("no route for {} {}", req.method(), req.path())))
}
