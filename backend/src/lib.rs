//! Roster: a paginated, filterable user directory over a cached upstream.
//!
//! Layout follows ports and adapters:
//! - [`domain`]: user records, queries, filters and the directory pipeline.
//! - [`outbound`]: the upstream HTTP fetcher and the dataset cache.
//! - [`inbound`]: Actix handlers, error mapping and OpenAPI schemas.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

#[cfg(test)]
pub(crate) mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
