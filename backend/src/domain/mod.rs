//! Domain types, ports and the user directory pipeline.
//!
//! Public surface:
//! - `Error`/`ErrorCode`: transport-agnostic error payload.
//! - `User`: one upstream user record.
//! - `UserQuery`/`PaginationDefaults`: validated query input.
//! - `UserDirectoryService`: fetch, filter and paginate.

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_directory;
pub mod user_filter;
pub mod user_query;

pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::trace_id::TraceId;
pub use self::user::User;
pub use self::user_directory::UserDirectoryService;
pub use self::user_filter::{UserPredicate, filter_users, predicate_for};
pub use self::user_query::{PaginationDefaults, UserQuery};
