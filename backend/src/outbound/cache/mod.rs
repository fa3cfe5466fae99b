//! In-process caching adapters.
//!
//! [`TtlCache`] is the reusable memo table; [`CachedUserSource`] applies it to
//! the upstream user dataset.

mod ttl_cache;
mod user_source;

pub use ttl_cache::{CacheStats, TtlCache};
pub use user_source::CachedUserSource;
