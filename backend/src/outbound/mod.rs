//! Outbound adapters implementing domain ports.
//!
//! - **upstream**: reqwest-backed fetcher for the upstream user listing.
//! - **cache**: in-process TTL cache shielding the upstream.
//!
//! Adapters translate between domain types and transport representations.
//! They contain no filtering or paging logic.

pub mod cache;
pub mod upstream;
