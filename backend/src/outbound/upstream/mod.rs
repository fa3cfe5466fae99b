//! Upstream user listing adapters.
//!
//! A thin HTTP implementation of the `UserSource` port.

mod dto;
mod http_source;

pub use http_source::{HttpUserSource, HttpUserSourceBuildError, HttpUserSourceConfig};
