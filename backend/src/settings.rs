//! Service configuration loaded via OrthoConfig.
//!
//! Raw values come from `ROSTER_*` environment variables, CLI flags or a
//! config file. [`AppSettings::validate`] turns them into typed settings and
//! fails fast on anything missing or malformed.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::PaginationDefaults;
use crate::outbound::upstream::HttpUserSourceConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_UPSTREAM_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_UPSTREAM_LIMIT: u32 = 100;
const DEFAULT_CACHE_TTL_SECONDS: u64 = 600;
const DEFAULT_CACHE_MAX_ENTRIES: usize = 100;

/// Raw configuration as read from the environment.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ROSTER")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Upstream scheme and host, e.g. `https://dummyjson.com`.
    pub upstream_base_url: Option<String>,
    /// Upstream listing path, e.g. `/users`.
    pub upstream_users_path: Option<String>,
    /// Upstream request timeout in milliseconds.
    pub upstream_timeout_ms: Option<u64>,
    /// `limit` query parameter sent upstream.
    pub upstream_limit: Option<u32>,
    /// Seconds a fetched dataset stays fresh.
    pub cache_ttl_seconds: Option<u64>,
    /// Capacity of the dataset cache.
    pub cache_max_entries: Option<usize>,
    /// Page served when the request omits `page`.
    pub default_page: Option<i64>,
    /// Page size served when the request omits `size`.
    pub default_size: Option<i64>,
    /// Advisory maximum page size.
    pub max_size: Option<i64>,
}

/// Validated settings consumed by the server bootstrap.
#[derive(Debug, Clone)]
pub struct RosterConfig {
    /// Listener address.
    pub bind_addr: SocketAddr,
    /// Upstream endpoint and limits.
    pub upstream: HttpUserSourceConfig,
    /// Dataset freshness window.
    pub cache_ttl: Duration,
    /// Dataset cache capacity.
    pub cache_max_entries: usize,
    /// Request pagination defaults.
    pub pagination: PaginationDefaults,
}

/// Reasons configuration cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The configuration sources could not be read.
    #[error("failed to load configuration: {message}")]
    Load { message: String },
    /// A required value is absent or blank.
    #[error("{field} must be set (ROSTER_{env})", env = .field.to_uppercase())]
    Missing { field: &'static str },
    /// `bind_addr` is not a socket address.
    #[error("bind_addr {value:?} is not a socket address: {source}")]
    BindAddr {
        value: String,
        source: std::net::AddrParseError,
    },
    /// `upstream_base_url` is not an absolute URL.
    #[error("upstream_base_url {value:?} is not a valid URL: {source}")]
    BaseUrl {
        value: String,
        source: url::ParseError,
    },
    /// A value that must be positive is zero or negative.
    #[error("{field} must be greater than 0, got {value}")]
    NotPositive { field: &'static str, value: i64 },
}

impl AppSettings {
    /// Load settings from the process environment and arguments.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Load`] when a source is unreadable or a value
    /// has the wrong type.
    pub fn load_from_env() -> Result<Self, SettingsError> {
        Self::load_from_iter(std::env::args_os()).map_err(|err| SettingsError::Load {
            message: err.to_string(),
        })
    }

    /// Check every value and apply defaults.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<RosterConfig, SettingsError> {
        let bind_raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        let bind_addr = bind_raw
            .trim()
            .parse()
            .map_err(|source| SettingsError::BindAddr {
                value: bind_raw.to_owned(),
                source,
            })?;

        let base_raw = required(self.upstream_base_url.as_deref(), "upstream_base_url")?;
        let base_url = Url::parse(base_raw).map_err(|source| SettingsError::BaseUrl {
            value: base_raw.to_owned(),
            source,
        })?;
        let users_path = required(self.upstream_users_path.as_deref(), "upstream_users_path")?;

        let timeout_ms = self
            .upstream_timeout_ms
            .unwrap_or(DEFAULT_UPSTREAM_TIMEOUT_MS);
        if timeout_ms == 0 {
            return Err(SettingsError::NotPositive {
                field: "upstream_timeout_ms",
                value: 0,
            });
        }

        let cache_max_entries = self.cache_max_entries.unwrap_or(DEFAULT_CACHE_MAX_ENTRIES);
        if cache_max_entries == 0 {
            return Err(SettingsError::NotPositive {
                field: "cache_max_entries",
                value: 0,
            });
        }

        let pagination = PaginationDefaults {
            default_page: positive(self.default_page, 1, "default_page")?,
            default_size: positive(self.default_size, 10, "default_size")?,
            max_size: positive(self.max_size, 100, "max_size")?,
        };

        Ok(RosterConfig {
            bind_addr,
            upstream: HttpUserSourceConfig {
                base_url,
                users_path: users_path.to_owned(),
                timeout: Duration::from_millis(timeout_ms),
                limit: self.upstream_limit.unwrap_or(DEFAULT_UPSTREAM_LIMIT),
            },
            cache_ttl: Duration::from_secs(
                self.cache_ttl_seconds.unwrap_or(DEFAULT_CACHE_TTL_SECONDS),
            ),
            cache_max_entries,
            pagination,
        })
    }
}

fn required<'a>(value: Option<&'a str>, field: &'static str) -> Result<&'a str, SettingsError> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(SettingsError::Missing { field })
}

fn positive(value: Option<i64>, default: i64, field: &'static str) -> Result<i64, SettingsError> {
    match value.unwrap_or(default) {
        value if value > 0 => Ok(value),
        value => Err(SettingsError::NotPositive { field, value }),
    }
}
