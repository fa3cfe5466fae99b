//! Service entry-point: loads configuration, wires the directory and serves it.

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use roster::inbound::http::health::HealthState;
use roster::settings::AppSettings;

mod server;

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_env().map_err(std::io::Error::other)?;
    let config = settings.validate().map_err(std::io::Error::other)?;
    let server_config = ServerConfig::from(config);
    info!(bind_addr = %server_config.bind_addr(), "starting roster service");

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, server_config)?;
    server.await
}
