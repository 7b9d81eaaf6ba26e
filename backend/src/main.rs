//! Backend entry-point: loads settings, prepares storage, seeds users and
//! serves the REST API.

mod server;

use std::io;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use paintapp::inbound::http::health::HealthState;
use paintapp::settings::AppSettings;
use paintapp::startup::{StartupError, connect_storage, seed_default_users_on_startup};
use server::{ServerConfig, create_server, drain_on, shutdown_signal};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os()).map_err(|err| {
        error!(error = %err, "failed to load settings");
        io::Error::other(err.to_string())
    })?;

    let config = prepare(&settings).await.map_err(|err| {
        error!(error = %err, "startup failed");
        io::Error::other(err)
    })?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    actix_web::rt::spawn(drain_on(shutdown_signal(), health_state, server.handle()));
    server.await
}

/// Resolve storage and seed users before the listener binds.
async fn prepare(settings: &AppSettings) -> Result<ServerConfig, StartupError> {
    let bind_addr = settings.bind_addr()?;
    let storage = connect_storage(settings).await?;
    seed_default_users_on_startup(settings, &storage).await?;
    info!(%bind_addr, storage = storage.describe(), "starting paintapp backend");
    Ok(ServerConfig::new(bind_addr, storage))
}
