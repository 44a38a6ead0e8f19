//! Backend entry-point: loads configuration, prepares storage and serves the
//! REST API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use backend::settings::{AppSettings, BuildMode};

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|err| eyre!("failed to load configuration: {err}"))?
        .validate(BuildMode::from_debug_assertions())
        .wrap_err("invalid configuration")?;
    info!(
        bind_addr = %settings.bind_addr,
        secret_fingerprint = %settings.token_secret.fingerprint(),
        persistent = settings.database_url.is_some(),
        "configuration loaded"
    );

    let database_url = settings.database_url.clone();
    let store_timeout = settings.store_timeout;
    let mut config = ServerConfig::from_settings(settings);
    if let Some(url) = database_url {
        run_pending_migrations(&url).await?;
        let pool = DbPool::new(PoolConfig::new(url).with_call_timeout(store_timeout))
            .await
            .wrap_err("failed to build the database pool")?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config).await?;
    server.await?;
    Ok(())
}
