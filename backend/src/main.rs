//! Bulletin entry-point: loads settings, wires storage and serves one app.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

mod server;

use color_eyre::eyre::{Context, Result};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use bulletin::inbound::http::session_config::{
    BuildMode, key_fingerprint, session_settings_from_env,
};
use server::{ServerConfig, ServerSettings, build_http_state, create_server};

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

    let settings = ServerSettings::load().wrap_err("load server settings")?;
    let app = settings.app()?;
    let bind_addr = settings.bind_addr()?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .wrap_err("configure session cookies")?;
    info!(fingerprint = %key_fingerprint(&session.key), "session key loaded");

    let http_state = build_http_state(&settings).await?;
    let config = ServerConfig::new(
        app,
        session.key,
        session.cookie_secure,
        session.same_site,
        bind_addr,
    );
    info!(?app, %bind_addr, "starting server");
    create_server(http_state, config)?.await?;
    Ok(())
}
