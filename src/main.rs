//! HTTP server for the prescription engine.
//!
//! Environment:
//! - `PRESCRIZIONE_CONFIG`: regime configuration directory (default `./config/prescrizione`)
//! - `PRESCRIZIONE_ADDR`: listen address (default `127.0.0.1:3000`)
//! - `RUST_LOG`: log filter (default `info`)

use prescrizione_engine::api::{AppState, create_router};
use prescrizione_engine::config::ConfigLoader;
use prescrizione_engine::logging;

const DEFAULT_CONFIG_DIR: &str = "./config/prescrizione";
const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let config_dir =
        std::env::var("PRESCRIZIONE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let addr = std::env::var("PRESCRIZIONE_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());

    let config = ConfigLoader::load(&config_dir)?;
    tracing::info!(
        config_dir = %config_dir,
        regime = %config.regime().code,
        version = %config.regime().version,
        "Loaded regime configuration"
    );

    let router = create_router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Listening");

    axum::serve(listener, router).await?;
    Ok(())
}
