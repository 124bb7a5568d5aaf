//! Game server binary for Babai.
//!
//! Wires together configuration, the save blob, the content service,
//! the background tasks, and the HTTP server.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `babai-config.yaml`
//! 3. Build the content service (templates + optional API key)
//! 4. Rehydrate the save blob (or seed a fresh player)
//! 5. Assemble shared state, spawn the effect worker and regen timer
//! 6. Serve until terminated

use std::path::Path;
use std::sync::Arc;

use babai_content::{ContentConfig, ContentService};
use babai_server::config::GameConfig;
use babai_server::state::AppState;
use babai_server::{effects, regen, server};
use babai_store::SaveStore;
use chrono::Utc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Application entry point for the game server.
///
/// # Errors
///
/// Returns an error if any initialization step or the server itself
/// fails.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("babai-server starting");

    // 2. Load configuration.
    let config = load_config()?;
    info!(
        host = config.server.host,
        port = config.server.port,
        save_path = config.storage.save_path,
        regen_interval_secs = config.economy.energy_regen_interval_secs,
        "Configuration loaded"
    );

    // 3. Build the content service.
    let content_config = ContentConfig::from_env()?;
    let content = ContentService::new(&content_config)?;
    info!(online = content.is_online(), "Content service ready");

    // 4. Rehydrate the save blob.
    let store = SaveStore::new(&config.storage.save_path);
    let player = store.load_or_init(Utc::now(), &config.economy).await?;
    info!(
        has_character = player.character.is_some(),
        energy = player.energy,
        fear = player.fear,
        "Player state ready"
    );

    // 5. Assemble shared state and spawn background tasks.
    let (state, effect_rx) = AppState::new(player, store, content, config.economy.clone());
    let _effects_handle = effects::spawn_worker(Arc::clone(&state), effect_rx);
    let _regen_handle = regen::spawn(Arc::clone(&state));
    info!("Background tasks started");

    // 6. Serve.
    server::start_server(&config.server, state).await?;

    info!("babai-server shutdown complete");
    Ok(())
}

/// Load the game configuration from `babai-config.yaml`.
///
/// Looks for the config file relative to the current working directory.
fn load_config() -> anyhow::Result<GameConfig> {
    let config_path = Path::new("babai-config.yaml");
    if config_path.exists() {
        Ok(GameConfig::from_file(config_path)?)
    } else {
        info!("Config file not found, using defaults");
        Ok(GameConfig::default())
    }
}
