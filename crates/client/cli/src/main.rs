//! Command-line reload pass over a scenario.
//!
//! Loads rules, record templates and a scenario from the data directory,
//! reloads the first player token's weapon, then reloads every NPC weapon in
//! the scene and reports what changed.
mod config;

use std::sync::Arc;

use ammo_content::ContentFactory;
use anyhow::{Context, Result};
use runtime::{
    FirstAvailableAmmunition, InMemoryActorStore, ReloadEvent, ReloadOptions, Reloader,
    StaticControl, StaticScene,
};
use tracing::info;

use crate::config::CliConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    setup_logging();

    let config = CliConfig::from_env();
    let factory = ContentFactory::new(config.data_dir.clone());
    let scenario = factory
        .load_scenario(&config.scenario)
        .with_context(|| format!("Failed to load scenario '{}'", config.scenario))?;

    info!(
        scenario = %config.scenario,
        actors = scenario.actors.len(),
        tokens = scenario.tokens.len(),
        "Scenario loaded"
    );

    let control = scenario
        .tokens
        .iter()
        .find(|token| token.player_owned)
        .map(|token| StaticControl::new(token.actor, token.clone()))
        .unwrap_or_default();
    let store = Arc::new(InMemoryActorStore::from_scenario(&scenario));

    let reloader = Reloader::builder()
        .content(&factory)?
        .store(store.clone())
        .control(control)
        .scene(StaticScene(scenario.tokens.clone()))
        .ammunition_selector(FirstAvailableAmmunition)
        .build()?;
    let mut events = reloader.subscribe_events();

    if let Some(outcome) = reloader.reload().await? {
        info!(weapon = %outcome.weapon, "Controlled token reloaded");
    }

    let report = reloader
        .reload_all(ReloadOptions {
            silent: config.silent,
        })
        .await?;

    while let Ok(event) = events.try_recv() {
        if let ReloadEvent::WeaponReloaded { token, weapon, .. } = event {
            info!(%token, %weapon, "Reload event");
        }
    }

    for actor in &scenario.actors {
        let loadout = store.actor(actor.actor)?;
        for weapon in loadout.reloadable_weapons() {
            let state = loadout
                .record(weapon.id, ammo_core::RecordKind::Loaded)
                .map_or("unloaded", |record| record.name.as_str());
            info!(actor = %loadout.name, weapon = %weapon.name, "{}", state);
        }
    }

    info!(
        reloaded = report.reloaded.len(),
        failures = report.failures,
        "Reload pass complete"
    );
    Ok(())
}

/// Setup logging to stderr
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
