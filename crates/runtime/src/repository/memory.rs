//! In-memory ActorStore implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use tracing::info;

use ammo_content::Scenario;
use ammo_core::{ActorId, ActorLoadout, Notification, Updates};

use super::error::{RepositoryError, Result};
use crate::api::{self, ActorStore};

/// Keeps loadouts in memory and applies flushed batches to them.
///
/// Every flushed batch is retained so callers can inspect exactly what a
/// reload persisted.
pub struct InMemoryActorStore {
    actors: RwLock<HashMap<ActorId, ActorLoadout>>,
    flushed: RwLock<Vec<Updates>>,
}

impl InMemoryActorStore {
    pub fn new() -> Self {
        Self::with_actors(Vec::new())
    }

    pub fn with_actors(actors: impl IntoIterator<Item = ActorLoadout>) -> Self {
        let actors = actors
            .into_iter()
            .map(|loadout| (loadout.actor, loadout))
            .collect();
        Self {
            actors: RwLock::new(actors),
            flushed: RwLock::new(Vec::new()),
        }
    }

    pub fn from_scenario(scenario: &Scenario) -> Self {
        Self::with_actors(scenario.actors.iter().cloned())
    }

    pub fn insert(&self, loadout: ActorLoadout) -> Result<()> {
        let mut actors = self
            .actors
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        actors.insert(loadout.actor, loadout);
        Ok(())
    }

    /// Returns a copy of the stored loadout.
    pub fn actor(&self, id: ActorId) -> Result<ActorLoadout> {
        let actors = self
            .actors
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        actors
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::ActorNotFound(id))
    }

    /// Batches flushed so far, oldest first.
    pub fn flushed(&self) -> Result<Vec<Updates>> {
        let flushed = self
            .flushed
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(flushed.clone())
    }

    fn apply(&self, updates: &Updates) -> Result<()> {
        let mut actors = self
            .actors
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let loadout = actors
            .get_mut(&updates.actor())
            .ok_or(RepositoryError::ActorNotFound(updates.actor()))?;
        updates.apply_to(loadout);
        Ok(())
    }
}

impl Default for InMemoryActorStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ActorStore for InMemoryActorStore {
    async fn load(&self, actor: ActorId) -> api::Result<ActorLoadout> {
        Ok(self.actor(actor)?)
    }

    async fn handle_updates(&self, updates: Updates) -> api::Result<()> {
        self.apply(&updates)?;

        for notification in updates.notifications() {
            match notification {
                Notification::FloatyText { text, .. } => {
                    info!(target: "runtime::notifications", actor = %updates.actor(), "{}", text);
                }
                Notification::Chat(message) => {
                    info!(
                        target: "runtime::notifications",
                        actor = %updates.actor(),
                        action = %message.action,
                        cost = %message.cost,
                        "{}",
                        message.description
                    );
                }
            }
        }

        self.flushed
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?
            .push(updates);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ammo_core::{AmmunitionStack, ItemId, SourceId};

    #[tokio::test]
    async fn flushed_batches_are_applied_and_kept() {
        let loadout = ActorLoadout::new(ActorId(1), "Archer").with_stack(AmmunitionStack::new(
            ItemId(20),
            SourceId(1),
            "Arrow",
            10,
        ));
        let store = InMemoryActorStore::with_actors([loadout]);

        let mut updates = Updates::new(ActorId(1));
        updates.set_quantity(ItemId(20), 9);
        updates.floaty_text("Reloaded", true);
        store.handle_updates(updates.clone()).await.unwrap();

        let stored = store.load(ActorId(1)).await.unwrap();
        assert_eq!(stored.stack(ItemId(20)).map(|s| s.quantity), Some(9));
        assert_eq!(store.flushed().unwrap(), vec![updates]);
    }

    #[tokio::test]
    async fn unknown_actor_is_reported() {
        let store = InMemoryActorStore::new();
        assert!(store.load(ActorId(7)).await.is_err());
        assert!(
            store
                .handle_updates(Updates::new(ActorId(7)))
                .await
                .is_err()
        );
    }
}
