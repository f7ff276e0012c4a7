//! Host collaborators consumed by the reloader.
//!
//! The rules never talk to the host directly. Runtime users plug in
//! implementations of these traits so a reload can run against a live game,
//! scripted fixtures, or tests.
use async_trait::async_trait;

use ammo_core::{
    ActorId, ActorLoadout, AmmunitionShortfall, AmmunitionStack, ItemId, SceneToken, Updates,
    WeaponConfig,
};

use super::errors::Result;

/// The actor and token the user currently controls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Controlled {
    pub actor: ActorId,
    pub token: SceneToken,
}

/// Resolves the single token the user is acting through.
#[async_trait]
pub trait ControlSource: Send + Sync {
    /// Returns `None` unless exactly one token is controlled.
    async fn controlled(&self) -> Option<Controlled>;
}

/// Picks the weapon to reload.
#[async_trait]
pub trait WeaponSelector: Send + Sync {
    /// Chooses among `candidates`, favouring `preferred` (weapons that are not
    /// fully loaded). `None` means the user dismissed the choice.
    async fn select_weapon(
        &self,
        loadout: &ActorLoadout,
        candidates: &[WeaponConfig],
        preferred: &[ItemId],
    ) -> Result<Option<ItemId>>;
}

/// A prompt for replacement ammunition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AmmunitionRequest {
    pub weapon: WeaponConfig,
    pub reason: AmmunitionShortfall,
    /// Text shown above the choices.
    pub prompt: String,
    /// Stacks that still hold rounds.
    pub candidates: Vec<AmmunitionStack>,
}

/// Asks the user which ammunition to load.
#[async_trait]
pub trait AmmunitionSelector: Send + Sync {
    /// Returns the chosen stack, or `None` when the prompt is dismissed.
    async fn select_ammunition(
        &self,
        loadout: &ActorLoadout,
        request: &AmmunitionRequest,
    ) -> Result<Option<ItemId>>;
}

/// Loads actors and persists staged batches.
#[async_trait]
pub trait ActorStore: Send + Sync {
    async fn load(&self, actor: ActorId) -> Result<ActorLoadout>;

    /// Flushes a batch: persists its mutations and shows its notifications.
    async fn handle_updates(&self, updates: Updates) -> Result<()>;
}

/// Tokens placed in the active scene.
#[async_trait]
pub trait Scene: Send + Sync {
    async fn tokens(&self) -> Result<Vec<SceneToken>>;
}

/// User-facing warning channel.
pub trait WarningSink: Send + Sync {
    fn warn(&self, message: &str);
}

/// A fixed controlled token, or none.
#[derive(Clone, Debug, Default)]
pub struct StaticControl(pub Option<Controlled>);

impl StaticControl {
    pub fn new(actor: ActorId, token: SceneToken) -> Self {
        Self(Some(Controlled { actor, token }))
    }
}

#[async_trait]
impl ControlSource for StaticControl {
    async fn controlled(&self) -> Option<Controlled> {
        self.0.clone()
    }
}

/// A fixed list of tokens.
#[derive(Clone, Debug, Default)]
pub struct StaticScene(pub Vec<SceneToken>);

#[async_trait]
impl Scene for StaticScene {
    async fn tokens(&self) -> Result<Vec<SceneToken>> {
        Ok(self.0.clone())
    }
}

/// Picks the first preferred weapon, else the first candidate, without asking.
pub struct PreferredWeaponSelector;

#[async_trait]
impl WeaponSelector for PreferredWeaponSelector {
    async fn select_weapon(
        &self,
        _loadout: &ActorLoadout,
        candidates: &[WeaponConfig],
        preferred: &[ItemId],
    ) -> Result<Option<ItemId>> {
        Ok(preferred
            .first()
            .copied()
            .or_else(|| candidates.first().map(|weapon| weapon.id)))
    }
}

/// Answers every ammunition prompt with the first candidate stack.
pub struct FirstAvailableAmmunition;

#[async_trait]
impl AmmunitionSelector for FirstAvailableAmmunition {
    async fn select_ammunition(
        &self,
        _loadout: &ActorLoadout,
        request: &AmmunitionRequest,
    ) -> Result<Option<ItemId>> {
        Ok(request.candidates.first().map(|stack| stack.id))
    }
}

/// Dismisses every ammunition prompt.
pub struct DeclineAmmunition;

#[async_trait]
impl AmmunitionSelector for DeclineAmmunition {
    async fn select_ammunition(
        &self,
        _loadout: &ActorLoadout,
        _request: &AmmunitionRequest,
    ) -> Result<Option<ItemId>> {
        Ok(None)
    }
}

/// Routes warnings to the log.
pub struct TracingWarnings;

impl WarningSink for TracingWarnings {
    fn warn(&self, message: &str) {
        tracing::warn!(target: "runtime::warnings", "{}", message);
    }
}
