//! High-level reload orchestrator.
//!
//! The [`Reloader`] resolves the actor and weapon to act on, asks for
//! ammunition when the rules need it, drives the [`LoadingEngine`], and
//! flushes one batch per actor through the [`ActorStore`]. It is built with a
//! builder so hosts only plug in the collaborators they actually have.

use std::sync::Arc;

use tracing::{debug, info, warn};

use ammo_content::ContentFactory;
use ammo_core::{
    ActorId, ActorLoadout, AmmunitionNeed, AmmunitionShortfall, ChatMessage, ItemId,
    LoadingEngine, RecordTemplates, ReloadError, ReloadOutcome, RuleError, RulesConfig,
    SceneToken, StaticTemplates, Updates, WeaponConfig, ammunition_need, is_fully_loaded,
};

use crate::api::{
    ActorStore, AmmunitionRequest, AmmunitionSelector, ControlSource, DeclineAmmunition,
    PreferredWeaponSelector, Result, RuntimeError, Scene, StaticControl, StaticScene,
    TracingWarnings, WarningSink, WeaponSelector,
};
use crate::events::{EventBus, ReloadEvent};
use crate::hooks::{HookRegistry, ReloadContext, ReloadHook};

const NO_RELOADABLE_WEAPONS: &str = "You have no reloadable weapons.";
const NO_TOKEN_CONTROLLED: &str = "You must have exactly one token selected.";

/// Runtime configuration shared by every reload.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub rules: RulesConfig,
    pub event_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            rules: RulesConfig::default(),
            event_buffer_size: 100,
        }
    }
}

/// Options for [`Reloader::reload_all`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReloadOptions {
    /// Keep per-weapon warnings out of the warning sink. They are still logged.
    pub silent: bool,
}

impl ReloadOptions {
    pub const fn silent() -> Self {
        Self { silent: true }
    }
}

/// Summary of a batch reload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReloadReport {
    /// Reloaded weapons, in the order they were loaded.
    pub reloaded: Vec<(ActorId, ReloadOutcome)>,
    /// Weapons (or actors) whose reload failed without aborting the batch.
    pub failures: usize,
}

/// Reload orchestrator.
///
/// Design: the reloader holds no per-call state; every call loads fresh
/// loadouts from the store and stages into its own batch.
pub struct Reloader {
    config: RuntimeConfig,
    templates: Arc<dyn RecordTemplates>,
    store: Arc<dyn ActorStore>,
    control: Arc<dyn ControlSource>,
    scene: Arc<dyn Scene>,
    weapons: Arc<dyn WeaponSelector>,
    ammunition: Arc<dyn AmmunitionSelector>,
    warnings: Arc<dyn WarningSink>,
    hooks: HookRegistry,
    events: EventBus,
}

impl Reloader {
    /// Create a new reloader builder
    pub fn builder() -> ReloaderBuilder {
        ReloaderBuilder::new()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn hooks(&self) -> &HookRegistry {
        &self.hooks
    }

    /// Subscribe to reload events
    pub fn subscribe_events(&self) -> tokio::sync::broadcast::Receiver<ReloadEvent> {
        self.events.subscribe()
    }

    /// Reloads one weapon of the controlled actor.
    ///
    /// Returns `Ok(None)` when nothing was reloaded because of a user-facing
    /// warning (already shown through the warning sink) or because the weapon
    /// prompt was dismissed.
    pub async fn reload(&self) -> Result<Option<ReloadOutcome>> {
        let Some(controlled) = self.control.controlled().await else {
            self.warnings.warn(NO_TOKEN_CONTROLLED);
            return Ok(None);
        };

        let mut loadout = self.store.load(controlled.actor).await?;
        let mode = self.config.rules.mode_for(loadout.player_owned);

        let candidates: Vec<WeaponConfig> = loadout.reloadable_weapons().cloned().collect();
        if candidates.is_empty() {
            self.warnings.warn(
                &ReloadError::NoWeaponAvailable {
                    message: NO_RELOADABLE_WEAPONS.to_string(),
                }
                .to_string(),
            );
            return Ok(None);
        }

        let preferred: Vec<ItemId> = candidates
            .iter()
            .filter(|weapon| !is_fully_loaded(&loadout, weapon, mode))
            .map(|weapon| weapon.id)
            .collect();
        let Some(weapon) = self
            .weapons
            .select_weapon(&loadout, &candidates, &preferred)
            .await?
        else {
            return Ok(None);
        };

        let mut updates = Updates::new(controlled.actor);
        let result = self
            .perform_reload(&mut loadout, &controlled.token, weapon, &mut updates)
            .await;

        // A replacement ammunition pick is kept even when the reload fails.
        if !updates.is_empty() {
            self.flush(updates).await?;
        }

        match result {
            Ok(outcome) => {
                self.events.publish(ReloadEvent::WeaponReloaded {
                    actor: controlled.actor,
                    token: controlled.token.id,
                    weapon: outcome.weapon,
                });
                Ok(Some(outcome))
            }
            Err(error) if error.is_warning() => {
                self.warnings.warn(&error.to_string());
                Ok(None)
            }
            Err(error) => Err(error),
        }
    }

    /// Reloads every weapon of every token without a player owner.
    ///
    /// Weapons that are already fully loaded are skipped. A failure on one
    /// weapon does not stop the others; only fatal errors abort the pass, and
    /// actors processed before that point stay flushed.
    pub async fn reload_all(&self, options: ReloadOptions) -> Result<ReloadReport> {
        let tokens = self.scene.tokens().await?;
        let mut report = ReloadReport::default();

        for token in tokens.iter().filter(|token| !token.player_owned) {
            let mut loadout = match self.store.load(token.actor).await {
                Ok(loadout) => loadout,
                Err(error) if error.is_fatal() => return Err(error),
                Err(error) => {
                    warn!(
                        target: "runtime::reload",
                        token = %token.id,
                        actor = %token.actor,
                        error = %error,
                        "Skipping token whose actor could not be loaded"
                    );
                    report.failures += 1;
                    continue;
                }
            };
            let mode = self.config.rules.mode_for(loadout.player_owned);

            let pending: Vec<ItemId> = loadout
                .reloadable_weapons()
                .filter(|weapon| !is_fully_loaded(&loadout, weapon, mode))
                .map(|weapon| weapon.id)
                .collect();

            let mut updates = Updates::new(token.actor);
            let mut reloaded = Vec::new();
            for weapon in pending {
                match self
                    .perform_reload(&mut loadout, token, weapon, &mut updates)
                    .await
                {
                    Ok(outcome) => reloaded.push(outcome),
                    Err(error) if error.is_fatal() => return Err(error),
                    Err(error) => {
                        warn!(
                            target: "runtime::reload",
                            token = %token.id,
                            weapon = %weapon,
                            code = error.error_code(),
                            error = %error,
                            "Weapon reload failed"
                        );
                        if !options.silent {
                            self.warnings.warn(&error.to_string());
                        }
                        report.failures += 1;
                    }
                }
            }

            if !updates.is_empty()
                && let Err(error) = self.flush(updates).await
            {
                if error.is_fatal() {
                    return Err(error);
                }
                warn!(
                    target: "runtime::reload",
                    actor = %token.actor,
                    error = %error,
                    "Failed to flush actor batch"
                );
                report.failures += reloaded.len().max(1);
                continue;
            }

            for outcome in reloaded {
                self.events.publish(ReloadEvent::WeaponReloaded {
                    actor: token.actor,
                    token: token.id,
                    weapon: outcome.weapon,
                });
                report.reloaded.push((token.actor, outcome));
            }
        }

        self.events.publish(ReloadEvent::SceneReloaded {
            reloaded: report.reloaded.len(),
            failures: report.failures,
        });
        Ok(report)
    }

    /// Reloads one weapon into `updates`.
    ///
    /// On a critical hook failure both the loadout and the batch are rolled
    /// back to their state before this weapon.
    async fn perform_reload(
        &self,
        loadout: &mut ActorLoadout,
        token: &SceneToken,
        weapon: ItemId,
        updates: &mut Updates,
    ) -> Result<ReloadOutcome> {
        let mode = self.config.rules.mode_for(loadout.player_owned);
        let (saved_loadout, saved_updates) = (loadout.clone(), updates.clone());

        let replacement = match ammunition_need(loadout, weapon, mode)? {
            AmmunitionNeed::NotRequired | AmmunitionNeed::Ready(_) => None,
            AmmunitionNeed::Select(shortfall) => {
                Some(self.prompt_ammunition(loadout, weapon, shortfall).await?)
            }
        };

        let config = loadout
            .weapon(weapon)
            .cloned()
            .ok_or(ReloadError::WeaponNotFound(weapon))?;

        let outcome = {
            let mut engine = LoadingEngine::new(loadout, updates, self.templates.as_ref(), mode);
            if let Some(stack) = replacement {
                engine.select_ammunition(weapon, stack)?;
            }
            engine.reload(weapon, None)?
        };

        updates.chat(ChatMessage::reload(
            &token.name,
            &config,
            outcome.ammunition_name(),
            self.config.rules.chat_cost_limit,
        ));

        let ctx = ReloadContext {
            loadout: &*loadout,
            token,
            weapon: &config,
            outcome: &outcome,
            mode,
        };
        if let Err(error) = self.hooks.run(&ctx, updates) {
            *loadout = saved_loadout;
            *updates = saved_updates;
            return Err(error.into());
        }

        debug!(
            target: "runtime::reload",
            actor = %loadout.actor,
            weapon = %config.name,
            mode = %mode,
            ammunition = outcome.ammunition_name().unwrap_or("-"),
            "Staged reload"
        );
        Ok(outcome)
    }

    /// Asks for a replacement stack.
    ///
    /// With no stack holding rounds there is nothing to ask about, so the
    /// shortfall itself is reported.
    async fn prompt_ammunition(
        &self,
        loadout: &ActorLoadout,
        weapon: ItemId,
        reason: AmmunitionShortfall,
    ) -> Result<ItemId> {
        let config = loadout
            .weapon(weapon)
            .cloned()
            .ok_or(ReloadError::WeaponNotFound(weapon))?;

        let candidates: Vec<_> = loadout.available_stacks().cloned().collect();
        if candidates.is_empty() {
            return Err(reason.into_error(&config).into());
        }

        let request = AmmunitionRequest {
            prompt: reason.prompt(&config),
            weapon: config,
            reason,
            candidates,
        };
        match self.ammunition.select_ammunition(loadout, &request).await? {
            Some(stack) => Ok(stack),
            None => Err(ReloadError::AmmunitionDeclined {
                weapon: request.weapon.name,
            }
            .into()),
        }
    }

    async fn flush(&self, updates: Updates) -> Result<()> {
        let actor = updates.actor();
        let (mutations, notifications) = (updates.mutations().len(), updates.notifications().len());
        self.store.handle_updates(updates).await?;
        info!(
            target: "runtime::reload",
            actor = %actor,
            mutations,
            notifications,
            "Flushed batch"
        );
        Ok(())
    }
}

/// Builder for [`Reloader`] with flexible configuration.
pub struct ReloaderBuilder {
    config: RuntimeConfig,
    templates: Option<Arc<dyn RecordTemplates>>,
    store: Option<Arc<dyn ActorStore>>,
    control: Option<Arc<dyn ControlSource>>,
    scene: Option<Arc<dyn Scene>>,
    weapons: Option<Arc<dyn WeaponSelector>>,
    ammunition: Option<Arc<dyn AmmunitionSelector>>,
    warnings: Option<Arc<dyn WarningSink>>,
    hooks: Vec<Arc<dyn ReloadHook>>,
}

impl ReloaderBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            templates: None,
            store: None,
            control: None,
            scene: None,
            weapons: None,
            ammunition: None,
            warnings: None,
            hooks: Vec::new(),
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn rules(mut self, rules: RulesConfig) -> Self {
        self.config.rules = rules;
        self
    }

    /// Loads rules and record templates from a content directory.
    pub fn content(mut self, factory: &ContentFactory) -> Result<Self> {
        self.config.rules = factory
            .load_rules()
            .map_err(|e| RuntimeError::Content(format!("{e:#}")))?;
        let templates = factory
            .load_templates()
            .map_err(|e| RuntimeError::Content(format!("{e:#}")))?;
        Ok(self.templates(templates))
    }

    /// Record templates; defaults to [`StaticTemplates::defaults`].
    pub fn templates(mut self, templates: impl RecordTemplates + 'static) -> Self {
        self.templates = Some(Arc::new(templates));
        self
    }

    /// Set required actor store
    pub fn store(mut self, store: Arc<dyn ActorStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn control(mut self, control: impl ControlSource + 'static) -> Self {
        self.control = Some(Arc::new(control));
        self
    }

    pub fn scene(mut self, scene: impl Scene + 'static) -> Self {
        self.scene = Some(Arc::new(scene));
        self
    }

    pub fn weapon_selector(mut self, selector: impl WeaponSelector + 'static) -> Self {
        self.weapons = Some(Arc::new(selector));
        self
    }

    pub fn ammunition_selector(mut self, selector: impl AmmunitionSelector + 'static) -> Self {
        self.ammunition = Some(Arc::new(selector));
        self
    }

    pub fn warnings(mut self, sink: Arc<dyn WarningSink>) -> Self {
        self.warnings = Some(sink);
        self
    }

    /// Registers a reload hook. Hooks run in priority order.
    pub fn hook(mut self, hook: Arc<dyn ReloadHook>) -> Self {
        self.hooks.push(hook);
        self
    }

    /// Build the reloader
    ///
    /// Fails if no actor store was set; every other collaborator has a
    /// non-interactive default.
    pub fn build(self) -> Result<Reloader> {
        let store = self.store.ok_or(RuntimeError::MissingStore)?;
        let events = EventBus::with_capacity(self.config.event_buffer_size);

        Ok(Reloader {
            templates: self
                .templates
                .unwrap_or_else(|| Arc::new(StaticTemplates::defaults())),
            store,
            control: self
                .control
                .unwrap_or_else(|| Arc::new(StaticControl::default())),
            scene: self
                .scene
                .unwrap_or_else(|| Arc::new(StaticScene::default())),
            weapons: self
                .weapons
                .unwrap_or_else(|| Arc::new(PreferredWeaponSelector)),
            ammunition: self
                .ammunition
                .unwrap_or_else(|| Arc::new(DeclineAmmunition)),
            warnings: self.warnings.unwrap_or_else(|| Arc::new(TracingWarnings)),
            hooks: HookRegistry::new(self.hooks),
            events,
            config: self.config,
        })
    }
}
