//! Deterministic ammunition-loading rules for ranged weapons.
//!
//! `ammo-core` defines the canonical bookkeeping for what a weapon holds
//! (chambers, magazines, single rounds) and how reload, unload, fire and
//! chamber-selection actions transition that state. All mutation flows
//! through [`engine::LoadingEngine`], which edits an [`ActorLoadout`] in place
//! and stages the same changes into an [`Updates`] batch for the host to
//! persist.
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod query;
pub mod state;
pub mod updates;

pub use config::{AmmunitionTracking, RulesConfig, TrackingMode};
pub use engine::{
    AmmunitionNeed, AmmunitionShortfall, FireOutcome, LoadingEngine, ReloadError, ReloadOutcome,
    UnloadOutcome, ammunition_need,
};
pub use env::{RecordTemplate, RecordTemplates, StaticTemplates};
pub use error::{ErrorSeverity, RuleError};
pub use query::{check_fully_loaded, is_fully_loaded};
pub use state::{
    ActorId, ActorLoadout, AmmunitionRef, AmmunitionStack, ChamberCount, ChamberSelection,
    ItemId, LoadedAmmunition, LoadedState, MagazineState, Record, RecordBody, RecordId,
    RecordKind, SceneToken, SourceId, TokenId, WeaponConfig,
};
pub use updates::{ChatMessage, Mutation, Notification, Updates};
