//! Runtime orchestration for ammunition reloads.
//!
//! This crate wires the pure loading rules of `ammo-core` to the host:
//! collaborator traits for the actor store, scene, prompts and warnings, a
//! hook registry for feat-like side effects, and an event bus. Consumers
//! build a [`Reloader`] and call [`Reloader::reload`] for the controlled
//! actor or [`Reloader::reload_all`] for every NPC token in the scene.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the collaborator traits and error type
//! - [`events`] provides the broadcast event bus
//! - [`hooks`] provides post-reload hooks
//! - [`repository`] provides an in-memory actor store
pub mod api;
pub mod events;
pub mod hooks;
pub mod repository;
pub mod runtime;

pub use api::{
    ActorStore, AmmunitionRequest, AmmunitionSelector, ControlSource, Controlled,
    DeclineAmmunition, FirstAvailableAmmunition, PreferredWeaponSelector, Result, RuntimeError,
    Scene, StaticControl, StaticScene, TracingWarnings, WarningSink, WeaponSelector,
};
pub use events::{EventBus, ReloadEvent};
pub use hooks::{HookCriticality, HookRegistry, ReloadContext, ReloadHook};
pub use repository::{InMemoryActorStore, RepositoryError};
pub use runtime::{ReloadOptions, ReloadReport, Reloader, ReloaderBuilder, RuntimeConfig};
