//! Public runtime API surface.
//!
//! This module gathers the collaborator traits the host implements and the
//! error type every runtime operation returns.

pub mod errors;
pub mod providers;

pub use errors::{Result, RuntimeError};
pub use providers::{
    ActorStore, AmmunitionRequest, AmmunitionSelector, ControlSource, Controlled,
    DeclineAmmunition, FirstAvailableAmmunition, PreferredWeaponSelector, Scene, StaticControl,
    StaticScene, TracingWarnings, WarningSink, WeaponSelector,
};
