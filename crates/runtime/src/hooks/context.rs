//! Context handed to reload hooks.

use ammo_core::{ActorLoadout, ReloadOutcome, SceneToken, TrackingMode, WeaponConfig};

/// Read-only view of a reload that just succeeded.
pub struct ReloadContext<'a> {
    /// Loadout after the reload was applied.
    pub loadout: &'a ActorLoadout,

    /// Token the reload was performed through.
    pub token: &'a SceneToken,

    pub weapon: &'a WeaponConfig,

    pub outcome: &'a ReloadOutcome,

    pub mode: TrackingMode,
}
