//! Reload event bus.
//!
//! Events are published after a batch has been flushed, so subscribers only
//! ever observe changes the store has accepted.

mod bus;

pub use bus::EventBus;

use ammo_core::{ActorId, ItemId, TokenId};
use serde::{Deserialize, Serialize};

/// Notifications emitted by the reloader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReloadEvent {
    /// A weapon was reloaded and its batch flushed.
    WeaponReloaded {
        actor: ActorId,
        token: TokenId,
        weapon: ItemId,
    },

    /// A batch reload across the scene finished.
    SceneReloaded { reloaded: usize, failures: usize },
}
