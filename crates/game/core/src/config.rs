/// Which ammunition rules apply to an actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum TrackingMode {
    /// Only loaded/unloaded state (and chamber counts) are tracked.
    Simple,
    /// Ammunition identity is tracked and stacks are consumed.
    Advanced,
}

/// Per-ownership switch for advanced ammunition tracking.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AmmunitionTracking {
    /// Advanced tracking for actors owned by a player.
    pub players: bool,
    /// Advanced tracking for actors without a player owner.
    pub npcs: bool,
}

impl AmmunitionTracking {
    pub const fn mode_for(&self, player_owned: bool) -> TrackingMode {
        let advanced = if player_owned { self.players } else { self.npcs };
        if advanced {
            TrackingMode::Advanced
        } else {
            TrackingMode::Simple
        }
    }
}

impl Default for AmmunitionTracking {
    fn default() -> Self {
        Self {
            players: true,
            npcs: false,
        }
    }
}

/// Rules configuration and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RulesConfig {
    pub tracking: AmmunitionTracking,
    /// Reload costs above this are variable and shown without a number in chat.
    pub chat_cost_limit: u8,
}

impl RulesConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_CHAT_COST_LIMIT: u8 = 3;

    pub fn new() -> Self {
        Self {
            tracking: AmmunitionTracking::default(),
            chat_cost_limit: Self::DEFAULT_CHAT_COST_LIMIT,
        }
    }

    pub fn with_tracking(tracking: AmmunitionTracking) -> Self {
        Self {
            tracking,
            ..Self::new()
        }
    }

    pub fn mode_for(&self, player_owned: bool) -> TrackingMode {
        self.tracking.mode_for(player_owned)
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self::new()
    }
}
