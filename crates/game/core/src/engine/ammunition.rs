//! Ammunition resolution ahead of a reload.
//!
//! Reloading under advanced tracking needs a stack to take the round from.
//! Working out which stack is pure; asking the user for a replacement is not,
//! so this module only reports what is needed and leaves the prompt to the
//! caller.

use super::ReloadError;
use crate::config::TrackingMode;
use crate::query;
use crate::state::{ActorLoadout, ItemId, WeaponConfig};

/// What a reload needs before it can run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AmmunitionNeed {
    /// Simple tracking, or a repeating weapon fed from its magazine.
    NotRequired,
    /// The selected stack can be used as is.
    Ready(ItemId),
    /// The user has to pick a stack.
    Select(AmmunitionShortfall),
}

/// Why a replacement stack has to be selected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum AmmunitionShortfall {
    /// The weapon has no ammunition selected.
    NoneSelected,
    /// The selected stack is empty or gone.
    Exhausted,
}

impl AmmunitionShortfall {
    /// Error reported when there is nothing to choose from, or nothing was chosen.
    pub fn into_error(self, weapon: &WeaponConfig) -> ReloadError {
        let weapon = weapon.name.clone();
        match self {
            AmmunitionShortfall::NoneSelected => ReloadError::NoAmmunitionSelected { weapon },
            AmmunitionShortfall::Exhausted => ReloadError::AmmunitionExhausted { weapon },
        }
    }

    /// Text shown above the ammunition prompt.
    pub fn prompt(&self, weapon: &WeaponConfig) -> String {
        match self {
            AmmunitionShortfall::NoneSelected => format!(
                "You have no ammunition selected for your {}. Select the ammunition to load.",
                weapon.name
            ),
            AmmunitionShortfall::Exhausted => format!(
                "Your selected ammunition for your {} is empty. Select new ammunition to load.",
                weapon.name
            ),
        }
    }
}

/// Works out which stack a reload of `weapon` would consume.
///
/// Capacity weapons that are already fully loaded fail here, before any prompt
/// is shown, so a full weapon is never touched.
pub fn ammunition_need(
    loadout: &ActorLoadout,
    weapon: ItemId,
    mode: TrackingMode,
) -> Result<AmmunitionNeed, ReloadError> {
    let weapon = loadout
        .weapon(weapon)
        .ok_or(ReloadError::WeaponNotFound(weapon))?;

    if !weapon.requires_loading {
        return Err(ReloadError::NotReloadable {
            weapon: weapon.name.clone(),
        });
    }
    if mode == TrackingMode::Simple || weapon.is_repeating {
        return Ok(AmmunitionNeed::NotRequired);
    }
    if weapon.multi_round_capacity().is_some() && query::is_fully_loaded(loadout, weapon, mode) {
        return Err(ReloadError::AlreadyFullyLoaded {
            weapon: weapon.name.clone(),
        });
    }

    let Some(selected) = weapon.ammunition else {
        return Ok(AmmunitionNeed::Select(AmmunitionShortfall::NoneSelected));
    };
    match loadout.stack(selected) {
        Some(stack) if stack.has_rounds() => Ok(AmmunitionNeed::Ready(selected)),
        _ => Ok(AmmunitionNeed::Select(AmmunitionShortfall::Exhausted)),
    }
}
