//! Firing consumes the round a reload put in place.

use super::unload::Draw;
use super::{LoadingEngine, ReloadError};
use crate::config::TrackingMode;
use crate::state::{AmmunitionRef, ItemId, LoadedState, Record, RecordBody, RecordKind};

/// Result of firing one round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FireOutcome {
    pub weapon: ItemId,
    /// Ammunition fired, when it is tracked.
    pub ammunition: Option<AmmunitionRef>,
    /// A conjured round was fired instead of loaded ammunition.
    pub conjured: bool,
    /// Rounds left in the weapon, or in the magazine for repeating weapons.
    pub remaining: u8,
}

impl LoadingEngine<'_> {
    /// Consumes one loaded round.
    pub fn fire(&mut self, weapon: ItemId) -> Result<FireOutcome, ReloadError> {
        let weapon = self.weapon(weapon)?;
        if !weapon.requires_loading {
            return Err(ReloadError::NotReloadable {
                weapon: weapon.name.clone(),
            });
        }

        if self.delete(weapon.id, RecordKind::ConjuredRound).is_some() {
            let remaining = self
                .loadout
                .loaded_state(weapon.id)
                .map(|state| state.chambers().map_or(1, |count| count.loaded))
                .unwrap_or(0);
            return Ok(FireOutcome {
                weapon: weapon.id,
                ammunition: None,
                conjured: true,
                remaining,
            });
        }

        let not_loaded = || ReloadError::NotLoaded {
            weapon: weapon.name.clone(),
        };
        let state = self
            .loadout
            .loaded_state(weapon.id)
            .cloned()
            .ok_or_else(not_loaded)?;

        let (ammunition, remaining) = match state {
            LoadedState::Cocked if self.mode == TrackingMode::Advanced => {
                let magazine = self
                    .loadout
                    .record(weapon.id, RecordKind::Magazine)
                    .cloned()
                    .ok_or_else(|| ReloadError::NoMagazine {
                        weapon: weapon.name.clone(),
                    })?;
                let Some(mut state) = magazine.magazine().cloned() else {
                    return Err(Self::unexpected(&weapon, &magazine));
                };
                if state.is_empty() {
                    return Err(ReloadError::EmptyMagazine {
                        weapon: weapon.name.clone(),
                    });
                }

                state.remaining -= 1;
                let (ammunition, remaining) = (state.ammunition.clone(), state.remaining);
                self.replace(Record {
                    body: RecordBody::Magazine(state),
                    ..magazine
                });
                self.delete(weapon.id, RecordKind::Loaded);
                (ammunition, remaining)
            }
            LoadedState::Capacity { .. } => {
                let (ammunition, remaining) = self.remove_round(&weapon, Draw::First)?;
                (Some(ammunition), remaining)
            }
            LoadedState::Simple {
                chambers: Some(count),
                ..
            } => (None, self.remove_simple_chamber(&weapon, count)?),
            LoadedState::Single { ammunition } => {
                self.delete(weapon.id, RecordKind::Loaded);
                (Some(ammunition), 0)
            }
            LoadedState::Simple { chambers: None, .. } | LoadedState::Cocked => {
                self.delete(weapon.id, RecordKind::Loaded);
                (None, 0)
            }
        };

        Ok(FireOutcome {
            weapon: weapon.id,
            ammunition,
            conjured: false,
            remaining,
        })
    }
}
