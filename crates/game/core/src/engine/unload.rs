//! Unload transition, plus the chamber bookkeeping it shares with firing.

use super::{LoadingEngine, ReloadError, naming};
use crate::state::{
    AmmunitionRef, ChamberCount, ItemId, LoadedState, Record, RecordBody, RecordKind, WeaponConfig,
};

/// Result of unloading one round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnloadOutcome {
    pub weapon: ItemId,
    /// Ammunition taken out, when it is tracked.
    pub ammunition: Option<AmmunitionRef>,
    /// Stack the round went back to. `None` when it was discarded or untracked.
    pub restored_to: Option<ItemId>,
    /// Rounds still loaded afterwards.
    pub remaining: u8,
}

/// Entry a round is drawn from when no chamber is selected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Draw {
    /// Most recently loaded ammunition.
    Last,
    /// Earliest loaded ammunition.
    First,
}

impl LoadingEngine<'_> {
    /// Takes one round out of the weapon and returns it to its stack.
    ///
    /// Capacity weapons give up a round from the selected chamber, else the
    /// most recently loaded ammunition. Uncocking a repeating weapon leaves
    /// the round in its magazine.
    pub fn unload(&mut self, weapon: ItemId) -> Result<UnloadOutcome, ReloadError> {
        let weapon = self.weapon(weapon)?;
        let Some(state) = self.loadout.loaded_state(weapon.id).cloned() else {
            if self.delete(weapon.id, RecordKind::ConjuredRound).is_some() {
                return Ok(UnloadOutcome {
                    weapon: weapon.id,
                    ammunition: None,
                    restored_to: None,
                    remaining: 0,
                });
            }
            return Err(ReloadError::NotLoaded {
                weapon: weapon.name.clone(),
            });
        };

        let (ammunition, remaining) = match state {
            LoadedState::Capacity { .. } => {
                let (ammunition, remaining) = self.remove_round(&weapon, Draw::Last)?;
                (Some(ammunition), remaining)
            }
            LoadedState::Single { ammunition } => {
                self.delete(weapon.id, RecordKind::Loaded);
                (Some(ammunition), 0)
            }
            LoadedState::Simple {
                chambers: Some(count),
                ..
            } => (None, self.remove_simple_chamber(&weapon, count)?),
            LoadedState::Simple { chambers: None, .. } | LoadedState::Cocked => {
                self.delete(weapon.id, RecordKind::Loaded);
                (None, 0)
            }
        };

        let restored_to = ammunition
            .as_ref()
            .and_then(|ammunition| self.restore_round(ammunition));
        Ok(UnloadOutcome {
            weapon: weapon.id,
            ammunition,
            restored_to,
            remaining,
        })
    }

    /// Removes one round from an advanced capacity record.
    ///
    /// The selected chamber is used first; `draw` decides otherwise. The
    /// record is deleted once its last chamber empties, and the chamber
    /// selection moves on when its ammunition runs out.
    pub(super) fn remove_round(
        &mut self,
        weapon: &WeaponConfig,
        draw: Draw,
    ) -> Result<(AmmunitionRef, u8), ReloadError> {
        if weapon.is_capacity {
            self.template(RecordKind::ChamberSelection)?;
        }
        let record = self
            .loadout
            .record(weapon.id, RecordKind::Loaded)
            .cloned()
            .ok_or_else(|| ReloadError::NotLoaded {
                weapon: weapon.name.clone(),
            })?;
        let Some(LoadedState::Capacity {
            base_name,
            loaded_chambers,
            capacity,
            ammunition: mut entries,
        }) = record.loaded().cloned()
        else {
            return Err(Self::unexpected(weapon, &record));
        };

        let selected = self
            .loadout
            .chamber_selection(weapon.id)
            .and_then(|selection| selection.ammunition.as_ref())
            .and_then(|selected| {
                entries
                    .iter()
                    .position(|entry| entry.ammunition.source_id == selected.source_id)
            });
        let index = selected
            .or(match draw {
                Draw::Last => entries.len().checked_sub(1),
                Draw::First => (!entries.is_empty()).then_some(0),
            })
            .ok_or_else(|| ReloadError::NotLoaded {
                weapon: weapon.name.clone(),
            })?;

        let ammunition = entries[index].ammunition.clone();
        entries[index].quantity = entries[index].quantity.saturating_sub(1);
        if entries[index].quantity == 0 {
            entries.remove(index);
        }
        let remaining = loaded_chambers.saturating_sub(1);

        if remaining == 0 || entries.is_empty() {
            self.delete(weapon.id, RecordKind::Loaded);
        } else {
            let count = ChamberCount::new(remaining, capacity);
            self.replace(Record {
                name: naming::capacity(&base_name, &entries, count),
                body: RecordBody::Loaded(LoadedState::Capacity {
                    base_name,
                    loaded_chambers: remaining,
                    capacity,
                    ammunition: entries,
                }),
                ..record
            });
        }
        self.set_loaded_chamber(weapon.id, None)?;

        Ok((ammunition, remaining))
    }

    /// Empties one anonymous chamber under simple tracking.
    pub(super) fn remove_simple_chamber(
        &mut self,
        weapon: &WeaponConfig,
        count: ChamberCount,
    ) -> Result<u8, ReloadError> {
        let remaining = count.loaded.saturating_sub(1);
        if remaining == 0 {
            self.delete(weapon.id, RecordKind::Loaded);
        } else if let Some(record) = self.loadout.record(weapon.id, RecordKind::Loaded).cloned()
            && let Some(LoadedState::Simple { base_name, .. }) = record.loaded().cloned()
        {
            let count = ChamberCount::new(remaining, count.capacity);
            self.replace(Record {
                name: naming::simple_chambers(&base_name, count),
                body: RecordBody::Loaded(LoadedState::Simple {
                    base_name,
                    chambers: Some(count),
                }),
                ..record
            });
        }
        self.set_loaded_chamber(weapon.id, None)?;
        Ok(remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrackingMode;
    use crate::engine::fixtures::*;
    use crate::state::{ActorId, ActorLoadout, LoadedAmmunition};
    use crate::updates::{Mutation, Updates};

    fn run<T>(
        loadout: &mut ActorLoadout,
        mode: TrackingMode,
        f: impl FnOnce(&mut LoadingEngine<'_>) -> T,
    ) -> (T, Updates) {
        let templates = templates();
        let mut updates = Updates::new(ActorId(1));
        let result = f(&mut LoadingEngine::new(loadout, &mut updates, &templates, mode));
        (result, updates)
    }

    fn stack_total(loadout: &ActorLoadout) -> u32 {
        loadout.stacks.iter().map(|stack| stack.quantity).sum()
    }

    fn loaded_rounds(loadout: &ActorLoadout, weapon: ItemId) -> u32 {
        match loadout.loaded_state(weapon) {
            Some(LoadedState::Capacity { loaded_chambers, .. }) => u32::from(*loaded_chambers),
            Some(LoadedState::Single { .. }) => 1,
            _ => 0,
        }
    }

    #[test]
    fn nothing_loaded_is_a_warning() {
        let mut loadout = gunner().with_weapon(WeaponConfig::new(PISTOL, "Pistol"));
        let (result, updates) = run(&mut loadout, TrackingMode::Advanced, |engine| {
            engine.unload(PISTOL)
        });
        assert!(matches!(result, Err(ReloadError::NotLoaded { .. })));
        assert!(updates.is_empty());
    }

    #[test]
    fn reload_then_unload_restores_stack() {
        let mut loadout = gunner()
            .with_weapon(WeaponConfig::new(PISTOL, "Pistol").with_ammunition(ROUNDS))
            .with_stack(rounds(3));

        let (outcome, updates) = run(&mut loadout, TrackingMode::Advanced, |engine| {
            engine.reload(PISTOL, None).unwrap();
            engine.unload(PISTOL)
        });

        let outcome = outcome.unwrap();
        assert_eq!(outcome.restored_to, Some(ROUNDS));
        assert!(loadout.records.is_empty());
        assert_eq!(loadout.stack(ROUNDS).unwrap().quantity, 3);
        // the create and delete cancel out; only the quantity remains
        assert_eq!(
            updates.mutations(),
            &[Mutation::SetQuantity {
                stack: ROUNDS,
                quantity: 3,
            }]
        );
    }

    #[test]
    fn capacity_unload_takes_most_recent_ammunition() {
        let mut loadout = gunner()
            .with_weapon(
                WeaponConfig::new(DOUBLE_BARREL, "Double Barrel")
                    .with_capacity(4)
                    .with_ammunition(ROUNDS),
            )
            .with_stack(rounds(4));
        run(&mut loadout, TrackingMode::Advanced, |engine| {
            engine.reload(DOUBLE_BARREL, None).unwrap();
            engine.reload(DOUBLE_BARREL, None).unwrap();
        });

        let (outcome, _) = run(&mut loadout, TrackingMode::Advanced, |engine| {
            engine.unload(DOUBLE_BARREL)
        });

        assert_eq!(outcome.unwrap().remaining, 1);
        assert_eq!(
            loadout.record(DOUBLE_BARREL, RecordKind::Loaded).unwrap().name,
            "Loaded (Round) (1/4)"
        );
        assert_eq!(loadout.stack(ROUNDS).unwrap().quantity, 3);
    }

    #[test]
    fn chambered_unload_prefers_selected_chamber() {
        let mut loadout = gunner()
            .with_weapon(
                WeaponConfig::new(REVOLVER, "Revolver")
                    .chambered(6)
                    .with_ammunition(ROUNDS),
            )
            .with_stack(rounds(4))
            .with_stack(silver(4));
        run(&mut loadout, TrackingMode::Advanced, |engine| {
            engine.reload(REVOLVER, None).unwrap();
            engine.reload(REVOLVER, Some(SILVER)).unwrap();
        });

        let (outcome, _) = run(&mut loadout, TrackingMode::Advanced, |engine| {
            engine.unload(REVOLVER)
        });
        let outcome = outcome.unwrap();

        assert_eq!(outcome.ammunition.map(|a| a.name), Some("Round".to_string()));
        assert_eq!(
            loadout.loaded_state(REVOLVER).and_then(|state| state.entry(SILVER_SOURCE)),
            Some(&LoadedAmmunition {
                ammunition: silver(4).reference(),
                quantity: 1,
            })
        );
        // the selected ammunition ran out, so the selection follows what is left
        let selection = loadout.chamber_selection(REVOLVER).unwrap();
        assert_eq!(
            selection.ammunition.as_ref().map(|a| a.source_id),
            Some(SILVER_SOURCE)
        );
    }

    #[test]
    fn last_chamber_unload_clears_selection() {
        let mut loadout = gunner()
            .with_weapon(
                WeaponConfig::new(REVOLVER, "Revolver")
                    .chambered(6)
                    .with_ammunition(ROUNDS),
            )
            .with_stack(rounds(4));
        run(&mut loadout, TrackingMode::Advanced, |engine| {
            engine.reload(REVOLVER, None).unwrap();
        });
        run(&mut loadout, TrackingMode::Advanced, |engine| {
            engine.unload(REVOLVER).unwrap();
        });

        assert!(loadout.records.is_empty());
        assert_eq!(loadout.stack(ROUNDS).unwrap().quantity, 4);
    }

    #[test]
    fn simple_unload_leaves_stacks_alone() {
        let mut loadout = gunner()
            .with_weapon(WeaponConfig::new(REVOLVER, "Revolver").chambered(3))
            .with_stack(rounds(4));
        run(&mut loadout, TrackingMode::Simple, |engine| {
            engine.reload(REVOLVER, None).unwrap();
            engine.reload(REVOLVER, None).unwrap();
        });

        let (outcome, _) = run(&mut loadout, TrackingMode::Simple, |engine| {
            engine.unload(REVOLVER)
        });

        assert_eq!(outcome.unwrap().remaining, 1);
        assert_eq!(loadout.record(REVOLVER, RecordKind::Loaded).unwrap().name, "Loaded (1/3)");
        assert_eq!(loadout.stack(ROUNDS).unwrap().quantity, 4);
    }

    #[test]
    fn unload_of_removed_stack_discards_round() {
        let mut loadout = gunner()
            .with_weapon(WeaponConfig::new(PISTOL, "Pistol").with_ammunition(ROUNDS))
            .with_stack(rounds(1));
        run(&mut loadout, TrackingMode::Advanced, |engine| {
            engine.reload(PISTOL, None).unwrap();
        });
        loadout.stacks.clear();

        let (outcome, _) = run(&mut loadout, TrackingMode::Advanced, |engine| {
            engine.unload(PISTOL)
        });
        assert_eq!(outcome.unwrap().restored_to, None);
        assert!(loadout.records.is_empty());
    }

    #[test]
    fn rounds_are_conserved_across_reloads_and_unloads() {
        let mut loadout = gunner()
            .with_weapon(
                WeaponConfig::new(REVOLVER, "Revolver")
                    .chambered(4)
                    .with_ammunition(ROUNDS),
            )
            .with_stack(rounds(3))
            .with_stack(silver(3));
        let total = stack_total(&loadout);

        for step in 0..10 {
            let (result, updates) = run(&mut loadout, TrackingMode::Advanced, |engine| {
                match step % 3 {
                    0 => engine.reload(REVOLVER, Some(ROUNDS)).map(|_| ()),
                    1 => engine.reload(REVOLVER, Some(SILVER)).map(|_| ()),
                    _ => engine.unload(REVOLVER).map(|_| ()),
                }
            });
            if let Err(error) = result {
                assert!(
                    matches!(
                        error,
                        ReloadError::AlreadyFullyLoaded { .. }
                            | ReloadError::AmmunitionExhausted { .. }
                            | ReloadError::NotLoaded { .. }
                    ),
                    "step {step}: {error:?}"
                );
                assert!(updates.is_empty());
            }

            assert_eq!(stack_total(&loadout) + loaded_rounds(&loadout, REVOLVER), total);
            if let Some(LoadedState::Capacity {
                loaded_chambers,
                capacity,
                ammunition,
                ..
            }) = loadout.loaded_state(REVOLVER)
            {
                let sum: u8 = ammunition.iter().map(|entry| entry.quantity).sum();
                assert_eq!(sum, *loaded_chambers);
                assert!(*loaded_chambers >= 1 && loaded_chambers <= capacity);
            }
        }
    }
}
