//! Reload transition.

use super::{LoadingEngine, ReloadError, naming};
use crate::config::TrackingMode;
use crate::state::{
    AmmunitionRef, AmmunitionStack, ChamberCount, ItemId, LoadedAmmunition, LoadedState, Record,
    RecordBody, RecordKind, WeaponConfig,
};

/// Result of a successful reload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReloadOutcome {
    pub weapon: ItemId,
    /// Ammunition that went into the weapon. `None` under simple tracking and
    /// for repeating weapons, whose rounds stay in the magazine.
    pub ammunition: Option<AmmunitionRef>,
    /// Chamber counts after loading, for capacity weapons.
    pub chambers: Option<ChamberCount>,
}

impl ReloadOutcome {
    fn new(weapon: ItemId) -> Self {
        Self {
            weapon,
            ammunition: None,
            chambers: None,
        }
    }

    fn with_ammunition(mut self, ammunition: AmmunitionRef) -> Self {
        self.ammunition = Some(ammunition);
        self
    }

    fn with_chambers(mut self, chambers: ChamberCount) -> Self {
        self.chambers = Some(chambers);
        self
    }

    /// Name of the loaded ammunition, as shown in chat.
    pub fn ammunition_name(&self) -> Option<&str> {
        self.ammunition.as_ref().map(|ammunition| ammunition.name.as_str())
    }
}

impl LoadingEngine<'_> {
    /// Loads one round (or cocks a repeating weapon).
    ///
    /// Under advanced tracking the round is taken from `ammunition`, falling
    /// back to the weapon's selected stack. Callers that want to prompt for a
    /// replacement resolve it with [`super::ammunition_need`] first.
    pub fn reload(
        &mut self,
        weapon: ItemId,
        ammunition: Option<ItemId>,
    ) -> Result<ReloadOutcome, ReloadError> {
        let weapon = self.weapon(weapon)?;
        if !weapon.requires_loading {
            return Err(ReloadError::NotReloadable {
                weapon: weapon.name.clone(),
            });
        }

        match self.mode {
            TrackingMode::Simple => self.load_simple(&weapon),
            TrackingMode::Advanced if weapon.is_repeating => self.cock(&weapon),
            TrackingMode::Advanced => {
                let stack = self.loadable_stack(&weapon, ammunition)?;
                match weapon.multi_round_capacity() {
                    Some(capacity) => self.load_chamber(&weapon, capacity, stack),
                    None => self.load_single(&weapon, stack),
                }
            }
        }
    }

    fn loadable_stack(
        &self,
        weapon: &WeaponConfig,
        ammunition: Option<ItemId>,
    ) -> Result<AmmunitionStack, ReloadError> {
        let id = ammunition
            .or(weapon.ammunition)
            .ok_or_else(|| ReloadError::NoAmmunitionSelected {
                weapon: weapon.name.clone(),
            })?;
        self.loadout
            .stack(id)
            .filter(|stack| stack.has_rounds())
            .cloned()
            .ok_or_else(|| ReloadError::AmmunitionExhausted {
                weapon: weapon.name.clone(),
            })
    }

    /// Advanced repeating weapon: readies the next round from the magazine.
    fn cock(&mut self, weapon: &WeaponConfig) -> Result<ReloadOutcome, ReloadError> {
        let magazine = self
            .loadout
            .magazine(weapon.id)
            .ok_or_else(|| ReloadError::NoMagazine {
                weapon: weapon.name.clone(),
            })?;
        if magazine.is_empty() {
            return Err(ReloadError::EmptyMagazine {
                weapon: weapon.name.clone(),
            });
        }

        if let Some(record) = self.loadout.record(weapon.id, RecordKind::Loaded) {
            return match record.loaded() {
                Some(LoadedState::Cocked) => Err(ReloadError::AlreadyLoaded {
                    weapon: weapon.name.clone(),
                }),
                _ => Err(Self::unexpected(weapon, record)),
            };
        }

        let template = self.template(RecordKind::Loaded)?;
        let name = template.name.clone();
        let record = self.instantiate(
            template,
            weapon.id,
            name,
            RecordBody::Loaded(LoadedState::Cocked),
        );
        self.create(record);

        Ok(ReloadOutcome::new(weapon.id))
    }

    /// Advanced capacity weapon: loads one more chamber.
    fn load_chamber(
        &mut self,
        weapon: &WeaponConfig,
        capacity: u8,
        stack: AmmunitionStack,
    ) -> Result<ReloadOutcome, ReloadError> {
        let ammunition = stack.reference();
        let template = self.template(RecordKind::Loaded)?;
        if weapon.is_capacity {
            self.template(RecordKind::ChamberSelection)?;
        }

        let (record, base_name, count) = match self.loadout.record(weapon.id, RecordKind::Loaded) {
            Some(existing) => {
                let Some(LoadedState::Capacity {
                    base_name,
                    loaded_chambers,
                    capacity,
                    ammunition: mut entries,
                }) = existing.loaded().cloned()
                else {
                    return Err(Self::unexpected(weapon, existing));
                };

                if ChamberCount::new(loaded_chambers, capacity).is_full() {
                    return Err(ReloadError::AlreadyFullyLoaded {
                        weapon: weapon.name.clone(),
                    });
                }
                match entries
                    .iter_mut()
                    .find(|entry| entry.ammunition.source_id == ammunition.source_id)
                {
                    Some(entry) => entry.quantity += 1,
                    None => entries.push(LoadedAmmunition::one(ammunition.clone())),
                }
                let count = ChamberCount::new(loaded_chambers + 1, capacity);
                let record = Record {
                    name: naming::capacity(&base_name, &entries, count),
                    body: RecordBody::Loaded(LoadedState::Capacity {
                        base_name: base_name.clone(),
                        loaded_chambers: count.loaded,
                        capacity,
                        ammunition: entries,
                    }),
                    ..existing.clone()
                };
                (Some(record), base_name, count)
            }
            None => (None, template.name.clone(), ChamberCount::new(1, capacity)),
        };

        match record {
            Some(record) => {
                self.replace(record);
                self.updates
                    .floaty_text(naming::capacity_floaty(&base_name, &ammunition, count), true);
            }
            None => {
                let entries = vec![LoadedAmmunition::one(ammunition.clone())];
                let name = naming::capacity(&base_name, &entries, count);
                let body = RecordBody::Loaded(LoadedState::Capacity {
                    base_name: base_name.clone(),
                    loaded_chambers: count.loaded,
                    capacity: count.capacity,
                    ammunition: entries,
                });
                let record = self.instantiate(template, weapon.id, name, body);
                self.create(record);
            }
        }

        if weapon.is_capacity {
            self.set_loaded_chamber(weapon.id, Some(&ammunition))?;
        }
        self.take_round(stack.id)?;

        Ok(ReloadOutcome::new(weapon.id)
            .with_ammunition(ammunition)
            .with_chambers(count))
    }

    /// Advanced single-round weapon: swaps in a round of the chosen ammunition.
    ///
    /// A conjured round is dismissed rather than unloaded. A round of a
    /// different ammunition is unloaded back to its stack first.
    fn load_single(
        &mut self,
        weapon: &WeaponConfig,
        stack: AmmunitionStack,
    ) -> Result<ReloadOutcome, ReloadError> {
        let ammunition = stack.reference();
        let template = self.template(RecordKind::Loaded)?;
        let conjured = self.loadout.has_conjured_round(weapon.id);

        let loaded = match self.loadout.record(weapon.id, RecordKind::Loaded) {
            Some(record) => match record.loaded() {
                Some(LoadedState::Single { ammunition: loaded }) => {
                    if !conjured && loaded.source_id == ammunition.source_id {
                        return Err(ReloadError::AlreadyLoadedSame {
                            weapon: weapon.name.clone(),
                            ammunition: ammunition.name.clone(),
                        });
                    }
                    true
                }
                _ => return Err(Self::unexpected(weapon, record)),
            },
            None => false,
        };

        if conjured {
            self.delete(weapon.id, RecordKind::ConjuredRound);
        }
        if loaded {
            self.unload(weapon.id)?;
        }

        let name = naming::with_ammunition(&template.name, Some(&ammunition));
        let body = RecordBody::Loaded(LoadedState::Single {
            ammunition: ammunition.clone(),
        });
        let record = self.instantiate(template, weapon.id, name, body);
        self.create(record);
        self.take_round(stack.id)?;

        Ok(ReloadOutcome::new(weapon.id).with_ammunition(ammunition))
    }

    /// Simple tracking: presence for single-round weapons, a chamber count otherwise.
    fn load_simple(&mut self, weapon: &WeaponConfig) -> Result<ReloadOutcome, ReloadError> {
        let template = self.template(RecordKind::Loaded)?;
        let existing = self.loadout.record(weapon.id, RecordKind::Loaded).cloned();

        let Some(capacity) = weapon.multi_round_capacity() else {
            if existing.is_some() {
                return Err(ReloadError::AlreadyLoaded {
                    weapon: weapon.name.clone(),
                });
            }
            let name = template.name.clone();
            let body = RecordBody::Loaded(LoadedState::Simple {
                base_name: name.clone(),
                chambers: None,
            });
            let record = self.instantiate(template, weapon.id, name, body);
            self.create(record);
            return Ok(ReloadOutcome::new(weapon.id));
        };

        if weapon.is_capacity {
            self.template(RecordKind::ChamberSelection)?;
        }

        let (base_name, count) = match &existing {
            Some(record) => match record.loaded() {
                Some(LoadedState::Simple {
                    chambers: Some(chambers),
                    ..
                }) if chambers.is_full() => {
                    return Err(ReloadError::AlreadyFullyLoaded {
                        weapon: weapon.name.clone(),
                    });
                }
                Some(LoadedState::Simple {
                    base_name,
                    chambers: Some(chambers),
                }) => (
                    base_name.clone(),
                    ChamberCount::new(chambers.loaded + 1, chambers.capacity),
                ),
                Some(LoadedState::Simple { chambers: None, .. }) => {
                    return Err(ReloadError::AlreadyLoaded {
                        weapon: weapon.name.clone(),
                    });
                }
                _ => return Err(Self::unexpected(weapon, record)),
            },
            None => (template.name.clone(), ChamberCount::new(1, capacity)),
        };

        let name = naming::simple_chambers(&base_name, count);
        let body = RecordBody::Loaded(LoadedState::Simple {
            base_name,
            chambers: Some(count),
        });
        match existing {
            Some(record) => {
                self.replace(Record {
                    name: name.clone(),
                    body,
                    ..record
                });
                self.updates.floaty_text(name, true);
            }
            None => {
                let record = self.instantiate(template, weapon.id, name, body);
                self.create(record);
            }
        }

        if weapon.is_capacity {
            self.set_loaded_chamber(weapon.id, None)?;
        }

        Ok(ReloadOutcome::new(weapon.id).with_chambers(count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fixtures::*;
    use crate::state::{ActorId, MagazineState};
    use crate::updates::{Mutation, Notification, Updates};

    fn engine_run<T>(
        loadout: &mut crate::state::ActorLoadout,
        mode: TrackingMode,
        f: impl FnOnce(&mut LoadingEngine<'_>) -> T,
    ) -> (T, Updates) {
        let templates = templates();
        let mut updates = Updates::new(ActorId(1));
        let result = {
            let mut engine = LoadingEngine::new(loadout, &mut updates, &templates, mode);
            f(&mut engine)
        };
        (result, updates)
    }

    #[test]
    fn simple_capacity_weapon_counts_chambers() {
        let mut loadout = gunner()
            .with_weapon(WeaponConfig::new(DOUBLE_BARREL, "Double Barrel").with_capacity(2));

        let (outcome, updates) = engine_run(&mut loadout, TrackingMode::Simple, |engine| {
            engine.reload(DOUBLE_BARREL, None)
        });
        assert_eq!(outcome.unwrap().chambers, Some(ChamberCount::new(1, 2)));
        assert_eq!(loadout.records[0].name, "Loaded (1/2)");
        assert!(matches!(
            &updates.mutations()[0],
            Mutation::Create(record) if record.name == "Loaded (1/2)"
        ));
        assert!(updates.notifications().is_empty());

        let (_, updates) = engine_run(&mut loadout, TrackingMode::Simple, |engine| {
            engine.reload(DOUBLE_BARREL, None).unwrap()
        });
        assert_eq!(loadout.records[0].name, "Loaded (2/2)");
        assert!(matches!(
            &updates.mutations()[0],
            Mutation::Update(record) if record.name == "Loaded (2/2)"
        ));
        assert_eq!(
            updates.notifications(),
            &[Notification::FloatyText {
                text: "Loaded (2/2)".into(),
                highlight: true,
            }]
        );

        let (result, updates) = engine_run(&mut loadout, TrackingMode::Simple, |engine| {
            engine.reload(DOUBLE_BARREL, None)
        });
        assert!(matches!(result, Err(ReloadError::AlreadyFullyLoaded { .. })));
        assert!(updates.is_empty());
    }

    #[test]
    fn simple_single_round_weapon_is_presence_only() {
        let mut loadout = gunner().with_weapon(WeaponConfig::new(PISTOL, "Pistol"));

        let (outcome, _) = engine_run(&mut loadout, TrackingMode::Simple, |engine| {
            engine.reload(PISTOL, None)
        });
        assert_eq!(outcome, Ok(ReloadOutcome::new(PISTOL)));

        let (result, updates) = engine_run(&mut loadout, TrackingMode::Simple, |engine| {
            engine.reload(PISTOL, None)
        });
        assert!(matches!(result, Err(ReloadError::AlreadyLoaded { .. })));
        assert!(updates.is_empty());
        assert_eq!(loadout.records.len(), 1);
    }

    #[test]
    fn advanced_single_round_weapon_takes_from_stack() {
        let mut loadout = gunner()
            .player_owned(true)
            .with_weapon(WeaponConfig::new(PISTOL, "Pistol").with_ammunition(ROUNDS))
            .with_stack(rounds(5));

        let (outcome, updates) = engine_run(&mut loadout, TrackingMode::Advanced, |engine| {
            engine.reload(PISTOL, None)
        });
        let outcome = outcome.unwrap();
        assert_eq!(outcome.ammunition_name(), Some("Round"));
        assert_eq!(loadout.stack(ROUNDS).unwrap().quantity, 4);
        assert_eq!(loadout.records[0].name, "Loaded (Round)");
        assert!(updates.mutations().contains(&Mutation::SetQuantity {
            stack: ROUNDS,
            quantity: 4,
        }));

        let (result, updates) = engine_run(&mut loadout, TrackingMode::Advanced, |engine| {
            engine.reload(PISTOL, None)
        });
        assert!(matches!(result, Err(ReloadError::AlreadyLoadedSame { .. })));
        assert!(updates.is_empty());
        assert_eq!(loadout.stack(ROUNDS).unwrap().quantity, 4);
    }

    #[test]
    fn switching_ammunition_unloads_previous_round() {
        let mut loadout = gunner()
            .with_weapon(WeaponConfig::new(PISTOL, "Pistol").with_ammunition(ROUNDS))
            .with_stack(rounds(5))
            .with_stack(silver(2));

        engine_run(&mut loadout, TrackingMode::Advanced, |engine| {
            engine.reload(PISTOL, None).unwrap()
        });
        let (outcome, _) = engine_run(&mut loadout, TrackingMode::Advanced, |engine| {
            engine.reload(PISTOL, Some(SILVER))
        });

        assert_eq!(outcome.unwrap().ammunition_name(), Some("Silver Round"));
        assert_eq!(loadout.stack(ROUNDS).unwrap().quantity, 5);
        assert_eq!(loadout.stack(SILVER).unwrap().quantity, 1);
        assert_eq!(loadout.records.len(), 1);
        assert_eq!(loadout.records[0].name, "Loaded (Silver Round)");
    }

    #[test]
    fn conjured_round_is_dismissed_without_unloading() {
        let mut loadout = gunner()
            .with_weapon(WeaponConfig::new(PISTOL, "Pistol").with_ammunition(ROUNDS))
            .with_stack(rounds(3))
            .with_record(PISTOL, "Conjured Round", RecordBody::ConjuredRound);

        let (outcome, updates) = engine_run(&mut loadout, TrackingMode::Advanced, |engine| {
            engine.reload(PISTOL, None)
        });

        assert!(outcome.is_ok());
        assert!(!loadout.has_conjured_round(PISTOL));
        assert!(matches!(
            loadout.loaded_state(PISTOL),
            Some(LoadedState::Single { .. })
        ));
        assert!(updates.mutations().iter().any(|mutation| matches!(
            mutation,
            Mutation::Delete {
                kind: RecordKind::ConjuredRound,
                ..
            }
        )));
        assert_eq!(loadout.stack(ROUNDS).unwrap().quantity, 2);
    }

    #[test]
    fn advanced_capacity_weapon_tracks_each_ammunition() {
        let mut loadout = gunner()
            .with_weapon(
                WeaponConfig::new(REVOLVER, "Revolver")
                    .chambered(3)
                    .with_ammunition(ROUNDS),
            )
            .with_stack(rounds(5))
            .with_stack(silver(5));

        for _ in 0..2 {
            engine_run(&mut loadout, TrackingMode::Advanced, |engine| {
                engine.reload(REVOLVER, None).unwrap()
            });
        }
        let (outcome, updates) = engine_run(&mut loadout, TrackingMode::Advanced, |engine| {
            engine.reload(REVOLVER, Some(SILVER))
        });

        assert_eq!(outcome.unwrap().chambers, Some(ChamberCount::new(3, 3)));
        assert_eq!(
            loadout.record(REVOLVER, RecordKind::Loaded).unwrap().name,
            "Loaded (2 Round, 1 Silver Round) (3/3)"
        );
        assert_eq!(
            updates.notifications(),
            &[Notification::FloatyText {
                text: "Loaded Silver Round 3/3".into(),
                highlight: true,
            }]
        );
        // the first loaded chamber stays selected
        let selection = loadout.chamber_selection(REVOLVER).unwrap();
        assert_eq!(
            selection.ammunition.as_ref().map(|a| a.source_id),
            Some(ROUND_SOURCE)
        );
        assert_eq!(loadout.stack(ROUNDS).unwrap().quantity, 3);
        assert_eq!(loadout.stack(SILVER).unwrap().quantity, 4);

        let (result, updates) = engine_run(&mut loadout, TrackingMode::Advanced, |engine| {
            engine.reload(REVOLVER, None)
        });
        assert!(matches!(result, Err(ReloadError::AlreadyFullyLoaded { .. })));
        assert!(updates.is_empty());
    }

    #[test]
    fn multi_round_weapon_appends_second_ammunition() {
        let mut loadout = gunner()
            .with_weapon(
                WeaponConfig::new(DOUBLE_BARREL, "Double Barrel")
                    .with_capacity(2)
                    .with_ammunition(ROUNDS),
            )
            .with_stack(rounds(5))
            .with_stack(silver(5));

        let (_, updates) = engine_run(&mut loadout, TrackingMode::Advanced, |engine| {
            engine.reload(DOUBLE_BARREL, None).unwrap()
        });
        assert!(updates.notifications().is_empty());

        let (outcome, updates) = engine_run(&mut loadout, TrackingMode::Advanced, |engine| {
            engine.reload(DOUBLE_BARREL, Some(SILVER))
        });

        assert_eq!(outcome.unwrap().chambers, Some(ChamberCount::new(2, 2)));
        assert_eq!(
            loadout.record(DOUBLE_BARREL, RecordKind::Loaded).unwrap().name,
            "Loaded (1 Round, 1 Silver Round) (2/2)"
        );
        assert_eq!(
            updates.notifications(),
            &[Notification::FloatyText {
                text: "Loaded Silver Round 2/2".into(),
                highlight: true,
            }]
        );
        assert_eq!(loadout.stack(ROUNDS).unwrap().quantity, 4);
        assert_eq!(loadout.stack(SILVER).unwrap().quantity, 4);
        assert!(loadout.chamber_selection(DOUBLE_BARREL).is_none());
    }

    #[test]
    fn repeating_weapon_cocks_from_magazine() {
        let magazine = MagazineState::new(0, 8);
        let mut loadout = gunner()
            .with_weapon(WeaponConfig::new(REPEATER, "Repeater").with_capacity(8).repeating())
            .with_record(REPEATER, "Magazine Loaded", RecordBody::Magazine(magazine));

        let (result, _) = engine_run(&mut loadout, TrackingMode::Advanced, |engine| {
            engine.reload(REPEATER, None)
        });
        assert!(matches!(result, Err(ReloadError::EmptyMagazine { .. })));

        let mut loadout = gunner()
            .with_weapon(
                WeaponConfig::new(REPEATER, "Repeater")
                    .with_capacity(8)
                    .repeating(),
            )
            .with_record(
                REPEATER,
                "Magazine Loaded",
                RecordBody::Magazine(MagazineState::new(8, 8)),
            );
        let (result, updates) = engine_run(&mut loadout, TrackingMode::Advanced, |engine| {
            engine.reload(REPEATER, None)
        });
        assert!(result.is_ok());
        assert_eq!(loadout.loaded_state(REPEATER), Some(&LoadedState::Cocked));
        assert_eq!(updates.mutations().len(), 1);

        let (result, _) = engine_run(&mut loadout, TrackingMode::Advanced, |engine| {
            engine.reload(REPEATER, None)
        });
        assert!(matches!(result, Err(ReloadError::AlreadyLoaded { .. })));
    }

    #[test]
    fn repeating_weapon_without_magazine_fails() {
        let mut loadout = gunner().with_weapon(WeaponConfig::new(REPEATER, "Repeater").repeating());
        let (result, updates) = engine_run(&mut loadout, TrackingMode::Advanced, |engine| {
            engine.reload(REPEATER, None)
        });
        assert!(matches!(result, Err(ReloadError::NoMagazine { .. })));
        assert!(updates.is_empty());
    }

    #[test]
    fn exhausted_stack_is_rejected_without_mutation() {
        let mut loadout = gunner()
            .with_weapon(WeaponConfig::new(PISTOL, "Pistol").with_ammunition(ROUNDS))
            .with_stack(rounds(0));
        let (result, updates) = engine_run(&mut loadout, TrackingMode::Advanced, |engine| {
            engine.reload(PISTOL, None)
        });
        assert!(matches!(result, Err(ReloadError::AmmunitionExhausted { .. })));
        assert!(updates.is_empty());
        assert!(loadout.records.is_empty());
    }

    #[test]
    fn simple_chambered_weapon_selects_anonymous_chamber() {
        let mut loadout =
            gunner().with_weapon(WeaponConfig::new(REVOLVER, "Revolver").chambered(6));
        engine_run(&mut loadout, TrackingMode::Simple, |engine| {
            engine.reload(REVOLVER, None).unwrap()
        });

        let selection = loadout.chamber_selection(REVOLVER).unwrap();
        assert_eq!(selection.ammunition, None);
    }
}
