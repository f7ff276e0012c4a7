//! Pending-update batch.
//!
//! A single logical action (one reload, or reloading every NPC weapon) can
//! touch many records. [`Updates`] accumulates those changes as typed
//! [`Mutation`]s plus transient [`Notification`]s so the host can apply them in
//! one flush. Accumulation is pure; flushing is the caller's side effect.
//!
//! Staging collapses follow-up edits to the same target: updating a record
//! created earlier in the batch rewrites the create, deleting it drops both,
//! and repeated quantity changes keep only the last value.

use crate::state::{ActorId, ActorLoadout, ItemId, Record, RecordId, RecordKind, WeaponConfig};

/// Image shown with reload chat messages.
pub const RELOAD_IMAGE: &str = "icons/ammunition/reload.webp";

/// A single persisted change.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mutation {
    Create(Record),
    /// Full replacement of the record with the same id.
    Update(Record),
    Delete {
        id: RecordId,
        weapon: ItemId,
        kind: RecordKind,
    },
    SetQuantity {
        stack: ItemId,
        quantity: u32,
    },
    SelectAmmunition {
        weapon: ItemId,
        stack: ItemId,
    },
}

impl Mutation {
    /// Replays this mutation onto a host-side copy of the loadout.
    ///
    /// Mutations that target something the copy no longer holds are skipped.
    pub fn apply(&self, loadout: &mut ActorLoadout) {
        match self {
            Mutation::Create(record) => {
                if !loadout.replace_record(record.clone()) {
                    loadout.insert_record(record.clone());
                }
            }
            Mutation::Update(record) => {
                loadout.replace_record(record.clone());
            }
            Mutation::Delete { id, .. } => {
                loadout.remove_record(*id);
            }
            Mutation::SetQuantity { stack, quantity } => {
                if let Some(stack) = loadout.stack_mut(*stack) {
                    stack.quantity = *quantity;
                }
            }
            Mutation::SelectAmmunition { weapon, stack } => {
                if let Some(weapon) = loadout.weapon_mut(*weapon) {
                    weapon.ammunition = Some(*stack);
                }
            }
        }
    }
}

/// Transient feedback that is shown, not persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Notification {
    FloatyText { text: String, highlight: bool },
    Chat(ChatMessage),
}

/// A chat card describing an action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChatMessage {
    pub image: String,
    pub description: String,
    /// Action label, e.g. `Interact`.
    pub action: String,
    /// Action cost glyph; blank for variable costs.
    pub cost: String,
}

impl ChatMessage {
    /// Builds the card posted after a reload.
    ///
    /// Costs above `cost_limit` are not a fixed number of actions and are
    /// rendered blank.
    pub fn reload(
        token_name: &str,
        weapon: &WeaponConfig,
        ammunition: Option<&str>,
        cost_limit: u8,
    ) -> Self {
        let description = match ammunition {
            Some(ammunition) => format!(
                "{token_name} reloads their {} with {ammunition}.",
                weapon.name
            ),
            None => format!("{token_name} reloads their {}.", weapon.name),
        };
        let cost = if weapon.reload_actions <= cost_limit {
            weapon.reload_actions.to_string()
        } else {
            String::new()
        };

        Self {
            image: RELOAD_IMAGE.to_string(),
            description,
            action: "Interact".to_string(),
            cost,
        }
    }
}

/// Accumulated changes for one actor.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Updates {
    actor: ActorId,
    mutations: Vec<Mutation>,
    notifications: Vec<Notification>,
}

impl Updates {
    pub fn new(actor: ActorId) -> Self {
        Self {
            actor,
            mutations: Vec::new(),
            notifications: Vec::new(),
        }
    }

    pub fn actor(&self) -> ActorId {
        self.actor
    }

    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Returns true if nothing would be written or shown.
    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty() && self.notifications.is_empty()
    }

    pub fn has_mutations(&self) -> bool {
        !self.mutations.is_empty()
    }

    /// Applies every staged mutation to `loadout`, in order.
    pub fn apply_to(&self, loadout: &mut ActorLoadout) {
        for mutation in &self.mutations {
            mutation.apply(loadout);
        }
    }

    pub fn into_parts(self) -> (ActorId, Vec<Mutation>, Vec<Notification>) {
        (self.actor, self.mutations, self.notifications)
    }

    // ===== staging =====

    pub fn create(&mut self, record: Record) {
        self.mutations.push(Mutation::Create(record));
    }

    pub fn update(&mut self, record: Record) {
        for mutation in self.mutations.iter_mut() {
            match mutation {
                Mutation::Create(existing) | Mutation::Update(existing)
                    if existing.id == record.id =>
                {
                    *existing = record;
                    return;
                }
                _ => {}
            }
        }
        self.mutations.push(Mutation::Update(record));
    }

    pub fn delete(&mut self, record: &Record) {
        let created_here = self
            .mutations
            .iter()
            .any(|mutation| {
                matches!(mutation, Mutation::Create(existing) if existing.id == record.id)
            });

        self.mutations.retain(|mutation| {
            !matches!(
                mutation,
                Mutation::Create(existing) | Mutation::Update(existing) if existing.id == record.id
            )
        });

        if !created_here {
            self.mutations.push(Mutation::Delete {
                id: record.id,
                weapon: record.weapon,
                kind: record.kind(),
            });
        }
    }

    pub fn set_quantity(&mut self, stack: ItemId, quantity: u32) {
        for mutation in self.mutations.iter_mut() {
            if let Mutation::SetQuantity {
                stack: existing,
                quantity: value,
            } = mutation
                && *existing == stack
            {
                *value = quantity;
                return;
            }
        }
        self.mutations.push(Mutation::SetQuantity { stack, quantity });
    }

    pub fn select_ammunition(&mut self, weapon: ItemId, stack: ItemId) {
        for mutation in self.mutations.iter_mut() {
            if let Mutation::SelectAmmunition {
                weapon: existing,
                stack: selected,
            } = mutation
                && *existing == weapon
            {
                *selected = stack;
                return;
            }
        }
        self.mutations
            .push(Mutation::SelectAmmunition { weapon, stack });
    }

    pub fn floaty_text(&mut self, text: impl Into<String>, highlight: bool) {
        self.notifications.push(Notification::FloatyText {
            text: text.into(),
            highlight,
        });
    }

    pub fn chat(&mut self, message: ChatMessage) {
        self.notifications.push(Notification::Chat(message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{LoadedState, RecordBody};

    fn record(id: u32, name: &str) -> Record {
        Record {
            id: RecordId(id),
            weapon: ItemId(1),
            name: name.to_string(),
            image: String::new(),
            body: RecordBody::Loaded(LoadedState::Cocked),
        }
    }

    #[test]
    fn update_of_created_record_rewrites_create() {
        let mut updates = Updates::new(ActorId(1));
        updates.create(record(5, "Loaded"));
        updates.update(record(5, "Loaded (2/3)"));

        assert_eq!(updates.mutations(), &[Mutation::Create(record(5, "Loaded (2/3)"))]);
    }

    #[test]
    fn delete_of_created_record_drops_everything() {
        let mut updates = Updates::new(ActorId(1));
        updates.create(record(5, "Loaded"));
        updates.update(record(5, "Loaded (2/3)"));
        updates.delete(&record(5, "Loaded (2/3)"));

        assert!(updates.is_empty());
    }

    #[test]
    fn delete_of_existing_record_is_staged() {
        let mut updates = Updates::new(ActorId(1));
        updates.update(record(3, "Loaded (1/3)"));
        updates.delete(&record(3, "Loaded (1/3)"));

        assert_eq!(
            updates.mutations(),
            &[Mutation::Delete {
                id: RecordId(3),
                weapon: ItemId(1),
                kind: RecordKind::Loaded,
            }]
        );
    }

    #[test]
    fn quantity_keeps_last_value() {
        let mut updates = Updates::new(ActorId(1));
        updates.set_quantity(ItemId(9), 4);
        updates.set_quantity(ItemId(9), 3);

        assert_eq!(
            updates.mutations(),
            &[Mutation::SetQuantity {
                stack: ItemId(9),
                quantity: 3,
            }]
        );
    }

    #[test]
    fn replaying_a_batch_reproduces_engine_state() {
        use crate::config::TrackingMode;
        use crate::engine::LoadingEngine;
        use crate::engine::fixtures::*;

        let templates = templates();
        let before = gunner()
            .with_weapon(
                WeaponConfig::new(REVOLVER, "Revolver")
                    .chambered(6)
                    .with_ammunition(ROUNDS),
            )
            .with_weapon(WeaponConfig::new(PISTOL, "Pistol"))
            .with_stack(rounds(4))
            .with_stack(silver(4));
        let mut after = before.clone();
        let mut updates = Updates::new(ActorId(1));
        {
            let mut engine =
                LoadingEngine::new(&mut after, &mut updates, &templates, TrackingMode::Advanced);
            engine.reload(REVOLVER, None).unwrap();
            engine.reload(REVOLVER, Some(SILVER)).unwrap();
            engine.select_ammunition(PISTOL, SILVER).unwrap();
            engine.reload(PISTOL, None).unwrap();
            engine.unload(REVOLVER).unwrap();
        }

        let mut replayed = before;
        updates.apply_to(&mut replayed);

        assert_eq!(replayed.records, after.records);
        assert_eq!(replayed.stacks, after.stacks);
        assert_eq!(replayed.weapons, after.weapons);
    }

    #[test]
    fn reload_chat_hides_variable_cost() {
        let weapon = WeaponConfig::new(ItemId(1), "Arquebus").with_reload_actions(4);
        let message = ChatMessage::reload("Guard", &weapon, Some("Round"), 3);

        assert_eq!(message.description, "Guard reloads their Arquebus with Round.");
        assert_eq!(message.cost, "");

        let weapon = WeaponConfig::new(ItemId(1), "Crossbow");
        let message = ChatMessage::reload("Guard", &weapon, None, 3);
        assert_eq!(message.description, "Guard reloads their Crossbow.");
        assert_eq!(message.cost, "1");
    }
}
