//! Loading transitions.
//!
//! The [`LoadingEngine`] is the only writer of an [`ActorLoadout`]. Every
//! change it makes to the loadout is mirrored into the [`Updates`] batch, so
//! later transitions in the same batch observe earlier ones and the host can
//! persist the whole batch in one flush.
//!
//! Transitions follow a check-then-stage discipline: all guards run first,
//! and only once a transition is known to succeed does it touch the loadout.

mod ammunition;
mod chamber;
mod errors;
mod fire;
mod naming;
mod reload;
mod unload;

pub use ammunition::{AmmunitionNeed, AmmunitionShortfall, ammunition_need};
pub use errors::ReloadError;
pub use fire::FireOutcome;
pub use reload::ReloadOutcome;
pub use unload::UnloadOutcome;

use crate::config::TrackingMode;
use crate::env::{RecordTemplate, RecordTemplates};
use crate::query;
use crate::state::{
    ActorLoadout, AmmunitionRef, ItemId, Record, RecordBody, RecordKind, WeaponConfig,
};
use crate::updates::Updates;

/// Applies loading transitions to one actor.
pub struct LoadingEngine<'a> {
    loadout: &'a mut ActorLoadout,
    updates: &'a mut Updates,
    templates: &'a dyn RecordTemplates,
    mode: TrackingMode,
}

impl<'a> LoadingEngine<'a> {
    pub fn new(
        loadout: &'a mut ActorLoadout,
        updates: &'a mut Updates,
        templates: &'a dyn RecordTemplates,
        mode: TrackingMode,
    ) -> Self {
        Self {
            loadout,
            updates,
            templates,
            mode,
        }
    }

    pub fn mode(&self) -> TrackingMode {
        self.mode
    }

    pub fn loadout(&self) -> &ActorLoadout {
        &*self.loadout
    }

    /// Read-only fully-loaded predicate for a weapon of this loadout.
    pub fn is_fully_loaded(&self, weapon: ItemId) -> Result<bool, ReloadError> {
        let weapon = self.weapon(weapon)?;
        Ok(query::is_fully_loaded(self.loadout(), &weapon, self.mode))
    }

    /// Makes `stack` the weapon's selected ammunition.
    ///
    /// Used when the ammunition prompt picks a replacement stack.
    pub fn select_ammunition(&mut self, weapon: ItemId, stack: ItemId) -> Result<(), ReloadError> {
        if self.loadout.stack(stack).is_none() {
            return Err(ReloadError::StackNotFound(stack));
        }
        let weapon = self
            .loadout
            .weapon_mut(weapon)
            .ok_or(ReloadError::WeaponNotFound(weapon))?;

        if weapon.ammunition != Some(stack) {
            weapon.ammunition = Some(stack);
            self.updates.select_ammunition(weapon.id, stack);
        }
        Ok(())
    }

    // ===== lookups =====

    fn weapon(&self, id: ItemId) -> Result<WeaponConfig, ReloadError> {
        self.loadout
            .weapon(id)
            .cloned()
            .ok_or(ReloadError::WeaponNotFound(id))
    }

    fn template(&self, kind: RecordKind) -> Result<RecordTemplate, ReloadError> {
        self.templates
            .template(kind)
            .ok_or(ReloadError::TemplateNotFound(kind))
    }

    fn unexpected(weapon: &WeaponConfig, record: &Record) -> ReloadError {
        ReloadError::UnexpectedRecord {
            weapon: weapon.name.clone(),
            found: record.kind().to_string(),
        }
    }

    // ===== staging primitives =====

    /// Instantiates a record from its template without staging it.
    fn instantiate(
        &mut self,
        template: RecordTemplate,
        weapon: ItemId,
        name: String,
        body: RecordBody,
    ) -> Record {
        Record {
            id: self.loadout.allocate_record_id(),
            weapon,
            name,
            image: template.image,
            body,
        }
    }

    fn create(&mut self, record: Record) {
        self.loadout.insert_record(record.clone());
        self.updates.create(record);
    }

    fn replace(&mut self, record: Record) {
        if self.loadout.replace_record(record.clone()) {
            self.updates.update(record);
        }
    }

    fn delete(&mut self, weapon: ItemId, kind: RecordKind) -> Option<Record> {
        let id = self.loadout.record(weapon, kind)?.id;
        let record = self.loadout.remove_record(id)?;
        self.updates.delete(&record);
        Some(record)
    }

    /// Takes one round from a stack. The caller has checked it is not empty.
    fn take_round(&mut self, stack: ItemId) -> Result<AmmunitionRef, ReloadError> {
        let stack = self
            .loadout
            .stack_mut(stack)
            .ok_or(ReloadError::StackNotFound(stack))?;
        stack.quantity = stack.quantity.saturating_sub(1);
        let (id, quantity, reference) = (stack.id, stack.quantity, stack.reference());
        self.updates.set_quantity(id, quantity);
        Ok(reference)
    }

    /// Puts a round back on the stack it belongs to.
    ///
    /// Returns the stack that received it, or `None` when the ammunition is
    /// no longer in the inventory and the round is discarded.
    fn restore_round(&mut self, ammunition: &AmmunitionRef) -> Option<ItemId> {
        let id = self.loadout.home_stack(ammunition)?.id;
        let stack = self.loadout.stack_mut(id)?;
        stack.quantity += 1;
        let quantity = stack.quantity;
        self.updates.set_quantity(id, quantity);
        Some(id)
    }
}
