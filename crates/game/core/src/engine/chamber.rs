//! Chamber selection for chambered weapons.
//!
//! A chambered weapon fires through one selected chamber. The selection is a
//! separate record so that it survives partial reloads; it only ever points
//! at ammunition the weapon actually holds.

use super::{LoadingEngine, ReloadError, naming};
use crate::state::{
    AmmunitionRef, ChamberSelection, ItemId, LoadedState, Record, RecordBody, RecordKind, SourceId,
};

impl LoadingEngine<'_> {
    /// Reconciles the chamber selection with what the weapon holds.
    ///
    /// An existing selection that still points at loaded ammunition is kept.
    /// Otherwise `preferred` is selected when it is loaded, else the first
    /// loaded entry. Simple tracking selects an anonymous chamber, and an
    /// empty weapon loses its selection.
    pub(super) fn set_loaded_chamber(
        &mut self,
        weapon: ItemId,
        preferred: Option<&AmmunitionRef>,
    ) -> Result<(), ReloadError> {
        let weapon = self.weapon(weapon)?;
        if !weapon.is_capacity {
            return Ok(());
        }

        let Some(state) = self.loadout.loaded_state(weapon.id) else {
            self.delete(weapon.id, RecordKind::ChamberSelection);
            return Ok(());
        };

        let LoadedState::Capacity { ammunition, .. } = state else {
            if self.loadout.chamber_selection(weapon.id).is_none() {
                self.write_selection(weapon.id, None)?;
            }
            return Ok(());
        };

        let current = self
            .loadout
            .chamber_selection(weapon.id)
            .and_then(|selection| selection.ammunition.as_ref())
            .map(|selected| selected.source_id);
        if current.is_some_and(|source| state.entry(source).is_some()) {
            return Ok(());
        }

        let chosen = preferred
            .and_then(|preferred| state.entry(preferred.source_id))
            .or_else(|| ammunition.first())
            .map(|entry| entry.ammunition.clone());
        self.write_selection(weapon.id, chosen)
    }

    /// Switches the chamber that fires next to one holding `source` ammunition.
    pub fn select_chamber(
        &mut self,
        weapon: ItemId,
        source: SourceId,
    ) -> Result<AmmunitionRef, ReloadError> {
        let weapon = self.weapon(weapon)?;
        let entry = self
            .loadout
            .loaded_state(weapon.id)
            .filter(|_| weapon.is_capacity)
            .and_then(|state| state.entry(source))
            .map(|entry| entry.ammunition.clone());

        let Some(ammunition) = entry else {
            let ammunition = self
                .loadout
                .stacks
                .iter()
                .find(|stack| stack.source_id == source)
                .map(|stack| stack.name.clone())
                .unwrap_or_else(|| source.to_string());
            return Err(ReloadError::ChamberNotLoaded {
                weapon: weapon.name.clone(),
                ammunition,
            });
        };

        let unchanged = self
            .loadout
            .chamber_selection(weapon.id)
            .and_then(|selection| selection.ammunition.as_ref())
            .is_some_and(|selected| selected.source_id == source);
        if !unchanged {
            self.write_selection(weapon.id, Some(ammunition.clone()))?;
        }
        Ok(ammunition)
    }

    fn write_selection(
        &mut self,
        weapon: ItemId,
        ammunition: Option<AmmunitionRef>,
    ) -> Result<(), ReloadError> {
        let template = self.template(RecordKind::ChamberSelection)?;
        let name = naming::with_ammunition(&template.name, ammunition.as_ref());
        let body = RecordBody::ChamberSelection(ChamberSelection { ammunition });

        match self.loadout.record(weapon, RecordKind::ChamberSelection).cloned() {
            Some(existing) => self.replace(Record {
                name,
                body,
                ..existing
            }),
            None => {
                let record = self.instantiate(template, weapon, name, body);
                self.create(record);
            }
        }
        Ok(())
    }
}
