//! Loadout state the rules operate on.
//!
//! This module owns the data structures that describe an actor's weapons,
//! ammunition stacks and per-weapon records. Runtime layers load an
//! [`ActorLoadout`] from the host, mutate it exclusively through the engine,
//! and persist the staged [`crate::Updates`].
pub mod types;

pub use types::{
    ActorId, AmmunitionRef, AmmunitionStack, ChamberCount, ChamberSelection, ItemId,
    LoadedAmmunition, LoadedState, MagazineState, Record, RecordBody, RecordId, RecordKind,
    SceneToken, SourceId, TokenId, WeaponConfig,
};

/// Everything the rules need to know about one actor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorLoadout {
    pub actor: ActorId,
    pub name: String,
    /// Actors with a player owner use the player tracking mode.
    #[cfg_attr(feature = "serde", serde(default))]
    pub player_owned: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub weapons: Vec<WeaponConfig>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stacks: Vec<AmmunitionStack>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub records: Vec<Record>,

    /// Sequential record id allocator (monotonically increasing).
    ///
    /// Never reused within a loadout. Ids handed out here are provisional;
    /// the host may assign its own when the batch is flushed.
    #[cfg_attr(feature = "serde", serde(default))]
    next_record_id: u32,
}

impl ActorLoadout {
    pub fn new(actor: ActorId, name: impl Into<String>) -> Self {
        Self {
            actor,
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn player_owned(mut self, player_owned: bool) -> Self {
        self.player_owned = player_owned;
        self
    }

    #[must_use]
    pub fn with_weapon(mut self, weapon: WeaponConfig) -> Self {
        self.weapons.push(weapon);
        self
    }

    #[must_use]
    pub fn with_stack(mut self, stack: AmmunitionStack) -> Self {
        self.stacks.push(stack);
        self
    }

    /// Attaches a record for `weapon`, allocating its id.
    #[must_use]
    pub fn with_record(
        mut self,
        weapon: ItemId,
        name: impl Into<String>,
        body: RecordBody,
    ) -> Self {
        let id = self.allocate_record_id();
        self.records.push(Record {
            id,
            weapon,
            name: name.into(),
            image: String::new(),
            body,
        });
        self
    }

    // ===== weapons and stacks =====

    pub fn weapon(&self, id: ItemId) -> Option<&WeaponConfig> {
        self.weapons.iter().find(|weapon| weapon.id == id)
    }

    pub fn weapon_mut(&mut self, id: ItemId) -> Option<&mut WeaponConfig> {
        self.weapons.iter_mut().find(|weapon| weapon.id == id)
    }

    pub fn stack(&self, id: ItemId) -> Option<&AmmunitionStack> {
        self.stacks.iter().find(|stack| stack.id == id)
    }

    pub fn stack_mut(&mut self, id: ItemId) -> Option<&mut AmmunitionStack> {
        self.stacks.iter_mut().find(|stack| stack.id == id)
    }

    /// Finds the stack a loaded round should return to: the stack it came
    /// from, or else any stack of the same ammunition.
    pub fn home_stack(&self, ammunition: &AmmunitionRef) -> Option<&AmmunitionStack> {
        self.stack(ammunition.id).or_else(|| {
            self.stacks
                .iter()
                .find(|stack| stack.source_id == ammunition.source_id)
        })
    }

    /// Stacks that still hold at least one round.
    pub fn available_stacks(&self) -> impl Iterator<Item = &AmmunitionStack> {
        self.stacks.iter().filter(|stack| stack.has_rounds())
    }

    /// Weapons that have to be loaded before firing.
    pub fn reloadable_weapons(&self) -> impl Iterator<Item = &WeaponConfig> {
        self.weapons.iter().filter(|weapon| weapon.requires_loading)
    }

    // ===== records =====

    pub fn record(&self, weapon: ItemId, kind: RecordKind) -> Option<&Record> {
        self.records
            .iter()
            .find(|record| record.weapon == weapon && record.kind() == kind)
    }

    pub fn loaded_state(&self, weapon: ItemId) -> Option<&LoadedState> {
        self.record(weapon, RecordKind::Loaded)
            .and_then(Record::loaded)
    }

    pub fn magazine(&self, weapon: ItemId) -> Option<&MagazineState> {
        self.record(weapon, RecordKind::Magazine)
            .and_then(Record::magazine)
    }

    pub fn chamber_selection(&self, weapon: ItemId) -> Option<&ChamberSelection> {
        self.record(weapon, RecordKind::ChamberSelection)
            .and_then(Record::chamber_selection)
    }

    pub fn has_conjured_round(&self, weapon: ItemId) -> bool {
        self.record(weapon, RecordKind::ConjuredRound).is_some()
    }

    /// Allocates the next record id.
    pub fn allocate_record_id(&mut self) -> RecordId {
        let floor = self
            .records
            .iter()
            .map(|record| record.id.0 + 1)
            .max()
            .unwrap_or(1);
        let id = self.next_record_id.max(floor);
        self.next_record_id = id + 1;
        RecordId(id)
    }

    pub(crate) fn insert_record(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Replaces the record with the same id. Returns false if none exists.
    pub(crate) fn replace_record(&mut self, record: Record) -> bool {
        match self.records.iter_mut().find(|existing| existing.id == record.id) {
            Some(existing) => {
                *existing = record;
                true
            }
            None => false,
        }
    }

    pub(crate) fn remove_record(&mut self, id: RecordId) -> Option<Record> {
        let index = self.records.iter().position(|record| record.id == id)?;
        Some(self.records.remove(index))
    }
}
