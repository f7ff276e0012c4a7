//! Per-weapon records stored on the actor.
//!
//! Records are the only persistent trace of what a weapon holds. Each record
//! belongs to exactly one weapon, and at most one record of each
//! [`RecordKind`] exists per weapon.

use super::{AmmunitionRef, ItemId, LoadedAmmunition, RecordId, SourceId};

/// Discriminant of [`RecordBody`], also the key used to look up templates.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum RecordKind {
    Loaded,
    Magazine,
    ConjuredRound,
    ChamberSelection,
}

/// A record attached to a weapon.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Record {
    pub id: RecordId,
    pub weapon: ItemId,
    /// Display name, derived from the body for loaded records.
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub image: String,
    pub body: RecordBody,
}

impl Record {
    #[inline]
    pub fn kind(&self) -> RecordKind {
        self.body.kind()
    }

    pub fn loaded(&self) -> Option<&LoadedState> {
        match &self.body {
            RecordBody::Loaded(state) => Some(state),
            _ => None,
        }
    }

    pub fn magazine(&self) -> Option<&MagazineState> {
        match &self.body {
            RecordBody::Magazine(state) => Some(state),
            _ => None,
        }
    }

    pub fn chamber_selection(&self) -> Option<&ChamberSelection> {
        match &self.body {
            RecordBody::ChamberSelection(selection) => Some(selection),
            _ => None,
        }
    }
}

/// Typed payload of a record.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RecordBody {
    Loaded(LoadedState),
    Magazine(MagazineState),
    /// A summoned round that replaces normal ammunition until fired or reloaded over.
    ConjuredRound,
    ChamberSelection(ChamberSelection),
}

impl RecordBody {
    pub fn kind(&self) -> RecordKind {
        match self {
            RecordBody::Loaded(_) => RecordKind::Loaded,
            RecordBody::Magazine(_) => RecordKind::Magazine,
            RecordBody::ConjuredRound => RecordKind::ConjuredRound,
            RecordBody::ChamberSelection(_) => RecordKind::ChamberSelection,
        }
    }
}

/// Loaded vs. total chambers of a capacity weapon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChamberCount {
    pub loaded: u8,
    pub capacity: u8,
}

impl ChamberCount {
    pub const fn new(loaded: u8, capacity: u8) -> Self {
        Self { loaded, capacity }
    }

    #[inline]
    pub const fn is_full(&self) -> bool {
        self.loaded >= self.capacity
    }
}

/// What a weapon currently holds, one variant per rules mode and weapon shape.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LoadedState {
    /// Simple tracking: presence, plus a chamber count for capacity weapons.
    Simple {
        base_name: String,
        chambers: Option<ChamberCount>,
    },
    /// Advanced tracking of a multi-round weapon.
    ///
    /// `ammunition` quantities always sum to `loaded_chambers`.
    Capacity {
        base_name: String,
        loaded_chambers: u8,
        capacity: u8,
        ammunition: Vec<LoadedAmmunition>,
    },
    /// Advanced tracking of a single-round weapon.
    Single { ammunition: AmmunitionRef },
    /// Repeating weapon ready to fire from its magazine.
    Cocked,
}

impl LoadedState {
    /// Chamber counts for multi-round weapons.
    pub fn chambers(&self) -> Option<ChamberCount> {
        match self {
            LoadedState::Simple { chambers, .. } => *chambers,
            LoadedState::Capacity {
                loaded_chambers,
                capacity,
                ..
            } => Some(ChamberCount::new(*loaded_chambers, *capacity)),
            LoadedState::Single { .. } | LoadedState::Cocked => None,
        }
    }

    /// A record without chamber counts is full by its mere existence.
    pub fn is_full(&self) -> bool {
        self.chambers().is_none_or(|count| count.is_full())
    }

    /// Returns the loaded entry for the given ammunition identity.
    pub fn entry(&self, source_id: SourceId) -> Option<&LoadedAmmunition> {
        match self {
            LoadedState::Capacity { ammunition, .. } => ammunition
                .iter()
                .find(|entry| entry.ammunition.source_id == source_id),
            _ => None,
        }
    }

    /// Ammunition identities loaded in the weapon, in loading order.
    pub fn sources(&self) -> Vec<SourceId> {
        match self {
            LoadedState::Capacity { ammunition, .. } => ammunition
                .iter()
                .map(|entry| entry.ammunition.source_id)
                .collect(),
            LoadedState::Single { ammunition } => vec![ammunition.source_id],
            LoadedState::Simple { .. } | LoadedState::Cocked => Vec::new(),
        }
    }
}

/// Magazine inserted into a repeating weapon.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MagazineState {
    pub remaining: u8,
    pub capacity: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ammunition: Option<AmmunitionRef>,
}

impl MagazineState {
    pub fn new(remaining: u8, capacity: u8) -> Self {
        Self {
            remaining,
            capacity,
            ammunition: None,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.remaining == 0
    }
}

/// Which loaded chamber of a chambered weapon fires next.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChamberSelection {
    /// `None` under simple tracking, where chambers are indistinguishable.
    pub ammunition: Option<AmmunitionRef>,
}
