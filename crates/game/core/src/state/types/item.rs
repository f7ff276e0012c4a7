//! Ammunition item types.
//!
//! - AmmunitionStack: a consumable stack in the actor's inventory
//! - AmmunitionRef: the identity of ammunition copied into a loaded record
//! - LoadedAmmunition: an ammunition identity plus how many chambers hold it

use super::{ItemId, SourceId};

/// A consumable ammunition stack owned by the actor's inventory.
///
/// The rules never create or destroy stacks; they only move `quantity`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AmmunitionStack {
    pub id: ItemId,
    pub source_id: SourceId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub image: String,
    pub quantity: u32,
}

impl AmmunitionStack {
    pub fn new(id: ItemId, source_id: SourceId, name: impl Into<String>, quantity: u32) -> Self {
        Self {
            id,
            source_id,
            name: name.into(),
            image: String::new(),
            quantity,
        }
    }

    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Returns true when at least one round can be taken from the stack.
    #[inline]
    pub fn has_rounds(&self) -> bool {
        self.quantity > 0
    }

    /// Identity of this ammunition as it is recorded in a loaded weapon.
    pub fn reference(&self) -> AmmunitionRef {
        AmmunitionRef {
            id: self.id,
            source_id: self.source_id,
            name: self.name.clone(),
            image: self.image.clone(),
        }
    }
}

/// Ammunition identity carried by loaded records.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AmmunitionRef {
    /// Stack the round was taken from (may no longer exist).
    pub id: ItemId,
    pub source_id: SourceId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub image: String,
}

/// One ammunition type loaded into some number of chambers.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadedAmmunition {
    pub ammunition: AmmunitionRef,
    pub quantity: u8,
}

impl LoadedAmmunition {
    pub fn one(ammunition: AmmunitionRef) -> Self {
        Self {
            ammunition,
            quantity: 1,
        }
    }
}
