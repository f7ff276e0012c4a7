//! Core state types for weapons, ammunition and per-weapon records.
mod common;
mod item;
mod record;
mod token;
mod weapon;

pub use common::{ActorId, ItemId, RecordId, SourceId, TokenId};
pub use item::{AmmunitionRef, AmmunitionStack, LoadedAmmunition};
pub use record::{
    ChamberCount, ChamberSelection, LoadedState, MagazineState, Record, RecordBody, RecordKind,
};
pub use token::SceneToken;
pub use weapon::WeaponConfig;
