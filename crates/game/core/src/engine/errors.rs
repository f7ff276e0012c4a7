//! Errors raised by loading transitions.

use crate::error::{ErrorSeverity, RuleError};
use crate::state::{ItemId, RecordKind};

/// Errors surfaced while reloading, unloading or firing a weapon.
///
/// Every warning variant is raised before anything is staged for the weapon,
/// so a failed transition leaves both the loadout and the batch untouched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReloadError {
    /// No weapon satisfied the caller's predicate.
    #[error("{message}")]
    NoWeaponAvailable { message: String },

    #[error("{weapon} does not need to be loaded.")]
    NotReloadable { weapon: String },

    #[error("{weapon} has no magazine loaded!")]
    NoMagazine { weapon: String },

    #[error("{weapon}'s magazine is empty!")]
    EmptyMagazine { weapon: String },

    #[error("{weapon} is already loaded.")]
    AlreadyLoaded { weapon: String },

    #[error("{weapon} is already fully loaded.")]
    AlreadyFullyLoaded { weapon: String },

    #[error("{weapon} is already loaded with {ammunition}.")]
    AlreadyLoadedSame { weapon: String, ammunition: String },

    #[error("You have no equipped ammunition compatible with {weapon}.")]
    NoAmmunitionSelected { weapon: String },

    #[error("Not enough ammunition to reload {weapon}.")]
    AmmunitionExhausted { weapon: String },

    /// The ammunition prompt was dismissed.
    #[error("No ammunition was chosen for {weapon}.")]
    AmmunitionDeclined { weapon: String },

    #[error("{weapon} is not loaded.")]
    NotLoaded { weapon: String },

    #[error("{weapon} has no chamber loaded with {ammunition}.")]
    ChamberNotLoaded { weapon: String, ammunition: String },

    #[error("weapon {0} not found")]
    WeaponNotFound(ItemId),

    #[error("ammunition stack {0} not found")]
    StackNotFound(ItemId),

    /// A record exists but its shape belongs to the other tracking mode.
    #[error("{weapon} holds a {found} record that cannot be used here")]
    UnexpectedRecord { weapon: String, found: String },

    #[error("record template '{0}' not found")]
    TemplateNotFound(RecordKind),
}

impl RuleError for ReloadError {
    fn severity(&self) -> ErrorSeverity {
        use ReloadError::*;
        match self {
            NoMagazine { .. } | EmptyMagazine { .. } => ErrorSeverity::Recoverable,
            AlreadyLoaded { .. } | AlreadyFullyLoaded { .. } | AlreadyLoadedSame { .. } => {
                ErrorSeverity::Recoverable
            }
            NoAmmunitionSelected { .. }
            | AmmunitionExhausted { .. }
            | AmmunitionDeclined { .. }
            | NotLoaded { .. } => ErrorSeverity::Recoverable,
            NoWeaponAvailable { .. } | NotReloadable { .. } | ChamberNotLoaded { .. } => {
                ErrorSeverity::Validation
            }
            WeaponNotFound(_) | StackNotFound(_) | UnexpectedRecord { .. } => {
                ErrorSeverity::Internal
            }
            TemplateNotFound(_) => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        use ReloadError::*;
        match self {
            NoWeaponAvailable { .. } => "RELOAD_NO_WEAPON_AVAILABLE",
            NotReloadable { .. } => "RELOAD_NOT_RELOADABLE",
            NoMagazine { .. } => "RELOAD_NO_MAGAZINE",
            EmptyMagazine { .. } => "RELOAD_EMPTY_MAGAZINE",
            AlreadyLoaded { .. } => "RELOAD_ALREADY_LOADED",
            AlreadyFullyLoaded { .. } => "RELOAD_ALREADY_FULLY_LOADED",
            AlreadyLoadedSame { .. } => "RELOAD_ALREADY_LOADED_SAME",
            NoAmmunitionSelected { .. } => "RELOAD_NO_AMMUNITION_SELECTED",
            AmmunitionExhausted { .. } => "RELOAD_AMMUNITION_EXHAUSTED",
            AmmunitionDeclined { .. } => "RELOAD_AMMUNITION_DECLINED",
            NotLoaded { .. } => "RELOAD_NOT_LOADED",
            ChamberNotLoaded { .. } => "RELOAD_CHAMBER_NOT_LOADED",
            WeaponNotFound(_) => "RELOAD_WEAPON_NOT_FOUND",
            StackNotFound(_) => "RELOAD_STACK_NOT_FOUND",
            UnexpectedRecord { .. } => "RELOAD_UNEXPECTED_RECORD",
            TemplateNotFound(_) => "RELOAD_TEMPLATE_NOT_FOUND",
        }
    }
}
