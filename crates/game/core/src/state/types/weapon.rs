use super::ItemId;

/// Reload semantics of a ranged weapon.
///
/// Read-only for the duration of an operation; the only field an action may
/// change is the selected `ammunition`, and that change is staged like any
/// other mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponConfig {
    pub id: ItemId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default = "default_true"))]
    pub requires_loading: bool,
    /// Number of rounds held. `None` for single-round weapons.
    #[cfg_attr(feature = "serde", serde(default))]
    pub capacity: Option<u8>,
    /// Fed from a magazine; reloading only cocks the weapon.
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_repeating: bool,
    /// Chambers are loaded independently and fired through a selected chamber.
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_capacity: bool,
    /// Actions needed to reload once.
    #[cfg_attr(feature = "serde", serde(default = "default_reload_actions"))]
    pub reload_actions: u8,
    /// Currently selected ammunition stack.
    #[cfg_attr(feature = "serde", serde(default))]
    pub ammunition: Option<ItemId>,
}

#[cfg(feature = "serde")]
fn default_true() -> bool {
    true
}

#[cfg(feature = "serde")]
fn default_reload_actions() -> u8 {
    1
}

impl WeaponConfig {
    /// Creates a single-round weapon that requires loading with one action.
    pub fn new(id: ItemId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            requires_loading: true,
            capacity: None,
            is_repeating: false,
            is_capacity: false,
            reload_actions: 1,
            ammunition: None,
        }
    }

    #[must_use]
    pub fn with_capacity(mut self, capacity: u8) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Marks the weapon as chambered (capacity trait).
    #[must_use]
    pub fn chambered(mut self, capacity: u8) -> Self {
        self.capacity = Some(capacity);
        self.is_capacity = true;
        self
    }

    #[must_use]
    pub fn repeating(mut self) -> Self {
        self.is_repeating = true;
        self
    }

    #[must_use]
    pub fn with_reload_actions(mut self, actions: u8) -> Self {
        self.reload_actions = actions;
        self
    }

    #[must_use]
    pub fn with_ammunition(mut self, stack: ItemId) -> Self {
        self.ammunition = Some(stack);
        self
    }

    #[must_use]
    pub fn without_loading(mut self) -> Self {
        self.requires_loading = false;
        self
    }

    /// Returns the capacity when one is set and non-zero.
    ///
    /// A capacity of 1 still counts, so such a weapon loads through chamber
    /// counts rather than as a plain single-round weapon.
    #[inline]
    pub fn multi_round_capacity(&self) -> Option<u8> {
        self.capacity.filter(|capacity| *capacity > 0)
    }
}
