use super::{ActorId, TokenId};

/// A token placed in the active scene.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SceneToken {
    pub id: TokenId,
    pub name: String,
    pub actor: ActorId,
    /// Tokens whose actor has a player owner are skipped by batch reloads.
    #[cfg_attr(feature = "serde", serde(default))]
    pub player_owned: bool,
}

impl SceneToken {
    pub fn new(id: TokenId, name: impl Into<String>, actor: ActorId) -> Self {
        Self {
            id,
            name: name.into(),
            actor,
            player_owned: false,
        }
    }

    #[must_use]
    pub fn player_owned(mut self, player_owned: bool) -> Self {
        self.player_owned = player_owned;
        self
    }
}
