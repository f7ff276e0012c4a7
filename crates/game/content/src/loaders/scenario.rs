//! Scenario loader: actor loadouts plus the tokens placed in the scene.

use std::path::Path;

use ammo_core::{ActorId, ActorLoadout, SceneToken};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Scenario structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub actors: Vec<ActorLoadout>,
    #[serde(default)]
    pub tokens: Vec<SceneToken>,
}

impl Scenario {
    pub fn actor(&self, id: ActorId) -> Option<&ActorLoadout> {
        self.actors.iter().find(|actor| actor.actor == id)
    }

    /// Tokens whose actor has no player owner.
    pub fn npc_tokens(&self) -> impl Iterator<Item = &SceneToken> {
        self.tokens.iter().filter(|token| !token.player_owned)
    }

    fn validate(&self) -> LoadResult<()> {
        for token in &self.tokens {
            if self.actor(token.actor).is_none() {
                anyhow::bail!(
                    "Token '{}' ({}) references unknown {}",
                    token.name,
                    token.id,
                    token.actor
                );
            }
        }
        Ok(())
    }
}

/// Loader for scenarios from RON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    /// Load a scenario from a RON file.
    ///
    /// Every token must reference an actor defined in the same file.
    pub fn load(path: &Path) -> LoadResult<Scenario> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Scenario> {
        let scenario: Scenario = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))?;
        scenario.validate()?;
        Ok(scenario)
    }
}
