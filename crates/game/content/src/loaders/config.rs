//! Rules configuration loader.

use std::path::Path;

use ammo_core::RulesConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for rules configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load rules configuration from a TOML file.
    ///
    /// Missing keys fall back to [`RulesConfig::default`].
    pub fn load(path: &Path) -> LoadResult<RulesConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<RulesConfig> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse rules TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ammo_core::{AmmunitionTracking, TrackingMode};

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse("[tracking]\nnpcs = true\n").unwrap();

        assert_eq!(
            config.tracking,
            AmmunitionTracking {
                players: true,
                npcs: true,
            }
        );
        assert_eq!(config.chat_cost_limit, RulesConfig::DEFAULT_CHAT_COST_LIMIT);
        assert_eq!(config.mode_for(false), TrackingMode::Advanced);
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("rules.toml");
        std::fs::write(&path, "chat_cost_limit = 2\n[tracking]\nplayers = false\n").unwrap();

        let config = ConfigLoader::load(&path).unwrap();
        assert_eq!(config.chat_cost_limit, 2);
        assert_eq!(config.mode_for(true), TrackingMode::Simple);
    }

    #[test]
    fn missing_file_names_the_path() {
        let error = ConfigLoader::load(Path::new("/nonexistent/rules.toml")).unwrap_err();
        assert!(error.to_string().contains("/nonexistent/rules.toml"));
    }
}
