//! Content factory for loading everything a reload session needs.

use std::path::{Path, PathBuf};

use ammo_core::{RulesConfig, StaticTemplates};

use crate::loaders::{ConfigLoader, LoadResult, Scenario, ScenarioLoader, TemplateLoader};

/// Content factory that loads reload content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── rules.toml
/// ├── templates.ron
/// └── scenarios/
///     └── ambush.ron
/// ```
///
/// `rules.toml` and `templates.ron` are optional; defaults apply when absent.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load rules configuration from `rules.toml`.
    pub fn load_rules(&self) -> LoadResult<RulesConfig> {
        let path = self.data_dir.join("rules.toml");
        if !path.exists() {
            return Ok(RulesConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load record templates from `templates.ron`.
    pub fn load_templates(&self) -> LoadResult<StaticTemplates> {
        let path = self.data_dir.join("templates.ron");
        if !path.exists() {
            return Ok(StaticTemplates::defaults());
        }
        TemplateLoader::load(&path)
    }

    /// Load `scenarios/<name>.ron`.
    pub fn load_scenario(&self, name: &str) -> LoadResult<Scenario> {
        let path = self.data_dir.join("scenarios").join(format!("{name}.ron"));
        ScenarioLoader::load(&path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn missing_optional_files_use_defaults() {
        let dir = TempDir::new().unwrap();
        let factory = ContentFactory::new(dir.path());

        assert_eq!(factory.load_rules().unwrap(), RulesConfig::default());
        assert_eq!(factory.load_templates().unwrap(), StaticTemplates::defaults());
        assert!(factory.load_scenario("missing").is_err());
    }
}
