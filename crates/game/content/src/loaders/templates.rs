//! Record template loader.

use std::path::Path;

use ammo_core::StaticTemplates;

use crate::loaders::{LoadResult, read_file};

/// Loader for record templates from RON files.
///
/// The file maps record kinds to their template:
///
/// ```text
/// {
///     loaded: (name: "Loaded", image: "icons/loaded.webp"),
///     chamber_selection: (name: "Chamber Loaded"),
/// }
/// ```
///
/// Kinds the file leaves out keep their stock template.
pub struct TemplateLoader;

impl TemplateLoader {
    pub fn load(path: &Path) -> LoadResult<StaticTemplates> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<StaticTemplates> {
        let overrides: StaticTemplates = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse record templates RON: {}", e))?;

        let mut templates = StaticTemplates::defaults();
        for (kind, template) in overrides.iter() {
            templates.insert(kind, template.clone());
        }
        Ok(templates)
    }
}
