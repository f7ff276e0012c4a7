use std::collections::BTreeMap;

use crate::state::RecordKind;

/// Source of blank records for each [`RecordKind`].
pub trait RecordTemplates: Send + Sync {
    fn template(&self, kind: RecordKind) -> Option<RecordTemplate>;
}

/// Display data copied into a freshly created record.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecordTemplate {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub image: String,
}

impl RecordTemplate {
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
        }
    }
}

/// In-memory template table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StaticTemplates {
    templates: BTreeMap<RecordKind, RecordTemplate>,
}

impl StaticTemplates {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock names used when the host does not override them.
    pub fn defaults() -> Self {
        Self::new()
            .with(
                RecordKind::Loaded,
                RecordTemplate::new("Loaded", "icons/ammunition/loaded.webp"),
            )
            .with(
                RecordKind::Magazine,
                RecordTemplate::new("Magazine Loaded", "icons/ammunition/magazine.webp"),
            )
            .with(
                RecordKind::ConjuredRound,
                RecordTemplate::new("Conjured Round", "icons/ammunition/conjured.webp"),
            )
            .with(
                RecordKind::ChamberSelection,
                RecordTemplate::new("Chamber Loaded", "icons/ammunition/chamber.webp"),
            )
    }

    #[must_use]
    pub fn with(mut self, kind: RecordKind, template: RecordTemplate) -> Self {
        self.templates.insert(kind, template);
        self
    }

    pub fn insert(&mut self, kind: RecordKind, template: RecordTemplate) {
        self.templates.insert(kind, template);
    }

    pub fn iter(&self) -> impl Iterator<Item = (RecordKind, &RecordTemplate)> {
        self.templates.iter().map(|(kind, template)| (*kind, template))
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl RecordTemplates for StaticTemplates {
    fn template(&self, kind: RecordKind) -> Option<RecordTemplate> {
        self.templates.get(&kind).cloned()
    }
}
