//! Data-driven content and loaders.
//!
//! This crate reads the files a reload session is configured from:
//! - Rules configuration (TOML): which actors get advanced ammunition tracking
//! - Record templates (RON): names and images of freshly created records
//! - Scenarios (RON): actor loadouts and the tokens placed in the scene
//!
//! All loaders deserialize ammo-core types directly through serde.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, Scenario, ScenarioLoader, TemplateLoader};
