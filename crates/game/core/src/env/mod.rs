//! Traits describing read-only host data.
//!
//! The rules need blank record templates (display name and image) to
//! instantiate new records. The host provides them through
//! [`RecordTemplates`], so the engine does not couple to any concrete store.
mod templates;

pub use templates::{RecordTemplate, RecordTemplates, StaticTemplates};
