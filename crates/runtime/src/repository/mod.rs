//! Repository layer for actor loadouts.
//!
//! Repositories hold the data a reload CHANGES: actor loadouts and the
//! batches flushed against them. Record templates and rules are static
//! content and come from `ammo-content`.

mod error;
mod memory;

pub use error::RepositoryError;
pub use memory::InMemoryActorStore;
