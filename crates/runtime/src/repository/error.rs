//! Error types raised by repository implementations.

use ammo_core::ActorId;
use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("actor store lock was poisoned")]
    LockPoisoned,

    #[error("{0} not found in store")]
    ActorNotFound(ActorId),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
