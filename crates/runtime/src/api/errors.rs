//! Unified error types surfaced by the runtime API.
//!
//! Wraps rule failures from the loading engine and failures reported by host
//! collaborators so callers can decide, by severity, whether to show a
//! warning or abort.

use thiserror::Error;

use ammo_core::{ErrorSeverity, ReloadError, RuleError};

use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Reload(#[from] ReloadError),

    /// A host collaborator (store, prompt, scene) failed.
    #[error("collaborator failed: {0}")]
    Collaborator(String),

    #[error("content error: {0}")]
    Content(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("runtime requires an actor store to be configured before building")]
    MissingStore,
}

impl RuntimeError {
    pub fn collaborator(message: impl Into<String>) -> Self {
        Self::Collaborator(message.into())
    }

    /// Fatal errors abort batch reloads; everything else is contained per weapon.
    pub fn is_fatal(&self) -> bool {
        self.severity() == ErrorSeverity::Fatal
    }
}

impl RuleError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::Reload(error) => error.severity(),
            RuntimeError::Collaborator(_) | RuntimeError::Repository(_) => {
                ErrorSeverity::Internal
            }
            RuntimeError::Content(_) | RuntimeError::MissingStore => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::Reload(error) => error.error_code(),
            RuntimeError::Collaborator(_) => "RUNTIME_COLLABORATOR",
            RuntimeError::Content(_) => "RUNTIME_CONTENT",
            RuntimeError::Repository(_) => "RUNTIME_REPOSITORY",
            RuntimeError::MissingStore => "RUNTIME_MISSING_STORE",
        }
    }
}
