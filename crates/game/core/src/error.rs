//! Common error infrastructure for ammo-core.
//!
//! Domain errors (e.g. [`crate::ReloadError`]) are defined beside the
//! transitions that raise them. This module holds the shared classification
//! used by callers to decide whether a failure is a user-facing warning or a
//! programming fault.
//!
//! # Design Principles
//!
//! - **Checks before staging**: every warning is raised before any mutation
//!   for the weapon is staged, so a failed action leaves the loadout untouched
//! - **Severity Classification**: warnings are recoverable or validation
//!   failures; only internal and fatal errors should abort a batch

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the action was a no-op (already loaded, empty magazine)
/// - **Validation**: the request itself was wrong (weapon cannot be reloaded)
/// - **Internal**: the loadout references something that does not exist
/// - **Fatal**: host data required by the rules is missing (record templates)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The action did nothing; the user may retry after changing state.
    ///
    /// Examples: weapon already fully loaded, magazine empty
    Recoverable,

    /// Invalid input, should not retry without changes.
    ///
    /// Examples: weapon does not require loading, chamber not loaded
    Validation,

    /// Unexpected state inconsistency.
    ///
    /// Examples: selected ammunition stack id not in the inventory
    Internal,

    /// Cannot continue.
    ///
    /// Examples: record template missing from the host
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error should be shown to the user as a warning.
    pub const fn is_warning(&self) -> bool {
        matches!(self, Self::Recoverable | Self::Validation)
    }

    /// Returns true if this error indicates a bug or broken host data.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all ammo-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait RuleError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }

    /// Shorthand for `self.severity().is_warning()`.
    fn is_warning(&self) -> bool {
        self.severity().is_warning()
    }
}
