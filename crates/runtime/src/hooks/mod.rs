//! Reload hook system.
//!
//! Hooks let feat-like behaviour react to a successful reload without the
//! rules knowing about it. Each hook receives the reload context and may stage
//! further changes into the same batch, so its side effects are flushed
//! together with the reload itself.
//!
//! # Architecture
//!
//! - Hooks are registered in the `ReloaderBuilder` and sorted by priority
//! - After each successful reload, hooks run in priority order
//! - A failing critical hook rolls the whole weapon reload back

mod context;
mod registry;

pub use context::ReloadContext;
pub use registry::HookRegistry;

use ammo_core::{ReloadError, Updates};

/// Defines the criticality level of a hook for error handling.
///
/// - Critical hooks must succeed or the reload fails
/// - Important hooks log errors but allow continuation
/// - Optional hooks can fail silently
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookCriticality {
    /// Hook failure fails the reload; everything it staged is discarded.
    Critical,

    /// Hook failure is logged as an error and the reload stands.
    Important,

    /// Hook failure is logged at debug level.
    Optional,
}

/// Side effect run after a weapon is reloaded.
///
/// Hooks are sorted by priority (lower values execute first).
pub trait ReloadHook: Send + Sync {
    /// Returns a human-readable name for this hook (used in logging).
    fn name(&self) -> &'static str;

    fn priority(&self) -> i32 {
        0
    }

    fn criticality(&self) -> HookCriticality {
        HookCriticality::Important
    }

    /// Stages the hook's side effects into `updates`.
    fn on_reload(&self, ctx: &ReloadContext<'_>, updates: &mut Updates) -> Result<(), ReloadError>;
}
