//! Hook registry for running reload hooks.

use std::sync::Arc;

use ammo_core::{ReloadError, Updates};
use tracing::{debug, error};

use super::{HookCriticality, ReloadContext, ReloadHook};

/// Registry that runs reload hooks in priority order.
#[derive(Clone, Default)]
pub struct HookRegistry {
    hooks: Arc<[Arc<dyn ReloadHook>]>,
}

impl HookRegistry {
    /// Creates a registry; hooks are sorted by priority (lower values first).
    pub fn new(mut hooks: Vec<Arc<dyn ReloadHook>>) -> Self {
        hooks.sort_by_key(|hook| hook.priority());
        Self {
            hooks: hooks.into(),
        }
    }

    /// Runs every hook against the reload.
    ///
    /// Returns the first critical failure; other failures are logged.
    pub fn run(&self, ctx: &ReloadContext<'_>, updates: &mut Updates) -> Result<(), ReloadError> {
        for hook in self.hooks.iter() {
            if let Err(e) = hook.on_reload(ctx, updates) {
                self.handle_hook_error(hook.as_ref(), e)?;
            }
        }
        Ok(())
    }

    /// Returns the number of hooks.
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Returns true if no hooks are registered.
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Returns an iterator over hook names and priorities (for debugging).
    pub fn hooks(&self) -> impl Iterator<Item = (&'static str, i32)> + '_ {
        self.hooks.iter().map(|h| (h.name(), h.priority()))
    }

    fn handle_hook_error(
        &self,
        hook: &dyn ReloadHook,
        error: ReloadError,
    ) -> Result<(), ReloadError> {
        match hook.criticality() {
            HookCriticality::Critical => {
                error!(
                    target: "runtime::hooks",
                    hook = hook.name(),
                    criticality = "critical",
                    error = %error,
                    "Critical hook failed, aborting reload"
                );
                Err(error)
            }
            HookCriticality::Important => {
                error!(
                    target: "runtime::hooks",
                    hook = hook.name(),
                    criticality = "important",
                    error = %error,
                    "Hook failed, continuing"
                );
                Ok(())
            }
            HookCriticality::Optional => {
                debug!(
                    target: "runtime::hooks",
                    hook = hook.name(),
                    criticality = "optional",
                    error = %error,
                    "Optional hook failed"
                );
                Ok(())
            }
        }
    }
}
