//! Re-anchoring focus after the active view changes.

use crate::{ElementId, Registry, surface::Surface};

/// Bookkeeping for the most recent view change.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ViewSync {
    /// Incremented on every view change. Delayed passes from older changes
    /// are discarded.
    pub epoch: u64,
    /// Focus generation right after the latest pass committed. A delayed
    /// pass only re-anchors while the generation still matches, meaning the
    /// user has not moved focus since.
    pub generation: Option<u64>,
}

impl ViewSync {
    /// Start a new view change, returning its epoch.
    pub fn begin(&mut self) -> u64 {
        self.epoch += 1;
        self.generation = None;
        self.epoch
    }

    /// May a delayed pass act, given the current focus generation and whether
    /// focus is stale?
    pub fn may_reanchor(&self, focus_generation: u64, stale: bool) -> bool {
        stale || self.generation.is_none_or(|g| g == focus_generation)
    }
}

/// Choose where focus goes when a view becomes active: the view's designated
/// default target, else the navigation item for the view, else the
/// registry's default target.
pub fn anchor(registry: &Registry, surface: &dyn Surface, home_view: &str) -> Option<ElementId> {
    let active = surface.active_view();
    if let Some(view) = active.as_deref() {
        if let Some(id) = surface.default_focus(view)
            && registry.contains(id)
        {
            return Some(id);
        }
        if let Some(e) = registry.nav_for_view(view) {
            return Some(e.id);
        }
    }
    registry.default_target(home_view).map(|e| e.id)
}
