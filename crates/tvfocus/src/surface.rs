//! The seams between the engine and its collaborators.
//!
//! The view layer implements [`Surface`]: it enumerates elements and renders
//! focus state. The application shell implements [`Shell`]: it receives
//! activation and back notifications. The engine never stores either; they
//! are passed into each call by whoever owns the session.

use std::fmt;

use crate::{Candidate, ElementClass, ElementId, error::Result};

/// The view layer, as seen by the focus engine.
pub trait Surface {
    /// Enumerate the elements of `class` currently in the tree, in tree
    /// order. Geometry must be measured now, not cached.
    fn query(&self, class: ElementClass) -> Vec<Candidate>;

    /// The name of the active view, if any view is active.
    fn active_view(&self) -> Option<String>;

    /// The element a view wants focused when it becomes active.
    fn default_focus(&self, _view: &str) -> Option<ElementId> {
        None
    }

    /// Mark an element as focused.
    fn apply_focus_visual(&mut self, id: ElementId);

    /// Remove the focused marker from an element.
    fn clear_focus_visual(&mut self, id: ElementId);

    /// Scroll the element's container so the element sits centered.
    fn scroll_into_view(&mut self, _id: ElementId) {}

    /// Ask the platform to move its own input focus to the element. A
    /// rejection does not undo the visual focus state.
    fn platform_focus(&mut self, _id: ElementId) -> Result<()> {
        Ok(())
    }

    /// Release platform input focus from the element.
    fn platform_blur(&mut self, _id: ElementId) {}
}

/// The owning application, as seen by the focus engine.
pub trait Shell {
    /// The focused element was activated.
    fn on_activate(&mut self, id: ElementId);

    /// The user asked to go back. View stack handling belongs to the shell.
    fn on_back(&mut self);

    /// A transient timer scheduled with
    /// [`NavigationSession::reset_transient`](crate::NavigationSession::reset_transient)
    /// expired.
    fn on_transient_expired(&mut self, _key: &TransientKey) {}
}

/// Name of a transient UI timer, such as the media controls auto-hide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransientKey(String);

impl TransientKey {
    /// Construct a key from a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The key's name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransientKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TransientKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
