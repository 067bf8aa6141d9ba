use std::collections::{HashMap, HashSet};

use geom::Rect;
use slotmap::SlotMap;

use crate::{Candidate, ElementClass, ElementId, Surface, error::{Error, Result}};

/// A side effect applied to the surface by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// `apply_focus_visual`.
    Apply(ElementId),
    /// `clear_focus_visual`.
    Clear(ElementId),
    /// `scroll_into_view`.
    Scroll(ElementId),
    /// `platform_focus`, whether or not it was accepted.
    PlatformFocus(ElementId),
    /// `platform_blur`.
    Blur(ElementId),
}

/// One element of the fake tree.
#[derive(Debug, Clone)]
struct Node {
    /// Classes the element is reported under.
    classes: Vec<ElementClass>,
    /// Geometry.
    rect: Rect,
    /// Associated view.
    view: Option<String>,
    /// Display suppressed.
    suppressed: bool,
    /// Attached to the visible tree.
    attached: bool,
    /// Disabled.
    disabled: bool,
}

/// An in-memory [`Surface`].
///
/// Elements are reported in insertion order. Removing an element deletes it
/// from the tree, so its id becomes stale.
#[derive(Debug, Default)]
pub struct TestSurface {
    /// Element arena.
    nodes: SlotMap<ElementId, Node>,
    /// Tree order.
    order: Vec<ElementId>,
    /// Active view name.
    active_view: Option<String>,
    /// Designated default focus target per view.
    defaults: HashMap<String, ElementId>,
    /// Elements currently carrying the focus visual.
    visual: HashSet<ElementId>,
    /// Element holding platform focus.
    platform: Option<ElementId>,
    /// Refuse platform focus requests.
    reject_platform: bool,
    /// Every effect applied, in order.
    effects: Vec<Effect>,
}

impl TestSurface {
    /// An empty surface with no active view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an element.
    fn insert(&mut self, class: ElementClass, view: Option<String>, rect: Rect) -> ElementId {
        let id = self.nodes.insert(Node {
            classes: vec![class],
            rect,
            view,
            suppressed: false,
            attached: true,
            disabled: false,
        });
        self.order.push(id);
        id
    }

    /// Add an element that belongs to no view.
    pub fn add(&mut self, class: ElementClass, rect: Rect) -> ElementId {
        self.insert(class, None, rect)
    }

    /// Add a content element owned by `view`.
    pub fn add_in(&mut self, class: ElementClass, view: &str, rect: Rect) -> ElementId {
        self.insert(class, Some(view.into()), rect)
    }

    /// Add a navigation button that activates `view`.
    pub fn add_nav(&mut self, view: &str, rect: Rect) -> ElementId {
        self.insert(ElementClass::NavButton, Some(view.into()), rect)
    }

    /// Also report an element under another class.
    pub fn also_report(&mut self, id: ElementId, class: ElementClass) {
        if let Some(n) = self.nodes.get_mut(id) {
            n.classes.push(class);
        }
    }

    /// Delete an element from the tree.
    pub fn remove(&mut self, id: ElementId) {
        self.nodes.remove(id);
        self.order.retain(|i| *i != id);
    }

    /// Detach an element from the visible tree without deleting it.
    pub fn detach(&mut self, id: ElementId) {
        if let Some(n) = self.nodes.get_mut(id) {
            n.attached = false;
        }
    }

    /// Suppress or restore an element's display.
    pub fn set_suppressed(&mut self, id: ElementId, suppressed: bool) {
        if let Some(n) = self.nodes.get_mut(id) {
            n.suppressed = suppressed;
        }
    }

    /// Disable or enable an element.
    pub fn set_disabled(&mut self, id: ElementId, disabled: bool) {
        if let Some(n) = self.nodes.get_mut(id) {
            n.disabled = disabled;
        }
    }

    /// Move or resize an element.
    pub fn set_rect(&mut self, id: ElementId, rect: Rect) {
        if let Some(n) = self.nodes.get_mut(id) {
            n.rect = rect;
        }
    }

    /// Set the active view.
    pub fn set_active_view(&mut self, view: Option<&str>) {
        self.active_view = view.map(String::from);
    }

    /// Designate a view's default focus target.
    pub fn set_default_focus(&mut self, view: &str, id: ElementId) {
        self.defaults.insert(view.into(), id);
    }

    /// Make platform focus requests fail.
    pub fn reject_platform_focus(&mut self, reject: bool) {
        self.reject_platform = reject;
    }

    /// Elements carrying the focus visual, in tree order. Removed elements
    /// that still carry it are listed last.
    pub fn visual_focus(&self) -> Vec<ElementId> {
        let mut out: Vec<_> = self
            .order
            .iter()
            .copied()
            .filter(|id| self.visual.contains(id))
            .collect();
        out.extend(self.visual.iter().filter(|id| !self.nodes.contains_key(**id)));
        out
    }

    /// Does the element carry the focus visual?
    pub fn has_visual(&self, id: ElementId) -> bool {
        self.visual.contains(&id)
    }

    /// The element holding platform focus.
    pub fn platform_focused(&self) -> Option<ElementId> {
        self.platform
    }

    /// Every effect applied so far.
    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    /// Forget recorded effects.
    pub fn clear_effects(&mut self) {
        self.effects.clear();
    }
}

impl Surface for TestSurface {
    fn query(&self, class: ElementClass) -> Vec<Candidate> {
        self.order
            .iter()
            .filter_map(|id| self.nodes.get(*id).map(|n| (*id, n)))
            .filter(|(_, n)| n.classes.contains(&class))
            .map(|(id, n)| Candidate {
                id,
                rect: n.rect,
                view: n.view.clone(),
                suppressed: n.suppressed,
                attached: n.attached,
                disabled: n.disabled,
            })
            .collect()
    }

    fn active_view(&self) -> Option<String> {
        self.active_view.clone()
    }

    fn default_focus(&self, view: &str) -> Option<ElementId> {
        self.defaults.get(view).copied()
    }

    fn apply_focus_visual(&mut self, id: ElementId) {
        self.visual.insert(id);
        self.effects.push(Effect::Apply(id));
    }

    fn clear_focus_visual(&mut self, id: ElementId) {
        self.visual.remove(&id);
        self.effects.push(Effect::Clear(id));
    }

    fn scroll_into_view(&mut self, id: ElementId) {
        self.effects.push(Effect::Scroll(id));
    }

    fn platform_focus(&mut self, id: ElementId) -> Result<()> {
        self.effects.push(Effect::PlatformFocus(id));
        if self.reject_platform {
            return Err(Error::FocusRejected("element is not focusable".into()));
        }
        self.platform = Some(id);
        Ok(())
    }

    fn platform_blur(&mut self, id: ElementId) {
        self.effects.push(Effect::Blur(id));
        if self.platform == Some(id) {
            self.platform = None;
        }
    }
}
