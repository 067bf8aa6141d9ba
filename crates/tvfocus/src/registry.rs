//! Enumeration of the elements currently eligible for focus.

use std::collections::HashSet;

use crate::{Category, ElementClass, ElementId, FocusableElement, surface::Surface};

/// An ordered snapshot of focusable elements.
///
/// Order is query order: class by class as listed in [`ElementClass::ALL`],
/// and tree order within a class. Snapshots are cheap and short-lived; the
/// session rebuilds one for every decision.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    /// Eligible elements in registry order.
    elements: Vec<FocusableElement>,
}

impl Registry {
    /// Collect the registry from a surface.
    ///
    /// Elements reported by more than one class query keep the position of
    /// their first class. Invisible elements are dropped, as are content
    /// elements owned by a view other than the active one. Navigation
    /// buttons are eligible regardless of the active view, and when no view
    /// is active nothing is filtered by view.
    pub fn collect(surface: &dyn Surface) -> Self {
        let active = surface.active_view();
        let mut seen = HashSet::new();
        let mut elements = Vec::new();
        for class in ElementClass::ALL {
            for c in surface.query(class) {
                if !seen.insert(c.id) || !c.is_visible() {
                    continue;
                }
                if !class.is_navigation()
                    && let (Some(active), Some(owner)) = (&active, &c.view)
                    && active != owner
                {
                    continue;
                }
                let category = if class.is_navigation() {
                    Category::Navigation { view: c.view }
                } else {
                    Category::Content
                };
                elements.push(FocusableElement {
                    id: c.id,
                    rect: c.rect,
                    class,
                    category,
                });
            }
        }
        Self { elements }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Is the registry empty?
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// All elements in registry order.
    pub fn elements(&self) -> &[FocusableElement] {
        &self.elements
    }

    /// Iterate over elements in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &FocusableElement> {
        self.elements.iter()
    }

    /// The element at `index`.
    pub fn get(&self, index: usize) -> Option<&FocusableElement> {
        self.elements.get(index)
    }

    /// The first element.
    pub fn first(&self) -> Option<&FocusableElement> {
        self.elements.first()
    }

    /// Position of an element.
    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id == id)
    }

    /// Look an element up by id.
    pub fn find(&self, id: ElementId) -> Option<&FocusableElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Is the element in the registry?
    pub fn contains(&self, id: ElementId) -> bool {
        self.index_of(id).is_some()
    }

    /// The navigation item that activates `view`.
    pub fn nav_for_view(&self, view: &str) -> Option<&FocusableElement> {
        self.elements.iter().find(|e| e.nav_view() == Some(view))
    }

    /// The navigation bar's home item.
    pub fn home(&self, home_view: &str) -> Option<&FocusableElement> {
        self.nav_for_view(home_view)
    }

    /// The first content item.
    pub fn first_content(&self) -> Option<&FocusableElement> {
        self.elements.iter().find(|e| !e.is_navigation())
    }

    /// The re-anchor target: the home item if present, otherwise the first
    /// element.
    pub fn default_target(&self, home_view: &str) -> Option<&FocusableElement> {
        self.home(home_view).or_else(|| self.first())
    }
}

#[cfg(test)]
mod tests {
    use geom::Rect;

    use super::*;
    use crate::testing::TestSurface;

    #[test]
    fn class_order_and_dedup() {
        let mut s = TestSurface::new();
        let card = s.add(ElementClass::VideoCard, Rect::new(0, 100, 50, 50));
        let nav = s.add_nav("home", Rect::new(0, 0, 20, 10));
        // The card is also marked generically focusable.
        s.also_report(card, ElementClass::Generic);
        let generic = s.add(ElementClass::Generic, Rect::new(60, 100, 50, 50));

        let r = Registry::collect(&s);
        let ids: Vec<_> = r.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![nav, card, generic]);
        assert_eq!(r.find(card).map(|e| e.class), Some(ElementClass::VideoCard));
        assert!(r.find(nav).is_some_and(|e| e.is_navigation()));
    }

    #[test]
    fn visibility_filter() {
        let mut s = TestSurface::new();
        let visible = s.add(ElementClass::VideoCard, Rect::new(0, 0, 10, 10));
        let zero = s.add(ElementClass::VideoCard, Rect::new(20, 0, 0, 10));
        let hidden = s.add(ElementClass::VideoCard, Rect::new(40, 0, 10, 10));
        let detached = s.add(ElementClass::VideoCard, Rect::new(60, 0, 10, 10));
        let disabled = s.add(ElementClass::Generic, Rect::new(80, 0, 10, 10));
        s.set_suppressed(hidden, true);
        s.detach(detached);
        s.set_disabled(disabled, true);

        let r = Registry::collect(&s);
        assert_eq!(r.len(), 1);
        assert!(r.contains(visible));
        for id in [zero, hidden, detached, disabled] {
            assert!(!r.contains(id));
        }
    }

    #[test]
    fn active_view_filter() {
        let mut s = TestSurface::new();
        let home_nav = s.add_nav("home", Rect::new(0, 0, 20, 10));
        let shows_nav = s.add_nav("shows", Rect::new(30, 0, 20, 10));
        let home_card = s.add_in(ElementClass::VideoCard, "home", Rect::new(0, 50, 40, 40));
        let shows_card = s.add_in(ElementClass::VideoCard, "shows", Rect::new(0, 50, 40, 40));
        let overlay = s.add(ElementClass::CallToAction, Rect::new(100, 100, 20, 10));

        s.set_active_view(Some("home"));
        let r = Registry::collect(&s);
        assert!(r.contains(home_nav) && r.contains(shows_nav));
        assert!(r.contains(home_card));
        assert!(!r.contains(shows_card));
        assert!(r.contains(overlay));

        s.set_active_view(None);
        assert_eq!(Registry::collect(&s).len(), 5);
    }

    #[test]
    fn lookups() {
        let mut s = TestSurface::new();
        let a = s.add_nav("live", Rect::new(0, 0, 20, 10));
        let b = s.add_nav("home", Rect::new(30, 0, 20, 10));
        let c = s.add(ElementClass::QrCard, Rect::new(0, 50, 20, 20));
        let r = Registry::collect(&s);
        assert_eq!(r.home("home").map(|e| e.id), Some(b));
        assert_eq!(r.nav_for_view("live").map(|e| e.id), Some(a));
        assert_eq!(r.first_content().map(|e| e.id), Some(c));
        assert_eq!(r.default_target("home").map(|e| e.id), Some(b));
        assert_eq!(r.default_target("nope").map(|e| e.id), Some(a));
        assert_eq!(r.index_of(c), Some(2));
        assert!(Registry::default().default_target("home").is_none());
    }

    #[test]
    fn collect_is_idempotent() {
        let mut s = TestSurface::new();
        s.add_nav("home", Rect::new(0, 0, 20, 10));
        s.add(ElementClass::CategoryCard, Rect::new(0, 40, 20, 20));
        assert_eq!(Registry::collect(&s), Registry::collect(&s));
    }
}
