//! Transition rules layered on top of geometric resolution.
//!
//! Moving between the navigation bar and the content area is a product
//! decision rather than a geometric one, so it lives behind a trait the
//! session consults around the spatial resolver.

use std::fmt;

use geom::Direction;

use crate::{ElementId, FocusableElement, Registry, config::PolicyConfig};

/// The state a policy decides over.
#[derive(Debug, Clone, Copy)]
pub struct Move<'a> {
    /// A freshly collected registry.
    pub registry: &'a Registry,
    /// The focused element, as it appears in `registry`.
    pub current: &'a FocusableElement,
    /// Requested direction.
    pub direction: Direction,
    /// The active view, if any.
    pub active_view: Option<&'a str>,
}

/// Overrides for directional moves.
pub trait TransitionPolicy: fmt::Debug {
    /// Consulted before geometry. A returned target is used as is.
    fn before_spatial(&self, _mv: &Move<'_>) -> Option<ElementId> {
        None
    }

    /// Consulted with the spatial result, which is `None` on a miss. A
    /// returned target replaces the result.
    fn after_spatial(&self, _mv: &Move<'_>, _resolved: Option<ElementId>) -> Option<ElementId> {
        None
    }
}

/// Pure geometry, no overrides.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeometryOnly;

impl TransitionPolicy for GeometryOnly {}

/// The storefront navigation bar rules.
///
/// Down from the bar lands on the first content item. Up out of the content
/// area lands on the bar item for the active view rather than whichever bar
/// item happens to be geometrically closest.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavBarPolicy {
    /// Switches and the home view name.
    config: PolicyConfig,
}

impl NavBarPolicy {
    /// Construct the policy from configuration.
    pub fn new(config: PolicyConfig) -> Self {
        Self { config }
    }
}

impl TransitionPolicy for NavBarPolicy {
    fn before_spatial(&self, mv: &Move<'_>) -> Option<ElementId> {
        if self.config.nav_down_to_content
            && mv.direction == Direction::Down
            && mv.current.is_navigation()
        {
            return mv.registry.first_content().map(|e| e.id);
        }
        None
    }

    fn after_spatial(&self, mv: &Move<'_>, resolved: Option<ElementId>) -> Option<ElementId> {
        if !self.config.content_up_to_active_nav
            || mv.direction != Direction::Up
            || mv.current.is_navigation()
        {
            return None;
        }
        // Only intervene when the move leaves the content area.
        let leaves_content = match resolved {
            None => true,
            Some(id) => mv.registry.find(id).is_some_and(|e| e.is_navigation()),
        };
        if !leaves_content {
            return None;
        }
        mv.active_view
            .and_then(|v| mv.registry.nav_for_view(v))
            .or_else(|| mv.registry.home(&self.config.home_view))
            .map(|e| e.id)
    }
}

#[cfg(test)]
mod tests {
    use geom::Rect;

    use super::*;
    use crate::{ElementClass, testing::TestSurface};

    /// A bar of three items above two rows of two cards.
    fn storefront() -> (TestSurface, Vec<ElementId>) {
        let mut s = TestSurface::new();
        let ids = vec![
            s.add_nav("home", Rect::new(0, 0, 100, 40)),
            s.add_nav("shows", Rect::new(120, 0, 100, 40)),
            s.add_nav("about", Rect::new(240, 0, 100, 40)),
            s.add_in(ElementClass::VideoCard, "shows", Rect::new(200, 100, 100, 100)),
            s.add_in(ElementClass::VideoCard, "shows", Rect::new(320, 100, 100, 100)),
            s.add_in(ElementClass::VideoCard, "shows", Rect::new(200, 220, 100, 100)),
        ];
        s.set_active_view(Some("shows"));
        (s, ids)
    }

    fn mv<'a>(r: &'a Registry, id: ElementId, direction: Direction) -> Move<'a> {
        Move {
            registry: r,
            current: r.find(id).unwrap(),
            direction,
            active_view: Some("shows"),
        }
    }

    #[test]
    fn down_from_bar_enters_content() {
        let (s, ids) = storefront();
        let r = Registry::collect(&s);
        let p = NavBarPolicy::default();
        assert_eq!(p.before_spatial(&mv(&r, ids[2], Direction::Down)), Some(ids[3]));
        assert_eq!(p.before_spatial(&mv(&r, ids[2], Direction::Right)), None);
        assert_eq!(p.before_spatial(&mv(&r, ids[3], Direction::Down)), None);
    }

    #[test]
    fn up_out_of_content_targets_active_view() {
        let (s, ids) = storefront();
        let r = Registry::collect(&s);
        let p = NavBarPolicy::default();
        // The card at x=320 sits geometrically below "about".
        let m = mv(&r, ids[4], Direction::Up);
        assert_eq!(p.after_spatial(&m, Some(ids[2])), Some(ids[1]));
        assert_eq!(p.after_spatial(&m, None), Some(ids[1]));
        // Moving up within the content area is left alone.
        let m = mv(&r, ids[5], Direction::Up);
        assert_eq!(p.after_spatial(&m, Some(ids[3])), None);
    }

    #[test]
    fn falls_back_to_home() {
        let (s, ids) = storefront();
        let r = Registry::collect(&s);
        let p = NavBarPolicy::default();
        let m = Move {
            active_view: Some("missing"),
            ..mv(&r, ids[4], Direction::Up)
        };
        assert_eq!(p.after_spatial(&m, None), Some(ids[0]));
    }

    #[test]
    fn switches_disable_rules() {
        let (s, ids) = storefront();
        let r = Registry::collect(&s);
        let p = NavBarPolicy::new(PolicyConfig {
            nav_down_to_content: false,
            content_up_to_active_nav: false,
            ..PolicyConfig::default()
        });
        assert_eq!(p.before_spatial(&mv(&r, ids[0], Direction::Down)), None);
        assert_eq!(p.after_spatial(&mv(&r, ids[4], Direction::Up), None), None);
        assert_eq!(GeometryOnly.before_spatial(&mv(&r, ids[0], Direction::Down)), None);
    }
}
