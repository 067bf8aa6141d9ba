//! Fakes of the engine's collaborators for tests.
//!
//! [`TestSurface`] is a flat view tree of rectangles that records every side
//! effect the engine applies. [`RecordingShell`] records application
//! notifications.

use geom::Rect;

use crate::{ElementClass, ElementId};

/// Recording shell.
mod shell;
/// In-memory surface.
mod surface;

pub use shell::RecordingShell;
pub use surface::{Effect, TestSurface};

/// Element ids of the [`storefront`] layout.
#[derive(Debug, Clone, Copy)]
pub struct Storefront {
    /// Navigation item for the "home" view.
    pub home: ElementId,
    /// Navigation item for the "shows" view.
    pub shows: ElementId,
    /// Navigation item for the "about" view.
    pub about: ElementId,
    /// A row of cards owned by the "home" view, left to right.
    pub cards: [ElementId; 3],
}

/// A navigation bar of three 100x40 items with a row of three 100x100 cards
/// below it, each card directly under a bar item. The "home" view is active.
pub fn storefront() -> (TestSurface, Storefront) {
    let mut s = TestSurface::new();
    let home = s.add_nav("home", Rect::new(0, 0, 100, 40));
    let shows = s.add_nav("shows", Rect::new(120, 0, 100, 40));
    let about = s.add_nav("about", Rect::new(240, 0, 100, 40));
    let cards = [0, 120, 240]
        .map(|x| s.add_in(ElementClass::VideoCard, "home", Rect::new(x, 100, 100, 100)));
    s.set_active_view(Some("home"));
    (
        s,
        Storefront {
            home,
            shows,
            about,
            cards,
        },
    )
}
