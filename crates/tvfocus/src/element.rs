use geom::Rect;

use crate::ElementId;

/// The categories of element the registry asks the view layer for.
///
/// Queries happen in the order of [`ElementClass::ALL`]: navigation buttons
/// first, then content cards, then anything generically marked focusable.
/// That order is the registry order, and with it the linear fallback order.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum ElementClass {
    /// A navigation bar button. Always eligible while visible.
    NavButton,
    /// A call-to-action button inside a view, such as "watch now".
    CallToAction,
    /// An on-demand video card.
    VideoCard,
    /// A live stream card.
    LiveStreamCard,
    /// A category card.
    CategoryCard,
    /// A QR code card.
    QrCard,
    /// Any other element marked as focusable.
    Generic,
}

impl ElementClass {
    /// Every class, in query order.
    pub const ALL: [Self; 7] = [
        Self::NavButton,
        Self::CallToAction,
        Self::VideoCard,
        Self::LiveStreamCard,
        Self::CategoryCard,
        Self::QrCard,
        Self::Generic,
    ];

    /// Is this class part of the navigation bar?
    pub fn is_navigation(self) -> bool {
        self == Self::NavButton
    }
}

/// What the view layer reports about one element matching a class query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Element identity.
    pub id: ElementId,
    /// Bounding box in viewport coordinates, measured at query time.
    pub rect: Rect,
    /// For a navigation button, the view it activates. For content, the view
    /// that owns it.
    pub view: Option<String>,
    /// Display is suppressed, for instance by a hidden style.
    pub suppressed: bool,
    /// The element is attached to the visible tree.
    pub attached: bool,
    /// The element is disabled and cannot take focus.
    pub disabled: bool,
}

impl Candidate {
    /// A visible, attached, enabled candidate with no view association.
    pub fn new(id: ElementId, rect: Rect) -> Self {
        Self {
            id,
            rect,
            view: None,
            suppressed: false,
            attached: true,
            disabled: false,
        }
    }

    /// Could this element receive focus if its view were active?
    pub fn is_visible(&self) -> bool {
        !self.rect.is_zero() && !self.suppressed && self.attached && !self.disabled
    }
}

/// Whether a registry entry is part of the navigation bar or the content area.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    /// A navigation bar item that activates `view`, if it names one.
    Navigation {
        /// Target view.
        view: Option<String>,
    },
    /// A content item belonging to the active view.
    Content,
}

/// One entry of the focus registry: an eligible element and the geometry it
/// had when the registry was collected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusableElement {
    /// Element identity.
    pub id: ElementId,
    /// Geometry snapshot. Valid for one navigation decision only.
    pub rect: Rect,
    /// The class query that produced this element.
    pub class: ElementClass,
    /// Navigation or content.
    pub category: Category,
}

impl FocusableElement {
    /// Is this a navigation bar item?
    pub fn is_navigation(&self) -> bool {
        matches!(self.category, Category::Navigation { .. })
    }

    /// The view a navigation item activates.
    pub fn nav_view(&self) -> Option<&str> {
        match &self.category {
            Category::Navigation { view } => view.as_deref(),
            Category::Content => None,
        }
    }
}
