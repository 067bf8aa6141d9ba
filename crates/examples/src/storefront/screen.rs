use std::collections::HashMap;

use slotmap::SlotMap;
use tracing::{debug, info};
use tvfocus::{Candidate, ElementClass, ElementId, Error, Expanse, Rect, Result, Surface};

use super::{HOME, PLAYER};

/// Screen size in pixels.
pub const SCREEN: Expanse = Expanse { w: 1280, h: 720 };

/// What activating an item does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Switch to a view.
    ShowView(String),
    /// Start playing a title.
    Play(String),
    /// Pause or resume playback.
    TogglePause,
    /// Retry the failed load behind the open dialog.
    Retry,
    /// Close the open dialog.
    Dismiss,
    /// Same as the back key.
    Back,
    /// Nothing; the item is informational.
    Inert,
}

/// How the screen changed in response to a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// Nothing the focus engine needs to hear about.
    None,
    /// The active view, the open dialog, or the set of visible items changed.
    View,
    /// Player controls were used and should stay up.
    Controls,
}

/// A focusable item on the screen.
#[derive(Debug, Clone)]
pub struct Item {
    /// Display label.
    pub label: String,
    /// Element class.
    pub class: ElementClass,
    /// Owning view for content, target view for navigation items. Dialog
    /// buttons have none.
    pub view: Option<String>,
    /// Geometry in screen pixels.
    pub rect: Rect,
    /// Activation behavior.
    pub action: Action,
    /// Part of the modal dialog.
    dialog: bool,
}

/// The storefront's view layer.
#[derive(Debug)]
pub struct Screen {
    /// Item arena.
    items: SlotMap<ElementId, Item>,
    /// Tree order.
    order: Vec<ElementId>,
    /// View stack. The last entry is the active view and the stack is never
    /// empty.
    stack: Vec<String>,
    /// Designated focus targets per view.
    defaults: HashMap<String, ElementId>,
    /// Message of the open dialog.
    dialog: Option<String>,
    /// Are the player controls showing?
    controls_visible: bool,
    /// Is playback paused?
    paused: bool,
    /// Title being played.
    playing: Option<String>,
    /// Have the live streams loaded?
    live_loaded: bool,
    /// Item carrying the focus marker.
    focused: Option<ElementId>,
}

impl Screen {
    /// Lay out the storefront with the home view active.
    pub fn new() -> Result<Self> {
        let mut s = Self {
            items: SlotMap::with_key(),
            order: vec![],
            stack: vec![HOME.into()],
            defaults: HashMap::new(),
            dialog: None,
            controls_visible: false,
            paused: false,
            playing: None,
            live_loaded: false,
            focused: None,
        };

        let bar = Rect::new(40, 20, SCREEN.w - 80, 60).split_horizontal(4)?;
        for (r, (label, view)) in bar
            .iter()
            .zip([("Home", HOME), ("Shows", "shows"), ("Live", "live"), ("About", "about")])
        {
            s.push(Item {
                label: label.into(),
                class: ElementClass::NavButton,
                view: Some(view.into()),
                rect: r.inner(10),
                action: Action::ShowView(view.into()),
                dialog: false,
            })?;
        }

        let featured = s.content(
            HOME,
            ElementClass::CallToAction,
            "Watch featured",
            Rect::new(50, 120, 380, 60),
            Action::Play("Featured".into()),
        )?;
        s.defaults.insert(HOME.into(), featured);
        s.row(
            HOME,
            ElementClass::VideoCard,
            Rect::new(40, 220, SCREEN.w - 80, 200),
            &["Northern Lights", "Harbour", "Glass City", "Tidewater"],
            |t| Action::Play(t.into()),
        )?;
        s.row(
            HOME,
            ElementClass::CategoryCard,
            Rect::new(40, 440, SCREEN.w - 80, 160),
            &["Drama", "Comedy", "Documentary"],
            |_| Action::ShowView("shows".into()),
        )?;

        s.row(
            "shows",
            ElementClass::VideoCard,
            Rect::new(40, 120, SCREEN.w - 80, 240),
            &["Episode 1", "Episode 2", "Episode 3", "Episode 4"],
            |t| Action::Play(t.into()),
        )?;
        s.row(
            "shows",
            ElementClass::VideoCard,
            Rect::new(40, 380, SCREEN.w - 80, 240),
            &["Episode 5", "Episode 6", "Episode 7", "Episode 8"],
            |t| Action::Play(t.into()),
        )?;

        s.content(
            "about",
            ElementClass::QrCard,
            "Scan to subscribe",
            Rect::new(490, 160, 300, 300),
            Action::Inert,
        )?;

        let controls = Rect::new(340, 600, 600, 80).split_horizontal(2)?;
        let play = s.content(
            PLAYER,
            ElementClass::CallToAction,
            "Play/Pause",
            controls[0].inner(10),
            Action::TogglePause,
        )?;
        s.content(
            PLAYER,
            ElementClass::CallToAction,
            "Back",
            controls[1].inner(10),
            Action::Back,
        )?;
        s.defaults.insert(PLAYER.into(), play);
        Ok(s)
    }

    /// Append an item in tree order. Items must lie entirely on screen.
    fn push(&mut self, item: Item) -> Result<ElementId> {
        if !SCREEN.rect().contains_rect(item.rect) {
            return Err(Error::Geometry(format!(
                "{:?} at {:?} is off screen",
                item.label, item.rect
            )));
        }
        let id = self.items.insert(item);
        self.order.push(id);
        Ok(id)
    }

    /// Append a content item owned by `view`.
    fn content(
        &mut self,
        view: &str,
        class: ElementClass,
        label: &str,
        rect: Rect,
        action: Action,
    ) -> Result<ElementId> {
        self.push(Item {
            label: label.into(),
            class,
            view: Some(view.into()),
            rect,
            action,
            dialog: false,
        })
    }

    /// Lay out a row of equally sized items across `area`.
    fn row(
        &mut self,
        view: &str,
        class: ElementClass,
        area: Rect,
        labels: &[&str],
        action: impl Fn(&str) -> Action,
    ) -> Result<Vec<ElementId>> {
        let cells = area.split_horizontal(labels.len() as u32)?;
        cells
            .iter()
            .zip(labels)
            .map(|(r, l)| self.content(view, class, l, r.inner(10), action(l)))
            .collect()
    }

    /// The active view.
    pub fn view(&self) -> &str {
        self.stack.last().map_or(HOME, String::as_str)
    }

    /// The view stack, root first.
    pub fn stack(&self) -> &[String] {
        &self.stack
    }

    /// Look an item up.
    pub fn item(&self, id: ElementId) -> Option<&Item> {
        self.items.get(id)
    }

    /// Find the first item with a label.
    pub fn find(&self, label: &str) -> Option<ElementId> {
        self.order
            .iter()
            .copied()
            .find(|id| self.items.get(*id).is_some_and(|i| i.label == label))
    }

    /// The item carrying the focus marker.
    pub fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    /// Label of the item carrying the focus marker.
    pub fn focused_label(&self) -> Option<&str> {
        self.focused
            .and_then(|id| self.items.get(id))
            .map(|i| i.label.as_str())
    }

    /// Message of the open dialog.
    pub fn dialog(&self) -> Option<&str> {
        self.dialog.as_deref()
    }

    /// Is the player active with its controls hidden?
    pub fn controls_hidden(&self) -> bool {
        self.view() == PLAYER && !self.controls_visible
    }

    /// Is the player active?
    pub fn in_player(&self) -> bool {
        self.view() == PLAYER
    }

    /// The title being played and whether it is paused.
    pub fn playing(&self) -> Option<(&str, bool)> {
        self.playing.as_deref().map(|t| (t, self.paused))
    }

    /// Is the item currently drawn?
    pub fn is_shown(&self, item: &Item) -> bool {
        if self.dialog.is_some() {
            return item.dialog;
        }
        if item.class == ElementClass::NavButton {
            return !self.in_player();
        }
        match item.view.as_deref() {
            Some(PLAYER) => self.in_player() && self.controls_visible,
            Some(v) => v == self.view(),
            None => true,
        }
    }

    /// Items drawn on screen, in tree order.
    pub fn shown(&self) -> impl Iterator<Item = (ElementId, &Item)> {
        self.order
            .iter()
            .filter_map(|id| self.items.get(*id).map(|i| (*id, i)))
            .filter(|(_, i)| self.is_shown(i))
    }

    /// Push a view onto the stack. Showing the active view again is a
    /// no-op.
    pub fn show_view(&mut self, view: &str) -> Result<Change> {
        if self.view() == view {
            return Ok(Change::None);
        }
        if view == "live" && !self.live_loaded {
            self.open_dialog("Live streams unavailable")?;
        }
        info!(view, "show view");
        self.stack.push(view.into());
        Ok(Change::View)
    }

    /// Open the modal dialog with Retry and Close buttons.
    fn open_dialog(&mut self, message: &str) -> Result<()> {
        self.close_dialog();
        self.dialog = Some(message.into());
        let buttons = Rect::new(380, 380, 520, 80).split_horizontal(2)?;
        for (r, (label, action)) in buttons
            .iter()
            .zip([("Retry", Action::Retry), ("Close", Action::Dismiss)])
        {
            self.push(Item {
                label: label.into(),
                class: ElementClass::CallToAction,
                view: None,
                rect: r.inner(10),
                action,
                dialog: true,
            })?;
        }
        Ok(())
    }

    /// Close the dialog and remove its buttons.
    fn close_dialog(&mut self) -> bool {
        let open = self.dialog.take().is_some();
        let items = &mut self.items;
        self.order.retain(|id| {
            let keep = items.get(*id).is_some_and(|i| !i.dialog);
            if !keep {
                items.remove(*id);
            }
            keep
        });
        open
    }

    /// Load the live streams.
    fn load_live(&mut self) -> Result<()> {
        if self.live_loaded {
            return Ok(());
        }
        self.row(
            "live",
            ElementClass::LiveStreamCard,
            Rect::new(40, 120, SCREEN.w - 80, 300),
            &["News", "Sport", "Weather"],
            |t| Action::Play(t.into()),
        )?;
        self.live_loaded = true;
        Ok(())
    }

    /// Run an item's action.
    pub fn activate(&mut self, id: ElementId) -> Result<Change> {
        let Some(action) = self.items.get(id).map(|i| i.action.clone()) else {
            return Ok(Change::None);
        };
        debug!(?action, "activate");
        Ok(match action {
            Action::ShowView(v) => self.show_view(&v)?,
            Action::Play(title) => {
                info!(%title, "play");
                self.playing = Some(title);
                self.paused = false;
                self.controls_visible = true;
                self.stack.push(PLAYER.into());
                Change::View
            }
            Action::TogglePause => {
                self.paused = !self.paused;
                Change::Controls
            }
            Action::Retry => {
                self.close_dialog();
                self.load_live()?;
                Change::View
            }
            Action::Dismiss => {
                self.close_dialog();
                Change::View
            }
            Action::Back => self.back(),
            Action::Inert => Change::None,
        })
    }

    /// Close the dialog if one is open, otherwise pop the view stack. The
    /// root view stays.
    pub fn back(&mut self) -> Change {
        if self.close_dialog() {
            return Change::View;
        }
        if self.stack.len() <= 1 {
            return Change::None;
        }
        if self.stack.pop().as_deref() == Some(PLAYER) {
            self.playing = None;
            self.controls_visible = false;
        }
        info!(view = self.view(), "back");
        Change::View
    }

    /// Show the player controls. Returns false if they were already up or
    /// the player is not active.
    pub fn show_controls(&mut self) -> bool {
        if !self.controls_hidden() {
            return false;
        }
        self.controls_visible = true;
        true
    }

    /// Hide the player controls.
    pub fn hide_controls(&mut self) -> Change {
        if !self.in_player() || !self.controls_visible {
            return Change::None;
        }
        debug!("hiding player controls");
        self.controls_visible = false;
        Change::View
    }
}

impl Surface for Screen {
    fn query(&self, class: ElementClass) -> Vec<Candidate> {
        self.order
            .iter()
            .filter_map(|id| self.items.get(*id).map(|i| (*id, i)))
            .filter(|(_, i)| i.class == class)
            .map(|(id, i)| {
                let mut c = Candidate::new(id, i.rect);
                c.view = i.view.clone();
                c.suppressed = !self.is_shown(i);
                c
            })
            .collect()
    }

    fn active_view(&self) -> Option<String> {
        Some(self.view().into())
    }

    fn default_focus(&self, view: &str) -> Option<ElementId> {
        self.defaults.get(view).copied()
    }

    fn apply_focus_visual(&mut self, id: ElementId) {
        self.focused = Some(id);
    }

    fn clear_focus_visual(&mut self, id: ElementId) {
        if self.focused == Some(id) {
            self.focused = None;
        }
    }

    fn scroll_into_view(&mut self, id: ElementId) {
        debug!(?id, "scroll into view");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn off_screen_items_are_rejected() -> Result<()> {
        let mut s = Screen::new()?;
        let before = s.shown().count();
        let edge = Rect::new(SCREEN.w as i32 - 100, 0, 100, 40);
        assert!(s.content(HOME, ElementClass::Generic, "Edge", edge, Action::Inert).is_ok());
        let past = Rect::new(SCREEN.w as i32 - 100, 0, 101, 40);
        assert!(matches!(
            s.content(HOME, ElementClass::Generic, "Past", past, Action::Inert),
            Err(Error::Geometry(_))
        ));
        assert_eq!(s.shown().count(), before + 1);
        assert!(s.find("Past").is_none());
        Ok(())
    }
}
