//! A simulated TV storefront driven by the focus engine.
//!
//! The storefront has a navigation bar, four content views, a video player
//! with auto-hiding controls and a modal error dialog. Layout is in pixels of
//! a 1280x720 screen; [`App::render`] draws a scaled-down text version.

use std::time::{Duration, Instant};

use tracing::debug;
use tvfocus::{
    Config, ElementId, Error, KeyMap, NavigationSession, RemoteAction, Result, SessionState, Shell,
    TransientKey,
};

/// Screen layout and the view layer.
mod screen;

pub use screen::{Action, Change, Item, SCREEN, Screen};

/// The root view.
pub const HOME: &str = "home";
/// The video player view.
pub const PLAYER: &str = "player";
/// Transient timer for the player controls.
pub const CONTROLS: &str = "controls";
/// Player controls hide after this much inactivity.
pub const CONTROLS_TIMEOUT: Duration = Duration::from_secs(3);

/// Columns of rendered output.
const COLS: usize = 80;
/// Rows of rendered output.
const ROWS: usize = 24;

/// A notification from the focus engine, handled once the engine call
/// returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// An element was activated.
    Activated(ElementId),
    /// The user asked to go back.
    Back,
    /// A transient timer expired.
    Expired(TransientKey),
}

/// Collects engine notifications during a call.
#[derive(Debug, Default)]
pub struct Inbox {
    /// Notifications in arrival order.
    pub notices: Vec<Notice>,
}

impl Shell for Inbox {
    fn on_activate(&mut self, id: ElementId) {
        self.notices.push(Notice::Activated(id));
    }

    fn on_back(&mut self) {
        self.notices.push(Notice::Back);
    }

    fn on_transient_expired(&mut self, key: &TransientKey) {
        self.notices.push(Notice::Expired(key.clone()));
    }
}

/// The storefront application: a screen and the session that owns its focus.
#[derive(Debug)]
pub struct App {
    /// Focus state.
    pub session: NavigationSession,
    /// View layer.
    pub screen: Screen,
    /// Key code decoding.
    keys: KeyMap,
}

impl App {
    /// Build the storefront.
    pub fn new(config: Config) -> Result<Self> {
        let keys = KeyMap::with_bindings(&config.keys);
        Ok(Self {
            session: NavigationSession::new(config),
            screen: Screen::new()?,
            keys,
        })
    }

    /// Start the focus session.
    pub fn start(&mut self, now: Instant) -> SessionState {
        self.session.init(&mut self.screen, now)
    }

    /// Handle a key code. Returns false if the code is not bound.
    pub fn key(&mut self, code: u32, now: Instant) -> Result<bool> {
        let Some(action) = self.keys.decode(code) else {
            debug!(code, "unbound key");
            return Ok(false);
        };
        self.action(action, now)?;
        Ok(true)
    }

    /// Handle a remote action.
    pub fn action(&mut self, action: RemoteAction, now: Instant) -> Result<()> {
        // While playing with the controls hidden, any key other than back
        // just brings the controls back.
        if action != RemoteAction::Cancel && self.screen.show_controls() {
            self.session.on_view_change(&mut self.screen, now);
            self.session.reset_transient(CONTROLS, CONTROLS_TIMEOUT, now);
            return Ok(());
        }
        let mut inbox = Inbox::default();
        match self.session.handle(&mut self.screen, &mut inbox, action) {
            Ok(_) | Err(Error::NoFocusableElements) => {}
            Err(e) => return Err(e),
        }
        if self.screen.in_player() {
            self.session.reset_transient(CONTROLS, CONTROLS_TIMEOUT, now);
        }
        self.process(inbox, now)
    }

    /// Run due timers.
    pub fn tick(&mut self, now: Instant) -> Result<()> {
        let mut inbox = Inbox::default();
        self.session.tick(&mut self.screen, &mut inbox, now);
        self.process(inbox, now)
    }

    /// How long the owner may sleep before calling [`tick`](Self::tick).
    pub fn next_wait(&self, now: Instant) -> Option<Duration> {
        self.session.next_wait(now)
    }

    /// Apply notifications collected during an engine call.
    fn process(&mut self, inbox: Inbox, now: Instant) -> Result<()> {
        for notice in inbox.notices {
            let change = match notice {
                Notice::Activated(id) => self.screen.activate(id)?,
                Notice::Back => self.screen.back(),
                Notice::Expired(key) if key.name() == CONTROLS => self.screen.hide_controls(),
                Notice::Expired(_) => Change::None,
            };
            match change {
                Change::None => {}
                Change::View => {
                    self.session.on_view_change(&mut self.screen, now);
                    let key = TransientKey::new(CONTROLS);
                    if self.screen.in_player() && !self.screen.controls_hidden() {
                        self.session.reset_transient(key, CONTROLS_TIMEOUT, now);
                    } else if !self.screen.in_player() {
                        self.session.cancel_transient(&key);
                    }
                }
                Change::Controls => {
                    self.session.reset_transient(CONTROLS, CONTROLS_TIMEOUT, now);
                }
            }
        }
        Ok(())
    }

    /// Draw the screen as text. Focused items are marked `>label<`.
    pub fn render(&self) -> Vec<String> {
        let mut grid = vec![vec![' '; COLS]; ROWS];
        let scale_x = SCREEN.w as usize / COLS;
        let scale_y = SCREEN.h as usize / ROWS;
        let mut put = |x: usize, y: usize, text: &str| {
            if let Some(row) = grid.get_mut(y) {
                for (cell, ch) in row.iter_mut().skip(x).zip(text.chars()) {
                    *cell = ch;
                }
            }
        };

        if let Some((title, paused)) = self.screen.playing() {
            let state = if paused { "paused" } else { "playing" };
            put(2, ROWS / 2, &format!("{state}: {title}"));
        }
        if let Some(message) = self.screen.dialog() {
            put(26, 8, &format!("! {message}"));
        }
        for (id, item) in self.screen.shown() {
            let x = item.rect.tl.x.max(0) as usize / scale_x;
            let y = item.rect.tl.y.max(0) as usize / scale_y;
            let width = (item.rect.w as usize / scale_x).max(3);
            let label: String = item.label.chars().take(width - 2).collect();
            let text = if self.screen.focused() == Some(id) {
                format!(">{label}<")
            } else {
                format!("[{label}]")
            };
            put(x, y, &text);
        }
        let status = format!(
            "view: {}  focus: {}",
            self.screen.stack().join(" > "),
            self.screen.focused_label().unwrap_or("-")
        );
        put(0, ROWS - 1, &status);

        grid.into_iter()
            .map(|r| r.into_iter().collect::<String>().trim_end().to_string())
            .collect()
    }
}
