use std::time::{Duration, Instant};

use geom::Direction;
use tracing::{debug, info, warn};

use crate::{
    ElementId, Registry,
    config::Config,
    error::{Error, Result},
    event::RemoteAction,
    linear,
    policy::{Move, NavBarPolicy, TransitionPolicy},
    poll::{Scheduler, Task},
    spatial,
    surface::{Shell, Surface, TransientKey},
    sync::{self, ViewSync},
};

/// Lifecycle state of a [`NavigationSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// `init` has not run, or the session was shut down.
    Uninitialized,
    /// An element holds focus.
    Focused(ElementId),
    /// Nothing holds focus, typically because nothing is focusable yet.
    Unfocused,
}

/// How a navigation chose its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Via {
    /// Nothing was focused, so the first element was taken.
    Initial,
    /// The focused element had vanished, so the first element was taken.
    StaleReset,
    /// A transition policy picked the target.
    Policy,
    /// The spatial resolver picked the target.
    Spatial,
    /// Geometry found nothing, so the target is the next element in
    /// registry order.
    Linear,
}

/// The result of a directional move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Focus moved.
    Moved {
        /// Previous focus, which may no longer exist.
        from: Option<ElementId>,
        /// New focus.
        to: ElementId,
        /// How the target was chosen.
        via: Via,
    },
    /// There was nowhere to go; focus is unchanged.
    Stayed(ElementId),
}

impl Navigation {
    /// The element focused after the move.
    pub fn focused(&self) -> ElementId {
        match *self {
            Self::Moved { to, .. } => to,
            Self::Stayed(id) => id,
        }
    }
}

/// What [`NavigationSession::handle`] did with an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// A directional move.
    Navigated(Navigation),
    /// An activation, carrying the activated element if anything was
    /// focused.
    Activated(Option<ElementId>),
    /// A back request was passed to the shell.
    Back,
}

/// The single owner of focus state for an application.
///
/// Construct one per application and pass it to whatever dispatches remote
/// input. Only the session writes the focused reference; the view layer
/// learns about focus through the [`Surface`] visual hooks.
#[derive(Debug)]
pub struct NavigationSession {
    /// Engine configuration.
    config: Config,
    /// Navigation bar transition rules.
    policy: Box<dyn TransitionPolicy>,
    /// The most recently collected registry.
    registry: Registry,
    /// The focused element.
    focused: Option<ElementId>,
    /// Position of `focused` in `registry` when last committed.
    last_known_index: Option<usize>,
    /// Incremented every time `focused` changes.
    focus_gen: u64,
    /// Has `init` run without a subsequent `shutdown`?
    initialized: bool,
    /// Deferred work.
    scheduler: Scheduler,
    /// View change bookkeeping.
    view_sync: ViewSync,
}

impl Default for NavigationSession {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl NavigationSession {
    /// Construct a session. The transition policy is the navigation bar
    /// policy described by `config.policy`.
    pub fn new(config: Config) -> Self {
        let policy = Box::new(NavBarPolicy::new(config.policy.clone()));
        Self {
            config,
            policy,
            registry: Registry::default(),
            focused: None,
            last_known_index: None,
            focus_gen: 0,
            initialized: false,
            scheduler: Scheduler::default(),
            view_sync: ViewSync::default(),
        }
    }

    /// Replace the transition policy.
    pub fn with_policy(mut self, policy: impl TransitionPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    /// The session's configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The focused element.
    pub fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    /// The registry as of the last collection.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Position of the focused element when focus was last committed. This
    /// is a hint only; the registry may have changed since.
    pub fn last_known_index(&self) -> Option<usize> {
        self.last_known_index
    }

    /// A counter that changes whenever focus moves.
    pub fn focus_generation(&self) -> u64 {
        self.focus_gen
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        match (self.initialized, self.focused) {
            (false, _) => SessionState::Uninitialized,
            (true, Some(id)) => SessionState::Focused(id),
            (true, None) => SessionState::Unfocused,
        }
    }

    /// Rebuild the registry from the surface. Returns the number of
    /// eligible elements. Callers must repair stale focus afterwards.
    fn collect(&mut self, surface: &dyn Surface) -> usize {
        self.registry = Registry::collect(surface);
        self.registry.len()
    }

    /// Is the focused reference missing from the current registry?
    fn focus_is_stale(&self) -> bool {
        self.focused.is_some_and(|id| !self.registry.contains(id))
    }

    /// Start the session: collect, try to acquire initial focus, schedule
    /// retries if that failed, and start the periodic resync.
    pub fn init(&mut self, surface: &mut dyn Surface, now: Instant) -> SessionState {
        if self.initialized {
            debug!("navigation session already initialized");
            return self.state();
        }
        self.initialized = true;
        if !self.try_initial_focus(surface) {
            for delay in self.config.timing.initial_focus() {
                self.scheduler.schedule(now, delay, Task::InitialFocus);
            }
            debug!(
                retries = self.config.timing.initial_focus_ms.len(),
                "no focusable elements yet, retrying initial focus"
            );
        }
        self.scheduler
            .schedule(now, self.config.timing.resync_interval(), Task::Resync);
        info!(elements = self.registry.len(), "navigation session initialized");
        self.state()
    }

    /// Cancel all deferred work, including the periodic resync. The session
    /// may be initialized again afterwards.
    pub fn shutdown(&mut self) {
        let pending = self.scheduler.len();
        self.scheduler.cancel_all();
        self.initialized = false;
        info!(cancelled = pending, "navigation session shut down");
    }

    /// Acquire focus if there is none or it is stale. Returns true if
    /// focus is held afterwards.
    fn try_initial_focus(&mut self, surface: &mut dyn Surface) -> bool {
        self.collect(surface);
        if self.focused.is_some() && !self.focus_is_stale() {
            return true;
        }
        match self.reanchor(surface) {
            Some(id) => {
                debug!(?id, "initial focus acquired");
                true
            }
            None => false,
        }
    }

    /// Focus an element.
    ///
    /// The element must be eligible. Focusing a stale element is refused and
    /// focus is re-anchored to the default target instead. Returns true if
    /// focus changed.
    pub fn set_focus(&mut self, surface: &mut dyn Surface, id: ElementId) -> bool {
        self.collect(surface);
        if !self.registry.contains(id) {
            warn!(error = %Error::StaleFocus(id), "refusing to focus ineligible element");
            let before = self.focused;
            return self.reanchor(surface).is_some_and(|to| Some(to) != before);
        }
        self.commit(surface, id)
    }

    /// Focus the default target of the current registry: the home item if
    /// present, else the first element. Clears focus if the registry is
    /// empty.
    fn reanchor(&mut self, surface: &mut dyn Surface) -> Option<ElementId> {
        match self
            .registry
            .default_target(&self.config.policy.home_view)
            .map(|e| e.id)
        {
            Some(target) => {
                self.commit(surface, target);
                Some(target)
            }
            None => {
                self.drop_focus(surface);
                None
            }
        }
    }

    /// Apply focus to an element known to be in the registry.
    fn commit(&mut self, surface: &mut dyn Surface, id: ElementId) -> bool {
        let changed = self.focused != Some(id);
        if let Some(prev) = self.focused
            && prev != id
        {
            surface.clear_focus_visual(prev);
            surface.platform_blur(prev);
        }
        self.focused = Some(id);
        surface.apply_focus_visual(id);
        surface.scroll_into_view(id);
        if let Err(e) = surface.platform_focus(id) {
            warn!(error = %e, ?id, "keeping visual focus");
        }
        self.last_known_index = self.registry.index_of(id);
        if changed {
            self.focus_gen += 1;
            debug!(?id, index = ?self.last_known_index, "focus set");
        }
        changed
    }

    /// Forget the focused element.
    fn drop_focus(&mut self, surface: &mut dyn Surface) {
        if let Some(prev) = self.focused.take() {
            surface.clear_focus_visual(prev);
            surface.platform_blur(prev);
            self.focus_gen += 1;
        }
        self.last_known_index = None;
    }

    /// Move focus in a direction.
    ///
    /// Steps: collect, recover from missing or stale focus, consult the
    /// transition policy, resolve geometrically, fall back to linear order.
    pub fn navigate(
        &mut self,
        surface: &mut dyn Surface,
        direction: Direction,
    ) -> Result<Navigation> {
        self.collect(surface);
        if self.registry.is_empty() {
            self.drop_focus(surface);
            debug!(?direction, "nothing to navigate to");
            return Err(Error::NoFocusableElements);
        }

        let Some(current) = self.focused else {
            let to = self.first_id()?;
            self.commit(surface, to);
            return Ok(Navigation::Moved {
                from: None,
                to,
                via: Via::Initial,
            });
        };

        let Some(index) = self.registry.index_of(current) else {
            warn!(error = %Error::StaleFocus(current), "resetting to first element");
            let to = self.first_id()?;
            self.commit(surface, to);
            return Ok(Navigation::Moved {
                from: Some(current),
                to,
                via: Via::StaleReset,
            });
        };
        self.last_known_index = Some(index);

        let active = surface.active_view();
        let (target, via) = self.resolve(current, index, direction, active.as_deref());

        match target {
            Some(to) if to != current => {
                self.commit(surface, to);
                debug!(?direction, ?via, "moved");
                Ok(Navigation::Moved {
                    from: Some(current),
                    to,
                    via,
                })
            }
            _ => Ok(Navigation::Stayed(current)),
        }
    }

    /// Pick a target for a move from `current`, found at `index` in the
    /// registry.
    fn resolve(
        &self,
        current: ElementId,
        index: usize,
        direction: Direction,
        active_view: Option<&str>,
    ) -> (Option<ElementId>, Via) {
        let Some(element) = self.registry.get(index) else {
            return (None, Via::Linear);
        };
        let mv = Move {
            registry: &self.registry,
            current: element,
            direction,
            active_view,
        };
        if let Some(to) = self.policy.before_spatial(&mv) {
            return (Some(to), Via::Policy);
        }
        let resolved = if self.config.spatial.enabled {
            spatial::resolve(
                element.rect,
                direction,
                self.registry.iter(),
                current,
                &self.config.spatial,
            )
        } else {
            None
        };
        if let Some(to) = self.policy.after_spatial(&mv, resolved) {
            return (Some(to), Via::Policy);
        }
        if resolved.is_some() {
            return (resolved, Via::Spatial);
        }
        let to = linear::advance(index, direction, self.registry.len())
            .and_then(|i| self.registry.get(i))
            .map(|e| e.id);
        (to, Via::Linear)
    }

    /// The first registry element.
    fn first_id(&self) -> Result<ElementId> {
        self.registry
            .first()
            .map(|e| e.id)
            .ok_or(Error::NoFocusableElements)
    }

    /// Activate the focused element.
    ///
    /// Does nothing if nothing is focused. A focused element that is no
    /// longer eligible is not activated; focus is re-anchored instead and
    /// the user has to confirm again.
    pub fn select_current(
        &mut self,
        surface: &mut dyn Surface,
        shell: &mut dyn Shell,
    ) -> Option<ElementId> {
        self.collect(surface);
        let id = self.focused?;
        if !self.registry.contains(id) {
            warn!(error = %Error::StaleFocus(id), "not activating, re-anchoring");
            self.reanchor(surface);
            return None;
        }
        debug!(?id, "activate");
        shell.on_activate(id);
        Some(id)
    }

    /// Interrupt transient timers and pass the back request to the shell.
    pub fn go_back(&mut self, shell: &mut dyn Shell) {
        let cancelled = self.scheduler.cancel(|t| matches!(t, Task::Transient(_)));
        debug!(cancelled, "back");
        shell.on_back();
    }

    /// Re-collect and repair focus.
    ///
    /// A stale or absent focus is re-anchored to the default target. A valid
    /// focus has its visual state re-applied, which is idempotent.
    pub fn refresh(&mut self, surface: &mut dyn Surface) -> Result<ElementId> {
        self.collect(surface);
        if self.registry.is_empty() {
            self.drop_focus(surface);
            return Err(Error::NoFocusableElements);
        }
        match self.focused {
            Some(id) if self.registry.contains(id) => {
                surface.apply_focus_visual(id);
                self.last_known_index = self.registry.index_of(id);
                Ok(id)
            }
            stale => {
                if let Some(id) = stale {
                    warn!(error = %Error::StaleFocus(id), "re-anchoring");
                }
                self.reanchor(surface).ok_or(Error::NoFocusableElements)
            }
        }
    }

    /// Dispatch a remote action.
    pub fn handle(
        &mut self,
        surface: &mut dyn Surface,
        shell: &mut dyn Shell,
        action: RemoteAction,
    ) -> Result<Handled> {
        match action.direction() {
            Some(direction) => self.navigate(surface, direction).map(Handled::Navigated),
            None if action == RemoteAction::Activate => {
                Ok(Handled::Activated(self.select_current(surface, shell)))
            }
            None => {
                self.go_back(shell);
                Ok(Handled::Back)
            }
        }
    }

    /// Re-anchor focus after the active view changed.
    ///
    /// Runs one pass now and schedules the delayed passes from
    /// configuration, for content that renders after the view becomes
    /// active. Delayed passes of an earlier view change are discarded.
    pub fn on_view_change(&mut self, surface: &mut dyn Surface, now: Instant) {
        let epoch = self.view_sync.begin();
        self.scheduler
            .cancel(|t| matches!(t, Task::ViewSync { epoch: e } if *e != epoch));
        debug!(epoch, view = ?surface.active_view(), "view changed");
        self.view_sync_pass(surface, false);
        for delay in self.config.timing.view_sync() {
            self.scheduler.schedule(now, delay, Task::ViewSync { epoch });
        }
    }

    /// One view change pass.
    fn view_sync_pass(&mut self, surface: &mut dyn Surface, delayed: bool) {
        self.collect(surface);
        if self.registry.is_empty() {
            self.drop_focus(surface);
            return;
        }
        let stale = self.focused.is_none() || self.focus_is_stale();
        if delayed && !self.view_sync.may_reanchor(self.focus_gen, stale) {
            debug!("focus moved since the view change, leaving it");
            return;
        }
        if let Some(target) = sync::anchor(&self.registry, surface, &self.config.policy.home_view) {
            self.commit(surface, target);
        }
        self.view_sync.generation = Some(self.focus_gen);
    }

    /// Periodic resync: pick up content nobody announced and heal stale
    /// focus.
    fn resync(&mut self, surface: &mut dyn Surface) {
        let before = self.registry.len();
        let after = self.collect(surface);
        if before != after {
            debug!(before, after, "element count changed");
        }
        if let Some(id) = self.focused
            && !self.registry.contains(id)
        {
            warn!(error = %Error::StaleFocus(id), "re-anchoring");
            self.reanchor(surface);
        }
    }

    /// Run every task due at `now`. Returns the number of tasks run.
    pub fn tick(
        &mut self,
        surface: &mut dyn Surface,
        shell: &mut dyn Shell,
        now: Instant,
    ) -> usize {
        let tasks = self.scheduler.collect(now);
        let n = tasks.len();
        for task in tasks {
            match task {
                Task::InitialFocus => {
                    if self.try_initial_focus(surface) {
                        self.scheduler.cancel(|t| *t == Task::InitialFocus);
                    }
                }
                Task::Resync => {
                    self.resync(surface);
                    self.scheduler
                        .schedule(now, self.config.timing.resync_interval(), Task::Resync);
                }
                Task::ViewSync { epoch } => {
                    if epoch == self.view_sync.epoch {
                        self.view_sync_pass(surface, true);
                    }
                }
                Task::Transient(key) => {
                    debug!(%key, "transient timer expired");
                    shell.on_transient_expired(&key);
                }
            }
        }
        n
    }

    /// How long the owner may wait before the next [`tick`](Self::tick) is
    /// needed. `None` if nothing is pending.
    pub fn next_wait(&self, now: Instant) -> Option<Duration> {
        self.scheduler.next_wait(now)
    }

    /// Is a task matching `pred` pending?
    pub fn is_pending(&self, pred: impl Fn(&Task) -> bool) -> bool {
        self.scheduler.contains(pred)
    }

    /// Start or restart a transient timer. Any pending timer with the same
    /// key is cleared first, so repeated activity never accumulates timers.
    pub fn reset_transient(&mut self, key: impl Into<TransientKey>, delay: Duration, now: Instant) {
        let key = key.into();
        self.scheduler
            .cancel(|t| matches!(t, Task::Transient(k) if *k == key));
        self.scheduler.schedule(now, delay, Task::Transient(key));
    }

    /// Clear a transient timer. Returns true if one was pending.
    pub fn cancel_transient(&mut self, key: &TransientKey) -> bool {
        self.scheduler
            .cancel(|t| matches!(t, Task::Transient(k) if k == key))
            > 0
    }
}
