use std::time::{Duration, Instant};

use tvfocus::{
    poll::Task,
    testing::{RecordingShell, Storefront, TestSurface, storefront},
    *,
};

/// Switch the storefront to the "shows" view, which has two cards of its
/// own.
fn show_shows(s: &mut TestSurface) -> [ElementId; 2] {
    s.set_active_view(Some("shows"));
    [0, 120].map(|x| s.add_in(ElementClass::VideoCard, "shows", Rect::new(x, 100, 100, 100)))
}

fn setup() -> (TestSurface, Storefront, NavigationSession, Instant) {
    let (mut s, ids) = storefront();
    let now = Instant::now();
    let mut session = NavigationSession::default();
    session.init(&mut s, now);
    (s, ids, session, now)
}

const MS_100: Duration = Duration::from_millis(100);
const MS_500: Duration = Duration::from_millis(500);

#[test]
fn test_view_change_anchors_to_view_nav() {
    let (mut s, ids, mut session, now) = setup();
    session.set_focus(&mut s, ids.cards[2]);
    let shows = show_shows(&mut s);

    session.on_view_change(&mut s, now);
    assert_eq!(session.focused(), Some(ids.shows));
    assert!(!session.registry().contains(ids.cards[0]), "old view content is filtered");
    assert!(session.registry().contains(shows[0]));
    assert_eq!(s.visual_focus(), vec![ids.shows]);
}

#[test]
fn test_view_default_focus_preferred() {
    let (mut s, _, mut session, now) = setup();
    let shows = show_shows(&mut s);
    s.set_default_focus("shows", shows[1]);
    session.on_view_change(&mut s, now);
    assert_eq!(session.focused(), Some(shows[1]));
}

#[test]
fn test_view_without_nav_goes_home() {
    let (mut s, ids, mut session, now) = setup();
    session.set_focus(&mut s, ids.about);
    s.set_active_view(Some("settings"));
    session.on_view_change(&mut s, now);
    assert_eq!(session.focused(), Some(ids.home));
}

#[test]
fn test_delayed_pass_picks_up_late_content() {
    let (mut s, ids, mut session, now) = setup();
    let mut shell = RecordingShell::new();
    show_shows(&mut s);
    session.on_view_change(&mut s, now);
    assert_eq!(session.focused(), Some(ids.shows));

    // The view's designated target renders after the first pass.
    let late = s.add_in(ElementClass::CallToAction, "shows", Rect::new(0, 300, 200, 40));
    s.set_default_focus("shows", late);
    assert_eq!(session.tick(&mut s, &mut shell, now + MS_100), 1);
    assert_eq!(session.focused(), Some(late));

    assert_eq!(session.tick(&mut s, &mut shell, now + MS_500), 1);
    assert_eq!(session.focused(), Some(late));
    assert!(!session.is_pending(|t| matches!(t, Task::ViewSync { .. })));
}

#[test]
fn test_delayed_pass_does_not_steal_focus() -> Result<()> {
    let (mut s, ids, mut session, now) = setup();
    let mut shell = RecordingShell::new();
    let shows = show_shows(&mut s);
    s.set_default_focus("shows", shows[1]);
    session.on_view_change(&mut s, now);
    assert_eq!(session.focused(), Some(shows[1]));

    // The user moves before the delayed passes run.
    session.navigate(&mut s, Direction::Up)?;
    assert_eq!(session.focused(), Some(ids.shows));

    session.tick(&mut s, &mut shell, now + MS_100);
    session.tick(&mut s, &mut shell, now + MS_500);
    assert_eq!(session.focused(), Some(ids.shows), "user focus survives delayed passes");
    Ok(())
}

#[test]
fn test_delayed_pass_heals_stale_focus() -> Result<()> {
    let (mut s, ids, mut session, now) = setup();
    let mut shell = RecordingShell::new();
    let shows = show_shows(&mut s);
    session.on_view_change(&mut s, now);
    session.navigate(&mut s, Direction::Down)?;
    assert_eq!(session.focused(), Some(shows[0]));

    s.remove(shows[0]);
    session.tick(&mut s, &mut shell, now + MS_100);
    assert_eq!(session.focused(), Some(ids.shows));
    Ok(())
}

#[test]
fn test_new_view_change_discards_older_passes() {
    let (mut s, _, mut session, now) = setup();
    let mut shell = RecordingShell::new();
    show_shows(&mut s);
    session.on_view_change(&mut s, now);
    session.on_view_change(&mut s, now);
    assert!(!session.is_pending(|t| *t == Task::ViewSync { epoch: 1 }));
    assert!(session.is_pending(|t| *t == Task::ViewSync { epoch: 2 }));
    assert_eq!(session.tick(&mut s, &mut shell, now + MS_500), 2);
}

#[test]
fn test_view_change_to_empty_view_drops_focus() {
    let (mut s, ids, mut session, now) = setup();
    for id in [ids.home, ids.shows, ids.about] {
        s.remove(id);
    }
    s.set_active_view(Some("player"));
    session.on_view_change(&mut s, now);
    assert_eq!(session.focused(), None);
    assert_eq!(session.state(), SessionState::Unfocused);
    assert!(s.visual_focus().is_empty());
}
