use std::time::Instant;

use tvfocus::{
    config::KeyBinding,
    event::key::codes,
    testing::{RecordingShell, storefront},
    *,
};

#[test]
fn test_handle_actions() -> Result<()> {
    let (mut s, ids) = storefront();
    let mut shell = RecordingShell::new();
    let mut session = NavigationSession::default();
    session.init(&mut s, Instant::now());

    let h = session.handle(&mut s, &mut shell, RemoteAction::MoveRight)?;
    assert_eq!(
        h,
        Handled::Navigated(Navigation::Moved {
            from: Some(ids.home),
            to: ids.shows,
            via: Via::Spatial
        })
    );
    assert_eq!(
        session.handle(&mut s, &mut shell, RemoteAction::Activate)?,
        Handled::Activated(Some(ids.shows))
    );
    assert_eq!(session.handle(&mut s, &mut shell, RemoteAction::Cancel)?, Handled::Back);
    assert_eq!(shell.activated, vec![ids.shows]);
    assert_eq!(shell.backs, 1);
    Ok(())
}

#[test]
fn test_activate_without_focus() -> Result<()> {
    let (mut s, _) = storefront();
    let mut shell = RecordingShell::new();
    let mut session = NavigationSession::default();
    assert_eq!(
        session.handle(&mut s, &mut shell, RemoteAction::Activate)?,
        Handled::Activated(None)
    );
    assert!(shell.activated.is_empty());
    Ok(())
}

#[test]
fn test_key_dispatch() -> Result<()> {
    let (mut s, ids) = storefront();
    let mut shell = RecordingShell::new();
    let config = Config::from_toml_str(
        r#"
        [[keys]]
        code = 403
        action = "activate"
        "#,
    )?;
    let keys = KeyMap::with_bindings(&config.keys);
    let mut session = NavigationSession::new(config);
    session.init(&mut s, Instant::now());

    for code in [codes::DOWN, codes::RIGHT, 403, 9999] {
        if let Some(action) = keys.decode(code) {
            session.handle(&mut s, &mut shell, action)?;
        }
    }
    assert_eq!(shell.activated, vec![ids.cards[1]]);

    for code in [codes::ESCAPE, codes::BACKSPACE, codes::TIZEN_RETURN, codes::WEBOS_BACK] {
        assert_eq!(keys.decode(code), Some(RemoteAction::Cancel));
    }
    assert_eq!(keys.decode(codes::SPACE), Some(RemoteAction::Activate));
    Ok(())
}

#[test]
fn test_unbound_keys() {
    let mut keys = KeyMap::with_bindings(&[KeyBinding {
        code: codes::SPACE,
        action: RemoteAction::MoveDown,
    }]);
    assert_eq!(keys.decode(codes::SPACE), Some(RemoteAction::MoveDown));
    assert_eq!(keys.unbind(codes::UP), Some(RemoteAction::MoveUp));
    assert_eq!(keys.decode(codes::UP), None);
}

#[test]
fn test_activate_removed_element() -> Result<()> {
    let (mut s, ids) = storefront();
    let mut shell = RecordingShell::new();
    let mut session = NavigationSession::default();
    session.init(&mut s, Instant::now());
    assert!(session.set_focus(&mut s, ids.cards[1]));

    s.remove(ids.cards[1]);
    assert_eq!(
        session.handle(&mut s, &mut shell, RemoteAction::Activate)?,
        Handled::Activated(None)
    );
    assert!(shell.activated.is_empty());
    assert_eq!(session.state(), SessionState::Focused(ids.home));
    assert!(session.registry().contains(ids.home));
    assert!(!session.registry().contains(ids.cards[1]));
    assert_eq!(s.visual_focus(), vec![ids.home]);

    // The re-anchored element activates normally on the next press.
    assert_eq!(
        session.handle(&mut s, &mut shell, RemoteAction::Activate)?,
        Handled::Activated(Some(ids.home))
    );
    assert_eq!(shell.activated, vec![ids.home]);
    Ok(())
}
