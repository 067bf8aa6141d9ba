//! Decoding of platform key codes into remote actions.
//!
//! TV browsers deliver remote buttons as legacy numeric key codes. The
//! directional pad and enter share the desktop codes, while each platform
//! has its own code for the back button.
use std::collections::HashMap;

use super::RemoteAction;
use crate::config::KeyBinding;

/// Well-known key codes.
pub mod codes {
    /// Backspace.
    pub const BACKSPACE: u32 = 8;
    /// Enter / OK.
    pub const ENTER: u32 = 13;
    /// Escape.
    pub const ESCAPE: u32 = 27;
    /// Space.
    pub const SPACE: u32 = 32;
    /// Left arrow.
    pub const LEFT: u32 = 37;
    /// Up arrow.
    pub const UP: u32 = 38;
    /// Right arrow.
    pub const RIGHT: u32 = 39;
    /// Down arrow.
    pub const DOWN: u32 = 40;
    /// webOS back.
    pub const WEBOS_BACK: u32 = 461;
    /// Tizen return.
    pub const TIZEN_RETURN: u32 = 10009;
}

/// Maps key codes to remote actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMap {
    /// Code to action table.
    bindings: HashMap<u32, RemoteAction>,
}

impl Default for KeyMap {
    fn default() -> Self {
        use codes::*;
        let bindings = [
            (LEFT, RemoteAction::MoveLeft),
            (UP, RemoteAction::MoveUp),
            (RIGHT, RemoteAction::MoveRight),
            (DOWN, RemoteAction::MoveDown),
            (ENTER, RemoteAction::Activate),
            (SPACE, RemoteAction::Activate),
            (TIZEN_RETURN, RemoteAction::Cancel),
            (WEBOS_BACK, RemoteAction::Cancel),
            (BACKSPACE, RemoteAction::Cancel),
            (ESCAPE, RemoteAction::Cancel),
        ]
        .into_iter()
        .collect();
        Self { bindings }
    }
}

impl KeyMap {
    /// The default map with `extra` bindings layered on top.
    pub fn with_bindings<'a>(extra: impl IntoIterator<Item = &'a KeyBinding>) -> Self {
        let mut map = Self::default();
        for b in extra {
            map.bind(b.code, b.action);
        }
        map
    }

    /// Bind a code, replacing any existing binding. Returns the replaced
    /// action.
    pub fn bind(&mut self, code: u32, action: RemoteAction) -> Option<RemoteAction> {
        self.bindings.insert(code, action)
    }

    /// Remove a binding.
    pub fn unbind(&mut self, code: u32) -> Option<RemoteAction> {
        self.bindings.remove(&code)
    }

    /// Decode a key code. Unbound codes are not ours to handle.
    pub fn decode(&self, code: u32) -> Option<RemoteAction> {
        self.bindings.get(&code).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::{codes::*, *};

    #[test]
    fn default_codes() {
        let km = KeyMap::default();
        assert_eq!(km.decode(LEFT), Some(RemoteAction::MoveLeft));
        assert_eq!(km.decode(UP), Some(RemoteAction::MoveUp));
        assert_eq!(km.decode(RIGHT), Some(RemoteAction::MoveRight));
        assert_eq!(km.decode(DOWN), Some(RemoteAction::MoveDown));
        assert_eq!(km.decode(ENTER), Some(RemoteAction::Activate));
        assert_eq!(km.decode(SPACE), Some(RemoteAction::Activate));
        for back in [TIZEN_RETURN, WEBOS_BACK, BACKSPACE, ESCAPE] {
            assert_eq!(km.decode(back), Some(RemoteAction::Cancel));
        }
        assert_eq!(km.decode(65), None);
    }

    #[test]
    fn extra_bindings_override() {
        let extra = [
            KeyBinding {
                code: SPACE,
                action: RemoteAction::Cancel,
            },
            KeyBinding {
                code: 415,
                action: RemoteAction::Activate,
            },
        ];
        let mut km = KeyMap::with_bindings(&extra);
        assert_eq!(km.decode(SPACE), Some(RemoteAction::Cancel));
        assert_eq!(km.decode(415), Some(RemoteAction::Activate));
        assert_eq!(km.unbind(415), Some(RemoteAction::Activate));
        assert_eq!(km.decode(415), None);
    }
}
