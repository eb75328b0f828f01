//! Key bindings for the interactive slider.

use std::sync::LazyLock;

use crossterm_actions::{AppEvent, InputEvent, TuiEvent, TuiRealmDispatcher, defaults};
use tuirealm::event::KeyEvent;

/// Custom user events (none; tui-realm requires the type).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserEvent {}

/// What a key press asks of the slider host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    /// Put the dragged thumb back where the drag started
    CancelDrag,
}

static DISPATCHER: LazyLock<TuiRealmDispatcher<TuiEvent>> =
    LazyLock::new(|| TuiRealmDispatcher::new(defaults::emacs_defaults()));

/// Map a key press to a slider action: `q` quits, Esc aborts a drag.
pub fn key_action(key: &KeyEvent) -> Option<KeyAction> {
    match DISPATCHER.dispatch(key)? {
        TuiEvent::App(AppEvent::Quit) => Some(KeyAction::Quit),
        TuiEvent::Input(InputEvent::Cancel) => Some(KeyAction::CancelDrag),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tuirealm::event::{Key, KeyModifiers};

    #[test]
    fn quit_and_cancel_are_bound() {
        let quit = KeyEvent::new(Key::Char('q'), KeyModifiers::NONE);
        let esc = KeyEvent::new(Key::Esc, KeyModifiers::NONE);
        assert_eq!(key_action(&quit), Some(KeyAction::Quit));
        assert_eq!(key_action(&esc), Some(KeyAction::CancelDrag));
    }

    #[test]
    fn other_keys_do_nothing() {
        let enter = KeyEvent::new(Key::Enter, KeyModifiers::NONE);
        assert_eq!(key_action(&enter), None);
    }
}
