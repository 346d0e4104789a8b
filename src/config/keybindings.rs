//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::KeyEvent;
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Provides default vim-style bindings with option to override via configuration.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&key).copied()
    }

    /// Bind `key` to `action`, replacing any previous binding of `key`.
    pub fn bind(&mut self, key: KeyEvent, action: KeyAction) {
        self.bindings.insert(key, action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        use crossterm::event::{KeyCode, KeyModifiers};

        let mut bindings = HashMap::new();
        let mut bind = |code: KeyCode, mods: KeyModifiers, action: KeyAction| {
            bindings.insert(KeyEvent::new(code, mods), action);
        };

        // Vim-style scrolling
        bind(KeyCode::Char('j'), KeyModifiers::NONE, KeyAction::ScrollDown);
        bind(KeyCode::Char('k'), KeyModifiers::NONE, KeyAction::ScrollUp);
        bind(KeyCode::Char('g'), KeyModifiers::NONE, KeyAction::ScrollToTop);
        bind(KeyCode::Char('G'), KeyModifiers::SHIFT, KeyAction::ScrollToBottom);
        bind(KeyCode::Home, KeyModifiers::NONE, KeyAction::ScrollToTop);
        bind(KeyCode::End, KeyModifiers::NONE, KeyAction::ScrollToBottom);

        // Arrow key scrolling
        bind(KeyCode::Up, KeyModifiers::NONE, KeyAction::ScrollUp);
        bind(KeyCode::Down, KeyModifiers::NONE, KeyAction::ScrollDown);

        // Page navigation
        bind(KeyCode::Char('d'), KeyModifiers::CONTROL, KeyAction::PageDown);
        bind(KeyCode::Char('u'), KeyModifiers::CONTROL, KeyAction::PageUp);
        bind(KeyCode::PageDown, KeyModifiers::NONE, KeyAction::PageDown);
        bind(KeyCode::PageUp, KeyModifiers::NONE, KeyAction::PageUp);

        // Tab navigation
        bind(KeyCode::Tab, KeyModifiers::NONE, KeyAction::NextTab);
        bind(KeyCode::Char(']'), KeyModifiers::NONE, KeyAction::NextTab);
        bind(KeyCode::Char('['), KeyModifiers::NONE, KeyAction::PrevTab);
        bind(KeyCode::BackTab, KeyModifiers::SHIFT, KeyAction::PrevTab);

        // Routing
        bind(KeyCode::Char('1'), KeyModifiers::NONE, KeyAction::GoHome);
        bind(KeyCode::Char('2'), KeyModifiers::NONE, KeyAction::GoNotifications);
        bind(KeyCode::Char('3'), KeyModifiers::NONE, KeyAction::GoSearch);
        bind(KeyCode::Char('p'), KeyModifiers::NONE, KeyAction::GoOwnProfile);
        bind(KeyCode::Enter, KeyModifiers::NONE, KeyAction::OpenSelected);
        bind(KeyCode::Char('o'), KeyModifiers::NONE, KeyAction::OpenPost);
        bind(KeyCode::Esc, KeyModifiers::NONE, KeyAction::Back);
        bind(KeyCode::Backspace, KeyModifiers::NONE, KeyAction::Back);

        // Page actions
        bind(KeyCode::Char('/'), KeyModifiers::NONE, KeyAction::StartSearch);
        bind(KeyCode::Char('r'), KeyModifiers::NONE, KeyAction::Refresh);
        bind(KeyCode::Char('f'), KeyModifiers::NONE, KeyAction::ToggleFollow);

        // Application controls
        bind(KeyCode::Char('q'), KeyModifiers::NONE, KeyAction::Quit);
        bind(KeyCode::Char('?'), KeyModifiers::NONE, KeyAction::Help);

        Self { bindings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn default_bindings_map_digits_to_routes() {
        let bindings = KeyBindings::default();
        let key = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);

        assert_eq!(bindings.get(key('1')), Some(KeyAction::GoHome));
        assert_eq!(bindings.get(key('2')), Some(KeyAction::GoNotifications));
        assert_eq!(bindings.get(key('3')), Some(KeyAction::GoSearch));
    }

    #[test]
    fn default_bindings_open_posts_and_toggle_follow() {
        let bindings = KeyBindings::default();
        let key = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);

        assert_eq!(bindings.get(key('o')), Some(KeyAction::OpenPost));
        assert_eq!(bindings.get(key('f')), Some(KeyAction::ToggleFollow));
    }

    #[test]
    fn default_bindings_map_uppercase_g_with_shift_to_bottom() {
        let bindings = KeyBindings::default();
        let key_event = KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT);

        assert_eq!(
            bindings.get(key_event),
            Some(KeyAction::ScrollToBottom),
            "Uppercase 'G' (shift+g) should jump to the bottom"
        );
    }

    #[test]
    fn unbound_key_has_no_action() {
        let bindings = KeyBindings::default();
        let key_event = KeyEvent::new(KeyCode::Char('z'), KeyModifiers::NONE);
        assert_eq!(bindings.get(key_event), None);
    }

    #[test]
    fn bind_overrides_default() {
        let mut bindings = KeyBindings::default();
        let key_event = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        bindings.bind(key_event, KeyAction::Back);
        assert_eq!(bindings.get(key_event), Some(KeyAction::Back));
    }
}
