//! Keyboard input handling for the terminal keypad

use addcalc::core::Key;
use addcalc::keypad::Keypad;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Actions that can be triggered by keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuiAction {
    /// A keypad key
    Key(Key),
    /// Backspace went down
    BackspaceDown,
    /// Backspace came up
    BackspaceUp,
    /// Pick a method menu entry (0-based)
    ChooseMethod(usize),
    /// Close the method menu
    CloseMenu,
    /// Quit the application
    Quit,
    /// No action (ignored input)
    None,
}

/// Input handler that maps key events to actions
#[derive(Debug, Default)]
pub struct InputHandler {
    release_events: bool,
}

impl InputHandler {
    /// Creates a handler. `release_events` tells whether the terminal
    /// reports key releases; without them backspace is a plain short press.
    #[must_use]
    pub fn new(release_events: bool) -> Self {
        Self { release_events }
    }

    /// Maps a key event to an action
    #[must_use]
    pub fn handle_key(&self, event: KeyEvent, menu_open: bool) -> TuiAction {
        let KeyEvent {
            code,
            modifiers,
            kind,
            ..
        } = event;

        if modifiers.contains(KeyModifiers::CONTROL) {
            return match (code, kind) {
                (KeyCode::Char('c' | 'q'), KeyEventKind::Press) => TuiAction::Quit,
                _ => TuiAction::None,
            };
        }

        if code == KeyCode::Backspace && !menu_open {
            return self.backspace(kind);
        }
        if kind != KeyEventKind::Press {
            return TuiAction::None;
        }

        if menu_open {
            return Self::menu_key(code);
        }

        match code {
            KeyCode::Char('q') => TuiAction::Quit,
            KeyCode::Enter => TuiAction::Key(Key::Equals),
            KeyCode::Delete => TuiAction::Key(Key::Clear),
            KeyCode::Char(c) => Keypad::key_to_action(c.encode_utf8(&mut [0; 4]))
                .map_or(TuiAction::None, TuiAction::Key),
            _ => TuiAction::None,
        }
    }

    fn backspace(&self, kind: KeyEventKind) -> TuiAction {
        match (self.release_events, kind) {
            (false, KeyEventKind::Press) => TuiAction::Key(Key::Backspace),
            (true, KeyEventKind::Press) => TuiAction::BackspaceDown,
            (true, KeyEventKind::Release) => TuiAction::BackspaceUp,
            _ => TuiAction::None,
        }
    }

    fn menu_key(code: KeyCode) -> TuiAction {
        match code {
            KeyCode::Char(c @ '1'..='3') => {
                TuiAction::ChooseMethod(c as usize - '1' as usize)
            }
            KeyCode::Esc => TuiAction::CloseMenu,
            KeyCode::Char('q') => TuiAction::Quit,
            _ => TuiAction::None,
        }
    }
}
