//! Keypad layout and the method menu.
//!
//! Layout:
//! ```text
//! [ 9 ] [ 8 ] [ 7 ] [ ⌫ ]
//! [ 6 ] [ 5 ] [ 4 ] [ + ]
//! [ 3 ] [ 2 ] [ 1 ] [ ± ]
//! [ 0 ] [ . ] [ = ]
//! ```
//! Holding `⌫` clears everything; there is no separate clear button.

use crate::core::{CalcState, Key};
use crate::request::Method;

/// Returns the button label for a key
#[must_use]
pub fn label(key: Key) -> String {
    match key {
        Key::Digit(d) => d.to_string(),
        Key::Decimal => ".".to_string(),
        Key::Backspace => "⌫".to_string(),
        Key::Clear => "C".to_string(),
        Key::ToggleSign => "±".to_string(),
        Key::Plus => "+".to_string(),
        Key::Equals => "=".to_string(),
    }
}

/// A single keypad button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeypadButton {
    /// The key this button sends
    pub key: Key,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Grid column (0-indexed)
    pub col: usize,
}

impl KeypadButton {
    /// Creates a button at a grid position
    #[must_use]
    pub const fn new(key: Key, row: usize, col: usize) -> Self {
        Self { key, row, col }
    }

    /// The text printed on the button
    #[must_use]
    pub fn label(&self) -> String {
        label(self.key)
    }
}

/// The calculator keypad
#[derive(Debug, Clone)]
pub struct Keypad {
    buttons: Vec<KeypadButton>,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Grid rows
    pub const ROWS: usize = 4;
    /// Grid columns
    pub const COLS: usize = 4;

    /// Creates the standard keypad
    #[must_use]
    pub fn new() -> Self {
        let buttons = vec![
            KeypadButton::new(Key::Digit(9), 0, 0),
            KeypadButton::new(Key::Digit(8), 0, 1),
            KeypadButton::new(Key::Digit(7), 0, 2),
            KeypadButton::new(Key::Backspace, 0, 3),
            KeypadButton::new(Key::Digit(6), 1, 0),
            KeypadButton::new(Key::Digit(5), 1, 1),
            KeypadButton::new(Key::Digit(4), 1, 2),
            KeypadButton::new(Key::Plus, 1, 3),
            KeypadButton::new(Key::Digit(3), 2, 0),
            KeypadButton::new(Key::Digit(2), 2, 1),
            KeypadButton::new(Key::Digit(1), 2, 2),
            KeypadButton::new(Key::ToggleSign, 2, 3),
            KeypadButton::new(Key::Digit(0), 3, 0),
            KeypadButton::new(Key::Decimal, 3, 1),
            KeypadButton::new(Key::Equals, 3, 2),
        ];
        Self { buttons }
    }

    /// All buttons in row-major order
    #[must_use]
    pub fn buttons(&self) -> &[KeypadButton] {
        &self.buttons
    }

    /// Maps a keyboard key name to a keypad key
    #[must_use]
    pub fn key_to_action(key: &str) -> Option<Key> {
        match key {
            "." | "," => Some(Key::Decimal),
            "+" => Some(Key::Plus),
            "=" | "Enter" => Some(Key::Equals),
            "Backspace" => Some(Key::Backspace),
            "Delete" => Some(Key::Clear),
            "-" | "~" | "_" => Some(Key::ToggleSign),
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => c.to_digit(10).map(|d| Key::Digit(d as u8)),
                    _ => None,
                }
            }
        }
    }
}

/// One line of the method menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry {
    /// The method this entry sends with
    pub method: Method,
    /// Whether the entry can be picked
    pub enabled: bool,
}

impl MenuEntry {
    /// Text shown for the entry
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.method.label()
    }
}

/// The menu shown by `=` while terms are pending
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodMenu {
    entries: Vec<MenuEntry>,
}

impl MethodMenu {
    /// Menu heading
    pub const TITLE: &'static str = "choose url and/or method";

    /// Builds the menu for the current state
    #[must_use]
    pub fn for_state(state: &CalcState) -> Self {
        let entries = Method::ALL
            .into_iter()
            .map(|method| MenuEntry {
                method,
                enabled: method.is_available(state),
            })
            .collect();
        Self { entries }
    }

    /// Menu entries in display order
    #[must_use]
    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    /// Whether `method` can be picked
    #[must_use]
    pub fn is_enabled(&self, method: Method) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.method == method && entry.enabled)
    }

    /// Picks the entry at `index`, if it exists and is enabled
    #[must_use]
    pub fn choose(&self, index: usize) -> Option<Method> {
        self.entries
            .get(index)
            .filter(|entry| entry.enabled)
            .map(|entry| entry.method)
    }
}
