//! The digit buffer being typed and the term formatting rules.

use serde::Serialize;
use std::fmt;

/// Digits of the term currently being typed.
///
/// Starts as `"0"`, never holds more than one `.`, and never carries a sign
/// (the sign is tracked by [`crate::core::CalcState`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct InputBuffer(String);

impl Default for InputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBuffer {
    /// The untouched buffer value
    pub const ZERO: &'static str = "0";

    /// Creates a buffer holding `"0"`
    #[must_use]
    pub fn new() -> Self {
        Self(Self::ZERO.to_string())
    }

    /// Returns the raw buffer text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the buffer is exactly `"0"`
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == Self::ZERO
    }

    /// Returns true if the buffer already holds a decimal point
    #[must_use]
    pub fn has_decimal(&self) -> bool {
        self.0.contains('.')
    }

    /// Types a digit. A lone `"0"` is replaced, anything else is appended.
    /// Values above 9 are ignored.
    pub fn push_digit(&mut self, digit: u8) {
        let Some(c) = char::from_digit(u32::from(digit), 10) else {
            return;
        };
        if self.is_zero() {
            self.0.clear();
        }
        self.0.push(c);
    }

    /// Types a zero; no-op while the buffer is `"0"`
    pub fn push_zero(&mut self) {
        if !self.is_zero() {
            self.push_digit(0);
        }
    }

    /// Types a decimal point unless one is already present
    pub fn push_decimal(&mut self) {
        if !self.has_decimal() {
            self.0.push('.');
        }
    }

    /// Drops the last character, falling back to `"0"`
    pub fn backspace(&mut self) {
        if self.0.len() > 1 {
            self.0.pop();
        } else {
            self.reset();
        }
    }

    /// Resets the buffer to `"0"`
    pub fn reset(&mut self) {
        Self::ZERO.clone_into(&mut self.0);
    }

    /// Returns the buffer with [`trim_input`] applied
    #[must_use]
    pub fn trimmed(&self) -> String {
        trim_input(&self.0)
    }
}

impl fmt::Display for InputBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Strips trailing zeros after a decimal point, then a dangling point.
///
/// `"3.50"` becomes `"3.5"`, `"3.00"` and `"3."` become `"3"`, and `"30"`
/// is left alone.
#[must_use]
pub fn trim_input(input: &str) -> String {
    let mut trimmed = input;
    if trimmed.contains('.') {
        trimmed = trimmed.trim_end_matches('0');
    }
    if trimmed.ends_with('.') {
        trimmed = trimmed.trim_end_matches('.');
    }
    trimmed.to_string()
}

/// Renders a trimmed term as it appears in the equation.
///
/// Negative terms are wrapped as `(-v)`; zero never carries a sign.
#[must_use]
pub fn signed_term(trimmed: &str, negative: bool) -> String {
    if negative && trimmed != InputBuffer::ZERO {
        format!("(-{trimmed})")
    } else {
        trimmed.to_string()
    }
}
