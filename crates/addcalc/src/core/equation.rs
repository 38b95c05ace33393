//! Equation builder: pure keypad transitions over [`CalcState`].
//!
//! Every edit takes the state by value and returns the next one, so a
//! frontend only ever holds a single owned snapshot.

use serde::Serialize;

use super::input::{signed_term, InputBuffer};

/// A keypad event understood by the equation builder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A digit 0-9
    Digit(u8),
    /// The decimal point
    Decimal,
    /// Short backspace
    Backspace,
    /// Long backspace: wipe everything
    Clear,
    /// Flip the sign of the term being typed
    ToggleSign,
    /// Commit the current term with `+`
    Plus,
    /// Finish the equation
    Equals,
}

/// Keypad state: the buffer being typed and the equation committed so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalcState {
    input: InputBuffer,
    negative: bool,
    equation: String,
    showing_result: bool,
    error: Option<String>,
}

/// Outcome of pressing `=`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finalized {
    /// A single term was shown as its own result, no request needed
    Shown(CalcState),
    /// A result was already on display; the keypad starts over
    Reset(CalcState),
    /// The equation has several terms and must be summed remotely
    Remote {
        /// State left untouched until the response arrives
        state: CalcState,
        /// Committed terms followed by the term being typed
        equation: String,
    },
}

impl Finalized {
    /// Returns the state carried by this outcome
    #[must_use]
    pub fn into_state(self) -> CalcState {
        match self {
            Self::Shown(state) | Self::Reset(state) | Self::Remote { state, .. } => state,
        }
    }
}

/// Outcome of [`CalcState::apply`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// An editing key produced a new state
    Edited(CalcState),
    /// `=` was pressed
    Finalized(Finalized),
}

impl Step {
    /// Returns the resulting state regardless of the step kind
    #[must_use]
    pub fn into_state(self) -> CalcState {
        match self {
            Self::Edited(state) => state,
            Self::Finalized(done) => done.into_state(),
        }
    }
}

impl Default for CalcState {
    fn default() -> Self {
        Self::new()
    }
}

impl CalcState {
    /// Equation text before anything is committed
    pub const EMPTY_EQUATION: &'static str = "0";

    /// Creates the initial state
    #[must_use]
    pub fn new() -> Self {
        Self {
            input: InputBuffer::new(),
            negative: false,
            equation: Self::EMPTY_EQUATION.to_string(),
            showing_result: false,
            error: None,
        }
    }

    /// The buffer being typed
    #[must_use]
    pub fn input(&self) -> &InputBuffer {
        &self.input
    }

    /// Whether the minus toggle is on
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// The committed equation, or the final display once a result is shown
    #[must_use]
    pub fn equation(&self) -> &str {
        &self.equation
    }

    /// Whether the equation line currently shows a final result
    #[must_use]
    pub fn showing_result(&self) -> bool {
        self.showing_result
    }

    /// Message left by a failed remote computation
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Number of `+` operators in the committed equation
    #[must_use]
    pub fn committed_operators(&self) -> usize {
        self.equation.matches('+').count()
    }

    /// Whether `=` would have to go to the remote service
    #[must_use]
    pub fn has_pending_terms(&self) -> bool {
        !self.showing_result && self.equation != Self::EMPTY_EQUATION
    }

    /// The current term as it would be committed: trimmed, sign applied
    #[must_use]
    pub fn current_term(&self) -> String {
        signed_term(&self.input.trimmed(), self.negative)
    }

    /// The full equation `=` would send, if there are pending terms
    #[must_use]
    pub fn candidate_equation(&self) -> Option<String> {
        self.has_pending_terms()
            .then(|| format!("{}{}", self.equation, self.current_term()))
    }

    /// Leaves a result display, if one is shown
    #[must_use]
    pub fn reset_result(self) -> Self {
        if self.showing_result {
            Self::new()
        } else {
            self
        }
    }

    /// Types a digit
    #[must_use]
    pub fn press_digit(self, digit: u8) -> Self {
        let mut next = self.reset_result();
        next.input.push_digit(digit);
        next
    }

    /// Types a zero, ignored while the buffer is `"0"`
    #[must_use]
    pub fn press_zero(self) -> Self {
        let mut next = self.reset_result();
        next.input.push_zero();
        next
    }

    /// Types a decimal point, at most once per term
    #[must_use]
    pub fn press_decimal(self) -> Self {
        let mut next = self.reset_result();
        next.input.push_decimal();
        next
    }

    /// Short backspace press
    #[must_use]
    pub fn press_backspace(self) -> Self {
        let mut next = self.reset_result();
        next.input.backspace();
        next
    }

    /// Long backspace press: everything back to the initial state
    #[must_use]
    pub fn clear_all(self) -> Self {
        Self::new()
    }

    /// Flips the sign of the term being typed.
    ///
    /// A zero term still toggles; the sign is dropped when it is committed.
    #[must_use]
    pub fn toggle_sign(self) -> Self {
        let mut next = self.reset_result();
        next.negative = !next.negative;
        next
    }

    /// Appends the current term and a `+` to the equation
    #[must_use]
    pub fn commit_term(self) -> Self {
        let mut next = self.reset_result();
        let term = next.current_term();
        let prefix = if next.equation == Self::EMPTY_EQUATION {
            ""
        } else {
            next.equation.as_str()
        };
        next.equation = format!("{prefix}{term}+");
        next.input.reset();
        next.negative = false;
        next
    }

    /// Presses `=`
    #[must_use]
    pub fn finalize(self) -> Finalized {
        if self.showing_result {
            return Finalized::Reset(self.reset_result());
        }
        if let Some(equation) = self.candidate_equation() {
            return Finalized::Remote {
                state: self,
                equation,
            };
        }
        let value = self.current_term();
        Finalized::Shown(self.show(value, None))
    }

    /// Dispatches a keypad event
    #[must_use]
    pub fn apply(self, key: Key) -> Step {
        let next = match key {
            Key::Digit(0) => self.press_zero(),
            Key::Digit(d) => self.press_digit(d),
            Key::Decimal => self.press_decimal(),
            Key::Backspace => self.press_backspace(),
            Key::Clear => self.clear_all(),
            Key::ToggleSign => self.toggle_sign(),
            Key::Plus => self.commit_term(),
            Key::Equals => return Step::Finalized(self.finalize()),
        };
        Step::Edited(next)
    }

    /// Puts `display` on the equation line as a final result
    pub(crate) fn show(mut self, display: String, error: Option<String>) -> Self {
        self.equation = display;
        self.showing_result = true;
        self.error = error;
        self.input.reset();
        self.negative = false;
        self
    }
}
