//! Turns a remote response, or its absence, into the final display.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::CalcState;

/// Message shown when the service does not answer properly
pub const FAILURE_MESSAGE: &str = "Something went wrong";

/// The `result` field of a service response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResultValue {
    /// A JSON number
    Number(serde_json::Number),
    /// Some services quote their numbers
    Text(String),
}

impl fmt::Display for ResultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => {
                if n.is_i64() || n.is_u64() {
                    write!(f, "{n}")
                } else if let Some(x) = n.as_f64() {
                    // adding zero folds -0 into 0
                    write!(f, "{}", x + 0.0)
                } else {
                    write!(f, "{n}")
                }
            }
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ResultValue {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<f64> for ResultValue {
    fn from(x: f64) -> Self {
        serde_json::Number::from_f64(x).map_or_else(|| Self::Text(x.to_string()), Self::Number)
    }
}

/// Body returned by every endpoint shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddResponse {
    /// The computed sum
    pub result: ResultValue,
}

/// Renders a result, parenthesized when it is negative
#[must_use]
pub fn format_result(value: &ResultValue) -> String {
    let text = value.to_string();
    if text.starts_with('-') {
        format!("({text})")
    } else {
        text
    }
}

/// Shows `equation=result` and leaves the keypad in result state
#[must_use]
pub fn on_success(state: CalcState, equation: &str, value: &ResultValue) -> CalcState {
    let shown = format!("{equation}={}", format_result(value));
    tracing::info!(%shown, "remote computation succeeded");
    state.show(shown, None)
}

/// Keeps the unresolved equation on display together with [`FAILURE_MESSAGE`]
#[must_use]
pub fn on_failure(state: CalcState, equation: &str) -> CalcState {
    state.show(equation.to_string(), Some(FAILURE_MESSAGE.to_string()))
}
