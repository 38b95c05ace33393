//! Addcalc - keypad addition calculator backed by a remote sum service
//!
//! The crate splits the calculator into three layers:
//!
//! - **Equation builder** ([`core`]): digit, decimal, sign and backspace
//!   editing; `+` commits a term; `=` finishes the equation.
//! - **Request shaping** ([`request`]): a finished equation becomes a path,
//!   query or multipart form request with random two-letter keys.
//! - **Result presentation** ([`presenter`]): `equation=result` on success,
//!   the unresolved equation and a fixed message on failure.
//!
//! [`session::Session`] ties them together with the method menu, the
//! backspace long-press and the single outstanding request.
//!
//! # Example
//!
//! ```rust
//! use addcalc::prelude::*;
//!
//! let mut session = Session::default();
//! for key in [Key::Digit(2), Key::Plus, Key::Digit(3)] {
//!     session.press(key);
//! }
//! assert_eq!(session.press(Key::Equals), Pressed::MenuOpened);
//!
//! let pending = session
//!     .begin(Method::QueryParams, &mut RandomIds::seeded(7))
//!     .unwrap();
//! assert_eq!(pending.equation(), "2+3");
//!
//! // Hand the service's answer back
//! session.finish(&pending, Ok(ResultValue::from(5_i64)));
//! assert_eq!(session.state().equation(), "2+3=5");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod core;
pub mod hold;
pub mod keypad;
pub mod presenter;
pub mod request;
pub mod service;
pub mod session;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::CalcConfig;
    pub use crate::core::{CalcError, CalcResult, CalcState, Finalized, InputBuffer, Key, Step};
    pub use crate::hold::{BackspaceHold, HoldRelease};
    pub use crate::keypad::{Keypad, KeypadButton, MenuEntry, MethodMenu};
    pub use crate::presenter::{AddResponse, ResultValue, FAILURE_MESSAGE};
    pub use crate::request::{shape, AddRequest, IdSource, Method, RandomIds};
    pub use crate::service::{ArithmeticService, HttpArithmetic};
    pub use crate::session::{PendingRequest, Pressed, Session, Snapshot};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_imports() {
        let state = CalcState::new().press_digit(4).commit_term().press_digit(1);
        assert_eq!(state.candidate_equation().as_deref(), Some("4+1"));
    }

    #[test]
    fn test_keypad_drives_session() {
        let mut session = Session::default();
        for name in ["1", ".", "5", "-", "Enter"] {
            let key = Keypad::key_to_action(name).unwrap();
            session.press(key);
        }
        assert_eq!(session.state().equation(), "(-1.5)");
        assert!(session.state().showing_result());
    }

    #[test]
    fn test_menu_then_shape() {
        let mut session = Session::default();
        for key in [Key::Digit(1), Key::Plus, Key::Digit(2), Key::Plus, Key::Digit(3)] {
            session.press(key);
        }
        session.press(Key::Equals);
        let menu = session.menu().unwrap();
        assert_eq!(menu.choose(0), None);
        let method = menu.choose(2).unwrap();
        let pending = session.begin(method, &mut RandomIds::seeded(3)).unwrap();
        assert_eq!(pending.request().method(), Method::FormPost);
        assert_eq!(pending.request().params().len(), 3);
    }
}
