//! Core keypad state: the input buffer and the running equation.
//!
//! Everything here is synchronous and pure. Network concerns live in
//! [`crate::request`] and [`crate::service`].

pub mod equation;
pub mod input;

pub use equation::{CalcState, Finalized, Key, Step};
pub use input::{signed_term, trim_input, InputBuffer};

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// The remote service failed, for whatever reason
    #[error("remote computation failed")]
    RemoteComputationFailed,

    /// A request is already outstanding
    #[error("a request is already in flight")]
    RequestInFlight,

    /// There is no pending equation to send
    #[error("nothing to compute: the equation has a single term")]
    NothingToCompute,

    /// Path parameters carry exactly two operands
    #[error("path parameters need exactly two operands, found {found}")]
    PathParamsArity {
        /// Number of operands in the equation
        found: usize,
    },

    /// More operands than distinct request keys
    #[error("{count} operands exceed the {max} available request keys")]
    TooManyOperands {
        /// Number of operands requested
        count: usize,
        /// Size of the key space
        max: usize,
    },
}
