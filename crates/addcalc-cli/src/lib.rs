//! Addcalc CLI library
//!
//! Command-line and terminal frontends for the `addcalc` keypad.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![cfg_attr(
    test,
    allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)
)]

mod commands;
mod config;
mod error;
pub mod logging;
mod output;
pub mod script;
pub mod tui;

pub use commands::{Cli, ColorArg, Commands, EvalArgs, MethodArg, TuiArgs};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::{OutputFormat, Reporter};
