//! CLI command definitions using clap

use addcalc::request::Method;
use clap::{Parser, Subcommand, ValueEnum};

/// Addcalc: keypad addition calculator backed by a remote sum service
#[derive(Parser, Debug)]
#[command(name = "addcalc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a key script and print the final display
    ///
    /// Keys: digits 0-9, `.` decimal, `~` sign, `<` backspace,
    /// `C` clear, `+` commit term, `=` compute. Whitespace is ignored.
    Eval(EvalArgs),

    /// Interactive terminal keypad
    Tui(TuiArgs),
}

/// Arguments for the eval command
#[derive(Parser, Debug)]
pub struct EvalArgs {
    /// Key script, e.g. "12+3.5~="
    pub keys: String,

    /// How operands are sent when `=` needs the service
    #[arg(short, long, default_value = "query")]
    pub method: MethodArg,

    /// Service endpoint (defaults to the built-in one)
    #[arg(short, long)]
    pub endpoint: Option<String>,

    /// Print the final state as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the tui command
#[derive(Parser, Debug)]
pub struct TuiArgs {
    /// Service endpoint (defaults to the built-in one)
    #[arg(short, long)]
    pub endpoint: Option<String>,

    /// Backspace hold time that clears everything, in milliseconds
    #[arg(long, default_value = "1000")]
    pub long_press_ms: u64,
}

/// Request shape
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MethodArg {
    /// GET {endpoint}/{a}/{b}
    Path,
    /// GET {endpoint}?k1=a&k2=b...
    #[default]
    Query,
    /// POST {endpoint}/ as a multipart form
    Form,
}

impl From<MethodArg> for Method {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Path => Self::PathParams,
            MethodArg::Query => Self::QueryParams,
            MethodArg::Form => Self::FormPost,
        }
    }
}

/// Color output argument
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
