//! Output formatting and the loading spinner

use addcalc::session::Session;
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::error::CliResult;

/// How the final display is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Labelled lines
    #[default]
    Text,
    /// Session snapshot as JSON
    Json,
}

/// Writes the calculator display and drives the loading spinner
#[derive(Debug)]
pub struct Reporter {
    term: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
    /// Output format
    pub format: OutputFormat,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl Reporter {
    /// Create a new reporter writing to stdout
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stdout(),
            use_color,
            quiet,
            format: OutputFormat::Text,
        }
    }

    /// Set the output format
    #[must_use]
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Starts the spinner shown while a request is outstanding
    #[must_use]
    pub fn start_loading(&self, equation: &str) -> Option<ProgressBar> {
        if self.quiet || self.format == OutputFormat::Json {
            return None;
        }
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(format!("Loading {equation}"));
        pb.enable_steady_tick(Duration::from_millis(80));
        Some(pb)
    }

    /// Renders the display lines for a session
    #[must_use]
    pub fn display_lines(&self, session: &Session) -> Vec<String> {
        let state = session.state();
        if self.quiet {
            return vec![state.equation().to_string()];
        }
        let mut lines = vec![
            format!("{} {}", self.label("equation:"), state.equation()),
            format!("{} {}", self.label("input:   "), session.input_display()),
        ];
        if let Some(error) = state.error() {
            let error = if self.use_color {
                style(error).red().bold().to_string()
            } else {
                error.to_string()
            };
            lines.push(format!("{} {error}", self.label("error:   ")));
        }
        lines
    }

    /// Prints the final display
    pub fn print_session(&self, session: &Session) -> CliResult<()> {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(&session.snapshot())?;
                self.term.write_line(&json)?;
            }
            OutputFormat::Text => {
                for line in self.display_lines(session) {
                    self.term.write_line(&line)?;
                }
            }
        }
        Ok(())
    }

    fn label(&self, text: &str) -> String {
        if self.use_color {
            style(text).dim().to_string()
        } else {
            text.to_string()
        }
    }
}
