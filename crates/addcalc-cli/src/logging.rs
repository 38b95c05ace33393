//! Log output for the CLI.
//!
//! Library events go to stderr through `tracing-subscriber`. `RUST_LOG`
//! wins over the level picked from `-v`/`-q`.

use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;

/// Builds the filter for a configuration
#[must_use]
pub fn filter_for(config: &CliConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.verbosity.log_filter()))
}

/// Installs the global subscriber. A second call is a no-op.
pub fn init(config: &CliConfig) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_for(config))
        .with_writer(std::io::stderr)
        .with_ansi(config.color.should_color())
        .with_target(config.verbosity.is_verbose())
        .try_init();
}

/// Installs a subscriber that stays silent unless `-v` was given, so log
/// lines do not land on the raw-mode screen.
pub fn init_for_tui(config: &CliConfig) {
    if config.verbosity.is_verbose() {
        init(config);
    }
}
