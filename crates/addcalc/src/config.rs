//! Calculator configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Runtime settings of a calculator session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalcConfig {
    /// Root of the `/math/add` service
    pub endpoint: String,
    /// How long backspace must be held to clear everything
    pub long_press: Duration,
}

impl Default for CalcConfig {
    fn default() -> Self {
        Self {
            endpoint: Self::DEFAULT_ENDPOINT.to_string(),
            long_press: Self::DEFAULT_LONG_PRESS,
        }
    }
}

impl CalcConfig {
    /// Service endpoint compiled into the calculator
    pub const DEFAULT_ENDPOINT: &'static str = "https://django-test-ui-project.fandogh.cloud/math/add";

    /// Backspace hold time that clears everything
    pub const DEFAULT_LONG_PRESS: Duration = Duration::from_millis(1000);

    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the service endpoint
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the long-press threshold
    #[must_use]
    pub const fn with_long_press(mut self, long_press: Duration) -> Self {
        self.long_press = long_press;
        self
    }
}
