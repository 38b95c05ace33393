//! Backspace long-press detection.
//!
//! A single-shot timer armed when backspace goes down and disarmed when it
//! comes back up. Times are passed in so frontends and tests share one clock.

use std::time::{Duration, Instant};

/// What a backspace release should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldRelease {
    /// Released before the threshold: delete one character
    Short,
    /// Held past the threshold without a poll noticing: clear everything now
    Long,
    /// The long press already fired from [`BackspaceHold::poll`]
    Consumed,
    /// Release without a matching press
    Idle,
}

/// Single-shot long-press timer for the backspace key
#[derive(Debug, Clone)]
pub struct BackspaceHold {
    threshold: Duration,
    pressed_at: Option<Instant>,
    fired: bool,
}

impl BackspaceHold {
    /// Creates a timer firing after `threshold`
    #[must_use]
    pub const fn new(threshold: Duration) -> Self {
        Self {
            threshold,
            pressed_at: None,
            fired: false,
        }
    }

    /// The configured hold time
    #[must_use]
    pub const fn threshold(&self) -> Duration {
        self.threshold
    }

    /// Whether backspace is currently down
    #[must_use]
    pub const fn is_held(&self) -> bool {
        self.pressed_at.is_some()
    }

    /// Arms the timer
    pub fn press(&mut self, now: Instant) {
        self.pressed_at = Some(now);
        self.fired = false;
    }

    /// Returns true exactly once, when the key has been held long enough
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.pressed_at {
            Some(at) if !self.fired && now.saturating_duration_since(at) >= self.threshold => {
                self.fired = true;
                true
            }
            _ => false,
        }
    }

    /// Disarms the timer and reports what the release means
    pub fn release(&mut self, now: Instant) -> HoldRelease {
        let Some(at) = self.pressed_at.take() else {
            return HoldRelease::Idle;
        };
        if std::mem::take(&mut self.fired) {
            HoldRelease::Consumed
        } else if now.saturating_duration_since(at) >= self.threshold {
            HoldRelease::Long
        } else {
            HoldRelease::Short
        }
    }
}
