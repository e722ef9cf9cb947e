//! Frame-clock timers
//!
//! Stages never schedule real callbacks. A [`Deferred`] counts down with the
//! frame deltas its owner feeds it, so dropping or cancelling the owner makes a
//! late firing impossible.

use serde::{Deserialize, Serialize};

/// One-shot countdown that fires exactly once unless cancelled
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Deferred {
    remaining_ms: Option<f32>,
}

impl Deferred {
    /// Arm (or re-arm) the countdown
    pub fn start(&mut self, delay_ms: f32) {
        self.remaining_ms = Some(delay_ms.max(0.0));
    }

    pub fn cancel(&mut self) {
        self.remaining_ms = None;
    }

    pub fn is_pending(&self) -> bool {
        self.remaining_ms.is_some()
    }

    pub fn remaining_ms(&self) -> Option<f32> {
        self.remaining_ms
    }

    /// Advance by `dt_ms`. Returns true on the tick the countdown elapses and
    /// disarms itself.
    pub fn advance(&mut self, dt_ms: f32) -> bool {
        match self.remaining_ms {
            Some(remaining) => {
                let left = remaining - dt_ms;
                if left <= 0.0 {
                    self.remaining_ms = None;
                    true
                } else {
                    self.remaining_ms = Some(left);
                    false
                }
            }
            None => false,
        }
    }
}

/// Rate limiter for repeating actions (firing, boss attacks)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cooldown {
    elapsed_ms: f32,
}

impl Default for Cooldown {
    fn default() -> Self {
        Self::ready()
    }
}

impl Cooldown {
    /// A cooldown whose first trigger succeeds whatever the interval
    pub fn ready() -> Self {
        Self {
            elapsed_ms: f32::INFINITY,
        }
    }

    pub fn advance(&mut self, dt_ms: f32) {
        self.elapsed_ms += dt_ms;
    }

    /// Consume the cooldown if at least `interval_ms` has passed
    pub fn try_trigger(&mut self, interval_ms: f32) -> bool {
        if self.elapsed_ms >= interval_ms {
            self.elapsed_ms = 0.0;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deferred_fires_once() {
        let mut timer = Deferred::default();
        timer.start(50.0);
        assert!(!timer.advance(20.0));
        assert!(!timer.advance(20.0));
        assert!(timer.advance(20.0));
        assert!(!timer.advance(20.0));
        assert!(!timer.is_pending());
    }

    #[test]
    fn test_cancelled_deferred_never_fires() {
        let mut timer = Deferred::default();
        timer.start(10.0);
        timer.cancel();
        assert!(!timer.advance(100.0));
    }

    #[test]
    fn test_cooldown() {
        let mut cd = Cooldown::ready();
        assert!(cd.try_trigger(150.0));
        cd.advance(100.0);
        assert!(!cd.try_trigger(150.0));
        cd.advance(50.0);
        assert!(cd.try_trigger(150.0));
    }
}
