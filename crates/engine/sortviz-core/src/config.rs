//! Playback configuration.

use serde::{Deserialize, Serialize};

use crate::algorithm::Algorithm;
use crate::error::Result;

/// Default delay between two applied events.
pub const DEFAULT_ANIMATION_DELAY_MS: u64 = 800;
/// Shortest delay the scheduler will ever arm.
pub const MIN_ANIMATION_DELAY_MS: u64 = 10;
/// Default refresh period of the live elapsed-time display.
pub const DEFAULT_TIMER_POLL_INTERVAL_MS: u64 = 20;

/// Configuration for a [`Visualizer`](crate::Visualizer).
///
/// Fields are public for hosts that build it in code; read them back through
/// the accessors, which apply the floors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Delay between ticks in milliseconds. Clamped to at least 10.
    pub animation_delay_ms: u64,
    /// Refresh period of the elapsed-time display in milliseconds.
    pub timer_poll_interval_ms: u64,
    /// Algorithm used by the next `start`.
    pub algorithm: Algorithm,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            animation_delay_ms: DEFAULT_ANIMATION_DELAY_MS,
            timer_poll_interval_ms: DEFAULT_TIMER_POLL_INTERVAL_MS,
            algorithm: Algorithm::Bubble,
        }
    }
}

impl Config {
    /// Parse a config from JSON; missing fields fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_animation_delay_ms(mut self, delay_ms: u64) -> Self {
        self.animation_delay_ms = delay_ms;
        self
    }

    #[inline]
    pub fn animation_delay_ms(&self) -> u64 {
        self.animation_delay_ms.max(MIN_ANIMATION_DELAY_MS)
    }

    #[inline]
    pub fn timer_poll_interval_ms(&self) -> u64 {
        self.timer_poll_interval_ms.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.animation_delay_ms(), 800);
        assert_eq!(cfg.timer_poll_interval_ms(), 20);
        assert_eq!(cfg.algorithm, Algorithm::Bubble);
    }

    #[test]
    fn delay_is_floor_clamped() {
        let cfg = Config::default().with_animation_delay_ms(3);
        assert_eq!(cfg.animation_delay_ms, 3);
        assert_eq!(cfg.animation_delay_ms(), 10);
        let cfg = Config {
            timer_poll_interval_ms: 0,
            ..Config::default()
        };
        assert_eq!(cfg.timer_poll_interval_ms(), 1);
    }

    #[test]
    fn from_json_partial() {
        let cfg = Config::from_json(r#"{ "algorithm": "heap", "animation_delay_ms": 50 }"#).unwrap();
        assert_eq!(cfg.algorithm, Algorithm::Heap);
        assert_eq!(cfg.animation_delay_ms(), 50);
        assert_eq!(cfg.timer_poll_interval_ms(), 20);
    }

    #[test]
    fn from_json_rejects_unknown_algorithm() {
        let err = Config::from_json(r#"{ "algorithm": "bogo" }"#).unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }
}
