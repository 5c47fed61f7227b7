//! Engine configuration.
//!
//! Hosts configure the engine once per session by providing an
//! `EngineConfig`:
//! - Animation timings (swipe speed, jubilation duration)
//! - The ports given to Start and Goal tiles created from level codes
//! - The amount a time-bonus goal adds to the move budget
//!
//! Timings only decide how many ticks an animation spans; tile positions
//! are authoritative the moment a swipe is accepted.

use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::tile::Ports;

/// Swipe progress per second (a swipe settles after `1 / speed` seconds).
pub const DEFAULT_SWIPE_SPEED: f32 = 5.0;

/// Seconds a claimed tile spends celebrating.
pub const DEFAULT_JUBILATION_DURATION: f32 = 0.2;

/// Moves added to the budget by a time-bonus goal.
pub const DEFAULT_TIME_BONUS: u32 = 5;

/// Smallest accepted timing value. Keeps every animation finite.
const MIN_TIMING: f32 = 1e-3;

/// Complete engine configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Swipe progress per second; `1.0` progress means the swipe settled.
    pub swipe_speed: f32,

    /// Seconds a tile stays Jubilant after being claimed.
    pub jubilation_duration: f32,

    /// Ports of Start tiles created from tile code 2.
    pub start_ports: Ports,

    /// Ports of Goal tiles created from tile codes 3, 10 and 11.
    pub goal_ports: Ports,

    /// Budget added when a time-bonus goal is claimed.
    pub time_bonus: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            swipe_speed: DEFAULT_SWIPE_SPEED,
            jubilation_duration: DEFAULT_JUBILATION_DURATION,
            start_ports: Direction::ALL.into_iter().collect(),
            goal_ports: Direction::ALL.into_iter().collect(),
            time_bonus: DEFAULT_TIME_BONUS,
        }
    }
}

impl EngineConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the swipe speed. Non-positive values are clamped.
    #[must_use]
    pub fn with_swipe_speed(mut self, speed: f32) -> Self {
        self.swipe_speed = clamp_timing(speed, DEFAULT_SWIPE_SPEED);
        self
    }

    /// Set the jubilation duration in seconds. Non-positive values are clamped.
    #[must_use]
    pub fn with_jubilation_duration(mut self, seconds: f32) -> Self {
        self.jubilation_duration = clamp_timing(seconds, DEFAULT_JUBILATION_DURATION);
        self
    }

    /// Set the ports given to Start tiles.
    #[must_use]
    pub fn with_start_ports(mut self, ports: impl IntoIterator<Item = Direction>) -> Self {
        self.start_ports = super::tile::collect_ports(ports);
        self
    }

    /// Set the ports given to Goal tiles.
    #[must_use]
    pub fn with_goal_ports(mut self, ports: impl IntoIterator<Item = Direction>) -> Self {
        self.goal_ports = super::tile::collect_ports(ports);
        self
    }

    /// Set the time-bonus amount.
    #[must_use]
    pub fn with_time_bonus(mut self, bonus: u32) -> Self {
        self.time_bonus = bonus;
        self
    }

    /// Swipe speed, clamped even if the field was set directly.
    #[must_use]
    pub fn effective_swipe_speed(&self) -> f32 {
        clamp_timing(self.swipe_speed, DEFAULT_SWIPE_SPEED)
    }

    /// Jubilation duration, clamped even if the field was set directly.
    #[must_use]
    pub fn effective_jubilation_duration(&self) -> f32 {
        clamp_timing(self.jubilation_duration, DEFAULT_JUBILATION_DURATION)
    }
}

fn clamp_timing(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value.max(MIN_TIMING)
    } else {
        fallback
    }
}
