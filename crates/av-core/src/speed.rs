//! Playback pacing and run configuration.
//!
//! # Design
//!
//! Every algorithm suspends exactly once per emitted step, for the delay of
//! the run's [`Speed`].  The delay is the only suspension point: there is no
//! I/O and no background work, so a run's wall-clock duration is roughly
//! `steps * delay` plus the algorithm's own CPU time.
//!
//! Presets mirror the playback speeds a front end offers (1, 10, 100, 250,
//! 500 ms).  [`Speed::Unthrottled`] disables the delay entirely and is what
//! tests and headless hosts use.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::{CoreError, Order};

// ── Speed ─────────────────────────────────────────────────────────────────────

/// Delay inserted after each emitted step.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Speed {
    /// No delay at all.
    Unthrottled,
    /// 1 ms per step.
    Fastest,
    /// 10 ms per step.
    Fast,
    /// 100 ms per step.
    #[default]
    Normal,
    /// 250 ms per step.
    Slow,
    /// 500 ms per step.
    Slowest,
}

impl Speed {
    pub const ALL: [Speed; 6] = [
        Speed::Unthrottled,
        Speed::Fastest,
        Speed::Fast,
        Speed::Normal,
        Speed::Slow,
        Speed::Slowest,
    ];

    /// Delay in milliseconds.
    #[inline]
    pub const fn millis(self) -> u64 {
        match self {
            Speed::Unthrottled => 0,
            Speed::Fastest     => 1,
            Speed::Fast        => 10,
            Speed::Normal      => 100,
            Speed::Slow        => 250,
            Speed::Slowest     => 500,
        }
    }

    #[inline]
    pub const fn delay(self) -> Duration {
        Duration::from_millis(self.millis())
    }

    pub const fn name(self) -> &'static str {
        match self {
            Speed::Unthrottled => "unthrottled",
            Speed::Fastest     => "fastest",
            Speed::Fast        => "fast",
            Speed::Normal      => "normal",
            Speed::Slow        => "slow",
            Speed::Slowest     => "slowest",
        }
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} ms)", self.name(), self.millis())
    }
}

impl FromStr for Speed {
    type Err = CoreError;

    /// Accepts a preset name or its delay in milliseconds.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Speed::ALL
            .into_iter()
            .find(|speed| speed.name() == s || s.parse::<u64>().ok() == Some(speed.millis()))
            .ok_or_else(|| CoreError::InvalidInput(format!("unknown speed `{s}`")))
    }
}

// ── RunConfig ─────────────────────────────────────────────────────────────────

/// Per-run configuration shared by every algorithm family.
///
/// Typically deserialized by the host application and handed to the runner.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RunConfig {
    /// Delay after each step.  Default: [`Speed::Normal`].
    pub speed: Speed,

    /// Requested output order for sorts.  Ignored by maze algorithms.
    pub order: Order,

    /// Master RNG seed.  The same seed always reproduces the same run.
    pub seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            speed: Speed::Normal,
            order: Order::Ascent,
            seed:  42,
        }
    }
}

impl RunConfig {
    /// Configuration with no pacing delay; used by tests and batch hosts.
    pub fn unthrottled(seed: u64) -> Self {
        Self {
            speed: Speed::Unthrottled,
            seed,
            ..Self::default()
        }
    }

    pub fn with_order(mut self, order: Order) -> Self {
        self.order = order;
        self
    }

    pub fn with_speed(mut self, speed: Speed) -> Self {
        self.speed = speed;
        self
    }
}
