//! Tick timing.
//!
//! The default clock assumes a fixed display cadence and hands out the same
//! step every tick, whatever time actually passed. [`TickClock::Measured`]
//! integrates real elapsed time instead.

use crate::float_types::Real;
use std::time::Instant;

/// Nominal display refresh rate.
pub const DEFAULT_TICK_RATE_HZ: Real = 60.0;

#[derive(Clone, Debug, PartialEq)]
pub enum TickClock {
    /// Every tick is `1 / hz` seconds long.
    FixedRate { hz: Real },
    /// Every tick is as long as the wall-clock time since the previous one.
    /// The first tick falls back to `1 / fallback_hz`.
    Measured {
        fallback_hz: Real,
        last: Option<Instant>,
    },
}

impl Default for TickClock {
    fn default() -> Self {
        Self::fixed(DEFAULT_TICK_RATE_HZ)
    }
}

impl TickClock {
    pub const fn fixed(hz: Real) -> Self {
        Self::FixedRate { hz }
    }

    pub const fn measured(fallback_hz: Real) -> Self {
        Self::Measured {
            fallback_hz,
            last: None,
        }
    }

    /// Length of a tick when nothing was measured.
    pub fn nominal_dt(&self) -> Real {
        match self {
            Self::FixedRate { hz } | Self::Measured { fallback_hz: hz, .. } => 1.0 / hz,
        }
    }

    /// Seconds to advance for the tick happening now.
    pub fn next_dt(&mut self) -> Real {
        match self {
            Self::FixedRate { hz } => 1.0 / *hz,
            Self::Measured { fallback_hz, last } => {
                let now = Instant::now();
                let dt = match last {
                    Some(previous) => now.duration_since(*previous).as_secs_f64() as Real,
                    None => 1.0 / *fallback_hz,
                };
                *last = Some(now);
                dt
            },
        }
    }

    /// Forgets the previous tick so the next measured tick starts fresh.
    pub fn restart(&mut self) {
        if let Self::Measured { last, .. } = self {
            *last = None;
        }
    }
}
