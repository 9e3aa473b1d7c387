//! Playback speed and its inverted mapping to a tick delay.

use std::time::Duration;

/// Slowest raw speed value.
pub const SPEED_MIN: u32 = 10;

/// Fastest raw speed value.
pub const SPEED_MAX: u32 = 200;

/// Initial raw speed (a 160 ms delay).
pub const DEFAULT_SPEED: u32 = 50;

/// A raw speed value, always within `[SPEED_MIN, SPEED_MAX]`.
///
/// Higher is faster: the delay between ticks is
/// `SPEED_MAX + SPEED_MIN - raw` milliseconds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Speed(u32);

impl Speed {
    /// Clamp `raw` into range.
    pub const fn new(raw: u32) -> Self {
        let raw = if raw < SPEED_MIN {
            SPEED_MIN
        } else if raw > SPEED_MAX {
            SPEED_MAX
        } else {
            raw
        };
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn delay_ms(self) -> u64 {
        (SPEED_MAX + SPEED_MIN - self.0) as u64
    }

    #[inline]
    pub const fn delay(self) -> Duration {
        Duration::from_millis(self.delay_ms())
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self::new(DEFAULT_SPEED)
    }
}

impl From<u32> for Speed {
    fn from(raw: u32) -> Self {
        Self::new(raw)
    }
}
