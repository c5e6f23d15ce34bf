//! Animation frame clock.
//!
//! Spinner frames are derived from elapsed monotonic time rather than a
//! shared counter, so any number of independent displays animate in lockstep
//! without coordinating.

use std::sync::LazyLock;
use std::time::{Duration, Instant};

use super::art::SPINNER_BRAILLE;

/// Default refresh rate for live displays, also the default spinner speed.
pub const LIVE_REFRESH_PER_SECOND: f64 = 8.0;

/// Process-wide reference point for the monotonic clock.
static EPOCH: LazyLock<Instant> = LazyLock::new(Instant::now);

/// Map a point in time to a spinner frame index.
///
/// Returns `floor(now_secs * rate) mod frame_count`. A `frame_count` of zero
/// yields 0. Pure, so it is safe to call from any thread.
pub fn current_frame(now_secs: f64, rate: f64, frame_count: usize) -> usize {
    if frame_count == 0 {
        return 0;
    }
    let tick = (now_secs * rate).floor();
    if !tick.is_finite() || tick < 0.0 {
        return 0;
    }
    (tick as u64 % frame_count as u64) as usize
}

/// Seconds elapsed on the process-wide monotonic clock.
pub fn monotonic_secs() -> f64 {
    EPOCH.elapsed().as_secs_f64()
}

/// Frame index for an animation of `frame_count` frames at `rate` frames per second, right now.
pub fn frame_now(rate: f64, frame_count: usize) -> usize {
    current_frame(monotonic_secs(), rate, frame_count)
}

/// Current frame index for the braille spinner (0 to `SPINNER_BRAILLE.len() - 1`).
///
/// Use with `SPINNER_BRAILLE[braille_frame()]` when building custom live output.
pub fn braille_frame() -> usize {
    frame_now(LIVE_REFRESH_PER_SECOND, SPINNER_BRAILLE.len())
}

/// Duration of one animation tick at `rate` frames per second.
///
/// Non-positive or non-finite rates fall back to the default live rate.
pub fn tick_duration(rate: f64) -> Duration {
    let rate = if rate.is_finite() && rate > 0.0 {
        rate
    } else {
        LIVE_REFRESH_PER_SECOND
    };
    Duration::try_from_secs_f64(1.0 / rate).unwrap_or(Duration::MAX)
}
