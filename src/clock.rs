//! Frame clock: converts host wall-clock timestamps into elapsed seconds
//! for the simulation step.
//!
//! The host animation/timer facility calls at arbitrary intervals. Deltas
//! are clamped per frame; a long gap (backgrounded tab, process restart)
//! is the offline resolver's job, not the frame loop's.

/// Longest elapsed time a single frame may report.
pub const MAX_FRAME_SECONDS: f64 = 0.5;

pub struct FrameClock {
    last_timestamp_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_timestamp_ms: None,
        }
    }

    /// Feed a wall-clock timestamp (from `performance.now()` or similar).
    /// Returns the elapsed seconds to simulate: 0 on the first frame,
    /// clamped to `[0, MAX_FRAME_SECONDS]` afterwards. Non-finite
    /// timestamps are ignored entirely.
    pub fn update(&mut self, now_ms: f64) -> f64 {
        if !now_ms.is_finite() {
            return 0.0;
        }
        let delta = match self.last_timestamp_ms {
            Some(prev) => ((now_ms - prev) / 1000.0).clamp(0.0, MAX_FRAME_SECONDS),
            None => 0.0,
        };
        self.last_timestamp_ms = Some(now_ms);
        delta
    }

    /// Forget the previous timestamp so the next frame reports zero.
    /// Called after a restore, where the gap was already credited offline.
    pub fn reset(&mut self) {
        self.last_timestamp_ms = None;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
