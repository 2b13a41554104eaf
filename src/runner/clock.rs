//! Host timestamps (ms) to normalized tick deltas where 1.0 is one 60 Hz frame.

#[derive(Clone, Debug, PartialEq)]
pub struct FrameClock {
    last_ms: Option<f64>,
    max_frame_ms: f64,
    frame_ms: f64,
}

impl FrameClock {
    pub fn new(max_frame_ms: f64, frame_ms: f64) -> Self {
        Self { last_ms: None, max_frame_ms, frame_ms }
    }

    /// Forget the previous timestamp; the next `advance` only primes the clock.
    pub fn rearm(&mut self) {
        self.last_ms = None;
    }

    /// Prime with a known start time (e.g. `performance.now()` at start).
    pub fn prime(&mut self, now_ms: f64) {
        self.last_ms = Some(now_ms);
    }

    /// Normalized delta since the previous call, or None if the clock was just (re)armed.
    /// Long gaps (tab in background) are capped; timestamps that run backwards count as 0.
    pub fn advance(&mut self, now_ms: f64) -> Option<f64> {
        let last = self.last_ms.replace(now_ms)?;
        let elapsed = (now_ms - last).clamp(0.0, self.max_frame_ms);
        Some(elapsed / self.frame_ms)
    }
}
