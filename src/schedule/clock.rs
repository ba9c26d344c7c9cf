/// Frame timing state owned by one scheduler.
///
/// Timestamps are milliseconds on the host's monotonic clock; the origin is arbitrary but must not
/// change while the loop runs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationClock {
    last_frame_ms: f64,
    started_at_ms: Option<f64>,
    rotation_speed: f64,
}

impl AnimationClock {
    /// Create a clock turning `rotation_speed` radians per second.
    pub fn new(rotation_speed: f64) -> Self {
        Self {
            last_frame_ms: 0.0,
            started_at_ms: None,
            rotation_speed,
        }
    }

    /// Forget timing history, as on a fresh start.
    pub fn reset(&mut self) {
        self.last_frame_ms = 0.0;
        self.started_at_ms = None;
    }

    /// Timestamp the throttle measures from.
    pub fn last_frame_ms(&self) -> f64 {
        self.last_frame_ms
    }

    /// Rotation speed in radians per second.
    pub fn rotation_speed(&self) -> f64 {
        self.rotation_speed
    }

    /// Note a tick at `now_ms`, remembering the first one after a reset.
    pub fn observe(&mut self, now_ms: f64) {
        if self.started_at_ms.is_none() {
            self.started_at_ms = Some(now_ms);
        }
    }

    /// Milliseconds since the first tick after the last reset.
    pub fn since_start_ms(&self, now_ms: f64) -> f64 {
        self.started_at_ms.map_or(0.0, |s| (now_ms - s).max(0.0))
    }

    /// Throttle check against `interval_ms`.
    ///
    /// Returns the elapsed time when a draw is due. The reference timestamp then advances to
    /// `now - elapsed % interval`, so leftover time carries into the next frame instead of
    /// accumulating drift. A timestamp earlier than the reference rebases the clock.
    pub fn throttle(&mut self, now_ms: f64, interval_ms: f64) -> Option<f64> {
        if !now_ms.is_finite() {
            return None;
        }
        let elapsed = now_ms - self.last_frame_ms;
        if elapsed < 0.0 {
            self.last_frame_ms = now_ms;
            return None;
        }
        if elapsed < interval_ms {
            return None;
        }
        self.last_frame_ms = now_ms - (elapsed % interval_ms);
        Some(elapsed)
    }

    /// Rotation angle (radians) at `now_ms`.
    pub fn rotation_angle(&self, now_ms: f64) -> f64 {
        (now_ms / 1000.0) * self.rotation_speed
    }
}
