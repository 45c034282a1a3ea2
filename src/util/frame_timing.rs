//! Frame ticks and the clock that produces them.

/// Largest delta handed to the engine in one tick, in seconds.
pub const MAX_FRAME_DELTA: f32 = 0.25;

/// One engine frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTick {
    /// Monotonic frame counter, starting at 0.
    pub frame: u64,
    /// Seconds since the previous tick (already clamped).
    pub delta: f32,
    /// Wall-clock seconds at this tick.
    pub wall: f64,
}

impl FrameTick {
    /// Tick with explicit values (for tests and replay).
    #[must_use]
    pub fn new(frame: u64, delta: f32, wall: f64) -> Self {
        Self { frame, delta, wall }
    }
}

/// Turns host timestamps into [`FrameTick`]s, with FPS tracking.
pub struct FrameClock {
    /// Frame counter for the next tick.
    next_frame: u64,
    /// Wall time of the last tick, if any.
    last_wall: Option<f64>,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl FrameClock {
    /// Create a clock that has not ticked yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_frame: 0,
            last_wall: None,
            smoothed_fps: 60.0,
            smoothing: 0.05,
        }
    }

    /// Produce the tick for a frame starting at `wall` seconds.
    ///
    /// The first tick has a zero delta. Timestamps that go backwards or are
    /// not finite produce a zero-delta tick at the previous wall time.
    pub fn tick(&mut self, wall: f64) -> FrameTick {
        let (delta, wall) = match self.last_wall {
            Some(last) if wall.is_finite() && wall >= last => {
                (((wall - last) as f32).min(MAX_FRAME_DELTA), wall)
            }
            Some(last) => {
                log::warn!("frame clock went backwards ({wall} < {last})");
                (0.0, last)
            }
            None if wall.is_finite() => (0.0, wall),
            None => (0.0, 0.0),
        };
        self.last_wall = Some(wall);

        if delta > 0.0 {
            let instant_fps = 1.0 / delta;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }

        let tick = FrameTick::new(self.next_frame, delta, wall);
        self.next_frame += 1;
        tick
    }

    /// Produce the next tick from a delta instead of an absolute time.
    pub fn advance(&mut self, delta: f32) -> FrameTick {
        let last = self.last_wall.unwrap_or(0.0);
        let delta = if delta.is_finite() { delta.max(0.0) } else { 0.0 };
        self.tick(last + f64::from(delta))
    }

    /// Get the current FPS (smoothed)
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
