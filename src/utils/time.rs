use std::time::{Duration, Instant};

/// Frame clock: delta and elapsed time of the render loop.
///
/// Real-time loops call [`FrameClock::tick`]; headless runs and tests step it
/// with [`FrameClock::tick_with`].
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_update: Option<Instant>,
    /// Time since last tick
    pub delta: Duration,
    /// Total elapsed time since creation
    pub elapsed: Duration,
    /// Total number of ticks
    pub frame_count: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_update: None,
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Advances by the wall-clock time since the previous tick.
    pub fn tick(&mut self) {
        let now = Instant::now();
        let delta = self.last_update.map_or(Duration::ZERO, |last| now - last);
        self.last_update = Some(now);
        self.tick_with(delta);
    }

    /// Advances by a fixed step.
    pub fn tick_with(&mut self, delta: Duration) {
        self.delta = delta;
        self.elapsed += delta;
        self.frame_count += 1;
    }

    #[must_use]
    pub fn dt_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    #[must_use]
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }
}
