//! Time management utilities

/// Fixed timestep accumulator for the physics tick
///
/// Variable frame times are accumulated and drained in whole physics ticks,
/// so the attachment controller always sees the same `dt`.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: f32,
    accumulator: f32,
    max_steps_per_frame: u32,
    tick_count: u64,
}

impl FixedTimestep {
    /// Create a timestep with the given tick length in seconds
    pub fn new(step: f32) -> Self {
        Self {
            step,
            accumulator: 0.0,
            max_steps_per_frame: 8,
            tick_count: 0,
        }
    }

    /// Limit the number of ticks a single frame may produce
    pub fn with_max_steps(mut self, max_steps_per_frame: u32) -> Self {
        self.max_steps_per_frame = max_steps_per_frame.max(1);
        self
    }

    /// Accumulate a frame and return how many fixed ticks to run
    ///
    /// Time beyond the per-frame cap is dropped rather than carried over,
    /// so a long stall does not trigger a burst of catch-up ticks.
    pub fn advance(&mut self, frame_time: f32) -> u32 {
        if !self.step.is_finite() || self.step <= 0.0 || !frame_time.is_finite() || frame_time <= 0.0 {
            return 0;
        }

        self.accumulator += frame_time;
        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_steps_per_frame {
            self.accumulator -= self.step;
            steps += 1;
        }
        if steps == self.max_steps_per_frame && self.accumulator >= self.step {
            self.accumulator %= self.step;
        }

        self.tick_count += u64::from(steps);
        steps
    }

    /// Tick length in seconds
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Total ticks produced so far
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Fraction of a tick currently accumulated, for render interpolation
    pub fn alpha(&self) -> f32 {
        if self.step > 0.0 {
            self.accumulator / self.step
        } else {
            0.0
        }
    }
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(1.0 / 90.0)
    }
}
