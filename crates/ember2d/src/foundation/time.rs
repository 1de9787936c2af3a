//! Time management utilities
//!
//! The frame loop runs at a variable display rate while physics consumes
//! time in fixed increments. [`FixedTimestep`] implements the accumulator
//! that bridges the two: real frame time is accumulated and drained in
//! fixed-size steps, with any remainder carried into the next frame.

use std::time::Instant;

/// High-precision timer for frame timing
pub struct Timer {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Update the timer (should be called once per frame)
    pub fn update(&mut self) {
        let now = Instant::now();
        self.delta_time = now.duration_since(self.last_frame).as_secs_f32();
        self.total_time += self.delta_time;
        self.last_frame = now;
        self.frame_count += 1;
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total elapsed time since timer creation
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the current FPS (based on last frame time)
    pub fn current_fps(&self) -> f32 {
        if self.delta_time > 0.0 {
            1.0 / self.delta_time
        } else {
            0.0
        }
    }
}

/// Per-frame timing information handed to systems through the scene context
#[derive(Debug, Clone, Copy)]
pub struct FrameTime {
    /// Time since the last variable-rate update, in seconds (time-scaled)
    pub delta: f32,
    /// The fixed physics timestep, in seconds
    pub fixed_delta: f32,
    /// Total simulated time since engine start, in seconds
    pub elapsed: f32,
}

impl FrameTime {
    /// Build frame timing for a variable-rate update phase
    pub fn variable(delta: f32, fixed_delta: f32, elapsed: f32) -> Self {
        Self {
            delta,
            fixed_delta,
            elapsed,
        }
    }

    /// Build frame timing for a fixed-rate update phase, where `delta`
    /// equals the fixed step
    pub fn fixed(fixed_delta: f32, elapsed: f32) -> Self {
        Self {
            delta: fixed_delta,
            fixed_delta,
            elapsed,
        }
    }
}

/// Fixed-timestep accumulator.
///
/// Multiple fixed steps may run in a single long frame (catch-up, clamped
/// by `max_steps_per_frame` so a stall cannot spiral), and zero steps run
/// when the frame was shorter than one increment.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: f32,
    accumulator: f32,
    max_steps_per_frame: u32,
}

impl FixedTimestep {
    /// Create an accumulator with the given step size in seconds
    pub fn new(step: f32, max_steps_per_frame: u32) -> Self {
        Self {
            step,
            accumulator: 0.0,
            max_steps_per_frame: max_steps_per_frame.max(1),
        }
    }

    /// The fixed step size in seconds
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Accumulate `delta` seconds of real time and return how many fixed
    /// steps should run this frame. The remainder stays in the
    /// accumulator.
    pub fn advance(&mut self, delta: f32) -> u32 {
        self.accumulator += delta.max(0.0);
        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_steps_per_frame {
            self.accumulator -= self.step;
            steps += 1;
        }
        // A frame longer than the catch-up clamp drops the excess instead
        // of stalling the loop further.
        if self.accumulator >= self.step {
            self.accumulator %= self.step;
        }
        steps
    }
}
