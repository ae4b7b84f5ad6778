//! Variable-timestep frame timing with a spiral-of-death clamp.
//!
//! The simulation advances by real elapsed wall time each frame, clamped
//! so a debugger pause or system stall becomes one slow-motion frame
//! instead of one enormous integration step.

use std::time::Instant;

use tracing::warn;

/// Maximum frame time handed to the simulation, in seconds.
pub const MAX_FRAME_TIME: f32 = 0.25; // 250ms = 4 FPS minimum

/// Measures per-frame wall-clock delta time, clamped to a maximum.
pub struct FrameClock {
    previous_time: Instant,
    max_frame_time: f32,
    frame_count: u64,
}

impl FrameClock {
    /// Creates a clock with the default [`MAX_FRAME_TIME`] clamp.
    pub fn new() -> Self {
        Self::with_max_frame_time(MAX_FRAME_TIME)
    }

    pub fn with_max_frame_time(max_frame_time: f32) -> Self {
        Self {
            previous_time: Instant::now(),
            max_frame_time,
            frame_count: 0,
        }
    }

    /// Seconds since the previous tick, clamped to the maximum.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let raw = now.duration_since(self.previous_time).as_secs_f32();
        self.previous_time = now;
        self.frame_count += 1;

        if raw > self.max_frame_time {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                raw * 1000.0,
                self.max_frame_time * 1000.0
            );
            return self.max_frame_time;
        }
        raw
    }

    /// Returns the total number of frames ticked.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Frames-per-second over one-second windows.
///
/// Frames accumulate into a wall-time bucket; the published rate changes
/// only when a bucket spanning at least one second closes, so the readout
/// updates once per second like the info overlay expects.
#[derive(Clone, Copy, Debug, Default)]
pub struct FpsCounter {
    window_elapsed: f32,
    window_frames: u32,
    fps: f32,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one frame of length `dt`. Returns the freshly computed rate
    /// when this frame closed a window.
    pub fn frame(&mut self, dt: f32) -> Option<f32> {
        self.window_elapsed += dt;
        self.window_frames += 1;
        if self.window_elapsed >= 1.0 {
            self.fps = self.window_frames as f32 / self.window_elapsed;
            self.window_elapsed = 0.0;
            self.window_frames = 0;
            return Some(self.fps);
        }
        None
    }

    /// The rate from the most recently closed window (0 until one closes).
    pub fn fps(&self) -> f32 {
        self.fps
    }
}
