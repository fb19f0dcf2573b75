//! Frames-per-second estimate
//!
//! Frames are counted between whole-second boundaries measured on the host's
//! frame clock. At each boundary the count is published and reset.

/// Estimate shown before the first full second has elapsed
pub const INITIAL_FPS: u32 = 60;

const SECOND_MS: f64 = 1000.0;

#[derive(Debug, Clone, PartialEq)]
pub struct FpsCounter {
    frames: u32,
    last_boundary_ms: f64,
    fps: u32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl FpsCounter {
    pub fn new() -> Self {
        Self {
            frames: 0,
            last_boundary_ms: 0.0,
            fps: INITIAL_FPS,
        }
    }

    /// Count one frame rendered at `now_ms`.
    ///
    /// Returns the new estimate when at least a second has passed since the
    /// previous boundary. The frame being recorded is part of the count.
    pub fn record_frame(&mut self, now_ms: f64) -> Option<u32> {
        self.frames += 1;
        if now_ms >= self.last_boundary_ms + SECOND_MS {
            self.fps = self.frames;
            self.frames = 0;
            self.last_boundary_ms = now_ms;
            tracing::trace!(fps = self.fps, "fps published");
            Some(self.fps)
        } else {
            None
        }
    }

    /// Last published estimate
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Frames counted since the last boundary
    pub fn pending_frames(&self) -> u32 {
        self.frames
    }
}
