use std::time::Instant;

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the clock was created. Shaders animate on this.
    pub elapsed: f64,
    /// Number of ticks before this one.
    pub frame_index: u64,
}

/// Monotonic clock started when the window comes up.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    frame_index: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            frame_index: 0,
        }
    }

    /// Samples the clock for the frame about to be drawn.
    pub fn tick(&mut self) -> FrameTime {
        let ft = FrameTime {
            elapsed: self.start.elapsed().as_secs_f64(),
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
