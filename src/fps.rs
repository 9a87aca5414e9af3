//! Frames-per-second measurement

/// Counts frames and refreshes the FPS value about once per second
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frame_count: u32,
    last_time: f64,
    current_fps: f64,
}

impl FpsCounter {
    pub fn new(now: f64) -> Self {
        Self {
            frame_count: 0,
            last_time: now,
            current_fps: 0.0,
        }
    }

    /// Record one frame at time `now` (seconds).
    /// Returns true when a new FPS value was computed.
    pub fn update(&mut self, now: f64) -> bool {
        self.frame_count += 1;
        let elapsed = now - self.last_time;

        if elapsed >= 1.0 {
            self.current_fps = self.frame_count as f64 / elapsed;
            self.frame_count = 0;
            self.last_time = now;
            return true;
        }
        false
    }

    pub fn fps(&self) -> f64 {
        self.current_fps
    }
}
