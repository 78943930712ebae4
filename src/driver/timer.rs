//! Frame timing utilities
//!
//! Timestamps are supplied by the caller in milliseconds, so the same code
//! runs on `requestAnimationFrame` time in the browser and on a monotonic
//! clock natively.

/// Pausable stopwatch
#[derive(Debug, Clone, Default)]
pub struct FrameTimer {
    /// Clock time when the timer started (shifted on unpause)
    start_ms: f64,
    /// Elapsed time captured when paused
    paused_ms: f64,
    started: bool,
    paused: bool,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, now_ms: f64) {
        self.started = true;
        self.paused = false;
        self.start_ms = now_ms;
        self.paused_ms = 0.0;
    }

    pub fn stop(&mut self) {
        self.started = false;
        self.paused = false;
        self.start_ms = 0.0;
        self.paused_ms = 0.0;
    }

    /// Freeze elapsed time (no-op unless running)
    pub fn pause(&mut self, now_ms: f64) {
        if self.started && !self.paused {
            self.paused = true;
            self.paused_ms = now_ms - self.start_ms;
            self.start_ms = 0.0;
        }
    }

    /// Resume from the frozen elapsed time (no-op unless paused)
    pub fn unpause(&mut self, now_ms: f64) {
        if self.started && self.paused {
            self.paused = false;
            self.start_ms = now_ms - self.paused_ms;
            self.paused_ms = 0.0;
        }
    }

    /// Elapsed milliseconds, excluding paused intervals
    pub fn ticks(&self, now_ms: f64) -> f64 {
        if !self.started {
            0.0
        } else if self.paused {
            self.paused_ms
        } else {
            now_ms - self.start_ms
        }
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_paused(&self) -> bool {
        self.paused && self.started
    }
}

/// Number of frames averaged for the FPS estimate
const FPS_WINDOW: usize = 60;

/// Rolling frames-per-second estimate
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    recorded: usize,
    fps: u32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            recorded: 0,
            fps: 0,
        }
    }
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame timestamp and refresh the estimate
    pub fn record(&mut self, now_ms: f64) -> u32 {
        self.frame_times[self.frame_index] = now_ms;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;
        self.recorded = (self.recorded + 1).min(FPS_WINDOW);

        if self.recorded == FPS_WINDOW {
            // Slot after the newest is the oldest of the window
            let oldest = self.frame_times[self.frame_index];
            let elapsed = now_ms - oldest;
            if elapsed > 0.0 {
                let frames = (FPS_WINDOW - 1) as f64;
                self.fps = (frames * 1000.0 / elapsed).round() as u32;
            }
        }
        self.fps
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_not_started() {
        let timer = FrameTimer::new();
        assert!(!timer.is_started());
        assert!(!timer.is_paused());
        assert_eq!(timer.ticks(500.0), 0.0);
    }

    #[test]
    fn test_timer_excludes_paused_interval() {
        let mut timer = FrameTimer::new();
        timer.start(100.0);
        assert_eq!(timer.ticks(350.0), 250.0);

        timer.pause(400.0);
        assert!(timer.is_paused());
        assert_eq!(timer.ticks(10_000.0), 300.0);

        timer.unpause(1_000.0);
        assert!(!timer.is_paused());
        assert_eq!(timer.ticks(1_200.0), 500.0);
    }

    #[test]
    fn test_timer_pause_requires_running() {
        let mut timer = FrameTimer::new();
        timer.pause(50.0);
        assert!(!timer.is_paused());

        timer.start(0.0);
        timer.unpause(20.0);
        assert_eq!(timer.ticks(30.0), 30.0);

        timer.stop();
        assert!(!timer.is_started());
        assert_eq!(timer.ticks(40.0), 0.0);
    }

    #[test]
    fn test_fps_at_sixty_hertz() {
        let mut fps = FpsCounter::new();
        let frame_ms = 1000.0 / 60.0;
        for i in 0..120 {
            fps.record(i as f64 * frame_ms);
        }
        assert_eq!(fps.fps(), 60);
    }

    #[test]
    fn test_fps_zero_until_window_full() {
        let mut fps = FpsCounter::new();
        for i in 0..10 {
            assert_eq!(fps.record(i as f64 * 16.0), 0);
        }
    }
}
