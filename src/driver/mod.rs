//! Frame driver
//!
//! Owns the simulation state and a renderer. Each frame drains pending
//! events, advances the simulation once (unless paused), draws every body
//! and presents. The browser calls `frame` from `requestAnimationFrame`;
//! native builds call `run`, which loops until quit.

pub mod timer;

pub use timer::{FpsCounter, FrameTimer};

use crate::renderer::{Renderer, draw_frame};
use crate::sim::{SimState, StepEvents, advance};

/// Frames between periodic stats log lines
const STATS_INTERVAL: u64 = 300;

/// Input relevant to the frame loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameEvent {
    /// Stop after the current frame
    Quit,
    /// Toggle simulation pause (drawing continues)
    TogglePause,
}

/// Non-blocking event queue
pub trait EventSource {
    /// Next pending event, or `None` when the queue is drained
    fn poll_event(&mut self) -> Option<FrameEvent>;
}

/// Event source that requests quit after a fixed number of frames
#[derive(Debug, Clone)]
pub struct FrameBudget {
    remaining: u64,
    quit_sent: bool,
}

impl FrameBudget {
    pub fn new(frames: u64) -> Self {
        Self {
            remaining: frames,
            quit_sent: false,
        }
    }
}

impl EventSource for FrameBudget {
    fn poll_event(&mut self) -> Option<FrameEvent> {
        if self.quit_sent {
            return None;
        }
        if self.remaining == 0 {
            self.quit_sent = true;
            return Some(FrameEvent::Quit);
        }
        self.remaining -= 1;
        None
    }
}

/// Totals accumulated across a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub steps: u64,
    pub collisions: u64,
    pub wall_hits: u64,
}

/// Runs the per-frame loop
pub struct FrameDriver<R: Renderer> {
    pub state: SimState,
    pub renderer: R,
    timer: FrameTimer,
    fps: FpsCounter,
    summary: RunSummary,
    paused: bool,
    quit: bool,
}

impl<R: Renderer> FrameDriver<R> {
    pub fn new(state: SimState, renderer: R) -> Self {
        Self {
            state,
            renderer,
            timer: FrameTimer::new(),
            fps: FpsCounter::new(),
            summary: RunSummary::default(),
            paused: false,
            quit: false,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    pub fn fps(&self) -> u32 {
        self.fps.fps()
    }

    /// Simulated running time in milliseconds (pauses excluded)
    pub fn elapsed_ms(&self, now_ms: f64) -> f64 {
        self.timer.ticks(now_ms)
    }

    /// Handle one event
    pub fn handle_event(&mut self, event: FrameEvent, now_ms: f64) {
        match event {
            FrameEvent::Quit => {
                log::info!("Quit requested");
                self.quit = true;
            }
            FrameEvent::TogglePause => {
                self.paused = !self.paused;
                if self.paused {
                    self.timer.pause(now_ms);
                    log::info!("Paused at tick {}", self.state.time_ticks);
                } else {
                    self.timer.unpause(now_ms);
                    log::info!("Resumed");
                }
            }
        }
    }

    /// Run one frame. Returns `false` once quit has been requested.
    pub fn frame<E: EventSource + ?Sized>(&mut self, events: &mut E, now_ms: f64) -> bool {
        if !self.timer.is_started() {
            self.timer.start(now_ms);
        }

        while let Some(event) = events.poll_event() {
            self.handle_event(event, now_ms);
        }
        if self.quit {
            return false;
        }

        if !self.paused {
            let step = advance(&mut self.state);
            self.record_step(step);
        }

        draw_frame(&self.state, &mut self.renderer);
        self.summary.frames += 1;
        self.fps.record(now_ms);

        if self.summary.frames % STATS_INTERVAL == 0 {
            log::debug!(
                "frame {} | fps {} | tick {} | energy {:.2} | collisions {} | wall hits {}",
                self.summary.frames,
                self.fps.fps(),
                self.state.time_ticks,
                self.state.bodies.kinetic_energy(),
                self.summary.collisions,
                self.summary.wall_hits
            );
        }

        true
    }

    /// Loop until the event source requests quit
    pub fn run<E, C>(&mut self, events: &mut E, mut clock_ms: C) -> RunSummary
    where
        E: EventSource + ?Sized,
        C: FnMut() -> f64,
    {
        while self.frame(events, clock_ms()) {}

        log::info!(
            "Stopped after {} frames ({} steps, {} collisions, {} wall hits)",
            self.summary.frames,
            self.summary.steps,
            self.summary.collisions,
            self.summary.wall_hits
        );
        self.summary
    }

    fn record_step(&mut self, events: StepEvents) {
        self.summary.steps += 1;
        self.summary.collisions += events.collisions as u64;
        self.summary.wall_hits += events.wall_hits as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::renderer::{BallSprite, HeadlessRenderer};
    use std::collections::VecDeque;
    use std::rc::Rc;

    /// Scripted events, one batch per frame
    struct Script(VecDeque<Vec<FrameEvent>>, Vec<FrameEvent>);

    impl Script {
        fn new(frames: Vec<Vec<FrameEvent>>) -> Self {
            Self(frames.into(), Vec::new())
        }
    }

    impl EventSource for Script {
        fn poll_event(&mut self) -> Option<FrameEvent> {
            if let Some(event) = self.1.pop() {
                return Some(event);
            }
            // End of this frame's batch: load the next one for the next frame
            if let Some(mut next) = self.0.pop_front() {
                next.reverse();
                self.1 = next;
            }
            None
        }
    }

    fn driver(count: usize) -> FrameDriver<HeadlessRenderer> {
        let config = SimConfig {
            ball_count: count,
            ..Default::default()
        };
        let state = SimState::new(&config, 11).unwrap();
        FrameDriver::new(state, HeadlessRenderer::new(Rc::new(BallSprite::default())))
    }

    #[test]
    fn test_run_stops_on_budget() {
        let mut driver = driver(20);
        let mut clock = 0.0;
        let summary = driver.run(&mut FrameBudget::new(30), || {
            clock += 16.0;
            clock
        });

        assert_eq!(summary.frames, 30);
        assert_eq!(summary.steps, 30);
        assert_eq!(driver.state.time_ticks, 30);
        assert_eq!(driver.renderer.frames_presented(), 30);
        assert_eq!(driver.renderer.last_frame().len(), 20);
        assert!(driver.quit_requested());
        // Population never changes
        assert_eq!(driver.state.body_count(), 20);
    }

    #[test]
    fn test_pause_keeps_drawing_without_stepping() {
        let mut driver = driver(5);
        let mut script = Script::new(vec![
            vec![],
            vec![FrameEvent::TogglePause],
            vec![],
            vec![FrameEvent::TogglePause],
            vec![FrameEvent::Quit],
        ]);

        // Prime the first batch
        assert!(script.poll_event().is_none());

        let mut now = 0.0;
        while driver.frame(&mut script, now) {
            now += 10.0;
        }

        // Frames: step, paused, paused, step, then quit
        assert_eq!(driver.summary().frames, 4);
        assert_eq!(driver.summary().steps, 2);
        assert_eq!(driver.renderer.frames_presented(), 4);
        assert!(!driver.is_paused());
    }

    #[test]
    fn test_quit_before_first_frame_draws_nothing() {
        let mut driver = driver(3);
        assert!(!driver.frame(&mut FrameBudget::new(0), 0.0));
        assert_eq!(driver.summary(), RunSummary::default());
        assert_eq!(driver.renderer.frames_presented(), 0);
    }
}
