//! Frame timing: per-frame delta, animation ticks, the short-frame sleep and
//! a once-per-second FPS report.

use std::time::{Duration, Instant};

/// Frames whose work finished faster than this are followed by a
/// [`SHORT_FRAME_SLEEP`] nap.
pub const MIN_FRAME: Duration = Duration::from_millis(2);
pub const SHORT_FRAME_SLEEP: Duration = Duration::from_millis(2);

#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
    fps_cap: bool,
    fps_window_start: Instant,
    frames_in_window: u32,
}

/// What one call to [`FrameClock::tick_at`] measured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTick {
    /// Seconds since the previous tick.
    pub delta: f32,
    /// Milliseconds since the clock started; drives sprite animation.
    pub ticks_ms: u64,
    /// Set once per second with the frames counted over that second.
    pub fps: Option<u32>,
}

impl FrameClock {
    pub fn new(fps_cap: bool) -> Self {
        Self::starting_at(Instant::now(), fps_cap)
    }

    pub fn starting_at(now: Instant, fps_cap: bool) -> Self {
        Self {
            start: now,
            last: now,
            fps_cap,
            fps_window_start: now,
            frames_in_window: 0,
        }
    }

    pub fn tick(&mut self) -> FrameTick {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> FrameTick {
        let elapsed = now.saturating_duration_since(self.last);
        self.last = now;

        self.frames_in_window += 1;
        let fps = if now.saturating_duration_since(self.fps_window_start) >= Duration::from_secs(1) {
            let fps = self.frames_in_window;
            self.frames_in_window = 0;
            self.fps_window_start = now;
            Some(fps)
        } else {
            None
        };

        FrameTick {
            delta: elapsed.as_secs_f32(),
            ticks_ms: now.saturating_duration_since(self.start).as_millis() as u64,
            fps,
        }
    }

    pub fn frame_end(&self) -> Option<Duration> {
        self.frame_end_at(Instant::now())
    }

    /// How long to sleep once the current frame's work is done.
    ///
    /// Only the time since the last tick counts, so an earlier nap never
    /// suppresses this one.
    pub fn frame_end_at(&self, now: Instant) -> Option<Duration> {
        let work = now.saturating_duration_since(self.last);
        (self.fps_cap && work < MIN_FRAME).then_some(SHORT_FRAME_SLEEP)
    }
}
