//! Background thread that drives a [`Mixer`] at the output sample rate.
//!
//! Stands in for a device callback: it asks the mixer for one period of
//! frames at a time and hands the buffer to a consumer.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::mixer::Mixer;
use crate::SAMPLE_RATE;

/// Frames mixed per wake-up (10 ms at 48 kHz).
pub const PERIOD_FRAMES: usize = 480;

pub struct Pump {
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<Mixer>>,
}

impl Pump {
    /// Start mixing on a new thread; `sink` receives every interleaved period.
    pub fn spawn<F>(mut mixer: Mixer, mut sink: F) -> std::io::Result<Self>
    where
        F: FnMut(&[f32]) + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let thread_stop = Arc::clone(&stop);
        let period = Duration::from_secs_f64(PERIOD_FRAMES as f64 / SAMPLE_RATE as f64);

        let thread = thread::Builder::new()
            .name("genesis-audio".into())
            .spawn(move || {
                let mut buf = vec![0.0f32; PERIOD_FRAMES * 2];
                let mut next = Instant::now();
                while !thread_stop.load(Ordering::Relaxed) {
                    mixer.mix_into(&mut buf);
                    sink(&buf);
                    next += period;
                    let now = Instant::now();
                    if next > now {
                        thread::sleep(next - now);
                    } else {
                        // Fell behind: restart pacing from now.
                        next = now;
                    }
                }
                mixer
            })?;

        tracing::debug!(period_frames = PERIOD_FRAMES, "audio pump started");
        Ok(Self {
            stop,
            thread: Some(thread),
        })
    }

    /// Stop the thread and get the mixer back.
    pub fn stop(mut self) -> Option<Mixer> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> Option<Mixer> {
        self.stop.store(true, Ordering::Relaxed);
        let mixer = self.thread.take()?.join().ok();
        if mixer.is_none() {
            tracing::warn!("audio pump thread panicked");
        }
        mixer
    }
}

impl Drop for Pump {
    fn drop(&mut self) {
        self.shutdown();
    }
}
