//! Decoded audio clips: interleaved `f32` frames at [`SAMPLE_RATE`].

use thiserror::Error;

use crate::SAMPLE_RATE;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClipError {
    #[error("unsupported channel count {0}; expected 1 or 2")]
    UnsupportedChannels(u16),
    #[error("sample count {samples} is not a multiple of {channels} channels")]
    RaggedFrames { samples: usize, channels: u16 },
}

/// A mono or stereo clip.
#[derive(Debug, Clone, PartialEq)]
pub struct Clip {
    channels: u16,
    data: Vec<f32>,
}

impl Clip {
    pub fn new(channels: u16, data: Vec<f32>) -> Result<Self, ClipError> {
        if channels != 1 && channels != 2 {
            return Err(ClipError::UnsupportedChannels(channels));
        }
        if data.len() % channels as usize != 0 {
            return Err(ClipError::RaggedFrames {
                samples: data.len(),
                channels,
            });
        }
        Ok(Self { channels, data })
    }

    /// Convert signed 16-bit PCM to `f32` in `[-1, 1)`.
    pub fn from_pcm_i16(channels: u16, pcm: &[i16]) -> Result<Self, ClipError> {
        Self::new(channels, pcm.iter().map(|&s| s as f32 * (1.0 / 32768.0)).collect())
    }

    /// A mono sine sweep from `from_hz` to `to_hz` with a linear fade-out.
    pub fn sweep(from_hz: f32, to_hz: f32, secs: f32, volume: f32) -> Self {
        let frames = (secs * SAMPLE_RATE as f32).max(0.0) as usize;
        let mut phase = 0.0f32;
        let data = (0..frames)
            .map(|i| {
                let t = i as f32 / frames as f32;
                let hz = from_hz + (to_hz - from_hz) * t;
                phase += hz / SAMPLE_RATE as f32;
                (phase * std::f32::consts::TAU).sin() * volume * (1.0 - t)
            })
            .collect();
        Self { channels: 1, data }
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Length in frames.
    pub fn frames(&self) -> usize {
        self.data.len() / self.channels as usize
    }

    /// Left and right sample of `frame`. Mono clips feed both channels.
    #[inline]
    pub fn stereo(&self, frame: usize) -> (f32, f32) {
        let base = frame * self.channels as usize;
        (self.data[base], self.data[base + self.channels as usize - 1])
    }
}
