//! Software audio mixer.
//!
//! Output is interleaved stereo `f32` at [`SAMPLE_RATE`]: one looping music
//! stream plus up to [`MAX_SFX`] fire-and-forget sound effects. Mono clips
//! play on both channels.

pub mod clip;
pub mod mixer;
pub mod pump;

/// Output sample rate in Hz.
pub const SAMPLE_RATE: u32 = 48_000;

pub use clip::{Clip, ClipError};
pub use mixer::{AudioHandle, Mixer, MAX_SFX};
pub use pump::{Pump, PERIOD_FRAMES};
