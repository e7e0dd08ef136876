//! Terminal "game renderer" module.
//!
//! The world is drawn into a fixed-size ARGB surface, letterboxed into a
//! window surface sized to the terminal, and flushed as upper-half-block
//! cells (two pixel rows per cell). The overlay is written straight onto the
//! cells afterwards so it stays legible at any scale.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Keep everything up to the final flush pure so it can be unit-tested
//! - Reuse surfaces and framebuffers across frames

pub mod atlas;
pub mod fb;
pub mod renderer;
pub mod surface;
pub mod text;
pub mod world_view;

pub use genesis_core as core;
pub use genesis_types as types;

pub use atlas::{AtlasError, MobFrame, MobSheet, SpriteAtlas};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb, HALF_BLOCK};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use surface::{Flip, Letterbox, Rect, Surface};
pub use text::{draw_text, text_width, Align};
pub use world_view::{mob_frame, Compositor, TileGrid, Viewport, WorldView};
