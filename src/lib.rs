//! Genesis (workspace facade crate).
//!
//! Re-exports the workspace crates under short names and holds the pieces
//! that only the binary needs: configuration and frame timing.

pub mod clock;
pub mod config;

pub use genesis_assets as assets;
pub use genesis_audio as audio;
pub use genesis_core as core;
pub use genesis_input as input;
pub use genesis_term as term;
pub use genesis_types as types;

pub use clock::{FrameClock, FrameTick};
pub use config::GameConfig;
pub use genesis_assets::{AssetError, DecodedImage};
