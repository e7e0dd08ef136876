//! Core simulation module - pure, deterministic, and testable
//!
//! This module contains the world rules, agent behaviour and state management.
//! It has **no dependencies** on the terminal, audio devices or image formats, making it:
//!
//! - **Deterministic**: Same seed produces identical sessions, level decoration included
//! - **Testable**: Unit tests for every rule, integration scenarios under `tests/`
//! - **Portable**: Runs headless; the renderer only reads it
//!
//! # Module Structure
//!
//! - [`rng`]: PCG32 stream with unbiased range reduction
//! - [`tile_map`]: World grid built from a level image, collision queries
//! - [`agent`]: Player and mob sprites, axis-split movement
//! - [`world`]: Per-frame step, mob AI, breeding and population growth
//!
//! # Example
//!
//! ```
//! use genesis_core::{MobGroup, Pcg32, TileMap, World};
//! use genesis_types::{MoveInput, NullSink, TileCode};
//!
//! let map = TileMap::filled(80, 80, TileCode::GROUND).unwrap();
//! let mut world = World::new(map, Pcg32::new(12345, 1));
//!
//! world.step(1.0 / 60.0, MoveInput::NONE, &mut NullSink);
//!
//! assert_eq!(world.mobs(MobGroup::VirginFemales).len(), 1);
//! assert!(world.population().population() > 2.0);
//! ```
//!
//! # Timing
//!
//! [`World::step`](world::World::step) takes the real frame time in seconds:
//! - **Movement**: `delta * MOB_SPEED` world units per frame
//! - **Mob AI**: fires whenever 0.02 s have accumulated, then resets
//! - **Population**: grows by `growth_rate * delta` every frame

pub mod agent;
pub mod rng;
pub mod tile_map;
pub mod world;

pub use genesis_types as types;

// Re-export commonly used types for convenience
pub use agent::{Bounds, Mob, Sprite};
pub use rng::{Pcg32, RngError};
pub use tile_map::{palette, world_to_tile, LevelError, PixelGrid, PixelSource, TileMap};
pub use world::{MobGroup, Population, StepReport, World};
