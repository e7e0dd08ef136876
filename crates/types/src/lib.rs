//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (simulation, terminal rendering, audio).
//!
//! # World Units
//!
//! Positions are `f32` world units. One tile is [`TILE_SIZE`] units wide
//! (a 16 px sprite scaled by [`SCALE`]). Entity positions refer to the centre
//! of the entity, so [`tile_to_world`] returns the centre of a tile.
//!
//! # Simulation Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TILE_SIZE` | 48.0 | Tile edge in world units |
//! | `MOB_SPEED` | 400.0 | Movement speed (units per second) |
//! | `RETARGET_PERIOD_SECS` | 0.02 | Mob AI tick period |
//! | `RETARGET_ODDS` | 40 | 1 in N chance a mob picks a new direction per AI tick |
//! | `GROWTH_BOOST` | 1.25 | Growth rate multiplier per breeding event |
//! | `INITIAL_GROWTH_RATE` | 3.0 | Population growth per second at session start |
//! | `ROUND_SECS` | 300 | On-screen countdown length |
//!
//! # Rendering Constants
//!
//! - `VIRTUAL_WIDTH` x `VIRTUAL_HEIGHT`: 1280 x 720 virtual world surface
//! - `MOB_ANIMATION_MASK`: walking frames flip every 128 ms
//! - `WATER_ANIMATION_MASK`: water frames flip every 1024 ms
//!
//! # Examples
//!
//! ```
//! use genesis_types::{TileCode, TileSprite, Facing, tile_to_world, TILE_SIZE};
//!
//! let tree = TileCode::TREE;
//! assert!(tree.is_solid());
//! assert_eq!(tree.foreground(), TileSprite::TreeTop.id());
//!
//! assert_eq!(tile_to_world(0), TILE_SIZE * 0.5);
//! assert_eq!(Facing::default(), Facing::Down);
//! ```

/// Sprite scale factor applied to the 16 px source art.
pub const SCALE: u32 = 3;

/// Source sprite edge in atlas pixels.
pub const SPRITE_PX: u32 = 16;

/// Tile edge in world units.
pub const TILE_SIZE: f32 = (SPRITE_PX * SCALE) as f32;

/// Agent movement speed in world units per second.
pub const MOB_SPEED: f32 = 400.0;

/// Mob AI retarget tick period in seconds.
pub const RETARGET_PERIOD_SECS: f32 = 0.02;

/// A mob picks a new direction with probability `1 / RETARGET_ODDS` per AI tick.
pub const RETARGET_ODDS: u32 = 40;

/// Growth rate multiplier applied on every breeding event (+25%).
pub const GROWTH_BOOST: f64 = 1.25;

/// Population growth per second at session start.
pub const INITIAL_GROWTH_RATE: f64 = 3.0;

/// Population at session start (the player and the first virgin female).
pub const INITIAL_POPULATION: f64 = 2.0;

/// Length of the on-screen countdown in seconds.
pub const ROUND_SECS: u32 = 300;

/// Maximum children born from a single breeding event.
pub const MAX_CHILDREN: u32 = 4;

/// Virtual world surface width in pixels.
pub const VIRTUAL_WIDTH: u32 = 1280;

/// Virtual world surface height in pixels.
pub const VIRTUAL_HEIGHT: u32 = 720;

/// Walking animation frame bit (milliseconds tick).
pub const MOB_ANIMATION_MASK: u64 = 128;

/// Water animation frame bit (milliseconds tick).
pub const WATER_ANIMATION_MASK: u64 = 1024;

/// Sprite atlas edge in pixels.
pub const ATLAS_SIZE: u32 = 256;

/// Player spawn tile.
pub const PLAYER_START_TILE: (u32, u32) = (54, 23);

/// Spawn tile of the virgin female present at session start.
pub const FIRST_VIRGIN_TILE: (u32, u32) = (66, 26);

/// Designated breeding zone where virgin females (re)spawn.
pub const SPAWN_ZONE: TileZone = TileZone {
    x: 43,
    y: 57,
    width: 22,
    height: 14,
};

/// Returns the world coordinate of the centre of tile `tile`.
#[inline]
pub fn tile_to_world(tile: u32) -> f32 {
    (tile as f32 * TILE_SIZE) + (TILE_SIZE * 0.5)
}

/// Half-open rectangle of tiles: `x..x+width`, `y..y+height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileZone {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl TileZone {
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Direction a sprite is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Facing {
    #[default]
    Down,
    Up,
    Right,
    Left,
}

/// Held movement keys for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveInput {
    pub const NONE: MoveInput = MoveInput {
        up: false,
        down: false,
        left: false,
        right: false,
    };

    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

/// World sprite ids stored in tile codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileSprite {
    Ground,
    Grass,
    Flower,
    Torch,
    Rock,
    Water0,
    Water1,
    Ice,
    TreeTop,
    TreeBottom,
}

impl TileSprite {
    pub const ALL: [TileSprite; 10] = [
        TileSprite::Ground,
        TileSprite::Grass,
        TileSprite::Flower,
        TileSprite::Torch,
        TileSprite::Rock,
        TileSprite::Water0,
        TileSprite::Water1,
        TileSprite::Ice,
        TileSprite::TreeTop,
        TileSprite::TreeBottom,
    ];

    /// 7-bit id as stored inside a [`TileCode`].
    pub const fn id(self) -> u16 {
        self as u16
    }

    pub fn from_id(id: u16) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }
}

/// Packed per-cell tile value.
///
/// Layout: bits 0-6 background sprite, bits 7-13 foreground sprite, bit 15 solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TileCode(u16);

const SPRITE_MASK: u16 = 0x7f;
const FOREGROUND_SHIFT: u16 = 7;
const SOLID_BIT: u16 = 1 << 15;

impl TileCode {
    pub const GROUND: TileCode = TileCode(TileSprite::Ground.id());
    pub const GRASS: TileCode = TileCode(TileSprite::Grass.id());
    pub const FLOWER: TileCode = TileCode(TileSprite::Flower.id());
    pub const TORCH: TileCode = TileCode(TileSprite::Torch.id() << FOREGROUND_SHIFT);
    pub const ROCK: TileCode = TileCode(TileSprite::Rock.id() | SOLID_BIT);
    pub const WATER: TileCode = TileCode(TileSprite::Water0.id() | SOLID_BIT);
    pub const ICE: TileCode = TileCode(TileSprite::Ice.id() | SOLID_BIT);
    pub const TREE: TileCode = TileCode((TileSprite::TreeTop.id() << FOREGROUND_SHIFT) | SOLID_BIT);

    pub const fn new(background: TileSprite, foreground: TileSprite, solid: bool) -> Self {
        let mut raw = background.id() | (foreground.id() << FOREGROUND_SHIFT);
        if solid {
            raw |= SOLID_BIT;
        }
        Self(raw)
    }

    pub const fn raw(self) -> u16 {
        self.0
    }

    pub const fn background(self) -> u16 {
        self.0 & SPRITE_MASK
    }

    pub const fn foreground(self) -> u16 {
        (self.0 >> FOREGROUND_SHIFT) & SPRITE_MASK
    }

    pub const fn is_solid(self) -> bool {
        self.0 & SOLID_BIT != 0
    }

    /// Bitwise union of two codes; used to layer palette entries and tree footprints.
    pub const fn union(self, other: TileCode) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn with_solid(self) -> Self {
        Self(self.0 | SOLID_BIT)
    }
}

/// Sound effects the simulation can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    Breed,
}

/// Fire-and-forget sink for simulation sound requests.
pub trait SoundSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Discards every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl SoundSink for NullSink {
    fn play(&mut self, _effect: SoundEffect) {}
}

impl SoundSink for Vec<SoundEffect> {
    fn play(&mut self, effect: SoundEffect) {
        self.push(effect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_code_bit_layout() {
        assert_eq!(TileCode::TORCH.raw(), 3 << 7);
        assert_eq!(TileCode::ROCK.raw(), 4 | 0x8000);
        assert_eq!(TileCode::TREE.raw(), (8 << 7) | 0x8000);

        let code = TileCode::new(TileSprite::Grass, TileSprite::Torch, false);
        assert_eq!(code, TileCode::GRASS.union(TileCode::TORCH));
        assert_eq!(code.background(), TileSprite::Grass.id());
        assert_eq!(code.foreground(), TileSprite::Torch.id());
        assert!(!code.is_solid());
        assert!(code.with_solid().is_solid());
    }

    #[test]
    fn only_blocking_palette_entries_are_solid() {
        for code in [TileCode::ROCK, TileCode::WATER, TileCode::ICE, TileCode::TREE] {
            assert!(code.is_solid(), "{:?} should be solid", code);
        }
        for code in [TileCode::GROUND, TileCode::GRASS, TileCode::FLOWER, TileCode::TORCH] {
            assert!(!code.is_solid(), "{:?} should be passable", code);
        }
    }

    #[test]
    fn tile_sprite_ids_roundtrip() {
        for sprite in TileSprite::ALL {
            assert_eq!(TileSprite::from_id(sprite.id()), Some(sprite));
        }
        assert_eq!(TileSprite::from_id(10), None);
    }

    #[test]
    fn spawn_zone_bounds() {
        assert!(SPAWN_ZONE.contains(43, 57));
        assert!(SPAWN_ZONE.contains(64, 70));
        assert!(!SPAWN_ZONE.contains(65, 70));
        assert!(!SPAWN_ZONE.contains(64, 71));
        assert!(!SPAWN_ZONE.contains(42, 60));
    }

    #[test]
    fn tile_centre_in_world_units() {
        assert_eq!(TILE_SIZE, 48.0);
        assert_eq!(tile_to_world(54), 54.0 * 48.0 + 24.0);
    }
}
