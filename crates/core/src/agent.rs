//! Agent model - the player and the autonomous mobs.

use crate::rng::Pcg32;
use crate::tile_map::{world_to_tile, TileMap};
use crate::types::{tile_to_world, Facing, RETARGET_ODDS, TILE_SIZE};

/// Anything drawn with a mob sprite sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    /// Centre of the sprite in world units.
    pub x: f32,
    pub y: f32,
    pub facing: Facing,
    pub walking: bool,
}

impl Sprite {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            facing: Facing::Down,
            walking: false,
        }
    }

    /// Sprite centred on a tile.
    pub fn at_tile(tile_x: u32, tile_y: u32) -> Self {
        Self::new(tile_to_world(tile_x), tile_to_world(tile_y))
    }

    /// Tile-sized bounding box centred on the sprite.
    pub fn bounds(&self) -> Bounds {
        Bounds {
            x: self.x - TILE_SIZE * 0.5,
            y: self.y - TILE_SIZE * 0.5,
            w: TILE_SIZE,
            h: TILE_SIZE,
        }
    }

    /// Move towards `(x, y)`, resolving each axis against the map independently.
    ///
    /// The X move is tested on the current row and the Y move on the current
    /// column, so an agent pushing diagonally into a wall slides along it.
    pub fn move_to(&mut self, x: f32, y: f32, map: &TileMap) {
        let cur_tile_x = world_to_tile(self.x);
        let cur_tile_y = world_to_tile(self.y);
        let new_tile_x = world_to_tile(x);
        let new_tile_y = world_to_tile(y);
        if !map.is_solid(new_tile_x, cur_tile_y) {
            self.x = x;
        }
        if !map.is_solid(cur_tile_x, new_tile_y) {
            self.y = y;
        }
    }
}

/// Axis-aligned rectangle in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Bounds {
    /// True when the rectangles share a non-empty area. Touching edges do not count.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }
}

/// An autonomous agent: a sprite plus a direction vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mob {
    pub sprite: Sprite,
    /// -1, 0 or 1
    pub x_direction: i8,
    /// -1, 0 or 1
    pub y_direction: i8,
}

impl Mob {
    /// Idle mob facing down at a world position.
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            sprite: Sprite::new(x, y),
            x_direction: 0,
            y_direction: 0,
        }
    }

    pub fn at_tile(tile_x: u32, tile_y: u32) -> Self {
        Self {
            sprite: Sprite::at_tile(tile_x, tile_y),
            x_direction: 0,
            y_direction: 0,
        }
    }

    /// AI tick: with probability `1 / RETARGET_ODDS` pick a new direction.
    pub fn maybe_retarget(&mut self, rng: &mut Pcg32) {
        if rng.next_below(RETARGET_ODDS) == 0 {
            self.retarget(rng);
        }
    }

    /// Pick a new random direction and derive facing/walking from it.
    pub fn retarget(&mut self, rng: &mut Pcg32) {
        self.x_direction = rng.next_direction();
        self.y_direction = rng.next_direction();
        self.sync_facing();
    }

    /// Facing follows the direction vector; the vertical axis wins when both are set.
    pub fn sync_facing(&mut self) {
        self.sprite.walking = false;
        if self.x_direction == 1 {
            self.sprite.facing = Facing::Right;
            self.sprite.walking = true;
        }
        if self.x_direction == -1 {
            self.sprite.facing = Facing::Left;
            self.sprite.walking = true;
        }
        if self.y_direction == -1 {
            self.sprite.facing = Facing::Up;
            self.sprite.walking = true;
        }
        if self.y_direction == 1 {
            self.sprite.facing = Facing::Down;
            self.sprite.walking = true;
        }
    }

    /// Advance along the current direction by `speed` world units.
    pub fn advance(&mut self, speed: f32, map: &TileMap) {
        let x = self.sprite.x + speed * self.x_direction as f32;
        let y = self.sprite.y + speed * self.y_direction as f32;
        self.sprite.move_to(x, y, map);
    }
}
