//! Tile map module - the world grid
//!
//! The map is a width x height grid of [`TileCode`] values built once from a
//! level image, where every pixel colour selects a palette entry.
//! Uses a flat row-major vector (y * width + x).
//! Coordinates: (x, y) where x grows to the right and y grows downward.

use thiserror::Error;

use crate::rng::Pcg32;
use crate::types::{TileCode, TileZone, TILE_SIZE};

/// Level palette colours (ARGB). Matching is exact; anything else is ground.
pub mod palette {
    pub const GRASS: u32 = 0xffff_ffff;
    pub const ROCK: u32 = 0xff44_c4ff;
    pub const WATER: u32 = 0xff3a_5eff;
    pub const ICE: u32 = 0xffb5_c2ff;
    pub const FLOWER: u32 = 0xff00_ff04;
    pub const TREE: u32 = 0xff15_6b20;
    pub const TORCH: u32 = 0xffff_ff00;
}

/// Decoration odds for grass pixels (1 in N gets the grass sprite).
const GRASS_ODDS: u32 = 8;

/// Upper bound on rejection sampling when looking for an open tile.
const MAX_SPAWN_ATTEMPTS: u32 = 4096;

/// Read access to a decoded image, one ARGB value per pixel.
pub trait PixelSource {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// ARGB colour at (x, y). Callers stay within `width() x height()`.
    fn pixel(&self, x: u32, y: u32) -> u32;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LevelError {
    #[error("invalid tile map dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("tile buffer holds {actual} cells, expected {expected}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// The world grid. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct TileMap {
    width: u32,
    height: u32,
    /// Flat array of tiles, row-major order (y * width + x)
    tiles: Vec<TileCode>,
}

impl TileMap {
    /// Build the map from a level image.
    ///
    /// Grass pixels (and the grass under torches) are decorated at random, so
    /// the result depends on the generator state, not only on the image.
    pub fn from_source(source: &dyn PixelSource, rng: &mut Pcg32) -> Result<Self, LevelError> {
        let width = source.width();
        let height = source.height();
        if width == 0 || height == 0 {
            return Err(LevelError::InvalidDimensions { width, height });
        }

        let mut map = Self {
            width,
            height,
            tiles: vec![TileCode::GROUND; (width as usize) * (height as usize)],
        };

        for y in 0..height {
            for x in 0..width {
                let code = match source.pixel(x, y) {
                    palette::GRASS => {
                        if rng.next_below(GRASS_ODDS) == 0 {
                            TileCode::GRASS
                        } else {
                            TileCode::GROUND
                        }
                    }
                    palette::ROCK => TileCode::ROCK,
                    palette::WATER => TileCode::WATER,
                    palette::ICE => TileCode::ICE,
                    palette::FLOWER => TileCode::FLOWER,
                    palette::TORCH => {
                        if rng.next_below(GRASS_ODDS) == 0 {
                            TileCode::TORCH.union(TileCode::GRASS)
                        } else {
                            TileCode::TORCH
                        }
                    }
                    palette::TREE => {
                        map.mark_tree_footprint(x, y);
                        TileCode::TREE
                    }
                    _ => TileCode::GROUND,
                };
                let idx = map.index_unchecked(x, y);
                // OR-in: a tree above or to the left may already have marked this cell solid.
                map.tiles[idx] = map.tiles[idx].union(code);
            }
        }

        Ok(map)
    }

    /// Build a map from an explicit row-major tile buffer.
    pub fn from_tiles(width: u32, height: u32, tiles: Vec<TileCode>) -> Result<Self, LevelError> {
        if width == 0 || height == 0 {
            return Err(LevelError::InvalidDimensions { width, height });
        }
        let expected = (width as usize) * (height as usize);
        if tiles.len() != expected {
            return Err(LevelError::SizeMismatch {
                expected,
                actual: tiles.len(),
            });
        }
        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    /// A map filled with a single tile.
    pub fn filled(width: u32, height: u32, tile: TileCode) -> Result<Self, LevelError> {
        Self::from_tiles(width, height, vec![tile; (width as usize) * (height as usize)])
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn tiles(&self) -> &[TileCode] {
        &self.tiles
    }

    #[inline(always)]
    fn index_unchecked(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(self.index_unchecked(x as u32, y as u32))
    }

    /// Tile at (x, y), or `None` outside the map.
    pub fn get(&self, x: i32, y: i32) -> Option<TileCode> {
        self.index(x, y).map(|idx| self.tiles[idx])
    }

    /// Solid check in tile coordinates. Cells outside the map are solid.
    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        self.get(x, y).map_or(true, TileCode::is_solid)
    }

    /// Solid check for the tile containing a world position.
    pub fn is_solid_at_world(&self, x: f32, y: f32) -> bool {
        self.is_solid(world_to_tile(x), world_to_tile(y))
    }

    /// Pick a random non-solid tile inside `zone`.
    ///
    /// Returns `None` if no open tile turned up within a bounded number of draws.
    pub fn random_open_tile(&self, zone: TileZone, rng: &mut Pcg32) -> Option<(u32, u32)> {
        for _ in 0..MAX_SPAWN_ATTEMPTS {
            let x = zone.x + rng.next_below(zone.width);
            let y = zone.y + rng.next_below(zone.height);
            if !self.is_solid(x as i32, y as i32) {
                return Some((x, y));
            }
        }
        None
    }

    /// Trees are drawn two tiles wide; block the cells right, below and below-right.
    fn mark_tree_footprint(&mut self, x: u32, y: u32) {
        let right = x + 1 < self.width;
        let below = y + 1 < self.height;
        if right {
            self.set_solid(x + 1, y);
        }
        if below {
            self.set_solid(x, y + 1);
            if right {
                self.set_solid(x + 1, y + 1);
            }
        }
    }

    fn set_solid(&mut self, x: u32, y: u32) {
        let idx = self.index_unchecked(x, y);
        self.tiles[idx] = self.tiles[idx].with_solid();
    }
}

/// Tile coordinate containing world coordinate `v`.
#[inline]
pub fn world_to_tile(v: f32) -> i32 {
    (v / TILE_SIZE).floor() as i32
}

/// In-memory pixel grid, handy for generated levels and fixtures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl PixelGrid {
    pub fn new(width: u32, height: u32, fill: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; (width as usize) * (height as usize)],
        }
    }

    pub fn set(&mut self, x: u32, y: u32, argb: u32) {
        if x < self.width && y < self.height {
            self.pixels[(y as usize) * (self.width as usize) + (x as usize)] = argb;
        }
    }
}

impl PixelSource for PixelGrid {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixel(&self, x: u32, y: u32) -> u32 {
        self.pixels[(y as usize) * (self.width as usize) + (x as usize)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TileSprite;

    #[test]
    fn test_index_calculation() {
        let map = TileMap::filled(10, 20, TileCode::GROUND).unwrap();
        assert_eq!(map.index(0, 0), Some(0));
        assert_eq!(map.index(9, 0), Some(9));
        assert_eq!(map.index(0, 1), Some(10));
        assert_eq!(map.index(9, 19), Some(199));
        assert_eq!(map.index(-1, 0), None);
        assert_eq!(map.index(10, 0), None);
        assert_eq!(map.index(0, 20), None);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let grid = PixelGrid::new(0, 4, palette::ROCK);
        let mut rng = Pcg32::new(1, 1);
        assert_eq!(
            TileMap::from_source(&grid, &mut rng),
            Err(LevelError::InvalidDimensions { width: 0, height: 4 })
        );
    }

    #[test]
    fn test_buffer_size_checked() {
        assert_eq!(
            TileMap::from_tiles(2, 2, vec![TileCode::GROUND; 3]),
            Err(LevelError::SizeMismatch {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn test_tree_footprint_at_map_edge() {
        // Tree in the bottom-right corner: no neighbour exists, nothing to mark.
        let mut grid = PixelGrid::new(3, 3, 0);
        grid.set(2, 2, palette::TREE);
        let mut rng = Pcg32::new(1, 1);
        let map = TileMap::from_source(&grid, &mut rng).unwrap();

        assert_eq!(map.get(2, 2), Some(TileCode::TREE));
        let solid = map.tiles().iter().filter(|t| t.is_solid()).count();
        assert_eq!(solid, 1);
    }

    #[test]
    fn test_tree_footprint_survives_later_pixels() {
        let mut grid = PixelGrid::new(4, 4, palette::FLOWER);
        grid.set(1, 1, palette::TREE);
        let mut rng = Pcg32::new(1, 1);
        let map = TileMap::from_source(&grid, &mut rng).unwrap();

        for (x, y) in [(2, 1), (1, 2), (2, 2)] {
            let tile = map.get(x, y).unwrap();
            assert!(tile.is_solid(), "({}, {}) should be blocked by the tree", x, y);
            assert_eq!(tile.background(), TileSprite::Flower.id());
        }
        assert!(!map.is_solid(0, 1));
        assert!(!map.is_solid(3, 1));
    }

    #[test]
    fn test_out_of_bounds_is_solid() {
        let map = TileMap::filled(2, 2, TileCode::GROUND).unwrap();
        assert!(!map.is_solid_at_world(10.0, 10.0));
        assert!(map.is_solid_at_world(-1.0, 10.0));
        assert!(map.is_solid_at_world(10.0, TILE_SIZE * 2.0));
    }

    #[test]
    fn test_random_open_tile_avoids_solid() {
        let mut tiles = vec![TileCode::ROCK; 16];
        tiles[2 * 4 + 3] = TileCode::GROUND;
        let map = TileMap::from_tiles(4, 4, tiles).unwrap();
        let mut rng = Pcg32::new(99, 3);
        let zone = TileZone {
            x: 0,
            y: 0,
            width: 4,
            height: 4,
        };
        assert_eq!(map.random_open_tile(zone, &mut rng), Some((3, 2)));
    }

    #[test]
    fn test_random_open_tile_gives_up_on_solid_zone() {
        let map = TileMap::filled(4, 4, TileCode::WATER).unwrap();
        let mut rng = Pcg32::new(5, 5);
        let zone = TileZone {
            x: 0,
            y: 0,
            width: 4,
            height: 4,
        };
        assert_eq!(map.random_open_tile(zone, &mut rng), None);
    }
}
