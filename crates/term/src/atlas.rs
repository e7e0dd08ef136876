//! Sprite atlas: the 256x256 sprite sheet plus its rectangle tables.

use thiserror::Error;

use crate::core::PixelSource;
use crate::surface::{Rect, Surface};
use crate::types::{TileSprite, ATLAS_SIZE, SPRITE_PX};

/// Colours the sheet uses to mark transparent pixels.
pub const TRANSPARENT_KEYS: [u32; 2] = [0xffff_00ff, 0xff7f_007f];

const FEMALE_ACCENT: u32 = 0xffbc_2823;
const VIRGIN_ACCENT: u32 = 0xff4e_d35b;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AtlasError {
    #[error("sprite sheet must be {expected}x{expected}, got {width}x{height}")]
    InvalidSize { expected: u32, width: u32, height: u32 },
}

/// Which character sheet an agent is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MobSheet {
    Player,
    Female,
    Virgin,
}

impl MobSheet {
    const fn origin(self) -> (i32, i32) {
        match self {
            MobSheet::Player => (0, 112),
            MobSheet::Female => (96, 112),
            MobSheet::Virgin => (0, 144),
        }
    }
}

/// Frame within a character sheet, in sheet order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MobFrame {
    Up0,
    Up1,
    Down0,
    Down1,
    Right0,
    Right1,
}

pub struct SpriteAtlas {
    pixels: Surface,
}

impl SpriteAtlas {
    /// Build the atlas from a decoded sprite sheet.
    ///
    /// Key colours become fully transparent and the virgin sheet is derived
    /// from the female sheet with its accent colour swapped.
    pub fn from_source(source: &dyn PixelSource) -> Result<Self, AtlasError> {
        if source.width() != ATLAS_SIZE || source.height() != ATLAS_SIZE {
            return Err(AtlasError::InvalidSize {
                expected: ATLAS_SIZE,
                width: source.width(),
                height: source.height(),
            });
        }

        let mut pixels = Surface::new(ATLAS_SIZE, ATLAS_SIZE);
        for y in 0..ATLAS_SIZE {
            for x in 0..ATLAS_SIZE {
                let argb = source.pixel(x, y);
                let argb = if TRANSPARENT_KEYS.contains(&argb) { 0 } else { argb };
                pixels.set(x, y, argb);
            }
        }

        let (fx, fy) = MobSheet::Female.origin();
        let (vx, vy) = MobSheet::Virgin.origin();
        for y in 0..SPRITE_PX {
            for x in 0..SPRITE_PX * 6 {
                let argb = pixels.get(fx as u32 + x, fy as u32 + y).unwrap_or(0);
                let argb = if argb == FEMALE_ACCENT { VIRGIN_ACCENT } else { argb };
                pixels.set(vx as u32 + x, vy as u32 + y, argb);
            }
        }

        Ok(Self { pixels })
    }

    pub fn surface(&self) -> &Surface {
        &self.pixels
    }

    pub fn tile_rect(sprite: TileSprite) -> Rect {
        let (x, y, w) = match sprite {
            TileSprite::Ground => (0, 0, 16),
            TileSprite::Grass => (32, 0, 16),
            TileSprite::Flower => (48, 0, 16),
            TileSprite::Torch => (0, 16, 16),
            TileSprite::Rock => (64, 0, 16),
            TileSprite::Water0 => (16, 16, 16),
            TileSprite::Water1 => (32, 16, 16),
            TileSprite::Ice => (64, 16, 16),
            TileSprite::TreeTop => (80, 0, 32),
            TileSprite::TreeBottom => (80, 16, 32),
        };
        Rect::new(x, y, w, SPRITE_PX)
    }

    pub fn mob_rect(sheet: MobSheet, frame: MobFrame) -> Rect {
        let (x, y) = sheet.origin();
        Rect::new(x + (frame as i32) * SPRITE_PX as i32, y, SPRITE_PX, SPRITE_PX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PixelGrid;

    #[test]
    fn test_rejects_wrong_size() {
        let grid = PixelGrid::new(128, 256, 0xff00_0000);
        let err = SpriteAtlas::from_source(&grid).err();
        assert_eq!(
            err,
            Some(AtlasError::InvalidSize {
                expected: 256,
                width: 128,
                height: 256
            })
        );
    }

    #[test]
    fn test_key_colours_become_transparent() {
        let mut grid = PixelGrid::new(256, 256, 0xff10_2030);
        grid.set(0, 0, 0xffff_00ff);
        grid.set(1, 0, 0xff7f_007f);
        let atlas = SpriteAtlas::from_source(&grid).unwrap();
        assert_eq!(atlas.surface().get(0, 0), Some(0));
        assert_eq!(atlas.surface().get(1, 0), Some(0));
        assert_eq!(atlas.surface().get(2, 0), Some(0xff10_2030));
    }

    #[test]
    fn test_virgin_sheet_is_recoloured_female_sheet() {
        let mut grid = PixelGrid::new(256, 256, 0xff00_0000);
        grid.set(96, 112, FEMALE_ACCENT);
        grid.set(191, 127, 0xff11_2233);
        grid.set(100, 120, 0xffff_00ff);
        let atlas = SpriteAtlas::from_source(&grid).unwrap();

        assert_eq!(atlas.surface().get(0, 144), Some(VIRGIN_ACCENT));
        assert_eq!(atlas.surface().get(95, 159), Some(0xff11_2233));
        assert_eq!(atlas.surface().get(4, 152), Some(0));
        // The female sheet keeps its own accent.
        assert_eq!(atlas.surface().get(96, 112), Some(FEMALE_ACCENT));
    }

    #[test]
    fn test_rect_tables() {
        assert_eq!(SpriteAtlas::tile_rect(TileSprite::TreeTop), Rect::new(80, 0, 32, 16));
        assert_eq!(SpriteAtlas::tile_rect(TileSprite::Water1), Rect::new(32, 16, 16, 16));
        assert_eq!(
            SpriteAtlas::mob_rect(MobSheet::Female, MobFrame::Right1),
            Rect::new(176, 112, 16, 16)
        );
        assert_eq!(
            SpriteAtlas::mob_rect(MobSheet::Virgin, MobFrame::Up0),
            Rect::new(0, 144, 16, 16)
        );
    }
}
