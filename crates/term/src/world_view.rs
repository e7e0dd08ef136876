//! WorldView: draws a `core::World` into pixel surfaces and terminal cells.
//!
//! This module is pure (no I/O). It can be unit-tested.

use std::fmt::Write as _;

use arrayvec::ArrayString;

use crate::atlas::{MobFrame, MobSheet, SpriteAtlas};
use crate::core::{MobGroup, Sprite, World};
use crate::fb::{FrameBuffer, Rgb};
use crate::surface::{Flip, Rect, Surface, BLACK};
use crate::text::{draw_text, Align};
use crate::types::{
    Facing, TileCode, TileSprite, MOB_ANIMATION_MASK, TILE_SIZE, VIRTUAL_HEIGHT, VIRTUAL_WIDTH,
    WATER_ANIMATION_MASK,
};

const TILE: i32 = TILE_SIZE as i32;

/// Overlay text colour.
pub const OVERLAY_FG: Rgb = Rgb::new(255, 0, 0);

/// Terminal viewport dimensions in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Window surface size: one pixel column per cell, two pixel rows per cell.
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.width as u32, self.height as u32 * 2)
    }
}

/// Sprite frame and mirroring for an agent's facing and gait.
pub fn mob_frame(facing: Facing, walking: bool, anim: bool) -> (MobFrame, Flip) {
    let flip_if = |b: bool| if b { Flip::Horizontal } else { Flip::None };
    match facing {
        Facing::Down if walking => (MobFrame::Down1, flip_if(anim)),
        Facing::Down => (MobFrame::Down0, Flip::None),
        Facing::Up if walking => (MobFrame::Up1, flip_if(anim)),
        Facing::Up => (MobFrame::Up0, Flip::None),
        Facing::Right if walking && anim => (MobFrame::Right1, Flip::None),
        Facing::Right => (MobFrame::Right0, Flip::None),
        Facing::Left if walking && anim => (MobFrame::Right1, Flip::Horizontal),
        Facing::Left => (MobFrame::Right0, Flip::Horizontal),
    }
}

/// Tile grid placement for a camera centred on the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGrid {
    /// Screen position of the first visible tile.
    pub x_off: i32,
    pub y_off: i32,
    /// Map position of the first visible tile.
    pub tile_x: i32,
    pub tile_y: i32,
    pub x_tiles: i32,
    pub y_tiles: i32,
}

impl TileGrid {
    /// One tile of margin on every side so partially visible tiles are drawn.
    pub fn around(player: &Sprite, width: u32, height: u32) -> Self {
        // `as` truncates toward zero, as does `/` and `%` on i32.
        let x0 = (player.x - width as f32 * 0.5 + 0.5) as i32;
        let y0 = (player.y - height as f32 * 0.5 + 0.5) as i32;
        Self {
            x_off: -(x0 % TILE) - TILE,
            y_off: -(y0 % TILE) - TILE,
            tile_x: x0 / TILE - 1,
            tile_y: y0 / TILE - 1,
            x_tiles: width as i32 / TILE + 3,
            y_tiles: height as i32 / TILE + 3,
        }
    }

    /// Visit every visible map cell with its screen position.
    fn for_each(&self, world: &World, mut f: impl FnMut(TileCode, i32, i32)) {
        let map = world.map();
        for y in 0..self.y_tiles {
            let dy = self.y_off + y * TILE;
            for x in 0..self.x_tiles {
                if let Some(tile) = map.get(self.tile_x + x, self.tile_y + y) {
                    f(tile, self.x_off + x * TILE, dy);
                }
            }
        }
    }
}

/// Renders the world into the virtual surface.
#[derive(Debug, Clone, Copy)]
pub struct WorldView {
    width: u32,
    height: u32,
}

impl Default for WorldView {
    fn default() -> Self {
        Self::new(VIRTUAL_WIDTH, VIRTUAL_HEIGHT)
    }
}

impl WorldView {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Screen rect of an agent: centred on the viewport when it is the player.
    pub fn agent_rect(&self, sprite: &Sprite, player: &Sprite) -> Rect {
        let x = sprite.x - player.x + self.width as f32 * 0.5 - TILE_SIZE * 0.5;
        let y = sprite.y - player.y + self.height as f32 * 0.5 - TILE_SIZE * 0.5;
        Rect::new(x.floor() as i32, y.floor() as i32, TILE as u32, TILE as u32)
    }

    /// Draw one frame.
    ///
    /// Layers, back to front: background tiles, torches and tree bottoms,
    /// children, females, virgins, the player, tree tops.
    pub fn render(&self, world: &World, ticks_ms: u64, atlas: &SpriteAtlas, surface: &mut Surface) {
        surface.resize(self.width, self.height);
        surface.fill(BLACK);

        let sheet = atlas.surface();
        let grid = TileGrid::around(world.player(), self.width, self.height);
        let water_frame = ticks_ms & WATER_ANIMATION_MASK != 0;
        let tile = |x: i32, y: i32, w: i32| Rect::new(x, y, w as u32, TILE as u32);

        grid.for_each(world, |code, x, y| {
            let sprite = if code == TileCode::WATER && water_frame {
                Some(TileSprite::Water1)
            } else {
                TileSprite::from_id(code.background())
            };
            if let Some(sprite) = sprite {
                surface.blit(sheet, SpriteAtlas::tile_rect(sprite), tile(x, y, TILE), Flip::None);
            }
        });

        grid.for_each(world, |code, x, y| match TileSprite::from_id(code.foreground()) {
            Some(TileSprite::Torch) => {
                surface.blit(
                    sheet,
                    SpriteAtlas::tile_rect(TileSprite::Torch),
                    tile(x, y, TILE),
                    Flip::None,
                );
            }
            Some(TileSprite::TreeTop) => {
                surface.blit(
                    sheet,
                    SpriteAtlas::tile_rect(TileSprite::TreeBottom),
                    tile(x, y + TILE, TILE * 2),
                    Flip::None,
                );
            }
            _ => {}
        });

        let anim = ticks_ms & MOB_ANIMATION_MASK != 0;
        let player = world.player();
        for (group, mob_sheet) in [
            (MobGroup::Children, MobSheet::Player),
            (MobGroup::Females, MobSheet::Female),
            (MobGroup::VirginFemales, MobSheet::Virgin),
        ] {
            for mob in world.mobs(group) {
                self.draw_agent(surface, sheet, &mob.sprite, player, mob_sheet, anim);
            }
        }
        self.draw_agent(surface, sheet, player, player, MobSheet::Player, anim);

        grid.for_each(world, |code, x, y| {
            if code == TileCode::TREE {
                surface.blit(
                    sheet,
                    SpriteAtlas::tile_rect(TileSprite::TreeTop),
                    tile(x, y, TILE * 2),
                    Flip::None,
                );
            }
        });
    }

    fn draw_agent(
        &self,
        surface: &mut Surface,
        sheet: &Surface,
        sprite: &Sprite,
        player: &Sprite,
        mob_sheet: MobSheet,
        anim: bool,
    ) {
        let (frame, flip) = mob_frame(sprite.facing, sprite.walking, anim);
        surface.blit(
            sheet,
            SpriteAtlas::mob_rect(mob_sheet, frame),
            self.agent_rect(sprite, player),
            flip,
        );
    }
}

/// Countdown text, `m:ss`.
pub fn format_timer(remaining_secs: u32) -> ArrayString<16> {
    let mut s = ArrayString::new();
    // Cannot overflow: u32 minutes fit in 10 digits.
    let _ = write!(s, "{}:{:02}", remaining_secs / 60, remaining_secs % 60);
    s
}

/// Integer part of the population counter.
pub fn format_population(population: f64) -> ArrayString<24> {
    let mut s = ArrayString::new();
    let _ = write!(s, "{}", population.max(0.0).floor() as u64);
    s
}

/// Full frame pipeline: world view, letterbox, half-block cells, overlay.
///
/// Keeps its surfaces between frames so steady-state rendering does not allocate.
pub struct Compositor {
    view: WorldView,
    world_surface: Surface,
    window_surface: Surface,
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new(WorldView::default())
    }
}

impl Compositor {
    pub fn new(view: WorldView) -> Self {
        Self {
            view,
            world_surface: Surface::new(view.width(), view.height()),
            window_surface: Surface::new(0, 0),
        }
    }

    pub fn world_surface(&self) -> &Surface {
        &self.world_surface
    }

    pub fn render_into(
        &mut self,
        world: &World,
        ticks_ms: u64,
        atlas: &SpriteAtlas,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        self.view.render(world, ticks_ms, atlas, &mut self.world_surface);

        let (w, h) = viewport.pixel_size();
        self.window_surface.resize(w, h);
        self.world_surface.present_letterboxed(&mut self.window_surface);
        fb.fill_half_blocks(&self.window_surface);

        draw_overlay(world, fb);
    }
}

/// Timer on the left, population on the right, both on the top row.
pub fn draw_overlay(world: &World, fb: &mut FrameBuffer) {
    let timer = format_timer(world.remaining_secs());
    draw_text(fb, 0, 0, &timer, Align::Left, OVERLAY_FG);

    let population = format_population(world.population().population());
    draw_text(fb, fb.width(), 0, &population, Align::Right, OVERLAY_FG);
}
