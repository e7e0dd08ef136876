//! ARGB pixel surfaces and the scaled blits the compositor is built on.
//!
//! Pixels are `0xAARRGGBB`. Blits are nearest-neighbour, clip against the
//! destination, and skip source pixels whose alpha is zero.

/// Opaque black, used for clears and letterbox bars.
pub const BLACK: u32 = 0xff00_0000;

/// Axis-aligned pixel rectangle. Destination rects may hang off any edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
}

/// Horizontal mirroring applied by [`Surface::blit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flip {
    #[default]
    None,
    Horizontal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl Surface {
    /// A surface cleared to transparent black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Resize, keeping the allocation. Contents are unspecified afterwards.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        self.pixels.resize((width as usize) * (height as usize), 0);
    }

    #[inline(always)]
    fn idx(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u32, y: u32) -> Option<u32> {
        self.idx(x, y).map(|i| self.pixels[i])
    }

    pub fn set(&mut self, x: u32, y: u32, argb: u32) {
        if let Some(i) = self.idx(x, y) {
            self.pixels[i] = argb;
        }
    }

    pub fn fill(&mut self, argb: u32) {
        self.pixels.fill(argb);
    }

    /// Copy `src_rect` of `src` into `dst_rect`, scaling to fit.
    pub fn blit(&mut self, src: &Surface, src_rect: Rect, dst_rect: Rect, flip: Flip) {
        self.blit_with(src, src_rect, dst_rect, flip, true);
    }

    fn blit_with(&mut self, src: &Surface, src_rect: Rect, dst_rect: Rect, flip: Flip, keyed: bool) {
        if src_rect.w == 0 || src_rect.h == 0 || dst_rect.w == 0 || dst_rect.h == 0 {
            return;
        }

        let x_start = dst_rect.x.max(0);
        let y_start = dst_rect.y.max(0);
        let x_end = (dst_rect.x as i64 + dst_rect.w as i64).min(self.width as i64);
        let y_end = (dst_rect.y as i64 + dst_rect.h as i64).min(self.height as i64);
        if x_start as i64 >= x_end || y_start as i64 >= y_end {
            return;
        }

        for dy in y_start as i64..y_end {
            let v = (dy - dst_rect.y as i64) as u64 * src_rect.h as u64 / dst_rect.h as u64;
            let sy = src_rect.y as i64 + v as i64;
            let row = (dy as usize) * (self.width as usize);
            for dx in x_start as i64..x_end {
                let mut u = (dx - dst_rect.x as i64) as u64 * src_rect.w as u64 / dst_rect.w as u64;
                if flip == Flip::Horizontal {
                    u = src_rect.w as u64 - 1 - u;
                }
                let sx = src_rect.x as i64 + u as i64;
                if sx < 0 || sy < 0 {
                    continue;
                }
                let Some(pixel) = src.get(sx as u32, sy as u32) else {
                    continue;
                };
                if keyed && pixel >> 24 == 0 {
                    continue;
                }
                self.pixels[row + dx as usize] = pixel;
            }
        }
    }

    /// Scale the whole surface into `dst`, preserving aspect ratio.
    ///
    /// `dst` is cleared to black first so the bars are black. Returns the
    /// rectangle the image landed in.
    pub fn present_letterboxed(&self, dst: &mut Surface) -> Letterbox {
        let letterbox = Letterbox::fit(self.width, self.height, dst.width, dst.height);
        dst.fill(BLACK);
        dst.blit_with(
            self,
            Rect::new(0, 0, self.width, self.height),
            letterbox.rect,
            Flip::None,
            false,
        );
        letterbox
    }
}

/// Placement of a virtual surface inside a window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Letterbox {
    pub scale: f32,
    pub rect: Rect,
}

impl Letterbox {
    /// `scale = min(win_w / virt_w, win_h / virt_h)`, output centred.
    pub fn fit(virt_w: u32, virt_h: u32, win_w: u32, win_h: u32) -> Self {
        if virt_w == 0 || virt_h == 0 {
            return Self {
                scale: 0.0,
                rect: Rect::new(0, 0, 0, 0),
            };
        }
        let scale = (win_w as f32 / virt_w as f32).min(win_h as f32 / virt_h as f32);
        // Integer math so the limiting axis fills the window exactly.
        let (w, h) = if (win_w as u64) * (virt_h as u64) <= (win_h as u64) * (virt_w as u64) {
            (win_w, ((virt_h as u64) * (win_w as u64) / virt_w as u64) as u32)
        } else {
            (((virt_w as u64) * (win_h as u64) / virt_h as u64) as u32, win_h)
        };
        Self {
            scale,
            rect: Rect::new(((win_w - w) / 2) as i32, ((win_h - h) / 2) as i32, w, h),
        }
    }
}
