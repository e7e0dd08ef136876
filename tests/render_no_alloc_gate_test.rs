use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use genesis::core::{Pcg32, PixelGrid, TileMap, World};
use genesis::term::{Compositor, FrameBuffer, SpriteAtlas, Viewport};
use genesis::types::{MoveInput, NullSink, TileCode};

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

#[test]
fn compositor_is_allocation_free_after_warmup() {
    let mut tiles = vec![TileCode::GROUND; 80 * 80];
    for x in (0..80).step_by(5) {
        tiles[10 * 80 + x] = TileCode::TREE;
        tiles[30 * 80 + x] = TileCode::WATER;
    }
    let map = TileMap::from_tiles(80, 80, tiles).unwrap();
    let mut world = World::new(map, Pcg32::new(9, 9));
    let atlas = SpriteAtlas::from_source(&PixelGrid::new(256, 256, 0xff20_4060)).unwrap();

    let mut compositor = Compositor::default();
    let viewport = Viewport::new(160, 48);
    let mut fb = FrameBuffer::new(viewport.width, viewport.height);

    // Warm-up sizes the window surface and the framebuffer.
    compositor.render_into(&world, 0, &atlas, viewport, &mut fb);

    let input = MoveInput {
        up: true,
        ..MoveInput::NONE
    };
    let allocs = with_alloc_counting(|| {
        for frame in 0..200u64 {
            world.step(1.0 / 60.0, input, &mut NullSink);
            compositor.render_into(&world, frame * 16, &atlas, viewport, &mut fb);
        }
    });

    assert_eq!(allocs, 0);
}
