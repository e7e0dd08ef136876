//! Genesis terminal runner (default binary).
//!
//! Loads the sprite sheet and level, builds the world and runs the
//! input -> step -> render loop until a quit key is pressed.
//! Logs go to stderr; set `RUST_LOG=debug` and redirect with `2>genesis.log`.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use rand::SeedableRng;
use tracing::{debug, info};

use genesis::audio::{AudioHandle, Clip, Mixer, Pump};
use genesis::core::{Pcg32, TileMap, World};
use genesis::input::{should_quit, InputHandler};
use genesis::term::{Compositor, FrameBuffer, SpriteAtlas, TerminalRenderer, Viewport};
use genesis::{DecodedImage, FrameClock, GameConfig};

fn main() -> Result<()> {
    init_tracing();
    let config = GameConfig::from_env();
    debug!(?config, "configuration");

    let sheet = DecodedImage::open(&config.sprites)
        .with_context(|| format!("loading sprite sheet {}", config.sprites.display()))?;
    let atlas = SpriteAtlas::from_source(&sheet)
        .with_context(|| format!("building sprite atlas from {}", config.sprites.display()))?;
    let level = DecodedImage::open(&config.level)
        .with_context(|| format!("loading level {}", config.level.display()))?;

    let mut rng = match config.seed {
        Some(seed) => Pcg32::seed_from_u64(seed),
        None => Pcg32::from_entropy().context("seeding random number generator")?,
    };
    let map = TileMap::from_source(&level, &mut rng)
        .with_context(|| format!("building tile map from {}", config.level.display()))?;
    info!(width = map.width(), height = map.height(), seed = ?config.seed, "level ready");
    let mut world = World::new(map, rng);

    let (mut mixer, handle) = Mixer::new();
    mixer.set_music(Some(Arc::new(Clip::sweep(110.0, 110.0, 2.0, 0.05))));
    let mut sounds = handle.with_breed_clip(Arc::new(Clip::sweep(440.0, 880.0, 0.15, 0.4)));
    // No output device: the pump keeps the mixer running at the output rate.
    let pump = Pump::spawn(mixer, |_| {}).context("starting audio thread")?;

    let mut term = TerminalRenderer::new();
    let release_events = term.enter()?;
    let mut input = InputHandler::new()
        .with_key_release_timeout_ms(config.key_release_ms)
        .with_release_events(release_events);

    let result = run(&mut term, &mut world, &atlas, &mut input, &mut sounds, config.fps_cap);

    // Always try to restore terminal state.
    let _ = term.exit();
    pump.stop();
    info!(
        population = world.population().population(),
        elapsed_secs = world.elapsed(),
        "session ended"
    );
    result
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(
    term: &mut TerminalRenderer,
    world: &mut World,
    atlas: &SpriteAtlas,
    input: &mut InputHandler,
    sounds: &mut AudioHandle,
    fps_cap: bool,
) -> Result<()> {
    let mut clock = FrameClock::new(fps_cap);
    let mut compositor = Compositor::default();
    let mut fb = FrameBuffer::new(0, 0);

    loop {
        let tick = clock.tick();

        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Release && should_quit(key) {
                        return Ok(());
                    }
                    input.handle_key_event(key, tick.ticks_ms);
                }
                Event::Resize(..) => term.invalidate(),
                Event::FocusLost => input.reset(),
                _ => {}
            }
        }

        let report = world.step(tick.delta, input.state(tick.ticks_ms), sounds);
        if report.breedings > 0 {
            debug!(
                children = report.children_born,
                virgins = report.virgins_spawned,
                growth_rate = world.population().growth_rate(),
                "breeding"
            );
        }
        if let Some(fps) = tick.fps {
            debug!(fps, population = world.population().population(), "frame rate");
        }

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        compositor.render_into(world, tick.ticks_ms, atlas, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        if let Some(nap) = clock.frame_end() {
            thread::sleep(nap);
        }
    }
}
