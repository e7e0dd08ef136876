//! World module - the complete simulation state
//!
//! This module ties together the tile map, the agents, the RNG and the
//! population counters. [`World::step`] advances everything by a variable
//! `delta` once per frame; speeds and growth are scaled by `delta`, while the
//! mob AI runs on its own fixed period.

use tracing::debug;

use crate::agent::{Mob, Sprite};
use crate::rng::Pcg32;
use crate::tile_map::TileMap;
use crate::types::{
    Facing, MoveInput, SoundEffect, SoundSink, FIRST_VIRGIN_TILE, GROWTH_BOOST,
    INITIAL_GROWTH_RATE, INITIAL_POPULATION, MAX_CHILDREN, MOB_SPEED, PLAYER_START_TILE,
    RETARGET_PERIOD_SECS, ROUND_SECS, SPAWN_ZONE,
};

/// The three mob collections, listed in draw order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MobGroup {
    Children,
    Females,
    VirginFemales,
}

/// Population counter and its growth rate.
///
/// Both only ever grow: the population integrates the rate over time and the
/// rate jumps by [`GROWTH_BOOST`] on every breeding event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Population {
    population: f64,
    growth_rate: f64,
}

impl Population {
    pub fn new(population: f64, growth_rate: f64) -> Self {
        Self {
            population,
            growth_rate,
        }
    }

    pub fn population(&self) -> f64 {
        self.population
    }

    pub fn growth_rate(&self) -> f64 {
        self.growth_rate
    }

    pub fn accrue(&mut self, delta: f32) {
        self.population += self.growth_rate * delta as f64;
    }

    pub fn boost(&mut self) {
        self.growth_rate *= GROWTH_BOOST;
    }
}

impl Default for Population {
    fn default() -> Self {
        Self::new(INITIAL_POPULATION, INITIAL_GROWTH_RATE)
    }
}

/// What happened during one [`World::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepReport {
    pub breedings: u32,
    pub children_born: u32,
    pub virgins_spawned: u32,
    /// True when the mob AI tick fired this frame.
    pub retargeted: bool,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct World {
    map: TileMap,
    rng: Pcg32,
    player: Sprite,
    virgin_females: Vec<Mob>,
    females: Vec<Mob>,
    children: Vec<Mob>,
    population: Population,
    retarget_timer: f32,
    elapsed: f64,
}

impl World {
    /// Start a session: the player and one virgin female at their fixed spawn tiles.
    ///
    /// `rng` continues the stream used to generate `map`.
    pub fn new(map: TileMap, rng: Pcg32) -> Self {
        let mut world = Self::empty(map, rng, Sprite::at_tile(PLAYER_START_TILE.0, PLAYER_START_TILE.1));
        world
            .virgin_females
            .push(Mob::at_tile(FIRST_VIRGIN_TILE.0, FIRST_VIRGIN_TILE.1));
        world
    }

    /// A world with only the player in it.
    pub fn empty(map: TileMap, rng: Pcg32, player: Sprite) -> Self {
        Self {
            map,
            rng,
            player,
            virgin_females: Vec::with_capacity(16),
            females: Vec::with_capacity(16),
            children: Vec::with_capacity(16),
            population: Population::default(),
            retarget_timer: 0.0,
            elapsed: 0.0,
        }
    }

    pub fn map(&self) -> &TileMap {
        &self.map
    }

    pub fn player(&self) -> &Sprite {
        &self.player
    }

    pub fn mobs(&self, group: MobGroup) -> &[Mob] {
        match group {
            MobGroup::Children => &self.children,
            MobGroup::Females => &self.females,
            MobGroup::VirginFemales => &self.virgin_females,
        }
    }

    pub fn mobs_mut(&mut self, group: MobGroup) -> &mut Vec<Mob> {
        match group {
            MobGroup::Children => &mut self.children,
            MobGroup::Females => &mut self.females,
            MobGroup::VirginFemales => &mut self.virgin_females,
        }
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn rng(&self) -> &Pcg32 {
        &self.rng
    }

    /// Simulated seconds since the session started.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Whole seconds left on the round countdown, never below zero.
    pub fn remaining_secs(&self) -> u32 {
        let left = ROUND_SECS as f64 - self.elapsed;
        if left <= 0.0 {
            0
        } else {
            left.ceil() as u32
        }
    }

    /// Advance the world by `delta` seconds.
    pub fn step(&mut self, delta: f32, input: MoveInput, sounds: &mut dyn SoundSink) -> StepReport {
        let mut report = StepReport::default();
        self.retarget_timer += delta;
        let speed = delta * MOB_SPEED;

        self.move_player(input, speed);

        if self.retarget_timer >= RETARGET_PERIOD_SECS {
            for mob in self
                .children
                .iter_mut()
                .chain(self.females.iter_mut())
                .chain(self.virgin_females.iter_mut())
            {
                mob.maybe_retarget(&mut self.rng);
            }
            self.retarget_timer = 0.0;
            report.retargeted = true;
        }

        for mob in self
            .children
            .iter_mut()
            .chain(self.females.iter_mut())
            .chain(self.virgin_females.iter_mut())
        {
            mob.advance(speed, &self.map);
        }

        self.detect_breeding(sounds, &mut report);

        self.population.accrue(delta);
        self.elapsed += delta as f64;
        report
    }

    fn move_player(&mut self, input: MoveInput, speed: f32) {
        let mut x = self.player.x;
        let mut y = self.player.y;
        self.player.walking = false;
        if input.right {
            x += speed;
            self.player.facing = Facing::Right;
            self.player.walking = true;
        }
        if input.left {
            x -= speed;
            self.player.facing = Facing::Left;
            self.player.walking = true;
        }
        if input.up {
            y -= speed;
            self.player.facing = Facing::Up;
            self.player.walking = true;
        }
        if input.down {
            y += speed;
            self.player.facing = Facing::Down;
            self.player.walking = true;
        }
        self.player.move_to(x, y, &self.map);
    }

    /// Breed every virgin female the player overlaps.
    ///
    /// Only the virgins present when the scan starts are tested; virgins
    /// spawned by a breeding event wait for the next frame.
    fn detect_breeding(&mut self, sounds: &mut dyn SoundSink, report: &mut StepReport) {
        let player_bounds = self.player.bounds();
        let scanned = self.virgin_females.len();
        for i in 0..scanned {
            let virgin = self.virgin_females[i];
            if !player_bounds.intersects(&virgin.sprite.bounds()) {
                continue;
            }

            self.population.boost();
            sounds.play(SoundEffect::Breed);

            let births = self.rng.next_below(MAX_CHILDREN) + 1;
            for _ in 0..births {
                // Newborns start idle and only wander off if the AI draw hits.
                let mut child = Mob::new(virgin.sprite.x, virgin.sprite.y);
                child.maybe_retarget(&mut self.rng);
                self.children.push(child);
            }

            self.females.push(virgin);

            // The slot is recycled as a fresh virgin somewhere in the breeding zone.
            if let Some((tx, ty)) = self.map.random_open_tile(SPAWN_ZONE, &mut self.rng) {
                let respawn = Sprite::at_tile(tx, ty);
                let sprite = &mut self.virgin_females[i].sprite;
                sprite.x = respawn.x;
                sprite.y = respawn.y;
            } else {
                debug!("no open tile in the spawn zone, virgin {} stays in place", i);
            }

            let mut extra_virgin = false;
            if self.rng.next_u32() & 1 == 1 {
                if let Some((tx, ty)) = self.map.random_open_tile(SPAWN_ZONE, &mut self.rng) {
                    self.virgin_females.push(Mob::at_tile(tx, ty));
                    extra_virgin = true;
                }
            }

            report.breedings += 1;
            report.children_born += births;
            if extra_virgin {
                report.virgins_spawned += 1;
            }
            debug!(
                children = births,
                extra_virgin,
                growth_rate = self.population.growth_rate(),
                "breeding event"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{tile_to_world, NullSink, TileCode};

    fn open_world() -> World {
        let map = TileMap::filled(80, 80, TileCode::GROUND).unwrap();
        World::new(map, Pcg32::new(2024, 7))
    }

    #[test]
    fn test_new_world_spawns() {
        let world = open_world();
        assert_eq!(world.player().x, tile_to_world(54));
        assert_eq!(world.player().y, tile_to_world(23));
        assert_eq!(world.mobs(MobGroup::VirginFemales).len(), 1);
        assert!(world.mobs(MobGroup::Females).is_empty());
        assert!(world.mobs(MobGroup::Children).is_empty());
        assert_eq!(world.population().population(), INITIAL_POPULATION);
        assert_eq!(world.population().growth_rate(), INITIAL_GROWTH_RATE);
    }

    #[test]
    fn test_retarget_timer_resets() {
        let mut world = open_world();
        let mut sink = NullSink;
        assert!(!world.step(0.01, MoveInput::NONE, &mut sink).retargeted);
        assert!(world.step(0.01, MoveInput::NONE, &mut sink).retargeted);
        assert!(!world.step(0.01, MoveInput::NONE, &mut sink).retargeted);
        assert!(world.step(0.05, MoveInput::NONE, &mut sink).retargeted);
        assert!(!world.step(0.001, MoveInput::NONE, &mut sink).retargeted);
    }

    #[test]
    fn test_player_facing_follows_input_into_wall() {
        let mut tiles = vec![TileCode::GROUND; 9];
        tiles[3 + 2] = TileCode::ROCK;
        let map = TileMap::from_tiles(3, 3, tiles).unwrap();
        let mut world = World::empty(map, Pcg32::new(1, 1), Sprite::at_tile(1, 1));

        let input = MoveInput {
            right: true,
            ..MoveInput::NONE
        };
        world.step(0.1, input, &mut NullSink);
        assert_eq!(world.player().x, tile_to_world(1));
        assert_eq!(world.player().facing, Facing::Right);
        assert!(world.player().walking);

        world.step(0.1, MoveInput::NONE, &mut NullSink);
        assert!(!world.player().walking);
        assert_eq!(world.player().facing, Facing::Right);
    }

    #[test]
    fn test_remaining_secs_clamps() {
        let mut world = open_world();
        assert_eq!(world.remaining_secs(), ROUND_SECS);
        world.elapsed = 0.5;
        assert_eq!(world.remaining_secs(), ROUND_SECS);
        world.elapsed = 1.0;
        assert_eq!(world.remaining_secs(), ROUND_SECS - 1);
        world.elapsed = ROUND_SECS as f64 + 10.0;
        assert_eq!(world.remaining_secs(), 0);
    }

    #[test]
    fn test_population_boost_compounds() {
        let mut pop = Population::new(0.0, 4.0);
        pop.boost();
        pop.boost();
        assert!((pop.growth_rate() - 6.25).abs() < 1e-12);
        pop.accrue(2.0);
        assert!((pop.population() - 12.5).abs() < 1e-9);
    }
}
