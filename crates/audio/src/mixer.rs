//! Sound-effect slot table shared between the game thread and the mixer.
//!
//! The game thread assigns clips to [`MAX_SFX`] slots round-robin through an
//! [`AudioHandle`]. The audio thread owns the [`Mixer`], sums the looping music
//! and every active slot into the output buffer, and clears slots whose clip
//! ran out. The lock is only held to assign, snapshot or write back a slot;
//! a per-slot generation counter tells the mixer a slot was reassigned while
//! it was mixing, in which case its write-back is dropped.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use genesis_types::{SoundEffect, SoundSink};

use crate::clip::Clip;

/// Number of simultaneous sound effects.
pub const MAX_SFX: usize = 8;

#[derive(Debug, Clone, Default)]
struct Slot {
    clip: Option<Arc<Clip>>,
    position: usize,
    generation: u64,
}

#[derive(Debug, Default)]
struct SlotTable {
    slots: [Slot; MAX_SFX],
    next: usize,
}

impl SlotTable {
    /// Store the mixer's progress for `index` unless the slot was reassigned
    /// since `generation` was read. Returns whether the write landed.
    fn write_back(&mut self, index: usize, generation: u64, position: usize) -> bool {
        let slot = &mut self.slots[index];
        if slot.generation != generation {
            return false;
        }
        let finished = slot.clip.as_ref().map_or(true, |clip| position >= clip.frames());
        if finished {
            slot.clip = None;
            slot.position = 0;
        } else {
            slot.position = position;
        }
        true
    }
}

fn lock(table: &Mutex<SlotTable>) -> MutexGuard<'_, SlotTable> {
    // Critical sections never leave a slot half-written.
    table.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Game-side handle: fire-and-forget playback.
#[derive(Debug, Clone)]
pub struct AudioHandle {
    table: Arc<Mutex<SlotTable>>,
    breed: Option<Arc<Clip>>,
}

impl AudioHandle {
    /// Start `clip` in the next slot, replacing whatever was playing there.
    ///
    /// Returns the slot index used.
    pub fn play_clip(&self, clip: Arc<Clip>) -> usize {
        let mut table = lock(&self.table);
        let index = table.next;
        let slot = &mut table.slots[index];
        slot.clip = Some(clip);
        slot.position = 0;
        slot.generation = slot.generation.wrapping_add(1);
        table.next = (index + 1) % MAX_SFX;
        index
    }

    /// Clip played for [`SoundEffect::Breed`].
    pub fn with_breed_clip(mut self, clip: Arc<Clip>) -> Self {
        self.breed = Some(clip);
        self
    }

    /// Slots currently holding a clip.
    pub fn active_slots(&self) -> usize {
        lock(&self.table).slots.iter().filter(|s| s.clip.is_some()).count()
    }
}

impl SoundSink for AudioHandle {
    fn play(&mut self, effect: SoundEffect) {
        let clip = match effect {
            SoundEffect::Breed => self.breed.clone(),
        };
        match clip {
            Some(clip) => {
                let slot = self.play_clip(clip);
                tracing::trace!(?effect, slot, "sound effect started");
            }
            None => tracing::trace!(?effect, "no clip bound to sound effect"),
        }
    }
}

/// Audio-thread side: produces interleaved stereo frames.
#[derive(Debug)]
pub struct Mixer {
    table: Arc<Mutex<SlotTable>>,
    music: Option<Arc<Clip>>,
    music_position: usize,
}

impl Mixer {
    pub fn new() -> (Mixer, AudioHandle) {
        let table = Arc::new(Mutex::new(SlotTable::default()));
        let mixer = Mixer {
            table: Arc::clone(&table),
            music: None,
            music_position: 0,
        };
        (mixer, AudioHandle { table, breed: None })
    }

    /// Replace the looping music stream; `None` plays silence underneath effects.
    pub fn set_music(&mut self, music: Option<Arc<Clip>>) {
        self.music = music.filter(|clip| clip.frames() > 0);
        self.music_position = 0;
    }

    /// Fill `out` (interleaved L/R) with the next `out.len() / 2` frames.
    pub fn mix_into(&mut self, out: &mut [f32]) {
        let frames = out.len() / 2;

        match &self.music {
            Some(music) => {
                for frame in out.chunks_exact_mut(2) {
                    let (l, r) = music.stereo(self.music_position);
                    frame[0] = l;
                    frame[1] = r;
                    self.music_position += 1;
                    if self.music_position >= music.frames() {
                        self.music_position = 0;
                    }
                }
            }
            None => out.fill(0.0),
        }

        for index in 0..MAX_SFX {
            let (clip, start, generation) = {
                let table = lock(&self.table);
                let slot = &table.slots[index];
                match &slot.clip {
                    Some(clip) => (Arc::clone(clip), slot.position, slot.generation),
                    None => continue,
                }
            };

            let mut position = start;
            for frame in out.chunks_exact_mut(2).take(frames) {
                if position >= clip.frames() {
                    break;
                }
                let (l, r) = clip.stereo(position);
                frame[0] += l;
                frame[1] += r;
                position += 1;
            }

            lock(&self.table).write_back(index, generation, position);
        }
    }
}
