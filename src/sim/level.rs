//! Procedural building generation
//!
//! Each call hands out the next building pair at the cursor and advances the
//! cursor by one pitch. The RNG is injected so a fixed seed yields a fixed
//! course.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::Building;
use crate::consts::{BUILDING_PITCH, CHANNEL_HEIGHT};

/// Seeded generator of building pairs
#[derive(Debug, Clone)]
pub struct LevelGenerator {
    rng: Pcg32,
    /// World x of the next building handed out
    cursor: f32,
}

impl LevelGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            cursor: 0.0,
        }
    }

    /// Restart the course: fresh RNG stream, next building at `cursor`
    pub fn reseed(&mut self, seed: u64, cursor: f32) {
        self.rng = Pcg32::seed_from_u64(seed);
        self.cursor = cursor;
    }

    /// Draw a seed for the next run from this generator's own stream
    pub fn next_seed(&mut self) -> u64 {
        self.rng.random()
    }

    pub fn cursor(&self) -> f32 {
        self.cursor
    }

    /// Produce the building at the cursor, then advance the cursor
    pub fn next_building(&mut self) -> Building {
        let top = self.rng.random_range(0..CHANNEL_HEIGHT);
        let building = Building {
            top: top as f32,
            bottom: (CHANNEL_HEIGHT - top) as f32,
            x: self.cursor,
        };
        self.cursor += BUILDING_PITCH;
        building
    }
}
