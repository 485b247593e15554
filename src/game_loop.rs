//! Fixed-timestep driver
//!
//! Frames arrive at whatever rate the host manages; the simulation always
//! advances in `SIM_DT` steps.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::platform::InputTracker;
use crate::sim::{GameEvent, GameState, tick};

/// Longest frame delta accepted before clamping (seconds)
pub const MAX_FRAME_DT: f64 = 0.1;

/// Game state plus the time accumulator
#[derive(Debug, Clone)]
pub struct GameLoop {
    pub state: GameState,
    accumulator: f64,
}

impl GameLoop {
    pub fn new(seed: u64) -> Self {
        log::info!("New game (seed {})", seed);
        Self {
            state: GameState::new(seed),
            accumulator: 0.0,
        }
    }

    /// Run as many ticks as `frame_dt` allows and return their events
    pub fn advance(&mut self, frame_dt: f64, input: &mut InputTracker) -> Vec<GameEvent> {
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut events = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let tick_input = input.take_tick_input();
            events.extend(tick(&mut self.state, &tick_input, SIM_DT));
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        // Spiral-of-death guard: drop time we could not simulate
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }

        events
    }
}
