//! Game state and core simulation types
//!
//! Everything the tick and the scene builder need lives in one value; there
//! is no process-wide state.

use std::collections::VecDeque;

use glam::Vec2;

use super::level::LevelGenerator;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for a flap, or stopped against a building
    Paused,
    /// Ball is falling and the world is scrolling
    Running,
}

/// Things that happened during a tick, for sound and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Paused -> Running on a flap
    Launched,
    /// Upward impulse applied
    Flapped,
    /// A building was recycled and the score went up
    Scored { score: u32 },
    /// The ball struck a building edge
    Crashed,
    /// Full reset performed
    Restarted,
}

/// The player's ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    /// Screen position; x is fixed, y is integrated every running tick
    pub pos: Vec2,
    /// Vertical velocity (units/tick, positive is down)
    pub vel_y: f32,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: Vec2::new(BALL_START_X, BALL_START_Y),
            vel_y: 0.0,
        }
    }
}

/// A building pair: a top piece and a bottom piece with a gap between
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Building {
    /// Height of the top piece, measured down from y = 0
    pub top: f32,
    /// Height of the bottom piece, measured up from the floor
    pub bottom: f32,
    /// World x of the left edge
    pub x: f32,
}

impl Building {
    /// y of the lower edge of the bottom piece's opening
    pub fn floor_edge(&self) -> f32 {
        FLOOR_Y - self.bottom
    }

    /// Whether world distance `d` lies within this building's span (inclusive)
    pub fn spans(&self, d: f32) -> bool {
        d >= self.x && d <= self.x + BUILDING_WIDTH
    }
}

/// Fixed opening course laid down before any random buildings
pub const SEED_BUILDINGS: [Building; 3] = [
    Building { top: 250.0, bottom: 150.0, x: 0.0 },
    Building { top: 150.0, bottom: 250.0, x: 350.0 },
    Building { top: 100.0, bottom: 300.0, x: 700.0 },
];

/// Random buildings appended after the seed course on every restart
pub const INITIAL_RANDOM_BUILDINGS: usize = 3;

/// World x just past the seed course, where generated buildings begin
pub const SEED_COURSE_END: f32 = SEED_BUILDINGS.len() as f32 * BUILDING_PITCH;

/// Cooldown gate for the restart input
///
/// Armed gates accept a restart. Disarming records a deadline on the
/// simulation clock; `update` re-arms once the clock reaches it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RestartGate {
    armed: bool,
    rearm_at: f64,
}

impl Default for RestartGate {
    fn default() -> Self {
        Self {
            armed: true,
            rearm_at: 0.0,
        }
    }
}

impl RestartGate {
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn disarm(&mut self, now: f64) {
        self.armed = false;
        self.rearm_at = now + RESTART_COOLDOWN_SECS;
    }

    pub fn update(&mut self, now: f64) {
        if !self.armed && now >= self.rearm_at {
            self.armed = true;
        }
    }
}

/// Complete game state (deterministic given seed + inputs)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed of the current run
    pub seed: u64,
    pub ball: Ball,
    /// Oldest first; length stays constant while scrolling
    pub buildings: VecDeque<Building>,
    /// Total scroll distance (camera position in world space)
    pub distance: f32,
    /// Scroll within the current building pitch, 0 down to SHIFT_WINDOW
    pub shift: f32,
    pub score: u32,
    pub phase: GamePhase,
    /// Simulation clock in seconds; never reset, drives the restart gate
    pub clock: f64,
    pub restart_gate: RestartGate,
    pub level: LevelGenerator,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            ball: Ball::default(),
            buildings: VecDeque::new(),
            distance: START_DISTANCE,
            shift: 0.0,
            score: 0,
            phase: GamePhase::Paused,
            clock: 0.0,
            restart_gate: RestartGate::default(),
            level: LevelGenerator::new(seed),
        };
        state.restart_with_seed(seed);
        state
    }

    /// Full reset of the run. The clock and restart gate are left alone.
    pub fn restart_with_seed(&mut self, seed: u64) {
        self.seed = seed;
        self.ball = Ball::default();
        self.score = 0;
        self.shift = 0.0;
        self.distance = START_DISTANCE;
        self.phase = GamePhase::Paused;

        self.level.reseed(seed, SEED_COURSE_END);
        self.buildings = SEED_BUILDINGS.iter().copied().collect();
        for _ in 0..INITIAL_RANDOM_BUILDINGS {
            let building = self.level.next_building();
            self.buildings.push_back(building);
        }
    }

    /// Reset using a seed drawn from the current run's RNG stream
    pub fn restart(&mut self) {
        let seed = self.level.next_seed();
        self.restart_with_seed(seed);
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    /// Drop the oldest building and append a freshly generated one
    pub fn recycle_building(&mut self) {
        self.buildings.pop_front();
        let building = self.level.next_building();
        self.buildings.push_back(building);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_layout() {
        let state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Paused);
        assert_eq!(state.ball.pos, Vec2::new(250.0, 400.0));
        assert_eq!(state.distance, 250.0);
        assert_eq!(state.score, 0);
        assert_eq!(state.buildings.len(), 6);
        for (b, seed) in state.buildings.iter().zip(SEED_BUILDINGS.iter()) {
            assert_eq!(b, seed);
        }
        // Generated buildings continue past the seed course
        let xs: Vec<f32> = state.buildings.iter().skip(3).map(|b| b.x).collect();
        assert_eq!(xs, vec![1050.0, 1400.0, 1750.0]);
        assert_eq!(state.level.cursor(), 2100.0);
    }

    #[test]
    fn test_course_has_one_building_per_pitch() {
        for seed in 0..256 {
            let state = GameState::new(seed);
            for (i, b) in state.buildings.iter().enumerate() {
                assert_eq!(b.x, i as f32 * BUILDING_PITCH, "seed {seed}");
            }
        }
    }

    #[test]
    fn test_restart_gate_cooldown() {
        let mut gate = RestartGate::default();
        assert!(gate.is_armed());
        gate.disarm(10.0);
        assert!(!gate.is_armed());
        gate.update(10.5);
        assert!(!gate.is_armed());
        gate.update(11.0);
        assert!(gate.is_armed());
    }

    #[test]
    fn test_recycle_preserves_length() {
        let mut state = GameState::new(5);
        let before = state.buildings.len();
        let second = state.buildings[1];
        state.recycle_building();
        assert_eq!(state.buildings.len(), before);
        assert_eq!(state.buildings[0], second);
        assert_eq!(state.buildings.back().map(|b| b.x), Some(2100.0));
    }

    #[test]
    fn test_building_span_is_inclusive() {
        let b = Building { top: 10.0, bottom: 390.0, x: 350.0 };
        assert!(!b.spans(349.0));
        assert!(b.spans(350.0));
        assert!(b.spans(650.0));
        assert!(!b.spans(652.0));
        assert_eq!(b.floor_edge(), 410.0);
    }
}
