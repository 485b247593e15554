//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod level;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, ball_building_collision};
pub use level::LevelGenerator;
pub use state::{Ball, Building, GameEvent, GamePhase, GameState, RestartGate, SEED_BUILDINGS};
pub use tick::{TickInput, tick};
