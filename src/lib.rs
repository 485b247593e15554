//! Hop Ball - tap to keep the ball airborne between the buildings
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, level generation)
//! - `renderer`: Scene building and the WebGPU sprite pipeline
//! - `assets`: Sprite/sound manifest loading
//! - `platform`: Browser/native input and window hosting
//! - `game_loop`: Fixed timestep driver shared by both hosts

pub mod assets;
pub mod audio;
pub mod game_loop;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one physics step per display frame)
    pub const SIM_DT: f64 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Logical screen size
    pub const SCREEN_WIDTH: u32 = 500;
    pub const SCREEN_HEIGHT: u32 = 800;
    pub const WINDOW_TITLE: &str = "Pong";

    /// Ball spawn point; x never changes
    pub const BALL_START_X: f32 = 250.0;
    pub const BALL_START_Y: f32 = 400.0;
    /// Playfield height; the ball freezes once it leaves [0, FLOOR_Y)
    pub const FLOOR_Y: f32 = 800.0;

    /// Downward acceleration, units/tick²
    pub const GRAVITY: f32 = 0.5;
    /// Velocity set (not added) by a flap
    pub const FLAP_VELOCITY: f32 = -10.0;
    /// Horizontal scroll per running tick
    pub const SCROLL_SPEED: f32 = 2.0;

    /// Distance at which the camera starts after a restart
    pub const START_DISTANCE: f32 = 250.0;
    /// Shift value that recycles a building and scores a point
    pub const SHIFT_WINDOW: f32 = -350.0;

    /// Combined top + bottom height of every building pair
    pub const CHANNEL_HEIGHT: u32 = 400;
    /// Horizontal spacing between consecutive buildings
    pub const BUILDING_PITCH: f32 = 350.0;
    /// Width of a building's collision span (and its sprite)
    pub const BUILDING_WIDTH: f32 = 300.0;

    /// Seconds after a restart before another restart is accepted
    pub const RESTART_COOLDOWN_SECS: f64 = 1.0;
}
