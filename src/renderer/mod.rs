//! Rendering
//!
//! The scene builder turns game state into a draw list; the WebGPU sprite
//! pipeline draws it.

pub mod batch;
pub mod font;
pub mod pipeline;
pub mod scene;
pub mod vertex;

pub use pipeline::{RendererError, SpriteRenderer};
pub use scene::{DrawCommand, build_scene};
