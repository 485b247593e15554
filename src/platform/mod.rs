//! Platform layer
//!
//! Input tracking is shared; the desktop host lives here, the browser host
//! in the binary's `wasm_game` module.

#[cfg(not(target_arch = "wasm32"))]
pub mod desktop;
pub mod input;

pub use input::InputTracker;
