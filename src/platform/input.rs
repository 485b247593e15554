//! Raw input to per-tick commands
//!
//! Hosts feed device events in as they arrive; the loop drains one
//! `TickInput` per simulation tick.

use crate::sim::TickInput;

/// Touch count that means "restart"
pub const RESTART_TOUCHES: u32 = 2;

/// Accumulated input between ticks
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    /// Set on a primary press, cleared when a tick consumes it
    flap_latched: bool,
    restart_held: bool,
    touches: u32,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Space, left mouse button or a single-finger tap went down
    pub fn press_primary(&mut self) {
        self.flap_latched = true;
    }

    /// R key state
    pub fn set_restart_held(&mut self, held: bool) {
        self.restart_held = held;
    }

    /// Number of active touch points
    ///
    /// A new single touch counts as a primary press.
    pub fn set_touch_count(&mut self, count: u32) {
        if count == 1 && self.touches == 0 {
            self.press_primary();
        }
        self.touches = count;
    }

    /// Whether a restart is currently being requested
    pub fn restart_requested(&self) -> bool {
        self.restart_held || self.touches == RESTART_TOUCHES
    }

    /// Input for the next tick; consumes the pending flap
    pub fn take_tick_input(&mut self) -> TickInput {
        TickInput {
            flap: std::mem::take(&mut self.flap_latched),
            restart: self.restart_requested(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flap_is_edge_triggered() {
        let mut input = InputTracker::new();
        assert_eq!(input.take_tick_input(), TickInput::default());

        input.press_primary();
        input.press_primary();
        assert!(input.take_tick_input().flap);
        assert!(!input.take_tick_input().flap);
    }

    #[test]
    fn test_restart_is_level_triggered() {
        let mut input = InputTracker::new();
        input.set_restart_held(true);
        assert!(input.take_tick_input().restart);
        assert!(input.take_tick_input().restart);
        input.set_restart_held(false);
        assert!(!input.take_tick_input().restart);
    }

    #[test]
    fn test_touch_counts() {
        let mut input = InputTracker::new();

        input.set_touch_count(1);
        let first = input.take_tick_input();
        assert!(first.flap);
        assert!(!first.restart);

        // Holding one finger does not keep flapping
        input.set_touch_count(1);
        assert!(!input.take_tick_input().flap);

        input.set_touch_count(2);
        assert!(input.take_tick_input().restart);

        input.set_touch_count(3);
        assert!(!input.take_tick_input().restart);

        // Lifting one of two fingers is not a new tap
        input.set_touch_count(2);
        input.set_touch_count(1);
        assert!(!input.take_tick_input().flap);

        input.set_touch_count(0);
        input.set_touch_count(1);
        assert!(input.take_tick_input().flap);
    }
}
