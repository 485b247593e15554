//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::collision::ball_building_collision;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Primary action (click/tap/space): launch when paused, flap when running
    pub flap: bool,
    /// Restart request (R key / two-finger touch), gated by the cooldown
    pub restart: bool,
}

/// Advance the game state by one fixed timestep
///
/// `dt` only feeds the simulation clock used by the restart cooldown; the
/// physics itself is per-tick.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f64) -> Vec<GameEvent> {
    let mut events = Vec::new();

    state.clock += dt;
    state.restart_gate.update(state.clock);

    // Restart is handled first so a frozen ball can always be reset
    if input.restart && state.restart_gate.is_armed() {
        state.restart_gate.disarm(state.clock);
        state.restart();
        log::info!("Restarted (seed {})", state.seed);
        events.push(GameEvent::Restarted);
        return events;
    }

    // Collision runs every tick, paused or not
    let collision = ball_building_collision(state.ball.pos.y, state.distance, &state.buildings);
    if collision.hit {
        state.ball.pos.y = collision.clamp_y;
        if state.phase == GamePhase::Running {
            log::debug!("Crashed at distance {} (score {})", state.distance, state.score);
            events.push(GameEvent::Crashed);
        }
        state.phase = GamePhase::Paused;
    }

    match state.phase {
        GamePhase::Running => {
            // Out of the playfield: freeze in place
            let y = state.ball.pos.y;
            if !(0.0..FLOOR_Y).contains(&y) {
                return events;
            }

            state.ball.vel_y += GRAVITY;
            state.ball.pos.y += state.ball.vel_y;
            state.shift -= SCROLL_SPEED;
            state.distance += SCROLL_SPEED;

            if state.shift <= SHIFT_WINDOW {
                state.shift = 0.0;
                state.score += 1;
                state.recycle_building();
                events.push(GameEvent::Scored { score: state.score });
            }

            if input.flap {
                state.ball.vel_y = FLAP_VELOCITY;
                events.push(GameEvent::Flapped);
            }
        }
        GamePhase::Paused => {
            if input.flap {
                state.phase = GamePhase::Running;
                events.push(GameEvent::Launched);
            }
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const FLAP: TickInput = TickInput {
        flap: true,
        restart: false,
    };
    const RESTART: TickInput = TickInput {
        flap: false,
        restart: true,
    };

    fn idle() -> TickInput {
        TickInput::default()
    }

    /// Launched state with no buildings in the way
    fn open_sky(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.buildings.clear();
        tick(&mut state, &FLAP, SIM_DT);
        assert_eq!(state.phase, GamePhase::Running);
        state
    }

    #[test]
    fn test_tick_paused_to_running() {
        let mut state = GameState::new(12345);
        assert_eq!(state.phase, GamePhase::Paused);

        // Tick without input - should stay paused and motionless
        tick(&mut state, &idle(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Paused);
        assert_eq!(state.ball.pos.y, BALL_START_Y);

        // Launch: phase changes, no physics on the same tick
        let events = tick(&mut state, &FLAP, SIM_DT);
        assert_eq!(events, vec![GameEvent::Launched]);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.ball.vel_y, 0.0);
        assert_eq!(state.distance, START_DISTANCE);
    }

    #[test]
    fn test_gravity_and_scroll() {
        let mut state = open_sky(1);
        tick(&mut state, &idle(), SIM_DT);
        assert_eq!(state.ball.vel_y, 0.5);
        assert_eq!(state.ball.pos.y, 400.5);
        assert_eq!(state.distance, 252.0);
        assert_eq!(state.shift, -2.0);

        tick(&mut state, &idle(), SIM_DT);
        assert_eq!(state.ball.vel_y, 1.0);
        assert_eq!(state.ball.pos.y, 401.5);
    }

    #[test]
    fn test_flap_applies_after_integration() {
        let mut state = open_sky(1);
        for _ in 0..5 {
            tick(&mut state, &idle(), SIM_DT);
        }
        let y_before = state.ball.pos.y;
        let events = tick(&mut state, &FLAP, SIM_DT);
        assert!(events.contains(&GameEvent::Flapped));
        assert_eq!(state.ball.vel_y, FLAP_VELOCITY);
        // Position used the pre-flap velocity this tick
        assert_eq!(state.ball.pos.y, y_before + 3.0);

        tick(&mut state, &idle(), SIM_DT);
        assert_eq!(state.ball.vel_y, -9.5);
    }

    /// Run `ticks` ticks with every building flattened out of the way,
    /// flapping every 40 ticks. Launch first so the opening flap is a real
    /// flap and the ball hovers around the middle of the screen.
    fn hover(state: &mut GameState, ticks: usize) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for i in 0..ticks {
            for b in state.buildings.iter_mut() {
                b.top = 0.0;
                b.bottom = 0.0;
            }
            let input = if i % 40 == 0 { FLAP } else { idle() };
            events.extend(tick(state, &input, SIM_DT));
            assert!(state.ball.pos.y > 0.0 && state.ball.pos.y < FLOOR_Y);
        }
        events
    }

    #[test]
    fn test_score_and_recycle_every_window() {
        let mut state = GameState::new(9);
        hover(&mut state, 1);
        assert_eq!(state.phase, GamePhase::Running);
        let len = state.buildings.len();

        let events = hover(&mut state, 175 * 3);
        let scored: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, GameEvent::Scored { .. }))
            .collect();

        assert_eq!(scored.len(), 3);
        assert_eq!(state.score, 3);
        assert_eq!(state.shift, 0.0);
        assert_eq!(state.buildings.len(), len);
        // Three recycles appended pairs at the cursor: 2100, 2450, 2800
        assert_eq!(state.buildings.back().map(|b| b.x), Some(2800.0));
        assert_eq!(state.distance, START_DISTANCE + 2.0 * 175.0 * 3.0);
    }

    #[test]
    fn test_collision_clamps_and_pauses_same_tick() {
        let mut state = GameState::new(4);
        state.buildings.clear();
        state.buildings.push_back(crate::sim::Building {
            top: 100.0,
            bottom: 300.0,
            x: 0.0,
        });
        tick(&mut state, &FLAP, SIM_DT);

        // Push the ball below the bottom edge (500) and tick once
        state.ball.pos.y = 520.0;
        let events = tick(&mut state, &idle(), SIM_DT);
        assert_eq!(events, vec![GameEvent::Crashed]);
        assert_eq!(state.ball.pos.y, 500.0);
        assert_eq!(state.phase, GamePhase::Paused);

        // Still touching: a flap relaunches but the next tick re-pauses
        tick(&mut state, &FLAP, SIM_DT);
        assert_eq!(state.phase, GamePhase::Running);
        tick(&mut state, &idle(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Paused);
        assert_eq!(state.ball.pos.y, 500.0);
    }

    /// Launch and drop without further input; returns the ticks it took to
    /// leave the screen
    fn drop_out(state: &mut GameState) -> usize {
        tick(state, &FLAP, SIM_DT);
        assert_eq!(state.phase, GamePhase::Running);

        let mut ticks = 0;
        while state.ball.pos.y < FLOOR_Y {
            tick(state, &idle(), SIM_DT);
            ticks += 1;
            assert!(ticks < 100, "ball never left the screen");
        }
        ticks
    }

    #[test]
    fn test_fall_out_freezes_until_restart() {
        let mut state = GameState::new(312);
        assert_eq!(state.ball.pos.y, 400.0);
        assert_eq!(state.score, 0);

        assert_eq!(drop_out(&mut state), 40);
        assert_eq!(state.ball.pos.y, 810.0);
        assert_eq!(state.distance, 330.0);

        let frozen = (state.ball, state.distance, state.shift, state.score);
        for _ in 0..200 {
            let events = tick(&mut state, &FLAP, SIM_DT);
            assert!(events.is_empty());
            assert_eq!((state.ball, state.distance, state.shift, state.score), frozen);
        }
        assert_eq!(state.phase, GamePhase::Running);

        let events = tick(&mut state, &RESTART, SIM_DT);
        assert_eq!(events, vec![GameEvent::Restarted]);
        assert_eq!(state.ball.pos.y, BALL_START_Y);
        assert_eq!(state.phase, GamePhase::Paused);
    }

    #[test]
    fn test_first_flap_always_launches() {
        for seed in 0..512 {
            let mut state = GameState::new(seed);
            tick(&mut state, &FLAP, SIM_DT);
            tick(&mut state, &idle(), SIM_DT);
            assert_eq!(state.phase, GamePhase::Running, "seed {seed}");
            assert_eq!(state.ball.pos.y, 400.5, "seed {seed}");
        }
    }

    #[test]
    fn test_restart_resets_immediately() {
        let mut state = GameState::new(77);
        hover(&mut state, 1);
        hover(&mut state, 400);
        assert_eq!(state.score, 2);

        tick(&mut state, &RESTART, SIM_DT);
        assert_eq!(state.score, 0);
        assert_eq!(state.distance, START_DISTANCE);
        assert_eq!(state.shift, 0.0);
        assert_eq!(state.ball, crate::sim::Ball::default());
        assert_eq!(state.phase, GamePhase::Paused);
        assert_eq!(state.buildings.len(), 6);
        for (b, seed) in state.buildings.iter().zip(crate::sim::SEED_BUILDINGS.iter()) {
            assert_eq!(b, seed);
        }
        assert!(!state.restart_gate.is_armed());
    }

    #[test]
    fn test_restart_cooldown() {
        let mut state = GameState::new(3);
        tick(&mut state, &RESTART, SIM_DT);

        // Half a second later: ignored
        for _ in 0..30 {
            tick(&mut state, &idle(), SIM_DT);
        }
        state.score = 5;
        let events = tick(&mut state, &RESTART, SIM_DT);
        assert!(events.is_empty());
        assert_eq!(state.score, 5);

        // Past one second: accepted
        for _ in 0..31 {
            tick(&mut state, &idle(), SIM_DT);
        }
        let events = tick(&mut state, &RESTART, SIM_DT);
        assert_eq!(events, vec![GameEvent::Restarted]);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let inputs = [FLAP, idle(), idle(), FLAP, RESTART, FLAP, idle()];
        for input in &inputs {
            let e1 = tick(&mut state1, input, SIM_DT);
            let e2 = tick(&mut state2, input, SIM_DT);
            assert_eq!(e1, e2);
        }

        assert_eq!(state1.seed, state2.seed);
        assert_eq!(state1.ball, state2.ball);
        assert_eq!(state1.buildings, state2.buildings);
    }

    proptest! {
        #[test]
        fn prop_unflapped_ball_falls_out_and_freezes(seed in any::<u64>()) {
            let mut state = GameState::new(seed);
            drop_out(&mut state);
            prop_assert_eq!(state.phase, GamePhase::Running);
            prop_assert_eq!(state.score, 0);

            let frozen = (state.ball, state.distance);
            for _ in 0..20 {
                tick(&mut state, &idle(), SIM_DT);
            }
            prop_assert_eq!((state.ball, state.distance), frozen);
        }

        #[test]
        fn prop_gravity_is_monotonic(ticks in 1usize..30) {
            let mut state = open_sky(11);
            let mut last = state.ball.vel_y;
            for _ in 0..ticks {
                tick(&mut state, &idle(), SIM_DT);
                prop_assert_eq!(state.ball.vel_y, last + GRAVITY);
                last = state.ball.vel_y;
            }
        }

        #[test]
        fn prop_flap_overrides_velocity(vel in -50.0f32..50.0) {
            let mut state = open_sky(11);
            state.ball.vel_y = vel;
            tick(&mut state, &FLAP, SIM_DT);
            prop_assert_eq!(state.ball.vel_y, FLAP_VELOCITY);
        }
    }
}
