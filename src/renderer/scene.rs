//! Scene building
//!
//! Turns a `GameState` into an ordered draw list. Pure: reads state, issues
//! no mutation, knows nothing about the GPU. Sprite transforms map sprite
//! pixel space into the 500x800 logical screen.

use glam::{Affine2, Vec2};

use super::font;
use super::vertex::colors;
use crate::assets::SpriteId;
use crate::consts::*;
use crate::sim::GameState;

/// Ball sprite is drawn centered on the ball at 1/10 scale
const BALL_SPRITE_HALF: f32 = 250.0;
const BALL_SPRITE_SCALE: f32 = 0.1;

/// Score baseline and the shadow's offset from the foreground pass
const SCORE_BASELINE: f32 = 150.0;
const SCORE_SHADOW_OFFSET: Vec2 = Vec2::new(4.0, 4.0);
const SCORE_NUDGE_X: f32 = 8.0;

/// Overlay top edge while paused
const HOW_TO_PLAY_Y: f32 = 350.0;

/// One draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Blit a sprite through an affine transform
    Sprite { sprite: SpriteId, transform: Affine2 },
    /// Draw text with the built-in font, `origin` on the baseline
    Text {
        text: String,
        origin: Vec2,
        color: [f32; 4],
    },
}

/// Horizontal screen position of a building's left edge
pub fn building_screen_x(building_x: f32, distance: f32) -> f32 {
    building_x - distance + START_DISTANCE
}

/// Build the frame's draw list in back-to-front order
pub fn build_scene(state: &GameState) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(4 + state.buildings.len() * 2);

    commands.push(DrawCommand::Sprite {
        sprite: SpriteId::Background,
        transform: Affine2::IDENTITY,
    });

    for b in &state.buildings {
        let x = building_screen_x(b.x, state.distance);
        commands.push(DrawCommand::Sprite {
            sprite: SpriteId::Building,
            transform: Affine2::from_translation(Vec2::new(x, 0.0))
                * Affine2::from_scale(Vec2::new(1.0, b.top)),
        });
        commands.push(DrawCommand::Sprite {
            sprite: SpriteId::Building,
            transform: Affine2::from_translation(Vec2::new(x, b.floor_edge()))
                * Affine2::from_scale(Vec2::new(1.0, b.bottom)),
        });
    }

    commands.push(DrawCommand::Sprite {
        sprite: SpriteId::Ball,
        transform: Affine2::from_translation(state.ball.pos)
            * Affine2::from_scale(Vec2::splat(BALL_SPRITE_SCALE))
            * Affine2::from_translation(Vec2::splat(-BALL_SPRITE_HALF)),
    });

    let score = state.score.to_string();
    let half_width = font::measure(&score).width() / 2.0;
    let ink = Vec2::new(
        SCREEN_WIDTH as f32 / 2.0 - half_width - SCORE_NUDGE_X,
        SCORE_BASELINE,
    );
    commands.push(DrawCommand::Text {
        text: score.clone(),
        origin: ink + SCORE_SHADOW_OFFSET,
        color: colors::SCORE_SHADOW,
    });
    commands.push(DrawCommand::Text {
        text: score,
        origin: ink,
        color: colors::SCORE_INK,
    });

    if state.is_paused() {
        commands.push(DrawCommand::Sprite {
            sprite: SpriteId::HowToPlay,
            transform: Affine2::from_translation(Vec2::new(0.0, HOW_TO_PLAY_Y)),
        });
    }

    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GamePhase;

    fn sprites(commands: &[DrawCommand]) -> Vec<SpriteId> {
        commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Sprite { sprite, .. } => Some(*sprite),
                DrawCommand::Text { .. } => None,
            })
            .collect()
    }

    #[test]
    fn test_draw_order_while_paused() {
        let state = GameState::new(1);
        let commands = build_scene(&state);
        let ids = sprites(&commands);

        assert_eq!(ids.first(), Some(&SpriteId::Background));
        assert_eq!(ids.last(), Some(&SpriteId::HowToPlay));
        let buildings = ids.iter().filter(|s| **s == SpriteId::Building).count();
        assert_eq!(buildings, state.buildings.len() * 2);
        assert_eq!(ids[ids.len() - 2], SpriteId::Ball);
        assert_eq!(commands.len(), 1 + 12 + 1 + 2 + 1);
    }

    #[test]
    fn test_no_overlay_while_running() {
        let mut state = GameState::new(1);
        state.phase = GamePhase::Running;
        let commands = build_scene(&state);
        assert!(!sprites(&commands).contains(&SpriteId::HowToPlay));
        assert!(matches!(commands.last(), Some(DrawCommand::Text { .. })));
    }

    #[test]
    fn test_building_transforms() {
        let state = GameState::new(1);
        let commands = build_scene(&state);
        // First building is the seed pair (top 250, bottom 150) at x = 0
        let DrawCommand::Sprite { transform: top, .. } = &commands[1] else {
            panic!("expected sprite");
        };
        let DrawCommand::Sprite { transform: bottom, .. } = &commands[2] else {
            panic!("expected sprite");
        };
        // distance 250 puts world x = 0 at screen x = 0
        assert_eq!(top.transform_point2(Vec2::new(0.0, 0.0)), Vec2::new(0.0, 0.0));
        assert_eq!(top.transform_point2(Vec2::new(300.0, 1.0)), Vec2::new(300.0, 250.0));
        assert_eq!(bottom.transform_point2(Vec2::new(0.0, 0.0)), Vec2::new(0.0, 650.0));
        assert_eq!(bottom.transform_point2(Vec2::new(0.0, 1.0)), Vec2::new(0.0, 800.0));
    }

    #[test]
    fn test_buildings_scroll_left() {
        let mut state = GameState::new(1);
        assert_eq!(building_screen_x(350.0, state.distance), 350.0);
        state.distance += 10.0;
        assert_eq!(building_screen_x(350.0, state.distance), 340.0);
    }

    #[test]
    fn test_ball_sprite_centered_on_ball() {
        let mut state = GameState::new(1);
        state.ball.pos.y = 420.0;
        let commands = build_scene(&state);
        let ball = commands
            .iter()
            .find_map(|c| match c {
                DrawCommand::Sprite { sprite: SpriteId::Ball, transform } => Some(*transform),
                _ => None,
            })
            .unwrap();
        assert_eq!(ball.transform_point2(Vec2::new(250.0, 250.0)), Vec2::new(250.0, 420.0));
        assert_eq!(ball.transform_point2(Vec2::new(0.0, 0.0)), Vec2::new(225.0, 395.0));
    }

    #[test]
    fn test_score_shadow_then_ink_centered() {
        let mut state = GameState::new(1);
        state.score = 12;
        let texts: Vec<_> = build_scene(&state)
            .into_iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, origin, color } => Some((text, origin, color)),
                _ => None,
            })
            .collect();
        assert_eq!(texts.len(), 2);
        let (shadow, ink) = (&texts[0], &texts[1]);
        assert_eq!(shadow.0, "12");
        assert_eq!(shadow.2, colors::SCORE_SHADOW);
        assert_eq!(ink.2, colors::SCORE_INK);
        assert_eq!(shadow.1 - ink.1, Vec2::new(4.0, 4.0));

        let tx = font::measure("12").width() / 2.0;
        assert_eq!(ink.1, Vec2::new(250.0 - tx - 8.0, 150.0));
    }
}
