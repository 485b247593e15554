//! Draw list tessellation
//!
//! Expands `DrawCommand`s into NDC triangles, grouped into runs that share a
//! texture so the backend binds each texture once per run.

use std::ops::Range;

use glam::{Affine2, Vec2};

use super::font;
use super::scene::DrawCommand;
use super::vertex::{SpriteVertex, colors};
use crate::assets::SpriteId;
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Texture slot used for untextured (font) quads: one past the sprites
pub const WHITE_SLOT: usize = SpriteId::ALL.len();

/// Consecutive vertices drawn with one texture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    pub texture: usize,
    pub vertices: Range<u32>,
}

/// Map a logical screen point (origin top-left, y down) to NDC
pub fn logical_to_ndc(p: Vec2) -> Vec2 {
    Vec2::new(
        p.x / SCREEN_WIDTH as f32 * 2.0 - 1.0,
        1.0 - p.y / SCREEN_HEIGHT as f32 * 2.0,
    )
}

/// Vertex and batch lists for one frame
#[derive(Debug, Default)]
pub struct Tessellation {
    pub vertices: Vec<SpriteVertex>,
    pub batches: Vec<Batch>,
}

impl Tessellation {
    fn push_quad(&mut self, texture: usize, corners: [Vec2; 4], color: [f32; 4]) {
        let start = self.vertices.len() as u32;
        let uv = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        for i in [0, 1, 2, 0, 2, 3] {
            let p = logical_to_ndc(corners[i]);
            self.vertices
                .push(SpriteVertex::new(p.x, p.y, uv[i].x, uv[i].y, color));
        }
        let end = self.vertices.len() as u32;

        match self.batches.last_mut() {
            Some(last) if last.texture == texture && last.vertices.end == start => {
                last.vertices.end = end;
            }
            _ => self.batches.push(Batch {
                texture,
                vertices: start..end,
            }),
        }
    }
}

/// Tessellate `commands`; `sprite_sizes` is indexed by `SpriteId::index`
///
/// Text tints are sRGB; they are linearized only for an sRGB render target,
/// which re-encodes on write.
pub fn tessellate(
    commands: &[DrawCommand],
    sprite_sizes: &[Vec2],
    srgb_target: bool,
) -> Tessellation {
    let mut out = Tessellation::default();

    for command in commands {
        match command {
            DrawCommand::Sprite { sprite, transform } => {
                let size = sprite_sizes[sprite.index()];
                out.push_quad(sprite.index(), quad_corners(transform, size), colors::WHITE);
            }
            DrawCommand::Text {
                text,
                origin,
                color,
            } => {
                let tint = if srgb_target {
                    colors::srgb_to_linear(*color)
                } else {
                    *color
                };
                for cell in font::layout(text, *origin) {
                    let corners = [
                        cell.min,
                        Vec2::new(cell.max.x, cell.min.y),
                        cell.max,
                        Vec2::new(cell.min.x, cell.max.y),
                    ];
                    out.push_quad(WHITE_SLOT, corners, tint);
                }
            }
        }
    }

    out
}

fn quad_corners(transform: &Affine2, size: Vec2) -> [Vec2; 4] {
    [
        Vec2::ZERO,
        Vec2::new(size.x, 0.0),
        size,
        Vec2::new(0.0, size.y),
    ]
    .map(|p| transform.transform_point2(p))
}
