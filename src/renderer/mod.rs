//! 2D rendering module
//!
//! `scene::draw_frame` decides what to draw each frame; a `RenderSink`
//! decides how. The browser uses a Canvas2D sink, tests record calls.

pub mod palette;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

use glam::Vec2;

use crate::sim::Hue;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSink;
pub use palette::{BACKGROUND, css_color};
pub use scene::draw_frame;

/// Bitmap sprites the scene may draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    /// Player mascot
    Mascot,
    /// Power pellet artwork, index into `POWER_UP_SPRITES`
    PowerUp(usize),
}

/// Number of power pellet sprites
pub const POWER_UP_SPRITES: usize = 3;

impl Sprite {
    /// Image path relative to the page
    pub fn path(&self) -> &'static str {
        match self {
            Sprite::Mascot => "assets/images/boplips.png",
            Sprite::PowerUp(i) => match i % POWER_UP_SPRITES {
                0 => "assets/images/bopbeachy.png",
                1 => "assets/images/moonbop.png",
                _ => "assets/images/bopclubber.png",
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Color, opacity and glow for one draw call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub hue: Hue,
    pub alpha: f32,
    /// Shadow blur radius in logical pixels, 0 for none
    pub glow: f32,
}

impl Paint {
    pub fn solid(hue: Hue) -> Self {
        Self {
            hue,
            alpha: 1.0,
            glow: 0.0,
        }
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    pub fn with_glow(mut self, glow: f32) -> Self {
        self.glow = glow.max(0.0);
        self
    }
}

/// Drawing surface in logical field coordinates (600x340 for the builtin maze)
pub trait RenderSink {
    /// Wipe to the background color
    fn clear(&mut self, size: Vec2);
    fn fill_rect(&mut self, min: Vec2, size: Vec2, paint: Paint);
    fn stroke_rect(&mut self, min: Vec2, size: Vec2, line_width: f32, paint: Paint);
    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: Paint);
    /// Draw `sprite` centred on `center`, scaled to a `size` square.
    /// `paint.hue` colors the glow only.
    fn draw_image(&mut self, sprite: Sprite, center: Vec2, size: f32, paint: Paint);
    fn draw_text(&mut self, text: &str, pos: Vec2, size: f32, align: TextAlign, paint: Paint);
    /// Asset gate: sprites that are not loaded are skipped
    fn image_ready(&self, sprite: Sprite) -> bool;
}
