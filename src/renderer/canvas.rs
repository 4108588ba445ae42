//! Canvas2D render sink (wasm32 only)

use std::collections::HashMap;
use std::f64::consts::TAU;

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::palette::{BACKGROUND, css_color};
use super::{POWER_UP_SPRITES, Paint, RenderSink, Sprite, TextAlign};

/// Draws into a `<canvas>` with logical coordinates scaled to its backing size
pub struct CanvasSink {
    ctx: CanvasRenderingContext2d,
    images: HashMap<Sprite, HtmlImageElement>,
    /// Backing-store pixels per logical pixel
    scale: f64,
}

impl CanvasSink {
    /// Grab the 2D context and start loading every sprite
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| JsValue::from_str("not a 2d context"))?;

        let mut images = HashMap::new();
        let sprites =
            std::iter::once(Sprite::Mascot).chain((0..POWER_UP_SPRITES).map(Sprite::PowerUp));
        for sprite in sprites {
            let img = HtmlImageElement::new()?;
            img.set_src(sprite.path());
            images.insert(sprite, img);
        }

        log::info!("Canvas renderer ready, loading {} sprites", images.len());
        Ok(Self {
            ctx,
            images,
            scale: 1.0,
        })
    }

    /// Fit the logical field into a `width` x `height` backing store
    pub fn resize(&mut self, width: u32, height: u32, field: Vec2) {
        if field.x <= 0.0 || field.y <= 0.0 {
            return;
        }
        self.scale = (width as f64 / field.x as f64).min(height as f64 / field.y as f64);
        if let Err(e) = self.ctx.set_transform(self.scale, 0.0, 0.0, self.scale, 0.0, 0.0) {
            log::warn!("Canvas transform rejected: {e:?}");
        }
        log::debug!("Canvas resized to {width}x{height}, scale {:.3}", self.scale);
    }

    fn apply(&self, paint: Paint) {
        let color = css_color(paint.hue);
        self.ctx.set_global_alpha(paint.alpha as f64);
        self.ctx.set_fill_style_str(color);
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_shadow_blur(paint.glow as f64);
        self.ctx.set_shadow_color(color);
    }
}

impl RenderSink for CanvasSink {
    fn clear(&mut self, size: Vec2) {
        self.ctx.set_global_alpha(1.0);
        self.ctx.set_shadow_blur(0.0);
        self.ctx.set_fill_style_str(BACKGROUND);
        self.ctx.fill_rect(0.0, 0.0, size.x as f64, size.y as f64);
    }

    fn fill_rect(&mut self, min: Vec2, size: Vec2, paint: Paint) {
        self.apply(paint);
        self.ctx
            .fill_rect(min.x as f64, min.y as f64, size.x as f64, size.y as f64);
    }

    fn stroke_rect(&mut self, min: Vec2, size: Vec2, line_width: f32, paint: Paint) {
        self.apply(paint);
        self.ctx.set_line_width(line_width as f64);
        self.ctx
            .stroke_rect(min.x as f64, min.y as f64, size.x as f64, size.y as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: Paint) {
        self.apply(paint);
        self.ctx.begin_path();
        if self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU)
            .is_ok()
        {
            self.ctx.fill();
        }
    }

    fn draw_image(&mut self, sprite: Sprite, center: Vec2, size: f32, paint: Paint) {
        let Some(img) = self.images.get(&sprite) else {
            return;
        };
        self.apply(paint);
        let half = size as f64 / 2.0;
        let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            img,
            center.x as f64 - half,
            center.y as f64 - half,
            size as f64,
            size as f64,
        );
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, size: f32, align: TextAlign, paint: Paint) {
        self.apply(paint);
        self.ctx.set_shadow_blur(0.0);
        self.ctx.set_font(&format!("bold {size}px Arial"));
        self.ctx.set_text_align(match align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        });
        let _ = self.ctx.fill_text(text, pos.x as f64, pos.y as f64);
    }

    fn image_ready(&self, sprite: Sprite) -> bool {
        self.images
            .get(&sprite)
            .is_some_and(|img| img.complete() && img.natural_width() > 0)
    }
}
