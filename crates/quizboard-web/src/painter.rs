//! Canvas 2D backend for the engine's painter seam.

use glam::Vec2;
use web_sys::CanvasRenderingContext2d;

use quizboard_engine::core::geometry::Rect;
use quizboard_engine::renderer::traits::{Painter, TextMetrics, TextStyle};
use quizboard_engine::systems::color::Rgb;

pub struct CanvasPainter {
    ctx: CanvasRenderingContext2d,
}

impl CanvasPainter {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    fn apply_font(&self, style: &TextStyle) {
        self.ctx.set_font(&style.font());
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("alphabetic");
    }
}

impl Painter for CanvasPainter {
    fn clear(&mut self, size: Vec2) {
        self.ctx
            .clear_rect(0.0, 0.0, f64::from(size.x), f64::from(size.y));
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        self.ctx.set_fill_style_str(&color.hex());
        self.ctx.fill_rect(
            f64::from(rect.pos.x),
            f64::from(rect.pos.y),
            f64::from(rect.size.x),
            f64::from(rect.size.y),
        );
    }

    fn stroke_rect(&mut self, rect: Rect, color: Rgb, line_width: f32) {
        self.ctx.set_stroke_style_str(&color.hex());
        self.ctx.set_line_width(f64::from(line_width));
        self.ctx.stroke_rect(
            f64::from(rect.pos.x),
            f64::from(rect.pos.y),
            f64::from(rect.size.x),
            f64::from(rect.size.y),
        );
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, style: &TextStyle) {
        let scale = f64::from(style.scale.max(f32::EPSILON));
        self.apply_font(style);
        self.ctx.set_fill_style_str(&style.color.hex());
        // Scale the context rather than the font size so glyph metrics
        // track text layout exactly at every viewport size.
        let _ = self.ctx.scale(scale, scale);
        let _ = self.ctx.fill_text(
            text,
            f64::from(pos.x) / scale,
            f64::from(pos.y) / scale,
        );
        // Resetting the transform is mandatory; everything after this
        // draw assumes identity.
        let _ = self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
    }

    fn measure(&mut self, text: &str, style: &TextStyle) -> TextMetrics {
        self.apply_font(style);
        let scale = style.scale;
        match self.ctx.measure_text(text) {
            Ok(metrics) => TextMetrics {
                width: metrics.width() as f32 * scale,
                ascent: metrics.font_bounding_box_ascent() as f32 * scale,
                descent: metrics.font_bounding_box_descent() as f32 * scale,
            },
            // measure_text only fails on malformed fonts; degrade to a
            // block estimate instead of poisoning the frame.
            Err(_) => {
                let em = style.size * scale;
                TextMetrics {
                    width: text.chars().count() as f32 * em * 0.6,
                    ascent: em * 0.8,
                    descent: em * 0.2,
                }
            }
        }
    }
}
