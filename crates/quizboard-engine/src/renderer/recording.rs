//! Headless painter backend.
//!
//! Records every draw call instead of rasterizing, with deterministic
//! glyph metrics. Used by engine tests to assert on the draw path without
//! a browser; also handy as a debug backend.

use glam::Vec2;

use super::traits::{Painter, TextMetrics, TextStyle};
use crate::core::geometry::Rect;
use crate::systems::color::Rgb;

/// Fixed glyph aspect for the deterministic metrics: width per character
/// as a fraction of the font size.
const GLYPH_ASPECT: f32 = 0.6;
const ASCENT_FRACTION: f32 = 0.8;
const DESCENT_FRACTION: f32 = 0.2;

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear {
        size: Vec2,
    },
    FillRect {
        rect: Rect,
        color: Rgb,
    },
    StrokeRect {
        rect: Rect,
        color: Rgb,
        line_width: f32,
    },
    Text {
        text: String,
        pos: Vec2,
        size: f32,
        color: Rgb,
        scale: f32,
    },
}

#[derive(Debug, Default)]
pub struct RecordingPainter {
    pub calls: Vec<DrawCall>,
}

impl RecordingPainter {
    pub fn new() -> Self {
        Self::default()
    }

    /// All text drawn so far, in draw order.
    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Fill colors of every rect drawn so far, in draw order.
    pub fn rect_fills(&self) -> Vec<Rgb> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::FillRect { color, .. } => Some(*color),
                _ => None,
            })
            .collect()
    }

    /// Rects filled with the given color, in draw order.
    pub fn rects_with_fill(&self, color: Rgb) -> Vec<Rect> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::FillRect { rect, color: f, .. } if *f == color => Some(*rect),
                _ => None,
            })
            .collect()
    }
}

impl Painter for RecordingPainter {
    fn clear(&mut self, size: Vec2) {
        self.calls.push(DrawCall::Clear { size });
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        self.calls.push(DrawCall::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Rgb, line_width: f32) {
        self.calls.push(DrawCall::StrokeRect {
            rect,
            color,
            line_width,
        });
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, style: &TextStyle) {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            pos,
            size: style.size,
            color: style.color,
            scale: style.scale,
        });
    }

    fn measure(&mut self, text: &str, style: &TextStyle) -> TextMetrics {
        let em = style.size * style.scale;
        TextMetrics {
            width: text.chars().count() as f32 * em * GLYPH_ASPECT,
            ascent: em * ASCENT_FRACTION,
            descent: em * DESCENT_FRACTION,
        }
    }
}
