//! Painter trait, the seam between the engine and a concrete drawing
//! context (Canvas 2D in the web crate, a recording backend in tests).
//!
//! Text is scale-aware: implementations apply `TextStyle::scale` as a
//! canvas transform while drawing and measuring. Resetting the transform
//! before returning is a hard contract; a painter that leaks a scale
//! transform corrupts every subsequent draw in the frame.

use glam::Vec2;

use crate::core::geometry::Rect;
use crate::systems::color::Rgb;

/// Font and fill parameters for one text draw.
#[derive(Debug, Clone)]
pub struct TextStyle {
    /// Font size in reference-resolution pixels.
    pub size: f32,
    pub family: &'static str,
    pub bold: bool,
    pub color: Rgb,
    /// Global scale factor; applied as a transform so glyph metrics stay
    /// visually consistent across viewport sizes.
    pub scale: f32,
}

impl TextStyle {
    pub fn new(size: f32, color: Rgb, scale: f32) -> Self {
        Self {
            size,
            family: "sans-serif",
            bold: true,
            color,
            scale,
        }
    }

    pub fn with_color(&self, color: Rgb) -> Self {
        Self {
            color,
            ..self.clone()
        }
    }

    /// CSS font shorthand, e.g. "bold 28px sans-serif".
    pub fn font(&self) -> String {
        if self.bold {
            format!("bold {}px {}", self.size, self.family)
        } else {
            format!("{}px {}", self.size, self.family)
        }
    }
}

/// Measured extents of a piece of text, in on-canvas pixels
/// (scale already applied).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    pub width: f32,
    pub ascent: f32,
    pub descent: f32,
}

impl TextMetrics {
    /// Full line height of the measured text.
    pub fn height(&self) -> f32 {
        self.ascent + self.descent
    }
}

/// Drawing context contract. All coordinates are canvas pixels.
pub trait Painter {
    /// Clear the whole surface of the given size.
    fn clear(&mut self, size: Vec2);

    fn fill_rect(&mut self, rect: Rect, color: Rgb);

    fn stroke_rect(&mut self, rect: Rect, color: Rgb, line_width: f32);

    /// Draw text horizontally centered at `pos.x` with the baseline at
    /// `pos.y`, scaled by `style.scale`. Implementations MUST reset the
    /// transform before returning.
    fn fill_text(&mut self, text: &str, pos: Vec2, style: &TextStyle);

    /// Measure text under the given style, including its scale.
    fn measure(&mut self, text: &str, style: &TextStyle) -> TextMetrics;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::color::{TEXT_SHADOW, TEXT_WHITE};

    #[test]
    fn font_shorthand_includes_weight() {
        let style = TextStyle::new(28.0, TEXT_WHITE, 1.0);
        assert_eq!(style.font(), "bold 28px sans-serif");
    }

    #[test]
    fn with_color_keeps_other_fields() {
        let style = TextStyle::new(36.0, TEXT_WHITE, 2.0);
        let shadow = style.with_color(TEXT_SHADOW);
        assert_eq!(shadow.size, 36.0);
        assert_eq!(shadow.scale, 2.0);
        assert_eq!(shadow.color, TEXT_SHADOW);
    }

    #[test]
    fn metrics_height_is_ascent_plus_descent() {
        let m = TextMetrics {
            width: 10.0,
            ascent: 8.0,
            descent: 2.0,
        };
        assert_eq!(m.height(), 10.0);
    }
}
