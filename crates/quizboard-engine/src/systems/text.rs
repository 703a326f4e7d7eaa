//! Text layout helpers: greedy word wrapping, vertically centered line
//! stacks, and the two-pass drop-shadow rendering every board text uses.

use glam::Vec2;

use crate::renderer::traits::{Painter, TextMetrics, TextStyle};

/// Lines may use at most this fraction of the available width.
pub const WRAP_WIDTH_FRACTION: f32 = 0.95;
/// Extra inter-line spacing as a fraction of the font size.
pub const LINE_SPACING_FRACTION: f32 = 0.25;
/// Shadow offset as a fraction of the font size.
const SHADOW_FRACTION: f32 = 0.08;

/// Greedily pack words into lines no wider than `max_width`.
///
/// A line flushes when adding the next word would overflow, or at the
/// last word. A single word wider than `max_width` still gets its own
/// line; truncation is not this layer's job.
pub fn wrap_words(
    painter: &mut dyn Painter,
    style: &TextStyle,
    text: &str,
    max_width: f32,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
            continue;
        }
        let candidate = format!("{line} {word}");
        if painter.measure(&candidate, style).width > max_width {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
        } else {
            line = candidate;
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Vertical advance between consecutive lines: measured ascent + descent
/// plus a spacing fraction of the scaled font size.
pub fn line_advance(metrics: &TextMetrics, style: &TextStyle) -> f32 {
    metrics.height() + style.size * style.scale * LINE_SPACING_FRACTION
}

/// Baseline positions for a stack of `count` lines vertically centered
/// around `center_y`.
pub fn centered_baselines(count: usize, advance: f32, metrics: &TextMetrics, center_y: f32) -> Vec<f32> {
    let total = count as f32 * advance;
    let top = center_y - total * 0.5;
    (0..count)
        .map(|i| top + i as f32 * advance + metrics.ascent)
        .collect()
}

/// Two-pass rendering: a black shadow pass offset down-right, then the
/// colored pass on top.
pub fn draw_shadowed(painter: &mut dyn Painter, style: &TextStyle, text: &str, pos: Vec2) {
    let offset = (style.size * style.scale * SHADOW_FRACTION).max(1.0);
    let shadow = style.with_color(crate::systems::color::TEXT_SHADOW);
    painter.fill_text(text, pos + Vec2::splat(offset), &shadow);
    painter.fill_text(text, pos, style);
}

/// Signed dollar formatting: 200 → "$200", -500 → "-$500", 0 → "$0".
pub fn format_dollars(amount: i64) -> String {
    if amount < 0 {
        format!("-${}", amount.unsigned_abs())
    } else {
        format!("${amount}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::recording::RecordingPainter;
    use crate::systems::color::{TEXT_SHADOW, TEXT_WHITE};

    fn style() -> TextStyle {
        TextStyle::new(10.0, TEXT_WHITE, 1.0)
    }

    #[test]
    fn wrap_packs_greedily() {
        let mut p = RecordingPainter::new();
        // RecordingPainter: 6px per char at size 10. "aa bb" = 30px.
        let lines = wrap_words(&mut p, &style(), "aa bb cc dd", 31.0);
        assert_eq!(lines, vec!["aa bb", "cc dd"]);
    }

    #[test]
    fn wrap_single_long_word_gets_own_line() {
        let mut p = RecordingPainter::new();
        let lines = wrap_words(&mut p, &style(), "antidisestablishment a", 30.0);
        assert_eq!(lines, vec!["antidisestablishment", "a"]);
    }

    #[test]
    fn wrap_short_text_is_one_line() {
        let mut p = RecordingPainter::new();
        let lines = wrap_words(&mut p, &style(), "hello world", 1000.0);
        assert_eq!(lines, vec!["hello world"]);
    }

    #[test]
    fn wrap_empty_text_is_empty() {
        let mut p = RecordingPainter::new();
        assert!(wrap_words(&mut p, &style(), "   ", 100.0).is_empty());
    }

    #[test]
    fn baselines_are_centered() {
        let metrics = TextMetrics {
            width: 0.0,
            ascent: 8.0,
            descent: 2.0,
        };
        let baselines = centered_baselines(2, 12.0, &metrics, 100.0);
        assert_eq!(baselines.len(), 2);
        // Stack spans 24px centered on 100: top at 88, baselines at +8.
        assert!((baselines[0] - 96.0).abs() < 1e-4);
        assert!((baselines[1] - 108.0).abs() < 1e-4);
    }

    #[test]
    fn shadow_pass_precedes_color_pass() {
        let mut p = RecordingPainter::new();
        draw_shadowed(&mut p, &style(), "text", Vec2::new(50.0, 50.0));
        let colors: Vec<_> = p
            .calls
            .iter()
            .filter_map(|c| match c {
                crate::renderer::recording::DrawCall::Text { color, .. } => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(colors, vec![TEXT_SHADOW, TEXT_WHITE]);
    }

    #[test]
    fn dollar_formatting_is_signed() {
        assert_eq!(format_dollars(200), "$200");
        assert_eq!(format_dollars(0), "$0");
        assert_eq!(format_dollars(-500), "-$500");
    }
}
