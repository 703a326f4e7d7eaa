//! Board palette and the end-screen color cycle.

use std::f32::consts::PI;

/// An opaque RGB color rendered as a CSS hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// "#rrggbb" with two hex digits per channel.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Resting tile fill.
pub const TILE_IDLE: Rgb = Rgb::new(0x06, 0x0c, 0xe9);
/// Column highlight ("whose turn") fill.
pub const TILE_HIGHLIGHT: Rgb = Rgb::new(0xfc, 0x94, 0x03);
/// Flicker flash color.
pub const TILE_FLICKER: Rgb = Rgb::new(0xff, 0xff, 0xff);
/// Answered tiles are dimmed and inert.
pub const TILE_ANSWERED: Rgb = Rgb::new(0x12, 0x16, 0x52);
pub const TILE_BORDER: Rgb = Rgb::new(0x00, 0x00, 0x00);

/// Dollar amounts and scores.
pub const TEXT_GOLD: Rgb = Rgb::new(0xff, 0xcc, 0x00);
/// Category names and clue text.
pub const TEXT_WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);
pub const TEXT_SHADOW: Rgb = Rgb::new(0x00, 0x00, 0x00);

pub const BAR_BACKGROUND: Rgb = Rgb::new(0x10, 0x10, 0x10);
pub const TIME_BAR: Rgb = Rgb::new(0xd8, 0x2c, 0x2c);

/// Phase increment per step, in radians.
const CYCLE_STEP: f32 = 0.07;
/// Phase counter wraps here; the sequence repeats but never terminates.
const CYCLE_PERIOD: u32 = 4096;
/// Channel phase offsets: a third of a turn apart.
const CHANNEL_SHIFT: f32 = 2.0 * PI / 3.0;

/// Infinite, stateful background color sequence for the end screen.
///
/// Each call to `next` advances the phase counter one step and derives one
/// color from phase-shifted sine waves per RGB channel. Not restartable:
/// a fresh end screen constructs a fresh cycle.
#[derive(Debug, Clone, Default)]
pub struct ColorCycle {
    phase: u32,
}

impl ColorCycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce the next color in the sequence.
    pub fn next(&mut self) -> Rgb {
        let t = self.phase as f32 * CYCLE_STEP;
        self.phase = (self.phase + 1) % CYCLE_PERIOD;

        Rgb::new(
            channel_byte(t),
            channel_byte(t + CHANNEL_SHIFT),
            channel_byte(t + 2.0 * CHANNEL_SHIFT),
        )
    }
}

fn channel_byte(angle: f32) -> u8 {
    (angle.sin() * 127.0 + 128.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_formats_two_digits_per_channel() {
        assert_eq!(Rgb::new(0, 0, 0).hex(), "#000000");
        assert_eq!(Rgb::new(0xfc, 0x94, 0x03).hex(), "#fc9403");
        assert_eq!(Rgb::new(255, 255, 255).hex(), "#ffffff");
    }

    #[test]
    fn cycle_is_deterministic_from_fresh_state() {
        let mut a = ColorCycle::new();
        let mut b = ColorCycle::new();
        for _ in 0..500 {
            assert_eq!(a.next(), b.next());
        }
    }

    #[test]
    fn cycle_wraps_at_period() {
        let mut cycle = ColorCycle::new();
        let first = cycle.next();
        for _ in 0..(CYCLE_PERIOD - 1) {
            cycle.next();
        }
        assert_eq!(cycle.next(), first);
    }

    #[test]
    fn cycle_colors_vary() {
        let mut cycle = ColorCycle::new();
        let first = cycle.next();
        let mut saw_different = false;
        for _ in 0..100 {
            if cycle.next() != first {
                saw_different = true;
                break;
            }
        }
        assert!(saw_different);
    }
}
