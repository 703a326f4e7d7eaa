//! A single grid cell: category header or dollar-valued clue cell.
//!
//! Lifecycle is a one-way state machine, externally driven:
//! `Label → Clue → Answered`. Header tiles never leave `Label`.
//! Highlight and flicker are orthogonal visual effects layered on top of
//! whatever state the tile is in.

use glam::Vec2;

use crate::core::geometry::Rect;
use crate::core::lifetime::Lifetime;
use crate::renderer::traits::{Painter, TextStyle};
use crate::systems::color::{
    Rgb, TEXT_GOLD, TEXT_WHITE, TILE_ANSWERED, TILE_BORDER, TILE_FLICKER, TILE_HIGHLIGHT,
    TILE_IDLE,
};
use crate::systems::text::{centered_baselines, draw_shadowed, line_advance, wrap_words, WRAP_WIDTH_FRACTION};

pub const LABEL_TEXT_SIZE: f32 = 26.0;
pub const CLUE_TEXT_SIZE: f32 = 42.0;
const BORDER_WIDTH: f32 = 2.0;

/// Grid-order tiles paint first; a revealed tile is raised above its
/// siblings and drops back once answered.
pub const DEFAULT_DRAW_ORDER: i32 = 0;
pub const REVEALED_DRAW_ORDER: i32 = 10;

/// Display lifecycle of a tile. Transitions are externally triggered
/// only; there is no automatic reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileState {
    /// Shows the category name or dollar amount.
    Label,
    /// Full-board clue display.
    Clue,
    /// Terminal: dimmed and inert.
    Answered,
}

/// Bounded-count alternating color animation.
#[derive(Debug, Clone)]
struct Flicker {
    remaining: u32,
    interval: f32,
    elapsed: f32,
    lit: bool,
}

#[derive(Debug, Clone)]
pub struct Tile {
    lifetime: Lifetime,
    category_key: String,
    label: String,
    clue: String,
    answer: String,
    header: bool,
    state: TileState,
    highlighted: bool,
    flicker: Option<Flicker>,
    draw_order: i32,
    /// Recomputed by the board every frame from grid cardinality and the
    /// current viewport; never authoritative.
    pub rect: Rect,
}

impl Tile {
    /// Row-0 category header. Stays in `Label` forever.
    pub fn header(category_key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            lifetime: Lifetime::new(),
            category_key: category_key.into(),
            label: name.into(),
            clue: String::new(),
            answer: String::new(),
            header: true,
            state: TileState::Label,
            highlighted: false,
            flicker: None,
            draw_order: DEFAULT_DRAW_ORDER,
            rect: Rect::default(),
        }
    }

    /// A dollar-valued clue cell.
    pub fn value(
        category_key: impl Into<String>,
        label: impl Into<String>,
        clue: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            lifetime: Lifetime::new(),
            category_key: category_key.into(),
            label: label.into(),
            clue: clue.into(),
            answer: answer.into(),
            header: false,
            state: TileState::Label,
            highlighted: false,
            flicker: None,
            draw_order: DEFAULT_DRAW_ORDER,
            rect: Rect::default(),
        }
    }

    pub fn state(&self) -> TileState {
        self.state
    }

    pub fn is_header(&self) -> bool {
        self.header
    }

    pub fn category_key(&self) -> &str {
        &self.category_key
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn clue(&self) -> &str {
        &self.clue
    }

    /// The correct response. Not drawn by the board; kept for hosts that
    /// surface it elsewhere.
    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn draw_order(&self) -> i32 {
        self.draw_order
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    /// `Label → Clue`. Raises the tile above its siblings so the
    /// full-board clue paints over the grid. Returns whether the
    /// transition happened; header tiles and already-revealed or
    /// answered tiles are left untouched.
    pub fn reveal(&mut self) -> bool {
        if self.header || self.state != TileState::Label {
            return false;
        }
        self.state = TileState::Clue;
        self.draw_order = REVEALED_DRAW_ORDER;
        true
    }

    /// `Clue → Answered`, restoring normal draw order. Answered is
    /// terminal; nothing moves a tile out of it.
    pub fn mark_answered(&mut self) -> bool {
        if self.state != TileState::Clue {
            return false;
        }
        self.state = TileState::Answered;
        self.draw_order = DEFAULT_DRAW_ORDER;
        true
    }

    pub fn set_highlight(&mut self) {
        self.highlighted = true;
    }

    pub fn unset_highlight(&mut self) {
        self.highlighted = false;
    }

    /// Arm a flicker: the displayed color toggles `count` times at
    /// `interval`-second boundaries, then settles on the pre-flicker
    /// color. Re-arming replaces any flicker in progress.
    pub fn flicker(&mut self, count: u32, interval: f32) {
        if count == 0 || interval <= 0.0 {
            self.flicker = None;
            return;
        }
        self.flicker = Some(Flicker {
            remaining: count,
            interval,
            elapsed: 0.0,
            lit: false,
        });
    }

    pub fn update(&mut self, dt: f32) {
        self.lifetime.tick(dt);
        if let Some(flicker) = &mut self.flicker {
            flicker.elapsed += dt;
            // A large dt may cross several interval boundaries at once.
            while flicker.remaining > 0 && flicker.elapsed >= flicker.interval {
                flicker.elapsed -= flicker.interval;
                flicker.lit = !flicker.lit;
                flicker.remaining -= 1;
            }
            if flicker.remaining == 0 {
                self.flicker = None;
            }
        }
    }

    /// Current fill color. Precedence: terminal dim, then flicker flash,
    /// then highlight, then idle.
    pub fn display_color(&self) -> Rgb {
        if self.state == TileState::Answered {
            return TILE_ANSWERED;
        }
        if let Some(flicker) = &self.flicker {
            if flicker.lit {
                return TILE_FLICKER;
            }
        }
        if self.highlighted {
            TILE_HIGHLIGHT
        } else {
            TILE_IDLE
        }
    }

    /// Draw this tile. `content` is the board's content area, used when
    /// the tile is in its full-board clue display.
    pub fn draw(&self, painter: &mut dyn Painter, scale: f32, content: Rect) {
        match self.state {
            TileState::Label => self.draw_label(painter, scale),
            TileState::Clue => self.draw_clue(painter, scale, content),
            TileState::Answered => self.draw_cell(painter, scale),
        }
    }

    fn draw_cell(&self, painter: &mut dyn Painter, scale: f32) {
        painter.fill_rect(self.rect, self.display_color());
        painter.stroke_rect(self.rect, TILE_BORDER, BORDER_WIDTH * scale);
    }

    fn draw_label(&self, painter: &mut dyn Painter, scale: f32) {
        self.draw_cell(painter, scale);

        let text = self.display_text();
        if text.is_empty() {
            return;
        }
        let color = if self.header { TEXT_WHITE } else { TEXT_GOLD };
        let style = TextStyle::new(LABEL_TEXT_SIZE, color, scale);
        let metrics = painter.measure(&text, &style);
        let center = self.rect.center();
        let baseline = center.y + (metrics.ascent - metrics.descent) * 0.5;
        draw_shadowed(painter, &style, &text, Vec2::new(center.x, baseline));
    }

    fn draw_clue(&self, painter: &mut dyn Painter, scale: f32, content: Rect) {
        // The revealed tile expands to the board's whole content area.
        painter.fill_rect(content, TILE_IDLE);

        let style = TextStyle::new(CLUE_TEXT_SIZE, TEXT_WHITE, scale);
        let max_width = content.size.x * WRAP_WIDTH_FRACTION;
        let lines = wrap_words(painter, &style, &self.clue, max_width);
        if lines.is_empty() {
            return;
        }

        let metrics = painter.measure(&lines[0], &style);
        let advance = line_advance(&metrics, &style);
        let center = content.center();
        let baselines = centered_baselines(lines.len(), advance, &metrics, center.y);
        for (line, baseline) in lines.iter().zip(baselines) {
            draw_shadowed(painter, &style, line, Vec2::new(center.x, baseline));
        }
    }

    /// Header tiles show the category name; value tiles show the
    /// dollar-prefixed label.
    fn display_text(&self) -> String {
        if self.header {
            self.label.clone()
        } else {
            format!("${}", self.label)
        }
    }
}
