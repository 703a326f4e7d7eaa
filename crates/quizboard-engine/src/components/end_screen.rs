//! Terminal winner display.
//!
//! Constructed on game over; the session marks every other entity dead
//! at the same time, so after one prune this is the only thing drawn.

use glam::Vec2;

use crate::api::events::{GameEvent, PlayerScore};
use crate::api::game::FrameContext;
use crate::core::geometry::Rect;
use crate::core::lifetime::Lifetime;
use crate::renderer::traits::{Painter, TextStyle};
use crate::systems::color::{ColorCycle, Rgb, TEXT_GOLD, TEXT_WHITE};
use crate::systems::text::{draw_shadowed, format_dollars};

pub const END_SCREEN_DRAW_ORDER: i32 = 100;

const BANNER_TEXT_SIZE: f32 = 64.0;
const LEADERBOARD_TEXT_SIZE: f32 = 30.0;
const LEADERBOARD_LINE_FRACTION: f32 = 1.6;

#[derive(Debug, Clone)]
pub struct EndScreen {
    lifetime: Lifetime,
    /// Final standings, sorted descending by score.
    players: Vec<PlayerScore>,
    cycle: ColorCycle,
    background: Rgb,
}

impl EndScreen {
    pub fn new(mut players: Vec<PlayerScore>) -> Self {
        players.sort_by_key(|p| std::cmp::Reverse(p.score));
        let mut cycle = ColorCycle::new();
        let background = cycle.next();
        Self {
            lifetime: Lifetime::new(),
            players,
            cycle,
            background,
        }
    }

    /// Every player tied at the maximum score.
    pub fn winners(&self) -> Vec<&PlayerScore> {
        let Some(top) = self.players.iter().map(|p| p.score).max() else {
            return Vec::new();
        };
        self.players.iter().filter(|p| p.score == top).collect()
    }

    /// "`<name> wins!!`" for a single winner, "`Draw!!`" for a tie.
    pub fn banner(&self) -> String {
        match self.winners().as_slice() {
            [single] => format!("{} wins!!", single.name),
            _ => "Draw!!".to_string(),
        }
    }

    pub fn update(&mut self, dt: f32, _frame: &FrameContext, _events: &mut Vec<GameEvent>) {
        self.lifetime.tick(dt);
        // One cycle step per frame.
        self.background = self.cycle.next();
    }

    pub fn draw(&self, painter: &mut dyn Painter, frame: &FrameContext) {
        painter.fill_rect(Rect::from_size(frame.viewport), self.background);

        let center_x = frame.viewport.x * 0.5;
        let banner_style = TextStyle::new(BANNER_TEXT_SIZE, TEXT_WHITE, frame.scale);
        let banner_y = frame.viewport.y * 0.3;
        draw_shadowed(
            painter,
            &banner_style,
            &self.banner(),
            Vec2::new(center_x, banner_y),
        );

        let entry_style = TextStyle::new(LEADERBOARD_TEXT_SIZE, TEXT_GOLD, frame.scale);
        let advance = LEADERBOARD_TEXT_SIZE * frame.scale * LEADERBOARD_LINE_FRACTION;
        let mut y = frame.viewport.y * 0.45;
        for player in &self.players {
            let line = format!("{}  {}", player.name, format_dollars(player.score));
            draw_shadowed(painter, &entry_style, &line, Vec2::new(center_x, y));
            y += advance;
        }
    }

    pub fn is_dead(&self) -> bool {
        self.lifetime.is_dead()
    }

    pub fn kill(&mut self) {
        self.lifetime.kill();
    }
}
