//! Bottom-of-canvas scoreboard strip with an optional countdown
//! time-bar.

use glam::Vec2;

use crate::api::events::{GameEvent, PlayerScore};
use crate::api::game::FrameContext;
use crate::core::geometry::Rect;
use crate::core::lifetime::Lifetime;
use crate::renderer::traits::{Painter, TextStyle};
use crate::systems::color::{BAR_BACKGROUND, TEXT_GOLD, TEXT_WHITE, TIME_BAR};
use crate::systems::text::{draw_shadowed, format_dollars};

pub const STATUS_BAR_DRAW_ORDER: i32 = 1;

const NAME_TEXT_SIZE: f32 = 20.0;
const SCORE_TEXT_SIZE: f32 = 24.0;
/// The time-bar occupies this fraction of the strip height, at its top.
const TIME_BAR_FRACTION: f32 = 0.15;

/// Armed countdown state. Present only while the bar is visible.
#[derive(Debug, Clone)]
struct TimeBar {
    duration: f32,
    elapsed: f32,
    paused: bool,
}

#[derive(Debug, Clone)]
pub struct StatusBar {
    lifetime: Lifetime,
    players: Vec<PlayerScore>,
    time_bar: Option<TimeBar>,
    rect: Rect,
}

impl StatusBar {
    pub fn new() -> Self {
        Self {
            lifetime: Lifetime::new(),
            players: Vec::new(),
            time_bar: None,
            rect: Rect::default(),
        }
    }

    /// Replace the scoreboard wholesale. No diffing.
    pub fn set_players(&mut self, players: Vec<PlayerScore>) {
        self.players = players;
    }

    pub fn players(&self) -> &[PlayerScore] {
        &self.players
    }

    /// Arm the countdown. Completion is reported exactly once, as a
    /// `TimerExpired` event, when elapsed time crosses the duration.
    pub fn start_time_bar(&mut self, duration: f32) {
        if duration <= 0.0 {
            return;
        }
        self.time_bar = Some(TimeBar {
            duration,
            elapsed: 0.0,
            paused: false,
        });
    }

    /// Stop advancing without resetting elapsed time.
    pub fn pause_time_bar(&mut self) {
        if let Some(bar) = &mut self.time_bar {
            bar.paused = true;
        }
    }

    pub fn resume_time_bar(&mut self) {
        if let Some(bar) = &mut self.time_bar {
            bar.paused = false;
        }
    }

    /// Hide the bar without reporting completion.
    pub fn reset_time_bar(&mut self) {
        self.time_bar = None;
    }

    pub fn time_bar_active(&self) -> bool {
        self.time_bar.is_some()
    }

    pub fn update(&mut self, dt: f32, frame: &FrameContext, events: &mut Vec<GameEvent>) {
        self.lifetime.tick(dt);
        self.rect = frame.bar_area;

        if let Some(bar) = &mut self.time_bar {
            if !bar.paused {
                bar.elapsed += dt;
                if bar.elapsed >= bar.duration {
                    // Disarming before reporting guarantees at-most-once.
                    self.time_bar = None;
                    events.push(GameEvent::TimerExpired);
                }
            }
        }
    }

    /// Drawn time-bar geometry: as t = elapsed/duration goes 0 to 1 the
    /// left edge moves from the bar's left to its center while the width
    /// shrinks to zero: a symmetric collapse toward the middle, not a
    /// left-to-right depletion.
    fn time_bar_rect(&self, bar: &TimeBar) -> Rect {
        let t = (bar.elapsed / bar.duration).clamp(0.0, 1.0);
        let full = self.rect.size.x;
        Rect::new(
            self.rect.pos.x + t * full * 0.5,
            self.rect.pos.y,
            full * (1.0 - t),
            self.rect.size.y * TIME_BAR_FRACTION,
        )
    }

    pub fn draw(&self, painter: &mut dyn Painter, frame: &FrameContext) {
        painter.fill_rect(self.rect, BAR_BACKGROUND);

        if let Some(bar) = &self.time_bar {
            painter.fill_rect(self.time_bar_rect(bar), TIME_BAR);
        }

        if self.players.is_empty() {
            return;
        }

        let name_style = TextStyle::new(NAME_TEXT_SIZE, TEXT_WHITE, frame.scale);
        let score_style = TextStyle::new(SCORE_TEXT_SIZE, TEXT_GOLD, frame.scale);
        let slot = self.rect.size.x / (self.players.len() + 1) as f32;
        for (i, player) in self.players.iter().enumerate() {
            let x = self.rect.pos.x + slot * (i + 1) as f32;
            let name_y = self.rect.pos.y + self.rect.size.y * 0.45;
            let score_y = self.rect.pos.y + self.rect.size.y * 0.85;
            draw_shadowed(painter, &name_style, &player.name, Vec2::new(x, name_y));
            draw_shadowed(
                painter,
                &score_style,
                &format_dollars(player.score),
                Vec2::new(x, score_y),
            );
        }
    }

    pub fn is_dead(&self) -> bool {
        self.lifetime.is_dead()
    }

    pub fn kill(&mut self) {
        self.lifetime.kill();
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::GameConfig;
    use crate::renderer::recording::RecordingPainter;

    fn frame() -> FrameContext {
        FrameContext::new(Vec2::new(1280.0, 720.0), &GameConfig::default())
    }

    fn expired_events(bar: &mut StatusBar, steps: usize, dt: f32) -> usize {
        let frame = frame();
        let mut events = Vec::new();
        for _ in 0..steps {
            bar.update(dt, &frame, &mut events);
        }
        events
            .iter()
            .filter(|e| **e == GameEvent::TimerExpired)
            .count()
    }

    #[test]
    fn timer_fires_exactly_once() {
        let mut bar = StatusBar::new();
        bar.start_time_bar(1.0);
        // 2 seconds of updates: the crossing happens once, then the bar
        // is gone.
        assert_eq!(expired_events(&mut bar, 20, 0.1), 1);
        assert!(!bar.time_bar_active());
    }

    #[test]
    fn paused_timer_never_fires() {
        let mut bar = StatusBar::new();
        bar.start_time_bar(1.0);
        bar.pause_time_bar();
        assert_eq!(expired_events(&mut bar, 30, 0.1), 0);
        assert!(bar.time_bar_active());
    }

    #[test]
    fn pause_and_resume_keep_elapsed_time() {
        let mut bar = StatusBar::new();
        bar.start_time_bar(1.0);
        assert_eq!(expired_events(&mut bar, 6, 0.1), 0);
        bar.pause_time_bar();
        assert_eq!(expired_events(&mut bar, 50, 0.1), 0);
        bar.resume_time_bar();
        // 0.6s already elapsed; less than half a second remains.
        assert_eq!(expired_events(&mut bar, 5, 0.1), 1);
    }

    #[test]
    fn reset_hides_without_firing() {
        let mut bar = StatusBar::new();
        bar.start_time_bar(1.0);
        assert_eq!(expired_events(&mut bar, 5, 0.1), 0);
        bar.reset_time_bar();
        assert!(!bar.time_bar_active());
        assert_eq!(expired_events(&mut bar, 20, 0.1), 0);
    }

    #[test]
    fn time_bar_shrinks_toward_center() {
        let mut bar = StatusBar::new();
        let frame = frame();
        bar.start_time_bar(1.0);
        let mut events = Vec::new();
        bar.update(0.0, &frame, &mut events);

        let full = bar.time_bar_rect(bar.time_bar.as_ref().unwrap());
        assert_eq!(full.pos.x, frame.bar_area.pos.x);
        assert_eq!(full.size.x, frame.bar_area.size.x);

        bar.update(0.5, &frame, &mut events);
        let half = bar.time_bar_rect(bar.time_bar.as_ref().unwrap());
        assert!((half.pos.x - frame.bar_area.size.x * 0.25).abs() < 1e-3);
        assert!((half.size.x - frame.bar_area.size.x * 0.5).abs() < 1e-3);
        // Both edges converge on the center.
        let right = half.pos.x + half.size.x;
        assert!((right - frame.bar_area.size.x * 0.75).abs() < 1e-3);
    }

    #[test]
    fn players_are_replaced_wholesale() {
        let mut bar = StatusBar::new();
        bar.set_players(vec![PlayerScore {
            name: "alice".into(),
            score: 200,
        }]);
        bar.set_players(vec![
            PlayerScore {
                name: "bob".into(),
                score: 400,
            },
            PlayerScore {
                name: "carol".into(),
                score: -200,
            },
        ]);
        assert_eq!(bar.players().len(), 2);
        assert_eq!(bar.players()[0].name, "bob");
    }

    #[test]
    fn draw_renders_names_and_signed_scores() {
        let mut bar = StatusBar::new();
        bar.set_players(vec![
            PlayerScore {
                name: "alice".into(),
                score: 200,
            },
            PlayerScore {
                name: "bob".into(),
                score: -400,
            },
        ]);
        let frame = frame();
        let mut events = Vec::new();
        bar.update(0.016, &frame, &mut events);

        let mut painter = RecordingPainter::new();
        bar.draw(&mut painter, &frame);
        let texts = painter.texts();
        assert!(texts.contains(&"alice"));
        assert!(texts.contains(&"$200"));
        assert!(texts.contains(&"bob"));
        assert!(texts.contains(&"-$400"));
    }
}
