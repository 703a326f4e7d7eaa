//! The game session: owns the entity collection, drives per-frame
//! update and draw, and exposes the command surface the message router
//! calls into.
//!
//! One `Game` per session, constructed once and passed by reference to
//! whatever needs it. There is no ambient global state; the stop flag,
//! scale factor and entity list all live here.

use std::fmt;

use glam::Vec2;

use crate::api::config::GameConfig;
use crate::api::events::{GameEvent, PlayerScore};
use crate::assets::game_data::GameData;
use crate::components::board::{Board, BoardError};
use crate::components::end_screen::EndScreen;
use crate::components::entity::SceneEntity;
use crate::components::status_bar::StatusBar;
use crate::core::geometry::Rect;
use crate::core::scene::Scene;
use crate::renderer::traits::Painter;

/// Per-frame derived values shared by every entity: current viewport,
/// global scale factor, and the split of the canvas into board and
/// status-bar areas.
#[derive(Debug, Clone, Copy)]
pub struct FrameContext {
    pub viewport: Vec2,
    /// Canvas width relative to the reference resolution width; text and
    /// line metrics multiply by this to stay visually consistent.
    pub scale: f32,
    pub board_area: Rect,
    pub bar_area: Rect,
}

impl FrameContext {
    pub fn new(viewport: Vec2, config: &GameConfig) -> Self {
        let bar_height = viewport.y * config.status_bar_fraction;
        Self {
            viewport,
            scale: viewport.x / config.reference_width,
            board_area: Rect::new(0.0, 0.0, viewport.x, viewport.y - bar_height),
            bar_area: Rect::new(0.0, viewport.y - bar_height, viewport.x, bar_height),
        }
    }
}

/// A dispatched command could not be applied. State is left unchanged.
#[derive(Debug)]
pub enum CommandError {
    Board(BoardError),
    /// The target entity is no longer in the scene (e.g. commands
    /// arriving after game over).
    EntityGone(&'static str),
    NoSuchRound(usize),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Board(err) => err.fmt(f),
            Self::EntityGone(what) => write!(f, "no live {what} in the scene"),
            Self::NoSuchRound(round) => write!(f, "game file has no round {round}"),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<BoardError> for CommandError {
    fn from(err: BoardError) -> Self {
        Self::Board(err)
    }
}

pub struct Game {
    config: GameConfig,
    data: GameData,
    current_round: usize,
    scene: Scene,
    events: Vec<GameEvent>,
    previous_time_ms: Option<f64>,
    viewport: Vec2,
    scale_factor: f32,
    stopped: bool,
}

impl Game {
    pub fn new(data: GameData, config: GameConfig) -> Self {
        let viewport = Vec2::new(config.reference_width, config.reference_height);
        Self {
            config,
            data,
            current_round: 0,
            scene: Scene::new(),
            events: Vec::new(),
            previous_time_ms: None,
            viewport,
            scale_factor: 1.0,
            stopped: false,
        }
    }

    /// Record the starting timestamp and run the continuation once.
    /// First entity construction is deferred into the continuation so it
    /// happens after canvas metrics are known.
    pub fn init(&mut self, now_ms: f64, on_ready: impl FnOnce(&mut Self)) {
        self.previous_time_ms = Some(now_ms);
        on_ready(self);
    }

    /// Spawn the board for the current round plus the status bar.
    pub fn start(&mut self) -> Result<(), CommandError> {
        let round = self
            .data
            .round(self.current_round)
            .ok_or(CommandError::NoSuchRound(self.current_round))?;
        self.scene.spawn(SceneEntity::Board(Board::from_round(round)));
        self.scene.spawn(SceneEntity::StatusBar(StatusBar::new()));
        Ok(())
    }

    /// One frame of simulation: elapsed time since the previous tick,
    /// scale factor from the (possibly resized) viewport, prune, sort,
    /// then update every live entity. All updates complete before any
    /// draw.
    pub fn tick(&mut self, now_ms: f64, viewport: Vec2) {
        let dt = match self.previous_time_ms {
            Some(previous) => ((now_ms - previous) / 1000.0).max(0.0) as f32,
            None => 0.0,
        };
        self.previous_time_ms = Some(now_ms);
        self.viewport = viewport;

        let frame = FrameContext::new(viewport, &self.config);
        self.scale_factor = frame.scale;

        self.scene.prune_dead();
        self.scene.sort_by_draw_order();
        self.scene.update_all(dt, &frame, &mut self.events);
    }

    /// Clear and repaint every live entity in draw order.
    pub fn draw(&self, painter: &mut dyn Painter) {
        let frame = FrameContext::new(self.viewport, &self.config);
        painter.clear(self.viewport);
        self.scene.draw_all(painter, &frame);
    }

    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    pub fn current_round(&self) -> usize {
        self.current_round
    }

    /// Outbound events produced since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Request loop shutdown. The host checks `is_stopped` before
    /// scheduling each frame, so this takes effect after at most one
    /// more frame; in-flight frame work always completes.
    pub fn kill(&mut self) {
        self.stopped = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    // ---- Command surface, driven by the message router ----

    pub fn highlight_category(&mut self, category: &str) -> Result<(), CommandError> {
        self.board_mut()?.set_column_highlight(category)?;
        Ok(())
    }

    pub fn clear_category_highlight(&mut self, category: &str) -> Result<(), CommandError> {
        self.board_mut()?.unset_column_highlight(category)?;
        Ok(())
    }

    /// Reveal a tile; emits `ClueRevealed` if the tile transitioned.
    pub fn reveal_clue(&mut self, category: &str, amount: &str) -> Result<(), CommandError> {
        let revealed = self.board_mut()?.reveal(category, amount)?;
        if revealed {
            self.events.push(GameEvent::ClueRevealed {
                category: category.to_string(),
                amount: amount.to_string(),
            });
        }
        Ok(())
    }

    pub fn mark_answered(&mut self, category: &str, amount: &str) -> Result<(), CommandError> {
        self.board_mut()?.mark_answered(category, amount)?;
        Ok(())
    }

    pub fn flicker_tile(
        &mut self,
        category: &str,
        amount: &str,
        count: u32,
        interval: f32,
    ) -> Result<(), CommandError> {
        self.board_mut()?
            .flicker_tile(category, amount, count, interval)?;
        Ok(())
    }

    pub fn update_players(&mut self, players: Vec<PlayerScore>) -> Result<(), CommandError> {
        self.status_bar_mut()?.set_players(players);
        Ok(())
    }

    pub fn start_timer(&mut self, duration: f32) -> Result<(), CommandError> {
        self.status_bar_mut()?.start_time_bar(duration);
        Ok(())
    }

    pub fn pause_timer(&mut self) -> Result<(), CommandError> {
        self.status_bar_mut()?.pause_time_bar();
        Ok(())
    }

    pub fn resume_timer(&mut self) -> Result<(), CommandError> {
        self.status_bar_mut()?.resume_time_bar();
        Ok(())
    }

    pub fn reset_timer(&mut self) -> Result<(), CommandError> {
        self.status_bar_mut()?.reset_time_bar();
        Ok(())
    }

    /// Advance to the next round, rebuilding the board wholesale. The
    /// old board is marked dead and replaced; tiles are never migrated.
    pub fn advance_round(&mut self) -> Result<(), CommandError> {
        let next = self.current_round + 1;
        let round = self
            .data
            .round(next)
            .ok_or(CommandError::NoSuchRound(next))?;
        let board = Board::from_round(round);

        log::info!("advancing to round {next}");
        self.current_round = next;
        if let Some(old) = self.scene.board_mut() {
            old.kill();
        }
        self.scene.spawn(SceneEntity::Board(board));
        Ok(())
    }

    /// Terminal state: every live entity is marked dead (pruned next
    /// frame) and the end screen takes over the canvas.
    pub fn game_over(&mut self, players: Vec<PlayerScore>) {
        log::info!("game over");
        self.scene.kill_all();
        self.scene.spawn(SceneEntity::EndScreen(EndScreen::new(players)));
    }

    fn board_mut(&mut self) -> Result<&mut Board, CommandError> {
        self.scene
            .board_mut()
            .ok_or(CommandError::EntityGone("board"))
    }

    fn status_bar_mut(&mut self) -> Result<&mut StatusBar, CommandError> {
        self.scene
            .status_bar_mut()
            .ok_or(CommandError::EntityGone("status bar"))
    }
}
