//! Closed set of drawable entities. A tagged enum keeps update/draw
//! dispatch exhaustive; the compiler flags any variant a new code path
//! forgets.

use crate::api::events::GameEvent;
use crate::api::game::FrameContext;
use crate::components::board::{Board, BOARD_DRAW_ORDER};
use crate::components::end_screen::{EndScreen, END_SCREEN_DRAW_ORDER};
use crate::components::status_bar::{StatusBar, STATUS_BAR_DRAW_ORDER};
use crate::renderer::traits::Painter;

#[derive(Debug, Clone)]
pub enum SceneEntity {
    Board(Board),
    StatusBar(StatusBar),
    EndScreen(EndScreen),
}

impl SceneEntity {
    /// Paint priority within a frame: ascending, ties keep insertion
    /// order.
    pub fn draw_order(&self) -> i32 {
        match self {
            Self::Board(_) => BOARD_DRAW_ORDER,
            Self::StatusBar(_) => STATUS_BAR_DRAW_ORDER,
            Self::EndScreen(_) => END_SCREEN_DRAW_ORDER,
        }
    }

    pub fn update(&mut self, dt: f32, frame: &FrameContext, events: &mut Vec<GameEvent>) {
        match self {
            Self::Board(board) => board.update(dt, frame),
            Self::StatusBar(bar) => bar.update(dt, frame, events),
            Self::EndScreen(screen) => screen.update(dt, frame, events),
        }
    }

    pub fn draw(&self, painter: &mut dyn Painter, frame: &FrameContext) {
        match self {
            Self::Board(board) => board.draw(painter, frame),
            Self::StatusBar(bar) => bar.draw(painter, frame),
            Self::EndScreen(screen) => screen.draw(painter, frame),
        }
    }

    pub fn is_dead(&self) -> bool {
        match self {
            Self::Board(board) => board.is_dead(),
            Self::StatusBar(bar) => bar.is_dead(),
            Self::EndScreen(screen) => screen.is_dead(),
        }
    }

    pub fn kill(&mut self) {
        match self {
            Self::Board(board) => board.kill(),
            Self::StatusBar(bar) => bar.kill(),
            Self::EndScreen(screen) => screen.kill(),
        }
    }
}
