//! Entity storage for the frame loop: a flat Vec, pruned and draw-order
//! sorted once per frame. Entity counts here are tiny (a board, a status
//! bar, at most an end screen).

use crate::api::events::GameEvent;
use crate::api::game::FrameContext;
use crate::components::board::Board;
use crate::components::end_screen::EndScreen;
use crate::components::entity::SceneEntity;
use crate::components::status_bar::StatusBar;
use crate::renderer::traits::Painter;

#[derive(Debug, Default)]
pub struct Scene {
    entities: Vec<SceneEntity>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, entity: SceneEntity) {
        self.entities.push(entity);
    }

    /// Drop everything marked dead since the last frame.
    pub fn prune_dead(&mut self) {
        self.entities.retain(|e| !e.is_dead());
    }

    /// Ascending by draw order; the sort is stable so ties keep
    /// insertion order.
    pub fn sort_by_draw_order(&mut self) {
        self.entities.sort_by_key(SceneEntity::draw_order);
    }

    /// All updates complete strictly before any draw within a frame.
    pub fn update_all(&mut self, dt: f32, frame: &FrameContext, events: &mut Vec<GameEvent>) {
        for entity in &mut self.entities {
            entity.update(dt, frame, events);
        }
    }

    pub fn draw_all(&self, painter: &mut dyn Painter, frame: &FrameContext) {
        for entity in &self.entities {
            entity.draw(painter, frame);
        }
    }

    /// Mark every entity dead; pruned on the next frame.
    pub fn kill_all(&mut self) {
        for entity in &mut self.entities {
            entity.kill();
        }
    }

    pub fn board_mut(&mut self) -> Option<&mut Board> {
        self.entities.iter_mut().find_map(|e| match e {
            SceneEntity::Board(board) if !board.is_dead() => Some(board),
            _ => None,
        })
    }

    pub fn board(&self) -> Option<&Board> {
        self.entities.iter().find_map(|e| match e {
            SceneEntity::Board(board) if !board.is_dead() => Some(board),
            _ => None,
        })
    }

    pub fn status_bar_mut(&mut self) -> Option<&mut StatusBar> {
        self.entities.iter_mut().find_map(|e| match e {
            SceneEntity::StatusBar(bar) if !bar.is_dead() => Some(bar),
            _ => None,
        })
    }

    pub fn end_screen(&self) -> Option<&EndScreen> {
        self.entities.iter().find_map(|e| match e {
            SceneEntity::EndScreen(screen) => Some(screen),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
