//! Browser-side runner: owns the game session, the canvas painter and
//! the WebSocket, and runs one frame per animation-frame callback.
//!
//! wasm-bindgen cannot export structs holding JS handles generically, so
//! the crate root keeps a single `BoardRunner` in thread-local storage
//! and exports free functions over it.

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, WebSocket};

use quizboard_engine::bridge::protocol;
use quizboard_engine::bridge::router::{Outcome, Router};
use quizboard_engine::{Game, GameConfig, GameData};

use crate::painter::CanvasPainter;

pub struct BoardRunner {
    game: Game,
    router: Router,
    painter: CanvasPainter,
    canvas: HtmlCanvasElement,
    container: HtmlElement,
    socket: WebSocket,
    game_id: String,
}

impl BoardRunner {
    pub fn new(
        canvas: HtmlCanvasElement,
        container: HtmlElement,
        socket: WebSocket,
        game_id: String,
        data: GameData,
    ) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into()?;
        Ok(Self {
            game: Game::new(data, GameConfig::default()),
            router: quizboard_engine::gameboard_router()
                .map_err(|err| JsValue::from_str(&err.to_string()))?,
            painter: CanvasPainter::new(ctx),
            canvas,
            container,
            socket,
            game_id,
        })
    }

    pub fn init(&mut self, now_ms: f64) {
        self.game.init(now_ms, |game| {
            if let Err(err) = game.start() {
                log::error!("failed to start board: {err}");
            }
        });
    }

    /// Feed one inbound socket frame into the router. Failures are
    /// logged by the router; nothing here panics on bad input.
    pub fn on_message(&mut self, text: &str) {
        if let Outcome::Handled = self.router.dispatch(&mut self.game, text) {
            self.flush_events();
        }
    }

    /// One animation frame: size the canvas to its container, advance
    /// the simulation, repaint, and push any produced events upstream.
    pub fn frame(&mut self, now_ms: f64) {
        let viewport = self.fit_canvas();
        self.game.tick(now_ms, viewport);
        self.game.draw(&mut self.painter);
        self.flush_events();
    }

    pub fn kill(&mut self) {
        self.game.kill();
        let _ = self.socket.close();
    }

    pub fn is_stopped(&self) -> bool {
        self.game.is_stopped()
    }

    /// Match the canvas backing store to the container's current client
    /// size so CSS-driven resizes take effect next frame.
    fn fit_canvas(&self) -> Vec2 {
        let width = self.container.client_width().max(1) as u32;
        let height = self.container.client_height().max(1) as u32;
        if self.canvas.width() != width {
            self.canvas.set_width(width);
        }
        if self.canvas.height() != height {
            self.canvas.set_height(height);
        }
        Vec2::new(width as f32, height as f32)
    }

    fn flush_events(&mut self) {
        for event in self.game.drain_events() {
            match protocol::encode_event(&event, &self.game_id) {
                Ok(text) => {
                    if let Err(err) = self.socket.send_with_str(&text) {
                        log::warn!("failed to send {}: {err:?}", event.operation());
                    }
                }
                Err(err) => log::error!("failed to encode {}: {err}", event.operation()),
            }
        }
    }
}
