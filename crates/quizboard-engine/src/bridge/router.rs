//! Operation dispatch: a registry mapping operation names to handler
//! functions over the game session. The host feeds raw socket text to
//! [`Router::dispatch`]; everything that can go wrong comes back as a
//! closed [`Outcome`] so the host decides what to log or drop.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use crate::api::game::{CommandError, Game};
use crate::bridge::protocol::{
    self, CategoryPayload, CluePayload, Decoded, FlickerPayload, PlayersPayload, TimerPayload,
};

/// A handler takes the session and the still-raw payload; payload
/// shapes are each handler's own business.
pub type Handler = fn(&mut Game, Value) -> Result<(), DispatchError>;

/// A routed operation reached its handler but failed there.
#[derive(Debug)]
pub enum DispatchError {
    /// The payload did not match the shape the operation requires.
    Payload(serde_json::Error),
    Command(CommandError),
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Payload(err) => write!(f, "bad payload: {err}"),
            Self::Command(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for DispatchError {}

impl From<serde_json::Error> for DispatchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Payload(err)
    }
}

impl From<CommandError> for DispatchError {
    fn from(err: CommandError) -> Self {
        Self::Command(err)
    }
}

/// Registering the same operation name twice is a wiring bug.
#[derive(Debug)]
pub struct DuplicateRoute(pub String);

impl fmt::Display for DuplicateRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "operation {:?} registered twice", self.0)
    }
}

impl std::error::Error for DuplicateRoute {}

/// What became of one inbound frame.
#[derive(Debug)]
pub enum Outcome {
    Handled,
    /// Recognized and routed, but the handler failed; state unchanged.
    Failed {
        operation: String,
        error: DispatchError,
    },
    /// No handler registered for this operation; the frame is dropped.
    Unrecognized(String),
    ProtocolError(String),
    Malformed(serde_json::Error),
}

#[derive(Default)]
pub struct Router {
    handlers: HashMap<String, Handler>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_route(&mut self, operation: &str, handler: Handler) -> Result<(), DuplicateRoute> {
        if self.handlers.contains_key(operation) {
            return Err(DuplicateRoute(operation.to_string()));
        }
        self.handlers.insert(operation.to_string(), handler);
        Ok(())
    }

    /// Decode one frame of socket text and run the matching handler.
    pub fn dispatch(&self, game: &mut Game, text: &str) -> Outcome {
        let (operation, payload) = match protocol::decode(text) {
            Decoded::Operation { operation, payload } => (operation, payload),
            Decoded::ProtocolError(detail) => {
                log::warn!("server error frame: {detail}");
                return Outcome::ProtocolError(detail);
            }
            Decoded::Malformed(err) => {
                log::warn!("dropping malformed frame: {err}");
                return Outcome::Malformed(err);
            }
        };
        let Some(handler) = self.handlers.get(&operation) else {
            log::warn!("no route for operation {operation:?}");
            return Outcome::Unrecognized(operation);
        };
        match handler(game, payload) {
            Ok(()) => Outcome::Handled,
            Err(error) => {
                log::warn!("operation {operation:?} failed: {error}");
                Outcome::Failed { operation, error }
            }
        }
    }
}

/// The full gameboard routing table.
pub fn gameboard_router() -> Result<Router, DuplicateRoute> {
    let mut router = Router::new();
    router.add_route("categorySelected", |game, payload| {
        let p: CategoryPayload = serde_json::from_value(payload)?;
        game.highlight_category(&p.category)?;
        Ok(())
    })?;
    router.add_route("categoryDeselected", |game, payload| {
        let p: CategoryPayload = serde_json::from_value(payload)?;
        game.clear_category_highlight(&p.category)?;
        Ok(())
    })?;
    router.add_route("clueSelected", |game, payload| {
        let p: CluePayload = serde_json::from_value(payload)?;
        game.reveal_clue(&p.category, &p.amount)?;
        Ok(())
    })?;
    router.add_route("clueAnswered", |game, payload| {
        let p: CluePayload = serde_json::from_value(payload)?;
        game.mark_answered(&p.category, &p.amount)?;
        Ok(())
    })?;
    router.add_route("flickerTile", |game, payload| {
        let p: FlickerPayload = serde_json::from_value(payload)?;
        game.flicker_tile(&p.category, &p.amount, p.count, p.interval)?;
        Ok(())
    })?;
    router.add_route("updatePlayers", |game, payload| {
        let p: PlayersPayload = serde_json::from_value(payload)?;
        game.update_players(p.players)?;
        Ok(())
    })?;
    router.add_route("startTimer", |game, payload| {
        let p: TimerPayload = serde_json::from_value(payload)?;
        game.start_timer(p.duration)?;
        Ok(())
    })?;
    router.add_route("pauseTimer", |game, _| {
        game.pause_timer()?;
        Ok(())
    })?;
    router.add_route("resumeTimer", |game, _| {
        game.resume_timer()?;
        Ok(())
    })?;
    router.add_route("resetTimer", |game, _| {
        game.reset_timer()?;
        Ok(())
    })?;
    router.add_route("newRound", |game, _| {
        game.advance_round()?;
        Ok(())
    })?;
    router.add_route("gameOver", |game, payload| {
        let p: PlayersPayload = serde_json::from_value(payload)?;
        game.game_over(p.players);
        Ok(())
    })?;
    Ok(router)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::GameConfig;
    use crate::api::events::GameEvent;
    use crate::assets::game_data::GameData;
    use crate::components::tile::TileState;
    use glam::Vec2;

    fn game() -> Game {
        let data =
            GameData::from_json(crate::assets::game_data::tests::TWO_BY_THREE).unwrap();
        let mut game = Game::new(data, GameConfig::default());
        game.init(0.0, |g| g.start().unwrap());
        game
    }

    fn frame(operation: &str, payload: serde_json::Value) -> String {
        serde_json::json!({ "operation": operation, "payload": payload, "gameId": "g1" })
            .to_string()
    }

    #[test]
    fn duplicate_route_is_rejected() {
        let mut router = Router::new();
        router.add_route("x", |_, _| Ok(())).unwrap();
        assert!(router.add_route("x", |_, _| Ok(())).is_err());
    }

    #[test]
    fn unknown_operation_is_dropped_without_touching_state() {
        let router = gameboard_router().unwrap();
        let mut game = game();
        let outcome = router.dispatch(&mut game, &frame("somethingElse", serde_json::json!({})));
        assert!(matches!(outcome, Outcome::Unrecognized(op) if op == "somethingElse"));
        assert_eq!(game.scene().len(), 2);
    }

    #[test]
    fn server_error_frame_is_never_dispatched() {
        let router = gameboard_router().unwrap();
        let mut game = game();
        let outcome = router.dispatch(&mut game, r#"{"error": "no such game"}"#);
        assert!(matches!(outcome, Outcome::ProtocolError(detail) if detail == "no such game"));
        assert_eq!(game.scene().len(), 2);
    }

    #[test]
    fn malformed_text_is_reported_not_panicked() {
        let router = gameboard_router().unwrap();
        let mut game = game();
        assert!(matches!(
            router.dispatch(&mut game, "][ nonsense"),
            Outcome::Malformed(_)
        ));
    }

    #[test]
    fn bad_payload_shape_fails_the_operation() {
        let router = gameboard_router().unwrap();
        let mut game = game();
        let outcome = router.dispatch(
            &mut game,
            &frame("clueSelected", serde_json::json!({"category": "SCIENCE"})),
        );
        assert!(matches!(
            outcome,
            Outcome::Failed {
                error: DispatchError::Payload(_),
                ..
            }
        ));
    }

    #[test]
    fn unknown_tile_surfaces_the_command_error() {
        let router = gameboard_router().unwrap();
        let mut game = game();
        let outcome = router.dispatch(
            &mut game,
            &frame(
                "clueSelected",
                serde_json::json!({"category": "GEOGRAPHY", "amount": "200"}),
            ),
        );
        assert!(matches!(
            outcome,
            Outcome::Failed {
                error: DispatchError::Command(_),
                ..
            }
        ));
    }

    #[test]
    fn full_clue_lifecycle_through_the_wire() {
        let router = gameboard_router().unwrap();
        let mut game = game();

        let select = frame(
            "clueSelected",
            serde_json::json!({"category": "SCIENCE", "amount": "200"}),
        );
        assert!(matches!(router.dispatch(&mut game, &select), Outcome::Handled));
        game.tick(16.0, Vec2::new(1280.0, 720.0));

        {
            let board = game.scene().board().unwrap();
            let (col, row) = board.resolve("SCIENCE", "200").unwrap();
            let tile = board.tile(col, row).unwrap();
            assert_eq!(tile.state(), TileState::Clue);
            // The open clue stretches over the whole board.
            assert!(tile.rect.size.x > 1000.0);
        }
        assert!(matches!(
            game.drain_events().as_slice(),
            [GameEvent::ClueRevealed { .. }]
        ));

        let answered = frame(
            "clueAnswered",
            serde_json::json!({"category": "SCIENCE", "amount": 200}),
        );
        assert!(matches!(router.dispatch(&mut game, &answered), Outcome::Handled));
        game.tick(32.0, Vec2::new(1280.0, 720.0));

        let board = game.scene().board().unwrap();
        let (col, row) = board.resolve("SCIENCE", "200").unwrap();
        let tile = board.tile(col, row).unwrap();
        assert_eq!(tile.state(), TileState::Answered);
        assert!(tile.rect.size.x < 1000.0);
    }

    #[test]
    fn timer_and_players_route_to_the_status_bar() {
        let router = gameboard_router().unwrap();
        let mut game = game();

        let players = frame(
            "updatePlayers",
            serde_json::json!({"players": [{"name": "alice", "score": 800}]}),
        );
        assert!(matches!(router.dispatch(&mut game, &players), Outcome::Handled));

        let start = frame("startTimer", serde_json::json!({"duration": 10.0}));
        assert!(matches!(router.dispatch(&mut game, &start), Outcome::Handled));

        let pause = frame("pauseTimer", serde_json::Value::Null);
        assert!(matches!(router.dispatch(&mut game, &pause), Outcome::Handled));
    }

    #[test]
    fn game_over_route_spawns_the_end_screen() {
        let router = gameboard_router().unwrap();
        let mut game = game();
        let over = frame(
            "gameOver",
            serde_json::json!({"players": [{"name": "alice", "score": 800}]}),
        );
        assert!(matches!(router.dispatch(&mut game, &over), Outcome::Handled));
        game.tick(16.0, Vec2::new(1280.0, 720.0));
        assert!(game.scene().end_screen().is_some());
    }
}
