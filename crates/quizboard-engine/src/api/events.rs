use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// One scoreboard entry. The list is replaced wholesale on update,
/// never diffed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerScore {
    pub name: String,
    pub score: i64,
}

/// Outbound notification produced by the engine during a frame or a
/// dispatched command. The host drains these and forwards them over the
/// socket.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A value tile transitioned to its clue display.
    ClueRevealed { category: String, amount: String },
    /// The countdown time-bar ran out. Emitted at most once per arming.
    TimerExpired,
}

impl GameEvent {
    /// Wire operation name for the outbound envelope.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::ClueRevealed { .. } => "clueRevealed",
            Self::TimerExpired => "timerExpired",
        }
    }

    /// Wire payload for the outbound envelope.
    pub fn payload(&self) -> Value {
        match self {
            Self::ClueRevealed { category, amount } => json!({
                "category": category,
                "amount": amount,
            }),
            Self::TimerExpired => json!({}),
        }
    }
}
