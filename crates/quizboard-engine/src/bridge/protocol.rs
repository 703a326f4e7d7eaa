//! Wire format shared with the server: a flat JSON envelope carrying an
//! operation name, an operation-specific payload object, and the game
//! id. Inbound text is parsed here into a closed result the router can
//! branch on; outbound events are serialized here from [`GameEvent`].

use std::fmt;

use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::events::{GameEvent, PlayerScore};

/// The message envelope. `payload` defaults to null when absent so
/// parameterless operations stay terse on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocketMessage {
    pub operation: String,
    #[serde(default)]
    pub payload: Value,
    #[serde(rename = "gameId", skip_serializing_if = "Option::is_none")]
    pub game_id: Option<String>,
}

/// Server-side failure report: a bare `error` field, no envelope.
#[derive(Debug, Deserialize)]
struct ErrorFrame {
    error: Value,
}

/// Result of parsing one inbound frame.
#[derive(Debug)]
pub enum Decoded {
    /// A well-formed envelope, ready for routing.
    Operation { operation: String, payload: Value },
    /// The server reported a failure instead of an operation.
    ProtocolError(String),
    /// Not a recognizable envelope at all.
    Malformed(serde_json::Error),
}

/// Parse one frame of socket text. An inbound frame carries either an
/// `error` field (surfaced as its own variant so the router never
/// treats it as a command) or an `operation` + `payload` envelope.
pub fn decode(text: &str) -> Decoded {
    if let Ok(frame) = serde_json::from_str::<ErrorFrame>(text) {
        let detail = match frame.error {
            Value::String(s) => s,
            other => other.to_string(),
        };
        return Decoded::ProtocolError(detail);
    }
    let message: SocketMessage = match serde_json::from_str(text) {
        Ok(message) => message,
        Err(err) => return Decoded::Malformed(err),
    };
    Decoded::Operation {
        operation: message.operation,
        payload: message.payload,
    }
}

/// Serialize an outbound event into envelope form.
pub fn encode_event(event: &GameEvent, game_id: &str) -> Result<String, serde_json::Error> {
    let message = SocketMessage {
        operation: event.operation().to_string(),
        payload: event.payload(),
        game_id: Some(game_id.to_string()),
    };
    serde_json::to_string(&message)
}

/// Tile amounts are object keys in the game file and therefore strings,
/// but some senders put bare numbers in payloads. Accept both and keep
/// the canonical string form.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }
    match Raw::deserialize(deserializer)? {
        Raw::Text(text) => Ok(text),
        Raw::Number(n) => Ok(n.to_string()),
    }
}

#[derive(Debug, Deserialize)]
pub struct CategoryPayload {
    pub category: String,
}

#[derive(Debug, Deserialize)]
pub struct CluePayload {
    pub category: String,
    #[serde(deserialize_with = "string_or_number")]
    pub amount: String,
}

#[derive(Debug, Deserialize)]
pub struct FlickerPayload {
    pub category: String,
    #[serde(deserialize_with = "string_or_number")]
    pub amount: String,
    pub count: u32,
    pub interval: f32,
}

#[derive(Debug, Deserialize)]
pub struct PlayersPayload {
    pub players: Vec<PlayerScore>,
}

#[derive(Debug, Deserialize)]
pub struct TimerPayload {
    pub duration: f32,
}

impl fmt::Display for Decoded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Operation { operation, .. } => write!(f, "operation {operation:?}"),
            Self::ProtocolError(detail) => write!(f, "server error: {detail}"),
            Self::Malformed(err) => write!(f, "malformed frame: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_full_envelope() {
        let decoded = decode(
            r#"{"operation":"clueSelected","payload":{"category":"SCIENCE","amount":"200"},"gameId":"abc"}"#,
        );
        match decoded {
            Decoded::Operation { operation, payload } => {
                assert_eq!(operation, "clueSelected");
                assert_eq!(payload["category"], "SCIENCE");
            }
            other => panic!("expected operation, got {other}"),
        }
    }

    #[test]
    fn missing_payload_defaults_to_null() {
        match decode(r#"{"operation":"pauseTimer"}"#) {
            Decoded::Operation { payload, .. } => assert!(payload.is_null()),
            other => panic!("expected operation, got {other}"),
        }
    }

    #[test]
    fn server_errors_get_their_own_branch() {
        // Server failures arrive as a bare error field, not an envelope.
        match decode(r#"{"error": "no such game"}"#) {
            Decoded::ProtocolError(detail) => assert_eq!(detail, "no such game"),
            other => panic!("expected protocol error, got {other}"),
        }
    }

    #[test]
    fn structured_error_detail_is_stringified() {
        match decode(r#"{"error": {"code": 404}}"#) {
            Decoded::ProtocolError(detail) => assert_eq!(detail, r#"{"code":404}"#),
            other => panic!("expected protocol error, got {other}"),
        }
    }

    #[test]
    fn garbage_is_malformed() {
        assert!(matches!(decode("not json"), Decoded::Malformed(_)));
        assert!(matches!(decode(r#"{"no_operation":1}"#), Decoded::Malformed(_)));
    }

    #[test]
    fn amount_accepts_number_and_string() {
        let from_string: CluePayload =
            serde_json::from_value(serde_json::json!({"category": "A", "amount": "400"})).unwrap();
        let from_number: CluePayload =
            serde_json::from_value(serde_json::json!({"category": "A", "amount": 400})).unwrap();
        assert_eq!(from_string.amount, "400");
        assert_eq!(from_number.amount, "400");
    }

    #[test]
    fn encoded_events_carry_the_game_id() {
        let event = GameEvent::ClueRevealed {
            category: "SCIENCE".into(),
            amount: "200".into(),
        };
        let text = encode_event(&event, "abc").unwrap();
        let round_trip: SocketMessage = serde_json::from_str(&text).unwrap();
        assert_eq!(round_trip.operation, "clueRevealed");
        assert_eq!(round_trip.game_id.as_deref(), Some("abc"));
        assert_eq!(round_trip.payload["category"], "SCIENCE");
    }
}
