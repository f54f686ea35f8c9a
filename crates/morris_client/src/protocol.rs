//! The JSON message protocol spoken with the engine.
//!
//! Client messages are `{"start": bool}` and `{"move": Move|null}`. Server
//! frames carry some of `move`, `legal_moves`, `error` and `end`; the
//! engine replies to a client move with its own move and the next legal
//! set packed into one frame, which this module splits back into ordered
//! events.

use morris_board::Move;
use serde::{Deserialize, Serialize};

/// A message the client sends to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientMessage {
    /// Opens the session; true means the client plays black.
    Start(bool),
    /// The client's move this turn; [`Move::Pass`] encodes as null.
    Move(Move),
}

/// One event decoded from a server frame.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerEvent {
    /// A move to apply to the local board, whoever made it.
    Move(Move),
    /// The legal moves for the player about to move, replacing the old
    /// set wholesale. Empty means that player must pass.
    LegalMoves(Vec<Move>),
    /// An engine-reported error. Surfaced to the user, nothing applied.
    Error(String),
    /// The game is over; true means black won.
    End {
        /// Whether black is the winner.
        black_won: bool,
    },
}

/// A server frame the client could not make sense of.
#[derive(Debug, derive_more::Display)]
pub enum ProtocolError {
    /// The frame was not valid JSON, or not a shape the engine speaks.
    #[display("malformed server message: {}", _0)]
    Malformed(serde_json::Error),
    /// Valid JSON carrying none of the protocol keys.
    #[display("unrecognized server message: {}", _0)]
    Unrecognized(String),
}

impl std::error::Error for ProtocolError {}

impl From<serde_json::Error> for ProtocolError {
    fn from(err: serde_json::Error) -> Self {
        ProtocolError::Malformed(err)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawMessage {
    #[serde(rename = "move", default, deserialize_with = "present_move")]
    mv: Option<Move>,
    #[serde(default)]
    legal_moves: Option<Vec<Move>>,
    #[serde(default)]
    error: Option<serde_json::Value>,
    #[serde(default)]
    end: Option<bool>,
}

// A present-but-null `move` key is a pass, not an absent key, so the
// field cannot go through `Option`'s own null handling.
fn present_move<'de, D>(deserializer: D) -> Result<Option<Move>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Move::deserialize(deserializer).map(Some)
}

/// Decodes one server frame into its events, in the order they must be
/// handled.
///
/// `error` and `end` preempt anything else in the same frame; a combined
/// move-and-legal-set frame yields the move first.
///
/// # Errors
///
/// Returns [`ProtocolError`] for frames that are not valid protocol
/// messages; the caller surfaces these without touching game state.
pub fn parse_server_message(text: &str) -> Result<Vec<ServerEvent>, ProtocolError> {
    let raw: RawMessage = serde_json::from_str(text)?;
    if let Some(value) = raw.error {
        let message = value
            .as_str()
            .map(str::to_owned)
            .unwrap_or_else(|| value.to_string());
        return Ok(vec![ServerEvent::Error(message)]);
    }
    if let Some(black_won) = raw.end {
        return Ok(vec![ServerEvent::End { black_won }]);
    }
    let mut events = Vec::new();
    if let Some(mv) = raw.mv {
        events.push(ServerEvent::Move(mv));
    }
    if let Some(moves) = raw.legal_moves {
        events.push(ServerEvent::LegalMoves(moves));
    }
    if events.is_empty() {
        return Err(ProtocolError::Unrecognized(text.to_owned()));
    }
    Ok(events)
}
