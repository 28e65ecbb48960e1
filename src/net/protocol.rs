//! JSON messages exchanged with the game server.
//!
//! Inbound frames are decoded in two steps: the envelope (`type`, `error`,
//! `message`, `content`), then the content for the known types. Both steps
//! fail closed, so a handler only ever sees a fully validated message.

use crate::coords::Coordinate;
use crate::error::{BotError, Result};
use crate::net::frame;
use crate::planning::PlannedMove;
use crate::world::{parse_objects, GameObject};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    error: Value,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    content: Value,
}

#[derive(Debug, Deserialize)]
struct LoginContent {
    nick: String,
    #[serde(default)]
    score: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct GameStartContent {
    map: MapContent,
}

#[derive(Debug, Deserialize)]
struct MapContent {
    cols: i32,
    rows: i32,
    #[serde(default)]
    hills: Vec<HillContent>,
}

#[derive(Debug, Deserialize)]
struct HillContent {
    col: i32,
    row: i32,
}

#[derive(Debug, Deserialize)]
struct GameStateContent {
    gameobjects: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct GameEndContent {
    #[serde(default)]
    gamescore: Option<i64>,
    #[serde(default)]
    score: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
struct GameMuteContent {
    #[serde(default)]
    reason: Option<String>,
}

/// Map description from `gamestart`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameStart {
    pub width: i32,
    pub height: i32,
    pub hills: Vec<Coordinate>,
}

/// A validated server message
#[derive(Clone, Debug, PartialEq)]
pub enum ServerMessage {
    Login {
        nick: String,
        score: Option<i64>,
    },
    GameStart(GameStart),
    GameState(Vec<GameObject>),
    GameEnd {
        game_score: Option<i64>,
        score: Option<i64>,
    },
    GameMute {
        reason: Option<String>,
    },
    /// The server flagged an error for a message of type `kind`
    Error {
        kind: String,
        message: Option<String>,
    },
    /// A type this bot does not handle
    Other(String),
}

impl ServerMessage {
    /// Decode one frame payload
    pub fn decode(payload: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(payload)?.trim();
        let envelope: Envelope = serde_json::from_str(text)?;

        if is_truthy(&envelope.error) {
            return Ok(ServerMessage::Error {
                kind: envelope.kind,
                message: envelope.message,
            });
        }

        let kind = envelope.kind.as_str();
        match kind {
            "login" => {
                let c: LoginContent = content(kind, envelope.content)?;
                Ok(ServerMessage::Login {
                    nick: c.nick,
                    score: c.score,
                })
            }
            "gamestart" => {
                let c: GameStartContent = content(kind, envelope.content)?;
                Ok(ServerMessage::GameStart(GameStart {
                    width: c.map.cols,
                    height: c.map.rows,
                    hills: c
                        .map
                        .hills
                        .iter()
                        .map(|h| Coordinate::new(h.col, h.row))
                        .collect(),
                }))
            }
            "gamestate" => {
                let c: GameStateContent = content(kind, envelope.content)?;
                Ok(ServerMessage::GameState(parse_objects(&c.gameobjects)?))
            }
            "gameend" => {
                let c: GameEndContent = optional_content(kind, envelope.content)?;
                Ok(ServerMessage::GameEnd {
                    game_score: c.gamescore,
                    score: c.score,
                })
            }
            "gamemute" => {
                let c: GameMuteContent = optional_content(kind, envelope.content)?;
                Ok(ServerMessage::GameMute { reason: c.reason })
            }
            _ => Ok(ServerMessage::Other(kind.to_string())),
        }
    }
}

fn content<T: DeserializeOwned>(kind: &str, value: Value) -> Result<T> {
    if value.is_null() {
        return Err(BotError::Malformed(format!("{} without content", kind)));
    }
    serde_json::from_value(value).map_err(|err| BotError::Malformed(format!("{}: {}", kind, err)))
}

fn optional_content<T: Default + DeserializeOwned>(kind: &str, value: Value) -> Result<T> {
    if value.is_null() {
        return Ok(T::default());
    }
    content(kind, value)
}

/// `error` counts when it is a non-zero number, `true`, or a non-empty string
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Login mode requested from the server
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LoginMode {
    Training,
    Regular,
}

/// `(col, row, dir)` entry of a `gameactions` message
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MoveOrder {
    pub col: i32,
    pub row: i32,
    pub dir: &'static str,
}

impl MoveOrder {
    /// `None` for a planned stay
    pub fn from_planned(mv: &PlannedMove) -> Option<Self> {
        Some(Self {
            col: mv.from.col,
            row: mv.from.row,
            dir: mv.direction.code()?,
        })
    }
}

/// Messages sent to the server
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "content", rename_all = "lowercase")]
pub enum ClientMessage {
    Login { token: String, mode: LoginMode },
    GameActions { moves: Vec<MoveOrder> },
}

impl ClientMessage {
    pub fn login(token: impl Into<String>, mode: LoginMode) -> Self {
        ClientMessage::Login {
            token: token.into(),
            mode,
        }
    }

    /// One batch for the turn; stays are left out
    pub fn game_actions(moves: &[PlannedMove]) -> Self {
        ClientMessage::GameActions {
            moves: moves.iter().filter_map(MoveOrder::from_planned).collect(),
        }
    }

    /// Serialise and terminate with the frame delimiter
    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(frame::frame(serde_json::to_vec(self)?))
    }
}
