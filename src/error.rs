use std::fmt;

/// Errors raised by the bot client
#[derive(Debug)]
pub enum BotError {
    /// Socket or console I/O failed
    Io(std::io::Error),
    /// A frame was not valid JSON
    Json(serde_json::Error),
    /// A frame was not valid UTF-8
    Utf8(std::str::Utf8Error),
    /// A decoded message is missing a field or has the wrong shape
    Malformed(String),
    /// Unknown direction code
    InvalidDirection(String),
    /// Map dimensions the world cannot be built from
    InvalidMap(String),
    /// The receive thread panicked
    ReceiverPanicked,
}

impl fmt::Display for BotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BotError::Io(err) => write!(f, "IO error: {}", err),
            BotError::Json(err) => write!(f, "Invalid JSON: {}", err),
            BotError::Utf8(err) => write!(f, "Invalid UTF-8: {}", err),
            BotError::Malformed(msg) => write!(f, "Malformed message: {}", msg),
            BotError::InvalidDirection(dir) => write!(f, "Invalid direction: {}", dir),
            BotError::InvalidMap(msg) => write!(f, "Invalid map: {}", msg),
            BotError::ReceiverPanicked => write!(f, "Receive thread panicked"),
        }
    }
}

impl std::error::Error for BotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BotError::Io(err) => Some(err),
            BotError::Json(err) => Some(err),
            BotError::Utf8(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for BotError {
    fn from(err: std::io::Error) -> Self {
        BotError::Io(err)
    }
}

impl From<serde_json::Error> for BotError {
    fn from(err: serde_json::Error) -> Self {
        BotError::Json(err)
    }
}

impl From<std::str::Utf8Error> for BotError {
    fn from(err: std::str::Utf8Error) -> Self {
        BotError::Utf8(err)
    }
}

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, BotError>;
