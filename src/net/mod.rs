pub mod connection;
pub mod frame;
pub mod protocol;

pub use connection::{Connection, Disconnect, SessionEvent};
pub use frame::FrameReader;
pub use protocol::{ClientMessage, LoginMode, ServerMessage};
