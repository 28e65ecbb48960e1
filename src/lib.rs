//! # Ant Forager
//!
//! A bot for the networked ant foraging game.
//!
//! The server pushes one `gamestate` per turn over a newline-delimited JSON
//! stream. The bot folds each snapshot into its local [`World`], plans one
//! step for every ant with the [`MovePlanner`], and answers with a single
//! `gameactions` batch.

pub mod ant;
pub mod bot;
pub mod cli;
pub mod coords;
pub mod direction;
pub mod error;
pub mod net;
pub mod planning;
pub mod session;
pub mod world;

pub use ant::{Ant, AntState};
pub use bot::{Bot, BotStats, GamePhase};
pub use cli::Args;
pub use coords::Coordinate;
pub use direction::Direction;
pub use error::{BotError, Result};
pub use net::{ClientMessage, FrameReader, ServerMessage};
pub use planning::{MovePlanner, TurnPlan};
pub use world::World;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        Ant, AntState, Args, Bot, BotError, ClientMessage, Coordinate, Direction, FrameReader,
        MovePlanner, Result, ServerMessage, World,
    };
}
