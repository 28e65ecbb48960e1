use crate::error::Result;
use crate::net::protocol::{ClientMessage, GameStart, ServerMessage};
use crate::planning::MovePlanner;
use crate::world::{GameObject, World};
use tracing::{debug, info, warn};

/// Where the bot is in the game lifecycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GamePhase {
    /// No game started yet
    #[default]
    Lobby,
    Playing,
    /// State is still tracked but no moves are sent
    Muted,
    /// `gamestate` is ignored until the next `gamestart`
    Over,
}

/// Counters reported at the end of a session
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BotStats {
    pub games: u32,
    pub turns: u64,
    pub moves_sent: u64,
    pub pickups: u64,
    pub deliveries: u64,
    pub dropped_messages: u64,
    pub last_game_score: Option<i64>,
    pub score: Option<i64>,
    pub nick: Option<String>,
}

/// Routes server messages to the world and planner, one at a time.
#[derive(Debug)]
pub struct Bot {
    world: Option<World>,
    phase: GamePhase,
    planner: MovePlanner,
    rng: fastrand::Rng,
    stats: BotStats,
}

impl Bot {
    pub fn new(planner: MovePlanner, rng: fastrand::Rng) -> Self {
        Self {
            world: None,
            phase: GamePhase::Lobby,
            planner,
            rng,
            stats: BotStats::default(),
        }
    }

    #[inline]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn world(&self) -> Option<&World> {
        self.world.as_ref()
    }

    pub fn stats(&self) -> &BotStats {
        &self.stats
    }

    /// Decode and handle one frame. Errors concern that frame only.
    pub fn handle_frame(&mut self, payload: &[u8]) -> Result<Option<ClientMessage>> {
        if payload.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        let result = ServerMessage::decode(payload).and_then(|msg| self.handle(msg));
        if result.is_err() {
            self.stats.dropped_messages += 1;
        }
        result
    }

    /// Apply one message; returns the move batch to send, if any
    pub fn handle(&mut self, msg: ServerMessage) -> Result<Option<ClientMessage>> {
        match msg {
            ServerMessage::Login { nick, score } => {
                info!(%nick, ?score, "logged in");
                self.stats.nick = Some(nick);
                self.stats.score = score;
                Ok(None)
            }
            ServerMessage::GameStart(start) => {
                self.start_game(start)?;
                Ok(None)
            }
            ServerMessage::GameState(objects) => Ok(self.play_turn(&objects)),
            ServerMessage::GameEnd { game_score, score } => {
                info!(?game_score, ?score, turns = self.stats.turns, "game ended");
                self.phase = GamePhase::Over;
                self.stats.last_game_score = game_score;
                if score.is_some() {
                    self.stats.score = score;
                }
                Ok(None)
            }
            ServerMessage::GameMute { reason } => {
                warn!(reason = reason.as_deref().unwrap_or("unknown"), "muted for this game");
                if self.phase == GamePhase::Playing {
                    self.phase = GamePhase::Muted;
                }
                Ok(None)
            }
            ServerMessage::Error { kind, message } => {
                warn!(%kind, message = message.as_deref().unwrap_or(""), "server reported an error");
                Ok(None)
            }
            ServerMessage::Other(kind) => {
                debug!(%kind, "ignoring message");
                Ok(None)
            }
        }
    }

    fn start_game(&mut self, start: GameStart) -> Result<()> {
        let mut world = World::new(start.width, start.height)?;
        for hill in &start.hills {
            world.report_home(*hill);
        }
        info!(
            width = start.width,
            height = start.height,
            hills = start.hills.len(),
            "game started"
        );
        self.world = Some(world);
        self.phase = GamePhase::Playing;
        self.stats.games += 1;
        Ok(())
    }

    fn play_turn(&mut self, objects: &[GameObject]) -> Option<ClientMessage> {
        let Some(world) = self.world.as_mut() else {
            debug!("gamestate before gamestart, ignoring");
            return None;
        };
        match self.phase {
            GamePhase::Playing | GamePhase::Muted => {}
            GamePhase::Lobby | GamePhase::Over => {
                debug!(phase = ?self.phase, "gamestate outside a game, ignoring");
                return None;
            }
        }

        world.begin_round();
        for obj in objects {
            world.apply(obj);
        }
        let swept = world.end_round();
        if swept > 0 {
            debug!(swept, "ants vanished without a death report");
        }

        if self.phase == GamePhase::Muted {
            return None;
        }

        let plan = self.planner.plan(world, &mut self.rng);
        self.stats.turns += 1;
        self.stats.moves_sent += plan.moves.len() as u64;
        self.stats.pickups += plan.pickups as u64;
        self.stats.deliveries += plan.deliveries as u64;
        debug!(
            round = world.round(),
            ants = world.ant_count(),
            moves = plan.moves.len(),
            stalled = plan.stalled,
            stuck = plan.stuck,
            pickups = plan.pickups,
            deliveries = plan.deliveries,
            "turn planned"
        );

        Some(ClientMessage::game_actions(&plan.moves))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Coordinate;

    fn bot() -> Bot {
        Bot::new(MovePlanner::default(), fastrand::Rng::with_seed(42))
    }

    const START: &[u8] =
        br#"{"type":"gamestart","content":{"map":{"cols":6,"rows":6,"hills":[{"col":0,"row":0}]}}}"#;
    const STATE: &[u8] = br#"{"type":"gamestate","content":{"gameobjects":[["a",0,0,0]]}}"#;

    #[test]
    fn test_gamestart_builds_world() {
        let mut bot = bot();
        assert_eq!(bot.handle_frame(START).unwrap(), None);

        assert_eq!(bot.phase(), GamePhase::Playing);
        let world = bot.world().unwrap();
        assert_eq!(world.width(), 6);
        assert!(world.is_home(Coordinate::new(0, 0)));
        assert_eq!(bot.stats().games, 1);
    }

    #[test]
    fn test_gamestate_emits_one_batch() {
        let mut bot = bot();
        bot.handle_frame(START).unwrap();

        let out = bot.handle_frame(STATE).unwrap();
        let Some(ClientMessage::GameActions { moves }) = out else {
            panic!("expected a move batch, got {:?}", out);
        };
        assert_eq!(moves.len(), 1);
        assert_eq!((moves[0].col, moves[0].row), (0, 0));
        assert_eq!(bot.stats().turns, 1);
    }

    #[test]
    fn test_gamestate_before_gamestart_is_ignored() {
        let mut bot = bot();
        assert_eq!(bot.handle_frame(STATE).unwrap(), None);
        assert!(bot.world().is_none());
    }

    #[test]
    fn test_gameend_blocks_gamestate() {
        let mut bot = bot();
        bot.handle_frame(START).unwrap();
        bot.handle_frame(br#"{"type":"gameend","content":{"gamescore":3,"score":120}}"#)
            .unwrap();

        assert_eq!(bot.phase(), GamePhase::Over);
        assert_eq!(bot.handle_frame(STATE).unwrap(), None);
        assert_eq!(bot.stats().last_game_score, Some(3));
        assert_eq!(bot.stats().score, Some(120));

        bot.handle_frame(START).unwrap();
        assert!(bot.handle_frame(STATE).unwrap().is_some());
        assert_eq!(bot.stats().games, 2);
    }

    #[test]
    fn test_mute_tracks_state_without_moves() {
        let mut bot = bot();
        bot.handle_frame(START).unwrap();
        bot.handle_frame(br#"{"type":"gamemute","content":{"reason":"timeout"}}"#)
            .unwrap();

        assert_eq!(bot.phase(), GamePhase::Muted);
        let out = bot
            .handle_frame(br#"{"type":"gamestate","content":{"gameobjects":[["a",2,3,0],["w",1,1]]}}"#)
            .unwrap();
        assert_eq!(out, None);
        let world = bot.world().unwrap();
        assert!(world.ant(Coordinate::new(3, 2)).is_some());
        assert!(world.is_wall(Coordinate::new(1, 1)));

        bot.handle_frame(START).unwrap();
        assert_eq!(bot.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_malformed_gamestate_leaves_world_untouched() {
        let mut bot = bot();
        bot.handle_frame(START).unwrap();
        bot.handle_frame(STATE).unwrap();
        let before = bot.world().unwrap().round();

        let bad = br#"{"type":"gamestate","content":{"gameobjects":[["w",4,4],["a",1]]}}"#;
        assert!(bot.handle_frame(bad).is_err());

        let world = bot.world().unwrap();
        assert_eq!(world.round(), before);
        assert!(!world.is_wall(Coordinate::new(4, 4)));
        assert_eq!(world.ant_count(), 1);
        assert_eq!(bot.stats().dropped_messages, 1);
    }

    #[test]
    fn test_invalid_map_is_rejected() {
        let mut bot = bot();
        let bad = br#"{"type":"gamestart","content":{"map":{"cols":0,"rows":5}}}"#;
        assert!(bot.handle_frame(bad).is_err());
        assert_eq!(bot.phase(), GamePhase::Lobby);
    }

    #[test]
    fn test_blank_frames_are_skipped() {
        let mut bot = bot();
        assert_eq!(bot.handle_frame(b"").unwrap(), None);
        assert_eq!(bot.handle_frame(b"  \r").unwrap(), None);
        assert_eq!(bot.stats().dropped_messages, 0);
    }

    #[test]
    fn test_login_is_recorded() {
        let mut bot = bot();
        bot.handle_frame(br#"{"type":"login","error":0,"content":{"nick":"antony","score":1500}}"#)
            .unwrap();
        assert_eq!(bot.stats().nick.as_deref(), Some("antony"));
        assert_eq!(bot.stats().score, Some(1500));
    }
}
