use crate::bot::{Bot, BotStats};
use crate::cli::Args;
use crate::error::{BotError, Result};
use crate::net::connection::{spawn_receiver, ReceiverConfig};
use crate::net::{ClientMessage, Connection, Disconnect, SessionEvent};
use crate::planning::MovePlanner;
use crossbeam_channel::{never, select, unbounded, Receiver};
use std::io::BufRead;
use std::thread;
use std::time::Duration;
use tracing::{info, warn};

/// Commands typed on the console while the bot runs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsoleCommand {
    Stop,
}

impl ConsoleCommand {
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "stop" | "quit" | "exit" => Some(ConsoleCommand::Stop),
            _ => None,
        }
    }
}

/// How a session went
#[derive(Clone, Debug)]
pub struct SessionSummary {
    pub reason: Disconnect,
    pub stats: BotStats,
}

/// Connect, log in, and play until the connection ends or the console says stop
pub fn run(args: &Args) -> Result<SessionSummary> {
    let mut conn = Connection::connect(args.server_addr())?;
    let bot = Bot::new(MovePlanner::new(args.persistence), args.rng());
    let config = ReceiverConfig {
        poll: Duration::from_millis(args.poll_ms.max(1)),
        max_frame_bytes: args.max_frame_bytes,
    };

    let (events_tx, events) = unbounded();
    let receiver = spawn_receiver(conn.reader()?, bot, config, events_tx)?;
    let console = spawn_console();
    let closed_console = never();
    let mut console_open = true;

    let reason = match conn.send(&ClientMessage::login(args.token.clone(), args.mode)) {
        Ok(()) => {
            info!(mode = ?args.mode, "login sent");
            let mut outcome = None;
            while outcome.is_none() {
                let console_rx = if console_open { &console } else { &closed_console };
                select! {
                    recv(events) -> event => match event {
                        Ok(SessionEvent::Outbound(msg)) => {
                            if let Err(err) = conn.send(&msg) {
                                warn!(%err, "send failed");
                                outcome = Some(Disconnect::Transport(err.to_string()));
                            }
                        }
                        Ok(SessionEvent::Closed(reason)) => outcome = Some(reason),
                        Err(_) => outcome = Some(Disconnect::Transport("receive thread gone".to_string())),
                    },
                    recv(console_rx) -> cmd => match cmd {
                        Ok(ConsoleCommand::Stop) => {
                            info!("stop requested from console");
                            outcome = Some(Disconnect::Stopped);
                        }
                        Err(_) => console_open = false,
                    },
                }
            }
            outcome.unwrap_or(Disconnect::Stopped)
        }
        Err(err) => {
            warn!(%err, "login failed");
            Disconnect::Transport(err.to_string())
        }
    };

    conn.shutdown();
    let bot = receiver.join().map_err(|_| BotError::ReceiverPanicked)?;
    Ok(SessionSummary {
        reason,
        stats: bot.stats().clone(),
    })
}

/// Read console commands on a detached thread. The channel closes on stdin EOF.
fn spawn_console() -> Receiver<ConsoleCommand> {
    let (tx, rx) = unbounded();
    let spawned = thread::Builder::new()
        .name("console".to_string())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                match ConsoleCommand::parse(&line) {
                    Some(cmd) => {
                        if tx.send(cmd).is_err() {
                            break;
                        }
                    }
                    None if line.trim().is_empty() => {}
                    None => warn!(input = %line.trim(), "unknown console command"),
                }
            }
        });
    if let Err(err) = spawned {
        warn!(%err, "console unavailable");
    }
    rx
}
