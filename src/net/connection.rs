use crate::bot::Bot;
use crate::error::Result;
use crate::net::frame::FrameReader;
use crate::net::protocol::ClientMessage;
use crossbeam_channel::Sender;
use std::fmt;
use std::io::{ErrorKind, Read, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info, trace, warn};

/// Why a session ended
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Disconnect {
    /// Zero-length read: the server closed the socket
    RemoteClosed,
    /// Socket error while reading or writing
    Transport(String),
    /// Stop requested from the console
    Stopped,
}

impl fmt::Display for Disconnect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Disconnect::RemoteClosed => write!(f, "connection closed by server"),
            Disconnect::Transport(err) => write!(f, "transport error: {}", err),
            Disconnect::Stopped => write!(f, "stopped from console"),
        }
    }
}

/// What the receive thread hands to the sending side
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    Outbound(ClientMessage),
    Closed(Disconnect),
}

/// Write half of the server connection. Only the main thread sends.
#[derive(Debug)]
pub struct Connection {
    stream: TcpStream,
}

impl Connection {
    pub fn connect<A: ToSocketAddrs>(addr: A) -> Result<Self> {
        let stream = TcpStream::connect(addr)?;
        stream.set_nodelay(true)?;
        info!(peer = %stream.peer_addr()?, "connected");
        Ok(Self { stream })
    }

    /// Encode, frame and write one message
    pub fn send(&mut self, msg: &ClientMessage) -> Result<()> {
        let bytes = msg.encode()?;
        self.stream.write_all(&bytes)?;
        self.stream.flush()?;
        trace!(bytes = bytes.len(), "message sent");
        Ok(())
    }

    /// Independent handle on the same socket for the receive thread
    pub fn reader(&self) -> Result<TcpStream> {
        Ok(self.stream.try_clone()?)
    }

    /// Close both directions; wakes up the receive thread
    pub fn shutdown(&self) {
        if let Err(err) = self.stream.shutdown(Shutdown::Both) {
            debug!(%err, "shutdown on a closed socket");
        }
    }
}

/// Receive thread settings
#[derive(Clone, Copy, Debug)]
pub struct ReceiverConfig {
    /// Longest a read blocks before polling again
    pub poll: Duration,
    pub max_frame_bytes: usize,
}

/// Start the receive activity on `stream`. The thread owns the bot and gives
/// it back when the connection ends.
pub fn spawn_receiver(
    stream: TcpStream,
    bot: Bot,
    config: ReceiverConfig,
    events: Sender<SessionEvent>,
) -> Result<JoinHandle<Bot>> {
    stream.set_read_timeout(Some(config.poll))?;
    let handle = thread::Builder::new()
        .name("receiver".to_string())
        .spawn(move || run_receiver(stream, bot, config.max_frame_bytes, &events))?;
    Ok(handle)
}

/// Read, frame and dispatch until the stream ends.
///
/// Every outbound message goes to `events`; a final `Closed` event carries the
/// reason the loop stopped.
pub fn run_receiver<R: Read>(
    mut stream: R,
    mut bot: Bot,
    max_frame_bytes: usize,
    events: &Sender<SessionEvent>,
) -> Bot {
    let mut reader = FrameReader::new(max_frame_bytes);
    let mut buf = [0u8; 8192];

    let reason = loop {
        match stream.read(&mut buf) {
            Ok(0) => break Disconnect::RemoteClosed,
            Ok(n) => {
                for payload in reader.feed(&buf[..n]) {
                    match bot.handle_frame(&payload) {
                        Ok(Some(msg)) => {
                            if events.send(SessionEvent::Outbound(msg)).is_err() {
                                debug!("sender gone, stopping receive loop");
                                return bot;
                            }
                        }
                        Ok(None) => {}
                        Err(err) => warn!(%err, bytes = payload.len(), "dropping message"),
                    }
                }
            }
            Err(err)
                if matches!(
                    err.kind(),
                    ErrorKind::WouldBlock | ErrorKind::TimedOut | ErrorKind::Interrupted
                ) => {}
            Err(err) => break Disconnect::Transport(err.to_string()),
        }
    };

    info!(%reason, "receive loop finished");
    let _ = events.send(SessionEvent::Closed(reason));
    bot
}
