use crate::net::frame::DEFAULT_MAX_FRAME_BYTES;
use crate::net::LoginMode;
use crate::planning::DEFAULT_PERSISTENCE;
use clap::Parser;

/// CLI arguments for the foraging bot
#[derive(Parser, Debug, Clone)]
#[command(name = "ant_forager", about = "🐜 Foraging bot for the ant game server")]
pub struct Args {
    /// Game server host
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Game server port
    #[arg(short = 'p', long, default_value_t = 12345)]
    pub port: u16,

    /// Bot token issued by the server
    #[arg(short = 't', long, default_value = "abc")]
    pub token: String,

    /// Login mode
    #[arg(long, value_enum, default_value_t = LoginMode::Training)]
    pub mode: LoginMode,

    /// Random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Chance an exploring ant keeps its last heading
    #[arg(long, default_value_t = DEFAULT_PERSISTENCE)]
    pub persistence: f64,

    /// Longest a socket read blocks before polling again, in milliseconds
    #[arg(long, default_value_t = 10)]
    pub poll_ms: u64,

    /// Largest accepted frame, in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_FRAME_BYTES)]
    pub max_frame_bytes: usize,

    /// Only log warnings and errors (RUST_LOG overrides)
    #[arg(short = 'q', long, default_value_t = false)]
    pub quiet: bool,
}

impl Args {
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn rng(&self) -> fastrand::Rng {
        match self.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        }
    }
}
