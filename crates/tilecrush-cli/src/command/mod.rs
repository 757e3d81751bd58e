use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rand::Rng as _;
use tilecrush_engine::{DEFAULT_TOOL_CHARGES, GameSession, SessionConfig, SessionSeed};

use self::{play::PlayArg, simulate::SimulateArg};

mod play;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play interactively in the terminal (default)
    Play(#[clap(flatten)] PlayArg),
    /// Let a greedy player click through a session and print a JSON summary
    Simulate(#[clap(flatten)] SimulateArg),
}

/// Options shared by every mode.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SessionArg {
    /// Seed as 32 hex digits (random if omitted)
    #[clap(long)]
    seed: Option<SessionSeed>,
    /// Tool charges at start and after each reset
    #[clap(long, default_value_t = DEFAULT_TOOL_CHARGES)]
    tools: u32,
    /// File that receives log output
    #[clap(long, default_value = "tilecrush.log")]
    log_file: PathBuf,
}

impl Default for SessionArg {
    fn default() -> Self {
        Self {
            seed: None,
            tools: DEFAULT_TOOL_CHARGES,
            log_file: PathBuf::from("tilecrush.log"),
        }
    }
}

impl SessionArg {
    fn new_session(&self) -> GameSession {
        let seed = self.seed.unwrap_or_else(|| rand::rng().random());
        let config = SessionConfig {
            initial_tools: self.tools,
        };
        log::info!("new session with seed {seed}");
        GameSession::with_config(config, seed)
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Simulate(arg) => simulate::run(&arg)?,
    }
    Ok(())
}
