//! Channel-driven runtime around `duelist-battle`.
//!
//! The transport (a websocket, a replay file, a test) pushes raw server
//! frames into one channel and reads `/choose` commands from another:
//!
//! ```text
//! frames ──> MatchRouter ──> MatchState (per match)
//!                 │
//!                 └─ ready? ──> DecisionMaker ──> commands
//! ```
//!
//! The state engine never waits; all suspension happens on the channels.

mod config;
mod policy;
mod router;

use anyhow::{Result, bail};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub use config::AgentConfig;
pub use duelist_protocol::{Choice, ClientCommand, ClientMessage};
pub use policy::{DecisionMaker, FirstLegalPolicy, RandomPolicy};
pub use router::MatchRouter;

/// Handle to a running agent task
pub struct AgentHandle {
    /// Raw server frames go in here
    pub frames: mpsc::Sender<String>,
    /// Commands for the server come out here
    pub commands: mpsc::Receiver<ClientMessage>,
    /// Finishes once `frames` is dropped
    pub task: JoinHandle<Result<()>>,
}

/// Start a router task for the given config and policy
pub fn spawn<D>(config: &AgentConfig, policy: D) -> Result<AgentHandle>
where
    D: DecisionMaker + 'static,
{
    if config.command_buffer == 0 {
        bail!("command_buffer must be at least 1");
    }
    let dex = config.load_dex()?;
    let (frames_tx, frames_rx) = mpsc::channel(config.command_buffer);
    let (commands_tx, commands_rx) = mpsc::channel(config.command_buffer);

    let mut router = MatchRouter::new(config.username.clone(), dex, policy, commands_tx);
    let task = tokio::spawn(async move { router.run(frames_rx).await });

    tracing::info!(username = %config.username, "Agent started");
    Ok(AgentHandle {
        frames: frames_tx,
        commands: commands_rx,
        task,
    })
}
