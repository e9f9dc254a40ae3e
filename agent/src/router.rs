//! Routes server frames to per-match state and answers requests

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use anyhow::{Result, anyhow};
use duelist_battle::{Dex, MatchState};
use duelist_protocol::{ClientCommand, ClientMessage, parse_server_frame, split_line};
use tokio::sync::mpsc;

use crate::policy::DecisionMaker;

/// Owns every match in progress.
///
/// Each match is created on the first frame that names it and dropped once
/// it ends; frames that trail a finished match are ignored. A decision is
/// requested after a frame delivered a request and left the match ready,
/// and the resulting command goes out on the channel.
pub struct MatchRouter<D: DecisionMaker> {
    username: String,
    dex: Arc<Dex>,
    policy: D,
    matches: HashMap<String, MatchState>,
    finished: HashSet<String>,
    commands: mpsc::Sender<ClientMessage>,
}

impl<D: DecisionMaker> MatchRouter<D> {
    pub fn new(
        username: impl Into<String>,
        dex: Arc<Dex>,
        policy: D,
        commands: mpsc::Sender<ClientMessage>,
    ) -> Self {
        Self {
            username: username.into(),
            dex,
            policy,
            matches: HashMap::new(),
            finished: HashSet::new(),
            commands,
        }
    }

    /// Matches currently tracked
    pub fn matches(&self) -> &HashMap<String, MatchState> {
        &self.matches
    }

    pub fn match_state(&self, match_id: &str) -> Option<&MatchState> {
        self.matches.get(match_id)
    }

    /// Consume frames until the sender side closes
    pub async fn run(&mut self, mut frames: mpsc::Receiver<String>) -> Result<()> {
        while let Some(frame) = frames.recv().await {
            self.handle_frame(&frame).await?;
        }
        tracing::info!(open_matches = self.matches.len(), "Frame stream closed");
        Ok(())
    }

    /// Apply one websocket frame (`>match-id` header plus lines).
    ///
    /// Frames for non-battle rooms are ignored. Fails only when the command
    /// channel is closed.
    pub async fn handle_frame(&mut self, frame: &str) -> Result<()> {
        let frame = parse_server_frame(frame);
        let Some(match_id) = frame.room_id else {
            return Ok(());
        };
        if !match_id.starts_with("battle-") {
            tracing::trace!(room = %match_id, "Ignoring non-battle frame");
            return Ok(());
        }
        if self.finished.contains(&match_id) {
            tracing::trace!(match_id = %match_id, "Ignoring frame for finished match");
            return Ok(());
        }

        let mut requested = false;
        for line in &frame.lines {
            requested |= self.handle_line(&match_id, line);
        }

        if requested {
            self.decide(&match_id).await?;
        }
        self.drop_if_ended(&match_id);
        Ok(())
    }

    /// Apply one line; returns true when it was an ingested request
    fn handle_line(&mut self, match_id: &str, line: &str) -> bool {
        let state = self.matches.entry(match_id.to_string()).or_insert_with(|| {
            tracing::info!(match_id, "Tracking new match");
            MatchState::new(match_id, self.username.as_str(), Arc::clone(&self.dex))
        });

        let parts = split_line(line);
        if parts.get(1) == Some(&"request") {
            let payload = parts.get(2..).map(|p| p.join("|")).unwrap_or_default();
            if payload.trim().is_empty() {
                return false;
            }
            return match state.apply_request_json(&payload) {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!(match_id, error = %e, "Request not ingested");
                    false
                }
            };
        }

        // the engine logs its own warnings
        let _ = state.apply_line(line);
        false
    }

    async fn decide(&mut self, match_id: &str) -> Result<()> {
        let Some(state) = self.matches.get(match_id) else {
            return Ok(());
        };
        if !state.is_ready() {
            tracing::debug!(match_id, wait = state.is_waiting(), "Request needs no answer");
            return Ok(());
        }

        let Some(choice) = self.policy.decide(state) else {
            tracing::warn!(match_id, turn = state.turn(), "Policy made no choice");
            return Ok(());
        };

        tracing::debug!(
            match_id,
            turn = state.turn(),
            choice = %choice.to_protocol_string(),
            "Sending choice"
        );
        self.commands
            .send(ClientMessage::in_room(match_id, ClientCommand::Choose(choice)))
            .await
            .map_err(|_| anyhow!("Command channel closed"))
    }

    fn drop_if_ended(&mut self, match_id: &str) {
        if let Some(state) = self.matches.get(match_id)
            && state.is_ended()
        {
            tracing::info!(
                match_id,
                winner = ?state.winner(),
                won = state.won(),
                tie = state.is_tie(),
                "Match finished"
            );
            self.matches.remove(match_id);
            self.finished.insert(match_id.to_string());
        }
    }
}
