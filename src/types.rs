//! Core data types for a game session.
//!
//! Serialized shapes use camelCase so the browser host sees the same field
//! names and status strings it would in a JS-only implementation.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::config::GameConfig;

/// Session phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GameStatus {
    /// Nothing running; waiting for Start.
    Idle,
    /// Accepting clicks; countdown running.
    Playing,
    /// Sequence playback in progress (or about to begin).
    Waiting,
    GameOver,
    Completed,
}

/// Why a life was lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LifeLoss {
    WrongInput,
    Timeout,
}

/// Complete mutable game state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSession {
    pub stage: u32,
    pub score: u32,
    pub lives: u32,
    /// Cells currently lit; at most one during playback.
    pub active_buttons: BTreeSet<usize>,
    pub status: GameStatus,
    pub time_left: u32,
    pub sequence: Vec<usize>,
    /// Always a prefix of `sequence`.
    pub player_sequence: Vec<usize>,
}

impl GameSession {
    /// Fresh idle session.
    pub fn initial(config: &GameConfig) -> Self {
        Self {
            stage: 1,
            score: 0,
            lives: config.initial_lives,
            active_buttons: BTreeSet::new(),
            status: GameStatus::Idle,
            time_left: config.stage_time_secs,
            sequence: Vec::new(),
            player_sequence: Vec::new(),
        }
    }

    /// The cell the player must click next, if input is still expected.
    pub fn expected_cell(&self) -> Option<usize> {
        self.sequence.get(self.player_sequence.len()).copied()
    }
}

/// Result of one click, for hosts that want to react without diffing state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ClickOutcome {
    /// Not accepting input right now.
    Ignored,
    /// Correct cell, more to go.
    Accepted { progress: usize },
    /// Stage cleared; the next sequence plays shortly.
    #[serde(rename_all = "camelCase")]
    StageCleared { next_stage: u32, score: u32 },
    /// Last stage cleared.
    Completed { score: u32 },
    /// Wrong cell; the stage restarts from its first cell.
    #[serde(rename_all = "camelCase")]
    Mistake { lives_left: u32 },
    GameOver,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_session() {
        let s = GameSession::initial(&GameConfig::default());
        assert_eq!(s.stage, 1);
        assert_eq!(s.score, 0);
        assert_eq!(s.lives, 3);
        assert_eq!(s.time_left, 10);
        assert_eq!(s.status, GameStatus::Idle);
        assert!(s.sequence.is_empty());
        assert!(s.player_sequence.is_empty());
        assert!(s.active_buttons.is_empty());
    }

    #[test]
    fn test_expected_cell() {
        let mut s = GameSession::initial(&GameConfig::default());
        assert_eq!(s.expected_cell(), None);
        s.sequence = vec![2, 5, 9];
        assert_eq!(s.expected_cell(), Some(2));
        s.player_sequence = vec![2, 5];
        assert_eq!(s.expected_cell(), Some(9));
        s.player_sequence.push(9);
        assert_eq!(s.expected_cell(), None);
    }

    #[test]
    fn test_wire_shape() {
        let mut s = GameSession::initial(&GameConfig::default());
        s.status = GameStatus::GameOver;
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["status"], "gameOver");
        assert_eq!(json["timeLeft"], 10);
        assert!(json["playerSequence"].is_array());
        assert!(json["activeButtons"].is_array());
    }

    #[test]
    fn test_outcome_tagging() {
        let json = serde_json::to_value(ClickOutcome::Mistake { lives_left: 2 }).unwrap();
        assert_eq!(json["kind"], "mistake");
        assert_eq!(json["livesLeft"], 2);

        let json = serde_json::to_value(ClickOutcome::StageCleared { next_stage: 2, score: 180 }).unwrap();
        assert_eq!(json["kind"], "stageCleared");
        assert_eq!(json["nextStage"], 2);
        assert_eq!(json["score"], 180);

        let json = serde_json::to_value(ClickOutcome::GameOver).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "gameOver" }));
    }
}
