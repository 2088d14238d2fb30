//! Render-only view models for the grid, progress bar, HUD and controls.
//!
//! Everything here is derived from a `GameSession` by value; the host
//! redraws from these after every call into the controller.

use serde::Serialize;

use crate::types::{GameSession, GameStatus};

/// Cosmetic colour of a cell, cycled by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CellVariant {
    Cyan,
    Purple,
    Pink,
    Green,
}

impl CellVariant {
    const CYCLE: [CellVariant; 4] = [Self::Cyan, Self::Purple, Self::Pink, Self::Green];

    pub fn for_index(index: usize) -> Self {
        Self::CYCLE[index % Self::CYCLE.len()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellView {
    pub index: usize,
    pub lit: bool,
    pub variant: CellVariant,
}

/// Grid renderer input. Clicks go back through `GameController::handle_button_click`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridView {
    pub cells: Vec<CellView>,
    /// False disables every cell.
    pub enabled: bool,
}

impl GridView {
    pub fn from_session(session: &GameSession, grid_size: usize) -> Self {
        let cells = (0..grid_size)
            .map(|index| CellView {
                index,
                lit: session.active_buttons.contains(&index),
                variant: CellVariant::for_index(index),
            })
            .collect();
        Self {
            cells,
            enabled: session.status == GameStatus::Playing,
        }
    }

    pub fn lit_cells(&self) -> Vec<usize> {
        self.cells.iter().filter(|c| c.lit).map(|c| c.index).collect()
    }
}

/// Progress indicator input.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressView {
    pub progress_percent: f64,
    pub stage: u32,
    pub total_stages: u32,
    /// "stage/total"
    pub label: String,
}

impl ProgressView {
    pub fn from_session(session: &GameSession, total_stages: u32) -> Self {
        Self {
            progress_percent: progress_percent(session, total_stages),
            stage: session.stage,
            total_stages,
            label: format!("{}/{}", session.stage, total_stages),
        }
    }
}

/// Score, lives and time badges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HudView {
    pub score: u32,
    pub lives: u32,
    pub time_left: u32,
}

impl HudView {
    pub fn from_session(session: &GameSession) -> Self {
        Self {
            score: session.score,
            lives: session.lives,
            time_left: session.time_left,
        }
    }
}

/// Call-to-action the host should offer for the current status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ControlAction {
    Start,
    TryAgain,
    PlayAgain,
    None,
}

impl ControlAction {
    pub fn for_status(status: GameStatus) -> Self {
        match status {
            GameStatus::Idle => Self::Start,
            GameStatus::GameOver => Self::TryAgain,
            GameStatus::Completed => Self::PlayAgain,
            GameStatus::Playing | GameStatus::Waiting => Self::None,
        }
    }

    pub fn label(self) -> Option<&'static str> {
        match self {
            Self::Start => Some("Start Game"),
            Self::TryAgain => Some("Try Again"),
            Self::PlayAgain => Some("Play Again"),
            Self::None => None,
        }
    }
}

/// Overall completion in percent.
///
/// Each finished stage is worth `100 / total_stages`; the current stage
/// contributes the matched fraction of its sequence. With no sequence the
/// in-stage term is zero.
pub fn progress_percent(session: &GameSession, total_stages: u32) -> f64 {
    if total_stages == 0 {
        return 0.0;
    }
    let per_stage = 100.0 / total_stages as f64;
    let done = session.stage.saturating_sub(1) as f64 * per_stage;
    let partial = if session.sequence.is_empty() {
        0.0
    } else {
        session.player_sequence.len() as f64 / session.sequence.len() as f64 * per_stage
    };
    (done + partial).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    fn session() -> GameSession {
        GameSession::initial(&GameConfig::default())
    }

    #[test]
    fn test_progress_mid_stage() {
        let mut s = session();
        s.stage = 3;
        s.sequence = vec![0, 1, 2, 3, 4];
        s.player_sequence = vec![0, 1];
        assert!((progress_percent(&s, 5) - 48.0).abs() < 1e-9);
    }

    #[test]
    fn test_progress_idle_is_zero() {
        assert_eq!(progress_percent(&session(), 5), 0.0);
    }

    #[test]
    fn test_progress_completed_is_full() {
        let mut s = session();
        s.stage = 5;
        s.sequence = vec![1; 7];
        s.player_sequence = vec![1; 7];
        assert!((progress_percent(&s, 5) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_variants_cycle() {
        assert_eq!(CellVariant::for_index(0), CellVariant::Cyan);
        assert_eq!(CellVariant::for_index(5), CellVariant::Purple);
        assert_eq!(CellVariant::for_index(10), CellVariant::Pink);
        assert_eq!(CellVariant::for_index(15), CellVariant::Green);
    }

    #[test]
    fn test_grid_view() {
        let mut s = session();
        s.active_buttons.insert(6);
        let grid = GridView::from_session(&s, 16);
        assert_eq!(grid.cells.len(), 16);
        assert_eq!(grid.lit_cells(), vec![6]);
        assert!(!grid.enabled);

        s.status = GameStatus::Playing;
        s.active_buttons.clear();
        let grid = GridView::from_session(&s, 16);
        assert!(grid.enabled);
        assert!(grid.lit_cells().is_empty());
    }

    #[test]
    fn test_progress_view_label() {
        let mut s = session();
        s.stage = 2;
        let view = ProgressView::from_session(&s, 5);
        assert_eq!(view.label, "2/5");
        assert_eq!(view.total_stages, 5);
        assert!((view.progress_percent - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_control_actions() {
        assert_eq!(ControlAction::for_status(GameStatus::Idle), ControlAction::Start);
        assert_eq!(ControlAction::for_status(GameStatus::GameOver), ControlAction::TryAgain);
        assert_eq!(ControlAction::for_status(GameStatus::Completed), ControlAction::PlayAgain);
        assert_eq!(ControlAction::for_status(GameStatus::Waiting), ControlAction::None);
        assert_eq!(ControlAction::PlayAgain.label(), Some("Play Again"));
        assert_eq!(ControlAction::None.label(), None);
    }
}
