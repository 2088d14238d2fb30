//! Game controller: owns the session and drives every transition.
//!
//! State machine over `GameStatus`:
//! - idle -> waiting (start)
//! - waiting -> playing (playback finished)
//! - playing -> waiting (stage cleared, more stages left)
//! - playing -> completed (last stage cleared)
//! - playing -> gameOver (lives exhausted by a wrong click or timeout)
//! - any -> idle (reset), any -> waiting (start)
//!
//! Delayed work (highlights, the stage-advance pause, the countdown) lives
//! in a `Scheduler` owned next to the session. Start and reset clear it
//! before touching the session, so an event scheduled for one session can
//! never land on another.

use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use crate::config::GameConfig;
use crate::error::GameError;
use crate::notify::{Notice, Notifier};
use crate::rng::GameRng;
use crate::scheduler::{Scheduler, TimerHandle};
use crate::sequence::generate_sequence;
use crate::types::{ClickOutcome, GameSession, GameStatus, LifeLoss};
use crate::view::{progress_percent, ControlAction, GridView, HudView, ProgressView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GameEvent {
    HighlightOn(usize),
    HighlightOff,
    PlaybackDone,
    /// Replay the current sequence after a stage clear.
    ReplaySequence,
    Tick,
}

pub struct GameController<N: Notifier> {
    config: GameConfig,
    session: GameSession,
    timers: Scheduler<GameEvent>,
    countdown: Option<TimerHandle>,
    rng: GameRng,
    notifier: N,
}

impl<N: Notifier> GameController<N> {
    /// Controller with an entropy-seeded RNG.
    pub fn new(config: GameConfig, notifier: N) -> Result<Self, GameError> {
        Self::with_rng(config, GameRng::new(), notifier)
    }

    /// Controller whose sequences are reproducible from `seed`.
    pub fn with_seed(config: GameConfig, seed: u64, notifier: N) -> Result<Self, GameError> {
        Self::with_rng(config, GameRng::from_seed(seed), notifier)
    }

    pub fn with_rng(config: GameConfig, rng: GameRng, notifier: N) -> Result<Self, GameError> {
        config.validate()?;
        let session = GameSession::initial(&config);
        Ok(Self {
            config,
            session,
            timers: Scheduler::new(),
            countdown: None,
            rng,
            notifier,
        })
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn status(&self) -> GameStatus {
        self.session.status
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    /// Number of scheduled events not yet fired.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Virtual clock in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.timers.now()
    }

    pub fn progress_percent(&self) -> f64 {
        progress_percent(&self.session, self.config.stages)
    }

    pub fn grid_view(&self) -> GridView {
        GridView::from_session(&self.session, self.config.grid_size)
    }

    pub fn progress_view(&self) -> ProgressView {
        ProgressView::from_session(&self.session, self.config.stages)
    }

    pub fn hud_view(&self) -> HudView {
        HudView::from_session(&self.session)
    }

    pub fn available_action(&self) -> ControlAction {
        ControlAction::for_status(self.session.status)
    }

    /// Begin a new game at stage 1, discarding whatever was running.
    pub fn start_game(&mut self) {
        self.cancel_timers();
        let sequence = generate_sequence(1, &self.config, &mut self.rng);
        self.session = GameSession {
            stage: 1,
            score: 0,
            lives: self.config.initial_lives,
            active_buttons: BTreeSet::new(),
            status: GameStatus::Waiting,
            time_left: self.config.stage_time_secs,
            sequence,
            player_sequence: Vec::new(),
        };
        info!(
            stage = 1,
            lives = self.session.lives,
            len = self.session.sequence.len(),
            "game started"
        );
        self.show_sequence();
        self.notifier.notify(&Notice::GameStarted);
    }

    /// Back to the idle session; pending timers are dropped.
    pub fn reset_game(&mut self) {
        let dropped = self.cancel_timers();
        self.session = GameSession::initial(&self.config);
        debug!(dropped, "session reset");
    }

    /// Schedule playback of the current sequence.
    fn show_sequence(&mut self) {
        self.session.status = GameStatus::Waiting;
        self.session.active_buttons.clear();

        let step = self.config.step_ms;
        let flash = self.config.flash_ms;
        for (i, &cell) in self.session.sequence.iter().enumerate() {
            let on = (i as u64).saturating_mul(step);
            self.timers.schedule(on, GameEvent::HighlightOn(cell));
            self.timers.schedule(on.saturating_add(flash), GameEvent::HighlightOff);
        }
        let done = self.config.playback_ms(self.session.sequence.len());
        self.timers.schedule(done, GameEvent::PlaybackDone);
        debug!(
            stage = self.session.stage,
            len = self.session.sequence.len(),
            done_in_ms = done,
            "playback scheduled"
        );
    }

    pub fn handle_button_click(&mut self, cell: usize) -> Result<ClickOutcome, GameError> {
        if cell >= self.config.grid_size {
            warn!(cell, grid_size = self.config.grid_size, "click outside grid");
            return Err(GameError::CellOutOfRange {
                cell,
                grid_size: self.config.grid_size,
            });
        }
        if self.session.status != GameStatus::Playing {
            debug!(cell, status = ?self.session.status, "click ignored");
            return Ok(ClickOutcome::Ignored);
        }
        // Clearing the last cell leaves `Playing`, so a playing session
        // always expects one more cell.
        let Some(expected) = self.session.expected_cell() else {
            return Ok(ClickOutcome::Ignored);
        };

        if cell != expected {
            return Ok(self.lose_life(LifeLoss::WrongInput));
        }

        self.session.player_sequence.push(cell);
        if self.session.player_sequence.len() < self.session.sequence.len() {
            return Ok(ClickOutcome::Accepted {
                progress: self.session.player_sequence.len(),
            });
        }

        Ok(self.clear_stage())
    }

    /// Feed elapsed host time in; fires every due event in order.
    /// Returns how many events fired.
    pub fn advance(&mut self, elapsed_ms: u64) -> usize {
        let until = self.timers.now().saturating_add(elapsed_ms);
        let mut fired = 0;
        while let Some(event) = self.timers.pop_due(until) {
            self.dispatch(event);
            fired += 1;
        }
        self.timers.settle(until);
        fired
    }

    fn dispatch(&mut self, event: GameEvent) {
        match event {
            GameEvent::HighlightOn(cell) => {
                self.session.active_buttons.clear();
                self.session.active_buttons.insert(cell);
            }
            GameEvent::HighlightOff => self.session.active_buttons.clear(),
            GameEvent::PlaybackDone => {
                self.session.status = GameStatus::Playing;
                self.session.time_left = self.config.stage_time_secs;
                self.arm_countdown();
                debug!(stage = self.session.stage, "input open");
            }
            GameEvent::ReplaySequence => self.show_sequence(),
            GameEvent::Tick => self.on_tick(),
        }
    }

    fn on_tick(&mut self) {
        self.countdown = None;
        if self.session.status != GameStatus::Playing {
            return;
        }
        self.session.time_left = self.session.time_left.saturating_sub(1);
        debug!(time_left = self.session.time_left, "tick");
        if self.session.time_left == 0 {
            self.lose_life(LifeLoss::Timeout);
        } else {
            self.arm_countdown();
        }
    }

    fn clear_stage(&mut self) -> ClickOutcome {
        self.stop_countdown();
        let stage = self.session.stage;
        let gained = stage * 100 + self.session.time_left * 10;
        self.session.score = self.session.score.saturating_add(gained);
        let score = self.session.score;

        if stage >= self.config.stages {
            self.session.status = GameStatus::Completed;
            info!(stage, score, "all stages cleared");
            self.notifier.notify(&Notice::Completed);
            return ClickOutcome::Completed { score };
        }

        let next_stage = stage + 1;
        self.session.stage = next_stage;
        self.session.sequence = generate_sequence(next_stage, &self.config, &mut self.rng);
        self.session.player_sequence.clear();
        self.session.status = GameStatus::Waiting;
        self.timers
            .schedule(self.config.advance_delay_ms, GameEvent::ReplaySequence);
        info!(stage, gained, score, "stage cleared");
        self.notifier.notify(&Notice::StageStarting(next_stage));
        ClickOutcome::StageCleared { next_stage, score }
    }

    fn lose_life(&mut self, cause: LifeLoss) -> ClickOutcome {
        let lives = self.session.lives.saturating_sub(1);
        if lives == 0 {
            self.session.lives = 0;
            self.session.status = GameStatus::GameOver;
            self.stop_countdown();
            info!(?cause, stage = self.session.stage, score = self.session.score, "game over");
            self.notifier.notify(&Notice::GameOver(cause));
            return ClickOutcome::GameOver;
        }

        self.session.lives = lives;
        self.session.player_sequence.clear();
        if cause == LifeLoss::Timeout {
            self.session.time_left = self.config.stage_time_secs;
        }
        // A life change restarts the countdown phase.
        self.arm_countdown();
        debug!(?cause, lives, "life lost");
        let notice = match cause {
            LifeLoss::WrongInput => Notice::WrongSequence { lives_left: lives },
            LifeLoss::Timeout => Notice::TimeUp { lives_left: lives },
        };
        self.notifier.notify(&notice);
        ClickOutcome::Mistake { lives_left: lives }
    }

    fn arm_countdown(&mut self) {
        self.stop_countdown();
        self.countdown = Some(self.timers.schedule(self.config.tick_ms, GameEvent::Tick));
    }

    fn stop_countdown(&mut self) {
        if let Some(handle) = self.countdown.take() {
            self.timers.cancel(handle);
        }
    }

    fn cancel_timers(&mut self) -> usize {
        self.countdown = None;
        self.timers.cancel_all()
    }
}
