//! Transient player-facing messages (toasts).
//!
//! The controller fires a `Notice` at each notable transition and never
//! looks at what the notifier does with it.

use std::fmt;

use crate::types::LifeLoss;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    GameStarted,
    StageStarting(u32),
    Completed,
    WrongSequence { lives_left: u32 },
    TimeUp { lives_left: u32 },
    GameOver(LifeLoss),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::GameStarted => f.write_str("Game Started! Watch the sequence carefully!"),
            Notice::StageStarting(stage) => write!(f, "Stage {} Starting!", stage),
            Notice::Completed => f.write_str("🎉 Congratulations! You completed all stages!"),
            Notice::WrongSequence { lives_left } => {
                write!(f, "Wrong sequence! {} lives remaining.", lives_left)
            }
            Notice::TimeUp { lives_left } => write!(f, "Time's up! {} lives remaining.", lives_left),
            Notice::GameOver(LifeLoss::WrongInput) => f.write_str("Game Over! No lives remaining."),
            Notice::GameOver(LifeLoss::Timeout) => f.write_str("Game Over! Time's up!"),
        }
    }
}

/// Fire-and-forget sink for notices.
pub trait Notifier {
    fn notify(&mut self, notice: &Notice);
}

impl<F> Notifier for F
where
    F: FnMut(&Notice),
{
    fn notify(&mut self, notice: &Notice) {
        self(notice)
    }
}

/// Buffers notices until the host drains them.
#[derive(Debug, Default)]
pub struct NoticeQueue {
    pending: Vec<Notice>,
}

impl NoticeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn last(&self) -> Option<&Notice> {
        self.pending.last()
    }

    /// Take everything queued so far, oldest first.
    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.pending)
    }
}

impl Notifier for NoticeQueue {
    fn notify(&mut self, notice: &Notice) {
        self.pending.push(notice.clone());
    }
}
