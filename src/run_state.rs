//! Outer state machine for a single climb.
//!
//! `Won` and `Lost` are terminal: the only way forward from either is a
//! brand-new `ClimbState` with a regenerated mountain.

use crate::error::GameError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RunPhase {
    /// Menu, avatar not chosen yet.
    #[default]
    Idle,
    Running,
    /// Simulation is frozen while the habit at this index is on screen.
    CheckpointOpen(usize),
    Won,
    Lost,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    AvatarSelected,
    CheckpointReached(usize),
    Acknowledged,
    Summit,
    HealthExhausted,
}

impl RunPhase {
    pub fn transition(self, trigger: Trigger) -> Result<RunPhase, GameError> {
        match (self, trigger) {
            (RunPhase::Idle, Trigger::AvatarSelected) => Ok(RunPhase::Running),
            (RunPhase::Running, Trigger::CheckpointReached(index)) => {
                Ok(RunPhase::CheckpointOpen(index))
            }
            (RunPhase::CheckpointOpen(_), Trigger::Acknowledged) => Ok(RunPhase::Running),
            (RunPhase::Running, Trigger::Summit) => Ok(RunPhase::Won),
            (RunPhase::Running, Trigger::HealthExhausted) => Ok(RunPhase::Lost),
            (from, trigger) => Err(GameError::InvalidTransition { from, trigger }),
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, RunPhase::Won | RunPhase::Lost)
    }

    pub fn is_paused(self) -> bool {
        matches!(self, RunPhase::CheckpointOpen(_))
    }

    pub fn open_checkpoint(self) -> Option<usize> {
        match self {
            RunPhase::CheckpointOpen(index) => Some(index),
            _ => None,
        }
    }

    /// Lowercase name used in headless output.
    pub fn label(self) -> &'static str {
        match self {
            RunPhase::Idle => "idle",
            RunPhase::Running => "running",
            RunPhase::CheckpointOpen(_) => "checkpoint_open",
            RunPhase::Won => "won",
            RunPhase::Lost => "lost",
        }
    }
}
