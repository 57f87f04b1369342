use std::path::PathBuf;

use thiserror::Error;

use crate::run_state::{RunPhase, Trigger};

/// Errors surfaced by the climb engine outside the per-tick simulation.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("cannot apply {trigger:?} while {from:?}")]
    InvalidTransition { from: RunPhase, trigger: Trigger },
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    #[error("failed to read config {}", path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {}", path.display())]
    ConfigFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to read guidebook {}", path.display())]
    GuidebookIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse guidebook")]
    GuidebookFormat(#[from] serde_json::Error),
    #[error("guidebook must contain exactly 7 habits, found {0}")]
    GuidebookLength(usize),
}
