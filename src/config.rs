use std::fs;
use std::path::Path;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::entities::Viewport;
use crate::error::GameError;

/// Runtime knobs for a climb session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub viewport: Viewport,
    /// Pins terrain and enemy layout; `None` draws a fresh mountain every run.
    pub seed: Option<u64>,
    /// Display refresh cadence the frame host paces ticks to.
    pub frames_per_second: u32,
    /// Frames a key stays held without a press/repeat event.  `None` trusts
    /// key-release events completely.
    pub hold_window: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            seed: None,
            frames_per_second: 60,
            hold_window: Some(8),
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        if self.viewport.width < 300 {
            return Err(GameError::InvalidConfig("viewport width must be at least 300"));
        }
        if self.viewport.height < 200 {
            return Err(GameError::InvalidConfig("viewport height must be at least 200"));
        }
        if self.frames_per_second == 0 || self.frames_per_second > 240 {
            return Err(GameError::InvalidConfig("frames per second must be in 1..=240"));
        }
        if self.hold_window == Some(0) {
            return Err(GameError::InvalidConfig("hold window must be at least one frame"));
        }
        Ok(())
    }

    /// Read a JSON config file; missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self, GameError> {
        let text = fs::read_to_string(path).map_err(|source| GameError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| GameError::ConfigFormat {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Hosts that report key releases get exact held state; the hold window
    /// only covers hosts that never send them.
    pub fn with_release_events(self, reported: bool) -> Self {
        if reported {
            Self { hold_window: None, ..self }
        } else {
            self
        }
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.frames_per_second.max(1)))
    }

    /// RNG for world generation: seeded when a seed is pinned, entropy otherwise.
    pub fn world_rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
