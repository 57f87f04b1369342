//! Display-less autopilot run.
//!
//! Holds climb and attack, stays on the checkpoint column and acknowledges
//! every checkpoint on the frame after it opens.  Used by `--headless` and
//! by the smoke test.

use crossterm::event::KeyCode;
use serde::Serialize;
use tracing::info;

use crate::config::GameConfig;
use crate::driver::{GameLoop, ManualHost};
use crate::entities::{Avatar, Snapshot};
use crate::error::GameError;
use crate::input::{InputTracker, KeyTarget};
use crate::raster::Surface;
use crate::worldgen::start_run;

#[derive(Debug, Clone, Serialize)]
pub struct HeadlessReport {
    pub frames: u64,
    pub phase: &'static str,
    pub avatar: Avatar,
    pub snapshot: Snapshot,
    pub enemies_defeated: usize,
}

pub fn run_autopilot(
    config: &GameConfig,
    avatar: Avatar,
    max_frames: u64,
) -> Result<HeadlessReport, GameError> {
    config.validate()?;
    let mut rng = config.world_rng();
    let mut host = ManualHost::new();
    let mut surface = Surface::new(config.viewport.width, config.viewport.height);
    let mut tracker = InputTracker::new(config.hold_window);
    let mut game = GameLoop::start(start_run(config.viewport, avatar, &mut rng)?, &mut host);

    let mut frames = 0;
    while frames < max_frames {
        let Some(frame) = host.fire() else {
            break;
        };
        frames += 1;

        tracker.press(KeyCode::Up, KeyTarget::Game);
        tracker.press(KeyCode::Char(' '), KeyTarget::Game);
        game.on_frame(&mut host, frame, &tracker.held(), &mut surface);
        tracker.advance_frame();

        if game.phase().is_paused() {
            game.acknowledge()?;
        }
    }
    game.teardown(&mut host);

    let state = game.state();
    let report = HeadlessReport {
        frames,
        phase: state.phase.label(),
        avatar,
        snapshot: state.snapshot,
        enemies_defeated: state.enemies.iter().filter(|e| !e.alive).count(),
    };
    info!(
        frames = report.frames,
        phase = report.phase,
        altitude = report.snapshot.altitude,
        checkpoints = report.snapshot.checkpoints_reached,
        health = report.snapshot.health,
        "Headless climb completed"
    );
    Ok(report)
}
