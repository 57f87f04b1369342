//! Game loop driver: one simulation step plus one render per host frame.
//!
//! The host owns the frame-callback and input-listener registries (the
//! terminal binary paces frames against a deadline, tests use `ManualHost`).
//! A live loop holds exactly one pending frame and one input listener; a
//! finished or torn-down loop holds neither, so no tick can leak into a
//! dead run.

use tracing::{debug, info};

use crate::compute::step;
use crate::entities::{ClimbState, Snapshot};
use crate::error::GameError;
use crate::input::HeldKeys;
use crate::raster::Surface;
use crate::render::render;
use crate::run_state::{RunPhase, Trigger};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Registration surface offered by whatever drives the display.
pub trait FrameHost {
    /// Schedule one callback for the next display refresh.
    fn request_frame(&mut self) -> FrameId;
    fn cancel_frame(&mut self, id: FrameId);
    fn attach_input(&mut self) -> ListenerId;
    fn detach_input(&mut self, id: ListenerId);
}

// ── GameLoop ──────────────────────────────────────────────────────────────────

pub struct GameLoop {
    state: ClimbState,
    pending_frame: Option<FrameId>,
    listener: Option<ListenerId>,
}

impl GameLoop {
    pub fn start(state: ClimbState, host: &mut impl FrameHost) -> Self {
        let listener = host.attach_input();
        let frame = host.request_frame();
        info!(avatar = state.avatar.name(), "Climb loop started");
        Self {
            state,
            pending_frame: Some(frame),
            listener: Some(listener),
        }
    }

    pub fn state(&self) -> &ClimbState {
        &self.state
    }

    pub fn phase(&self) -> RunPhase {
        self.state.phase
    }

    /// Whether the loop still holds host registrations.
    pub fn is_active(&self) -> bool {
        self.pending_frame.is_some() || self.listener.is_some()
    }

    /// Frame callback.  Steps only while running, renders whether paused or
    /// not, and either re-arms the next frame or tears down on a terminal
    /// phase.
    pub fn on_frame(
        &mut self,
        host: &mut impl FrameHost,
        frame: FrameId,
        input: &HeldKeys,
        surface: &mut Surface,
    ) -> Snapshot {
        if self.pending_frame != Some(frame) {
            debug!(frame = frame.0, "Ignoring stale frame");
            return self.state.snapshot;
        }
        self.pending_frame = None;

        let snapshot = if self.state.phase.is_paused() {
            self.state.snapshot
        } else {
            step(&mut self.state, input)
        };
        render(&self.state, surface);

        if self.state.phase.is_terminal() {
            info!(
                phase = self.state.phase.label(),
                altitude = snapshot.altitude,
                checkpoints = snapshot.checkpoints_reached,
                "Climb finished"
            );
            self.teardown(host);
        } else {
            self.pending_frame = Some(host.request_frame());
        }
        snapshot
    }

    /// Close the open checkpoint and let the simulation continue.
    pub fn acknowledge(&mut self) -> Result<(), GameError> {
        self.state.phase = self.state.phase.transition(Trigger::Acknowledged)?;
        Ok(())
    }

    /// Drop every host registration.  Safe to call repeatedly.
    pub fn teardown(&mut self, host: &mut impl FrameHost) {
        if let Some(frame) = self.pending_frame.take() {
            host.cancel_frame(frame);
        }
        if let Some(listener) = self.listener.take() {
            host.detach_input(listener);
        }
    }

    /// Throw the current run away and start over on a fresh mountain.
    pub fn restart(&mut self, host: &mut impl FrameHost, state: ClimbState) {
        self.teardown(host);
        *self = GameLoop::start(state, host);
    }
}

// ── ManualHost ────────────────────────────────────────────────────────────────

/// In-process host that only records registrations.  Frames fire when the
/// owner calls `fire` and hands the id to `GameLoop::on_frame`, which makes
/// it suitable for headless runs and for checking that nothing outlives a
/// run.
#[derive(Debug, Default)]
pub struct ManualHost {
    next_id: u64,
    frames: Vec<FrameId>,
    listeners: Vec<ListenerId>,
}

impl ManualHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    pub fn active_listeners(&self) -> usize {
        self.listeners.len()
    }

    /// Pop the oldest scheduled frame, as a display refresh would.
    pub fn fire(&mut self) -> Option<FrameId> {
        if self.frames.is_empty() {
            None
        } else {
            Some(self.frames.remove(0))
        }
    }

    fn next(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl FrameHost for ManualHost {
    fn request_frame(&mut self) -> FrameId {
        let id = FrameId(self.next());
        self.frames.push(id);
        id
    }

    fn cancel_frame(&mut self, id: FrameId) {
        self.frames.retain(|f| *f != id);
    }

    fn attach_input(&mut self) -> ListenerId {
        let id = ListenerId(self.next());
        self.listeners.push(id);
        id
    }

    fn detach_input(&mut self, id: ListenerId) {
        self.listeners.retain(|l| *l != id);
    }
}
