//! Per-tick climb simulation.
//!
//! `step` takes the run by exclusive reference together with the held-key
//! snapshot and advances it by exactly one tick.  It performs no I/O and
//! draws nothing; every proximity check runs in camera-relative screen space.

use tracing::{debug, info};

use crate::entities::{ClimbState, Snapshot, CHECKPOINT_COUNT, MOUNTAIN_HEIGHT};
use crate::input::HeldKeys;
use crate::run_state::{RunPhase, Trigger};

/// Margin that keeps the player inside the mountain's drawn edges.
pub const EDGE_MARGIN: f32 = 50.0;
pub const CHECKPOINT_REACH: f32 = 80.0;
pub const ENEMY_REACH: f32 = 60.0;
pub const ATTACK_DAMAGE: i32 = 2;

// ── Step ─────────────────────────────────────────────────────────────────────

/// Advance the run by one tick.  Outside `Running` the state is left alone
/// and the last published snapshot comes back unchanged.
pub fn step(state: &mut ClimbState, input: &HeldKeys) -> Snapshot {
    if state.phase != RunPhase::Running {
        return state.snapshot;
    }
    state.tick += 1;

    // ── 1. Horizontal movement ───────────────────────────────────────────────
    move_player(state, input);

    // ── 2. Climb ─────────────────────────────────────────────────────────────
    if input.climb {
        state.altitude += state.player.climb_speed;
        state.camera.y += state.player.climb_speed;
    }

    // ── 3. Attack is re-derived from the action key ──────────────────────────
    state.player.attacking = input.attack;

    // ── 4. Checkpoints ───────────────────────────────────────────────────────
    let opened = detect_checkpoints(state);

    // ── 5. Win ───────────────────────────────────────────────────────────────
    if reached_summit(state) {
        state.phase = advance(state.phase, Trigger::Summit);
        info!(tick = state.tick, altitude = state.altitude, "Reached the summit");
        return publish(state);
    }

    // ── 6. Enemy combat ──────────────────────────────────────────────────────
    resolve_combat(state);

    // ── 7. Phase & snapshot ──────────────────────────────────────────────────
    if state.player.health <= 0 {
        state.phase = advance(state.phase, Trigger::HealthExhausted);
        info!(tick = state.tick, altitude = state.altitude, "Climber ran out of health");
    } else if let Some(index) = opened {
        state.phase = advance(state.phase, Trigger::CheckpointReached(index));
    }

    publish(state)
}

// ── Stages ───────────────────────────────────────────────────────────────────

/// Lowest and highest x the player may occupy.
pub fn player_x_bounds(state: &ClimbState) -> (f32, f32) {
    let min = EDGE_MARGIN;
    let max = state.viewport.width as f32 - state.player.width - EDGE_MARGIN;
    (min, max.max(min))
}

fn move_player(state: &mut ClimbState, input: &HeldKeys) {
    if input.left {
        state.player.x -= state.player.speed;
    }
    if input.right {
        state.player.x += state.player.speed;
    }
    let (min, max) = player_x_bounds(state);
    state.player.x = state.player.x.clamp(min, max);
}

/// Tick off every unreached checkpoint in range.  When several trigger in
/// the same tick the last one in creation order is the one that opens.
fn detect_checkpoints(state: &mut ClimbState) -> Option<usize> {
    let player = &state.player;
    let camera = &state.camera;
    let mut opened = None;

    for checkpoint in state.checkpoints.iter_mut().filter(|c| !c.reached) {
        let screen_y = camera.to_screen(checkpoint.y);
        if (player.x - checkpoint.x).abs() < CHECKPOINT_REACH
            && (player.y - screen_y).abs() < CHECKPOINT_REACH
        {
            checkpoint.reached = true;
            state.checkpoints_reached += 1;
            opened = Some(checkpoint.index);
            info!(
                index = checkpoint.index,
                reached = state.checkpoints_reached,
                "Checkpoint reached"
            );
        }
    }
    opened
}

fn reached_summit(state: &ClimbState) -> bool {
    state.altitude >= MOUNTAIN_HEIGHT && usize::from(state.checkpoints_reached) == CHECKPOINT_COUNT
}

/// Attacking contact chips 2 health off an enemy; unattacked contact trades
/// the enemy for one point of player health.  Either way a living enemy
/// resolves at most once per tick.
fn resolve_combat(state: &mut ClimbState) {
    let camera = &state.camera;
    let player = &mut state.player;

    for enemy in state.enemies.iter_mut().filter(|e| e.alive) {
        let screen_y = camera.to_screen(enemy.y);
        if (player.x - enemy.x).abs() >= ENEMY_REACH || (player.y - screen_y).abs() >= ENEMY_REACH
        {
            continue;
        }

        if player.attacking {
            enemy.health -= ATTACK_DAMAGE;
            if enemy.health <= 0 {
                enemy.alive = false;
                debug!(x = enemy.x, y = enemy.y, "Enemy defeated");
            }
        } else {
            enemy.alive = false;
            player.health -= 1;
            debug!(health = player.health, "Climber hit by enemy");
        }
    }
}

/// Apply a transition the step has already proven legal.
fn advance(phase: RunPhase, trigger: Trigger) -> RunPhase {
    phase.transition(trigger).unwrap_or(phase)
}

fn publish(state: &mut ClimbState) -> Snapshot {
    state.snapshot = Snapshot {
        altitude: state.altitude.max(0.0).floor() as u32,
        checkpoints_reached: state.checkpoints_reached,
        health: state.player.health,
    };
    state.snapshot
}
